// ai
//! 🔄 Transforms — one XML serializer per command kind 🎭🚀
//!
//! 🎬 COLD OPEN — INT. UNITED NATIONS — SIMULTANEOUS TRANSLATION BOOTH — 2:47 AM
//!
//! The translator had been awake for nineteen hours. Typed Rust commands on the left
//! screen. The update handler's XML dialect on the right. "It's just string concatenation,"
//! someone had written in the ticket. The translator's eye twitched. Then someone put an
//! ampersand in a product title.
//!
//! ## Architecture 📐
//!
//! ```text
//!   Command                 CommandTransform            XML fragment
//!  ┌──────────────┐       ┌──────────────────┐       ┌──────────────────────────┐
//!  │ Add          │──────▶│ AddXml           │──────▶│ <add ...><doc>..</doc>   │
//!  │ Delete       │──────▶│ DeleteXml        │──────▶│ <delete><id>..</id>..    │
//!  │ Optimize     │──────▶│ OptimizeXml      │──────▶│ <optimize .../>          │
//!  │ Commit       │──────▶│ CommitXml        │──────▶│ <commit .../>            │
//!  │ Rollback     │──────▶│ RollbackXml      │──────▶│ <rollback/>              │
//!  └──────────────┘       └──────────────────┘       └──────────────────────────┘
//!                              │
//!                              └── markup::{escape, attrib}  (shared)
//! ```
//!
//! Every transform is a zero-sized marker type with a static method. No vtables.
//! The composer picks one per command with an exhaustive `match`.
//!
//! ## Knowledge Graph 🧠
//! - Depends on: `query::*Command`, `common::Document`
//! - Used by: `composers` (wraps the fragments in `<update>`)
//! - Transforms are infallible. The only failure (unknown kind) is caught before dispatch.
//!
//! ⚠️ The singularity will speak every wire format natively. Until then, we concatenate. 🦆

use serde::Deserialize;

pub(crate) mod add;
pub(crate) mod commit;
pub(crate) mod delete;
pub mod markup;
pub(crate) mod optimize;
pub(crate) mod rollback;

pub(crate) use add::AddXml;
pub(crate) use commit::CommitXml;
pub(crate) use delete::DeleteXml;
pub(crate) use optimize::OptimizeXml;
pub(crate) use rollback::RollbackXml;

/// 🔧 Knobs for the XML dialect itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
    /// 🏷️ Run field names through the text escaper before they land in `name="..."`.
    ///
    /// Off by default: legacy output puts field names in raw, and downstream byte-for-byte
    /// comparisons depend on that. A field name containing `"` or `&` will produce broken
    /// XML with this off. Field names like that are rare. Rare is not never.
    pub escape_field_names: bool,
}

/// 📤 Turns one command into its XML fragment, appended to `xml`.
///
/// # Contract 📜
/// - Appends exactly one element (plus children) and nothing else
/// - Optional attributes: present when `Some`, absent when `None`, in a fixed order
/// - User text (ids, queries, field values) goes through `markup::escape`
pub(crate) trait CommandTransform {
    type Command: ?Sized;

    fn transform_command(command: &Self::Command, options: &XmlOptions, xml: &mut String);
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{CommandTransform, XmlOptions};

    /// 🧪 Render one command with default options, for asserting against literals.
    pub(crate) fn render<T: CommandTransform>(command: &T::Command) -> String {
        render_with::<T>(command, &XmlOptions::default())
    }

    pub(crate) fn render_with<T: CommandTransform>(command: &T::Command, options: &XmlOptions) -> String {
        let mut xml = String::new();
        T::transform_command(command, options, &mut xml);
        xml
    }
}
