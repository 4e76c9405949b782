// ai
//! 🎬 *[the commands are lined up. the transforms are warmed up. the root element awaits.]*
//! *["Compose me," whispers the payload. "Wrap me in `<update>`."]*
//!
//! 🎼 The Composers module — dispatching commands and assembling the request body.
//!
//! The composer walks the command list once, front to back, hands each command to its
//! [`CommandTransform`](crate::transforms::CommandTransform), and wraps the concatenated
//! fragments in `<update>…</update>`.
//!
//! 🧠 Knowledge graph:
//! - Input: `&[Command]`, order preserved verbatim. The server executes in this order.
//! - Output: one XML document, no declaration, no namespaces, no whitespace between elements.
//! - Failure: `Command::Unsupported` aborts the whole call. The half-built buffer is
//!   dropped on the floor. No partial bodies. Not even a little one.
//!
//! ```text
//!   [Add, Delete, Commit]
//!        │
//!        ▼  match kind → AddXml / DeleteXml / CommitXml
//!   "<update>" + "<add>…</add>" + "<delete>…</delete>" + "<commit/>" + "</update>"
//! ```
//!
//! 🦆 (the duck composes... symphonies? payloads? both? the duck has no comment.)

use tracing::trace;

use crate::error::{Result, UpdateError};
use crate::query::Command;
use crate::transforms::{
    AddXml, CommandTransform, CommitXml, DeleteXml, OptimizeXml, RollbackXml, XmlOptions,
};

const ROOT_OPEN: &str = "<update>";
const ROOT_CLOSE: &str = "</update>";

/// 🎼 Serializes a command list into a complete `<update>` document.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlUpdateComposer {
    options: XmlOptions,
}

impl XmlUpdateComposer {
    pub fn new(options: XmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &XmlOptions {
        &self.options
    }

    /// 🎼 `"<update>" + fragments + "</update>"`, or an error and nothing at all.
    pub fn compose(&self, commands: &[Command]) -> Result<String> {
        // 🧮 Vibes-based pre-allocation: root tags plus a rough guess per command.
        let mut xml = String::with_capacity(ROOT_OPEN.len() + ROOT_CLOSE.len() + commands.len() * 64);
        xml.push_str(ROOT_OPEN);

        for (position, command) in commands.iter().enumerate() {
            trace!("🔄 serializing command #{position} ({})", command.kind());
            self.compose_one(position, command, &mut xml)?;
        }

        xml.push_str(ROOT_CLOSE);
        Ok(xml)
    }

    fn compose_one(&self, position: usize, command: &Command, xml: &mut String) -> Result<()> {
        let options = &self.options;
        match command {
            Command::Add(add) => AddXml::transform_command(add, options, xml),
            Command::Delete(delete) => DeleteXml::transform_command(delete, options, xml),
            Command::Optimize(optimize) => OptimizeXml::transform_command(optimize, options, xml),
            Command::Commit(commit) => CommitXml::transform_command(commit, options, xml),
            Command::Rollback => RollbackXml::transform_command(&(), options, xml),
            Command::Unsupported { kind } => {
                return Err(UpdateError::UnsupportedCommandKind {
                    kind: kind.clone(),
                    position,
                });
            }
        }
        Ok(())
    }
}

/// 🚀 Serialize with default [`XmlOptions`]. The raw-body primitive for callers who
/// don't need a full request descriptor.
pub fn serialize(commands: &[Command]) -> Result<String> {
    XmlUpdateComposer::default().compose(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Document;
    use crate::query::{AddCommand, CommitCommand, DeleteCommand, OptimizeCommand};
    use anyhow::Result;

    #[test]
    fn the_one_where_no_commands_still_makes_an_update() -> Result<()> {
        assert_eq!(serialize(&[])?, "<update></update>");
        Ok(())
    }

    #[test]
    fn the_one_where_fragments_come_out_in_the_order_they_went_in() -> Result<()> {
        let mut delete = DeleteCommand::new();
        delete.add_id("42");
        let commands = vec![
            Command::Rollback,
            Command::Commit(CommitCommand::new()),
            Command::Delete(delete),
            Command::Optimize(OptimizeCommand::new().with_wait_flush(false)),
            Command::Rollback,
        ];

        assert_eq!(
            serialize(&commands)?,
            concat!(
                "<update>",
                "<rollback/>",
                "<commit/>",
                "<delete><id>42</id></delete>",
                r#"<optimize waitFlush="false"/>"#,
                "<rollback/>",
                "</update>"
            )
        );
        Ok(())
    }

    #[test]
    fn the_one_where_an_unknown_kind_sinks_the_whole_ship() {
        let commands = vec![
            Command::Rollback,
            Command::Unsupported {
                kind: "upsert".to_string(),
            },
            Command::Commit(CommitCommand::new()),
        ];

        let result = serialize(&commands);
        assert_eq!(
            result,
            Err(UpdateError::UnsupportedCommandKind {
                kind: "upsert".to_string(),
                position: 1,
            }),
            "no body, no partial body, just the error"
        );
    }

    #[test]
    fn the_one_where_options_reach_the_add_serializer() -> Result<()> {
        let mut doc = Document::new();
        doc.set_field("say \"cheese\"", "ok");
        let mut add = AddCommand::new();
        add.add_document(doc);

        let escaping = XmlUpdateComposer::new(XmlOptions {
            escape_field_names: true,
        });
        assert!(escaping.options().escape_field_names);
        assert!(!XmlUpdateComposer::default().options().escape_field_names);
        let xml = escaping.compose(&[Command::Add(add)])?;
        // 🧪 the escaper leaves quotes alone, even in names. faithful, not fixed.
        assert_eq!(
            xml,
            r#"<update><add><doc><field name="say "cheese"">ok</field></doc></add></update>"#
        );
        Ok(())
    }
}
