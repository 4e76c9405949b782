//! 🖋️ Markup helpers — the two tiny functions every command serializer leans on.
//!
//! - [`escape`]: element text goes through here. `&`, `<`, `>` get entity-encoded.
//!   Quotes do NOT. Element text doesn't need them escaped, and the server-side byte
//!   comparisons downstream expect them raw. Do not "fix" this. It's not broken. 🦆
//! - [`attrib`] / [`push_attrib`]: optional attributes. Unset means the attribute never
//!   existed. Set means ` name="value"`, no escaping, because only bools and numbers
//!   are allowed in (see [`AttributeValue`]). User text never takes this road.

use std::borrow::Cow;

/// 🧪 Entity-encode `&`, `<` and `>`. Borrows when there's nothing to do, which is most of the time.
pub fn escape(text: &str) -> Cow<'_, str> {
    match text.find(['&', '<', '>']) {
        None => Cow::Borrowed(text),
        Some(first) => {
            let mut escaped = String::with_capacity(text.len() + 8);
            escaped.push_str(&text[..first]);
            push_escaped_from(&mut escaped, &text[first..]);
            Cow::Owned(escaped)
        }
    }
}

/// 🧪 [`escape`], but straight into an existing buffer. No intermediate allocation.
pub(crate) fn push_escaped(xml: &mut String, text: &str) {
    match text.find(['&', '<', '>']) {
        None => xml.push_str(text),
        Some(first) => {
            xml.push_str(&text[..first]);
            push_escaped_from(xml, &text[first..]);
        }
    }
}

fn push_escaped_from(xml: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => xml.push_str("&amp;"),
            '<' => xml.push_str("&lt;"),
            '>' => xml.push_str("&gt;"),
            other => xml.push(other),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for bool {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
}

/// 🔒 Things allowed inside an unescaped attribute value. Sealed: bools and numbers only.
/// If you find yourself wanting to implement this for `String`, you want [`escape`] instead.
pub trait AttributeValue: sealed::Sealed + Copy {
    fn push_canonical(self, xml: &mut String);
}

impl AttributeValue for bool {
    fn push_canonical(self, xml: &mut String) {
        xml.push_str(if self { "true" } else { "false" });
    }
}

macro_rules! numeric_attribute_value {
    ($($ty:ty),*) => {
        $(
            impl AttributeValue for $ty {
                fn push_canonical(self, xml: &mut String) {
                    xml.push_str(&self.to_string());
                }
            }
        )*
    };
}

numeric_attribute_value!(u32, u64, i64);

/// ⚠️ Finite values only. `NaN` and the infinities have no attribute form the server
/// accepts, so a non-finite boost is a caller bug: debug builds panic, release builds
/// write Rust's `NaN`/`inf` text and let the server reject it.
impl AttributeValue for f64 {
    fn push_canonical(self, xml: &mut String) {
        debug_assert!(self.is_finite(), "attribute value must be finite, got {self}");
        xml.push_str(&self.to_string());
    }
}

/// 🏷️ ` name="value"` when set, nothing at all when not.
pub fn attrib<T: AttributeValue>(name: &str, value: Option<T>) -> String {
    let mut rendered = String::new();
    push_attrib(&mut rendered, name, value);
    rendered
}

pub(crate) fn push_attrib<T: AttributeValue>(xml: &mut String, name: &str, value: Option<T>) {
    if let Some(value) = value {
        xml.push(' ');
        xml.push_str(name);
        xml.push_str("=\"");
        value.push_canonical(xml);
        xml.push('"');
    }
}
