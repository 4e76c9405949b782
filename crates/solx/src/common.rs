//! 📦 Common data structures — documents, fields, and the values that live in them.
//!
//! ---
//!
//! 🎬 COLD OPEN — INT. INDEXING QUEUE — 3:47 AM
//!
//! A `Document` arrives. It has a title. It has three authors (multi-valued,
//! naturally, because nobody writes alone anymore). One field is boosted, because
//! someone in marketing insisted the title matters twice as much as the body.
//! Nobody argued. Nobody ever argues with marketing at 3:47 AM.
//!
//! 🦆
//!
//! This module defines the value types an add command carries. They are plain
//! data: owned, immutable once handed to the serializer, `Send + Sync`, and
//! entirely uninterested in XML. The XML happens elsewhere (`transforms`).
//!
//! 🧠 Knowledge graph:
//! - [`Scalar`]: one field value (text, integer, float, bool)
//! - [`FieldValue`]: a scalar, or an ordered list of scalars (multi-valued field)
//! - [`Fields`]: ordered name → value mapping. Insertion order IS wire order.
//! - [`Document`]: fields + optional document boost + per-field boost side table

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================
// 🔢 Scalar — the atoms of a document
// ============================================================

/// 🔢 A single field value. The server only ever sees its text form.
///
/// Variant order is the untagged match order: an integer past `i64::MAX` lands in
/// `UInt` before `Float` gets a chance to round it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// 📝 The canonical text form. Borrows for text, allocates for numbers.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(s) => Cow::Borrowed(s.as_str()),
            Scalar::Int(i) => Cow::Owned(i.to_string()),
            Scalar::UInt(u) => Cow::Owned(u.to_string()),
            Scalar::Float(f) => Cow::Owned(f.to_string()),
            Scalar::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(value.into())
    }
}

// 🔢 small enough values stay `Int`, so `From<u64>` and JSON agree on the variant
impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Scalar::UInt(value), Scalar::Int)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

// ============================================================
// 📚 FieldValue — one value, or a whole shelf of them
// ============================================================

/// 📚 What a field name is bound to. `Multi` becomes one `<field>` element per entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Multi(Vec<Scalar>),
    Single(Scalar),
}

impl FieldValue {
    /// 🔄 Walk the values in wire order. A single value is a list of one. Philosophically.
    pub fn values(&self) -> &[Scalar] {
        match self {
            FieldValue::Multi(values) => values,
            FieldValue::Single(value) => std::slice::from_ref(value),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, FieldValue::Multi(_))
    }
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Single(value)
    }
}

macro_rules! single_field_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Single(value.into())
                }
            }
        )*
    };
}

single_field_value_from!(&str, String, i64, i32, u32, u64, f64, bool);

impl<T: Into<Scalar>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Multi(values.into_iter().map(Into::into).collect())
    }
}

// ============================================================
// 🗂️ Fields — an ordered map, hand-rolled on a Vec
// ============================================================

/// 🗂️ Ordered field mapping. Setting an existing name replaces the value in place,
/// keeping its original position.
///
/// ⚠️ Lookups and inserts are a linear scan, so building a document (by hand or from
/// JSON) is O(n²) in its field count. Fine for the tens of fields a document usually
/// has; a document with tens of thousands of distinct field names will feel it.
/// Serializing stays a single linear pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, FieldValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// ✏️ Insert or replace. Returns the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.0.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let position = self.0.iter().position(|(n, _)| n == name)?;
        Some(self.0.remove(position).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// 🧭 Hand-written visitor so JSON object order survives. A HashMap would shuffle the
// fields like a deck of cards, and the server would get them in a different order every run.
struct FieldsVisitor;

impl<'de> Visitor<'de> for FieldsVisitor {
    type Value = Fields;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of field names to a value or a list of values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut fields = Fields::new();
        while let Some((name, value)) = access.next_entry::<String, FieldValue>()? {
            fields.insert(name, value);
        }
        Ok(fields)
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldsVisitor)
    }
}

// ============================================================
// 📄 Document
// ============================================================

/// 📄 A document to index: ordered fields, an optional boost, and a side table of
/// per-field boosts looked up by name at serialization time.
///
/// The boost table is keyed independently of `fields`: a boost for a field that
/// doesn't exist is harmless, a field without a boost simply emits no `boost` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f64>,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_boosts: HashMap<String, Option<f64>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// 🚀 Boosts must be finite. A `NaN` boost has no wire form.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// ✏️ Bind `name` to `value`, replacing whatever was there.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.fields.insert(name, value.into());
        self
    }

    /// ➕ Append a value. A missing field becomes a single value; an existing single
    /// value gets promoted to a multi-value; an existing multi-value grows by one.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.fields.get_mut(&name) {
            Some(slot) => {
                *slot = match std::mem::replace(slot, FieldValue::Multi(Vec::new())) {
                    FieldValue::Multi(mut values) => {
                        values.push(value);
                        FieldValue::Multi(values)
                    }
                    FieldValue::Single(previous) => FieldValue::Multi(vec![previous, value]),
                };
            }
            None => {
                self.fields.insert(name, FieldValue::Single(value));
            }
        }
        self
    }

    /// 🗑️ Remove a field and forget its boost too. No ghosts in the side table.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        self.field_boosts.remove(name);
        self.fields.remove(name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// 🚀 `None` clears the boost.
    pub fn set_field_boost(&mut self, name: impl Into<String>, boost: Option<f64>) -> &mut Self {
        let name = name.into();
        match boost {
            Some(_) => {
                self.field_boosts.insert(name, boost);
            }
            None => {
                self.field_boosts.remove(&name);
            }
        }
        self
    }

    pub fn field_boost(&self, name: &str) -> Option<f64> {
        self.field_boosts.get(name).copied().flatten()
    }

    /// 🧹 Drop every field and every field boost. The document boost survives.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.field_boosts.clear();
    }
}
