// ai
//! ➕ Add XML — documents, fields, boosts, and the multi-value fan-out 🚀
//!
//! 🎬 COLD OPEN — INT. MAILROOM — MONDAY
//!
//! Every document gets an envelope (`<doc>`). Every field gets a slip of paper
//! (`<field name="...">`). A multi-valued field gets one slip per value, all with the
//! same name written on top, all stapled in order. The mailroom does not merge slips.
//! The mailroom does not sort slips. The mailroom has seen what happens when you sort slips.
//!
//! ## Wire shape 📡
//!
//! ```text
//! <add[ overwrite="true|false"][ commitWithin="ms"]>
//!   <doc[ boost="f"]>
//!     <field name="NAME"[ boost="f"]>ESCAPED VALUE</field>
//!     ...
//!   </doc>
//!   ...
//! </add>
//! ```
//! (no whitespace between elements on the real wire, it's only pretty here)
//!
//! ## Knowledge Graph 🧠
//! - Field order = `Fields` insertion order. Value order = `Vec` order. Nothing reorders.
//! - Field boost comes from `Document::field_boost(name)`, resolved once per field and
//!   stamped onto every value of a multi-valued field.
//! - Field names go in raw unless `XmlOptions::escape_field_names` is on. 🦆

use super::markup::{push_attrib, push_escaped};
use super::{CommandTransform, XmlOptions};
use crate::common::{Document, Scalar};
use crate::query::AddCommand;

/// ➕ Serializer for [`AddCommand`].
pub(crate) struct AddXml;

impl CommandTransform for AddXml {
    type Command = AddCommand;

    fn transform_command(command: &AddCommand, options: &XmlOptions, xml: &mut String) {
        xml.push_str("<add");
        push_attrib(xml, "overwrite", command.overwrite);
        push_attrib(xml, "commitWithin", command.commit_within);
        xml.push('>');

        for document in &command.documents {
            push_document(document, options, xml);
        }

        xml.push_str("</add>");
    }
}

fn push_document(document: &Document, options: &XmlOptions, xml: &mut String) {
    xml.push_str("<doc");
    push_attrib(xml, "boost", document.boost);
    xml.push('>');

    for (name, value) in document.fields().iter() {
        let boost = document.field_boost(name);
        for scalar in value.values() {
            push_field(name, boost, scalar, options, xml);
        }
    }

    xml.push_str("</doc>");
}

fn push_field(name: &str, boost: Option<f64>, value: &Scalar, options: &XmlOptions, xml: &mut String) {
    xml.push_str("<field name=\"");
    if options.escape_field_names {
        push_escaped(xml, name);
    } else {
        xml.push_str(name);
    }
    xml.push('"');
    push_attrib(xml, "boost", boost);
    xml.push('>');
    push_escaped(xml, &value.as_text());
    xml.push_str("</field>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::test_support::{render, render_with};

    fn doc_with(name: &str, value: impl Into<crate::common::FieldValue>) -> Document {
        let mut doc = Document::new();
        doc.set_field(name, value);
        doc
    }

    #[test]
    fn the_one_where_the_ampersand_title_comes_out_exactly_right() {
        let mut add = AddCommand::new().with_overwrite(false);
        add.add_document(doc_with("title", "A & B"));

        assert_eq!(
            render::<AddXml>(&add),
            r#"<add overwrite="false"><doc><field name="title">A &amp; B</field></doc></add>"#
        );
    }

    #[test]
    fn the_one_where_an_attribute_free_add_has_no_attributes() {
        let mut add = AddCommand::new();
        add.add_document(doc_with("id", 7_i64));
        assert_eq!(render::<AddXml>(&add), r#"<add><doc><field name="id">7</field></doc></add>"#);
    }

    #[test]
    fn the_one_where_commit_within_and_overwrite_both_show_up_in_order() {
        let add = AddCommand::new().with_commit_within(1500).with_overwrite(true);
        assert_eq!(render::<AddXml>(&add), r#"<add overwrite="true" commitWithin="1500"></add>"#);
    }

    #[test]
    fn the_one_where_three_authors_become_three_field_elements() {
        let mut doc = doc_with("author", vec!["ann", "bob", "cy"]);
        doc.set_field_boost("author", Some(1.5));
        let mut add = AddCommand::new();
        add.add_document(doc);

        let xml = render::<AddXml>(&add);
        assert_eq!(
            xml,
            concat!(
                "<add><doc>",
                r#"<field name="author" boost="1.5">ann</field>"#,
                r#"<field name="author" boost="1.5">bob</field>"#,
                r#"<field name="author" boost="1.5">cy</field>"#,
                "</doc></add>"
            )
        );
        assert_eq!(xml.matches(r#"<field name="author""#).count(), 3);
    }

    #[test]
    fn the_one_where_boosts_are_per_field_and_per_document() {
        let mut doc = Document::new().with_boost(2.0);
        doc.set_field("id", "1")
            .set_field("title", "Hello")
            .set_field_boost("title", Some(3.25));
        let mut add = AddCommand::new();
        add.add_document(doc).add_document(doc_with("id", "2"));

        assert_eq!(
            render::<AddXml>(&add),
            concat!(
                r#"<add><doc boost="2"><field name="id">1</field>"#,
                r#"<field name="title" boost="3.25">Hello</field></doc>"#,
                r#"<doc><field name="id">2</field></doc></add>"#
            )
        );
    }

    #[test]
    fn the_one_where_quotes_in_values_stay_raw() {
        let mut add = AddCommand::new();
        add.add_document(doc_with("quote", r#"she said "<hi>""#));
        assert_eq!(
            render::<AddXml>(&add),
            r#"<add><doc><field name="quote">she said "&lt;hi&gt;"</field></doc></add>"#
        );
    }

    #[test]
    fn the_one_where_field_names_go_in_raw_unless_asked_otherwise() {
        let mut add = AddCommand::new();
        add.add_document(doc_with("a&b", "x"));

        assert_eq!(
            render::<AddXml>(&add),
            r#"<add><doc><field name="a&b">x</field></doc></add>"#,
            "legacy output keeps field names byte-for-byte"
        );
        let escaping = XmlOptions {
            escape_field_names: true,
        };
        assert_eq!(
            render_with::<AddXml>(&add, &escaping),
            r#"<add><doc><field name="a&amp;b">x</field></doc></add>"#
        );
    }

    #[test]
    fn the_one_where_mixed_scalars_render_their_canonical_text() {
        let mut doc = Document::new();
        doc.set_field("price", 9.5)
            .set_field("in_stock", false)
            .set_field("empty_multi", Vec::<String>::new());
        let mut add = AddCommand::new();
        add.add_document(doc);

        assert_eq!(
            render::<AddXml>(&add),
            concat!(
                r#"<add><doc><field name="price">9.5</field>"#,
                r#"<field name="in_stock">false</field></doc></add>"#
            ),
            "an empty multi-valued field emits nothing"
        );
    }
}
