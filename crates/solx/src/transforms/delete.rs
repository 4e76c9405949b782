//! 🗑️ Delete XML — ids first, then queries, all escaped, no attributes.
//!
//! An empty delete still emits `<delete></delete>`. The server shrugs at it.
//! We emit it anyway because the caller asked for a delete, and we are not in
//! the business of editing other people's intentions. 🦆

use super::markup::push_escaped;
use super::{CommandTransform, XmlOptions};
use crate::query::DeleteCommand;

pub(crate) struct DeleteXml;

impl CommandTransform for DeleteXml {
    type Command = DeleteCommand;

    fn transform_command(command: &DeleteCommand, _options: &XmlOptions, xml: &mut String) {
        xml.push_str("<delete>");
        for id in &command.ids {
            xml.push_str("<id>");
            push_escaped(xml, id);
            xml.push_str("</id>");
        }
        for query in &command.queries {
            xml.push_str("<query>");
            push_escaped(xml, query);
            xml.push_str("</query>");
        }
        xml.push_str("</delete>");
    }
}
