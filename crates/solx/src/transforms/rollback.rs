use super::{CommandTransform, XmlOptions};

/// ⏪ `<rollback/>`. Takes nothing, says the same thing every time. Very zen.
pub(crate) struct RollbackXml;

impl CommandTransform for RollbackXml {
    type Command = ();

    fn transform_command(_command: &(), _options: &XmlOptions, xml: &mut String) {
        xml.push_str("<rollback/>");
    }
}
