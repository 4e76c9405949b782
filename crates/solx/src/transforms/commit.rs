//! ✅ Commit XML. Three optional booleans and a self-closing tag. That's the whole show.

use super::markup::push_attrib;
use super::{CommandTransform, XmlOptions};
use crate::query::CommitCommand;

pub(crate) struct CommitXml;

impl CommandTransform for CommitXml {
    type Command = CommitCommand;

    fn transform_command(command: &CommitCommand, _options: &XmlOptions, xml: &mut String) {
        xml.push_str("<commit");
        push_attrib(xml, "waitFlush", command.wait_flush);
        push_attrib(xml, "waitSearcher", command.wait_searcher);
        push_attrib(xml, "expungeDeletes", command.expunge_deletes);
        xml.push_str("/>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::test_support::render;

    #[test]
    fn the_one_where_a_bare_commit_is_just_a_commit() {
        assert_eq!(render::<CommitXml>(&CommitCommand::new()), "<commit/>");
    }

    #[test]
    fn the_one_where_only_wait_searcher_is_set() {
        let commit = CommitCommand::new().with_wait_searcher(true);
        assert_eq!(render::<CommitXml>(&commit), r#"<commit waitSearcher="true"/>"#);
    }

    #[test]
    fn the_one_where_every_false_still_gets_a_seat() {
        let commit = CommitCommand::new()
            .with_expunge_deletes(false)
            .with_wait_flush(false)
            .with_wait_searcher(false);
        assert_eq!(
            render::<CommitXml>(&commit),
            r#"<commit waitFlush="false" waitSearcher="false" expungeDeletes="false"/>"#
        );
    }
}
