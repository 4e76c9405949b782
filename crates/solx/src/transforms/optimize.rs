use super::markup::push_attrib;
use super::{CommandTransform, XmlOptions};
use crate::query::OptimizeCommand;

/// 🧹 `<optimize/>` with `waitFlush`, `waitSearcher`, `maxSegments`, each only when set, in that order.
pub(crate) struct OptimizeXml;

impl CommandTransform for OptimizeXml {
    type Command = OptimizeCommand;

    fn transform_command(command: &OptimizeCommand, _options: &XmlOptions, xml: &mut String) {
        xml.push_str("<optimize");
        push_attrib(xml, "waitFlush", command.wait_flush);
        push_attrib(xml, "waitSearcher", command.wait_searcher);
        push_attrib(xml, "maxSegments", command.max_segments);
        xml.push_str("/>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::test_support::render;

    #[test]
    fn the_one_where_a_bare_optimize_has_no_attributes() {
        assert_eq!(render::<OptimizeXml>(&OptimizeCommand::new()), "<optimize/>");
    }

    #[test]
    fn the_one_where_one_knob_means_one_attribute() {
        let optimize = OptimizeCommand::new().with_max_segments(0);
        assert_eq!(render::<OptimizeXml>(&optimize), r#"<optimize maxSegments="0"/>"#);
    }

    #[test]
    fn the_one_where_attribute_order_ignores_builder_order() {
        let optimize = OptimizeCommand::new()
            .with_max_segments(4)
            .with_wait_searcher(false)
            .with_wait_flush(true);
        assert_eq!(
            render::<OptimizeXml>(&optimize),
            r#"<optimize waitFlush="true" waitSearcher="false" maxSegments="4"/>"#
        );
    }
}
