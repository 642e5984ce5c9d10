//! End-to-end rendering scenarios.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use xmlser_core::{NameKind, Value, XmlSerError, serialize};

    use crate::init_tracing;

    #[test]
    fn test_should_render_empty_child() {
        init_tracing();
        assert_eq!(
            serialize("<doc<item>>", &Value::Null).unwrap(),
            "<doc><item></item></doc>"
        );
    }

    #[test]
    fn test_should_render_literal_text() {
        init_tracing();
        assert_eq!(
            serialize("<doc<item&text>>", &Value::Null).unwrap(),
            "<doc><item>text</item></doc>"
        );
    }

    #[test]
    fn test_should_escape_current_object_text() {
        init_tracing();
        assert_eq!(
            serialize("<doc<item&?>>", &"text & more text").unwrap(),
            "<doc><item>text &amp; more text</item></doc>"
        );
    }

    #[test]
    fn test_should_render_literal_attribute() {
        init_tracing();
        assert_eq!(
            serialize(r#"<doc<item=id"1">>"#, &Value::Null).unwrap(),
            r#"<doc><item id="1"></item></doc>"#
        );
    }

    #[test]
    fn test_should_repeat_over_list() {
        init_tracing();
        let root = Value::from(vec!["a", "b", "c"]);
        assert_eq!(
            serialize("<longest_rivers<river*?&?>>", &root).unwrap(),
            "<longest_rivers><river>a</river><river>b</river><river>c</river></longest_rivers>"
        );
    }

    #[test]
    fn test_should_reject_dynamic_attribute_name() {
        init_tracing();
        match serialize(r#"<doc<item=?"1">>"#, &"a&b") {
            Err(XmlSerError::InvalidName { kind, value, .. }) => {
                assert_eq!(kind, NameKind::Attribute);
                assert_eq!(value, "a&b");
            }
            other => panic!("expected InvalidName, got {other:?}"),
        }
    }

    #[test]
    fn test_should_render_nested_json_document() {
        init_tracing();
        let root = json!({
            "title": "Rivers",
            "rivers": [
                {"name": "Nile", "length": 6650},
                {"name": "Amazon", "length": 6400}
            ]
        });
        let out = serialize(
            r#"<report=title.title<river*.rivers=km.length&.name><count&"2 rivers">>"#,
            &root,
        )
        .unwrap();
        assert_eq!(
            out,
            concat!(
                r#"<report title="Rivers">"#,
                r#"<river km="6650">Nile</river>"#,
                r#"<river km="6400">Amazon</river>"#,
                "<count>2 rivers</count>",
                "</report>"
            )
        );
    }

    #[test]
    fn test_should_render_dictkey_map() {
        init_tracing();
        let root = Value::map([("nile", "Egypt"), ("amazon", "Brazil")]);
        assert_eq!(
            serialize("<rivers<~?&?>>", &root).unwrap(),
            "<rivers><nile>Egypt</nile><amazon>Brazil</amazon></rivers>"
        );
    }

    #[test]
    fn test_should_render_group_and_top_level_text() {
        init_tracing();
        let root = json!({"meta": {"author": "A. Writer", "year": 2024}});
        assert_eq!(
            serialize("&intro{.meta<by&.author><year&.year>}&outro", &root).unwrap(),
            "intro<by>A. Writer</by><year>2024</year>outro"
        );
    }

    #[test]
    fn test_should_render_empty_format_as_empty_output() {
        init_tracing();
        assert_eq!(serialize("", &Value::Null).unwrap(), "");
    }
}
