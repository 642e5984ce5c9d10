//! Behavioral properties that hold across inputs.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use xmlser_core::template::MAX_DEPTH;
    use xmlser_core::{Serializer, Value, XmlSerError, parse, serialize};
    use xmlser_xml::{check_well_formed, escape_text};

    use crate::init_tracing;

    /// Quote `raw` for use as a quoted token.
    fn quote(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len() + 2);
        out.push('"');
        for c in raw.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\t' => out.push_str("\\t"),
                '\n' => out.push_str("\\n"),
                other => out.push(other),
            }
        }
        out.push('"');
        out
    }

    #[test]
    fn test_should_round_trip_quoted_text() {
        init_tracing();
        let samples = [
            "plain",
            "a < b && c > d",
            r#"say "hi""#,
            r"back\slash",
            "tab\tand\nnewline",
            "<>&=.?*~{} all reserved",
            "unicode: été 河流",
            "",
        ];
        for raw in samples {
            let format = format!("<doc<item&{}>>", quote(raw));
            let out = serialize(&format, &Value::Null).unwrap();
            assert_eq!(
                out,
                format!("<doc><item>{}</item></doc>", escape_text(raw)),
                "{format}"
            );
        }
    }

    #[test]
    fn test_should_parse_identically_on_repeat() {
        init_tracing();
        let formats = [
            "",
            "<doc<item>>",
            r#"<a=b"c"{.x<y*.z&?>}<~.m&.v>>"#,
            r#"&"text"<n*5>"#,
        ];
        for format in formats {
            assert_eq!(parse(format).unwrap(), parse(format).unwrap(), "{format}");
        }
    }

    #[test]
    fn test_should_emit_one_subtree_per_item_in_order() {
        init_tracing();
        let serializer = Serializer::new("<i*?&?>").unwrap();
        for n in [0_usize, 1, 2, 17] {
            let items: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
            let out = serializer.serialize(&items).unwrap();
            let expected: String = items.iter().map(|v| format!("<i>{v}</i>")).collect();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_should_bind_keys_for_tag_and_values_for_children() {
        init_tracing();
        let root = Value::map([("k1", "v1"), ("k2", "v2")]);
        let out = serialize("<~?=key?<inner&?>>", &root).unwrap();
        assert_eq!(
            out,
            concat!(
                r#"<k1 key="k1"><inner>v1</inner></k1>"#,
                r#"<k2 key="k2"><inner>v2</inner></k2>"#
            )
        );
    }

    #[test]
    fn test_should_reject_attribute_names_with_ampersand_or_whitespace() {
        init_tracing();
        let serializer = Serializer::new(r#"<doc<item=?"1">>"#).unwrap();
        for bad in ["a&b", "a b", "tab\there", "", "1st"] {
            let mut out = String::new();
            assert!(matches!(
                serializer.serialize(&bad),
                Err(XmlSerError::InvalidName { .. })
            ));
            // The streaming form may have written a prefix, the string form
            // returns nothing at all.
            let _ = serializer.serialize_to(&bad, &mut out);
            assert!(out.starts_with("<doc><item"), "{out}");
        }
    }

    #[test]
    fn test_should_produce_well_formed_output() {
        init_tracing();
        let root = json!({
            "title": "A & B <C>",
            "quote": "\"quoted\" 'single'",
            "items": ["x<y", "a&b", "ok"],
            "meta": {"k1": "v&1", "k2": "v>2"}
        });
        let formats = [
            "<doc=title.title<item*.items=v?&?>>",
            "<doc<q=q.quote&.quote><m<~.meta=raw?&?>>>",
            "<a{.meta<b&.k1>}<c*3=i?>>",
            r#"<x&"<not a tag>">"#,
        ];
        for format in formats {
            let out = serialize(format, &root).unwrap();
            check_well_formed(&out).unwrap_or_else(|e| panic!("{format} -> {out}: {e}"));
        }
    }

    #[test]
    fn test_should_report_syntax_offsets() {
        init_tracing();
        let cases = [
            ("<doc", 4),
            ("<doc>>", 5),
            (r#"<a&"open>"#, 3),
            (r#"<a&"bad\x">"#, 7),
            ("<a*>", 3),
            ("<a b>", 2),
            ("{?<a>", 5),
        ];
        for (format, expected) in cases {
            match parse(format) {
                Err(XmlSerError::Syntax { position, .. }) => {
                    assert_eq!(position, expected, "{format}");
                }
                other => panic!("expected Syntax for {format}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_should_render_deepest_nesting_and_reject_deeper() {
        init_tracing();
        let deepest = format!("{}{}", "<a".repeat(MAX_DEPTH), ">".repeat(MAX_DEPTH));
        let out = serialize(&deepest, &Value::Null).unwrap();
        assert_eq!(out, format!("{}{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH)));
        check_well_formed(&out).unwrap();

        let deeper = format!("{}{}", "<a".repeat(10_000), ">".repeat(10_000));
        assert!(matches!(
            serialize(&deeper, &Value::Null),
            Err(XmlSerError::Syntax { .. })
        ));
    }
}
