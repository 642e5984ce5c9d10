//! Standalone documents and configuration.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use xmlser_core::{Serializer, SerializerConfig};
    use xmlser_xml::check_well_formed;

    use crate::init_tracing;

    #[test]
    fn test_should_prefix_prolog_with_configured_encoding() {
        init_tracing();
        let config = SerializerConfig::default().with_encoding("UTF-16");
        let serializer = Serializer::with_config("<doc&?>", config).unwrap();
        let bytes = serializer.to_document(&"body").unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            r#"<?xml version="1.0" encoding="UTF-16"?><doc>body</doc>"#
        );
        check_well_formed(&text).unwrap();
    }

    #[test]
    fn test_should_require_single_root_when_configured() {
        init_tracing();
        let config = SerializerConfig::default().with_single_root(true);
        for bad in ["", "<a><b>", "&text", "<a*3>", "{?<a>}"] {
            let err = Serializer::with_config(bad, config.clone()).unwrap_err();
            assert!(err.is_syntax(), "{bad}: {err}");
        }
        let serializer = Serializer::with_config("<root<a*?&?>>", config).unwrap();
        assert_eq!(
            serializer.serialize(&json!([1, 2])).unwrap(),
            "<root><a>1</a><a>2</a></root>"
        );
    }

    #[test]
    fn test_should_stream_into_existing_buffer() {
        init_tracing();
        let serializer = Serializer::new("<a&?>").unwrap();
        let mut out = String::from("<wrapper>");
        serializer.serialize_to(&"x", &mut out).unwrap();
        serializer.serialize_to(&"y", &mut out).unwrap();
        out.push_str("</wrapper>");
        assert_eq!(out, "<wrapper><a>x</a><a>y</a></wrapper>");
        assert_eq!(check_well_formed(&out).unwrap(), 3);
    }
}
