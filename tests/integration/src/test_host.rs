//! Rendering against different host object shapes.

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde_json::json;
    use xmlser_core::{Serializer, Value, XmlSerError};

    use crate::{init_tracing, rivers};

    #[test]
    fn test_should_render_custom_host_type() {
        init_tracing();
        let serializer =
            Serializer::new("<rivers<river*?=name.name=km.length_km<c*.countries&?>>>").unwrap();
        let out = serializer.serialize(&rivers()).unwrap();
        assert_eq!(
            out,
            concat!(
                "<rivers>",
                r#"<river name="Nile" km="6650"><c>Egypt</c><c>Sudan</c></river>"#,
                r#"<river name="Amazon" km="6400"><c>Brazil</c><c>Peru</c></river>"#,
                r#"<river name="Yangtze" km="6300"><c>China</c></river>"#,
                "</rivers>"
            )
        );
    }

    #[test]
    fn test_should_index_into_host_sequences() {
        init_tracing();
        let out = Serializer::new("<first&.0.name><second&.1.countries.1>")
            .unwrap()
            .serialize(&rivers())
            .unwrap();
        assert_eq!(out, "<first>Nile</first><second>Peru</second>");
    }

    #[test]
    fn test_should_iterate_record_fields_with_dictkey() {
        init_tracing();
        let river = rivers().remove(2);
        let out = Serializer::new("<~?&?>").unwrap().serialize(&river).unwrap();
        assert_eq!(
            out,
            "<name>Yangtze</name><length_km>6300</length_km><countries>China</countries>"
        );
    }

    #[test]
    fn test_should_render_std_maps_in_their_order() {
        init_tracing();
        let sorted: BTreeMap<String, u32> =
            [("b".to_owned(), 2), ("a".to_owned(), 1)].into_iter().collect();
        assert_eq!(
            Serializer::new("<~?&?>").unwrap().serialize(&sorted).unwrap(),
            "<a>1</a><b>2</b>"
        );

        let hashed: HashMap<String, &str> = [("only".to_owned(), "one")].into_iter().collect();
        assert_eq!(
            Serializer::new("<v&.only>").unwrap().serialize(&hashed).unwrap(),
            "<v>one</v>"
        );
    }

    #[test]
    fn test_should_repeat_over_mapping_as_pairs() {
        init_tracing();
        let root = Value::map([("x", 1), ("y", 2)]);
        assert_eq!(
            Serializer::new("<p*?=k.0&.1>").unwrap().serialize(&root).unwrap(),
            r#"<p k="x">1</p><p k="y">2</p>"#
        );
    }

    #[test]
    fn test_should_read_model_values_from_json() {
        init_tracing();
        let root: Value = serde_json::from_value(json!({
            "flag": true,
            "missing": null,
            "ratio": 0.5,
            "nested": {"list": [1, 2]}
        }))
        .unwrap();
        let out = Serializer::new("<f&.flag><m&.missing><r&.ratio><n&.nested.list>")
            .unwrap()
            .serialize(&root)
            .unwrap();
        assert_eq!(out, "<f>true</f><m></m><r>0.5</r><n>[1,2]</n>");
    }

    #[test]
    fn test_should_not_use_key_access_on_records() {
        init_tracing();
        let record = Value::record([("a", 1)]);
        assert!(matches!(
            Serializer::new("&.b").unwrap().serialize(&record),
            Err(XmlSerError::Lookup { .. })
        ));
    }

    #[test]
    fn test_should_render_option_and_numbers() {
        init_tracing();
        let serializer = Serializer::new("<v&?>").unwrap();
        assert_eq!(serializer.serialize(&None::<String>).unwrap(), "<v></v>");
        assert_eq!(serializer.serialize(&Some(42_u8)).unwrap(), "<v>42</v>");
        assert_eq!(serializer.serialize(&-7_i64).unwrap(), "<v>-7</v>");
        assert_eq!(serializer.serialize(&false).unwrap(), "<v>false</v>");
    }
}
