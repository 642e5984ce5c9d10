//! One compiled serializer shared across threads.

#[cfg(test)]
mod tests {
    use std::thread;

    use serde_json::json;
    use xmlser_core::Serializer;

    use crate::init_tracing;

    #[test]
    fn test_should_render_concurrently_from_one_serializer() {
        init_tracing();
        let serializer = Serializer::new("<batch=id.id<n*.items&?>>").unwrap();

        let outputs: Vec<String> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|t| {
                    let serializer = &serializer;
                    s.spawn(move || {
                        let root = json!({"id": t, "items": (0..t).collect::<Vec<_>>()});
                        serializer.serialize(&root).unwrap()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });

        for (t, out) in outputs.iter().enumerate() {
            let items: String = (0..t).map(|i| format!("<n>{i}</n>")).collect();
            assert_eq!(out, &format!(r#"<batch id="{t}">{items}</batch>"#));
        }
    }

    #[test]
    fn test_should_keep_failures_isolated_between_threads() {
        init_tracing();
        let serializer = Serializer::new("<v&.value>").unwrap();

        thread::scope(|s| {
            let ok = s.spawn(|| serializer.serialize(&json!({"value": "fine"})));
            let bad = s.spawn(|| serializer.serialize(&json!({})));
            assert_eq!(ok.join().unwrap().unwrap(), "<v>fine</v>");
            assert!(bad.join().unwrap().is_err());
        });
    }
}
