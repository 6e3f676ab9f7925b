use super::Source;
use crate::exa::SearchResult;

/// Results with this many characters of text or fewer are too thin to cite.
pub const MIN_CONTENT_CHARS: usize = 200;

pub fn filter_sources(results: &[SearchResult]) -> Vec<Source> {
    results
        .iter()
        .filter_map(|result| {
            let text = result.text.as_deref()?;
            (text.chars().count() > MIN_CONTENT_CHARS).then(|| Source {
                title: result.title.clone(),
                content: text.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, text: Option<String>) -> SearchResult {
        SearchResult {
            title: title.into(),
            text,
        }
    }

    #[test]
    fn keeps_only_long_texts_in_order() {
        let results = vec![
            result("A", Some("a".repeat(300))),
            result("B", Some("b".repeat(50))),
            result("C", None),
            result("D", Some("d".repeat(201))),
            result("E", Some(String::new())),
        ];

        let sources = filter_sources(&results);
        let titles: Vec<_> = sources.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A", "D"]);
        assert!(sources.iter().all(|s| s.content.chars().count() > MIN_CONTENT_CHARS));
    }

    #[test]
    fn exactly_threshold_is_rejected() {
        let results = vec![result("edge", Some("x".repeat(MIN_CONTENT_CHARS)))];
        assert!(filter_sources(&results).is_empty());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 150 chars but 450 bytes
        let results = vec![result("ja", Some("あ".repeat(150)))];
        assert!(filter_sources(&results).is_empty());
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(filter_sources(&[]).is_empty());
    }
}
