use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

static WORD: OnceLock<Regex> = OnceLock::new();

/// Count `\w+` runs in `text`.
pub fn count_words(text: &str) -> usize {
    WORD.get_or_init(|| Regex::new(r"\w+").expect("word regex"))
        .find_iter(text)
        .count()
}

/// Generation facts recorded alongside an article.
///
/// Stored as an open JSON object; the store never validates its keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleMetadata {
    pub content_type: String,
    pub word_count: u32,
    pub actual_words: usize,
    pub total_citations: usize,
}

impl ArticleMetadata {
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("content_type".into(), Value::from(self.content_type));
        map.insert("word_count".into(), Value::from(self.word_count));
        map.insert("actual_words".into(), Value::from(self.actual_words));
        map.insert("total_citations".into(), Value::from(self.total_citations));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_word_runs() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("Hello, world! [1]"), 3);
        assert_eq!(count_words("state-of-the-art"), 4);
    }

    #[test]
    fn into_map_uses_stable_keys() {
        let metadata = ArticleMetadata {
            content_type: "blog_post".into(),
            word_count: 800,
            actual_words: 812,
            total_citations: 4,
        };
        assert_eq!(
            Value::Object(metadata.into_map()),
            json!({
                "content_type": "blog_post",
                "word_count": 800,
                "actual_words": 812,
                "total_citations": 4,
            })
        );
    }
}
