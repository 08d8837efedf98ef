use serde::{Deserialize, Serialize};

/// Classification given to every citation parsed from a references section.
pub const WEB_SOURCE: &str = "Web";

/// One bibliographic entry of a generated article.
///
/// `number` is assigned during extraction (1-based, gapless) and does not
/// necessarily match the numeral printed in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub url: String,
    /// Source classification. Open-ended so other source kinds can be added.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    WEB_SOURCE.to_string()
}

impl Citation {
    pub fn web(
        number: u32,
        title: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            author: author.into(),
            date: date.into(),
            url: url.into(),
            kind: WEB_SOURCE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_kind_as_type() {
        let citation = Citation::web(1, "A", "B", "2024-01-01", "http://x");
        let value = serde_json::to_value(&citation).unwrap();
        assert_eq!(
            value,
            json!({
                "number": 1,
                "title": "A",
                "author": "B",
                "date": "2024-01-01",
                "url": "http://x",
                "type": "Web",
            })
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let citation: Citation = serde_json::from_value(json!({"number": 3})).unwrap();
        assert_eq!(citation.number, 3);
        assert!(citation.title.is_empty());
        assert_eq!(citation.kind, WEB_SOURCE);
    }
}
