use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One item of a Google Custom Search response, as returned upstream.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawSearchItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
    #[serde(default)]
    pub pagemap: Option<Value>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub items: Vec<RawSearchItem>,
}

/// A normalized search result. Every text field is present; absent data is "".
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub image: String,
    pub price: String,
    #[serde(skip)]
    pub raw_metadata: Value,
}

impl Candidate {
    pub fn new(title: &str, link: &str, snippet: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
            image: "".to_string(),
            price: "".to_string(),
            raw_metadata: Value::Null,
        }
    }

    /// Text submitted to the embedding model for this candidate.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.snippet)
    }

    /// True when the raw pagemap carries product or offer entries.
    pub fn has_structured_offer(&self) -> bool {
        ["product", "offer"].iter().any(|key| match self.raw_metadata.get(key) {
            Some(Value::Array(entries)) => !entries.is_empty(),
            Some(Value::Object(fields)) => !fields.is_empty(),
            _ => false,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl ScoredCandidate {
    pub fn new(candidate: Candidate, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            candidate,
            score,
            similarity: None,
        }
    }

    pub fn unranked(candidate: Candidate) -> ScoredCandidate {
        ScoredCandidate::new(candidate, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub requested_count: u32,
}

impl Query {
    /// Builds a query, clamping the requested count to `[1, max]`.
    /// `max = None` leaves the count unbounded above.
    pub fn new(text: &str, requested_count: i64, max: Option<u32>) -> Query {
        let upper = max.map(i64::from).unwrap_or(u32::MAX as i64);
        let requested_count = requested_count.clamp(1, upper.max(1)) as u32;
        Query {
            text: text.to_string(),
            requested_count,
        }
    }

    pub fn lowercase(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn words(&self) -> Vec<String> {
        self.lowercase()
            .split_whitespace()
            .filter(|w| !w.is_empty())
            .map(|w| w.to_string())
            .collect()
    }
}

#[test]
fn test_query_clamps_requested_count() {
    assert_eq!(Query::new("shoes", 50, Some(12)).requested_count, 12);
    assert_eq!(Query::new("shoes", 0, Some(12)).requested_count, 1);
    assert_eq!(Query::new("shoes", -4, None).requested_count, 1);
    assert_eq!(Query::new("shoes", 50, None).requested_count, 50);
}

#[test]
fn test_query_words_are_lowercase_and_non_empty() {
    let q = Query::new("  Red   SHOES\tsale ", 10, None);
    assert_eq!(q.words(), vec!["red", "shoes", "sale"]);
}

#[test]
fn test_scored_candidate_serializes_flat() {
    let mut c = Candidate::new("Boot", "https://x.test/boot", "A boot");
    c.raw_metadata = serde_json::json!({"offer": [{"price": "9"}]});
    let value = serde_json::to_value(ScoredCandidate::new(c, 1.5)).unwrap();
    assert_eq!(value["title"], "Boot");
    assert_eq!(value["score"], 1.5);
    assert!(value.get("similarity").is_none());
    assert!(value.get("raw_metadata").is_none());
}
