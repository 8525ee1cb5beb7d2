use std::fmt;
use std::str::FromStr;

use crate::data_models::{Candidate, Query, ScoredCandidate};

pub const COLOR_WORDS: &[&str] = &[
    "red", "blue", "green", "yellow", "black", "white", "gray", "grey", "brown", "pink", "purple",
    "navy", "khaki", "maroon", "olive",
];

/// Weight applied to cosine similarity when combined with the lexical sum.
pub const SIMILARITY_WEIGHT: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnippetPenalty {
    pub min_chars: usize,
    pub penalty: f64,
}

/// Weights for the lexical heuristic. Zero disables a signal.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalPolicy {
    pub title_weight: f64,
    pub snippet_weight: f64,
    pub color_weight: f64,
    pub short_snippet: Option<SnippetPenalty>,
    pub image_bonus: f64,
    pub price_bonus: f64,
    pub structured_bonus: f64,
}

impl LexicalPolicy {
    pub const BASIC: LexicalPolicy = LexicalPolicy {
        title_weight: 2.0,
        snippet_weight: 1.0,
        color_weight: 1.0,
        short_snippet: Some(SnippetPenalty {
            min_chars: 20,
            penalty: 1.0,
        }),
        image_bonus: 0.0,
        price_bonus: 0.0,
        structured_bonus: 0.0,
    };

    // Snippet words reach the semantic scorer through the title+snippet embedding.
    pub const SEMANTIC: LexicalPolicy = LexicalPolicy {
        title_weight: 0.2,
        snippet_weight: 0.0,
        color_weight: 0.15,
        short_snippet: None,
        image_bonus: 0.12,
        price_bonus: 0.25,
        structured_bonus: 0.45,
    };

    /// Unclamped heuristic sum for one candidate.
    pub fn heuristic_sum(&self, candidate: &Candidate, query: &Query) -> f64 {
        let query_lower = query.lowercase();
        let words = query.words();
        let title = candidate.title.to_lowercase();
        let snippet = candidate.snippet.to_lowercase();

        let mut score = 0.0;
        for word in &words {
            if title.contains(word.as_str()) {
                score += self.title_weight;
            }
            if snippet.contains(word.as_str()) {
                score += self.snippet_weight;
            }
        }

        for color in COLOR_WORDS {
            if query_lower.contains(color) && (title.contains(color) || snippet.contains(color)) {
                score += self.color_weight;
            }
        }

        if let Some(rule) = self.short_snippet {
            if candidate.snippet.chars().count() < rule.min_chars {
                score -= rule.penalty;
            }
        }

        if !candidate.image.is_empty() {
            score += self.image_bonus;
        }
        if !candidate.price.is_empty() {
            score += self.price_bonus;
        }
        if candidate.has_structured_offer() {
            score += self.structured_bonus;
        }
        score
    }
}

/// Per-candidate inputs computed outside the scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoringContext {
    pub similarity: Option<f64>,
}

pub trait Scorer: Send + Sync {
    fn score(&self, candidate: Candidate, query: &Query, context: &ScoringContext)
    -> ScoredCandidate;
}

/// Lexical-only scoring.
#[derive(Debug, Clone)]
pub struct BasicScorer {
    policy: LexicalPolicy,
}

impl BasicScorer {
    pub fn new(policy: LexicalPolicy) -> Self {
        Self { policy }
    }
}

impl Default for BasicScorer {
    fn default() -> Self {
        Self::new(LexicalPolicy::BASIC)
    }
}

impl Scorer for BasicScorer {
    fn score(
        &self,
        candidate: Candidate,
        query: &Query,
        _context: &ScoringContext,
    ) -> ScoredCandidate {
        let score = self.policy.heuristic_sum(&candidate, query).max(0.0);
        ScoredCandidate::new(candidate, score)
    }
}

/// Cosine similarity plus the lexical heuristic.
#[derive(Debug, Clone)]
pub struct SemanticScorer {
    policy: LexicalPolicy,
    similarity_weight: f64,
}

impl SemanticScorer {
    pub fn new(policy: LexicalPolicy, similarity_weight: f64) -> Self {
        Self {
            policy,
            similarity_weight,
        }
    }
}

impl Default for SemanticScorer {
    fn default() -> Self {
        Self::new(LexicalPolicy::SEMANTIC, SIMILARITY_WEIGHT)
    }
}

impl Scorer for SemanticScorer {
    fn score(
        &self,
        candidate: Candidate,
        query: &Query,
        context: &ScoringContext,
    ) -> ScoredCandidate {
        let similarity = context.similarity.unwrap_or(0.0);
        let combined =
            (similarity * self.similarity_weight + self.policy.heuristic_sum(&candidate, query))
                .max(0.0);
        ScoredCandidate {
            candidate,
            score: round2(combined),
            similarity: context.similarity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringStrategy {
    Basic,
    Semantic,
}

impl ScoringStrategy {
    pub fn scorer(&self) -> Box<dyn Scorer> {
        match self {
            ScoringStrategy::Basic => Box::new(BasicScorer::default()),
            ScoringStrategy::Semantic => Box::new(SemanticScorer::default()),
        }
    }

    pub fn needs_embeddings(&self) -> bool {
        matches!(self, ScoringStrategy::Semantic)
    }
}

impl FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "lexical" => Ok(ScoringStrategy::Basic),
            "semantic" | "enhanced" => Ok(ScoringStrategy::Semantic),
            other => Err(format!(
                "unknown scoring strategy '{other}', expected 'basic' or 'semantic'"
            )),
        }
    }
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringStrategy::Basic => write!(f, "basic"),
            ScoringStrategy::Semantic => write!(f, "semantic"),
        }
    }
}

/// Cosine similarity; 0 when either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[test]
fn test_cosine_zero_vector() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
}

#[test]
fn test_cosine_length_mismatch() {
    assert_eq!(cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0]), 0.0);
}

#[test]
fn test_round2() {
    assert_eq!(round2(1.23456), 1.23);
    assert_eq!(round2(0.005), 0.01);
    assert_eq!(round2(2.0), 2.0);
}

#[test]
fn test_strategy_parse() {
    assert_eq!("Basic".parse::<ScoringStrategy>(), Ok(ScoringStrategy::Basic));
    assert_eq!(
        "enhanced".parse::<ScoringStrategy>(),
        Ok(ScoringStrategy::Semantic)
    );
    assert!("fuzzy".parse::<ScoringStrategy>().is_err());
}
