use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::scoring::ScoringStrategy;

pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_RESULTS: i64 = 10;
pub const MAX_CANDIDATES: u32 = 12;

/// Service configuration. Built once at startup and handed to the
/// `SearchService`; request handling never reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub google_cx: Option<String>,
    pub openai_api_key: Option<String>,
    pub google_endpoint: String,
    pub openai_endpoint: String,
    pub embedding_model: String,
    pub strategy: ScoringStrategy,
    pub default_results: i64,
    pub max_candidates: u32,
    pub http_timeout: Duration,
    pub log_level: tracing::Level,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchCredentials {
    pub api_key: String,
    pub cx: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingCredentials {
    pub api_key: String,
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            google_api_key: None,
            google_cx: None,
            openai_api_key: None,
            google_endpoint: DEFAULT_GOOGLE_ENDPOINT.to_string(),
            openai_endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            strategy: ScoringStrategy::Semantic,
            default_results: DEFAULT_RESULTS,
            max_candidates: MAX_CANDIDATES,
            http_timeout: Duration::from_secs(10),
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            google_api_key: non_empty(lookup("GOOGLE_API_KEY")),
            google_cx: non_empty(lookup("GOOGLE_CX")),
            openai_api_key: non_empty(lookup("OPENAI_API_KEY")),
            google_endpoint: get_or_default(&lookup, "GOOGLE_ENDPOINT", DEFAULT_GOOGLE_ENDPOINT),
            openai_endpoint: get_or_default(&lookup, "OPENAI_ENDPOINT", DEFAULT_OPENAI_ENDPOINT),
            embedding_model: get_or_default(&lookup, "EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            strategy: parse_or(&lookup, "SCORING_STRATEGY", defaults.strategy)?,
            default_results: parse_or(&lookup, "DEFAULT_RESULTS", defaults.default_results)?,
            max_candidates: parse_or(&lookup, "MAX_CANDIDATES", defaults.max_candidates)?,
            http_timeout: Duration::from_secs(parse_or(
                &lookup,
                "HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )?),
            log_level: parse_or(&lookup, "LOG_LEVEL", defaults.log_level)?,
        })
    }

    pub fn search_credentials(&self) -> Option<SearchCredentials> {
        Some(SearchCredentials {
            api_key: self.google_api_key.clone()?,
            cx: self.google_cx.clone()?,
        })
    }

    pub fn embedding_credentials(&self) -> Option<EmbeddingCredentials> {
        Some(EmbeddingCredentials {
            api_key: self.openai_api_key.clone()?,
            model: self.embedding_model.clone(),
        })
    }

    /// Upper bound for `num`; the basic strategy leaves it unbounded.
    pub fn result_cap(&self) -> Option<u32> {
        match self.strategy {
            ScoringStrategy::Basic => None,
            ScoringStrategy::Semantic => Some(self.max_candidates),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(key)).unwrap_or_else(|| default.to_string())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(key)) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for environment variable {key}: {raw}")),
    }
}
