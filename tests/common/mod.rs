#![allow(dead_code)]

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use cardsearch::config::{Config, EmbeddingCredentials, SearchCredentials};
use cardsearch::data_models::{Query, RawSearchItem};
use cardsearch::error::{Result, SearchError};
use cardsearch::providers::{EmbeddingProvider, SearchProvider};
use cardsearch::scoring::ScoringStrategy;
use cardsearch::search_service::SearchService;

pub fn raw_item(title: &str, link: &str, snippet: &str, pagemap: Option<Value>) -> RawSearchItem {
    RawSearchItem {
        title: Some(title.to_string()),
        link: Some(link.to_string()),
        snippet: Some(snippet.to_string()),
        pagemap,
    }
}

pub fn full_config(strategy: ScoringStrategy) -> Config {
    Config {
        google_api_key: Some("google-key".into()),
        google_cx: Some("engine-id".into()),
        openai_api_key: Some("openai-key".into()),
        strategy,
        ..Config::default()
    }
}

pub enum SearchBehaviour {
    Items(Vec<RawSearchItem>),
    Upstream(String),
    Panic,
}

pub struct MockSearch {
    behaviour: SearchBehaviour,
    calls: AtomicUsize,
    last_query: Mutex<Option<Query>>,
}

impl MockSearch {
    pub fn new(behaviour: SearchBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        })
    }

    pub fn with_items(items: Vec<RawSearchItem>) -> Arc<Self> {
        Self::new(SearchBehaviour::Items(items))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<Query> {
        self.last_query.lock().unwrap().clone()
    }
}

impl SearchProvider for MockSearch {
    fn search<'a>(
        &'a self,
        _credentials: &'a SearchCredentials,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<RawSearchItem>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        let result = match &self.behaviour {
            SearchBehaviour::Items(items) => Ok(items.clone()),
            SearchBehaviour::Upstream(detail) => Err(SearchError::Upstream {
                detail: detail.clone(),
            }),
            SearchBehaviour::Panic => panic!("search backend exploded"),
        };
        async move { result }.boxed()
    }
}

pub enum EmbedBehaviour {
    Vectors(Vec<Vec<f32>>),
    Fail(String),
}

pub struct MockEmbedder {
    behaviour: EmbedBehaviour,
    calls: AtomicUsize,
    last_inputs: Mutex<Vec<String>>,
}

impl MockEmbedder {
    pub fn new(behaviour: EmbedBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            last_inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn with_vectors(vectors: Vec<Vec<f32>>) -> Arc<Self> {
        Self::new(EmbedBehaviour::Vectors(vectors))
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Self::new(EmbedBehaviour::Fail(reason.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_inputs(&self) -> Vec<String> {
        self.last_inputs.lock().unwrap().clone()
    }
}

impl EmbeddingProvider for MockEmbedder {
    fn embed<'a>(
        &'a self,
        _credentials: &'a EmbeddingCredentials,
        inputs: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_inputs.lock().unwrap() = inputs.to_vec();
        let result = match &self.behaviour {
            EmbedBehaviour::Vectors(v) => Ok(v.clone()),
            EmbedBehaviour::Fail(reason) => Err(SearchError::Embedding(reason.clone())),
        };
        async move { result }.boxed()
    }
}

pub fn service(
    config: Config,
    search: &Arc<MockSearch>,
    embedder: &Arc<MockEmbedder>,
) -> SearchService {
    SearchService::new(config, search.clone(), embedder.clone())
}
