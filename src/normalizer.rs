use serde_json::Value;

use crate::data_models::{Candidate, RawSearchItem};

/// A path into a pagemap. Arrays met along the way resolve to their first element.
pub type FieldPath = &'static [&'static str];

pub const IMAGE_PATHS: &[FieldPath] = &[
    &["cse_image", "src"],
    &["image", "src"],
    &["metatags", "og:image"],
];

pub const PRICE_PATHS: &[FieldPath] = &[
    &["offer", "price"],
    &["product", "offers", "price"],
    &["metatags", "product:price:amount"],
];

/// Resolves `path` inside `root`, returning the leaf rendered as a string.
pub fn lookup(root: &Value, path: &[&str]) -> Option<String> {
    let mut node = root;
    for segment in path {
        node = first_element(node).get(*segment)?;
    }
    match first_element(node) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_element(node: &Value) -> &Value {
    match node {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        other => other,
    }
}

/// Evaluates accessors in order and returns the first non-empty result, or "".
pub fn first_non_empty<T, F>(source: &T, accessors: &[F]) -> String
where
    F: Fn(&T) -> Option<String>,
{
    accessors
        .iter()
        .filter_map(|accessor| accessor(source))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_default()
}

fn first_in_paths(metadata: &Value, paths: &[FieldPath]) -> String {
    let accessors: Vec<_> = paths
        .iter()
        .map(|path| move |m: &Value| lookup(m, path))
        .collect();
    first_non_empty(metadata, &accessors)
}

pub fn normalize(item: RawSearchItem) -> Candidate {
    let metadata = item.pagemap.unwrap_or(Value::Null);
    Candidate {
        title: item.title.unwrap_or_default(),
        link: item.link.unwrap_or_default(),
        snippet: item.snippet.unwrap_or_default(),
        image: first_in_paths(&metadata, IMAGE_PATHS),
        price: first_in_paths(&metadata, PRICE_PATHS),
        raw_metadata: metadata,
    }
}

pub fn normalize_all(items: Vec<RawSearchItem>) -> Vec<Candidate> {
    items.into_iter().map(normalize).collect()
}
