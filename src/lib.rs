pub mod api;
pub mod config;
pub mod data_models;
pub mod error;
pub mod normalizer;
pub mod providers;
pub mod ranking;
pub mod render;
pub mod scoring;
pub mod search_service;
