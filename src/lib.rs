pub mod api;
pub mod assistant;
pub mod classifier;
pub mod composer;
pub mod config;
pub mod data_models;
pub mod duckduckgo;
pub mod generation;
pub mod mock_answers;
pub mod render;
pub mod search_agent;
