pub mod api_client;
pub mod category;
pub mod config;
pub mod detail;
pub mod fallback;
pub mod format;
pub mod markets;
pub mod models;
pub mod portfolio;
pub mod price_parser;
pub mod service;
pub mod slug;
pub mod transform;
