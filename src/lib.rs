//! Inventory Service Library

pub mod client;
pub mod config;
pub mod http;
pub mod inventory;
pub mod lifecycle;
pub mod observability;

pub use client::InventoryClient;
pub use config::ServiceConfig;
pub use http::HttpServer;
