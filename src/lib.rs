pub mod adapters;
pub mod config;
pub mod domain;
pub mod models;
pub mod services;

pub use adapters::bitmex::BitmexApi;
pub use adapters::OrderService;
pub use services::OrderApi;
