pub mod auth;
pub mod client;
pub mod orders;

pub use client::BitmexApi;
