//! UBCI (Upbit Cryptocurrency Index) integration.
//!
//! The catalog is assembled from one basket request per known index code.

pub mod client;
pub mod dto;
pub mod registry;
pub mod settings;

pub use client::UbciClient;
pub use settings::ApiConfig;
