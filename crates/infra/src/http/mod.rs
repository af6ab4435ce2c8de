//! Thin wrapper over reqwest

mod client;

pub use client::{HttpClient, HttpClientBuilder};
