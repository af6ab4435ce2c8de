//! Bearer token persistence port

pub mod ports;

pub use ports::TokenStore;
