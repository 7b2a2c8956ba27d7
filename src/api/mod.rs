//! Secutils backend API access
//!
//! [`ApiClient`] talks to the user data and utility endpoints;
//! [`UserDataStore`] abstracts the user data key-value store so entity
//! collections can be loaded and saved through any backend.

pub mod client;
pub mod user_data;

// Re-export key types
pub use client::ApiClient;
pub use user_data::{
    load_collection, remove_item, save_collection, upsert_item, InMemoryUserDataStore,
    UserDataStore,
};
