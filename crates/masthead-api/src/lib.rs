// masthead-api: Async Rust client for the Masthead Data client API.
//
// Covers the `/clientApi` surface: users, data domains, and data products
// (with their nested data assets). One `MastheadClient` per process is
// enough; it is cheap to clone the underlying reqwest client and safe to
// share across tasks.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
mod resources;

pub use client::MastheadClient;
pub use config::ClientConfig;
pub use error::Error;
pub use model::{
    AlertType, AssetType, DataProduct, DataProductAsset, Domain, Pagination, SlackChannel, User,
    UserRole,
};
