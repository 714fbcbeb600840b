//! # lumina-search
//!
//! An image meta search service that fans one query out to many stock,
//! editorial and public-archive image APIs and returns a single list.
//!
//! This library provides:
//!
//! - A catalog of image providers described by static descriptors
//! - Concurrent dispatch with a per-provider timeout
//! - Failure isolation: a broken provider contributes no images
//! - An HTTP API built on axum
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lumina_search::{Config, ImageQuery, Registry, Search};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let search = Search::new(Arc::new(Registry::new(&config)?));
//!
//!     let query = ImageQuery::new("amazon rainforest").with_sources(["pexels", "pixabay"]);
//!     let response = search.search(query).await?;
//!
//!     for image in response.items() {
//!         println!("{}: {}", image.title, image.regular_url);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod provider;
mod query;
mod registry;
mod result;
mod search;
mod server;

pub mod providers;

pub use config::Config;
pub use error::{Result, SearchError};
pub use provider::{Provider, Tier};
pub use query::{
    parse_sources, ImageQuery, OrderBy, DEFAULT_PER_PAGE, MAX_PER_PAGE, MAX_QUERY_LEN,
};
pub use registry::{Registry, SourceInfo, SourceListing};
pub use result::{ImageRecord, SearchResponse};
pub use search::Search;
pub use server::{create_router, serve, ApiError, SearchParams};
