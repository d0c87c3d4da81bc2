//! # Listex API Rust client
//!
//! An async client for the Listex product-data REST API: product cards,
//! brands, suppliers, categories, reviews, images, palletization and
//! planogram assortments.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ListexConfig`] and [`ListexConfigBuilder`]
//! - Validated newtypes for the API key and host override
//! - [`ListexClient`], with one method per Listex API call
//! - [`HttpClient`], the request pipeline underneath it, usable directly
//!   for any [`Resource`](clients::Resource)
//! - Conditional requests through entity tags, with 304 surfaced as
//!   [`ListexError::NotModified`]
//! - Usage quota and retry delay read from response headers
//!
//! ## Quick Start
//!
//! ```rust
//! use listex_api::{ListexConfig, ApiKey, ApiVersion, ResponseFormat};
//!
//! let config = ListexConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .format(ResponseFormat::Json)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api.listex.info");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use listex_api::{ListexClient, ListexConfig, ListexError};
//! use listex_api::api::ProductLookup;
//!
//! let client = ListexClient::new(&ListexConfig::with_api_key("your-api-key")?);
//!
//! let response = client.get_product(&ProductLookup::Id(42), None).await?;
//! println!("{}", response.text());
//!
//! if let Some(used) = client.current_usage_count() {
//!     println!("{used} of {:?} requests used", client.usage_limit());
//! }
//!
//! match client.get_categories(response.etag()).await {
//!     Err(ListexError::NotModified { .. }) => println!("categories unchanged"),
//!     Err(ListexError::RequestLimitReached { .. }) => {
//!         println!("retry in {:?} seconds", client.retry_after());
//!     }
//!     other => println!("{}", other?.text()),
//! }
//! ```
//!
//! ## Legacy API
//!
//! [`ApiVersion::V2`] talks to the legacy `https://listex.info/api` host and
//! authenticates with the `key` parameter instead of `apikey`.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden retries**: Every call sends at most one request

pub mod api;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use api::{ListexClient, Operation};
pub use config::{ApiKey, ApiVersion, BaseUrl, ListexConfig, ListexConfigBuilder, ResponseFormat};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpMethod, InvalidRequestError, ListexError, RawResponse, RequestSpec,
    ReqwestTransport, Transport, TransportError, UsageLimit,
};
