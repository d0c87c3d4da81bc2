//! The Listex endpoint facade.
//!
//! [`ListexClient`] exposes one method per Listex API call. Every method
//! shapes its arguments into a parameter map and goes through
//! [`ListexClient::call`], which looks the operation up in the
//! [`endpoints`] catalog, checks its required parameters, drops falsy
//! optional ones and sends the request.
//!
//! # Example
//!
//! ```rust,ignore
//! use listex_api::{ListexClient, ListexConfig};
//! use listex_api::api::ProductLookup;
//!
//! let client = ListexClient::new(&ListexConfig::with_api_key("my-api-key")?);
//!
//! let first = client.get_product(&ProductLookup::Gtin("4820000000000".into()), None).await?;
//! let etag = first.etag().map(String::from);
//!
//! // Later: only download the card if it changed
//! match client.get_product(&ProductLookup::Gtin("4820000000000".into()), etag.as_deref()).await {
//!     Err(e) if e.is_not_modified() => println!("unchanged"),
//!     other => println!("{}", other?.text()),
//! }
//! ```

pub mod endpoints;
mod types;

pub use endpoints::{Endpoint, Operation};
pub use types::{AttributeType, ProductLookup, Review, ReviewTarget, SocialType};

use std::collections::BTreeMap;
use std::fmt::Display;

use serde_json::Value;

use crate::clients::{
    HttpClient, ListexError, RawResponse, ReqwestTransport, RequestSpec, Transport, UsageLimit,
};
use crate::config::{ListexConfig, ResponseFormat};
use crate::error::ConfigError;

/// Client for the Listex product-data API.
///
/// Methods return the [`RawResponse`] of the call on success. A 404 is not
/// an error: the response comes back with an empty body. Every other
/// non-200 status is a [`ListexError`]; 304 in particular surfaces as
/// [`ListexError::NotModified`] when a conditional request finds the
/// resource unchanged.
#[derive(Debug)]
pub struct ListexClient<T = ReqwestTransport> {
    http: HttpClient<T>,
}

// Verify ListexClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ListexClient>();
};

impl ListexClient<ReqwestTransport> {
    /// Creates a client that sends requests with [`ReqwestTransport`].
    #[must_use]
    pub fn new(config: &ListexConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Creates a client with default settings for the given API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn from_api_key(key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::new(&ListexConfig::with_api_key(key)?))
    }
}

impl<T: Transport> ListexClient<T> {
    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: &ListexConfig, transport: T) -> Self {
        Self {
            http: HttpClient::with_transport(config, transport),
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient<T> {
        &self.http
    }

    /// Returns the response format used by subsequent calls.
    #[must_use]
    pub const fn format(&self) -> ResponseFormat {
        self.http.format()
    }

    /// Requests JSON bodies from now on.
    pub fn set_format_json(&mut self) {
        self.http.set_format(ResponseFormat::Json);
    }

    /// Requests XML bodies from now on.
    pub fn set_format_xml(&mut self) {
        self.http.set_format(ResponseFormat::Xml);
    }

    /// Status code of the most recent call, or 0 if it received none.
    #[must_use]
    pub fn last_http_code(&self) -> u16 {
        self.http.last_http_code()
    }

    /// Entity tag of the most recent response.
    #[must_use]
    pub fn last_etag(&self) -> Option<String> {
        self.http.last_etag()
    }

    /// Usage quota reported by the most recent response.
    #[must_use]
    pub fn last_usage(&self) -> Option<UsageLimit> {
        self.http.last_usage()
    }

    /// Requests used in the current quota window.
    #[must_use]
    pub fn current_usage_count(&self) -> Option<u64> {
        self.http.current_usage_count()
    }

    /// Requests allowed in the current quota window.
    #[must_use]
    pub fn usage_limit(&self) -> Option<u64> {
        self.http.usage_limit()
    }

    /// Seconds until access is granted again after a 429.
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        self.http.retry_after()
    }

    /// Performs `operation` with the given parameters.
    ///
    /// `etag` makes the request conditional. `payload` is sent as a JSON
    /// body and is only accepted by non-GET operations.
    ///
    /// # Errors
    ///
    /// Returns [`ListexError::InvalidArgument`] if a required parameter is
    /// missing or a payload is given to a GET operation. Nothing is sent in
    /// that case. Otherwise returns the errors of [`HttpClient::request`].
    pub async fn call(
        &self,
        operation: Operation,
        params: BTreeMap<String, String>,
        etag: Option<&str>,
        payload: Option<Value>,
    ) -> Result<RawResponse, ListexError> {
        let endpoint = operation.endpoint();
        let params = endpoint.prepare(operation, params)?;

        let mut builder = RequestSpec::builder(endpoint.resource)
            .method(endpoint.method)
            .params(params);
        if let Some(etag) = etag {
            builder = builder.if_none_match(etag);
        }
        if let Some(payload) = payload {
            builder = builder.payload(payload);
        }
        let spec = builder.build()?;

        tracing::debug!("Calling Listex operation {}", operation);
        self.http.request(&spec).await
    }

    /// Attributes, optionally limited to a category and an attribute type.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_attributes(
        &self,
        cat_id: Option<u64>,
        attr_type: Option<AttributeType>,
    ) -> Result<RawResponse, ListexError> {
        let params = params([("cat_id", opt(cat_id)), ("attr_type", opt(attr_type))]);
        self.call(Operation::Attributes, params, None, None).await
    }

    /// Brands, optionally only those of one party.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_brands(
        &self,
        party_id: Option<u64>,
        etag: Option<&str>,
    ) -> Result<RawResponse, ListexError> {
        let params = params([("party_id", opt(party_id))]);
        self.call(Operation::Brands, params, etag, None).await
    }

    /// Suppliers matching an identifier (e.g. a tax number).
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_suppliers(&self, identifier: &str) -> Result<RawResponse, ListexError> {
        let params = params([("identifier", identifier.to_string())]);
        self.call(Operation::Suppliers, params, None, None).await
    }

    /// The category tree.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_categories(&self, etag: Option<&str>) -> Result<RawResponse, ListexError> {
        self.call(Operation::Categories, BTreeMap::new(), etag, None)
            .await
    }

    /// Product card.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_product(
        &self,
        lookup: &ProductLookup,
        etag: Option<&str>,
    ) -> Result<RawResponse, ListexError> {
        let operation = lookup.select(Operation::PRODUCT);
        self.call(operation, params(lookup.params()), etag, None)
            .await
    }

    /// Product card as published by its supplier.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_supplier_product(
        &self,
        lookup: &ProductLookup,
        etag: Option<&str>,
    ) -> Result<RawResponse, ListexError> {
        let operation = lookup.select(Operation::SUPPLIER_PRODUCT);
        self.call(operation, params(lookup.params()), etag, None)
            .await
    }

    /// Entity tags of every product of a party.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_etags_list(&self, party_id: u64) -> Result<RawResponse, ListexError> {
        let params = params([("party_id", party_id.to_string())]);
        self.call(Operation::ETagsList, params, None, None).await
    }

    /// Entity tags of every supplier product of a party.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_supplier_etags_list(
        &self,
        party_id: u64,
    ) -> Result<RawResponse, ListexError> {
        let params = params([("party_id", party_id.to_string())]);
        self.call(Operation::SupplierETagsList, params, None, None)
            .await
    }

    /// One page of a party's entity tags. Pass the `next_page_id` from the
    /// previous page to continue.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_etags_list_paginated(
        &self,
        party_id: u64,
        next_page_id: Option<u64>,
    ) -> Result<RawResponse, ListexError> {
        let params = params([
            ("party_id", party_id.to_string()),
            ("next_page_id", opt(next_page_id)),
        ]);
        self.call(Operation::ETagsListPaginated, params, None, None)
            .await
    }

    /// Search suggestions for a query.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_suggestions(&self, query: &str) -> Result<RawResponse, ListexError> {
        let params = params([("q", query.to_string())]);
        self.call(Operation::Suggestions, params, None, None).await
    }

    /// Posts a review of a product, party or brand, or a reply to another
    /// review.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn add_review(
        &self,
        target: ReviewTarget,
        review: &Review,
    ) -> Result<RawResponse, ListexError> {
        let (key, id) = target.param();
        let mut params = params(review.params());
        params.insert(key.to_string(), id.to_string());
        self.call(target.operation(), params, None, None).await
    }

    /// A product image scaled to the given size.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_image(
        &self,
        name: &str,
        width: u32,
        height: u32,
        no_background: bool,
    ) -> Result<RawResponse, ListexError> {
        let params = params([
            ("name", name.to_string()),
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("no_background", u8::from(no_background).to_string()),
        ]);
        self.call(Operation::Image, params, None, None).await
    }

    /// Locations, optionally only those of one party.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_locations(&self, party_id: Option<u64>) -> Result<RawResponse, ListexError> {
        let params = params([("party_id", opt(party_id))]);
        self.call(Operation::Locations, params, None, None).await
    }

    /// Palletization data of a product.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_palletization(
        &self,
        lookup: &ProductLookup,
    ) -> Result<RawResponse, ListexError> {
        let operation = lookup.select(Operation::PALLETIZATION);
        self.call(operation, params(lookup.params()), None, None)
            .await
    }

    /// Products added since `date_from`, optionally up to `date_to`.
    ///
    /// Dates are passed through as given (the API expects `YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_novelty_products(
        &self,
        date_from: &str,
        date_to: Option<&str>,
    ) -> Result<RawResponse, ListexError> {
        let params = params([
            ("date_from", date_from.to_string()),
            ("date_to", opt(date_to)),
        ]);
        self.call(Operation::NoveltyProducts, params, None, None)
            .await
    }

    /// A party's planogram assortment.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get_assortment(
        &self,
        party_id: u64,
        location_id: Option<u64>,
        etag: Option<&str>,
    ) -> Result<RawResponse, ListexError> {
        self.call(
            Operation::Assortment,
            assortment_params(party_id, location_id),
            etag,
            None,
        )
        .await
    }

    /// Creates a planogram assortment from a JSON document.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn create_assortment(
        &self,
        party_id: u64,
        location_id: Option<u64>,
        payload: Value,
    ) -> Result<RawResponse, ListexError> {
        self.call(
            Operation::CreateAssortment,
            assortment_params(party_id, location_id),
            None,
            Some(payload),
        )
        .await
    }

    /// Replaces a planogram assortment.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn update_assortment(
        &self,
        party_id: u64,
        location_id: Option<u64>,
        payload: Value,
    ) -> Result<RawResponse, ListexError> {
        self.call(
            Operation::UpdateAssortment,
            assortment_params(party_id, location_id),
            None,
            Some(payload),
        )
        .await
    }

    /// Deletes a planogram assortment, or only the items listed in
    /// `payload`.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn delete_assortment(
        &self,
        party_id: u64,
        location_id: Option<u64>,
        payload: Option<Value>,
    ) -> Result<RawResponse, ListexError> {
        self.call(
            Operation::DeleteAssortment,
            assortment_params(party_id, location_id),
            None,
            payload,
        )
        .await
    }
}

fn params<I>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Absent optional values become empty strings, which `call` drops.
fn opt<V: Display>(value: Option<V>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn assortment_params(party_id: u64, location_id: Option<u64>) -> BTreeMap<String, String> {
    params([
        ("party_id", party_id.to_string()),
        ("location_id", opt(location_id)),
    ])
}
