//! The Listex endpoint catalog.
//!
//! Each [`Operation`] maps to a static [`Endpoint`] naming the resource,
//! the HTTP method and the parameters the operation takes. The typed
//! methods on [`ListexClient`](crate::ListexClient) only shape arguments;
//! validation and delegation go through [`Endpoint::prepare`].

use std::collections::BTreeMap;
use std::fmt;

use crate::clients::{HttpMethod, InvalidRequestError, Resource};

const NONE: &[&str] = &[];
const PARTY: &[&str] = &["party_id"];
const BY_ID: &[&str] = &["good_id"];
const BY_GTIN: &[&str] = &["gtin"];
const BY_LTIN: &[&str] = &["ltin", "party_id"];
const BY_SKU: &[&str] = &["sku", "party_id"];
const LOCATION: &[&str] = &["location_id"];

const REVIEW_TO_GOOD: &[&str] = &[
    "good_id",
    "review_text",
    "social_type",
    "social_id",
    "review_author",
    "review_rating",
];
const REVIEW_TO_PARTY: &[&str] = &[
    "party_id",
    "review_text",
    "social_type",
    "social_id",
    "review_author",
    "review_rating",
];
const REVIEW_TO_BRAND: &[&str] = &[
    "brand_id",
    "review_text",
    "social_type",
    "social_id",
    "review_author",
    "review_rating",
];
const REPLY_TO_REVIEW: &[&str] = &[
    "review_parent_id",
    "review_text",
    "social_type",
    "social_id",
    "review_author",
    "review_rating",
];

/// Route and parameter list of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// The resource the operation addresses.
    pub resource: Resource,
    /// The HTTP method used.
    pub method: HttpMethod,
    /// Parameters that must be supplied.
    pub required: &'static [&'static str],
    /// Parameters sent only when their value is truthy.
    pub optional: &'static [&'static str],
}

impl Endpoint {
    /// Creates a new `Endpoint`.
    #[must_use]
    pub const fn new(
        resource: Resource,
        method: HttpMethod,
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self {
            resource,
            method,
            required,
            optional,
        }
    }

    const fn get(resource: Resource, required: &'static [&'static str]) -> Self {
        Self::new(resource, HttpMethod::Get, required, NONE)
    }

    /// Checks and trims a parameter map for this endpoint.
    ///
    /// Optional parameters with a falsy value (empty or `"0"`) are removed.
    /// Parameters outside the catalog lists are passed through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::MissingParameter`] when a required
    /// parameter is absent.
    pub fn prepare(
        &self,
        operation: Operation,
        mut params: BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, InvalidRequestError> {
        if let Some(name) = self
            .required
            .iter()
            .find(|name| !params.contains_key(**name))
        {
            return Err(InvalidRequestError::MissingParameter {
                operation: operation.name(),
                name: *name,
            });
        }

        params.retain(|key, value| !(self.optional.contains(&key.as_str()) && is_falsy(value)));
        Ok(params)
    }
}

fn is_falsy(value: &str) -> bool {
    value.is_empty() || value == "0"
}

/// Every call the Listex API offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List catalog attributes.
    Attributes,
    /// List brands.
    Brands,
    /// Look up suppliers by identifier.
    Suppliers,
    /// List product categories.
    Categories,
    /// Product card by good id.
    ProductById,
    /// Product cards by GTIN.
    ProductByGtin,
    /// Product cards by LTIN.
    ProductByLtin,
    /// Product cards by SKU.
    ProductBySku,
    /// Supplier product card by good id.
    SupplierProductById,
    /// Supplier product cards by GTIN.
    SupplierProductByGtin,
    /// Supplier product cards by LTIN.
    SupplierProductByLtin,
    /// Supplier product cards by SKU.
    SupplierProductBySku,
    /// ETags of a party's products.
    ETagsList,
    /// ETags of a supplier's products.
    SupplierETagsList,
    /// ETags of a party's products, one page at a time.
    ETagsListPaginated,
    /// Search suggestions.
    Suggestions,
    /// Review a product.
    ReviewToGood,
    /// Review a party.
    ReviewToParty,
    /// Review a brand.
    ReviewToBrand,
    /// Reply to a review.
    ReplyToReview,
    /// Resized product image.
    Image,
    /// Party locations.
    Locations,
    /// Palletization by good id.
    PalletizationById,
    /// Palletization by GTIN.
    PalletizationByGtin,
    /// Palletization by LTIN.
    PalletizationByLtin,
    /// Palletization by SKU.
    PalletizationBySku,
    /// Products added within a date range.
    NoveltyProducts,
    /// Read a planogram assortment.
    Assortment,
    /// Create a planogram assortment.
    CreateAssortment,
    /// Replace a planogram assortment.
    UpdateAssortment,
    /// Remove items from a planogram assortment.
    DeleteAssortment,
}

impl Operation {
    /// Every operation, in catalog order.
    pub const ALL: [Self; 31] = [
        Self::Attributes,
        Self::Brands,
        Self::Suppliers,
        Self::Categories,
        Self::ProductById,
        Self::ProductByGtin,
        Self::ProductByLtin,
        Self::ProductBySku,
        Self::SupplierProductById,
        Self::SupplierProductByGtin,
        Self::SupplierProductByLtin,
        Self::SupplierProductBySku,
        Self::ETagsList,
        Self::SupplierETagsList,
        Self::ETagsListPaginated,
        Self::Suggestions,
        Self::ReviewToGood,
        Self::ReviewToParty,
        Self::ReviewToBrand,
        Self::ReplyToReview,
        Self::Image,
        Self::Locations,
        Self::PalletizationById,
        Self::PalletizationByGtin,
        Self::PalletizationByLtin,
        Self::PalletizationBySku,
        Self::NoveltyProducts,
        Self::Assortment,
        Self::CreateAssortment,
        Self::UpdateAssortment,
        Self::DeleteAssortment,
    ];

    pub(crate) const PRODUCT: [Self; 4] = [
        Self::ProductById,
        Self::ProductByGtin,
        Self::ProductByLtin,
        Self::ProductBySku,
    ];

    pub(crate) const SUPPLIER_PRODUCT: [Self; 4] = [
        Self::SupplierProductById,
        Self::SupplierProductByGtin,
        Self::SupplierProductByLtin,
        Self::SupplierProductBySku,
    ];

    pub(crate) const PALLETIZATION: [Self; 4] = [
        Self::PalletizationById,
        Self::PalletizationByGtin,
        Self::PalletizationByLtin,
        Self::PalletizationBySku,
    ];

    /// Returns the catalog entry for this operation.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        use Resource as R;

        match self {
            Self::Attributes => Endpoint::new(
                R::Attributes,
                HttpMethod::Get,
                NONE,
                &["cat_id", "attr_type"],
            ),
            Self::Brands => Endpoint::new(R::Brands, HttpMethod::Get, NONE, PARTY),
            Self::Suppliers => Endpoint::get(R::Suppliers, &["identifier"]),
            Self::Categories => Endpoint::get(R::Categories, NONE),
            Self::ProductById => Endpoint::get(R::Product, BY_ID),
            Self::ProductByGtin => Endpoint::get(R::Product, BY_GTIN),
            Self::ProductByLtin => Endpoint::get(R::Product, BY_LTIN),
            Self::ProductBySku => Endpoint::get(R::Product, BY_SKU),
            Self::SupplierProductById => Endpoint::get(R::SupplierProduct, BY_ID),
            Self::SupplierProductByGtin => Endpoint::get(R::SupplierProduct, BY_GTIN),
            Self::SupplierProductByLtin => Endpoint::get(R::SupplierProduct, BY_LTIN),
            Self::SupplierProductBySku => Endpoint::get(R::SupplierProduct, BY_SKU),
            Self::ETagsList => Endpoint::get(R::ETagsList, PARTY),
            Self::SupplierETagsList => Endpoint::get(R::SupplierETagsList, PARTY),
            Self::ETagsListPaginated => Endpoint::new(
                R::ETagsListPaginated,
                HttpMethod::Get,
                PARTY,
                &["next_page_id"],
            ),
            Self::Suggestions => Endpoint::get(R::Suggestions, &["q"]),
            Self::ReviewToGood => Endpoint::new(R::AddReview, HttpMethod::Post, REVIEW_TO_GOOD, NONE),
            Self::ReviewToParty => {
                Endpoint::new(R::AddReview, HttpMethod::Post, REVIEW_TO_PARTY, NONE)
            }
            Self::ReviewToBrand => {
                Endpoint::new(R::AddReview, HttpMethod::Post, REVIEW_TO_BRAND, NONE)
            }
            Self::ReplyToReview => {
                Endpoint::new(R::AddReview, HttpMethod::Post, REPLY_TO_REVIEW, NONE)
            }
            Self::Image => Endpoint::get(R::Image, &["name", "width", "height", "no_background"]),
            Self::Locations => Endpoint::new(R::Locations, HttpMethod::Get, NONE, PARTY),
            Self::PalletizationById => Endpoint::get(R::Palletization, BY_ID),
            Self::PalletizationByGtin => Endpoint::get(R::Palletization, BY_GTIN),
            Self::PalletizationByLtin => Endpoint::get(R::Palletization, BY_LTIN),
            Self::PalletizationBySku => Endpoint::get(R::Palletization, BY_SKU),
            Self::NoveltyProducts => Endpoint::new(
                R::NoveltyProducts,
                HttpMethod::Get,
                &["date_from"],
                &["date_to"],
            ),
            Self::Assortment => Endpoint::new(R::Assortment, HttpMethod::Get, PARTY, LOCATION),
            Self::CreateAssortment => {
                Endpoint::new(R::Assortment, HttpMethod::Post, PARTY, LOCATION)
            }
            Self::UpdateAssortment => Endpoint::new(R::Assortment, HttpMethod::Put, PARTY, LOCATION),
            Self::DeleteAssortment => {
                Endpoint::new(R::Assortment, HttpMethod::Delete, PARTY, LOCATION)
            }
        }
    }

    /// Returns the operation name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Brands => "brands",
            Self::Suppliers => "suppliers",
            Self::Categories => "categories",
            Self::ProductById => "product_by_id",
            Self::ProductByGtin => "product_by_gtin",
            Self::ProductByLtin => "product_by_ltin",
            Self::ProductBySku => "product_by_sku",
            Self::SupplierProductById => "supplier_product_by_id",
            Self::SupplierProductByGtin => "supplier_product_by_gtin",
            Self::SupplierProductByLtin => "supplier_product_by_ltin",
            Self::SupplierProductBySku => "supplier_product_by_sku",
            Self::ETagsList => "etags_list",
            Self::SupplierETagsList => "supplier_etags_list",
            Self::ETagsListPaginated => "etags_list_paginated",
            Self::Suggestions => "suggestions",
            Self::ReviewToGood => "review_to_good",
            Self::ReviewToParty => "review_to_party",
            Self::ReviewToBrand => "review_to_brand",
            Self::ReplyToReview => "reply_to_review",
            Self::Image => "image",
            Self::Locations => "locations",
            Self::PalletizationById => "palletization_by_id",
            Self::PalletizationByGtin => "palletization_by_gtin",
            Self::PalletizationByLtin => "palletization_by_ltin",
            Self::PalletizationBySku => "palletization_by_sku",
            Self::NoveltyProducts => "novelty_products",
            Self::Assortment => "assortment",
            Self::CreateAssortment => "create_assortment",
            Self::UpdateAssortment => "update_assortment",
            Self::DeleteAssortment => "delete_assortment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
