//! Listex resource names.

use std::fmt;

/// A server-side collection or action, addressed by a path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Catalog attributes (`attributes`).
    Attributes,
    /// Brands (`brands`).
    Brands,
    /// Suppliers (`suppliers`).
    Suppliers,
    /// Product categories (`categories`).
    Categories,
    /// Product cards (`product`).
    Product,
    /// Supplier-maintained product cards (`supplier-product`).
    SupplierProduct,
    /// ETags of a party's products (`etagslist`).
    ETagsList,
    /// ETags of a supplier's products (`supplier-etagslist`).
    SupplierETagsList,
    /// Paginated ETags of a party's products (`etagslist-paginated`).
    ETagsListPaginated,
    /// Product search suggestions (`suggestions`).
    Suggestions,
    /// Review submission (`addreview`).
    AddReview,
    /// Resized product images (`image`).
    Image,
    /// Party locations (`locations`).
    Locations,
    /// Palletization data (`palletization`).
    Palletization,
    /// Recently added products (`novelty-products`).
    NoveltyProducts,
    /// Planogram assortments (`assortment`).
    Assortment,
}

impl Resource {
    /// Every resource, in catalog order.
    pub const ALL: [Self; 16] = [
        Self::Attributes,
        Self::Brands,
        Self::Suppliers,
        Self::Categories,
        Self::Product,
        Self::SupplierProduct,
        Self::ETagsList,
        Self::SupplierETagsList,
        Self::ETagsListPaginated,
        Self::Suggestions,
        Self::AddReview,
        Self::Image,
        Self::Locations,
        Self::Palletization,
        Self::NoveltyProducts,
        Self::Assortment,
    ];

    /// Returns the path segment for this resource.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Brands => "brands",
            Self::Suppliers => "suppliers",
            Self::Categories => "categories",
            Self::Product => "product",
            Self::SupplierProduct => "supplier-product",
            Self::ETagsList => "etagslist",
            Self::SupplierETagsList => "supplier-etagslist",
            Self::ETagsListPaginated => "etagslist-paginated",
            Self::Suggestions => "suggestions",
            Self::AddReview => "addreview",
            Self::Image => "image",
            Self::Locations => "locations",
            Self::Palletization => "palletization",
            Self::NoveltyProducts => "novelty-products",
            Self::Assortment => "assortment",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
