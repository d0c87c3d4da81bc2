//! Argument types for the Listex endpoint methods.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::endpoints::Operation;

/// Attribute selection for the `attributes` resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    /// Every attribute (`a`).
    #[serde(rename = "a")]
    All,
    /// Mandatory attributes only (`m`).
    #[serde(rename = "m")]
    Mandatory,
    /// Recommended attributes only (`r`).
    #[serde(rename = "r")]
    Recommended,
    /// Optional attributes only (`o`).
    #[serde(rename = "o")]
    Optional,
}

impl AttributeType {
    /// Returns the parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "a",
            Self::Mandatory => "m",
            Self::Recommended => "r",
            Self::Optional => "o",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social network a review author signed in with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialType {
    /// Google+ (`gp`).
    #[serde(rename = "gp")]
    GooglePlus,
    /// Facebook (`fb`).
    #[serde(rename = "fb")]
    Facebook,
    /// Twitter (`tw`).
    #[serde(rename = "tw")]
    Twitter,
    /// VK (`vk`).
    #[serde(rename = "vk")]
    Vk,
}

impl SocialType {
    /// Returns the parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GooglePlus => "gp",
            Self::Facebook => "fb",
            Self::Twitter => "tw",
            Self::Vk => "vk",
        }
    }
}

impl fmt::Display for SocialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a product is identified.
///
/// LTIN and SKU codes are only unique within a party, so those lookups
/// carry the party id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProductLookup {
    /// Listex good id (`good_id`).
    Id(u64),
    /// Global trade item number (`gtin`).
    Gtin(String),
    /// Local trade item number of a party (`ltin`, `party_id`).
    Ltin {
        /// The local code.
        ltin: String,
        /// The party the code belongs to.
        party_id: u64,
    },
    /// Stock keeping unit of a party (`sku`, `party_id`).
    Sku {
        /// The SKU.
        sku: String,
        /// The party the SKU belongs to.
        party_id: u64,
    },
}

impl ProductLookup {
    /// Returns the parameters identifying the product.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Id(good_id) => vec![("good_id", good_id.to_string())],
            Self::Gtin(gtin) => vec![("gtin", gtin.clone())],
            Self::Ltin { ltin, party_id } => {
                vec![("ltin", ltin.clone()), ("party_id", party_id.to_string())]
            }
            Self::Sku { sku, party_id } => {
                vec![("sku", sku.clone()), ("party_id", party_id.to_string())]
            }
        }
    }

    /// Picks the operation matching this lookup from a by-id, by-GTIN,
    /// by-LTIN, by-SKU family.
    pub(crate) const fn select(&self, family: [Operation; 4]) -> Operation {
        match self {
            Self::Id(_) => family[0],
            Self::Gtin(_) => family[1],
            Self::Ltin { .. } => family[2],
            Self::Sku { .. } => family[3],
        }
    }
}

/// What a review is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReviewTarget {
    /// A product (`good_id`).
    Good(u64),
    /// A party (`party_id`).
    Party(u64),
    /// A brand (`brand_id`).
    Brand(u64),
    /// Another review, making this a reply (`review_parent_id`).
    Reply(u64),
}

impl ReviewTarget {
    /// Returns the parameter naming the target and its id.
    #[must_use]
    pub const fn param(&self) -> (&'static str, u64) {
        match self {
            Self::Good(id) => ("good_id", *id),
            Self::Party(id) => ("party_id", *id),
            Self::Brand(id) => ("brand_id", *id),
            Self::Reply(id) => ("review_parent_id", *id),
        }
    }

    pub(crate) const fn operation(&self) -> Operation {
        match self {
            Self::Good(_) => Operation::ReviewToGood,
            Self::Party(_) => Operation::ReviewToParty,
            Self::Brand(_) => Operation::ReviewToBrand,
            Self::Reply(_) => Operation::ReplyToReview,
        }
    }
}

/// A review submitted through the `addreview` resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// The review message.
    pub text: String,
    /// The network the author signed in with.
    pub social_type: SocialType,
    /// The author's id on that network.
    pub social_id: String,
    /// The author's display name.
    pub author: String,
    /// The rating given.
    pub rating: u8,
}

impl Review {
    /// Returns the review parameters, without the target.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("review_text", self.text.clone()),
            ("social_type", self.social_type.to_string()),
            ("social_id", self.social_id.clone()),
            ("review_author", self.author.clone()),
            ("review_rating", self.rating.to_string()),
        ]
    }
}
