use std::fmt;

use serde::{Deserialize, Serialize};

// --- Constants ---

/// Generic nouns the extractor sometimes emits as party names. Never graphed.
pub const BANNED_ENTITIES: [&str; 3] = ["Restaurants", "Customers", "Michelin Guide"];

/// Relationship type carried by every edge in the supply graph.
pub const SUPPLIES: &str = "SUPPLIES";

/// Minimum number of nodes in a connected component for it to count as a cluster.
pub const MIN_CLUSTER_SIZE: usize = 4;

/// Strip apostrophes from an entity name or edge property. No other folding.
pub fn normalize_name(value: &str) -> String {
    value.replace('\'', "")
}

/// True if the name is one of the generic parties excluded from the graph.
pub fn is_banned(name: &str) -> bool {
    BANNED_ENTITIES.contains(&name)
}

// --- Input records ---

/// One article as produced by the upstream extraction step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

/// A single supplier → buyer mention extracted from an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl RelationshipRecord {
    pub fn new(supplier: &str, buyer: &str, product: &str, location: &str) -> Self {
        Self {
            supplier: Some(supplier.to_string()),
            buyer: Some(buyer.to_string()),
            product: Some(product.to_string()),
            location: Some(location.to_string()),
        }
    }

    /// True if at least one of supplier or buyer is present.
    pub fn has_party(&self) -> bool {
        self.supplier.is_some() || self.buyer.is_some()
    }

    /// True if either named party is on the banned list.
    pub fn names_banned_party(&self) -> bool {
        self.supplier.as_deref().is_some_and(is_banned)
            || self.buyer.as_deref().is_some_and(is_banned)
    }
}

// --- Graph vocabulary ---

/// Node label in the supply graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityLabel {
    Supplier,
    Restaurant,
    #[serde(rename = "T2_Supplier")]
    T2Supplier,
}

impl EntityLabel {
    pub const ALL: [EntityLabel; 3] = [
        EntityLabel::Supplier,
        EntityLabel::Restaurant,
        EntityLabel::T2Supplier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Supplier => "Supplier",
            EntityLabel::Restaurant => "Restaurant",
            EntityLabel::T2Supplier => "T2_Supplier",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role a name plays inside one relationship. Determines both the node
/// label and the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Supplier,
    Buyer,
    T2Supplier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Supplier => "supplier",
            Role::Buyer => "buyer",
            Role::T2Supplier => "T2_supplier",
        }
    }

    pub fn label(&self) -> EntityLabel {
        match self {
            Role::Supplier => EntityLabel::Supplier,
            Role::Buyer => EntityLabel::Restaurant,
            Role::T2Supplier => EntityLabel::T2Supplier,
        }
    }

    /// First three characters of the role name, lowercased: `sup`, `buy`, `t2_`.
    pub fn id_prefix(&self) -> String {
        self.as_str().chars().take(3).collect::<String>().to_lowercase()
    }
}

/// A relationship after tier reclassification.
///
/// `TierOne` is a plain supplier → restaurant mention. `TierTwo` is produced
/// when the original buyer also supplies someone elsewhere in the corpus: the
/// original supplier moves up a tier and the original buyer becomes the
/// tier-one supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipVariant {
    TierOne {
        supplier: Option<String>,
        buyer: Option<String>,
        product: Option<String>,
        location: Option<String>,
    },
    TierTwo {
        t2_supplier: Option<String>,
        supplier: String,
        product: Option<String>,
        location: Option<String>,
    },
}

impl RelationshipVariant {
    /// Present parties in resolution order: supplier, buyer, T2_supplier.
    pub fn parties(&self) -> Vec<(Role, &str)> {
        let mut parties = Vec::with_capacity(2);
        match self {
            RelationshipVariant::TierOne { supplier, buyer, .. } => {
                if let Some(s) = supplier {
                    parties.push((Role::Supplier, s.as_str()));
                }
                if let Some(b) = buyer {
                    parties.push((Role::Buyer, b.as_str()));
                }
            }
            RelationshipVariant::TierTwo { t2_supplier, supplier, .. } => {
                parties.push((Role::Supplier, supplier.as_str()));
                if let Some(t2) = t2_supplier {
                    parties.push((Role::T2Supplier, t2.as_str()));
                }
            }
        }
        parties
    }

    /// The (from, to) roles for the edge this relationship produces, if both
    /// parties are present.
    pub fn edge_roles(&self) -> Option<(Role, Role)> {
        match self {
            RelationshipVariant::TierTwo { t2_supplier: Some(_), .. } => {
                Some((Role::T2Supplier, Role::Supplier))
            }
            RelationshipVariant::TierOne {
                supplier: Some(_),
                buyer: Some(_),
                ..
            } => Some((Role::Supplier, Role::Buyer)),
            _ => None,
        }
    }

    pub fn product(&self) -> &str {
        match self {
            RelationshipVariant::TierOne { product, .. }
            | RelationshipVariant::TierTwo { product, .. } => product.as_deref().unwrap_or(""),
        }
    }

    pub fn location(&self) -> &str {
        match self {
            RelationshipVariant::TierOne { location, .. }
            | RelationshipVariant::TierTwo { location, .. } => location.as_deref().unwrap_or(""),
        }
    }

    pub fn is_tier_two(&self) -> bool {
        matches!(self, RelationshipVariant::TierTwo { .. })
    }
}

/// An article that survived banned-entity filtering, with reclassified relationships.
#[derive(Debug, Clone)]
pub struct ReclassifiedArticle {
    pub url: String,
    pub relationships: Vec<RelationshipVariant>,
}
