//! Domain types shared by the checkout state containers.
//!
//! Catalog ingredients arrive from outside and are referenced by their
//! catalog identifier. Entries placed into the in-progress composition
//! additionally carry a locally-generated instance identifier, because the
//! same catalog ingredient may be present several times at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog identifier of an ingredient
///
/// Owned by the catalog service; this core only passes it around.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientId(String);

impl IngredientId {
    /// Create an identifier from its string form
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IngredientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IngredientId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Structural category of a catalog ingredient
///
/// `Base` is the exclusive bun slot; everything else accumulates in the
/// ordered filling sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    /// The bun; exactly one slot, last write wins
    Base,
    /// Main fillings (patties, cheese, vegetables)
    Filling,
    /// Finishing touches (sauces, toppings)
    Finish,
}

impl IngredientKind {
    /// Whether this ingredient occupies the exclusive bun slot
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, Self::Base)
    }
}

/// Catalog ingredient with display metadata
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Catalog identifier
    pub id: IngredientId,
    /// Structural category
    pub kind: IngredientKind,
    /// Display name
    pub name: String,
    /// Display price in minor currency units
    pub price: u64,
    /// Display image, if the catalog provides one
    pub image: Option<String>,
}

/// Instance identifier of an entry placed into the composition
///
/// Distinct from the catalog identifier: reordering and removal key off it,
/// so two simultaneously-present entries never share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create an `EntryId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ingredient placed into the in-progress composition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorEntry {
    /// Locally-generated instance identifier
    pub entry_id: EntryId,
    /// The catalog ingredient this entry references
    pub ingredient: Ingredient,
}

/// Status of a submitted order, as reported by the ordering service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted but not yet started
    Created,
    /// Being prepared
    Pending,
    /// Completed
    Done,
}

/// Confirmation record returned by the ordering service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Confirmation number
    pub number: u32,
    /// The ingredient sequence that was submitted
    pub ingredients: Vec<IngredientId>,
    /// Current status
    pub status: OrderStatus,
    /// When the service created the order
    pub created_at: DateTime<Utc>,
}

/// The authenticated user's profile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
}

/// Login credentials
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Data required to create a new account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Partial profile update; absent fields are left unchanged
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New account email
    pub email: Option<String>,
    /// New account password
    pub password: Option<String>,
}
