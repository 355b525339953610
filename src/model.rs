//! Point-of-sale records and the request shapes that create or replace them.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A record kind managed by a [`Store`](crate::store::Store).
///
/// Implementors describe how a request payload is normalized, how a fresh
/// record is built from it and how an existing record is replaced by it. The
/// stores own identifier and timestamp assignment.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Request payload for create and update.
    type Input: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Name used in logs, e.g. `"product"`.
    const KIND: &'static str;

    fn id(&self) -> i64;

    /// Strips leading and trailing whitespace from text fields.
    fn normalize(input: Self::Input) -> Self::Input;

    fn from_input(id: i64, input: Self::Input, now: DateTime<Utc>) -> Self;

    /// Replaces the mutable fields and refreshes `updated_at`. Id and
    /// `created_at` are left alone.
    fn apply(&mut self, patch: Self::Input, now: DateTime<Utc>);
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/products` and `PUT /api/products/{id}`.
///
/// `id`, `created_at` and `updated_at` are accepted so a previously fetched
/// record can be sent back as-is, but they are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ProductInput {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        ProductInput {
            name: name.into(),
            price,
            quantity,
            ..Default::default()
        }
    }
}

impl Entity for Product {
    type Input = ProductInput;

    const KIND: &'static str = "product";

    fn id(&self) -> i64 {
        self.id
    }

    fn normalize(input: ProductInput) -> ProductInput {
        ProductInput {
            name: input.name.trim().to_string(),
            ..input
        }
    }

    fn from_input(id: i64, input: ProductInput, now: DateTime<Utc>) -> Self {
        let input = Self::normalize(input);
        Product {
            id,
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: ProductInput, now: DateTime<Utc>) {
        let patch = Self::normalize(patch);
        self.name = patch.name;
        self.price = patch.price;
        self.quantity = patch.quantity;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryInput {
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        CategoryInput {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }
}

impl Entity for Category {
    type Input = CategoryInput;

    const KIND: &'static str = "category";

    fn id(&self) -> i64 {
        self.id
    }

    fn normalize(input: CategoryInput) -> CategoryInput {
        CategoryInput {
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            ..input
        }
    }

    fn from_input(id: i64, input: CategoryInput, now: DateTime<Utc>) -> Self {
        let input = Self::normalize(input);
        Category {
            id,
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: CategoryInput, now: DateTime<Utc>) {
        let patch = Self::normalize(patch);
        self.name = patch.name;
        self.description = patch.description;
        self.updated_at = now;
    }
}
