//! Request and response types for the drinks API
//!
//! Every success body carries the `success` flag the web frontend keys on.

use crate::persistence::{Drink, DrinkSummary, RecipePart};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /drinks`
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDrinkRequest {
    /// Unique drink title
    pub title: String,

    /// Full recipe
    pub recipe: Vec<RecipePart>,
}

/// Body of `PATCH /drinks/{id}`; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDrinkRequest {
    /// New drink title
    pub title: Option<String>,

    /// New full recipe
    pub recipe: Option<Vec<RecipePart>>,
}

/// Listing of drinks in their public short form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinkSummariesResponse {
    pub success: bool,
    pub drinks: Vec<DrinkSummary>,
}

/// Listing of drinks with full recipes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinksResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

/// Acknowledgement of a deletion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteDrinkResponse {
    pub success: bool,

    /// Id of the removed drink
    pub delete: i64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
}
