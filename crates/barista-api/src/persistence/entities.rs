//! Drink catalog entities
//!
//! A drink is a titled recipe: an ordered list of ingredient parts, each
//! with a name, a display color, and a proportion. The catalog exposes two
//! projections of the same row: the public short form hides ingredient
//! names, the long form is the full recipe.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One ingredient of a drink recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipePart {
    /// Ingredient name
    pub name: String,

    /// Display color used when rendering the glass
    pub color: String,

    /// Proportion of this ingredient relative to the whole recipe
    pub parts: i64,
}

/// Short-form ingredient: color and proportion only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipePartSummary {
    /// Display color used when rendering the glass
    pub color: String,

    /// Proportion of this ingredient relative to the whole recipe
    pub parts: i64,
}

/// A drink with its full recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Drink {
    /// Database-assigned identifier
    pub id: i64,

    /// Unique drink title
    pub title: String,

    /// Full recipe
    pub recipe: Vec<RecipePart>,
}

/// A drink in its public short form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrinkSummary {
    /// Database-assigned identifier
    pub id: i64,

    /// Unique drink title
    pub title: String,

    /// Recipe without ingredient names
    pub recipe: Vec<RecipePartSummary>,
}

impl Drink {
    /// Project the drink into its public short form.
    pub fn short(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|part| RecipePartSummary {
                    color: part.color.clone(),
                    parts: part.parts,
                })
                .collect(),
        }
    }
}
