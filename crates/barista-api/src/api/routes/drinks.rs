//! Drink catalog route handlers

use crate::{
    api::auth::AuthContext,
    api::types::{
        CreateDrinkRequest, DeleteDrinkResponse, DrinkSummariesResponse, DrinksResponse,
        UpdateDrinkRequest,
    },
    error::{ApiError, Result},
    persistence::Drink,
    server::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

/// Public listing of the drink menu in its short form
#[utoipa::path(
    get,
    path = "/drinks",
    responses(
        (status = 200, description = "Drink menu in short form", body = DrinkSummariesResponse),
    ),
    tag = "drinks",
)]
pub async fn list_drinks(State(state): State<AppState>) -> Result<Json<DrinkSummariesResponse>> {
    let drinks = state.store.list().await?;

    Ok(Json(DrinkSummariesResponse {
        success: true,
        drinks: drinks.iter().map(Drink::short).collect(),
    }))
}

/// Full drink details; requires the `get:drinks-detail` permission
#[utoipa::path(
    get,
    path = "/drinks-detail",
    responses(
        (status = 200, description = "Drink menu with full recipes", body = DrinksResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Permission not granted", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "drinks",
)]
pub async fn list_drinks_detail(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<DrinksResponse>> {
    auth.require_permission("get:drinks-detail")?;

    let drinks = state.store.list().await?;

    Ok(Json(DrinksResponse {
        success: true,
        drinks,
    }))
}

/// Add a new drink; requires the `post:drinks` permission
#[utoipa::path(
    post,
    path = "/drinks",
    request_body = CreateDrinkRequest,
    responses(
        (status = 200, description = "The created drink", body = DrinksResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Permission not granted", body = crate::error::ErrorResponse),
        (status = 422, description = "Empty title or recipe, or duplicate title", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "drinks",
)]
pub async fn create_drink(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<CreateDrinkRequest>,
) -> Result<Json<DrinksResponse>> {
    auth.require_permission("post:drinks")?;

    if request.title.trim().is_empty() {
        return Err(ApiError::Unprocessable {
            message: "title must not be empty".to_string(),
        });
    }
    if request.recipe.is_empty() {
        return Err(ApiError::Unprocessable {
            message: "recipe must not be empty".to_string(),
        });
    }

    let drink = state.store.create(&request.title, &request.recipe).await?;
    info!("{} created drink {} ('{}')", auth.user_id, drink.id, drink.title);

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink],
    }))
}

/// Change an existing drink; requires the `patch:drinks` permission
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    params(("id" = i64, Path, description = "Drink id")),
    request_body = UpdateDrinkRequest,
    responses(
        (status = 200, description = "The updated drink", body = DrinksResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Permission not granted", body = crate::error::ErrorResponse),
        (status = 404, description = "No drink with this id", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "drinks",
)]
pub async fn update_drink(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDrinkRequest>,
) -> Result<Json<DrinksResponse>> {
    auth.require_permission("patch:drinks")?;

    let drink = state
        .store
        .update(id, request.title.as_deref(), request.recipe.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("drink {id}"),
        })?;

    info!("{} updated drink {id}", auth.user_id);

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink],
    }))
}

/// Remove a drink; requires the `delete:drinks` permission
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    params(("id" = i64, Path, description = "Drink id")),
    responses(
        (status = 200, description = "The removed drink id", body = DeleteDrinkResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Permission not granted", body = crate::error::ErrorResponse),
        (status = 404, description = "No drink with this id", body = crate::error::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "drinks",
)]
pub async fn delete_drink(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<DeleteDrinkResponse>> {
    auth.require_permission("delete:drinks")?;

    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound {
            resource: format!("drink {id}"),
        });
    }

    info!("{} deleted drink {id}", auth.user_id);

    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: id,
    }))
}
