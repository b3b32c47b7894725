//! API module for the Barista service

pub mod auth;
pub mod routes;
pub mod types;

use crate::server::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        // Drink catalog
        .route("/drinks", get(routes::drinks::list_drinks))
        .route("/drinks", post(routes::drinks::create_drink))
        .route("/drinks-detail", get(routes::drinks::list_drinks_detail))
        .route("/drinks/:id", patch(routes::drinks::update_drink))
        .route("/drinks/:id", delete(routes::drinks::delete_drink))
        // Health
        .route("/health", get(routes::health::health_check))
}

/// Create OpenAPI documentation routes
pub fn docs_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::drinks::list_drinks,
        routes::drinks::list_drinks_detail,
        routes::drinks::create_drink,
        routes::drinks::update_drink,
        routes::drinks::delete_drink,
        routes::health::health_check,
    ),
    components(schemas(
        types::CreateDrinkRequest,
        types::UpdateDrinkRequest,
        types::DrinkSummariesResponse,
        types::DrinksResponse,
        types::DeleteDrinkResponse,
        types::HealthCheckResponse,
        crate::persistence::Drink,
        crate::persistence::DrinkSummary,
        crate::persistence::RecipePart,
        crate::persistence::RecipePartSummary,
        crate::error::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "drinks", description = "Drink catalog"),
        (name = "health", description = "Service health"),
    )
)]
struct ApiDoc;

/// Registers the bearer scheme referenced by the protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
