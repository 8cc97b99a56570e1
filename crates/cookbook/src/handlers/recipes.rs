use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use cookbook_core::recipe::CreateRecipeRequest;

use crate::{
    context::Context,
    handlers::ApiError,
    models::{parse_cuisine, CreateRecipeResponse, RecipeResponse, UpdateRecipe},
    state::AppState,
};

/// Create a recipe (POST /recipe).
pub async fn create_recipe(
    State(state): State<AppState>,
    Context(ctx): Context,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRecipeResponse>), ApiError> {
    let Json(payload) = payload?;
    let cuisine = parse_cuisine(&payload.cuisine)?;

    let recipe = state
        .recipes
        .create_recipe(&ctx, &payload.name, payload.description, cuisine)
        .await?;

    Ok((StatusCode::CREATED, Json(CreateRecipeResponse::from(&recipe))))
}

/// Get a recipe by ID (GET /recipe/{id}).
pub async fn get_recipe(
    State(state): State<AppState>,
    Context(ctx): Context,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = state.recipes.get_recipe(&ctx, &id).await?;
    Ok(Json(RecipeResponse::from(recipe)))
}

/// Update a recipe by ID (PUT /recipe/{id}).
pub async fn update_recipe(
    State(state): State<AppState>,
    Context(ctx): Context,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRecipe>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Json(payload) = payload?;
    let changes = payload.into_request()?;

    let recipe = state.recipes.update_recipe(&ctx, &id, changes).await?;
    Ok(Json(RecipeResponse::from(recipe)))
}

/// Delete a recipe by ID (DELETE /recipe/{id}).
pub async fn delete_recipe(
    State(state): State<AppState>,
    Context(ctx): Context,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.recipes.delete_recipe(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
