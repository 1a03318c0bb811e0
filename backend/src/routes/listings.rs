//! Listing routes
//!
//! Reads are anonymous; creation requires a valid session, and
//! update/delete additionally require ownership of the listing.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::repositories::ListingRecord;
use crate::services::ListingService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use provider_directory_shared::types::{
    CreateListingRequest, ListingResponse, MessageResponse, UpdateListingRequest,
};
use uuid::Uuid;

/// Create listing routes
pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_listings).post(create_listing))
        .route(
            "/:id",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
}

fn to_response(record: ListingRecord) -> ListingResponse {
    ListingResponse {
        id: record.id.to_string(),
        owner_account_id: record.owner_account_id.to_string(),
        business_name: record.business_name,
        contact_name: record.contact_name,
        phone: record.phone,
        email: record.email,
        website: record.website,
        category: record.category,
        specialization: record.specialization,
        description: record.description,
        address: record.address,
        created_at: record.created_at,
    }
}

/// GET /api/v1/listings - Browse listings (anonymous)
async fn list_listings(State(state): State<AppState>) -> ApiResult<Json<Vec<ListingResponse>>> {
    let records = ListingService::list(state.db()).await?;
    Ok(Json(records.into_iter().map(to_response).collect()))
}

/// GET /api/v1/listings/{id} - Fetch one listing (anonymous)
async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ListingResponse>> {
    let record = ListingService::get(state.db(), id).await?;
    Ok(Json(to_response(record)))
}

/// POST /api/v1/listings - Publish a listing (session required)
async fn create_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateListingRequest>,
) -> ApiResult<(StatusCode, Json<ListingResponse>)> {
    let record = ListingService::create(state.db(), &auth, req).await?;
    Ok((StatusCode::CREATED, Json(to_response(record))))
}

/// PUT /api/v1/listings/{id} - Update an owned listing
async fn update_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateListingRequest>,
) -> ApiResult<Json<ListingResponse>> {
    let record = ListingService::update(state.db(), &auth, id, req).await?;
    Ok(Json(to_response(record)))
}

/// DELETE /api/v1/listings/{id} - Delete an owned listing
async fn delete_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    ListingService::delete(state.db(), &auth, id).await?;
    Ok(Json(MessageResponse {
        message: "Listing deleted successfully".to_string(),
    }))
}
