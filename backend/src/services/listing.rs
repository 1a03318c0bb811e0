//! Listing service for directory records
//!
//! Mutations of existing listings are ownership-gated: the owner check
//! runs against the stored `owner_account_id` before any write.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::{ListingRecord, ListingRepository, NewListing, UpdateListing};
use provider_directory_shared::types::{CreateListingRequest, UpdateListingRequest};
use provider_directory_shared::validation;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Listing service for business logic
pub struct ListingService;

impl ListingService {
    /// Create a listing owned by the authenticated caller
    pub async fn create(
        pool: &PgPool,
        caller: &AuthUser,
        req: CreateListingRequest,
    ) -> Result<ListingRecord, ApiError> {
        Self::validate_create(&req)?;

        let record = ListingRepository::create(
            pool,
            caller.account_id,
            NewListing {
                business_name: req.business_name,
                contact_name: req.contact_name,
                phone: req.phone,
                email: req.email,
                website: req.website,
                category: req.category,
                specialization: req.specialization,
                description: req.description,
                address: req.address,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(listing_id = %record.id, owner = %caller.account_id, "Listing created");

        Ok(record)
    }

    /// Get a listing by id (public read)
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<ListingRecord, ApiError> {
        ListingRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Listing not found".to_string()))
    }

    /// List all listings, newest first (public read)
    pub async fn list(pool: &PgPool) -> Result<Vec<ListingRecord>, ApiError> {
        ListingRepository::list(pool).await.map_err(ApiError::Internal)
    }

    /// Update a listing owned by the caller
    pub async fn update(
        pool: &PgPool,
        caller: &AuthUser,
        id: Uuid,
        req: UpdateListingRequest,
    ) -> Result<ListingRecord, ApiError> {
        // Ownership check before any write
        let existing = Self::get(pool, id).await?;
        Self::ensure_owner(&existing, caller)?;

        let record = ListingRepository::update(
            pool,
            id,
            UpdateListing {
                business_name: req.business_name,
                contact_name: req.contact_name,
                phone: req.phone,
                email: req.email,
                website: req.website,
                category: req.category,
                specialization: req.specialization,
                description: req.description,
                address: req.address,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(listing_id = %record.id, "Listing updated");

        Ok(record)
    }

    /// Delete a listing owned by the caller
    pub async fn delete(pool: &PgPool, caller: &AuthUser, id: Uuid) -> Result<(), ApiError> {
        // Ownership check before any write
        let existing = Self::get(pool, id).await?;
        Self::ensure_owner(&existing, caller)?;

        let deleted = ListingRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("Listing not found".to_string()));
        }

        info!(listing_id = %id, "Listing deleted");

        Ok(())
    }

    /// Confirm the caller owns the listing; mismatch is an authorization
    /// failure (403), distinct from authentication failure (401)
    fn ensure_owner(listing: &ListingRecord, caller: &AuthUser) -> Result<(), ApiError> {
        if listing.owner_account_id != caller.account_id {
            return Err(ApiError::Forbidden(
                "You do not own this listing".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_create(req: &CreateListingRequest) -> Result<(), ApiError> {
        validation::validate_required("Business name", &req.business_name)
            .map_err(ApiError::Validation)?;
        validation::validate_required("Contact name", &req.contact_name)
            .map_err(ApiError::Validation)?;
        validation::validate_phone(&req.phone).map_err(ApiError::Validation)?;
        validation::validate_email(&req.email).map_err(ApiError::Validation)?;
        validation::validate_required("Category", &req.category).map_err(ApiError::Validation)?;
        validation::validate_required("Specialization", &req.specialization)
            .map_err(ApiError::Validation)?;
        validation::validate_required("Description", &req.description)
            .map_err(ApiError::Validation)?;
        validation::validate_required("Address", &req.address).map_err(ApiError::Validation)?;
        Ok(())
    }
}
