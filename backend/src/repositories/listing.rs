//! Listing repository for directory records
//!
//! `owner_account_id` is set once at creation from the authenticated
//! caller and never reassigned.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Listing record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingRecord {
    pub id: Uuid,
    pub owner_account_id: Uuid,
    pub business_name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub category: String,
    pub specialization: String,
    pub description: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a listing
#[derive(Debug, Clone)]
pub struct NewListing {
    pub business_name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub category: String,
    pub specialization: String,
    pub description: String,
    pub address: String,
}

/// Input for updating a listing (unset fields are kept)
#[derive(Debug, Clone, Default)]
pub struct UpdateListing {
    pub business_name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub category: Option<String>,
    pub specialization: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
}

const LISTING_COLUMNS: &str = "id, owner_account_id, business_name, contact_name, phone, email, \
     website, category, specialization, description, address, created_at, updated_at";

/// Listing repository for database operations
pub struct ListingRepository;

impl ListingRepository {
    /// Create a new listing owned by the given account
    pub async fn create(
        pool: &PgPool,
        owner_account_id: Uuid,
        listing: NewListing,
    ) -> Result<ListingRecord> {
        let record = sqlx::query_as::<_, ListingRecord>(&format!(
            r#"
            INSERT INTO listings (
                owner_account_id, business_name, contact_name, phone, email,
                website, category, specialization, description, address
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(owner_account_id)
        .bind(listing.business_name)
        .bind(listing.contact_name)
        .bind(listing.phone)
        .bind(listing.email)
        .bind(listing.website)
        .bind(listing.category)
        .bind(listing.specialization)
        .bind(listing.description)
        .bind(listing.address)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find listing by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ListingRecord>> {
        let record = sqlx::query_as::<_, ListingRecord>(&format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM listings
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List all listings, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<ListingRecord>> {
        let records = sqlx::query_as::<_, ListingRecord>(&format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM listings
            ORDER BY created_at DESC
            "#,
        ))
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Update a listing; unset fields keep their current value
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateListing,
    ) -> Result<ListingRecord> {
        let record = sqlx::query_as::<_, ListingRecord>(&format!(
            r#"
            UPDATE listings SET
                business_name = COALESCE($2, business_name),
                contact_name = COALESCE($3, contact_name),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email),
                website = COALESCE($6, website),
                category = COALESCE($7, category),
                specialization = COALESCE($8, specialization),
                description = COALESCE($9, description),
                address = COALESCE($10, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {LISTING_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(updates.business_name)
        .bind(updates.contact_name)
        .bind(updates.phone)
        .bind(updates.email)
        .bind(updates.website)
        .bind(updates.category)
        .bind(updates.specialization)
        .bind(updates.description)
        .bind(updates.address)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Delete a listing, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM listings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see backend/tests/listing_ownership_test.rs
    // Run with: cargo test --features integration -- --ignored
}
