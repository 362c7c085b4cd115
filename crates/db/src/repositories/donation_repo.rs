//! Repository for the `donations` table.

use pawhaven_core::types::DbId;
use sqlx::PgPool;

use crate::models::donation::{CreateDonation, Donation};

const COLUMNS: &str = "id, donor_id, donor_name, donor_email, amount_cents, currency, message, \
                       purpose, status, created_at, updated_at";

/// Provides CRUD operations for donations.
pub struct DonationRepo;

impl DonationRepo {
    /// Record a new donation (status starts `pending`).
    pub async fn create(pool: &PgPool, input: &CreateDonation) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "INSERT INTO donations
                (donor_id, donor_name, donor_email, amount_cents, currency, message, purpose)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(input.donor_id)
            .bind(&input.donor_name)
            .bind(&input.donor_email)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(&input.message)
            .bind(&input.purpose)
            .fetch_one(pool)
            .await
    }

    /// Find a donation by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List donations, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of donations.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM donations")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update a donation's settlement status.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!(
            "UPDATE donations SET status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
