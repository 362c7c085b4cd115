//! Repository for the `rescue_reports` table.

use pawhaven_core::types::DbId;
use sqlx::PgPool;

use crate::models::rescue::{CreateRescueReport, RescueReport, UpdateRescueReport};

const COLUMNS: &str = "id, reporter_id, animal_type, description, city, state, urgency, status, \
                       assigned_shelter_id, created_at, updated_at";

/// Provides CRUD operations for rescue reports.
pub struct RescueRepo;

impl RescueRepo {
    /// File a new rescue report (status starts `reported`).
    pub async fn create(
        pool: &PgPool,
        input: &CreateRescueReport,
    ) -> Result<RescueReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO rescue_reports
                (reporter_id, animal_type, description, city, state, urgency)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RescueReport>(&query)
            .bind(input.reporter_id)
            .bind(&input.animal_type)
            .bind(&input.description)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.urgency)
            .fetch_one(pool)
            .await
    }

    /// Find a report by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RescueReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rescue_reports WHERE id = $1");
        sqlx::query_as::<_, RescueReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports, most urgent and newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RescueReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rescue_reports
             ORDER BY CASE urgency WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END,
                      created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, RescueReport>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of rescue reports.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rescue_reports")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Progress a report. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRescueReport,
    ) -> Result<Option<RescueReport>, sqlx::Error> {
        let query = format!(
            "UPDATE rescue_reports SET
                urgency = COALESCE($2, urgency),
                status = COALESCE($3, status),
                assigned_shelter_id = COALESCE($4, assigned_shelter_id),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RescueReport>(&query)
            .bind(id)
            .bind(&input.urgency)
            .bind(&input.status)
            .bind(input.assigned_shelter_id)
            .fetch_optional(pool)
            .await
    }
}
