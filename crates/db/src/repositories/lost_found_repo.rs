//! Repository for the `lost_found_reports` table.

use pawhaven_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::lost_found::{
    CreateLostFoundReport, LostFoundFilter, LostFoundReport, UpdateLostFoundReport,
};

const COLUMNS: &str = "id, reporter_id, report_type, pet_name, species, breed, color, \
    description, photos, last_seen_city, last_seen_state, last_seen_at, contact_phone, status, \
    created_at, updated_at";

/// Provides CRUD operations for lost-and-found reports.
pub struct LostFoundRepo;

impl LostFoundRepo {
    /// File a new report (status starts `open`).
    pub async fn create(
        pool: &PgPool,
        input: &CreateLostFoundReport,
    ) -> Result<LostFoundReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO lost_found_reports
                (reporter_id, report_type, pet_name, species, breed, color, description,
                 last_seen_city, last_seen_state, last_seen_at, contact_phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LostFoundReport>(&query)
            .bind(input.reporter_id)
            .bind(&input.report_type)
            .bind(&input.pet_name)
            .bind(&input.species)
            .bind(&input.breed)
            .bind(&input.color)
            .bind(&input.description)
            .bind(&input.last_seen_city)
            .bind(&input.last_seen_state)
            .bind(input.last_seen_at)
            .bind(&input.contact_phone)
            .fetch_one(pool)
            .await
    }

    /// Find a report by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LostFoundReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lost_found_reports WHERE id = $1");
        sqlx::query_as::<_, LostFoundReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &LostFoundFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LostFoundReport>, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM lost_found_reports WHERE TRUE"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        qb.build_query_as::<LostFoundReport>().fetch_all(pool).await
    }

    /// Count reports matching `filter`.
    pub async fn count(pool: &PgPool, filter: &LostFoundFilter) -> Result<i64, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM lost_found_reports WHERE TRUE");
        push_filter(&mut qb, filter);
        let row: (i64,) = qb.build_query_as().fetch_one(pool).await?;
        Ok(row.0)
    }

    /// Update a report. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLostFoundReport,
    ) -> Result<Option<LostFoundReport>, sqlx::Error> {
        let query = format!(
            "UPDATE lost_found_reports SET
                pet_name = COALESCE($2, pet_name),
                description = COALESCE($3, description),
                last_seen_city = COALESCE($4, last_seen_city),
                last_seen_state = COALESCE($5, last_seen_state),
                last_seen_at = COALESCE($6, last_seen_at),
                contact_phone = COALESCE($7, contact_phone),
                status = COALESCE($8, status),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LostFoundReport>(&query)
            .bind(id)
            .bind(&input.pet_name)
            .bind(&input.description)
            .bind(&input.last_seen_city)
            .bind(&input.last_seen_state)
            .bind(input.last_seen_at)
            .bind(&input.contact_phone)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a report. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lost_found_reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Append the WHERE clauses for a [`LostFoundFilter`] to an in-progress query.
fn push_filter(qb: &mut QueryBuilder<Postgres>, filter: &LostFoundFilter) {
    if let Some(report_type) = &filter.report_type {
        qb.push(" AND report_type = ").push_bind(report_type.clone());
    }
    if let Some(species) = &filter.species {
        qb.push(" AND species = ").push_bind(species.clone());
    }
    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status.clone());
    }
    if let Some(city) = &filter.city {
        qb.push(" AND last_seen_city ILIKE ").push_bind(city.clone());
    }
}
