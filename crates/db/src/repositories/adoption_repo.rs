//! Repository for the `adoption_applications` table and the adoption
//! lifecycle commands.
//!
//! The three commands (submit, approve, reject) each run in a single
//! transaction that first takes a `FOR UPDATE` lock on the targeted pet row.
//! Concurrent commands against the same pet therefore serialize at the lock:
//! two approvals cannot both pass the `pending` guard, and two submissions by
//! the same applicant cannot both pass the duplicate check. The partial
//! unique index `uq_adoption_one_pending` backs the duplicate check at the
//! storage layer as well.

use pawhaven_core::adoption::{
    ensure_pet_open_for_applications, ApplicationStatus, ReviewDecision, ADOPTED_BY_OTHER_NOTE,
};
use pawhaven_core::error::CoreError;
use pawhaven_core::pets::PetAvailability;
use pawhaven_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::adoption::{
    AdoptionApplication, ApplicationDetail, ApplicationFilter, ApplicationDetails,
};

/// Column list for `adoption_applications` queries.
const COLUMNS: &str = "id, pet_id, applicant_id, reviewer_id, status, housing_type, has_yard, \
    has_children, has_other_pets, other_pets_details, work_schedule, experience_with_pets, \
    reason_for_adoption, reference_contacts, review_notes, reviewed_at, created_at, updated_at";

/// Column list for joined [`ApplicationDetail`] queries.
const DETAIL_COLUMNS: &str = "a.id, a.pet_id, p.name AS pet_name, \
    p.shelter_id AS pet_shelter_id, a.applicant_id, u.name AS applicant_name, a.reviewer_id, \
    r.name AS reviewer_name, a.status, a.housing_type, a.has_yard, a.has_children, \
    a.has_other_pets, a.other_pets_details, a.work_schedule, a.experience_with_pets, \
    a.reason_for_adoption, a.reference_contacts, a.review_notes, a.reviewed_at, a.created_at, \
    a.updated_at";

const DETAIL_JOINS: &str = "FROM adoption_applications a \
    JOIN pets p ON p.id = a.pet_id \
    JOIN users u ON u.id = a.applicant_id \
    LEFT JOIN users r ON r.id = a.reviewer_id";

/// Error type for the lifecycle commands: either a domain rule was violated
/// or the database failed.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Domain(#[from] CoreError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Provides the adoption lifecycle commands and application queries.
pub struct AdoptionRepo;

impl AdoptionRepo {
    /// Submit a new application for `pet_id` by `applicant_id`.
    ///
    /// Guards (checked inside the transaction, after locking the pet row):
    /// the pet exists, the applicant has no pending application for it, and
    /// the pet is open for applications. The duplicate check runs first so a
    /// repeat submission by the same applicant reports the conflict rather
    /// than the `pending` availability their own application caused. On
    /// success the application is inserted `pending` and the pet moves to
    /// `pending`; on any failure nothing is written.
    pub async fn submit(
        pool: &PgPool,
        pet_id: DbId,
        applicant_id: DbId,
        details: &ApplicationDetails,
    ) -> Result<AdoptionApplication, CommandError> {
        let mut tx = pool.begin().await?;

        let pet: Option<(PetAvailability,)> =
            sqlx::query_as("SELECT availability_status FROM pets WHERE id = $1 FOR UPDATE")
                .bind(pet_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (availability,) = pet.ok_or(CoreError::NotFound {
            entity: "Pet",
            id: pet_id,
        })?;

        let (duplicate,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM adoption_applications
                WHERE pet_id = $1 AND applicant_id = $2 AND status = 'pending'
            )",
        )
        .bind(pet_id)
        .bind(applicant_id)
        .fetch_one(&mut *tx)
        .await?;
        if duplicate {
            return Err(CoreError::Conflict(
                "You already have a pending application for this pet".into(),
            )
            .into());
        }

        ensure_pet_open_for_applications(availability)?;

        let query = format!(
            "INSERT INTO adoption_applications
                (pet_id, applicant_id, housing_type, has_yard, has_children, has_other_pets,
                 other_pets_details, work_schedule, experience_with_pets, reason_for_adoption,
                 reference_contacts)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, AdoptionApplication>(&query)
            .bind(pet_id)
            .bind(applicant_id)
            .bind(&details.housing_type)
            .bind(details.has_yard)
            .bind(details.has_children)
            .bind(details.has_other_pets)
            .bind(&details.other_pets_details)
            .bind(&details.work_schedule)
            .bind(&details.experience_with_pets)
            .bind(&details.reason_for_adoption)
            .bind(sqlx::types::Json(&details.references))
            .fetch_one(&mut *tx)
            .await
            .map_err(classify_insert_error)?;

        sqlx::query("UPDATE pets SET availability_status = 'pending', updated_at = now() WHERE id = $1")
            .bind(pet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(application)
    }

    /// Apply a review decision to application `id`.
    ///
    /// Approval sets the application `approved`, the pet `adopted`, and
    /// bulk-rejects every other pending application for the same pet with
    /// the fixed note. Rejection sets the application `rejected` and, when
    /// no pending applications remain, returns the pet to `available`.
    /// All of it happens in one transaction under the pet row lock, so the
    /// approval and the sibling mass-rejection are never observably
    /// separable.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
        decision: ReviewDecision,
        notes: Option<&str>,
    ) -> Result<AdoptionApplication, CommandError> {
        let mut tx = pool.begin().await?;

        let app: Option<(DbId,)> =
            sqlx::query_as("SELECT pet_id FROM adoption_applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (pet_id,) = app.ok_or(CoreError::NotFound {
            entity: "AdoptionApplication",
            id,
        })?;

        // Lock the pet row first; every lifecycle command serializes here.
        sqlx::query("SELECT id FROM pets WHERE id = $1 FOR UPDATE")
            .bind(pet_id)
            .execute(&mut *tx)
            .await?;

        // Re-read under the lock: a concurrent reviewer may have already
        // transitioned this application before we acquired it.
        let (current,): (ApplicationStatus,) =
            sqlx::query_as("SELECT status FROM adoption_applications WHERE id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        let next = current.transition(decision.as_status())?;

        let query = format!(
            "UPDATE adoption_applications
             SET status = $2, reviewer_id = $3, review_notes = $4, reviewed_at = now(),
                 updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, AdoptionApplication>(&query)
            .bind(id)
            .bind(next)
            .bind(reviewer_id)
            .bind(notes)
            .fetch_one(&mut *tx)
            .await?;

        match decision {
            ReviewDecision::Approved => {
                sqlx::query(
                    "UPDATE adoption_applications
                     SET status = 'rejected', reviewer_id = $2, review_notes = $3,
                         reviewed_at = now(), updated_at = now()
                     WHERE pet_id = $1 AND status = 'pending' AND id <> $4",
                )
                .bind(pet_id)
                .bind(reviewer_id)
                .bind(ADOPTED_BY_OTHER_NOTE)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                sqlx::query(
                    "UPDATE pets SET availability_status = 'adopted', updated_at = now()
                     WHERE id = $1",
                )
                .bind(pet_id)
                .execute(&mut *tx)
                .await?;
            }
            ReviewDecision::Rejected => {
                let (remaining,): (i64,) = sqlx::query_as(
                    "SELECT COUNT(*) FROM adoption_applications
                     WHERE pet_id = $1 AND status = 'pending'",
                )
                .bind(pet_id)
                .fetch_one(&mut *tx)
                .await?;

                if remaining == 0 {
                    sqlx::query(
                        "UPDATE pets SET availability_status = 'available', updated_at = now()
                         WHERE id = $1",
                    )
                    .bind(pet_id)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(application)
    }

    /// Fetch one application joined with its pet/applicant/reviewer context.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApplicationDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE a.id = $1");
        sqlx::query_as::<_, ApplicationDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List applications matching `filter`, newest first.
    ///
    /// When `shelter_scope` is set, only applications targeting that
    /// shelter's pets are returned (resource-scoped listing for the shelter
    /// role).
    pub async fn list(
        pool: &PgPool,
        filter: &ApplicationFilter,
        shelter_scope: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ApplicationDetail>, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE TRUE"));
        push_filter(&mut qb, filter, shelter_scope);
        qb.push(" ORDER BY a.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        qb.build_query_as::<ApplicationDetail>().fetch_all(pool).await
    }

    /// Count applications matching `filter` under the same scoping as
    /// [`AdoptionRepo::list`].
    pub async fn count(
        pool: &PgPool,
        filter: &ApplicationFilter,
        shelter_scope: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) {DETAIL_JOINS} WHERE TRUE"));
        push_filter(&mut qb, filter, shelter_scope);
        let row: (i64,) = qb.build_query_as().fetch_one(pool).await?;
        Ok(row.0)
    }

    /// List all applications submitted by one user, newest first.
    pub async fn list_for_applicant(
        pool: &PgPool,
        applicant_id: DbId,
    ) -> Result<Vec<ApplicationDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS}
             WHERE a.applicant_id = $1
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ApplicationDetail>(&query)
            .bind(applicant_id)
            .fetch_all(pool)
            .await
    }
}

/// Append the WHERE clauses for an [`ApplicationFilter`] to an in-progress
/// query over the joined detail view.
fn push_filter(
    qb: &mut QueryBuilder<Postgres>,
    filter: &ApplicationFilter,
    shelter_scope: Option<DbId>,
) {
    if let Some(status) = filter.status {
        qb.push(" AND a.status = ").push_bind(status);
    }
    if let Some(pet) = filter.pet {
        qb.push(" AND a.pet_id = ").push_bind(pet);
    }
    if let Some(user) = filter.user {
        qb.push(" AND a.applicant_id = ").push_bind(user);
    }
    if let Some(shelter_id) = shelter_scope {
        qb.push(" AND p.shelter_id = ").push_bind(shelter_id);
    }
}

/// Map a unique violation on `uq_adoption_one_pending` to the domain
/// `Conflict`, so the DB-enforced invariant surfaces as the same error as
/// the in-transaction pre-check.
fn classify_insert_error(err: sqlx::Error) -> CommandError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some("uq_adoption_one_pending")
        {
            return CoreError::Conflict(
                "You already have a pending application for this pet".into(),
            )
            .into();
        }
    }
    err.into()
}
