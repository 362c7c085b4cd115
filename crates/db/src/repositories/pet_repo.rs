//! Repository for the `pets` table.

use pawhaven_core::pets::PetPhoto;
use pawhaven_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::pet::{CreatePet, Pet, PetFilter, UpdatePet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, species, breed, age_value, age_unit, gender, size, color, \
    description, vaccinated, neutered, special_needs, good_with_children, good_with_dogs, \
    good_with_cats, photos, city, state, shelter_id, availability_status, created_at, updated_at";

/// Provides CRUD operations for pets.
pub struct PetRepo;

impl PetRepo {
    /// Insert a new pet, returning the created row. New pets start
    /// `available` with an empty photo list.
    pub async fn create(pool: &PgPool, input: &CreatePet) -> Result<Pet, sqlx::Error> {
        let query = format!(
            "INSERT INTO pets
                (name, species, breed, age_value, age_unit, gender, size, color, description,
                 vaccinated, neutered, special_needs, good_with_children, good_with_dogs,
                 good_with_cats, city, state, shelter_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(&input.name)
            .bind(&input.species)
            .bind(&input.breed)
            .bind(input.age_value)
            .bind(&input.age_unit)
            .bind(&input.gender)
            .bind(&input.size)
            .bind(&input.color)
            .bind(&input.description)
            .bind(input.vaccinated)
            .bind(input.neutered)
            .bind(input.special_needs)
            .bind(input.good_with_children)
            .bind(input.good_with_dogs)
            .bind(input.good_with_cats)
            .bind(&input.city)
            .bind(&input.state)
            .bind(input.shelter_id)
            .fetch_one(pool)
            .await
    }

    /// Find a pet by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pets WHERE id = $1");
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List pets matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PetFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Pet>, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM pets WHERE TRUE"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        qb.build_query_as::<Pet>().fetch_all(pool).await
    }

    /// Count pets matching `filter`.
    pub async fn count(pool: &PgPool, filter: &PetFilter) -> Result<i64, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM pets WHERE TRUE");
        push_filter(&mut qb, filter);
        let row: (i64,) = qb.build_query_as().fetch_one(pool).await?;
        Ok(row.0)
    }

    /// Update a pet's mutable attributes. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Availability is
    /// never touched here; it belongs to the adoption lifecycle commands.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePet,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "UPDATE pets SET
                name = COALESCE($2, name),
                breed = COALESCE($3, breed),
                age_value = COALESCE($4, age_value),
                age_unit = COALESCE($5, age_unit),
                size = COALESCE($6, size),
                color = COALESCE($7, color),
                description = COALESCE($8, description),
                vaccinated = COALESCE($9, vaccinated),
                neutered = COALESCE($10, neutered),
                special_needs = COALESCE($11, special_needs),
                good_with_children = COALESCE($12, good_with_children),
                good_with_dogs = COALESCE($13, good_with_dogs),
                good_with_cats = COALESCE($14, good_with_cats),
                city = COALESCE($15, city),
                state = COALESCE($16, state),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(input.age_value)
            .bind(&input.age_unit)
            .bind(&input.size)
            .bind(&input.color)
            .bind(&input.description)
            .bind(input.vaccinated)
            .bind(input.neutered)
            .bind(input.special_needs)
            .bind(input.good_with_children)
            .bind(input.good_with_dogs)
            .bind(input.good_with_cats)
            .bind(&input.city)
            .bind(&input.state)
            .fetch_optional(pool)
            .await
    }

    /// Replace a pet's photo list. The caller is expected to pass a list
    /// already normalized via `pawhaven_core::pets::normalize_photos`.
    pub async fn set_photos(
        pool: &PgPool,
        id: DbId,
        photos: &[PetPhoto],
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "UPDATE pets SET photos = $2, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(Json(photos))
            .fetch_optional(pool)
            .await
    }

    /// Delete a pet, returning its photo list so the caller can cascade the
    /// storage-side deletion. Returns `None` if the pet does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<PetPhoto>>, sqlx::Error> {
        let row: Option<(Json<Vec<PetPhoto>>,)> =
            sqlx::query_as("DELETE FROM pets WHERE id = $1 RETURNING photos")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(photos,)| photos.0))
    }
}

/// Append the WHERE clauses for a [`PetFilter`] to an in-progress query.
fn push_filter(qb: &mut QueryBuilder<Postgres>, filter: &PetFilter) {
    if let Some(species) = &filter.species {
        qb.push(" AND species = ").push_bind(species.clone());
    }
    if let Some(size) = &filter.size {
        qb.push(" AND size = ").push_bind(size.clone());
    }
    if let Some(gender) = &filter.gender {
        qb.push(" AND gender = ").push_bind(gender.clone());
    }
    if let Some(status) = filter.status {
        qb.push(" AND availability_status = ").push_bind(status);
    }
    if let Some(city) = &filter.city {
        qb.push(" AND city ILIKE ").push_bind(city.clone());
    }
    if let Some(shelter) = filter.shelter {
        qb.push(" AND shelter_id = ").push_bind(shelter);
    }
}
