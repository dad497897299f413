//! Image record service: insert, filtered listing, lookup, review updates.
//!
//! DESIGN
//! ======
//! Every function takes a `&PgPool` and returns typed rows, so route handlers
//! only translate between HTTP and these calls. Listing builds its WHERE
//! clause dynamically from the optional filters.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from image queries. Mirrors the `images` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImageRow {
    pub id: i64,
    pub filename: String,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub subject: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
    pub guide_name: Option<String>,
    pub notes: Option<String>,
    pub stored_path: String,
    pub llm_review: Option<String>,
    pub llm_reviewed_at: Option<DateTime<Utc>>,
}

/// Metadata captured alongside an uploaded file.
#[derive(Debug, Clone, Default)]
pub struct NewImage {
    pub filename: String,
    pub content_type: String,
    pub subject: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
    pub guide_name: Option<String>,
    pub notes: Option<String>,
    pub stored_path: String,
}

/// Optional equality/range filters applied to the listing query.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub subject: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
    pub guide_name: Option<String>,
    pub uploaded_from: Option<DateTime<Utc>>,
    pub uploaded_to: Option<DateTime<Utc>>,
}

const IMAGE_COLUMNS: &str = "id, filename, content_type, uploaded_at, subject, owner_name, \
                             location, guide_name, notes, stored_path, llm_review, llm_reviewed_at";

// =============================================================================
// CRUD
// =============================================================================

/// Insert a new image record.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_image(pool: &PgPool, new: &NewImage) -> Result<ImageRow, ImageError> {
    let sql = format!(
        "INSERT INTO images (filename, content_type, subject, owner_name, location, guide_name, notes, stored_path)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {IMAGE_COLUMNS}"
    );
    let row = sqlx::query_as::<_, ImageRow>(&sql)
        .bind(&new.filename)
        .bind(&new.content_type)
        .bind(&new.subject)
        .bind(&new.owner_name)
        .bind(&new.location)
        .bind(&new.guide_name)
        .bind(&new.notes)
        .bind(&new.stored_path)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

/// List image records matching `filter`, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_images(pool: &PgPool, filter: &ListFilter) -> Result<Vec<ImageRow>, ImageError> {
    let mut builder = build_list_query(filter);
    let rows = builder
        .build_query_as::<ImageRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Assemble the listing query. Split out of [`list_images`] so the generated
/// SQL can be checked without a live database.
fn build_list_query(filter: &ListFilter) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {IMAGE_COLUMNS} FROM images"));
    let mut has_where = false;

    if let Some(subject) = &filter.subject {
        push_clause(&mut builder, &mut has_where);
        builder.push("subject = ").push_bind(subject);
    }
    if let Some(owner_name) = &filter.owner_name {
        push_clause(&mut builder, &mut has_where);
        builder.push("owner_name = ").push_bind(owner_name);
    }
    if let Some(location) = &filter.location {
        push_clause(&mut builder, &mut has_where);
        builder.push("location = ").push_bind(location);
    }
    if let Some(guide_name) = &filter.guide_name {
        push_clause(&mut builder, &mut has_where);
        builder.push("guide_name = ").push_bind(guide_name);
    }
    if let Some(from) = filter.uploaded_from {
        push_clause(&mut builder, &mut has_where);
        builder.push("uploaded_at >= ").push_bind(from);
    }
    if let Some(to) = filter.uploaded_to {
        push_clause(&mut builder, &mut has_where);
        builder.push("uploaded_at <= ").push_bind(to);
    }
    builder.push(" ORDER BY id ASC");

    builder
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    if *has_where {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_where = true;
    }
}

/// Fetch a single image record by ID.
///
/// # Errors
///
/// Returns [`ImageError::NotFound`] if no row matches, or a database error.
pub async fn get_image(pool: &PgPool, id: i64) -> Result<ImageRow, ImageError> {
    let sql = format!("SELECT {IMAGE_COLUMNS} FROM images WHERE id = $1");
    let row = sqlx::query_as::<_, ImageRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or(ImageError::NotFound(id))
}

/// Store the review text and timestamp on an existing record.
///
/// # Errors
///
/// Returns [`ImageError::NotFound`] if no row matches, or a database error.
pub async fn set_review(
    pool: &PgPool,
    id: i64,
    review: &str,
    reviewed_at: DateTime<Utc>,
) -> Result<(), ImageError> {
    let result = sqlx::query("UPDATE images SET llm_review = $2, llm_reviewed_at = $3 WHERE id = $1")
        .bind(id)
        .bind(review)
        .bind(reviewed_at)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ImageError::NotFound(id));
    }
    Ok(())
}
