//! Repository for the `reviews` table.

use sqlx::{PgPool, Postgres, Transaction};

use crate::models::review::{ReviewRecord, ReviewRow};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

const REVIEW_COLUMNS: &str = "\
    slug, title, genre, platforms, rating, author, review_date, featured, \
    cover_image, header_image, tags, excerpt, content, author_avatar, \
    created_at, updated_at";

/// CRUD operations for review documents.
pub struct ReviewRepo;

impl ReviewRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List reviews newest-first, optionally limited.
    pub async fn list_all(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<ReviewRow>, sqlx::Error> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             ORDER BY review_date DESC, created_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, ReviewRow>(&query)
            .bind(limit.unwrap_or(i64::MAX))
            .fetch_all(pool)
            .await
    }

    /// Find a review by its slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ReviewRow>, sqlx::Error> {
        let query = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE slug = $1");
        sqlx::query_as::<_, ReviewRow>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Admin table search: case-insensitive substring over title, genre,
    /// and author. An empty term lists everything.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<ReviewRow>, sqlx::Error> {
        let pattern = format!("%{}%", term.replace('%', "\\%").replace('_', "\\_"));
        let query = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE title ILIKE $1 OR genre ILIKE $1 OR author ILIKE $1 \
             ORDER BY review_date DESC, created_at DESC"
        );
        sqlx::query_as::<_, ReviewRow>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new review.
    ///
    /// Returns `None` when the slug is already taken. When the record is
    /// featured, all other featured flags are cleared in the same
    /// transaction so there is never a window with an ambiguous primary
    /// feature.
    pub async fn create(
        pool: &PgPool,
        record: &ReviewRecord,
    ) -> Result<Option<ReviewRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if record.featured {
            Self::clear_featured_except(&mut tx, &record.slug).await?;
        }

        let query = format!(
            "INSERT INTO reviews \
                (slug, title, genre, platforms, rating, author, review_date, featured, \
                 cover_image, header_image, tags, excerpt, content, author_avatar) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (slug) DO NOTHING \
             RETURNING {REVIEW_COLUMNS}"
        );
        let row = bind_record(sqlx::query_as::<_, ReviewRow>(&query), record)
            .fetch_optional(&mut *tx)
            .await?;

        // A conflicting insert must not clear anyone's featured flag.
        if row.is_some() {
            tx.commit().await?;
        } else {
            tx.rollback().await?;
        }

        Ok(row)
    }

    /// Update the review at `slug`, possibly renaming it (title changes
    /// regenerate the slug). Returns `None` when no such review exists.
    pub async fn update(
        pool: &PgPool,
        slug: &str,
        record: &ReviewRecord,
    ) -> Result<Option<ReviewRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if record.featured {
            Self::clear_featured_except(&mut tx, slug).await?;
        }

        let query = format!(
            "UPDATE reviews SET \
                slug = $1, title = $2, genre = $3, platforms = $4, rating = $5, \
                author = $6, review_date = $7, featured = $8, cover_image = $9, \
                header_image = $10, tags = $11, excerpt = $12, content = $13, \
                author_avatar = $14, updated_at = NOW() \
             WHERE slug = $15 \
             RETURNING {REVIEW_COLUMNS}"
        );
        let row = bind_record(sqlx::query_as::<_, ReviewRow>(&query), record)
            .bind(slug)
            .fetch_optional(&mut *tx)
            .await?;

        if row.is_some() {
            tx.commit().await?;
        } else {
            tx.rollback().await?;
        }

        Ok(row)
    }

    /// Delete a review. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE slug = $1")
            .bind(slug)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clear every featured flag except the named slug's, inside the
    /// caller's transaction.
    async fn clear_featured_except(
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE reviews SET featured = FALSE, updated_at = NOW() WHERE featured AND slug <> $1")
            .bind(slug)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

type ReviewQuery<'q> =
    sqlx::query::QueryAs<'q, Postgres, ReviewRow, sqlx::postgres::PgArguments>;

/// Bind the writable columns of a record in declaration order
/// (`$1` through `$14`).
fn bind_record<'q>(query: ReviewQuery<'q>, record: &'q ReviewRecord) -> ReviewQuery<'q> {
    query
        .bind(&record.slug)
        .bind(&record.title)
        .bind(&record.genre)
        .bind(&record.platforms)
        .bind(record.rating)
        .bind(&record.author)
        .bind(record.review_date)
        .bind(record.featured)
        .bind(&record.cover_image)
        .bind(&record.header_image)
        .bind(&record.tags)
        .bind(&record.excerpt)
        .bind(&record.content)
        .bind(&record.author_avatar)
}
