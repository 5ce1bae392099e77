// src/db/blog_repository.rs
// DOCUMENTATION: Database access layer for blog content
// PURPOSE: Category listing, post CRUD with unique slugs, comments

use crate::errors::TravelError;
use crate::models::{
    Category, CategoryResponse, Comment, CreatePostRequest, Post, PostQuery, UpdatePostRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str = r#"
    id, author_id, image_url, title, slug, excerpt, content,
    category_id, tags, status, featured, trending, view_count,
    date, created_at, updated_at
"#;

/// BlogRepository: all database operations for the blog surface
pub struct BlogRepository;

impl BlogRepository {
    /// Active categories with their published post counts
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<CategoryResponse>, TravelError> {
        sqlx::query_as::<_, CategoryResponse>(
            r#"
            SELECT c.id, c.title, c.slug, c.description,
                   COUNT(p.id) FILTER (WHERE p.status = 'published') AS post_count
            FROM blog_categories c
            LEFT JOIN blog_posts p ON p.category_id = c.id
            WHERE c.active = true
            GROUP BY c.id, c.title, c.slug, c.description
            ORDER BY c.title
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Category list query error: {}", e);
            TravelError::DatabaseError(e.to_string())
        })
    }

    pub async fn get_category_by_slug(pool: &PgPool, slug: &str) -> Result<Category, TravelError> {
        sqlx::query_as::<_, Category>(
            "SELECT id, title, slug, description, active, created_at
             FROM blog_categories WHERE slug = $1 AND active = true",
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Category fetch error: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| TravelError::NotFound(format!("category '{}'", slug)))
    }

    pub async fn create_category(
        pool: &PgPool,
        title: &str,
        slug: &str,
        description: Option<&str>,
    ) -> Result<Category, TravelError> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO blog_categories (title, slug, description, active, created_at)
            VALUES ($1, $2, $3, true, NOW())
            RETURNING id, title, slug, description, active, created_at
            "#,
        )
        .bind(title)
        .bind(slug)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if crate::db::destination_repository::is_unique_violation(&e) {
                return TravelError::AlreadyExists(format!("category slug '{}'", slug));
            }
            log::error!("Failed to create category: {}", e);
            TravelError::DatabaseError(e.to_string())
        })
    }

    /// Insert a post; caller has already made the slug unique
    pub async fn create_post(
        pool: &PgPool,
        req: &CreatePostRequest,
        slug: &str,
        status: &str,
    ) -> Result<Post, TravelError> {
        let sql = format!(
            r#"
            INSERT INTO blog_posts (
                author_id, image_url, title, slug, excerpt, content,
                category_id, tags, status, featured, trending,
                view_count, date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 0, NOW(), NOW(), NOW())
            RETURNING {}
            "#,
            POST_COLUMNS
        );

        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(req.author_id)
            .bind(&req.image_url)
            .bind(&req.title)
            .bind(slug)
            .bind(&req.excerpt)
            .bind(&req.content)
            .bind(req.category_id)
            .bind(&req.tags)
            .bind(status)
            .bind(req.featured)
            .bind(req.trending)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to create post '{}': {}", req.title, e);
                TravelError::DatabaseError(e.to_string())
            })?;

        log::info!("Created blog post: {} ({})", post.title, post.id);
        Ok(post)
    }

    pub async fn get_post_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Post, TravelError> {
        let mut sql = format!("SELECT {} FROM blog_posts WHERE slug = $1", POST_COLUMNS);
        if published_only {
            sql.push_str(" AND status = 'published'");
        }

        sqlx::query_as::<_, Post>(&sql)
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching post '{}': {}", slug, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("post '{}'", slug)))
    }

    /// True if a post slug is taken; drives suffix-based deduplication
    pub async fn post_slug_exists(pool: &PgPool, slug: &str) -> Result<bool, TravelError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM blog_posts WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Slug existence check failed: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;
        Ok(row.0)
    }

    /// Published posts, filtered and paginated, newest first
    pub async fn list_posts(
        pool: &PgPool,
        query: &PostQuery,
        category_id: Option<Uuid>,
    ) -> Result<(Vec<Post>, i64), TravelError> {
        let limit = query.limit.unwrap_or(10).clamp(1, 50);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let mut where_clauses = vec!["status = 'published'".to_string()];

        if let Some(cat) = category_id {
            where_clauses.push(format!("category_id = '{}'", cat));
        }
        if let Some(tag) = &query.tag {
            let escaped = tag.replace('\'', "''");
            where_clauses.push(format!("'{}' = ANY(tags)", escaped));
        }
        if query.featured == Some(true) {
            where_clauses.push("featured = true".to_string());
        }

        let where_clause = format!("WHERE {}", where_clauses.join(" AND "));

        let count_sql = format!("SELECT COUNT(*) FROM blog_posts {}", where_clause);
        let count_result: (i64,) = sqlx::query_as(&count_sql)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Post count query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        let sql = format!(
            "SELECT {} FROM blog_posts {} ORDER BY date DESC LIMIT {} OFFSET {}",
            POST_COLUMNS, where_clause, limit, offset
        );

        let posts = sqlx::query_as::<_, Post>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Post list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok((posts, count_result.0))
    }

    /// Partial update; publishing refreshes the display date
    pub async fn update_post(
        pool: &PgPool,
        id: Uuid,
        req: &UpdatePostRequest,
    ) -> Result<Post, TravelError> {
        let status = req.status.map(|s| s.as_str());

        let sql = format!(
            r#"
            UPDATE blog_posts
            SET title = COALESCE($1, title),
                image_url = COALESCE($2, image_url),
                excerpt = COALESCE($3, excerpt),
                content = COALESCE($4, content),
                category_id = COALESCE($5, category_id),
                tags = COALESCE($6, tags),
                status = COALESCE($7, status),
                featured = COALESCE($8, featured),
                trending = COALESCE($9, trending),
                date = CASE
                    WHEN $7 = 'published' AND status <> 'published' THEN NOW()
                    ELSE date
                END,
                updated_at = NOW()
            WHERE id = $10
            RETURNING {}
            "#,
            POST_COLUMNS
        );

        sqlx::query_as::<_, Post>(&sql)
            .bind(&req.title)
            .bind(&req.image_url)
            .bind(&req.excerpt)
            .bind(&req.content)
            .bind(req.category_id)
            .bind(&req.tags)
            .bind(status)
            .bind(req.featured)
            .bind(req.trending)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Update failed for post {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("post {}", id)))
    }

    pub async fn delete_post(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for post {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("post {}", id)));
        }

        log::info!("Deleted blog post: {}", id);
        Ok(())
    }

    /// Best-effort view counter; listing order is unaffected
    pub async fn increment_view_count(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        sqlx::query("UPDATE blog_posts SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("View count bump failed for post {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }

    /// Comments are auto-approved; moderation happens by deletion
    pub async fn create_comment(
        pool: &PgPool,
        post_id: Uuid,
        author_name: &str,
        email: &str,
        body: &str,
    ) -> Result<Comment, TravelError> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO blog_comments (post_id, author_name, email, body, is_approved, created_at)
            VALUES ($1, $2, $3, $4, true, NOW())
            RETURNING id, post_id, author_name, email, body, is_approved, created_at
            "#,
        )
        .bind(post_id)
        .bind(author_name)
        .bind(email)
        .bind(body)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create comment on post {}: {}", post_id, e);
            TravelError::DatabaseError(e.to_string())
        })
    }

    /// Approved comments for a post, oldest first
    pub async fn list_comments(pool: &PgPool, post_id: Uuid) -> Result<Vec<Comment>, TravelError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, author_name, email, body, is_approved, created_at
            FROM blog_comments
            WHERE post_id = $1 AND is_approved = true
            ORDER BY created_at
            "#,
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Comment list query error: {}", e);
            TravelError::DatabaseError(e.to_string())
        })
    }
}
