// src/handlers/blog.rs
// DOCUMENTATION: Public blog handlers
// PURPOSE: Published posts, categories and reader comments

use crate::db::BlogRepository;
use crate::errors::TravelError;
use crate::models::{CreateCommentRequest, PostDetailResponse, PostListResponse, PostQuery};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// GET /blog/posts
/// Published posts, filtered and paginated
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<PostQuery>,
) -> Result<impl Responder, TravelError> {
    let category_id = match &query.category {
        Some(slug) => Some(BlogRepository::get_category_by_slug(pool.get_ref(), slug).await?.id),
        None => None,
    };

    let (posts, total_count) = BlogRepository::list_posts(pool.get_ref(), &query, category_id).await?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 50);

    let response = PostListResponse {
        data: posts.iter().map(|p| p.to_summary()).collect(),
        total_count,
        page,
        limit,
        has_more: page * limit < total_count,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// GET /blog/posts/{slug}
/// Post detail; each fetch bumps the view counter
pub async fn get_post(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let post = BlogRepository::get_post_by_slug(pool.get_ref(), &path.into_inner(), true).await?;

    BlogRepository::increment_view_count(pool.get_ref(), post.id).await?;

    let comments = BlogRepository::list_comments(pool.get_ref(), post.id).await?;

    let response = PostDetailResponse {
        post: post.to_summary(),
        content: post.content.clone(),
        comments: comments.iter().map(|c| c.to_response()).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// POST /blog/posts/{slug}/comments
pub async fn create_comment(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    body: web::Json<CreateCommentRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let post = BlogRepository::get_post_by_slug(pool.get_ref(), &path.into_inner(), true).await?;

    let comment = BlogRepository::create_comment(
        pool.get_ref(),
        post.id,
        &body.author_name,
        &body.email,
        &body.body,
    )
    .await?;

    Ok(HttpResponse::Created().json(comment.to_response()))
}

/// GET /blog/categories
/// Active categories with published post counts
pub async fn list_categories(pool: web::Data<PgPool>) -> Result<impl Responder, TravelError> {
    let categories = BlogRepository::list_categories(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// Configuration for blog routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .route("/posts", web::get().to(list_posts))
            .route("/posts/{slug}", web::get().to(get_post))
            .route("/posts/{slug}/comments", web::post().to(create_comment))
            .route("/categories", web::get().to(list_categories)),
    );
}
