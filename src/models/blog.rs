// src/models/blog.rs
// DOCUMENTATION: Blog data structures
// PURPOSE: Categories, posts and comments for the marketing blog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Publication state of a blog post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    InReview,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::InReview => "in_review",
            PostStatus::Published => "published",
        }
    }
}

/// Blog category mapped from the blog_categories table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Blog post mapped from the blog_posts table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,

    /// Author account; NULL for posts whose author was deleted
    pub author_id: Option<Uuid>,

    pub image_url: Option<String>,
    pub title: String,
    pub slug: String,

    /// Brief teaser shown in listings
    pub excerpt: Option<String>,
    pub content: String,

    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,

    /// "draft", "in_review" or "published"
    pub status: String,
    pub featured: bool,
    pub trending: bool,

    pub view_count: i32,

    /// Publication timestamp shown on the site
    pub date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment mapped from the blog_comments table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_name: String,
    pub email: String,
    pub body: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a post (admin)
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 1000))]
    pub title: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[validate(length(min = 1))]
    pub content: String,

    #[serde(default)]
    pub category_id: Option<Uuid>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub author_id: Option<Uuid>,

    /// Defaults to in_review, matching editorial workflow
    pub status: Option<PostStatus>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub trending: bool,
}

/// Request DTO for partial post updates (admin)
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub featured: Option<bool>,
    pub trending: Option<bool>,
}

/// Request DTO for POST /blog/posts/{slug}/comments
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 5000))]
    pub body: String,
}

/// Listing response DTO (no full content)
#[derive(Debug, Serialize)]
pub struct PostSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub excerpt: Option<String>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub trending: bool,
    pub view_count: i32,
    pub date: DateTime<Utc>,
}

/// Detail response DTO with content and approved comments
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostSummaryResponse,
    pub content: String,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Category with its published post count
#[derive(Debug, Serialize, FromRow)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub post_count: i64,
}

/// Query parameters for GET /blog/posts
#[derive(Debug, Deserialize)]
pub struct PostQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Paginated post listing
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub data: Vec<PostSummaryResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

impl Post {
    pub fn to_summary(&self) -> PostSummaryResponse {
        PostSummaryResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            image_url: self.image_url.clone(),
            excerpt: self.excerpt.clone(),
            category_id: self.category_id,
            tags: self.tags.clone(),
            featured: self.featured,
            trending: self.trending,
            view_count: self.view_count,
            date: self.date,
        }
    }
}

impl Comment {
    pub fn to_response(&self) -> CommentResponse {
        CommentResponse {
            id: self.id,
            author_name: self.author_name.clone(),
            body: self.body.clone(),
            created_at: self.created_at,
        }
    }
}
