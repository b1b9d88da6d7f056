//! Blog post handlers.
//!
//! Reads are public; writes take an [`Identity`] and are therefore gated.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Post, PostPatch};
use quill_shared::ApiResponse;
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        user_id: post.user_id.to_string(),
        title: post.title,
        content: post.content,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// Ids that are not UUIDs cannot exist, so they are reported as missing.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Post with id {} not found", raw)))
}

/// POST /api/blogs
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create(identity.subject, req.title, req.content)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(post),
        "Blog post created",
    )))
}

/// GET /api/blogs
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .list()
        .await?
        .into_iter()
        .map(to_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/blogs/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.get_by_id(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// PUT /api/blogs/{id}
///
/// A missing post is reported as 404 even when the body is unusable.
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Result<web::Json<UpdatePostRequest>, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = match body {
        Ok(body) => body.into_inner(),
        Err(err) => {
            state.posts.get_by_id(id).await?;
            return Ok(err.error_response());
        }
    };

    let patch = PostPatch {
        title: req.title,
        content: req.content,
    };
    let post = state.posts.update(identity.subject, id, patch).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(post),
        "Blog post updated",
    )))
}

/// DELETE /api/blogs/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.posts.delete(identity.subject, id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Blog post deleted")))
}
