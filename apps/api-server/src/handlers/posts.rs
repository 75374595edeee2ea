//! Post handlers: the global feed, single posts, per-author feeds and
//! post creation.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use chirp_core::domain::{AuthorView, EnrichedPost, Post};
use chirp_shared::dto::{AuthorResponse, CreatePostRequest, FeedItemResponse, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn get_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let feed = state.posts.get_all().await?;

    Ok(HttpResponse::Ok().json(feed.into_iter().map(feed_item).collect::<Vec<_>>()))
}

/// POST /api/posts - Protected route
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(&identity.user_id, &body.content).await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /api/posts/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let enriched = state.posts.get_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(feed_item(enriched)))
}

/// GET /api/users/{user_id}/posts
pub async fn get_by_author(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let feed = state.posts.get_by_author(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(feed.into_iter().map(feed_item).collect::<Vec<_>>()))
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        content: post.content,
        created_at: post.created_at,
    }
}

fn author_response(author: AuthorView) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        username: author.username,
        profile_image_url: author.profile_image_url,
    }
}

fn feed_item(enriched: EnrichedPost) -> FeedItemResponse {
    FeedItemResponse {
        post: post_response(enriched.post),
        author: enriched.author.map(author_response),
    }
}
