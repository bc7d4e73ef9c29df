use actix_web::{get, http::Method, post, web, HttpResponse};

use crate::{
    api::{error::ApiError, identity::UserKey},
    error::RecordError,
    models::{
        discussion::{Author, NewPost, NewReply, Post},
        request::{links, ApiResponse, Links, PaginatedResponse},
    },
    state::AppState,
};

fn post_links(id: &str) -> Links {
    links([
        ("self", format!("/api/posts/{id}"), Method::GET),
        ("reply", format!("/api/posts/{id}/replies"), Method::POST),
        ("collection", "/api/posts".into(), Method::GET),
    ])
}

fn post_response(post: Post) -> ApiResponse<Post> {
    let links = post_links(&post.id);
    ApiResponse::new(post, links)
}

/// GET /api/posts
/// Discussion threads, newest first, each with its replies.
#[utoipa::path(
    context_path = "/api",
    tag = "discussion",
    responses((status = 200, description = "Discussion threads", body = PostListResponse))
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    let posts = state.discussion.list().await;
    let collection_links = links([
        ("self", "/api/posts".into(), Method::GET),
        ("create", "/api/posts".into(), Method::POST),
    ]);
    HttpResponse::Ok().json(PaginatedResponse::new(posts, collection_links))
}

/// GET /api/posts/{id}
#[utoipa::path(
    context_path = "/api",
    tag = "discussion",
    params(("id" = String, Path, description = "Thread id")),
    responses(
        (status = 200, description = "The thread", body = PostApiResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
    )
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match state.discussion.get(&id).await {
        Some(post) => Ok(HttpResponse::Ok().json(post_response(post))),
        None => Err(RecordError::NotFound { kind: "post", id }.into()),
    }
}

/// POST /api/posts
/// Starts a thread authored by the caller.
#[utoipa::path(
    context_path = "/api",
    tag = "discussion",
    params(("x-user" = String, Header, description = "Username of the caller")),
    request_body = NewPost,
    responses(
        (status = 201, description = "Thread created", body = PostApiResponse),
        (status = 401, description = "Missing X-User header", body = ErrorResponse),
        (status = 422, description = "Title or content out of bounds", body = ErrorResponse),
    )
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: UserKey,
    body: web::Json<NewPost>,
) -> Result<HttpResponse, ApiError> {
    let post = state
        .discussion
        .create(Author::new(user.0), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(post_response(post)))
}

/// POST /api/posts/{id}/replies
/// Replies to a thread; returns the whole thread.
#[utoipa::path(
    context_path = "/api",
    tag = "discussion",
    params(
        ("x-user" = String, Header, description = "Username of the caller"),
        ("id" = String, Path, description = "Thread id"),
    ),
    request_body = NewReply,
    responses(
        (status = 201, description = "Reply added", body = PostApiResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
        (status = 422, description = "Empty reply", body = ErrorResponse),
    )
)]
#[post("/posts/{id}/replies")]
pub async fn reply_to_post(
    state: web::Data<AppState>,
    user: UserKey,
    path: web::Path<String>,
    body: web::Json<NewReply>,
) -> Result<HttpResponse, ApiError> {
    let post = state
        .discussion
        .reply(&path.into_inner(), Author::new(user.0), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(post_response(post)))
}
