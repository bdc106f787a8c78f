//! Post resource handlers.
//!
//! Create, update and delete are shared with the admin pages; the like,
//! unlike and comment operations are deliberately unauthenticated. All
//! counter and comment writes are plain find-then-update sequences with no
//! locking, so concurrent writers against the same post race last-write-wins.

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use gazette_core::domain::{Author, Post};
use gazette_shared::dto::{
    CommentRequest, CommentsResponse, LikesResponse, MessageResponse, PostResponse,
};

use crate::forms::PostForm;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// Create a post authored by `author_id` from the editor's form.
///
/// The image lands on disk before the record write; when the record write
/// fails the file is deleted again, best effort.
pub(crate) async fn create_post(
    state: &AppState,
    author_id: Uuid,
    form: &PostForm,
) -> AppResult<Post> {
    let draft = form.draft()?;
    let image_url = form.store_image(state.media.as_ref()).await?;

    let post = Post::new(author_id, draft, image_url.clone());
    match state.posts.insert(post).await {
        Ok(post) => Ok(post),
        Err(e) => {
            if let Some(path) = image_url {
                let _ = state.media.delete(&path).await;
            }
            Err(e.into())
        }
    }
}

/// Overwrite a post's editable fields, replacing the stored image when a new
/// one was attached. The old file is deleted only after the record write
/// committed the new path.
pub(crate) async fn update_post(
    state: &AppState,
    id: Uuid,
    form: &PostForm,
) -> AppResult<(Post, Option<Author>)> {
    let draft = form.draft()?;
    let Some((mut post, author)) = state.posts.find_with_author(id).await? else {
        return Err(post_not_found());
    };

    let new_image = form.store_image(state.media.as_ref()).await?;
    let old_image = post.image_url.clone();

    post.apply(draft);
    if let Some(path) = &new_image {
        post.image_url = Some(path.clone());
    }

    match state.posts.update(post).await {
        Ok(post) => {
            if new_image.is_some() {
                if let Some(old) = old_image {
                    let _ = state.media.delete(&old).await;
                }
            }
            Ok((post, author))
        }
        Err(e) => {
            if let Some(path) = new_image {
                let _ = state.media.delete(&path).await;
            }
            Err(e.into())
        }
    }
}

/// Delete a post and its uploaded image, if any.
pub(crate) async fn delete_post(state: &AppState, id: Uuid) -> AppResult<()> {
    let Some(post) = state.posts.find_by_id(id).await? else {
        return Err(post_not_found());
    };

    if let Some(image) = &post.image_url {
        let _ = state.media.delete(image).await;
    }

    state.posts.delete(id).await?;
    Ok(())
}

/// GET /api/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;

    let body: Vec<PostResponse> = posts
        .into_iter()
        .map(|(post, author)| PostResponse::from_post(post, author))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let (post, author) = state
        .posts
        .find_with_author(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(PostResponse::from_post(post, author)))
}

/// POST /api/posts - auth required
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    MultipartForm(form): MultipartForm<PostForm>,
) -> AppResult<HttpResponse> {
    let post = create_post(&state, identity.user_id, &form).await?;

    let author = Author {
        id: identity.user_id,
        username: identity.username,
    };
    Ok(HttpResponse::Created().json(PostResponse::from_post(post, Some(author))))
}

/// PUT /api/posts/{id} - auth required
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<PostForm>,
) -> AppResult<HttpResponse> {
    let (post, author) = update_post(&state, path.into_inner(), &form).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from_post(post, author)))
}

/// DELETE /api/posts/{id} - auth required
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    delete_post(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}

/// POST /api/posts/{id}/like - no auth, no per-caller idempotence
pub async fn like(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    post.like();
    let post = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(LikesResponse { likes: post.likes }))
}

/// POST /api/posts/{id}/unlike - no auth, floored at zero
pub async fn unlike(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    post.unlike();
    let post = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(LikesResponse { likes: post.likes }))
}

/// POST /api/posts/{id}/comment - no auth
pub async fn comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.name.trim().is_empty() || req.comment.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and comment are required".to_string(),
        ));
    }

    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    post.add_comment(req.name, req.comment);
    let post = state.posts.update(post).await?;

    Ok(HttpResponse::Created().json(CommentsResponse {
        comments: post.comments.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/posts/{id}/comments
pub async fn comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(CommentsResponse {
        comments: post.comments.into_iter().map(Into::into).collect(),
    }))
}
