//! Public site pages: home, article list and detail, about, contact form.

use actix_web::{HttpResponse, ResponseError, web};
use serde::Deserialize;
use tera::{Context, Tera};
use uuid::Uuid;

use gazette_shared::dto::ContactRequest;

use crate::handlers::contacts::{CONTACT_ACK, submit_contact};
use crate::middleware::error::AppError;
use crate::pages::{PostView, render};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

async fn load_posts(state: &AppState) -> Result<Vec<PostView>, AppError> {
    let posts = state.posts.list_recent().await?;
    Ok(posts
        .into_iter()
        .map(|(post, author)| PostView::from_post(post, author))
        .collect())
}

/// GET /
pub async fn home(state: web::Data<AppState>, tera: web::Data<Tera>) -> HttpResponse {
    let posts = match load_posts(&state).await {
        Ok(posts) => posts,
        Err(e) => return e.error_response(),
    };

    let mut context = Context::new();
    context.insert("current_page", "home");
    context.insert("posts", &posts[..posts.len().min(3)]);
    render(&tera, "index.html", &context)
}

/// GET /articles
///
/// `?q=` filters the already-fetched full post list by case-insensitive
/// substring over title, excerpt and category. This is a presentation-layer
/// filter, not a store query.
pub async fn articles(
    state: web::Data<AppState>,
    tera: web::Data<Tera>,
    query: web::Query<ArticlesQuery>,
) -> HttpResponse {
    let mut posts = match load_posts(&state).await {
        Ok(posts) => posts,
        Err(e) => return e.error_response(),
    };

    let q = query.q.as_deref().unwrap_or("").trim().to_lowercase();
    if !q.is_empty() {
        posts.retain(|p| {
            p.title.to_lowercase().contains(&q)
                || p.excerpt.to_lowercase().contains(&q)
                || p.category.to_lowercase().contains(&q)
        });
    }

    let mut context = Context::new();
    context.insert("current_page", "articles");
    context.insert("posts", &posts);
    context.insert("query", &q);
    render(&tera, "articles.html", &context)
}

/// GET /articles/{id}
pub async fn article(
    state: web::Data<AppState>,
    tera: web::Data<Tera>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let found = match state.posts.find_with_author(path.into_inner()).await {
        Ok(found) => found,
        Err(e) => return AppError::from(e).error_response(),
    };

    let Some((post, author)) = found else {
        let mut context = Context::new();
        context.insert("current_page", "articles");
        return match tera.render("not_found.html", &context) {
            Ok(body) => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(body),
            Err(e) => {
                tracing::error!("Failed to render template 'not_found.html': {e}");
                HttpResponse::NotFound().finish()
            }
        };
    };

    let mut context = Context::new();
    context.insert("current_page", "articles");
    context.insert("post", &PostView::from_post(post, author));
    render(&tera, "article.html", &context)
}

/// GET /about
pub async fn about(tera: web::Data<Tera>) -> HttpResponse {
    let mut context = Context::new();
    context.insert("current_page", "about");
    render(&tera, "about.html", &context)
}

/// GET /contact
pub async fn contact_page(tera: web::Data<Tera>) -> HttpResponse {
    let mut context = Context::new();
    context.insert("current_page", "contact");
    render(&tera, "contact.html", &context)
}

/// POST /contact
pub async fn contact_submit(
    state: web::Data<AppState>,
    tera: web::Data<Tera>,
    form: web::Form<ContactForm>,
) -> HttpResponse {
    let form = form.into_inner();

    let mut context = Context::new();
    context.insert("current_page", "contact");

    let request = ContactRequest {
        name: form.name,
        email: form.email,
        message: form.message,
    };
    match submit_contact(&state, request).await {
        Ok(_) => context.insert("notice", CONTACT_ACK),
        Err(AppError::BadRequest(msg)) => context.insert("error", &msg),
        Err(e) => {
            tracing::error!("Contact submission failed: {e}");
            context.insert("error", "Something went wrong. Please try again.");
        }
    }

    render(&tera, "contact.html", &context)
}
