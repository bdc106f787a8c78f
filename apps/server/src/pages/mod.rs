//! Server-rendered pages: the public site and the admin area.

use actix_web::{HttpResponse, http::header, web};
use serde::Serialize;
use tera::{Context, Tera};

use gazette_core::domain::{Author, Contact, Post};

pub mod admin;
pub mod public;
pub mod session;

/// Render a template, or an empty 500 when rendering itself fails.
pub fn render(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            tracing::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// See-other redirect to a site path.
pub fn redirect(path: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, path))
        .finish()
}

/// A post prepared for template rendering.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub read_time: String,
    pub image: String,
    pub author: String,
    pub likes: i32,
    pub comments: Vec<CommentView>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub name: String,
    pub comment: String,
    pub created_at: String,
}

fn display_date(date: &chrono::DateTime<chrono::Utc>) -> String {
    date.format("%b %e, %Y").to_string()
}

impl PostView {
    pub fn from_post(post: Post, author: Option<Author>) -> Self {
        Self {
            id: post.id.to_string(),
            image: post.display_image().to_string(),
            created_at: display_date(&post.created_at),
            author: author.map(|a| a.username).unwrap_or_else(|| "Unknown".to_string()),
            comments: post
                .comments
                .iter()
                .map(|c| CommentView {
                    name: c.name.clone(),
                    comment: c.comment.clone(),
                    created_at: display_date(&c.created_at),
                })
                .collect(),
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            category: post.category.to_string(),
            read_time: post.read_time,
            likes: post.likes,
        }
    }
}

/// A contact submission prepared for template rendering.
#[derive(Debug, Serialize)]
pub struct ContactView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl From<Contact> for ContactView {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: contact.name,
            email: contact.email,
            message: contact.message,
            read: contact.read,
            created_at: display_date(&contact.created_at),
        }
    }
}

/// Configure all page routes.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(public::home))
        .route("/articles", web::get().to(public::articles))
        .route("/articles/{id}", web::get().to(public::article))
        .route("/about", web::get().to(public::about))
        .route("/contact", web::get().to(public::contact_page))
        .route("/contact", web::post().to(public::contact_submit))
        .route("/admin/login", web::get().to(admin::login_page))
        .route("/admin/login", web::post().to(admin::login_submit))
        .route("/admin", web::get().to(admin::dashboard))
        .route("/admin/logout", web::post().to(admin::logout))
        .route("/admin/posts/new", web::get().to(admin::editor_new))
        .route("/admin/posts/new", web::post().to(admin::editor_create))
        .route("/admin/posts/{id}/edit", web::get().to(admin::editor_edit))
        .route("/admin/posts/{id}/edit", web::post().to(admin::editor_update))
        .route("/admin/posts/{id}/delete", web::post().to(admin::post_delete))
        .route(
            "/admin/contacts/{id}/read",
            web::post().to(admin::contact_read),
        )
        .route(
            "/admin/contacts/{id}/delete",
            web::post().to(admin::contact_delete),
        );
}
