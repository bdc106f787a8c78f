//! Admin area pages: login, dashboard, post editor.
//!
//! Every page except login resolves the admin from the cookie session and
//! redirects to the login form when the cached token is absent or invalid.

use std::sync::Arc;

use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{TimeDelta, Utc};
use serde::Deserialize;
use tera::{Context, Tera};
use uuid::Uuid;

use gazette_core::domain::Category;
use gazette_core::ports::{PasswordService, TokenService};

use crate::forms::PostForm;
use crate::handlers::{auth, contacts, posts};
use crate::middleware::error::AppError;
use crate::pages::{ContactView, PostView, redirect, render, session};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

fn category_names() -> Vec<&'static str> {
    Category::ALL.iter().map(Category::as_str).collect()
}

fn login_error(tera: &Tera, message: &str) -> HttpResponse {
    let mut context = Context::new();
    context.insert("error", message);
    render(tera, "admin/login.html", &context)
}

/// GET /admin/login
pub async fn login_page(
    tera: web::Data<Tera>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
) -> HttpResponse {
    if session::current(&http_session, tokens.as_ref().as_ref()).is_some() {
        return redirect("/admin");
    }

    render(&tera, "admin/login.html", &Context::new())
}

/// POST /admin/login
pub async fn login_submit(
    state: web::Data<AppState>,
    tera: web::Data<Tera>,
    tokens: web::Data<Arc<dyn TokenService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    http_session: Session,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    let form = form.into_inner();

    match auth::authenticate(
        &state,
        tokens.as_ref().as_ref(),
        passwords.as_ref().as_ref(),
        &form.username,
        &form.password,
    )
    .await
    {
        Ok((user, token)) => {
            session::login(&http_session, &token, &user.username);
            redirect("/admin")
        }
        Err(AppError::Unauthorized) => login_error(&tera, "Invalid username or password"),
        Err(AppError::BadRequest(msg)) => login_error(&tera, &msg),
        Err(e) => {
            tracing::error!("Login failed: {e}");
            login_error(&tera, "Something went wrong. Please try again.")
        }
    }
}

/// POST /admin/logout
pub async fn logout(http_session: Session) -> HttpResponse {
    session::logout(&http_session);
    redirect("/admin/login")
}

/// GET /admin
///
/// The aggregate counts are computed here from the fetched lists; the store
/// only knows how to list.
pub async fn dashboard(
    state: web::Data<AppState>,
    tera: web::Data<Tera>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
    query: web::Query<DashboardQuery>,
) -> HttpResponse {
    let Some(admin) = session::current(&http_session, tokens.as_ref().as_ref()) else {
        return redirect("/admin/login");
    };

    let posts = match state.posts.list_recent().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("Failed to load posts: {e}");
            Vec::new()
        }
    };
    let contacts = match state.contacts.list_recent().await {
        Ok(contacts) => contacts,
        Err(e) => {
            tracing::error!("Failed to load contacts: {e}");
            Vec::new()
        }
    };

    let week_ago = Utc::now() - TimeDelta::days(7);
    let posts_this_week = posts.iter().filter(|(p, _)| p.created_at > week_ago).count();
    let unread_contacts = contacts.iter().filter(|c| !c.read).count();

    let post_views: Vec<PostView> = posts
        .into_iter()
        .map(|(post, author)| PostView::from_post(post, author))
        .collect();
    let contact_views: Vec<ContactView> = contacts.into_iter().map(Into::into).collect();

    let mut context = Context::new();
    context.insert("username", &admin.username);
    context.insert("total_posts", &post_views.len());
    context.insert("posts_this_week", &posts_this_week);
    context.insert("total_contacts", &contact_views.len());
    context.insert("unread_contacts", &unread_contacts);
    context.insert("posts", &post_views);
    context.insert("contacts", &contact_views);
    context.insert("tab", query.tab.as_deref().unwrap_or("posts"));
    render(&tera, "admin/dashboard.html", &context)
}

fn editor_context(username: &str) -> Context {
    let mut context = Context::new();
    context.insert("username", username);
    context.insert("categories", &category_names());
    context
}

/// GET /admin/posts/new
pub async fn editor_new(
    tera: web::Data<Tera>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
) -> HttpResponse {
    let Some(admin) = session::current(&http_session, tokens.as_ref().as_ref()) else {
        return redirect("/admin/login");
    };

    render(&tera, "admin/editor.html", &editor_context(&admin.username))
}

/// POST /admin/posts/new
pub async fn editor_create(
    state: web::Data<AppState>,
    tera: web::Data<Tera>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
    MultipartForm(form): MultipartForm<PostForm>,
) -> HttpResponse {
    let Some(admin) = session::current(&http_session, tokens.as_ref().as_ref()) else {
        return redirect("/admin/login");
    };

    match posts::create_post(&state, admin.user_id, &form).await {
        Ok(_) => redirect("/admin"),
        Err(e) => {
            let mut context = editor_context(&admin.username);
            context.insert("error", &e.to_string());
            render(&tera, "admin/editor.html", &context)
        }
    }
}

/// GET /admin/posts/{id}/edit
pub async fn editor_edit(
    state: web::Data<AppState>,
    tera: web::Data<Tera>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let Some(admin) = session::current(&http_session, tokens.as_ref().as_ref()) else {
        return redirect("/admin/login");
    };

    let found = match state.posts.find_with_author(path.into_inner()).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("Failed to load post for editing: {e}");
            return redirect("/admin");
        }
    };
    let Some((post, author)) = found else {
        return redirect("/admin");
    };

    let mut context = editor_context(&admin.username);
    context.insert("post", &PostView::from_post(post, author));
    render(&tera, "admin/editor.html", &context)
}

/// POST /admin/posts/{id}/edit
pub async fn editor_update(
    state: web::Data<AppState>,
    tera: web::Data<Tera>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<PostForm>,
) -> HttpResponse {
    let Some(admin) = session::current(&http_session, tokens.as_ref().as_ref()) else {
        return redirect("/admin/login");
    };

    let id = path.into_inner();
    match posts::update_post(&state, id, &form).await {
        Ok(_) => redirect("/admin"),
        Err(e) => {
            let mut context = editor_context(&admin.username);
            context.insert("error", &e.to_string());
            context.insert("edit_id", &id.to_string());
            render(&tera, "admin/editor.html", &context)
        }
    }
}

/// POST /admin/posts/{id}/delete
pub async fn post_delete(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
    path: web::Path<Uuid>,
) -> HttpResponse {
    if session::current(&http_session, tokens.as_ref().as_ref()).is_none() {
        return redirect("/admin/login");
    }

    if let Err(e) = posts::delete_post(&state, path.into_inner()).await {
        tracing::warn!("Failed to delete post: {e}");
    }
    redirect("/admin")
}

/// POST /admin/contacts/{id}/read
pub async fn contact_read(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
    path: web::Path<Uuid>,
) -> HttpResponse {
    if session::current(&http_session, tokens.as_ref().as_ref()).is_none() {
        return redirect("/admin/login");
    }

    if let Err(e) = contacts::mark_contact_read(&state, path.into_inner()).await {
        tracing::warn!("Failed to mark contact as read: {e}");
    }
    redirect("/admin?tab=contacts")
}

/// POST /admin/contacts/{id}/delete
pub async fn contact_delete(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    http_session: Session,
    path: web::Path<Uuid>,
) -> HttpResponse {
    if session::current(&http_session, tokens.as_ref().as_ref()).is_none() {
        return redirect("/admin/login");
    }

    if let Err(e) = contacts::delete_contact(&state, path.into_inner()).await {
        tracing::warn!("Failed to delete contact: {e}");
    }
    redirect("/admin?tab=contacts")
}
