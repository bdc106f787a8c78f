//! HTTP-level tests for the JSON API, running on the in-memory store.

use std::sync::Arc;

use actix_web::{App, test, web};
use serde_json::Value;
use uuid::Uuid;

use gazette_core::domain::{Category, Post, PostDraft, User};
use gazette_core::ports::{BaseRepository, PasswordService, TokenService};
use gazette_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use gazette_infra::database::MemoryStore;
use gazette_infra::media::LocalMediaStore;
use gazette_server::handlers;
use gazette_server::state::AppState;

struct TestEnv {
    store: MemoryStore,
    state: AppState,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
    uploads: tempfile::TempDir,
}

fn test_env() -> TestEnv {
    let store = MemoryStore::new();
    let uploads = tempfile::tempdir().unwrap();
    let media = Arc::new(LocalMediaStore::new(uploads.path().to_path_buf(), "/uploads"));
    let state = AppState::with_store(store.clone(), media);

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "gazette-test".to_string(),
    }));
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    TestEnv {
        store,
        state,
        tokens,
        passwords,
        uploads,
    }
}

macro_rules! init_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.state.clone()))
                .app_data(web::Data::new($env.tokens.clone()))
                .app_data(web::Data::new($env.passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await
    };
}

async fn seed_user(env: &TestEnv, username: &str, password: &str) -> User {
    let hash = env.passwords.hash(password).unwrap();
    let user = User::new(username.to_string(), hash);
    BaseRepository::<User, Uuid>::insert(&env.store, user)
        .await
        .unwrap()
}

async fn seed_post(env: &TestEnv, author_id: Uuid, image_url: Option<String>) -> Post {
    let post = Post::new(
        author_id,
        PostDraft {
            title: "Seeded".to_string(),
            excerpt: "Excerpt".to_string(),
            content: "Content".to_string(),
            category: Category::Technology,
            read_time: "4 min read".to_string(),
        },
        image_url,
    );
    BaseRepository::<Post, Uuid>::insert(&env.store, post)
        .await
        .unwrap()
}

fn bearer(env: &TestEnv, user: &User) -> String {
    let token = env.tokens.generate_token(user.id, &user.username).unwrap();
    format!("Bearer {token}")
}

#[actix_web::test]
async fn test_two_likes_accumulate_without_idempotence() {
    let env = test_env();
    let post = seed_post(&env, Uuid::new_v4(), None).await;
    let app = init_app!(env);

    for expected in [1, 2] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{}/like", post.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["likes"], expected);
    }
}

#[actix_web::test]
async fn test_unlike_floors_at_zero() {
    let env = test_env();
    let post = seed_post(&env, Uuid::new_v4(), None).await;
    let app = init_app!(env);

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{}/unlike", post.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["likes"], 0);
    }
}

#[actix_web::test]
async fn test_like_then_unlike_restores_count() {
    let env = test_env();
    let post = seed_post(&env, Uuid::new_v4(), None).await;
    let app = init_app!(env);

    let like = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/like", post.id))
        .to_request();
    let _: Value = test::call_and_read_body_json(&app, like).await;

    let unlike = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/unlike", post.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, unlike).await;

    assert_eq!(body["likes"], 0);
}

#[actix_web::test]
async fn test_unknown_post_is_not_found() {
    let env = test_env();
    let user = seed_user(&env, "editor", "password123").await;
    let auth = bearer(&env, &user);
    let app = init_app!(env);

    let missing = Uuid::new_v4();

    let get = test::TestRequest::get()
        .uri(&format!("/api/posts/{missing}"))
        .to_request();
    assert_eq!(test::call_service(&app, get).await.status(), 404);

    let like = test::TestRequest::post()
        .uri(&format!("/api/posts/{missing}/like"))
        .to_request();
    assert_eq!(test::call_service(&app, like).await.status(), 404);

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/posts/{missing}"))
        .insert_header(("authorization", auth))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status(), 404);
}

#[actix_web::test]
async fn test_post_list_is_newest_first_with_author() {
    let env = test_env();
    let user = seed_user(&env, "editor", "password123").await;
    let mut older = seed_post(&env, user.id, None).await;
    older.created_at -= chrono::TimeDelta::hours(2);
    BaseRepository::<Post, Uuid>::update(&env.store, older)
        .await
        .unwrap();
    let newer = seed_post(&env, user.id, None).await;
    let app = init_app!(env);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["id"], newer.id.to_string());
    assert_eq!(posts[0]["author"]["username"], "editor");
}

#[actix_web::test]
async fn test_mutating_posts_requires_token() {
    let env = test_env();
    let post = seed_post(&env, Uuid::new_v4(), None).await;
    let app = init_app!(env);

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status(), 401);

    let create = test::TestRequest::post().uri("/api/posts").to_request();
    assert_eq!(test::call_service(&app, create).await.status(), 401);
}

fn multipart_post_body(boundary: &str) -> String {
    let field = |name: &str, value: &str| {
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    };

    format!(
        "{}{}{}{}{}--{boundary}--\r\n",
        field("title", "T"),
        field("excerpt", "E"),
        field("content", "C"),
        field("category", "Design"),
        field("readTime", "3 min read"),
    )
}

#[actix_web::test]
async fn test_create_post_without_image_has_no_image_url() {
    let env = test_env();
    let user = seed_user(&env, "editor", "password123").await;
    let auth = bearer(&env, &user);
    let app = init_app!(env);

    let boundary = "XBOUNDARYX";
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("authorization", auth))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_post_body(boundary))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["category"], "Design");
    assert_eq!(body["likes"], 0);
    assert_eq!(body["author"]["username"], "editor");
    assert!(body.get("imageUrl").is_none());
}

#[actix_web::test]
async fn test_delete_post_removes_stored_image() {
    let env = test_env();
    let user = seed_user(&env, "editor", "password123").await;
    let auth = bearer(&env, &user);

    let image_path = env.uploads.path().join("post-123-abc.jpg");
    std::fs::write(&image_path, b"jpeg").unwrap();
    let post = seed_post(&env, user.id, Some("/uploads/post-123-abc.jpg".to_string())).await;

    let app = init_app!(env);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(("authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(!image_path.exists());

    let get = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    assert_eq!(test::call_service(&app, get).await.status(), 404);
}

#[actix_web::test]
async fn test_comment_endpoint_persists_even_though_the_page_never_calls_it() {
    let env = test_env();
    let post = seed_post(&env, Uuid::new_v4(), None).await;
    let app = init_app!(env);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comment", post.id))
        .set_json(serde_json::json!({"name": "Ana", "comment": "Loved this"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let get = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, get).await;

    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["name"], "Ana");
    assert!(comments[0].get("createdAt").is_some());
}

#[actix_web::test]
async fn test_contact_flow() {
    let env = test_env();
    let user = seed_user(&env, "editor", "password123").await;
    let auth = bearer(&env, &user);
    let app = init_app!(env);

    // Public submission needs no token.
    let submit = test::TestRequest::post()
        .uri("/api/contacts")
        .set_json(serde_json::json!({"name": "Ana", "email": "a@x.com", "message": "Hi"}))
        .to_request();
    let resp = test::call_service(&app, submit).await;
    assert_eq!(resp.status(), 201);

    // Listing without a token is rejected.
    let unauthorized = test::TestRequest::get().uri("/api/contacts").to_request();
    assert_eq!(test::call_service(&app, unauthorized).await.status(), 401);

    // Listing with a token shows the unread submission.
    let list = test::TestRequest::get()
        .uri("/api/contacts")
        .insert_header(("authorization", auth.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, list).await;
    let contacts = body.as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["read"], false);

    // Mark read, then delete.
    let id = contacts[0]["id"].as_str().unwrap().to_string();
    let read = test::TestRequest::put()
        .uri(&format!("/api/contacts/{id}/read"))
        .insert_header(("authorization", auth.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, read).await;
    assert_eq!(body["read"], true);

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/contacts/{id}"))
        .insert_header(("authorization", auth))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status(), 200);
}

#[actix_web::test]
async fn test_login_issues_token_for_valid_credentials() {
    let env = test_env();
    seed_user(&env, "editor", "password123").await;
    let app = init_app!(env);

    let ok = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({"username": "editor", "password": "password123"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, ok).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["username"], "editor");

    let bad = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({"username": "editor", "password": "wrong"}))
        .to_request();
    assert_eq!(test::call_service(&app, bad).await.status(), 401);

    let empty = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({"username": "", "password": ""}))
        .to_request();
    assert_eq!(test::call_service(&app, empty).await.status(), 400);
}

#[actix_web::test]
async fn test_register_rejects_duplicates_and_short_passwords() {
    let env = test_env();
    seed_user(&env, "editor", "password123").await;
    let app = init_app!(env);

    let duplicate = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({"username": "editor", "password": "password123"}))
        .to_request();
    assert_eq!(test::call_service(&app, duplicate).await.status(), 409);

    let short = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({"username": "fresh", "password": "short"}))
        .to_request();
    assert_eq!(test::call_service(&app, short).await.status(), 400);

    let ok = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({"username": "fresh", "password": "password123"}))
        .to_request();
    let resp = test::call_service(&app, ok).await;
    assert_eq!(resp.status(), 201);
}
