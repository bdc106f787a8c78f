use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use gazette_core::domain::{Contact, Post, User};
use gazette_core::error::RepoError;
use gazette_core::ports::{BaseRepository, UserRepository};

use crate::database::entity::post::{self, CommentList};
use crate::database::entity::{contact, user};
use crate::database::postgres_repo::{
    PostgresContactRepository, PostgresPostRepository, PostgresUserRepository,
};

fn post_model(id: Uuid, author_id: Uuid) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        author_id,
        title: "Test Post".to_owned(),
        excerpt: "Excerpt".to_owned(),
        content: "Content".to_owned(),
        category: "Design".to_owned(),
        read_time: "3 min read".to_owned(),
        image_url: None,
        likes: 0,
        comments: CommentList(Vec::new()),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, Uuid::new_v4())]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert!(post.comments.is_empty());
}

#[tokio::test]
async fn test_delete_missing_contact_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresContactRepository::new(db);

    let err = BaseRepository::<Contact, Uuid>::delete(&repo, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_update_contact_marks_read() {
    let contact_id = Uuid::new_v4();
    let now = Utc::now();
    let updated = contact::Model {
        id: contact_id,
        name: "Ana".to_owned(),
        email: "a@x.com".to_owned(),
        message: "Hi".to_owned(),
        read: true,
        created_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![updated]])
        .into_connection();

    let repo = PostgresContactRepository::new(db);

    let mut contact = Contact::new("Ana".to_owned(), "a@x.com".to_owned(), "Hi".to_owned());
    contact.id = contact_id;
    contact.mark_read();

    let saved = repo.update(contact).await.unwrap();

    assert!(saved.read);
}

#[tokio::test]
async fn test_find_user_by_username() {
    let now = Utc::now();
    let model = user::Model {
        id: Uuid::new_v4(),
        username: "editor".to_owned(),
        password_hash: "hash".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found: Option<User> = repo.find_by_username("editor").await.unwrap();

    assert_eq!(found.unwrap().username, "editor");
}
