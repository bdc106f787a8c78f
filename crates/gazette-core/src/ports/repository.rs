use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, Contact, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard record operations.
///
/// `insert` and `update` are separate so that callers state their intent;
/// read-modify-write sequences (like counters, comment appends) are plain
/// find-then-update with no locking, so concurrent writers race last-write-wins.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity. Fails with `RepoError::NotFound` when the
    /// record no longer exists.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest first, with each author resolved for display.
    async fn list_recent(&self) -> Result<Vec<(Post, Option<Author>)>, RepoError>;

    /// A single post with its author resolved for display.
    async fn find_with_author(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Option<Author>)>, RepoError>;
}

/// Contact repository.
#[async_trait]
pub trait ContactRepository: BaseRepository<Contact, Uuid> {
    /// All contact submissions, newest first.
    async fn list_recent(&self) -> Result<Vec<Contact>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}
