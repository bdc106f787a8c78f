//! In-memory record store.
//!
//! Backs the server when no database is configured and doubles as the test
//! repository for handler-level tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use gazette_core::domain::{Author, Contact, Post, User};
use gazette_core::error::RepoError;
use gazette_core::ports::{BaseRepository, ContactRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Inner {
    posts: HashMap<Uuid, Post>,
    contacts: HashMap<Uuid, Contact>,
    users: HashMap<Uuid, User>,
}

/// All three record collections behind one lock. Cloning shares the store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, RepoError> {
        self.inner
            .read()
            .map_err(|_| RepoError::Connection("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, RepoError> {
        self.inner
            .write()
            .map_err(|_| RepoError::Connection("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.read()?.posts.get(&id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        let mut inner = self.write()?;
        if inner.posts.contains_key(&entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        inner.posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut inner = self.write()?;
        if !inner.posts.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        inner.posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.write()?
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list_recent(&self) -> Result<Vec<(Post, Option<Author>)>, RepoError> {
        let inner = self.read()?;
        let mut posts: Vec<Post> = inner.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = inner.users.get(&post.author_id).map(User::author);
                (post, author)
            })
            .collect())
    }

    async fn find_with_author(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Option<Author>)>, RepoError> {
        let inner = self.read()?;
        Ok(inner.posts.get(&id).cloned().map(|post| {
            let author = inner.users.get(&post.author_id).map(User::author);
            (post, author)
        }))
    }
}

#[async_trait]
impl BaseRepository<Contact, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, RepoError> {
        Ok(self.read()?.contacts.get(&id).cloned())
    }

    async fn insert(&self, entity: Contact) -> Result<Contact, RepoError> {
        let mut inner = self.write()?;
        if inner.contacts.contains_key(&entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        inner.contacts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Contact) -> Result<Contact, RepoError> {
        let mut inner = self.write()?;
        if !inner.contacts.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        inner.contacts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.write()?
            .contacts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn list_recent(&self) -> Result<Vec<Contact>, RepoError> {
        let mut contacts: Vec<Contact> = self.read()?.contacts.values().cloned().collect();
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contacts)
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        let mut inner = self.write()?;
        let duplicate = inner.users.contains_key(&entity.id)
            || inner.users.values().any(|u| u.username == entity.username);
        if duplicate {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        inner.users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut inner = self.write()?;
        if !inner.users.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        inner.users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.write()?
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_core::domain::{Category, PostDraft};

    fn sample_post(author_id: Uuid) -> Post {
        Post::new(
            author_id,
            PostDraft {
                title: "Title".to_string(),
                excerpt: "Excerpt".to_string(),
                content: "Content".to_string(),
                category: Category::Travel,
                read_time: "5 min read".to_string(),
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_post_round_trip() {
        let store = MemoryStore::new();
        let post = sample_post(Uuid::new_v4());
        let id = post.id;

        store.insert(post).await.unwrap();
        let mut loaded: Post = store.find_by_id(id).await.unwrap().unwrap();

        loaded.like();
        store.update(loaded).await.unwrap();

        let reloaded: Post = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(reloaded.likes, 1);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let store = MemoryStore::new();

        let err = store.update(sample_post(Uuid::new_v4())).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_list_recent_resolves_authors_newest_first() {
        let store = MemoryStore::new();
        let user = User::new("editor".to_string(), "hash".to_string());
        let user_id = user.id;
        store.insert(user).await.unwrap();

        let mut older = sample_post(user_id);
        older.created_at = older.created_at - chrono::TimeDelta::hours(1);
        let newer = sample_post(user_id);
        let newer_id = newer.id;
        store.insert(older).await.unwrap();
        store.insert(newer).await.unwrap();

        let listed = PostRepository::list_recent(&store).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].0.id, newer_id);
        assert_eq!(listed[0].1.as_ref().unwrap().username, "editor");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        store
            .insert(User::new("editor".to_string(), "h1".to_string()))
            .await
            .unwrap();

        let err = store
            .insert(User::new("editor".to_string(), "h2".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }
}
