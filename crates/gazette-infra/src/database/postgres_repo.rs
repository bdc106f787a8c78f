//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use gazette_core::domain::{Author, Contact, Post, User};
use gazette_core::error::RepoError;
use gazette_core::ports::{ContactRepository, PostRepository, UserRepository};

use super::entity::contact::{self, Entity as ContactEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL contact repository.
pub type PostgresContactRepository = PostgresBaseRepository<ContactEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

fn author_of(model: user::Model) -> Author {
    Author {
        id: model.id,
        username: model.username,
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_recent(&self) -> Result<Vec<(Post, Option<Author>)>, RepoError> {
        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(post, author)| (post.into(), author.map(author_of)))
            .collect())
    }

    async fn find_with_author(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Option<Author>)>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(row.map(|(post, author)| (post.into(), author.map(author_of))))
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn list_recent(&self) -> Result<Vec<Contact>, RepoError> {
        let rows = ContactEntity::find()
            .order_by_desc(contact::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}
