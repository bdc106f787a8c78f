//! Data Transfer Objects - request/response types for the API.
//!
//! All bodies use camelCase field names on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gazette_core::domain::{Author, Comment, Contact, Post};

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request to register a new admin credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Public view of the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Response containing a bearer token and the user it identifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

/// A single comment on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            name: comment.name,
            comment: comment.comment,
            created_at: comment.created_at,
        }
    }
}

/// Author reference embedded in a post response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
}

/// A post on the wire, author resolved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub read_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorResponse>,
    pub likes: i32,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn from_post(post: Post, author: Option<Author>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            category: post.category.to_string(),
            read_time: post.read_time,
            image_url: post.image_url,
            author: author.map(|a| AuthorResponse {
                id: a.id,
                username: a.username,
            }),
            likes: post.likes,
            comments: post.comments.into_iter().map(Into::into).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Request to append a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub name: String,
    pub comment: String,
}

/// Response carrying the updated like counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesResponse {
    pub likes: i32,
}

/// Response carrying a post's full comment sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentResponse>,
}

/// Request to submit a contact message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A contact submission on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            message: contact.message,
            read: contact.read,
            created_at: contact.created_at,
        }
    }
}

/// Plain acknowledgement body for deletes and the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_core::domain::{Category, PostDraft};

    #[test]
    fn test_post_response_uses_camel_case() {
        let post = Post::new(
            Uuid::new_v4(),
            PostDraft {
                title: "T".to_string(),
                excerpt: "E".to_string(),
                content: "C".to_string(),
                category: Category::PersonalGrowth,
                read_time: "3 min read".to_string(),
            },
            None,
        );

        let json = serde_json::to_value(PostResponse::from_post(post, None)).unwrap();

        assert_eq!(json["category"], "Personal Growth");
        assert_eq!(json["readTime"], "3 min read");
        assert!(json.get("createdAt").is_some());
        // Absent image and author are omitted, not null.
        assert!(json.get("imageUrl").is_none());
        assert!(json.get("author").is_none());
    }
}
