use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// The fixed set of article categories.
///
/// Categories double as the source of the fallback illustration shown when a
/// post was published without an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Design,
    Lifestyle,
    Business,
    Travel,
    Food,
    #[serde(rename = "Personal Growth")]
    PersonalGrowth,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Technology,
        Category::Design,
        Category::Lifestyle,
        Category::Business,
        Category::Travel,
        Category::Food,
        Category::PersonalGrowth,
    ];

    /// Static asset path rendered when a post carries no uploaded image.
    pub fn fallback_image(&self) -> &'static str {
        match self {
            Category::Technology => "/static/fallback/technology.svg",
            Category::Design => "/static/fallback/design.svg",
            Category::Lifestyle => "/static/fallback/lifestyle.svg",
            Category::Business => "/static/fallback/business.svg",
            Category::Travel => "/static/fallback/travel.svg",
            Category::Food => "/static/fallback/food.svg",
            Category::PersonalGrowth => "/static/fallback/personal-growth.svg",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Design => "Design",
            Category::Lifestyle => "Lifestyle",
            Category::Business => "Business",
            Category::Travel => "Travel",
            Category::Food => "Food",
            Category::PersonalGrowth => "Personal Growth",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown category: {s}")))
    }
}

/// A visitor comment attached to a post. Append-only, no edit or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// The editable fields of a post, as submitted through the editor.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub read_time: String,
}

/// Post entity - a published article with content, metadata, optional image,
/// likes and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub read_time: String,
    pub image_url: Option<String>,
    pub likes: i32,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post authored by the given user.
    pub fn new(author_id: Uuid, draft: PostDraft, image_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            category: draft.category,
            read_time: draft.read_time,
            image_url,
            likes: 0,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite all editable fields. The editor always submits the full
    /// field set, so there are no partial-patch semantics.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.excerpt = draft.excerpt;
        self.content = draft.content;
        self.category = draft.category;
        self.read_time = draft.read_time;
        self.updated_at = Utc::now();
    }

    pub fn like(&mut self) -> i32 {
        self.likes += 1;
        self.likes
    }

    /// Decrement the like counter, floored at zero.
    pub fn unlike(&mut self) -> i32 {
        self.likes = (self.likes - 1).max(0);
        self.likes
    }

    /// Append a comment and return the full updated sequence.
    pub fn add_comment(&mut self, name: String, comment: String) -> &[Comment] {
        self.comments.push(Comment {
            name,
            comment,
            created_at: Utc::now(),
        });
        &self.comments
    }

    /// The image shown for this post: the uploaded one, or the category
    /// fallback when none was uploaded.
    pub fn display_image(&self) -> &str {
        self.image_url
            .as_deref()
            .unwrap_or_else(|| self.category.fallback_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "T".to_string(),
            excerpt: "E".to_string(),
            content: "C".to_string(),
            category: Category::Design,
            read_time: "3 min read".to_string(),
        }
    }

    #[test]
    fn test_new_post_defaults() {
        let post = Post::new(Uuid::new_v4(), draft(), None);

        assert_eq!(post.likes, 0);
        assert!(post.comments.is_empty());
        assert!(post.image_url.is_none());
    }

    #[test]
    fn test_unlike_never_goes_negative() {
        let mut post = Post::new(Uuid::new_v4(), draft(), None);

        for _ in 0..5 {
            post.unlike();
        }

        assert_eq!(post.likes, 0);
    }

    #[test]
    fn test_like_then_unlike_restores_count() {
        let mut post = Post::new(Uuid::new_v4(), draft(), None);
        post.likes = 7;

        post.like();
        post.unlike();

        assert_eq!(post.likes, 7);
    }

    #[test]
    fn test_display_image_falls_back_to_category() {
        let post = Post::new(Uuid::new_v4(), draft(), None);
        assert_eq!(post.display_image(), "/static/fallback/design.svg");

        let with_image = Post::new(
            Uuid::new_v4(),
            draft(),
            Some("/uploads/post-1.jpg".to_string()),
        );
        assert_eq!(with_image.display_image(), "/uploads/post-1.jpg");
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("Gardening".parse::<Category>().is_err());
    }

    #[test]
    fn test_add_comment_appends_in_order() {
        let mut post = Post::new(Uuid::new_v4(), draft(), None);

        post.add_comment("Ana".to_string(), "First!".to_string());
        let comments = post.add_comment("Ben".to_string(), "Second".to_string());

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].name, "Ana");
        assert_eq!(comments[1].name, "Ben");
    }
}
