use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact entity - a visitor-submitted message with a read/unread flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Create a new, unread contact submission.
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            message,
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_contact_is_unread() {
        let contact = Contact::new(
            "Ana".to_string(),
            "a@x.com".to_string(),
            "Hi".to_string(),
        );

        assert!(!contact.read);
    }
}
