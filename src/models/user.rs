use super::PostSummary;
use serde::{Deserialize, Serialize};

/// Placeholder avatar stored when a user is created without an image.
pub const DEFAULT_IMG_URL: &str = "https://images.unsplash.com/photo-1503023345310-bd7c1de61c7d?ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&ixlib=rb-1.2.1&auto=format&fit=crop&w=1665&q=80";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub img_url: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub full_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserWithPosts {
    #[serde(flatten)]
    pub user: User,
    pub full_name: String,
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub img_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub first_name: String,
    pub last_name: String,
    pub img_url: String,
}
