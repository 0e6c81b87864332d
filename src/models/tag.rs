use super::PostSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagWithPosts {
    #[serde(flatten)]
    pub tag: Tag,
    pub posts: Vec<PostSummary>,
}

impl TagWithPosts {
    pub fn post_ids(&self) -> Vec<i64> {
        self.posts.iter().map(|p| p.id).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveTag {
    pub name: String,
    #[serde(default)]
    pub post_ids: Vec<i64>,
}
