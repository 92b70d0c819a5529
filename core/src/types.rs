//! Domain DTOs for the esa API.
//!
//! # Design
//! Every record is decoded leniently: a field missing from the JSON (or sent
//! as `null`) becomes its zero value instead of failing the whole response.
//! Timestamps stay as the server's text; nothing here parses them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as `T::default()`.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Opaque pagination pointer as returned in `prev_page` / `next_page`.
///
/// The service currently sends page numbers, but the value is never
/// inspected; it is only handed back as the `page` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(serde_json::Value);

impl PageCursor {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// A team the access token can see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub privacy: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

/// One page of `GET /v1/teams`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamPage {
    #[serde(deserialize_with = "nullable")]
    pub teams: Vec<Team>,
    pub prev_page: Option<PageCursor>,
    pub next_page: Option<PageCursor>,
    #[serde(deserialize_with = "nullable")]
    pub total_count: u64,
}

impl TeamPage {
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Author or last editor of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub screen_name: String,
}

/// A post (article) as returned by the read endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    /// Team-scoped sequence number.
    #[serde(deserialize_with = "nullable")]
    pub number: u64,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    /// Slash-separated category path; empty when uncategorized.
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    #[serde(deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,

    #[serde(deserialize_with = "nullable")]
    pub body_md: String,
    #[serde(deserialize_with = "nullable")]
    pub body_html: String,
    #[serde(deserialize_with = "nullable")]
    pub message: String,

    #[serde(deserialize_with = "nullable")]
    pub created_by: User,
    #[serde(deserialize_with = "nullable")]
    pub updated_by: User,
    #[serde(deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(deserialize_with = "nullable")]
    pub updated_at: String,

    #[serde(deserialize_with = "nullable")]
    pub wip: bool,
    #[serde(deserialize_with = "nullable")]
    pub star: bool,
    #[serde(deserialize_with = "nullable")]
    pub watch: bool,
    #[serde(deserialize_with = "nullable")]
    pub overlapped: bool,

    #[serde(deserialize_with = "nullable")]
    pub comments_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub tasks_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub done_tasks_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub stargazers_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub watchers_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub revision_number: u64,

    /// Tags in server order; duplicates are kept as sent.
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

/// One page of `GET /v1/teams/{team}/posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPage {
    #[serde(deserialize_with = "nullable")]
    pub posts: Vec<Post>,
    pub prev_page: Option<PageCursor>,
    pub next_page: Option<PageCursor>,
    #[serde(deserialize_with = "nullable")]
    pub total_count: u64,
}

impl PostPage {
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}
