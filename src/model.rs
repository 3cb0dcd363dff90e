//! Canonical records
//!
//! Field names and types are the JSON schema consumers rely on. Every record
//! is built fresh per operation and dropped once serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// License assumed when a page exposes none
pub const DEFAULT_LICENSE: &str = "CC BY-SA 4.0";

/// Display name used for an owner whose account no longer exists
pub const MISSING_OWNER_NAME: &str = "User does not exist";

/// Classification of a post owner's account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Registered,
    Moderator,
    NewContributor,
    Unregistered,
    DoesNotExist,
}

/// Owner of a question or answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub user_id: Option<u64>,
    pub account_id: Option<u64>,
    pub user_type: UserType,
    pub display_name: String,
    pub profile_image: Option<String>,
    pub link: Option<String>,
    /// Non-negative integer, string-encoded
    pub reputation: String,
}

impl Owner {
    /// Owner for a post with no owner block at all
    pub fn does_not_exist() -> Self {
        Self {
            user_id: None,
            account_id: None,
            user_type: UserType::DoesNotExist,
            display_name: MISSING_OWNER_NAME.to_string(),
            profile_image: None,
            link: None,
            reputation: "0".to_string(),
        }
    }
}

/// A question with lifecycle dates and stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Null only when the listing row had no usable link
    pub question_id: Option<u64>,
    pub title: Option<String>,
    pub link: Option<String>,
    /// Source order, duplicates preserved
    pub tags: Vec<String>,
    pub owner: Owner,
    pub creation_date: Option<DateTime<Utc>>,
    pub last_edit_date: Option<DateTime<Utc>>,
    pub closed_date: Option<DateTime<Utc>>,
    pub locked_date: Option<DateTime<Utc>>,
    pub last_activity_date: Option<DateTime<Utc>>,
    pub content_license: String,
    pub score: i64,
    pub answer_count: u64,
    pub view_count: u64,
    pub is_answered: bool,
    pub accepted_answer_id: Option<u64>,
    pub has_accepted_answer: bool,
}

/// One answer to a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer_id: Option<u64>,
    pub score: i64,
    pub is_accepted: bool,
    pub creation_date: Option<DateTime<Utc>>,
    pub last_activity_date: Option<DateTime<Utc>>,
    pub owner: Owner,
}

/// Every answer on a question page plus the question's license
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerThread {
    pub question_id: u64,
    pub content_license: String,
    pub answers: Vec<Answer>,
}

/// Kind of a collective's external link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Website,
    Support,
    Twitter,
    Github,
    Facebook,
    Instagram,
}

impl LinkType {
    /// Order in which the collective page's external-link dropdown lists entries
    pub const VOCABULARY: [LinkType; 6] = [
        LinkType::Website,
        LinkType::Support,
        LinkType::Twitter,
        LinkType::Github,
        LinkType::Facebook,
        LinkType::Instagram,
    ];
}

/// External link advertised by a collective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    #[serde(rename = "type")]
    pub kind: LinkType,
    pub link: String,
}

/// A collective with its tags and external links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collective {
    pub name: String,
    pub link: String,
    pub description: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub external_links: Vec<ExternalLink>,
}
