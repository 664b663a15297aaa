use serde::{Deserialize, Serialize};

use super::Required;
use crate::core::errors::ApiError;
use crate::core::helpers::{new_id, now_iso};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub nickname: String,
    /// Park references, compared as plain strings.
    #[serde(default)]
    pub list: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct UserInput {
    pub nickname: Option<String>,
    pub list: Option<Vec<String>>,
}

/// Body of a visit toggle: a single park reference.
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct VisitToggle {
    pub list: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Added,
    Removed,
}

impl User {
    pub fn create(input: UserInput) -> Result<User, ApiError> {
        let mut required = Required::default();
        let nickname = required.take("nickname", input.nickname);
        required.finish("User")?;

        let now = now_iso();
        Ok(User {
            id: new_id(),
            nickname,
            list: input.list.unwrap_or_default(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn has_visited(&self, park_ref: &str) -> bool {
        self.list.iter().any(|visit| visit == park_ref)
    }

    /// Flips the visited state of `park_ref`.
    ///
    /// A visited park is pulled out entirely (every occurrence), an
    /// unvisited one is appended. Two calls with the same value cancel out.
    pub fn toggle_visit(&mut self, park_ref: &str) -> Visit {
        let visit = if self.has_visited(park_ref) {
            self.list.retain(|visit| visit != park_ref);
            Visit::Removed
        } else {
            self.list.push(park_ref.to_string());
            Visit::Added
        };
        self.updated_at = now_iso();
        visit
    }
}

impl VisitToggle {
    pub fn park_ref(self) -> Result<String, ApiError> {
        match self.list {
            Some(park_ref) if !park_ref.is_empty() => Ok(park_ref),
            _ => Err(ApiError::Validation(
                "User validation failed: list: a park reference is required.".to_string(),
            )),
        }
    }
}
