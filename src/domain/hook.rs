use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel a generated hook is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookType {
    Social,
    Email,
    Video,
    Ad,
    Blog,
}

impl HookType {
    pub fn label(self) -> &'static str {
        match self {
            HookType::Social => "social",
            HookType::Email => "email",
            HookType::Video => "video",
            HookType::Ad => "ad",
            HookType::Blog => "blog",
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated marketing-copy variant for a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    pub id: String,
    pub content_id: String,
    #[serde(rename = "type")]
    pub hook_type: HookType,
    pub text: String,
    /// Length of `text` when the hook was created. Not kept in sync if the
    /// text changes afterwards.
    pub character_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Hook {
    pub fn new(id: &str, content_id: &str, hook_type: HookType, text: &str) -> Self {
        Self {
            id: id.to_string(),
            content_id: content_id.to_string(),
            hook_type,
            text: text.to_string(),
            character_count: text.chars().count(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_count_counts_chars_not_bytes() {
        let hook = Hook::new("h1", "1", HookType::Social, "🛑 STOP!");
        assert_eq!(hook.character_count, 7);
        assert!(hook.text.len() > hook.character_count);
    }

    #[test]
    fn test_character_count_is_not_rederived() {
        let mut hook = Hook::new("h1", "1", HookType::Email, "Subject: hi");
        hook.text.push_str(" there");
        assert_eq!(hook.character_count, 11);
    }

    #[test]
    fn test_serializes_type_field() {
        let hook = Hook::new("h2", "1", HookType::Video, "Watch this");
        let json = serde_json::to_value(&hook).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["contentId"], "1");
        assert_eq!(json["characterCount"], 10);
    }
}
