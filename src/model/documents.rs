// src/model/documents.rs
//! Decoded document records for each content kind.
//!
//! These are the shapes the serving layer reads back from the emitted
//! JSON metadata files, so serialization uses camelCase field names and
//! omits absent optionals.

use crate::types::PageId;
use serde::{Deserialize, Serialize};

/// An inclusive date range from a Notion date property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Project lifecycle status, mapped from the source's select labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "maintenance")]
    Maintenance,
}

impl ProjectStatus {
    /// Map the select labels used in the source workspace.
    pub fn from_select_label(label: &str) -> Option<Self> {
        match label {
            "진행중" => Some(Self::InProgress),
            "완료" => Some(Self::Completed),
            "유지보수" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

/// A blog article, with a rendered MDX body stored beside the metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_project: Option<String>,
    /// Derived during sync from the rendered body; absent until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
}

/// A portfolio project — metadata only, no rendered body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<DateRange>,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    pub tech_stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
    pub related_posts: Vec<String>,
}

/// A curated external link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: PageId,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_status_maps_source_labels() {
        assert_eq!(
            ProjectStatus::from_select_label("진행중"),
            Some(ProjectStatus::InProgress)
        );
        assert_eq!(
            ProjectStatus::from_select_label("완료"),
            Some(ProjectStatus::Completed)
        );
        assert_eq!(
            ProjectStatus::from_select_label("유지보수"),
            Some(ProjectStatus::Maintenance)
        );
        assert_eq!(ProjectStatus::from_select_label("paused"), None);
    }

    #[test]
    fn article_serializes_camel_case_and_omits_absent_optionals() {
        let article = Article {
            id: PageId::parse("12345678123412341234123456789abc").unwrap(),
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            excerpt: String::new(),
            tags: vec!["rust".to_string()],
            thumbnail: None,
            published: true,
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            updated_at: "2025-01-02T00:00:00.000Z".to_string(),
            related_project: None,
            reading_time: Some(3),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00.000Z");
        assert_eq!(json["readingTime"], 3);
        assert!(json.get("thumbnail").is_none());
        assert!(json.get("relatedProject").is_none());
    }
}
