use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A piece of evidence a category demands from campaigns before review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequirement {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_required: bool,
    pub order_index: Option<i32>,
}

/// Input model for creating a category requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategoryRequirement {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_required: bool,
    pub order_index: Option<i32>,
}

impl NewCategoryRequirement {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }
}

/// A campaign's saved answer to a category requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementResponse {
    pub id: i64,
    pub campaign_id: i64,
    pub requirement_id: i64,
    pub value: Option<String>,
    /// Opaque reference to an uploaded file; file handling lives outside
    /// this crate.
    pub file_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RequirementResponse {
    /// A response counts once it carries a non-empty value or file.
    pub fn is_present(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.trim().is_empty())
            || self
                .file_url
                .as_deref()
                .is_some_and(|v| !v.trim().is_empty())
    }
}

/// Input model for saving or replacing a campaign's response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseUpsert {
    pub requirement_id: i64,
    pub value: Option<String>,
    pub file_url: Option<String>,
}

/// Names of required requirements that have no present response yet.
pub fn missing_required(
    requirements: &[CategoryRequirement],
    responses: &[RequirementResponse],
) -> Vec<String> {
    requirements
        .iter()
        .filter(|requirement| requirement.is_required)
        .filter(|requirement| {
            !responses
                .iter()
                .any(|response| response.requirement_id == requirement.id && response.is_present())
        })
        .map(|requirement| requirement.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn requirement(id: i64, name: &str, is_required: bool) -> CategoryRequirement {
        CategoryRequirement {
            id,
            category_id: 1,
            name: name.to_string(),
            description: None,
            is_required,
            order_index: None,
        }
    }

    fn response(requirement_id: i64, value: Option<&str>, file_url: Option<&str>) -> RequirementResponse {
        let now = Utc::now().naive_utc();
        RequirementResponse {
            id: 1,
            campaign_id: 9,
            requirement_id,
            value: value.map(str::to_string),
            file_url: file_url.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_missing_required_reports_unanswered() {
        let requirements = vec![
            requirement(1, "Business plan", true),
            requirement(2, "Budget", true),
            requirement(3, "Video pitch", false),
        ];
        let responses = vec![response(1, Some("plan attached"), None)];
        assert_eq!(missing_required(&requirements, &responses), vec!["Budget"]);
    }

    #[test]
    fn test_blank_response_does_not_count() {
        let requirements = vec![requirement(1, "Business plan", true)];
        let responses = vec![response(1, Some("   "), None)];
        assert_eq!(
            missing_required(&requirements, &responses),
            vec!["Business plan"]
        );
    }

    #[test]
    fn test_file_reference_counts_as_present() {
        let requirements = vec![requirement(1, "Permit scan", true)];
        let responses = vec![response(1, None, Some("uploads/permit.pdf"))];
        assert!(missing_required(&requirements, &responses).is_empty());
    }

    #[test]
    fn test_optional_requirements_never_block() {
        let requirements = vec![requirement(3, "Video pitch", false)];
        assert!(missing_required(&requirements, &[]).is_empty());
    }
}
