//! Database models for category requirements and campaign responses.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fundlift_core::requirements::{
    CategoryRequirement, NewCategoryRequirement, RequirementResponse,
};

/// Database model for category requirements.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::category_requirements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryRequirementDB {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_required: bool,
    pub order_index: Option<i32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::category_requirements)]
pub struct NewCategoryRequirementDB {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_required: bool,
    pub order_index: Option<i32>,
}

impl From<NewCategoryRequirement> for NewCategoryRequirementDB {
    fn from(domain: NewCategoryRequirement) -> Self {
        Self {
            category_id: domain.category_id,
            name: domain.name,
            description: domain.description,
            is_required: domain.is_required,
            order_index: domain.order_index,
        }
    }
}

impl From<CategoryRequirementDB> for CategoryRequirement {
    fn from(db: CategoryRequirementDB) -> Self {
        Self {
            id: db.id,
            category_id: db.category_id,
            name: db.name,
            description: db.description,
            is_required: db.is_required,
            order_index: db.order_index,
        }
    }
}

/// Database model for requirement responses.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::requirement_responses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RequirementResponseDB {
    pub id: i64,
    pub campaign_id: i64,
    pub requirement_id: i64,
    pub value: Option<String>,
    pub file_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::requirement_responses)]
pub struct NewRequirementResponseDB {
    pub campaign_id: i64,
    pub requirement_id: i64,
    pub value: Option<String>,
    pub file_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<RequirementResponseDB> for RequirementResponse {
    fn from(db: RequirementResponseDB) -> Self {
        Self {
            id: db.id,
            campaign_id: db.campaign_id,
            requirement_id: db.requirement_id,
            value: db.value,
            file_url: db.file_url,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
