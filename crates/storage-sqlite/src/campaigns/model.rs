//! Database models for campaigns, observations and favorites.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fundlift_core::campaigns::{Campaign, CampaignObservation, NewCampaign, NewObservation};
use fundlift_core::errors::Error;

use crate::utils::{decimal_from_db, decimal_to_db};

/// Database model for campaigns.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::campaigns)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CampaignDB {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub goal_amount: f64,
    pub current_amount: f64,
    pub expiration_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub main_image_url: Option<String>,
    pub rich_text: Option<String>,
    pub view_counting: i32,
    pub favorites_counting: i32,
    pub workflow_state: String,
    pub campaign_state: String,
    pub owner_id: i64,
    pub category_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for inserting a campaign.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct NewCampaignDB {
    pub title: String,
    pub description: String,
    pub goal_amount: f64,
    pub current_amount: f64,
    pub expiration_date: Option<NaiveDate>,
    pub main_image_url: Option<String>,
    pub rich_text: Option<String>,
    pub view_counting: i32,
    pub favorites_counting: i32,
    pub workflow_state: String,
    pub campaign_state: String,
    pub owner_id: i64,
    pub category_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewCampaignDB {
    pub fn from_domain(owner_id: i64, domain: NewCampaign, now: NaiveDateTime) -> Self {
        Self {
            title: domain.title,
            description: domain.description,
            goal_amount: decimal_to_db(domain.goal_amount.round_dp(2)),
            current_amount: 0.0,
            expiration_date: domain.expiration_date,
            main_image_url: domain.main_image_url,
            rich_text: domain.rich_text,
            view_counting: 0,
            favorites_counting: 0,
            workflow_state: fundlift_core::states::WorkflowState::Draft.as_str().to_string(),
            campaign_state: fundlift_core::states::CampaignState::NotStarted.as_str().to_string(),
            owner_id,
            category_id: domain.category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<CampaignDB> for Campaign {
    type Error = Error;

    fn try_from(db: CampaignDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            title: db.title,
            description: db.description,
            goal_amount: decimal_from_db(db.goal_amount),
            current_amount: decimal_from_db(db.current_amount),
            expiration_date: db.expiration_date,
            start_date: db.start_date,
            end_date: db.end_date,
            main_image_url: db.main_image_url,
            rich_text: db.rich_text,
            view_counting: db.view_counting,
            favorites_counting: db.favorites_counting,
            workflow_state: db.workflow_state.parse()?,
            campaign_state: db.campaign_state.parse()?,
            owner_id: db.owner_id,
            category_id: db.category_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&Campaign> for CampaignDB {
    fn from(domain: &Campaign) -> Self {
        Self {
            id: domain.id,
            title: domain.title.clone(),
            description: domain.description.clone(),
            goal_amount: decimal_to_db(domain.goal_amount),
            current_amount: decimal_to_db(domain.current_amount),
            expiration_date: domain.expiration_date,
            start_date: domain.start_date,
            end_date: domain.end_date,
            main_image_url: domain.main_image_url.clone(),
            rich_text: domain.rich_text.clone(),
            view_counting: domain.view_counting,
            favorites_counting: domain.favorites_counting,
            workflow_state: domain.workflow_state.as_str().to_string(),
            campaign_state: domain.campaign_state.as_str().to_string(),
            owner_id: domain.owner_id,
            category_id: domain.category_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

/// Database model for campaign observations.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::campaign_observations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CampaignObservationDB {
    pub id: i64,
    pub campaign_id: i64,
    pub admin_id: i64,
    pub action: String,
    pub rationale: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::campaign_observations)]
pub struct NewCampaignObservationDB {
    pub campaign_id: i64,
    pub admin_id: i64,
    pub action: String,
    pub rationale: String,
    pub created_at: NaiveDateTime,
}

impl NewCampaignObservationDB {
    pub fn from_domain(domain: NewObservation, now: NaiveDateTime) -> Self {
        Self {
            campaign_id: domain.campaign_id,
            admin_id: domain.admin_id,
            action: domain.action.as_str().to_string(),
            rationale: domain.rationale,
            created_at: now,
        }
    }
}

impl TryFrom<CampaignObservationDB> for CampaignObservation {
    type Error = Error;

    fn try_from(db: CampaignObservationDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            campaign_id: db.campaign_id,
            admin_id: db.admin_id,
            action: db.action.parse()?,
            rationale: db.rationale,
            created_at: db.created_at,
        })
    }
}

/// Database model for inserting a favorite mark.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavoriteDB {
    pub user_id: i64,
    pub campaign_id: i64,
    pub created_at: NaiveDateTime,
}
