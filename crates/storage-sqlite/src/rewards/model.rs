//! Database models for rewards and claims.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fundlift_core::rewards::{NewReward, Reward, RewardClaim};

use crate::utils::{decimal_from_db, decimal_to_db};

/// Database model for rewards.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::rewards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct RewardDB {
    pub id: i64,
    pub campaign_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting a reward.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::rewards)]
pub struct NewRewardDB {
    pub campaign_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewRewardDB {
    pub fn from_domain(domain: NewReward, now: NaiveDateTime) -> Self {
        Self {
            campaign_id: domain.campaign_id,
            title: domain.title,
            description: domain.description,
            amount: decimal_to_db(domain.amount.round_dp(2)),
            stock: domain.stock,
            image_url: domain.image_url,
            created_at: now,
        }
    }
}

impl From<RewardDB> for Reward {
    fn from(db: RewardDB) -> Self {
        Self {
            id: db.id,
            campaign_id: db.campaign_id,
            title: db.title,
            description: db.description,
            amount: decimal_from_db(db.amount),
            stock: db.stock,
            image_url: db.image_url,
            created_at: db.created_at,
        }
    }
}

impl From<&Reward> for RewardDB {
    fn from(domain: &Reward) -> Self {
        Self {
            id: domain.id,
            campaign_id: domain.campaign_id,
            title: domain.title.clone(),
            description: domain.description.clone(),
            amount: decimal_to_db(domain.amount),
            stock: domain.stock,
            image_url: domain.image_url.clone(),
            created_at: domain.created_at,
        }
    }
}

/// Database model for reward claims.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::reward_claims)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RewardClaimDB {
    pub id: i64,
    pub user_id: i64,
    pub reward_id: i64,
    pub campaign_id: i64,
    pub claimed_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::reward_claims)]
pub struct NewRewardClaimDB {
    pub user_id: i64,
    pub reward_id: i64,
    pub campaign_id: i64,
    pub claimed_at: NaiveDateTime,
}

impl From<RewardClaimDB> for RewardClaim {
    fn from(db: RewardClaimDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            reward_id: db.reward_id,
            campaign_id: db.campaign_id,
            claimed_at: db.claimed_at,
        }
    }
}
