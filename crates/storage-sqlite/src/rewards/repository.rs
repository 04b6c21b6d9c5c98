use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use fundlift_core::errors::{Error, Result};
use fundlift_core::rewards::{
    evaluate_claim, NewReward, Reward, RewardClaim, RewardError, RewardRepositoryTrait,
    RewardUpdate,
};
use fundlift_core::states::DonationState;

use super::model::{NewRewardClaimDB, NewRewardDB, RewardClaimDB, RewardDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{donations, reward_claims, rewards};
use crate::utils::decimal_from_db;

pub struct RewardRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RewardRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RewardRepository { pool, writer }
    }
}

fn load_reward(conn: &mut SqliteConnection, reward_id: i64) -> Result<Reward> {
    Ok(rewards::table
        .find(reward_id)
        .first::<RewardDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::Reward(RewardError::NotFound(reward_id)))?
        .into())
}

#[async_trait]
impl RewardRepositoryTrait for RewardRepository {
    fn get_by_id(&self, reward_id: i64) -> Result<Reward> {
        let mut conn = get_connection(&self.pool)?;
        load_reward(&mut conn, reward_id)
    }

    fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<Reward>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(rewards::table
            .filter(rewards::campaign_id.eq(campaign_id))
            .order(rewards::amount.asc())
            .load::<RewardDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Reward::from)
            .collect())
    }

    fn list_claims_by_user(&self, user_id: i64) -> Result<Vec<RewardClaim>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(reward_claims::table
            .filter(reward_claims::user_id.eq(user_id))
            .order(reward_claims::claimed_at.desc())
            .load::<RewardClaimDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(RewardClaim::from)
            .collect())
    }

    async fn insert(&self, new_reward: NewReward) -> Result<Reward> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reward> {
                let now = Utc::now().naive_utc();
                let result_db: RewardDB = diesel::insert_into(rewards::table)
                    .values(NewRewardDB::from_domain(new_reward, now))
                    .returning(RewardDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(result_db.into())
            })
            .await
    }

    async fn update(&self, reward_id: i64, update: RewardUpdate) -> Result<Reward> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reward> {
                let mut reward = load_reward(conn, reward_id)?;
                update.apply_to(&mut reward);
                let db: RewardDB = (&reward).into();
                diesel::update(rewards::table.find(reward_id))
                    .set(&db)
                    .execute(conn)
                    .into_core()?;
                Ok(reward)
            })
            .await
    }

    async fn delete(&self, reward_id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(rewards::table.find(reward_id))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(RewardError::NotFound(reward_id).into());
                }
                Ok(())
            })
            .await
    }

    /// Authorizes and applies a claim in one transaction. The duplicate
    /// check, the live eligibility aggregate, the stock check and the stock
    /// decrement all see the same serialized snapshot, so two racing claims
    /// on a stock of one cannot both succeed.
    async fn claim(&self, user_id: i64, reward_id: i64, campaign_id: i64) -> Result<RewardClaim> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RewardClaim> {
                let reward = load_reward(conn, reward_id)?;

                let already_claimed: i64 = reward_claims::table
                    .filter(reward_claims::user_id.eq(user_id))
                    .filter(reward_claims::reward_id.eq(reward_id))
                    .count()
                    .get_result(conn)
                    .into_core()?;

                let eligible_total: Option<f64> = donations::table
                    .filter(donations::campaign_id.eq(campaign_id))
                    .filter(donations::donor_id.eq(user_id))
                    .filter(donations::state.eq(DonationState::Completed.as_str()))
                    .select(sum(donations::amount))
                    .first(conn)
                    .into_core()?;

                evaluate_claim(
                    &reward,
                    campaign_id,
                    already_claimed > 0,
                    decimal_from_db(eligible_total.unwrap_or(0.0)),
                )
                .map_err(Error::Reward)?;

                let claim_db: RewardClaimDB = diesel::insert_into(reward_claims::table)
                    .values(NewRewardClaimDB {
                        user_id,
                        reward_id,
                        campaign_id,
                        claimed_at: Utc::now().naive_utc(),
                    })
                    .returning(RewardClaimDB::as_returning())
                    .get_result(conn)
                    .into_core()?;

                if let Some(stock) = reward.stock {
                    // Safe to write the computed value: the claim transaction
                    // is serialized by the single writer.
                    diesel::update(rewards::table.find(reward_id))
                        .set(rewards::stock.eq(Some(stock - 1)))
                        .execute(conn)
                        .into_core()?;
                }

                debug!("reward {} claimed by user {}", reward_id, user_id);
                Ok(claim_db.into())
            })
            .await
    }
}
