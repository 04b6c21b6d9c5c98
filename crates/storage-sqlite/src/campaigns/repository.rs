use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use fundlift_core::campaigns::{
    Campaign, CampaignError, CampaignFilter, CampaignObservation, CampaignRepositoryTrait,
    CampaignUpdate, FundraisingAction, NewCampaign, RefundedDonation, SweepOutcome, WorkflowAction,
};
use fundlift_core::errors::{Error, Result};
use fundlift_core::states::{CampaignState, DonationState, WorkflowState};

use super::model::{
    CampaignDB, CampaignObservationDB, NewCampaignDB, NewCampaignObservationDB, NewFavoriteDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{campaign_observations, campaigns, donations, favorites};
use crate::utils::decimal_from_db;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

pub struct CampaignRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CampaignRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CampaignRepository { pool, writer }
    }
}

/// Loads a campaign into its domain form, surfacing a typed not-found.
/// Shared with the other repositories that join against campaigns.
pub(crate) fn load_campaign(conn: &mut SqliteConnection, campaign_id: i64) -> Result<Campaign> {
    campaigns::table
        .find(campaign_id)
        .first::<CampaignDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::Campaign(CampaignError::NotFound(campaign_id)))?
        .try_into()
}

/// Persists the campaign's current domain state over its row.
pub(crate) fn save_campaign(conn: &mut SqliteConnection, campaign: &Campaign) -> Result<()> {
    let db: CampaignDB = campaign.into();
    diesel::update(campaigns::table.find(campaign.id))
        .set(&db)
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl CampaignRepositoryTrait for CampaignRepository {
    fn get_by_id(&self, campaign_id: i64) -> Result<Campaign> {
        let mut conn = get_connection(&self.pool)?;
        load_campaign(&mut conn, campaign_id)
    }

    fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Campaign>> {
        let mut conn = get_connection(&self.pool)?;
        campaigns::table
            .filter(campaigns::owner_id.eq(owner_id))
            .order(campaigns::created_at.desc())
            .load::<CampaignDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Campaign::try_from)
            .collect()
    }

    fn list_public(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = campaigns::table
            .filter(campaigns::workflow_state.eq(WorkflowState::Published.as_str()))
            .filter(campaigns::campaign_state.eq(CampaignState::InProgress.as_str()))
            .into_boxed();

        if let Some(category_id) = filter.category_id {
            query = query.filter(campaigns::category_id.eq(category_id));
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                campaigns::title
                    .like(pattern.clone())
                    .or(campaigns::description.like(pattern)),
            );
        }

        let limit = filter
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = filter.offset.unwrap_or(0).max(0);

        query
            .order(campaigns::created_at.desc())
            .limit(limit)
            .offset(offset)
            .load::<CampaignDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Campaign::try_from)
            .collect()
    }

    fn list_by_workflow_state(&self, state: Option<WorkflowState>) -> Result<Vec<Campaign>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = campaigns::table.into_boxed();
        if let Some(state) = state {
            query = query.filter(campaigns::workflow_state.eq(state.as_str()));
        }

        query
            .order(campaigns::created_at.desc())
            .load::<CampaignDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Campaign::try_from)
            .collect()
    }

    fn list_expired_in_progress(&self, today: NaiveDate) -> Result<Vec<i64>> {
        let mut conn = get_connection(&self.pool)?;
        campaigns::table
            .filter(campaigns::campaign_state.eq(CampaignState::InProgress.as_str()))
            .filter(campaigns::expiration_date.lt(today))
            .select(campaigns::id)
            .load::<i64>(&mut conn)
            .into_core()
    }

    fn list_observations(&self, campaign_id: i64) -> Result<Vec<CampaignObservation>> {
        let mut conn = get_connection(&self.pool)?;
        campaign_observations::table
            .filter(campaign_observations::campaign_id.eq(campaign_id))
            .order(campaign_observations::created_at.desc())
            .load::<CampaignObservationDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(CampaignObservation::try_from)
            .collect()
    }

    fn list_favorites(&self, user_id: i64) -> Result<Vec<Campaign>> {
        let mut conn = get_connection(&self.pool)?;
        favorites::table
            .inner_join(campaigns::table.on(campaigns::id.eq(favorites::campaign_id)))
            .filter(favorites::user_id.eq(user_id))
            .order(favorites::created_at.desc())
            .select(CampaignDB::as_select())
            .load::<CampaignDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Campaign::try_from)
            .collect()
    }

    async fn insert(&self, owner_id: i64, new_campaign: NewCampaign) -> Result<Campaign> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let now = Utc::now().naive_utc();
                let new_db = NewCampaignDB::from_domain(owner_id, new_campaign, now);
                let result_db: CampaignDB = diesel::insert_into(campaigns::table)
                    .values(&new_db)
                    .returning(CampaignDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                result_db.try_into()
            })
            .await
    }

    async fn update_content(&self, campaign_id: i64, update: CampaignUpdate) -> Result<Campaign> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let mut campaign = load_campaign(conn, campaign_id)?;
                // Re-checked here so a concurrent submit cannot slip an edit
                // into a campaign that just left an editable state.
                if !campaign.workflow_state.is_editable() {
                    return Err(CampaignError::NotEditable(campaign.workflow_state).into());
                }
                campaign.apply_update(update);
                campaign.updated_at = Utc::now().naive_utc();
                save_campaign(conn, &campaign)?;
                Ok(campaign)
            })
            .await
    }

    async fn delete(&self, campaign_id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let campaign = load_campaign(conn, campaign_id)?;
                if campaign.workflow_state != WorkflowState::Draft {
                    return Err(CampaignError::NotDeletable(campaign.workflow_state).into());
                }
                diesel::delete(campaigns::table.find(campaign_id))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn record_view(&self, campaign_id: i64) -> Result<Campaign> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let updated = diesel::update(campaigns::table.find(campaign_id))
                    .set(campaigns::view_counting.eq(campaigns::view_counting + 1))
                    .returning(CampaignDB::as_returning())
                    .get_result::<CampaignDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::Campaign(CampaignError::NotFound(campaign_id)))?;
                updated.try_into()
            })
            .await
    }

    async fn apply_workflow(&self, campaign_id: i64, action: WorkflowAction) -> Result<Campaign> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let mut campaign = load_campaign(conn, campaign_id)?;
                let observation = campaign.apply_workflow(action).map_err(Error::Campaign)?;
                let now = Utc::now().naive_utc();
                campaign.updated_at = now;
                save_campaign(conn, &campaign)?;
                if let Some(observation) = observation {
                    diesel::insert_into(campaign_observations::table)
                        .values(NewCampaignObservationDB::from_domain(observation, now))
                        .execute(conn)
                        .into_core()?;
                }
                debug!(
                    "campaign {} workflow -> {}",
                    campaign_id, campaign.workflow_state
                );
                Ok(campaign)
            })
            .await
    }

    async fn apply_fundraising(
        &self,
        campaign_id: i64,
        action: FundraisingAction,
        today: NaiveDate,
    ) -> Result<Campaign> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let mut campaign = load_campaign(conn, campaign_id)?;
                campaign
                    .apply_fundraising(action, today)
                    .map_err(Error::Campaign)?;
                campaign.updated_at = Utc::now().naive_utc();
                save_campaign(conn, &campaign)?;
                Ok(campaign)
            })
            .await
    }

    async fn finish_expired(&self, campaign_id: i64, today: NaiveDate) -> Result<SweepOutcome> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SweepOutcome> {
                let mut campaign = load_campaign(conn, campaign_id)?;
                if !campaign.expire(today) {
                    // Already finished (or no longer expired): nothing to do.
                    return Ok(SweepOutcome::default());
                }
                campaign.updated_at = Utc::now().naive_utc();
                save_campaign(conn, &campaign)?;

                let refunds = if campaign.goal_reached() {
                    Vec::new()
                } else {
                    diesel::update(
                        donations::table
                            .filter(donations::campaign_id.eq(campaign_id))
                            .filter(donations::state.eq(DonationState::Completed.as_str())),
                    )
                    .set(donations::state.eq(DonationState::Refunded.as_str()))
                    .returning((donations::id, donations::donor_id, donations::amount))
                    .get_results::<(i64, i64, f64)>(conn)
                    .into_core()?
                    .into_iter()
                    .map(|(donation_id, donor_id, amount)| RefundedDonation {
                        donation_id,
                        donor_id,
                        amount: decimal_from_db(amount),
                    })
                    .collect()
                };

                Ok(SweepOutcome {
                    finished: true,
                    refunds,
                })
            })
            .await
    }

    async fn add_favorite(&self, user_id: i64, campaign_id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let existing: i64 = favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .filter(favorites::campaign_id.eq(campaign_id))
                    .count()
                    .get_result(conn)
                    .into_core()?;
                if existing > 0 {
                    return Err(CampaignError::AlreadyFavorite(campaign_id).into());
                }

                diesel::insert_into(favorites::table)
                    .values(NewFavoriteDB {
                        user_id,
                        campaign_id,
                        created_at: Utc::now().naive_utc(),
                    })
                    .execute(conn)
                    .into_core()?;
                diesel::update(campaigns::table.find(campaign_id))
                    .set(campaigns::favorites_counting.eq(campaigns::favorites_counting + 1))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn remove_favorite(&self, user_id: i64, campaign_id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(user_id))
                        .filter(favorites::campaign_id.eq(campaign_id)),
                )
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(CampaignError::NotFavorite(campaign_id).into());
                }
                diesel::update(campaigns::table.find(campaign_id))
                    .set(campaigns::favorites_counting.eq(campaigns::favorites_counting - 1))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }
}
