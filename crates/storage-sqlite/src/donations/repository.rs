use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use fundlift_core::donations::{
    apply_ledger_effect, CompletedDonation, ConfirmOutcome, Donation, DonationError,
    DonationRepositoryTrait, NewDonation, TopDonor,
};
use fundlift_core::errors::{Error, Result};
use fundlift_core::states::DonationState;

use super::model::{DonationDB, NewDonationDB};
use crate::campaigns::repository::{load_campaign, save_campaign};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::donations;
use crate::utils::decimal_from_db;

pub struct DonationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DonationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        DonationRepository { pool, writer }
    }
}

fn load_donation(conn: &mut SqliteConnection, donation_id: i64) -> Result<Donation> {
    donations::table
        .find(donation_id)
        .first::<DonationDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::Donation(DonationError::NotFound(donation_id)))?
        .try_into()
}

fn save_donation_state(conn: &mut SqliteConnection, donation: &Donation) -> Result<()> {
    diesel::update(donations::table.find(donation.id))
        .set(donations::state.eq(donation.state.as_str()))
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl DonationRepositoryTrait for DonationRepository {
    fn get_by_id(&self, donation_id: i64) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;
        load_donation(&mut conn, donation_id)
    }

    fn list_by_donor(&self, donor_id: i64) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;
        donations::table
            .filter(donations::donor_id.eq(donor_id))
            .order(donations::created_at.desc())
            .load::<DonationDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Donation::try_from)
            .collect()
    }

    fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<Donation>> {
        let mut conn = get_connection(&self.pool)?;
        donations::table
            .filter(donations::campaign_id.eq(campaign_id))
            .order(donations::amount.desc())
            .load::<DonationDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Donation::try_from)
            .collect()
    }

    fn sum_completed_for(&self, campaign_id: i64, user_id: i64) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let total: Option<f64> = donations::table
            .filter(donations::campaign_id.eq(campaign_id))
            .filter(donations::donor_id.eq(user_id))
            .filter(donations::state.eq(DonationState::Completed.as_str()))
            .select(sum(donations::amount))
            .first(&mut conn)
            .into_core()?;
        Ok(decimal_from_db(total.unwrap_or(0.0)))
    }

    fn top_donors(&self, campaign_id: i64, limit: i64) -> Result<Vec<TopDonor>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<(i64, Option<f64>)> = donations::table
            .filter(donations::campaign_id.eq(campaign_id))
            .filter(donations::state.eq(DonationState::Completed.as_str()))
            .group_by(donations::donor_id)
            .select((donations::donor_id, sum(donations::amount)))
            .load(&mut conn)
            .into_core()?;

        let mut donors: Vec<TopDonor> = rows
            .into_iter()
            .map(|(donor_id, total)| TopDonor {
                donor_id,
                total: decimal_from_db(total.unwrap_or(0.0)),
            })
            .collect();
        donors.sort_by(|a, b| b.total.cmp(&a.total));
        donors.truncate(limit.clamp(1, 100) as usize);
        Ok(donors)
    }

    async fn insert_pending(
        &self,
        donor_id: i64,
        new_donation: NewDonation,
        gateway_reference: String,
    ) -> Result<Donation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Donation> {
                // The campaign must still exist; its state was pre-checked
                // and is re-checked on settlement.
                load_campaign(conn, new_donation.campaign_id)?;
                let now = Utc::now().naive_utc();
                let new_db = NewDonationDB::new(
                    donor_id,
                    &new_donation,
                    DonationState::Pending,
                    Some(gateway_reference),
                    now,
                );
                let result_db: DonationDB = diesel::insert_into(donations::table)
                    .values(&new_db)
                    .returning(DonationDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                result_db.try_into()
            })
            .await
    }

    async fn record_completed(
        &self,
        donor_id: i64,
        new_donation: NewDonation,
        today: NaiveDate,
    ) -> Result<CompletedDonation> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<CompletedDonation> {
                    let mut campaign = load_campaign(conn, new_donation.campaign_id)?;
                    let effect =
                        apply_ledger_effect(&mut campaign, new_donation.amount.round_dp(2), today)
                            .map_err(Error::Donation)?;
                    campaign.updated_at = Utc::now().naive_utc();

                    let new_db = NewDonationDB::new(
                        donor_id,
                        &new_donation,
                        DonationState::Completed,
                        None,
                        campaign.updated_at,
                    );
                    let donation: Donation = diesel::insert_into(donations::table)
                        .values(&new_db)
                        .returning(DonationDB::as_returning())
                        .get_result::<DonationDB>(conn)
                        .into_core()?
                        .try_into()?;
                    save_campaign(conn, &campaign)?;

                    debug!(
                        "donation {} completed, campaign {} at {}",
                        donation.id, campaign.id, campaign.current_amount
                    );
                    Ok(CompletedDonation {
                        donation,
                        goal_reached: effect.goal_reached,
                        campaign,
                    })
                },
            )
            .await
    }

    async fn confirm_by_reference(
        &self,
        gateway_reference: &str,
        today: NaiveDate,
    ) -> Result<ConfirmOutcome> {
        let reference = gateway_reference.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ConfirmOutcome> {
                let mut donation: Donation = donations::table
                    .filter(donations::gateway_reference.eq(&reference))
                    .first::<DonationDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| {
                        Error::Donation(DonationError::UnknownReference(reference.clone()))
                    })?
                    .try_into()?;

                let mut campaign = load_campaign(conn, donation.campaign_id)?;

                let applied = donation.settle().map_err(Error::Donation)?;
                let mut goal_reached = false;
                if applied {
                    let effect = apply_ledger_effect(&mut campaign, donation.amount, today)
                        .map_err(Error::Donation)?;
                    goal_reached = effect.goal_reached;
                    campaign.updated_at = Utc::now().naive_utc();
                    save_donation_state(conn, &donation)?;
                    save_campaign(conn, &campaign)?;
                }

                Ok(ConfirmOutcome {
                    donation,
                    campaign,
                    applied,
                    goal_reached,
                })
            })
            .await
    }

    async fn cancel(&self, donation_id: i64, requester_id: i64) -> Result<Donation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Donation> {
                let mut donation = load_donation(conn, donation_id)?;
                donation.cancel(requester_id).map_err(Error::Donation)?;
                save_donation_state(conn, &donation)?;
                Ok(donation)
            })
            .await
    }
}
