//! Database models for donations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fundlift_core::donations::Donation;
use fundlift_core::errors::Error;
use fundlift_core::states::DonationState;

use crate::utils::{decimal_from_db, decimal_to_db};

/// Database model for donations.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::donations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DonationDB {
    pub id: i64,
    pub campaign_id: i64,
    pub donor_id: i64,
    pub amount: f64,
    pub state: String,
    pub payment_method_id: i64,
    pub gateway_reference: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting a donation.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::donations)]
pub struct NewDonationDB {
    pub campaign_id: i64,
    pub donor_id: i64,
    pub amount: f64,
    pub state: String,
    pub payment_method_id: i64,
    pub gateway_reference: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewDonationDB {
    pub fn new(
        donor_id: i64,
        new_donation: &fundlift_core::donations::NewDonation,
        state: DonationState,
        gateway_reference: Option<String>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            campaign_id: new_donation.campaign_id,
            donor_id,
            amount: decimal_to_db(new_donation.amount.round_dp(2)),
            state: state.as_str().to_string(),
            payment_method_id: new_donation.payment_method_id,
            gateway_reference,
            created_at: now,
        }
    }
}

impl TryFrom<DonationDB> for Donation {
    type Error = Error;

    fn try_from(db: DonationDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            campaign_id: db.campaign_id,
            donor_id: db.donor_id,
            amount: decimal_from_db(db.amount),
            state: db.state.parse()?,
            payment_method_id: db.payment_method_id,
            gateway_reference: db.gateway_reference,
            created_at: db.created_at,
        })
    }
}
