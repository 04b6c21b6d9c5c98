//! Integration tests for the expiry sweep: closing out expired campaigns
//! and refunding unmet goals, idempotently.

mod common;

use chrono::Utc;
use rust_decimal_macros::dec;

use fundlift_core::campaigns::{CampaignRepositoryTrait, CampaignServiceTrait};
use fundlift_core::donations::{DonationRepositoryTrait, DonationServiceTrait};
use fundlift_core::notifications::NotificationEvent;
use fundlift_core::states::{CampaignState, DonationState};

#[tokio::test(flavor = "multi_thread")]
async fn sweep_refunds_unmet_goal() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(100.00)).await;

    app.donate(&donor, campaign_id, dec!(50.00)).await;
    app.force_expiration_yesterday(campaign_id);

    let summary = app.campaigns.sweep_expired().await.unwrap();
    assert_eq!(summary.campaigns_finished, 1);
    assert_eq!(summary.donations_refunded, 1);

    let campaign = app.campaign_repo.get_by_id(campaign_id).unwrap();
    assert_eq!(campaign.campaign_state, CampaignState::Finished);
    assert_eq!(campaign.end_date, Some(Utc::now().date_naive()));
    // current_amount stays as the historical high-water mark
    assert_eq!(campaign.current_amount, dec!(50.00));
    // but live aggregates no longer count the refunded donation
    assert_eq!(app.completed_total(campaign_id), dec!(0.00));

    let donations = app.donation_repo.list_by_campaign(campaign_id).unwrap();
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].state, DonationState::Refunded);

    // the donor heard about the refund
    let events = app.notifier.events.lock().unwrap();
    assert!(events
        .iter()
        .any(|(event, recipient)| *recipient == donor.user_id
            && matches!(event, NotificationEvent::DonationRefunded { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn sweep_is_idempotent() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(100.00)).await;

    app.donate(&donor, campaign_id, dec!(50.00)).await;
    app.force_expiration_yesterday(campaign_id);

    let first = app.campaigns.sweep_expired().await.unwrap();
    assert_eq!(first.campaigns_finished, 1);
    assert_eq!(first.donations_refunded, 1);

    // the second run finds nothing to do and refunds nothing twice
    let second = app.campaigns.sweep_expired().await.unwrap();
    assert_eq!(second.campaigns_finished, 0);
    assert_eq!(second.donations_refunded, 0);

    let donations = app.donation_repo.list_by_campaign(campaign_id).unwrap();
    assert_eq!(donations[0].state, DonationState::Refunded);
}

#[tokio::test(flavor = "multi_thread")]
async fn sweep_ignores_unexpired_and_non_running_campaigns() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();

    // still running, expires in 30 days
    let running_id = app.live_campaign(&owner, &admin, dec!(100.00)).await;
    app.donate(&donor, running_id, dec!(10.00)).await;

    // expired but paused: the sweep only touches in-progress campaigns
    let paused_id = app.live_campaign(&owner, &admin, dec!(100.00)).await;
    app.campaigns.pause_fundraising(&owner, paused_id).await.unwrap();
    app.force_expiration_yesterday(paused_id);

    let summary = app.campaigns.sweep_expired().await.unwrap();
    assert_eq!(summary.campaigns_finished, 0);
    assert_eq!(summary.donations_refunded, 0);

    let running = app.campaign_repo.get_by_id(running_id).unwrap();
    assert_eq!(running.campaign_state, CampaignState::InProgress);
    let paused = app.campaign_repo.get_by_id(paused_id).unwrap();
    assert_eq!(paused.campaign_state, CampaignState::Paused);
}

#[tokio::test(flavor = "multi_thread")]
async fn sweep_leaves_met_goals_unrefunded() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(100.00)).await;

    // exactly meets the goal: the ledger force-finishes the campaign, so the
    // later sweep has nothing to do and must not refund anything
    app.donate(&donor, campaign_id, dec!(100.00)).await;
    app.force_expiration_yesterday(campaign_id);

    let summary = app.campaigns.sweep_expired().await.unwrap();
    assert_eq!(summary.campaigns_finished, 0);
    assert_eq!(summary.donations_refunded, 0);

    let donations = app.donation_repo.list_by_campaign(campaign_id).unwrap();
    assert_eq!(donations[0].state, DonationState::Completed);
    assert_eq!(app.completed_total(campaign_id), dec!(100.00));
}

#[tokio::test(flavor = "multi_thread")]
async fn sweep_skips_pending_and_cancelled_donations() {
    use fundlift_core::donations::NewDonation;
    use fundlift_core::gateway::testing::DeferringGateway;
    use std::sync::Arc;

    let app = common::setup_with_gateway(Arc::new(DeferringGateway)).await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(100.00)).await;

    // one confirmed, one left pending
    let first = app
        .donations
        .record_donation(
            &donor,
            NewDonation {
                campaign_id,
                amount: dec!(20.00),
                payment_method_id: 1,
            },
        )
        .await
        .unwrap();
    app.donations
        .confirm_donation(first.donation.gateway_reference.as_deref().unwrap())
        .await
        .unwrap();
    app.donations
        .record_donation(
            &donor,
            NewDonation {
                campaign_id,
                amount: dec!(30.00),
                payment_method_id: 1,
            },
        )
        .await
        .unwrap();

    app.force_expiration_yesterday(campaign_id);
    let summary = app.campaigns.sweep_expired().await.unwrap();
    assert_eq!(summary.campaigns_finished, 1);
    assert_eq!(summary.donations_refunded, 1, "only the completed donation");

    let donations = app.donation_repo.list_by_campaign(campaign_id).unwrap();
    let refunded = donations
        .iter()
        .filter(|d| d.state == DonationState::Refunded)
        .count();
    let pending = donations
        .iter()
        .filter(|d| d.state == DonationState::Pending)
        .count();
    assert_eq!((refunded, pending), (1, 1));
}
