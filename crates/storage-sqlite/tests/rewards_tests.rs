//! Integration tests for reward eligibility and claims.

mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;

use fundlift_core::campaigns::CampaignServiceTrait;
use fundlift_core::errors::{Error, ErrorKind};
use fundlift_core::rewards::{NewReward, RewardError, RewardServiceTrait};

async fn reward_fixture(
    app: &common::TestApp,
    owner: &fundlift_core::auth::Identity,
    campaign_id: i64,
    amount: rust_decimal::Decimal,
    stock: Option<i32>,
) -> i64 {
    app.rewards
        .create_reward(
            owner,
            NewReward {
                campaign_id,
                title: "Thank-you kit".to_string(),
                description: None,
                amount,
                stock,
                image_url: None,
            },
        )
        .await
        .unwrap()
        .id
}

#[tokio::test(flavor = "multi_thread")]
async fn claim_requires_cumulative_contribution() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(1000.00)).await;
    let reward_id = reward_fixture(&app, &owner, campaign_id, dec!(25.00), None).await;

    // two donations of 10.00: total 20.00, short by 5.00
    app.donate(&donor, campaign_id, dec!(10.00)).await;
    app.donate(&donor, campaign_id, dec!(10.00)).await;
    assert_eq!(
        app.rewards
            .compute_eligible_total(campaign_id, donor.user_id)
            .unwrap(),
        dec!(20.00)
    );

    let err = app
        .rewards
        .claim_reward(&donor, reward_id, campaign_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
    match err {
        Error::Reward(RewardError::InsufficientContribution {
            required,
            contributed,
            shortfall,
        }) => {
            assert_eq!(required, dec!(25.00));
            assert_eq!(contributed, dec!(20.00));
            assert_eq!(shortfall, dec!(5.00));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // a further 10.00 donation crosses the threshold
    app.donate(&donor, campaign_id, dec!(10.00)).await;
    let claim = app
        .rewards
        .claim_reward(&donor, reward_id, campaign_id)
        .await
        .unwrap();
    assert_eq!(claim.user_id, donor.user_id);
    assert_eq!(claim.reward_id, reward_id);
    assert_eq!(app.rewards.list_my_claims(&donor).unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn claim_is_unique_per_user_and_reward() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(1000.00)).await;
    let reward_id = reward_fixture(&app, &owner, campaign_id, dec!(10.00), None).await;

    app.donate(&donor, campaign_id, dec!(50.00)).await;
    app.rewards
        .claim_reward(&donor, reward_id, campaign_id)
        .await
        .unwrap();

    let err = app
        .rewards
        .claim_reward(&donor, reward_id, campaign_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(matches!(
        err,
        Error::Reward(RewardError::AlreadyClaimed { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn claim_decrements_bounded_stock() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(1000.00)).await;
    let reward_id = reward_fixture(&app, &owner, campaign_id, dec!(10.00), Some(3)).await;

    app.donate(&donor, campaign_id, dec!(50.00)).await;
    app.rewards
        .claim_reward(&donor, reward_id, campaign_id)
        .await
        .unwrap();

    let reward = app.rewards.list_campaign_rewards(campaign_id).unwrap();
    assert_eq!(reward[0].stock, Some(2));
}

#[tokio::test(flavor = "multi_thread")]
async fn racing_claims_on_last_unit_leave_one_winner() {
    let app = Arc::new(common::setup().await);
    let owner = app.member();
    let admin = app.admin();
    let alice = app.member();
    let bob = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(1000.00)).await;
    let reward_id = reward_fixture(&app, &owner, campaign_id, dec!(10.00), Some(1)).await;

    app.donate(&alice, campaign_id, dec!(20.00)).await;
    app.donate(&bob, campaign_id, dec!(20.00)).await;

    let (a, b) = tokio::join!(
        {
            let app = app.clone();
            async move { app.rewards.claim_reward(&alice, reward_id, campaign_id).await }
        },
        {
            let app = app.clone();
            async move { app.rewards.claim_reward(&bob, reward_id, campaign_id).await }
        }
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one claim may win the last unit");
    let loser = if a.is_ok() { b } else { a };
    assert_eq!(loser.unwrap_err().kind(), ErrorKind::Conflict);

    let reward = app.rewards.list_campaign_rewards(campaign_id).unwrap();
    assert_eq!(reward[0].stock, Some(0));
}

#[tokio::test(flavor = "multi_thread")]
async fn claim_validates_reward_and_campaign_pairing() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(1000.00)).await;
    let other_campaign_id = app.live_campaign(&owner, &admin, dec!(1000.00)).await;
    let reward_id = reward_fixture(&app, &owner, campaign_id, dec!(10.00), None).await;

    app.donate(&donor, campaign_id, dec!(50.00)).await;

    // reward belongs to a different campaign than the one supplied
    let err = app
        .rewards
        .claim_reward(&donor, reward_id, other_campaign_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // unknown reward
    let err = app
        .rewards
        .claim_reward(&donor, 9999, campaign_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test(flavor = "multi_thread")]
async fn refund_after_claim_does_not_revoke_it() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let donor = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(100.00)).await;
    let reward_id = reward_fixture(&app, &owner, campaign_id, dec!(25.00), None).await;

    app.donate(&donor, campaign_id, dec!(30.00)).await;
    app.rewards
        .claim_reward(&donor, reward_id, campaign_id)
        .await
        .unwrap();

    // goal unmet at expiry: the donation is refunded, the claim survives
    app.force_expiration_yesterday(campaign_id);
    let summary = app.campaigns.sweep_expired().await.unwrap();
    assert_eq!(summary.donations_refunded, 1);

    assert_eq!(app.rewards.list_my_claims(&donor).unwrap().len(), 1);
    // eligibility is gone for future claims, though
    assert_eq!(
        app.rewards
            .compute_eligible_total(campaign_id, donor.user_id)
            .unwrap(),
        dec!(0.00)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn reward_crud_is_owner_only() {
    let app = common::setup().await;
    let owner = app.member();
    let admin = app.admin();
    let stranger = app.member();
    let campaign_id = app.live_campaign(&owner, &admin, dec!(1000.00)).await;

    let err = app
        .rewards
        .create_reward(
            &stranger,
            NewReward {
                campaign_id,
                title: "Pin".to_string(),
                description: None,
                amount: dec!(5.00),
                stock: None,
                image_url: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let reward_id = reward_fixture(&app, &owner, campaign_id, dec!(5.00), Some(10)).await;
    let err = app
        .rewards
        .delete_reward(&stranger, reward_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    app.rewards.delete_reward(&owner, reward_id).await.unwrap();
    assert!(app.rewards.list_campaign_rewards(campaign_id).unwrap().is_empty());
}
