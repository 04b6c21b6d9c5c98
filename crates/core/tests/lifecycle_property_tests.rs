//! Property-based tests for the campaign lifecycle and funds ledger.
//!
//! These tests verify that universal properties of the two state machines
//! and the ledger arithmetic hold across all valid inputs, using the
//! `proptest` crate for random test case generation.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use fundlift_core::campaigns::{Campaign, FundraisingAction, WorkflowAction};
use fundlift_core::donations::apply_ledger_effect;
use fundlift_core::rewards::{evaluate_claim, Reward, RewardError};
use fundlift_core::states::{CampaignState, WorkflowState};

// =============================================================================
// Generators
// =============================================================================

fn arb_workflow_state() -> impl Strategy<Value = WorkflowState> {
    prop_oneof![
        Just(WorkflowState::Draft),
        Just(WorkflowState::InReview),
        Just(WorkflowState::Observed),
        Just(WorkflowState::Rejected),
        Just(WorkflowState::Published),
    ]
}

fn arb_campaign_state() -> impl Strategy<Value = CampaignState> {
    prop_oneof![
        Just(CampaignState::NotStarted),
        Just(CampaignState::InProgress),
        Just(CampaignState::Paused),
        Just(CampaignState::Finished),
    ]
}

/// State pairs that respect the system invariant: fundraising has not
/// started unless the campaign is published.
fn arb_valid_state_pair() -> impl Strategy<Value = (WorkflowState, CampaignState)> {
    (arb_workflow_state(), arb_campaign_state()).prop_map(|(workflow, fundraising)| {
        if workflow == WorkflowState::Published {
            (workflow, fundraising)
        } else {
            (workflow, CampaignState::NotStarted)
        }
    })
}

/// Money amounts in cents, always positive, 2 decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_00).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_fundraising_action() -> impl Strategy<Value = FundraisingAction> {
    prop_oneof![
        Just(FundraisingAction::Start),
        Just(FundraisingAction::Pause),
        Just(FundraisingAction::Finish),
    ]
}

fn arb_workflow_action() -> impl Strategy<Value = WorkflowAction> {
    prop_oneof![
        Just(WorkflowAction::SubmitForReview),
        Just(WorkflowAction::Approve {
            admin_id: 1,
            rationale: "ok".to_string()
        }),
        Just(WorkflowAction::Observe {
            admin_id: 1,
            rationale: "needs work".to_string()
        }),
        Just(WorkflowAction::Reject {
            admin_id: 1,
            rationale: "out of policy".to_string()
        }),
    ]
}

fn campaign_with(
    workflow: WorkflowState,
    fundraising: CampaignState,
    goal: Decimal,
    current: Decimal,
) -> Campaign {
    let now = Utc::now().naive_utc();
    Campaign {
        id: 1,
        title: "Test campaign".to_string(),
        description: "Generated fixture".to_string(),
        goal_amount: goal,
        current_amount: current,
        expiration_date: None,
        start_date: None,
        end_date: None,
        main_image_url: None,
        rich_text: None,
        view_counting: 0,
        favorites_counting: 0,
        workflow_state: workflow,
        campaign_state: fundraising,
        owner_id: 10,
        category_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn holds_invariant(campaign: &Campaign) -> bool {
    campaign.campaign_state == CampaignState::NotStarted
        || campaign.workflow_state == WorkflowState::Published
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Workflow transitions follow the legality table exactly, and a failed
    /// transition leaves the campaign untouched.
    #[test]
    fn prop_workflow_transition_table(
        (workflow, fundraising) in arb_valid_state_pair(),
        action in arb_workflow_action(),
    ) {
        let mut campaign = campaign_with(workflow, fundraising, Decimal::new(100_00, 2), Decimal::ZERO);
        let before = campaign.clone();
        let result = campaign.apply_workflow(action.clone());

        let expected_legal = match action {
            WorkflowAction::SubmitForReview => {
                matches!(workflow, WorkflowState::Draft | WorkflowState::Observed)
            }
            WorkflowAction::Approve { .. } => {
                matches!(workflow, WorkflowState::InReview | WorkflowState::Observed)
            }
            WorkflowAction::Observe { .. } | WorkflowAction::Reject { .. } => {
                workflow == WorkflowState::InReview
            }
        };

        prop_assert_eq!(result.is_ok(), expected_legal);
        if result.is_err() {
            prop_assert_eq!(&campaign, &before, "failed transitions must not mutate");
        } else {
            // the editorial axis never drives the fundraising axis
            prop_assert_eq!(campaign.campaign_state, before.campaign_state);
        }
        prop_assert!(holds_invariant(&campaign));
    }

    /// Fundraising transitions require a published campaign, follow the
    /// legality table, and never leave Finished.
    #[test]
    fn prop_fundraising_transition_table(
        (workflow, fundraising) in arb_valid_state_pair(),
        action in arb_fundraising_action(),
    ) {
        let mut campaign = campaign_with(workflow, fundraising, Decimal::new(100_00, 2), Decimal::ZERO);
        let before = campaign.clone();
        let result = campaign.apply_fundraising(action, today());

        let expected_legal = workflow == WorkflowState::Published
            && match action {
                FundraisingAction::Start => matches!(
                    fundraising,
                    CampaignState::NotStarted | CampaignState::Paused
                ),
                FundraisingAction::Pause => fundraising == CampaignState::InProgress,
                FundraisingAction::Finish => matches!(
                    fundraising,
                    CampaignState::InProgress | CampaignState::Paused
                ),
            };

        prop_assert_eq!(result.is_ok(), expected_legal);
        if result.is_err() {
            prop_assert_eq!(&campaign, &before, "failed transitions must not mutate");
        }
        if before.campaign_state == CampaignState::Finished {
            prop_assert_eq!(campaign.campaign_state, CampaignState::Finished);
        }
        prop_assert!(holds_invariant(&campaign));
    }

    /// Applying donations accumulates exactly the applied amounts, finishes
    /// the campaign exactly once, and rejects everything after the finish.
    #[test]
    fn prop_ledger_accumulates_and_finishes_once(
        goal in arb_amount(),
        amounts in proptest::collection::vec(arb_amount(), 1..20),
    ) {
        let mut campaign = campaign_with(
            WorkflowState::Published,
            CampaignState::InProgress,
            goal,
            Decimal::ZERO,
        );

        let mut applied_total = Decimal::ZERO;
        let mut finishes = 0;

        for amount in &amounts {
            match apply_ledger_effect(&mut campaign, *amount, today()) {
                Ok(effect) => {
                    applied_total += *amount;
                    if effect.goal_reached {
                        finishes += 1;
                    }
                }
                Err(_) => {
                    // only possible once the campaign has finished
                    prop_assert_eq!(campaign.campaign_state, CampaignState::Finished);
                }
            }
        }

        prop_assert_eq!(campaign.current_amount, applied_total);
        prop_assert!(finishes <= 1, "goal completion must fire at most once");
        if campaign.current_amount >= goal {
            prop_assert_eq!(campaign.campaign_state, CampaignState::Finished);
            prop_assert_eq!(finishes, 1);
            prop_assert_eq!(campaign.end_date, Some(today()));
        } else {
            prop_assert_eq!(campaign.campaign_state, CampaignState::InProgress);
            prop_assert_eq!(finishes, 0);
        }
    }

    /// Claim eligibility is monotonic in the contributed total, and the
    /// reported shortfall is exact.
    #[test]
    fn prop_claim_eligibility_monotonic(
        required in arb_amount(),
        contributed in arb_amount(),
        extra in arb_amount(),
    ) {
        let reward = Reward {
            id: 5,
            campaign_id: 7,
            title: "Tier".to_string(),
            description: None,
            amount: required,
            stock: None,
            image_url: None,
            created_at: Utc::now().naive_utc(),
        };

        let first = evaluate_claim(&reward, 7, false, contributed);
        match first {
            Ok(()) => {
                // more contribution can never invalidate an eligible claim
                prop_assert!(evaluate_claim(&reward, 7, false, contributed + extra).is_ok());
            }
            Err(RewardError::InsufficientContribution { shortfall, .. }) => {
                prop_assert_eq!(shortfall, required - contributed);
                // topping up by the shortfall makes the claim eligible
                prop_assert!(
                    evaluate_claim(&reward, 7, false, contributed + shortfall).is_ok()
                );
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    /// Expiry closes exactly the in-progress, past-expiration campaigns and
    /// is idempotent.
    #[test]
    fn prop_expiry_only_touches_running_expired(
        (workflow, fundraising) in arb_valid_state_pair(),
        days_offset in -30i64..30,
    ) {
        let reference = today();
        let mut campaign = campaign_with(workflow, fundraising, Decimal::new(100_00, 2), Decimal::ZERO);
        campaign.expiration_date = Some(reference + chrono::Duration::days(days_offset));

        let transitioned = campaign.expire(reference);
        let should_expire =
            fundraising == CampaignState::InProgress && days_offset < 0;
        prop_assert_eq!(transitioned, should_expire);
        if should_expire {
            prop_assert_eq!(campaign.campaign_state, CampaignState::Finished);
            prop_assert!(!campaign.expire(reference), "second expiry is a no-op");
        }
    }
}
