//! Shared fixture for the storage integration tests: a real SQLite database
//! in a temp directory with the full service stack wired up.

// Each test binary compiles this module; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use tempfile::TempDir;

use fundlift_core::auth::{Identity, Role};
use fundlift_core::campaigns::{CampaignService, CampaignServiceTrait, NewCampaign};
use fundlift_core::donations::{DonationService, DonationServiceTrait, NewDonation};
use fundlift_core::gateway::{PaymentGatewayTrait, SimulatedGateway};
use fundlift_core::notifications::testing::RecordingNotifier;
use fundlift_core::people::PeopleService;
use fundlift_core::requirements::RequirementsService;
use fundlift_core::rewards::RewardService;

use fundlift_storage_sqlite::campaigns::CampaignRepository;
use fundlift_storage_sqlite::donations::DonationRepository;
use fundlift_storage_sqlite::people::PersonRepository;
use fundlift_storage_sqlite::requirements::RequirementRepository;
use fundlift_storage_sqlite::rewards::RewardRepository;
use fundlift_storage_sqlite::{create_pool, run_migrations, spawn_writer, DbPool};

pub struct TestApp {
    _tmp: TempDir,
    pub pool: Arc<DbPool>,
    pub notifier: Arc<RecordingNotifier>,
    pub campaign_repo: Arc<CampaignRepository>,
    pub donation_repo: Arc<DonationRepository>,
    pub campaigns: CampaignService,
    pub donations: DonationService,
    pub rewards: RewardService,
    pub requirements: RequirementsService,
    pub people: PeopleService,
    next_user: std::sync::atomic::AtomicI64,
}

pub async fn setup() -> TestApp {
    setup_with_gateway(Arc::new(SimulatedGateway::new())).await
}

pub async fn setup_with_gateway(gateway: Arc<dyn PaymentGatewayTrait>) -> TestApp {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let db_path = tmp.path().join("fundlift-test.db");
    let pool = create_pool(db_path.to_str().unwrap()).expect("create pool");
    run_migrations(&pool).expect("run migrations");
    let writer = spawn_writer((*pool).clone());

    let notifier = Arc::new(RecordingNotifier::default());

    let campaign_repo = Arc::new(CampaignRepository::new(pool.clone(), writer.clone()));
    let donation_repo = Arc::new(DonationRepository::new(pool.clone(), writer.clone()));
    let reward_repo = Arc::new(RewardRepository::new(pool.clone(), writer.clone()));
    let requirement_repo = Arc::new(RequirementRepository::new(pool.clone(), writer.clone()));
    let person_repo = Arc::new(PersonRepository::new(pool.clone(), writer.clone()));

    let requirements = RequirementsService::new(requirement_repo.clone(), campaign_repo.clone());
    let campaigns = CampaignService::new(
        campaign_repo.clone(),
        Arc::new(RequirementsService::new(
            requirement_repo.clone(),
            campaign_repo.clone(),
        )),
        notifier.clone(),
    );
    let donations = DonationService::new(
        donation_repo.clone(),
        campaign_repo.clone(),
        gateway,
        notifier.clone(),
    );
    let rewards = RewardService::new(
        reward_repo.clone(),
        campaign_repo.clone(),
        donation_repo.clone(),
    );
    let people = PeopleService::new(person_repo.clone());

    TestApp {
        _tmp: tmp,
        pool,
        notifier,
        campaign_repo,
        donation_repo,
        campaigns,
        donations,
        rewards,
        requirements,
        people,
        next_user: std::sync::atomic::AtomicI64::new(1),
    }
}

impl TestApp {
    /// Inserts a person row and returns their identity.
    pub fn new_person(&self, role: Role) -> Identity {
        use fundlift_storage_sqlite::schema::people;

        let n = self
            .next_user
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let now = Utc::now().naive_utc();
        let mut conn = self.pool.get().expect("connection");
        let id: i64 = diesel::insert_into(people::table)
            .values((
                people::first_name.eq(format!("User{}", n)),
                people::last_name.eq("Test"),
                people::email.eq(format!("user{}@example.com", n)),
                people::role.eq(role.as_str()),
                people::is_active.eq(true),
                people::created_at.eq(now),
                people::updated_at.eq(now),
            ))
            .returning(people::id)
            .get_result(&mut conn)
            .expect("insert person");
        Identity::new(id, role)
    }

    pub fn admin(&self) -> Identity {
        self.new_person(Role::Admin)
    }

    pub fn member(&self) -> Identity {
        self.new_person(Role::Member)
    }

    /// Creates a draft campaign owned by `owner`.
    pub async fn draft_campaign(&self, owner: &Identity, goal: Decimal) -> i64 {
        let campaign = self
            .campaigns
            .create_campaign(
                owner,
                NewCampaign {
                    title: "Community garden".to_string(),
                    description: "Raised beds for the whole block".to_string(),
                    goal_amount: goal,
                    expiration_date: Some(Utc::now().date_naive() + Duration::days(30)),
                    main_image_url: None,
                    rich_text: None,
                    category_id: None,
                },
            )
            .await
            .expect("create campaign");
        campaign.id
    }

    /// Creates a campaign and walks it to published + in-progress.
    pub async fn live_campaign(&self, owner: &Identity, admin: &Identity, goal: Decimal) -> i64 {
        let campaign_id = self.draft_campaign(owner, goal).await;
        self.campaigns
            .submit_for_review(owner, campaign_id)
            .await
            .expect("submit");
        self.campaigns
            .approve(admin, campaign_id, String::new())
            .await
            .expect("approve");
        self.campaigns
            .start_fundraising(owner, campaign_id)
            .await
            .expect("start");
        campaign_id
    }

    /// Records an instantly-settled donation (requires a non-deferring
    /// gateway in the fixture).
    pub async fn donate(&self, donor: &Identity, campaign_id: i64, amount: Decimal) {
        self.donations
            .record_donation(
                donor,
                NewDonation {
                    campaign_id,
                    amount,
                    payment_method_id: 1,
                },
            )
            .await
            .expect("donation");
    }

    /// Moves a campaign's expiration date into the past, as if time passed.
    pub fn force_expiration_yesterday(&self, campaign_id: i64) {
        use fundlift_storage_sqlite::schema::campaigns;

        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let mut conn = self.pool.get().expect("connection");
        diesel::update(campaigns::table.find(campaign_id))
            .set(campaigns::expiration_date.eq(Some(yesterday)))
            .execute(&mut conn)
            .expect("set expiration");
    }

    /// Sum of completed donations for a campaign, straight from the table.
    pub fn completed_total(&self, campaign_id: i64) -> Decimal {
        use diesel::dsl::sum;
        use fundlift_storage_sqlite::schema::donations;

        let mut conn = self.pool.get().expect("connection");
        let total: Option<f64> = donations::table
            .filter(donations::campaign_id.eq(campaign_id))
            .filter(donations::state.eq("COMPLETED"))
            .select(sum(donations::amount))
            .first(&mut conn)
            .expect("sum");
        Decimal::try_from(total.unwrap_or(0.0)).unwrap().round_dp(2)
    }
}
