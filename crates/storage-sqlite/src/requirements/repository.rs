use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fundlift_core::errors::{Error, Result};
use fundlift_core::requirements::{
    CategoryRequirement, NewCategoryRequirement, RequirementError, RequirementRepositoryTrait,
    RequirementResponse, ResponseUpsert,
};

use super::model::{
    CategoryRequirementDB, NewCategoryRequirementDB, NewRequirementResponseDB,
    RequirementResponseDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{category_requirements, requirement_responses};

pub struct RequirementRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RequirementRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RequirementRepository { pool, writer }
    }
}

#[async_trait]
impl RequirementRepositoryTrait for RequirementRepository {
    fn get_requirement(&self, requirement_id: i64) -> Result<CategoryRequirement> {
        let mut conn = get_connection(&self.pool)?;
        Ok(category_requirements::table
            .find(requirement_id)
            .first::<CategoryRequirementDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::Requirement(RequirementError::NotFound(requirement_id)))?
            .into())
    }

    fn list_by_category(&self, category_id: i64) -> Result<Vec<CategoryRequirement>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(category_requirements::table
            .filter(category_requirements::category_id.eq(category_id))
            .order((
                category_requirements::order_index.asc(),
                category_requirements::id.asc(),
            ))
            .load::<CategoryRequirementDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(CategoryRequirement::from)
            .collect())
    }

    fn list_responses(&self, campaign_id: i64) -> Result<Vec<RequirementResponse>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(requirement_responses::table
            .filter(requirement_responses::campaign_id.eq(campaign_id))
            .load::<RequirementResponseDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(RequirementResponse::from)
            .collect())
    }

    async fn insert_requirement(
        &self,
        new_requirement: NewCategoryRequirement,
    ) -> Result<CategoryRequirement> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<CategoryRequirement> {
                    let result_db: CategoryRequirementDB =
                        diesel::insert_into(category_requirements::table)
                            .values(NewCategoryRequirementDB::from(new_requirement))
                            .returning(CategoryRequirementDB::as_returning())
                            .get_result(conn)
                            .into_core()?;
                    Ok(result_db.into())
                },
            )
            .await
    }

    async fn delete_requirement(&self, requirement_id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::delete(category_requirements::table.find(requirement_id))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(RequirementError::NotFound(requirement_id).into());
                }
                Ok(())
            })
            .await
    }

    async fn upsert_response(
        &self,
        campaign_id: i64,
        upsert: ResponseUpsert,
    ) -> Result<RequirementResponse> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<RequirementResponse> {
                    let now = Utc::now().naive_utc();
                    let existing: Option<RequirementResponseDB> = requirement_responses::table
                        .filter(requirement_responses::campaign_id.eq(campaign_id))
                        .filter(requirement_responses::requirement_id.eq(upsert.requirement_id))
                        .first(conn)
                        .optional()
                        .into_core()?;

                    let result_db: RequirementResponseDB = match existing {
                        Some(row) => diesel::update(requirement_responses::table.find(row.id))
                            .set((
                                requirement_responses::value.eq(upsert.value),
                                requirement_responses::file_url.eq(upsert.file_url),
                                requirement_responses::updated_at.eq(now),
                            ))
                            .returning(RequirementResponseDB::as_returning())
                            .get_result(conn)
                            .into_core()?,
                        None => diesel::insert_into(requirement_responses::table)
                            .values(NewRequirementResponseDB {
                                campaign_id,
                                requirement_id: upsert.requirement_id,
                                value: upsert.value,
                                file_url: upsert.file_url,
                                created_at: now,
                                updated_at: now,
                            })
                            .returning(RequirementResponseDB::as_returning())
                            .get_result(conn)
                            .into_core()?,
                    };
                    Ok(result_db.into())
                },
            )
            .await
    }
}
