use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fundlift_core::errors::{DatabaseError, Error, Result};
use fundlift_core::people::{Person, PersonRepositoryTrait, ProfileUpdate};

use super::model::PersonDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::people;

pub struct PersonRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PersonRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PersonRepository { pool, writer }
    }
}

fn load_person(conn: &mut SqliteConnection, person_id: i64) -> Result<Person> {
    people::table
        .find(person_id)
        .first::<PersonDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Person with id {} not found",
                person_id
            )))
        })?
        .try_into()
}

#[async_trait]
impl PersonRepositoryTrait for PersonRepository {
    fn get_by_id(&self, person_id: i64) -> Result<Person> {
        let mut conn = get_connection(&self.pool)?;
        load_person(&mut conn, person_id)
    }

    async fn update_profile(&self, person_id: i64, update: ProfileUpdate) -> Result<Person> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Person> {
                let mut person = load_person(conn, person_id)?;
                if let Some(first_name) = update.first_name {
                    person.first_name = first_name;
                }
                if let Some(last_name) = update.last_name {
                    person.last_name = last_name;
                }
                person.updated_at = Utc::now().naive_utc();

                diesel::update(people::table.find(person_id))
                    .set((
                        people::first_name.eq(person.first_name.clone()),
                        people::last_name.eq(person.last_name.clone()),
                        people::updated_at.eq(person.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(person)
            })
            .await
    }
}
