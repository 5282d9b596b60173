//! PostgreSQL-backed `UserRepository`.
//!
//! Users are written on every login so that schedules, answers and comments
//! always reference an existing row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::diesel_helpers::{classify_diesel_error, classify_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed user store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    classify_pool_error(error)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    classify_diesel_error(error)
}

pub(super) fn row_to_user<E>(row: UserRow, invalid: impl FnOnce(String) -> E) -> Result<User, E> {
    let username = crate::domain::Username::new(row.username)
        .map_err(|err| invalid(format!("stored username for {} is invalid: {err}", row.user_id)))?;
    Ok(User::new(UserId::from_db(row.user_id), username))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            user_id: user.user_id().value(),
            username: user.username().as_ref(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::user_id)
            .do_update()
            .set((
                users::username.eq(excluded(users::username)),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::user_id.eq(id.value()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row_to_user(row, UserPersistenceError::query))
            .transpose()
    }
}
