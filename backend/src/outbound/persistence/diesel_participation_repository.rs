//! PostgreSQL-backed `ParticipationRepository`.
//!
//! Both writes are `INSERT ... ON CONFLICT DO UPDATE` statements keyed on the
//! table's composite primary key, so concurrent submissions for the same key
//! settle on the last committed value without ever producing a duplicate row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ParticipationRepository, ParticipationRepositoryError};
use crate::domain::{Availability, Comment};

use super::diesel_helpers::{classify_diesel_error, classify_pool_error};
use super::models::{AvailabilityRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{availabilities, comments};

/// Diesel-backed store for availability answers and comments.
#[derive(Clone)]
pub struct DieselParticipationRepository {
    pool: DbPool,
}

impl DieselParticipationRepository {
    /// Create a repository backed by `pool`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use scheduler::outbound::persistence::{DbPool, DieselParticipationRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/scheduler")).await?;
    /// let repository = DieselParticipationRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ParticipationRepositoryError {
    classify_pool_error(error)
}

fn map_diesel_error(error: diesel::result::Error) -> ParticipationRepositoryError {
    classify_diesel_error(error)
}

#[async_trait]
impl ParticipationRepository for DieselParticipationRepository {
    async fn upsert_availability(
        &self,
        availability: &Availability,
    ) -> Result<(), ParticipationRepositoryError> {
        let row = AvailabilityRow {
            user_id: availability.user_id.value(),
            candidate_id: availability.candidate_id.value(),
            schedule_id: *availability.schedule_id.as_uuid(),
            availability: i16::from(availability.availability.value()),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(availabilities::table)
            .values(&row)
            .on_conflict((availabilities::user_id, availabilities::candidate_id))
            .do_update()
            .set((
                availabilities::availability.eq(excluded(availabilities::availability)),
                availabilities::schedule_id.eq(excluded(availabilities::schedule_id)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn upsert_comment(&self, comment: &Comment) -> Result<(), ParticipationRepositoryError> {
        let row = NewCommentRow {
            schedule_id: *comment.schedule_id.as_uuid(),
            user_id: comment.user_id.value(),
            comment: comment.comment.as_ref(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(comments::table)
            .values(&row)
            .on_conflict((comments::schedule_id, comments::user_id))
            .do_update()
            .set(comments::comment.eq(excluded(comments::comment)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
