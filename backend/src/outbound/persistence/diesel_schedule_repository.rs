//! PostgreSQL-backed `ScheduleRepository`.
//!
//! Creation and teardown each run inside one transaction. Loading reads all
//! aggregate tables in one transaction so the page reflects a single
//! snapshot.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ScheduleRepository, ScheduleRepositoryError};
use crate::domain::{
    Availability, AvailabilityValue, Candidate, CandidateId, CandidateName, Comment, CommentText,
    NewSchedule, Schedule, ScheduleAggregate, ScheduleId, ScheduleName, User, UserId,
};

use super::diesel_helpers::{classify_diesel_error, classify_pool_error};
use super::diesel_user_repository::row_to_user;
use super::models::{
    AvailabilityRow, CandidateRow, CommentRow, NewCandidateRow, NewScheduleRow, ScheduleRow,
    UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{availabilities, candidates, comments, schedules, users};

/// Diesel-backed schedule store.
#[derive(Clone)]
pub struct DieselScheduleRepository {
    pool: DbPool,
}

impl DieselScheduleRepository {
    /// Create a repository over `pool`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use scheduler::outbound::persistence::{DbPool, DieselScheduleRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/scheduler")).await?;
    /// let repository = DieselScheduleRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ScheduleRepositoryError {
    classify_pool_error(error)
}

fn map_diesel_error(error: diesel::result::Error) -> ScheduleRepositoryError {
    classify_diesel_error(error)
}

fn row_to_schedule(
    row: ScheduleRow,
    creator: UserRow,
) -> Result<Schedule, ScheduleRepositoryError> {
    Ok(Schedule {
        schedule_id: ScheduleId::from_uuid(row.schedule_id),
        schedule_name: ScheduleName::from_db(row.schedule_name),
        memo: row.memo,
        created_by: row_to_user(creator, ScheduleRepositoryError::query)?,
        created_at: row.created_at,
    })
}

fn row_to_candidate(row: CandidateRow) -> Candidate {
    Candidate {
        candidate_id: CandidateId::new(row.candidate_id),
        schedule_id: ScheduleId::from_uuid(row.schedule_id),
        candidate_name: CandidateName::from_db(row.candidate_name),
        display_order: row.display_order,
    }
}

fn row_to_availability(row: AvailabilityRow) -> Availability {
    Availability {
        schedule_id: ScheduleId::from_uuid(row.schedule_id),
        candidate_id: CandidateId::new(row.candidate_id),
        user_id: UserId::from_db(row.user_id),
        availability: AvailabilityValue::from_db(row.availability),
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment {
        schedule_id: ScheduleId::from_uuid(row.schedule_id),
        user_id: UserId::from_db(row.user_id),
        comment: CommentText::from_db(row.comment),
    }
}

struct AggregateRows {
    header: (ScheduleRow, UserRow),
    candidates: Vec<CandidateRow>,
    availabilities: Vec<AvailabilityRow>,
    comments: Vec<CommentRow>,
    participants: Vec<UserRow>,
}

impl AggregateRows {
    fn into_domain(self) -> Result<ScheduleAggregate, ScheduleRepositoryError> {
        let (schedule_row, creator_row) = self.header;
        let participants = self
            .participants
            .into_iter()
            .map(|row| row_to_user(row, ScheduleRepositoryError::query))
            .collect::<Result<Vec<User>, _>>()?;
        Ok(ScheduleAggregate {
            schedule: row_to_schedule(schedule_row, creator_row)?,
            candidates: self.candidates.into_iter().map(row_to_candidate).collect(),
            availabilities: self
                .availabilities
                .into_iter()
                .map(row_to_availability)
                .collect(),
            comments: self.comments.into_iter().map(row_to_comment).collect(),
            participants,
        })
    }
}

#[async_trait]
impl ScheduleRepository for DieselScheduleRepository {
    async fn create(&self, schedule: &NewSchedule) -> Result<(), ScheduleRepositoryError> {
        let schedule_id = *schedule.schedule_id.as_uuid();
        let header = NewScheduleRow {
            schedule_id,
            schedule_name: schedule.schedule_name.as_ref(),
            memo: &schedule.memo,
            created_by: schedule.created_by.value(),
            created_at: schedule.created_at,
        };
        let candidate_rows: Vec<NewCandidateRow<'_>> = schedule
            .ordered_candidates()
            .map(|(display_order, name)| NewCandidateRow {
                schedule_id,
                candidate_name: name.as_ref(),
                display_order,
            })
            .collect();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(schedules::table)
                    .values(&header)
                    .execute(conn)
                    .await?;
                diesel::insert_into(candidates::table)
                    .values(&candidate_rows)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn load_aggregate(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Option<ScheduleAggregate>, ScheduleRepositoryError> {
        let id = *schedule_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction(|conn| {
                async move {
                    let Some(header) = schedules::table
                        .inner_join(users::table)
                        .filter(schedules::schedule_id.eq(id))
                        .select((ScheduleRow::as_select(), UserRow::as_select()))
                        .first::<(ScheduleRow, UserRow)>(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };

                    let candidate_rows: Vec<CandidateRow> = candidates::table
                        .filter(candidates::schedule_id.eq(id))
                        .order_by((candidates::display_order, candidates::candidate_id))
                        .select(CandidateRow::as_select())
                        .load(conn)
                        .await?;
                    let availability_rows: Vec<AvailabilityRow> = availabilities::table
                        .filter(availabilities::schedule_id.eq(id))
                        .select(AvailabilityRow::as_select())
                        .load(conn)
                        .await?;
                    let comment_rows: Vec<CommentRow> = comments::table
                        .filter(comments::schedule_id.eq(id))
                        .select(CommentRow::as_select())
                        .load(conn)
                        .await?;

                    let participant_ids: Vec<i64> = availability_rows
                        .iter()
                        .map(|row| row.user_id)
                        .chain(comment_rows.iter().map(|row| row.user_id))
                        .collect::<BTreeSet<i64>>()
                        .into_iter()
                        .collect();
                    let participant_rows: Vec<UserRow> = if participant_ids.is_empty() {
                        Vec::new()
                    } else {
                        users::table
                            .filter(users::user_id.eq_any(participant_ids))
                            .order_by(users::user_id)
                            .select(UserRow::as_select())
                            .load(conn)
                            .await?
                    };

                    Ok(Some(AggregateRows {
                        header,
                        candidates: candidate_rows,
                        availabilities: availability_rows,
                        comments: comment_rows,
                        participants: participant_rows,
                    }))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows.map(AggregateRows::into_domain).transpose()
    }

    async fn list_by_creator(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(ScheduleRow, UserRow)> = schedules::table
            .inner_join(users::table)
            .filter(schedules::created_by.eq(user_id.value()))
            .order_by(schedules::created_at.desc())
            .select((ScheduleRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(schedule, creator)| row_to_schedule(schedule, creator))
            .collect()
    }

    async fn delete_aggregate(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<bool, ScheduleRepositoryError> {
        let id: Uuid = *schedule_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(availabilities::table.filter(availabilities::schedule_id.eq(id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(candidates::table.filter(candidates::schedule_id.eq(id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(comments::table.filter(comments::schedule_id.eq(id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(schedules::table.filter(schedules::schedule_id.eq(id)))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn user_row(id: i64, name: &str) -> UserRow {
        UserRow {
            user_id: id,
            username: name.to_owned(),
        }
    }

    #[rstest]
    fn aggregate_rows_convert_to_domain() {
        let id = Uuid::new_v4();
        let rows = AggregateRows {
            header: (
                ScheduleRow {
                    schedule_id: id,
                    schedule_name: "plan".to_owned(),
                    memo: "line1\r\nline2".to_owned(),
                    created_at: Utc::now(),
                },
                user_row(0, "testuser"),
            ),
            candidates: vec![CandidateRow {
                candidate_id: 7,
                schedule_id: id,
                candidate_name: "A".to_owned(),
                display_order: 0,
            }],
            availabilities: vec![AvailabilityRow {
                user_id: 4,
                candidate_id: 7,
                schedule_id: id,
                availability: 2,
            }],
            comments: Vec::new(),
            participants: vec![user_row(4, "alice")],
        };

        let aggregate = rows.into_domain().expect("valid rows");
        assert_eq!(aggregate.schedule.memo, "line1\r\nline2");
        assert_eq!(aggregate.schedule.created_by.username().as_ref(), "testuser");
        assert_eq!(aggregate.availabilities[0].availability.value(), 2);
        assert_eq!(aggregate.participants[0].user_id().value(), 4);
    }

    #[rstest]
    fn blank_stored_username_is_a_query_error() {
        let rows = AggregateRows {
            header: (
                ScheduleRow {
                    schedule_id: Uuid::new_v4(),
                    schedule_name: "plan".to_owned(),
                    memo: String::new(),
                    created_at: Utc::now(),
                },
                user_row(0, " "),
            ),
            candidates: Vec::new(),
            availabilities: Vec::new(),
            comments: Vec::new(),
            participants: Vec::new(),
        };

        assert!(matches!(
            rows.into_domain(),
            Err(ScheduleRepositoryError::Query { .. })
        ));
    }
}
