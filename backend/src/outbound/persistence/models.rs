//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{availabilities, candidates, comments, schedules, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub user_id: i64,
    pub username: &'a str,
}

// ---------------------------------------------------------------------------
// Schedules and candidates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScheduleRow {
    pub schedule_id: Uuid,
    pub schedule_name: String,
    pub memo: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schedules)]
pub(crate) struct NewScheduleRow<'a> {
    pub schedule_id: Uuid,
    pub schedule_name: &'a str,
    pub memo: &'a str,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = candidates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CandidateRow {
    pub candidate_id: i64,
    pub schedule_id: Uuid,
    pub candidate_name: String,
    pub display_order: i32,
}

/// Candidate ids are assigned by the `BIGSERIAL` default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = candidates)]
pub(crate) struct NewCandidateRow<'a> {
    pub schedule_id: Uuid,
    pub candidate_name: &'a str,
    pub display_order: i32,
}

// ---------------------------------------------------------------------------
// Participant answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = availabilities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AvailabilityRow {
    pub user_id: i64,
    pub candidate_id: i64,
    pub schedule_id: Uuid,
    pub availability: i16,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub schedule_id: Uuid,
    pub user_id: i64,
    pub comment: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub schedule_id: Uuid,
    pub user_id: i64,
    pub comment: &'a str,
}
