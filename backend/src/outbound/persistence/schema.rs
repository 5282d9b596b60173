//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users resolved by the identity provider.
    users (user_id) {
        user_id -> Int8,
        username -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Aggregate root: one row per schedule.
    schedules (schedule_id) {
        schedule_id -> Uuid,
        schedule_name -> Varchar,
        memo -> Text,
        created_by -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Candidate time slots; `display_order` preserves submission order.
    candidates (candidate_id) {
        candidate_id -> Int8,
        schedule_id -> Uuid,
        candidate_name -> Varchar,
        display_order -> Int4,
    }
}

diesel::table! {
    /// One answer per `(user_id, candidate_id)`.
    ///
    /// `(candidate_id, schedule_id)` references `candidates`, so an answer can
    /// never point at a candidate of another schedule.
    availabilities (user_id, candidate_id) {
        user_id -> Int8,
        candidate_id -> Int8,
        schedule_id -> Uuid,
        availability -> Int2,
    }
}

diesel::table! {
    /// One comment per `(schedule_id, user_id)`.
    comments (schedule_id, user_id) {
        schedule_id -> Uuid,
        user_id -> Int8,
        comment -> Varchar,
    }
}

diesel::joinable!(schedules -> users (created_by));
diesel::joinable!(candidates -> schedules (schedule_id));
diesel::joinable!(comments -> schedules (schedule_id));
diesel::joinable!(comments -> users (user_id));
diesel::joinable!(availabilities -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    schedules,
    candidates,
    availabilities,
    comments,
);
