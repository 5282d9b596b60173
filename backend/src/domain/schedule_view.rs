//! Read model assembled for a schedule page.
//!
//! The view answers three questions for rendering: which candidates exist and
//! in what order, who participates, and what each participant answered. The
//! viewer always participates, even before answering anything.

use std::collections::HashMap;

use super::{
    AvailabilityValue, Candidate, CandidateId, CommentText, Schedule, ScheduleAggregate, User,
    UserId,
};

/// Schedule presentation model for one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    schedule: Schedule,
    candidates: Vec<Candidate>,
    participants: Vec<User>,
    availabilities: HashMap<(CandidateId, UserId), AvailabilityValue>,
    comments: HashMap<UserId, CommentText>,
}

impl ScheduleView {
    /// Assemble the view from a loaded aggregate.
    ///
    /// Candidates are ordered by display order, ties broken by id. The viewer
    /// is listed first, followed by other participants ordered by user id.
    pub fn assemble(aggregate: ScheduleAggregate, viewer: &User) -> Self {
        let ScheduleAggregate {
            schedule,
            mut candidates,
            availabilities,
            comments,
            participants,
        } = aggregate;

        candidates.sort_by_key(|candidate| (candidate.display_order, candidate.candidate_id));

        let mut others: Vec<User> = participants
            .into_iter()
            .filter(|user| user.user_id() != viewer.user_id())
            .collect();
        others.sort_by_key(User::user_id);
        others.dedup_by_key(|user| user.user_id());
        let mut ordered = Vec::with_capacity(others.len() + 1);
        ordered.push(viewer.clone());
        ordered.extend(others);

        let availabilities = availabilities
            .into_iter()
            .map(|row| ((row.candidate_id, row.user_id), row.availability))
            .collect();
        let comments = comments
            .into_iter()
            .map(|row| (row.user_id, row.comment))
            .collect();

        Self {
            schedule,
            candidates,
            participants: ordered,
            availabilities,
            comments,
        }
    }

    /// Schedule header.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Candidates in display order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Participants, viewer first.
    pub fn participants(&self) -> &[User] {
        &self.participants
    }

    /// Answer for a cell; unanswered cells report [`AvailabilityValue::UNKNOWN`].
    pub fn availability(&self, candidate_id: CandidateId, user_id: UserId) -> AvailabilityValue {
        self.availabilities
            .get(&(candidate_id, user_id))
            .copied()
            .unwrap_or(AvailabilityValue::UNKNOWN)
    }

    /// Comment left by a participant, if any.
    pub fn comment(&self, user_id: UserId) -> Option<&CommentText> {
        self.comments.get(&user_id)
    }
}
