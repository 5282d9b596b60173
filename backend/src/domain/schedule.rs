//! Schedule and candidate entities.
//!
//! A schedule is created exactly once, together with its candidates, and is
//! immutable afterwards. Candidates are derived from a free-text block with
//! one slot per non-empty line; their position in that block becomes the
//! display order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{User, UserId};

/// Maximum length of a schedule name, in characters.
pub const SCHEDULE_NAME_MAX: usize = 255;
/// Maximum length of a single candidate name, in characters.
pub const CANDIDATE_NAME_MAX: usize = 255;

/// Validation failures raised while drafting a new schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleValidationError {
    #[error("scheduleName must not be empty")]
    EmptyName,
    #[error("scheduleName must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("candidates must contain at least one non-empty line")]
    NoCandidates,
    #[error("candidate on line {line} must be at most {max} characters")]
    CandidateTooLong { line: usize, max: usize },
}

/// System-generated schedule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(Uuid);

impl ScheduleId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its hyphenated text form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw.trim()).map(Self)
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// System-generated candidate identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(i64);

impl CandidateId {
    /// Wrap a raw identifier.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated schedule title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleName(String);

impl ScheduleName {
    /// Trim and validate a schedule name.
    pub fn new(raw: &str) -> Result<Self, ScheduleValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ScheduleValidationError::EmptyName);
        }
        if trimmed.chars().count() > SCHEDULE_NAME_MAX {
            return Err(ScheduleValidationError::NameTooLong {
                max: SCHEDULE_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ScheduleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Candidate slot label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateName(String);

impl CandidateName {
    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CandidateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split a submitted candidate block into ordered candidate names.
///
/// Lines are split on `\n`, a trailing `\r` is removed, surrounding
/// whitespace is trimmed and blank lines are dropped. The returned order is
/// the display order.
///
/// # Examples
/// ```
/// use scheduler::domain::parse_candidate_names;
///
/// let names = parse_candidate_names("A\r\n\r\nB\r\nC").expect("three candidates");
/// let labels: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
/// assert_eq!(labels, ["A", "B", "C"]);
/// ```
pub fn parse_candidate_names(text: &str) -> Result<Vec<CandidateName>, ScheduleValidationError> {
    let mut names = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line).trim();
        if line.is_empty() {
            continue;
        }
        if line.chars().count() > CANDIDATE_NAME_MAX {
            return Err(ScheduleValidationError::CandidateTooLong {
                line: index + 1,
                max: CANDIDATE_NAME_MAX,
            });
        }
        names.push(CandidateName(line.to_owned()));
    }
    if names.is_empty() {
        return Err(ScheduleValidationError::NoCandidates);
    }
    Ok(names)
}

/// Persisted schedule header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub schedule_id: ScheduleId,
    pub schedule_name: ScheduleName,
    pub memo: String,
    pub created_by: User,
    pub created_at: DateTime<Utc>,
}

/// Persisted candidate slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub candidate_id: CandidateId,
    pub schedule_id: ScheduleId,
    pub candidate_name: CandidateName,
    pub display_order: i32,
}

/// Validated form input for a new schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub schedule_name: ScheduleName,
    pub memo: String,
    pub candidates: Vec<CandidateName>,
}

impl ScheduleDraft {
    /// Validate the submitted form values.
    ///
    /// The memo is kept verbatim, embedded line breaks included.
    pub fn try_new(
        schedule_name: &str,
        memo: impl Into<String>,
        candidates_text: &str,
    ) -> Result<Self, ScheduleValidationError> {
        Ok(Self {
            schedule_name: ScheduleName::new(schedule_name)?,
            memo: memo.into(),
            candidates: parse_candidate_names(candidates_text)?,
        })
    }
}

/// Schedule and candidates ready to persist in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub schedule_id: ScheduleId,
    pub schedule_name: ScheduleName,
    pub memo: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub candidates: Vec<CandidateName>,
}

impl NewSchedule {
    /// Stamp a draft with its identity, owner and creation time.
    pub fn from_draft(
        draft: ScheduleDraft,
        schedule_id: ScheduleId,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ScheduleDraft {
            schedule_name,
            memo,
            candidates,
        } = draft;
        Self {
            schedule_id,
            schedule_name,
            memo,
            created_by,
            created_at,
            candidates,
        }
    }

    /// Candidate names paired with their display order.
    pub fn ordered_candidates(&self) -> impl Iterator<Item = (i32, &CandidateName)> {
        (0_i32..).zip(self.candidates.iter())
    }
}
