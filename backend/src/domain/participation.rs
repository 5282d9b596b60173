//! Participant answers: per-candidate availability and per-schedule comments.
//!
//! Both are keyed records. At most one availability exists for each
//! `(user, candidate)` pair and at most one comment for each
//! `(schedule, user)` pair; resubmitting overwrites the previous value.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CandidateId, ScheduleId, User, UserId};

/// Maximum comment length, in characters.
pub const COMMENT_MAX: usize = 255;

/// Validation failures for participant answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParticipationValidationError {
    #[error("availability must be between {min} and {max}, got {value}")]
    AvailabilityOutOfRange { value: i64, min: u8, max: u8 },
    #[error("comment must be at most {max} characters")]
    CommentTooLong { max: usize },
}

/// A participant's answer for one candidate.
///
/// The integer is opaque to the aggregate; presentation decides what each
/// value means. Zero is the default for unanswered candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityValue(u8);

impl AvailabilityValue {
    /// Value reported for candidates without a stored answer.
    pub const UNKNOWN: Self = Self(0);
    /// Smallest accepted value.
    pub const MIN: u8 = 0;
    /// Largest accepted value.
    pub const MAX: u8 = 2;

    /// Validate an integer answer.
    pub fn new(value: i64) -> Result<Self, ParticipationValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|candidate| (Self::MIN..=Self::MAX).contains(candidate))
            .map(Self)
            .ok_or(ParticipationValidationError::AvailabilityOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Interpret a submitted value.
    ///
    /// Only the leading integer counts: `"2.0"` and `"2abc"` both read as
    /// `2`. A missing value or one without leading digits falls back to
    /// [`Self::UNKNOWN`]; an integer outside the accepted range, including
    /// one too large for `i64`, is rejected.
    ///
    /// # Examples
    /// ```
    /// use scheduler::domain::AvailabilityValue;
    ///
    /// assert_eq!(AvailabilityValue::from_submitted(None).expect("missing is unknown").value(), 0);
    /// assert_eq!(AvailabilityValue::from_submitted(Some("2")).expect("in range").value(), 2);
    /// assert_eq!(AvailabilityValue::from_submitted(Some("yes")).expect("non-numeric is unknown").value(), 0);
    /// assert_eq!(AvailabilityValue::from_submitted(Some("1.5")).expect("leading digits").value(), 1);
    /// assert!(AvailabilityValue::from_submitted(Some("7")).is_err());
    /// ```
    pub fn from_submitted(raw: Option<&str>) -> Result<Self, ParticipationValidationError> {
        match raw.and_then(leading_integer) {
            Some(value) => Self::new(value),
            None => Ok(Self::UNKNOWN),
        }
    }

    pub(crate) fn from_db(value: i16) -> Self {
        Self(u8::try_from(value).unwrap_or_default())
    }

    /// Raw integer value.
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Signed integer prefix of `text` after leading whitespace.
///
/// Digit runs too long for `i64` saturate so range checks still reject them.
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    let digits = &unsigned[..digits_len];
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_owned()
    };
    Some(signed.parse::<i64>().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

impl fmt::Display for AvailabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text remark; may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentText(String);

impl CommentText {
    /// Validate a comment body.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParticipationValidationError> {
        let raw = raw.into();
        if raw.chars().count() > COMMENT_MAX {
            return Err(ParticipationValidationError::CommentTooLong { max: COMMENT_MAX });
        }
        Ok(Self(raw))
    }

    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Stored availability answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub schedule_id: ScheduleId,
    pub candidate_id: CandidateId,
    pub user_id: UserId,
    pub availability: AvailabilityValue,
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub schedule_id: ScheduleId,
    pub user_id: UserId,
    pub comment: CommentText,
}

/// Everything persisted for one schedule, as loaded from storage.
///
/// `participants` lists every user referenced by an availability or comment
/// row, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleAggregate {
    pub schedule: super::Schedule,
    pub candidates: Vec<super::Candidate>,
    pub availabilities: Vec<Availability>,
    pub comments: Vec<Comment>,
    pub participants: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 0)]
    #[case(Some(""), 0)]
    #[case(Some("abc"), 0)]
    #[case(Some("0"), 0)]
    #[case(Some("1"), 1)]
    #[case(Some(" 2 "), 2)]
    #[case(Some("2.0"), 2)]
    #[case(Some("2abc"), 2)]
    #[case(Some("+1"), 1)]
    #[case(Some("-"), 0)]
    #[case(Some(".5"), 0)]
    fn submitted_values_parse_leniently(#[case] raw: Option<&str>, #[case] expected: u8) {
        let value = AvailabilityValue::from_submitted(raw).expect("accepted");
        assert_eq!(value.value(), expected);
    }

    #[rstest]
    #[case("3")]
    #[case("-1")]
    #[case("99999999999")]
    #[case("99999999999999999999")]
    #[case("-99999999999999999999")]
    #[case("3.9")]
    fn out_of_range_values_are_rejected(#[case] raw: &str) {
        let err = AvailabilityValue::from_submitted(Some(raw)).expect_err("rejected");
        assert!(matches!(
            err,
            ParticipationValidationError::AvailabilityOutOfRange { .. }
        ));
    }

    #[rstest]
    fn unknown_is_the_default() {
        assert_eq!(AvailabilityValue::default(), AvailabilityValue::UNKNOWN);
    }

    #[rstest]
    #[case("", true)]
    #[case("testcomment", true)]
    fn comments_may_be_empty(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(CommentText::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn overlong_comment_is_rejected() {
        let raw = "c".repeat(COMMENT_MAX + 1);
        assert_eq!(
            CommentText::new(raw),
            Err(ParticipationValidationError::CommentTooLong { max: COMMENT_MAX })
        );
    }
}
