//! Project application lifecycle engine.
//!
//! An application moves through `absent -> pending -> {accepted, rejected}`.
//! Accepted and rejected are terminal: nothing transitions back to pending,
//! and a student can never re-apply while any record for them exists (this
//! is a deliberate anti-spam policy, not an oversight).
//!
//! The applicant list predates the status-tracking schema, so three physical
//! shapes coexist in stored data and all three must be tolerated:
//!
//! - **Current**: `{"student": <id>, "status": "...", "appliedAt": "..."}`
//! - **Legacy**: a bare student id, implicitly `pending`
//! - **Corrupted**: anything else (e.g. a stray binary buffer written by an
//!   old client); resolves to no student and never aborts a scan
//!
//! All shape-sniffing lives in [`ApplicantRecord`]; both the uniqueness
//! check in [`apply`] and the scan in [`set_status`] go through the single
//! [`ApplicantRecord::student_id`] resolver.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Application is awaiting a decision by the project owner.
pub const STATUS_PENDING: &str = "pending";

/// Application was accepted by the project owner.
pub const STATUS_ACCEPTED: &str = "accepted";

/// Application was rejected by the project owner.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid application status values.
pub const VALID_APPLICATION_STATUSES: &[&str] =
    &[STATUS_PENDING, STATUS_ACCEPTED, STATUS_REJECTED];

/// Decision state of a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Parse a status string, rejecting anything outside the valid set.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_ACCEPTED => Ok(Self::Accepted),
            STATUS_REJECTED => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_APPLICATION_STATUSES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Accepted => STATUS_ACCEPTED,
            Self::Rejected => STATUS_REJECTED,
        }
    }
}

/// One entry in a project's applicant list, as stored.
///
/// Construct from raw JSON with [`ApplicantRecord::from_value`]; the variant
/// captures which physical shape the stored entry had.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicantRecord {
    /// Current schema: structured record with status and timestamp.
    Current {
        student: DbId,
        status: ApplicationStatus,
        applied_at: Option<Timestamp>,
    },
    /// Pre-migration shape: a bare student id. Implicit status is pending.
    Legacy(DbId),
    /// Unrecognized shape. Matches no student; carried through untouched.
    Corrupted(Value),
}

impl ApplicantRecord {
    /// Decode a raw stored value into its recognized shape.
    ///
    /// Never fails: anything that is not a bare id or a well-formed record
    /// is classified as [`ApplicantRecord::Corrupted`].
    pub fn from_value(value: &Value) -> Self {
        if let Some(id) = value.as_i64() {
            return Self::Legacy(id);
        }

        if let Some(obj) = value.as_object() {
            // A stray buffer field marks a corrupted write from an old client.
            if obj.contains_key("buffer") {
                return Self::Corrupted(value.clone());
            }

            if let Some(student) = obj.get("student").and_then(Value::as_i64) {
                let status = obj
                    .get("status")
                    .and_then(Value::as_str)
                    .and_then(|s| ApplicationStatus::parse(s).ok())
                    .unwrap_or(ApplicationStatus::Pending);
                let applied_at = obj
                    .get("appliedAt")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<Timestamp>().ok());
                return Self::Current {
                    student,
                    status,
                    applied_at,
                };
            }
        }

        Self::Corrupted(value.clone())
    }

    /// Encode back to the stored representation.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Current {
                student,
                status,
                applied_at,
            } => {
                let mut obj = json!({
                    "student": student,
                    "status": status.as_str(),
                });
                if let Some(at) = applied_at {
                    obj["appliedAt"] = json!(at.to_rfc3339());
                }
                obj
            }
            Self::Legacy(id) => json!(id),
            Self::Corrupted(raw) => raw.clone(),
        }
    }

    /// Resolve the student this record belongs to, if any.
    ///
    /// The single source of truth for identifier matching: both the
    /// uniqueness check and the status-transition scan use this, so legacy
    /// and current shapes are treated identically and corrupted records
    /// match nothing.
    pub fn student_id(&self) -> Option<DbId> {
        match self {
            Self::Current { student, .. } => Some(*student),
            Self::Legacy(id) => Some(*id),
            Self::Corrupted(_) => None,
        }
    }

    /// The record's effective status. Legacy records are implicitly pending;
    /// corrupted records have no status.
    pub fn status(&self) -> Option<ApplicationStatus> {
        match self {
            Self::Current { status, .. } => Some(*status),
            Self::Legacy(_) => Some(ApplicationStatus::Pending),
            Self::Corrupted(_) => None,
        }
    }
}

/// Decode a stored applicant array into recognized records.
///
/// Non-array input (possible in hand-edited rows) is treated as empty.
pub fn decode_applicants(raw: &Value) -> Vec<ApplicantRecord> {
    raw.as_array()
        .map(|arr| arr.iter().map(ApplicantRecord::from_value).collect())
        .unwrap_or_default()
}

/// Encode records back to the stored array representation.
pub fn encode_applicants(records: &[ApplicantRecord]) -> Value {
    Value::Array(records.iter().map(ApplicantRecord::to_value).collect())
}

/// Register a new application for `student`, appending a pending record.
///
/// Fails with `Conflict` if any existing record (legacy or current shape)
/// resolves to this student, regardless of its status -- a rejected student
/// cannot re-apply.
pub fn apply(
    records: &mut Vec<ApplicantRecord>,
    student: DbId,
    now: Timestamp,
) -> Result<(), CoreError> {
    let already_applied = records.iter().any(|r| r.student_id() == Some(student));
    if already_applied {
        return Err(CoreError::Conflict(
            "You have already applied to this project".to_string(),
        ));
    }

    records.push(ApplicantRecord::Current {
        student,
        status: ApplicationStatus::Pending,
        applied_at: Some(now),
    });
    Ok(())
}

/// Transition the application of `student` to `status`.
///
/// Scans in insertion order and stops at the first record that resolves to
/// the target student; corrupted records are skipped, not errors. A legacy
/// record is upgraded in place to the current shape with a freshly assigned
/// applied-at timestamp. Fails with `NotFound` if the full scan finds no
/// matching record.
pub fn set_status(
    records: &mut [ApplicantRecord],
    student: DbId,
    status: ApplicationStatus,
    now: Timestamp,
) -> Result<(), CoreError> {
    for record in records.iter_mut() {
        if record.student_id() != Some(student) {
            continue;
        }

        match record {
            ApplicantRecord::Current {
                status: current, ..
            } => {
                *current = status;
            }
            ApplicantRecord::Legacy(id) => {
                // Lazy upgrade: legacy records gain the full shape only when
                // a status transition first touches them.
                *record = ApplicantRecord::Current {
                    student: *id,
                    status,
                    applied_at: Some(now),
                };
            }
            ApplicantRecord::Corrupted(_) => unreachable!("corrupted records resolve to no id"),
        }
        return Ok(());
    }

    Err(CoreError::NotFound {
        entity: "Applicant",
        id: student,
    })
}
