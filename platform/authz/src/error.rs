//! Faults raised by the authority.
//!
//! A denied action is never an error: [`crate::Enforcer::can`] returns
//! `false`. The types here cover programmer mistakes (unknown or
//! inapplicable actions) and malformed snapshots handed over by the data
//! layer.

use thiserror::Error;
use uuid::Uuid;

use crate::{Action, EditionType};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("action {action} does not apply to {edition_type} at type level")]
    NotApplicable {
        action: Action,
        edition_type: EditionType,
    },
}

/// Rejection of an actor or edition snapshot at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("department editor {actor} has no organisation")]
    MissingOrganisation { actor: Uuid },
    #[error("edition {edition} needs review but records no force publisher")]
    ReviewWithoutPublisher { edition: Uuid },
}
