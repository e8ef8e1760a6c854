//! Editorial authority: decides whether an actor may perform a workflow
//! action on an edition.
//!
//! ```text
//! Directory ──► Authority ──► Enforcer ──► rules (per EditionType)
//!  (rows)      (snapshots,     (visibility      ├── DefaultRules
//!               logging)        gate)           └── FatalityNoticeRules
//! ```
//!
//! Denial is `false`, never an error. Errors are reserved for unknown
//! action names, actions that do not apply, and malformed snapshots, which
//! are rejected when an [`Actor`] or [`Edition`] is built.

pub mod action;
pub mod actor;
pub mod authority;
pub mod directory;
pub mod edition;
pub mod enforcer;
pub mod error;
pub mod rules;
pub mod visibility;

pub use action::Action;
pub use actor::{Actor, ActorRecord, Capability, Organisation, Role};
pub use authority::{Authority, AuthorityError};
pub use directory::{Directory, DirectoryError, DirectoryFixture, InMemoryDirectory};
pub use edition::{Edition, EditionBuilder, EditionRecord, EditionState, EditionType};
pub use enforcer::{Enforcer, TypeEnforcer, actions_for, authorize};
pub use error::{AuthzError, SnapshotError};
pub use rules::{DefaultRules, EditionRules, FatalityNoticeRules};
