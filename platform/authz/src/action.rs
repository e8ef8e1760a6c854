use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::AuthzError;

/// Workflow actions an actor may attempt on an edition.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    See,
    Create,
    Update,
    Approve,
    Publish,
    ForcePublish,
    Unpublish,
    Reject,
    MakeFactCheck,
    ReviewFactCheck,
    MakeEditorialRemark,
    ReviewEditorialRemark,
    LimitAccess,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::See,
        Action::Create,
        Action::Update,
        Action::Approve,
        Action::Publish,
        Action::ForcePublish,
        Action::Unpublish,
        Action::Reject,
        Action::MakeFactCheck,
        Action::ReviewFactCheck,
        Action::MakeEditorialRemark,
        Action::ReviewEditorialRemark,
        Action::LimitAccess,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::See => "see",
            Action::Create => "create",
            Action::Update => "update",
            Action::Approve => "approve",
            Action::Publish => "publish",
            Action::ForcePublish => "force_publish",
            Action::Unpublish => "unpublish",
            Action::Reject => "reject",
            Action::MakeFactCheck => "make_fact_check",
            Action::ReviewFactCheck => "review_fact_check",
            Action::MakeEditorialRemark => "make_editorial_remark",
            Action::ReviewEditorialRemark => "review_editorial_remark",
            Action::LimitAccess => "limit_access",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AuthzError::UnknownAction(value.to_string()))
    }
}
