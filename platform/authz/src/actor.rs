//! Actor and organisation snapshots.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SnapshotError;

/// Capabilities an organisation may hold. Edition types that need one
/// name it in their rules.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    HandlesFatalities,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Organisation {
    pub id: Uuid,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
}

impl Organisation {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn handles_fatalities(&self) -> bool {
        self.has(Capability::HandlesFatalities)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    GlobalEditor,
    DepartmentEditor,
    Reader,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::GlobalEditor => "global_editor",
            Role::DepartmentEditor => "department_editor",
            Role::Reader => "reader",
        }
    }
}

/// Raw user row as handed over by the data layer. The organisation is a
/// reference; capabilities are resolved separately.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ActorRecord {
    pub id: Uuid,
    #[serde(default)]
    pub is_global_editor: bool,
    #[serde(default)]
    pub is_department_editor: bool,
    #[serde(default)]
    pub organisation_id: Option<Uuid>,
}

/// Validated, immutable view of the user attempting an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    id: Uuid,
    role: Role,
    organisation: Option<Organisation>,
}

impl Actor {
    pub fn global_editor(id: Uuid, organisation: Option<Organisation>) -> Self {
        Self {
            id,
            role: Role::GlobalEditor,
            organisation,
        }
    }

    pub fn department_editor(id: Uuid, organisation: Organisation) -> Self {
        Self {
            id,
            role: Role::DepartmentEditor,
            organisation: Some(organisation),
        }
    }

    pub fn reader(id: Uuid, organisation: Option<Organisation>) -> Self {
        Self {
            id,
            role: Role::Reader,
            organisation,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn organisation(&self) -> Option<&Organisation> {
        self.organisation.as_ref()
    }

    pub fn is_editor(&self) -> bool {
        matches!(self.role, Role::GlobalEditor | Role::DepartmentEditor)
    }

    pub fn belongs_to(&self, org_id: Uuid) -> bool {
        self.organisation.as_ref().is_some_and(|org| org.id == org_id)
    }

    /// Actors without an organisation hold no capabilities.
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.organisation
            .as_ref()
            .is_some_and(|org| org.has(capability))
    }

    /// Builds a snapshot from a raw row plus its resolved organisation.
    /// When both role flags are set the global role wins.
    pub fn from_record(
        record: &ActorRecord,
        organisation: Option<Organisation>,
    ) -> Result<Self, SnapshotError> {
        let id = record.id;
        if record.is_global_editor {
            return Ok(Actor::global_editor(id, organisation));
        }
        if record.is_department_editor {
            let organisation =
                organisation.ok_or(SnapshotError::MissingOrganisation { actor: id })?;
            return Ok(Actor::department_editor(id, organisation));
        }
        Ok(Actor::reader(id, organisation))
    }
}
