//! Service boundary: loads snapshots by id and asks the enforcer.
//!
//! The enforcer never logs; this layer records decisions at `debug` and
//! faults at `warn`.

use thiserror::Error;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
    Action, Actor, AuthzError, Directory, DirectoryError, Edition, EditionType, Enforcer,
    SnapshotError, TypeEnforcer, actions_for,
};

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("actor {0} not found")]
    ActorNotFound(Uuid),
    #[error("edition {0} not found")]
    EditionNotFound(Uuid),
    #[error("organisation {0} not found")]
    OrganisationNotFound(Uuid),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Authz(#[from] AuthzError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl AuthorityError {
    /// Stable code for callers mapping faults onto their own error surface.
    pub fn code(&self) -> &'static str {
        match self {
            AuthorityError::ActorNotFound(_)
            | AuthorityError::EditionNotFound(_)
            | AuthorityError::OrganisationNotFound(_) => "NOT_FOUND",
            AuthorityError::Snapshot(_) => "INVALID_SNAPSHOT",
            AuthorityError::Authz(_) => "INVALID_ACTION",
            AuthorityError::Directory(_) => "DIRECTORY",
        }
    }
}

#[derive(Debug)]
pub struct Authority<D> {
    directory: D,
}

impl<D: Directory> Authority<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn actions_for(&self, edition_type: EditionType) -> &'static [Action] {
        actions_for(edition_type)
    }

    pub async fn load_actor(&self, id: Uuid) -> Result<Actor, AuthorityError> {
        let record = self
            .directory
            .actor(id)
            .await?
            .ok_or(AuthorityError::ActorNotFound(id))?;
        let organisation = match record.organisation_id {
            Some(org_id) => Some(
                self.directory
                    .organisation(org_id)
                    .await?
                    .ok_or(AuthorityError::OrganisationNotFound(org_id))?,
            ),
            None => None,
        };
        Ok(Actor::from_record(&record, organisation)?)
    }

    pub async fn load_edition(&self, id: Uuid) -> Result<Edition, AuthorityError> {
        let record = self
            .directory
            .edition(id)
            .await?
            .ok_or(AuthorityError::EditionNotFound(id))?;
        Ok(Edition::try_from(record)?)
    }

    #[instrument(skip(self, action), fields(action = %action))]
    pub async fn authorize(
        &self,
        actor_id: Uuid,
        edition_id: Uuid,
        action: Action,
    ) -> Result<bool, AuthorityError> {
        let (actor, edition) = self.load_pair(actor_id, edition_id).await?;
        let allowed = Enforcer::new(&actor, &edition).can(action);
        debug!(
            role = actor.role().as_str(),
            edition_type = %edition.edition_type(),
            allowed,
            "authorization decision"
        );
        Ok(allowed)
    }

    /// Parses `action` before touching the directory, so a bad name is
    /// reported even when the ids are unknown.
    pub async fn authorize_named(
        &self,
        actor_id: Uuid,
        edition_id: Uuid,
        action: &str,
    ) -> Result<bool, AuthorityError> {
        let action = action
            .parse::<Action>()
            .inspect_err(|err| warn!(error = %err, "rejected action name"))?;
        self.authorize(actor_id, edition_id, action).await
    }

    #[instrument(skip(self))]
    pub async fn permitted(
        &self,
        actor_id: Uuid,
        edition_id: Uuid,
    ) -> Result<Vec<Action>, AuthorityError> {
        let (actor, edition) = self.load_pair(actor_id, edition_id).await?;
        let permitted = Enforcer::new(&actor, &edition).permitted_actions();
        debug!(count = permitted.len(), "permitted actions");
        Ok(permitted)
    }

    #[instrument(skip(self, edition_type), fields(edition_type = %edition_type))]
    pub async fn can_create(
        &self,
        actor_id: Uuid,
        edition_type: EditionType,
    ) -> Result<bool, AuthorityError> {
        let actor = self.load_actor(actor_id).await.inspect_err(log_fault)?;
        let allowed = TypeEnforcer::new(&actor, edition_type).can(Action::Create)?;
        debug!(role = actor.role().as_str(), allowed, "create decision");
        Ok(allowed)
    }

    async fn load_pair(
        &self,
        actor_id: Uuid,
        edition_id: Uuid,
    ) -> Result<(Actor, Edition), AuthorityError> {
        let actor = self.load_actor(actor_id).await.inspect_err(log_fault)?;
        let edition = self.load_edition(edition_id).await.inspect_err(log_fault)?;
        Ok((actor, edition))
    }
}

fn log_fault(err: &AuthorityError) {
    warn!(error = %err, code = err.code(), "snapshot load failed");
}
