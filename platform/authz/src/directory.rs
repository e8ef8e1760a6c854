//! Read-only lookups the authority needs from the data layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{ActorRecord, EditionRecord, Organisation};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory backend unavailable: {0}")]
    Unavailable(String),
    #[error("invalid directory fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

/// Source of actor, edition and organisation rows. `Ok(None)` means the
/// row does not exist; `Err` means the lookup itself failed.
pub trait Directory: Send + Sync {
    fn actor(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<ActorRecord>, DirectoryError>> + Send;

    fn edition(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<EditionRecord>, DirectoryError>> + Send;

    fn organisation(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Organisation>, DirectoryError>> + Send;
}

/// On-disk shape of an in-memory directory.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DirectoryFixture {
    #[serde(default)]
    pub organisations: Vec<Organisation>,
    #[serde(default)]
    pub actors: Vec<ActorRecord>,
    #[serde(default)]
    pub editions: Vec<EditionRecord>,
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    organisations: HashMap<Uuid, Organisation>,
    actors: HashMap<Uuid, ActorRecord>,
    editions: HashMap<Uuid, EditionRecord>,
}

impl InMemoryDirectory {
    pub fn from_json(raw: &str) -> Result<Self, DirectoryError> {
        let fixture: DirectoryFixture = serde_json::from_str(raw)?;
        Ok(Self::from(fixture))
    }

    pub fn with_organisation(mut self, organisation: Organisation) -> Self {
        self.organisations.insert(organisation.id, organisation);
        self
    }

    pub fn with_actor(mut self, actor: ActorRecord) -> Self {
        self.actors.insert(actor.id, actor);
        self
    }

    pub fn with_edition(mut self, edition: EditionRecord) -> Self {
        self.editions.insert(edition.id, edition);
        self
    }

    pub fn actor_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.actors.keys().copied()
    }

    pub fn edition_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.editions.keys().copied()
    }
}

impl From<DirectoryFixture> for InMemoryDirectory {
    fn from(fixture: DirectoryFixture) -> Self {
        let directory = fixture
            .organisations
            .into_iter()
            .fold(Self::default(), Self::with_organisation);
        let directory = fixture
            .actors
            .into_iter()
            .fold(directory, Self::with_actor);
        fixture
            .editions
            .into_iter()
            .fold(directory, Self::with_edition)
    }
}

impl Directory for InMemoryDirectory {
    async fn actor(&self, id: Uuid) -> Result<Option<ActorRecord>, DirectoryError> {
        Ok(self.actors.get(&id).cloned())
    }

    async fn edition(&self, id: Uuid) -> Result<Option<EditionRecord>, DirectoryError> {
        Ok(self.editions.get(&id).cloned())
    }

    async fn organisation(&self, id: Uuid) -> Result<Option<Organisation>, DirectoryError> {
        Ok(self.organisations.get(&id).cloned())
    }
}
