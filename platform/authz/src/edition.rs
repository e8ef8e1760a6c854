//! Edition snapshots.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SnapshotError;

/// Edition subtypes. Each variant selects its rule set in [`crate::rules`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditionType {
    Publication,
    NewsArticle,
    Speech,
    DetailedGuide,
    CaseStudy,
    Consultation,
    FatalityNotice,
}

impl EditionType {
    pub const ALL: &'static [EditionType] = &[
        EditionType::Publication,
        EditionType::NewsArticle,
        EditionType::Speech,
        EditionType::DetailedGuide,
        EditionType::CaseStudy,
        EditionType::Consultation,
        EditionType::FatalityNotice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EditionType::Publication => "publication",
            EditionType::NewsArticle => "news_article",
            EditionType::Speech => "speech",
            EditionType::DetailedGuide => "detailed_guide",
            EditionType::CaseStudy => "case_study",
            EditionType::Consultation => "consultation",
            EditionType::FatalityNotice => "fatality_notice",
        }
    }
}

impl fmt::Display for EditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.replace('-', "_");
        EditionType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == normalized)
            .ok_or_else(|| format!("unknown edition type: {value}"))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditionState {
    #[default]
    Draft,
    Submitted,
    Published,
    Rejected,
    Withdrawn,
}

/// Raw edition row as handed over by the data layer.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EditionRecord {
    pub id: Uuid,
    pub edition_type: EditionType,
    #[serde(default)]
    pub state: EditionState,
    #[serde(default)]
    pub owning_organisations: BTreeSet<Uuid>,
    #[serde(default)]
    pub access_limited_to: BTreeSet<Uuid>,
    #[serde(default)]
    pub force_published_by: Option<Uuid>,
    #[serde(default)]
    pub needs_review: bool,
}

/// Validated, point-in-time view of an edition.
///
/// An empty `access_limited_to` means the edition is unrestricted.
/// `force_published_by` and `needs_review` are written by the publishing
/// workflow; the authority only reads them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edition {
    id: Uuid,
    edition_type: EditionType,
    state: EditionState,
    owning_organisations: BTreeSet<Uuid>,
    access_limited_to: BTreeSet<Uuid>,
    force_published_by: Option<Uuid>,
    needs_review: bool,
}

impl Edition {
    pub fn builder(edition_type: EditionType) -> EditionBuilder {
        EditionBuilder::new(edition_type)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn edition_type(&self) -> EditionType {
        self.edition_type
    }

    pub fn state(&self) -> EditionState {
        self.state
    }

    pub fn owning_organisations(&self) -> &BTreeSet<Uuid> {
        &self.owning_organisations
    }

    pub fn access_limited_to(&self) -> &BTreeSet<Uuid> {
        &self.access_limited_to
    }

    pub fn force_published_by(&self) -> Option<Uuid> {
        self.force_published_by
    }

    pub fn needs_review(&self) -> bool {
        self.needs_review
    }

    pub fn is_access_limited(&self) -> bool {
        !self.access_limited_to.is_empty()
    }

    pub fn is_limited_to(&self, org_id: Uuid) -> bool {
        self.access_limited_to.contains(&org_id)
    }

    pub fn was_force_published_by(&self, actor_id: Uuid) -> bool {
        self.force_published_by == Some(actor_id)
    }
}

impl TryFrom<EditionRecord> for Edition {
    type Error = SnapshotError;

    fn try_from(record: EditionRecord) -> Result<Self, Self::Error> {
        if record.needs_review && record.force_published_by.is_none() {
            return Err(SnapshotError::ReviewWithoutPublisher { edition: record.id });
        }
        Ok(Self {
            id: record.id,
            edition_type: record.edition_type,
            state: record.state,
            owning_organisations: record.owning_organisations,
            access_limited_to: record.access_limited_to,
            force_published_by: record.force_published_by,
            needs_review: record.needs_review,
        })
    }
}

impl From<&Edition> for EditionRecord {
    fn from(edition: &Edition) -> Self {
        Self {
            id: edition.id,
            edition_type: edition.edition_type,
            state: edition.state,
            owning_organisations: edition.owning_organisations.clone(),
            access_limited_to: edition.access_limited_to.clone(),
            force_published_by: edition.force_published_by,
            needs_review: edition.needs_review,
        }
    }
}

/// Builder used by tests and fixtures; validation runs in [`EditionBuilder::build`].
#[derive(Clone, Debug)]
pub struct EditionBuilder {
    record: EditionRecord,
}

impl EditionBuilder {
    fn new(edition_type: EditionType) -> Self {
        Self {
            record: EditionRecord {
                id: Uuid::new_v4(),
                edition_type,
                state: EditionState::Draft,
                owning_organisations: BTreeSet::new(),
                access_limited_to: BTreeSet::new(),
                force_published_by: None,
                needs_review: false,
            },
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.record.id = id;
        self
    }

    pub fn state(mut self, state: EditionState) -> Self {
        self.record.state = state;
        self
    }

    pub fn owned_by(mut self, org_id: Uuid) -> Self {
        self.record.owning_organisations.insert(org_id);
        self
    }

    pub fn limited_to(mut self, orgs: impl IntoIterator<Item = Uuid>) -> Self {
        self.record.access_limited_to.extend(orgs);
        self
    }

    /// Marks the edition as force published by `actor_id`, which leaves it
    /// published and awaiting review.
    pub fn force_published_by(mut self, actor_id: Uuid) -> Self {
        self.record.state = EditionState::Published;
        self.record.force_published_by = Some(actor_id);
        self.record.needs_review = true;
        self
    }

    pub fn build(self) -> Result<Edition, SnapshotError> {
        Edition::try_from(self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_flag_without_publisher_is_rejected() {
        let id = Uuid::new_v4();
        let record = EditionRecord {
            id,
            edition_type: EditionType::Speech,
            state: EditionState::Published,
            owning_organisations: BTreeSet::new(),
            access_limited_to: BTreeSet::new(),
            force_published_by: None,
            needs_review: true,
        };
        assert_eq!(
            Edition::try_from(record),
            Err(SnapshotError::ReviewWithoutPublisher { edition: id })
        );
    }

    #[test]
    fn builder_force_publish_sets_review_flag() {
        let actor = Uuid::new_v4();
        let edition = Edition::builder(EditionType::FatalityNotice)
            .force_published_by(actor)
            .build()
            .unwrap();
        assert!(edition.needs_review());
        assert_eq!(edition.state(), EditionState::Published);
        assert!(edition.was_force_published_by(actor));
        assert!(!edition.was_force_published_by(Uuid::new_v4()));
    }

    #[test]
    fn access_limit_is_membership() {
        let org = Uuid::new_v4();
        let open = Edition::builder(EditionType::NewsArticle).build().unwrap();
        assert!(!open.is_access_limited());

        let limited = Edition::builder(EditionType::NewsArticle)
            .limited_to([org])
            .build()
            .unwrap();
        assert!(limited.is_access_limited());
        assert!(limited.is_limited_to(org));
        assert!(!limited.is_limited_to(Uuid::new_v4()));
    }

    #[test]
    fn edition_type_parses_kebab_and_snake_case() {
        assert_eq!(
            "fatality-notice".parse::<EditionType>(),
            Ok(EditionType::FatalityNotice)
        );
        assert_eq!(
            "news_article".parse::<EditionType>(),
            Ok(EditionType::NewsArticle)
        );
        assert!("memo".parse::<EditionType>().is_err());
    }

    #[test]
    fn record_defaults_to_unrestricted_draft() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{id}","edition_type":"publication"}}"#);
        let record: EditionRecord = serde_json::from_str(&json).unwrap();
        let edition = Edition::try_from(record).unwrap();
        assert_eq!(edition.state(), EditionState::Draft);
        assert!(!edition.is_access_limited());
        assert_eq!(edition.force_published_by(), None);
    }
}
