//! Rule catalogue.
//!
//! ```text
//! can(action) = visible(actor, edition)        (visibility gate)
//!             ∧ rules.eligible(actor)          (type precondition)
//!             ∧ rules.permits(action, ...)     (per-action predicate)
//! ```
//!
//! Every edition type maps to one [`EditionRules`] implementation through an
//! exhaustive `match` in [`EditionType::rules`]. Types that override nothing
//! use [`DefaultRules`]. A type may only narrow the defaults: overrides add
//! conditions, they never grant what the default predicate refuses.

use crate::{Action, Actor, Capability, Edition, EditionType, Role};

pub trait EditionRules: Send + Sync {
    /// Precondition shared by every action on this type, including `see`.
    fn eligible(&self, _actor: &Actor) -> bool {
        true
    }

    /// Per-action predicate, evaluated only once the edition is visible.
    fn permits(&self, action: Action, actor: &Actor, edition: &Edition) -> bool {
        default_permits(action, actor, edition)
    }

    /// Type-level `create`, asked before any edition of the type exists.
    fn can_create(&self, actor: &Actor) -> bool {
        actor.is_editor()
    }

    fn actions(&self) -> &'static [Action] {
        Action::ALL
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRules;

impl EditionRules for DefaultRules {}

/// Fatality notices are restricted to organisations that handle fatalities.
#[derive(Debug, Default, Clone, Copy)]
pub struct FatalityNoticeRules;

impl EditionRules for FatalityNoticeRules {
    fn eligible(&self, actor: &Actor) -> bool {
        actor.has_capability(Capability::HandlesFatalities)
    }
}

impl EditionType {
    pub fn rules(self) -> &'static dyn EditionRules {
        match self {
            EditionType::FatalityNotice => &FatalityNoticeRules,
            EditionType::Publication
            | EditionType::NewsArticle
            | EditionType::Speech
            | EditionType::DetailedGuide
            | EditionType::CaseStudy
            | EditionType::Consultation => &DefaultRules,
        }
    }
}

pub fn default_permits(action: Action, actor: &Actor, edition: &Edition) -> bool {
    match action {
        Action::See => true,
        Action::Create
        | Action::Update
        | Action::MakeFactCheck
        | Action::ReviewFactCheck
        | Action::MakeEditorialRemark
        | Action::ReviewEditorialRemark
        | Action::Publish
        | Action::Reject
        | Action::ForcePublish
        | Action::LimitAccess => actor.is_editor(),
        Action::Unpublish => actor.role() == Role::GlobalEditor,
        Action::Approve => actor.is_editor() && !edition.was_force_published_by(actor.id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Organisation;
    use uuid::Uuid;

    fn department_editor() -> Actor {
        Actor::department_editor(Uuid::new_v4(), Organisation::new(Uuid::new_v4()))
    }

    #[test]
    fn department_editors_cannot_unpublish() {
        let edition = Edition::builder(EditionType::Publication).build().unwrap();
        assert!(!default_permits(Action::Unpublish, &department_editor(), &edition));
        let global = Actor::global_editor(Uuid::new_v4(), None);
        assert!(default_permits(Action::Unpublish, &global, &edition));
    }

    #[test]
    fn approve_refuses_the_force_publisher() {
        let publisher = department_editor();
        let edition = Edition::builder(EditionType::Publication)
            .force_published_by(publisher.id())
            .build()
            .unwrap();
        assert!(!default_permits(Action::Approve, &publisher, &edition));
        assert!(default_permits(Action::Approve, &department_editor(), &edition));
    }

    #[test]
    fn global_editors_are_not_exempt_from_self_approval() {
        let global = Actor::global_editor(Uuid::new_v4(), None);
        let edition = Edition::builder(EditionType::Speech)
            .force_published_by(global.id())
            .build()
            .unwrap();
        assert!(!default_permits(Action::Approve, &global, &edition));
    }

    #[test]
    fn readers_are_permitted_nothing_but_the_gate() {
        let reader = Actor::reader(Uuid::new_v4(), None);
        let edition = Edition::builder(EditionType::Publication).build().unwrap();
        for action in Action::ALL.iter().filter(|a| **a != Action::See) {
            assert!(!default_permits(*action, &reader, &edition), "{action}");
        }
        assert!(!DefaultRules.can_create(&reader));
    }

    #[test]
    fn fatality_rules_require_capability() {
        let plain = department_editor();
        let capable = Actor::department_editor(
            Uuid::new_v4(),
            Organisation::new(Uuid::new_v4()).with_capability(Capability::HandlesFatalities),
        );
        let rules = EditionType::FatalityNotice.rules();
        assert!(!rules.eligible(&plain));
        assert!(rules.eligible(&capable));
    }

    #[test]
    fn every_type_lists_the_full_catalogue() {
        for ty in EditionType::ALL {
            assert_eq!(ty.rules().actions(), Action::ALL, "{ty}");
        }
    }

    #[test]
    fn non_fatality_types_have_no_precondition() {
        let editor = department_editor();
        for ty in EditionType::ALL
            .iter()
            .filter(|ty| **ty != EditionType::FatalityNotice)
        {
            assert!(ty.rules().eligible(&editor), "{ty}");
        }
    }
}
