//! Decision entry points.

use crate::{Action, Actor, AuthzError, Edition, EditionType, rules::EditionRules, visibility};

/// Answers `can(action)` for one actor against one edition.
///
/// Holds no state beyond the two borrowed snapshots, so identical inputs
/// always produce identical answers. Build a new one per decision.
#[derive(Clone, Copy)]
pub struct Enforcer<'a> {
    actor: &'a Actor,
    edition: &'a Edition,
    rules: &'static dyn EditionRules,
}

impl<'a> Enforcer<'a> {
    pub fn new(actor: &'a Actor, edition: &'a Edition) -> Self {
        Self {
            actor,
            edition,
            rules: edition.edition_type().rules(),
        }
    }

    pub fn can(&self, action: Action) -> bool {
        if !self.can_see() {
            return false;
        }
        match action {
            Action::See => true,
            _ => self.rules.permits(action, self.actor, self.edition),
        }
    }

    /// Same as [`Enforcer::can`] for callers holding an action name.
    pub fn can_named(&self, action: &str) -> Result<bool, AuthzError> {
        Ok(self.can(action.parse()?))
    }

    /// Every catalogued action that evaluates true.
    pub fn permitted_actions(&self) -> Vec<Action> {
        self.rules
            .actions()
            .iter()
            .copied()
            .filter(|action| self.can(*action))
            .collect()
    }

    fn can_see(&self) -> bool {
        visibility::visible(self.actor, self.edition) && self.rules.eligible(self.actor)
    }
}

/// Type-level checks, made before an edition of the type exists.
#[derive(Clone, Copy)]
pub struct TypeEnforcer<'a> {
    actor: &'a Actor,
    edition_type: EditionType,
}

impl<'a> TypeEnforcer<'a> {
    pub fn new(actor: &'a Actor, edition_type: EditionType) -> Self {
        Self {
            actor,
            edition_type,
        }
    }

    /// Only `create` is meaningful without an edition.
    pub fn can(&self, action: Action) -> Result<bool, AuthzError> {
        let rules = self.edition_type.rules();
        match action {
            Action::Create => Ok(rules.eligible(self.actor) && rules.can_create(self.actor)),
            _ => Err(AuthzError::NotApplicable {
                action,
                edition_type: self.edition_type,
            }),
        }
    }
}

pub fn authorize(actor: &Actor, edition: &Edition, action: Action) -> bool {
    Enforcer::new(actor, edition).can(action)
}

pub fn actions_for(edition_type: EditionType) -> &'static [Action] {
    edition_type.rules().actions()
}
