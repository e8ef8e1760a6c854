//! The visibility gate every other action sits behind.

use crate::{Actor, Edition};

/// Whether `actor` may know `edition` exists, before any type-specific
/// narrowing. Readers see nothing. An access limit admits only members of
/// the listed organisations, whatever their role.
pub fn visible(actor: &Actor, edition: &Edition) -> bool {
    if !actor.is_editor() {
        return false;
    }
    if !edition.is_access_limited() {
        return true;
    }
    actor
        .organisation()
        .is_some_and(|org| edition.is_limited_to(org.id))
}
