use platform_authz::{
    Action, Actor, Capability, Edition, EditionRules, EditionType, Enforcer, Organisation, Role,
};
use proptest::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug)]
struct Scenario {
    actor: Actor,
    edition: Edition,
}

fn org_pool() -> [Uuid; 3] {
    [
        Uuid::from_u128(0xa1),
        Uuid::from_u128(0xb2),
        Uuid::from_u128(0xc3),
    ]
}

fn arb_organisation() -> impl Strategy<Value = Organisation> {
    (0..3usize, any::<bool>()).prop_map(|(idx, handles)| {
        let org = Organisation::new(org_pool()[idx]);
        if handles {
            org.with_capability(Capability::HandlesFatalities)
        } else {
            org
        }
    })
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::GlobalEditor),
        Just(Role::DepartmentEditor),
        Just(Role::Reader),
    ]
}

fn arb_actor() -> impl Strategy<Value = Actor> {
    (arb_role(), arb_organisation(), any::<bool>(), any::<u128>()).prop_map(
        |(role, org, has_org, raw_id)| {
            let id = Uuid::from_u128(raw_id);
            match role {
                Role::GlobalEditor => Actor::global_editor(id, has_org.then_some(org)),
                Role::DepartmentEditor => Actor::department_editor(id, org),
                Role::Reader => Actor::reader(id, has_org.then_some(org)),
            }
        },
    )
}

fn arb_edition_type() -> impl Strategy<Value = EditionType> {
    proptest::sample::select(EditionType::ALL.to_vec())
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (
        arb_actor(),
        arb_edition_type(),
        proptest::sample::subsequence(org_pool().to_vec(), 0..=3),
        0..3u8,
    )
        .prop_map(|(actor, edition_type, limited, publisher)| {
            let mut builder = Edition::builder(edition_type).limited_to(limited);
            builder = match publisher {
                0 => builder,
                1 => builder.force_published_by(actor.id()),
                _ => builder.force_published_by(Uuid::new_v4()),
            };
            let edition = builder.build().expect("generated edition is well formed");
            Scenario { actor, edition }
        })
}

proptest! {
    #[test]
    fn every_action_requires_see(s in arb_scenario()) {
        let enforcer = Enforcer::new(&s.actor, &s.edition);
        if !enforcer.can(Action::See) {
            for action in Action::ALL {
                prop_assert!(!enforcer.can(*action), "{} allowed without see", action);
            }
        }
    }

    #[test]
    fn unrestricted_editions_are_seen_by_eligible_editors(s in arb_scenario()) {
        let eligible = s.edition.edition_type().rules().eligible(&s.actor);
        if !s.edition.is_access_limited() && s.actor.is_editor() && eligible {
            prop_assert!(Enforcer::new(&s.actor, &s.edition).can(Action::See));
        }
    }

    #[test]
    fn access_limit_excludes_outsiders(s in arb_scenario()) {
        let inside = s
            .actor
            .organisation()
            .is_some_and(|org| s.edition.is_limited_to(org.id));
        if s.edition.is_access_limited() && !inside {
            let enforcer = Enforcer::new(&s.actor, &s.edition);
            prop_assert!(enforcer.permitted_actions().is_empty());
        }
    }

    #[test]
    fn fatality_notices_need_the_capability(s in arb_scenario()) {
        if s.edition.edition_type() == EditionType::FatalityNotice
            && !s.actor.has_capability(Capability::HandlesFatalities)
        {
            let enforcer = Enforcer::new(&s.actor, &s.edition);
            prop_assert!(enforcer.permitted_actions().is_empty());
        }
    }

    #[test]
    fn department_editors_never_unpublish(s in arb_scenario()) {
        if s.actor.role() == Role::DepartmentEditor {
            prop_assert!(!Enforcer::new(&s.actor, &s.edition).can(Action::Unpublish));
        }
    }

    #[test]
    fn readers_get_nothing(s in arb_scenario()) {
        if s.actor.role() == Role::Reader {
            prop_assert!(Enforcer::new(&s.actor, &s.edition).permitted_actions().is_empty());
        }
    }

    #[test]
    fn force_publisher_never_approves(s in arb_scenario()) {
        if s.edition.was_force_published_by(s.actor.id()) {
            prop_assert!(!Enforcer::new(&s.actor, &s.edition).can(Action::Approve));
        }
    }

    #[test]
    fn identical_snapshots_decide_identically(s in arb_scenario()) {
        let copy = s.clone();
        let first = Enforcer::new(&s.actor, &s.edition);
        let second = Enforcer::new(&copy.actor, &copy.edition);
        for action in Action::ALL {
            prop_assert_eq!(first.can(*action), second.can(*action));
        }
    }

    #[test]
    fn fatality_rules_only_narrow_defaults(s in arb_scenario()) {
        let mut record = platform_authz::EditionRecord::from(&s.edition);
        record.edition_type = EditionType::FatalityNotice;
        let notice = Edition::try_from(record.clone()).unwrap();
        record.edition_type = EditionType::Publication;
        let plain = Edition::try_from(record).unwrap();

        let narrow = Enforcer::new(&s.actor, &notice);
        let wide = Enforcer::new(&s.actor, &plain);
        for action in Action::ALL {
            prop_assert!(!narrow.can(*action) || wide.can(*action), "{} widened", action);
        }
    }
}
