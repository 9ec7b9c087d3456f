//! Property tests: random operation sequences against a reference model.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use projects::contract::error::ErrorKind;
use projects::contract::model::{NewProject, ProjectUpdate, UserId};
use projects::domain::access::{self, ProjectAction, Standing};
use projects::domain::service::{Service, ServiceConfig};
use projects::infra::events::NoopEventPublisher;
use projects::infra::storage::memory_repo::InMemoryProjectsRepository;

const OWNER: UserId = 1;

#[derive(Debug, Clone)]
enum Op {
    Get { actor: UserId },
    Edit { actor: UserId, name: String },
    Add { actor: UserId, target: UserId },
    Remove { actor: UserId, target: UserId },
}

fn user() -> impl Strategy<Value = UserId> {
    1u64..=4
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        user().prop_map(|actor| Op::Get { actor }),
        (user(), "[a-zA-Z ]{0,12}").prop_map(|(actor, name)| Op::Edit { actor, name }),
        (user(), user()).prop_map(|(actor, target)| Op::Add { actor, target }),
        (user(), user()).prop_map(|(actor, target)| Op::Remove { actor, target }),
    ]
}

/// What the service must answer given the current collaborator set.
fn expected_kind(op: &Op, collaborators: &BTreeSet<UserId>) -> Option<ErrorKind> {
    let standing = |actor| access::standing(OWNER, collaborators, actor);
    let denied = |actor| match standing(actor) {
        Standing::None => Some(ErrorKind::NotFound),
        Standing::Collaborator => Some(ErrorKind::Forbidden),
        Standing::Owner => None,
    };

    match op {
        Op::Get { actor } => (!standing(*actor).can_view()).then_some(ErrorKind::NotFound),
        Op::Edit { actor, name } => {
            if name.trim().is_empty() {
                Some(ErrorKind::InvalidInput)
            } else {
                denied(*actor)
            }
        }
        Op::Add { actor, target } => match denied(*actor) {
            None if *target == OWNER => Some(ErrorKind::InvalidInput),
            other => other,
        },
        Op::Remove { actor, .. } => denied(*actor),
    }
}

fn service() -> Service {
    Service::new(
        Arc::new(InMemoryProjectsRepository::new()),
        Arc::new(NoopEventPublisher),
        ServiceConfig::default(),
    )
}

proptest! {
    /// The engine is a total function: exactly the owner may mutate, owner and
    /// collaborators may view.
    #[test]
    fn access_engine_matches_table(
        owner in 0u64..6,
        collaborators in prop::collection::btree_set(0u64..6, 0..4),
        requester in 0u64..6,
    ) {
        let collaborators: BTreeSet<_> = collaborators.into_iter().filter(|c| *c != owner).collect();
        for action in ProjectAction::ALL {
            let permitted = access::is_permitted(owner, &collaborators, requester, action);
            let expected = requester == owner
                || (action == ProjectAction::View && collaborators.contains(&requester));
            prop_assert_eq!(permitted, expected);
        }
    }

    #[test]
    fn invariants_hold_across_operation_sequences(
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");

        rt.block_on(async move {
            let svc = service();
            let project = svc
                .create_project(OWNER, NewProject::new("Apollo"))
                .await
                .expect("create");
            let id = project.id;
            let mut model: BTreeSet<UserId> = BTreeSet::new();

            for op in &ops {
                let expected = expected_kind(op, &model);
                let actual = match op {
                    Op::Get { actor } => svc.get_project(*actor, id).await.map(|_| ()),
                    Op::Edit { actor, name } => svc
                        .update_project(*actor, id, ProjectUpdate::new(name.clone()))
                        .await
                        .map(|_| ()),
                    Op::Add { actor, target } => {
                        svc.add_collaborator(*actor, id, *target).await.map(|_| ())
                    }
                    Op::Remove { actor, target } => {
                        svc.remove_collaborator(*actor, id, *target).await.map(|_| ())
                    }
                };
                prop_assert_eq!(actual.as_ref().err().map(|e| e.kind()), expected, "{:?}", op);

                if actual.is_ok() {
                    match op {
                        Op::Add { target, .. } => {
                            model.insert(*target);
                        }
                        Op::Remove { target, .. } => {
                            model.remove(target);
                        }
                        _ => {}
                    }
                }

                let stored = svc.get_project(OWNER, id).await.expect("owner can always view");
                prop_assert_eq!(stored.owner_id, OWNER);
                prop_assert!(!stored.collaborators.contains(&OWNER));
                prop_assert_eq!(&stored.collaborators, &model);
                prop_assert!(!stored.name.trim().is_empty());
            }
            Ok(())
        })?;
    }
}
