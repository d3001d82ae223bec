//! Integration tests for `DieselContactRepository` against embedded PostgreSQL.
//!
//! These cover the per-owner unique constraints, the conflict query's
//! self-exclusion on update, and newest-first listing.

use chrono::{DateTime, Utc};
use contacts_backend::domain::ports::{ContactConflict, ContactRepository, ContactRepositoryError};
use contacts_backend::domain::{Contact, ContactId, ContactPatch, NewContact, User};
use contacts_backend::outbound::persistence::DieselContactRepository;
use rstest::{fixture, rstest};

mod support;

use support::{PgContext, handle_cluster_setup_failure};

struct TestContext {
    pg: PgContext,
    repository: DieselContactRepository,
    ann: User,
    bob: User,
}

impl TestContext {
    fn run<T>(&self, future: impl std::future::Future<Output = T>) -> T {
        self.pg.runtime.block_on(future)
    }
}

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_564_800 + seconds, 0).expect("timestamp")
}

fn contact_for(owner: &User, email: &str, phone: &str, seconds: i64) -> Contact {
    let draft = NewContact::try_from_parts("Cy", email, phone, Some("work")).expect("valid draft");
    Contact::create(ContactId::random(), *owner.id(), draft, at(seconds))
}

#[fixture]
fn contact_context() -> Option<TestContext> {
    match PgContext::start() {
        Ok(pg) => {
            let ann = pg.seed_user("ann@x.com");
            let bob = pg.seed_user("bob@x.com");
            let repository = DieselContactRepository::new(pg.pool.clone());
            Some(TestContext {
                pg,
                repository,
                ann,
                bob,
            })
        }
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn lists_only_the_owners_contacts_newest_first(contact_context: Option<TestContext>) {
    let Some(ctx) = contact_context else {
        eprintln!("SKIP-TEST-CLUSTER: lists_only_the_owners_contacts_newest_first skipped");
        return;
    };
    let older = contact_for(&ctx.ann, "c1@x.com", "1", 0);
    let newer = contact_for(&ctx.ann, "c2@x.com", "2", 60);
    let foreign = contact_for(&ctx.bob, "c3@x.com", "3", 30);
    for contact in [&older, &newer, &foreign] {
        ctx.run(ctx.repository.insert(contact)).expect("insert");
    }

    let listed = ctx
        .run(ctx.repository.list_for_owner(ctx.ann.id()))
        .expect("list");

    assert_eq!(listed, vec![newer, older]);
}

#[rstest]
#[case("c1@x.com", "999", ContactRepositoryError::duplicate_email())]
#[case("other@x.com", "1", ContactRepositoryError::duplicate_phone())]
fn racing_duplicate_inserts_hit_the_unique_constraints(
    contact_context: Option<TestContext>,
    #[case] email: &str,
    #[case] phone: &str,
    #[case] expected: ContactRepositoryError,
) {
    let Some(ctx) = contact_context else {
        eprintln!("SKIP-TEST-CLUSTER: racing_duplicate_inserts_hit_the_unique_constraints skipped");
        return;
    };
    ctx.run(ctx.repository.insert(&contact_for(&ctx.ann, "c1@x.com", "1", 0)))
        .expect("insert original");

    let err = ctx
        .run(ctx.repository.insert(&contact_for(&ctx.ann, email, phone, 1)))
        .expect_err("duplicate for the same owner");

    assert_eq!(err, expected);
}

#[rstest]
fn same_email_and_phone_are_allowed_across_owners(contact_context: Option<TestContext>) {
    let Some(ctx) = contact_context else {
        eprintln!("SKIP-TEST-CLUSTER: same_email_and_phone_are_allowed_across_owners skipped");
        return;
    };
    ctx.run(ctx.repository.insert(&contact_for(&ctx.ann, "c1@x.com", "1", 0)))
        .expect("insert for ann");

    ctx.run(ctx.repository.insert(&contact_for(&ctx.bob, "c1@x.com", "1", 0)))
        .expect("insert for bob");
    let anns = ctx
        .run(ctx.repository.list_for_owner(ctx.ann.id()))
        .expect("list ann");
    let bobs = ctx
        .run(ctx.repository.list_for_owner(ctx.bob.id()))
        .expect("list bob");

    assert_eq!(anns.len(), 1);
    assert_eq!(bobs.len(), 1);
}

#[rstest]
fn type_only_update_does_not_conflict_with_itself(contact_context: Option<TestContext>) {
    let Some(ctx) = contact_context else {
        eprintln!("SKIP-TEST-CLUSTER: type_only_update_does_not_conflict_with_itself skipped");
        return;
    };
    let stored = contact_for(&ctx.ann, "c1@x.com", "1", 0);
    ctx.run(ctx.repository.insert(&stored)).expect("insert");
    let patch = ContactPatch::try_from_parts(None, None, None, Some("family")).expect("patch");
    let updated = patch.apply_to(&stored);

    let unexcluded = ctx
        .run(ctx.repository.find_conflict(
            ctx.ann.id(),
            updated.email(),
            updated.phone(),
            None,
        ))
        .expect("conflict query");
    let excluded = ctx
        .run(ctx.repository.find_conflict(
            ctx.ann.id(),
            updated.email(),
            updated.phone(),
            Some(*stored.id()),
        ))
        .expect("conflict query");
    ctx.run(ctx.repository.update(&updated)).expect("update");
    let reloaded = ctx
        .run(ctx.repository.find_by_id(stored.id()))
        .expect("reload")
        .expect("contact exists");

    assert_eq!(unexcluded, Some(ContactConflict::Email));
    assert_eq!(excluded, None);
    assert_eq!(reloaded.kind(), "family");
    assert_eq!(reloaded, updated);
}

#[rstest]
fn update_onto_a_sibling_phone_is_duplicate(contact_context: Option<TestContext>) {
    let Some(ctx) = contact_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_onto_a_sibling_phone_is_duplicate skipped");
        return;
    };
    let first = contact_for(&ctx.ann, "c1@x.com", "1", 0);
    let second = contact_for(&ctx.ann, "c2@x.com", "2", 1);
    ctx.run(ctx.repository.insert(&first)).expect("insert first");
    ctx.run(ctx.repository.insert(&second)).expect("insert second");
    let patch = ContactPatch::try_from_parts(None, None, Some("1"), None).expect("patch");

    let conflict = ctx
        .run(ctx.repository.find_conflict(
            ctx.ann.id(),
            second.email(),
            "1",
            Some(*second.id()),
        ))
        .expect("conflict query");
    let err = ctx
        .run(ctx.repository.update(&patch.apply_to(&second)))
        .expect_err("phone is taken");

    assert_eq!(conflict, Some(ContactConflict::Phone));
    assert_eq!(err, ContactRepositoryError::duplicate_phone());
}

#[rstest]
fn missing_contacts_are_reported(contact_context: Option<TestContext>) {
    let Some(ctx) = contact_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_contacts_are_reported skipped");
        return;
    };
    let ghost = contact_for(&ctx.ann, "c1@x.com", "1", 0);

    let update = ctx.run(ctx.repository.update(&ghost));
    let delete = ctx.run(ctx.repository.delete(ghost.id()));
    let found = ctx
        .run(ctx.repository.find_by_id(ghost.id()))
        .expect("lookup");

    assert!(matches!(update, Err(ContactRepositoryError::Missing { .. })));
    assert!(matches!(delete, Err(ContactRepositoryError::Missing { .. })));
    assert!(found.is_none());
}

#[rstest]
fn deleted_contacts_disappear(contact_context: Option<TestContext>) {
    let Some(ctx) = contact_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleted_contacts_disappear skipped");
        return;
    };
    let stored = contact_for(&ctx.ann, "c1@x.com", "1", 0);
    ctx.run(ctx.repository.insert(&stored)).expect("insert");

    ctx.run(ctx.repository.delete(stored.id())).expect("delete");
    let listed = ctx
        .run(ctx.repository.list_for_owner(ctx.ann.id()))
        .expect("list");

    assert!(listed.is_empty());
}
