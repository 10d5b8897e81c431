use waypoint::common::{from_document, ROADMAPS_COLLECTION, USERS_COLLECTION};
use waypoint::errors::ErrorKind;
use waypoint::model::{Roadmap, UserProfile};
use waypoint::service::simulated_roadmap;
use waypoint_int_test::test_util::{
    cleanup, create_test_context, create_unavailable_context, random_email, random_name, run_test,
};

fn plan() -> Roadmap {
    simulated_roadmap(&UserProfile::new("Engineer", "10 weeks"))
}

#[test]
fn test_write_lands_in_secondary_when_primary_fails() {
    run_test(
        create_unavailable_context,
        |ctx| {
            let repository = ctx.repository();
            let email = random_email();
            let user = repository.register_user(&random_name(), &email, "hash")?;

            assert_eq!(ctx.secondary_documents(USERS_COLLECTION).len(), 1);
            assert!(ctx.primary_documents(USERS_COLLECTION).is_empty());

            let found = repository.find_user(&email)?;
            assert_eq!(found, user);
            assert_eq!(repository.find_user_by_id(&user.id)?, user);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_primary_written_data_is_not_visible_after_failure() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            let email = random_email();
            repository.register_user(&random_name(), &email, "hash")?;
            repository.save_roadmap(&email, plan())?;
            assert_eq!(ctx.primary_documents(USERS_COLLECTION).len(), 1);

            ctx.primary().go_down();

            let err = repository.find_user(&email).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::BothTiersExhausted);
            let err = repository.get_roadmap(&email).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::BothTiersExhausted);
            assert!(ctx.secondary_documents(USERS_COLLECTION).is_empty());
            assert!(ctx.secondary_documents(ROADMAPS_COLLECTION).is_empty());

            // the data is still on the primary
            assert_eq!(ctx.primary_documents(ROADMAPS_COLLECTION).len(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_exhausted_read_keeps_primary_cause() {
    run_test(
        create_unavailable_context,
        |ctx| {
            let err = ctx.repository().find_user(&random_email()).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::BothTiersExhausted);
            // the secondary answered; the primary failure was only logged
            assert!(err.cause().is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_secondary_writes_are_not_migrated_on_recovery() {
    run_test(
        create_unavailable_context,
        |ctx| {
            let repository = ctx.repository();
            let email = random_email();
            repository.register_user(&random_name(), &email, "hash")?;
            repository.save_roadmap(&email, plan())?;

            ctx.primary().recover();

            assert!(ctx.primary_documents(USERS_COLLECTION).is_empty());
            assert!(ctx.primary_documents(ROADMAPS_COLLECTION).is_empty());

            // reads fall back on absence, so the secondary copy is still served
            assert_eq!(repository.find_user(&email)?.email, email);
            assert_eq!(repository.get_roadmap(&email)?.steps.len(), 4);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_write_after_recovery_goes_to_primary() {
    run_test(
        create_unavailable_context,
        |ctx| {
            let repository = ctx.repository();
            let email = random_email();
            repository.save_roadmap(&email, plan())?;

            ctx.primary().recover();
            let mut revised = plan();
            revised.role = "Staff Engineer".to_string();
            repository.save_roadmap(&email, revised)?;

            // both tiers now hold a roadmap for the same user
            assert_eq!(ctx.primary_documents(ROADMAPS_COLLECTION).len(), 1);
            assert_eq!(ctx.secondary_documents(ROADMAPS_COLLECTION).len(), 1);
            assert_eq!(repository.get_roadmap(&email)?.role, "Staff Engineer");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_registration_duplicates_are_checked_per_tier() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            let email = random_email();
            repository.register_user("First", &email, "hash")?;

            let err = repository.register_user("Again", &email, "hash").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DuplicateEntry);

            ctx.primary().go_down();
            repository.register_user("Second", &email, "hash")?;
            assert_eq!(ctx.secondary_documents(USERS_COLLECTION).len(), 1);
            assert_eq!(repository.find_user(&email)?.name, "Second");

            ctx.primary().recover();
            assert_eq!(repository.find_user(&email)?.name, "First");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_falls_back_when_primary_modifies_nothing() {
    run_test(
        create_unavailable_context,
        |ctx| {
            let repository = ctx.repository();
            let email = random_email();
            repository.save_roadmap(&email, plan())?;
            ctx.primary().recover();

            let result = repository.update_progress(&email, 2, true)?;
            assert_eq!(result.modified_count(), 1);

            let stored = from_document::<Roadmap>(&ctx.secondary_documents(ROADMAPS_COLLECTION)[0])?;
            assert!(stored.step(2).map(|step| step.completed).unwrap_or(false));
            assert!(!stored.step(1).map(|step| step.completed).unwrap_or(true));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_prefers_primary() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            let email = random_email();
            repository.save_roadmap(&email, plan())?;

            repository.update_progress(&email, 4, true)?;
            let stored = from_document::<Roadmap>(&ctx.primary_documents(ROADMAPS_COLLECTION)[0])?;
            assert_eq!(stored.completed_weeks(), 1);
            assert!(!ctx.secondary().has_collection(ROADMAPS_COLLECTION));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_of_unknown_roadmap_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let err = ctx
                .repository()
                .update_progress(&random_email(), 1, true)
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::BothTiersExhausted);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_write_fails_when_both_tiers_fail() {
    use waypoint::repository::Repository;
    use waypoint::store::{DetachedStore, DocumentStore};
    use waypoint::tiering::TieredStore;

    let repository = Repository::with_tiers(TieredStore::new(
        DocumentStore::new(DetachedStore::new(Some("mongodb://primary".to_string()))),
        DocumentStore::new(DetachedStore::new(None)),
    ));
    let err = repository.register_user("Ada", "ada@example.com", "hash").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::BothTiersExhausted);
    assert_eq!(err.cause().map(|c| c.kind()), Some(&ErrorKind::PrimaryUnavailable));
}
