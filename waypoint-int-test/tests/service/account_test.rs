use std::sync::Arc;
use waypoint::errors::ErrorKind;
use waypoint::model::NewUser;
use waypoint::service::AccountService;
use waypoint_int_test::test_util::{
    cleanup, create_test_context, create_unavailable_context, random_email, random_name, run_test,
    PlainTokenIssuer, TestContext,
};

fn accounts(ctx: &TestContext) -> AccountService {
    AccountService::new(ctx.repository(), Arc::new(PlainTokenIssuer))
}

#[test]
fn test_register_login_and_resolve() {
    run_test(
        create_test_context,
        |ctx| {
            let accounts = accounts(&ctx);
            let new_user = NewUser::new(&random_name(), &random_email(), "correct horse");

            let token = accounts.register(&new_user)?;
            assert_eq!(token.token_type, "bearer");

            let token = accounts.login(&new_user.email, "correct horse")?;
            let user = accounts.current_user(&token.access_token)?;
            assert_eq!(user.email, new_user.email);
            assert_eq!(user.name, new_user.name);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_login_while_primary_is_down() {
    run_test(
        create_unavailable_context,
        |ctx| {
            let accounts = accounts(&ctx);
            let email = random_email();
            accounts.register(&NewUser::new(&random_name(), &email, "pw"))?;
            assert!(accounts.login(&email, "pw").is_ok());

            let err = accounts.login(&email, "wrong").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidCredentials);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_account_registered_on_primary_cannot_log_in_during_outage() {
    run_test(
        create_test_context,
        |ctx| {
            let accounts = accounts(&ctx);
            let email = random_email();
            let token = accounts.register(&NewUser::new(&random_name(), &email, "pw"))?;

            ctx.primary().go_down();
            let err = accounts.login(&email, "pw").unwrap_err();
            assert_eq!(err.message(), "Incorrect email or password");
            let err = accounts.current_user(&token.access_token).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidCredentials);

            ctx.primary().recover();
            assert!(accounts.current_user(&token.access_token).is_ok());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_duplicate_registration() {
    run_test(
        create_test_context,
        |ctx| {
            let accounts = accounts(&ctx);
            let new_user = NewUser::new(&random_name(), &random_email(), "pw");
            accounts.register(&new_user)?;
            let err = accounts.register(&new_user).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DuplicateEntry);
            Ok(())
        },
        cleanup,
    )
}
