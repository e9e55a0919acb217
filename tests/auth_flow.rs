//! End-to-end authentication and ownership scenarios, exercised through
//! the service layer the handlers delegate to.

use std::sync::Arc;

use inkpost::auth::{AuthError, AuthService, TokenService};
use inkpost::blog::{OwnershipError, authorize_owner};
use inkpost::config::{Argon2Config, AuthConfig};
use inkpost::core_types::UserId;
use inkpost::store::{PostStore, UserStore};

fn test_config(ttl_secs: i64) -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        token_ttl_secs: ttl_secs,
        // Minimal work factor keeps the suite fast.
        argon2: Argon2Config {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        },
    }
}

fn build_auth(users: Arc<UserStore>) -> AuthService {
    AuthService::new(users, &test_config(3600)).unwrap()
}

#[test]
fn register_login_and_resolve_round_trip() {
    // The canonical scenario: register Kamil, log in, and check that
    // the login token resolves back to the same identity.
    let users = Arc::new(UserStore::new());
    let auth = build_auth(users.clone());

    let (user, register_token) = auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();
    assert!(!register_token.is_empty());
    assert_eq!(user.name, "Kamil");

    let login_token = auth.login("kamil@mail.ru", "123456").unwrap();
    let resolved = auth.resolve_token(&login_token).unwrap();
    assert_eq!(resolved.id, user.id);
    assert_eq!(resolved.email, "kamil@mail.ru");
}

#[test]
fn duplicate_registration_is_surfaced_not_retried() {
    let users = Arc::new(UserStore::new());
    let auth = build_auth(users);

    auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();
    let err = auth
        .register("Other", "kamil@mail.ru", "different")
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateEmail));
}

#[test]
fn login_errors_do_not_enumerate_accounts() {
    let users = Arc::new(UserStore::new());
    let auth = build_auth(users);
    auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();

    let wrong_password = auth.login("kamil@mail.ru", "wrong!").unwrap_err();
    let unknown_email = auth.login("stranger@mail.ru", "123456").unwrap_err();

    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.to_string(), "Invalid credentials");
}

#[test]
fn expired_token_never_authenticates() {
    let users = Arc::new(UserStore::new());
    let auth = AuthService::new(users, &test_config(-60)).unwrap();

    let (_, token) = auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();
    assert!(matches!(
        auth.resolve_token(&token),
        Err(AuthError::Unauthenticated)
    ));
}

#[test]
fn token_from_another_secret_is_rejected() {
    let users = Arc::new(UserStore::new());
    let auth = build_auth(users);
    let (user, _) = auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();

    // Same user id, different signing secret.
    let foreign = TokenService::new("some-other-secret", 3600);
    let forged = foreign.issue(user.id).unwrap();

    assert!(matches!(
        auth.resolve_token(&forged),
        Err(AuthError::Unauthenticated)
    ));
}

#[test]
fn ownership_gates_every_mutation() {
    let users = Arc::new(UserStore::new());
    let auth = build_auth(users);
    let posts = PostStore::new();

    let (owner, _) = auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();
    let (intruder, intruder_token) = auth
        .register("Boris", "boris@mail.ru", "654321")
        .unwrap();

    let post = posts.insert("My first blog-text", owner.id);

    // The intruder authenticates fine but fails the ownership check,
    // so no update/delete/upload is applied.
    let acting = auth.resolve_token(&intruder_token).unwrap();
    assert_eq!(acting.id, intruder.id);
    assert_eq!(
        authorize_owner(acting.id, post.user),
        Err(OwnershipError::Forbidden)
    );
    assert_eq!(posts.get(post.id).unwrap().text, "My first blog-text");

    // The owner passes the same check and the mutation applies.
    assert!(authorize_owner(owner.id, post.user).is_ok());
    let updated = posts.update_text(post.id, "edited").unwrap();
    assert_eq!(updated.text, "edited");

    // Ownership is re-checked per call, including delete.
    assert!(authorize_owner(owner.id, post.user).is_ok());
    assert!(posts.remove(post.id).is_some());
}

#[test]
fn owner_is_recorded_at_creation_and_immutable() {
    let posts = PostStore::new();
    let owner = UserId::new();

    let post = posts.insert("text", owner);
    let after_update = posts.update_text(post.id, "new text").unwrap();
    let after_photo = posts.set_photo(post.id, "photo_x.jpg").unwrap();

    assert_eq!(after_update.user, owner);
    assert_eq!(after_photo.user, owner);
}

#[test]
fn deleted_user_token_stops_working() {
    // Stateless tokens outlive their user; resolution must re-check the
    // store every time.
    let users = Arc::new(UserStore::new());
    let auth = build_auth(users.clone());

    let foreign_id = UserId::new();
    let tokens = TokenService::new("integration-test-secret", 3600);
    let token = tokens.issue(foreign_id).unwrap();

    assert!(matches!(
        auth.resolve_token(&token),
        Err(AuthError::Unauthenticated)
    ));
}
