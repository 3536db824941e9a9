use salesdesk_core::db::open_db_in_memory;
use salesdesk_core::store::SESSION_KEY;
use salesdesk_core::{
    AuthError, AuthGate, AuthState, CollectionRepository, Credential, EntityRepository,
    KeyValueStore, LogNotifier, Notice, NoticeKind, Notifier, PasswordPolicy, Route, RouteAccess,
    SqliteKeyValueStore,
};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    fn kinds(&self) -> Vec<NoticeKind> {
        self.notices.borrow().iter().map(|notice| notice.kind).collect()
    }

    fn last(&self) -> Notice {
        self.notices.borrow().last().cloned().unwrap()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}

fn add_credential<S: KeyValueStore>(store: S, credential: Credential) -> Credential {
    CollectionRepository::<_, Credential>::new(store)
        .create(credential)
        .unwrap()
}

#[test]
fn default_policy_accepts_any_password_for_known_user() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let stored = add_credential(store, Credential::new("Ana").with_password("secret"));
    let notifier = RecordingNotifier::default();
    let mut gate = AuthGate::new(store, &notifier);

    let user = gate.login("ana", "anything").unwrap();
    assert_eq!(user.id, stored.id);
    assert_eq!(user.name, "Ana");
    assert!(gate.is_authenticated());
    assert_eq!(gate.state(), &AuthState::Authenticated(user));

    let notice = notifier.last();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.description, "Bienvenido Ana");
}

#[test]
fn session_snapshot_never_contains_password() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    add_credential(store, Credential::new("Ana").with_password("secret"));
    let mut gate = AuthGate::new(store, LogNotifier);

    gate.login("ANA", "").unwrap();

    let raw = store.get_item(SESSION_KEY).unwrap().unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot["name"], "Ana");
    assert!(snapshot.get("password").is_none());
    assert!(!raw.contains("secret"));
}

#[test]
fn require_match_policy_checks_password() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    add_credential(store, Credential::new("Ana").with_password("secret"));
    add_credential(store, Credential::new("Bob"));
    let notifier = RecordingNotifier::default();
    let mut gate = AuthGate::new(store, &notifier).with_policy(PasswordPolicy::RequireMatch);

    assert!(matches!(
        gate.login("ana", "anything"),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        gate.login("bob", ""),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(!gate.is_authenticated());

    gate.login("ana", "secret").unwrap();
    assert!(gate.is_authenticated());
    assert_eq!(
        notifier.kinds(),
        vec![NoticeKind::Failure, NoticeKind::Failure, NoticeKind::Success]
    );
}

#[test]
fn unknown_user_is_rejected_without_touching_state() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    add_credential(store, Credential::new("Ana"));
    let notifier = RecordingNotifier::default();
    let mut gate = AuthGate::new(store, &notifier);

    gate.login("ana", "").unwrap();
    let err = gate.login("mallory", "x").unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(gate.current_user().map(|u| u.name.as_str()), Some("Ana"));
    let notice = notifier.last();
    assert_eq!(notice.kind, NoticeKind::Failure);
    assert_eq!(notice.title, "Acceso denegado");
}

#[test]
fn restore_picks_up_persisted_session() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    add_credential(store, Credential::new("Ana"));

    let mut first = AuthGate::new(store, LogNotifier);
    let user = first.login("ana", "").unwrap();

    let mut second = AuthGate::new(store, LogNotifier);
    assert_eq!(second.state(), &AuthState::Anonymous);
    assert_eq!(second.restore().unwrap(), &AuthState::Authenticated(user));
    assert_eq!(second.authorize(Route::Reports), RouteAccess::Allow);
}

#[test]
fn malformed_snapshot_is_cleared_on_restore() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store.set_item(SESSION_KEY, "{not json").unwrap();

    let mut gate = AuthGate::new(store, LogNotifier);
    assert_eq!(gate.restore().unwrap(), &AuthState::Anonymous);
    assert!(store.get_item(SESSION_KEY).unwrap().is_none());
}

#[test]
fn logout_clears_snapshot_and_guards_routes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    add_credential(store, Credential::new("Ana"));
    let notifier = RecordingNotifier::default();
    let mut gate = AuthGate::new(store, &notifier);

    gate.login("ana", "").unwrap();
    gate.logout().unwrap();

    assert_eq!(gate.state(), &AuthState::Anonymous);
    assert!(store.get_item(SESSION_KEY).unwrap().is_none());
    assert_eq!(notifier.last().title, "Sesión finalizada");
    assert_eq!(gate.authorize(Route::Dashboard), RouteAccess::RedirectToLogin);
    assert_eq!(gate.authorize(Route::Login), RouteAccess::Allow);
}

#[test]
fn login_does_not_touch_credential_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    add_credential(store, Credential::new("Ana").with_password("secret"));
    let before = store.get_item("sales-app-credentials").unwrap();

    let mut gate = AuthGate::new(store, LogNotifier);
    gate.login("ana", "x").unwrap();
    gate.logout().unwrap();

    assert_eq!(store.get_item("sales-app-credentials").unwrap(), before);
}
