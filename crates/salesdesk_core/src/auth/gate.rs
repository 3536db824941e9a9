//! Anonymous/Authenticated state machine and route guard.
//!
//! # Invariants
//! - Username lookup is a case-insensitive exact match on `Credential::name`.
//! - Under `PasswordPolicy::Ignore` the submitted password is not compared.
//! - Failed logins leave the current state untouched.
//! - Every route except `Login` requires an authenticated session.

use crate::auth::session::{clear_session, restore_session, save_session, SessionUser};
use crate::model::credential::Credential;
use crate::notify::{Notice, Notifier};
use crate::repo::entity_repo::{CollectionRepository, EntityRepository, RepoError};
use crate::store::{KeyValueStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug)]
pub enum AuthError {
    /// Unknown username, or password rejected by the active policy.
    InvalidCredentials,
    Repo(RepoError),
    Store(StoreError),
    Serialize(serde_json::Error),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize session: {err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCredentials => None,
            Self::Repo(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// How `login` treats the submitted password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPolicy {
    /// Username match alone grants access. Legacy behavior.
    #[default]
    Ignore,
    /// Stored password must exist and equal the submitted one.
    RequireMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(SessionUser),
}

/// Views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Clients,
    Sellers,
    Concepts,
    Credentials,
    Sales,
    Reports,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/",
            Self::Clients => "/clientes",
            Self::Sellers => "/vendedores",
            Self::Concepts => "/conceptos",
            Self::Credentials => "/credenciales",
            Self::Sales => "/ventas",
            Self::Reports => "/reportes",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        [
            Self::Login,
            Self::Dashboard,
            Self::Clients,
            Self::Sellers,
            Self::Concepts,
            Self::Credentials,
            Self::Sales,
            Self::Reports,
        ]
        .into_iter()
        .find(|route| route.path() == path)
    }

    pub fn is_public(self) -> bool {
        matches!(self, Self::Login)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Allow,
    RedirectToLogin,
}

/// Session gate over a store and a notice sink.
pub struct AuthGate<S, N> {
    store: S,
    notifier: N,
    policy: PasswordPolicy,
    state: AuthState,
}

impl<S: KeyValueStore, N: Notifier> AuthGate<S, N> {
    /// Starts Anonymous with `PasswordPolicy::Ignore`; call `restore` to
    /// pick up a persisted session.
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            policy: PasswordPolicy::default(),
            state: AuthState::Anonymous,
        }
    }

    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> PasswordPolicy {
        self.policy
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Loads the persisted session snapshot, if any.
    pub fn restore(&mut self) -> AuthResult<&AuthState> {
        self.state = match restore_session(&self.store)? {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Anonymous,
        };
        Ok(&self.state)
    }

    /// Authenticates `username` and persists the session snapshot.
    ///
    /// # Errors
    /// - `InvalidCredentials` when no credential matches under the policy.
    pub fn login(&mut self, username: &str, password: &str) -> AuthResult<SessionUser> {
        let credentials = CollectionRepository::<&S, Credential>::new(&self.store).get_all()?;
        let matched = credentials
            .iter()
            .find(|credential| credential.matches_username(username))
            .filter(|credential| self.password_accepted(credential, password));

        let Some(credential) = matched else {
            warn!(
                "event=login module=auth status=error error_code=invalid_credentials policy={:?}",
                self.policy
            );
            self.notifier.notify(&Notice::failure(
                "Acceso denegado",
                "Credenciales incorrectas",
            ));
            return Err(AuthError::InvalidCredentials);
        };

        let user = SessionUser::from(credential);
        save_session(&self.store, &user)?;
        self.state = AuthState::Authenticated(user.clone());

        info!(
            "event=login module=auth status=ok policy={:?}",
            self.policy
        );
        self.notifier.notify(&Notice::success(
            "Acceso concedido",
            format!("Bienvenido {}", user.name),
        ));
        Ok(user)
    }

    /// Returns to Anonymous and clears the snapshot.
    pub fn logout(&mut self) -> AuthResult<()> {
        clear_session(&self.store)?;
        self.state = AuthState::Anonymous;
        info!("event=logout module=auth status=ok");
        self.notifier.notify(&Notice::success(
            "Sesión finalizada",
            "Has cerrado sesión correctamente",
        ));
        Ok(())
    }

    pub fn authorize(&self, route: Route) -> RouteAccess {
        if route.is_public() || self.is_authenticated() {
            RouteAccess::Allow
        } else {
            RouteAccess::RedirectToLogin
        }
    }

    fn password_accepted(&self, credential: &Credential, password: &str) -> bool {
        match self.policy {
            PasswordPolicy::Ignore => true,
            PasswordPolicy::RequireMatch => credential.password.as_deref() == Some(password),
        }
    }
}
