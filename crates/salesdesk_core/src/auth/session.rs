//! Session snapshot persistence.
//!
//! # Invariants
//! - Snapshots live under `SESSION_KEY`, separate from collections.
//! - A malformed snapshot is cleared on restore.

use crate::auth::gate::{AuthError, AuthResult};
use crate::model::credential::Credential;
use crate::model::entity::EntityId;
use crate::store::{KeyValueStore, StoreResult, SESSION_KEY};
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};

/// Authenticated credential without its password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Credential> for SessionUser {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.clone(),
            name: credential.name.clone(),
            description: credential.description.clone(),
            created_at: credential.created_at,
        }
    }
}

pub fn save_session<S: KeyValueStore>(store: &S, user: &SessionUser) -> AuthResult<()> {
    let text = serde_json::to_string(user).map_err(AuthError::Serialize)?;
    store.set_item(SESSION_KEY, &text)?;
    Ok(())
}

pub fn clear_session<S: KeyValueStore>(store: &S) -> StoreResult<()> {
    store.remove_item(SESSION_KEY)
}

/// Reads the stored snapshot.
///
/// Returns `Ok(None)` when no snapshot exists or when it was malformed; the
/// malformed value is removed.
pub fn restore_session<S: KeyValueStore>(store: &S) -> StoreResult<Option<SessionUser>> {
    let Some(text) = store.get_item(SESSION_KEY)? else {
        return Ok(None);
    };

    match serde_json::from_str::<SessionUser>(&text) {
        Ok(user) => {
            info!("event=session_restore module=auth status=ok");
            Ok(Some(user))
        }
        Err(err) => {
            error!(
                "event=session_restore module=auth status=error error_code=malformed_session error={err}"
            );
            clear_session(store)?;
            Ok(None)
        }
    }
}
