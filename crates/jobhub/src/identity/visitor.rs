use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use super::generator::generate_uuid;

/// Storage key for the identifier that survives browser restarts.
pub const VISITOR_ID_KEY: &str = "jobhub_visitor_id";
/// Storage key for the identifier scoped to one browser session.
pub const SESSION_ID_KEY: &str = "jobhub_session_id";

#[derive(Debug, thiserror::Error)]
pub enum IdentityStoreError {
    #[error("identity storage unavailable: {0}")]
    Unavailable(String),
}

/// Key/value storage holding generated identifiers.
pub trait IdentityStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, IdentityStoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), IdentityStoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryIdentityStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl IdentityStore for MemoryIdentityStore {
    fn get(&self, key: &str) -> Result<Option<String>, IdentityStoreError> {
        let guard = self
            .entries
            .lock()
            .map_err(|err| IdentityStoreError::Unavailable(err.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), IdentityStoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|err| IdentityStoreError::Unavailable(err.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingIds {
    pub visitor_id: String,
    pub session_id: String,
}

/// Resolves visitor and session identifiers, minting new ones on first use.
pub struct VisitorIdentity<P, S> {
    persistent: P,
    session: S,
}

impl<P, S> VisitorIdentity<P, S>
where
    P: IdentityStore,
    S: IdentityStore,
{
    pub fn new(persistent: P, session: S) -> Self {
        Self {
            persistent,
            session,
        }
    }

    pub fn visitor_id(&self) -> String {
        get_or_create(&self.persistent, VISITOR_ID_KEY)
    }

    pub fn session_id(&self) -> String {
        get_or_create(&self.session, SESSION_ID_KEY)
    }

    pub fn tracking_ids(&self) -> TrackingIds {
        TrackingIds {
            visitor_id: self.visitor_id(),
            session_id: self.session_id(),
        }
    }
}

fn get_or_create<T: IdentityStore + ?Sized>(store: &T, key: &str) -> String {
    let existing = match store.get(key) {
        Ok(existing) => existing,
        Err(err) => {
            warn!(key, error = %err, "identity storage unavailable, using ephemeral id");
            return generate_uuid();
        }
    };

    if let Some(id) = existing.filter(|id| !id.is_empty()) {
        return id;
    }

    let id = generate_uuid();
    if let Err(err) = store.set(key, &id) {
        warn!(key, error = %err, "identity storage unavailable, using ephemeral id");
    }
    id
}
