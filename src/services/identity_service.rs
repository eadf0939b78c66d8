use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use rand::Rng;
use tracing::{info, warn};

use crate::store::KeyValueStore;

/// Storage slot holding the per-installation user identifier.
pub const USER_ID_KEY: &str = "economic_advisor_user_id";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
struct ResolvedIdentity {
    user_id: String,
    ephemeral: bool,
}

/// Derives and persists a stable, non-authenticated user identifier.
///
/// The identifier is read from storage at most once and cached. The
/// read-check-generate-write sequence runs under one lock, so concurrent first
/// callers always observe the same value.
pub struct IdentityStore {
    store: Arc<dyn KeyValueStore>,
    resolved: Mutex<Option<ResolvedIdentity>>,
}

impl IdentityStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            resolved: Mutex::new(None),
        }
    }

    /// Return the stored identifier, creating and persisting one if absent.
    ///
    /// Storage failures never propagate: an ephemeral identifier is used for
    /// the rest of the process lifetime instead.
    pub fn get_or_create_user_id(&self) -> String {
        let mut resolved = self.resolved.lock();
        if let Some(identity) = resolved.as_ref() {
            return identity.user_id.clone();
        }

        let identity = self.resolve();
        let user_id = identity.user_id.clone();
        *resolved = Some(identity);
        user_id
    }

    /// Whether storage was unusable and the identifier will not survive a restart.
    pub fn is_ephemeral(&self) -> bool {
        self.resolved
            .lock()
            .as_ref()
            .map(|identity| identity.ephemeral)
            .unwrap_or(false)
    }

    fn resolve(&self) -> ResolvedIdentity {
        match self.store.get(USER_ID_KEY) {
            Ok(Some(existing)) if !existing.is_empty() => {
                return ResolvedIdentity {
                    user_id: existing,
                    ephemeral: false,
                };
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Identity storage unreadable, using an ephemeral user id: {}", e);
                return ResolvedIdentity {
                    user_id: generate_user_id(),
                    ephemeral: true,
                };
            }
        }

        let user_id = generate_user_id();
        match self.store.set(USER_ID_KEY, &user_id) {
            Ok(()) => {
                info!("Created new user id {}", user_id);
                ResolvedIdentity {
                    user_id,
                    ephemeral: false,
                }
            }
            Err(e) => {
                warn!("Could not persist user id {}, it will not survive a restart: {}", user_id, e);
                ResolvedIdentity {
                    user_id,
                    ephemeral: true,
                }
            }
        }
    }
}

/// `user_<epoch millis>_<9 random base36 chars>`. Best-effort unique only.
pub fn generate_user_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!("user_{}_{}", Utc::now().timestamp_millis(), suffix)
}
