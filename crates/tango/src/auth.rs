//! Contains the `AuthGate` that unlocks write access with the shared admin password.
//!
//! A successful unlock is remembered with a plain marker in local storage, which is trusted as-is
//! on the next start. The password is not checked again until the user logs out.

use crate::{
    backend::CredentialSource,
    reactive::{ReadState, State},
    storage::LocalStorage,
};
use sha2::{Digest, Sha256};

/// Local storage key of the session marker.
pub const SESSION_KEY: &str = "tango.session";
const SESSION_MARKER: &str = "unlocked";

/// Hex-encoded SHA-256 digest of the trimmed password, the format stored in the config record.
pub fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.trim().as_bytes()))
}

fn decode_digest(stored: &str) -> Option<Vec<u8>> {
    hex::decode(stored.trim())
        .ok()
        .filter(|bytes| bytes.len() == Sha256::output_size())
}

/// Owns the locked/unlocked state. Other components can only read it.
pub struct AuthGate<C, S> {
    source: C,
    storage: S,
    authenticated: State<bool>,
}

impl<C, S> AuthGate<C, S>
where
    C: CredentialSource,
    S: LocalStorage,
{
    /// Starts unlocked if a session marker was persisted earlier, without contacting the backend.
    pub fn new(source: C, storage: S) -> Self {
        let authenticated = match storage.get(SESSION_KEY) {
            Ok(Some(marker)) if marker == SESSION_MARKER => {
                tracing::info!("Restored session");
                true
            }
            Ok(Some(marker)) => {
                tracing::warn!("Ignoring invalid session marker {marker:?}");
                if let Err(err) = storage.remove(SESSION_KEY) {
                    tracing::warn!("Failed to clear session marker: {err}");
                }
                false
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!("Failed to read session marker: {err}");
                false
            }
        };
        Self {
            source,
            storage,
            authenticated: State::new(authenticated),
        }
    }

    /// Checks the password against the stored digest.
    /// Any failure, whether a wrong password or an unreachable backend, locks the gate and returns false.
    pub async fn authenticate(&self, candidate: &str) -> bool {
        let candidate_digest = Sha256::digest(candidate.trim().as_bytes());
        let authenticated = match self.source.auth_digest().await {
            Ok(Some(stored)) => match decode_digest(&stored) {
                Some(stored) if stored.as_slice() == candidate_digest.as_slice() => true,
                Some(_) => {
                    tracing::warn!("Wrong password");
                    false
                }
                None => {
                    tracing::warn!("Stored digest is not a valid SHA-256 hex digest");
                    false
                }
            },
            Ok(None) => {
                tracing::warn!("No stored digest to authenticate against");
                false
            }
            Err(err) => {
                tracing::warn!("Failed to fetch stored digest: {err}");
                false
            }
        };

        if authenticated {
            tracing::info!("Unlocked");
            if let Err(err) = self.storage.set(SESSION_KEY, SESSION_MARKER) {
                tracing::warn!("Failed to persist session marker: {err}");
            }
        } else {
            self.clear_marker();
        }
        self.publish(authenticated);
        authenticated
    }

    /// Locks the gate and forgets the session.
    pub fn logout(&self) {
        tracing::info!("Locked");
        self.clear_marker();
        self.publish(false);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    /// The current state, followed by every transition.
    pub fn auth_state(&self) -> ReadState<bool> {
        self.authenticated.reader()
    }

    fn clear_marker(&self) {
        if let Err(err) = self.storage.remove(SESSION_KEY) {
            tracing::warn!("Failed to clear session marker: {err}");
        }
    }

    fn publish(&self, authenticated: bool) {
        self.authenticated
            .update_if(|current| std::mem::replace(current, authenticated) != authenticated);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        backend::MemoryBackend,
        error::{TangoError, TangoResult},
        storage::MemoryStorage,
    };
    use futures_util::StreamExt;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn backend_with_password(password: &str) -> MemoryBackend {
        let backend = MemoryBackend::default();
        backend.set_auth_digest(Some(digest(password).as_str()));
        backend
    }

    /// Counts fetches so tests can tell whether the backend was contacted.
    #[derive(Clone, Default)]
    struct CountingSource {
        digest: Option<String>,
        fetches: Arc<AtomicUsize>,
    }

    impl CredentialSource for CountingSource {
        async fn auth_digest(&self) -> TangoResult<Option<String>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.digest.clone())
        }
    }

    #[test]
    fn digests_trimmed_password() {
        assert_eq!(
            digest("secret"),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
        assert_eq!(digest(" secret\n"), digest("secret"));
    }

    #[tokio::test]
    async fn starts_locked() {
        let gate = AuthGate::new(backend_with_password("secret"), MemoryStorage::new());
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn unlocks_with_correct_password() {
        let storage = MemoryStorage::new();
        let gate = AuthGate::new(backend_with_password("secret"), storage.clone());

        assert!(gate.authenticate(" secret ").await);
        assert!(gate.is_authenticated());
        assert_eq!(
            storage.get(SESSION_KEY),
            Ok(Some(SESSION_MARKER.to_string()))
        );
    }

    #[tokio::test]
    async fn accepts_uppercase_digest() {
        let backend = MemoryBackend::default();
        let stored = format!("  {}\n", digest("secret").to_uppercase());
        backend.set_auth_digest(Some(stored.as_str()));
        let gate = AuthGate::new(backend, MemoryStorage::new());
        assert!(gate.authenticate("secret").await);
    }

    #[tokio::test]
    async fn wrong_password_locks_and_clears_marker() {
        let storage = MemoryStorage::new();
        let gate = AuthGate::new(backend_with_password("secret"), storage.clone());
        assert!(gate.authenticate("secret").await);

        assert!(!gate.authenticate("hunter2").await);
        assert!(!gate.is_authenticated());
        assert_eq!(storage.get(SESSION_KEY), Ok(None));
    }

    #[tokio::test]
    async fn missing_config_record_fails() {
        let backend = MemoryBackend::default();
        let gate = AuthGate::new(backend, MemoryStorage::new());
        assert!(!gate.authenticate("anything").await);
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn network_failure_fails() {
        let backend = backend_with_password("secret");
        backend.set_offline(true);
        let storage = MemoryStorage::new();
        storage.set(SESSION_KEY, SESSION_MARKER).unwrap();
        let gate = AuthGate::new(backend, storage.clone());
        assert!(gate.is_authenticated());

        assert!(!gate.authenticate("secret").await);
        assert!(!gate.is_authenticated());
        assert_eq!(storage.get(SESSION_KEY), Ok(None));
    }

    #[tokio::test]
    async fn malformed_digest_fails() {
        let backend = MemoryBackend::default();
        backend.set_auth_digest(Some("not hex"));
        let gate = AuthGate::new(backend, MemoryStorage::new());
        assert!(!gate.authenticate("not hex").await);
    }

    #[tokio::test]
    async fn restores_session_without_fetching() {
        let source = CountingSource {
            digest: Some(digest("secret")),
            ..Default::default()
        };
        let storage = MemoryStorage::new();
        {
            let gate = AuthGate::new(source.clone(), storage.clone());
            assert!(gate.authenticate("secret").await);
        }
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        let restarted = AuthGate::new(source.clone(), storage);
        assert!(restarted.is_authenticated());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn discards_invalid_marker() {
        let storage = MemoryStorage::new();
        storage.set(SESSION_KEY, "maybe").unwrap();
        let gate = AuthGate::new(CountingSource::default(), storage.clone());
        assert!(!gate.is_authenticated());
        assert_eq!(storage.get(SESSION_KEY), Ok(None));
    }

    #[tokio::test]
    async fn logout_always_locks() {
        let storage = MemoryStorage::new();
        let gate = AuthGate::new(backend_with_password("secret"), storage.clone());
        gate.logout();
        assert!(!gate.is_authenticated());

        assert!(gate.authenticate("secret").await);
        gate.logout();
        assert!(!gate.is_authenticated());
        assert_eq!(storage.get(SESSION_KEY), Ok(None));
    }

    #[tokio::test]
    async fn tolerates_unavailable_storage() {
        let gate = AuthGate::new(
            backend_with_password("secret"),
            MemoryStorage::unavailable(),
        );
        assert!(!gate.is_authenticated());
        assert!(gate.authenticate("secret").await);
        assert!(gate.is_authenticated());
        gate.logout();
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn streams_transitions() {
        let gate = AuthGate::new(backend_with_password("secret"), MemoryStorage::new());
        let mut states = Box::pin(gate.auth_state().stream());
        assert_eq!(states.next().await, Some(false));

        assert!(gate.authenticate("secret").await);
        assert_eq!(states.next().await, Some(true));

        gate.logout();
        assert_eq!(states.next().await, Some(false));

        // staying locked is not a transition
        let mut subscription = gate.auth_state().subscribe();
        assert!(!gate.authenticate("wrong").await);
        assert!(!subscription.has_changed());
    }

    #[tokio::test]
    async fn unavailable_source_error_is_not_exposed() {
        struct Unreachable;
        impl CredentialSource for Unreachable {
            async fn auth_digest(&self) -> TangoResult<Option<String>> {
                Err(TangoError::network("timed out"))
            }
        }
        let gate = AuthGate::new(Unreachable, MemoryStorage::new());
        assert!(!gate.authenticate("secret").await);
    }
}
