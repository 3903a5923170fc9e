/// Key under which the session marker is persisted.
pub const SESSION_KEY: &str = "admin_token";

/// Expected marker value; anything else is treated as unauthenticated.
pub const SESSION_SENTINEL: &str = "authenticated";

/// Small key-value seam over whatever persists the session marker, so the
/// storage backend is swappable in tests.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Credential check seam. Deployments inject real verification; the
/// compiled-in pair exists only for compatibility.
pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A fixed username/password pair.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    username: String,
    password: String,
}

impl FixedCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for FixedCredentials {
    fn default() -> Self {
        Self::new("adminkarate", "helloworld131")
    }
}

impl CredentialVerifier for FixedCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// The admin session gate: `Unauthenticated ⇄ Authenticated`.
///
/// Initializes from the persisted marker, so a session survives reloads.
/// No expiry, no rotation, no lockout.
pub struct AdminGate<C, S> {
    credentials: C,
    store: S,
    authenticated: bool,
}

impl<C: CredentialVerifier, S: SessionStore> AdminGate<C, S> {
    pub fn new(credentials: C, store: S) -> Self {
        let authenticated = store
            .get(SESSION_KEY)
            .is_some_and(|v| v == SESSION_SENTINEL);
        Self {
            credentials,
            store,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Succeeds iff both fields match. On failure the state is unchanged
    /// and nothing reveals which field was wrong.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if !self.credentials.verify(username, password) {
            return false;
        }
        self.authenticated = true;
        self.store.set(SESSION_KEY, SESSION_SENTINEL);
        true
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.store.remove(SESSION_KEY);
    }

    /// Hand back the marker store, e.g. to rebuild a gate after a reload.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(HashMap<String, String>);

    impl SessionStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
        fn set(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_string(), value.to_string());
        }
        fn remove(&mut self, key: &str) {
            self.0.remove(key);
        }
    }

    #[test]
    fn login_persists_a_marker_surviving_reload() {
        let mut gate = AdminGate::new(FixedCredentials::default(), MemoryStore::default());
        assert!(!gate.is_authenticated());

        assert!(gate.login("adminkarate", "helloworld131"));
        assert!(gate.is_authenticated());

        // Simulated reload: a fresh gate over the same store.
        let store = gate.into_store();
        let gate = AdminGate::new(FixedCredentials::default(), store);
        assert!(gate.is_authenticated());
    }

    #[test]
    fn wrong_credentials_leave_no_trace() {
        let mut gate = AdminGate::new(FixedCredentials::default(), MemoryStore::default());
        assert!(!gate.login("adminkarate", "wrong"));
        assert!(!gate.login("wrong", "helloworld131"));
        assert!(!gate.is_authenticated());

        let store = gate.into_store();
        assert_eq!(store.get(SESSION_KEY), None);
    }

    #[test]
    fn logout_erases_the_marker() {
        let mut gate = AdminGate::new(FixedCredentials::default(), MemoryStore::default());
        assert!(gate.login("adminkarate", "helloworld131"));
        gate.logout();
        assert!(!gate.is_authenticated());

        let store = gate.into_store();
        let gate = AdminGate::new(FixedCredentials::default(), store);
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn unexpected_marker_value_does_not_authenticate() {
        let mut store = MemoryStore::default();
        store.set(SESSION_KEY, "tampered");
        let gate = AdminGate::new(FixedCredentials::default(), store);
        assert!(!gate.is_authenticated());
    }
}
