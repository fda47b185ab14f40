use crate::domain::{DomainError, Session, SessionProvider};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_TTL_DAYS: i64 = 30;

pub const MISSING_CREDENTIALS: &str = "Please enter both email and password.";

/// In-memory sessions with HMAC-signed tokens.
///
/// A token is `<session id>.<hex HMAC-SHA256 of the id>`. The signing secret
/// is generated at startup, so every token dies with the process. Credentials
/// are not checked against any user store: any non-empty email and password
/// open a session.
pub struct SignedSessionStore {
    secret: Arc<[u8]>,
    ttl: Duration,
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl Default for SignedSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SignedSessionStore {
    pub fn new() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self::with_secret(&secret, Duration::days(SESSION_TTL_DAYS))
    }

    pub fn with_secret(secret: &[u8], ttl: Duration) -> Self {
        Self {
            secret: Arc::from(secret),
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn sign(&self, id: &Uuid) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(id.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Returns the session id if the token carries a valid signature.
    fn verify(&self, token: &str) -> Option<Uuid> {
        let (id, signature) = token.split_once('.')?;
        let id = Uuid::parse_str(id).ok()?;
        let signature = hex::decode(signature).ok()?;
        let expected = self.sign(&id);

        let equal = signature.len() == expected.len()
            && signature
                .iter()
                .zip(expected.iter())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0;
        equal.then_some(id)
    }

    pub fn active_sessions(&self) -> usize {
        let now = Utc::now();
        self.sessions().values().filter(|s| s.expires_at > now).count()
    }
}

impl SessionProvider for SignedSessionStore {
    fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Unauthorized(MISSING_CREDENTIALS.to_string()));
        }

        let id = Uuid::new_v4();
        let token = format!("{}.{}", id, hex::encode(self.sign(&id)));
        let issued_at = Utc::now();
        let session = Session {
            id,
            email: email.to_string(),
            token,
            issued_at,
            expires_at: issued_at + self.ttl,
        };

        let mut sessions = self.sessions();
        sessions.retain(|_, s| s.expires_at > issued_at);
        sessions.insert(id, session.clone());
        info!("Session opened for {}", session.email);
        Ok(session)
    }

    fn is_authenticated(&self, token: &str) -> bool {
        let Some(id) = self.verify(token) else {
            return false;
        };
        self.sessions()
            .get(&id)
            .is_some_and(|s| s.expires_at > Utc::now())
    }

    fn logout(&self, token: &str) {
        if let Some(id) = self.verify(token) {
            if let Some(session) = self.sessions().remove(&id) {
                debug!("Session closed for {}", session.email);
            }
        }
    }
}
