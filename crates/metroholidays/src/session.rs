use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Tokens expire on the service side after 24 hours; refresh an hour early.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(23 * 60 * 60);

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    issued_at: Instant,
}

/// In-memory bearer token cache shared by all calls of one client.
#[derive(Debug)]
pub struct TokenSession {
    lifetime: Duration,
    inner: Mutex<Option<CachedToken>>,
}

impl Default for TokenSession {
    fn default() -> Self {
        Self::new(TOKEN_LIFETIME)
    }
}

impl TokenSession {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            inner: Mutex::new(None),
        }
    }

    /// The cached token, unless it is missing or older than the lifetime.
    pub fn current(&self) -> Option<String> {
        let mut inner = self.inner.lock().expect("token session lock is not poisoned");
        match inner.as_ref() {
            Some(token) if token.issued_at.elapsed() <= self.lifetime => Some(token.value.clone()),
            Some(_) => {
                tracing::debug!("cached holidays api token expired");
                *inner = None;
                None
            }
            None => None,
        }
    }

    pub fn store(&self, value: impl Into<String>) {
        let mut inner = self.inner.lock().expect("token session lock is not poisoned");
        *inner = Some(CachedToken {
            value: value.into(),
            issued_at: Instant::now(),
        });
    }

    pub fn invalidate(&self) {
        let mut inner = self.inner.lock().expect("token session lock is not poisoned");
        *inner = None;
    }
}
