//! Credential pool with rotation and degradation tracking.
//!
//! Free-tier judge providers throttle aggressively, so calls rotate
//! through a fixed pool of bearer keys. A key that is throttled stays
//! in rotation; a key the provider rejects outright is marked degraded
//! and skipped until the process restarts.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use zeroize::Zeroizing;

struct CredentialEntry {
    secret: Zeroizing<String>,
    uses: AtomicU64,
    throttle_hits: AtomicU64,
    auth_failures: AtomicU64,
    degraded: AtomicBool,
}

impl CredentialEntry {
    fn new(secret: Zeroizing<String>) -> Self {
        Self {
            secret,
            uses: AtomicU64::new(0),
            throttle_hits: AtomicU64::new(0),
            auth_failures: AtomicU64::new(0),
            degraded: AtomicBool::new(false),
        }
    }
}

/// Fixed pool of bearer keys shared across concurrent judge calls.
pub struct CredentialPool {
    entries: Vec<CredentialEntry>,
    cursor: AtomicUsize,
}

impl std::fmt::Debug for CredentialPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPool")
            .field("entries", &format!("[{} REDACTED]", self.entries.len()))
            .field("usable", &self.usable())
            .finish()
    }
}

/// One credential handed out for a single request attempt.
pub struct Lease<'a> {
    index: usize,
    secret: &'a str,
}

impl Lease<'_> {
    /// Pool position of the leased credential.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bearer key for the `Authorization` header.
    pub fn secret(&self) -> &str {
        self.secret
    }
}

/// Usage counters for one credential. Secrets never appear here.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CredentialStats {
    /// Pool position.
    pub index: usize,
    /// Requests sent with this credential.
    pub uses: u64,
    /// Rate-limit responses observed on this credential.
    pub throttle_hits: u64,
    /// Authorization rejections observed on this credential.
    pub auth_failures: u64,
    /// Whether the credential has been taken out of rotation.
    pub degraded: bool,
}

impl CredentialPool {
    /// Build a pool over the given secrets, all initially usable.
    pub fn new(secrets: Vec<Zeroizing<String>>) -> Self {
        Self {
            entries: secrets.into_iter().map(CredentialEntry::new).collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of credentials in the pool, degraded or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the pool holds no credentials at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of credentials still in rotation.
    pub fn usable(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.degraded.load(Ordering::Relaxed))
            .count()
    }

    /// Lease the next usable credential, round-robin.
    ///
    /// Returns `None` when every credential is degraded. The cursor
    /// advances on every call, so consecutive leases walk the pool even
    /// when no failure occurred.
    pub fn acquire(&self) -> Option<Lease<'_>> {
        if self.entries.is_empty() {
            return None;
        }
        let start = self.cursor.fetch_add(1, Ordering::Relaxed) % self.entries.len();
        for offset in 0..self.entries.len() {
            let index = (start + offset) % self.entries.len();
            let entry = &self.entries[index];
            if entry.degraded.load(Ordering::Relaxed) {
                continue;
            }
            entry.uses.fetch_add(1, Ordering::Relaxed);
            return Some(Lease {
                index,
                secret: &entry.secret,
            });
        }
        None
    }

    /// Record a rate-limit response. The credential stays in rotation.
    pub fn note_throttle(&self, index: usize) {
        if let Some(entry) = self.entries.get(index) {
            entry.throttle_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an authorization rejection and take the credential out of
    /// rotation.
    pub fn mark_degraded(&self, index: usize) {
        if let Some(entry) = self.entries.get(index) {
            entry.auth_failures.fetch_add(1, Ordering::Relaxed);
            entry.degraded.store(true, Ordering::Relaxed);
        }
    }

    /// Snapshot per-credential counters for diagnostics.
    pub fn stats(&self) -> Vec<CredentialStats> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, e)| CredentialStats {
                index,
                uses: e.uses.load(Ordering::Relaxed),
                throttle_hits: e.throttle_hits.load(Ordering::Relaxed),
                auth_failures: e.auth_failures.load(Ordering::Relaxed),
                degraded: e.degraded.load(Ordering::Relaxed),
            })
            .collect()
    }
}
