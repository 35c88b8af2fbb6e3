use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::domain::AssessmentArtifact;

/// How much of the serialized resume participates in the fingerprint. Long
/// resumes differ early (contact details, most recent role), so a bounded
/// prefix keeps the key cheap without admitting false cache hits in practice.
const RESUME_FINGERPRINT_PREFIX: usize = 2048;

/// Default artifact lifetime within a session.
pub const DEFAULT_ARTIFACT_TTL_MINUTES: i64 = 30;

/// Deterministic cache key derived from the job-description source and the
/// candidate's serialized resume data. Identical inputs always produce the
/// same fingerprint; any change to either input produces a different one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn new(jd_source: &str, resume_data: &str) -> Self {
        let prefix_end = resume_data
            .char_indices()
            .nth(RESUME_FINGERPRINT_PREFIX)
            .map(|(index, _)| index)
            .unwrap_or(resume_data.len());

        let mut hasher = DefaultHasher::new();
        jd_source.hash(&mut hasher);
        resume_data[..prefix_end].hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Time source for expiry checks, injectable so tests never sleep.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    artifact: AssessmentArtifact,
    expires_at: DateTime<Utc>,
}

/// Session-scoped cache of generated assessment artifacts (MCQ batches,
/// coding assignment sets). Avoids redundant regeneration calls when a
/// candidate revisits a stage. Expiry is lazy: expired entries are treated as
/// absent and evicted on read; there is no background sweeper.
pub struct AssessmentResultCache<C = SystemClock> {
    entries: Mutex<HashMap<Fingerprint, CacheEntry>>,
    clock: C,
}

impl Default for AssessmentResultCache<SystemClock> {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C> AssessmentResultCache<C>
where
    C: Clock,
{
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Returns the cached artifact, or `None` when absent or expired.
    pub fn get(&self, fingerprint: Fingerprint) -> Option<AssessmentArtifact> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");

        match entries.get(&fingerprint) {
            Some(entry) if now < entry.expires_at => Some(entry.artifact.clone()),
            Some(_) => {
                entries.remove(&fingerprint);
                None
            }
            None => None,
        }
    }

    /// Store an artifact, overwriting any existing entry for the same key.
    pub fn put(&self, fingerprint: Fingerprint, artifact: AssessmentArtifact, ttl: Duration) {
        let expires_at = self.clock.now() + ttl;
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            fingerprint,
            CacheEntry {
                artifact,
                expires_at,
            },
        );
    }

    /// Drop an entry ahead of expiry, e.g. when the UI explicitly requests a
    /// fresh assessment.
    pub fn invalidate(&self, fingerprint: Fingerprint) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.remove(&fingerprint);
    }
}

pub fn default_artifact_ttl() -> Duration {
    Duration::minutes(DEFAULT_ARTIFACT_TTL_MINUTES)
}
