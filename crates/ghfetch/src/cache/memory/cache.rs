//! In-memory cache with sliding expiration.
//!
//! Entries carry a last-access instant that is refreshed on every read and
//! write. A background task sweeps the whole map once per [`SWEEP_INTERVAL`]
//! and drops every entry idle for longer than the configured TTL.
//!
//! Expiry is lazy: an entry that went idle past the TTL is still served until
//! the next sweep removes it, so staleness is bounded by one sweep interval.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use ghfetch_core::cache::Cache;

/// How often the background sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// A single cache entry and the last time it was touched.
#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    last_access: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            last_access: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    /// Returns true if the entry has been idle for longer than `max_ttl`.
    fn is_idle(&self, now: Instant, max_ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_access) > max_ttl
    }
}

type Entries<V> = Arc<Mutex<HashMap<String, CacheEntry<V>>>>;

/// Concurrent key/value cache with sliding per-entry expiration.
///
/// All reads, writes and the sweep share one lock. A sweep holds it for a full
/// scan, so the cache is meant to stay small (capacity hint plus a short TTL).
///
/// Must be created inside a tokio runtime: construction spawns the sweep task.
/// Call [`ExpiringCache::shutdown`] to stop and join it; dropping the cache
/// only signals it.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    entries: Entries<V>,
    shutdown_tx: broadcast::Sender<()>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<V> ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache and starts its sweep task.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Initial capacity hint for the entry map.
    /// * `max_ttl_secs` - Maximum idle time, in seconds, before an entry is swept.
    pub fn new(capacity: usize, max_ttl_secs: u64) -> Self {
        Self::with_sweep_interval(capacity, Duration::from_secs(max_ttl_secs), SWEEP_INTERVAL)
    }

    pub(crate) fn with_sweep_interval(
        capacity: usize,
        max_ttl: Duration,
        sweep_interval: Duration,
    ) -> Self {
        let entries: Entries<V> = Arc::new(Mutex::new(HashMap::with_capacity(capacity)));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let sweeper = tokio::spawn(sweep_loop(
            Arc::clone(&entries),
            max_ttl,
            sweep_interval,
            shutdown_rx,
        ));

        tracing::debug!(
            capacity,
            max_ttl_secs = max_ttl.as_secs(),
            "Expiring cache started"
        );

        Self {
            entries,
            shutdown_tx,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    /// Inserts or overwrites a value and resets its idle clock.
    pub async fn put(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.lock().await;
        entries.insert(key.into(), CacheEntry::new(value));
    }

    /// Returns the value for `key` and resets its idle clock.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        entries.get_mut(key).map(|entry| {
            entry.touch();
            entry.value.clone()
        })
    }

    /// Number of resident entries, including idle ones not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Stops the sweep task and waits for it to finish.
    ///
    /// Entries stay readable afterwards but are no longer expired.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());

        let handle = self.sweeper.lock().await.take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "Cache sweep task ended abnormally");
            }
        }
    }
}

impl<V> Drop for ExpiringCache<V> {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[async_trait]
impl<V> Cache<V> for ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        ExpiringCache::get(self, key).await
    }

    async fn put(&self, key: &str, value: V) {
        ExpiringCache::put(self, key, value).await
    }

    async fn len(&self) -> usize {
        ExpiringCache::len(self).await
    }
}

async fn sweep_loop<V>(
    entries: Entries<V>,
    max_ttl: Duration,
    period: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let evicted = sweep(&entries, Instant::now(), max_ttl).await;
                if evicted > 0 {
                    tracing::debug!(evicted, "Swept idle cache entries");
                }
            }
            _ = shutdown_rx.recv() => {
                tracing::debug!("Cache sweep stopped");
                break;
            }
        }
    }
}

/// Removes every entry idle for longer than `max_ttl`. Returns how many went.
async fn sweep<V>(
    entries: &Mutex<HashMap<String, CacheEntry<V>>>,
    now: Instant,
    max_ttl: Duration,
) -> usize {
    let mut entries = entries.lock().await;
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_idle(now, max_ttl));
    before - entries.len()
}
