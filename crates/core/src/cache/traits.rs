use async_trait::async_trait;

/// Key/value cache used by the fetch path.
///
/// A miss is `None`, never an error, and writes cannot fail.
#[async_trait]
pub trait Cache<V>: Send + Sync
where
    V: Send + 'static,
{
    /// Gets a value by key, refreshing its idle clock on a hit.
    async fn get(&self, key: &str) -> Option<V>;

    /// Inserts or overwrites a value, refreshing its idle clock.
    async fn put(&self, key: &str, value: V);

    /// Number of resident entries, including expired ones not yet swept.
    async fn len(&self) -> usize;

    /// Returns true if no entry is resident.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
