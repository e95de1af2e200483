//! Keyed debouncing and stale-response gates.
//!
//! Every key has at most one pending task. Scheduling a key again cancels
//! the pending task for that key only; other keys keep their timers.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct Pending {
    token: CancellationToken,
    generation: u64,
}

type PendingMap = Arc<Mutex<HashMap<String, Pending>>>;

fn lock(pending: &PendingMap) -> MutexGuard<'_, HashMap<String, Pending>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs a task once its key has been quiet for `delay`.
pub struct KeyedDebouncer {
    delay: Duration,
    pending: PendingMap,
    generation: AtomicU64,
}

impl KeyedDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` under `key`, replacing any pending task for the key.
    ///
    /// The returned handle resolves to `true` when the task ran and `false`
    /// when it was superseded or cancelled. The task future is not polled
    /// before the delay elapses.
    pub fn schedule<F>(&self, key: &str, task: F) -> JoinHandle<bool>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();

        if let Some(previous) = lock(&self.pending).insert(
            key.to_string(),
            Pending {
                token: token.clone(),
                generation,
            },
        ) {
            previous.token.cancel();
        }

        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        let key = key.to_string();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("[Debouncer] '{}' #{} superseded", key, generation);
                    false
                }
                _ = tokio::time::sleep(delay) => {
                    {
                        let mut map = lock(&pending);
                        match map.get(&key) {
                            Some(entry) if entry.generation == generation => {
                                map.remove(&key);
                            }
                            _ => return false,
                        }
                    }
                    tracing::debug!("[Debouncer] '{}' #{} firing", key, generation);
                    task.await;
                    true
                }
            }
        })
    }

    /// Cancels the pending task for `key`. Returns whether one existed.
    pub fn cancel(&self, key: &str) -> bool {
        match lock(&self.pending).remove(key) {
            Some(entry) => {
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        for (_, entry) in lock(&self.pending).drain() {
            entry.token.cancel();
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        lock(&self.pending).contains_key(key)
    }
}

impl Drop for KeyedDebouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Identifies one request issued through a [`RequestGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Per-panel generation counter.
///
/// A panel takes a ticket before each request and renders the response only
/// while its ticket is still the latest one.
#[derive(Debug, Default)]
pub struct RequestGate {
    latest: AtomicU64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn bump(count: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let count = Arc::clone(count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_schedules_fire_once_after_last() {
        let debouncer = KeyedDebouncer::new(Duration::from_millis(1000));
        let count = counter();

        let first = debouncer.schedule("realworld", bump(&count));
        tokio::time::sleep(Duration::from_millis(400)).await;
        let second = debouncer.schedule("realworld", bump(&count));
        tokio::time::sleep(Duration::from_millis(400)).await;
        let last = debouncer.schedule("realworld", bump(&count));

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending("realworld"));

        assert!(last.await.unwrap());
        assert!(!first.await.unwrap());
        assert!(!second.await.unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending("realworld"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let debouncer = KeyedDebouncer::new(Duration::from_millis(1000));
        let count = counter();

        let realworld = debouncer.schedule("realworld", bump(&count));
        tokio::time::sleep(Duration::from_millis(500)).await;
        let demo = debouncer.schedule("demo", bump(&count));

        assert!(realworld.await.unwrap());
        assert!(demo.await.unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_task() {
        let debouncer = KeyedDebouncer::new(Duration::from_millis(1000));
        let count = counter();

        let handle = debouncer.schedule("demo", bump(&count));
        assert!(debouncer.cancel("demo"));
        assert!(!debouncer.cancel("demo"));

        assert!(!handle.await.unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_request_gate_discards_superseded_tickets() {
        let gate = RequestGate::new();
        let older = gate.begin();
        let newer = gate.begin();
        assert!(!gate.is_current(older));
        assert!(gate.is_current(newer));

        gate.invalidate();
        assert!(!gate.is_current(newer));
    }
}
