//! In-memory, key-indexed store of payment intents.
//!
//! Each intent sits behind its own `tokio::sync::Mutex`, so all transitions
//! of one order are serialized while distinct orders proceed independently.
//! The map lock is only held for lookups, inserts and evictions, never
//! across an intent lock acquisition or a provider call.

use super::PaymentIntent;
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Exclusive access to one intent. Dropping the guard releases the order.
pub type IntentGuard = OwnedMutexGuard<PaymentIntent>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("intent for order {0} already exists")]
    Duplicate(String),
}

#[derive(Debug, Default)]
pub struct IntentTracker {
    intents: RwLock<HashMap<String, Arc<Mutex<PaymentIntent>>>>,
}

impl IntentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new intent.
    ///
    /// Order ids are unique per intent; a second insert for the same id is
    /// rejected and the existing intent is left untouched.
    pub async fn insert(&self, intent: PaymentIntent) -> Result<(), TrackerError> {
        let mut intents = self.intents.write().await;
        if intents.contains_key(&intent.order_id) {
            return Err(TrackerError::Duplicate(intent.order_id));
        }
        intents.insert(intent.order_id.clone(), Arc::new(Mutex::new(intent)));
        Ok(())
    }

    /// Snapshot of the intent for `order_id`.
    ///
    /// Waits for any in-flight transition on that order to finish.
    pub async fn get(&self, order_id: &str) -> Option<PaymentIntent> {
        let entry = self.entry(order_id).await?;
        let intent = entry.lock().await;
        Some(intent.clone())
    }

    /// Acquire exclusive access to the intent for `order_id`.
    ///
    /// Returns `None` if the order is unknown, or if it was evicted while
    /// this call was waiting for the lock.
    pub async fn lock(&self, order_id: &str) -> Option<IntentGuard> {
        let entry = self.entry(order_id).await?;
        let guard = entry.clone().lock_owned().await;

        let still_tracked = self
            .intents
            .read()
            .await
            .get(order_id)
            .is_some_and(|current| Arc::ptr_eq(current, &entry));
        still_tracked.then_some(guard)
    }

    /// Evict every idle intent for which `expired` returns `true`.
    ///
    /// Intents currently locked by a transition are skipped and will be
    /// reconsidered on the next sweep. Returns the number of evictions.
    pub async fn evict_where<F>(&self, mut expired: F) -> usize
    where
        F: FnMut(&PaymentIntent, OffsetDateTime) -> bool,
    {
        let now = OffsetDateTime::now_utc();
        let mut intents = self.intents.write().await;
        let before = intents.len();
        intents.retain(|_, entry| match entry.try_lock() {
            Ok(intent) => !expired(&intent, now),
            Err(_) => true,
        });
        before - intents.len()
    }

    pub async fn len(&self) -> usize {
        self.intents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.intents.read().await.is_empty()
    }

    async fn entry(&self, order_id: &str) -> Option<Arc<Mutex<PaymentIntent>>> {
        self.intents.read().await.get(order_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentState;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn intent(order_id: &str) -> PaymentIntent {
        PaymentIntent::new(order_id.into(), 10_000, "INR".into(), BTreeMap::new())
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let tracker = IntentTracker::new();
        tracker.insert(intent("order_1")).await.unwrap();

        let snapshot = tracker.get("order_1").await.unwrap();
        assert_eq!(snapshot.amount_minor, 10_000);
        assert_eq!(snapshot.state, IntentState::Created);
        assert!(tracker.get("order_2").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let tracker = IntentTracker::new();
        tracker.insert(intent("order_1")).await.unwrap();

        let mut other = intent("order_1");
        other.amount_minor = 1;
        assert_eq!(
            tracker.insert(other).await,
            Err(TrackerError::Duplicate("order_1".into()))
        );
        assert_eq!(tracker.get("order_1").await.unwrap().amount_minor, 10_000);
    }

    #[tokio::test]
    async fn test_lock_mutates_in_place() {
        let tracker = IntentTracker::new();
        tracker.insert(intent("order_1")).await.unwrap();

        {
            let mut guard = tracker.lock("order_1").await.unwrap();
            guard.transition(IntentState::AwaitingVerification).unwrap();
        }
        assert_eq!(
            tracker.get("order_1").await.unwrap().state,
            IntentState::AwaitingVerification
        );
        assert!(tracker.lock("missing").await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_lock_is_exclusive_per_order() {
        let tracker = Arc::new(IntentTracker::new());
        tracker.insert(intent("order_1")).await.unwrap();

        let guard = tracker.lock("order_1").await.unwrap();
        let contender = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.lock("order_1").await.is_some() })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!contender.is_finished());

        drop(guard);
        assert!(contender.await.unwrap());
    }

    #[tokio::test]
    async fn test_other_orders_not_blocked() {
        let tracker = IntentTracker::new();
        tracker.insert(intent("order_1")).await.unwrap();
        tracker.insert(intent("order_2")).await.unwrap();

        let _held = tracker.lock("order_1").await.unwrap();
        let other = tokio::time::timeout(Duration::from_secs(1), tracker.lock("order_2")).await;
        assert!(matches!(other, Ok(Some(_))));
    }

    #[tokio::test]
    async fn test_evict_skips_locked_intents() {
        let tracker = IntentTracker::new();
        tracker.insert(intent("order_1")).await.unwrap();
        tracker.insert(intent("order_2")).await.unwrap();

        let held = tracker.lock("order_1").await.unwrap();
        let evicted = tracker.evict_where(|_, _| true).await;
        assert_eq!(evicted, 1);
        assert_eq!(tracker.len().await, 1);
        drop(held);

        assert!(tracker.get("order_1").await.is_some());
        assert!(tracker.get("order_2").await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_lock_after_eviction_reports_unknown() {
        let tracker = Arc::new(IntentTracker::new());
        tracker.insert(intent("order_1")).await.unwrap();

        let entry = tracker.entry("order_1").await.unwrap();
        let waiting = entry.clone().lock_owned().await;

        let waiter = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.lock("order_1").await.is_none() })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        tracker.intents.write().await.remove("order_1");
        drop(waiting);

        assert!(waiter.await.unwrap());
    }
}
