// Thread-safe handle around a single TaskStore

use crate::error::StoreError;
use crate::filter::TaskFilter;
use crate::models::{Analysis, Priority, Statistics, Task};
use crate::store::TaskStore;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

/// Cloneable handle that serializes every operation behind one mutex
///
/// Mutators are not decomposable without breaking id uniqueness, so the whole
/// store is locked for the duration of each call.
#[derive(Debug, Clone)]
pub struct SharedTaskStore {
    inner: Arc<Mutex<TaskStore>>,
}

impl SharedTaskStore {
    pub fn new(store: TaskStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TaskStore> {
        // Mutators validate before mutating, so a panic elsewhere cannot leave
        // a half-applied change behind.
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Task store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Run a closure with exclusive access to the store
    pub fn with<R>(&self, f: impl FnOnce(&mut TaskStore) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn add(&self, text: &str, priority: Priority) -> Result<Task, StoreError> {
        self.lock().add(text, priority)
    }

    pub fn toggle(&self, id: u64) -> Result<Task, StoreError> {
        self.lock().toggle(id)
    }

    pub fn delete(&self, id: u64) -> Result<Task, StoreError> {
        self.lock().delete(id)
    }

    pub fn clear_all(&self) -> Result<usize, StoreError> {
        self.lock().clear_all()
    }

    pub fn set_filter(&self, filter: TaskFilter) {
        self.lock().set_filter(filter)
    }

    /// Owned snapshot of the tasks matching the active filter
    pub fn filtered_tasks(&self) -> Vec<Task> {
        self.lock().filtered_tasks().into_iter().cloned().collect()
    }

    pub fn statistics(&self) -> Statistics {
        self.lock().statistics()
    }

    pub fn analyze(&self) -> Analysis {
        self.lock().analyze()
    }

    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.lock().overdue_count(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_concurrent_adds_keep_ids_unique() {
        let shared = SharedTaskStore::new(TaskStore::default());
        let threads = 8;
        let per_thread = 25;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let shared = shared.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    (0..per_thread)
                        .map(|i| shared.add(&format!("thread {} task {}", t, i), Priority::Low).unwrap().id)
                        .collect::<Vec<u64>>()
                })
            })
            .collect();

        let mut all_ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all_ids.insert(id), "duplicate id {}", id);
            }
        }

        assert_eq!(all_ids.len(), threads * per_thread);
        assert_eq!(shared.statistics().total, threads * per_thread);
        shared.with(|store| assert_eq!(store.next_id(), (threads * per_thread) as u64 + 1));
    }

    #[test]
    fn test_concurrent_high_priority_cap_holds() {
        let shared = SharedTaskStore::new(TaskStore::default());
        let barrier = Arc::new(Barrier::new(20));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let shared = shared.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    shared.add(&format!("urgent {}", i), Priority::High).is_ok()
                })
            })
            .collect();

        let admitted = handles.into_iter().filter_map(|h| h.join().ok()).filter(|ok| *ok).count();
        assert_eq!(admitted, 10);
        assert_eq!(shared.analyze().high, 10);
    }

    #[test]
    fn test_shared_filter_and_delete() {
        let shared = SharedTaskStore::new(TaskStore::default());
        shared.add("alpha", Priority::High).unwrap();
        shared.add("beta", Priority::Low).unwrap();
        shared.toggle(2).unwrap();

        shared.set_filter(TaskFilter::Pending);
        let pending = shared.filtered_tasks();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].text, "alpha");

        assert_eq!(shared.delete(1).unwrap().id, 1);
        assert_eq!(shared.clear_all(), Ok(1));
        assert_eq!(shared.clear_all(), Err(StoreError::Empty));
        assert_eq!(shared.overdue_count(Utc::now()), 0);
    }
}
