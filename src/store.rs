// In-memory task store: action methods mutate, query methods derive views

use crate::error::StoreError;
use crate::filter::TaskFilter;
use crate::models::{Analysis, Priority, SeedTask, Statistics, Task};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

/// Minimum number of characters in a trimmed task description
pub const MIN_TEXT_LEN: usize = 3;

/// Tunables for a `TaskStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of incomplete high priority tasks admitted by `add`
    pub high_priority_cap: usize,
    /// Age in days after which an incomplete high priority task counts as overdue
    pub overdue_threshold_days: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            high_priority_cap: 10,
            overdue_threshold_days: 2,
        }
    }
}

/// Session-scoped task list
///
/// Owns the tasks (oldest first), the id counter and the active filter.
/// Every mutator validates before touching state, so a failed call is a no-op.
#[derive(Debug, Clone)]
pub struct TaskStore {
    config: StoreConfig,
    tasks: Vec<Task>,
    next_id: u64,
    active_filter: TaskFilter,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl TaskStore {
    /// Create an empty store
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            tasks: Vec::new(),
            next_id: 1,
            active_filter: TaskFilter::All,
        }
    }

    /// Create a store pre-populated with seed tasks
    ///
    /// Each seed goes through the same validation as `add` and is then marked
    /// completed if requested.
    pub fn with_seed<I>(config: StoreConfig, seeds: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = SeedTask>,
    {
        let mut store = Self::new(config);
        for seed in seeds {
            let id = store.add(&seed.text, seed.priority)?.id;
            if seed.completed {
                store.toggle(id)?;
            }
        }
        debug!(count = store.tasks.len(), "Seeded task store");
        Ok(store)
    }

    /// Demonstration tasks a fresh session can boot with
    pub fn demo_seed() -> Vec<SeedTask> {
        vec![
            SeedTask::new("Learn JavaScript fundamentals", Priority::High, true),
            SeedTask::new("Practice DOM manipulation", Priority::Medium, false),
            SeedTask::new("Build a web application", Priority::Low, false),
        ]
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The id the next successful `add` will assign
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn active_filter(&self) -> TaskFilter {
        self.active_filter
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks counted against the high priority cap
    pub fn high_priority_pending(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_urgent()).count()
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Add a task created now
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<Task, StoreError> {
        self.add_at(text, priority, Utc::now())
    }

    /// Add a task created now, admitting at most `cap` incomplete high priority tasks
    pub fn add_with_cap(&mut self, text: &str, priority: Priority, cap: usize) -> Result<Task, StoreError> {
        self.insert(text, priority, cap, Utc::now())
    }

    /// Add a task with an explicit creation time
    pub fn add_at(
        &mut self,
        text: &str,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Result<Task, StoreError> {
        self.insert(text, priority, self.config.high_priority_cap, created_at)
    }

    fn insert(
        &mut self,
        text: &str,
        priority: Priority,
        cap: usize,
        created_at: DateTime<Utc>,
    ) -> Result<Task, StoreError> {
        let text = Self::validate_text(text)?;

        if priority == Priority::High && self.high_priority_pending() >= cap {
            warn!(cap, "High priority cap reached, rejecting task");
            return Err(StoreError::PriorityCapExceeded { cap });
        }

        let task = Task {
            id: self.next_id,
            text: text.to_string(),
            priority,
            completed: false,
            created_at,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());

        info!(id = task.id, %priority, "Task added");
        Ok(task)
    }

    /// Flip the completion flag of a task in place
    pub fn toggle(&mut self, id: u64) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        task.completed = !task.completed;

        if task.completed {
            info!(id, "Task completed");
        } else {
            info!(id, "Task marked as pending");
        }
        Ok(task.clone())
    }

    /// Remove a task, keeping the relative order of the rest
    pub fn delete(&mut self, id: u64) -> Result<Task, StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.tasks.remove(index);
        info!(id, "Task deleted");
        Ok(removed)
    }

    /// Remove every task and reset the id counter
    ///
    /// Returns `StoreError::Empty` when there is nothing to clear.
    pub fn clear_all(&mut self) -> Result<usize, StoreError> {
        if self.tasks.is_empty() {
            debug!("Clear requested on empty store");
            return Err(StoreError::Empty);
        }

        let count = self.tasks.len();
        self.tasks.clear();
        self.next_id = 1;

        info!(count, "All tasks cleared");
        Ok(count)
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.active_filter = filter;
        debug!(%filter, "Filter applied");
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Tasks matching the active filter, in insertion order
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        let filter = self.active_filter;
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Counters over all tasks, ignoring the active filter
    pub fn statistics(&self) -> Statistics {
        Statistics::from_tasks(&self.tasks)
    }

    pub fn analyze(&self) -> Analysis {
        Analysis::from_tasks(&self.tasks)
    }

    /// Count incomplete high priority tasks older than `threshold_days` at `now`
    ///
    /// Age is elapsed wall-clock time, not a calendar date difference. A threshold
    /// too large to represent as a duration matches nothing.
    pub fn overdue_high_priority_count(&self, now: DateTime<Utc>, threshold_days: i64) -> usize {
        let Some(threshold) = Duration::try_days(threshold_days) else {
            debug!(threshold_days, "Overdue threshold out of range, nothing is overdue");
            return 0;
        };
        self.tasks
            .iter()
            .filter(|t| t.is_urgent() && now.signed_duration_since(t.created_at) > threshold)
            .count()
    }

    /// `overdue_high_priority_count` with the configured threshold
    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.overdue_high_priority_count(now, self.config.overdue_threshold_days)
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn validate_text(text: &str) -> Result<&str, StoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyInput);
        }

        let len = trimmed.chars().count();
        if len < MIN_TEXT_LEN {
            return Err(StoreError::TooShort {
                len,
                min: MIN_TEXT_LEN,
            });
        }

        Ok(trimmed)
    }
}
