// Data models for TaskList

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// High priority and not yet completed
    pub fn is_urgent(&self) -> bool {
        self.priority == Priority::High && !self.completed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(StoreError::InvalidPriority(s.to_string())),
        }
    }
}

/// Bootstrap entry applied at construction time, as if added then optionally completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedTask {
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl SeedTask {
    pub fn new(text: impl Into<String>, priority: Priority, completed: bool) -> Self {
        Self {
            text: text.into(),
            priority,
            completed,
        }
    }
}

/// Display counters derived from the full task list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed tasks, one decimal place; 0 when there are no tasks
    pub completion_rate: f64,
}

impl Statistics {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total > 0 {
            (completed as f64 / total as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }

    /// Advisory message for the current completion level, if any
    pub fn feedback(&self) -> Option<String> {
        if self.completion_rate >= 80.0 && self.total > 0 {
            Some(format!(
                "Great job! You've completed {:.1}% of your tasks!",
                self.completion_rate
            ))
        } else if self.completion_rate < 50.0 && self.total > 3 {
            Some("You have many pending tasks. Consider prioritizing them!".to_string())
        } else {
            None
        }
    }
}

/// Per-priority tally plus total completed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub completed: usize,
}

impl Analysis {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Analysis::default(), |mut acc, task| {
            match task.priority {
                Priority::High => acc.high += 1,
                Priority::Medium => acc.medium += 1,
                Priority::Low => acc.low += 1,
            }
            if task.completed {
                acc.completed += 1;
            }
            acc
        })
    }
}
