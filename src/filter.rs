// View filters over the task list

use crate::error::StoreError;
use crate::models::{Priority, Task};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Selects which tasks a query returns, without altering stored data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
    High, // both completed and pending
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Pending => !task.completed,
            TaskFilter::High => task.priority == Priority::High,
        }
    }
}

impl std::fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskFilter::All => write!(f, "all"),
            TaskFilter::Completed => write!(f, "completed"),
            TaskFilter::Pending => write!(f, "pending"),
            TaskFilter::High => write!(f, "high"),
        }
    }
}

impl FromStr for TaskFilter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "completed" => Ok(TaskFilter::Completed),
            "pending" => Ok(TaskFilter::Pending),
            "high" => Ok(TaskFilter::High),
            _ => Err(StoreError::InvalidFilter(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(priority: Priority, completed: bool) -> Task {
        Task {
            id: 1,
            text: "Filter me".to_string(),
            priority,
            completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_matches() {
        let done_high = task(Priority::High, true);
        let open_low = task(Priority::Low, false);

        assert!(TaskFilter::All.matches(&done_high));
        assert!(TaskFilter::All.matches(&open_low));
        assert!(TaskFilter::Completed.matches(&done_high));
        assert!(!TaskFilter::Completed.matches(&open_low));
        assert!(TaskFilter::Pending.matches(&open_low));
        assert!(!TaskFilter::Pending.matches(&done_high));
        assert!(TaskFilter::High.matches(&done_high));
        assert!(!TaskFilter::High.matches(&open_low));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<TaskFilter>().unwrap(), TaskFilter::All);
        assert_eq!("PENDING".parse::<TaskFilter>().unwrap(), TaskFilter::Pending);
        assert_eq!(
            "archived".parse::<TaskFilter>(),
            Err(StoreError::InvalidFilter("archived".to_string()))
        );
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(TaskFilter::Completed.to_string(), "completed");
        assert_eq!(TaskFilter::High.to_string(), "high");
        assert_eq!(TaskFilter::default(), TaskFilter::All);
    }
}
