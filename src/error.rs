// Error taxonomy for task store operations

use thiserror::Error;

/// Local validation failures returned by `TaskStore` operations.
///
/// None of these are fatal: a failed call leaves the store untouched and the
/// caller is expected to surface the message and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Please enter a task description!")]
    EmptyInput,

    #[error("Task description must be at least {min} characters long!")]
    TooShort { len: usize, min: usize },

    #[error("You can only have {cap} high priority tasks at once!")]
    PriorityCapExceeded { cap: usize },

    #[error("No task with id {0}")]
    NotFound(u64),

    #[error("Unknown filter '{0}' (expected all, completed, pending or high)")]
    InvalidFilter(String),

    #[error("Unknown priority '{0}' (expected high, medium or low)")]
    InvalidPriority(String),

    #[error("No tasks to clear!")]
    Empty,
}

impl StoreError {
    /// True for no-op signals that callers may report as information rather than failure
    pub fn is_informational(&self) -> bool {
        matches!(self, StoreError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreError::EmptyInput.to_string(), "Please enter a task description!");
        assert_eq!(
            StoreError::TooShort { len: 2, min: 3 }.to_string(),
            "Task description must be at least 3 characters long!"
        );
        assert_eq!(
            StoreError::PriorityCapExceeded { cap: 10 }.to_string(),
            "You can only have 10 high priority tasks at once!"
        );
        assert_eq!(StoreError::NotFound(7).to_string(), "No task with id 7");
    }

    #[test]
    fn test_is_informational() {
        assert!(StoreError::Empty.is_informational());
        assert!(!StoreError::NotFound(1).is_informational());
        assert!(!StoreError::EmptyInput.is_informational());
    }
}
