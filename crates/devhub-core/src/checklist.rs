//! Ordered task checklist.
//!
//! Tasks keep the order the user gives them; `move_task` has the same
//! splice semantics as dragging an item onto another position.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    InProgress,
    Finished,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Finished => "Finished",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    pub fn is_finished(&self) -> bool {
        self.status == TaskStatus::Finished
    }
}

/// Colour band of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    Empty,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// 0.0 .. 100.0
    pub percent: f64,
    pub band: ProgressBand,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Append a new in-progress task. Surrounding whitespace is dropped.
    pub fn add(&mut self, text: &str) -> Result<&Task, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        self.tasks.push(Task {
            text: text.to_string(),
            status: TaskStatus::InProgress,
        });
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip between in-progress and finished. Returns the new status.
    pub fn toggle(&mut self, index: usize) -> Result<TaskStatus, ValidationError> {
        let task = self.task_mut(index)?;
        task.status = match task.status {
            TaskStatus::InProgress => TaskStatus::Finished,
            TaskStatus::Finished => TaskStatus::InProgress,
        };
        Ok(task.status)
    }

    pub fn set_status(&mut self, index: usize, status: TaskStatus) -> Result<(), ValidationError> {
        self.task_mut(index)?.status = status;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Task, ValidationError> {
        self.check(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Take the task at `from` out and insert it at `to`.
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        self.check(from)?;
        self.check(to)?;
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        Ok(())
    }

    pub fn progress(&self) -> Progress {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.is_finished()).count();
        if total == 0 {
            return Progress {
                completed,
                total,
                percent: 0.0,
                band: ProgressBand::Empty,
            };
        }
        let percent = completed as f64 / total as f64 * 100.0;
        let band = if percent <= 33.0 {
            ProgressBand::Low
        } else if percent <= 66.0 {
            ProgressBand::Medium
        } else {
            ProgressBand::High
        };
        Progress {
            completed,
            total,
            percent,
            band,
        }
    }

    fn check(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.tasks.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "tasks".into(),
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task, ValidationError> {
        self.check(index)?;
        Ok(&mut self.tasks[index])
    }
}
