//! In-memory task store for the current session.

use taskpilot_proto::task::Task;

/// Ordered collection of tasks. Insertion order is the base display order.
///
/// Tasks are appended by the form or replaced wholesale by a scoring
/// response; there is no per-task removal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Appends a task at the end.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replaces the whole contents. Nothing of the previous contents is kept.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Tasks in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl From<Vec<Task>> for TaskStore {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
