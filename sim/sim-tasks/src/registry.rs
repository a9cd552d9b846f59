//! Name → task descriptor table.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::builtin::builtin_tasks;
use crate::{Result, TaskDescriptor, TaskError};

/// Explicit table of registered tasks.
///
/// Descriptors are validated on registration and immutable afterwards.
///
/// # Example
///
/// ```
/// use sim_tasks::TaskRegistry;
///
/// let registry = TaskRegistry::builtin()?;
/// let task = registry.get("PutCarrotOnPlateInScene-v0")?;
/// assert_eq!(task.instruction, "put carrot on plate");
/// assert_eq!(task.num_episodes(), 24);
///
/// assert!(registry.get("PutMugOnShelf-v0").is_err());
/// # Ok::<(), sim_tasks::TaskError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, TaskDescriptor>,
}

impl TaskRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in task family.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for task in builtin_tasks() {
            registry.register(task)?;
        }
        debug!(tasks = registry.len(), "Built task registry");
        Ok(registry)
    }

    /// Validate and add a task. Names must be unique.
    pub fn register(&mut self, task: TaskDescriptor) -> Result<()> {
        task.validate()?;
        if self.tasks.contains_key(&task.name) {
            return Err(TaskError::duplicate_task(task.name));
        }
        self.tasks.insert(task.name.clone(), task);
        Ok(())
    }

    /// Look up a task by name.
    pub fn get(&self, name: &str) -> Result<&TaskDescriptor> {
        self.tasks
            .get(name)
            .ok_or_else(|| TaskError::unknown_task(name))
    }

    /// Whether a task is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Registered tasks, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskDescriptor> {
        self.tasks.values()
    }

    /// Register every task of a JSON array of descriptors.
    ///
    /// The batch is all-or-nothing: if any descriptor is invalid or its name
    /// is taken, nothing is registered. Returns the number of tasks added.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize> {
        let tasks: Vec<TaskDescriptor> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for task in &tasks {
            task.validate()?;
            if self.contains(&task.name) || !seen.insert(task.name.as_str()) {
                return Err(TaskError::duplicate_task(task.name.clone()));
            }
        }
        drop(seen);

        let added = tasks.len();
        for task in tasks {
            self.tasks.insert(task.name.clone(), task);
        }
        debug!(added, total = self.len(), "Loaded tasks from JSON");
        Ok(added)
    }

    /// Serialize every task, sorted by name, as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        let mut tasks: Vec<_> = self.tasks.values().collect();
        tasks.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Ok(serde_json::to_string_pretty(&tasks)?)
    }
}
