// Task store: ordered collection, validated mutations, derived views

use crate::filter;
use crate::models::Task;
use crate::storage::{Storage, TASKS_KEY};
use eyre::Result;
use thiserror::Error;
use tracing::{debug, warn};

/// Rejected input to `add`. The message doubles as the user-visible
/// error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter both a name and a task.")]
    MissingFields,
    #[error("Please enter a valid name.")]
    NumericName,
}

/// One page of the filtered view plus the total filtered count.
#[derive(Debug)]
pub struct QueryResult<'a> {
    /// Tasks on the current page, in insertion order.
    pub tasks: Vec<&'a Task>,
    /// How many tasks match the search term across all pages.
    pub total_filtered: usize,
}

impl QueryResult<'_> {
    /// Total pages at the given page size.
    pub fn page_count(&self, page_size: usize) -> usize {
        filter::page_count(self.total_filtered, page_size)
    }
}

/// Uncommitted name/text values held while a task is being edited.
struct EditDraft {
    id: u32,
    name: String,
    text: String,
}

/// The task collection and its transient UI state.
///
/// Owns the ordered tasks exclusively; mutations go through the methods
/// below, which persist a full snapshot through the `Storage` collaborator
/// after every committed change. Queries are pure derivations.
pub struct TaskStore<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
    search_term: String,
    current_page: usize,
    draft: Option<EditDraft>,
    error_message: Option<String>,
    listeners: Vec<Box<dyn Fn()>>,
}

impl<S: Storage> TaskStore<S> {
    /// Open a store over the given storage, loading the saved snapshot
    /// if one exists.
    ///
    /// An unreadable snapshot is logged and treated as absent.
    pub fn open(storage: S) -> Result<Self> {
        let tasks = match storage.get(TASKS_KEY)? {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!(error = ?e, "Stored snapshot is unreadable, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        debug!(count = tasks.len(), "Opened task store");

        Ok(Self {
            storage,
            tasks,
            search_term: String::new(),
            current_page: 1,
            draft: None,
            error_message: None,
            listeners: Vec::new(),
        })
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a task. `name` and `text` must be non-blank and `name` must not
    /// be purely numeric.
    ///
    /// On failure the collection is unchanged and `error_message` is set;
    /// on success any prior error message is cleared and the new task gets
    /// id `max(existing ids, 0) + 1`, recomputed from current contents so
    /// ids stay unique across deletions.
    pub fn add(&mut self, name: &str, text: &str) -> std::result::Result<Task, ValidationError> {
        if name.trim().is_empty() || text.trim().is_empty() {
            return Err(self.reject(ValidationError::MissingFields));
        }
        if name.trim().parse::<f64>().is_ok() {
            return Err(self.reject(ValidationError::NumericName));
        }
        self.error_message = None;

        let id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task {
            id,
            text: text.to_string(),
            name: name.to_string(),
            completed: false,
        };

        debug!(id, "Adding task");
        self.tasks.push(task.clone());
        self.committed();

        Ok(task)
    }

    /// Flip the completion flag of the task with the given id. Silent
    /// no-op when the id is unknown.
    pub fn toggle_complete(&mut self, id: u32) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
            self.committed();
        }
    }

    /// Remove the task with the given id, keeping the relative order of
    /// the rest. Ids are never renumbered. Silent no-op when unknown.
    pub fn delete(&mut self, id: u32) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            debug!(id, "Deleted task");
            self.committed();
        }
    }

    /// Start editing a task, seeding the draft buffers from its current
    /// name and text. Silent no-op when the id is unknown.
    pub fn begin_edit(&mut self, id: u32) {
        if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
            self.draft = Some(EditDraft {
                id,
                name: task.name.clone(),
                text: task.text.clone(),
            });
        }
    }

    /// Replace the draft name. No-op when no edit is in progress.
    pub fn set_draft_name(&mut self, name: &str) {
        if let Some(draft) = &mut self.draft {
            draft.name = name.to_string();
        }
    }

    /// Replace the draft text. No-op when no edit is in progress.
    pub fn set_draft_text(&mut self, text: &str) {
        if let Some(draft) = &mut self.draft {
            draft.text = text.to_string();
        }
    }

    /// Overwrite the edited task's name and text with the draft values and
    /// clear the editing state. Only `add` validates; edits are trusted.
    ///
    /// No-op when no edit is in progress. If the edited task was deleted
    /// in the meantime the drafts are discarded without touching anything.
    pub fn commit_edit(&mut self) {
        let Some(draft) = self.draft.take() else {
            return;
        };

        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == draft.id) {
            task.name = draft.name;
            task.text = draft.text;
            self.committed();
        }
    }

    /// Drop the editing state without mutating any task.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Replace the search term. Deliberately does NOT reset the current
    /// page, so a narrowing search can leave the page past the end of the
    /// filtered view and `query` returns an empty slice.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Set the 1-indexed current page. No bounds check; callers derive the
    /// valid range from `query`'s total count.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Derive the current page of tasks matching the search term, plus the
    /// total filtered count. Pure, no side effects.
    pub fn query(&self, page_size: usize) -> QueryResult<'_> {
        let filtered = filter::filter_tasks(&self.tasks, &self.search_term);
        let total_filtered = filtered.len();
        let tasks = filter::paginate(&filtered, self.current_page, page_size);

        QueryResult {
            tasks,
            total_filtered,
        }
    }

    /// The full ordered collection.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Id of the task being edited, if any.
    pub fn editing_id(&self) -> Option<u32> {
        self.draft.as_ref().map(|d| d.id)
    }

    pub fn draft_name(&self) -> Option<&str> {
        self.draft.as_ref().map(|d| d.name.as_str())
    }

    pub fn draft_text(&self) -> Option<&str> {
        self.draft.as_ref().map(|d| d.text.as_str())
    }

    /// Message from the last failed validation, until the next success.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    // ========================================================================
    // Change notification
    // ========================================================================

    /// Register a listener invoked after every committed mutation, so a
    /// rendering layer knows when to re-derive its view.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Persist the snapshot and notify listeners after an in-memory change.
    fn committed(&mut self) {
        self.persist();
        for listener in &self.listeners {
            listener();
        }
    }

    /// Fire-and-forget snapshot write; storage failures are logged, not
    /// surfaced.
    fn persist(&mut self) {
        let snapshot = match serde_json::to_string(&self.tasks) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = ?e, "Failed to serialize task snapshot");
                return;
            }
        };

        if let Err(e) = self.storage.set(TASKS_KEY, &snapshot) {
            warn!(error = ?e, "Failed to persist task snapshot");
        }
    }

    fn reject(&mut self, err: ValidationError) -> ValidationError {
        self.error_message = Some(err.to_string());
        err
    }
}
