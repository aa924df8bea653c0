//! # Todo Store
//!
//! Records live in a `Vec` addressed by index; every lookup is a linear scan
//! by id. The record vector and the id generator share one `Mutex`, so
//! concurrent callers are fully serialised (reads included).

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::id::IdGenerator;
use super::seed::{seed_todos, SEED_COUNT};
use super::todo::Todo;

/// State guarded by the store lock
#[derive(Debug)]
struct Inner {
    todos: Vec<Todo>,
    ids: IdGenerator,
}

impl Inner {
    fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|t| t.id == id)
    }

    /// Draw ids until one is not already held by a record
    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.generate();
            if self.position(&id).is_none() {
                return id;
            }
            debug!(id = %id, "generated id collides with an existing todo, retrying");
        }
    }

    fn insert(&mut self, mut todo: Todo) -> Todo {
        todo.id = self.fresh_id();
        self.todos.push(todo.clone());
        todo
    }
}

/// In-memory todo store
#[derive(Debug)]
pub struct TodoStore {
    inner: Mutex<Inner>,
}

impl TodoStore {
    /// Create an empty store with a clock-seeded id generator
    pub fn new() -> Self {
        Self::with_generator(IdGenerator::new())
    }

    /// Create an empty store using the given id generator
    pub fn with_generator(ids: IdGenerator) -> Self {
        Self {
            inner: Mutex::new(Inner {
                todos: Vec::new(),
                ids,
            }),
        }
    }

    // A panic while holding the lock cannot leave a half-written record
    // (every mutation is a single Vec operation), so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of records held
    pub fn count(&self) -> usize {
        self.lock().todos.len()
    }

    /// Copy of all records in insertion order
    pub fn list(&self) -> Vec<Todo> {
        self.lock().todos.clone()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> StoreResult<Todo> {
        self.lock()
            .todos
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Insert a record, replacing any caller-supplied id with a fresh one.
    ///
    /// Returns the stored record.
    pub fn add(&self, todo: Todo) -> Todo {
        let stored = self.lock().insert(todo);
        debug!(id = %stored.id, "todo added");
        stored
    }

    /// Replace title, message and done of the record whose id matches
    /// `todo.id`, keeping its position.
    pub fn update(&self, todo: Todo) -> StoreResult<()> {
        let mut inner = self.lock();
        let index = inner
            .position(&todo.id)
            .ok_or_else(|| StoreError::NotFound(todo.id.clone()))?;

        let slot = &mut inner.todos[index];
        slot.title = todo.title;
        slot.message = todo.message;
        slot.done = todo.done;

        debug!(id = %todo.id, "todo updated");
        Ok(())
    }

    /// Remove a record, keeping the order of the remaining ones
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.lock();
        let index = inner
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        inner.todos.remove(index);

        debug!(id = %id, "todo deleted");
        Ok(())
    }

    /// Seed an empty store with the fixed example records.
    ///
    /// Fails with `AlreadyPopulated` if any record exists. The whole
    /// operation runs under one lock acquisition.
    pub fn populate(&self) -> StoreResult<()> {
        let mut inner = self.lock();

        let before = inner.todos.len();
        if before > 0 {
            return Err(StoreError::AlreadyPopulated { count: before });
        }

        for todo in seed_todos() {
            inner.insert(todo);
        }

        let expected = before + SEED_COUNT;
        let actual = inner.todos.len();
        if actual != expected {
            return Err(StoreError::PopulationFailed { expected, actual });
        }

        debug!(count = actual, "store populated");
        Ok(())
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}
