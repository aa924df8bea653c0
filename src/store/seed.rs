//! Fixed initial data for a fresh store

use super::todo::Todo;

/// Number of records inserted by [`TodoStore::populate`](super::TodoStore::populate)
pub const SEED_COUNT: usize = 4;

/// The records a fresh store is seeded with
pub fn seed_todos() -> [Todo; SEED_COUNT] {
    [
        Todo::new("Water flowers", "They're really dry..."),
        Todo::new("Pay bills", "Better get it done."),
        Todo::new("Buy food", "Out of pasta."),
        Todo::new(
            "Make someone's day better",
            "I'm starting with the man in the mirror.",
        ),
    ]
}
