use dompet_domain::Books;

use crate::CoreError;

/// Abstraction over persistence backends capable of storing the books.
///
/// Collections are persisted as whole-collection snapshots; there is no
/// row-level access.
pub trait BooksStorage: Send + Sync {
    fn save_books(&self, books: &Books) -> Result<(), CoreError>;
    fn load_books(&self) -> Result<Books, CoreError>;
    /// Removes every persisted collection.
    fn clear_all(&self) -> Result<(), CoreError>;
}

/// Writes the books, swallowing failures.
///
/// The in-memory state stays authoritative for the session when a write
/// fails; no retry is attempted.
pub fn persist_best_effort(storage: &dyn BooksStorage, books: &Books) {
    if let Err(err) = storage.save_books(books) {
        tracing::warn!("books persistence failed, in-memory state kept: {err}");
    }
}
