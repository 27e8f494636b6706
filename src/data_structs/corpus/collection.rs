use log::{
    debug,
    trace,
};

use super::Book;
use crate::data_structs::canon::{
    book_index,
    Testament,
    CANONICAL_BOOKS,
    N_BOOKS,
};
use crate::error::{
    CorpusError,
    CorpusResult,
};

/// Fixed-size container with one slot per canonical book code.
///
/// Slots start empty and are filled as books are parsed. A slot holds at
/// most one book and only canonical codes are accepted. Iteration visits
/// occupied slots in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCollection {
    slots: Vec<Option<Book>>,
}

impl Default for BookCollection {
    fn default() -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(N_BOOKS).collect(),
        }
    }
}

impl BookCollection {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_index(code: &str) -> CorpusResult<usize> {
        book_index(code).ok_or_else(|| {
            CorpusError::SchemaViolation(format!("'{code}' is not a canonical book code"))
        })
    }

    /// Places `book` in the slot named by its own code.
    pub fn insert(
        &mut self,
        book: Book,
    ) -> CorpusResult<()> {
        let code = book.id().to_string();
        self.assign(&code, book)
    }

    /// Places `book` in the slot named by `code`.
    ///
    /// Fails if the code is unknown, does not match the book, or the slot is
    /// already occupied.
    pub fn assign(
        &mut self,
        code: &str,
        book: Book,
    ) -> CorpusResult<()> {
        let idx = Self::slot_index(code)?;
        if book.id() != code {
            return Err(CorpusError::SchemaViolation(format!(
                "book '{}' cannot be assigned to slot '{code}'",
                book.id()
            )));
        }
        if self.slots[idx].is_some() {
            return Err(CorpusError::SchemaViolation(format!(
                "slot '{code}' is already occupied"
            )));
        }
        trace!("Assigned {} to slot {}", code, idx);
        self.slots[idx] = Some(book);
        Ok(())
    }

    /// Book stored under `code`, if the slot is occupied.
    pub fn get(
        &self,
        code: &str,
    ) -> CorpusResult<Option<&Book>> {
        let idx = Self::slot_index(code)?;
        Ok(self.slots[idx].as_ref())
    }

    pub fn contains(
        &self,
        code: &str,
    ) -> bool {
        book_index(code).is_some_and(|idx| self.slots[idx].is_some())
    }

    /// Occupied slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.slots.iter().flatten()
    }

    /// Codes of the occupied slots.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.iter().map(Book::id)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn testament(
        &self,
        testament: Testament,
    ) -> impl Iterator<Item = &Book> {
        self.slots
            .iter()
            .zip(CANONICAL_BOOKS.iter())
            .filter(move |(_, canon)| canon.testament == testament)
            .filter_map(|(slot, _)| slot.as_ref())
    }

    /// Number of occupied slots belonging to `testament`.
    pub fn count_testament(
        &self,
        testament: Testament,
    ) -> usize {
        self.testament(testament).count()
    }

    /// New collection holding copies of the selected books.
    ///
    /// Unknown codes fail. Known codes whose slot is empty are skipped.
    pub fn subset<S: AsRef<str>>(
        &self,
        codes: &[S],
    ) -> CorpusResult<BookCollection> {
        let mut subset = BookCollection::new();
        for code in codes.iter().map(AsRef::as_ref) {
            match self.get(code)? {
                Some(book) if !subset.contains(code) => subset.insert(book.clone())?,
                Some(_) => {},
                None => debug!("Subset skips empty slot {}", code),
            }
        }
        Ok(subset)
    }
}

impl<'a> IntoIterator for &'a BookCollection {
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Option<Book>>>;
    type Item = &'a Book;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().flatten()
    }
}
