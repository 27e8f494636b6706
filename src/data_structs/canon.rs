use std::fmt::Display;
use std::str::FromStr;

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::CorpusError;

#[derive(
    Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Testament {
    /// Old Testament, 39 books.
    Old,
    /// New Testament, 27 books.
    New,
}

impl Display for Testament {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Testament::Old => write!(f, "OT"),
            Testament::New => write!(f, "NT"),
        }
    }
}

impl FromStr for Testament {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OT" | "OLD" => Ok(Testament::Old),
            "NT" | "NEW" => Ok(Testament::New),
            other => {
                Err(CorpusError::SchemaViolation(format!(
                    "unknown testament '{other}'"
                )))
            },
        }
    }
}

/// An entry of the canonical book table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalBook {
    pub code:      &'static str,
    pub name:      &'static str,
    pub testament: Testament,
}

const fn ot(
    code: &'static str,
    name: &'static str,
) -> CanonicalBook {
    CanonicalBook {
        code,
        name,
        testament: Testament::Old,
    }
}

const fn nt(
    code: &'static str,
    name: &'static str,
) -> CanonicalBook {
    CanonicalBook {
        code,
        name,
        testament: Testament::New,
    }
}

pub const N_BOOKS: usize = 66;
pub const N_OLD_TESTAMENT: usize = 39;
pub const N_NEW_TESTAMENT: usize = 27;

/// The 66 canonical book codes in canonical order.
pub static CANONICAL_BOOKS: [CanonicalBook; N_BOOKS] = [
    ot("b.GEN", "Genesis"),
    ot("b.EXO", "Exodus"),
    ot("b.LEV", "Leviticus"),
    ot("b.NUM", "Numbers"),
    ot("b.DEU", "Deuteronomy"),
    ot("b.JOS", "Joshua"),
    ot("b.JDG", "Judges"),
    ot("b.RUT", "Ruth"),
    ot("b.1SA", "1 Samuel"),
    ot("b.2SA", "2 Samuel"),
    ot("b.1KI", "1 Kings"),
    ot("b.2KI", "2 Kings"),
    ot("b.1CH", "1 Chronicles"),
    ot("b.2CH", "2 Chronicles"),
    ot("b.EZR", "Ezra"),
    ot("b.NEH", "Nehemiah"),
    ot("b.EST", "Esther"),
    ot("b.JOB", "Job"),
    ot("b.PSA", "Psalms"),
    ot("b.PRO", "Proverbs"),
    ot("b.ECC", "Ecclesiastes"),
    ot("b.SON", "Song of Solomon"),
    ot("b.ISA", "Isaiah"),
    ot("b.JER", "Jeremiah"),
    ot("b.LAM", "Lamentations"),
    ot("b.EZE", "Ezekiel"),
    ot("b.DAN", "Daniel"),
    ot("b.HOS", "Hosea"),
    ot("b.JOE", "Joel"),
    ot("b.AMO", "Amos"),
    ot("b.OBA", "Obadiah"),
    ot("b.JON", "Jonah"),
    ot("b.MIC", "Micah"),
    ot("b.NAH", "Nahum"),
    ot("b.HAB", "Habakkuk"),
    ot("b.ZEP", "Zephaniah"),
    ot("b.HAG", "Haggai"),
    ot("b.ZEC", "Zechariah"),
    ot("b.MAL", "Malachi"),
    nt("b.MAT", "Matthew"),
    nt("b.MAR", "Mark"),
    nt("b.LUK", "Luke"),
    nt("b.JOH", "John"),
    nt("b.ACT", "Acts (of the Apostles)"),
    nt("b.ROM", "Romans"),
    nt("b.1CO", "1 Corinthians"),
    nt("b.2CO", "2 Corinthians"),
    nt("b.GAL", "Galatians"),
    nt("b.EPH", "Ephesians"),
    nt("b.PHI", "Philippians"),
    nt("b.COL", "Colossians"),
    nt("b.1TH", "1 Thessalonians"),
    nt("b.2TH", "2 Thessalonians"),
    nt("b.1TI", "1 Timothy"),
    nt("b.2TI", "2 Timothy"),
    nt("b.TIT", "Titus"),
    nt("b.PHM", "Philemon"),
    nt("b.HEB", "Hebrews"),
    nt("b.JAM", "James"),
    nt("b.1PE", "1 Peter"),
    nt("b.2PE", "2 Peter"),
    nt("b.1JO", "1 John"),
    nt("b.2JO", "2 John"),
    nt("b.3JO", "3 John"),
    nt("b.JUD", "Jude"),
    nt("b.REV", "Revelation"),
];

static CODE_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    CANONICAL_BOOKS
        .iter()
        .enumerate()
        .map(|(idx, book)| (book.code, idx))
        .collect()
});

/// Returns the slot index of a canonical book code.
pub fn book_index(code: &str) -> Option<usize> {
    CODE_INDEX.get(code).copied()
}

/// Looks up a canonical book by its code.
pub fn canonical_book(code: &str) -> Option<&'static CanonicalBook> {
    book_index(code).map(|idx| &CANONICAL_BOOKS[idx])
}

/// Codes of one testament, in canonical order.
pub fn testament_codes(testament: Testament) -> impl Iterator<Item = &'static str> {
    CANONICAL_BOOKS
        .iter()
        .filter(move |book| book.testament == testament)
        .map(|book| book.code)
}
