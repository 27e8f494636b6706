use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::Path;

use log::{
    debug,
    trace,
};
use quick_xml::events::{
    BytesStart,
    Event,
};
use quick_xml::Reader;

use crate::data_structs::typedef::CountType;
use crate::data_structs::{
    Bible,
    Book,
    BookCollection,
    Chapter,
    CorpusMetadata,
    Verse,
};
use crate::error::{
    CorpusError,
    CorpusResult,
};

/// Header text fields collected while their element is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderField {
    Language,
    WordCount,
    ByteCount,
}

/// One open element of the document.
#[derive(Debug)]
enum Frame {
    /// Element outside the body, descended into.
    Transparent,
    /// The `text` element. Its element children are body containers.
    Text,
    Body,
    Book {
        id:       String,
        chapters: Vec<Chapter>,
    },
    Chapter {
        id:     String,
        verses: Vec<Verse>,
    },
    Verse {
        id:   String,
        text: String,
        /// Cleared by the first child element; later text is tail text.
        open: bool,
    },
    Header(HeaderField),
    /// Unrecognized node; its whole subtree is ignored.
    Skip,
}

#[derive(Debug, Default)]
struct HeaderBuilder {
    language:   Option<String>,
    iso639:     Option<String>,
    lang_id:    Option<String>,
    script:     Option<String>,
    word_count: Option<String>,
    byte_count: Option<String>,
}

impl HeaderBuilder {
    fn field_mut(
        &mut self,
        field: HeaderField,
    ) -> &mut String {
        let slot = match field {
            HeaderField::Language => &mut self.language,
            HeaderField::WordCount => &mut self.word_count,
            HeaderField::ByteCount => &mut self.byte_count,
        };
        slot.get_or_insert_with(String::new)
    }

    fn finish(
        self,
        source: &str,
    ) -> CorpusResult<CorpusMetadata> {
        let missing = |section: &str| {
            CorpusError::parse(source, format!("missing required section: {section}"))
        };

        let language = self.language.ok_or_else(|| missing("language"))?;
        let iso639 = self
            .iso639
            .ok_or_else(|| missing("language/@iso639"))?;
        let lang_id = self.lang_id.ok_or_else(|| missing("language/@id"))?;
        let script = self.script.ok_or_else(|| missing("writingSystem"))?;
        let word_count = self
            .word_count
            .ok_or_else(|| missing("extent/wordCount"))?;

        let reported_word_count = parse_count(source, "wordCount", &word_count)?;
        let reported_byte_count = match self.byte_count {
            Some(value) => Some(parse_count(source, "byteCount", &value)?),
            None => None,
        };

        Ok(CorpusMetadata {
            language: language.trim().to_string(),
            iso639: iso639.trim().to_string(),
            lang_id: lang_id.trim().to_string(),
            script: script.trim().to_string(),
            source: source.to_string(),
            reported_word_count,
            reported_byte_count,
        })
    }
}

fn parse_count(
    source: &str,
    section: &str,
    value: &str,
) -> CorpusResult<CountType> {
    value.trim().parse::<CountType>().map_err(|e| {
        CorpusError::parse(source, format!("invalid {section} '{}': {e}", value.trim()))
    })
}

fn malformed<E: std::fmt::Display>(
    source: &str,
    err: E,
) -> CorpusError {
    CorpusError::parse(source, format!("malformed XML: {err}"))
}

fn attribute(
    source: &str,
    element: &BytesStart,
    name: &str,
) -> CorpusResult<Option<String>> {
    match element
        .try_get_attribute(name)
        .map_err(|e| malformed(source, e))?
    {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|e| malformed(source, e))?;
            Ok(Some(value.into_owned()))
        },
        None => Ok(None),
    }
}

/// Returns the `id` of `element` if its `type` attribute equals `expected`.
fn typed_id(
    source: &str,
    element: &BytesStart,
    expected: &str,
) -> CorpusResult<Option<String>> {
    if attribute(source, element, "type")?.as_deref() != Some(expected) {
        return Ok(None);
    }
    attribute(source, element, "id")?
        .map(Some)
        .ok_or_else(|| CorpusError::parse(source, format!("{expected} element without id")))
}

/// Reader for CES-style `cesDoc` documents.
///
/// Only `book` children of the body, `chapter` children of books and `verse`
/// children of chapters are descended into; every other node of the body is
/// skipped together with its subtree. The text of a verse is the text that
/// precedes its first child element.
pub struct CesReader<R: BufRead> {
    reader: Reader<R>,
    source: String,
    stack:  Vec<Frame>,
    header: HeaderBuilder,
    books:  BookCollection,
}

impl<R: BufRead> CesReader<R> {
    /// Creates a reader. `source` names the document in errors and in the
    /// resulting metadata.
    pub fn new<S: Into<String>>(
        handle: R,
        source: S,
    ) -> Self {
        let mut reader = Reader::from_reader(handle);
        let config = reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;
        Self {
            reader,
            source: source.into(),
            stack: Vec::new(),
            header: HeaderBuilder::default(),
            books: BookCollection::new(),
        }
    }

    /// Consumes the whole document.
    pub fn read(mut self) -> CorpusResult<Bible> {
        let mut buf = Vec::new();
        loop {
            let event = self
                .reader
                .read_event_into(&mut buf)
                .map_err(|e| malformed(&self.source, e))?;
            match event {
                Event::Start(element) => self.open(&element)?,
                Event::End(_) => self.close()?,
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| malformed(&self.source, e))?;
                    self.append_text(&text);
                },
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data).into_owned();
                    self.append_text(&text);
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if !self.stack.is_empty() {
            return Err(CorpusError::parse(
                &self.source,
                format!("document ended with {} unclosed elements", self.stack.len()),
            ));
        }

        let metadata = self.header.finish(&self.source)?;
        debug!(
            "Read {} ({} books, reported {} words) from {}",
            metadata.language,
            self.books.len(),
            metadata.reported_word_count,
            self.source
        );
        Ok(Bible::new(metadata, self.books))
    }

    fn open(
        &mut self,
        element: &BytesStart,
    ) -> CorpusResult<()> {
        let source = self.source.as_str();
        let frame = match self.stack.last_mut() {
            Some(Frame::Skip) | Some(Frame::Header(_)) => Frame::Skip,
            Some(Frame::Verse { open, .. }) => {
                *open = false;
                Frame::Skip
            },
            Some(Frame::Text) => Frame::Body,
            Some(Frame::Body) => {
                match typed_id(source, element, "book")? {
                    Some(id) => {
                        trace!("Entering book {}", id);
                        Frame::Book {
                            id,
                            chapters: Vec::new(),
                        }
                    },
                    None => Frame::Skip,
                }
            },
            Some(Frame::Book { .. }) => {
                match typed_id(source, element, "chapter")? {
                    Some(id) => {
                        Frame::Chapter {
                            id,
                            verses: Vec::new(),
                        }
                    },
                    None => Frame::Skip,
                }
            },
            Some(Frame::Chapter { .. }) => {
                match typed_id(source, element, "verse")? {
                    Some(id) => {
                        Frame::Verse {
                            id,
                            text: String::new(),
                            open: true,
                        }
                    },
                    None => Frame::Skip,
                }
            },
            Some(Frame::Transparent) | None => {
                match element.local_name().as_ref() {
                    b"text" => Frame::Text,
                    b"language" => {
                        self.header.iso639 = attribute(source, element, "iso639")?;
                        self.header.lang_id = attribute(source, element, "id")?;
                        self.header.language = Some(String::new());
                        Frame::Header(HeaderField::Language)
                    },
                    b"wordCount" => {
                        self.header.word_count = Some(String::new());
                        Frame::Header(HeaderField::WordCount)
                    },
                    b"byteCount" => {
                        self.header.byte_count = Some(String::new());
                        Frame::Header(HeaderField::ByteCount)
                    },
                    b"writingSystem" => {
                        self.header.script = attribute(source, element, "id")?;
                        Frame::Transparent
                    },
                    _ => Frame::Transparent,
                }
            },
        };
        self.stack.push(frame);
        Ok(())
    }

    fn close(&mut self) -> CorpusResult<()> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| CorpusError::parse(&self.source, "unbalanced end tag"))?;

        match frame {
            Frame::Verse { id, text, .. } => {
                if let Some(Frame::Chapter { verses, .. }) = self.stack.last_mut() {
                    verses.push(Verse::new(id, text));
                }
            },
            Frame::Chapter { id, verses } => {
                if let Some(Frame::Book { chapters, .. }) = self.stack.last_mut() {
                    chapters.push(Chapter::new(id, verses));
                }
            },
            Frame::Book { id, chapters } => {
                trace!("Leaving book {} with {} chapters", id, chapters.len());
                self.books.insert(Book::new(id, chapters))?;
            },
            _ => {},
        }
        Ok(())
    }

    fn append_text(
        &mut self,
        text: &str,
    ) {
        match self.stack.last_mut() {
            Some(Frame::Verse {
                text: verse_text,
                open: true,
                ..
            }) => verse_text.push_str(text),
            Some(Frame::Header(field)) => {
                let field = *field;
                self.header.field_mut(field).push_str(text);
            },
            _ => {},
        }
    }
}

impl CesReader<BufReader<File>> {
    /// Opens the document at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CorpusResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CorpusError::io(path, e))?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

/// Parses the document at `path` into a [`Bible`].
pub fn read_bible<P: AsRef<Path>>(path: P) -> CorpusResult<Bible> {
    CesReader::from_path(path)?.read()
}

/// Parses an in-memory document. `source` names it in errors.
pub fn parse_str(
    xml: &str,
    source: &str,
) -> CorpusResult<Bible> {
    CesReader::new(xml.as_bytes(), source).read()
}
