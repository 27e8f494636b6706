use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::Path;

use log::debug;
use quick_xml::events::{
    BytesDecl,
    BytesEnd,
    BytesStart,
    BytesText,
    Event,
};
use quick_xml::Writer;

use crate::data_structs::Bible;
use crate::error::{
    CorpusError,
    CorpusResult,
};

/// Writer producing CES-style `cesDoc` documents readable by
/// [`super::CesReader`].
pub struct CesWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CesWriter<W> {
    pub fn new(handle: W) -> Self {
        Self {
            writer: Writer::new_with_indent(handle, b' ', 2),
        }
    }

    fn event(
        &mut self,
        event: Event,
    ) -> CorpusResult<()> {
        self.writer
            .write_event(event)
            .map_err(quick_xml::Error::from)?;
        Ok(())
    }

    fn start(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> CorpusResult<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.event(Event::Start(element))
    }

    fn end(
        &mut self,
        name: &str,
    ) -> CorpusResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> CorpusResult<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.event(Event::Empty(element))
    }

    fn text_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> CorpusResult<()> {
        self.start(name, attributes)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    /// Writes the complete document and returns the underlying handle.
    pub fn write(
        mut self,
        bible: &Bible,
    ) -> CorpusResult<W> {
        let meta = bible.metadata();
        self.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.start("cesDoc", &[("version", "4")])?;

        self.start("cesHeader", &[("type", "text")])?;
        self.start("fileDesc", &[])?;
        self.start("extent", &[])?;
        self.text_element("wordCount", &[], &meta.reported_word_count.to_string())?;
        if let Some(bytes) = meta.reported_byte_count {
            self.text_element("byteCount", &[], &bytes.to_string())?;
        }
        self.end("extent")?;
        self.end("fileDesc")?;
        self.start("profileDesc", &[])?;
        self.start("langUsage", &[])?;
        self.text_element(
            "language",
            &[("iso639", meta.iso639.as_str()), ("id", meta.lang_id.as_str())],
            &meta.language,
        )?;
        self.end("langUsage")?;
        self.start("wsdUsage", &[])?;
        self.empty("writingSystem", &[("id", meta.script.as_str())])?;
        self.end("wsdUsage")?;
        self.end("profileDesc")?;
        self.end("cesHeader")?;

        self.start("text", &[])?;
        self.start("body", &[])?;
        for book in bible.books() {
            self.start("div", &[("type", "book"), ("id", book.id())])?;
            for chapter in book.chapters() {
                self.start("div", &[("type", "chapter"), ("id", chapter.id())])?;
                for verse in chapter.verses() {
                    self.text_element(
                        "seg",
                        &[("type", "verse"), ("id", verse.id())],
                        verse.text(),
                    )?;
                }
                self.end("div")?;
            }
            self.end("div")?;
        }
        self.end("body")?;
        self.end("text")?;
        self.end("cesDoc")?;

        Ok(self.writer.into_inner())
    }
}

/// Writes `bible` to `path`, replacing an existing file.
pub fn write_bible<P: AsRef<Path>>(
    bible: &Bible,
    path: P,
) -> CorpusResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CorpusError::io(path, e))?;
    write_file(bible, path, file)
}

/// Writes `bible` to `path`. Fails if the file already exists.
pub fn write_new_bible<P: AsRef<Path>>(
    bible: &Bible,
    path: P,
) -> CorpusResult<()> {
    let path = path.as_ref();
    let file = File::options()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| CorpusError::io(path, e))?;
    write_file(bible, path, file)
}

fn write_file(
    bible: &Bible,
    path: &Path,
    file: File,
) -> CorpusResult<()> {
    let mut handle = CesWriter::new(BufWriter::new(file)).write(bible)?;
    handle.flush().map_err(|e| CorpusError::io(path, e))?;
    debug!("Wrote {} to {}", bible.language(), path.display());
    Ok(())
}

/// Serializes `bible` into a string.
pub fn to_xml_string(bible: &Bible) -> CorpusResult<String> {
    let bytes = CesWriter::new(Vec::new()).write(bible)?;
    String::from_utf8(bytes)
        .map_err(|e| CorpusError::parse(bible.language(), format!("invalid UTF-8 output: {e}")))
}
