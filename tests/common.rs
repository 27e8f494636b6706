use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use indexmap::IndexMap;

/// Builds `cesDoc` documents for tests.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    language:      String,
    iso639:        String,
    with_language: bool,
    /// Book code -> chapter number -> verse texts.
    books:         IndexMap<String, IndexMap<usize, Vec<String>>>,
}

impl DocumentBuilder {
    pub fn new(language: &str) -> Self {
        Self {
            language:      language.to_string(),
            iso639:        language.chars().take(2).collect::<String>().to_lowercase(),
            with_language: true,
            books:         IndexMap::new(),
        }
    }

    pub fn without_language(mut self) -> Self {
        self.with_language = false;
        self
    }

    /// Appends a verse to `chapter` of `book`.
    pub fn verse(
        mut self,
        book: &str,
        chapter: usize,
        text: &str,
    ) -> Self {
        self.books
            .entry(book.to_string())
            .or_default()
            .entry(chapter)
            .or_default()
            .push(text.to_string());
        self
    }

    pub fn build(&self) -> String {
        let word_count = self
            .books
            .values()
            .flat_map(|chapters| chapters.values().flatten())
            .map(|text| text.split_whitespace().count())
            .sum::<usize>();
        let language = if self.with_language {
            format!(
                r#"<langUsage><language iso639="{}" id="{}">{}</language></langUsage>"#,
                self.iso639, self.language, self.language
            )
        }
        else {
            String::new()
        };

        let mut body = String::new();
        for (book, chapters) in self.books.iter() {
            body.push_str(&format!(r#"<div type="book" id="{book}">"#));
            for (chapter, verses) in chapters.iter() {
                body.push_str(&format!(r#"<div type="chapter" id="{book}.{chapter}">"#));
                for (idx, text) in verses.iter().enumerate() {
                    body.push_str(&format!(
                        r#"<seg type="verse" id="{book}.{chapter}.{}">{text}</seg>"#,
                        idx + 1
                    ));
                }
                body.push_str("</div>");
            }
            body.push_str("</div>");
        }

        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<cesDoc version="4.0">
  <cesHeader>
    <fileDesc><extent><wordCount>{word_count}</wordCount></extent></fileDesc>
    <profileDesc>
      {language}
      <wsdUsage><writingSystem id="Latin"/></wsdUsage>
    </profileDesc>
  </cesHeader>
  <text><body>{body}</body></text>
</cesDoc>"#
        )
    }

    /// Writes the document to `<dir>/<name>` and returns its path.
    pub fn write(
        &self,
        dir: &Path,
        name: &str,
    ) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.build()).unwrap();
        path
    }
}

/// The three-verse corpus used throughout the tests: "The cat sat." and
/// "The dog ran." in Genesis, "A cat ran!" in Matthew.
pub fn cat_corpus(language: &str) -> DocumentBuilder {
    DocumentBuilder::new(language)
        .verse("b.GEN", 1, "The cat sat.")
        .verse("b.GEN", 1, "The dog ran.")
        .verse("b.MAT", 1, "A cat ran!")
}

/// A corpus of `n` verses whose token count grows with `n`.
pub fn growing_corpus(
    language: &str,
    n: usize,
) -> DocumentBuilder {
    (1..=n).fold(DocumentBuilder::new(language), |builder, i| {
        let text = (0..i).map(|j| format!("word{j}")).collect::<Vec<_>>().join(" ");
        builder.verse("b.JOH", 1, &text)
    })
}
