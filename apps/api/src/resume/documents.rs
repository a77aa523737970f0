//! Document router and plain-text extractors.
//!
//! Routing is by filename suffix only; content sniffing is not attempted. The
//! upload is spooled to a temporary file that is removed once extraction ends.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// `None` means the upload is rejected. Suffix matching is case-sensitive.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if filename.ends_with(".docx") {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => ".pdf",
            DocumentFormat::Docx => ".docx",
        }
    }
}

/// Spools `bytes` to a temp file and extracts its plain text on the blocking pool.
pub async fn extract_text(format: DocumentFormat, bytes: Bytes) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || -> Result<String, DocumentError> {
        let mut spool = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(format.suffix())
            .tempfile()?;
        spool.write_all(&bytes)?;
        spool.flush()?;

        let text = match format {
            DocumentFormat::Pdf => extract_pdf_text(spool.path()),
            DocumentFormat::Docx => extract_docx_text(spool.path()),
        }?;
        debug!("Extracted {} chars from {:?} upload", text.len(), format);
        Ok(text)
    })
    .await?
}

pub fn extract_pdf_text(path: &Path) -> Result<String, DocumentError> {
    pdf_extract::extract_text(path).map_err(|e| DocumentError::Pdf(e.to_string()))
}

/// Flattens a DOCX container: header parts, then the main document, then footer
/// parts. Contact details often live in the page header.
pub fn extract_docx_text(path: &Path) -> Result<String, DocumentError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let headers = part_names(&archive, "word/header");
    let footers = part_names(&archive, "word/footer");

    let mut text = String::new();
    for name in &headers {
        text.push_str(&docx_xml_to_text(&read_part(&mut archive, name)?)?);
    }
    text.push_str(&docx_xml_to_text(&read_part(&mut archive, DOCX_BODY_PART)?)?);
    for name in &footers {
        text.push_str(&docx_xml_to_text(&read_part(&mut archive, name)?)?);
    }
    Ok(text)
}

/// `word/header1.xml`, `word/header2.xml`, ... in numeric order.
fn part_names(archive: &zip::ZipArchive<File>, prefix: &str) -> Vec<String> {
    let mut names: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let index = name.strip_prefix(prefix)?.strip_suffix(".xml")?;
            if !index.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            Some((index.parse().unwrap_or(0), name.to_string()))
        })
        .collect();
    names.sort();
    names.into_iter().map(|(_, name)| name).collect()
}

fn read_part(archive: &mut zip::ZipArchive<File>, name: &str) -> Result<String, DocumentError> {
    let mut part = archive
        .by_name(name)
        .map_err(|e| DocumentError::Docx(format!("{name}: {e}")))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Flattens WordprocessingML: `w:t` runs are concatenated, each paragraph ends
/// with a newline, `w:tab` becomes a tab and `w:br`/`w:cr` a newline.
fn docx_xml_to_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_run_text = true;
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" | b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run_text => {
                let chunk = t.unescape().map_err(|e| DocumentError::Docx(e.to_string()))?;
                text.push_str(&chunk);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Docx(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(text)
}
