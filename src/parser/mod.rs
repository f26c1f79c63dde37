//! Text parsing for SURF and DNM files
//!
//! Both formats are line oriented: the first whitespace-separated token of a
//! line is its keyword, the rest are arguments. Keywords are case-sensitive.
//! Every error carries the 1-based line number and the raw line.
//!
//! - [`parse_surf`] reads a bare SURF file into a [`Surface`]
//! - [`parse_dnm`] reads a DYNAMODEL file into a [`DnmDocument`]
//! - [`SurfParser`] is the line-at-a-time surface state machine both use

mod dnm;
mod surf;

pub(crate) use dnm::DnmBlockReader;
pub use dnm::parse_srf_block;
pub use surf::SurfParser;

use log::debug;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::{DnmDocument, Surface};
use crate::streaming::DnmRecord;
use crate::validator::validate_document;

/// Parse a bare SURF file
///
/// `name` becomes the surface name (usually the file name).
///
/// ```
/// use surfdnm::parser::parse_surf;
///
/// let text = "SURF\nV 0 0 0\nV 1 0 0 R\nV 0 1 0\nF\nC 255 0 0\nV 0 1 2\nE\nE\n";
/// let surface = parse_surf(text, "tri.srf").unwrap();
/// assert_eq!(surface.geometry.vertices.len(), 3);
/// assert!(surface.geometry.vertices[1].is_smooth);
/// assert_eq!(surface.materials.len(), 1);
/// ```
pub fn parse_surf(text: &str, name: &str) -> Result<Surface> {
    parse_surf_reader(text.as_bytes(), name)
}

/// Parse a bare SURF file from a reader
pub fn parse_surf_reader<R: Read>(reader: R, name: &str) -> Result<Surface> {
    let mut lines = LineReader::new(BufReader::new(reader));
    let mut parser = SurfParser::new(name);
    while let Some((number, raw)) = lines.next_line()? {
        parser.feed(&Line::new(number, &raw))?;
    }
    parser.finish(lines.line_number())
}

/// Parse a whole DYNAMODEL file
///
/// PCK blocks become [`DnmDocument::surfaces`], SRF blocks become
/// [`DnmDocument::nodes`]. The node graph is validated once the input ends.
pub fn parse_dnm(text: &str) -> Result<DnmDocument> {
    parse_dnm_reader(text.as_bytes())
}

/// Parse a whole DYNAMODEL file from a reader
pub fn parse_dnm_reader<R: Read>(reader: R) -> Result<DnmDocument> {
    let mut blocks = DnmBlockReader::new(BufReader::new(reader));
    let mut document = DnmDocument::new();
    document.version = blocks.read_header()?;

    while let Some(record) = blocks.next_record()? {
        match record {
            DnmRecord::Surface(surface) => document.surfaces.push(surface),
            DnmRecord::Node(node) => document.nodes.push(node),
        }
    }
    document.footer = blocks.saw_footer();

    validate_document(&document)?;
    debug!(
        "Parsed DNM version {}: {} PCK blocks, {} SRF blocks, footer: {}",
        document.version,
        document.surfaces.len(),
        document.nodes.len(),
        document.footer
    );
    Ok(document)
}

/// Numbered line source over a buffered reader
pub(crate) struct LineReader<R> {
    inner: R,
    number: usize,
    buffer: String,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            number: 0,
            buffer: String::new(),
        }
    }

    /// Next line without its terminator, with its 1-based number
    pub(crate) fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        self.buffer.clear();
        if self.inner.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.number += 1;
        let line = self.buffer.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some((self.number, line)))
    }

    /// Number of the last line returned (0 before the first)
    pub(crate) fn line_number(&self) -> usize {
        self.number
    }
}

/// One tokenized input line
#[derive(Debug, Clone)]
pub struct Line<'a> {
    number: usize,
    raw: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// Tokenize a raw line
    pub fn new(number: usize, raw: &'a str) -> Self {
        Self {
            number,
            raw,
            tokens: raw.split_whitespace().collect(),
        }
    }

    /// 1-based line number
    pub fn number(&self) -> usize {
        self.number
    }

    /// Raw line content
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// First token, empty for blank lines
    pub fn keyword(&self) -> &'a str {
        self.tokens.first().copied().unwrap_or("")
    }

    /// Tokens after the keyword
    pub fn args(&self) -> &[&'a str] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    /// Whether the line holds only whitespace
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Format error pointing at this line
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::format(self.number, self.raw.trim_end(), message)
    }

    /// Require exactly `count` arguments
    pub fn expect_args(&self, count: usize) -> Result<&[&'a str]> {
        let args = self.args();
        if args.len() == count {
            Ok(args)
        } else {
            Err(self.error(format!(
                "{} expects {} argument(s), found {}",
                self.keyword(),
                count,
                args.len()
            )))
        }
    }

    /// Parse argument `index` (0-based, after the keyword)
    pub fn arg<T: FromStr>(&self, index: usize, what: &str) -> Result<T> {
        let token = self
            .args()
            .get(index)
            .ok_or_else(|| self.error(format!("missing {}", what)))?;
        parse_token(token).ok_or_else(|| self.error(format!("invalid {} '{}'", what, token)))
    }

    /// Arguments joined by single spaces, with one pair of surrounding
    /// double quotes removed
    pub fn rest_unquoted(&self) -> String {
        unquote(&self.args().join(" ")).to_string()
    }
}

fn parse_token<T: FromStr>(token: &str) -> Option<T> {
    token.parse().ok()
}

/// Strip one pair of surrounding double quotes
pub(crate) fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}
