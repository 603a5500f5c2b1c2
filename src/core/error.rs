//! Purpose: Error type shared by the scanner, emitter, ABI, and CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Invariants: Error kinds map 1:1 with envelope `kind` labels and exit codes.
//! Invariants: Parse errors carry the byte offset or row index that produced them.
use std::error::Error as StdError;
use std::fmt;

use bstr::ByteSlice;

const MAX_SNIPPET_BYTES: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    UnterminatedQuote,
    QuoteSyntax,
    RowWidthMismatch,
    Allocation,
    Io,
}

impl ErrorKind {
    /// Stable label used by the JSON error envelope.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal",
            ErrorKind::Usage => "usage",
            ErrorKind::UnterminatedQuote => "unterminated-quote",
            ErrorKind::QuoteSyntax => "quote-syntax",
            ErrorKind::RowWidthMismatch => "row-width-mismatch",
            ErrorKind::Allocation => "allocation",
            ErrorKind::Io => "io",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    offset: Option<u64>,
    row: Option<u64>,
    snippet: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            offset: None,
            row: None,
            snippet: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn row(&self) -> Option<u64> {
        self.row
    }

    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Byte offset into the input buffer where the problem was detected.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// 1-based data-row index (the header is not counted).
    pub fn with_row(mut self, row: u64) -> Self {
        self.row = Some(row);
        self
    }

    /// Lossy excerpt of the input around the failure, capped at
    /// `MAX_SNIPPET_BYTES`.
    pub fn with_snippet(mut self, bytes: &[u8]) -> Self {
        let end = bytes.len().min(MAX_SNIPPET_BYTES);
        self.snippet = Some(bytes[..end].as_bstr().to_string());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.label())?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset: {offset})")?;
        }
        if let Some(row) = self.row {
            write!(f, " (row: {row})")?;
        }
        if let Some(snippet) = &self.snippet {
            write!(f, " (near: {snippet:?})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::UnterminatedQuote => 3,
        ErrorKind::QuoteSyntax => 4,
        ErrorKind::RowWidthMismatch => 5,
        ErrorKind::Allocation => 6,
        ErrorKind::Io => 7,
    }
}
