//! Purpose: Single-pass CSV scanner producing records of borrowed fields.
//! Exports: `Field`, `Record`, `scan`.
//! Role: Byte-level front end of the codec; no typing or width policy here.
//! Invariants: Fields borrow the input buffer unless quote unescaping rewrote them.
//! Invariants: Quote errors carry the byte offset into the original input.
//! Invariants: Records are separated by `\n` or `\r\n`; a bare `\r` is content.
use std::borrow::Cow;

use crate::core::error::{Error, ErrorKind};

/// One cell value. `quoted` records whether the field was `"`-wrapped in
/// the input, which exempts it from the value-typing pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field<'a> {
    pub text: Cow<'a, [u8]>,
    pub quoted: bool,
}

impl Field<'_> {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    pub fields: Vec<Field<'a>>,
}

enum FieldEnd {
    Comma,
    Newline,
    Eof,
}

/// Scan the whole input into records. Leading and trailing ASCII
/// whitespace of the buffer is ignored, so an optional trailing newline
/// never yields a spurious empty record, and an empty or all-whitespace
/// input yields zero records.
pub fn scan(input: &[u8]) -> Result<Vec<Record<'_>>, Error> {
    let mut pos = 0;
    let mut end = input.len();
    while pos < end && input[pos].is_ascii_whitespace() {
        pos += 1;
    }
    while end > pos && input[end - 1].is_ascii_whitespace() {
        end -= 1;
    }

    let mut records = Vec::new();
    while pos < end {
        let mut fields = Vec::new();
        loop {
            let (field, fin) = scan_field(input, end, &mut pos)?;
            fields.push(field);
            match fin {
                FieldEnd::Comma => continue,
                FieldEnd::Newline | FieldEnd::Eof => break,
            }
        }
        records.push(Record { fields });
    }
    Ok(records)
}

/// Scan one field starting at `*pos`, consuming the trailing delimiter.
/// Leading spaces and tabs are skipped; they are the most likely reason
/// for bytes outside of quotes and are never part of the value.
fn scan_field<'a>(
    input: &'a [u8],
    end: usize,
    pos: &mut usize,
) -> Result<(Field<'a>, FieldEnd), Error> {
    while *pos < end && matches!(input[*pos], b' ' | b'\t') {
        *pos += 1;
    }

    if *pos < end && input[*pos] == b'"' {
        let text = scan_quoted(input, end, pos)?;
        let fin = take_delimiter(input, end, pos)?;
        return Ok((
            Field {
                text,
                quoted: true,
            },
            fin,
        ));
    }

    let start = *pos;
    while *pos < end {
        match input[*pos] {
            b',' | b'\n' => break,
            b'\r' if input.get(*pos + 1) == Some(&b'\n') => break,
            b'"' => {
                return Err(Error::new(ErrorKind::QuoteSyntax)
                    .with_message("double-quote inside an unquoted field")
                    .with_offset(*pos as u64)
                    .with_snippet(&input[start..end]));
            }
            _ => *pos += 1,
        }
    }
    let text = Cow::Borrowed(&input[start..*pos]);
    let fin = take_delimiter(input, end, pos)?;
    Ok((
        Field {
            text,
            quoted: false,
        },
        fin,
    ))
}

/// Scan a `"`-wrapped field body. `*pos` is on the opening quote on
/// entry and past the closing quote on exit. Doubled quotes collapse to
/// one literal quote; the returned text stays borrowed unless that
/// rewrite happened.
fn scan_quoted<'a>(
    input: &'a [u8],
    end: usize,
    pos: &mut usize,
) -> Result<Cow<'a, [u8]>, Error> {
    let open = *pos;
    *pos += 1;
    let start = *pos;
    let mut owned: Option<Vec<u8>> = None;

    loop {
        if *pos >= end {
            return Err(Error::new(ErrorKind::UnterminatedQuote)
                .with_message("quoted field is never closed")
                .with_offset(open as u64)
                .with_snippet(&input[open..end]));
        }
        match input[*pos] {
            b'"' if input.get(*pos + 1) == Some(&b'"') && *pos + 1 < end => {
                owned
                    .get_or_insert_with(|| input[start..*pos].to_vec())
                    .push(b'"');
                *pos += 2;
            }
            b'"' => {
                let text = match owned {
                    Some(bytes) => Cow::Owned(bytes),
                    None => Cow::Borrowed(&input[start..*pos]),
                };
                *pos += 1;
                return Ok(text);
            }
            byte => {
                if let Some(bytes) = &mut owned {
                    bytes.push(byte);
                }
                *pos += 1;
            }
        }
    }
}

/// Consume the byte ending a field. After a closing quote the only legal
/// bytes are a comma, a record separator, or end of input; anything else
/// (including a space) is malformed quoting.
fn take_delimiter(input: &[u8], end: usize, pos: &mut usize) -> Result<FieldEnd, Error> {
    if *pos >= end {
        return Ok(FieldEnd::Eof);
    }
    match input[*pos] {
        b',' => {
            *pos += 1;
            Ok(FieldEnd::Comma)
        }
        b'\n' => {
            *pos += 1;
            Ok(FieldEnd::Newline)
        }
        b'\r' if input.get(*pos + 1) == Some(&b'\n') => {
            *pos += 2;
            Ok(FieldEnd::Newline)
        }
        _ => Err(Error::new(ErrorKind::QuoteSyntax)
            .with_message("unexpected byte after closing quote")
            .with_offset(*pos as u64)
            .with_snippet(&input[*pos..end])),
    }
}
