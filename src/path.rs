//! Textual navigation paths — parses `a.b[2].c` into segments.
//!
//! Grammar: dot-separated key segments with optional chained `[n]` index
//! segments. A key is bare (terminated by `.` or `[`) or quoted with `'`/`"`
//! and backslash escapes; quoting is recognized at segment start only. A
//! path may open with an index segment (`[0].name`).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::{Error, Result};

/// One step of a navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Map key (or decimal list index when the key parses as one).
    Key(String),
    /// Explicit list index.
    Index(usize),
}

/// A parsed path. Short paths stay on the stack.
pub type Segments = SmallVec<[Segment; 8]>;

/// Parse a textual path into segments.
pub fn parse_path(input: &str) -> Result<Segments> {
    let mut segments = Segments::new();
    let mut chars = input.char_indices().peekable();
    // True at the start and after each '.': a key segment must follow.
    let mut expect_key = true;

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            '.' => {
                if expect_key {
                    return Err(Error::PathSyntax {
                        position: pos,
                        message: "Empty segment".into(),
                    });
                }
                chars.next();
                expect_key = true;
            }

            // Index segment: [digits]
            '[' => {
                if expect_key && !segments.is_empty() {
                    return Err(Error::PathSyntax {
                        position: pos,
                        message: "Expected key after '.'".into(),
                    });
                }
                chars.next(); // consume '['
                let mut num = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() {
                        num.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match chars.next() {
                    Some((_, ']')) => {
                        if num.is_empty() {
                            return Err(Error::PathSyntax {
                                position: pos,
                                message: "Empty index".into(),
                            });
                        }
                        let index = num.parse().map_err(|_| Error::PathSyntax {
                            position: pos,
                            message: "Index out of range".into(),
                        })?;
                        segments.push(Segment::Index(index));
                        expect_key = false;
                    }
                    Some((p, c)) => {
                        return Err(Error::PathSyntax {
                            position: p,
                            message: format!("Expected digit or ']', found '{c}'"),
                        });
                    }
                    None => {
                        return Err(Error::PathSyntax {
                            position: pos,
                            message: "Unterminated index".into(),
                        });
                    }
                }
            }

            // Quoted key
            '\'' | '"' => {
                if !expect_key {
                    return Err(Error::PathSyntax {
                        position: pos,
                        message: "Unexpected quote".into(),
                    });
                }
                let quote = ch;
                chars.next(); // consume opening quote
                let start = pos;
                let mut key = String::new();
                loop {
                    match chars.next() {
                        Some((_, '\\')) => {
                            if let Some((_, escaped)) = chars.next() {
                                match escaped {
                                    'n' => key.push('\n'),
                                    't' => key.push('\t'),
                                    '\\' => key.push('\\'),
                                    c if c == quote => key.push(c),
                                    c => { key.push('\\'); key.push(c); }
                                }
                            }
                        }
                        Some((_, c)) if c == quote => break,
                        Some((_, c)) => key.push(c),
                        None => return Err(Error::PathSyntax {
                            position: start,
                            message: "Unterminated quoted key".into(),
                        }),
                    }
                }
                // A quoted key ends its segment; only a separator may follow.
                if let Some(&(p, c)) = chars.peek() {
                    if c != '.' && c != '[' {
                        return Err(Error::PathSyntax {
                            position: p,
                            message: format!("Expected '.' or '[' after quoted key, found '{c}'"),
                        });
                    }
                }
                segments.push(Segment::Key(key));
                expect_key = false;
            }

            // Bare key: anything up to '.' or '['
            _ => {
                if !expect_key {
                    return Err(Error::PathSyntax {
                        position: pos,
                        message: format!("Unexpected character '{ch}'"),
                    });
                }
                let mut key = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c == '.' || c == '[' {
                        break;
                    }
                    key.push(c);
                    chars.next();
                }
                segments.push(Segment::Key(key));
                expect_key = false;
            }
        }
    }

    // Covers the empty path and a trailing '.'.
    if expect_key {
        return Err(Error::PathSyntax {
            position: input.len(),
            message: "Empty segment".into(),
        });
    }

    trace!(path = input, segments = segments.len(), "parsed navigation path");
    Ok(segments)
}
