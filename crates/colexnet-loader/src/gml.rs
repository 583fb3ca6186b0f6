//! GML document parser
//!
//! A GML document is a list of `key value` pairs where a value is a number,
//! a string, or a bracketed nested list of pairs.

use crate::error::LoadError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Deepest list nesting accepted before the document is rejected.
pub const MAX_NESTING: usize = 64;

/// A parsed GML value.
#[derive(Debug, Clone, PartialEq)]
pub enum GmlValue {
    Int(i64),
    Real(f64),
    Str(String),
    List(Vec<GmlEntry>),
}

/// One `key value` pair and the line its key appeared on.
#[derive(Debug, Clone, PartialEq)]
pub struct GmlEntry {
    pub key: String,
    pub value: GmlValue,
    pub line: usize,
}

impl GmlValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            GmlValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GmlValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[GmlEntry]> {
        match self {
            GmlValue::List(entries) => Some(entries),
            _ => None,
        }
    }

    /// Render a scalar as text. Numbers are formatted, lists yield `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            GmlValue::Int(v) => Some(v.to_string()),
            GmlValue::Real(v) => Some(v.to_string()),
            GmlValue::Str(s) => Some(s.clone()),
            GmlValue::List(_) => None,
        }
    }
}

/// Find the first value stored under `key`.
pub fn lookup<'a>(entries: &'a [GmlEntry], key: &str) -> Option<&'a GmlValue> {
    entries.iter().find(|e| e.key == key).map(|e| &e.value)
}

/// Parse a whole GML document into its top-level entries.
pub fn parse_gml(source: &str) -> Result<Vec<GmlEntry>, LoadError> {
    let mut parser = Parser {
        lexer: Lexer::new(source),
        lookahead: None,
        depth: 0,
    };
    let entries = parser.parse_entries()?;
    if let Some(token) = parser.next()? {
        return Err(LoadError::Syntax {
            line: token.line,
            message: "unbalanced ']'".to_string(),
        });
    }
    Ok(entries)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token>,
    depth: usize,
}

impl Parser<'_> {
    fn next(&mut self) -> Result<Option<Token>, LoadError> {
        match self.lookahead.take() {
            Some(token) => Ok(Some(token)),
            None => self.lexer.next_token(),
        }
    }

    fn peek(&mut self) -> Result<Option<&Token>, LoadError> {
        if self.lookahead.is_none() {
            self.lookahead = self.lexer.next_token()?;
        }
        Ok(self.lookahead.as_ref())
    }

    /// Parse pairs until `]` or end of input. The terminator is not consumed.
    fn parse_entries(&mut self) -> Result<Vec<GmlEntry>, LoadError> {
        let mut entries = Vec::new();
        loop {
            match self.peek()? {
                None => return Ok(entries),
                Some(Token { kind: TokenKind::Close, .. }) => return Ok(entries),
                Some(_) => {}
            }
            let Some(token) = self.next()? else {
                return Ok(entries);
            };
            let key = match token.kind {
                TokenKind::Key(key) => key,
                other => {
                    return Err(LoadError::Syntax {
                        line: token.line,
                        message: format!("expected attribute key, found {:?}", other),
                    });
                }
            };
            let value = self.parse_value(&key, token.line)?;
            entries.push(GmlEntry {
                key,
                value,
                line: token.line,
            });
        }
    }

    fn parse_value(&mut self, key: &str, key_line: usize) -> Result<GmlValue, LoadError> {
        let Some(token) = self.next()? else {
            return Err(LoadError::Syntax {
                line: key_line,
                message: format!("missing value for key {:?}", key),
            });
        };

        match token.kind {
            TokenKind::Int(v) => Ok(GmlValue::Int(v)),
            TokenKind::Real(v) => Ok(GmlValue::Real(v)),
            TokenKind::Str(s) => Ok(GmlValue::Str(s)),
            TokenKind::Key(word) if word == "INF" => Ok(GmlValue::Real(f64::INFINITY)),
            TokenKind::Key(word) if word == "NAN" => Ok(GmlValue::Real(f64::NAN)),
            TokenKind::Open => {
                if self.depth == MAX_NESTING {
                    return Err(LoadError::Syntax {
                        line: token.line,
                        message: "lists nested too deeply".to_string(),
                    });
                }
                self.depth += 1;
                let entries = self.parse_entries()?;
                self.depth -= 1;
                match self.next()? {
                    Some(Token { kind: TokenKind::Close, .. }) => Ok(GmlValue::List(entries)),
                    _ => Err(LoadError::Syntax {
                        line: token.line,
                        message: format!("unterminated list for key {:?}", key),
                    }),
                }
            }
            other => Err(LoadError::Syntax {
                line: token.line,
                message: format!("invalid value for key {:?}: {:?}", key, other),
            }),
        }
    }
}
