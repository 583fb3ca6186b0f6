//! Lexer for GML network descriptions

use crate::error::LoadError;

/// Kind of a GML token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Attribute key, or a bare word such as `INF` in value position.
    Key(String),
    Int(i64),
    Real(f64),
    /// String literal with HTML entities already unescaped.
    Str(String),
    Open,
    Close,
}

/// A token and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Lexer over an ASCII GML source
pub struct Lexer<'a> {
    source: &'a [u8],
    position: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            position: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == b'\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Skip whitespace and `#` line comments.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.advance();
            } else if ch == b'#' {
                while let Some(ch) = self.advance() {
                    if ch == b'\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn syntax_error(&self, message: impl Into<String>) -> LoadError {
        LoadError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    /// Read the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LoadError> {
        self.skip_trivia();
        let line = self.line;
        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        let kind = match ch {
            b'[' => {
                self.advance();
                TokenKind::Open
            }
            b']' => {
                self.advance();
                TokenKind::Close
            }
            b'"' => self.lex_string()?,
            b'0'..=b'9' | b'+' | b'-' | b'.' => self.lex_number()?,
            c if c.is_ascii_alphabetic() || c == b'_' => TokenKind::Key(self.take_while(|c| c.is_ascii_alphanumeric() || c == b'_')),
            other => {
                return Err(self.syntax_error(format!("unexpected character {:?}", char::from(other))));
            }
        };

        Ok(Some(Token { kind, line }))
    }

    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> String {
        let start = self.position;
        while self.peek().is_some_and(&accept) {
            self.advance();
        }
        String::from_utf8_lossy(&self.source[start..self.position]).into_owned()
    }

    fn lex_string(&mut self) -> Result<TokenKind, LoadError> {
        let start_line = self.line;
        self.advance(); // opening quote
        let body = self.take_while(|c| c != b'"');
        if self.advance() != Some(b'"') {
            return Err(LoadError::Syntax {
                line: start_line,
                message: "unterminated string".to_string(),
            });
        }
        Ok(TokenKind::Str(unescape(&body)))
    }

    fn lex_number(&mut self) -> Result<TokenKind, LoadError> {
        let mut text = String::new();
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            self.advance();
            text.push(char::from(sign));
            // Signed special values such as -INF
            if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                let word = self.take_while(|c| c.is_ascii_alphabetic());
                return match word.as_str() {
                    "INF" if sign == b'-' => Ok(TokenKind::Real(f64::NEG_INFINITY)),
                    "INF" => Ok(TokenKind::Real(f64::INFINITY)),
                    "NAN" => Ok(TokenKind::Real(f64::NAN)),
                    _ => Err(self.syntax_error(format!("invalid number {}{}", text, word))),
                };
            }
        }

        text.push_str(&self.take_while(|c| c.is_ascii_digit() || matches!(c, b'.' | b'e' | b'E' | b'+' | b'-')));

        let is_real = text.contains(['.', 'e', 'E']);
        if !is_real {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(TokenKind::Int(value));
            }
        }
        text.parse::<f64>()
            .map(TokenKind::Real)
            .map_err(|_| self.syntax_error(format!("invalid number {}", text)))
    }
}

/// Replace the HTML character references GML writers use inside strings.
/// Unknown or malformed references are kept verbatim.
pub fn unescape(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end))) {
            Some((decoded, end)) => {
                out.push(decoded);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "quot" => Some('"'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}
