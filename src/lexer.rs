use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Integer(i64),
    Float(f64),
    Identifier(String),
    String(String),
    True,
    False,
    Null,
    And,
    Or,
    Not,
    For,
    In,
    If,
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    Caret,
    Bang,
    Dot,
    LParen,
    RParen,
    Comma,
    Colon,
    DoubleColon,
    LBracket,
    RBracket,
    Greater,
    Less,
    Ge,
    Le,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    QMark,
    Eof,
}

#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    last_start: usize,
    last_end: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            last_start: 0,
            last_end: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn text(&self, start: usize, end: usize) -> Result<&'a str, Error> {
        std::str::from_utf8(&self.input[start..end]).map_err(|_| Error::new("Invalid UTF-8", Some(start)))
    }

    fn number(&mut self, first: u8) -> Result<Token, Error> {
        let start = self.pos - 1;
        let mut has_dot = first == b'.';
        while let Some(c) = self.peek() {
            match c {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !has_dot => {
                    // `1.5` is a float, `1.abs()` is a method call on an integer
                    match self.input.get(self.pos + 1) {
                        Some(next) if next.is_ascii_digit() => {
                            has_dot = true;
                            self.pos += 1;
                        }
                        Some(next) if next.is_ascii_alphabetic() || *next == b'_' => break,
                        _ => {
                            has_dot = true;
                            self.pos += 1;
                        }
                    }
                }
                _ => break,
            }
        }
        let end = self.pos;
        let s = self.text(start, end)?;
        self.last_start = start;
        self.last_end = end;
        if has_dot {
            let n: f64 = s.parse().map_err(|_| Error::new("Invalid number", Some(start)))?;
            Ok(Token::Float(n))
        } else {
            let n: i64 = s.parse().map_err(|_| Error::new("Integer literal out of range", Some(start)))?;
            Ok(Token::Integer(n))
        }
    }

    fn identifier(&mut self) -> Result<Token, Error> {
        let start = self.pos - 1;
        while let Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') = self.peek() {
            self.pos += 1;
        }
        let end = self.pos;
        let s = self.text(start, end)?.to_string();
        self.last_start = start;
        self.last_end = end;
        Ok(match s.to_uppercase().as_str() {
            "TRUE" => Token::True,
            "FALSE" => Token::False,
            "NULL" | "NONE" => Token::Null,
            "AND" => Token::And,
            "OR" => Token::Or,
            "NOT" => Token::Not,
            "FOR" => Token::For,
            "IN" => Token::In,
            "IF" => Token::If,
            _ => Token::Identifier(s),
        })
    }

    fn string(&mut self, quote: u8) -> Result<Token, Error> {
        let start0 = self.pos - 1;
        // consume until matching quote, support escapes \" \\ \n \t; preserve UTF-8 bytes
        let mut buf: Vec<u8> = Vec::new();
        while let Some(c) = self.bump() {
            if c == quote {
                self.last_start = start0;
                self.last_end = self.pos;
                return Ok(Token::String(String::from_utf8(buf).map_err(|_| {
                    Error::new("Invalid UTF-8 in string", Some(self.pos))
                })?));
            }
            if c == b'\\' {
                match self.bump() {
                    Some(b'\\') => buf.push(b'\\'),
                    Some(b'"') => buf.push(b'"'),
                    Some(b'\'') => buf.push(b'\''),
                    Some(b'n') => buf.push(b'\n'),
                    Some(b't') => buf.push(b'\t'),
                    Some(x) => buf.push(x),
                    None => {
                        return Err(Error::new("Unterminated escape in string", Some(self.pos)))
                    }
                }
            } else {
                buf.push(c);
            }
        }
        Err(Error::new("Unterminated string literal", Some(start0)))
    }

    /// Consumes `second` if it is next, picking between a one and two byte token.
    fn pair(&mut self, second: u8, double: Token, single: Token) -> Token {
        if self.peek() == Some(second) {
            self.bump();
            double
        } else {
            single
        }
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_ws();
        let start = self.pos;
        let ch = match self.bump() {
            Some(c) => c,
            None => {
                self.last_start = start;
                self.last_end = start;
                return Ok(Token::Eof);
            }
        };

        let tok = match ch {
            b'0'..=b'9' => return self.number(ch),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => return self.identifier(),
            b'"' | b'\'' => return self.string(ch),
            b'.' if matches!(self.peek(), Some(b'0'..=b'9')) => return self.number(ch),
            b'.' => Token::Dot,
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => self.pair(b'*', Token::DoubleStar, Token::Star),
            b'/' => self.pair(b'/', Token::DoubleSlash, Token::Slash),
            b'%' => Token::Percent,
            b'^' => Token::Caret,
            b'!' => self.pair(b'=', Token::NotEq, Token::Bang),
            b'?' => Token::QMark,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'[' => Token::LBracket,
            b']' => Token::RBracket,
            b',' => Token::Comma,
            b':' => self.pair(b':', Token::DoubleColon, Token::Colon),
            b'>' => self.pair(b'=', Token::Ge, Token::Greater),
            b'<' => self.pair(b'=', Token::Le, Token::Less),
            // Both '=' and '==' compare for equality
            b'=' => self.pair(b'=', Token::EqEq, Token::EqEq),
            b'&' if self.peek() == Some(b'&') => {
                self.bump();
                Token::AndAnd
            }
            b'|' if self.peek() == Some(b'|') => {
                self.bump();
                Token::OrOr
            }
            b'#' => {
                return Err(Error::new(
                    "Unexpected placeholder '#' (not bound in this mode)",
                    Some(start),
                ))
            }
            other => {
                return Err(Error::new(
                    format!("Unexpected character '{}'", other as char),
                    Some(start),
                ))
            }
        };
        self.last_start = start;
        self.last_end = self.pos;
        Ok(tok)
    }

    pub fn last_start(&self) -> usize {
        self.last_start
    }
    pub fn last_end(&self) -> usize {
        self.last_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            if tok == Token::Eof {
                break;
            }
            out.push(tok);
        }
        out
    }

    #[test]
    fn numbers_and_operators() {
        assert_eq!(
            tokens("_arg0 ** 2 // 3.5"),
            vec![
                Token::Identifier("_arg0".into()),
                Token::DoubleStar,
                Token::Integer(2),
                Token::DoubleSlash,
                Token::Float(3.5),
            ]
        );
    }

    #[test]
    fn integer_followed_by_method() {
        assert_eq!(
            tokens("1.abs()"),
            vec![Token::Integer(1), Token::Dot, Token::Identifier("abs".into()), Token::LParen, Token::RParen]
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(tokens("x for y IN z"), vec![
            Token::Identifier("x".into()),
            Token::For,
            Token::Identifier("y".into()),
            Token::In,
            Token::Identifier("z".into()),
        ]);
        assert_eq!(tokens("True None and"), vec![Token::True, Token::Null, Token::And]);
    }

    #[test]
    fn leftover_placeholder_is_reported_with_position() {
        let mut lexer = Lexer::new("1 + #3");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.position, Some(4));
    }
}
