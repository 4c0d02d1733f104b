//! Recursive-descent JSON parser
//!
//! Deliberately small: string escapes are kept verbatim, numbers go through
//! Rust's float parser, and nesting is capped. Whitespace between tokens and a
//! leading byte order mark are skipped; anything after the root value is
//! ignored (GLB pads the JSON chunk with spaces).

use super::cursor::Cursor;
use super::value::{JsonValue, Member, Number};

/// Default cap on nested arrays/objects
pub const DEFAULT_NESTING_LIMIT: usize = 100;

/// Highest nesting limit a parser accepts. The productions recurse once per
/// level, so this bounds stack use.
pub const MAX_NESTING_LIMIT: usize = 256;

/// Longest number literal the parser will look at
const NUMBER_STAGING_LEN: usize = 63;

/// Malformed JSON
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at byte {offset}")]
    UnexpectedToken { offset: usize },

    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid number at byte {offset}")]
    InvalidNumber { offset: usize },

    #[error("nesting limit of {limit} exceeded at byte {offset}")]
    NestingLimitExceeded { limit: usize, offset: usize },
}

/// Parse a JSON document with the default nesting limit
pub fn parse(input: &[u8]) -> Result<JsonValue, ParseError> {
    Parser::new(input).parse()
}

/// Configurable parser over one input buffer
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    nesting_limit: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            nesting_limit: DEFAULT_NESTING_LIMIT,
        }
    }

    /// Set the nesting limit, clamped to [`MAX_NESTING_LIMIT`]
    pub fn with_nesting_limit(mut self, limit: usize) -> Self {
        self.nesting_limit = limit.min(MAX_NESTING_LIMIT);
        self
    }

    /// Parse the root value. Consumes the parser.
    pub fn parse(mut self) -> Result<JsonValue, ParseError> {
        self.cursor.skip_bom();
        self.parse_value()
    }

    /// Parse one value and report how many bytes of input it consumed
    pub fn parse_prefix(mut self) -> Result<(JsonValue, usize), ParseError> {
        self.cursor.skip_bom();
        let value = self.parse_value()?;
        Ok((value, self.cursor.offset()))
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            offset: self.cursor.offset(),
        }
    }

    fn parse_value(&mut self) -> Result<JsonValue, ParseError> {
        self.cursor.skip_whitespace();

        if self.cursor.can_read(4) && self.cursor.starts_with(b"null") {
            self.cursor.advance(4);
            return Ok(JsonValue::Null);
        }
        if self.cursor.can_read(5) && self.cursor.starts_with(b"false") {
            self.cursor.advance(5);
            return Ok(JsonValue::Bool(false));
        }
        if self.cursor.can_read(4) && self.cursor.starts_with(b"true") {
            self.cursor.advance(4);
            return Ok(JsonValue::Bool(true));
        }

        match self.cursor.peek() {
            Some(b'"') => self.parse_string().map(JsonValue::String),
            Some(b'-' | b'0'..=b'9') => self.parse_number().map(JsonValue::Number),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            _ => Err(self.unexpected()),
        }
    }

    /// String production. The cursor must be on the opening quote.
    ///
    /// A backslash escapes the byte after it; both are copied as-is.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.cursor.offset();
        if !self.cursor.eat(b'"') {
            return Err(self.unexpected());
        }

        let rest = self.cursor.rest();
        let mut end = 0;
        loop {
            match rest.get(end) {
                Some(b'"') => break,
                Some(b'\\') => {
                    if end + 1 >= rest.len() {
                        return Err(ParseError::UnterminatedString { offset: start });
                    }
                    end += 2;
                }
                Some(_) => end += 1,
                None => return Err(ParseError::UnterminatedString { offset: start }),
            }
        }

        let text = String::from_utf8_lossy(&rest[..end]).into_owned();
        // payload plus closing quote
        self.cursor.advance(end + 1);
        Ok(text)
    }

    /// Number production: stage up to 63 bytes from `[0-9+-eE.]`, then convert
    /// the longest prefix that is a valid decimal literal.
    fn parse_number(&mut self) -> Result<Number, ParseError> {
        let offset = self.cursor.offset();
        let staged: Vec<u8> = self
            .cursor
            .rest()
            .iter()
            .take(NUMBER_STAGING_LEN)
            .take_while(|&&b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'e' | b'E' | b'.'))
            .copied()
            .collect();

        let len = float_prefix_len(&staged);
        let value = std::str::from_utf8(&staged[..len])
            .ok()
            .filter(|text| !text.is_empty())
            .and_then(|text| text.parse::<f64>().ok())
            .ok_or(ParseError::InvalidNumber { offset })?;

        self.cursor.advance(len);
        Ok(Number::new(value))
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.cursor.depth() >= self.nesting_limit {
            return Err(ParseError::NestingLimitExceeded {
                limit: self.nesting_limit,
                offset: self.cursor.offset(),
            });
        }
        self.cursor.enter();
        Ok(())
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        self.cursor.skip_whitespace();
        if self.cursor.eat(byte) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_array(&mut self) -> Result<JsonValue, ParseError> {
        self.enter()?;
        self.expect(b'[')?;

        let mut items = Vec::new();
        self.cursor.skip_whitespace();
        if !self.cursor.eat(b']') {
            loop {
                items.push(self.parse_value()?);
                self.cursor.skip_whitespace();
                if !self.cursor.eat(b',') {
                    break;
                }
            }
            self.expect(b']')?;
        }

        self.cursor.leave();
        Ok(JsonValue::Array(items))
    }

    fn parse_object(&mut self) -> Result<JsonValue, ParseError> {
        self.enter()?;
        self.expect(b'{')?;

        let mut members = Vec::new();
        self.cursor.skip_whitespace();
        if !self.cursor.eat(b'}') {
            loop {
                self.cursor.skip_whitespace();
                let key = self.parse_string()?;
                self.expect(b':')?;
                let value = self.parse_value()?;
                members.push(Member { key, value });

                self.cursor.skip_whitespace();
                if !self.cursor.eat(b',') {
                    break;
                }
            }
            self.expect(b'}')?;
        }

        self.cursor.leave();
        Ok(JsonValue::Object(members))
    }
}

/// Length of the longest prefix of `bytes` of the form
/// `[+-]? digits? (. digits?)? ([eE] [+-]? digits)?` holding at least one
/// mantissa digit. Returns 0 if there is none.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut at = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        at = 1;
    }
    let int_end = digits_from(at);
    let mut mantissa_digits = int_end - at;
    at = int_end;

    if bytes.get(at) == Some(&b'.') {
        let frac_end = digits_from(at + 1);
        mantissa_digits += frac_end - (at + 1);
        at = frac_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(at), Some(b'e' | b'E')) {
        let mut exp = at + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            at = exp_end;
        }
    }
    at
}
