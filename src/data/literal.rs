//! Parser for Python-style literal values.
//!
//! The question dataset was written by Python tooling that serialised the
//! `solution` column with `repr()`, so the cells look like
//! `{'text': 'Впишите ответ', 'images': []}` rather than JSON. This module
//! reads that subset (dicts, lists, tuples, quoted strings, numbers,
//! `True`/`False`/`None`) into a [`serde_json::Value`]. The JSON keywords
//! `true`/`false`/`null` are accepted too, so plain JSON text parses as well.

use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character {found:?} at byte {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("invalid escape sequence at byte {offset}")]
    BadEscape { offset: usize },
    #[error("invalid number {text:?} at byte {offset}")]
    BadNumber { text: String, offset: usize },
    #[error("unknown name {name:?} at byte {offset}")]
    UnknownName { name: String, offset: usize },
    #[error("unsupported dictionary key at byte {offset}")]
    BadKey { offset: usize },
    #[error("trailing characters at byte {offset}")]
    Trailing { offset: usize },
    #[error("nesting deeper than {} levels at byte {offset}", MAX_DEPTH)]
    TooDeep { offset: usize },
}

/// Deepest container nesting accepted, same limit as `serde_json`.
pub const MAX_DEPTH: usize = 128;

/// Parse a complete literal. Anything but whitespace after the value is an error.
pub fn parse(src: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        src,
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(LiteralError::Trailing { offset: parser.pos });
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, want: char) -> Result<(), LiteralError> {
        let offset = self.pos;
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(found) => Err(LiteralError::Unexpected { found, offset }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some('{') => self.nested(Self::dict),
            Some('[') => self.nested(|p| p.sequence('[', ']')),
            Some('(') => self.nested(|p| p.sequence('(', ')')),
            Some('\'' | '"') => self.string().map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.name(),
            Some(found) => Err(LiteralError::Unexpected {
                found,
                offset: self.pos,
            }),
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep { offset: self.pos });
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn dict(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }

            let key_offset = self.pos;
            let key = match self.value()? {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => return Err(LiteralError::BadKey { offset: key_offset }),
            };
            self.skip_ws();
            self.expect(':')?;
            let value = self.value()?;
            map.insert(key, value);

            self.skip_ws();
            let offset = self.pos;
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(found) => return Err(LiteralError::Unexpected { found, offset }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    /// Lists and tuples both become JSON arrays. `(x)` without a comma is
    /// just a parenthesised value, as in Python.
    fn sequence(&mut self, open: char, close: char) -> Result<Value, LiteralError> {
        self.expect(open)?;
        let mut items = Vec::new();
        let mut saw_comma = false;
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                break;
            }

            items.push(self.value()?);

            self.skip_ws();
            let offset = self.pos;
            match self.bump() {
                Some(',') => saw_comma = true,
                Some(c) if c == close => break,
                Some(found) => return Err(LiteralError::Unexpected { found, offset }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }

        if open == '(' && items.len() == 1 && !saw_comma {
            return Ok(items.remove(0));
        }
        Ok(Value::Array(items))
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let quote = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        let triple: String = std::iter::repeat(quote).take(3).collect();
        // `quote` was already consumed, so the opening triple is two more quotes.
        let is_triple = self.rest().starts_with(&triple[1..]);
        if is_triple {
            self.pos += 2 * quote.len_utf8();
        }

        let mut out = String::new();
        loop {
            if is_triple && self.rest().starts_with(triple.as_str()) {
                self.pos += triple.len();
                return Ok(out);
            }
            let offset = self.pos;
            match self.bump() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(c) if c == quote && !is_triple => return Ok(out),
                Some('\n') if !is_triple => {
                    return Err(LiteralError::Unexpected {
                        found: '\n',
                        offset,
                    })
                }
                Some('\\') => self.escape(&mut out, offset)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String, offset: usize) -> Result<(), LiteralError> {
        let c = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        match c {
            // line continuation
            '\n' => {}
            '\\' | '\'' | '"' => out.push(c),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            'x' => out.push(self.hex_char(2, offset)?),
            'u' => out.push(self.hex_char(4, offset)?),
            'U' => out.push(self.hex_char(8, offset)?),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).ok_or(LiteralError::BadEscape { offset })?);
            }
            // Python keeps unknown escapes verbatim.
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_char(&mut self, digits: usize, offset: usize) -> Result<char, LiteralError> {
        let hex = self
            .rest()
            .get(..digits)
            .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or(LiteralError::BadEscape { offset })?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| LiteralError::BadEscape { offset })?;
        self.pos += digits;
        char::from_u32(code).ok_or(LiteralError::BadEscape { offset })
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let mut prev = None;
        while let Some(c) = self.peek() {
            let sign_ok = (c == '-' || c == '+')
                && (self.pos == start || matches!(prev, Some('e' | 'E')));
            if c.is_ascii_digit() || c == '.' || c == '_' || c == 'e' || c == 'E' || sign_ok {
                prev = Some(c);
                self.bump();
            } else {
                break;
            }
        }

        let raw = &self.src[start..self.pos];
        let text: String = raw.chars().filter(|&c| c != '_').collect();
        let bad = || LiteralError::BadNumber {
            text: raw.to_string(),
            offset: start,
        };

        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Number(i.into()));
        }
        if let Ok(u) = text.parse::<u64>() {
            return Ok(Value::Number(u.into()));
        }
        let f = text.parse::<f64>().map_err(|_| bad())?;
        Number::from_f64(f).map(Value::Number).ok_or_else(bad)
    }

    fn name(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::Null),
            name => Err(LiteralError::UnknownName {
                name: name.to_string(),
                offset: start,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_python_dict_with_single_quotes() {
        let v = parse("{'text': 'Выберите один правильный ответ', 'images': []}").unwrap();
        assert_eq!(
            v,
            json!({"text": "Выберите один правильный ответ", "images": []})
        );
    }

    #[test]
    fn parses_keywords_and_numbers() {
        let v = parse("{'a': True, 'b': None, 'c': -3, 'd': 1.5e2, 'e': false, 'f': null}").unwrap();
        assert_eq!(
            v,
            json!({"a": true, "b": null, "c": -3, "d": 150.0, "e": false, "f": null})
        );
    }

    #[test]
    fn accepts_plain_json() {
        let v = parse(r#"{"text": "Впишите ответ", "n": [1, 2, 3]}"#).unwrap();
        assert_eq!(v, json!({"text": "Впишите ответ", "n": [1, 2, 3]}));
    }

    #[test]
    fn handles_escapes() {
        let v = parse(r"'it\'s\n\x41Ж\\'").unwrap();
        assert_eq!(v, json!("it's\nAЖ\\"));

        // double quotes inside single-quoted strings need no escaping
        let v = parse(r#"'say "hi"'"#).unwrap();
        assert_eq!(v, json!("say \"hi\""));
    }

    #[test]
    fn handles_triple_quoted_strings() {
        let v = parse("'''line one\nline 'two' '''").unwrap();
        assert_eq!(v, json!("line one\nline 'two' "));
    }

    #[test]
    fn tuples_and_parenthesised_values() {
        assert_eq!(parse("(1, 'a')").unwrap(), json!([1, "a"]));
        assert_eq!(parse("(1,)").unwrap(), json!([1]));
        assert_eq!(parse("(1)").unwrap(), json!(1));
        assert_eq!(parse("[1, 2,]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn numeric_keys_are_stringified() {
        assert_eq!(parse("{1: 'x'}").unwrap(), json!({"1": "x"}));
    }

    #[test]
    fn deep_nesting_is_an_error() {
        assert_eq!(
            parse(&"[".repeat(200_000)),
            Err(LiteralError::TooDeep { offset: MAX_DEPTH })
        );

        let limit = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&limit).is_ok());

        let over = format!("{{'text': {}1{}}}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(matches!(parse(&over), Err(LiteralError::TooDeep { .. })));
    }

    #[test]
    fn reports_errors() {
        assert_eq!(parse(""), Err(LiteralError::UnexpectedEnd));
        assert_eq!(parse("{'text': 'open"), Err(LiteralError::UnexpectedEnd));
        assert_eq!(parse("{'a': 1} x"), Err(LiteralError::Trailing { offset: 9 }));
        assert!(matches!(
            parse("{'a': nan}"),
            Err(LiteralError::UnknownName { .. })
        ));
        assert!(matches!(
            parse("{'a' 1}"),
            Err(LiteralError::Unexpected { found: '1', .. })
        ));
        assert!(matches!(
            parse("{['a']: 1}"),
            Err(LiteralError::BadKey { offset: 1 })
        ));
    }
}
