//! Text VDF (Valve KeyValues) reader and writer.
//!
//! This is the format of `appmanifest_*.acf` and `libraryfolders.vdf`:
//! quoted keys followed by either a quoted value or a `{ ... }` block.

use std::iter::Peekable;
use std::str::Chars;

use crate::SteamError;

/// A value in a KeyValues tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Block(KeyValues),
}

/// An ordered KeyValues block.
///
/// Keys keep insertion order so that serialization is deterministic.
/// Lookups are case-insensitive, matching how the Steam client reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    entries: Vec<(String, Value)>,
}

impl KeyValues {
    /// Creates an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a string entry.
    pub fn with_str(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), Value::Str(value.into())));
        self
    }

    /// Appends a nested block entry.
    pub fn with_block(mut self, key: impl Into<String>, block: KeyValues) -> Self {
        self.entries.push((key.into(), Value::Block(block)));
        self
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Returns the string stored under `key`, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Value::Str(s) => Some(s),
            Value::Block(_) => None,
        }
    }

    /// Returns the block stored under `key`, if it is a block.
    pub fn get_block(&self, key: &str) -> Option<&KeyValues> {
        match self.get(key)? {
            Value::Block(b) => Some(b),
            Value::Str(_) => None,
        }
    }

    /// Iterates entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializes a document with a single root block.
pub fn to_string(root_key: &str, block: &KeyValues) -> String {
    let mut out = String::new();
    write_block(&mut out, root_key, block, 0);
    out
}

fn write_block(out: &mut String, key: &str, block: &KeyValues, depth: usize) {
    indent(out, depth);
    write_quoted(out, key);
    out.push('\n');
    indent(out, depth);
    out.push_str("{\n");

    for (k, v) in &block.entries {
        match v {
            Value::Str(s) => {
                indent(out, depth + 1);
                write_quoted(out, k);
                out.push_str("\t\t");
                write_quoted(out, s);
                out.push('\n');
            }
            Value::Block(b) => write_block(out, k, b, depth + 1),
        }
    }

    indent(out, depth);
    out.push_str("}\n");
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Parses a document and returns its root key and block.
///
/// Content after the root block is ignored.
pub fn parse(input: &str) -> Result<(String, KeyValues), SteamError> {
    let mut lexer = Lexer::new(input);

    let root_key = match lexer.next_token()? {
        Some(Token::Str(key)) => key,
        Some(_) => return Err(SteamError::Vdf("expected root key".into())),
        None => return Err(SteamError::Vdf("empty document".into())),
    };

    match lexer.next_token()? {
        Some(Token::Open) => {}
        _ => {
            return Err(SteamError::Vdf(format!(
                "expected '{{' after root key '{root_key}'"
            )));
        }
    }

    let block = parse_block(&mut lexer)?;
    Ok((root_key, block))
}

fn parse_block(lexer: &mut Lexer<'_>) -> Result<KeyValues, SteamError> {
    let mut block = KeyValues::new();

    loop {
        match lexer.next_token()? {
            Some(Token::Close) => return Ok(block),
            Some(Token::Str(key)) => match lexer.next_token()? {
                Some(Token::Str(value)) => block.entries.push((key, Value::Str(value))),
                Some(Token::Open) => {
                    let nested = parse_block(lexer)?;
                    block.entries.push((key, Value::Block(nested)));
                }
                Some(Token::Close) | None => {
                    return Err(SteamError::Vdf(format!("missing value for key '{key}'")));
                }
            },
            Some(Token::Open) => return Err(SteamError::Vdf("unexpected '{'".into())),
            None => return Err(SteamError::Vdf("unexpected end of input in block".into())),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Str(String),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, SteamError> {
        loop {
            let Some(&c) = self.chars.peek() else {
                return Ok(None);
            };

            match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '/' => {
                    self.chars.next();
                    if self.chars.peek() == Some(&'/') {
                        self.skip_line();
                    } else {
                        let rest = self.read_bare();
                        return Ok(Some(Token::Str(format!("/{rest}"))));
                    }
                }
                // Platform conditionals like [$WIN32] carry no data we use.
                '[' => {
                    for c in self.chars.by_ref() {
                        if c == ']' {
                            break;
                        }
                    }
                }
                '{' => {
                    self.chars.next();
                    return Ok(Some(Token::Open));
                }
                '}' => {
                    self.chars.next();
                    return Ok(Some(Token::Close));
                }
                '"' => {
                    self.chars.next();
                    return self.read_quoted().map(|s| Some(Token::Str(s)));
                }
                _ => return Ok(Some(Token::Str(self.read_bare()))),
            }
        }
    }

    fn skip_line(&mut self) {
        for c in self.chars.by_ref() {
            if c == '\n' {
                break;
            }
        }
    }

    fn read_quoted(&mut self) -> Result<String, SteamError> {
        let mut s = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '"' => return Ok(s),
                '\\' => match self.chars.next() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(other) => s.push(other),
                    None => break,
                },
                c => s.push(c),
            }
        }
        Err(SteamError::Vdf("unterminated string".into()))
    }

    fn read_bare(&mut self) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '"' | '{' | '}') {
                break;
            }
            s.push(c);
            self.chars.next();
        }
        s
    }
}
