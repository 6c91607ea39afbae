//! S-expression reader and writer for KiCad file formats.
//!
//! Atoms keep their exact source text, so a document that is read and written
//! back without edits differs from the original only in whitespace.

use std::fmt;

use thiserror::Error;

/// An S-expression value
#[derive(Debug, Clone, PartialEq)]
pub enum Sexpr {
    /// Unquoted atom (keywords, numbers, `yes`/`no`)
    Symbol(String),
    /// Quoted atom
    String(String),
    /// Parenthesized list
    List(Vec<Sexpr>),
}

impl Sexpr {
    pub fn symbol(s: impl Into<String>) -> Self {
        Sexpr::Symbol(s.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Sexpr::String(s.into())
    }

    /// Build a `(head items...)` list.
    pub fn node(head: &str, items: impl IntoIterator<Item = Sexpr>) -> Self {
        let mut list = vec![Sexpr::symbol(head)];
        list.extend(items);
        Sexpr::List(list)
    }

    /// Numeric atom with at most four decimals and no trailing zeros.
    pub fn number(value: f64) -> Self {
        let mut text = format!("{value:.4}");
        if text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text == "-0" {
            text = "0".to_string();
        }
        Sexpr::Symbol(text)
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Sexpr::Symbol(s) | Sexpr::String(s) => Some(s),
            Sexpr::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Sexpr::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Sexpr>> {
        match self {
            Sexpr::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Sexpr::List(_))
    }

    /// The leading symbol of a list, e.g. `label` for `(label "X" ...)`.
    pub fn head(&self) -> Option<&str> {
        match self.as_list()?.first()? {
            Sexpr::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_node(&self, head: &str) -> bool {
        self.head() == Some(head)
    }

    /// First direct child list whose head is `head`.
    pub fn child(&self, head: &str) -> Option<&Sexpr> {
        self.as_list()?.iter().find(|item| item.is_node(head))
    }

    /// All direct child lists whose head is `head`.
    pub fn children<'a>(&'a self, head: &'a str) -> impl Iterator<Item = &'a Sexpr> + 'a {
        self.as_list()
            .unwrap_or_default()
            .iter()
            .filter(move |item| item.is_node(head))
    }
}

/// Errors produced while reading S-expressions. Offsets are byte positions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("unexpected ')' at byte {offset}")]
    UnexpectedClose { offset: usize },

    #[error("list opened at byte {offset} is never closed")]
    UnclosedList { offset: usize },

    #[error("string starting at byte {offset} is never terminated")]
    UnterminatedString { offset: usize },

    #[error("unsupported escape sequence at byte {offset}")]
    InvalidEscape { offset: usize },

    #[error("unexpected trailing input at byte {offset}")]
    TrailingInput { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedEof { offset }
            | ParseError::UnexpectedClose { offset }
            | ParseError::UnclosedList { offset }
            | ParseError::UnterminatedString { offset }
            | ParseError::InvalidEscape { offset }
            | ParseError::TrailingInput { offset } => *offset,
        }
    }
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Reader { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.bump();
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.src.len()
    }

    fn expr(&mut self) -> Result<Sexpr, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEof { offset: self.pos }),
            Some('(') => self.list(),
            Some(')') => Err(ParseError::UnexpectedClose { offset: self.pos }),
            Some('"') => self.quoted(),
            Some(_) => Ok(self.bare()),
        }
    }

    fn list(&mut self) -> Result<Sexpr, ParseError> {
        let open = self.pos;
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::UnclosedList { offset: open }),
                Some(')') => {
                    self.bump();
                    return Ok(Sexpr::List(items));
                }
                Some(_) => items.push(self.expr()?),
            }
        }
    }

    fn bare(&mut self) -> Sexpr {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            self.bump();
        }
        Sexpr::Symbol(self.src[start..self.pos].to_string())
    }

    fn quoted(&mut self) -> Result<Sexpr, ParseError> {
        let open = self.pos;
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString { offset: open }),
                Some('"') => return Ok(Sexpr::String(text)),
                Some('\\') => {
                    let escape = self.pos - 1;
                    match self.bump() {
                        None => return Err(ParseError::UnterminatedString { offset: open }),
                        Some('n') => text.push('\n'),
                        Some('r') => text.push('\r'),
                        Some('t') => text.push('\t'),
                        Some(ch @ ('"' | '\\')) => text.push(ch),
                        // Only escapes the writer produces are accepted.
                        Some(_) => return Err(ParseError::InvalidEscape { offset: escape }),
                    }
                }
                Some(ch) => text.push(ch),
            }
        }
    }
}

/// Parse exactly one S-expression. Surrounding whitespace is allowed.
pub fn parse(input: &str) -> Result<Sexpr, ParseError> {
    log::trace!("Parsing S-expression from {} bytes of input", input.len());
    let mut reader = Reader::new(input);
    let expr = reader.expr()?;
    if !reader.at_end() {
        return Err(ParseError::TrailingInput { offset: reader.pos });
    }
    Ok(expr)
}

/// Render an S-expression the way KiCad writes its files: lists made only of
/// atoms stay on one line, every nested list starts on its own tab-indented
/// line, and the closing paren of a multi-line list sits on its own line.
pub fn to_kicad_string(sexpr: &Sexpr) -> String {
    let mut out = String::new();
    write_expr(&mut out, sexpr, 0);
    out.push('\n');
    out
}

fn write_expr(out: &mut String, expr: &Sexpr, depth: usize) {
    match expr {
        Sexpr::Symbol(s) => out.push_str(s),
        Sexpr::String(s) => write_quoted(out, s),
        Sexpr::List(items) => {
            out.push('(');
            let inline = items.iter().position(Sexpr::is_list).unwrap_or(items.len());
            for (i, item) in items[..inline].iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_expr(out, item, depth + 1);
            }
            if inline < items.len() {
                for item in &items[inline..] {
                    out.push('\n');
                    indent(out, depth + 1);
                    write_expr(out, item, depth + 1);
                }
                out.push('\n');
                indent(out, depth);
            }
            out.push(')');
        }
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_expr(&mut out, self, 0);
        f.write_str(&out)
    }
}
