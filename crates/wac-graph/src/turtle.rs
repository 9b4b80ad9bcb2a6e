//! Turtle parser.
//!
//! Parses the subset of Turtle used by ACL documents, group documents and
//! neutralized N3 patches into a [`Graph`]:
//!
//! - `@prefix` / `@base` and SPARQL-style `PREFIX` / `BASE` directives
//! - IRIs (resolved against the base), prefixed names and `a`
//! - blank nodes (`_:label`, `[ ... ]`) and collections (`( ... )`)
//! - string literals in all four quote styles, with escapes, language tags
//!   and datatypes; integers, decimals, doubles and booleans
//! - `;` and `,` lists and `#` comments
//!
//! Variables (`?x`) and formulae (`{ ... }`) are rejected.

use std::fmt;

use indexmap::IndexMap;
use url::Url;
use wac_core::vocab::{rdf, xsd};

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::iri::{has_scheme, resolve as resolve_reference};
use crate::term::{Literal, Term, Triple};

/// Parses `input` with an optional base IRI.
pub fn parse_turtle(input: &str, base: Option<&str>) -> GraphResult<Graph> {
    let parser = match base {
        Some(base) => TurtleParser::new().with_base(base)?,
        None => TurtleParser::new(),
    };
    parser.parse(input)
}

/// Configurable Turtle parser.
///
/// # Example
///
/// ```
/// use wac_graph::TurtleParser;
///
/// let graph = TurtleParser::new()
///     .with_base("http://example.org/group")?
///     .with_prefix("vcard", "http://www.w3.org/2006/vcard/ns#")
///     .parse("<#0> vcard:hasMember <https://alice.example/card#me> .")?;
/// assert_eq!(graph.len(), 1);
/// # Ok::<(), wac_graph::GraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TurtleParser {
    base: Option<String>,
    prefixes: IndexMap<String, String>,
}

impl TurtleParser {
    /// Creates a parser with no base and no predeclared prefixes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base IRI used to resolve relative IRIs.
    ///
    /// The base must be an absolute IRI. It is kept as written; relative
    /// IRIs resolve against it without any percent-encoding.
    pub fn with_base(mut self, base: &str) -> GraphResult<Self> {
        check_base(base).map_err(|message| GraphError::InvalidBase {
            iri: base.to_string(),
            message,
        })?;
        self.base = Some(base.to_string());
        Ok(self)
    }

    /// Predeclares a prefix, as if the document started with `@prefix`.
    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), namespace.into());
        self
    }

    /// Parses a document.
    pub fn parse(&self, input: &str) -> GraphResult<Graph> {
        let (tokens, end) = Lexer::new(input).tokenize()?;
        Parser {
            tokens,
            pos: 0,
            end,
            base: self.base.clone(),
            prefixes: self.prefixes.clone(),
            graph: Graph::new(),
            fresh_blanks: 0,
        }
        .run()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Iri(String),
    PrefixedName { prefix: String, local: String },
    BlankLabel(String),
    String(String),
    LangTag(String),
    Integer(String),
    Decimal(String),
    Double(String),
    Word(String),
    AtPrefix,
    AtBase,
    DoubleCaret,
    Dot,
    Semicolon,
    Comma,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::PrefixedName { prefix, local } => write!(f, "{prefix}:{local}"),
            Self::BlankLabel(label) => write!(f, "_:{label}"),
            Self::String(_) => f.write_str("string literal"),
            Self::LangTag(tag) => write!(f, "@{tag}"),
            Self::Integer(n) | Self::Decimal(n) | Self::Double(n) => f.write_str(n),
            Self::Word(w) => f.write_str(w),
            Self::AtPrefix => f.write_str("@prefix"),
            Self::AtBase => f.write_str("@base"),
            Self::DoubleCaret => f.write_str("'^^'"),
            Self::Dot => f.write_str("'.'"),
            Self::Semicolon => f.write_str("';'"),
            Self::Comma => f.write_str("','"),
            Self::OpenBracket => f.write_str("'['"),
            Self::CloseBracket => f.write_str("']'"),
            Self::OpenParen => f.write_str("'('"),
            Self::CloseParen => f.write_str("')'"),
        }
    }
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    line: usize,
    column: usize,
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    // Only used to give back trailing dots, which never span lines.
    fn rewind(&mut self, count: usize) {
        self.pos -= count;
        self.column -= count;
    }

    fn error(&self, message: impl Into<String>) -> GraphError {
        GraphError::parse(self.line, self.column, message)
    }

    fn tokenize(mut self) -> GraphResult<(Vec<Spanned>, (usize, usize))> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            let (line, column) = (self.line, self.column);
            let Some(c) = self.peek() else {
                return Ok((tokens, (line, column)));
            };
            let token = match c {
                '<' => self.iri()?,
                '"' | '\'' => Token::String(self.string(c)?),
                '@' => self.at_keyword()?,
                '^' => {
                    self.bump();
                    if self.bump() != Some('^') {
                        return Err(self.error("expected '^^'"));
                    }
                    Token::DoubleCaret
                }
                '_' if self.peek_at(1) == Some(':') => self.blank_label()?,
                '.' if self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) => self.number()?,
                '+' | '-' if self.peek_at(1).is_some_and(|n| n.is_ascii_digit() || n == '.') => {
                    self.number()?
                }
                c if c.is_ascii_digit() => self.number()?,
                '.' => self.punct(Token::Dot),
                ';' => self.punct(Token::Semicolon),
                ',' => self.punct(Token::Comma),
                '[' => self.punct(Token::OpenBracket),
                ']' => self.punct(Token::CloseBracket),
                '(' => self.punct(Token::OpenParen),
                ')' => self.punct(Token::CloseParen),
                c if c.is_alphabetic() || c == '_' || c == ':' => self.name(),
                other => return Err(self.error(format!("unexpected character '{other}'"))),
            };
            tokens.push(Spanned {
                token,
                line,
                column,
            });
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn punct(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn iri(&mut self) -> GraphResult<Token> {
        self.bump();
        let mut iri = String::new();
        loop {
            match self.bump() {
                Some('>') => return Ok(Token::Iri(iri)),
                Some(c) if c.is_whitespace() => {
                    return Err(self.error("whitespace in IRI"));
                }
                Some(c) => iri.push(c),
                None => return Err(self.error("unterminated IRI")),
            }
        }
    }

    fn string(&mut self, quote: char) -> GraphResult<String> {
        let long = self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote);
        let opening = if long { 3 } else { 1 };
        for _ in 0..opening {
            self.bump();
        }

        let mut value = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(self.error("unterminated string"));
            };
            match c {
                '\\' => value.push(self.escape()?),
                c if c == quote && !long => return Ok(value),
                c if c == quote && self.peek() == Some(quote) && self.peek_at(1) == Some(quote) => {
                    self.bump();
                    self.bump();
                    return Ok(value);
                }
                '\n' | '\r' if !long => return Err(self.error("line break in string")),
                c => value.push(c),
            }
        }
    }

    fn escape(&mut self) -> GraphResult<char> {
        let c = match self.bump() {
            Some('t') => '\t',
            Some('b') => '\u{8}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\u{c}',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('u') => self.unicode_escape(4)?,
            Some('U') => self.unicode_escape(8)?,
            Some(other) => return Err(self.error(format!("invalid escape '\\{other}'"))),
            None => return Err(self.error("unterminated escape")),
        };
        Ok(c)
    }

    fn unicode_escape(&mut self, digits: usize) -> GraphResult<char> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.bump() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => return Err(self.error("invalid unicode escape")),
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(format!("invalid code point U+{hex}")))
    }

    fn at_keyword(&mut self) -> GraphResult<Token> {
        self.bump();
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        match word.as_str() {
            "" => Err(self.error("expected keyword or language tag after '@'")),
            "prefix" => Ok(Token::AtPrefix),
            "base" => Ok(Token::AtBase),
            _ => Ok(Token::LangTag(word)),
        }
    }

    fn blank_label(&mut self) -> GraphResult<Token> {
        self.bump();
        self.bump();
        let mut label = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                label.push(c);
                self.bump();
            } else {
                break;
            }
        }
        let trailing = label.len() - label.trim_end_matches('.').len();
        label.truncate(label.len() - trailing);
        self.rewind(trailing);
        if label.is_empty() {
            return Err(self.error("empty blank node label"));
        }
        Ok(Token::BlankLabel(label))
    }

    fn number(&mut self) -> GraphResult<Token> {
        let mut text = String::new();
        if let Some(sign @ ('+' | '-')) = self.peek() {
            text.push(sign);
            self.bump();
        }
        self.digits(&mut text);

        let mut decimal = false;
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            decimal = true;
            text.push('.');
            self.bump();
            self.digits(&mut text);
        }

        if let Some(e @ ('e' | 'E')) = self.peek() {
            text.push(e);
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.bump();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.error("expected exponent digits"));
            }
            self.digits(&mut text);
            return Ok(Token::Double(text));
        }

        Ok(if decimal {
            Token::Decimal(text)
        } else {
            Token::Integer(text)
        })
    }

    fn digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            text.push(c);
            self.bump();
        }
    }

    fn name(&mut self) -> Token {
        let mut text = String::new();
        let mut colon = None;
        while let Some(c) = self.peek() {
            if c == '\\' && colon.is_some() && self.peek_at(1).is_some() {
                self.bump();
                if let Some(escaped) = self.bump() {
                    text.push(escaped);
                }
            } else if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '%') {
                if c == ':' && colon.is_none() {
                    colon = Some(text.len());
                }
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let trailing = text.len() - text.trim_end_matches('.').len();
        text.truncate(text.len() - trailing);
        self.rewind(trailing);

        match colon {
            Some(i) => Token::PrefixedName {
                prefix: text[..i].to_string(),
                local: text[i + 1..].to_string(),
            },
            None => Token::Word(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Prefix,
    Base,
    SparqlPrefix,
    SparqlBase,
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: (usize, usize),
    base: Option<String>,
    prefixes: IndexMap<String, String>,
    graph: Graph,
    fresh_blanks: usize,
}

impl Parser {
    fn run(mut self) -> GraphResult<Graph> {
        while self.peek().is_some() {
            match self.directive_kind() {
                Some(directive) => {
                    self.pos += 1;
                    match directive {
                        Directive::Prefix | Directive::SparqlPrefix => self.prefix_id()?,
                        Directive::Base | Directive::SparqlBase => self.base()?,
                    }
                    if matches!(directive, Directive::Prefix | Directive::Base) {
                        self.expect(&Token::Dot)?;
                    }
                }
                None => {
                    self.triples()?;
                    self.expect(&Token::Dot)?;
                }
            }
        }
        Ok(self.graph)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn next(&mut self) -> GraphResult<Spanned> {
        let spanned = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| GraphError::parse(self.end.0, self.end.1, "unexpected end of input"))?;
        self.pos += 1;
        Ok(spanned)
    }

    fn error_at(spanned: &Spanned, message: impl Into<String>) -> GraphError {
        GraphError::parse(spanned.line, spanned.column, message)
    }

    fn expect(&mut self, expected: &Token) -> GraphResult<()> {
        let spanned = self.next().map_err(|_| {
            GraphError::parse(self.end.0, self.end.1, format!("expected {expected}"))
        })?;
        if spanned.token == *expected {
            Ok(())
        } else {
            Err(Self::error_at(
                &spanned,
                format!("expected {expected}, found {}", spanned.token),
            ))
        }
    }

    fn directive_kind(&self) -> Option<Directive> {
        match self.peek()? {
            Token::AtPrefix => Some(Directive::Prefix),
            Token::AtBase => Some(Directive::Base),
            Token::Word(w) if w.eq_ignore_ascii_case("prefix") => Some(Directive::SparqlPrefix),
            Token::Word(w) if w.eq_ignore_ascii_case("base") => Some(Directive::SparqlBase),
            _ => None,
        }
    }

    fn prefix_id(&mut self) -> GraphResult<()> {
        let name = self.next()?;
        let Token::PrefixedName { prefix, local } = &name.token else {
            return Err(Self::error_at(&name, format!("expected prefix name, found {}", name.token)));
        };
        if !local.is_empty() {
            return Err(Self::error_at(&name, "prefix name must end with ':'"));
        }
        let prefix = prefix.clone();
        let namespace = self.iri_token()?;
        self.prefixes.insert(prefix, namespace);
        Ok(())
    }

    fn base(&mut self) -> GraphResult<()> {
        let spanned = self.next()?;
        let Token::Iri(iri) = &spanned.token else {
            return Err(Self::error_at(&spanned, format!("expected IRI, found {}", spanned.token)));
        };
        let resolved = self.resolve(iri);
        check_base(&resolved)
            .map_err(|e| Self::error_at(&spanned, format!("invalid base IRI: {e}")))?;
        self.base = Some(resolved);
        Ok(())
    }

    fn triples(&mut self) -> GraphResult<()> {
        let spanned = self.next()?;
        let subject = match &spanned.token {
            Token::Iri(iri) => Term::Iri(self.resolve(iri)),
            Token::PrefixedName { prefix, local } => Term::Iri(self.expand(prefix, local, &spanned)?),
            Token::BlankLabel(label) => Term::BlankNode(label.clone()),
            Token::OpenBracket => {
                let node = self.blank_property_list()?;
                if self.peek() == Some(&Token::Dot) {
                    return Ok(());
                }
                node
            }
            Token::OpenParen => self.collection()?,
            other => {
                return Err(Self::error_at(&spanned, format!("expected subject, found {other}")));
            }
        };
        self.predicate_object_list(&subject)
    }

    fn predicate_object_list(&mut self, subject: &Term) -> GraphResult<()> {
        loop {
            let predicate = self.verb()?;
            self.object_list(subject, &predicate)?;
            if self.peek() != Some(&Token::Semicolon) {
                return Ok(());
            }
            while self.peek() == Some(&Token::Semicolon) {
                self.pos += 1;
            }
            if !self.at_verb() {
                return Ok(());
            }
        }
    }

    fn at_verb(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Iri(_) | Token::PrefixedName { .. })
        ) || matches!(self.peek(), Some(Token::Word(w)) if w == "a")
    }

    fn verb(&mut self) -> GraphResult<Term> {
        let spanned = self.next()?;
        match &spanned.token {
            Token::Word(w) if w == "a" => Ok(Term::iri(rdf::TYPE)),
            Token::Iri(iri) => Ok(Term::Iri(self.resolve(iri))),
            Token::PrefixedName { prefix, local } => Ok(Term::Iri(self.expand(prefix, local, &spanned)?)),
            other => Err(Self::error_at(&spanned, format!("expected predicate, found {other}"))),
        }
    }

    fn object_list(&mut self, subject: &Term, predicate: &Term) -> GraphResult<()> {
        loop {
            let object = self.object()?;
            self.graph
                .insert(Triple::new(subject.clone(), predicate.clone(), object));
            if self.peek() != Some(&Token::Comma) {
                return Ok(());
            }
            self.pos += 1;
        }
    }

    fn object(&mut self) -> GraphResult<Term> {
        let spanned = self.next()?;
        let term = match &spanned.token {
            Token::Iri(iri) => Term::Iri(self.resolve(iri)),
            Token::PrefixedName { prefix, local } => Term::Iri(self.expand(prefix, local, &spanned)?),
            Token::BlankLabel(label) => Term::BlankNode(label.clone()),
            Token::OpenBracket => self.blank_property_list()?,
            Token::OpenParen => self.collection()?,
            Token::String(value) => self.literal(value.clone())?,
            Token::Integer(n) => Term::Literal(Literal::typed(n.clone(), xsd::INTEGER)),
            Token::Decimal(n) => Term::Literal(Literal::typed(n.clone(), xsd::DECIMAL)),
            Token::Double(n) => Term::Literal(Literal::typed(n.clone(), xsd::DOUBLE)),
            Token::Word(w) if w == "true" || w == "false" => {
                Term::Literal(Literal::typed(w.clone(), xsd::BOOLEAN))
            }
            other => return Err(Self::error_at(&spanned, format!("expected object, found {other}"))),
        };
        Ok(term)
    }

    fn literal(&mut self, value: String) -> GraphResult<Term> {
        if let Some(Token::LangTag(lang)) = self.peek() {
            let lang = lang.clone();
            self.pos += 1;
            return Ok(Term::Literal(Literal::lang(value, lang)));
        }
        if self.peek() == Some(&Token::DoubleCaret) {
            self.pos += 1;
            let datatype = self.iri_token()?;
            return Ok(Term::Literal(Literal::typed(value, datatype)));
        }
        Ok(Term::Literal(Literal::string(value)))
    }

    // Called after '[' has been consumed.
    fn blank_property_list(&mut self) -> GraphResult<Term> {
        let node = self.fresh_blank();
        if self.peek() == Some(&Token::CloseBracket) {
            self.pos += 1;
            return Ok(node);
        }
        self.predicate_object_list(&node)?;
        self.expect(&Token::CloseBracket)?;
        Ok(node)
    }

    // Called after '(' has been consumed.
    fn collection(&mut self) -> GraphResult<Term> {
        let mut items = Vec::new();
        while self.peek() != Some(&Token::CloseParen) {
            items.push(self.object()?);
        }
        self.pos += 1;

        if items.is_empty() {
            return Ok(Term::iri(rdf::NIL));
        }
        let nodes: Vec<Term> = items.iter().map(|_| self.fresh_blank()).collect();
        for (i, item) in items.into_iter().enumerate() {
            let rest = nodes.get(i + 1).cloned().unwrap_or_else(|| Term::iri(rdf::NIL));
            self.graph
                .insert(Triple::new(nodes[i].clone(), Term::iri(rdf::FIRST), item));
            self.graph
                .insert(Triple::new(nodes[i].clone(), Term::iri(rdf::REST), rest));
        }
        Ok(nodes[0].clone())
    }

    fn iri_token(&mut self) -> GraphResult<String> {
        let spanned = self.next()?;
        match &spanned.token {
            Token::Iri(iri) => Ok(self.resolve(iri)),
            Token::PrefixedName { prefix, local } => self.expand(prefix, local, &spanned),
            other => Err(Self::error_at(&spanned, format!("expected IRI, found {other}"))),
        }
    }

    // Labels start with '.', which user labels cannot.
    fn fresh_blank(&mut self) -> Term {
        self.fresh_blanks += 1;
        Term::BlankNode(format!(".g{}", self.fresh_blanks))
    }

    fn expand(&self, prefix: &str, local: &str, at: &Spanned) -> GraphResult<String> {
        self.prefixes
            .get(prefix)
            .map(|namespace| format!("{namespace}{local}"))
            .ok_or_else(|| Self::error_at(at, format!("undefined prefix '{prefix}:'")))
    }

    fn resolve(&self, iri: &str) -> String {
        match &self.base {
            Some(base) if !has_scheme(iri) => resolve_reference(base, iri),
            _ => iri.to_string(),
        }
    }
}

// The parsed form is discarded; only the raw string is used for resolution.
fn check_base(base: &str) -> Result<(), String> {
    if !has_scheme(base) {
        return Err("base IRI must be absolute".to_string());
    }
    Url::parse(base).map(drop).map_err(|e| e.to_string())
}
