//! # GOQL Matcher
//!
//! Compiles a Geographic Object Query Language expression into a reusable
//! predicate over features.
//!
//! Supported subset:
//!
//! ```text
//! query    := selector (',' selector)*
//! selector := types clause*
//! types    := '*' | ('n' | 'w' | 'a' | 'r')+
//! clause   := '[' key ']' | '[!' key ']'
//!           | '[' key '=' value ('|' value)* ']'
//!           | '[' key '!=' value ('|' value)* ']'
//! ```
//!
//! Keys and values are bare words (`[A-Za-z0-9_:.-]`) or quoted with
//! `"` or `'`. An empty query matches every feature.

use crate::error::{GolError, GolResult};
use crate::store::{Feature, TypeMask};

/// A single tag test
#[derive(Debug, Clone, PartialEq)]
enum Clause {
    Has(String),
    Missing(String),
    Equals(String, Vec<String>),
    NotEquals(String, Vec<String>),
}

impl Clause {
    fn matches(&self, feature: &Feature) -> bool {
        match self {
            Clause::Has(key) => feature.tag(key).is_some(),
            Clause::Missing(key) => feature.tag(key).is_none(),
            Clause::Equals(key, values) => feature
                .tag(key)
                .is_some_and(|v| values.iter().any(|x| x == v)),
            Clause::NotEquals(key, values) => !feature
                .tag(key)
                .is_some_and(|v| values.iter().any(|x| x == v)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Selector {
    types: TypeMask,
    clauses: Vec<Clause>,
}

/// Compiled GOQL predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Matcher {
    selectors: Vec<Selector>,
    types: TypeMask,
}

impl Matcher {
    /// Matcher that accepts every feature
    pub fn all() -> Self {
        Self {
            selectors: vec![Selector {
                types: TypeMask::ALL,
                clauses: Vec::new(),
            }],
            types: TypeMask::ALL,
        }
    }

    pub fn compile(query: &str) -> GolResult<Self> {
        let selectors = Parser::new(query).parse()?;
        let types = selectors
            .iter()
            .fold(TypeMask::NONE, |acc, s| acc | s.types);
        Ok(Self { selectors, types })
    }

    /// Union of the feature categories any selector can match
    pub fn accepted_types(&self) -> TypeMask {
        self.types
    }

    pub fn matches(&self, feature: &Feature) -> bool {
        let category = feature.type_mask();
        self.selectors.iter().any(|s| {
            s.types.accepts(category) && s.clauses.iter().all(|c| c.matches(feature))
        })
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(query: &str) -> Self {
        Self {
            chars: query.chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> GolResult<Vec<Selector>> {
        self.skip_ws();
        if self.peek().is_none() {
            return Ok(Matcher::all().selectors);
        }

        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_selector()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.pos += 1;
                    self.skip_ws();
                }
                Some(_) => return Err(self.error("Expected ',' or end of query")),
            }
        }
        Ok(selectors)
    }

    fn parse_selector(&mut self) -> GolResult<Selector> {
        let types = self.parse_types()?;
        let mut clauses = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() != Some('[') {
                break;
            }
            clauses.push(self.parse_clause()?);
        }
        Ok(Selector { types, clauses })
    }

    fn parse_types(&mut self) -> GolResult<TypeMask> {
        if self.peek() == Some('*') {
            self.pos += 1;
            return Ok(TypeMask::ALL);
        }
        let mut types = TypeMask::NONE;
        while let Some(c) = self.peek() {
            let t = match c {
                'n' => TypeMask::NODES,
                'w' => TypeMask::WAYS,
                'a' => TypeMask::AREAS,
                'r' => TypeMask::RELATIONS,
                _ => break,
            };
            types = types | t;
            self.pos += 1;
        }
        if types.is_empty() {
            return Err(self.error("Expected feature types (n, w, a, r or *)"));
        }
        Ok(types)
    }

    fn parse_clause(&mut self) -> GolResult<Clause> {
        self.expect('[')?;
        self.skip_ws();
        if self.peek() == Some('!') {
            self.pos += 1;
            self.skip_ws();
            let key = self.parse_token("key")?;
            self.skip_ws();
            self.expect(']')?;
            return Ok(Clause::Missing(key));
        }

        let key = self.parse_token("key")?;
        self.skip_ws();
        let clause = match self.peek() {
            Some(']') => Clause::Has(key),
            Some('=') => {
                self.pos += 1;
                Clause::Equals(key, self.parse_values()?)
            }
            Some('!') => {
                self.pos += 1;
                self.expect('=')?;
                Clause::NotEquals(key, self.parse_values()?)
            }
            _ => return Err(self.error("Expected ']', '=' or '!='")),
        };
        self.skip_ws();
        self.expect(']')?;
        Ok(clause)
    }

    fn parse_values(&mut self) -> GolResult<Vec<String>> {
        let mut values = Vec::new();
        loop {
            self.skip_ws();
            values.push(self.parse_token("value")?);
            self.skip_ws();
            if self.peek() != Some('|') {
                return Ok(values);
            }
            self.pos += 1;
        }
    }

    fn parse_token(&mut self, what: &str) -> GolResult<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let start = self.pos;
                self.pos += 1;
                let mut token = String::new();
                loop {
                    match self.peek() {
                        None => {
                            self.pos = start;
                            return Err(self.error("Unterminated string"));
                        }
                        Some(c) if c == quote => {
                            self.pos += 1;
                            return Ok(token);
                        }
                        Some(c) => {
                            token.push(c);
                            self.pos += 1;
                        }
                    }
                }
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
                {
                    self.pos += 1;
                }
                if self.pos == start {
                    return Err(self.error(&format!("Expected {}", what)));
                }
                Ok(self.chars[start..self.pos].iter().collect())
            }
        }
    }

    fn expect(&mut self, c: char) -> GolResult<()> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("Expected '{}'", c)))
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> GolError {
        GolError::invalid_query(self.pos, message)
    }
}
