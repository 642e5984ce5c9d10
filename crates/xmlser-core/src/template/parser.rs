//! Lexer and recursive-descent parser for format strings.
//!
//! The notation has no whitespace between tokens; every character outside a
//! quoted token is either reserved punctuation or part of a bare token.
//! Offsets in [`XmlSerError::Syntax`] count characters, not bytes.

use std::fmt;

use super::ast::{
    Accessor, Attribute, Element, Group, Node, Repetition, Template, ValueExpr, is_bare_char,
};
use crate::error::{XmlSerError, XmlSerResult};

// ---------------------------------------------------------------------------
// Token type
// ---------------------------------------------------------------------------

/// Token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `&`
    Amp,
    /// `=`
    Eq,
    /// `.`
    Dot,
    /// `?`
    Question,
    /// `*`
    Star,
    /// `~`
    Tilde,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// Maximal run of non-reserved characters.
    Bare(String),
    /// `"..."` with escapes already applied.
    Quoted(String),
    /// End of input.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lt => write!(f, "'<'"),
            Self::Gt => write!(f, "'>'"),
            Self::Amp => write!(f, "'&'"),
            Self::Eq => write!(f, "'='"),
            Self::Dot => write!(f, "'.'"),
            Self::Question => write!(f, "'?'"),
            Self::Star => write!(f, "'*'"),
            Self::Tilde => write!(f, "'~'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::Bare(s) => write!(f, "bare token '{s}'"),
            Self::Quoted(s) => write!(f, "quoted token {s:?}"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with the character offset it starts at.
#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    pos: usize,
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// Tokenizer for format strings.
struct Lexer<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    /// Tokenize the entire input. The last token is always `Eof`.
    fn tokenize(&mut self) -> XmlSerResult<Vec<Spanned>> {
        let mut tokens = Vec::new();
        loop {
            let pos = self.pos;
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(Spanned { token, pos });
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn punct(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    fn next_token(&mut self) -> XmlSerResult<Token> {
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };

        let token = match ch {
            '<' => self.punct(Token::Lt),
            '>' => self.punct(Token::Gt),
            '&' => self.punct(Token::Amp),
            '=' => self.punct(Token::Eq),
            '.' => self.punct(Token::Dot),
            '?' => self.punct(Token::Question),
            '*' => self.punct(Token::Star),
            '~' => self.punct(Token::Tilde),
            '{' => self.punct(Token::LBrace),
            '}' => self.punct(Token::RBrace),
            '"' => self.read_quoted()?,
            '\\' => {
                return Err(XmlSerError::syntax(
                    self.chars,
                    self.pos,
                    "token",
                    "'\\' outside a quoted token",
                ));
            }
            c if c.is_whitespace() => {
                return Err(XmlSerError::syntax(
                    self.chars,
                    self.pos,
                    "token",
                    format!("whitespace {c:?} (quote it)"),
                ));
            }
            _ => self.read_bare(),
        };
        Ok(token)
    }

    fn read_bare(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(is_bare_char) {
            self.pos += 1;
        }
        Token::Bare(self.chars[start..self.pos].iter().collect())
    }

    fn read_quoted(&mut self) -> XmlSerResult<Token> {
        let open = self.pos;
        self.pos += 1;
        let mut value = String::new();

        loop {
            let Some(ch) = self.peek() else {
                return Err(XmlSerError::syntax(
                    self.chars,
                    open,
                    "closing '\"'",
                    "end of input",
                ));
            };
            match ch {
                '"' => {
                    self.pos += 1;
                    return Ok(Token::Quoted(value));
                }
                '\\' => {
                    let escape = self.pos;
                    let Some(next) = self.chars.get(escape + 1).copied() else {
                        return Err(XmlSerError::syntax(
                            self.chars,
                            open,
                            "closing '\"'",
                            "end of input",
                        ));
                    };
                    value.push(match next {
                        '"' => '"',
                        '\\' => '\\',
                        't' => '\t',
                        'n' => '\n',
                        other => {
                            return Err(XmlSerError::syntax(
                                self.chars,
                                escape,
                                "escape sequence \\\", \\\\, \\t or \\n",
                                format!("'\\{other}'"),
                            ));
                        }
                    });
                    self.pos += 2;
                }
                other => {
                    value.push(other);
                    self.pos += 1;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Deepest allowed nesting of elements and groups. Parsing and rendering
/// both recurse once per level, so this bounds their stack use.
pub const MAX_DEPTH: usize = 128;

/// Recursive-descent parser over a token stream.
struct Parser<'a> {
    format: &'a [char],
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(format: &'a [char], tokens: Vec<Spanned>) -> Self {
        Self {
            format,
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map_or(&Token::Eof, |s| &s.token)
    }

    /// Character offset of the next token.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |s| s.pos)
    }

    fn advance(&mut self) -> Token {
        let tok = self
            .tokens
            .get(self.pos)
            .map_or(Token::Eof, |s| s.token.clone());
        self.pos += 1;
        tok
    }

    fn error(&self, expected: &str) -> XmlSerError {
        XmlSerError::syntax(self.format, self.offset(), expected, self.peek().to_string())
    }

    fn expect(&mut self, expected: &Token) -> XmlSerResult<()> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&expected.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Node parsing
// ---------------------------------------------------------------------------

impl Parser<'_> {
    /// `document := node* EOF`, returning each node with its start offset.
    fn parse_document(&mut self) -> XmlSerResult<Vec<(usize, Node)>> {
        let mut nodes = Vec::new();
        while !matches!(self.peek(), Token::Eof) {
            let start = self.offset();
            let node = self.parse_node("'<', '{' or '&'")?;
            nodes.push((start, node));
        }
        Ok(nodes)
    }

    fn parse_node(&mut self, expected: &str) -> XmlSerResult<Node> {
        match self.peek() {
            Token::Lt | Token::LBrace => self.parse_nested(),
            Token::Amp => {
                self.advance();
                self.parse_content()
            }
            _ => Err(self.error(expected)),
        }
    }

    /// An element or group, one level deeper than the caller.
    fn parse_nested(&mut self) -> XmlSerResult<Node> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(&format!("at most {MAX_DEPTH} nested elements or groups")));
        }
        self.depth += 1;
        let node = if matches!(self.peek(), Token::Lt) {
            self.parse_element().map(Node::Element)
        } else {
            self.parse_group().map(Node::Group)
        };
        self.depth -= 1;
        node
    }

    /// `element := '<' head attribute* ('&' content | child*) '>'`
    fn parse_element(&mut self) -> XmlSerResult<Element> {
        self.expect(&Token::Lt)?;

        let (name, repetition) = if matches!(self.peek(), Token::Tilde) {
            self.advance();
            let source = self.parse_lookup_expr("lookup expression after '~'")?;
            (ValueExpr::Current, Some(Repetition::DictKey(source)))
        } else {
            let name = self.parse_value_expr("tag name")?;
            let repetition = if matches!(self.peek(), Token::Star) {
                self.advance();
                Some(self.parse_repetition_source()?)
            } else {
                None
            };
            (name, repetition)
        };

        let mut attributes = Vec::new();
        while matches!(self.peek(), Token::Eq) {
            self.advance();
            attributes.push(self.parse_attribute()?);
        }

        let mut children = Vec::new();
        if matches!(self.peek(), Token::Amp) {
            self.advance();
            children.push(self.parse_content()?);
        } else {
            while matches!(self.peek(), Token::Lt | Token::LBrace) {
                children.push(self.parse_node("'<' or '{'")?);
            }
        }

        if !matches!(self.peek(), Token::Gt) {
            let expected = if children.is_empty() {
                "'=', '&', '<', '{' or '>'"
            } else {
                "'>'"
            };
            return Err(self.error(expected));
        }
        self.advance();

        Ok(Element {
            name,
            repetition,
            attributes,
            children,
        })
    }

    /// `attribute := '=' value_expr value_expr?`
    fn parse_attribute(&mut self) -> XmlSerResult<Attribute> {
        let name = self.parse_value_expr("attribute name")?;
        let value = if self.at_value_expr() {
            self.parse_value_expr("attribute value")?
        } else {
            ValueExpr::Current
        };
        Ok(Attribute { name, value })
    }

    /// Content after `&`: a literal becomes text, anything else a lookup.
    fn parse_content(&mut self) -> XmlSerResult<Node> {
        match self.parse_value_expr("text or lookup after '&'")? {
            ValueExpr::Literal(text) => Ok(Node::Text(text)),
            expr => Ok(Node::Lookup(expr)),
        }
    }

    /// `group := '{' lookup node* '}'`
    fn parse_group(&mut self) -> XmlSerResult<Group> {
        self.expect(&Token::LBrace)?;
        let scope = self.parse_lookup_expr("lookup expression after '{'")?;

        let mut children = Vec::new();
        while matches!(self.peek(), Token::Lt | Token::LBrace | Token::Amp) {
            children.push(self.parse_node("'<', '{' or '&'")?);
        }

        if !matches!(self.peek(), Token::RBrace) {
            return Err(self.error("'<', '{', '&' or '}'"));
        }
        self.advance();
        Ok(Group { scope, children })
    }

    /// Source after `*`: a digit run or a lookup.
    fn parse_repetition_source(&mut self) -> XmlSerResult<Repetition> {
        if let Token::Bare(digits) = self.peek()
            && is_digits(digits)
        {
            let Ok(count) = digits.parse::<usize>() else {
                return Err(self.error("repetition count that fits in usize"));
            };
            self.advance();
            return Ok(Repetition::Count(count));
        }
        let source = self.parse_lookup_expr("repetition count or lookup after '*'")?;
        Ok(Repetition::List(source))
    }
}

// ---------------------------------------------------------------------------
// Value expression parsing
// ---------------------------------------------------------------------------

impl Parser<'_> {
    fn at_value_expr(&self) -> bool {
        matches!(
            self.peek(),
            Token::Question | Token::Dot | Token::Bare(_) | Token::Quoted(_)
        )
    }

    /// `value_expr := '?' accessor* | accessor+ | bare | quoted`
    ///
    /// Literals take no accessors; a `.` after a literal starts the next
    /// expression.
    fn parse_value_expr(&mut self, expected: &str) -> XmlSerResult<ValueExpr> {
        match self.peek() {
            Token::Question => {
                self.advance();
                let accessors = self.parse_accessors()?;
                Ok(chain(ValueExpr::Current, accessors))
            }
            Token::Dot => {
                let accessors = self.parse_accessors()?;
                Ok(chain(ValueExpr::Current, accessors))
            }
            Token::Bare(s) | Token::Quoted(s) => {
                let literal = ValueExpr::Literal(s.clone());
                self.advance();
                Ok(literal)
            }
            _ => Err(self.error(expected)),
        }
    }

    /// A value expression that reads the current object.
    fn parse_lookup_expr(&mut self, expected: &str) -> XmlSerResult<ValueExpr> {
        if matches!(self.peek(), Token::Question | Token::Dot) {
            self.parse_value_expr(expected)
        } else {
            Err(self.error(expected))
        }
    }

    fn parse_accessors(&mut self) -> XmlSerResult<Vec<Accessor>> {
        let mut accessors = Vec::new();
        while matches!(self.peek(), Token::Dot) {
            self.advance();
            let accessor = match self.peek() {
                Token::Bare(s) if is_digits(s) => Accessor::Index(s.clone()),
                Token::Bare(s) | Token::Quoted(s) => Accessor::Key(s.clone()),
                _ => return Err(self.error("name or index after '.'")),
            };
            self.advance();
            accessors.push(accessor);
        }
        Ok(accessors)
    }
}

fn chain(base: ValueExpr, accessors: Vec<Accessor>) -> ValueExpr {
    if accessors.is_empty() {
        base
    } else {
        ValueExpr::Chain {
            base: Box::new(base),
            accessors,
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a format string into a [`Template`].
///
/// An empty format string yields an empty template.
///
/// # Errors
///
/// Returns [`XmlSerError::Syntax`] with the character offset of the first
/// token that matches no grammar alternative.
pub fn parse(format: &str) -> XmlSerResult<Template> {
    parse_with(format, false)
}

/// Parse a format string, optionally requiring a single root element.
///
/// With `single_root` set, the template must consist of exactly one element
/// without repetition.
///
/// # Errors
///
/// Returns [`XmlSerError::Syntax`] on malformed notation or, in single-root
/// mode, on a missing, repeated or additional root.
pub fn parse_with(format: &str, single_root: bool) -> XmlSerResult<Template> {
    let chars: Vec<char> = format.chars().collect();
    let tokens = Lexer::new(&chars).tokenize()?;
    let mut parser = Parser::new(&chars, tokens);
    let nodes = parser.parse_document()?;

    if single_root {
        check_single_root(&chars, &nodes)?;
    }

    let template = Template {
        nodes: nodes.into_iter().map(|(_, node)| node).collect(),
    };
    tracing::debug!(
        chars = chars.len(),
        nodes = template.nodes.len(),
        single_root,
        "compiled format string"
    );
    Ok(template)
}

fn check_single_root(format: &[char], nodes: &[(usize, Node)]) -> XmlSerResult<()> {
    match nodes {
        [] => Err(XmlSerError::syntax(format, 0, "root element", "end of input")),
        [(pos, Node::Element(element))] if element.repetition.is_some() => Err(
            XmlSerError::syntax(format, *pos, "single root element", "repeated element"),
        ),
        [(_, Node::Element(_))] => Ok(()),
        [(pos, _)] => Err(XmlSerError::syntax(
            format,
            *pos,
            "root element",
            "text, lookup or group",
        )),
        [_, (pos, _), ..] => Err(XmlSerError::syntax(
            format,
            *pos,
            "end of input after root element",
            "another top-level node",
        )),
    }
}
