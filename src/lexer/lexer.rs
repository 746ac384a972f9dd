use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order, the first pattern matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^[ \t\r\n]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*(?s:.*?)\*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*").unwrap(), handler: unterminated_handler },
        RegexPattern { regex: Regex::new(r"^`[^`]*`").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^`").unwrap(), handler: unterminated_handler },
        RegexPattern {
            regex: Regex::new(r"^(?:[0-9]+\.[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Float),
        },
        RegexPattern { regex: Regex::new(r"^[0-9]+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Integer) },
        RegexPattern { regex: Regex::new(r#"^'(?:[^'\\\n]|\\.)*'"#).unwrap(), handler: char_handler },
        RegexPattern { regex: Regex::new(r#"^"(?:[^"\\\n]|\\.)*""#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r#"^["']"#).unwrap(), handler: unterminated_handler },
        RegexPattern { regex: Regex::new(r"^[_\p{L}][_\p{L}\p{Nd}]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^[{}\[\]()]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Bracket) },
        RegexPattern { regex: Regex::new(r"^[#,?:%+\-/]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Operator) },
        // `&&`, `||`, `==`, `!=`, `<=`, `>=` and friends: one of `&|!=*<>`
        // optionally followed by one of `&|=*`.
        RegexPattern { regex: Regex::new(r"^[&|!=*<>][&|=*]?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Operator) },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            source: String::from(source),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32)
    }

    /// Span covering the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32),
        }
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_n(matched.len());
    Ok(())
}

fn unterminated_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let quote = match matched {
        "/*" => '/',
        _ => matched.chars().next().unwrap_or('"'),
    };

    Err(Error::new(ErrorImpl::UnterminatedLiteral { quote }, lexer.position()))
}

fn quoted_handler(lexer: &mut Lexer, matched: &str, kind: TokenKind) -> Result<(), Error> {
    // Escapes are kept verbatim, only the quotes are dropped.
    let inner = &matched[1..matched.len() - 1];
    let span = lexer.span_of(matched.len());

    lexer.push(MK_TOKEN!(kind, String::from(inner), span));
    lexer.advance_n(matched.len());
    Ok(())
}

fn char_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    quoted_handler(lexer, matched, TokenKind::Char)
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    quoted_handler(lexer, matched, TokenKind::String)
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let span = lexer.span_of(matched.len());

    if let Some((kind, text)) = RESERVED_LOOKUP.get(matched.to_lowercase().as_str()) {
        lexer.push(MK_TOKEN!(*kind, String::from(*text), span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, String::from(matched), span));
    }

    lexer.advance_n(matched.len());
    Ok(())
}

/// Converts expression text into tokens, always terminated by a single EOF
/// token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    'scan: while !lex.at_eof() {
        for pattern in PATTERNS.iter() {
            let matched = match pattern.regex.find(lex.remainder()) {
                Some(found) => found.as_str().to_string(),
                None => continue,
            };

            (pattern.handler)(&mut lex, &matched)?;
            continue 'scan;
        }

        let token = lex.remainder().chars().next().map(String::from).unwrap_or_default();
        return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, lex.position()));
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::new(), span));

    tracing::debug!(tokens = lex.tokens.len(), bytes = source.len(), "tokenized expression");

    Ok(lex.tokens)
}
