//! Query lexer (tokenizer).
//!
//! Converts a query string into a flat stream of tokens for the parser. Operator
//! words are folded into their canonical tokens here, so the parser never looks
//! at raw casing or symbolic aliases.

use std::{fmt, iter::Peekable, str::Chars};

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The AND operator (`AND`, `&&`).
    And,

    /// The OR operator (`OR`, `||`).
    Or,

    /// The NOT operator (`NOT`, `!`).
    Not,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,

    /// Quoted content (the quotes are stripped, content preserved).
    Phrase(String),

    /// A bare word, original case preserved.
    Word(String),
}

impl Token {
    /// Returns the operator token for `word`, if it spells one.
    ///
    /// Keywords are matched case-insensitively; the symbolic aliases `&&`, `||`
    /// and `!` must stand alone.
    pub fn operator(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("AND") || word == "&&" {
            Some(Self::And)
        } else if word.eq_ignore_ascii_case("OR") || word == "||" {
            Some(Self::Or)
        } else if word.eq_ignore_ascii_case("NOT") || word == "!" {
            Some(Self::Not)
        } else {
            None
        }
    }

    /// Returns true for the three boolean operators.
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Not => write!(f, "NOT"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Phrase(text) => write!(f, "\"{text}\""),
            Self::Word(text) => write!(f, "{text}"),
        }
    }
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Tokenizes the entire input.
    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token() {
            tokens.push(token);
        }

        tokens
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let &ch = self.chars.peek()?;

        let token = match ch {
            '(' => {
                self.chars.next();
                Token::LParen
            }
            ')' => {
                self.chars.next();
                Token::RParen
            }
            '"' => self.read_phrase(),
            _ => self.read_word_or_operator(),
        };

        Some(token)
    }

    /// Reads a quoted phrase.
    ///
    /// An unclosed quote swallows the rest of the input as the phrase.
    fn read_phrase(&mut self) -> Token {
        self.chars.next(); // consume opening quote

        let mut content = String::new();

        for ch in self.chars.by_ref() {
            if ch == '"' {
                break;
            }
            content.push(ch);
        }

        Token::Phrase(content)
    }

    /// Reads a bare word and folds it into an operator token if it spells one.
    fn read_word_or_operator(&mut self) -> Token {
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            word.push(ch);
            self.chars.next();
        }

        Token::operator(&word).unwrap_or(Token::Word(word))
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|ch| ch.is_whitespace()).is_some() {}
    }
}

/// Tokenizes a query string.
///
/// Never fails: an empty or all-whitespace query yields no tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input.trim()).tokenize()
}
