//! Query parser.
//!
//! Parses a token stream into a query AST using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query      → expression (TERM)*
//! expression → term (("AND" | "OR") term | "NOT" factor | term)*
//! term       → "NOT"? factor
//! factor     → "(" expression ")"? | PHRASE | WORD
//! ```
//!
//! # Precedence
//!
//! There is none. `AND`, `OR` and binary `NOT` bind at one level and associate
//! to the left, so `a AND b OR c` is `(a AND b) OR c` and `a OR b c` is
//! `(a OR b) AND c`. Existing queries depend on this grouping.
//!
//! Binary `NOT` is sugar: `a NOT b` is `a AND (NOT b)`. Two adjacent terms with
//! no operator between them are joined by an implicit `AND`.
//!
//! # Recovery
//!
//! Parsing never fails. An operator or `)` where a factor is expected becomes
//! the empty literal (which matches everything), a missing `)` is tolerated,
//! and an unmatched `)` ends the query.

use log::{debug, trace};

use crate::{
    ast::QueryExpr,
    lexer::{Token, tokenize},
};

/// Recursive descent parser for query expressions.
///
/// Each parse owns its own cursor; nothing is shared between parses.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in token stream.
    position: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses the token stream into a query expression.
    fn parse(mut self) -> QueryExpr {
        if self.tokens.is_empty() {
            return QueryExpr::any();
        }

        let mut expr = self.parse_expression();

        // Bare words or phrases the expression loop left behind join by implicit AND.
        while matches!(self.peek(), Some(Token::Word(_) | Token::Phrase(_))) {
            let right = self.parse_term();
            expr = QueryExpr::and(expr, right);
        }

        if self.position < self.tokens.len() {
            trace!(
                "ignoring {} trailing token(s) from position {}",
                self.tokens.len() - self.position,
                self.position
            );
        }

        expr
    }

    /// Parses: expression → term (("AND" | "OR") term | "NOT" factor | term)*
    fn parse_expression(&mut self) -> QueryExpr {
        let mut left = self.parse_term();

        while let Some(token) = self.peek() {
            left = match token {
                Token::And => {
                    self.advance();
                    QueryExpr::and(left, self.parse_term())
                }
                Token::Or => {
                    self.advance();
                    QueryExpr::or(left, self.parse_term())
                }
                Token::Not => {
                    self.advance();
                    QueryExpr::and(left, QueryExpr::not(self.parse_factor()))
                }
                Token::LParen | Token::Word(_) | Token::Phrase(_) => {
                    QueryExpr::and(left, self.parse_term())
                }
                Token::RParen => break,
            };
        }

        left
    }

    /// Parses: term → "NOT"? factor
    fn parse_term(&mut self) -> QueryExpr {
        if self.check(&Token::Not) {
            self.advance();
            return QueryExpr::not(self.parse_factor());
        }

        self.parse_factor()
    }

    /// Parses: factor → "(" expression ")"? | PHRASE | WORD
    ///
    /// Operators, `)` and end of input are not consumed and yield the empty
    /// literal.
    fn parse_factor(&mut self) -> QueryExpr {
        let expr = match self.peek() {
            Some(Token::LParen) => return self.parse_group(),
            Some(Token::Phrase(text)) => QueryExpr::phrase(text),
            Some(Token::Word(text)) => QueryExpr::literal(text),
            Some(Token::And | Token::Or | Token::Not | Token::RParen) | None => {
                return QueryExpr::any();
            }
        };

        self.advance();
        expr
    }

    /// Parses a parenthesized group, consuming the closing parenthesis if present.
    fn parse_group(&mut self) -> QueryExpr {
        self.advance(); // consume (
        let inner = self.parse_expression();

        if self.check(&Token::RParen) {
            self.advance();
        }

        inner
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Checks if the current token matches the given token.
    fn check(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Parses an already tokenized query.
pub fn parse_tokens(tokens: Vec<Token>) -> QueryExpr {
    Parser::new(tokens).parse()
}

/// Parses a query string into an AST.
///
/// Build the tree once and call [`QueryExpr::evaluate`] for each text rather
/// than re-parsing per text. Never fails; an empty query yields the empty
/// literal, which matches everything.
pub fn parse_boolean_query(query: &str) -> QueryExpr {
    let tokens = tokenize(query);
    trace!("tokens for {query:?}: {tokens:?}");

    let expr = parse_tokens(tokens);
    debug!("parsed {query:?} as {}", expr.to_query_string());
    expr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> QueryExpr {
        QueryExpr::literal(s)
    }

    fn phrase(s: &str) -> QueryExpr {
        QueryExpr::phrase(s)
    }

    fn and(l: QueryExpr, r: QueryExpr) -> QueryExpr {
        QueryExpr::and(l, r)
    }

    fn or(l: QueryExpr, r: QueryExpr) -> QueryExpr {
        QueryExpr::or(l, r)
    }

    fn not(e: QueryExpr) -> QueryExpr {
        QueryExpr::not(e)
    }

    fn any() -> QueryExpr {
        QueryExpr::any()
    }

    fn parse(q: &str) -> QueryExpr {
        parse_boolean_query(q)
    }

    #[test]
    fn empty_query() {
        assert_eq!(parse(""), any());
        assert_eq!(parse("   "), any());
    }

    #[test]
    fn single_word_is_lowercased() {
        assert_eq!(parse("Shell"), lit("shell"));
    }

    #[test]
    fn quoted_phrase_is_exact() {
        assert_eq!(parse("\"Shell plc\""), phrase("shell plc"));
    }

    #[test]
    fn unclosed_quote_is_exact_phrase() {
        assert_eq!(parse("shell \"big oil"), and(lit("shell"), phrase("big oil")));
    }

    #[test]
    fn explicit_and() {
        assert_eq!(parse("shell AND bp"), and(lit("shell"), lit("bp")));
        assert_eq!(parse("shell && bp"), and(lit("shell"), lit("bp")));
    }

    #[test]
    fn explicit_or() {
        assert_eq!(parse("shell or bp"), or(lit("shell"), lit("bp")));
        assert_eq!(parse("shell || bp"), or(lit("shell"), lit("bp")));
    }

    #[test]
    fn implicit_and() {
        assert_eq!(parse("shell bp"), and(lit("shell"), lit("bp")));
    }

    #[test]
    fn implicit_and_chains_left() {
        assert_eq!(
            parse("a b c"),
            and(and(lit("a"), lit("b")), lit("c"))
        );
    }

    #[test]
    fn and_or_are_flat_and_left_associative() {
        assert_eq!(
            parse("a AND b OR c"),
            or(and(lit("a"), lit("b")), lit("c"))
        );
        assert_eq!(
            parse("a OR b AND c"),
            and(or(lit("a"), lit("b")), lit("c"))
        );
    }

    #[test]
    fn implicit_and_mixed_with_or() {
        assert_eq!(parse("a b OR c"), or(and(lit("a"), lit("b")), lit("c")));
        assert_eq!(parse("a OR b c"), and(or(lit("a"), lit("b")), lit("c")));
    }

    #[test]
    fn binary_not_is_and_not() {
        assert_eq!(parse("shell NOT gas"), and(lit("shell"), not(lit("gas"))));
        assert_eq!(parse("shell ! gas"), and(lit("shell"), not(lit("gas"))));
    }

    #[test]
    fn leading_not() {
        assert_eq!(parse("NOT gas"), not(lit("gas")));
    }

    #[test]
    fn not_after_and() {
        assert_eq!(
            parse("shell AND NOT gas"),
            and(lit("shell"), not(lit("gas")))
        );
    }

    #[test]
    fn not_applies_to_one_factor() {
        assert_eq!(
            parse("NOT gas shell"),
            and(not(lit("gas")), lit("shell"))
        );
    }

    #[test]
    fn negated_group() {
        assert_eq!(
            parse("NOT (gas OR oil)"),
            not(or(lit("gas"), lit("oil")))
        );
    }

    #[test]
    fn grouping() {
        assert_eq!(
            parse("(shell OR bp) AND energy"),
            and(or(lit("shell"), lit("bp")), lit("energy"))
        );
        assert_eq!(
            parse("shell AND (bp OR energy)"),
            and(lit("shell"), or(lit("bp"), lit("energy")))
        );
    }

    #[test]
    fn nested_groups() {
        assert_eq!(
            parse("((a OR b) c)"),
            and(or(lit("a"), lit("b")), lit("c"))
        );
    }

    #[test]
    fn words_after_group_join_by_and() {
        assert_eq!(
            parse("(shell OR bp) energy \"big oil\""),
            and(
                and(or(lit("shell"), lit("bp")), lit("energy")),
                phrase("big oil")
            )
        );
    }

    #[test]
    fn adjacent_groups_join_by_and() {
        assert_eq!(
            parse("(a OR b)(c OR d)"),
            and(or(lit("a"), lit("b")), or(lit("c"), lit("d")))
        );
    }

    #[test]
    fn missing_close_paren_is_tolerated() {
        assert_eq!(parse("(shell OR bp"), or(lit("shell"), lit("bp")));
    }

    #[test]
    fn unmatched_close_paren_ends_query() {
        assert_eq!(parse("shell) bp"), lit("shell"));
        assert_eq!(parse(")shell"), any());
    }

    #[test]
    fn empty_parens_are_vacuous() {
        assert_eq!(parse("()"), any());
        assert_eq!(parse("shell ()"), and(lit("shell"), any()));
    }

    #[test]
    fn trailing_operator_is_vacuous() {
        assert_eq!(parse("shell AND"), and(lit("shell"), any()));
        assert_eq!(parse("shell OR"), or(lit("shell"), any()));
        assert_eq!(parse("shell NOT"), and(lit("shell"), not(any())));
    }

    #[test]
    fn leading_operator_is_vacuous_left_side() {
        assert_eq!(parse("OR shell"), or(any(), lit("shell")));
        assert_eq!(parse("AND shell"), and(any(), lit("shell")));
    }

    #[test]
    fn lone_operators() {
        assert_eq!(parse("NOT"), not(any()));
        assert_eq!(parse("AND"), and(any(), any()));
    }

    #[test]
    fn double_binary_not() {
        // The second NOT sits where a factor is expected, leaving an empty
        // literal, and then acts as a binary NOT itself.
        assert_eq!(
            parse("a NOT NOT b"),
            and(and(lit("a"), not(any())), not(lit("b")))
        );
    }

    #[test]
    fn leading_double_not() {
        assert_eq!(parse("NOT NOT a"), and(not(any()), not(lit("a"))));
    }

    #[test]
    fn parse_tokens_directly() {
        let tokens = vec![Token::Word("A".into()), Token::Or, Token::Phrase("B c".into())];
        assert_eq!(parse_tokens(tokens), or(lit("a"), phrase("b c")));
    }

    #[test]
    fn query_string_reparses_to_same_tree() {
        let queries = [
            "shell",
            "\"shell plc\"",
            "a AND b OR c",
            "a OR b c",
            "shell NOT gas",
            "NOT (gas OR oil) bp",
            "((a OR b) c) OR (d NOT e)",
            "!a && (b || \"c d\")",
        ];

        for query in queries {
            let expr = parse(query);
            let reparsed = parse(&expr.to_query_string());
            assert_eq!(reparsed, expr, "round trip failed for {query:?}");
        }
    }
}
