pub mod ast;
pub mod error;
pub mod token;

use error::{kind, Error};
use ricci_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for the expression language. This is the type to use to parse an
/// arbitrary piece of source into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn advance_past_whitespace(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the next non-whitespace token without moving the cursor. Returns [`None`] if
    /// there are no more tokens.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the remaining tokens, starting at the next non-whitespace token. Whitespace after
    /// that token is kept, so callers can check whether two tokens are adjacent.
    pub fn lookahead(&self) -> &[Token<'source>] {
        let start = self.tokens[self.cursor..]
            .iter()
            .position(|token| !token.is_whitespace())
            .map_or(self.tokens.len(), |offset| self.cursor + offset);
        &self.tokens[start..]
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Returns the next token without skipping whitespace, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token_raw(&mut self) -> Result<Token<'source>, Error> {
        let token = self.tokens
            .get(self.cursor)
            .cloned()
            .ok_or_else(|| self.error(kind::UnexpectedEof))?;
        self.cursor += 1;
        Ok(token)
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.cursor = start;
                    return Err(err);
                },
            }

            match self.peek_token() {
                Some(token) if token.kind == delimiter => {
                    self.next_token()?;
                },
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.advance_past_whitespace();
        if self.cursor == self.tokens.len() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl Precedence {
    /// Returns the precedence level directly below this one. [`Precedence::Any`] is its own lower
    /// level.
    pub fn lower(self) -> Self {
        match self {
            Self::Any | Self::Term => Self::Any,
            Self::Factor => Self::Term,
            Self::Neg => Self::Factor,
            Self::Exp => Self::Neg,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Binary, Call, Expr, Literal, LitInt, LitSym, Paren, Unary};
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), int("16", 0..2));
    }

    #[test]
    fn binary_precedence() {
        let expr = parse("1 + 2 * r");
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("1", 0..1)),
            op: BinOp { kind: BinOpKind::Add, implicit: false, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 6..7 },
                rhs: Box::new(sym("r", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse("a^b^c");
        assert_eq!(expr.to_string(), "a^(b^c)");
    }

    #[test]
    fn left_associative_division() {
        let expr = parse("a / b / c");
        assert_eq!(expr.to_string(), "(a / b) / c");
    }

    #[test]
    fn unary_binds_looser_than_power() {
        let expr = parse("-r^2");
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("r", 1..2)),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse("2M");
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(sym("M", 1..2)),
            span: 0..2,
        }));
    }

    #[test]
    fn implicit_multiplication_with_calls() {
        let expr = parse("r sin(theta)^2");
        assert_eq!(expr.to_string(), "r sin(theta)^2");
        let Expr::Binary(bin) = expr else { panic!("expected a product") };
        assert!(bin.op.implicit);
    }

    #[test]
    fn primed_call() {
        let expr = parse("B''(r)");
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "B".to_string(), span: 0..1 },
            derivatives: 2,
            args: vec![sym("r", 4..5)],
            span: 0..6,
            paren_span: 3..6,
        }));
    }

    #[test]
    fn call_with_many_arguments() {
        let expr = parse("f(r, theta, 2)");
        let Expr::Call(call) = expr else { panic!("expected a call") };
        assert_eq!(call.args.len(), 3);
        assert_eq!(call.derivatives, 0);
    }

    #[test]
    fn parenthesized() {
        let expr = parse("(1 - 2M/r)");
        let Expr::Paren(Paren { expr, span }) = expr else { panic!("expected parentheses") };
        assert_eq!(span, 0..10);
        assert_eq!(expr.to_string(), "1 - 2M / r");
    }

    #[test]
    fn unexpected_eof() {
        assert!(Parser::new("1 +").try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = Parser::new("(r + 1").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn trailing_garbage() {
        let err = Parser::new("r $").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
    }
}
