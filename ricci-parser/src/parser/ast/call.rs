use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::{kind, Error},
        token::{CloseParen, OpenParen, Quote},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `sin(theta)`. The name may be followed by quotes marking
/// derivatives, such as `B''(r)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The number of derivatives to take before calling the function.
    pub derivatives: u8,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name and the
    /// second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.clone(),
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }

    /// Returns true if the upcoming tokens form the head of a function call: a name, any number
    /// of quotes, then an opening parenthesis, with no whitespace in between.
    pub fn is_ahead(input: &Parser) -> bool {
        let mut tokens = input.lookahead().iter();
        tokens.next().is_some_and(|token| token.kind == TokenKind::Name)
            && tokens
                .find(|token| token.kind != TokenKind::Quote)
                .is_some_and(|token| token.kind == TokenKind::OpenParen)
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;

        let mut quotes = Vec::new();
        while let Ok(quote) = input.try_parse::<Quote>() {
            quotes.push(quote);
        }
        let derivatives = u8::try_from(quotes.len()).map_err(|_| {
            let spans = quotes.iter().map(|quote| quote.span.clone()).collect();
            Error::new(spans, kind::TooManyDerivatives { derivatives: quotes.len() })
        })?;

        let open_paren = input.try_parse::<OpenParen>()?;
        let args = input.try_parse_delimited::<Expr>(TokenKind::Comma)?;
        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|err| if input.peek_token().is_none() {
                Error::new(vec![open_paren.span.clone()], kind::UnclosedParenthesis { opening: true })
            } else {
                err
            })?;

        let span = name.span.start..close_paren.span.end;
        Ok(Self {
            name,
            derivatives,
            args,
            span,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}(", self.name, "'".repeat(self.derivatives as usize))?;
        if let Some((last, rest)) = self.args.split_last() {
            for arg in rest {
                write!(f, "{}, ", arg)?;
            }
            write!(f, "{}", last)?;
        }
        write!(f, ")")
    }
}
