//! Parsers for individual punctuation tokens.

pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Generates a unit struct that parses exactly one token of the given kind.
macro_rules! token_kinds {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct $name {
                /// The region of the source code that this token was parsed from.
                pub span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = input.next_token()?;
                    if token.kind == TokenKind::$name {
                        Ok(Self { span: token.span })
                    } else {
                        Err(Error::new(vec![token.span], kind::UnexpectedToken {
                            expected: &[TokenKind::$name],
                            found: token.kind,
                        }))
                    }
                }
            }
        )+
    };
}

token_kinds!(
    /// An opening parenthesis `(`.
    OpenParen,
    /// A closing parenthesis `)`.
    CloseParen,
    /// A comma `,` separating the arguments of a call.
    Comma,
);

/// A single quote `'`, marking one derivative of a function call. Quotes must be written
/// directly after the function name or another quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// The region of the source code that this token was parsed from.
    pub span: Range<usize>,
}

impl Parse for Quote {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token_raw()?;
        if token.kind == TokenKind::Quote {
            Ok(Self { span: token.span })
        } else {
            Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Quote],
                found: token.kind,
            }))
        }
    }
}
