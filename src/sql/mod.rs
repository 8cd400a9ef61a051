//! Tokens and words of half-typed MariaDB statements.
//!
//! Everything here tolerates truncated or invalid input: an unterminated
//! string or backtick runs to the end of the text, unknown characters become
//! operators, and identifiers keep the casing they were typed with.
//!
//! ```rust
//! use sqlsense::prelude::*;
//!
//! let tokens = tokenize("select `order`.id from `order` whe");
//! assert!(tokens.iter().any(|t| t.is_keyword(Keyword::From)));
//! assert_eq!(last_word("select `order`.id from `order` whe", WordBoundary::Whitespace), "whe");
//! ```

pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;
pub mod word;

pub use keyword::Keyword;
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;
pub use word::{WordBoundary, last_word};

/// The tokenizer and word helpers in one import.
pub mod prelude {
    pub use super::{Keyword, Token, TokenKind, WordBoundary, last_word, tokenize};
}
