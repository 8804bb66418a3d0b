//! Scope keyword classification and backward scope resolution

mod keywords;
mod resolver;

pub use keywords::{
    classify, classify_trailing_do, tokenize, tokenize_indexed, KeywordEntry, DO_KEYWORD, KEYWORDS,
};
pub use resolver::{find_mid_scope_anchor, find_opening_line};
