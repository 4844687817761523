//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Tempa.
//! The Tempa project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Numbering Formatters
//!
//! Renders ordered-list indexes for the `NUMBERING` operator.
//!
//! ## Format Strings
//!
//! A numbering format mixes literal text with `%<code>` placeholders:
//!
//! | Code | Style            | 4    | 28   |
//! |------|------------------|------|------|
//! | `n`  | arabic           | 4    | 28   |
//! | `s`  | lower alphabetic | d    | bb   |
//! | `S`  | upper alphabetic | D    | BB   |
//! | `i`  | lower roman      | iv   | xxviii |
//! | `I`  | upper roman      | IV   | XXVIII |
//!
//! Placeholders bind to the index stack from the right: the last
//! placeholder gets the innermost index, the one before it the next outer
//! index, and so on. `%S.%n` inside two nested ordered lists at positions
//! (2, 3) renders `B.3`.
//!
//! Alphabetic numbering past 26 repeats a single letter (`27` is `AA`,
//! `28` is `BB`) rather than counting in base 26.

use std::fmt;

use crate::errors::{Result, TpError};

const ROMAN_NUMERALS: [(&str, usize); 13] = [
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Numbering style selected by a format code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TpNumbering {
    Arabic,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

impl TpNumbering {
    pub fn from_code(code: char) -> Option<TpNumbering> {
        match code {
            'n' => Some(TpNumbering::Arabic),
            's' => Some(TpNumbering::LowerAlpha),
            'S' => Some(TpNumbering::UpperAlpha),
            'i' => Some(TpNumbering::LowerRoman),
            'I' => Some(TpNumbering::UpperRoman),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            TpNumbering::Arabic => 'n',
            TpNumbering::LowerAlpha => 's',
            TpNumbering::UpperAlpha => 'S',
            TpNumbering::LowerRoman => 'i',
            TpNumbering::UpperRoman => 'I',
        }
    }

    /// Renders one index. Index `0` renders empty in the alphabetic and
    /// roman styles.
    pub fn format(self, index: usize) -> String {
        match self {
            TpNumbering::Arabic => index.to_string(),
            TpNumbering::UpperAlpha => upper_alpha(index),
            TpNumbering::LowerAlpha => upper_alpha(index).to_lowercase(),
            TpNumbering::UpperRoman => upper_roman(index),
            TpNumbering::LowerRoman => upper_roman(index).to_lowercase(),
        }
    }
}

impl fmt::Display for TpNumbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.code())
    }
}

fn upper_roman(mut index: usize) -> String {
    let mut out = String::new();
    for (numeral, value) in ROMAN_NUMERALS {
        while index >= value {
            out.push_str(numeral);
            index -= value;
        }
    }
    out
}

fn upper_alpha(index: usize) -> String {
    if index == 0 {
        return String::new();
    }
    let zero_based = index - 1;
    let count = zero_based / ALPHABET.len() + 1;
    let letter = ALPHABET[zero_based % ALPHABET.len()] as char;
    std::iter::repeat(letter).take(count).collect()
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Literal(String),
    Placeholder(TpNumbering),
}

fn tokenize(format: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = format.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            literal.push(ch);
            continue;
        }
        let code = chars.next().ok_or_else(|| {
            TpError::contract(
                "NumberingOperator#format",
                format!("dangling '%' at the end of numbering format |{}|", format),
            )
        })?;
        let numbering = TpNumbering::from_code(code).ok_or_else(|| {
            TpError::contract(
                "NumberingOperator#format",
                format!("invalid numbering format code |{}|", code),
            )
        })?;
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(Token::Placeholder(numbering));
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

/// Renders `format` against index values ordered outer to inner.
pub fn render(format: &str, indexes: &[usize]) -> Result<String> {
    let tokens = tokenize(format)?;
    let placeholders = tokens
        .iter()
        .filter(|t| matches!(t, Token::Placeholder(_)))
        .count();
    if placeholders > indexes.len() {
        return Err(TpError::contract(
            "NumberingOperator#format",
            format!(
                "numbering format |{}| needs {} indexes, only {} ordered lists are open",
                format,
                placeholders,
                indexes.len()
            ),
        ));
    }

    let mut position = indexes.len() - placeholders;
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(&text),
            Token::Placeholder(numbering) => {
                out.push_str(&numbering.format(indexes[position]));
                position += 1;
            }
        }
    }
    Ok(out)
}
