//! Line tokenizer for RSM text.
//!
//! Splits raw text into a lazy sequence of lines, each further split into
//! non-empty whitespace-separated tokens. Tokenizing never fails; deciding
//! what a line *means* (header, record, or fatal blank) is the decoder's job.

/// One line of input, split into tokens.
///
/// A blank or whitespace-only line yields an empty `tokens` list. The
/// tokenizer still reports it — blank lines are significant input to the
/// decoder's state machine, not separators.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenLine<'a> {
    /// Line number in the source text (1-indexed).
    pub number: usize,
    /// Non-empty tokens, split on ASCII whitespace.
    pub tokens: Vec<&'a str>,
}

/// Lazy iterator over the token-lines of a source text.
///
/// Restartable: a new `Lexer` over the same text yields the same sequence.
pub struct Lexer<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over the given text.
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            number: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenLine<'a>;

    fn next(&mut self) -> Option<TokenLine<'a>> {
        let line = self.lines.next()?;
        self.number += 1;
        Some(TokenLine {
            number: self.number,
            tokens: line.split_whitespace().collect(),
        })
    }
}
