use crate::consts::{DIRECTIVE_MARKER, NO_PAD_FLAG};
use crate::prelude::*;

/// A single `%`-introduced token: the directive code letter and whether the
/// no-zero-pad flag (`%-`) was present. The flag is only meaningful for the
/// numeric directives; formatters for the rest ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "%{}{}", "if *no_pad { \"-\" } else { \"\" }", "code")]
pub(crate) struct Directive {
    pub code:   char,
    pub no_pad: bool,
}

/// One token of a format string: a run of literal text, or a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Literal(&'a str),
    Directive(Directive),
}

/// Tokenizes a format string into literal runs and directives.
///
/// Both the renderer and the pattern compiler walk this same iterator, so the
/// two sides agree byte-for-byte on the format grammar. The scanner itself
/// never rejects a directive code; each consumer reports unknown codes
/// against its own dispatch table.
pub(crate) struct FormatScanner<'a> {
    rest: &'a str,
}

impl<'a> FormatScanner<'a> {
    pub(crate) fn new(format: &'a str) -> Self {
        Self { rest: format }
    }
}

impl<'a> Iterator for FormatScanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if !self.rest.starts_with(DIRECTIVE_MARKER) {
            let end = self
                .rest
                .find(DIRECTIVE_MARKER)
                .unwrap_or(self.rest.len());
            let (literal, rest) = self.rest.split_at(end);
            self.rest = rest;
            return Some(Token::Literal(literal));
        }

        let mut chars = self.rest.char_indices();
        chars.next(); // the marker itself

        match chars.next() {
            // A marker with nothing after it passes through as literal text
            None => {
                let literal = self.rest;
                self.rest = "";
                Some(Token::Literal(literal))
            }
            Some((_, c)) if c == NO_PAD_FLAG => match chars.next() {
                // Same rule for a dangling flag: `%-` at the end is literal
                None => {
                    let literal = self.rest;
                    self.rest = "";
                    Some(Token::Literal(literal))
                }
                Some((idx, code)) => {
                    self.rest = &self.rest[idx + code.len_utf8()..];
                    Some(Token::Directive(Directive { code, no_pad: true }))
                }
            },
            Some((idx, code)) => {
                self.rest = &self.rest[idx + code.len_utf8()..];
                Some(Token::Directive(Directive {
                    code,
                    no_pad: false,
                }))
            }
        }
    }
}
