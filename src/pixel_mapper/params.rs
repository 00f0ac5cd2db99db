//! Parameter-string grammar shared by the mappers.
//!
//! Two shapes exist:
//! - a single case-insensitive letter (`"H"`, `"v"`, ...), or empty;
//! - a comma-separated list of `a|b` pairs of decimal numbers, e.g. `"0|90,2|180"`.
//!
//! List grammars never fail as a whole. A bad pair is skipped, recorded in
//! [`Diagnostics`], and the remaining pairs still apply.

use derive_more::Display;

/// Capacity of the token text kept in a [`ParamIssue`].
pub const TOKEN_CAPACITY: usize = 16;

/// Most issues a [`Diagnostics`] list keeps; further issues are only counted.
pub const MAX_DIAGNOSTICS: usize = 8;

/// Offending token text, truncated to [`TOKEN_CAPACITY`] bytes.
pub type TokenText = heapless::String<TOKEN_CAPACITY>;

/// Something wrong with (part of) a parameter string.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum ParamIssue {
    /// A numeric field holds something other than `[0-9]+` (or overflows `u32`).
    #[display("error in parameter string, found non-digit: {token}")]
    NotANumber {
        /// The field as written.
        token: TokenText,
    },

    /// A list item is not exactly two non-empty `|`-separated fields.
    #[display("error in parameter string, expected 'a|b' but found: {token}")]
    MalformedPair {
        /// The item as written.
        token: TokenText,
    },

    /// A panel index is not below `chain * parallel`.
    #[display("error in parameter string, panel index is too high: {index} (max: {max})")]
    PanelIndexTooHigh {
        /// The index as parsed.
        index: u32,
        /// Highest valid panel index.
        max: u32,
    },

    /// A rotation that is not a multiple of 90 degrees.
    #[display("invalid parameter value for rotation: {angle}")]
    NotMultipleOf90 {
        /// The angle as parsed.
        angle: i64,
    },

    /// A switch parameter with more than one character.
    #[display("parameter should be a single character 'V' or 'H', found: {token}")]
    NotSingleLetter {
        /// The parameter as written.
        token: TokenText,
    },

    /// A single-letter switch that is not one of the accepted letters.
    #[display("parameter should be either 'V' or 'H', found: {letter}")]
    UnknownLetter {
        /// The letter, upper-cased.
        letter: char,
    },
}

/// Issues collected while parsing a list grammar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    issues: heapless::Vec<ParamIssue, MAX_DIAGNOSTICS>,
    dropped: usize,
}

impl Diagnostics {
    /// No issues.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issues: heapless::Vec::new(),
            dropped: 0,
        }
    }

    /// Record an issue. Past [`MAX_DIAGNOSTICS`] the issue is only counted.
    pub fn push(&mut self, issue: ParamIssue) {
        if self.issues.push(issue).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// The kept issues, in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[ParamIssue] {
        &self.issues
    }

    /// Issues found but not kept.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Total issues found, kept or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len().saturating_add(self.dropped)
    }

    /// `true` when the parameter string parsed cleanly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Copy `token` into a [`TokenText`], truncating on a character boundary.
pub(crate) fn token_text(token: &str) -> TokenText {
    let mut text = TokenText::new();
    for ch in token.chars() {
        if text.push(ch).is_err() {
            break;
        }
    }
    text
}

/// Parse a field that must match `[0-9]+`.
pub(crate) fn parse_number(field: &str) -> Result<u32, ParamIssue> {
    let not_a_number = || ParamIssue::NotANumber {
        token: token_text(field),
    };
    if field.is_empty() || !field.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(not_a_number());
    }
    field.parse().map_err(|_| not_a_number())
}

/// Parse an empty or single-letter switch. The letter comes back upper-cased.
pub(crate) fn parse_letter(param: &str) -> Result<Option<char>, ParamIssue> {
    let mut chars = param.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(letter), None) => Ok(Some(letter.to_ascii_uppercase())),
        (Some(_), Some(_)) => Err(ParamIssue::NotSingleLetter {
            token: token_text(param),
        }),
    }
}

fn parse_pair(item: &str) -> Result<(u32, u32), ParamIssue> {
    let mut fields = item.split('|');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(first), Some(second), None) if !first.is_empty() && !second.is_empty() => {
            Ok((parse_number(first)?, parse_number(second)?))
        }
        _ => Err(ParamIssue::MalformedPair {
            token: token_text(item),
        }),
    }
}

/// Fold every well-formed `a|b` pair of `param` into `table`.
///
/// `apply` may reject a pair. Rejected and malformed pairs are logged under
/// `mapper` and recorded; empty list items are ignored.
pub(crate) fn fold_pairs<T>(
    mapper: &'static str,
    param: &str,
    table: T,
    mut apply: impl FnMut(&mut T, u32, u32) -> Result<(), ParamIssue>,
) -> (T, Diagnostics) {
    param
        .split(',')
        .filter(|item| !item.is_empty())
        .fold((table, Diagnostics::new()), |(mut table, mut diagnostics), item| {
            if let Err(issue) = parse_pair(item).and_then(|(first, second)| apply(&mut table, first, second)) {
                warn!("{}: {}", mapper, display!(issue));
                diagnostics.push(issue);
            }
            (table, diagnostics)
        })
}

#[cfg(test)]
mod tests {
    use super::{Diagnostics, MAX_DIAGNOSTICS, ParamIssue, fold_pairs, parse_letter, parse_number, token_text};

    fn collect(param: &str) -> (heapless::Vec<(u32, u32), 8>, Diagnostics) {
        fold_pairs("Test", param, heapless::Vec::new(), |table, first, second| {
            table.push((first, second)).map_err(|_| ParamIssue::MalformedPair {
                token: token_text("full"),
            })
        })
    }

    #[test]
    fn numbers_must_be_pure_digits() {
        assert_eq!(parse_number("42"), Ok(42));
        assert_eq!(parse_number("007"), Ok(7));
        assert_eq!(
            parse_number("-1"),
            Err(ParamIssue::NotANumber {
                token: token_text("-1")
            })
        );
        assert!(parse_number("+1").is_err());
        assert!(parse_number(" 1").is_err());
        assert!(parse_number("").is_err());
        assert!(parse_number("99999999999").is_err());
    }

    #[test]
    fn letters_are_upper_cased() {
        assert_eq!(parse_letter(""), Ok(None));
        assert_eq!(parse_letter("h"), Ok(Some('H')));
        assert_eq!(parse_letter("V"), Ok(Some('V')));
        assert!(matches!(parse_letter("HV"), Err(ParamIssue::NotSingleLetter { .. })));
    }

    #[test]
    fn bad_pairs_are_skipped_not_fatal() {
        let (table, diagnostics) = collect("0|90,x|180,1|2|3,,2|270,4");
        assert_eq!(table.as_slice(), &[(0, 90), (2, 270)]);
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(
            diagnostics.issues().first(),
            Some(&ParamIssue::NotANumber {
                token: token_text("x")
            })
        );
        assert!(matches!(
            diagnostics.issues().get(1),
            Some(ParamIssue::MalformedPair { .. })
        ));
    }

    #[test]
    fn empty_param_is_clean() {
        let (table, diagnostics) = collect("");
        assert!(table.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn overflowing_diagnostics_are_counted() {
        let mut diagnostics = Diagnostics::new();
        for _ in 0..MAX_DIAGNOSTICS + 3 {
            diagnostics.push(ParamIssue::UnknownLetter { letter: 'Q' });
        }
        assert_eq!(diagnostics.issues().len(), MAX_DIAGNOSTICS);
        assert_eq!(diagnostics.dropped(), 3);
        assert_eq!(diagnostics.len(), MAX_DIAGNOSTICS + 3);
    }

    #[test]
    fn long_tokens_are_truncated() {
        let text = token_text("0123456789abcdefXYZ");
        assert_eq!(text.as_str(), "0123456789abcdef");
    }
}
