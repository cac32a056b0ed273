//! List label recognition.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Glyphs accepted as unordered list bullets.
const BULLETS: &[char] = &['•', '◦', '▪', '‣', '-', '–', '*', '·', '○', '■', '►'];

/// A label found at the start of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLabel {
    /// Unordered bullet glyph
    Bullet(char),
    /// Ordinal such as `3.` or `c)`
    Ordinal {
        value: u32,
        style: OrdinalStyle,
        suffix: char,
    },
}

/// How an ordinal label is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdinalStyle {
    Decimal,
    LowerAlpha,
    UpperAlpha,
}

/// Finds list labels at the start of line text.
#[derive(Debug, Clone)]
pub struct ListLabelDetector {
    ordinal: Regex,
}

impl ListLabelDetector {
    pub fn new() -> Self {
        Self {
            ordinal: Regex::new(r"^\s*(?:(\d{1,4})|([A-Za-z]))([.)])(?:\s|$)")
                .expect("valid regex"),
        }
    }

    /// Label at the start of `text` and its normalised spelling.
    pub fn detect(&self, text: &str) -> Option<(ListLabel, String)> {
        let text: String = text.nfkc().collect();
        let trimmed = text.trim_start();

        let mut chars = trimmed.chars();
        if let Some(first) = chars.next() {
            if BULLETS.contains(&first) && chars.next().map_or(true, char::is_whitespace) {
                return Some((ListLabel::Bullet(first), first.to_string()));
            }
        }

        let caps = self.ordinal.captures(&text)?;
        let suffix = caps.get(3)?.as_str().chars().next()?;
        let (value, style, body) = if let Some(digits) = caps.get(1) {
            (digits.as_str().parse().ok()?, OrdinalStyle::Decimal, digits.as_str())
        } else {
            let letter = caps.get(2)?;
            let c = letter.as_str().chars().next()?;
            let style = if c.is_ascii_lowercase() {
                OrdinalStyle::LowerAlpha
            } else {
                OrdinalStyle::UpperAlpha
            };
            let value = c.to_ascii_lowercase() as u32 - 'a' as u32 + 1;
            (value, style, letter.as_str())
        };

        Some((
            ListLabel::Ordinal {
                value,
                style,
                suffix,
            },
            format!("{}{}", body, suffix),
        ))
    }

    /// Check whether consecutive labels form one list.
    ///
    /// Bullets must share a glyph; ordinals must share style and suffix and
    /// count up by one.
    pub fn is_sequence(labels: &[ListLabel]) -> bool {
        if labels.is_empty() {
            return false;
        }
        labels.windows(2).all(|pair| match (pair[0], pair[1]) {
            (ListLabel::Bullet(a), ListLabel::Bullet(b)) => a == b,
            (
                ListLabel::Ordinal {
                    value: a,
                    style: sa,
                    suffix: xa,
                },
                ListLabel::Ordinal {
                    value: b,
                    style: sb,
                    suffix: xb,
                },
            ) => sa == sb && xa == xb && b == a + 1,
            _ => false,
        })
    }

    /// Check whether `next` continues a list whose last label is `last`.
    pub fn continues(last: ListLabel, next: ListLabel) -> bool {
        Self::is_sequence(&[last, next])
    }
}

impl Default for ListLabelDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_bullet() {
        let detector = ListLabelDetector::new();
        let (label, text) = detector.detect("• first item").unwrap();
        assert_eq!(label, ListLabel::Bullet('•'));
        assert_eq!(text, "•");
    }

    #[test]
    fn test_hyphenated_word_is_not_a_bullet() {
        let detector = ListLabelDetector::new();
        assert!(detector.detect("-5 degrees").is_none());
    }

    #[test]
    fn test_detect_decimal() {
        let detector = ListLabelDetector::new();
        let (label, text) = detector.detect("12. Twelfth").unwrap();
        assert_eq!(
            label,
            ListLabel::Ordinal {
                value: 12,
                style: OrdinalStyle::Decimal,
                suffix: '.'
            }
        );
        assert_eq!(text, "12.");
    }

    #[test]
    fn test_detect_fullwidth_digits_after_normalisation() {
        let detector = ListLabelDetector::new();
        let (label, text) = detector.detect("２) second").unwrap();
        assert!(matches!(label, ListLabel::Ordinal { value: 2, .. }));
        assert_eq!(text, "2)");
    }

    #[test]
    fn test_detect_alpha() {
        let detector = ListLabelDetector::new();
        let (label, _) = detector.detect("c) third").unwrap();
        assert_eq!(
            label,
            ListLabel::Ordinal {
                value: 3,
                style: OrdinalStyle::LowerAlpha,
                suffix: ')'
            }
        );
    }

    #[test]
    fn test_plain_sentence_has_no_label() {
        let detector = ListLabelDetector::new();
        assert!(detector.detect("The quick brown fox").is_none());
        assert!(detector.detect("A.B. Smith wrote").is_none());
    }

    #[test]
    fn test_sequences() {
        let detector = ListLabelDetector::new();
        let labels: Vec<ListLabel> = ["1. a", "2. b", "3. c"]
            .iter()
            .map(|t| detector.detect(t).unwrap().0)
            .collect();
        assert!(ListLabelDetector::is_sequence(&labels));

        let broken: Vec<ListLabel> = ["1. a", "3. b"]
            .iter()
            .map(|t| detector.detect(t).unwrap().0)
            .collect();
        assert!(!ListLabelDetector::is_sequence(&broken));

        let mixed = [ListLabel::Bullet('•'), ListLabel::Bullet('-')];
        assert!(!ListLabelDetector::is_sequence(&mixed));
        assert!(!ListLabelDetector::is_sequence(&[]));
    }
}
