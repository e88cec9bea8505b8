//! Span rendering for highlighted word runs.
//!
//! A single left-to-right pass over `(word, flag)` pairs groups consecutive
//! flagged words into contiguous spans, wrapping each span in the style's
//! open/close markers. With a `mask_out` substitute configured, unflagged
//! words are suppressed and replaced by the substitute instead of shown.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::pipeline::MaskedWord;

/// Escape sequence that ends a colored span.
pub const RESET: &str = "\x1b[0m";

/// Terminal color for highlighted spans.
///
/// A closed set mapping to a fixed marker table — unrecognized names are
/// rejected when parsing, and the renderer itself never sees an invalid
/// color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum HighlightColor {
    /// Bold cyan on black.
    #[default]
    Cyan,
    /// Bold green on black.
    Green,
    /// Bold magenta on black.
    Magenta,
}

impl HighlightColor {
    /// Returns the color name as a lowercase string slice.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Magenta => "magenta",
        }
    }

    /// The open/close escape pair wrapped around spans of this color.
    pub const fn markers(self) -> SpanMarkers {
        let open = match self {
            Self::Cyan => "\x1b[1;36;40m",
            Self::Green => "\x1b[1;32;40m",
            Self::Magenta => "\x1b[1;35;40m",
        };
        SpanMarkers { open, close: RESET }
    }
}

impl std::fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighlightColor {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cyan" => Ok(Self::Cyan),
            "green" => Ok(Self::Green),
            "magenta" => Ok(Self::Magenta),
            _ => Err(AnalysisError::UnknownColor {
                name: s.to_string(),
                available: "cyan, green, magenta".to_string(),
            }),
        }
    }
}

/// Marker pair emitted at span boundaries.
///
/// Keeps terminal-control semantics out of the render loop: the state
/// machine only knows it has an opener and a closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanMarkers {
    /// Emitted before the first word of a span.
    pub open: &'static str,
    /// Emitted before the first word after a span.
    pub close: &'static str,
}

/// How to render a mask: span color, plus an optional substitute string
/// that replaces unflagged words entirely.
#[derive(Debug, Clone, Default)]
pub struct HighlightStyle {
    /// Color wrapped around highlighted runs.
    pub color: HighlightColor,
    /// If set, unflagged words are replaced by this string instead of
    /// being shown.
    pub mask_out: Option<String>,
}

/// Tracks whether the renderer is inside a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderState {
    Outside,
    Inside,
}

/// Render `(word, flag)` pairs into one marked-up string.
///
/// Single pass, no lookahead, no backtracking. Transitions emit their
/// marker *before* the word that caused them. Every shown word is preceded
/// by a single space separator; substituted words are emitted bare. The
/// stream ends in whatever state it is in: a span still open at end of
/// input gets no closing marker.
#[tracing::instrument(skip(masked, style), fields(words = masked.len()))]
pub fn render_spans(masked: &[MaskedWord], style: &HighlightStyle) -> String {
    let markers = style.color.markers();
    let mut out = String::new();
    let mut state = RenderState::Outside;

    for entry in masked {
        match state {
            RenderState::Outside if entry.highlighted => {
                state = RenderState::Inside;
                out.push_str(markers.open);
            }
            RenderState::Inside if !entry.highlighted => {
                state = RenderState::Outside;
                out.push_str(markers.close);
            }
            _ => {}
        }

        if state == RenderState::Outside
            && let Some(ref substitute) = style.mask_out
        {
            out.push_str(substitute);
        } else {
            out.push(' ');
            out.push_str(&entry.word);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masked(pairs: &[(&str, bool)]) -> Vec<MaskedWord> {
        pairs
            .iter()
            .map(|&(word, highlighted)| MaskedWord {
                word: word.to_string(),
                highlighted,
            })
            .collect()
    }

    #[test]
    fn all_false_without_substitute_is_plain_text() {
        let words = masked(&[("one", false), ("two", false), ("three", false)]);
        let out = render_spans(&words, &HighlightStyle::default());
        assert_eq!(out, " one two three");
    }

    #[test]
    fn all_true_opens_once_and_never_closes() {
        let words = masked(&[("one", true), ("two", true)]);
        let out = render_spans(&words, &HighlightStyle::default());
        assert_eq!(out, "\x1b[1;36;40m one two");
        assert!(!out.contains(RESET));
    }

    #[test]
    fn span_closes_before_the_word_that_ends_it() {
        let words = masked(&[("a", true), ("b", false), ("c", true)]);
        let out = render_spans(&words, &HighlightStyle::default());
        assert_eq!(out, "\x1b[1;36;40m a\x1b[0m b\x1b[1;36;40m c");
    }

    #[test]
    fn substitute_replaces_unflagged_words_bare() {
        let style = HighlightStyle {
            color: HighlightColor::Cyan,
            mask_out: Some("_".to_string()),
        };
        let words = masked(&[("junk", false), ("prose", true), ("noise", false)]);
        let out = render_spans(&words, &style);
        assert_eq!(out, "_\x1b[1;36;40m prose\x1b[0m_");
    }

    #[test]
    fn green_and_magenta_use_their_own_markers() {
        let words = masked(&[("x", true)]);
        let green = HighlightStyle {
            color: HighlightColor::Green,
            mask_out: None,
        };
        let magenta = HighlightStyle {
            color: HighlightColor::Magenta,
            mask_out: None,
        };
        assert!(render_spans(&words, &green).starts_with("\x1b[1;32;40m"));
        assert!(render_spans(&words, &magenta).starts_with("\x1b[1;35;40m"));
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render_spans(&[], &HighlightStyle::default()), "");
    }

    #[test]
    fn unknown_color_is_rejected() {
        let err = "chartreuse".parse::<HighlightColor>().unwrap_err();
        assert!(matches!(
            err,
            crate::error::AnalysisError::UnknownColor { ref name, .. } if name == "chartreuse"
        ));
    }

    #[test]
    fn color_parses_known_names() {
        assert_eq!("cyan".parse::<HighlightColor>().unwrap(), HighlightColor::Cyan);
        assert_eq!("green".parse::<HighlightColor>().unwrap(), HighlightColor::Green);
        assert_eq!(
            "magenta".parse::<HighlightColor>().unwrap(),
            HighlightColor::Magenta
        );
    }
}
