#![forbid(unsafe_code)]

//! ANSI tokenizer.
//!
//! Splits raw text into escape-sequence tokens and text tokens. The tokens
//! partition the input: concatenating their raw forms gives back the input
//! byte for byte.
//!
//! Recognized escape sequences, all introduced by ESC (0x1B):
//!
//! | Form | Kind |
//! |------|------|
//! | `ESC [` params `m` | [`EscapeKind::Sgr`] |
//! | `ESC [` params intermediates final (0x40..=0x7E) | [`EscapeKind::Csi`] |
//! | `ESC ]` payload `BEL` or `ESC \` | [`EscapeKind::Osc`] |
//!
//! An ESC that does not start a complete sequence stays in the surrounding
//! text token.
//!
//! # Example
//! ```
//! use tinta_text::{tokenize, Token};
//!
//! let tokens = tokenize("\x1b[31mred\x1b[39m");
//! assert_eq!(tokens.len(), 3);
//! assert!(tokens[0].is_escape());
//! assert_eq!(tokens[1], Token::text("red"));
//! assert_eq!(tokens.iter().map(Token::length).sum::<usize>(), 3);
//! ```

use std::borrow::Cow;
use std::fmt;

use tinta_style::{CSI, SGR_FINAL, SgrParams, parse_sgr_params, sgr_sequence};

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;

const HYPERLINK_INTRODUCER: &str = "\x1b]8;";

/// OSC 8 sequence that ends the active hyperlink.
pub const HYPERLINK_CLOSE: &str = "\x1b]8;;\x1b\\";

/// Kind of a complete escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeKind {
    /// Select Graphic Rendition: changes the active style.
    Sgr,
    /// Any other control sequence; opaque.
    Csi,
    /// Operating system command such as a hyperlink; opaque.
    Osc,
}

/// One element of a tokenized string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A complete escape sequence; zero logical length.
    Escape { raw: String, kind: EscapeKind },
    /// A run of ordinary characters.
    Text { text: String, length: usize },
}

impl Token {
    /// A text token.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self::Text { text, length }
    }

    /// An escape token, or `None` if `raw` is not exactly one complete
    /// escape sequence.
    #[must_use]
    pub fn escape(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let (len, kind) = escape_at(raw.as_bytes())?;
        (len == raw.len()).then_some(Self::Escape { raw, kind })
    }

    /// An SGR escape token for `params`; empty parameters give `ESC [ m`.
    #[must_use]
    pub fn sgr(params: &[u16]) -> Self {
        let raw = if params.is_empty() {
            format!("{CSI}{SGR_FINAL}")
        } else {
            sgr_sequence(params)
        };
        Self::Escape {
            raw,
            kind: EscapeKind::Sgr,
        }
    }

    /// The OSC 8 escape ending the active hyperlink.
    #[must_use]
    pub fn hyperlink_close() -> Self {
        Self::Escape {
            raw: HYPERLINK_CLOSE.to_owned(),
            kind: EscapeKind::Osc,
        }
    }

    /// The target of an OSC 8 hyperlink escape, empty for the escape that
    /// ends a link. `None` for every other token.
    #[must_use]
    pub fn hyperlink_target(&self) -> Option<&str> {
        let Self::Escape {
            raw,
            kind: EscapeKind::Osc,
        } = self
        else {
            return None;
        };
        let payload = raw.strip_prefix(HYPERLINK_INTRODUCER)?;
        let payload = payload
            .strip_suffix('\x07')
            .or_else(|| payload.strip_suffix("\x1b\\"))?;
        let (_params, target) = payload.split_once(';')?;
        Some(target)
    }

    /// The raw form of this token as it appeared in the input.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Escape { raw, .. } => raw,
            Self::Text { text, .. } => text,
        }
    }

    /// Logical length: characters for text, 0 for escapes.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        match self {
            Self::Escape { .. } => 0,
            Self::Text { length, .. } => *length,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_escape(&self) -> bool {
        matches!(self, Self::Escape { .. })
    }

    /// The SGR parameters of an SGR token.
    ///
    /// Returns `None` for other tokens and for SGR sequences whose parameters
    /// do not parse; such sequences do not affect the style state.
    #[must_use]
    pub fn sgr_params(&self) -> Option<SgrParams> {
        match self {
            Self::Escape {
                raw,
                kind: EscapeKind::Sgr,
            } => {
                let body = raw.get(2..raw.len() - 1)?;
                parse_sgr_params(body).ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

#[inline]
fn is_parameter_byte(b: u8) -> bool {
    (0x30..=0x3F).contains(&b)
}

#[inline]
fn is_intermediate_byte(b: u8) -> bool {
    (0x20..=0x2F).contains(&b)
}

#[inline]
fn is_final_byte(b: u8) -> bool {
    (0x40..=0x7E).contains(&b)
}

/// Length and kind of the complete escape sequence starting `bytes`.
fn escape_at(bytes: &[u8]) -> Option<(usize, EscapeKind)> {
    if bytes.first() != Some(&ESC) {
        return None;
    }
    match bytes.get(1)? {
        b'[' => csi_at(bytes),
        b']' => osc_at(bytes),
        _ => None,
    }
}

fn csi_at(bytes: &[u8]) -> Option<(usize, EscapeKind)> {
    let params_end = 2 + bytes[2..].iter().take_while(|&&b| is_parameter_byte(b)).count();
    let end = params_end
        + bytes[params_end..]
            .iter()
            .take_while(|&&b| is_intermediate_byte(b))
            .count();
    let final_byte = *bytes.get(end).filter(|&&b| is_final_byte(b))?;

    let is_sgr = final_byte == SGR_FINAL as u8
        && end == params_end
        && bytes[2..params_end]
            .iter()
            .all(|&b| b.is_ascii_digit() || b == b';' || b == b':');
    let kind = if is_sgr {
        EscapeKind::Sgr
    } else {
        EscapeKind::Csi
    };
    Some((end + 1, kind))
}

fn osc_at(bytes: &[u8]) -> Option<(usize, EscapeKind)> {
    let mut i = 2;
    while let Some(&b) = bytes.get(i) {
        match b {
            BEL => return Some((i + 1, EscapeKind::Osc)),
            ESC if bytes.get(i + 1) == Some(&b'\\') => return Some((i + 2, EscapeKind::Osc)),
            ESC => return None,
            _ => i += 1,
        }
    }
    None
}

/// Split `text` into escape and text tokens.
///
/// Never fails: an ESC that does not begin a complete sequence is kept as
/// ordinary text.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != ESC {
            i += 1;
            continue;
        }
        match escape_at(&bytes[i..]) {
            Some((len, kind)) => {
                if run_start < i {
                    tokens.push(Token::text(&text[run_start..i]));
                }
                tokens.push(Token::Escape {
                    raw: text[i..i + len].to_owned(),
                    kind,
                });
                i += len;
                run_start = i;
            }
            None => {
                tracing::debug!(offset = i, "dangling escape introducer kept as text");
                i += 1;
            }
        }
    }
    if run_start < bytes.len() {
        tokens.push(Token::text(&text[run_start..]));
    }
    tokens
}

/// Remove every complete escape sequence from `text`.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.as_bytes().contains(&ESC) {
        return Cow::Borrowed(text);
    }
    let plain: String = tokenize(text)
        .iter()
        .filter(|t| !t.is_escape())
        .map(Token::raw)
        .collect();
    Cow::Owned(plain)
}

/// Whether `text` contains at least one complete escape sequence.
#[must_use]
pub fn contains_ansi(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == ESC && escape_at(&bytes[i..]).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn raws(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::raw).collect()
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(tokenize("hello"), vec![Token::text("hello")]);
    }

    #[test]
    fn splits_sgr_sequences() {
        let tokens = tokenize("a\x1b[1;31mb\x1b[0m");
        assert_eq!(raws(&tokens), vec!["a", "\x1b[1;31m", "b", "\x1b[0m"]);
        assert!(matches!(
            tokens[1],
            Token::Escape {
                kind: EscapeKind::Sgr,
                ..
            }
        ));
    }

    #[test]
    fn logical_length_of_styled_sentence() {
        let raw = "\x1b[3;36m\x1b[4mImportant:\x1b[24m This line has \x1b[9mno\x1b[29m ANSI escapes.\x1b[23;39m";
        let tokens = tokenize(raw);
        assert_eq!(tokens.iter().map(Token::length).sum::<usize>(), 41);
        assert_eq!(tokens.iter().map(Token::raw).collect::<String>(), raw);
        assert!(raw.chars().count() > 70);
    }

    #[test]
    fn other_csi_sequences_are_opaque() {
        let tokens = tokenize("\x1b[2Jx\x1b[?25l");
        let kinds: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Escape { kind, .. } => Some(*kind),
                Token::Text { .. } => None,
            })
            .collect();
        assert_eq!(kinds, vec![EscapeKind::Csi, EscapeKind::Csi]);
        assert_eq!(tokens[1], Token::text("x"));
    }

    #[test]
    fn private_sgr_like_sequences_are_not_sgr() {
        let tokens = tokenize("\x1b[>4;2m");
        assert!(matches!(
            tokens[0],
            Token::Escape {
                kind: EscapeKind::Csi,
                ..
            }
        ));
    }

    #[test]
    fn osc_hyperlinks() {
        let raw = "\x1b]8;;https://example.com\x1b\\link\x1b]8;;\x07";
        let tokens = tokenize(raw);
        assert_eq!(
            raws(&tokens),
            vec!["\x1b]8;;https://example.com\x1b\\", "link", "\x1b]8;;\x07"]
        );
        assert_eq!(tokens.iter().map(Token::length).sum::<usize>(), 4);
    }

    #[test]
    fn hyperlink_targets() {
        let tokens = tokenize("\x1b]8;id=1;https://example.com/a;b\x1b\\x\x1b]8;;\x07\x1b]0;title\x07");
        assert_eq!(tokens[0].hyperlink_target(), Some("https://example.com/a;b"));
        assert_eq!(tokens[1].hyperlink_target(), None);
        assert_eq!(tokens[2].hyperlink_target(), Some(""));
        assert_eq!(tokens[3].hyperlink_target(), None);
        assert_eq!(Token::hyperlink_close().hyperlink_target(), Some(""));
        assert_eq!(Token::escape(HYPERLINK_CLOSE), Some(Token::hyperlink_close()));
    }

    #[test]
    fn colon_sgr_sequences_fold_per_attribute() {
        let tokens = tokenize("\x1b[4:3m\x1b[38:2::10:20:30m");
        assert_eq!(tokens[0].sgr_params().unwrap().as_slice(), &[4]);
        assert_eq!(tokens[1].sgr_params().unwrap().as_slice(), &[38, 2, 10, 20, 30]);
    }

    #[test]
    #[traced_test]
    fn dangling_introducer_stays_text() {
        let tokens = tokenize("ab\x1b[31");
        assert_eq!(tokens, vec![Token::text("ab\x1b[31")]);
        assert_eq!(tokens[0].length(), 6);
        assert!(logs_contain("dangling escape introducer"));
    }

    #[test]
    fn lone_escape_between_sequences() {
        let tokens = tokenize("\x1b\x1b[1mx");
        assert_eq!(raws(&tokens), vec!["\x1b", "\x1b[1m", "x"]);
    }

    #[test]
    fn unterminated_osc_is_text() {
        assert_eq!(tokenize("\x1b]8;;url"), vec![Token::text("\x1b]8;;url")]);
    }

    #[test]
    fn sgr_params_of_tokens() {
        let tokens = tokenize("\x1b[1;38;5;196m\x1b[m\x1b[2J");
        assert_eq!(tokens[0].sgr_params().unwrap().as_slice(), &[1, 38, 5, 196]);
        assert_eq!(tokens[1].sgr_params().unwrap().as_slice(), &[0]);
        assert!(tokens[2].sgr_params().is_none());
    }

    #[test]
    fn token_constructors() {
        assert_eq!(Token::sgr(&[1, 31]).raw(), "\x1b[1;31m");
        assert_eq!(Token::sgr(&[]).raw(), "\x1b[m");
        assert!(Token::escape("\x1b[0m").is_some());
        assert!(Token::escape("\x1b[0mx").is_none());
        assert!(Token::escape("x").is_none());
        assert_eq!(Token::text("a\u{0333}o").length(), 3);
    }

    #[test]
    fn strip_and_detect() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[39m"), "red");
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
        assert_eq!(strip_ansi("a\x1b"), "a\x1b");
        assert!(contains_ansi("x\x1b[0m"));
        assert!(!contains_ansi("x\x1b[0"));
    }
}
