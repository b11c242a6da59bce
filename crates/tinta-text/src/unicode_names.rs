#![forbid(unsafe_code)]

//! Character names for code points.
//!
//! A static table covers the C0 controls, ASCII punctuation and the format,
//! combining and separator characters that show up in terminal text.
//! Letters and digits, CJK unified ideographs, Hangul syllables and
//! variation selectors are named algorithmically. Everything else falls back
//! to a code point label (`<control-0080>`, `<private-use-E000>`,
//! `<noncharacter-FFFF>`) or plain `U+` notation.

use std::borrow::Cow;

const C0_NAMES: [&str; 32] = [
    "NULL",
    "START OF HEADING",
    "START OF TEXT",
    "END OF TEXT",
    "END OF TRANSMISSION",
    "ENQUIRY",
    "ACKNOWLEDGE",
    "BELL",
    "BACKSPACE",
    "CHARACTER TABULATION",
    "LINE FEED (LF)",
    "LINE TABULATION",
    "FORM FEED (FF)",
    "CARRIAGE RETURN (CR)",
    "SHIFT OUT",
    "SHIFT IN",
    "DATA LINK ESCAPE",
    "DEVICE CONTROL ONE",
    "DEVICE CONTROL TWO",
    "DEVICE CONTROL THREE",
    "DEVICE CONTROL FOUR",
    "NEGATIVE ACKNOWLEDGE",
    "SYNCHRONOUS IDLE",
    "END OF TRANSMISSION BLOCK",
    "CANCEL",
    "END OF MEDIUM",
    "SUBSTITUTE",
    "ESCAPE",
    "INFORMATION SEPARATOR FOUR",
    "INFORMATION SEPARATOR THREE",
    "INFORMATION SEPARATOR TWO",
    "INFORMATION SEPARATOR ONE",
];

/// Names of the ASCII characters that are neither letters nor digits.
const ASCII_SYMBOL_NAMES: &[(char, &str)] = &[
    (' ', "SPACE"),
    ('!', "EXCLAMATION MARK"),
    ('"', "QUOTATION MARK"),
    ('#', "NUMBER SIGN"),
    ('$', "DOLLAR SIGN"),
    ('%', "PERCENT SIGN"),
    ('&', "AMPERSAND"),
    ('\'', "APOSTROPHE"),
    ('(', "LEFT PARENTHESIS"),
    (')', "RIGHT PARENTHESIS"),
    ('*', "ASTERISK"),
    ('+', "PLUS SIGN"),
    (',', "COMMA"),
    ('-', "HYPHEN-MINUS"),
    ('.', "FULL STOP"),
    ('/', "SOLIDUS"),
    (':', "COLON"),
    (';', "SEMICOLON"),
    ('<', "LESS-THAN SIGN"),
    ('=', "EQUALS SIGN"),
    ('>', "GREATER-THAN SIGN"),
    ('?', "QUESTION MARK"),
    ('@', "COMMERCIAL AT"),
    ('[', "LEFT SQUARE BRACKET"),
    ('\\', "REVERSE SOLIDUS"),
    (']', "RIGHT SQUARE BRACKET"),
    ('^', "CIRCUMFLEX ACCENT"),
    ('_', "LOW LINE"),
    ('`', "GRAVE ACCENT"),
    ('{', "LEFT CURLY BRACKET"),
    ('|', "VERTICAL LINE"),
    ('}', "RIGHT CURLY BRACKET"),
    ('~', "TILDE"),
    ('\u{7F}', "DELETE"),
];

/// Names of non-ASCII characters common in terminal output, sorted by code point.
const NAMED: &[(char, &str)] = &[
    ('\u{0085}', "NEXT LINE (NEL)"),
    ('\u{00A0}', "NO-BREAK SPACE"),
    ('\u{00AD}', "SOFT HYPHEN"),
    ('\u{0300}', "COMBINING GRAVE ACCENT"),
    ('\u{0301}', "COMBINING ACUTE ACCENT"),
    ('\u{0302}', "COMBINING CIRCUMFLEX ACCENT"),
    ('\u{0303}', "COMBINING TILDE"),
    ('\u{0308}', "COMBINING DIAERESIS"),
    ('\u{030A}', "COMBINING RING ABOVE"),
    ('\u{0332}', "COMBINING LOW LINE"),
    ('\u{0333}', "COMBINING DOUBLE LOW LINE"),
    ('\u{0336}', "COMBINING LONG STROKE OVERLAY"),
    ('\u{200B}', "ZERO WIDTH SPACE"),
    ('\u{200C}', "ZERO WIDTH NON-JOINER"),
    ('\u{200D}', "ZERO WIDTH JOINER"),
    ('\u{200E}', "LEFT-TO-RIGHT MARK"),
    ('\u{200F}', "RIGHT-TO-LEFT MARK"),
    ('\u{2026}', "HORIZONTAL ELLIPSIS"),
    ('\u{2028}', "LINE SEPARATOR"),
    ('\u{2029}', "PARAGRAPH SEPARATOR"),
    ('\u{2060}', "WORD JOINER"),
    ('\u{2714}', "HEAVY CHECK MARK"),
    ('\u{2718}', "HEAVY BALLOT X"),
    ('\u{FEFF}', "ZERO WIDTH NO-BREAK SPACE"),
    ('\u{FFFD}', "REPLACEMENT CHARACTER"),
    ('\u{1F1E9}', "REGIONAL INDICATOR SYMBOL LETTER D"),
    ('\u{1F1EA}', "REGIONAL INDICATOR SYMBOL LETTER E"),
    ('\u{1F467}', "GIRL"),
    ('\u{1F468}', "MAN"),
    ('\u{1F469}', "WOMAN"),
    ('\u{1F600}', "GRINNING FACE"),
];

const CJK_UNIFIED_RANGES: &[(u32, u32)] = &[
    (0x3400, 0x4DBF),
    (0x4E00, 0x9FFF),
    (0x20000, 0x2A6DF),
    (0x2A700, 0x2B739),
    (0x2B740, 0x2B81D),
    (0x2B820, 0x2CEA1),
    (0x2CEB0, 0x2EBE0),
    (0x30000, 0x3134A),
];

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const HANGUL_V_COUNT: u32 = 21;
const HANGUL_T_COUNT: u32 = 28;
const HANGUL_N_COUNT: u32 = HANGUL_V_COUNT * HANGUL_T_COUNT;

const JAMO_L: [&str; 19] = [
    "G", "GG", "N", "D", "DD", "R", "M", "B", "BB", "S", "SS", "", "J", "JJ", "C", "K", "T", "P",
    "H",
];
const JAMO_V: [&str; 21] = [
    "A", "AE", "YA", "YAE", "EO", "E", "YEO", "YE", "O", "WA", "WAE", "OE", "YO", "U", "WEO", "WE",
    "WI", "YU", "EU", "YI", "I",
];
const JAMO_T: [&str; 28] = [
    "", "G", "GG", "GS", "N", "NJ", "NH", "D", "L", "LG", "LM", "LB", "LS", "LT", "LP", "LH", "M",
    "B", "BS", "S", "SS", "NG", "J", "C", "K", "T", "P", "H",
];

/// Look up the name of `c`, falling back to a code point label.
pub(crate) fn name_of(c: char) -> Cow<'static, str> {
    let value = u32::from(c);

    if let Some(name) = C0_NAMES.get(value as usize) {
        return Cow::Borrowed(name);
    }
    if c.is_ascii_uppercase() {
        return Cow::Owned(format!("LATIN CAPITAL LETTER {c}"));
    }
    if c.is_ascii_lowercase() {
        return Cow::Owned(format!("LATIN SMALL LETTER {}", c.to_ascii_uppercase()));
    }
    if c.is_ascii_digit() {
        return Cow::Borrowed(digit_name(c));
    }
    if let Some((_, name)) = ASCII_SYMBOL_NAMES.iter().find(|(symbol, _)| *symbol == c) {
        return Cow::Borrowed(name);
    }
    if let Ok(index) = NAMED.binary_search_by_key(&c, |(named, _)| *named) {
        return Cow::Borrowed(NAMED[index].1);
    }
    if let Some(name) = algorithmic_name(value) {
        return Cow::Owned(name);
    }
    Cow::Owned(label(c))
}

fn digit_name(c: char) -> &'static str {
    match c {
        '0' => "DIGIT ZERO",
        '1' => "DIGIT ONE",
        '2' => "DIGIT TWO",
        '3' => "DIGIT THREE",
        '4' => "DIGIT FOUR",
        '5' => "DIGIT FIVE",
        '6' => "DIGIT SIX",
        '7' => "DIGIT SEVEN",
        '8' => "DIGIT EIGHT",
        _ => "DIGIT NINE",
    }
}

fn algorithmic_name(value: u32) -> Option<String> {
    if CJK_UNIFIED_RANGES
        .iter()
        .any(|&(first, last)| (first..=last).contains(&value))
    {
        return Some(format!("CJK UNIFIED IDEOGRAPH-{value:04X}"));
    }
    if (HANGUL_BASE..=HANGUL_LAST).contains(&value) {
        let index = value - HANGUL_BASE;
        let l = (index / HANGUL_N_COUNT) as usize;
        let v = ((index % HANGUL_N_COUNT) / HANGUL_T_COUNT) as usize;
        let t = (index % HANGUL_T_COUNT) as usize;
        return Some(format!(
            "HANGUL SYLLABLE {}{}{}",
            JAMO_L[l], JAMO_V[v], JAMO_T[t]
        ));
    }
    if (0xFE00..=0xFE0F).contains(&value) {
        return Some(format!("VARIATION SELECTOR-{}", value - 0xFE00 + 1));
    }
    if (0xE0100..=0xE01EF).contains(&value) {
        return Some(format!("VARIATION SELECTOR-{}", value - 0xE0100 + 17));
    }
    None
}

fn label(c: char) -> String {
    let value = u32::from(c);
    let kind = if c.is_control() {
        "control"
    } else if (0xE000..=0xF8FF).contains(&value)
        || (0xF0000..=0xFFFFD).contains(&value)
        || (0x10_0000..=0x10_FFFD).contains(&value)
    {
        "private-use"
    } else if (0xFDD0..=0xFDEF).contains(&value) || value & 0xFFFE == 0xFFFE {
        "noncharacter"
    } else {
        return format!("U+{value:04X}");
    };
    format!("<{kind}-{value:04X}>")
}
