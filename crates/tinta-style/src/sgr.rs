#![forbid(unsafe_code)]

//! SGR (Select Graphic Rendition) sequence encoding and parameter parsing.
//!
//! # Sequence Reference
//!
//! | Sequence | Description |
//! |----------|-------------|
//! | `ESC [ m` | reset (same as `ESC [ 0 m`) |
//! | `ESC [ n ; n ; ... m` | apply each parameter left to right |
//! | `ESC [ 38 ; 5 ; n m` | 256-color foreground |
//! | `ESC [ 38 ; 2 ; r ; g ; b m` | true color foreground |
//! | `ESC [ 38 : 2 : cs : r : g : b m` | true color foreground, sub-parameter form |
//! | `ESC [ 4 : n m` | underline style `n` (0 switches it off) |

use smallvec::SmallVec;
use std::fmt::Write as _;

/// The escape character, sole introducer of escape sequences.
pub const ESC: char = '\x1b';

/// Control Sequence Introducer: `ESC [`
pub const CSI: &str = "\x1b[";

/// Final byte of an SGR sequence.
pub const SGR_FINAL: char = 'm';

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &str = "\x1b[0m";

/// Parameter list of one SGR sequence.
pub type SgrParams = SmallVec<[u16; 8]>;

/// Error raised while parsing an SGR parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SgrParseError {
    /// A parameter contained something other than ASCII digits.
    InvalidParameter { value: String, position: usize },
    /// A parameter does not fit into 16 bits.
    ParameterOverflow { value: String, position: usize },
}

impl std::fmt::Display for SgrParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter { value, position } => {
                write!(f, "invalid SGR parameter '{value}' at position {position}")
            }
            Self::ParameterOverflow { value, position } => {
                write!(f, "SGR parameter '{value}' at position {position} is out of range")
            }
        }
    }
}

impl std::error::Error for SgrParseError {}

/// Parse the parameter part of an SGR sequence (the text between `ESC [` and `m`).
///
/// Parameters are separated by `;`; empty parameters count as `0`, so an
/// empty body yields `[0]` (a reset). A parameter with `:` sub-parameters
/// describes one attribute and is rewritten to its `;` form:
///
/// | Group | Result |
/// |-------|--------|
/// | `4:0` | `24` |
/// | `4:2` | `21` |
/// | `4:n` (other styles) | `4` |
/// | `38:5:n`, `48:5:n`, `58:5:n` | `38;5;n` ... |
/// | `38:2:[cs]:r:g:b`, `38:2:r:g:b` | `38;2;r;g;b` ... |
///
/// Any other or incomplete colon group yields nothing, so it leaves the
/// style untouched.
///
/// # Errors
/// Returns [`SgrParseError`] if a parameter is not a decimal number or does
/// not fit into a `u16`.
pub fn parse_sgr_params(body: &str) -> Result<SgrParams, SgrParseError> {
    let mut params = SgrParams::new();
    let mut position = 0;
    for group in body.split(';') {
        if group.contains(':') {
            let mut subparams = SgrParams::new();
            let mut sub_position = position;
            for value in group.split(':') {
                subparams.push(parse_param(value, sub_position)?);
                sub_position += value.len() + 1;
            }
            push_colon_group(&subparams, &mut params);
        } else {
            params.push(parse_param(group, position)?);
        }
        position += group.len() + 1;
    }
    Ok(params)
}

fn parse_param(value: &str, position: usize) -> Result<u16, SgrParseError> {
    if value.is_empty() {
        return Ok(0);
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SgrParseError::InvalidParameter {
            value: value.to_string(),
            position,
        });
    }
    value
        .parse::<u16>()
        .map_err(|_| SgrParseError::ParameterOverflow {
            value: value.to_string(),
            position,
        })
}

/// Append the `;` form of one colon-separated attribute.
fn push_colon_group(subparams: &[u16], out: &mut SgrParams) {
    match subparams {
        [4, 0, ..] => out.push(24),
        [4, 2, ..] => out.push(21),
        [4, ..] => out.push(4),
        [code @ (38 | 48 | 58), 5, index, ..] => out.extend([*code, 5, *index]),
        [code @ (38 | 48 | 58), 2, _, r, g, b, ..]
        | [code @ (38 | 48 | 58), 2, r, g, b] => out.extend([*code, 2, *r, *g, *b]),
        _ => {}
    }
}

/// Append an SGR sequence for `params` to `out`.
///
/// Writes nothing if `params` is empty: an empty SGR sequence would mean
/// "reset", which is never what an empty parameter list asks for here.
pub fn write_sgr(out: &mut String, params: &[u16]) {
    let Some((first, rest)) = params.split_first() else {
        return;
    };
    out.push_str(CSI);
    let _ = write!(out, "{first}");
    for param in rest {
        let _ = write!(out, ";{param}");
    }
    out.push(SGR_FINAL);
}

/// Render an SGR sequence for `params` into a new string.
#[must_use]
pub fn sgr_sequence(params: &[u16]) -> String {
    let mut out = String::with_capacity(2 + params.len() * 3);
    write_sgr(&mut out, params);
    out
}
