//! Immediate resolver (C4): a token is decimal, `0x`/`0X`-prefixed hex, or
//! a label reference.

use crate::error::AssembleError;
use crate::labels::{resolve, LabelMap};

fn is_decimal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_hex(token: &str) -> Option<&str> {
    token.strip_prefix("0x").or_else(|| token.strip_prefix("0X"))
}

/// Resolves `token` to a 32-bit signed value, using `labels` for anything
/// that isn't a decimal or `0x`-prefixed hex literal.
pub fn resolve_immediate(
    token: &str,
    labels: &LabelMap,
    line_number: usize,
) -> Result<i32, AssembleError> {
    if is_decimal(token) {
        return token
            .parse::<i32>()
            .map_err(|_| AssembleError::MalformedImmediate {
                line: line_number,
                token: token.to_string(),
            });
    }

    if let Some(hex_digits) = is_hex(token) {
        return u32::from_str_radix(hex_digits, 16)
            .map(|v| v as i32)
            .map_err(|_| AssembleError::MalformedImmediate {
                line: line_number,
                token: token.to_string(),
            });
    }

    resolve(labels, token, line_number).map(|addr| addr as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_decimal_literals() {
        let labels = LabelMap::new();
        assert_eq!(resolve_immediate("42", &labels, 1).unwrap(), 42);
        assert_eq!(resolve_immediate("-7", &labels, 1).unwrap(), -7);
    }

    #[test]
    fn resolves_hex_literals() {
        let labels = LabelMap::new();
        assert_eq!(resolve_immediate("0xFF", &labels, 1).unwrap(), 255);
        assert_eq!(resolve_immediate("0X10", &labels, 1).unwrap(), 16);
    }

    #[test]
    fn resolves_labels() {
        let mut labels = LabelMap::new();
        labels.insert("loop".to_string(), 12);
        assert_eq!(resolve_immediate("loop", &labels, 1).unwrap(), 12);
    }

    #[test]
    fn rejects_undefined_symbol() {
        let labels = LabelMap::new();
        assert!(resolve_immediate("missing", &labels, 1).is_err());
    }
}
