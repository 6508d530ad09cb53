//! Plain-text hex program loader: one 32-bit instruction word per line,
//! `#`-comments and blank lines allowed, an optional `0x` prefix.

use crate::error::LoadError;
use crate::memory::InstructionMemory;
use itertools::Itertools;

/// Strip a trailing `#`-comment and surrounding whitespace; `None` if
/// nothing but comment/whitespace remains.
fn strip_comment(line: &str) -> Option<&str> {
    let without_comment = &line[..line.find('#').unwrap_or(line.len())];
    let trimmed = without_comment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Parse hex text into a flat list of instruction words, in order.
/// Line numbers in error messages are 1-based.
pub fn parse_hex_program(text: &str) -> Result<Vec<u32>, LoadError> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| strip_comment(line).map(|stripped| (i + 1, stripped)))
        .map(|(line, token)| {
            let digits = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")).unwrap_or(token);
            if digits.len() != 8 {
                return Err(LoadError::BadLineLength {
                    line,
                    text: token.to_string(),
                });
            }
            u32::from_str_radix(digits, 16).map_err(|_| LoadError::BadHexDigit {
                line,
                text: token.to_string(),
            })
        })
        .collect_vec()
        .into_iter()
        .collect()
}

/// Read a hex program from `path` and load it into a fresh
/// [`InstructionMemory`] starting at `start_addr`.
pub fn load_program_file(path: &str, start_addr: u32, imem_size: u32) -> Result<InstructionMemory, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    let words = parse_hex_program(&text)?;
    let mut imem = InstructionMemory::new(start_addr.saturating_sub(start_addr % 4), imem_size);
    imem.load_program(&words, start_addr)
        .map_err(|_| LoadError::OutOfWindow { start: start_addr })?;
    Ok(imem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_hex_lines() {
        let text = "00000013\n00100093\n";
        assert_eq!(parse_hex_program(text).unwrap(), vec![0x0000_0013, 0x0010_0093]);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let text = "# header comment\n\n00000013  # nop\n\n00100093\n";
        assert_eq!(parse_hex_program(text).unwrap(), vec![0x0000_0013, 0x0010_0093]);
    }

    #[test]
    fn accepts_0x_prefix_case_insensitively() {
        let text = "0x00000013\n0X00100093\n";
        assert_eq!(parse_hex_program(text).unwrap(), vec![0x0000_0013, 0x0010_0093]);
    }

    #[test]
    fn reports_1_based_line_number_on_bad_digit() {
        let text = "00000013\nZZZZZZZZ\n";
        let err = parse_hex_program(text).unwrap_err();
        match err {
            LoadError::BadHexDigit { line, .. } => assert_eq!(line, 2),
            other => panic!("expected BadHexDigit, got {other:?}"),
        }
    }

    #[test]
    fn rejects_lines_longer_than_eight_hex_digits() {
        let text = "0000000013\n";
        let err = parse_hex_program(text).unwrap_err();
        assert!(matches!(err, LoadError::BadLineLength { line: 1, .. }));
    }

    #[test]
    fn rejects_lines_shorter_than_eight_hex_digits() {
        let text = "13\n";
        let err = parse_hex_program(text).unwrap_err();
        assert!(matches!(err, LoadError::BadLineLength { line: 1, .. }));
    }

    #[test]
    fn load_program_file_rejects_a_program_too_large_for_the_window() {
        let dir = std::env::temp_dir();
        let path = dir.join("rv32sim_loader_test_tiny.hex");
        std::fs::write(&path, "00000013\n00000013\n00000013\n").unwrap();
        let result = load_program_file(path.to_str().unwrap(), 0, 4);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
