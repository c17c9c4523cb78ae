//! Same-line comment detection.
//!
//! This is not a lexer: it only looks at the line holding a match, so a
//! match inside a multi-line block comment is treated as code unless the
//! line starts with the usual ` * ` continuation.

use std::ops::Range;

/// Comment markers for PHP.
pub const PHP_MARKERS: &[&str] = &["//", "#", "/*"];

/// Comment markers for JavaScript.
pub const JS_MARKERS: &[&str] = &["//", "/*"];

/// Whether the byte offset `pos` in `line` sits inside a comment.
pub fn is_commented(line: &str, pos: usize, markers: &[&str]) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with('*') && !trimmed.starts_with("*/") {
        return true;
    }

    let (blocks, open) = scan_comments(line, markers);
    blocks.iter().any(|b| b.contains(&pos)) || open.map_or(false, |start| start <= pos)
}

/// Byte offset of the first comment marker on the line that is not inside a
/// string literal. A block comment closed on the same line is skipped.
pub fn comment_start(line: &str, markers: &[&str]) -> Option<usize> {
    scan_comments(line, markers).1
}

/// Closed `/* ... */` spans, then the start of a comment running to the end
/// of the line. String literals are skipped.
fn scan_comments(line: &str, markers: &[&str]) -> (Vec<Range<usize>>, Option<usize>) {
    let mut blocks = Vec::new();
    let mut string_char: Option<char> = None;
    let mut escaped = false;
    let mut resume = 0;

    for (i, ch) in line.char_indices() {
        if i < resume {
            continue;
        }
        if escaped {
            escaped = false;
            continue;
        }

        if let Some(quote) = string_char {
            if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                string_char = None;
            }
            continue;
        }

        if ch == '"' || ch == '\'' || ch == '`' {
            string_char = Some(ch);
            continue;
        }

        let rest = &line[i..];
        if let Some(marker) = markers.iter().find(|m| rest.starts_with(**m)) {
            if *marker == "/*" {
                if let Some(end) = rest[2..].find("*/") {
                    resume = i + 2 + end + 2;
                    blocks.push(i..resume);
                    continue;
                }
            }
            return (blocks, Some(i));
        }
    }

    (blocks, None)
}
