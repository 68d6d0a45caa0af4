//! Re-indentation of JSON text.
//!
//! Works on the token stream of already validated JSON: insignificant
//! whitespace is dropped and newlines plus indentation are inserted. String
//! contents, numbers, key order and duplicate keys pass through byte for byte.

/// Indentation unit for one nesting level.
pub const INDENT: &str = "  ";

/// Re-indents valid JSON `text` with [`INDENT`] per level.
///
/// Empty objects and arrays stay on one line (`{}`, `[]`). The result has no
/// trailing newline.
#[must_use]
pub fn reindent(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    // An opening bracket was written and its first member is still pending.
    let mut opened = false;

    for c in text.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            continue;
        }

        if opened && !matches!(c, '}' | ']') {
            opened = false;
            depth += 1;
            newline(&mut out, depth);
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                out.push(c);
                opened = true;
            }
            '}' | ']' => {
                if opened {
                    opened = false;
                } else {
                    depth = depth.saturating_sub(1);
                    newline(&mut out, depth);
                }
                out.push(c);
            }
            ',' => {
                out.push(c);
                newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            _ => out.push(c),
        }
    }

    out
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
