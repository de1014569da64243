// src/parse/block.rs

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace regex"));

/// Split a multiline block into logical command lines.
///
/// - Every physical line is trimmed; blank lines separate commands.
/// - A line ending in `\` continues on the next line: the backslash is
///   dropped and the pieces are joined with a single space.
/// - Runs of whitespace inside an assembled line collapse to one space.
/// - Lines that end up empty are dropped.
///
/// Quotes are not interpreted here; `echo "a   b"` becomes `echo "a b"`.
pub fn split_command_block(input: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();

    for raw in input.lines() {
        let line = raw.trim();

        if line.is_empty() {
            flush(&mut pending, &mut lines);
            continue;
        }

        match line.strip_suffix('\\') {
            Some(head) => {
                pending.push_str(head.trim());
                pending.push(' ');
            }
            None => {
                pending.push_str(line);
                flush(&mut pending, &mut lines);
            }
        }
    }

    flush(&mut pending, &mut lines);
    lines
}

fn flush(pending: &mut String, out: &mut Vec<String>) {
    let collapsed = WHITESPACE_RUN.replace_all(pending.trim(), " ");
    if !collapsed.is_empty() {
        out.push(collapsed.into_owned());
    }
    pending.clear();
}
