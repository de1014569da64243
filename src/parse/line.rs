// src/parse/line.rs

/// Result of [`parse_command_line`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    /// First token, or empty when parsing in args-only mode (or for empty input).
    pub command: String,
    pub args: Vec<String>,
}

/// Split `input` into a command and its arguments, roughly the way a shell
/// would for simple input.
///
/// Whitespace outside quotes separates tokens and runs of it collapse, so no
/// empty tokens are produced. A `'` or `"` opens a quoted section that ends at
/// the next occurrence of the same character; the quote characters themselves
/// are dropped and the other quote kind is literal inside. A backslash is just
/// a backslash. An unterminated quote silently runs to the end of the input.
///
/// With `args_only`, every token (including the first) is an argument and
/// `command` is empty: use this for argument strings whose command is
/// supplied separately.
pub fn parse_command_line(input: &str, args_only: bool) -> ParsedLine {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    if args_only || tokens.is_empty() {
        return ParsedLine {
            command: String::new(),
            args: tokens,
        };
    }

    let command = tokens.remove(0);
    ParsedLine {
        command,
        args: tokens,
    }
}
