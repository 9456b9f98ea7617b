//! YAML syntax highlighting for documents printed to a terminal.

use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

const THEME: &str = "base16-ocean.dark";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Color `content` as YAML with terminal escapes.
///
/// Falls back to the plain text when the grammar, the theme or a line
/// cannot be highlighted.
pub fn highlight_yaml(content: &str) -> String {
    let Some(syntax) = SYNTAXES.find_syntax_by_extension("yaml") else {
        return content.to_string();
    };
    let Some(theme) = THEMES.themes.get(THEME) else {
        return content.to_string();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut output = String::with_capacity(content.len() * 2);
    for line in LinesWithEndings::from(content) {
        match highlighter.highlight_line(line, &SYNTAXES) {
            Ok(ranges) => output.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
            Err(e) => {
                tracing::debug!("Highlighting failed: {}", e);
                return content.to_string();
            }
        }
    }
    output.push_str("\x1b[0m");
    output
}
