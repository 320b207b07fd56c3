use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::{debug, warn};

use crate::color;
use crate::escape::{ColorMode, EscapeSequence};

// Syntax highlighting resources, loaded once per process
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const FALLBACK_THEME: &str = "base16-eighties.dark";

/// Highlight `source` as `lang`, emitting escape codes through the crate's
/// own sequence model so both color modes behave. Unknown languages fall
/// back to the plain-text syntax and unknown themes to a default; neither
/// aborts the render.
pub fn highlight(source: &str, lang: &str, theme_name: &str, mode: ColorMode) -> String {
    let lang = if lang.is_empty() { "text" } else { lang };

    let syntax = SYNTAX_SET.find_syntax_by_token(lang).unwrap_or_else(|| {
        debug!("unknown language: {}, highlighting as plain text", lang);
        SYNTAX_SET.find_syntax_plain_text()
    });

    let theme = THEME_SET.themes.get(theme_name).unwrap_or_else(|| {
        warn!(
            "no such highlight theme: {}, falling back to {}",
            theme_name, FALLBACK_THEME
        );
        &THEME_SET.themes[FALLBACK_THEME]
    });

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::new();

    for line in LinesWithEndings::from(source) {
        match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => {
                for (style, text) in ranges {
                    let eseq = eseq_from_syntect(style, mode);
                    out.push_str(&eseq.stylize(text));
                }
            }
            Err(err) => {
                debug!("highlighter failed on line: {}", err);
                out.push_str(line);
            }
        }
    }

    out.trim_end().to_string()
}

fn eseq_from_syntect(style: syntect::highlighting::Style, mode: ColorMode) -> EscapeSequence {
    let fg = style.foreground;
    let mut eseq = EscapeSequence::with_fg(&color::from_rgb(fg.r, fg.g, fg.b), mode);
    eseq.bold = style.font_style.contains(FontStyle::BOLD);
    eseq.italic = style.font_style.contains(FontStyle::ITALIC);
    eseq.underline = style.font_style.contains(FontStyle::UNDERLINE);
    eseq
}
