use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::escape::{ColorMode, EscapeSequence};

/// Token classes a theme may style. Anything else in a theme file is
/// ignored with a warning.
pub const TOKEN_CLASSES: &[&str] = &[
    "text",
    "heading",
    "emph",
    "strong",
    "block_quote",
    "code",
    "link",
    "image",
    "bullet",
];

pub const DEFAULT_THEME: &str = "native";

/// A named mapping from token class to an attribute spec of the form
/// `"#RRGGBB [bg:#RRGGBB] [bold] [underline] [italic]"`, plus the syntect
/// theme used for code-block highlighting.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub styles: HashMap<String, String>,
    pub highlight: String,
}

/// On-disk theme format for `--theme-file`. Missing classes inherit the
/// default theme.
#[derive(Debug, Deserialize)]
struct ThemeFile {
    styles: HashMap<String, String>,
    #[serde(default)]
    highlight: Option<String>,
}

// based on solarized dark
const NATIVE: &[(&str, &str)] = &[
    ("text", ""),
    ("heading", "#cb4b16 bold"), // orange
    ("emph", "italic"),
    ("strong", "bold"),
    ("block_quote", "italic"),
    ("code", "#af8700"), // yellow
    ("link", "#0087ff"),
    ("image", "#0087ff"),
    ("bullet", "#268bd2 bold"), // blue
];

const SOLARIZED: &[(&str, &str)] = &[
    ("text", ""),
    ("heading", "#b58900 bold"),
    ("emph", "italic"),
    ("strong", "bold"),
    ("block_quote", "#586e75 italic"),
    ("code", "#2aa198"),
    ("link", "#268bd2"),
    ("image", "#268bd2"),
    ("bullet", "#cb4b16 bold"),
];

const GITHUB: &[(&str, &str)] = &[
    ("text", ""),
    ("heading", "#0550ae bold"),
    ("emph", "italic"),
    ("strong", "bold"),
    ("block_quote", "#57606a italic"),
    ("code", "#cf222e"),
    ("link", "#0969da underline"),
    ("image", "#0969da"),
    ("bullet", "#8250df bold"),
];

impl Theme {
    fn from_table(name: &str, table: &[(&str, &str)], highlight: &str) -> Self {
        Self {
            name: name.to_string(),
            styles: table
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            highlight: highlight.to_string(),
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "native" => Some(Self::from_table("native", NATIVE, "base16-eighties.dark")),
            "solarized" => Some(Self::from_table("solarized", SOLARIZED, "Solarized (dark)")),
            "github" => Some(Self::from_table("github", GITHUB, "InspiredGitHub")),
            _ => None,
        }
    }

    /// Look up a built-in theme by name. An unknown name is non-fatal:
    /// it logs a warning and substitutes the default theme.
    pub fn load(name: &str) -> Self {
        Self::builtin(name).unwrap_or_else(|| {
            warn!("no such theme: {}, falling back to {}", name, DEFAULT_THEME);
            Self::builtin(DEFAULT_THEME).unwrap_or_else(|| Self {
                name: DEFAULT_THEME.to_string(),
                styles: HashMap::new(),
                highlight: String::new(),
            })
        })
    }

    /// Load a user theme from a JSON file. Unknown token classes are
    /// dropped with a warning; classes the file does not mention inherit
    /// the default theme's values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file {}", path.display()))?;
        let file: ThemeFile = serde_json::from_str(&content)
            .with_context(|| format!("invalid theme file {}", path.display()))?;

        let mut theme = Self::load(DEFAULT_THEME);
        theme.name = path.display().to_string();

        for (class, spec) in file.styles {
            if TOKEN_CLASSES.contains(&class.as_str()) {
                theme.styles.insert(class, spec);
            } else {
                warn!("ignoring unknown token class in theme file: {}", class);
            }
        }
        if let Some(highlight) = file.highlight {
            theme.highlight = highlight;
        }

        Ok(theme)
    }

    /// The attribute spec for a token class, empty when the theme does not
    /// define one.
    pub fn spec(&self, class: &str) -> &str {
        self.styles.get(class).map(String::as_str).unwrap_or("")
    }
}

/// Parse an attribute spec string into an escape sequence. Unrecognized
/// words are ignored, so a sloppy theme degrades instead of failing.
pub fn parse_spec(spec: &str, mode: ColorMode) -> EscapeSequence {
    let mut eseq = EscapeSequence::plain(mode);

    for word in spec.split_whitespace() {
        if let Some(bg) = word.strip_prefix("bg:") {
            eseq.set_bg(bg);
        } else if word.starts_with('#') {
            eseq.set_fg(word);
        } else {
            match word {
                "bold" => eseq.bold = true,
                "underline" => eseq.underline = true,
                "italic" => eseq.italic = true,
                _ => {}
            }
        }
    }

    eseq
}
