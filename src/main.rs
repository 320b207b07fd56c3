use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mdterm::escape::EscapeSequence;
use mdterm::{ColorMode, RenderOptions};

fn main() -> Result<()> {
    let matches = Command::new("mdterm")
        .about("Render markdown to the terminal as styled text")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("input")
                .help("Input markdown file ('-' or absent for stdin)")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output to a file, stdout by default"),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .value_parser(clap::value_parser!(usize))
                .help("Rewrap paragraphs to this width before rendering"),
        )
        .arg(
            Arg::new("no-soft-wrap")
                .long("no-soft-wrap")
                .action(ArgAction::SetTrue)
                .help("Render soft line breaks as spaces instead of newlines"),
        )
        .arg(
            Arg::new("style")
                .short('s')
                .long("style")
                .help("Theme name (default: native, env: MDTERM_STYLE)"),
        )
        .arg(
            Arg::new("theme-file")
                .long("theme-file")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Load the theme from a JSON file"),
        )
        .arg(
            Arg::new("no-true-color")
                .long("no-true-color")
                .action(ArgAction::SetTrue)
                .help("Quantize colors to the 256-color palette"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Show extra info"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Show less info"),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        "mdterm=debug"
    } else if matches.get_flag("quiet") {
        "mdterm=error"
    } else {
        "mdterm=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    let markdown = read_input(matches.get_one::<String>("input").map(String::as_str))?;

    let options = RenderOptions {
        output_width: resolve_width(matches.get_one::<usize>("width").copied()),
        soft_wrap: !matches.get_flag("no-soft-wrap"),
        theme_name: matches
            .get_one::<String>("style")
            .cloned()
            .or_else(|| env::var("MDTERM_STYLE").ok())
            .unwrap_or_else(|| mdterm::theme::DEFAULT_THEME.to_string()),
        theme_file: matches.get_one::<PathBuf>("theme-file").cloned(),
        color_mode: resolve_color_mode(matches.get_flag("no-true-color")),
    };

    let mut out: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("failed to create {}", path))?,
        ),
        None => Box::new(io::stdout()),
    };

    let result = mdterm::render(&markdown, &options, &mut out);

    // hand the terminal back in a known state, including on error unwind
    if result.is_err() || !markdown.is_empty() {
        out.write_all(EscapeSequence::full_reset_string().as_bytes())?;
        out.flush()?;
    }

    result
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some("-") | None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {}", path)),
    }
}

/// CLI width wins; otherwise fall back to the MDTERM_WIDTH or MANWIDTH
/// environment variables. The floor itself is enforced by the renderer
/// options.
fn resolve_width(cli_width: Option<usize>) -> Option<usize> {
    if cli_width.is_some() {
        return cli_width;
    }

    for key in ["MDTERM_WIDTH", "MANWIDTH"] {
        if let Ok(value) = env::var(key) {
            if let Ok(width) = value.parse::<usize>() {
                debug!("using envvar {} to set width to {}", key, width);
                return Some(width);
            }
        }
    }

    None
}

fn resolve_color_mode(no_true_color: bool) -> ColorMode {
    if no_true_color {
        return ColorMode::Indexed;
    }

    match env::var("MDTERM_TRUECOLOR").ok().as_deref() {
        Some("0") | Some("false") | Some("no") => ColorMode::Indexed,
        _ => ColorMode::TrueColor,
    }
}
