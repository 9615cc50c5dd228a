//commentmd/src/main.rs
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use commentmd::cache::DocumentUri;
use commentmd::overlay::OverlaySet;
use commentmd::paint::{paint, PaintedLine};
use commentmd::settings::{self, Settings, SettingsError};
use commentmd::theme::CategoryStyle;
use commentmd::{Category, Engine, LanguageId, ThemeMode};
use crossterm::style::{Attribute, Color, ContentStyle};

mod logging;

const USAGE: &str = "\
usage: commentmd <file> [options]

options:
  --language ID     host language id (default: from the file extension)
  --cursor LINE     1-based cursor line; its comment block stays raw
  --theme MODE      light | dark
  --json            print the overlay set as JSON instead of a preview
  --settings PATH   settings file (default: <cache>/.commentmd/settings.json)
  --verbose         debug-level logging
  -h, --help        show this help";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliArgs {
    file: PathBuf,
    language: Option<String>,
    /// 0-based.
    cursor: Option<usize>,
    theme: Option<ThemeMode>,
    json: bool,
    settings: Option<PathBuf>,
    verbose: bool,
    help: bool,
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, value: String },
    Io(PathBuf, io::Error),
    Output(io::Error),
    Settings(SettingsError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::MissingValue(flag) => write!(f, "Missing value for {}", flag),
            CliError::InvalidValue { flag, value } => {
                write!(f, "Invalid value for {}: {}", flag, value)
            }
            CliError::Io(path, err) => write!(f, "Cannot read {}: {}", path.display(), err),
            CliError::Output(err) => write!(f, "Cannot write output: {}", err),
            CliError::Settings(err) => write!(f, "{}", err),
            CliError::Json(err) => write!(f, "JSON output failed: {}", err),
        }
    }
}

impl std::error::Error for CliError {}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        CliError::Settings(err)
    }
}

impl CliError {
    fn is_usage(&self) -> bool {
        matches!(
            self,
            CliError::Usage(_) | CliError::MissingValue(_) | CliError::InvalidValue { .. }
        )
    }
}

fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut out = CliArgs::default();
    let mut file: Option<PathBuf> = None;
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if arg.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &'static str| -> Result<String, CliError> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => iter.next().ok_or(CliError::MissingValue(name)),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => out.help = true,
            "--json" => out.json = true,
            "--verbose" | "-v" => out.verbose = true,
            "--language" => out.language = Some(value("--language")?),
            "--settings" => out.settings = Some(PathBuf::from(value("--settings")?)),
            "--theme" => {
                let raw = value("--theme")?;
                out.theme = Some(ThemeMode::parse(&raw).ok_or(CliError::InvalidValue {
                    flag: "--theme",
                    value: raw,
                })?);
            }
            "--cursor" => {
                let raw = value("--cursor")?;
                let line = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|&line| line > 0)
                    .ok_or(CliError::InvalidValue {
                        flag: "--cursor",
                        value: raw,
                    })?;
                out.cursor = Some(line - 1);
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(CliError::Usage(format!("Unknown option: {}", other)));
            }
            _ => {
                if file.is_some() {
                    return Err(CliError::Usage(format!("Unexpected argument: {}", arg)));
                }
                file = Some(PathBuf::from(arg));
            }
        }
    }

    if out.help {
        return Ok(out);
    }
    out.file = file.ok_or_else(|| CliError::Usage("Missing <file>".to_string()))?;
    Ok(out)
}

fn language_for(path: &Path, explicit: Option<&str>) -> String {
    if let Some(id) = explicit {
        return id.to_string();
    }
    LanguageId::from_path(path)
        .map(|lang| lang.language_id().to_string())
        .unwrap_or_else(|| "plaintext".to_string())
}

fn load_settings(args: &CliArgs) -> Result<Settings, CliError> {
    let mut loaded = match &args.settings {
        Some(path) => settings::load_settings_from(path)?,
        None => {
            if let Err(err) = settings::ensure_settings_file() {
                tracing::debug!(error = %err, "settings file not created");
            }
            settings::load_settings().unwrap_or_default()
        }
    };
    if let Some(theme) = args.theme {
        loaded.theme = theme;
    }
    Ok(loaded)
}

fn run(args: CliArgs) -> Result<(), CliError> {
    let settings = load_settings(&args)?;
    let text = std::fs::read_to_string(&args.file)
        .map_err(|err| CliError::Io(args.file.clone(), err))?;
    let language = language_for(&args.file, args.language.as_deref());
    tracing::info!(file = %args.file.display(), language = %language, "rendering");

    let uri = DocumentUri::new(args.file.to_string_lossy());
    let mut engine = Engine::new(settings);
    engine.open(uri.clone(), &language, &text);
    if let Some(line) = args.cursor {
        engine.cursor_moved(&uri, line);
    }
    let set = engine.render(&uri);

    let stdout = io::stdout();
    write_output(&mut stdout.lock(), &text, &set, args.json)
}

fn write_output(
    out: &mut impl Write,
    text: &str,
    set: &OverlaySet,
    json: bool,
) -> Result<(), CliError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, set).map_err(CliError::Json)?;
        writeln!(out).map_err(CliError::Output)?;
        return out.flush().map_err(CliError::Output);
    }

    let lines: Vec<&str> = text.lines().collect();
    let painted = paint(&lines, set);
    write_preview(out, &painted, set).map_err(CliError::Output)
}

fn write_preview(out: &mut impl Write, lines: &[PaintedLine], set: &OverlaySet) -> io::Result<()> {
    let gutter = lines.len().to_string().len();
    let mut gutter_style = ContentStyle::new();
    gutter_style.attributes.set(Attribute::Dim);

    for (idx, line) in lines.iter().enumerate() {
        let number = format!("{:>width$} │ ", idx + 1, width = gutter);
        write!(out, "{}", gutter_style.apply(number))?;
        let background = line.background.and_then(|c| set.style(c)).copied();
        for segment in &line.segments {
            let style = segment_style(&segment.categories, set, background);
            write!(out, "{}", style.apply(segment.text.as_str()))?;
        }
        writeln!(out)?;
    }
    out.flush()
}

fn segment_style(
    categories: &[Category],
    set: &OverlaySet,
    background: Option<CategoryStyle>,
) -> ContentStyle {
    let mut style = ContentStyle::new();
    let layers = background
        .into_iter()
        .chain(categories.iter().filter_map(|c| set.style(*c).copied()));
    for layer in layers {
        if let Some(rgb) = layer.color {
            style.foreground_color = Some(Color::Rgb {
                r: rgb.0,
                g: rgb.1,
                b: rgb.2,
            });
        }
        if let Some(rgb) = layer.background {
            style.background_color = Some(Color::Rgb {
                r: rgb.0,
                g: rgb.1,
                b: rgb.2,
            });
        }
        if layer.bold {
            style.attributes.set(Attribute::Bold);
        }
        if layer.italic {
            style.attributes.set(Attribute::Italic);
        }
        if layer.underline {
            style.attributes.set(Attribute::Underlined);
        }
        if layer.strikethrough {
            style.attributes.set(Attribute::CrossedOut);
        }
        if layer.dim {
            style.attributes.set(Attribute::Dim);
        }
    }
    style
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("commentmd: {}\n\n{}", err, USAGE);
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let logging_guard = logging::init(args.verbose);
    if let (true, Some(guard)) = (args.verbose, &logging_guard) {
        eprintln!("commentmd: logging to {}", guard.log_dir().display());
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "commentmd failed");
            eprintln!("commentmd: {}", err);
            if err.is_usage() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli_args.rs"]
mod tests;
