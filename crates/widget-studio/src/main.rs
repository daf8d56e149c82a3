//! Chat Widget Studio: command-line editor entry point.
//!
//! Each invocation is one editing session over one config file: it loads the
//! file (or starts from the defaults if it does not exist), applies one
//! command, and saves.
//!
//! # Usage
//!
//! ```text
//! widget-studio [--config PATH] [--settings PATH] <COMMAND>
//!
//! Commands:
//!   new       Write the default config (refuses to overwrite without --force)
//!   show      Print the config JSON
//!   fields    List every field with its label and value
//!   set       Set one field:            set botName Helper
//!   attach    Embed an image:           attach avatar ./me.png
//!   detach    Clear an image:           detach launcher
//!   check     Report suspicious values
//!   export    Write a self-contained copy with all images embedded
//!   preview   Render the live-preview HTML
//!   reset     Restore the default config
//!   fonts     List the font presets
//!   settings  Show or create the studio settings file
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Description                          |
//! |--------------------------|--------------------------------------|
//! | `WIDGET_STUDIO_CONFIG`   | Config file to edit                  |
//! | `WIDGET_STUDIO_SETTINGS` | Settings file to read                |
//! | `RUST_LOG`               | Log filter; overrides `log_level`    |
//!
//! Logs go to stderr so that `show` and `preview` output can be piped.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use widget_core::domain::image::decode_data_uri;
use widget_core::domain::lint::has_errors;
use widget_core::{ChatWidgetConfig, FieldKey, FontPreset, ImageRef};
use widget_studio::application::preview::render_html;
use widget_studio::application::{ConfigDocument, EditSession};
use widget_studio::infrastructure::{
    load_settings, save_settings, settings_file_path, FsImageSource, JsonFile, StudioSettings,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Chat widget appearance editor.
#[derive(Debug, Parser)]
#[command(
    name = "widget-studio",
    about = "Edit chat widget appearance configs",
    version
)]
struct Cli {
    /// Config file to edit.  Defaults to `default_config` from the settings.
    #[arg(long, short, global = true, env = "WIDGET_STUDIO_CONFIG")]
    config: Option<PathBuf>,

    /// Settings file.  Defaults to the platform settings location.
    #[arg(long, global = true, env = "WIDGET_STUDIO_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the default config to the config file.
    New {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the config JSON.
    Show,
    /// List every field with its label and value.
    Fields,
    /// Set one field, e.g. `set headerColor "#1E90FF"`.
    Set {
        /// camelCase field name.
        field: String,
        value: String,
    },
    /// Embed an image file as the avatar or launcher image.
    Attach { slot: ImageSlot, image: PathBuf },
    /// Clear the avatar or launcher image.
    Detach { slot: ImageSlot },
    /// Report suspicious values.  Exits 1 if any are errors.
    Check,
    /// Write a self-contained copy with local images embedded.
    Export {
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Render the live-preview HTML to a file, or to stdout.
    Preview {
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Restore the default config.
    Reset,
    /// List the font presets.
    Fonts,
    /// Show or create the studio settings file.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsAction {
    /// Print the effective settings.
    Show,
    /// Write the default settings file.
    Init {
        #[arg(long)]
        force: bool,
    },
}

/// Which image field a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImageSlot {
    Avatar,
    Launcher,
}

impl ImageSlot {
    fn field(self) -> FieldKey {
        match self {
            ImageSlot::Avatar => FieldKey::AvatarImage,
            ImageSlot::Launcher => FieldKey::LauncherImage,
        }
    }
}

impl Cli {
    fn config_path(&self, settings: &StudioSettings) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| settings.general.default_config.clone())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Settings choose the default log level, so read them before logging is
    // up and report a failure afterwards.
    let settings = load_settings(cli.settings.as_deref());
    let level = settings
        .as_ref()
        .map(|s| s.general.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(&level);

    let settings = settings.context("failed to load studio settings")?;
    let stdout = std::io::stdout();
    let code = run(cli, &settings, &mut stdout.lock())?;
    Ok(ExitCode::from(code))
}

/// Initialises `tracing` output on stderr.  `RUST_LOG` wins over `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Executes one command and returns the process exit code.
fn run(cli: Cli, settings: &StudioSettings, out: &mut dyn Write) -> anyhow::Result<u8> {
    let path = cli.config_path(settings);
    let file = JsonFile::new(&path);

    match cli.command {
        Command::New { force } => {
            if !force && file.read_text()?.is_some() {
                bail!("{} already exists; pass --force to overwrite it", path.display());
            }
            let mut session = EditSession::create(file);
            session.save()?;
            writeln!(out, "wrote default config to {}", path.display())?;
        }
        Command::Show => {
            let session = open(file)?;
            writeln!(out, "{}", session.to_text())?;
        }
        Command::Fields => {
            let session = open(file)?;
            print_fields(session.config(), out)?;
        }
        Command::Set { field, value } => {
            let mut session = open(file)?;
            let config = session
                .set_field(&field, &value)
                .with_context(|| format!("cannot set {field:?}"))?;
            save_if_changed(&mut session)?;
            let key: FieldKey = field.parse()?;
            writeln!(out, "{key} = {}", summarize(config.get(key)))?;
        }
        Command::Attach { slot, image } => {
            let mut session = open(file)?;
            let source = FsImageSource::new(".", settings.images.max_bytes);
            let config = session
                .attach_image(slot.field(), &image, &source)
                .with_context(|| format!("cannot attach {}", image.display()))?;
            save_if_changed(&mut session)?;
            writeln!(out, "{} = {}", slot.field(), summarize(config.get(slot.field())))?;
        }
        Command::Detach { slot } => {
            let mut session = open(file)?;
            session.detach_image(slot.field())?;
            save_if_changed(&mut session)?;
            writeln!(out, "{} cleared", slot.field())?;
        }
        Command::Check => {
            let session = open(file)?;
            let diagnostics = session.diagnostics();
            if diagnostics.is_empty() {
                writeln!(out, "{}: no problems found", path.display())?;
            }
            for d in &diagnostics {
                writeln!(out, "{d}")?;
            }
            if has_errors(&diagnostics) {
                return Ok(1);
            }
        }
        Command::Export { out: target } => {
            let resolver = FsImageSource::new(file.base_dir(), settings.images.max_bytes);
            let session = open(file)?;
            session
                .export_to(&JsonFile::new(&target), &resolver)
                .with_context(|| format!("cannot export to {}", target.display()))?;
            writeln!(out, "exported to {}", target.display())?;
        }
        Command::Preview { out: target } => {
            let session = open(file)?;
            let html = render_html(session.config());
            match target {
                Some(target) => {
                    write_file(&target, &html)?;
                    info!("preview written to {}", target.display());
                    writeln!(out, "preview written to {}", target.display())?;
                }
                None => write!(out, "{html}")?,
            }
        }
        Command::Reset => {
            let mut session = open(file)?;
            session.reset();
            save_if_changed(&mut session)?;
            writeln!(out, "{} reset to defaults", path.display())?;
        }
        Command::Fonts => {
            for preset in FontPreset::ALL {
                writeln!(out, "{:<14} {}", preset.label(), preset.css_stack())?;
            }
        }
        Command::Settings { action } => {
            let settings_path = match cli.settings {
                Some(p) => p,
                None => settings_file_path()?,
            };
            match action {
                SettingsAction::Show => {
                    writeln!(out, "# {}", settings_path.display())?;
                    write!(out, "{}", toml::to_string_pretty(settings)?)?;
                }
                SettingsAction::Init { force } => {
                    if !force && settings_path.exists() {
                        bail!(
                            "{} already exists; pass --force to overwrite it",
                            settings_path.display()
                        );
                    }
                    save_settings(&StudioSettings::default(), &settings_path)?;
                    writeln!(out, "wrote default settings to {}", settings_path.display())?;
                }
            }
        }
    }
    Ok(0)
}

fn open(file: JsonFile) -> anyhow::Result<EditSession<JsonFile>> {
    let path = file.path().to_path_buf();
    EditSession::open(file).with_context(|| format!("cannot open {}", path.display()))
}

/// Saves unless the file already holds exactly this config.
fn save_if_changed(session: &mut EditSession<JsonFile>) -> anyhow::Result<()> {
    if session.has_unsaved_changes() {
        session.save()?;
    } else {
        info!("config unchanged; nothing written");
    }
    Ok(())
}

fn write_file(path: &Path, text: &str) -> anyhow::Result<()> {
    std::fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))
}

fn print_fields(config: &ChatWidgetConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    for (key, value) in config.fields() {
        writeln!(out, "{:<18} {:<16} {}", key.label(), key.as_str(), summarize(value))?;
    }
    Ok(())
}

/// Shortens data URIs, which can be megabytes long, for terminal output.
fn summarize(value: &str) -> String {
    if let Some((mime, bytes)) = decode_data_uri(value) {
        return format!("<embedded {mime}, {} bytes>", bytes.len());
    }
    match ImageRef::classify(value) {
        ImageRef::Empty => "(none)".to_string(),
        _ => value.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
