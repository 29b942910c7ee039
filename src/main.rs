//! digitpad - Terminal Digit Sketchpad
//!
//! Draw a digit with the mouse and send it to a prediction endpoint.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use digitpad::config::{Config, Overrides, ThemeName};
use digitpad::render::ui::{ColorTheme, TerminalUI};
use digitpad::{Application, HttpEndpoint};
use env_logger::{Env, Target};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn cli() -> Command {
    Command::new("digitpad")
        .version(digitpad::VERSION)
        .about("Draw a digit in the terminal and have a web service recognize it")
        .long_about(
            "digitpad opens a 280x280 drawing canvas in the terminal. Draw a digit with the \
             left mouse button, press Enter (or click Submit) to send it as a PNG to the \
             prediction endpoint, and c (or click Clear) to start over.",
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .short('e')
                .value_name("URL")
                .help("Prediction endpoint receiving {\"image\": <data URL>}"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: <config dir>/digitpad/config.toml)"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Color theme: default, monochrome or high-contrast"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds (default: none)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Write logs to this file (filter with RUST_LOG)"),
        )
}

fn overrides_from(matches: &ArgMatches) -> Result<Overrides> {
    let theme = matches
        .get_one::<String>("theme")
        .map(|name| name.parse::<ThemeName>())
        .transpose()?;

    Ok(Overrides {
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        endpoint: matches.get_one::<String>("endpoint").cloned(),
        request_timeout_secs: matches.get_one::<u64>("timeout").copied(),
        theme,
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    })
}

/// The terminal is owned by the UI, so log lines only go somewhere when a file is given.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let overrides = overrides_from(&matches)?;
    let config = Config::load(&overrides)?;

    init_logging(config.log_file.as_deref())?;

    let endpoint = HttpEndpoint::new(&config.endpoint, config.request_timeout)?;
    let ui_renderer = Box::new(TerminalUI::with_theme(ColorTheme::from_name(config.theme))?);
    let mut app = Application::new(config, Arc::new(endpoint), ui_renderer);

    app.run().await?;

    Ok(())
}
