use anyhow::{Context, Result};
use cordscope::{
    config::DEFAULT_DATA_PATH,
    dashboard::{
        command::{parse_command, Command, HELP},
        text::render_text,
    },
    Dashboard, DashboardConfig, DashboardError, YearRange,
};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    info!("startup");

    // ─── 2) load + clean once ────────────────────────────────────────
    let dashboard = Dashboard::new(DashboardConfig::default());
    let bounds = match dashboard.year_bounds() {
        Ok(bounds) => bounds,
        Err(DashboardError::FileNotFound { path }) => {
            error!(path = %path.display(), "dataset missing");
            eprintln!(
                "Error: {} not found. Please ensure the file is in the working directory.",
                DEFAULT_DATA_PATH
            );
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("loading and cleaning the dataset"),
    };
    match bounds {
        Some(bounds) => info!(%bounds, "year range available"),
        None => warn!("cleaned table is empty"),
    }

    // ─── 3) render, then re-render on every slider move ──────────────
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut range: Option<YearRange> = None;
    let mut view = dashboard.render(range)?;
    writeln!(out, "{}", render_text(&view)?)?;
    writeln!(out, "{}", HELP)?;

    for input in io::stdin().lock().lines() {
        let input = input.context("reading stdin")?;
        match parse_command(&input) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(out, "{}", HELP)?,
            Ok(Some(Command::Json)) => {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            }
            Ok(Some(Command::Reset)) => {
                range = None;
                view = dashboard.render(range)?;
                writeln!(out, "{}", render_text(&view)?)?;
            }
            Ok(Some(Command::SetRange(selected))) => {
                range = Some(selected);
                view = dashboard.render(range)?;
                writeln!(out, "{}", render_text(&view)?)?;
            }
            Err(msg) => writeln!(out, "{}\n{}", msg, HELP)?,
        }
        out.flush()?;
    }

    info!("all done");
    Ok(())
}
