use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use folio::app::App;
use folio::config::{Config, default_config_path};
use folio::content::Portfolio;
use folio::error::AppResult;
use folio::logging::{self, log_target};
use folio::page::build_document;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Terminal portfolio with scroll-synced section navigation")]
struct Cli {
    /// Config file; defaults to $FOLIO_CONFIG_PATH or the platform config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Portfolio content (TOML). The built-in demo is used when omitted.
    #[arg(long)]
    content: Option<PathBuf>,
    /// Write logs to this file instead of the configured one.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Print the section outline and exit without entering the TUI.
    #[arg(long)]
    dump: bool,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let target = log_target(&config.log, cli.log_file.as_deref(), !cli.dump);
    logging::init(&config.log, &target)?;
    if let Some(path) = cli.config.clone().or_else(default_config_path) {
        tracing::info!(path = %path.display(), "config resolved");
    }
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }

    let portfolio = match cli.content.as_deref() {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading content");
            Portfolio::load_from_path(path)?
        }
        None => Portfolio::demo(),
    };

    if cli.dump {
        print!("{}", outline(&portfolio)?);
        return Ok(());
    }

    let mut app = App::new(&portfolio, config, Instant::now())?;
    app.run().await
}

/// Section order, ids, paths and row extents of the fully mounted page.
fn outline(portfolio: &Portfolio) -> AppResult<String> {
    let (registry, views) = build_document(portfolio)?;
    let mut out = String::new();
    let mut top = 0;
    for view in &views {
        let section = &view.section;
        let rows = view.rows();
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\trows {}..{}",
            section.dom_order,
            section.id,
            section.path,
            section.title,
            top,
            top + rows
        );
        top += rows;
    }
    let _ = writeln!(out, "{} sections, {} rows", registry.len(), top);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use folio::content::Portfolio;

    use super::{Cli, outline};

    #[test]
    fn cli_accepts_all_flags() {
        let cli = Cli::try_parse_from([
            "folio",
            "--config",
            "c.toml",
            "--content",
            "me.toml",
            "--log-file",
            "folio.log",
            "--dump",
        ])
        .expect("flags should parse");
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert_eq!(cli.content, Some(PathBuf::from("me.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("folio.log")));
        assert!(cli.dump);
    }

    #[test]
    fn cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["folio", "extra"]).is_err());
    }

    #[test]
    fn outline_lists_sections_in_page_order() {
        let text = outline(&Portfolio::demo()).expect("outline");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("0\thome\t/\tHome\trows 0.."));
        assert!(lines[4].starts_with("4\tcertifications\t/certifications"));
        assert!(lines[5].starts_with("5 sections"));
    }
}
