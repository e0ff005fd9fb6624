use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vitrine::config::{self, BehaviorConfig};
use vitrine::contact::ScriptedTransport;
use vitrine::document::PageDocument;
use vitrine::output;
use vitrine::page::Page;
use vitrine::render;
use vitrine::script::{self, Script};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Headless behavior layer for static marketing pages")]
#[command(long_about = "\
Headless behavior layer for static marketing pages

A page description (TOML, or JSON by extension) lists the components the
behavior layer drives: carousels, the mobile nav toggle, scroll-spy sections,
modal dialogs, the contact form and copy-to-clipboard buttons.

  title = \"Atelier\"

  [[carousels]]
  id = \"work\"
  autoplay = \"true\"          # data-autoplay
  interval = \"5000\"          # data-interval, milliseconds

  [[carousels.slides]]
  title = \"Kitchen\"
  body = \"A *full* renovation.\"

Scripts are JSON lists of timed host events replayed against the page:

  { \"until\": 20000,
    \"steps\": [{ \"at\": 1500, \"event\": { \"type\": \"nav_toggle\" } }] }

Behavior settings come from vitrine.toml next to the page (or --config).
Run 'vitrine gen-config' to print a documented vitrine.toml.

Set RUST_LOG=debug to trace transitions on stderr.")]
#[command(version)]
struct Cli {
    /// Behavior config file (default: vitrine.toml next to the page)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a page description and list its components
    Check {
        /// Page description (.toml or .json)
        page: PathBuf,
    },
    /// Replay a timed event script against a page
    Simulate {
        /// Page description (.toml or .json)
        page: PathBuf,
        /// Event script (JSON)
        #[arg(long)]
        script: PathBuf,
        /// Print the final state as JSON instead of the frame log
        #[arg(long)]
        json: bool,
    },
    /// Render the page HTML with behavior-controlled attributes filled in
    Render {
        /// Page description (.toml or .json)
        page: PathBuf,
        /// Replay this script before rendering
        #[arg(long)]
        script: Option<PathBuf>,
        /// Write HTML here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock vitrine.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { page } => {
            let doc = PageDocument::load(&page)?;
            resolve_behavior(cli.config.as_deref(), &page)?;
            println!("==> Checking {}", page.display());
            output::print_inventory(&doc);
            println!("==> Page is valid");
        }
        Command::Simulate { page, script, json } => {
            let doc = PageDocument::load(&page)?;
            let behavior = resolve_behavior(cli.config.as_deref(), &page)?;
            let script = Script::load(&script)?;
            let mut live = Page::new(&doc, &behavior, 0)
                .with_transport(ScriptedTransport::new(script.responses.clone()));
            let frames = script::replay(&mut live, &script);
            if json {
                println!("{}", serde_json::to_string_pretty(&live.state())?);
            } else {
                output::print_simulation(&frames, &live.state());
            }
        }
        Command::Render {
            page,
            script,
            output,
        } => {
            let doc = PageDocument::load(&page)?;
            let behavior = resolve_behavior(cli.config.as_deref(), &page)?;
            let live = match script {
                Some(path) => {
                    let script = Script::load(&path)?;
                    let mut live = Page::new(&doc, &behavior, 0)
                        .with_transport(ScriptedTransport::new(script.responses.clone()));
                    script::replay(&mut live, &script);
                    live
                }
                None => Page::new(&doc, &behavior, 0),
            };
            let html = render::render_page(&doc, &live.state()).into_string();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, html)?;
                    println!("==> Wrote {}", path.display());
                }
                None => println!("{}", html),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load behavior settings: `--config` if given, else `vitrine.toml` beside
/// the page (stock defaults when absent).
fn resolve_behavior(
    explicit: Option<&Path>,
    page: &Path,
) -> Result<BehaviorConfig, config::ConfigError> {
    match explicit {
        Some(path) => config::load_config_file(path),
        None => {
            let dir = page.parent().unwrap_or_else(|| Path::new("."));
            let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
            config::load_config(dir)
        }
    }
}
