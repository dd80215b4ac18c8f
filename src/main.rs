use anyhow::{Context, Result};
use bus::page_channel;
use clap::Parser;
use mimalloc::MiMalloc;
use popup::{CLEARED_LABEL, Popup, PopupConfig};
use runtime_page::start_page_runtime;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "multifind")]
#[command(about = "Highlight keywords in an HTML page and count the matches", long_about = None)]
#[command(version)]
struct Cli {
    /// HTML page to search
    page: PathBuf,

    /// Keyword to add to the saved list (repeatable)
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// Clear the highlights and the saved list after searching
    #[arg(long)]
    clear: bool,

    /// TOML config with `palette` and `store_path`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the resulting page here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => PopupConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PopupConfig::default(),
    };

    let source = std::fs::read_to_string(&cli.page)
        .with_context(|| format!("reading {}", cli.page.display()))?;
    let document = html::parse_document(&source);

    let mut popup = Popup::open(config).context("opening keyword store")?;
    for keyword in &cli.keywords {
        if !popup.add_keyword(keyword)? {
            log::info!("skipping keyword {keyword:?}: blank or already listed");
        }
    }

    let (client, rx) = page_channel();
    let page = start_page_runtime(document, rx);

    let summary = popup.search(&client).context("highlighting page")?;
    for (index, (keyword, _)) in summary.rows().iter().enumerate() {
        if let Some(label) = summary.count_label(index) {
            eprintln!("{keyword}: {label}");
        }
    }
    eprintln!("{}", summary.total_label());

    if cli.clear {
        popup.clear_all(&client).context("clearing page")?;
        eprintln!("{CLEARED_LABEL}");
    }

    drop(client);
    let document = page
        .join()
        .map_err(|_| anyhow::anyhow!("page runtime panicked"))?;
    let output = html::outer_html(&document, document.root());

    match &cli.out {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{output}"),
    }
    Ok(())
}
