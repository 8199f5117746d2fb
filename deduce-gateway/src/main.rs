use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use deduce::{gateway, DeduceConfig, SessionManager};
use notation::{parse_display, render_canonical, render_display};

#[derive(Parser)]
#[command(name = "deduce-gateway")]
#[command(version)]
#[command(about = "Deduction session service and rule-notation tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP session service.
    Serve(ServeArgs),
    /// Search a display-notation rule file to a fixed point and print every known rule.
    Derive(DeriveArgs),
    /// Convert a display-notation rule file to another notation.
    Translate(TranslateArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// TOML config file; flags below override its values.
    #[arg(long, env = "DEDUCE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    bind_addr: Option<String>,

    #[arg(long)]
    snapshot_path: Option<PathBuf>,

    #[arg(long)]
    snapshot_interval_secs: Option<u64>,
}

#[derive(Parser)]
struct DeriveArgs {
    #[arg(long, default_value = "16")]
    limit: i64,

    /// Stop after this many search passes even without a fixed point.
    #[arg(long, default_value = "1000")]
    max_passes: usize,

    file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Notation {
    Display,
    Canonical,
}

#[derive(Parser)]
struct TranslateArgs {
    #[arg(long, value_enum, default_value = "canonical")]
    to: Notation,

    file: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Derive(args) => derive(args),
        Commands::Translate(args) => translate(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(args: ServeArgs) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => DeduceConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => DeduceConfig::default(),
    };
    if let Some(bind_addr) = args.bind_addr {
        config.server.bind_addr = bind_addr;
    }
    if let Some(path) = args.snapshot_path {
        config.snapshot.path = path;
    }
    if let Some(secs) = args.snapshot_interval_secs {
        config.snapshot.interval_secs = secs;
    }
    gateway::start(config).await.map_err(|e| e.to_string())
}

fn read_file(path: &PathBuf) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn derive(args: DeriveArgs) -> Result<(), String> {
    let pool = parse_display(&read_file(&args.file)?).map_err(|e| e.to_string())?;
    let manager = SessionManager::default();
    let id = manager.create_session(args.limit).map_err(|e| e.to_string())?;

    let input: Vec<String> = pool.iter().map(notation::display_rule).collect();
    manager.add_lines(&id, &input).map_err(|e| e.to_string())?;
    let derived = manager
        .derive_to_fixed_point(&id, args.max_passes)
        .map_err(|e| e.to_string())?;
    tracing::info!("[Derive] {} new rules", derived.len());

    let lines = manager.get_lines(&id).map_err(|e| e.to_string())?;
    println!("{}", lines.join("\n\n"));
    Ok(())
}

fn translate(args: TranslateArgs) -> Result<(), String> {
    let pool = parse_display(&read_file(&args.file)?).map_err(|e| e.to_string())?;
    let rendered = match args.to {
        Notation::Display => render_display(&pool),
        Notation::Canonical => render_canonical(&pool),
    };
    println!("{}", rendered);
    Ok(())
}
