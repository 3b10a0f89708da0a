mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "guide-kit")]
#[command(version, about = "Static site generator for bilingual documentation guides", long_about = None)]
struct Cli {
    /// Log library activity at info level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Scaffold a new guide project
    Init {
        /// Path to create the project in
        path: PathBuf,
    },

    /// Validate configuration, navigation and content links
    Validate {
        /// Path to project directory
        path: PathBuf,
    },

    /// Serve pages from source with live reload
    Dev {
        /// Path to project directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "5173")]
        port: u16,
    },

    /// Build the static site
    Build {
        /// Path to project directory
        path: PathBuf,

        /// Output directory (defaults to out_dir from guide.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve a built site directory
    Preview {
        /// Directory produced by `build`
        dir: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "4173")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise RUST_LOG decides
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Init { path } => commands::init::run(path).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Dev { path, port } => commands::dev::run(path, port).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Preview { dir, port } => commands::preview::run(dir, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "guide-kit", &mut io::stdout());
            Ok(())
        }
    }
}
