//! Araneae CLI - intern label files and inspect the resulting atom table.
//! Araneae CLI - 驻留标签文件并查看生成的原子表。

mod commands;
mod labels;
mod output;

use std::path::PathBuf;

use araneae_memory::TableConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "araneae")]
#[command(author, version, about = "Araneae - atom tables for the Araneae reasoner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Table configuration file (JSON). / 表配置文件（JSON）。
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output. / 抑制输出。
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand)]
enum Commands {
    /// Intern labels and print the table. / 驻留标签并打印表。
    Intern {
        /// Label files, one label per line. Reads stdin when empty.
        /// 标签文件，每行一个标签。为空时读取标准输入。
        files: Vec<PathBuf>,

        /// Worker threads. Identities are only reproducible with 1.
        /// 工作线程数。只有为 1 时标识才可复现。
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,

        /// Print the table as JSON. / 以 JSON 格式打印表。
        #[arg(long)]
        json: bool,
    },

    /// Count labels and distinct atoms. / 统计标签与不同原子的数量。
    Stats {
        /// Label files. Reads stdin when empty. / 标签文件。为空时读取标准输入。
        files: Vec<PathBuf>,

        /// Worker threads. / 工作线程数。
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,
    },

    /// Print the label of one identity. / 打印某个标识的标签。
    Resolve {
        /// The identity to resolve. / 要解析的标识。
        id: u32,

        /// Label files. Reads stdin when empty. / 标签文件。为空时读取标准输入。
        files: Vec<PathBuf>,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<TableConfig, String> {
    match path {
        Some(path) => TableConfig::from_file(path)
            .map_err(|e| format!("cannot load config '{}': {}", path.display(), e)),
        None => Ok(TableConfig::default()),
    }
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Commands::Intern { files, jobs, json } => {
            commands::intern::run(&files, jobs, json, &config)
        }
        Commands::Stats { files, jobs } => commands::stats::run(&files, jobs, &config, cli.quiet),
        Commands::Resolve { id, files } => commands::resolve::run(id, &files, &config),
    });

    if let Err(e) = result {
        if !cli.quiet {
            output::error(&e);
        }
        std::process::exit(1);
    }
}
