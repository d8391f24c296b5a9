use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use treepack::config::{
    OutputTarget, PackConfig, ScanConfig, UnpackConfig, WatcherConfig, DEFAULT_MAX_FILE_SIZE,
};
use treepack::errors::TreepackError;
use treepack::logger::initialize_logger;
use treepack::watch::watch_clipboard;
use treepack::{pack_directory, unpack_bundle, DirectoryWriter};
use treepack_format::estimate_tokens;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    cmd: SubCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    /// Bundle a directory into one text file
    Pack(PackArgs),
    /// Recreate files from bundle text
    Unpack(UnpackArgs),
    /// Unpack bundles as they appear on the clipboard
    Watch(WatchArgs),
    /// Print an approximate token estimate
    Tokens(TokensArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    #[arg(default_value = ".")]
    root: PathBuf,
    #[arg(short = 'o', long, help = "Write the bundle to a file instead of stdout")]
    output: Option<PathBuf>,
    #[arg(short = 'c', long, conflicts_with = "output", help = "Copy the bundle to the clipboard")]
    clipboard: bool,
    #[arg(long, env = "TREEPACK_MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,
    #[arg(long = "exclude", help = "Glob patterns to exclude (e.g., 'docs/*.md')")]
    exclude_patterns: Vec<String>,
    #[arg(long = "ignore-dir", help = "Extra directory names to skip anywhere in the tree")]
    ignore_dirs: Vec<String>,
    #[arg(long, help = "Do not read .gitignore at the root")]
    no_gitignore: bool,
    #[arg(long, help = "Do not prefix paths with the root folder name")]
    no_root_prefix: bool,
    #[arg(short = 's', long)]
    no_stats: bool,
}

#[derive(Parser, Debug, Clone)]
struct UnpackArgs {
    #[arg(help = "Bundle file to read; stdin when omitted")]
    input: Option<PathBuf>,
    #[arg(short = 'c', long, conflicts_with = "input", help = "Read the bundle from the clipboard")]
    clipboard: bool,
    #[arg(short = 'd', long, env = "TREEPACK_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,
    #[arg(short = 'n', long, help = "Folder name to unpack into")]
    name: Option<String>,
    #[arg(long, default_value = "./logs")]
    logs_path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
struct WatchArgs {
    #[arg(short = 'd', long, env = "TREEPACK_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,
    #[arg(short = 'i', long, default_value_t = 1000)]
    interval_ms: u64,
    #[arg(long, default_value = "./logs")]
    logs_path: PathBuf,
    #[arg(long, help = "Skip clipboard text that starts with the bundle header")]
    skip_packed: bool,
    #[arg(long, help = "Run once and exit instead of watching continuously")]
    once: bool,
}

#[derive(Parser, Debug, Clone)]
struct TokensArgs {
    #[arg(help = "File to estimate; stdin when omitted")]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let result = match cli_args.cmd {
        SubCommands::Pack(args) => run_pack(args).await,
        SubCommands::Unpack(args) => run_unpack(args).await,
        SubCommands::Watch(args) => run_watch(args).await,
        SubCommands::Tokens(args) => run_tokens(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_pack(args: PackArgs) -> Result<(), TreepackError> {
    let output = match (args.output, args.clipboard) {
        (Some(path), _) => OutputTarget::File(path),
        (None, true) => OutputTarget::Clipboard,
        (None, false) => OutputTarget::Stdout,
    };
    let config = PackConfig {
        root: args.root,
        scan: ScanConfig {
            max_file_size: args.max_file_size,
            use_ignore_file: !args.no_gitignore,
            exclude_patterns: args.exclude_patterns,
            extra_ignored_dirs: args.ignore_dirs,
        },
        output,
        no_stats: args.no_stats,
        root_prefix: !args.no_root_prefix,
    };
    let outcome = pack_directory(config).await?;
    info!(
        "Suggested bundle name: {}.txt ({} unreadable files skipped)",
        outcome.project_name,
        outcome.scan.unreadable.len()
    );
    Ok(())
}

async fn run_unpack(args: UnpackArgs) -> Result<(), TreepackError> {
    let text = if args.clipboard {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| TreepackError::ClipboardInitError(e.to_string()))?;
        clipboard
            .get_text()
            .map_err(|e| TreepackError::ClipboardReadError(e.to_string()))?
    } else {
        read_input(args.input.as_ref()).await?
    };

    let config = UnpackConfig {
        out_dir: args.out_dir,
        name: args.name,
        logs_path: args.logs_path,
    };
    let writer = DirectoryWriter::new(config.out_dir.clone());
    let report = unpack_bundle(&writer, &text, &config).await?;
    println!(
        "{} into {}",
        report.summary(),
        report.write.root.display()
    );
    if let Some(path) = report.diagnostics {
        println!("Write failures logged to {}", path.display());
    }
    Ok(())
}

async fn run_watch(args: WatchArgs) -> Result<(), TreepackError> {
    info!("Starting Clipboard Watcher");
    let config = WatcherConfig {
        interval_ms: args.interval_ms,
        unpack: UnpackConfig {
            out_dir: args.out_dir,
            name: None,
            logs_path: args.logs_path,
        },
        once: args.once,
        skip_packed: args.skip_packed,
    };
    watch_clipboard(config).await?;
    info!("Clipboard Watcher has stopped.");
    Ok(())
}

async fn run_tokens(args: TokensArgs) -> Result<(), TreepackError> {
    let text = read_input(args.input.as_ref()).await?;
    println!("~{} tokens (approximate)", estimate_tokens(&text));
    Ok(())
}

async fn read_input(path: Option<&PathBuf>) -> Result<String, TreepackError> {
    match path {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
