use clap::{Parser, Subcommand};
use modbundle::config_link::{check_config_link, ConfigLinkOutcome};
use modbundle::copy_script::{build_copy_plan, exclusion_notice, CopyScriptConfig};
use modbundle::logger::initialize_logger;
use modbundle::modules::{collect_modules, render_modules, render_modules_json, ModuleScanConfig};
use modbundle::source::{FileSource, LineSource, StdinSource};
use modbundle::utils::{split_tokens, write_stderr, write_stdout};
use modbundle::BundleError;
use std::path::PathBuf;
use tracing::{debug, error};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    cmd: SubCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    /// Turn installed file paths on stdin into mkdir/cp shell commands
    #[command(alias = "cp-libs")]
    CopyScript(CopyScriptArgs),
    /// Print the module names found under a directory
    #[command(alias = "get-modules")]
    Modules(ModulesArgs),
    /// Remove src/config.js when it links to the wrong build config
    CheckConfig(CheckConfigArgs),
}

#[derive(Parser, Debug, Clone)]
struct CopyScriptArgs {
    #[arg(long, env = "EXCLUDE", default_value = "", help = "Space separated modules to exclude")]
    exclude: String,
    #[arg(long, default_value = "lib")]
    lib_dir: String,
    #[arg(long, help = "Actually drop excluded modules instead of only reporting them")]
    apply_exclude: bool,
}

#[derive(Parser, Debug, Clone)]
struct ModulesArgs {
    base_directory: String,
    input_file: PathBuf,
    name_prefix: Option<String>,
    excluded_names: Option<String>,
    #[arg(long, help = "Print the modules as a JSON array")]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
struct CheckConfigArgs {
    #[arg(allow_negative_numbers = true)]
    dev: i64,
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

async fn run_copy_script(args: CopyScriptArgs) -> Result<(), BundleError> {
    let cwd = std::env::current_dir()?;
    let mut config = CopyScriptConfig::new(cwd.to_string_lossy());
    config.lib_dir = args.lib_dir;
    config.exclude = split_tokens(&args.exclude);
    config.apply_exclude = args.apply_exclude;
    debug!("Copy script config: {:?}", config);

    if let Some(notice) = exclusion_notice(&config.exclude) {
        write_stderr(&notice).await?;
    }

    let lines = StdinSource.read_lines().await?;
    let plan = build_copy_plan(&lines, &config);

    write_stderr(&plan.render_warnings()).await?;
    write_stdout(&plan.render_script()).await
}

async fn run_modules(args: ModulesArgs) -> Result<(), BundleError> {
    let config = ModuleScanConfig::new(
        args.base_directory,
        args.name_prefix,
        args.excluded_names.as_deref(),
    );
    debug!("Module scan config: {:?}", config);

    let lines = FileSource::new(args.input_file).read_lines().await?;
    let modules = collect_modules(&lines, &config);

    let output = if args.json {
        render_modules_json(&modules)?
    } else {
        render_modules(&modules)
    };
    write_stdout(&output).await
}

/// Stdout line for a config check, if the outcome warrants one.
fn config_link_message(outcome: &ConfigLinkOutcome) -> Option<&'static str> {
    match outcome {
        ConfigLinkOutcome::Deleted { previous } => {
            debug!("Removed config link to {:?}", previous);
            Some("delete config ...\n")
        }
        ConfigLinkOutcome::Missing | ConfigLinkOutcome::UpToDate => None,
    }
}

async fn run_check_config(args: CheckConfigArgs) -> Result<(), BundleError> {
    let outcome = check_config_link(&args.root, args.dev).await?;
    match config_link_message(&outcome) {
        Some(message) => write_stdout(message).await,
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let result = match cli_args.cmd {
        SubCommands::CopyScript(args) => run_copy_script(args).await,
        SubCommands::Modules(args) => run_modules(args).await,
        SubCommands::CheckConfig(args) => run_check_config(args).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
