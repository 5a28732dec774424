use clap::Parser;
use crossterm::tty::IsTty;
use mgit::audit::AuditLogger;
use mgit::config::Config;
use mgit::error::AppResult;
use mgit::git::discover_default_dir;
use mgit::output::TerminalReporter;
use mgit::{GitExecutor, MultiRepo, run_commands};
use std::env;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mgit",
    about = "Run git status/pull/push/add/commit over several working copies"
)]
struct Cli {
    /// Commit message for `commit`, `fullpush` and `fullsync` [default: "Automatic commit"]
    #[arg(short = 'm', long = "commit_msg", visible_alias = "commit-msg", value_name = "STRING")]
    commit_msg: Option<String>,

    /// Exit with status 1 if a git command fails in any directory
    #[arg(long)]
    strict: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Read settings from this TOML file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// status, pull, push, add, commit, fullpush or fullsync
    command: String,

    /// Working copies to operate on; defaults to the repository containing the current directory
    dirs: Vec<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> AppResult<i32> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let message = config.commit_message(cli.commit_msg);
    let strict = config.strict(cli.strict);
    let color = !cli.no_color
        && config.behavior.color
        && env::var_os("NO_COLOR").is_none()
        && io::stdout().is_tty();

    let mut executor = GitExecutor::new();
    if config.audit.enabled {
        let logger = AuditLogger::with_path(config.audit_log_path()?)?;
        log::debug!("auditing git commands to {}", logger.log_path().display());
        executor = executor.with_audit(logger);
    }

    let dirs = if cli.dirs.is_empty() {
        vec![discover_default_dir(&executor, &env::current_dir()?)]
    } else {
        cli.dirs
    };

    let operator = MultiRepo::new(dirs, executor);
    let mut reporter = TerminalReporter::stdout(color);
    let summary = run_commands(&operator, &[cli.command], &message, &mut reporter);

    let code = summary.exit_code(strict);
    if code != 0 {
        if summary.failures() > 0 {
            eprintln!("{} git command(s) failed", summary.failures());
        }
        if !summary.unknown.is_empty() {
            eprintln!("{} unknown command(s)", summary.unknown.len());
        }
    }
    Ok(code)
}
