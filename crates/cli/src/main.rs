use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use hintscan_analyzer::AnnotationPolicy;
use hintscan_patcher::{apply_hints, FunctionDescriptor, HintMap, HintProvider};
use hintscan_scanner::{collect_python_files, exclusion_set, scan};

use crate::hints::FileHintProvider;

mod hints;
mod report;

#[derive(Parser)]
#[command(name = "hintscan")]
#[command(about = "Type-hint health scanner and patcher for Python codebases", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a codebase and report functions missing type hints
    Scan(ScanArgs),

    /// Apply inferred hints from a hints file to a file or directory
    Fix(FixArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Root directory (or single file) to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Extra directory names to skip
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Report every function, even those with complete hints
    #[arg(long)]
    force: bool,

    /// Emit the scan result as JSON
    #[arg(long)]
    json: bool,

    /// Annotation validity policy
    #[arg(long, value_enum, default_value_t = PolicyFlag::BareName)]
    policy: PolicyFlag,
}

#[derive(Args)]
struct FixArgs {
    /// Python file or directory to fix
    root: PathBuf,

    /// JSON hints file produced by the inference collaborator
    #[arg(long)]
    hints: PathBuf,

    /// Extra directory names to skip
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Re-apply hints to functions that already have complete hints
    #[arg(long)]
    force: bool,

    /// Compute patches but do not write files
    #[arg(long)]
    dry_run: bool,

    /// Annotation validity policy
    #[arg(long, value_enum, default_value_t = PolicyFlag::BareName)]
    policy: PolicyFlag,
}

#[derive(Copy, Clone, ValueEnum)]
enum PolicyFlag {
    /// Only reject unknown bare lowercase names
    BareName,
    /// Reject unknown bare lowercase names anywhere in the expression
    Recursive,
}

impl PolicyFlag {
    const fn as_domain(self) -> AnnotationPolicy {
        match self {
            PolicyFlag::BareName => AnnotationPolicy::BareName,
            PolicyFlag::Recursive => AnnotationPolicy::Recursive,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Fix(args) => run_fix(args),
    }
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let exclude = exclusion_set(args.exclude);
    let result = scan(&args.root, &exclude, args.force, args.policy.as_domain())
        .with_context(|| format!("Failed to scan {}", args.root.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report::print_scan_report(&result);
    }
    Ok(())
}

fn run_fix(args: FixArgs) -> Result<()> {
    let provider = FileHintProvider::load(&args.hints)?;
    let exclude = exclusion_set(args.exclude);
    let policy = args.policy.as_domain();

    let files = collect_python_files(&args.root, &exclude);
    if files.is_empty() {
        println!("{}", style("No Python files found.").yellow());
        return Ok(());
    }

    let progress = ProgressBar::new(files.len() as u64).with_style(
        ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}")
            .expect("valid progress template"),
    );

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let mut errors: Vec<(String, String)> = Vec::new();

    for file in files {
        progress.set_message(format!("Fixing {}", file.display()));

        match fix_file(&file, &provider, &exclude, args.force, policy, args.dry_run) {
            Ok(outcome) => {
                succeeded += 1;
                for name in outcome.skipped_functions {
                    progress.println(format!(
                        "  {} '{}' in {} — could not infer",
                        style("skipping").yellow(),
                        name,
                        file.display()
                    ));
                }
                if outcome.patched > 0 {
                    let action = if args.dry_run { "Would fix" } else { "Fixed" };
                    progress.println(format!(
                        "  {} {} function(s) in {}",
                        style(action).green(),
                        outcome.patched,
                        file.display()
                    ));
                }
            }
            Err(err) => {
                failed += 1;
                errors.push((file.display().to_string(), err.to_string()));
                progress.println(format!(
                    "  {} {}: {err}",
                    style("error").red(),
                    file.display()
                ));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let verb = if args.dry_run { "Checked" } else { "Fixed" };
    report::print_summary(verb, succeeded, failed, &errors);
    Ok(())
}

struct FixOutcome {
    patched: usize,
    skipped_functions: Vec<String>,
}

/// Scan one file, gather hints for its at-risk functions, and apply them
/// as a single sequential patch. An uninferable function is skipped; the
/// rest of the file is still patched.
fn fix_file(
    file: &PathBuf,
    provider: &dyn HintProvider,
    exclude: &std::collections::HashSet<String>,
    force: bool,
    policy: AnnotationPolicy,
    dry_run: bool,
) -> Result<FixOutcome> {
    let result = scan(file, exclude, force, policy)?;
    if let Some(skipped) = result.skipped.first() {
        anyhow::bail!("{}", skipped.reason);
    }

    let mut jobs: Vec<(FunctionDescriptor, HintMap)> = Vec::new();
    let mut skipped_functions = Vec::new();
    for func in result.at_risk() {
        match provider.infer(func, None) {
            Ok(hints) => jobs.push((func.clone(), hints)),
            Err(_) => skipped_functions.push(func.name.clone()),
        }
    }

    if jobs.is_empty() {
        return Ok(FixOutcome {
            patched: 0,
            skipped_functions,
        });
    }

    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let patched = jobs.len();
    let patch = apply_hints(&source, file, &jobs, policy)?;

    if !dry_run && !patch.is_noop() {
        std::fs::write(file, &patch.patched_source)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        log::debug!("Wrote {}", file.display());
    }

    Ok(FixOutcome {
        patched,
        skipped_functions,
    })
}
