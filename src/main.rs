//! Docgrade: Documentation Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use docgrade::analyzer::BatchStats;
use docgrade::config::{build_ignore_set, is_ignored, load_config, write_starter_config};
use docgrade::reporter::{ConsoleReporter, JsonReporter, MarkdownReporter};
use docgrade::store::ReportStore;
use docgrade::{critique, DocumentFeatures, DocumentationAnalyzer, OverallReport};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;

const STDIN_PATH: &str = "-";

/// Docgrade: score scraped documentation pages for readability, structure, completeness and style
#[derive(Parser, Debug)]
#[command(name = "docgrade")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Feature-record JSON file, directory of them, or - for stdin
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short, conflicts_with = "markdown")]
    json: bool,

    /// Output format as Markdown
    #[arg(long, short)]
    markdown: bool,

    /// Minimum overall score (exit 1 if any page scores below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Quiet mode (one line per page)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (all suggestions, critique commentary, debug logs)
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .docgraderc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the language-model critique
    #[arg(long)]
    no_critique: bool,

    /// Run the four analyzers concurrently
    #[arg(long)]
    parallel: bool,

    /// Save per-page reports and a batch summary under this directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .docgraderc.json with default settings
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(Commands::Init { dir }) = args.command {
        return run_init(dir.as_deref());
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("PATH is required when not using a subcommand");
    };
    let from_stdin = path.as_os_str() == STDIN_PATH;

    // Resolve work directory for config search
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let work_dir = if from_stdin {
        cwd.clone()
    } else if path.is_file() {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone())
    } else {
        path.clone()
    };

    // Load config (CLI flags override config file)
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(
        args.threshold,
        args.no_critique,
        args.parallel,
    );

    let critic = critique::from_config(&config.critique);
    let analyzer = DocumentationAnalyzer::from_config(&config, critic);

    let (mut reports, had_errors) = if from_stdin {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read feature record from stdin")?;
        let features =
            DocumentFeatures::from_json(&json).context("Invalid feature record on stdin")?;
        let mut report = analyzer.analyze(&features);
        report.document.source = Some("<stdin>".to_string());
        (vec![report], false)
    } else {
        let ignore_set = if config.ignore.is_empty() {
            None
        } else {
            Some(build_ignore_set(&config.ignore)?)
        };
        let files = collect_feature_files(&path, ignore_set.as_ref())?;
        if files.is_empty() {
            eprintln!("{}: No feature records found", "Warning".yellow());
            return Ok(ExitCode::from(2));
        }
        if path.is_file() {
            // A single named file fails loudly
            let report = analyze_path(&analyzer, &files[0])?;
            (vec![report], false)
        } else {
            analyze_files(&analyzer, &files, config.is_parallel(), args.quiet)
        }
    };

    if reports.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    // Keep batch order stable regardless of how the files were analyzed
    reports.sort_by(|a, b| a.document.source.cmp(&b.document.source));
    let stats = BatchStats::from_reports(&reports);

    if let Some(ref output_dir) = args.output_dir {
        save_reports(output_dir, &reports, args.quiet)?;
    }

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(&reports, &stats));
        }
    } else if args.markdown {
        let reporter = MarkdownReporter::new();
        if reports.len() == 1 {
            print!("{}", reporter.report(&reports[0]));
        } else {
            let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            print!("{}", reporter.report_many(&reports, &stats, &generated_at));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in &reports {
            reporter.report_quiet(report);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            reporter.report_many(&reports, &stats);
        }
    }

    // Check threshold (config or CLI)
    if let Some(threshold) = config.threshold {
        let failing: Vec<&OverallReport> = reports
            .iter()
            .filter(|r| r.overall_score < threshold)
            .collect();
        if !failing.is_empty() {
            if !args.quiet && !args.json && !args.markdown {
                for report in &failing {
                    eprintln!(
                        "{}: {} scored {:.1}, below threshold {:.1}",
                        "Failed".red().bold(),
                        report.document.label(),
                        report.overall_score,
                        threshold
                    );
                }
            }
            return Ok(ExitCode::from(1));
        }
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_init(dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);

    match write_starter_config(dir) {
        Ok(path) => {
            println!("{}: Created {}", "Done".green().bold(), path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!(
                "{}: {}; use --dir to write elsewhere or remove it first",
                "Warning".yellow(),
                e
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read, parse and analyze one feature record
fn analyze_path(analyzer: &DocumentationAnalyzer, path: &Path) -> Result<OverallReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feature record: {}", path.display()))?;
    let features = DocumentFeatures::from_json(&json)
        .with_context(|| format!("Invalid feature record: {}", path.display()))?;
    let mut report = analyzer.analyze(&features);
    report.document.source = Some(path.display().to_string());
    Ok(report)
}

/// Analyze every file, skipping (and reporting) the ones that fail to load
fn analyze_files(
    analyzer: &DocumentationAnalyzer,
    files: &[PathBuf],
    parallel: bool,
    quiet: bool,
) -> (Vec<OverallReport>, bool) {
    let outcomes: Vec<(&PathBuf, Result<OverallReport>)> = if parallel {
        files
            .par_iter()
            .map(|path| (path, analyze_path(analyzer, path)))
            .collect()
    } else {
        files
            .iter()
            .map(|path| (path, analyze_path(analyzer, path)))
            .collect()
    };

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut had_errors = false;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                had_errors = true;
                if !quiet {
                    eprintln!("{}: {}: {:#}", "Error".red(), path.display(), e);
                }
            }
        }
    }
    (reports, had_errors)
}

fn save_reports(output_dir: &Path, reports: &[OverallReport], quiet: bool) -> Result<()> {
    let store = ReportStore::new(output_dir)?;
    for (i, report) in reports.iter().enumerate() {
        store.save_report(i + 1, report)?;
    }
    let paths = store.save_summary(reports)?;
    if !quiet {
        eprintln!(
            "{}: Saved {} report(s); summary at {}",
            "Info".blue(),
            reports.len(),
            paths.markdown.display()
        );
    }
    Ok(())
}

fn collect_feature_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if is_feature_file(file_path) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

fn is_feature_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    // Config files live next to feature records
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
    {
        return false;
    }
    path.extension().is_some_and(|ext| ext == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_path_optional_for_init() {
        let args = Args::try_parse_from(["docgrade", "init", "--dir", "/tmp"]).unwrap();
        assert!(args.path.is_none());
        assert!(matches!(args.command, Some(Commands::Init { .. })));

        let args = Args::try_parse_from(["docgrade", "pages/", "--json"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("pages/")));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_is_feature_file() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("page.json");
        let config = dir.path().join(".docgraderc.json");
        let notes = dir.path().join("notes.md");
        for p in [&page, &config, &notes] {
            std::fs::write(p, "{}").unwrap();
        }
        assert!(is_feature_file(&page));
        assert!(!is_feature_file(&config));
        assert!(!is_feature_file(&notes));
        assert!(!is_feature_file(&dir.path().join("missing.json")));
    }

    #[test]
    fn test_collect_feature_files_respects_ignore() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("drafts")).unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("drafts/c.json"), "{}").unwrap();

        let set = build_ignore_set(&["**/drafts/**".to_string()]).unwrap();
        let files = collect_feature_files(dir.path(), Some(&set)).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.json"), dir.path().join("b.json")]
        );
    }

    #[test]
    fn test_collect_missing_path() {
        let err = collect_feature_files(Path::new("/definitely/not/here"), None).unwrap_err();
        assert!(err.to_string().contains("Path does not exist"));
    }
}
