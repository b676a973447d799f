//! Repository inventory CLI (reposcope) - Main binary entry point

use reposcope::cli::args::{Command, InspectArgs, ScanArgs, parse_args};
use reposcope::cli::output::{format_inspection, format_json, format_text};
use reposcope::io::report::write_reports;
use reposcope::models::ProgressSnapshot;
use reposcope::services::aggregate::SortBy;
use reposcope::services::guard::capture_start_dir;
use reposcope::services::scanner::FileScanner;
use reposcope::services::source::{Materialized, SourceLocator, materialize};
use reposcope::{Analysis, PathGuard, ScanOptions};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    capture_start_dir();

    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug reposcope scan /path
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-v" => {
            print_version();
            return;
        }
        _ => {}
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    let exit_code = match &cli_args.command {
        Command::Scan(scan_args) => handle_scan(scan_args),
        Command::Inspect(inspect_args) => handle_inspect(inspect_args),
    };

    process::exit(exit_code);
}

fn exit_code_for(e: &reposcope::Error) -> i32 {
    match e {
        reposcope::Error::InvalidRoot { .. }
        | reposcope::Error::Guard(_)
        | reposcope::Error::InvalidConfig(_) => 2,
        _ => 4,
    }
}

fn build_options(args: &ScanArgs) -> Result<ScanOptions, reposcope::Error> {
    let mut opts = ScanOptions::default();

    if let Some(config) = &args.config {
        opts.apply_file(Path::new(config))?;
    }
    if let Some(max_files) = args.max_files {
        opts.max_files = max_files;
    }
    if args.no_structure {
        opts.include_structure = false;
    }
    if let Some(workspace) = &args.workspace {
        opts.guard.workspace_root = Some(PathBuf::from(workspace));
    }
    opts.guard
        .allow_roots
        .extend(args.allow_roots.iter().map(PathBuf::from));
    opts.guard
        .deny_roots
        .extend(args.deny_roots.iter().map(PathBuf::from));
    if let Some(secs) = args.progress_interval_secs {
        opts.progress_interval = Duration::from_secs(secs);
    }

    if !args.quiet && !args.json {
        opts.progress_notifier = Some(Arc::new(|snapshot: &ProgressSnapshot| {
            #[allow(clippy::cast_precision_loss)]
            let elapsed_secs = snapshot.timestamp_ms as f64 / 1000.0;
            eprintln!(
                "[{elapsed_secs:6.1}s] {} files, {} lines, {} directories",
                snapshot.files_scanned, snapshot.lines_scanned, snapshot.directories_visited
            );
        }));
    }

    opts.validate()?;
    Ok(opts)
}

fn handle_scan(args: &ScanArgs) -> i32 {
    let sort_by = match SortBy::from_str(&args.sort) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}. Use 'lines', 'size' or 'path'");
            return 2;
        }
    };

    let opts = match build_options(args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            return exit_code_for(&e);
        }
    };

    // With several sources, one that cannot be materialized does not stop the others
    let single_source = args.sources.len() == 1;
    let mut last_error = None;

    // Checkouts stay alive until the scan finishes, then are removed on drop
    let mut materialized: Vec<Materialized> = Vec::new();
    for source in &args.sources {
        let locator = match SourceLocator::parse(source) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error: {e}");
                return 2;
            }
        };
        if !args.quiet && matches!(locator, SourceLocator::Remote(_)) {
            eprintln!("Cloning: {locator}");
        }
        match materialize(&locator) {
            Ok(m) => materialized.push(m),
            Err(e) if single_source => {
                eprintln!("Error: {e}");
                return exit_code_for(&e);
            }
            Err(e) => {
                eprintln!("Error: cannot open {locator}: {e}");
                last_error = Some(e);
            }
        }
    }

    if !args.quiet && !args.json {
        for m in &materialized {
            eprintln!("Scanning: {}", m.locator());
        }
    }

    let roots: Vec<&Path> = materialized.iter().map(Materialized::root).collect();
    let results = reposcope::scan_many(&roots, &opts);

    let mut analyses: Vec<Analysis> = Vec::new();
    for (m, result) in materialized.iter().zip(results) {
        match result {
            Ok(mut analysis) => {
                analysis.source = m.locator().to_string();
                analyses.push(analysis);
            }
            Err(e) => {
                eprintln!("Error scanning {}: {e}", m.locator());
                last_error = Some(e);
            }
        }
    }

    if analyses.is_empty() {
        return last_error.as_ref().map_or(4, exit_code_for);
    }

    if let Some(output) = &args.output {
        if let Err(e) = write_reports(Path::new(output), &analyses) {
            eprintln!("Error: Failed to write report: {e}");
            return 4;
        }
        if !args.quiet {
            eprintln!("Report saved: {output}");
        }
    }

    if args.json {
        println!("{}", format_json(&analyses));
    } else {
        for (i, analysis) in analyses.iter().enumerate() {
            if i > 0 {
                println!();
            }
            format_text(analysis, sort_by, args.top);
        }
    }

    if last_error.is_some() { 3 } else { 0 }
}

fn handle_inspect(args: &InspectArgs) -> i32 {
    let opts = ScanOptions::default();
    let guard = PathGuard::from_config(&opts.guard);
    let scanner = FileScanner::new(&guard, &opts);

    let path = Path::new(&args.file);
    let display = path
        .file_name()
        .map_or_else(|| args.file.clone(), |n| n.to_string_lossy().to_string());

    let record = match scanner.scan(path, &display, true) {
        Ok(r) => r,
        Err(reason) => {
            eprintln!("Error: {}: {reason}", args.file);
            return 2;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return 4;
            }
        }
    } else {
        format_inspection(&record);
    }

    0
}

fn print_help() {
    println!("Repository inventory CLI (reposcope) - Inventory a source tree for documentation");
    println!();
    println!("USAGE:");
    println!("    reposcope scan <SOURCE>... [OPTIONS]");
    println!("    reposcope inspect <FILE> [--json]");
    println!();
    println!("COMMANDS:");
    println!("    scan      Walk one or more sources and summarize their files");
    println!("    inspect   Classify a single file and show its structural summary");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!();
    println!("SCAN OPTIONS:");
    println!("    --max-files <N>           Stop after N recorded files (default: 1000)");
    println!("    --no-structure            Skip class/function/import extraction");
    println!("    --json                    Emit machine-readable output");
    println!("    --output <FILE>           Also save the JSON report to FILE");
    println!("    --config <FILE>           Load option overrides from a JSON file");
    println!("    --workspace <DIR>         Declared workspace root (env: REPOSCOPE_WORKSPACE)");
    println!("    --allow-root <DIR>        Additional directory the scan may read");
    println!("    --deny-root <DIR>         Additional directory the scan must never read");
    println!("    --top <K>                 Show top K files (default: 10)");
    println!("    --sort <FIELD>            Sort by lines|size|path (default: lines)");
    println!("    --progress-interval <S>   Emit progress updates every S seconds (default: 2)");
    println!("    --quiet                   Suppress non-error output");
    println!();
    println!("SOURCES:");
    println!("    A local directory, or a https://github.com/<owner>/<repo> URL which is");
    println!("    cloned into a temporary directory and removed after the scan.");
    println!();
    println!("EXAMPLES:");
    println!("    reposcope scan . --top 20");
    println!("    reposcope scan ~/src/app ~/src/lib --json --output report.json");
    println!("    reposcope scan https://github.com/owner/repo --max-files 200");
    println!("    reposcope inspect src/main.py");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_DATE: &str = env!("GIT_DATE");
    const BUILD_TARGET: &str = env!("BUILD_TARGET");

    println!("reposcope {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
