//! CLI argument parsing

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
}

#[derive(Debug, Clone)]
pub enum Command {
    Scan(ScanArgs),
    Inspect(InspectArgs),
}

#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub sources: Vec<String>,
    pub max_files: Option<usize>,
    pub no_structure: bool,
    pub json: bool,
    pub output: Option<String>,
    pub config: Option<String>,
    pub workspace: Option<String>,
    pub allow_roots: Vec<String>,
    pub deny_roots: Vec<String>,
    pub top: usize,
    pub sort: String,
    pub progress_interval_secs: Option<u64>,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct InspectArgs {
    pub file: String,
    pub json: bool,
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            max_files: None,
            no_structure: false,
            json: false,
            output: None,
            config: None,
            workspace: None,
            allow_roots: Vec::new(),
            deny_roots: Vec::new(),
            top: 10,
            sort: "lines".to_string(),
            progress_interval_secs: None,
            quiet: false,
        }
    }
}

/// Parse command line arguments
///
/// # Errors
/// Returns a message describing the first invalid argument.
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    let command = match args[1].as_str() {
        "scan" => Command::Scan(parse_scan_args(&args[2..])?),
        "inspect" => Command::Inspect(parse_inspect_args(&args[2..])?),
        _ => return Err(format!("Unknown command: {}", args[1])),
    };

    Ok(CliArgs { command })
}

fn value_of<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a String, String> {
    *i += 1;
    args.get(*i)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_scan_args(args: &[String]) -> Result<ScanArgs, String> {
    let mut scan_args = ScanArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--max-files" => {
                let value = value_of(args, &mut i, "--max-files")?;
                scan_args.max_files = Some(
                    value
                        .parse()
                        .map_err(|_| "--max-files must be a number".to_string())?,
                );
            }
            "--no-structure" => {
                scan_args.no_structure = true;
            }
            "--json" => {
                scan_args.json = true;
            }
            "--output" => {
                scan_args.output = Some(value_of(args, &mut i, "--output")?.clone());
            }
            "--config" => {
                scan_args.config = Some(value_of(args, &mut i, "--config")?.clone());
            }
            "--workspace" => {
                scan_args.workspace = Some(value_of(args, &mut i, "--workspace")?.clone());
            }
            "--allow-root" => {
                let value = value_of(args, &mut i, "--allow-root")?;
                scan_args.allow_roots.push(value.clone());
            }
            "--deny-root" => {
                let value = value_of(args, &mut i, "--deny-root")?;
                scan_args.deny_roots.push(value.clone());
            }
            "--top" => {
                let value = value_of(args, &mut i, "--top")?;
                scan_args.top = value
                    .parse()
                    .map_err(|_| "--top must be a number".to_string())?;
            }
            "--sort" => {
                scan_args.sort.clone_from(value_of(args, &mut i, "--sort")?);
            }
            "--progress-interval" => {
                let value = value_of(args, &mut i, "--progress-interval")?;
                let secs: u64 = value
                    .parse()
                    .map_err(|_| "--progress-interval must be a positive integer".to_string())?;
                if secs == 0 {
                    return Err("--progress-interval must be greater than zero".to_string());
                }
                scan_args.progress_interval_secs = Some(secs);
            }
            "--quiet" => {
                scan_args.quiet = true;
            }
            arg if !arg.starts_with("--") => {
                scan_args.sources.push(arg.to_string());
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if scan_args.sources.is_empty() {
        return Err("Missing required argument: SOURCE".to_string());
    }

    Ok(scan_args)
}

fn parse_inspect_args(args: &[String]) -> Result<InspectArgs, String> {
    let mut file = String::new();
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            a if !a.starts_with("--") => {
                if file.is_empty() {
                    file = a.to_string();
                } else {
                    return Err(format!("Unexpected argument: {a}"));
                }
            }
            _ => return Err(format!("Unknown option: {arg}")),
        }
    }

    if file.is_empty() {
        return Err("Missing required argument: FILE".to_string());
    }

    Ok(InspectArgs { file, json })
}
