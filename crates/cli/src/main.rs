// rigmap CLI - suggest blendshape and joint name mappings from JSON name lists

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rigmap_cli::names::{load_name_list, to_json_string, write_outputs};
use rigmap_cli::settings::{load_config_file, resolve_config};
use rigmap_mapper::{suggest, DuplicatePolicy, Mapping, Profile, SuggestOptions};
use tracing_subscriber::{fmt, EnvFilter};

use exit_codes::{
    mapper_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_INPUT, EXIT_OUTPUT, EXIT_SUCCESS,
    EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "rigmap")]
#[command(about = "Suggest blendshape and joint name mappings for rig retargeting")]
#[command(long_version = long_version())]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv); RUST_LOG applies when absent
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map generated blendshape names onto mesh shapekeys (cutoff 0.45)
    #[command(after_help = "\
Examples:
  rigmap blendshapes generated.json shapekeys.json mapping.json
  rigmap blendshapes generated.json shapekeys.json mapping.json --cutoff 0.6
  rigmap blendshapes generated.json shapekeys.json mapping.json --explain report.json")]
    Blendshapes(SuggestArgs),

    /// Map motion-capture joint names onto armature bones (cutoff 0.5)
    #[command(after_help = "\
Examples:
  rigmap joints mocap.json bones.json mapping.json
  rigmap joints mocap.json bones.json mapping.json --on-duplicate reject
  rigmap joints mocap.json bones.json mapping.json --json -q | jq .")]
    Joints(SuggestArgs),

    /// Validate a config file and print the resolved options
    #[command(after_help = "\
Examples:
  rigmap validate rigmap.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

#[derive(Args)]
struct SuggestArgs {
    /// JSON array of source names
    source: PathBuf,

    /// JSON array of target names
    target: PathBuf,

    /// Where to write the mapping JSON object
    output: PathBuf,

    /// Fuzzy similarity cutoff (0..=1), overrides config and profile default
    #[arg(long)]
    cutoff: Option<f64>,

    /// What to do with repeated source names
    #[arg(long, value_name = "POLICY")]
    on_duplicate: Option<DuplicateArg>,

    /// Leave names with no letters (e.g. "_01") out of the substring step
    #[arg(long)]
    skip_empty_names: bool,

    /// TOML config file
    #[arg(long, env = "RIGMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Also write a per-name explain report
    #[arg(long, value_name = "FILE")]
    explain: Option<PathBuf>,

    /// Print the mapping JSON to stdout
    #[arg(long)]
    json: bool,

    /// Suppress the summary on stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DuplicateArg {
    LastWins,
    Reject,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::LastWins => DuplicatePolicy::LastWins,
            DuplicateArg::Reject => DuplicatePolicy::Reject,
        }
    }
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Also installs the `log` bridge, so engine records land here.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return ExitCode::from(if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS });
        }
    };
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Blendshapes(args) => cmd_suggest(Profile::Blendshape, args),
        Commands::Joints(args) => cmd_suggest(Profile::Joint, args),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// blendshapes / joints
// ============================================================================

fn resolve_options(profile: Profile, args: &SuggestArgs) -> Result<SuggestOptions, CliError> {
    let (config, source) = resolve_config(args.config.as_deref())
        .map_err(|e| CliError::new(EXIT_CONFIG, e.to_string()))?;
    log::info!("config: {source}");

    let mut options = config.options_for(profile);
    if let Some(cutoff) = args.cutoff {
        options = options
            .with_cutoff(cutoff)
            .map_err(|e| CliError::new(mapper_exit_code(&e), e.to_string()))?;
    }
    if let Some(policy) = args.on_duplicate {
        options = options.with_duplicate_policy(policy.into());
    }
    if args.skip_empty_names {
        options = options.with_skip_empty_names(true);
    }
    Ok(options)
}

fn cmd_suggest(profile: Profile, args: SuggestArgs) -> Result<(), CliError> {
    let options = resolve_options(profile, &args)?;

    let source = load_name_list(&args.source)
        .map_err(|e| CliError::new(EXIT_INPUT, e.to_string()))?;
    let target = load_name_list(&args.target)
        .map_err(|e| CliError::new(EXIT_INPUT, e.to_string()))?;

    log::info!(
        "{profile}: {} source names, {} target names, cutoff {}",
        source.len(),
        target.len(),
        options.cutoff
    );

    let mapping = suggest(&source, &target, &options).map_err(|e| {
        let code = mapper_exit_code(&e);
        CliError::new(code, e.to_string())
            .with_hint("use --on-duplicate last-wins to keep one key per name")
    })?;

    // Serialize before touching the filesystem: nothing is written on failure.
    let json_str = to_json_string(&mapping)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
    let report_str = match args.explain {
        Some(_) => Some(
            to_json_string(&mapping.report(profile, &options)).map_err(|e| {
                CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}"))
            })?,
        ),
        None => None,
    };

    // Report first, mapping last.
    let mut files: Vec<(&Path, &str)> = Vec::with_capacity(2);
    if let (Some(path), Some(report)) = (args.explain.as_deref(), report_str.as_deref()) {
        files.push((path, report));
    }
    files.push((args.output.as_path(), json_str.as_str()));
    write_outputs(&files).map_err(|e| CliError::new(EXIT_OUTPUT, e.to_string()))?;

    if args.json {
        print!("{json_str}");
    }

    if !args.quiet {
        print_summary(profile, &mapping, &args);
    }

    Ok(())
}

fn print_summary(profile: Profile, mapping: &Mapping, args: &SuggestArgs) {
    let s = mapping.summary();
    eprintln!(
        "{profile} mapping: {} names, {} matched ({} exact, {} fuzzy, {} substring), {} unmatched",
        s.unique_sources,
        s.matched(),
        s.exact,
        s.fuzzy,
        s.substring,
        s.unmatched,
    );
    eprintln!("wrote {}", args.output.display());
    if let Some(ref path) = args.explain {
        eprintln!("wrote {}", path.display());
    }
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config_file(&config_path)
        .map_err(|e| CliError::new(EXIT_CONFIG, e.to_string()))?;

    println!("{}: ok", config_path.display());
    for profile in [Profile::Blendshape, Profile::Joint] {
        let options = config.options_for(profile);
        println!(
            "  {:<10} cutoff={} substring={} on_duplicate={} skip_empty_names={}",
            profile.as_str(),
            options.cutoff,
            options.substring.as_str(),
            options.on_duplicate.as_str(),
            options.skip_empty_names,
        );
    }
    Ok(())
}
