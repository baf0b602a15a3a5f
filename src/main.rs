//! CLI entry point for poplr

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use poplr::{
    Configuration, ExclusionPattern, ExportKind, OutputFormat, Settings, SortStrategy,
    generate_tree,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "poplr")]
#[command(about = "A flexible and fun directory tree generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a directory tree
    Tree(TreeArgs),
    /// Create a new .poplrrc configuration file
    Init {
        /// Create in home directory (global)
        #[arg(short, long)]
        global: bool,
    },
    /// Show current configuration
    Config,
}

#[derive(Args, Debug, Default)]
struct TreeArgs {
    /// Directory to display (defaults to the current directory)
    path: Option<PathBuf>,

    /// Output format (ascii, markdown, json, console)
    #[arg(short, long, value_name = "TYPE")]
    format: Option<String>,

    /// Maximum depth to traverse (0 lists only the top level)
    #[arg(short = 'd', long = "max-depth", value_name = "NUMBER")]
    max_depth: Option<usize>,

    /// Show file sizes
    #[arg(short = 's', long = "show-size")]
    show_size: bool,

    /// Show full paths
    #[arg(short = 'p', long = "full-path")]
    full_path: bool,

    /// Show root directory
    #[arg(short = 'r', long = "show-root")]
    show_root: bool,

    /// Show directory summary
    #[arg(long)]
    stats: bool,

    /// Sort by (name, directory-first, type, size, extension)
    #[arg(long, value_name = "TYPE")]
    sort: Option<String>,

    /// Show file type icons
    #[arg(long)]
    icons: bool,

    /// Use plain ASCII branch characters
    #[arg(long = "no-fancy")]
    no_fancy: bool,

    /// Exclude entries by name, glob (`*.log`) or regex (`/^tmp/`); repeatable
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Write the tree to a file instead of the console (md, txt, json, html)
    #[arg(long, value_name = "KIND", num_args = 0..=1, default_missing_value = "")]
    export: Option<String>,

    /// Directory for exported files
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", requires = "export")]
    output_dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    let settings = Settings::load();

    let result = match cli.command {
        Some(Command::Tree(args)) => run_tree(&args, &settings),
        Some(Command::Init { global }) => run_init(global),
        Some(Command::Config) => run_config(&settings),
        None => run_tree(&TreeArgs::default(), &settings),
    };

    if let Err(e) = result {
        eprintln!("poplr: {}", e);
        process::exit(1);
    }
}

/// Resolve the tree configuration: settings first, then command line flags.
fn tree_configuration(
    args: &TreeArgs,
    settings: &Settings,
    export: Option<ExportKind>,
) -> poplr::Result<Configuration> {
    let base = settings.to_configuration()?;

    let format = match (export, &args.format) {
        (Some(kind), _) => kind.format(),
        (None, Some(format)) => format.parse::<OutputFormat>()?,
        (None, None) => OutputFormat::Console,
    };
    let sort_by = match &args.sort {
        Some(sort) => sort.parse::<SortStrategy>()?,
        None => base.sort_by,
    };
    let use_colors = match args.color {
        ColorMode::Auto => base.use_colors && should_use_color(ColorMode::Auto),
        mode => should_use_color(mode),
    };
    let mut exclude = base.exclude.clone();
    exclude.extend(ExclusionPattern::parse_all(&args.exclude)?);

    Ok(Configuration {
        format,
        max_depth: args.max_depth.or(base.max_depth),
        show_size: args.show_size || base.show_size,
        full_path: args.full_path || base.full_path,
        show_root: args.show_root || base.show_root,
        fancy: base.fancy && !args.no_fancy,
        exclude,
        use_colors,
        show_stats: args.stats || base.show_stats,
        use_icons: args.icons || base.use_icons,
        sort_by,
        ..base
    })
}

fn run_tree(args: &TreeArgs, settings: &Settings) -> poplr::Result<()> {
    let export = match args.export.as_deref() {
        None => None,
        Some("") => Some(ExportKind::for_format(
            settings.export.default_format.parse::<OutputFormat>()?,
        )),
        Some(kind) => Some(kind.parse::<ExportKind>()?),
    };

    let config = tree_configuration(args, settings, export)?;
    let root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    log::debug!("generating tree for {} as {}", root.display(), config.format);

    let output = generate_tree(&root, &config)?;

    match export {
        Some(kind) => {
            let dir = args
                .output_dir
                .clone()
                .unwrap_or_else(|| settings.export.output_dir.clone());
            let path = poplr::export(&output, kind, &dir, settings.export.timestamp)?;
            println!("Tree exported to {}", path.display());
        }
        None => output.print().map_err(|source| poplr::PoplrError::OutputWriteFailure {
            path: PathBuf::from("<stdout>"),
            source,
        })?,
    }
    Ok(())
}

fn run_init(global: bool) -> poplr::Result<()> {
    let path = Settings::init_path(global)?;
    Settings::write_default(&path)?;
    println!("Created configuration file at {}", path.display());
    Ok(())
}

fn run_config(settings: &Settings) -> poplr::Result<()> {
    println!("Current configuration:");
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
