//! Command-line interface module

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{PatchError, PatchErrorKind, PatchResult};
use crate::mapping::{MappingLayout, MappingStrategy};
use crate::parser::{ChangeFormat, ChangeSource};
use crate::patch::{default_archive_name, PatchConfig};

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "patchjar")]
#[command(about = "Package the compiled classes of changed sources into a patch JAR")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Change set file: status output, a diff, or one path per line
    #[arg()]
    pub input: Option<PathBuf>,

    /// Read the change set from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Archive path or directory (default: patch-<timestamp>.jar)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory the change set paths are relative to
    #[arg(short = 'C', long, default_value = ".")]
    pub project_root: PathBuf,

    /// Change set format
    #[arg(long, value_enum, default_value_t = ChangeFormat::Auto)]
    pub format: ChangeFormat,

    /// Rewrite whole path segments only, keeping names that contain the language token
    #[arg(long, global = true)]
    pub segment_aware: bool,

    /// Source language directory and extension (default: java)
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Editable source root directory (default: src)
    #[arg(long, global = true)]
    pub source_root: Option<String>,

    /// Main source directory (default: main)
    #[arg(long, global = true)]
    pub main_dir: Option<String>,

    /// Test source directory (default: test)
    #[arg(long, global = true)]
    pub test_dir: Option<String>,

    /// Source file extension, e.g. .kt (default: .<language>)
    #[arg(long, global = true)]
    pub source_extension: Option<String>,

    /// Build output root directory (default: target)
    #[arg(long, global = true)]
    pub output_root: Option<String>,

    /// Compiled classes directory (default: classes)
    #[arg(long, global = true)]
    pub classes_dir: Option<String>,

    /// Compiled test classes directory (default: test-classes)
    #[arg(long, global = true)]
    pub test_classes_dir: Option<String>,

    /// Compiled file extension (default: .class)
    #[arg(long, global = true)]
    pub artifact_extension: Option<String>,

    /// Leave out inner classes (Foo$Bar.class)
    #[arg(long)]
    pub no_nested: bool,

    /// Do not expand listed directories into their source files
    #[arg(long)]
    pub no_expand: bool,

    /// Fail if a changed source has no compiled class
    #[arg(long)]
    pub strict: bool,

    /// Write the archive even if no class matched
    #[arg(long)]
    pub allow_empty: bool,

    /// Resolve and report without writing the archive
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the compiled paths of source files without touching the disk
    Map {
        /// Source file paths
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub patch_config: PatchConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> PatchResult<Self> {
        let patch_config = Self::create_patch_config(&args)?;

        Ok(Self { args, patch_config })
    }

    /// Layout from the layout flags
    pub fn layout(args: &Args) -> MappingLayout {
        let mut layout = match &args.language {
            Some(language) => MappingLayout::for_language(language),
            None => MappingLayout::maven(),
        };
        if let Some(root) = &args.source_root {
            layout.source_root = root.clone();
        }
        if let Some(dir) = &args.main_dir {
            layout.main_dir = dir.clone();
        }
        if let Some(dir) = &args.test_dir {
            layout.test_dir = dir.clone();
        }
        if let Some(ext) = &args.source_extension {
            layout.source_extension = ext.clone();
        }
        if let Some(root) = &args.output_root {
            layout.output_root = root.clone();
        }
        if let Some(dir) = &args.classes_dir {
            layout.classes_dir = dir.clone();
        }
        if let Some(dir) = &args.test_classes_dir {
            layout.test_classes_dir = dir.clone();
        }
        if let Some(ext) = &args.artifact_extension {
            layout.artifact_extension = ext.clone();
        }
        layout
    }

    pub fn strategy(args: &Args) -> MappingStrategy {
        if args.segment_aware {
            MappingStrategy::SegmentAware
        } else {
            MappingStrategy::Legacy
        }
    }

    /// Create patch configuration from CLI arguments
    fn create_patch_config(args: &Args) -> PatchResult<PatchConfig> {
        let default_name = default_archive_name(&chrono::Local::now());
        let output = path_mapping::resolve_output_path(args.output.as_deref(), &default_name);

        let config = PatchConfig {
            project_root: args.project_root.clone(),
            output,
            layout: Self::layout(args),
            strategy: Self::strategy(args),
            format: args.format,
            include_nested: !args.no_nested,
            expand_directories: !args.no_expand,
            strict: args.strict,
            allow_empty: args.allow_empty,
            dry_run: args.dry_run,
        };

        config.validate().map_err(PatchError::configuration)?;

        Ok(config)
    }

    /// Where to read the change set from
    pub fn change_source(&self) -> PatchResult<ChangeSource> {
        match (&self.args.input, self.args.stdin) {
            (Some(_), true) => Err(PatchError::patch(PatchErrorKind::configuration(
                "Use either an input file or --stdin, not both".to_string(),
            ))),
            (Some(path), false) if path.as_os_str() == "-" => Ok(ChangeSource::Stdin),
            (Some(path), false) => Ok(ChangeSource::File(path.clone())),
            (None, true) => Ok(ChangeSource::Stdin),
            (None, false) => Err(PatchError::patch(PatchErrorKind::input(
                "No change set provided. Pass a file or use --stdin".to_string(),
            ))),
        }
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }
}

/// Install the stderr log subscriber
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr)
        .init();
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        }
    }

    /// Create a progress bar for archive writing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Progress bars only make sense on an interactive terminal
    pub fn should_show_progress(quiet: bool) -> bool {
        !quiet && atty::is(atty::Stream::Stderr)
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &PatchError) {
    CliUtils::show_error(&error.user_message());

    match error.kind() {
        Some(PatchErrorKind::MissingArtifacts { .. }) => {
            eprintln!("\nTip: build the project first, or drop --strict to package what exists");
        }
        Some(PatchErrorKind::EmptyPatch) => {
            eprintln!("\nTip: check --project-root and the layout options (--output-root, --classes-dir)");
        }
        _ => {}
    }

    eprintln!("\nTry 'patchjar --help' for usage information.");
}
