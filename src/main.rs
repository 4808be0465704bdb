use clap::Parser;
use std::time::Duration;

use anyhow::Result;

use patchjar::cli::{self, Args, CliConfig, CliUtils, Commands};
use patchjar::{PatchBuilder, PatchError, PatchReport, PathMapper};

fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.verbose, args.quiet);

    if let Some(Commands::Map { paths }) = &args.command {
        print_mappings(&args, paths)?;
        return Ok(());
    }

    match run(args) {
        Ok(()) => Ok(()),
        Err(e) => {
            cli::handle_error(&e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<(), PatchError> {
    let config = CliConfig::from_args(args)?;
    let source = config.change_source()?;
    tracing::debug!("Reading change set from {}", source.description());

    let entries = source.parse(config.patch_config.format)?;
    let builder = PatchBuilder::new(config.patch_config.clone())?;

    let progress = if CliUtils::should_show_progress(config.is_quiet()) {
        Some(CliUtils::create_progress_bar(0))
    } else {
        None
    };

    let report = builder.build(entries, progress.as_ref())?;

    if config.args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| PatchError::Other(e.into()))?;
        println!("{}", json);
    } else {
        output_report(&report, &config);
    }

    Ok(())
}

fn print_mappings(args: &Args, paths: &[String]) -> Result<()> {
    let mapper = PathMapper::new(CliConfig::layout(args), CliConfig::strategy(args));

    if args.json {
        let mappings: Vec<_> = paths.iter().map(|p| mapper.mapping(p)).collect();
        println!("{}", serde_json::to_string_pretty(&mappings)?);
    } else {
        for path in paths {
            let mapping = mapper.mapping(path);
            println!("{}", mapping.source_path);
            println!("  {}", mapping.artifact_path);
            println!("  {}", mapping.nested_pattern);
        }
    }

    Ok(())
}

fn output_report(report: &PatchReport, config: &CliConfig) {
    let quiet = config.is_quiet();

    for missing in &report.missing {
        CliUtils::show_warning(&format!("No compiled classes for {}", missing), quiet);
    }

    if config.is_verbose() && !quiet {
        for source in &report.sources {
            let marker = if source.test_source { " [test]" } else { "" };
            println!("{}{}", source.source, marker);
            for entry in &source.entries {
                println!("  + {}", entry);
            }
        }
        for skipped in &report.skipped {
            println!("  - {} ({:?})", skipped.path, skipped.reason);
        }
    }

    match &report.archive {
        Some(archive) => CliUtils::show_success(
            &format!(
                "Wrote {}: {} ({}, {})",
                archive,
                report.summary(),
                CliUtils::format_file_size(report.bytes_written),
                CliUtils::format_duration(Duration::from_millis(report.processing_time_ms))
            ),
            quiet,
        ),
        None => CliUtils::show_success(&format!("Dry run: {}", report.summary()), quiet),
    }
}
