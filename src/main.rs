mod cli;

use vidsplit::{plan, split};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidsplit=trace,vidsplit_av=debug".to_string()
        } else {
            "vidsplit=info,vidsplit_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    match cli.command {
        Commands::Split {
            input,
            duration,
            dry_run,
            json,
        } => split_file(&input, duration, dry_run, json),
        Commands::Probe { file, json } => probe_file(&file, json),
        Commands::CheckTools => check_tools(),
        Commands::Version => {
            println!("vidsplit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn split_file(input: &Path, duration: u64, dry_run: bool, json: bool) -> Result<()> {
    let prober = split::FfprobeDurationProber;
    let segment_plan = split::plan_for_file(&prober, input, duration)?;
    let output_dir = split::output_dir_for(input);

    println!("Input file: {}", input.display());
    println!("Output directory: {}", output_dir.display());
    println!(
        "Total duration: {}",
        plan::format_timestamp(segment_plan.total_duration)
    );
    println!("Will create {} segments", segment_plan.segment_count());

    if dry_run {
        if json {
            println!("{}", serde_json::to_string_pretty(&segment_plan)?);
        } else {
            println!("\n=== DRY RUN - No files will be created ===");
            for spec in &segment_plan.segments {
                println!(
                    "Segment {}: {} - {} -> {}",
                    spec.sequence,
                    spec.start_timestamp(),
                    spec.end_timestamp(),
                    spec.output_name
                );
            }
        }
        return Ok(());
    }

    // Fail before the first extraction if ffmpeg is missing entirely.
    vidsplit_av::require_tool("ffmpeg")?;

    println!("\nStarting segment extraction...");
    let extractor = split::FfmpegSegmentExtractor;
    split::run_plan(&extractor, input, &output_dir, &segment_plan)?;

    println!("\n✓ All segments created in: {}", output_dir.display());
    Ok(())
}

fn probe_file(file: &Path, json: bool) -> Result<()> {
    let duration = vidsplit_av::probe_duration(file)?;

    if json {
        let value = serde_json::json!({
            "file": file.display().to_string(),
            "duration_secs": duration.as_secs_f64(),
            "duration": plan::format_timestamp(duration),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("File: {}", file.display());
        println!(
            "Duration: {} ({:.3}s)",
            plan::format_timestamp(duration),
            duration.as_secs_f64()
        );
    }

    Ok(())
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = vidsplit_av::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to enable splitting.");
    }

    Ok(())
}
