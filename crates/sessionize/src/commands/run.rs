//! Run command - sessionizes a log into an output file.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use console::{Style, style};
use serde::Serialize;
use sessionize_config::resolve_threshold;
use sessionize_log::{SummaryWriter, read_records};
use sessionize_window::{OrderPolicy, WindowConfig, WindowStats};
use tracing::info;

use super::Context;

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input access log in CSV format
    pub log: PathBuf,

    /// File whose first line is the inactivity period in seconds
    pub inactivity_file: PathBuf,

    /// Output file for session summaries
    pub output: PathBuf,

    /// Inactivity period in seconds (overrides the inactivity file)
    #[arg(long, env = "SESSIONIZE_INACTIVITY", allow_negative_numbers = true)]
    pub inactivity: Option<i64>,

    /// Move out-of-order records forward instead of failing
    #[arg(long)]
    pub clamp_out_of_order: bool,
}

/// Run summary for JSON output.
#[derive(Debug, Serialize)]
struct RunOutput {
    inactivity_secs: i64,
    inactivity_source: String,
    order_policy: OrderPolicy,
    output: String,
    stats: WindowStats,
}

/// Run the run command.
pub fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let resolved = resolve_threshold(args.inactivity, Some(&args.inactivity_file))
        .context("invalid inactivity configuration")?;
    info!(
        threshold = %resolved.threshold,
        source = %resolved.source,
        "Resolved inactivity threshold"
    );

    let policy = if args.clamp_out_of_order {
        OrderPolicy::Clamp
    } else {
        OrderPolicy::Strict
    };
    let config = WindowConfig::new(resolved.threshold.secs())?.with_order_policy(policy);

    let records = read_records(&args.log)
        .with_context(|| format!("failed to read log {}", args.log.display()))?;
    info!(count = records.len(), "Parsed log records");

    let mut writer = SummaryWriter::create(&args.output)?;
    let stats = sessionize_window::run(config, records, &mut writer)
        .context("sessionization failed")?;
    writer
        .into_inner()
        .with_context(|| format!("failed to flush {}", args.output.display()))?;

    if ctx.json_output {
        let output = RunOutput {
            inactivity_secs: resolved.threshold.secs(),
            inactivity_source: resolved.source.to_string(),
            order_policy: policy,
            output: args.output.display().to_string(),
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let green = Style::new().green();

    println!();
    println!("{}", style("Sessionize").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();
    println!(
        "  {} {} {}",
        dim.apply_to("Inactivity:"),
        resolved.threshold,
        dim.apply_to(format!("({})", resolved.source))
    );
    println!("  {} {}", dim.apply_to("Records:"), stats.records);
    println!(
        "  {} {}",
        dim.apply_to("Sessions:"),
        green.apply_to(stats.sessions)
    );

    if ctx.verbose {
        println!("  {} {}", dim.apply_to("Split:"), stats.split);
        println!("  {} {}", dim.apply_to("Swept:"), stats.swept);
        println!("  {} {}", dim.apply_to("Flushed:"), stats.flushed);
        println!("  {} {}", dim.apply_to("Peak open:"), stats.peak_open);
    }

    if stats.clamped > 0 {
        let yellow = Style::new().yellow();
        println!(
            "  {} {}",
            dim.apply_to("Clamped:"),
            yellow.apply_to(stats.clamped)
        );
    }

    println!("  {} {}", dim.apply_to("Output:"), args.output.display());
    println!();

    Ok(())
}
