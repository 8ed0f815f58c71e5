//! Validate command - checks inputs without writing output.

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::Args;
use console::{Style, style};
use serde::Serialize;
use sessionize_config::resolve_threshold;
use sessionize_log::{LogProfile, read_records};

use super::Context;

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input access log in CSV format
    pub log: PathBuf,

    /// File whose first line is the inactivity period in seconds
    pub inactivity_file: Option<PathBuf>,

    /// Inactivity period in seconds (overrides the inactivity file)
    #[arg(long, env = "SESSIONIZE_INACTIVITY", allow_negative_numbers = true)]
    pub inactivity: Option<i64>,

    /// Accept out-of-order records (as `run --clamp-out-of-order` would)
    #[arg(long)]
    pub clamp_out_of_order: bool,
}

/// Validation report for JSON output.
#[derive(Debug, Serialize)]
struct ValidateOutput {
    inactivity_secs: Option<i64>,
    span_secs: i64,
    #[serde(flatten)]
    profile: LogProfile,
}

/// Run the validate command.
pub fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let threshold = if args.inactivity.is_some() || args.inactivity_file.is_some() {
        let resolved = resolve_threshold(args.inactivity, args.inactivity_file.as_deref())
            .context("invalid inactivity configuration")?;
        Some(resolved.threshold)
    } else {
        None
    };

    let records = read_records(&args.log)
        .with_context(|| format!("failed to read log {}", args.log.display()))?;
    let profile = LogProfile::from_records(&records);

    if ctx.json_output {
        let output = ValidateOutput {
            inactivity_secs: threshold.map(|t| t.secs()),
            span_secs: profile.span_secs(),
            profile: profile.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let dim = Style::new().dim();

        println!();
        println!("{}", style("Log Validation").bold());
        println!("{}", dim.apply_to("─".repeat(40)));
        println!();
        if let Some(threshold) = threshold {
            println!("  {} {}", dim.apply_to("Inactivity:"), threshold);
        }
        println!("  {} {}", dim.apply_to("Records:"), profile.records);
        println!("  {} {}", dim.apply_to("Visitors:"), profile.visitors);
        if let (Some(first), Some(last)) = (profile.first, profile.last) {
            println!(
                "  {} {} → {} {}",
                dim.apply_to("Span:"),
                first,
                last,
                dim.apply_to(format!("({}s)", profile.span_secs()))
            );
        }
        if profile.is_ordered() {
            let green = Style::new().green();
            println!("  {} {}", dim.apply_to("Ordering:"), green.apply_to("● ok"));
        } else {
            let yellow = Style::new().yellow();
            println!(
                "  {} {}",
                dim.apply_to("Ordering:"),
                yellow.apply_to(format!("● {} out-of-order records", profile.out_of_order))
            );
        }
        println!();
    }

    if !profile.is_ordered() && !args.clamp_out_of_order {
        bail!(
            "log has {} out-of-order records; rerun with --clamp-out-of-order to accept them",
            profile.out_of_order
        );
    }

    Ok(())
}
