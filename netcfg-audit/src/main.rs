use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use netcfg_audit::compare::compare_configs;
use netcfg_audit::detect::detect_vendor;
use netcfg_audit::model::{Decision, Severity};
use netcfg_audit::parse::parse;
use netcfg_audit::report::{colorize, colorize_issues, format_diff_report, format_review_report};
use netcfg_audit::review::review_change;
use netcfg_audit::rules::load_rules;
use netcfg_audit::summary::format_analysis;
use netcfg_audit::validate::{format_report, validate, validate_with_rules};

mod cli;

use cli::{Cli, Command, DiffArgs, InspectArgs, OutputFormat, ReviewArgs, ValidateArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(args) => run_inspect(args),
        Command::Validate(args) => run_validate(args),
        Command::Diff(args) => run_diff(args),
        Command::Review(args) => run_review(args),
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let text = read_input(&args.file)?;
    let vendor = detect_vendor(&text);

    if args.detect {
        println!("vendor={}", vendor.as_str());
        return Ok(());
    }

    let config = parse(&text);
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text | OutputFormat::Markdown => println!("{}", format_analysis(&config)),
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<()> {
    let text = read_input(&args.file)?;
    let vendor = detect_vendor(&text);

    let issues = match &args.rules_file {
        Some(path) => {
            let rules = load_rules(path)
                .with_context(|| format!("failed to load rules from {}", path.display()))?;
            validate_with_rules(&text, vendor, &rules)
        }
        None => validate(&text, vendor),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&issues)?),
        OutputFormat::Markdown => println!("{}", format_report(&issues)),
        OutputFormat::Text => println!("{}", colorize_issues(&format_report(&issues))),
    }

    if args.strict && issues.iter().any(|i| i.severity == Severity::Critical) {
        bail!("strict mode failed: critical issues found");
    }
    Ok(())
}

fn run_diff(args: DiffArgs) -> Result<()> {
    let running = read_input(&args.running)?;
    let golden = read_input(&args.golden)?;
    let report = compare_configs(&running, &golden);

    if args.summary {
        println!(
            "findings={} critical={} security={} availability={} performance={} overall={}",
            report.findings.len(),
            report.critical_findings.len(),
            report.risk_scores.security,
            report.risk_scores.availability,
            report.risk_scores.performance,
            report.risk_scores.overall
        );
    } else {
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Markdown => println!("{}", format_diff_report(&report)),
            OutputFormat::Text => println!("{}", colorize(&format_diff_report(&report))),
        }
    }

    if args.strict && !report.critical_findings.is_empty() {
        bail!("strict mode failed: critical findings detected");
    }
    Ok(())
}

fn run_review(args: ReviewArgs) -> Result<()> {
    let proposal = read_input(&args.proposal)?;
    let current = args
        .current
        .as_deref()
        .map(read_input)
        .transpose()?;

    let report = review_change(&proposal, current.as_deref());

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Markdown => println!("{}", format_review_report(&report)),
        OutputFormat::Text => println!("{}", colorize(&format_review_report(&report))),
    }

    if args.strict && report.decision == Decision::NoGo {
        bail!("strict mode failed: change rejected");
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
