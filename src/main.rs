use std::path::Path;
use std::process;
use std::time::Instant;
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use orabrute_rs::cli::Args;
use orabrute_rs::common::{banner, logger, targets, utils};
use orabrute_rs::credentials;
use orabrute_rs::nmap::NmapRunner;
use orabrute_rs::oracle::{self, OracleConfig};
use orabrute_rs::output::FindingStore;
use orabrute_rs::output::report::{self, ReportFormat};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if !args.silent {
        banner::show();
    }

    if let Err(e) = logger::init(args.verbose, args.silent, args.log_file.as_deref()) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let target_specs = match (&args.target, &args.target_file) {
        (Some(target), _) => targets::parse_targets(target)?,
        (None, Some(path)) => read_targets_from_file(path)?,
        (None, None) => anyhow::bail!("Either --target or --target-file is required"),
    };
    targets::check_address_family(&target_specs)?;

    let candidates = credentials::build_candidates(&args.credential_options())?;
    info!(
        "Loaded {} target spec(s) and {} credential candidates",
        target_specs.len(),
        candidates.len()
    );

    let config = OracleConfig {
        sid: args.sid.clone(),
        bruteforce_speed: args.bruteforce_speed,
        verbose: args.verbose,
        silent: args.silent,
        rport: args.port,
        targets: target_specs,
    };

    let scanner = NmapRunner::new(&args.nmap_path);
    let mut findings = FindingStore::new();
    let summary = oracle::run(&config, &candidates, &scanner, &mut findings).await?;

    if let Some(output) = &args.output {
        let format: ReportFormat = args.output_format.parse()?;
        report::generate(output, &findings, &config.sid, format)
            .with_context(|| format!("Failed to write report {}", output.display()))?;
        info!("Report written to {}", output.display());
    }

    info!(
        "Done in {:.2}s: {} hosts, {} valid credentials, {} locked accounts",
        start_time.elapsed().as_secs_f64(),
        summary.hosts,
        summary.valid,
        summary.locked
    );

    Ok(())
}

// 从文件读取目标, 每行一个
fn read_targets_from_file(path: &Path) -> Result<Vec<String>> {
    let lines = utils::read_lines_from_file(path)
        .with_context(|| format!("Failed to read target file {}", path.display()))?;

    let mut specs = Vec::new();
    for line in lines {
        specs.extend(targets::parse_targets(&line)?);
    }

    if specs.is_empty() {
        anyhow::bail!("No targets in {}", path.display());
    }

    Ok(specs)
}
