pub mod args;
pub mod script;

use std::collections::HashSet;
use anyhow::Result;
use log::{debug, error, info, warn};
use crate::common::utils;
use crate::credentials::CredFile;
use crate::nmap::{HostResult, Scanner};
use crate::output::Reporter;
use self::script::ScriptEvent;

pub use args::{brute_delay, build_args};
pub use script::{extract_creds, parse_script_output};

/// nmap 中负责 Oracle 口令爆破的 NSE 脚本
pub const SCRIPT_ID: &str = "oracle-brute";

pub const DEFAULT_SID: &str = "XE";
pub const DEFAULT_PORT: u16 = 1521;

#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub sid: String,
    /// 0-5, 超出 0-4 的值表示不延迟
    pub bruteforce_speed: i32,
    pub verbose: bool,
    /// 不显示进度
    pub silent: bool,
    pub rport: u16,
    pub targets: Vec<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            sid: DEFAULT_SID.to_string(),
            bruteforce_speed: 5,
            verbose: false,
            silent: false,
            rport: DEFAULT_PORT,
            targets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub hosts: usize,
    pub valid: usize,
    pub locked: usize,
    pub errors: usize,
}

/// 完整的一次爆破: 写 credfile, 调用扫描器, 解析结果并上报
///
/// credfile 在扫描器返回后立即删除, 不论成功与否。
pub async fn run<S, R>(
    config: &OracleConfig,
    candidates: &[(String, String)],
    scanner: &S,
    reporter: &mut R,
) -> Result<RunSummary>
where
    S: Scanner,
    R: Reporter,
{
    info!("Nmap: Setting up credential file...");
    let credfile = CredFile::create(candidates)?;
    let args = build_args(config, credfile.path());

    info!(
        "Nmap: Starting Oracle bruteforce against {} target(s) with {} credentials...",
        config.targets.len(),
        credfile.len()
    );
    let pb = utils::create_spinner("Oracle brute force (nmap oracle-brute)", config.silent);
    let result = scanner.run(&args).await;
    pb.finish_and_clear();

    if let Err(e) = credfile.close() {
        warn!("{:#}", e);
    }

    let hosts = result?;
    let mut summary = RunSummary { hosts: hosts.len(), ..RunSummary::default() };
    let mut seen = HashSet::new();

    for host in &hosts {
        process_host(host, &config.sid, &mut seen, reporter, &mut summary);
    }

    info!(
        "Oracle brute force finished: {} hosts, {} valid credentials, {} locked accounts",
        summary.hosts, summary.valid, summary.locked
    );

    Ok(summary)
}

/// 处理单个主机的所有端口, 只看 oracle-brute 的输出
pub fn process_host<R: Reporter>(
    host: &HostResult,
    sid: &str,
    seen: &mut HashSet<(String, u16)>,
    reporter: &mut R,
    summary: &mut RunSummary,
) {
    for port in &host.ports {
        if port.scripts.is_empty() {
            continue;
        }
        for script in port.scripts.iter().filter(|s| s.id == SCRIPT_ID) {
            let events = parse_script_output(&host.addr, port.portid, sid, &script.output, seen);
            debug!("{}:{} produced {} events", host.addr, port.portid, events.len());
            dispatch(&host.addr, port.portid, sid, events, reporter, summary);
        }
    }
}

fn dispatch<R: Reporter>(
    addr: &str,
    port: u16,
    sid: &str,
    events: Vec<ScriptEvent>,
    reporter: &mut R,
    summary: &mut RunSummary,
) {
    let msg = format!("{}:{} - Oracle -", addr, port);

    for event in events {
        match event {
            ScriptEvent::InvalidSid => {
                error!("{} Invalid SID: {}", msg, sid);
                summary.errors += 1;
            }
            ScriptEvent::NoAccounts => info!("{} No valid accounts found", msg),
            ScriptEvent::ServiceFound(service) => reporter.report_service(service),
            ScriptEvent::SidConfirmed(note) => reporter.report_note(note),
            ScriptEvent::ValidLogin { user, pass, record } => {
                info!("{} Success: {}:{} (SID: {})", msg, user, pass, sid);
                reporter.report_auth(record);
                summary.valid += 1;
            }
            ScriptEvent::LockedAccount { user, record } => {
                info!("{} Locked: {} (SID: {}) -- account valid but locked", msg, user, sid);
                reporter.report_auth(record);
                summary.locked += 1;
            }
            ScriptEvent::ScriptError(e) => {
                error!("{} NSE script error: {}", msg, e);
                summary.errors += 1;
            }
            ScriptEvent::Unparseable(line) => {
                warn!("{} Could not extract credentials from: {}", msg, line.trim());
            }
        }
    }
}
