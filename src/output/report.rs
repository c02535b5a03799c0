use std::fs;
use std::path::Path;
use std::str::FromStr;
use anyhow::{Context, Result, anyhow};
use chrono::Local;
use serde::Serialize;
use crate::output::findings::{AuthRecord, FindingStore, NoteRecord, ServiceRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(anyhow!("Unknown output format: {}", other)),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    timestamp: String,
    sid: &'a str,
    summary: Summary,
    services: &'a [ServiceRecord],
    notes: &'a [NoteRecord],
    credentials: &'a [AuthRecord],
}

#[derive(Serialize)]
struct Summary {
    services: usize,
    valid_credentials: usize,
    locked_accounts: usize,
}

pub fn generate(
    output_path: &Path,
    findings: &FindingStore,
    sid: &str,
    format: ReportFormat,
) -> Result<()> {
    let report = Report {
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        sid,
        summary: Summary {
            services: findings.services.len(),
            valid_credentials: findings.valid_credentials().count(),
            locked_accounts: findings.locked_accounts().count(),
        },
        services: &findings.services,
        notes: &findings.notes,
        credentials: &findings.credentials,
    };

    let content = match format {
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
        ReportFormat::Csv => render_csv(&report),
        ReportFormat::Text => render_text(&report),
    };

    // 报告目录不存在时自动创建
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output_path, content)?;

    Ok(())
}

fn render_text(report: &Report) -> String {
    let mut content = String::new();

    content.push_str("# ORABRUTE-RS REPORT\n");
    content.push_str(&format!("Date: {}\n", report.timestamp));
    content.push_str(&format!("SID: {}\n\n", report.sid));

    content.push_str("## SUMMARY\n");
    content.push_str(&format!("Services: {}\n", report.summary.services));
    content.push_str(&format!("Valid Credentials: {}\n", report.summary.valid_credentials));
    content.push_str(&format!("Locked Accounts: {}\n\n", report.summary.locked_accounts));

    content.push_str("## SERVICES\n");
    for service in report.services {
        content.push_str(&format!("- {}:{}/{} - {}\n", service.host, service.port, service.proto, service.name));
    }
    content.push('\n');

    if !report.notes.is_empty() {
        content.push_str("## NOTES\n");
        for note in report.notes {
            content.push_str(&format!("- {}:{} - {}: {}\n", note.host, note.port, note.ntype, note.data));
        }
        content.push('\n');
    }

    if !report.credentials.is_empty() {
        content.push_str("## CREDENTIALS\n");
        for cred in report.credentials {
            if cred.active {
                content.push_str(&format!(
                    "- {}:{} - username: '{}', password: '{}'\n",
                    cred.host,
                    cred.port,
                    cred.user,
                    cred.pass.as_deref().unwrap_or("")
                ));
            } else {
                content.push_str(&format!(
                    "- {}:{} - username: '{}' (locked)\n",
                    cred.host,
                    cred.port,
                    cred.user
                ));
            }
        }
        content.push('\n');
    }

    content
}

fn render_csv(report: &Report) -> String {
    let mut content = String::new();

    content.push_str("# SERVICES\n");
    content.push_str("Host,Port,Proto,Name\n");
    for service in report.services {
        content.push_str(&format!("{},{},{},{}\n", service.host, service.port, service.proto, service.name));
    }
    content.push('\n');

    content.push_str("# CREDENTIALS\n");
    content.push_str("Host,Port,Proto,Username,Password,Status\n");
    for cred in report.credentials {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            cred.host,
            cred.port,
            cred.proto,
            cred.user.replace(',', ";"),
            cred.pass.as_deref().unwrap_or("").replace(',', ";"),
            if cred.active { "valid" } else { "locked" }
        ));
    }

    content
}
