use std::collections::HashSet;
use lazy_static::lazy_static;
use regex::Regex;
use crate::output::{AuthRecord, NoteRecord, ServiceRecord};

lazy_static! {
    static ref INVALID_SID_RE: Regex = Regex::new(r#"TNS: The listener could not resolve ""#).unwrap();
    static ref NO_ACCOUNTS_RE: Regex = Regex::new(r"No valid accounts found").unwrap();
    static ref LOGIN_CORRECT_RE: Regex = Regex::new(r"Login correct|Valid credentials").unwrap();
    static ref ACCOUNT_LOCKED_RE: Regex = Regex::new(r"Account (?:is )?locked").unwrap();
    static ref SCRIPT_ERROR_RE: Regex = Regex::new(r"^\s*ERROR: (.*)").unwrap();
    static ref CREDS_RE: Regex = Regex::new(r"^\s+(\S+?):(\S*)\s+(?:=>|-)\s").unwrap();
}

/// 脚本输出中表示空密码的标记
pub const EMPTY_PASSWORD: &str = "<empty>";

/// 解析 oracle-brute 输出得到的事件
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEvent {
    InvalidSid,
    NoAccounts,
    ServiceFound(ServiceRecord),
    SidConfirmed(NoteRecord),
    ValidLogin { user: String, pass: String, record: AuthRecord },
    LockedAccount { user: String, record: AuthRecord },
    ScriptError(String),
    Unparseable(String),
}

/// 从 `  user:pass => ...` 形式的行中取出用户名和密码
///
/// 格式不符时返回 None; 密码可以为空。
pub fn extract_creds(line: &str) -> Option<(String, String)> {
    let caps = CREDS_RE.captures(line)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// 分类一段 oracle-brute 输出
///
/// `seen` 记录本次运行中已经上报过服务和 SID 的 (host, port),
/// 保证每个端口只上报一次。
pub fn parse_script_output(
    addr: &str,
    port: u16,
    sid: &str,
    output: &str,
    seen: &mut HashSet<(String, u16)>,
) -> Vec<ScriptEvent> {
    if INVALID_SID_RE.is_match(output) {
        return vec![ScriptEvent::InvalidSid];
    }
    if NO_ACCOUNTS_RE.is_match(output) {
        return vec![ScriptEvent::NoAccounts];
    }

    let mut events = Vec::new();

    for line in output.lines() {
        if LOGIN_CORRECT_RE.is_match(line) {
            let (user, pass) = match extract_creds(line) {
                Some(creds) => creds,
                None => {
                    events.push(ScriptEvent::Unparseable(line.to_string()));
                    continue;
                }
            };
            let pass = if pass == EMPTY_PASSWORD { String::new() } else { pass };
            report_once(addr, port, sid, seen, &mut events);
            let record = AuthRecord {
                host: addr.to_string(),
                port,
                proto: "tcp".to_string(),
                user: format!("{}/{}", sid, user),
                pass: Some(pass.clone()),
                active: true,
            };
            events.push(ScriptEvent::ValidLogin { user, pass, record });
        } else if ACCOUNT_LOCKED_RE.is_match(line) {
            let user = match extract_creds(line) {
                Some((user, _)) => user,
                None => {
                    events.push(ScriptEvent::Unparseable(line.to_string()));
                    continue;
                }
            };
            report_once(addr, port, sid, seen, &mut events);
            let record = AuthRecord {
                host: addr.to_string(),
                port,
                proto: "tcp".to_string(),
                user: format!("{}/{}", sid, user),
                pass: None,
                active: false,
            };
            events.push(ScriptEvent::LockedAccount { user, record });
        } else if let Some(caps) = SCRIPT_ERROR_RE.captures(line) {
            events.push(ScriptEvent::ScriptError(caps[1].trim_end().to_string()));
        }
    }

    events
}

fn report_once(
    addr: &str,
    port: u16,
    sid: &str,
    seen: &mut HashSet<(String, u16)>,
    events: &mut Vec<ScriptEvent>,
) {
    if !seen.insert((addr.to_string(), port)) {
        return;
    }
    events.push(ScriptEvent::ServiceFound(ServiceRecord {
        host: addr.to_string(),
        port,
        proto: "tcp".to_string(),
        name: "oracle".to_string(),
    }));
    events.push(ScriptEvent::SidConfirmed(NoteRecord {
        host: addr.to_string(),
        port,
        proto: "tcp".to_string(),
        ntype: "oracle.sid".to_string(),
        data: sid.to_string(),
    }));
}
