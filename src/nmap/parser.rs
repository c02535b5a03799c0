use lazy_static::lazy_static;
use regex::Regex;
use crate::nmap::{HostResult, PortResult, ScriptOutput};

lazy_static! {
    static ref REPORT_RE: Regex = Regex::new(r"^Nmap scan report for (\S+)(?: \(([^)]+)\))?").unwrap();
    static ref PORT_RE: Regex = Regex::new(r"^(\d+)/(tcp|udp|sctp)\s+(\S+)(?:\s+(\S+))?").unwrap();
    static ref SCRIPT_HEAD_RE: Regex = Regex::new(r"^([A-Za-z0-9_.-]+):(?: (.*))?$").unwrap();
}

// 脚本输出当前挂在哪里
enum Slot {
    Port,
    Host,
}

struct OpenScript {
    slot: Slot,
    id: String,
    lines: Vec<String>,
}

/// 解析 nmap 普通(-oN)格式的输出
///
/// 脚本块以 `| id: ` 开头, 以 `|_` 行结束; 两字符前缀被去掉,
/// 保留脚本自身的缩进。
pub fn parse_normal_output(text: &str) -> Vec<HostResult> {
    let mut hosts: Vec<HostResult> = Vec::new();
    let mut open: Option<OpenScript> = None;
    let mut in_host_scripts = false;

    for raw in text.lines() {
        let line = raw.trim_end_matches('\r');

        if let Some(rest) = line.strip_prefix('|') {
            let last = rest.starts_with('_');
            let content = rest.get(1..).unwrap_or("");

            match open.as_mut() {
                Some(script) => script.lines.push(content.to_string()),
                None => {
                    let caps = match SCRIPT_HEAD_RE.captures(content) {
                        Some(caps) => caps,
                        None => continue,
                    };
                    let first = caps.get(2).map(|m| m.as_str().trim_end()).unwrap_or("");
                    let mut lines = Vec::new();
                    if !first.is_empty() || !last {
                        lines.push(first.to_string());
                    }
                    open = Some(OpenScript {
                        slot: if in_host_scripts { Slot::Host } else { Slot::Port },
                        id: caps[1].to_string(),
                        lines,
                    });
                }
            }

            if last {
                if let Some(script) = open.take() {
                    attach(&mut hosts, script);
                }
            }
            continue;
        }

        // 非脚本行意味着之前的脚本块已结束
        if let Some(script) = open.take() {
            attach(&mut hosts, script);
        }

        if let Some(caps) = REPORT_RE.captures(line) {
            in_host_scripts = false;
            let (addr, hostname) = match caps.get(2) {
                Some(ip) => (ip.as_str().to_string(), Some(caps[1].to_string())),
                None => (caps[1].to_string(), None),
            };
            hosts.push(HostResult { addr, hostname, ports: Vec::new(), scripts: Vec::new() });
        } else if line.starts_with("Host script results") {
            in_host_scripts = true;
        } else if let Some(caps) = PORT_RE.captures(line) {
            let host = match hosts.last_mut() {
                Some(host) => host,
                None => continue,
            };
            let portid = match caps[1].parse::<u16>() {
                Ok(p) => p,
                Err(_) => continue,
            };
            host.ports.push(PortResult {
                portid,
                proto: caps[2].to_string(),
                state: caps[3].to_string(),
                service: caps.get(4).map(|m| m.as_str().to_string()).unwrap_or_default(),
                scripts: Vec::new(),
            });
        }
    }

    if let Some(script) = open.take() {
        attach(&mut hosts, script);
    }

    hosts
}

fn attach(hosts: &mut [HostResult], script: OpenScript) {
    let host = match hosts.last_mut() {
        Some(host) => host,
        None => return,
    };
    let output = ScriptOutput { id: script.id, output: script.lines.join("\n") };
    match script.slot {
        Slot::Port => {
            if let Some(port) = host.ports.last_mut() {
                port.scripts.push(output);
            }
        }
        Slot::Host => host.scripts.push(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Starting Nmap 5.51 ( http://nmap.org ) at 2011-06-01 10:00 CDT
Nmap scan report for 10.0.0.5
Host is up (0.00040s latency).
PORT     STATE SERVICE
1521/tcp open  oracle
| oracle-brute: 
|   Accounts
|     scott:tiger => Login correct
|     outln:<empty> => Account locked
|   Statistics
|_    Performed 12 guesses in 3 seconds, average tps: 4

Nmap scan report for db02.corp.local (10.0.0.6)
Host is up (0.00031s latency).
PORT     STATE  SERVICE
1521/tcp closed oracle
1522/tcp open   rna-lsnr
|_oracle-brute: ERROR: Script execution failed

Host script results:
|_clock-skew: 0s

Nmap done: 2 IP addresses (2 hosts up) scanned in 3.21 seconds
";

    #[test]
    fn hosts_and_ports() {
        let hosts = parse_normal_output(SAMPLE);
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].addr, "10.0.0.5");
        assert_eq!(hosts[0].hostname, None);
        assert_eq!(hosts[1].addr, "10.0.0.6");
        assert_eq!(hosts[1].hostname.as_deref(), Some("db02.corp.local"));

        let ports: Vec<(u16, &str)> = hosts[1].ports.iter().map(|p| (p.portid, p.state.as_str())).collect();
        assert_eq!(ports, vec![(1521, "closed"), (1522, "open")]);
        assert_eq!(hosts[1].ports[1].service, "rna-lsnr");
    }

    #[test]
    fn multi_line_script_block_keeps_indentation() {
        let hosts = parse_normal_output(SAMPLE);
        let output = hosts[0].ports[0].script("oracle-brute").unwrap();
        assert_eq!(
            output,
            "\n  Accounts\n    scott:tiger => Login correct\n    outln:<empty> => Account locked\n  Statistics\n    Performed 12 guesses in 3 seconds, average tps: 4"
        );
    }

    #[test]
    fn single_line_script_and_host_scripts() {
        let hosts = parse_normal_output(SAMPLE);
        assert_eq!(
            hosts[1].ports[1].script("oracle-brute"),
            Some("ERROR: Script execution failed")
        );
        assert!(hosts[1].ports[0].scripts.is_empty());
        assert_eq!(hosts[1].scripts.len(), 1);
        assert_eq!(hosts[1].scripts[0].id, "clock-skew");
    }

    #[test]
    fn garbage_yields_nothing() {
        assert!(parse_normal_output("").is_empty());
        assert!(parse_normal_output("| stray: line\n1521/tcp open oracle\n").is_empty());
    }
}
