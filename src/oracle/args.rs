use std::path::Path;
use crate::common::targets;
use crate::oracle::{OracleConfig, SCRIPT_ID};

/// 根据 bruteforce 速度等级得到每次尝试之间的延迟(秒)
///
/// 10g XE 这类小实例在大量认证尝试下会耗尽进程池, 低等级用来放慢速度。
pub fn brute_delay(speed: i32) -> f64 {
    match speed {
        4 => 0.25,
        3 => 0.5,
        2 => 1.0,
        1 => 15.0,
        0 => 300.0,
        _ => 0.0,
    }
}

/// 把配置转换为 nmap 参数
pub fn build_args(config: &OracleConfig, credfile: &Path) -> Vec<String> {
    let mut args = vec![
        "-Pn".to_string(),
        "--script".to_string(),
        SCRIPT_ID.to_string(),
    ];

    let script_args = [
        format!("tns.sid={}", config.sid),
        "brute.mode=creds".to_string(),
        format!("brute.credfile={}", credfile.display()),
        "brute.threads=1".to_string(),
        format!("brute.delay={}", brute_delay(config.bruteforce_speed)),
    ];
    args.push("--script-args".to_string());
    args.push(script_args.join(","));

    args.push("-n".to_string());
    if !config.targets.is_empty() && config.targets.iter().all(|t| targets::is_ipv6(t)) {
        args.push("-6".to_string());
    }
    if config.verbose {
        args.push("-v".to_string());
    }

    args.push("-p".to_string());
    args.push(config.rport.to_string());
    args.extend(config.targets.iter().cloned());

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OracleConfig {
        OracleConfig {
            targets: vec!["10.0.0.5".into(), "10.0.1.0/24".into()],
            ..OracleConfig::default()
        }
    }

    #[test]
    fn delay_table() {
        assert_eq!(brute_delay(4), 0.25);
        assert_eq!(brute_delay(3), 0.5);
        assert_eq!(brute_delay(2), 1.0);
        assert_eq!(brute_delay(1), 15.0);
        assert_eq!(brute_delay(0), 300.0);
        for other in [-1, 5, 6, 100] {
            assert_eq!(brute_delay(other), 0.0);
        }
    }

    #[test]
    fn default_args() {
        let args = build_args(&config(), Path::new("/tmp/orabrute-creds-x.txt"));
        assert_eq!(
            args,
            vec![
                "-Pn",
                "--script",
                "oracle-brute",
                "--script-args",
                "tns.sid=XE,brute.mode=creds,brute.credfile=/tmp/orabrute-creds-x.txt,brute.threads=1,brute.delay=0",
                "-n",
                "-p",
                "1521",
                "10.0.0.5",
                "10.0.1.0/24",
            ]
        );
    }

    #[test]
    fn sid_speed_and_verbose() {
        let cfg = OracleConfig {
            sid: "ORCL".into(),
            bruteforce_speed: 1,
            verbose: true,
            rport: 1522,
            ..config()
        };
        let args = build_args(&cfg, Path::new("/tmp/c.txt"));
        assert_eq!(
            args[4],
            "tns.sid=ORCL,brute.mode=creds,brute.credfile=/tmp/c.txt,brute.threads=1,brute.delay=15"
        );
        assert_eq!(&args[5..9], &["-n", "-v", "-p", "1522"]);
    }

    #[test]
    fn ipv6_targets_add_family_flag() {
        let cfg = OracleConfig {
            targets: vec!["fe80::1".into(), "2001:db8::/64".into()],
            ..OracleConfig::default()
        };
        let args = build_args(&cfg, Path::new("/tmp/c.txt"));
        assert_eq!(&args[5..9], &["-n", "-6", "-p", "1521"]);

        // IPv4 目标不加 -6
        let args = build_args(&config(), Path::new("/tmp/c.txt"));
        assert!(!args.iter().any(|a| a == "-6"));
    }
}
