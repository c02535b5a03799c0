use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use tempfile::NamedTempFile;
use crate::common::utils;

/// 未指定用户名时使用的 Oracle 默认账户
pub const DEFAULT_USERS: &[&str] = &["system", "sys", "scott", "dbsnmp", "outln", "mdsys"];

/// 未指定密码时使用的常见 Oracle 默认口令
pub const DEFAULT_PASSWORDS: &[&str] = &["oracle", "manager", "tiger", "change_on_install", "password"];

#[derive(Debug, Clone, Default)]
pub struct CredentialOptions {
    pub username: Option<String>,
    pub password: Option<String>,
    pub user_file: Option<PathBuf>,
    pub pass_file: Option<PathBuf>,
    pub userpass_file: Option<PathBuf>,
    pub blank_passwords: bool,
    pub user_as_pass: bool,
}

/// 按配置生成 (用户名, 密码) 组合
///
/// 顺序: userpass 文件中的组合在前, 然后对每个用户依次尝试
/// 用户名作密码、空密码和密码列表。重复组合只保留第一次出现。
pub fn build_candidates(opts: &CredentialOptions) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    if let Some(path) = &opts.userpass_file {
        for line in read_list(path)? {
            // 只按第一个空白切分, 密码中可以带空格
            let (user, pass) = match line.split_once(char::is_whitespace) {
                Some((user, pass)) => (user, pass.trim_start()),
                None => (line.as_str(), ""),
            };
            pairs.push((user.to_string(), pass.to_string()));
        }
    }

    let mut users = Vec::new();
    if let Some(user) = &opts.username {
        users.push(user.clone());
    }
    if let Some(path) = &opts.user_file {
        users.extend(read_list(path)?);
    }

    let mut passwords = Vec::new();
    if let Some(pass) = &opts.password {
        passwords.push(pass.clone());
    }
    if let Some(path) = &opts.pass_file {
        passwords.extend(read_list(path)?);
    }

    // 完全没有配置任何来源时使用默认字典
    if users.is_empty() && pairs.is_empty() {
        users.extend(DEFAULT_USERS.iter().map(|s| s.to_string()));
    }
    if passwords.is_empty() && pairs.is_empty() && !opts.blank_passwords && !opts.user_as_pass {
        passwords.extend(DEFAULT_PASSWORDS.iter().map(|s| s.to_string()));
    }

    for user in &users {
        if opts.user_as_pass {
            pairs.push((user.clone(), user.clone()));
        }
        if opts.blank_passwords {
            pairs.push((user.clone(), String::new()));
        }
        for pass in &passwords {
            pairs.push((user.clone(), pass.clone()));
        }
    }

    let mut seen = HashSet::new();
    pairs.retain(|pair| seen.insert(pair.clone()));

    if pairs.is_empty() {
        return Err(anyhow!("No credential candidates configured"));
    }

    debug!("Generated {} credential candidates", pairs.len());
    Ok(pairs)
}

fn read_list(path: &Path) -> Result<Vec<String>> {
    utils::read_lines_from_file(path)
        .with_context(|| format!("Failed to read wordlist {}", path.display()))
}

/// nmap brute 库使用的 credfile, 每行一个 `user/pass`
///
/// 文件在 drop 时删除, 无论扫描成功与否。
pub struct CredFile {
    file: NamedTempFile,
    count: usize,
}

impl CredFile {
    pub fn create(pairs: &[(String, String)]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("orabrute-creds-")
            .suffix(".txt")
            .tempfile()
            .context("Failed to create temporary credential file")?;

        for (user, pass) in pairs {
            writeln!(file, "{}/{}", user, pass)
                .context("Failed to write credential file")?;
        }
        // nmap 读取前必须落盘
        file.as_file_mut().flush()?;
        file.as_file().sync_all()?;

        info!("Credential file ready with {} entries", pairs.len());
        Ok(CredFile { file, count: pairs.len() })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 立即删除文件
    pub fn close(self) -> Result<()> {
        self.file.close().context("Failed to remove credential file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn pair(u: &str, p: &str) -> (String, String) {
        (u.to_string(), p.to_string())
    }

    #[test]
    fn single_user_and_password() {
        let opts = CredentialOptions {
            username: Some("scott".into()),
            password: Some("tiger".into()),
            ..Default::default()
        };
        assert_eq!(build_candidates(&opts).unwrap(), vec![pair("scott", "tiger")]);
    }

    #[test]
    fn ordering_and_dedup() {
        let dir = tempdir().unwrap();
        let userpass = dir.path().join("userpass.txt");
        fs::write(&userpass, "system manager\nsys\n").unwrap();
        let users = dir.path().join("users.txt");
        fs::write(&users, "system\nsystem\n").unwrap();

        let opts = CredentialOptions {
            password: Some("manager".into()),
            user_file: Some(users),
            userpass_file: Some(userpass),
            blank_passwords: true,
            user_as_pass: true,
            ..Default::default()
        };
        let pairs = build_candidates(&opts).unwrap();
        assert_eq!(
            pairs,
            vec![
                pair("system", "manager"),
                pair("sys", ""),
                pair("system", "system"),
                pair("system", ""),
            ]
        );
    }

    #[test]
    fn userpass_password_keeps_spaces() {
        let dir = tempdir().unwrap();
        let userpass = dir.path().join("userpass.txt");
        fs::write(&userpass, "scott my secret\nsystem\tmanager\n").unwrap();

        let opts = CredentialOptions {
            userpass_file: Some(userpass),
            ..Default::default()
        };
        assert_eq!(
            build_candidates(&opts).unwrap(),
            vec![pair("scott", "my secret"), pair("system", "manager")]
        );
    }

    #[test]
    fn defaults_when_nothing_configured() {
        let pairs = build_candidates(&CredentialOptions::default()).unwrap();
        assert_eq!(pairs.len(), DEFAULT_USERS.len() * DEFAULT_PASSWORDS.len());
        assert_eq!(pairs[0], pair("system", "oracle"));
    }

    #[test]
    fn blank_passwords_alone_skip_default_passwords() {
        let opts = CredentialOptions {
            username: Some("dbsnmp".into()),
            blank_passwords: true,
            ..Default::default()
        };
        assert_eq!(build_candidates(&opts).unwrap(), vec![pair("dbsnmp", "")]);
    }

    #[test]
    fn missing_wordlist_is_error() {
        let opts = CredentialOptions {
            user_file: Some(PathBuf::from("/nonexistent/users.txt")),
            ..Default::default()
        };
        assert!(build_candidates(&opts).is_err());
    }

    #[test]
    fn credfile_lines_and_cleanup() {
        let cred = CredFile::create(&[pair("scott", "tiger"), pair("sys", "")]).unwrap();
        let path = cred.path().to_path_buf();
        assert_eq!(fs::read_to_string(&path).unwrap(), "scott/tiger\nsys/\n");
        assert_eq!(cred.len(), 2);
        drop(cred);
        assert!(!path.exists());
    }
}
