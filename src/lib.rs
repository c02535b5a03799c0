//! # orabrute-rs
//!
//! Oracle RDBMS 口令爆破工具。用户名/密码组合写入临时 credfile,
//! 真正的认证由 nmap 的 `oracle-brute` 脚本完成, 本 crate 负责构造
//! 参数并把脚本输出解析为服务、SID 和凭证记录。
//!
//! ```text
//! orabrute-rs --target 10.0.0.5 --sid ORCL --user-file users.txt --pass-file passwords.txt
//! ```

pub mod cli;
pub mod common;
pub mod credentials;
pub mod nmap;
pub mod oracle;
pub mod output;
