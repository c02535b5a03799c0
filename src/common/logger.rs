use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use anyhow::Context;
use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::{LevelFilter, info};

/// 覆盖默认日志级别的环境变量, 例如 ORABRUTE_LOG=trace
pub const LOG_ENV: &str = "ORABRUTE_LOG";

/// 初始化日志: -v 输出调试信息, -s 只输出错误
///
/// 指定 log_file 时以追加方式写入, 多次运行的记录保存在同一个文件里。
pub fn init(verbose: bool, silent: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let env = Env::default().filter_or(LOG_ENV, level_for(verbose, silent).to_string());
    let mut builder = Builder::from_env(env);
    
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stdout);
        }
    }
    
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });
    
    builder.try_init()?;
    
    if let Some(path) = log_file {
        info!("Logging to file: {}", path.display());
    }
    
    Ok(())
}

fn level_for(verbose: bool, silent: bool) -> LevelFilter {
    match (verbose, silent) {
        (true, _) => LevelFilter::Debug,
        (false, true) => LevelFilter::Error,
        (false, false) => LevelFilter::Info,
    }
}
