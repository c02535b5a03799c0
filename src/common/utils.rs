use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

/// 从文件中读取行, 跳过空行和 # 注释
pub fn read_lines_from_file(file_path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            lines.push(line.to_string());
        }
    }
    
    Ok(lines)
}

/// 创建等待外部进程时使用的进度指示, silent 时返回隐藏的进度条
pub fn create_spinner(message: &str, silent: bool) -> indicatif::ProgressBar {
    if silent {
        return indicatif::ProgressBar::hidden();
    }
    
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_lines_skips_blank_and_comments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# oracle defaults").unwrap();
        writeln!(file, "system").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  scott  ").unwrap();
        file.flush().unwrap();

        let lines = read_lines_from_file(file.path()).unwrap();
        assert_eq!(lines, vec!["system".to_string(), "scott".to_string()]);
    }

    #[test]
    fn silent_spinner_is_hidden() {
        let pb = create_spinner("nmap", true);
        assert!(pb.is_hidden());
        pb.finish_and_clear();
    }

    #[test]
    fn read_lines_missing_file_is_error() {
        assert!(read_lines_from_file("/nonexistent/orabrute/users.txt").is_err());
    }
}
