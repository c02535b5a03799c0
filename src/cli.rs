use clap::Parser;
use std::path::PathBuf;
use crate::credentials::CredentialOptions;

#[derive(Parser, Debug)]
#[clap(
    name = "orabrute-rs",
    version,
    about = "Oracle RDBMS login utility - drives nmap's oracle-brute script and collects credentials"
)]
pub struct Args {
    /// Target IP, hostname, IP range (192.168.1.1-254) or CIDR (192.168.1.0/24), comma separated
    #[clap(short, long, required_unless_present = "target_file")]
    pub target: Option<String>,
    
    /// File with one target per line
    #[clap(short = 'f', long, conflicts_with = "target")]
    pub target_file: Option<PathBuf>,
    
    /// Oracle TNS listener port
    #[clap(short, long, default_value_t = 1521)]
    pub port: u16,
    
    /// The instance (SID) to authenticate against
    #[clap(long, default_value = "XE")]
    pub sid: String,
    
    /// Single username to try
    #[clap(short, long)]
    pub username: Option<String>,
    
    /// Single password to try
    #[clap(long)]
    pub password: Option<String>,
    
    /// Username file for brute forcing
    #[clap(long)]
    pub user_file: Option<PathBuf>,
    
    /// Password file for brute forcing
    #[clap(long)]
    pub pass_file: Option<PathBuf>,
    
    /// File with "user password" pairs, one per line
    #[clap(long)]
    pub userpass_file: Option<PathBuf>,
    
    /// Try a blank password for every user
    #[clap(long)]
    pub blank_passwords: bool,
    
    /// Try the username as the password for every user
    #[clap(long)]
    pub user_as_pass: bool,
    
    /// How fast to bruteforce, 0 (slowest) to 5 (no delay)
    #[clap(short, long, default_value_t = 5, value_parser = clap::value_parser!(i32).range(0..=5))]
    pub bruteforce_speed: i32,
    
    /// Path to the nmap binary
    #[clap(long, default_value = "nmap")]
    pub nmap_path: PathBuf,
    
    /// Output file
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    
    /// Output format (txt, json, csv)
    #[clap(long, default_value = "txt", value_parser = ["txt", "json", "csv"])]
    pub output_format: String,
    
    /// Log file
    #[clap(long)]
    pub log_file: Option<PathBuf>,
    
    /// Verbose output (also passes -v to nmap)
    #[clap(short, long)]
    pub verbose: bool,
    
    /// Silent mode (no banner, errors only)
    #[clap(short, long)]
    pub silent: bool,
}

impl Args {
    pub fn credential_options(&self) -> CredentialOptions {
        CredentialOptions {
            username: self.username.clone(),
            password: self.password.clone(),
            user_file: self.user_file.clone(),
            pass_file: self.pass_file.clone(),
            userpass_file: self.userpass_file.clone(),
            blank_passwords: self.blank_passwords,
            user_as_pass: self.user_as_pass,
        }
    }
}
