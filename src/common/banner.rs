use colored::*;

pub fn show() {
    let banner = r#"
     ██████╗ ██████╗  █████╗ ██████╗ ██████╗ ██╗   ██╗████████╗███████╗
    ██╔═══██╗██╔══██╗██╔══██╗██╔══██╗██╔══██╗██║   ██║╚══██╔══╝██╔════╝
    ██║   ██║██████╔╝███████║██████╔╝██████╔╝██║   ██║   ██║   █████╗  
    ██║   ██║██╔══██╗██╔══██║██╔══██╗██╔══██╗██║   ██║   ██║   ██╔══╝  
    ╚██████╔╝██║  ██║██║  ██║██████╔╝██║  ██║╚██████╔╝   ██║   ███████╗
     ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝ ╚═╝  ╚═╝ ╚═════╝    ╚═╝   ╚══════╝
    "#;
    
    println!("{}", banner.bright_red());
    println!("    {}", "Oracle RDBMS login utility (nmap oracle-brute driver)".bright_yellow());
    println!("    {}", format!("Version: {}", env!("CARGO_PKG_VERSION")).bright_yellow());
    println!();
}
