use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use anyhow::{Result, anyhow};
use ipnetwork::IpNetwork;

/// 校验目标参数并转换为 nmap 可接受的目标列表
///
/// 支持单个 IP、CIDR (192.168.1.0/24)、范围 (192.168.1.1-254 或
/// 192.168.1.1-192.168.1.254) 以及主机名, 多个目标以逗号分隔。
pub fn parse_targets(target: &str) -> Result<Vec<String>> {
    let mut specs = Vec::new();
    
    for part in target.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        
        if part.contains('/') {
            let network = IpNetwork::from_str(part)
                .map_err(|_| anyhow!("Invalid CIDR: {}", part))?;
            specs.push(network.to_string());
        } else if IpAddr::from_str(part).is_ok() {
            specs.push(part.to_string());
        } else if part.contains('-') && part.chars().next().map_or(false, |c| c.is_ascii_digit()) {
            parse_range(part, &mut specs)?;
        } else if is_hostname(part) {
            specs.push(part.to_string());
        } else {
            return Err(anyhow!("Invalid target: {}", part));
        }
    }
    
    if specs.is_empty() {
        return Err(anyhow!("No valid targets in '{}'", target));
    }
    
    Ok(specs)
}

/// 解析IP范围格式
fn parse_range(range: &str, specs: &mut Vec<String>) -> Result<()> {
    let parts: Vec<&str> = range.split('-').collect();
    if parts.len() != 2 {
        return Err(anyhow!("Invalid IP range: {}", range));
    }
    
    let start_ip = Ipv4Addr::from_str(parts[0].trim())
        .map_err(|_| anyhow!("Invalid start IP: {}", parts[0]))?;
    let start_octets = start_ip.octets();
    
    let end_ip = if parts[1].trim().contains('.') {
        Ipv4Addr::from_str(parts[1].trim())
            .map_err(|_| anyhow!("Invalid end IP: {}", parts[1]))?
    } else {
        // 只有最后一个部分 (192.168.1.1-254)
        let last_octet = parts[1].trim().parse::<u8>()
            .map_err(|_| anyhow!("Invalid end octet: {}", parts[1]))?;
        Ipv4Addr::new(start_octets[0], start_octets[1], start_octets[2], last_octet)
    };
    
    let start_u32 = u32::from(start_ip);
    let end_u32 = u32::from(end_ip);
    
    if start_u32 > end_u32 {
        return Err(anyhow!("Start IP is greater than end IP: {} > {}", start_ip, end_ip));
    }
    
    let end_octets = end_ip.octets();
    if start_octets[..3] == end_octets[..3] {
        // nmap 原生支持最后一段的范围写法
        specs.push(format!(
            "{}.{}.{}.{}-{}",
            start_octets[0], start_octets[1], start_octets[2], start_octets[3], end_octets[3]
        ));
    } else {
        // 跨 /24 的范围拆成最少的 CIDR 块, 避免参数列表过长
        specs.extend(range_to_cidrs(start_u32, end_u32));
    }
    
    Ok(())
}

/// 把 [start, end] 拆成对齐的 CIDR 块
fn range_to_cidrs(start: u32, end: u32) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut cur = u64::from(start);
    let end = u64::from(end);
    
    while cur <= end {
        let mut bits = if cur == 0 { 32 } else { cur.trailing_zeros().min(32) };
        while bits > 0 && cur + (1u64 << bits) - 1 > end {
            bits -= 1;
        }
        
        let ip = Ipv4Addr::from(cur as u32);
        if bits == 0 {
            blocks.push(ip.to_string());
        } else {
            blocks.push(format!("{}/{}", ip, 32 - bits));
        }
        cur += 1u64 << bits;
    }
    
    blocks
}

/// 目标是否为 IPv6 地址或网段
pub fn is_ipv6(spec: &str) -> bool {
    spec.contains(':')
}

/// nmap 一次只能扫描一个地址族, 不允许 IPv4 与 IPv6 混用
///
/// 主机名不参与判断。
pub fn check_address_family(specs: &[String]) -> Result<()> {
    let has_v6 = specs.iter().any(|s| is_ipv6(s));
    let has_v4 = specs
        .iter()
        .any(|s| !is_ipv6(s) && s.starts_with(|c: char| c.is_ascii_digit()));
    
    if has_v6 && has_v4 {
        return Err(anyhow!("Cannot mix IPv4 and IPv6 targets in one scan"));
    }
    
    Ok(())
}

fn is_hostname(s: &str) -> bool {
    s.len() <= 253
        && !s.starts_with('-')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        && s.chars().any(|c| c.is_ascii_alphabetic())
}
