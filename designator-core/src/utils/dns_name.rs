//! DNS 名称处理
//!
//! 内部统一使用小写、以 `.` 结尾的完整域名。

use std::net::Ipv4Addr;

const IPV4_REVERSE_SUFFIX: &str = "in-addr.arpa.";
const IPV6_REVERSE_SUFFIX: &str = "ip6.arpa.";

/// 规范化为小写、以 `.` 结尾的完整域名
pub fn normalize_fqdn(name: &str) -> String {
    let trimmed = name.trim().trim_end_matches('.').to_ascii_lowercase();
    format!("{trimmed}.")
}

/// 由主机名和 Zone 推导记录名：`<host>.<zone>`
pub fn record_name(host: &str, zone: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    format!("{host}.{}", normalize_fqdn(zone))
}

/// IPv4 地址对应的 PTR 名称，例如 `10.0.1.5` -> `5.1.0.10.in-addr.arpa.`
pub fn reverse_pointer(ip: Ipv4Addr) -> String {
    let [a, b, c, d] = ip.octets();
    format!("{d}.{c}.{b}.{a}.{IPV4_REVERSE_SUFFIX}")
}

/// 是否为反向解析 Zone
pub fn is_reverse_zone(zone: &str) -> bool {
    let zone = normalize_fqdn(zone);
    zone.ends_with(IPV4_REVERSE_SUFFIX) || zone.ends_with(IPV6_REVERSE_SUFFIX)
}

/// `name` 是否落在 `zone` 之内（含 Zone 顶点）
pub fn zone_contains(zone: &str, name: &str) -> bool {
    let zone = normalize_fqdn(zone);
    let name = normalize_fqdn(name);
    name == zone || name.ends_with(&format!(".{zone}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fqdn() {
        assert_eq!(normalize_fqdn("Example.COM"), "example.com.");
        assert_eq!(normalize_fqdn("example.com."), "example.com.");
        assert_eq!(normalize_fqdn(" example.com.. "), "example.com.");
    }

    #[test]
    fn test_record_name() {
        assert_eq!(record_name("Web-01", "example.com."), "web-01.example.com.");
        assert_eq!(record_name("db", "internal"), "db.internal.");
    }

    #[test]
    fn test_reverse_pointer() {
        assert_eq!(
            reverse_pointer(Ipv4Addr::new(10, 0, 1, 5)),
            "5.1.0.10.in-addr.arpa."
        );
    }

    #[test]
    fn test_zone_contains() {
        assert!(zone_contains("1.0.10.in-addr.arpa.", "5.1.0.10.in-addr.arpa."));
        assert!(zone_contains("10.in-addr.arpa", "5.1.0.10.in-addr.arpa."));
        assert!(zone_contains("0.10.in-addr.arpa.", "5.1.0.10.in-addr.arpa."));
        assert!(!zone_contains("2.0.10.in-addr.arpa.", "5.1.0.10.in-addr.arpa."));
        assert!(!zone_contains("ample.com.", "web.example.com."));
        assert!(zone_contains("example.com.", "example.com"));
    }

    #[test]
    fn test_is_reverse_zone() {
        assert!(is_reverse_zone("1.0.10.in-addr.arpa."));
        assert!(is_reverse_zone("8.b.d.0.1.0.0.2.ip6.arpa"));
        assert!(!is_reverse_zone("example.com."));
    }
}
