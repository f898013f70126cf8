use crate::dns::sinkhole::normalize_candidate;
use sinkhole_dns_domain::Action;
use std::collections::HashMap;
use std::net::IpAddr;

/// One usable line of a verdict list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub key: String,
    pub action: Action,
}

/// Parse a single list line.
///
/// Accepted forms:
/// - `key` (action defaults to `black`)
/// - `key action` where action is `black`, `white`, `log` or `check`
/// - hosts format `0.0.0.0 domain` / `127.0.0.1 domain`, always `black`;
///   `127.0.0.1 white` is still an action line for the address itself
///
/// Blank lines and `#` / `!` comments yield `None`, as do unknown actions.
pub fn parse_list_line(line: &str) -> Option<ParsedEntry> {
    let line = line.split('#').next().unwrap_or_default().trim();

    if line.is_empty() || line.starts_with('!') {
        return None;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();

    // hosts file format: "addr domain"
    if parts.len() >= 2
        && matches!(parts[0], "0.0.0.0" | "127.0.0.1" | "::" | "::1")
        && parts[1].parse::<Action>().is_err()
    {
        let domain = parts[1];
        if matches!(
            domain,
            "localhost" | "0.0.0.0" | "broadcasthost" | "ip6-localhost" | "ip6-loopback"
        ) {
            return None;
        }
        return Some(ParsedEntry {
            key: normalize_key(domain),
            action: Action::Black,
        });
    }

    let action = match parts.get(1) {
        Some(word) => word.parse::<Action>().ok()?,
        None => Action::Black,
    };

    let key = normalize_key(parts[0]);
    if key.is_empty() {
        return None;
    }

    Some(ParsedEntry { key, action })
}

/// Parse a whole list. A key listed twice keeps its last action.
pub fn parse_list_text(text: &str) -> HashMap<String, Action> {
    text.lines()
        .filter_map(parse_list_line)
        .map(|entry| (entry.key, entry.action))
        .collect()
}

/// Addresses in canonical text form, names lower-cased without the root dot.
fn normalize_key(raw: &str) -> String {
    match raw.parse::<IpAddr>() {
        Ok(ip) => ip.to_string(),
        Err(_) => normalize_candidate(raw),
    }
}
