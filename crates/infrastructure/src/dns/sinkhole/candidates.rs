use hickory_proto::rr::{RData, Record};
use smallvec::{smallvec, SmallVec};
use std::net::IpAddr;

/// Lower-case and strip the trailing root-label dot.
pub fn normalize_candidate(candidate: &str) -> String {
    candidate.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Keys to probe for one normalised candidate, most specific first.
///
/// An address yields itself. A name yields itself followed by each parent
/// domain, stopping before the bare top-level label, so that a listed
/// `evil.example` also covers `cdn.evil.example`.
pub fn lookup_keys(candidate: &str) -> SmallVec<[&str; 8]> {
    let mut keys: SmallVec<[&str; 8]> = smallvec![candidate];
    if candidate.parse::<IpAddr>().is_ok() {
        return keys;
    }

    let mut rest = candidate;
    while let Some(dot) = rest.find('.') {
        rest = &rest[dot + 1..];
        if !rest.contains('.') {
            break;
        }
        keys.push(rest);
    }
    keys
}

/// The value an answer record resolves to: the address for A/AAAA, otherwise
/// the rightmost field of the record's presentation form.
pub fn record_value(record: &Record) -> Option<String> {
    match record.data() {
        RData::A(a) => Some(a.0.to_string()),
        RData::AAAA(aaaa) => Some(aaaa.0.to_string()),
        _ => record
            .to_string()
            .split_whitespace()
            .last()
            .map(str::to_string),
    }
}
