use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp at which the authority listed an indicator, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listed {
    pub year: u16,
    pub month: u8,
    pub day_of_month: u8,
    pub hour_of_day: u8,
    pub minute: u8,
    pub second: u8,
}

impl Listed {
    /// Returns `None` when the authority sent an impossible date.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day_of_month),
        )?
        .and_hms_opt(
            u32::from(self.hour_of_day),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }
}

/// Verdict metadata returned by the remote verdict authority for a listed indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistedRecord {
    pub source: String,
    pub listed: Listed,
    #[serde(rename = "blackListedDomainOrIP")]
    pub blacklisted_domain_or_ip: String,
    pub taxonomy: i32,
    pub score: i32,
}
