use serde::{Serialize, Serializer};

use crate::log_parser::log_events::AccessLogEntry;

/// One of the slowest requests of a log file.
#[derive(Serialize, PartialEq, Eq, Clone, Debug)]
pub struct SlowRequest {
    pub ip: String,
    pub date: String,
    pub method: String,
    pub url: String,
    pub duration: u64,
}

impl<'a> From<&'a AccessLogEntry> for SlowRequest {
    fn from(entry: &'a AccessLogEntry) -> SlowRequest {
        SlowRequest {
            ip: entry.ip.clone(),
            date: entry.time.clone(),
            method: entry.method.clone(),
            url: entry.url.clone(),
            duration: entry.duration,
        }
    }
}

/// Statistics of one log file. Field order is the key order of the JSON
/// document.
#[derive(Serialize, PartialEq, Eq, Clone, Debug)]
pub struct AccessLogAnalyzerResult {
    pub total_requests: usize,
    #[serde(serialize_with = "serialize_as_map")]
    pub total_stat: Vec<(String, usize)>,
    pub top_ips: Vec<(String, usize)>,
    pub top_longest: Vec<SlowRequest>,
}

// A Vec keeps the methods in first-seen order, which a HashMap would lose.
fn serialize_as_map<S>(counts: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(counts.iter().map(|(key, count)| (key, count)))
}
