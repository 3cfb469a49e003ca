use std::io;
use std::io::BufRead;

use crate::log_parser;
use crate::result;

pub mod counter;
pub mod slowest;

use self::counter::FrequencyCounter;
use self::slowest::SlowestRequests;

/// How many client addresses and slow requests end up in the result.
pub const TOP_COUNT: usize = 3;

/// Running statistics for a single log source.
pub struct LogAggregator {
    total_count: usize,
    method_counts: FrequencyCounter,
    ip_counts: FrequencyCounter,
    slowest: SlowestRequests,
}

impl LogAggregator {
    pub fn new() -> LogAggregator {
        LogAggregator {
            total_count: 0,
            method_counts: FrequencyCounter::new(),
            ip_counts: FrequencyCounter::new(),
            slowest: SlowestRequests::new(TOP_COUNT),
        }
    }

    /// Every line counts towards the total, only parseable ones towards the
    /// breakdowns.
    pub fn ingest(&mut self, line: &str) {
        self.total_count += 1;

        if let Some(entry) = log_parser::parse(line) {
            self.method_counts.add(&entry.method);
            self.ip_counts.add(&entry.ip);
            self.slowest.add(&entry);
        }
    }

    pub fn finalize(&self) -> result::AccessLogAnalyzerResult {
        result::AccessLogAnalyzerResult {
            total_requests: self.total_count,
            total_stat: self.method_counts.entries().to_vec(),
            top_ips: self.ip_counts.most_common(TOP_COUNT),
            top_longest: self.slowest.requests().to_vec(),
        }
    }
}

impl Default for LogAggregator {
    fn default() -> LogAggregator {
        LogAggregator::new()
    }
}

pub fn analyze_iterator<I, T>(lines: I) -> result::AccessLogAnalyzerResult
where
    I: Iterator<Item = T>,
    T: AsRef<str>,
{
    let mut aggregator = LogAggregator::new();

    for line in lines {
        aggregator.ingest(line.as_ref());
    }

    aggregator.finalize()
}

/// Reads `reader` to the end. Lines that are not valid UTF-8 are decoded
/// lossily so they still count as requests.
pub fn analyze_reader<R: BufRead>(mut reader: R) -> io::Result<result::AccessLogAnalyzerResult> {
    let mut aggregator = LogAggregator::new();
    let mut buffer: Vec<u8> = Vec::new();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }

        let mut line = &buffer[..];
        if line.ends_with(b"\n") {
            line = &line[..line.len() - 1];
        }
        if line.ends_with(b"\r") {
            line = &line[..line.len() - 1];
        }

        aggregator.ingest(&String::from_utf8_lossy(line));
    }

    Ok(aggregator.finalize())
}
