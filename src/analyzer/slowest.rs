use crate::log_parser::log_events::AccessLogEntry;
use crate::result::SlowRequest;

/// Keeps the `capacity` slowest requests seen so far, slowest first.
///
/// Requests with equal durations keep the order in which they arrived. A
/// request only as slow as the fastest kept one does not displace it.
#[derive(Debug, Clone)]
pub struct SlowestRequests {
    capacity: usize,
    requests: Vec<SlowRequest>,
}

impl SlowestRequests {
    pub fn new(capacity: usize) -> SlowestRequests {
        SlowestRequests {
            capacity,
            requests: Vec::with_capacity(capacity + 1),
        }
    }

    pub fn add(&mut self, entry: &AccessLogEntry) {
        let admit = self.requests.len() < self.capacity
            || self
                .requests
                .last()
                .map_or(false, |fastest| entry.duration > fastest.duration);

        if !admit {
            return;
        }

        self.requests.push(SlowRequest::from(entry));
        self.requests.sort_by(|a, b| b.duration.cmp(&a.duration));
        self.requests.truncate(self.capacity);
    }

    pub fn requests(&self) -> &[SlowRequest] {
        &self.requests
    }
}
