use regex::{Captures, Regex};

lazy_static! {
    /// `<ip> - - [<time>] "<request>" <status> <bytes> "<referer>" "<agent>" <duration>`
    ///
    /// Anchored at the start only, anything after the duration is ignored.
    static ref ACCESS_LOG_LINE: Regex = Regex::new(concat!(
        r#"^(?P<ip>\S+) - - \[(?P<time>[^\]]+)\] "(?P<request>[^"]+)" "#,
        r#"(?P<status>[0-9]{3}) (?P<bytes>[0-9]+) "#,
        r#""(?P<referer>[^"]*)" "(?P<agent>[^"]*)" (?P<duration>[0-9]+)"#,
    ))
    .unwrap();
}

/// Placeholder for a request line that carries only a method.
pub const NO_URL: &str = "-";

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct AccessLogEntry {
    pub ip: String,
    pub time: String,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub bytes: u64,
    pub referer: String,
    pub agent: String,
    pub duration: u64,
}

impl AccessLogEntry {
    pub fn new_from_log_line(log_line: &str) -> Result<AccessLogEntry, &'static str> {
        let captures = match ACCESS_LOG_LINE.captures(log_line) {
            Some(captures) => captures,
            None => return Err("Uncomprehensible access logline"),
        };

        let mut request_parts = captures["request"].split_whitespace();

        let method = match request_parts.next() {
            Some(method) => method,
            None => return Err("Request line without a method"),
        };

        let url = request_parts.next().unwrap_or(NO_URL);

        let status = match captures["status"].parse() {
            Ok(number) => number,
            Err(_) => return Err("Status code out of range"),
        };

        // Only reported, never aggregated, so an oversized count saturates.
        let bytes = captures["bytes"].parse().unwrap_or(u64::MAX);

        let duration = match captures["duration"].parse() {
            Ok(number) => number,
            Err(_) => return Err("Duration out of range"),
        };

        Ok(AccessLogEntry {
            ip: field(&captures, "ip"),
            time: field(&captures, "time"),
            method: method.to_string(),
            url: url.to_string(),
            status,
            bytes,
            referer: field(&captures, "referer"),
            agent: field(&captures, "agent"),
            duration,
        })
    }
}

fn field(captures: &Captures, name: &str) -> String {
    captures[name].to_string()
}
