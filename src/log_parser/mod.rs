pub mod log_events;

use self::log_events::AccessLogEntry;

/// Parses a single access log line, `None` if the line does not have the
/// expected shape.
pub fn parse(line: &str) -> Option<AccessLogEntry> {
    match AccessLogEntry::new_from_log_line(line) {
        Ok(entry) => Some(entry),
        Err(err) => {
            debug!("Skipped a line: {} ({:?})", err, line);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let line = r#"127.0.0.1 - - [10/Oct/2023:13:55:36] "GET /index.html" 200 512 "-" "curl/7.64" 120"#;

        let result = parse(line).unwrap();

        assert_eq!(result.ip, "127.0.0.1");
        assert_eq!(result.duration, 120);
    }

    #[test]
    fn test_parse_ignore_broken_lines() {
        assert_eq!(parse(""), None);
        assert_eq!(parse(r#"127.0.0.1 - - [10/Oct/2023:13:55:36] "GET /index.html 200"#), None);
    }
}
