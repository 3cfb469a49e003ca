use std::io;
use std::io::prelude::*;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

use crate::render::Renderer;
use crate::result;

const INDENT: &[u8] = b"    ";

/// Pretty printing that escapes every non-ASCII character as `\uXXXX`
/// (UTF-16 surrogate pairs above U+FFFF), the way Python's `json` module
/// does by default.
struct AsciiPrettyFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn new() -> AsciiPrettyFormatter<'a> {
        AsciiPrettyFormatter {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl<'a> Formatter for AsciiPrettyFormatter<'a> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;

        for (index, character) in fragment.char_indices() {
            if character.is_ascii() {
                continue;
            }

            writer.write_all(fragment[start..index].as_bytes())?;

            let mut units = [0u16; 2];
            for unit in character.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }

            start = index + character.len_utf8();
        }

        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_object_value(writer)
    }
}

/// Writes the result as an indented, ASCII-only JSON document followed by a
/// newline.
pub struct JsonRenderer<'a> {
    stream: &'a mut dyn Write,
}

impl<'a> JsonRenderer<'a> {
    pub fn new(stream: &'a mut dyn Write) -> JsonRenderer {
        JsonRenderer { stream }
    }
}

impl<'a> Renderer for JsonRenderer<'a> {
    fn render(&mut self, result: &result::AccessLogAnalyzerResult) -> io::Result<()> {
        {
            let mut serializer =
                Serializer::with_formatter(&mut *self.stream, AsciiPrettyFormatter::new());
            result.serialize(&mut serializer)?;
        }
        self.stream.write_all(b"\n")?;
        self.stream.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::str;

    use super::*;
    use crate::result::SlowRequest;

    struct MockWrite {
        written: Vec<u8>,
    }

    impl Write for MockWrite {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingWrite;

    impl Write for FailingWrite {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn get_result_fixture() -> result::AccessLogAnalyzerResult {
        result::AccessLogAnalyzerResult {
            total_requests: 3,
            total_stat: vec![(String::from("POST"), 1), (String::from("GET"), 1)],
            top_ips: vec![(String::from("127.0.0.1"), 2)],
            top_longest: vec![SlowRequest {
                ip: String::from("127.0.0.1"),
                date: String::from("10/Oct/2023:13:55:36"),
                method: String::from("GET"),
                url: String::from("/index.html"),
                duration: 120,
            }],
        }
    }

    #[test]
    fn test_json_renderer() {
        let mut mock_write = MockWrite { written: vec![] };

        {
            let mut renderer = JsonRenderer::new(&mut mock_write);
            renderer.render(&get_result_fixture()).unwrap();
        }

        let expected = r#"{
    "total_requests": 3,
    "total_stat": {
        "POST": 1,
        "GET": 1
    },
    "top_ips": [
        [
            "127.0.0.1",
            2
        ]
    ],
    "top_longest": [
        {
            "ip": "127.0.0.1",
            "date": "10/Oct/2023:13:55:36",
            "method": "GET",
            "url": "/index.html",
            "duration": 120
        }
    ]
}
"#;

        assert_eq!(str::from_utf8(&mock_write.written).unwrap(), expected);
    }

    #[test]
    fn test_json_renderer_empty_result() {
        let mut mock_write = MockWrite { written: vec![] };

        {
            let mut renderer = JsonRenderer::new(&mut mock_write);
            let result = result::AccessLogAnalyzerResult {
                total_requests: 0,
                total_stat: vec![],
                top_ips: vec![],
                top_longest: vec![],
            };
            renderer.render(&result).unwrap();
        }

        let expected = "{\n    \"total_requests\": 0,\n    \"total_stat\": {},\n    \"top_ips\": [],\n    \"top_longest\": []\n}\n";

        assert_eq!(str::from_utf8(&mock_write.written).unwrap(), expected);
    }

    #[test]
    fn test_json_renderer_escapes_non_ascii() {
        let mut mock_write = MockWrite { written: vec![] };

        let mut result = get_result_fixture();
        result.top_longest[0].url = String::from("/caf\u{e9}?q=\u{fffd}");
        result.top_longest[0].method = String::from("GET\u{1f600}");

        {
            let mut renderer = JsonRenderer::new(&mut mock_write);
            renderer.render(&result).unwrap();
        }

        let written = str::from_utf8(&mock_write.written).unwrap().to_string();
        assert!(written.is_ascii());
        assert!(written.contains(r#""url": "/caf\u00e9?q=\ufffd","#));
        assert!(written.contains(r#""method": "GET\ud83d\ude00","#));

        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["top_longest"][0]["url"], "/caf\u{e9}?q=\u{fffd}");
        assert_eq!(parsed["top_longest"][0]["method"], "GET\u{1f600}");
    }

    #[test]
    fn test_json_renderer_write_error() {
        let mut failing_write = FailingWrite;

        let mut renderer = JsonRenderer::new(&mut failing_write);

        assert!(renderer.render(&get_result_fixture()).is_err());
    }
}
