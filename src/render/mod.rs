use std::io;

use crate::result;

pub mod json;

pub trait Renderer {
    fn render(&mut self, result: &result::AccessLogAnalyzerResult) -> io::Result<()>;
}
