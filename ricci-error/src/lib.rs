//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// lets `#[derive(ErrorKind)]` resolve `ricci_error::EXPR` inside this crate's own tests
extern crate self as ricci_error;

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to stderr, highlighting the regions of `input` the error
    /// originated from.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so the
    /// report has to be written to a stream directly.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Writes the report for this error to the given writer.
    pub fn write_report<W: io::Write>(&self, src_id: &str, input: &str, writer: W) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), writer)
    }
}

#[cfg(test)]
mod tests {
    use ricci_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown function `{}`", name),
        labels = ["this call".to_string(), format!("{} argument(s)", count)],
        help = "only `sin`, `cos`, `tan` and `cot` are known",
    )]
    struct UnknownFunction {
        name: String,
        count: usize,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "nothing to see here")]
    struct Bare;

    /// Renders the report without terminal colors.
    fn render(err: &Error, input: &str) -> String {
        let mut out = Vec::new();
        err.write_report("input", input, &mut out).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn report_contains_message_labels_and_help() {
        let input = "foo(r, theta)";
        let err = Error::new(vec![0..4, 4..12], UnknownFunction {
            name: "foo".to_string(),
            count: 2,
        });
        let text = render(&err, input);

        assert!(text.contains("unknown function `foo`"));
        assert!(text.contains("this call"));
        assert!(text.contains("2 argument(s)"));
        assert!(text.contains("only `sin`, `cos`, `tan` and `cot` are known"));
    }

    #[test]
    fn report_without_labels() {
        let err = Error::new(vec![0..1], Bare);
        let text = render(&err, "x");
        assert!(text.contains("nothing to see here"));
    }
}
