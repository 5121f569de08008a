use deriv_compute::Error;
use log::debug;

/// Reports the error to stderr, with the offending parts of `input` highlighted.
///
/// The `ariadne` reports can only be printed, not formatted, so if printing fails the plain
/// one-line message is printed instead.
pub fn report_to_stderr(err: &Error, input: &str) {
    eprintln!("{}:", err.kind_name());
    if let Err(io_err) = err.report_to_stderr("input", input) {
        debug!("could not print error report: {}", io_err);
        eprintln!("{}", err.message());
    }
}
