//! Samples as comma-separated values.
//!
//! The output has a `x,y` header followed by one row per sample. Undefined values are written as
//! Rust formats them (`NaN`, `inf`, `-inf`), so every sample keeps its row.

use deriv_compute::numerical::Sample;
use std::io::{self, Write};

/// Writes the samples to `out` as CSV.
pub fn write_samples<W: Write>(samples: &[Sample], mut out: W) -> io::Result<()> {
    writeln!(out, "x,y")?;
    for sample in samples {
        writeln!(out, "{},{}", sample.x, sample.y)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn rows_in_order() {
        let samples = [
            Sample { x: -1.0, y: -1.0 },
            Sample { x: 0.0, y: f64::NAN },
            Sample { x: 0.5, y: f64::INFINITY },
            Sample { x: 1.0, y: 1.25 },
        ];
        let mut out = Vec::new();
        write_samples(&samples, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "x,y\n-1,-1\n0,NaN\n0.5,inf\n1,1.25\n",
        );
    }
}
