//! Time and coefficient columns of the `forceCoeffs` function object output.

use crate::config::Coefficient;
use crate::error::Error;
use crate::format::scientific;
use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

/// Fields per `forceCoeffs.dat` row: `Time Cm Cd Cl Cl(f) Cl(r)`.
const N_FIELDS: usize = 6;

/// Digits after the decimal point of the written values.
const PRECISION: usize = 6;

/// Read `(time, coefficient)` pairs, in file order.
///
/// # Errors
/// [`Error::DataAccess`] if the file cannot be read, [`Error::Format`] if a row
/// does not hold exactly six numbers or if the file holds no rows.
pub fn read_coefficient<P: AsRef<Path>>(file: P, coef: Coefficient) -> Result<Vec<(f64, f64)>> {
    let file = file.as_ref();
    let contents = fs::read_to_string(file).map_err(|source| Error::DataAccess {
        path: file.to_path_buf(),
        source,
    })?;
    parse_coefficient(&contents, file, coef)
}

fn parse_coefficient(contents: &str, file: &Path, coef: Coefficient) -> Result<Vec<(f64, f64)>> {
    let mut pairs = Vec::new();
    let mut n_lines = 0;
    for (i_line, line) in contents.lines().enumerate() {
        n_lines = i_line + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let format_err = |reason: String| Error::Format {
            path: file.to_path_buf(),
            line: i_line + 1,
            reason,
        };

        let fields: Vec<_> = line.split_whitespace().collect();
        if fields.len() != N_FIELDS {
            let reason = format!("expected {N_FIELDS} columns, found {}", fields.len());
            return Err(format_err(reason).into());
        }
        let parse = |field: &str| {
            field
                .parse::<f64>()
                .map_err(|_| format_err(format!("{field:?} is not a number")))
        };
        // Every field must be numeric, not only the extracted ones.
        let row = fields
            .iter()
            .map(|&field| parse(field))
            .collect::<Result<Vec<_>, _>>()?;

        pairs.push((row[0], row[coef.field()]));
    }

    if pairs.is_empty() {
        return Err(Error::Format {
            path: file.to_path_buf(),
            line: n_lines.max(1),
            reason: "file holds no samples".to_string(),
        }
        .into());
    }

    Ok(pairs)
}

/// Write headerless `time value` lines in `%.6e` style.
pub fn write_pairs<P: AsRef<Path>>(file: P, pairs: &[(f64, f64)]) -> Result<()> {
    let file = file.as_ref();
    let out = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(BufWriter::new(out));

    for &(t, val) in pairs {
        writer
            .write_record([scientific(t, PRECISION), scientific(val, PRECISION)])
            .with_context(|| format!("failed to write row at t = {t}"))?;
    }

    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Force coefficients
# dragDir               : (1 0 0)
# Time          Cm              Cd              Cl              Cl(f)           Cl(r)
0.05\t1.0e-3\t1.2\t-0.31\t0.1\t-0.4
0.1\t2.0e-3\t1.3\t0.27\t0.2\t-0.5

0.15\t3.0e-3\t1.1\t0.05\t0.3\t-0.6
";

    fn parse(contents: &str, coef: Coefficient) -> Result<Vec<(f64, f64)>> {
        parse_coefficient(contents, Path::new("forceCoeffs.dat"), coef)
    }

    #[test]
    fn lift_is_fourth_field_in_order() {
        let pairs = parse(SAMPLE, Coefficient::Cl).unwrap();
        assert_eq!(pairs, vec![(0.05, -0.31), (0.1, 0.27), (0.15, 0.05)]);
    }

    #[test]
    fn other_coefficients_are_selectable() {
        let drag = parse(SAMPLE, Coefficient::Cd).unwrap();
        assert_eq!(drag[1], (0.1, 1.3));
        let rear = parse(SAMPLE, Coefficient::ClRear).unwrap();
        assert_eq!(rear[2], (0.15, -0.6));
    }

    #[test]
    fn short_row_is_format_error() {
        let err = parse("# header\n0.05 1 2 3 4\n", Coefficient::Cl).unwrap_err();
        match err.downcast_ref::<Error>() {
            Some(Error::Format { line, .. }) => assert_eq!(*line, 2),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn file_without_rows_is_format_error() {
        for contents in ["# Force coefficients\n# Time Cm Cd Cl Cl(f) Cl(r)\n\n", ""] {
            let err = parse(contents, Coefficient::Cl).unwrap_err();
            match err.downcast_ref::<Error>() {
                Some(Error::Format { line, reason, .. }) => {
                    assert!(*line >= 1);
                    assert_eq!(reason, "file holds no samples");
                }
                other => panic!("expected format error, got {other:?}"),
            }
        }
    }

    #[test]
    fn pairs_are_written_space_separated_without_header() {
        let file = std::env::temp_dir().join("afctool_write_pairs.dat");
        write_pairs(&file, &[(0.0, 0.3), (0.05, -1.25e-3)]).unwrap();

        let contents = fs::read_to_string(&file).unwrap();
        assert_eq!(
            contents,
            "0.000000e+00 3.000000e-01\n5.000000e-02 -1.250000e-03\n"
        );
        fs::remove_file(&file).ok();
    }

    #[test]
    fn non_numeric_field_is_format_error() {
        let err = parse("0.05 1 2 3 4 (5)\n", Coefficient::Cl).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Format { line: 1, .. })
        ));
    }
}
