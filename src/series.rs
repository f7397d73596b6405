//! Two-column time series and the preprocessing stages of the spectral pipeline.

use crate::error::Error;
use crate::stats::compute_mean;
use anyhow::Result;
use std::{fs, path::Path};

/// Ordered `(time, value)` samples with strictly increasing times.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    time: Vec<f64>,
    vals: Vec<f64>,
}

impl TimeSeries {
    /// Load a whitespace-delimited two-column text file.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    /// [`Error::DataAccess`] if the file cannot be read, [`Error::Format`] if a row
    /// does not hold exactly two numbers, if times are not strictly increasing,
    /// or if the file holds no samples.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents = fs::read_to_string(file).map_err(|source| Error::DataAccess {
            path: file.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, file)
    }

    fn parse(contents: &str, file: &Path) -> Result<Self> {
        let format_err = |line: usize, reason: String| Error::Format {
            path: file.to_path_buf(),
            line,
            reason,
        };

        let mut time = Vec::new();
        let mut vals = Vec::new();
        let mut n_lines = 0;
        for (i_line, line) in contents.lines().enumerate() {
            let line_no = i_line + 1;
            n_lines = line_no;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<_> = line.split_whitespace().collect();
            if fields.len() != 2 {
                let reason = format!("expected 2 columns, found {}", fields.len());
                return Err(format_err(line_no, reason).into());
            }
            let mut row = [0.0; 2];
            for (ele, field) in row.iter_mut().zip(&fields) {
                *ele = field
                    .parse()
                    .map_err(|_| format_err(line_no, format!("{field:?} is not a number")))?;
            }

            if let Some(&prev) = time.last() {
                if !(row[0] > prev) {
                    let reason = format!("time {} does not follow {prev}", row[0]);
                    return Err(format_err(line_no, reason).into());
                }
            }
            time.push(row[0]);
            vals.push(row[1]);
        }

        if time.is_empty() {
            let reason = "file holds no samples".to_string();
            return Err(format_err(n_lines.max(1), reason).into());
        }

        Ok(Self { time, vals })
    }

    /// Build a series from separate time and value vectors.
    ///
    /// Times are assumed strictly increasing and both vectors of equal length.
    #[cfg(test)]
    pub fn from_vecs(time: Vec<f64>, vals: Vec<f64>) -> Self {
        debug_assert_eq!(time.len(), vals.len());
        Self { time, vals }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn vals(&self) -> &[f64] {
        &self.vals
    }

    /// Keep the samples with time in `[start, end]`.
    ///
    /// # Errors
    /// [`Error::InsufficientData`] if fewer than `min_samples` samples remain.
    pub fn window(&self, start: f64, end: f64, min_samples: usize) -> Result<Self> {
        let (time, vals): (Vec<_>, Vec<_>) = self
            .time
            .iter()
            .zip(&self.vals)
            .map(|(&t, &val)| (t, val))
            .filter(|&(t, _)| t >= start && t <= end)
            .unzip();

        if time.len() < min_samples {
            return Err(Error::InsufficientData {
                found: time.len(),
                required: min_samples,
                start,
                end,
            }
            .into());
        }

        Ok(Self { time, vals })
    }

    /// Subtract the mean value from every sample.
    pub fn detrend(&self) -> Self {
        let mean = compute_mean(&self.vals);
        Self {
            time: self.time.clone(),
            vals: self.vals.iter().map(|val| val - mean).collect(),
        }
    }
}
