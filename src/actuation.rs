//! Actuation velocity tables for the jet outlets.

use crate::config::{ActuationConfig, Harmonic};
use crate::format::general;
use anyhow::{Context, Result};
use std::{f64::consts::PI, fs::File, io::BufWriter, path::Path};

/// Significant digits of the table values.
const SIG_DIGITS: usize = 8;

/// Evaluate the actuation signal, the sum of every harmonic at time `t`.
pub fn signal(harmonics: &[Harmonic], t: f64) -> f64 {
    harmonics
        .iter()
        .map(|har| har.amplitude * (2.0 * PI * har.frequency * t).sin())
        .sum()
}

/// Time grid from 0 to `end_time` included, with spacing at most `time_step`.
pub fn time_grid(end_time: f64, time_step: f64) -> Vec<f64> {
    let n_steps = (end_time / time_step).ceil() as usize;
    (0..=n_steps)
        .map(|i_step| end_time * i_step as f64 / n_steps as f64)
        .collect()
}

/// Velocity of a jet pointing `angle_deg` degrees from the positive x axis.
pub fn project(magnitude: f64, angle_deg: f64) -> [f64; 3] {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    [magnitude * cos, magnitude * sin, 0.0]
}

/// Table generator for every configured jet.
pub struct Synthesizer {
    cfg: ActuationConfig,
}

impl Synthesizer {
    pub fn new(cfg: ActuationConfig) -> Self {
        Self { cfg }
    }

    /// Write one `time,Ux,Uy,Uz` table per jet into `dir`.
    pub fn write_tables<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        let times = time_grid(self.cfg.end_time, self.cfg.time_step);
        log::info!("writing {} rows per table", times.len());

        let magnitudes: Vec<_> = times
            .iter()
            .map(|&t| signal(&self.cfg.harmonics, t))
            .collect();

        for jet in &self.cfg.jets {
            let (sin, cos) = jet.angle_deg.to_radians().sin_cos();
            log::info!(
                "{} jet direction: {} deg (cos: {cos:.4}, sin: {sin:.4})",
                jet.name,
                jet.angle_deg
            );

            let file = dir.join(&jet.file);
            write_table(&file, &times, &magnitudes, jet.angle_deg)
                .with_context(|| format!("failed to write {} jet table", jet.name))?;
            log::info!("wrote {file:?}");
        }

        Ok(())
    }
}

fn write_table(file: &Path, times: &[f64], magnitudes: &[f64], angle_deg: f64) -> Result<()> {
    let out = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(out));

    writer
        .write_record(["time", "Ux", "Uy", "Uz"])
        .context("failed to write header")?;

    for (&t, &magnitude) in times.iter().zip(magnitudes) {
        let [ux, uy, uz] = project(magnitude, angle_deg);
        writer
            .write_record([t, ux, uy, uz].map(|val| general(val, SIG_DIGITS)))
            .with_context(|| format!("failed to write row at t = {t}"))?;
    }

    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_harmonics() -> Vec<Harmonic> {
        ActuationConfig::default().harmonics
    }

    #[test]
    fn signal_vanishes_at_start() {
        assert_eq!(signal(&reference_harmonics(), 0.0), 0.0);
    }

    #[test]
    fn signal_peaks_near_first_amplitude_at_quarter_period() {
        let harmonics = reference_harmonics();
        let t = 0.25 / harmonics[0].frequency;
        let magnitude = signal(&harmonics, t);

        let tol = harmonics[1].amplitude;
        assert!((magnitude - harmonics[0].amplitude).abs() <= tol);

        for angle_deg in [135.0, 225.0] {
            let [ux, uy, uz] = project(magnitude, angle_deg);
            assert!(((ux * ux + uy * uy).sqrt() - harmonics[0].amplitude).abs() <= tol);
            assert_eq!(uz, 0.0);
        }
    }

    #[test]
    fn symmetric_jets_share_x_and_mirror_y() {
        let top = project(0.18, 135.0);
        let bottom = project(0.18, 225.0);
        assert!((top[0] - bottom[0]).abs() < 1e-12);
        assert!((top[1] + bottom[1]).abs() < 1e-12);
        assert!(top[0] < 0.0 && top[1] > 0.0);
    }

    #[test]
    fn time_grid_includes_end_time() {
        let times = time_grid(1.0, 0.3);
        assert_eq!(times.len(), 5);
        assert_eq!(times[0], 0.0);
        assert_eq!(times[4], 1.0);
        assert!(times.windows(2).all(|pair| pair[1] - pair[0] <= 0.3));

        assert_eq!(time_grid(525.0, 0.00025).len(), 2_100_001);
    }
}
