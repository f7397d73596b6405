//! One-sided power spectrum of a detrended series.

use crate::series::TimeSeries;
use crate::stats::{compute_mean_diff, linspace};
use anyhow::{Result, bail};
use rustfft::{FftPlanner, num_complex::Complex64};

/// One-sided power spectrum.
#[derive(Debug, Clone)]
pub struct PowerSpectrum {
    /// Frequency axis (Hz), `N/2` values from 0 to the Nyquist frequency.
    pub freqs: Vec<f64>,
    /// Power of each frequency, `(2/N * |X_k|)^2`.
    pub power: Vec<f64>,
    /// Mean sample spacing (s).
    pub dt: f64,
    /// Number of samples transformed.
    pub n_samples: usize,
}

impl PowerSpectrum {
    /// Compute the spectrum of a series, which should already be detrended.
    ///
    /// The sample spacing is the mean of the consecutive time differences;
    /// no window function is applied.
    pub fn compute(series: &TimeSeries) -> Result<Self> {
        let n_samples = series.len();
        if n_samples < 2 {
            bail!("at least 2 samples are required, but there are {n_samples}");
        }

        let dt = compute_mean_diff(series.time());
        if !(dt > 0.0) {
            bail!("mean sample spacing must be positive, but is {dt}");
        }

        let mut buffer: Vec<_> = series
            .vals()
            .iter()
            .map(|&val| Complex64::new(val, 0.0))
            .collect();
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n_samples);
        fft.process(&mut buffer);

        let n_half = n_samples / 2;
        let norm = 2.0 / n_samples as f64;
        let power = buffer[..n_half]
            .iter()
            .map(|coef| (norm * coef.norm()).powi(2))
            .collect();
        let freqs = linspace(0.0, 0.5 / dt, n_half);

        Ok(Self {
            freqs,
            power,
            dt,
            n_samples,
        })
    }

    /// Sample rate (Hz).
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.dt
    }

    /// Frequency resolution of the transform (Hz).
    pub fn bin_width(&self) -> f64 {
        self.sample_rate() / self.n_samples as f64
    }

    /// Index of the most powerful bin.
    ///
    /// The zero-frequency bin is skipped whenever another bin exists.
    pub fn peak_idx(&self) -> Option<usize> {
        let skip = usize::from(self.power.len() > 1);
        self.power
            .iter()
            .enumerate()
            .skip(skip)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
    }
}

/// Map frequencies to Strouhal numbers, `St = f * length / u_inf`.
pub fn to_strouhal(freqs: &[f64], u_inf: f64, length: f64) -> Vec<f64> {
    freqs.iter().map(|freq| freq * length / u_inf).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine_series(n_samples: usize, dt: f64, freq: f64) -> TimeSeries {
        let time: Vec<_> = (0..n_samples).map(|i| i as f64 * dt).collect();
        let vals = time.iter().map(|t| (2.0 * PI * freq * t).sin()).collect();
        TimeSeries::from_vecs(time, vals)
    }

    #[test]
    fn axis_is_increasing_with_half_length() {
        for n_samples in [20, 21, 64, 101] {
            let spectrum = PowerSpectrum::compute(&sine_series(n_samples, 0.1, 1.0)).unwrap();
            assert_eq!(spectrum.freqs.len(), n_samples / 2);
            assert_eq!(spectrum.power.len(), n_samples / 2);
            assert_eq!(spectrum.freqs[0], 0.0);
            assert!(spectrum.freqs.windows(2).all(|pair| pair[1] > pair[0]));
            assert!((spectrum.freqs.last().unwrap() - 5.0).abs() < 1e-9);
            assert!(spectrum.power.iter().all(|&p| p >= 0.0));
        }
    }

    #[test]
    fn power_of_bin_centered_sine_is_amplitude_squared() {
        // 8 periods over 64 samples land exactly on bin 8.
        let n_samples = 64;
        let time: Vec<_> = (0..n_samples).map(|i| i as f64).collect();
        let vals = time
            .iter()
            .map(|t| 0.5 * (2.0 * PI * 8.0 * t / n_samples as f64).cos())
            .collect();
        let spectrum = PowerSpectrum::compute(&TimeSeries::from_vecs(time, vals)).unwrap();

        assert_eq!(spectrum.peak_idx(), Some(8));
        assert!((spectrum.power[8] - 0.25).abs() < 1e-12);
        assert!(spectrum.power[3] < 1e-20);
    }

    #[test]
    fn dominant_peak_is_within_one_bin_of_signal_frequency() {
        let series = sine_series(1000, 0.01, 5.0)
            .window(2.0, 8.0, 20)
            .unwrap()
            .detrend();
        let spectrum = PowerSpectrum::compute(&series).unwrap();

        let peak_freq = spectrum.freqs[spectrum.peak_idx().unwrap()];
        assert!((peak_freq - 5.0).abs() <= spectrum.bin_width());
    }

    #[test]
    fn single_sample_is_rejected() {
        let series = TimeSeries::from_vecs(vec![0.0], vec![1.0]);
        assert!(PowerSpectrum::compute(&series).is_err());
    }

    #[test]
    fn doubling_velocity_halves_strouhal() {
        let freqs = [0.0, 0.1, 0.25, 1.0];
        let st = to_strouhal(&freqs, 0.4, 1.0);
        let st_fast = to_strouhal(&freqs, 0.8, 1.0);

        assert!((st[2] - 0.625).abs() < 1e-12);
        for (a, b) in st.iter().zip(&st_fast) {
            assert!((a - 2.0 * b).abs() < 1e-12);
        }
    }
}
