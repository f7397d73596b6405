use crate::actuation::Synthesizer;
use crate::config::Config;
use crate::extract::{read_coefficient, write_pairs};
use crate::plot::Figure;
use crate::series::TimeSeries;
use crate::spectrum::{PowerSpectrum, to_strouhal};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct Manager {
    case_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(case_dir: P) -> Result<Self> {
        let case_dir = case_dir.as_ref().to_path_buf();

        let config_file = case_dir.join("afc.toml");
        let cfg = if config_file.is_file() {
            Config::from_file(&config_file).context("failed to construct cfg")?
        } else {
            log::warn!("{config_file:?} not found, using the reference configuration");
            Config::default()
        };
        log::info!("{cfg:#?}");

        Ok(Self { case_dir, cfg })
    }

    pub fn generate_actuation(&self) -> Result<()> {
        let cfg = &self.cfg.actuation;
        for (i_har, har) in cfg.harmonics.iter().enumerate() {
            log::info!(
                "harmonic {i_har}: A = {} m/s, f = {} Hz",
                har.amplitude,
                har.frequency
            );
        }
        log::info!(
            "end time: {} s, table time step: {} s",
            cfg.end_time,
            cfg.time_step
        );

        Synthesizer::new(cfg.clone())
            .write_tables(&self.case_dir)
            .context("failed to write actuation tables")?;

        Ok(())
    }

    pub fn extract_coefficient(&self) -> Result<()> {
        let cfg = &self.cfg.extraction;

        let input_file = self.case_dir.join(&cfg.input_file);
        log::info!("reading {input_file:?}");
        let pairs = read_coefficient(&input_file, cfg.coefficient)
            .context("failed to read force coefficients")?;
        log::info!("read {} {:?} samples", pairs.len(), cfg.coefficient);

        let output_file = self.case_dir.join(&cfg.output_file);
        write_pairs(&output_file, &pairs).context("failed to write coefficient series")?;
        log::info!("wrote {output_file:?}");

        Ok(())
    }

    pub fn analyze_spectrum<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = self.series_file(file);
        let file = file.as_path();
        let cfg = &self.cfg.spectrum;

        let series = TimeSeries::from_file(file).context("failed to load series")?;
        log::info!("loaded {} samples from {file:?}", series.len());

        let stable = series
            .window(cfg.t_start, cfg.t_end, cfg.min_samples)
            .context("failed to select analysis window")?;
        log::info!(
            "analyzing {} samples in [{:.1}, {:.1}] s",
            stable.len(),
            cfg.t_start,
            cfg.t_end
        );

        let spectrum =
            PowerSpectrum::compute(&stable.detrend()).context("failed to compute spectrum")?;
        log::info!(
            "dt: {:.6e} s, fs: {:.6e} Hz, resolution: {:.6e} Hz",
            spectrum.dt,
            spectrum.sample_rate(),
            spectrum.bin_width()
        );

        let st = to_strouhal(&spectrum.freqs, cfg.u_inf, cfg.length);
        if let Some(idx) = spectrum.peak_idx() {
            log::info!(
                "dominant peak: f = {:.6e} Hz, St = {:.4}, power = {:.6e}",
                spectrum.freqs[idx],
                st[idx],
                spectrum.power[idx]
            );
        }

        let figure = Figure {
            signal_label: &cfg.signal_label,
            time_range: cfg.t_start..cfg.t_end,
            st_range: 0.0..cfg.st_max_plot,
            size: cfg.image_size,
        };
        let plot_file = self.plot_file(file);
        figure
            .render(&plot_file, stable.time(), stable.vals(), &st, &spectrum.power)
            .context("failed to render spectrum plot")?;
        log::info!("wrote {plot_file:?}");

        Ok(())
    }

    /// Resolve a relative series path against the case directory.
    fn series_file<P: AsRef<Path>>(&self, file: P) -> PathBuf {
        self.case_dir.join(file)
    }

    fn plot_file(&self, series_file: &Path) -> PathBuf {
        let base = series_file
            .file_name()
            .map(|name| name.to_string_lossy().replace('.', "_"))
            .unwrap_or_default();
        self.case_dir.join(format!("spectrum_St_{base}.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_file_replaces_dots_of_base_name() {
        let mgr = Manager {
            case_dir: PathBuf::from("case"),
            cfg: Config::default(),
        };
        assert_eq!(
            mgr.plot_file(Path::new("post/signal_Cl.dat")),
            PathBuf::from("case/spectrum_St_signal_Cl_dat.png")
        );
    }

    #[test]
    fn series_file_resolves_against_case_dir() {
        let mgr = Manager {
            case_dir: PathBuf::from("case"),
            cfg: Config::default(),
        };
        assert_eq!(
            mgr.series_file("signal_Cl.dat"),
            PathBuf::from("case/signal_Cl.dat")
        );
        assert_eq!(
            mgr.series_file("/data/signal_Cl.dat"),
            PathBuf::from("/data/signal_Cl.dat")
        );
    }
}
