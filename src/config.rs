use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Case configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// Every field has a default matching the reference case, so partial files are accepted.
/// See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Actuation signal parameters.
    pub actuation: ActuationConfig,
    /// Force coefficient extraction parameters.
    pub extraction: ExtractionConfig,
    /// Spectral analysis parameters.
    pub spectrum: SpectrumConfig,
}

/// Sinusoidal component of the actuation signal.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Harmonic {
    /// Amplitude (m/s).
    pub amplitude: f64,
    /// Frequency (Hz).
    pub frequency: f64,
}

/// Actuation jet outlet.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Jet {
    /// Outlet name, used in log messages.
    pub name: String,
    /// Jet direction in degrees from the positive x axis.
    pub angle_deg: f64,
    /// Output table file, relative to the case directory.
    pub file: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActuationConfig {
    /// Final time (s), should match `endTime` in `controlDict`.
    pub end_time: f64,
    /// Table time step (s), should be smaller than the solver `deltaT`.
    pub time_step: f64,
    /// Sinusoidal components of the signal.
    pub harmonics: Vec<Harmonic>,
    /// Outlets the signal is projected on.
    pub jets: Vec<Jet>,
}

impl Default for ActuationConfig {
    fn default() -> Self {
        Self {
            end_time: 525.0,
            time_step: 0.00025,
            harmonics: vec![
                Harmonic {
                    amplitude: 0.18,
                    frequency: 0.168,
                },
                Harmonic {
                    amplitude: 0.016,
                    frequency: 0.252,
                },
            ],
            jets: vec![
                Jet {
                    name: "top".to_string(),
                    angle_deg: 135.0,
                    file: "actuation_data_top.csv".to_string(),
                },
                Jet {
                    name: "bottom".to_string(),
                    angle_deg: 225.0,
                    file: "actuation_data_bottom.csv".to_string(),
                },
            ],
        }
    }
}

/// Column of `forceCoeffs.dat` after the time column.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Coefficient {
    Cm,
    Cd,
    Cl,
    #[serde(rename = "Cl(f)")]
    ClFront,
    #[serde(rename = "Cl(r)")]
    ClRear,
}

impl Coefficient {
    /// Index of the coefficient in a `forceCoeffs.dat` row, time being field 0.
    pub fn field(self) -> usize {
        match self {
            Coefficient::Cm => 1,
            Coefficient::Cd => 2,
            Coefficient::Cl => 3,
            Coefficient::ClFront => 4,
            Coefficient::ClRear => 5,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Output of the `forceCoeffs` function object, relative to the case directory.
    pub input_file: String,
    /// Two-column output series, relative to the case directory.
    pub output_file: String,
    /// Coefficient written next to the time.
    pub coefficient: Coefficient,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            input_file: "postProcessing/forceCoeffs1/0/forceCoeffs.dat".to_string(),
            output_file: "signal_Cl.dat".to_string(),
            coefficient: Coefficient::Cl,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpectrumConfig {
    /// Start of the analysis window (s), excludes the initial transient.
    pub t_start: f64,
    /// End of the analysis window (s).
    pub t_end: f64,
    /// Minimum number of samples inside the window.
    pub min_samples: usize,
    /// Upper limit of the Strouhal axis in the plot.
    pub st_max_plot: f64,
    /// Free-stream velocity (m/s).
    pub u_inf: f64,
    /// Characteristic length of the body (m).
    pub length: f64,
    /// Label of the signal axis in the plot.
    pub signal_label: String,
    /// Plot size in pixels.
    pub image_size: (u32, u32),
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            t_start: 160.0,
            t_end: 525.0,
            min_samples: 20,
            st_max_plot: 0.5,
            u_inf: 0.4,
            length: 1.0,
            signal_label: "Cl".to_string(),
            image_size: (3600, 2400),
        }
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded. Missing fields take their default value.
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.actuation
            .validate()
            .context("invalid actuation parameters")?;
        self.extraction
            .validate()
            .context("invalid extraction parameters")?;
        self.spectrum
            .validate()
            .context("invalid spectrum parameters")?;
        Ok(())
    }
}

impl ActuationConfig {
    fn validate(&self) -> Result<()> {
        check_num(self.end_time, f64::MIN_POSITIVE..).context("invalid end time")?;
        check_num(self.time_step, f64::MIN_POSITIVE..=self.end_time)
            .context("invalid time step")?;

        if self.harmonics.is_empty() {
            bail!("at least one harmonic is required");
        }
        for (i_har, har) in self.harmonics.iter().enumerate() {
            if !har.amplitude.is_finite() {
                bail!("harmonic {i_har} amplitude must be finite, but is {}", har.amplitude);
            }
            check_num(har.frequency, 0.0..f64::INFINITY)
                .with_context(|| format!("invalid harmonic {i_har} frequency"))?;
        }

        if self.jets.is_empty() {
            bail!("at least one jet is required");
        }
        for jet in &self.jets {
            if !jet.angle_deg.is_finite() {
                bail!("jet {:?} angle must be finite", jet.name);
            }
            if jet.file.is_empty() {
                bail!("jet {:?} file name must not be empty", jet.name);
            }
        }
        Ok(())
    }
}

impl ExtractionConfig {
    fn validate(&self) -> Result<()> {
        if self.input_file.is_empty() {
            bail!("input file name must not be empty");
        }
        if self.output_file.is_empty() {
            bail!("output file name must not be empty");
        }
        Ok(())
    }
}

impl SpectrumConfig {
    fn validate(&self) -> Result<()> {
        if !(self.t_start < self.t_end) {
            bail!(
                "window start must be smaller than window end, but is [{}, {}]",
                self.t_start,
                self.t_end
            );
        }
        check_num(self.min_samples, 2..).context("invalid minimum number of samples")?;
        check_num(self.st_max_plot, f64::MIN_POSITIVE..f64::INFINITY)
            .context("invalid plot Strouhal limit")?;
        check_num(self.u_inf, f64::MIN_POSITIVE..f64::INFINITY)
            .context("invalid free-stream velocity")?;
        check_num(self.length, f64::MIN_POSITIVE..f64::INFINITY)
            .context("invalid characteristic length")?;
        check_num(self.image_size.0, 1..).context("invalid image width")?;
        check_num(self.image_size.1, 1..).context("invalid image height")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
