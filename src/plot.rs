use anyhow::{Context, Result};
use plotters::prelude::*;
use std::{ops::Range, path::Path};

/// Labels and ranges of the spectrum figure.
pub struct Figure<'a> {
    /// Label of the signal axis.
    pub signal_label: &'a str,
    /// Time range of the signal panel.
    pub time_range: Range<f64>,
    /// Strouhal range of the spectrum panel.
    pub st_range: Range<f64>,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl Figure<'_> {
    /// Draw the signal against time above the power against Strouhal number and save as PNG.
    pub fn render<P: AsRef<Path>>(
        &self,
        file: P,
        time: &[f64],
        signal: &[f64],
        st: &[f64],
        power: &[f64],
    ) -> Result<()> {
        let file = file.as_ref();
        let root = BitMapBackend::new(file, self.size).into_drawing_area();
        root.fill(&WHITE).context("failed to fill background")?;
        let panels = root.split_evenly((2, 1));

        let font_size = (self.size.1 / 40) as i32;
        let caption = format!("{} vs Time", self.signal_label);
        let points = time.iter().zip(signal).map(|(&t, &v)| (t, v));
        draw_panel(
            &panels[0],
            &caption,
            ("Time [s]", self.signal_label),
            self.time_range.clone(),
            points,
            &BLUE,
            font_size,
        )
        .context("failed to draw signal panel")?;

        let points = st
            .iter()
            .zip(power)
            .map(|(&s, &p)| (s, p))
            .filter(|(s, _)| self.st_range.contains(s));
        draw_panel(
            &panels[1],
            "Frequency Spectrum (FFT)",
            ("Strouhal number (St = f*D/U)", "Power"),
            self.st_range.clone(),
            points,
            &RED,
            font_size,
        )
        .context("failed to draw spectrum panel")?;

        root.present()
            .with_context(|| format!("failed to write {file:?}"))?;

        Ok(())
    }
}

fn draw_panel<DB, I>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    caption: &str,
    (x_desc, y_desc): (&str, &str),
    x_range: Range<f64>,
    points: I,
    color: &RGBColor,
    font_size: i32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    I: Iterator<Item = (f64, f64)>,
{
    let points: Vec<_> = points.collect();
    let y_range = padded_range(points.iter().map(|&(_, y)| y));

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", font_size))
        .margin(font_size / 2)
        .x_label_area_size(font_size * 2)
        .y_label_area_size(font_size * 4)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(("sans-serif", font_size * 3 / 4))
        .axis_desc_style(("sans-serif", font_size))
        .draw()?;

    chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;

    Ok(())
}

/// Range spanning every value, widened by 5% of its extent on each side.
fn padded_range<I: Iterator<Item = f64>>(vals: I) -> Range<f64> {
    let (min, max) = vals.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), val| {
        (min.min(val), max.max(val))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = if max > min {
        0.05 * (max - min)
    } else {
        0.5 * min.abs().max(1.0)
    };
    (min - pad)..(max + pad)
}
