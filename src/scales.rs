use crate::data_types::SeriesInput;
use crate::layout::GraphArea;

/// Categorical scale mapping group labels to contiguous pixel bands of equal
/// width, with positions rounded to integer pixels (leftover pixels are
/// centered).
#[derive(Clone, Debug)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f32, f32),
    start: f32,
    step: f32,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f32, f32)) -> Self {
        let span = range.1 - range.0;
        let n = domain.len();
        let step = if n == 0 {
            0.0
        } else {
            (span / n as f32).floor()
        };
        // Center the leftover pixels left by the rounded step.
        let start = (range.0 + (span - step * n as f32) * 0.5).round();
        Self {
            domain,
            range,
            start,
            step,
        }
    }

    /// Starting pixel of the band for a label, or None for unknown labels.
    pub fn map(&self, label: &str) -> Option<f32> {
        let idx = self.domain.iter().position(|d| d == label)?;
        Some(self.start + idx as f32 * self.step)
    }

    /// Starting pixel of the band at a domain index.
    pub fn map_index(&self, index: usize) -> Option<f32> {
        if index >= self.domain.len() {
            return None;
        }
        Some(self.start + index as f32 * self.step)
    }

    pub fn bandwidth(&self) -> f32 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }
}

/// Continuous scale mapping a numeric domain to a pixel range, optionally
/// clamped so out-of-range inputs map to the nearest boundary.
#[derive(Clone, Debug)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        Self {
            domain: (d_min, d_max),
            range,
            clamp: false,
        }
    }

    pub fn with_clamp(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn map(&self, value: f64) -> f32 {
        let t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        let t = if self.clamp { t.clamp(0.0, 1.0) } else { t };
        let res = self.range.0 + t as f32 * (self.range.1 - self.range.0);
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    pub fn format_tick(&self, value: f64) -> String {
        if value.abs() < 0.001 && value.abs() > 0.0 {
            format!("{:.4}", value)
        } else if value.abs() > 1000.0 {
            format!("{:.0}", value)
        } else {
            format!("{:.2}", value)
        }
    }
}

/// Y domain for a bar chart: `[min, max]` of the flattened values, with the
/// minimum forced to 0 when all values are nonnegative so bars share a
/// baseline. Empty input yields `(0, 0)`.
pub fn y_domain(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 0.0);
    }
    if min > 0.0 {
        min = 0.0;
    }
    (min, max)
}

/// The two scales a bar chart renders through.
#[derive(Clone, Debug)]
pub struct ChartScales {
    pub x: BandScale,
    pub y: LinearScale,
}

impl ChartScales {
    pub fn compute(series: &SeriesInput, area: &GraphArea) -> Self {
        let x = BandScale::new(series.groups.clone(), (0.0, area.width));
        let y = LinearScale::new(y_domain(series.flat_y()), (0.0, area.height)).with_clamp();
        Self { x, y }
    }
}

/// d3-style nice tick values covering `[start, stop]` with roughly `count`
/// steps of 1, 2, 5 or 10 times a power of ten.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
        let step = (stop - start) / count.max(1.0);
        if !step.is_finite() || step == 0.0 {
            return None;
        }
        let power = step.log10().floor();
        let error = step / 10f64.powf(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        let (i1, i2, inc) = if power < 0.0 {
            let inc = 10f64.powf(-power) / factor;
            let mut i1 = (start * inc).round() as i64;
            let mut i2 = (stop * inc).round() as i64;
            if (i1 as f64) / inc < start {
                i1 += 1;
            }
            if (i2 as f64) / inc > stop {
                i2 -= 1;
            }
            (i1, i2, -inc)
        } else {
            let inc = 10f64.powf(power) * factor;
            let mut i1 = (start / inc).round() as i64;
            let mut i2 = (stop / inc).round() as i64;
            if (i1 as f64) * inc < start {
                i1 += 1;
            }
            if (i2 as f64) * inc > stop {
                i2 -= 1;
            }
            (i1, i2, inc)
        };

        if !inc.is_finite() || inc == 0.0 {
            return None;
        }
        Some((i1, i2, inc))
    }

    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (a, b) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_spec(a, b, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let n = (i2 - i1 + 1) as usize;
    let mut out = Vec::with_capacity(n);
    for k in 0..n {
        let i = i1 + k as i64;
        out.push(if inc < 0.0 {
            i as f64 / -inc
        } else {
            i as f64 * inc
        });
    }
    if reverse {
        out.reverse();
    }
    out
}
