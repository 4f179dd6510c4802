//! Tick placement and formatting.

use super::config::{AxisConfig, AxisScale};

/// Relative tolerance for deciding whether a tick falls on a limit.
const EPS: f64 = 1e-9;

/// Tick label text. Log decades carry an exponent drawn as a superscript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickLabel {
    /// Plain text, e.g. `0.84`.
    Plain(String),
    /// `base` raised to `exponent`, e.g. `10` and `3`.
    Power {
        /// Base text.
        base: String,
        /// Exponent text.
        exponent: String,
    },
}

/// A tick position with an optional label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Data value.
    pub value: f64,
    /// Label, `None` for unlabelled ticks.
    pub label: Option<TickLabel>,
}

/// Major and minor ticks of one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisTicks {
    /// Major ticks, ascending.
    pub major: Vec<Tick>,
    /// Minor ticks, ascending.
    pub minor: Vec<Tick>,
}

impl AxisTicks {
    /// Ticks for `axis`.
    ///
    /// Log axes get labelled decades and unlabelled 2..9 subdivisions; linear
    /// axes get labelled "nice" steps and no minor ticks.
    #[must_use]
    pub fn for_axis(axis: &AxisConfig) -> Self {
        match axis.scale {
            AxisScale::Log => Self {
                major: log_decades(axis.min, axis.max)
                    .into_iter()
                    .map(|k| Tick {
                        value: 10f64.powi(k),
                        label: Some(TickLabel::Power {
                            base: "10".to_string(),
                            exponent: k.to_string(),
                        }),
                    })
                    .collect(),
                minor: log_subdivisions(axis.min, axis.max)
                    .into_iter()
                    .map(|value| Tick { value, label: None })
                    .collect(),
            },
            AxisScale::Linear => {
                let (step, values) = linear_ticks(axis.min, axis.max, 9);
                let decimals = step_decimals(step);
                Self {
                    major: values
                        .into_iter()
                        .map(|value| Tick {
                            value,
                            label: Some(TickLabel::Plain(format!("{value:.decimals$}"))),
                        })
                        .collect(),
                    minor: Vec::new(),
                }
            }
        }
    }
}

/// Exponents `k` with `min <= 10^k <= max`.
fn log_decades(min: f64, max: f64) -> Vec<i32> {
    if !(min > 0.0 && max > min) {
        return Vec::new();
    }
    let lo = (min.log10() - EPS).ceil() as i32;
    let hi = (max.log10() + EPS).floor() as i32;
    (lo..=hi).collect()
}

/// Values `m * 10^k` for `m` in 2..=9 inside `[min, max]`.
fn log_subdivisions(min: f64, max: f64) -> Vec<f64> {
    if !(min > 0.0 && max > min) {
        return Vec::new();
    }
    let lo = min.log10().floor() as i32;
    let hi = max.log10().floor() as i32;
    let mut values = Vec::new();
    for k in lo..=hi {
        let decade = 10f64.powi(k);
        for m in 2..=9 {
            let v = f64::from(m) * decade;
            if v >= min * (1.0 - EPS) && v <= max * (1.0 + EPS) {
                values.push(v);
            }
        }
    }
    values
}

/// Evenly spaced ticks with a step of 1, 2, 2.5 or 5 times a power of ten,
/// using the finest step that yields at most `max_ticks` ticks.
///
/// Returns the step and the tick values.
fn linear_ticks(min: f64, max: f64, max_ticks: usize) -> (f64, Vec<f64>) {
    let span = max - min;
    if !(span > 0.0) || max_ticks < 2 {
        return (0.0, Vec::new());
    }

    let raw = span / (max_ticks - 1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| span / step <= (max_ticks - 1) as f64 + EPS)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step - EPS).ceil() as i64;
    let last = (max / step + EPS).floor() as i64;
    let values = (first..=last).map(|k| k as f64 * step).collect();
    (step, values)
}

/// Decimal places needed to print multiples of `step` exactly.
fn step_decimals(step: f64) -> usize {
    if step <= 0.0 {
        return 0;
    }
    (0..10)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(tick: &Tick) -> &str {
        match &tick.label {
            Some(TickLabel::Plain(s)) => s,
            other => panic!("unexpected label {other:?}"),
        }
    }

    #[test]
    fn test_default_log_axis() {
        let ticks = AxisTicks::for_axis(&AxisConfig::log("x", 0.3, 6000.0));
        let values: Vec<f64> = ticks.major.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(
            ticks.major[3].label,
            Some(TickLabel::Power {
                base: "10".to_string(),
                exponent: "3".to_string()
            })
        );

        // 0.3..0.9, then 2..9 for three full decades, then 2000..6000
        assert_eq!(ticks.minor.len(), 7 + 3 * 8 + 5);
        assert!((ticks.minor[0].value - 0.3).abs() < 1e-12);
        assert!(ticks.minor.iter().all(|t| t.label.is_none()));
    }

    #[test]
    fn test_log_decade_on_limit() {
        assert_eq!(log_decades(1.0, 1000.0), vec![0, 1, 2, 3]);
        assert_eq!(log_decades(0.01, 0.5), vec![-2, -1]);
        assert!(log_decades(0.0, 10.0).is_empty());
    }

    #[test]
    fn test_default_linear_axis() {
        let ticks = AxisTicks::for_axis(&AxisConfig::linear("y", 0.82, 0.98));
        let labels: Vec<&str> = ticks.major.iter().map(plain).collect();
        assert_eq!(
            labels,
            vec!["0.82", "0.84", "0.86", "0.88", "0.90", "0.92", "0.94", "0.96", "0.98"]
        );
        assert!(ticks.minor.is_empty());
    }

    #[test]
    fn test_linear_quarter_step() {
        let (step, values) = linear_ticks(0.0, 10.0, 5);
        assert_eq!(step, 2.5);
        assert_eq!(values, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(step_decimals(step), 1);
    }

    #[test]
    fn test_degenerate_linear_range() {
        let (_, values) = linear_ticks(1.0, 1.0, 9);
        assert!(values.is_empty());
    }
}
