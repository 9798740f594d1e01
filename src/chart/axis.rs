// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::Scale;
use std::collections::HashMap;
use std::ops::{Range, RangeInclusive};

/// Categorical axis over dijkstra rank labels. Categories keep the order in
/// which they are first seen across all lines of a panel.
#[derive(Clone, Debug, Default)]
pub struct RankAxis {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl RankAxis {
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut axis = Self::default();
        for label in labels {
            if !axis.index.contains_key(label) {
                axis.index.insert(label.to_string(), axis.labels.len());
                axis.labels.push(label.to_string());
            }
        }
        axis
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Tick label for a category position. Positions are labeled from the
    /// power-of-two reference scale; positions past its end keep their raw
    /// rank label.
    pub fn tick_label(&self, position: usize, exponents: RangeInclusive<u32>) -> String {
        match exponents.clone().nth(position) {
            Some(exponent) if position < self.len() => format!("2^{}", exponent),
            _ => self.labels.get(position).cloned().unwrap_or_default(),
        }
    }
}

/// The response time axis of one panel: its scale, plotted range and tick
/// values.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseAxis {
    scale: Scale,
    range: Range<f64>,
    ticks: Vec<f64>,
}

impl ResponseAxis {
    /// Fit the axis to the observed `[min, max]` response times. Configured
    /// ticks outside the range are dropped; when none remain, ticks are
    /// generated for the scale.
    pub fn new(scale: Scale, bounds: Option<(f64, f64)>, ticks: &[f64]) -> Self {
        let range = match (scale, bounds) {
            (Scale::Log, Some((min, max))) => (min / 1.5)..(max * 1.5),
            (Scale::Linear, Some((_, max))) => 0.0..(max * 1.1),
            (Scale::Log, None) => 1.0..10.0,
            (Scale::Linear, None) => 0.0..10.0,
        };

        let mut ticks: Vec<f64> = ticks
            .iter()
            .copied()
            .filter(|t| t.is_finite() && *t >= range.start && *t <= range.end)
            .filter(|t| scale == Scale::Linear || *t > 0.0)
            .collect();
        ticks.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        ticks.dedup();

        if ticks.is_empty() {
            ticks = match scale {
                Scale::Log => log_ticks(&range),
                Scale::Linear => linear_ticks(&range),
            };
        }

        Self {
            scale,
            range,
            ticks,
        }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn range(&self) -> Range<f64> {
        self.range.clone()
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }
}

/// Decades within the range, refined with 2x and 5x steps when the range
/// spans less than two decades.
fn log_ticks(range: &Range<f64>) -> Vec<f64> {
    let lo = range.start.log10().floor() as i32;
    let hi = range.end.log10().ceil() as i32;
    let within = |t: &f64| *t >= range.start && *t <= range.end;

    let decades: Vec<f64> = (lo..=hi).map(|e| 10f64.powi(e)).filter(within).collect();
    if decades.len() >= 2 {
        return decades;
    }

    (lo..=hi)
        .flat_map(|e| {
            let base = 10f64.powi(e);
            vec![base, 2.0 * base, 5.0 * base]
        })
        .filter(within)
        .collect()
}

/// Multiples of the smallest 1-2-5 step covering a tenth of the range, so
/// at most eleven ticks.
fn linear_ticks(range: &Range<f64>) -> Vec<f64> {
    let span = range.end - range.start;
    if span <= 0.0 || !span.is_finite() {
        return vec![range.start];
    }

    let raw = span / 10.0;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let step = match raw / magnitude {
        n if n <= 1.0 => magnitude,
        n if n <= 2.0 => 2.0 * magnitude,
        n if n <= 5.0 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    };

    let first = (range.start / step).ceil() as i64;
    let last = (range.end / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Formats an axis value without scientific notation.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
