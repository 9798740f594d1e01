// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::axis::ResponseAxis;
use crate::config::Scale;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::{IntoLogRange, LogCoord};

/// Coordinate for a categorical axis. Category `i` is drawn at the center
/// of the i-th of `count` equal slots.
#[derive(Clone, Copy, Debug)]
pub struct RankCoord {
    count: usize,
}

impl RankCoord {
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
        }
    }
}

impl Ranged for RankCoord {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let slot = (limit.1 - limit.0) as f64 / self.count as f64;
        limit.0 + ((*value + 0.5) * slot).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        let max = hint.max_num_points().max(1);
        let step = (self.count + max - 1) / max;
        (0..self.count).step_by(step.max(1)).map(|i| i as f64).collect()
    }

    fn range(&self) -> std::ops::Range<f64> {
        -0.5..(self.count as f64 - 0.5)
    }
}

/// Response time coordinate, linear or logarithmic. Ticks are only placed at
/// the values the axis was built with.
pub struct ResponseCoord {
    inner: ResponseScale,
    ticks: Vec<f64>,
}

enum ResponseScale {
    Linear(RangedCoordf64),
    Log(LogCoord<f64>),
}

impl ResponseCoord {
    pub fn new(axis: &ResponseAxis) -> Self {
        let inner = match axis.scale() {
            Scale::Linear => ResponseScale::Linear(axis.range().into()),
            Scale::Log => ResponseScale::Log(axis.range().log_scale().into()),
        };
        Self {
            inner,
            ticks: axis.ticks().to_vec(),
        }
    }
}

impl Ranged for ResponseCoord {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        match &self.inner {
            ResponseScale::Linear(coord) => coord.map(value, limit),
            ResponseScale::Log(coord) => coord.map(value, limit),
        }
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> std::ops::Range<f64> {
        match &self.inner {
            ResponseScale::Linear(coord) => coord.range(),
            ResponseScale::Log(coord) => coord.range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots() {
        let coord = RankCoord::new(4);
        assert_eq!(coord.map(&-0.5, (0, 400)), 0);
        assert_eq!(coord.map(&0.0, (0, 400)), 50);
        assert_eq!(coord.map(&3.0, (0, 400)), 350);
        assert_eq!(coord.map(&3.5, (0, 400)), 400);
        assert_eq!(coord.range(), -0.5..3.5);
    }

    #[test]
    fn key_points() {
        let coord = RankCoord::new(13);
        assert_eq!(coord.key_points(13usize).len(), 13);
        assert_eq!(
            coord.key_points(5usize),
            vec![0.0, 3.0, 6.0, 9.0, 12.0]
        );
    }

    #[test]
    fn linear_response_ticks() {
        let axis = ResponseAxis::new(Scale::Linear, Some((5.0, 100.0)), &[25.0, 50.0, 500.0]);
        let coord = ResponseCoord::new(&axis);
        assert_eq!(coord.key_points(10usize), axis.ticks().to_vec());
        assert_eq!(coord.key_points(10usize), vec![25.0, 50.0]);
        assert_eq!(coord.range(), axis.range());
        assert_eq!(coord.map(&0.0, (0, 110)), 0);
        assert_eq!(coord.map(&55.0, (0, 110)), 55);
    }

    #[test]
    fn log_response_ticks() {
        let axis = ResponseAxis::new(Scale::Log, Some((20.0, 3000.0)), &[]);
        let coord = ResponseCoord::new(&axis);
        assert_eq!(coord.key_points(10usize), axis.ticks().to_vec());
        assert_eq!(coord.key_points(10usize), vec![100.0, 1000.0]);

        let low = coord.map(&100.0, (0, 1000));
        let high = coord.map(&1000.0, (0, 1000));
        assert!(low < high);
        // the geometric mean sits halfway between two ticks
        let middle = coord.map(&(100_000f64).sqrt(), (0, 1000));
        assert!((2 * middle - low - high).abs() <= 2);
    }
}
