// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::selector::CacheMode;
use serde_derive::Deserialize;
use std::ops::RangeInclusive;

/// Scale of the response time axis.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Linear,
    Log,
}

impl Default for Scale {
    fn default() -> Scale {
        Scale::Linear
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    #[serde(default = "default_zoom_min")]
    zoom_min: u32,
    #[serde(default = "default_zoom_max")]
    zoom_max: u32,
    #[serde(default)]
    scale: Scale,
    #[serde(default)]
    y_ticks: Vec<f64>,
    #[serde(default = "default_rank_exponent_min")]
    rank_exponent_min: u32,
    #[serde(default = "default_rank_exponent_max")]
    rank_exponent_max: u32,
    #[serde(default = "default_legend_columns")]
    legend_columns: usize,
    #[serde(default = "default_line_width")]
    line_width: u32,
    #[serde(default = "default_marker_size")]
    marker_size: u32,
    #[serde(default = "default_x_desc")]
    x_desc: String,
    #[serde(default = "default_y_desc")]
    y_desc: String,
    #[serde(default = "default_cached_title")]
    cached_title: String,
    #[serde(default = "default_uncached_title")]
    uncached_title: String,
    title: Option<String>,
}

impl ChartConfig {
    /// the zoom levels to plot, inclusive on both ends
    pub fn zooms(&self) -> RangeInclusive<u32> {
        self.zoom_min..=self.zoom_max
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn y_ticks(&self) -> &[f64] {
        &self.y_ticks
    }

    /// reference scale for rank tick labels, as powers of two
    pub fn rank_exponents(&self) -> RangeInclusive<u32> {
        self.rank_exponent_min..=self.rank_exponent_max
    }

    pub fn legend_columns(&self) -> usize {
        self.legend_columns.max(1)
    }

    pub fn line_width(&self) -> u32 {
        self.line_width
    }

    pub fn marker_size(&self) -> u32 {
        self.marker_size
    }

    pub fn x_desc(&self) -> &str {
        &self.x_desc
    }

    pub fn y_desc(&self) -> &str {
        &self.y_desc
    }

    pub fn panel_title(&self, cache: CacheMode) -> &str {
        match cache {
            CacheMode::Enabled => &self.cached_title,
            CacheMode::Disabled => &self.uncached_title,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Default for ChartConfig {
    fn default() -> ChartConfig {
        ChartConfig {
            zoom_min: default_zoom_min(),
            zoom_max: default_zoom_max(),
            scale: Scale::default(),
            y_ticks: Vec::new(),
            rank_exponent_min: default_rank_exponent_min(),
            rank_exponent_max: default_rank_exponent_max(),
            legend_columns: default_legend_columns(),
            line_width: default_line_width(),
            marker_size: default_marker_size(),
            x_desc: default_x_desc(),
            y_desc: default_y_desc(),
            cached_title: default_cached_title(),
            uncached_title: default_uncached_title(),
            title: None,
        }
    }
}

fn default_zoom_min() -> u32 {
    6
}

fn default_zoom_max() -> u32 {
    15
}

fn default_rank_exponent_min() -> u32 {
    5
}

fn default_rank_exponent_max() -> u32 {
    17
}

fn default_legend_columns() -> usize {
    2
}

fn default_line_width() -> u32 {
    2
}

fn default_marker_size() -> u32 {
    3
}

fn default_x_desc() -> String {
    "Dijkstra rank".to_string()
}

fn default_y_desc() -> String {
    "average query response time (ms)".to_string()
}

fn default_cached_title() -> String {
    "Tiles server (with cache)".to_string()
}

fn default_uncached_title() -> String {
    "Tiles server (without cache)".to_string()
}

/// Optional archive selectors shared by every series in a figure.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorConfig {
    timeout: Option<u64>,
    country: Option<String>,
}

impl SelectorConfig {
    pub fn timeout(&self) -> Option<u64> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Option<u64>) {
        self.timeout = timeout;
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn set_country(&mut self, country: Option<&str>) {
        self.country = country.map(|c| c.to_string());
    }
}
