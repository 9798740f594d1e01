// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Figure model for comparing response time series across zoom levels, and
//! its rendering.

mod axis;
mod render;
mod scales;

pub use self::axis::{plain_number, RankAxis, ResponseAxis};
pub use self::render::render;

use crate::config::{ChartConfig, Config};
use crate::error::{Error, Result};
use crate::loader::{Loader, Series};
use crate::naming::ArchiveNaming;
use crate::selector::{CacheMode, Selector};

use strum::IntoEnumIterator;

/// One plotted series, labeled with its zoom level and timeout count.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    zoom: u32,
    label: String,
    series: Series,
}

impl Line {
    pub fn new(zoom: u32, series: Series) -> Self {
        Self {
            zoom,
            label: format!("Z={} (timeouts= {})", zoom, series.timeouts()),
            series,
        }
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn series(&self) -> &Series {
        &self.series
    }
}

/// All lines for one cache mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    title: String,
    cache: CacheMode,
    lines: Vec<Line>,
}

impl Panel {
    pub fn new(title: &str, cache: CacheMode) -> Self {
        Self {
            title: title.to_string(),
            cache,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cache(&self) -> CacheMode {
        self.cache
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn rank_axis(&self) -> RankAxis {
        RankAxis::from_labels(
            self.lines
                .iter()
                .flat_map(|line| line.series().ranks().iter().map(|r| r.as_str())),
        )
    }

    /// smallest and largest response time over all lines
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.lines
            .iter()
            .filter_map(|line| {
                let series = line.series();
                Some((series.min_response_time()?, series.max_response_time()?))
            })
            .fold(None, |acc, (min, max)| match acc {
                None => Some((min, max)),
                Some((lo, hi)) => Some((lo.min(min), hi.max(max))),
            })
    }

    pub fn response_axis(&self, chart: &ChartConfig) -> ResponseAxis {
        ResponseAxis::new(chart.scale(), self.bounds(), chart.y_ticks())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    title: Option<String>,
    panels: Vec<Panel>,
}

impl Figure {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }
}

/// Load one series per zoom level for each cache mode. The first archive
/// that fails to load aborts the whole figure.
pub fn build_figure<N: ArchiveNaming>(loader: &Loader<N>, config: &Config) -> Result<Figure> {
    let chart = config.chart();
    let zooms = chart.zooms();
    if zooms.is_empty() {
        return Err(Error::InvalidSelector(format!(
            "empty zoom range: {}-{}",
            zooms.start(),
            zooms.end()
        )));
    }

    let mut panels = Vec::new();
    for cache in CacheMode::iter() {
        let mut panel = Panel::new(chart.panel_title(cache), cache);
        for zoom in zooms.clone() {
            let selector = Selector::new(config.general().server(), zoom, cache)
                .timeout(config.selector().timeout())
                .country(config.selector().country());
            panel.push(Line::new(zoom, loader.load(&selector)?));
        }
        panels.push(panel);
    }

    Ok(Figure {
        title: config.title(),
        panels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::naming::TilesNaming;
    use std::path::PathBuf;

    /// Serves a single fixed archive for every selector.
    struct Fixed(PathBuf);

    impl ArchiveNaming for Fixed {
        fn path(&self, _: &Selector) -> PathBuf {
            self.0.clone()
        }
    }

    fn series(json: &str) -> Series {
        Series::from_archive(&crate::archive::Archive::from_json(json).unwrap())
    }

    #[test]
    fn line_label() {
        let line = Line::new(
            7,
            series(r#"{"globals": {"dijkstraRanks": {}, "totalTimeouts": 42}}"#),
        );
        assert_eq!(line.label(), "Z=7 (timeouts= 42)");
        assert_eq!(line.zoom(), 7);
    }

    #[test]
    fn panel_axes() {
        let mut panel = Panel::new("with cache", CacheMode::Enabled);
        panel.push(Line::new(
            6,
            series(r#"{"globals": {"dijkstraRanks": {"32": {"avgResTime": 5.0}, "64": {"avgResTime": 50.0}}, "totalTimeouts": 0}}"#),
        ));
        panel.push(Line::new(
            7,
            series(r#"{"globals": {"dijkstraRanks": {"64": {"avgResTime": 2.0}, "128": {"avgResTime": 80.0}}, "totalTimeouts": 0}}"#),
        ));
        panel.push(Line::new(
            8,
            series(r#"{"globals": {"dijkstraRanks": {"32": {"avgResTime": 0}}, "totalTimeouts": 0}}"#),
        ));

        assert_eq!(panel.rank_axis().labels(), &["32", "64", "128"]);
        assert_eq!(panel.bounds(), Some((2.0, 80.0)));
        assert_eq!(Panel::new("empty", CacheMode::Disabled).bounds(), None);
    }

    #[test]
    fn missing_archive_aborts() {
        let loader = Loader::with_naming(TilesNaming::new("/nonexistent"));
        let config = Config::from_args(Mode::Fixed, vec!["tiles-plot"]).unwrap();
        assert!(matches!(
            build_figure(&loader, &config),
            Err(Error::Archive { .. })
        ));
    }

    #[test]
    fn one_line_per_zoom() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("archive.json.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::fast());
        std::io::Write::write_all(
            &mut encoder,
            br#"{"globals": {"dijkstraRanks": {"32": {"avgResTime": 1.0}}, "totalTimeouts": 2}}"#,
        )
        .unwrap();
        encoder.finish().unwrap();

        let loader = Loader::with_naming(Fixed(path));
        let config = Config::from_args(Mode::Country, vec!["tiles-plot-country", "BEL"]).unwrap();
        let figure = build_figure(&loader, &config).unwrap();

        assert_eq!(figure.title(), Some("BEL"));
        assert_eq!(figure.panels().len(), 2);
        assert_eq!(figure.panels()[0].cache(), CacheMode::Enabled);
        assert_eq!(figure.panels()[0].title(), "Tiles server (with cache)");
        assert_eq!(figure.panels()[1].cache(), CacheMode::Disabled);
        assert_eq!(figure.panels()[1].title(), "Tiles server (without cache)");
        for panel in figure.panels() {
            let zooms: Vec<u32> = panel.lines().iter().map(|l| l.zoom()).collect();
            assert_eq!(zooms, (6..=15).collect::<Vec<u32>>());
            assert_eq!(panel.lines()[0].label(), "Z=6 (timeouts= 2)");
        }
    }
}
