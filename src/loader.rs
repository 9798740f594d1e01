// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::archive::Archive;
use crate::error::Result;
use crate::naming::{ArchiveNaming, TilesNaming};
use crate::selector::{CacheMode, Selector};
use std::path::Path;

/// Response times per dijkstra rank for one archive, restricted to ranks
/// that collected samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    ranks: Vec<String>,
    response_times: Vec<f64>,
    timeouts: u64,
}

impl Series {
    /// Keeps the buckets with a positive average, in archive order.
    pub fn from_archive(archive: &Archive) -> Self {
        let globals = archive.globals();
        let (ranks, response_times): (Vec<String>, Vec<f64>) = globals
            .dijkstra_ranks()
            .iter()
            .filter(|(_, bucket)| bucket.has_samples())
            .map(|(label, bucket)| (label.to_string(), bucket.avg_res_time()))
            .unzip();

        Self {
            ranks,
            response_times,
            timeouts: globals.total_timeouts(),
        }
    }

    pub fn ranks(&self) -> &[String] {
        &self.ranks
    }

    pub fn response_times(&self) -> &[f64] {
        &self.response_times
    }

    pub fn timeouts(&self) -> u64 {
        self.timeouts
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.ranks
            .iter()
            .map(|r| r.as_str())
            .zip(self.response_times.iter().copied())
    }

    pub fn mean_response_time(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.response_times.iter().sum::<f64>() / self.len() as f64)
        }
    }

    pub fn max_response_time(&self) -> Option<f64> {
        self.response_times.iter().copied().fold(None, |max, v| match max {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
    }

    pub fn min_response_time(&self) -> Option<f64> {
        self.response_times.iter().copied().fold(None, |min, v| match min {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<f64>, u64) {
        (self.ranks, self.response_times, self.timeouts)
    }
}

/// Reads series out of archives located by a naming scheme. Every call
/// reads its archive from disk again.
pub struct Loader<N = TilesNaming> {
    naming: N,
}

impl Loader<TilesNaming> {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_naming(TilesNaming::new(root))
    }
}

impl<N: ArchiveNaming> Loader<N> {
    pub fn with_naming(naming: N) -> Self {
        Self { naming }
    }

    pub fn load(&self, selector: &Selector) -> Result<Series> {
        selector.validate()?;
        let path = self.naming.path(selector);
        debug!("reading archive: {}", path.display());

        let archive = Archive::open(&path)?;
        let series = Series::from_archive(&archive);

        info!(
            "zoom: {} cache: {} ranks: {} timeouts: {} mean: {}",
            selector.zoom(),
            selector.cache().token(),
            series.len(),
            series.timeouts(),
            series
                .mean_response_time()
                .map(|v| format!("{:.2} ms", v))
                .unwrap_or_else(|| "n/a".to_string()),
        );

        Ok(series)
    }

    /// Positional form of [`Loader::load`].
    pub fn load_series(
        &self,
        zoom: u32,
        server: &str,
        cache_enabled: bool,
        timeout: Option<u64>,
        country: Option<&str>,
    ) -> Result<(Vec<String>, Vec<f64>, u64)> {
        let selector = Selector::new(server, zoom, CacheMode::from(cache_enabled))
            .timeout(timeout)
            .country(country);
        self.load(&selector).map(Series::into_parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_archive(root: &Path, selector: &Selector, json: &str) {
        let path = TilesNaming::new(root).path(selector);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(json.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    fn selector(zoom: u32) -> Selector {
        Selector::new("virtuoso", zoom, CacheMode::Enabled)
    }

    #[test]
    fn filters_empty_buckets() {
        let dir = TempDir::new().unwrap();
        write_archive(
            dir.path(),
            &selector(6),
            r#"{"globals": {"dijkstraRanks": {"100": {"avgResTime": 250.0}, "200": {"avgResTime": 0}}, "totalTimeouts": 3}}"#,
        );

        let loader = Loader::new(dir.path());
        let (ranks, times, timeouts) = loader
            .load_series(6, "virtuoso", true, None, None)
            .unwrap();
        assert_eq!(ranks, vec!["100".to_string()]);
        assert_eq!(times, vec![250.0]);
        assert_eq!(timeouts, 3);
    }

    #[test]
    fn all_zero_is_empty() {
        let dir = TempDir::new().unwrap();
        write_archive(
            dir.path(),
            &selector(7),
            r#"{"globals": {"dijkstraRanks": {"32": {"avgResTime": 0}, "64": {"avgResTime": 0.0}}, "totalTimeouts": 12}}"#,
        );

        let series = Loader::new(dir.path()).load(&selector(7)).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.ranks().len(), 0);
        assert_eq!(series.response_times().len(), 0);
        assert_eq!(series.timeouts(), 12);
        assert_eq!(series.mean_response_time(), None);
    }

    #[test]
    fn keeps_archive_order() {
        let dir = TempDir::new().unwrap();
        write_archive(
            dir.path(),
            &selector(8),
            r#"{"globals": {"dijkstraRanks": {"1024": {"avgResTime": 40.0}, "32": {"avgResTime": 10.0}, "256": {"avgResTime": 20.0}}, "totalTimeouts": 0}}"#,
        );

        let series = Loader::new(dir.path()).load(&selector(8)).unwrap();
        assert_eq!(series.ranks(), &["1024", "32", "256"]);
        assert_eq!(series.response_times(), &[40.0, 10.0, 20.0]);
        assert_eq!(series.mean_response_time(), Some(70.0 / 3.0));
        assert_eq!(series.max_response_time(), Some(40.0));
        assert_eq!(series.min_response_time(), Some(10.0));
    }

    #[test]
    fn repeated_loads_match() {
        let dir = TempDir::new().unwrap();
        write_archive(
            dir.path(),
            &selector(9),
            r#"{"globals": {"dijkstraRanks": {"32": {"avgResTime": 1.5}, "64": {"avgResTime": 2.5}}, "totalTimeouts": 1}}"#,
        );

        let loader = Loader::new(dir.path());
        let first = loader.load(&selector(9)).unwrap();
        let second = loader.load(&selector(9)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_archive() {
        let dir = TempDir::new().unwrap();
        let result = Loader::new(dir.path()).load(&selector(10));
        match result {
            Err(Error::Archive { path, .. }) => {
                assert!(path.ends_with(
                    "virtuoso/tiles_virtuoso_zoom-10_no-client-cache_server-cache.json.gz"
                ));
            }
            other => panic!("expected archive error, got: {:?}", other),
        }
    }

    #[test]
    fn not_gzip() {
        let dir = TempDir::new().unwrap();
        let path = TilesNaming::new(dir.path()).path(&selector(11));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"{\"globals\": {}}").unwrap();

        let result = Loader::new(dir.path()).load(&selector(11));
        assert!(matches!(result, Err(Error::Archive { .. })));
    }

    #[test]
    fn malformed_archive() {
        let dir = TempDir::new().unwrap();
        write_archive(dir.path(), &selector(12), r#"{"results": []}"#);

        let result = Loader::new(dir.path()).load(&selector(12));
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn invalid_selector_is_checked_first() {
        let dir = TempDir::new().unwrap();
        let result = Loader::new(dir.path()).load_series(6, "", true, None, None);
        assert!(matches!(result, Err(Error::InvalidSelector(_))));
    }

    #[test]
    fn country_and_timeout_archives() {
        let dir = TempDir::new().unwrap();
        let selector = Selector::new("virtuoso", 6, CacheMode::Disabled)
            .timeout(Some(30000))
            .country(Some("BEL"));
        write_archive(
            dir.path(),
            &selector,
            r#"{"globals": {"dijkstraRanks": {"32": {"avgResTime": 5.0}}, "totalTimeouts": 4}}"#,
        );

        let loader = Loader::new(dir.path());
        let (ranks, times, timeouts) = loader
            .load_series(6, "virtuoso", false, Some(30000), Some("BEL"))
            .unwrap();
        assert_eq!(ranks.len(), times.len());
        assert_eq!(timeouts, 4);

        // the same selector without the country names a different archive
        assert!(loader
            .load_series(6, "virtuoso", false, Some(30000), None)
            .is_err());
    }
}
