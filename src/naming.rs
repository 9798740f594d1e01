// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::selector::Selector;
use std::path::{Path, PathBuf};

/// Maps a selector to the location of its archive. This is the only place
/// that knows how archives are named on disk.
pub trait ArchiveNaming {
    fn path(&self, selector: &Selector) -> PathBuf;
}

/// The naming scheme used by the tile server benchmark client:
///
/// `<root>/<server>/tiles_<server>[-<timeout>]_zoom-<z>_no-client-cache_<cache>[_<country>].json.gz`
#[derive(Clone, Debug)]
pub struct TilesNaming {
    root: PathBuf,
}

impl TilesNaming {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn file_name(selector: &Selector) -> String {
        let mut name = format!("tiles_{}", selector.server());
        if let Some(timeout) = selector.timeout_ms() {
            name.push_str(&format!("-{}", timeout));
        }
        name.push_str(&format!(
            "_zoom-{}_no-client-cache_{}",
            selector.zoom(),
            selector.cache().token()
        ));
        if let Some(country) = selector.country_code() {
            name.push('_');
            name.push_str(country);
        }
        name.push_str(".json.gz");
        name
    }
}

impl Default for TilesNaming {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ArchiveNaming for TilesNaming {
    fn path(&self, selector: &Selector) -> PathBuf {
        self.root
            .join(selector.server())
            .join(Self::file_name(selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::CacheMode;

    #[test]
    fn plain() {
        let naming = TilesNaming::new(".");
        let path = naming.path(&Selector::new("virtuoso", 6, CacheMode::Enabled));
        assert_eq!(
            path,
            Path::new("./virtuoso/tiles_virtuoso_zoom-6_no-client-cache_server-cache.json.gz")
        );

        let path = naming.path(&Selector::new("virtuoso", 15, CacheMode::Disabled));
        assert_eq!(
            path,
            Path::new("./virtuoso/tiles_virtuoso_zoom-15_no-client-cache_no-server-cache.json.gz")
        );
    }

    #[test]
    fn timeout_and_country() {
        let naming = TilesNaming::new("/data");
        let selector = Selector::new("graphdb", 9, CacheMode::Disabled)
            .timeout(Some(30000))
            .country(Some("BEL"));
        assert_eq!(
            naming.path(&selector),
            Path::new(
                "/data/graphdb/tiles_graphdb-30000_zoom-9_no-client-cache_no-server-cache_BEL.json.gz"
            )
        );
    }
}
