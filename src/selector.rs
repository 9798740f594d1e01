// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{Error, Result};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Whether server-side response caching was enabled for a benchmark run.
#[derive(Clone, Copy, Debug, EnumIter, EnumString, Eq, Hash, IntoStaticStr, PartialEq)]
pub enum CacheMode {
    #[strum(serialize = "server-cache")]
    Enabled,
    #[strum(serialize = "no-server-cache")]
    Disabled,
}

impl CacheMode {
    /// token used in archive file names
    pub fn token(self) -> &'static str {
        self.into()
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

impl From<bool> for CacheMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Identifies exactly one benchmark archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    server: String,
    zoom: u32,
    cache: CacheMode,
    timeout: Option<u64>,
    country: Option<String>,
}

impl Selector {
    pub fn new(server: &str, zoom: u32, cache: CacheMode) -> Self {
        Self {
            server: server.to_string(),
            zoom,
            cache,
            timeout: None,
            country: None,
        }
    }

    pub fn timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn country(mut self, country: Option<&str>) -> Self {
        self.country = country.map(|c| c.to_string());
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn cache(&self) -> CacheMode {
        self.cache
    }

    pub fn timeout_ms(&self) -> Option<u64> {
        self.timeout
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Rejects selectors that cannot name an archive. Components end up in
    /// file names, so they must be non-empty and free of path separators.
    pub fn validate(&self) -> Result<()> {
        check_component("server", &self.server)?;
        if let Some(country) = &self.country {
            check_component("country", country)?;
        }
        Ok(())
    }
}

fn check_component(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidSelector(format!("{} must not be empty", name)));
    }
    if value.contains(|c| c == '/' || c == '\\') || value == "." || value == ".." {
        return Err(Error::InvalidSelector(format!(
            "{} must not be a path: {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn cache_modes() {
        let modes: Vec<CacheMode> = CacheMode::iter().collect();
        assert_eq!(modes, vec![CacheMode::Enabled, CacheMode::Disabled]);
        assert_eq!(CacheMode::Enabled.token(), "server-cache");
        assert_eq!(CacheMode::Disabled.token(), "no-server-cache");
        assert_eq!(CacheMode::from(true), CacheMode::Enabled);
        assert_eq!(CacheMode::from(false), CacheMode::Disabled);
        assert_eq!(
            CacheMode::from_str("no-server-cache").unwrap(),
            CacheMode::Disabled
        );
    }

    #[test]
    fn validate() {
        assert!(Selector::new("virtuoso", 6, CacheMode::Enabled)
            .validate()
            .is_ok());
        assert!(Selector::new("virtuoso", 6, CacheMode::Enabled)
            .country(Some("BEL"))
            .validate()
            .is_ok());

        let err = Selector::new("", 6, CacheMode::Enabled).validate();
        assert!(matches!(err, Err(Error::InvalidSelector(_))));

        let err = Selector::new("virtuoso", 6, CacheMode::Enabled)
            .country(Some(""))
            .validate();
        assert!(matches!(err, Err(Error::InvalidSelector(_))));

        let err = Selector::new("../virtuoso", 6, CacheMode::Enabled).validate();
        assert!(matches!(err, Err(Error::InvalidSelector(_))));
    }
}
