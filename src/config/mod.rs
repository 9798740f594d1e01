// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod chart;
mod general;

pub use self::chart::{ChartConfig, Scale, SelectorConfig};
pub use self::general::General;

use crate::error::{Error, Result};
use crate::{NAME, VERSION};

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use serde_derive::Deserialize;
use std::ffi::OsString;
use std::path::Path;

/// Which command line surface to expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// fixed selectors, no positional arguments
    Fixed,
    /// exactly one positional argument naming the country
    Country,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    chart: ChartConfig,
    #[serde(default)]
    selector: SelectorConfig,
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new(mode: Mode) -> Result<Config> {
        Self::from_args(mode, std::env::args_os())
    }

    pub fn from_args<I, T>(mode: Mode, args: I) -> Result<Config>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app(mode).get_matches_from_safe(args)?;

        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(Path::new(file))?
        } else {
            Default::default()
        };

        config.apply(&matches)?;

        if mode == Mode::Country && config.selector.country().is_none() {
            return Err(Error::InvalidSelector("a country is required".to_string()));
        }

        Ok(config)
    }

    fn apply(&mut self, matches: &ArgMatches) -> Result<()> {
        if let Some(root) = matches.value_of("root") {
            self.general.set_root(root);
        }

        if let Some(server) = matches.value_of("server") {
            self.general.set_server(server);
        }

        if let Some(output) = matches.value_of("output") {
            self.general.set_output(output);
        }

        if let Some(timeout) = matches.value_of("timeout") {
            let timeout = timeout.parse().map_err(|_| {
                Error::InvalidSelector(format!("could not parse timeout: {}", timeout))
            })?;
            self.selector.set_timeout(Some(timeout));
        }

        if let Some(country) = matches.value_of("country") {
            self.selector.set_country(Some(country));
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => self.general.set_logging(LevelFilter::Debug),
            _ => self.general.set_logging(LevelFilter::Trace),
        }

        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::load_from_str(path, &content)
    }

    pub fn load_from_str(path: &Path, content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |reason: &str| Error::Config {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        if self.chart.zooms().is_empty() {
            return Err(invalid("zoom_min is greater than zoom_max"));
        }
        if self.chart.rank_exponents().is_empty() {
            return Err(invalid(
                "rank_exponent_min is greater than rank_exponent_max",
            ));
        }
        if self.chart.y_ticks().iter().any(|t| !t.is_finite()) {
            return Err(invalid("y_ticks must be finite"));
        }
        Ok(())
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn chart(&self) -> &ChartConfig {
        &self.chart
    }

    pub fn selector(&self) -> &SelectorConfig {
        &self.selector
    }

    /// the figure title: explicit config first, then the selected country
    pub fn title(&self) -> Option<String> {
        self.chart
            .title()
            .or_else(|| self.selector.country())
            .map(|t| t.to_string())
    }

    pub fn print(&self) {
        info!("-----");
        info!(
            "Config: Root: {} Server: {}",
            self.general.root(),
            self.general.server()
        );
        info!(
            "Config: Selector: Timeout: {} Country: {}",
            self.selector
                .timeout()
                .map(|v| format!("{}", v))
                .unwrap_or_else(|| "None".to_string()),
            self.selector.country().unwrap_or("None"),
        );
        let zooms = self.chart.zooms();
        info!(
            "Config: Zoom: {}-{} Scale: {:?} Y-Ticks: {}",
            zooms.start(),
            zooms.end(),
            self.chart.scale(),
            self.chart.y_ticks().len(),
        );
        let (width, height) = self.general.size();
        info!(
            "Config: Output: {} ({}x{})",
            self.general.output(),
            width,
            height
        );
    }
}

fn app(mode: Mode) -> App<'static, 'static> {
    let app = App::new(NAME)
        .version(VERSION)
        .about("Tile server benchmark charts")
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("root")
                .long("root")
                .value_name("DIR")
                .help("Directory containing one archive directory per server")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("server")
                .long("server")
                .value_name("NAME")
                .help("Server whose archives are plotted")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("FILE")
                .help("Chart output file, PNG or SVG by extension")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("Milliseconds")
                .help("Select archives recorded with this timeout threshold")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        );

    match mode {
        Mode::Fixed => app,
        Mode::Country => app.arg(
            Arg::with_name("country")
                .value_name("COUNTRY")
                .help("Country code selecting the archives and titling the chart")
                .required(true)
                .index(1),
        ),
    }
}
