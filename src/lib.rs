// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Loads recorded tile server benchmark archives and renders them as
//! per-zoom response time charts.

#[macro_use]
extern crate log;

#[macro_use]
mod logger;

mod archive;
mod chart;
mod config;
mod error;
mod loader;
mod naming;
mod selector;

pub use crate::archive::{Archive, Globals, RankBucket, RankBuckets};
pub use crate::chart::{
    build_figure, plain_number, render, Figure, Line, Panel, RankAxis, ResponseAxis,
};
pub use crate::config::{ChartConfig, Config, General, Mode, Scale, SelectorConfig};
pub use crate::error::{Error, Result};
pub use crate::loader::{Loader, Series};
pub use crate::logger::Logger;
pub use crate::naming::{ArchiveNaming, TilesNaming};
pub use crate::selector::{CacheMode, Selector};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Load every archive the config selects, then draw the chart to the
/// configured output file.
pub fn run(config: &Config) -> Result<Figure> {
    let loader = Loader::new(config.general().root());
    let figure = build_figure(&loader, config)?;
    render(
        &figure,
        config.chart(),
        std::path::Path::new(config.general().output()),
        config.general().size(),
    )?;
    Ok(figure)
}
