// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use tiles_perf::{Config, Error, Logger, Mode, VERSION};

pub fn main() {
    let config = match Config::new(Mode::Fixed) {
        Ok(config) => config,
        Err(Error::Args(e)) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    Logger::new()
        .label("tiles_plot")
        .level(config.general().logging())
        .init()
        .expect("Failed to initialize logger");

    info!("tiles-plot {} initializing...", VERSION);

    config.print();

    if let Err(e) = tiles_perf::run(&config) {
        tiles_perf::fatal!("{}", e);
    }
}
