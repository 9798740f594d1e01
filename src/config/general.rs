// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use log::LevelFilter;
use serde_derive::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_root")]
    root: String,
    #[serde(default = "default_server")]
    server: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(with = "LevelDef")]
    #[serde(default = "default_logging_level")]
    logging: LevelFilter,
}

impl General {
    /// directory holding one subdirectory of archives per server
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn set_root(&mut self, root: &str) {
        self.root = root.to_string();
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn set_server(&mut self, server: &str) {
        self.server = server.to_string();
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn set_output(&mut self, output: &str) {
        self.output = output.to_string();
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn logging(&self) -> LevelFilter {
        self.logging
    }

    pub fn set_logging(&mut self, level: LevelFilter) {
        self.logging = level;
    }
}

impl Default for General {
    fn default() -> General {
        General {
            root: default_root(),
            server: default_server(),
            output: default_output(),
            width: default_width(),
            height: default_height(),
            logging: default_logging_level(),
        }
    }
}

fn default_root() -> String {
    ".".to_string()
}

fn default_server() -> String {
    "virtuoso".to_string()
}

fn default_output() -> String {
    "tiles.png".to_string()
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
#[serde(remote = "LevelFilter")]
#[serde(deny_unknown_fields)]
enum LevelDef {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_logging_level() -> LevelFilter {
    LevelFilter::Info
}
