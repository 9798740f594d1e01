// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{Error, Result};
use flate2::read::MultiGzDecoder;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_derive::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A decompressed benchmark result document.
#[derive(Clone, Debug, Deserialize)]
pub struct Archive {
    globals: Globals,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Globals {
    dijkstra_ranks: RankBuckets,
    total_timeouts: u64,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankBucket {
    avg_res_time: f64,
}

/// Rank buckets in the order they appear in the document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankBuckets(Vec<(String, RankBucket)>);

impl Archive {
    /// Open, decompress and parse a gzip archive. Concatenated gzip members
    /// are read as one stream. The file is closed before parsing begins.
    pub fn open(path: &Path) -> Result<Self> {
        let content = {
            let file = File::open(path).map_err(|e| Error::archive(path, e))?;
            let mut decoder = MultiGzDecoder::new(BufReader::new(file));
            let mut content = Vec::new();
            decoder
                .read_to_end(&mut content)
                .map_err(|e| Error::archive(path, e))?;
            content
        };
        serde_json::from_slice(&content).map_err(|e| Error::malformed(path, e))
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }
}

impl Globals {
    pub fn dijkstra_ranks(&self) -> &RankBuckets {
        &self.dijkstra_ranks
    }

    pub fn total_timeouts(&self) -> u64 {
        self.total_timeouts
    }
}

impl RankBucket {
    pub fn new(avg_res_time: f64) -> Self {
        Self { avg_res_time }
    }

    pub fn avg_res_time(&self) -> f64 {
        self.avg_res_time
    }

    /// A bucket without samples records an average of zero.
    pub fn has_samples(&self) -> bool {
        self.avg_res_time > 0.0
    }
}

impl RankBuckets {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RankBucket)> {
        self.0.iter().map(|(label, bucket)| (label.as_str(), bucket))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for RankBuckets {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BucketVisitor;

        impl<'de> Visitor<'de> for BucketVisitor {
            type Value = RankBuckets;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of dijkstra rank to bucket")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<RankBuckets, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut buckets = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, bucket)) = map.next_entry::<String, RankBucket>()? {
                    buckets.push((label, bucket));
                }
                Ok(RankBuckets(buckets))
            }
        }

        deserializer.deserialize_map(BucketVisitor)
    }
}
