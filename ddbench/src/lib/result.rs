// Copyright (c) 2018 King's College London
// created by the Software Development Team <http://soft-dev.org/>
//
// The Universal Permissive License (UPL), Version 1.0
//
// Subject to the condition set forth below, permission is hereby granted to any person obtaining a
// copy of this software, associated documentation and/or data (collectively the "Software"), free
// of charge and under any and all copyright rights in the Software, and any and all patent rights
// owned or freely licensable by each licensor hereunder covering either (i) the unmodified
// Software as contributed to or provided by such licensor, or (ii) the Larger Works (as defined
// below), to deal in both
//
// (a) the Software, and
// (b) any piece of software and/or hardware listed in the lrgrwrks.txt file
// if one is included with the Software (each a "Larger Work" to which the Software is contributed
// by such licensors),
//
// without restriction, including without limitation the rights to copy, create derivative works
// of, display, perform, and distribute the Software and make, use, sell, offer for sale, import,
// export, have made, and have sold the Software and the Larger Work(s), and to sublicense the
// foregoing rights on either these or other terms.
//
// This license is subject to the following condition: The above copyright notice and either this
// complete permission notice or at a minimum a reference to the UPL must be included in all copies
// or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
// BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use comfy_table::Table;
use serde_json;

/// The record one reduction run leaves behind. Serialised as a JSON object with exactly these
/// keys -- the one wire surface other tooling may rely on:
/// `{"File", "Algorithm", "Cache", "Input Size", "Output Size", "Reduction Ratio", "Count",
/// "Time"}`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RunResult {
    #[serde(rename = "File")]
    file: String,
    #[serde(rename = "Algorithm")]
    algorithm: String,
    #[serde(rename = "Cache")]
    cache: String,
    #[serde(rename = "Input Size")]
    input_size: usize,
    #[serde(rename = "Output Size")]
    output_size: usize,
    #[serde(rename = "Reduction Ratio")]
    reduction_ratio: f64,
    #[serde(rename = "Count")]
    count: u64,
    #[serde(rename = "Time")]
    time: f64
}

impl RunResult {
    pub fn new(
        file: &str,
        algorithm: &str,
        cache: &str,
        input_size: usize,
        output_size: usize,
        count: u64,
        time: f64
    ) -> RunResult {
        // An empty input cannot shrink, so its reduction ratio is defined as 1.
        let reduction_ratio = if input_size == 0 {
            1.0
        } else {
            (input_size - output_size) as f64 / input_size as f64
        };
        RunResult {
            file: file.to_string(),
            algorithm: algorithm.to_string(),
            cache: cache.to_string(),
            input_size,
            output_size,
            reduction_ratio,
            count,
            time
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn cache(&self) -> &str {
        &self.cache
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn reduction_ratio(&self) -> f64 {
        self.reduction_ratio
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

#[derive(Debug)]
pub enum ResultsError {
    IoError(io::Error),
    JsonError(serde_json::Error)
}

impl From<io::Error> for ResultsError {
    fn from(err: io::Error) -> ResultsError {
        ResultsError::IoError(err)
    }
}

impl From<serde_json::Error> for ResultsError {
    fn from(err: serde_json::Error) -> ResultsError {
        ResultsError::JsonError(err)
    }
}

impl fmt::Display for ResultsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResultsError::IoError(ref e) => e.fmt(f),
            ResultsError::JsonError(ref e) => e.fmt(f)
        }
    }
}

/// An ordered collection of run records.
pub struct ResultCollection {
    results: Vec<RunResult>
}

impl ResultCollection {
    pub fn new() -> ResultCollection {
        ResultCollection {
            results: Vec::new()
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn add(&mut self, result: RunResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// Read records from `path`. Unreadable or malformed files are logged and leave the
    /// collection empty; a missing history is never fatal.
    pub fn load(path: &Path) -> ResultCollection {
        match ResultCollection::try_load(path) {
            Ok(collection) => collection,
            Err(e) => {
                error!("Cannot read benchmark results from {}: {}", path.display(), e);
                ResultCollection::new()
            }
        }
    }

    fn try_load(path: &Path) -> Result<ResultCollection, ResultsError> {
        let results = serde_json::from_reader(File::open(path)?)?;
        Ok(ResultCollection { results })
    }

    /// Write the records to `path` as a JSON list.
    pub fn store(&self, path: &Path) -> Result<(), ResultsError> {
        serde_json::to_writer_pretty(File::create(path)?, &self.results)?;
        Ok(())
    }

    /// Render the records as a table. Of the File, Algorithm and Cache columns, those with only a
    /// single distinct value are left out: they would repeat the same cell down the whole table.
    pub fn to_table(&self) -> Table {
        let varying = |f: &Fn(&RunResult) -> String| -> bool {
            self.results.iter().map(|r| f(r)).collect::<HashSet<_>>().len() > 1
        };
        let file_col = varying(&|r: &RunResult| r.file().to_string());
        let algorithm_col = varying(&|r: &RunResult| r.algorithm().to_string());
        let cache_col = varying(&|r: &RunResult| r.cache().to_string());

        let mut header = Vec::new();
        if file_col {
            header.push("File".to_string());
        }
        if algorithm_col {
            header.push("Algorithm".to_string());
        }
        if cache_col {
            header.push("Cache".to_string());
        }
        header.extend(
            ["Input Size", "Output Size", "Reduction Ratio", "Count", "Time"]
                .iter()
                .map(|s| s.to_string())
        );

        let mut table = Table::new();
        table.set_header(header);
        for r in &self.results {
            let mut row = Vec::new();
            if file_col {
                row.push(r.file().to_string());
            }
            if algorithm_col {
                row.push(r.algorithm().to_string());
            }
            if cache_col {
                row.push(r.cache().to_string());
            }
            row.push(r.input_size().to_string());
            row.push(r.output_size().to_string());
            row.push(format!("{:.2}", r.reduction_ratio()));
            row.push(r.count().to_string());
            row.push(format!("{:.4}", r.time()));
            table.add_row(row);
        }
        table
    }
}

#[cfg(test)]
mod test {
    use serde_json;
    use tempfile::tempdir;

    use super::{ResultCollection, RunResult};

    fn sample() -> RunResult {
        RunResult::new("a.bin", "ddmin", "HashCache", 100, 10, 42, 1.5)
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(&sample()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "Algorithm",
                "Cache",
                "Count",
                "File",
                "Input Size",
                "Output Size",
                "Reduction Ratio",
                "Time"
            ]
        );
        assert_eq!(obj["Input Size"].as_u64(), Some(100));
        assert_eq!(obj["Reduction Ratio"].as_f64(), Some(0.9));
    }

    #[test]
    fn test_empty_input_ratio() {
        let r = RunResult::new("x", "ddmin", "None", 0, 0, 0, 0.0);
        assert_eq!(r.reduction_ratio(), 1.0);
    }

    #[test]
    fn test_store_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.json");
        let mut collection = ResultCollection::new();
        collection.add(sample());
        collection.add(RunResult::new("b.bin", "TicTocMin", "None", 70, 10, 7, 0.1));
        collection.store(&path).unwrap();
        let loaded = ResultCollection::load(&path);
        assert_eq!(loaded.results(), collection.results());
    }

    #[test]
    fn test_load_of_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let loaded = ResultCollection::load(&dir.path().join("nothing.json"));
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_single_valued_columns_are_elided() {
        let mut collection = ResultCollection::new();
        collection.add(sample());
        collection.add(RunResult::new("a.bin", "TicTocMin", "HashCache", 100, 12, 50, 2.0));
        let rendered = format!("{}", collection.to_table());
        // Two algorithms vary; the single file and cache do not.
        assert!(rendered.contains("Algorithm"));
        assert!(!rendered.contains("File"));
        assert!(!rendered.contains("HashCache"));
        assert!(rendered.contains("Input Size"));
    }
}
