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

extern crate env_logger;
extern crate getopts;
extern crate regex;

extern crate ddbench;
extern crate ddcore;
extern crate ddtree;

use std::env;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use getopts::Options;
use regex::Regex;

use ddbench::{failure_pattern, Benchmark, CacheChoice, CommandOracle, Debugger, ResultCollection,
              RunResult, TestCase};
use ddcore::{Algorithm, Configuration, DDMin, Outcome, ProbDD, TicTocMin};
use ddtree::{ChunkParser, HDD};

const DEMO_INPUT: &'static str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz1234567890ABCDEFGHI";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn usage(prog: &str, msg: &str) -> ! {
    let leaf = match Path::new(prog).file_name().and_then(|x| x.to_str()) {
        Some(m) => m,
        None => "ddbench"
    };
    if !msg.is_empty() {
        eprintln!("{}", msg);
    }
    eprintln!("Usage: {} [-a <algorithm> ...] [-c <cache> ...] [-r <results.json>] [-q]", leaf);
    eprintln!(
        "       {} -x <command> -e <regex> [-t <secs>] [-o <file>] [options] <file>",
        leaf
    );
    eprintln!("Algorithms: ddmin tictocmin probdd hdd-ddmin hdd-tictocmin hdd-probdd");
    eprintln!("Caches: none hash tree");
    process::exit(1);
}

fn algorithm<T: 'static + Clone + Eq + Hash>(name: &str) -> Result<Box<Algorithm<T>>, String> {
    match name {
        "ddmin" => Ok(Box::new(DDMin::new())),
        "tictocmin" => Ok(Box::new(TicTocMin::new())),
        "probdd" => Ok(Box::new(ProbDD::new())),
        "hdd-ddmin" => Ok(Box::new(HDD::<u32, T>::new(
            Box::new(ChunkParser::new(4, 16)),
            Box::new(DDMin::new())
        ))),
        "hdd-tictocmin" => Ok(Box::new(HDD::<u32, T>::new(
            Box::new(ChunkParser::new(4, 16)),
            Box::new(TicTocMin::new())
        ))),
        "hdd-probdd" => Ok(Box::new(HDD::<u32, T>::new(
            Box::new(ChunkParser::new(4, 16)),
            Box::new(ProbDD::new())
        ))),
        _ => Err(format!("Unknown algorithm '{}'", name))
    }
}

fn algorithms<T: 'static + Clone + Eq + Hash>(
    names: &[String]
) -> Result<Vec<Box<Algorithm<T>>>, String> {
    names.iter().map(|n| algorithm(n)).collect()
}

fn caches(names: &[String]) -> Result<Vec<CacheChoice>, String> {
    names.iter().map(|n| n.parse()).collect()
}

/// Reduce the built-in printable-characters input against the all-digits oracle and print the
/// result table.
fn demo(
    algo_names: &[String],
    cache_names: &[String],
    results_file: Option<PathBuf>,
    quiet: bool
) -> Result<(), String> {
    let oracle = Box::new(|config: &Configuration<char>| {
        for d in "0123456789".chars() {
            if !config.iter().any(|&c| c == d) {
                return Outcome::Pass;
            }
        }
        Outcome::Fail
    });
    let case = TestCase::new(
        "printables",
        Configuration::from(DEMO_INPUT),
        algorithms::<char>(algo_names)?,
        caches(cache_names)?,
        oracle
    );
    let mut benchmark = match results_file {
        Some(path) => Benchmark::with_file(vec![case], path),
        None => Benchmark::new(vec![case])
    };
    if benchmark.validate().iter().any(|&v| !v) {
        return Err("The demo input does not elicit FAIL.".to_string());
    }
    benchmark.run();
    if !quiet {
        println!("{}", benchmark.results().to_table());
    }
    Ok(())
}

/// Reduce `file` against a child-process oracle: FAIL iff the command, run over the candidate
/// file, writes something matching `error` to stderr.
fn reduce_file(
    file: &str,
    algo_names: &[String],
    cache_names: &[String],
    command: Option<String>,
    error: Option<String>,
    timeout_secs: u64,
    output: Option<PathBuf>,
    results_file: Option<PathBuf>,
    quiet: bool
) -> Result<(), String> {
    let command = command.ok_or_else(|| "-x <command> is required when a file is given.".to_string())?;
    let error = error.ok_or_else(|| "-e <regex> is required when a file is given.".to_string())?;
    let pattern = Regex::new(&error).map_err(|e| format!("Invalid regex: {}", e))?;
    let bytes = fs::read(file).map_err(|e| format!("Can't read {}: {}", file, e))?;
    let input = Configuration::new(bytes);
    let caches = caches(cache_names)?;
    let candidate_path = env::temp_dir().join(format!("ddbench-{}", process::id()));

    let mut results = ResultCollection::new();
    let mut best: Option<Configuration<u8>> = None;
    for name in algo_names {
        for choice in &caches {
            let mut debugger = Debugger::new(algorithm::<u8>(name)?, choice.build());
            let mut command_oracle = CommandOracle::new(
                &command,
                candidate_path.clone(),
                Duration::from_secs(timeout_secs),
                failure_pattern(&pattern)
            )
            .map_err(|e| format!("{}", e))?;
            let start = Instant::now();
            let reduced = {
                let mut oracle = |config: &Configuration<u8>| command_oracle.outcome_of(config);
                debugger
                    .debug(&input, &mut oracle)
                    .map_err(|e| format!("{}: {}", file, e))?
                    .clone()
            };
            let elapsed = start.elapsed();
            let time = elapsed.as_secs() as f64 + f64::from(elapsed.subsec_nanos()) * 1e-9;
            results.add(RunResult::new(
                file,
                &format!("{}", debugger.algorithm()),
                &format!("{}", choice),
                input.len(),
                reduced.len(),
                debugger.count(),
                time
            ));
            if best.as_ref().map_or(true, |b| reduced.len() < b.len()) {
                best = Some(reduced);
            }
        }
    }
    fs::remove_file(&candidate_path).ok();

    if let Some(ref path) = output {
        if let Some(ref b) = best {
            fs::write(path, b.elems())
                .map_err(|e| format!("Can't write {}: {}", path.display(), e))?;
        }
    }
    if let Some(ref path) = results_file {
        results
            .store(path)
            .map_err(|e| format!("Can't write {}: {}", path.display(), e))?;
    }
    if !quiet {
        println!("{}", results.to_table());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let prog = args[0].clone();
    let matches = match Options::new()
        .optmulti(
            "a",
            "algorithm",
            "Algorithm to benchmark. May be given multiple times.",
            "NAME"
        )
        .optmulti("c", "cache", "Oracle cache to use. May be given multiple times.", "KIND")
        .optopt(
            "x",
            "command",
            "Command reproducing the failure; '{}' is replaced by the candidate file.",
            "CMD"
        )
        .optopt("e", "error", "Regex identifying the failure on the command's stderr.", "REGEX")
        .optopt(
            "t",
            "timeout",
            "Seconds before a candidate run is classed UNRESOLVED (default 10).",
            "SECS"
        )
        .optopt("o", "output", "Where to write the smallest reduced input.", "FILE")
        .optopt("r", "results", "Where to write the JSON result records.", "FILE")
        .optflag("q", "quiet", "Don't print the result table.")
        .optflag("h", "help", "")
        .parse(&args[1..])
    {
        Ok(m) => m,
        Err(f) => usage(&prog, &f.to_string())
    };
    if matches.opt_present("h") {
        usage(&prog, "");
    }

    let algo_names = if matches.opt_strs("a").is_empty() {
        vec!["ddmin".to_string(), "tictocmin".to_string(), "probdd".to_string()]
    } else {
        matches.opt_strs("a")
    };
    let cache_names = if matches.opt_strs("c").is_empty() {
        vec!["none".to_string()]
    } else {
        matches.opt_strs("c")
    };
    let timeout_secs = match matches.opt_str("t") {
        Some(s) => match s.parse() {
            Ok(t) => t,
            Err(_) => usage(&prog, &format!("Invalid timeout '{}'", s))
        },
        None => DEFAULT_TIMEOUT_SECS
    };
    let output = matches.opt_str("o").map(PathBuf::from);
    let results_file = matches.opt_str("r").map(PathBuf::from);
    let quiet = matches.opt_present("q");

    let outcome = match matches.free.len() {
        0 => demo(&algo_names, &cache_names, results_file, quiet),
        1 => reduce_file(
            &matches.free[0],
            &algo_names,
            &cache_names,
            matches.opt_str("x"),
            matches.opt_str("e"),
            timeout_secs,
            output,
            results_file,
            quiet
        ),
        _ => usage(&prog, "Too many arguments.")
    };
    if let Err(msg) = outcome {
        usage(&prog, &msg);
    }
}
