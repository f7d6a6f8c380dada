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

use std::fs;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use regex::Regex;
use tempfile::tempfile;
use wait_timeout::ChildExt;

use ddcore::{Configuration, Outcome};
use debugger::DebugError;

/// What one finished (or killed) child-process run looked like.
pub struct ExecOutput {
    /// The exit code, if the process exited normally.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>
}

/// A child-process oracle. Every candidate configuration is written to `input_path`, the command
/// is run with `{}` in its arguments replaced by that path, and the run's outcome is mapped to a
/// verdict by `check`. A run that exceeds `timeout` is killed and classed `UNRESOLVED`, as is any
/// run the host refuses to start: execution trouble must never masquerade as a verdict.
///
/// The command string is split on whitespace; there is no shell quoting.
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    input_path: PathBuf,
    timeout: Duration,
    executable: bool,
    check: Box<Fn(&ExecOutput) -> Outcome>
}

impl CommandOracle {
    pub fn new(
        command: &str,
        input_path: PathBuf,
        timeout: Duration,
        check: Box<Fn(&ExecOutput) -> Outcome>
    ) -> Result<CommandOracle, DebugError> {
        let mut parts = command.split_whitespace();
        let program = match parts.next() {
            Some(p) => p.to_string(),
            None => return Err(DebugError::EmptyCommand)
        };
        Ok(CommandOracle {
            program,
            args: parts.map(|s| s.to_string()).collect(),
            input_path,
            timeout,
            executable: false,
            check
        })
    }

    /// Mark each candidate file executable before the command runs, for commands that execute
    /// their input rather than read it.
    pub fn executable(mut self) -> CommandOracle {
        self.executable = true;
        self
    }

    /// The verdict for `config`.
    pub fn outcome_of(&mut self, config: &Configuration<u8>) -> Outcome {
        match self.try_outcome(config) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Oracle execution error: {}", e);
                Outcome::Unresolved
            }
        }
    }

    fn try_outcome(&mut self, config: &Configuration<u8>) -> io::Result<Outcome> {
        fs::write(&self.input_path, config.elems())?;
        if self.executable {
            self.make_executable()?;
        }
        let path = self.input_path.to_string_lossy();
        // Capture through files rather than pipes: a candidate that floods a pipe would block
        // before the timeout can kick in.
        let mut stdout = tempfile()?;
        let mut stderr = tempfile()?;
        let mut child = Command::new(&self.program)
            .args(self.args.iter().map(|a| a.replace("{}", &path)))
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout.try_clone()?))
            .stderr(Stdio::from(stderr.try_clone()?))
            .spawn()?;
        let status = match child.wait_timeout(self.timeout)? {
            Some(status) => status,
            None => {
                child.kill()?;
                child.wait()?;
                debug!("Oracle run exceeded its {:?} timeout", self.timeout);
                return Ok(Outcome::Unresolved);
            }
        };
        let mut out = Vec::new();
        stdout.seek(SeekFrom::Start(0))?;
        stdout.read_to_end(&mut out)?;
        let mut err = Vec::new();
        stderr.seek(SeekFrom::Start(0))?;
        stderr.read_to_end(&mut err)?;
        let output = ExecOutput {
            code: status.code(),
            stdout: out,
            stderr: err
        };
        Ok((self.check)(&output))
    }

    #[cfg(unix)]
    fn make_executable(&self) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&self.input_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&self.input_path, perms)
    }

    #[cfg(not(unix))]
    fn make_executable(&self) -> io::Result<()> {
        Ok(())
    }
}

/// The common check: `FAIL` iff the failure signature appears on stderr.
pub fn failure_pattern(pattern: &Regex) -> Box<Fn(&ExecOutput) -> Outcome> {
    let pattern = pattern.clone();
    Box::new(move |output: &ExecOutput| {
        if pattern.is_match(&String::from_utf8_lossy(&output.stderr)) {
            Outcome::Fail
        } else {
            Outcome::Pass
        }
    })
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use regex::Regex;
    use tempfile::tempdir;

    use super::{failure_pattern, CommandOracle, ExecOutput};
    use ddcore::{Configuration, Outcome};

    #[test]
    fn test_exit_code_check() {
        let dir = tempdir().unwrap();
        let mut oracle = CommandOracle::new(
            "grep -q b {}",
            dir.path().join("input"),
            Duration::from_secs(10),
            Box::new(|output: &ExecOutput| {
                if output.code == Some(0) {
                    Outcome::Fail
                } else {
                    Outcome::Pass
                }
            })
        )
        .unwrap();
        assert_eq!(
            oracle.outcome_of(&Configuration::new(b"abc".to_vec())),
            Outcome::Fail
        );
        assert_eq!(
            oracle.outcome_of(&Configuration::new(b"ac".to_vec())),
            Outcome::Pass
        );
    }

    #[test]
    fn test_timeout_is_unresolved() {
        let dir = tempdir().unwrap();
        let mut oracle = CommandOracle::new(
            "sleep 5",
            dir.path().join("input"),
            Duration::from_millis(50),
            Box::new(|_: &ExecOutput| Outcome::Fail)
        )
        .unwrap();
        assert_eq!(
            oracle.outcome_of(&Configuration::new(vec![0u8])),
            Outcome::Unresolved
        );
    }

    #[test]
    fn test_missing_program_is_unresolved() {
        let dir = tempdir().unwrap();
        let mut oracle = CommandOracle::new(
            "ddbench-no-such-program {}",
            dir.path().join("input"),
            Duration::from_secs(1),
            Box::new(|_: &ExecOutput| Outcome::Fail)
        )
        .unwrap();
        assert_eq!(
            oracle.outcome_of(&Configuration::new(vec![0u8])),
            Outcome::Unresolved
        );
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let dir = tempdir().unwrap();
        assert!(CommandOracle::new(
            "  ",
            dir.path().join("input"),
            Duration::from_secs(1),
            Box::new(|_: &ExecOutput| Outcome::Pass)
        )
        .is_err());
    }

    #[test]
    fn test_failure_pattern() {
        let check = failure_pattern(&Regex::new("Segmentation fault").unwrap());
        let crash = ExecOutput {
            code: Some(139),
            stdout: Vec::new(),
            stderr: b"Segmentation fault (core dumped)".to_vec()
        };
        let clean = ExecOutput {
            code: Some(0),
            stdout: b"Segmentation fault".to_vec(),
            stderr: Vec::new()
        };
        assert_eq!(check(&crash), Outcome::Fail);
        assert_eq!(check(&clean), Outcome::Pass);
    }
}
