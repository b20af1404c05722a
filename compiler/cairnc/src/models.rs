//! Model clients available from the command line.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

use parking_lot::Mutex;

use cairn_eval::{EchoModel, ModelClient, ModelError, ModelRequest};

use crate::config::ModelSpec;

/// Build the client selected by `spec`.
pub fn build_model(spec: &ModelSpec) -> Result<Box<dyn ModelClient>, String> {
    match spec {
        ModelSpec::Echo => Ok(Box::new(EchoModel)),
        ModelSpec::Interactive => Ok(Box::new(InteractiveModel::new())),
        ModelSpec::Replay(path) => ReplayModel::open(path)
            .map(|model| Box::new(model) as Box<dyn ModelClient>)
            .map_err(|err| format!("cannot read replay file '{}': {err}", path.display())),
    }
}

/// A human plays the model: each request is printed on stderr and the
/// answer is read from one line of stdin.
#[derive(Debug, Default)]
pub struct InteractiveModel {
    terminal: Mutex<()>,
}

impl InteractiveModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelClient for InteractiveModel {
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError> {
        let _terminal = self.terminal.lock();
        let mut stderr = io::stderr().lock();
        let shown = writeln!(stderr, "--- {} ---", request.mode.label())
            .and_then(|()| writeln!(stderr, "{}", request.prompt()))
            .and_then(|()| write!(stderr, "> "))
            .and_then(|()| stderr.flush());
        shown.map_err(|err| ModelError::Transport(err.to_string()))?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|err| ModelError::Transport(err.to_string()))?;
        if read == 0 {
            return Err(ModelError::Cancelled);
        }
        Ok(unescape(line.trim_end_matches(['\n', '\r'])))
    }
}

/// Answers requests from a prepared list, one answer per line.
///
/// `\n` inside a line stands for a newline and `\\` for a backslash, so
/// multi-line answers fit on one line.
#[derive(Debug)]
pub struct ReplayModel {
    answers: Mutex<VecDeque<String>>,
}

impl ReplayModel {
    pub fn open(path: &Path) -> io::Result<Self> {
        std::fs::read_to_string(path).map(|text| Self::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        ReplayModel {
            answers: Mutex::new(text.lines().map(unescape).collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().len()
    }
}

impl ModelClient for ReplayModel {
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError> {
        let answer = self.answers.lock().pop_front();
        tracing::debug!(mode = request.mode.label(), found = answer.is_some(), "replaying answer");
        answer.ok_or(ModelError::Exhausted(request.mode.label()))
    }
}

/// Resolve `\n`, `\t` and `\\`; any other escape is kept as written.
pub fn unescape(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
