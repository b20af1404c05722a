//! Command-line configuration.
//!
//! Flags win over environment variables; environment variables win over
//! defaults.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable selecting the model client.
pub const MODEL_ENV: &str = "CAIRN_MODEL";

/// Which model client answers invocations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ModelSpec {
    /// Every request is answered with the rendered frame.
    #[default]
    Echo,
    /// Requests are shown on stderr and answered on stdin.
    Interactive,
    /// Answers come from a file, one per line.
    Replay(PathBuf),
}

impl FromStr for ModelSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "echo" => Ok(ModelSpec::Echo),
            "interactive" => Ok(ModelSpec::Interactive),
            _ => match s.strip_prefix("replay:") {
                Some("") => Err("replay model needs a file: replay:<path>".to_string()),
                Some(path) => Ok(ModelSpec::Replay(PathBuf::from(path))),
                None => Err(format!(
                    "unknown model '{s}' (expected echo, interactive or replay:<path>)"
                )),
            },
        }
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSpec::Echo => f.write_str("echo"),
            ModelSpec::Interactive => f.write_str("interactive"),
            ModelSpec::Replay(path) => write!(f, "replay:{}", path.display()),
        }
    }
}

/// How results and diagnostics are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown format '{s}' (expected human or json)")),
        }
    }
}

/// One program to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    File(String),
    /// Source text given with `--inline`.
    Inline(String),
}

impl Input {
    /// Label used in reports and diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Input::File(path) => path,
            Input::Inline(_) => "<inline>",
        }
    }
}

/// Options of `cairn run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub inputs: Vec<Input>,
    pub model: ModelSpec,
    /// Recursion limit for user calls; unlimited when `None`.
    pub max_depth: Option<usize>,
    /// Print invocation counts per input.
    pub stats: bool,
    /// Run several inputs concurrently.
    pub parallel: bool,
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            inputs: Vec::new(),
            model: ModelSpec::default(),
            max_depth: None,
            stats: false,
            parallel: true,
            format: OutputFormat::default(),
        }
    }
}

impl RunConfig {
    /// Parse the arguments following `run`, reading `CAIRN_MODEL` from the
    /// process environment.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        Self::from_args_and_env(args, std::env::var(MODEL_ENV).ok().as_deref())
    }

    /// Parse the arguments following `run` with an explicit `CAIRN_MODEL`.
    pub fn from_args_and_env(args: &[String], env_model: Option<&str>) -> Result<Self, String> {
        let mut config = RunConfig::default();
        if let Some(spec) = env_model.filter(|s| !s.is_empty()) {
            config.model = spec
                .parse()
                .map_err(|err| format!("invalid {MODEL_ENV}: {err}"))?;
        }

        let mut args = args.iter();
        while let Some(arg) = args.next() {
            if let Some(spec) = arg.strip_prefix("--model=") {
                config.model = spec.parse()?;
            } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
                let depth = depth
                    .parse::<usize>()
                    .map_err(|_| format!("--max-depth expects a positive integer, got '{depth}'"))?;
                if depth == 0 {
                    return Err("--max-depth must be at least 1".to_string());
                }
                config.max_depth = Some(depth);
            } else if let Some(format) = arg.strip_prefix("--format=") {
                config.format = format.parse()?;
            } else if let Some(source) = arg.strip_prefix("--inline=") {
                config.inputs.push(Input::Inline(source.to_string()));
            } else if arg == "--inline" {
                let source = args
                    .next()
                    .ok_or_else(|| "--inline expects program source".to_string())?;
                config.inputs.push(Input::Inline(source.clone()));
            } else if arg == "--stats" {
                config.stats = true;
            } else if arg == "--no-parallel" {
                config.parallel = false;
            } else if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            } else {
                config.inputs.push(Input::File(arg.clone()));
            }
        }

        if config.inputs.is_empty() {
            return Err("missing file path or --inline source".to_string());
        }
        Ok(config)
    }

    /// Whether inputs should be run on the thread pool.
    ///
    /// An interactive model shares one terminal, so its runs are always
    /// sequential.
    pub fn runs_in_parallel(&self) -> bool {
        self.parallel && self.inputs.len() > 1 && self.model != ModelSpec::Interactive
    }
}
