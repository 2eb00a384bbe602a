//! Command-line and environment configuration.

use std::path::PathBuf;

use elang_eval::InterpreterBuilder;
use elang_ir::DEFAULT_REGION_SIZE;

/// Environment variable naming the native library.
pub const NATIVE_LIB_ENV: &str = "ELANG_NATIVE_LIB";
/// Environment variable overriding the scope arena region size.
pub const REGION_SIZE_ENV: &str = "ELANG_ARENA_REGION_SIZE";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Evaluate the file.
    Run,
    /// Print the token stream.
    Lex,
    /// Print the syntax tree.
    Parse,
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing file path")]
    MissingFile,
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("invalid arena region size '{0}': expected a positive number of bytes")]
    InvalidRegionSize(String),
}

/// Driver settings. Flags win over environment variables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub command: Command,
    pub file: Option<PathBuf>,
    pub native_library: Option<PathBuf>,
    pub builtins: bool,
    pub region_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            command: Command::Help,
            file: None,
            native_library: None,
            builtins: true,
            region_size: DEFAULT_REGION_SIZE,
        }
    }
}

impl Config {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_args(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Resolve from `args` (without the program name), reading environment
    /// variables through `env`.
    ///
    /// The first positional argument is a subcommand (`run`, `lex`, `parse`,
    /// `help`, `version`) or, failing that, the file to run.
    pub fn from_args<I, F>(args: I, env: F) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut command = None;
        let mut native = None;
        let mut region_size = None;

        for arg in args {
            if let Some(path) = arg.strip_prefix("--native=") {
                native = Some(PathBuf::from(path));
            } else if let Some(size) = arg.strip_prefix("--arena-region-size=") {
                region_size = Some(size.to_string());
            } else if arg == "--no-builtins" {
                config.builtins = false;
            } else if matches!(arg.as_str(), "--help" | "-h") {
                command = Some(Command::Help);
            } else if matches!(arg.as_str(), "--version" | "-V") {
                command = Some(Command::Version);
            } else if arg.starts_with('-') {
                return Err(ConfigError::UnknownOption(arg));
            } else if command.is_none() && config.file.is_none() {
                match arg.as_str() {
                    "run" => command = Some(Command::Run),
                    "lex" => command = Some(Command::Lex),
                    "parse" => command = Some(Command::Parse),
                    "help" => command = Some(Command::Help),
                    "version" => command = Some(Command::Version),
                    _ => config.file = Some(PathBuf::from(arg)),
                }
            } else if config.file.is_none() {
                config.file = Some(PathBuf::from(arg));
            } else {
                return Err(ConfigError::UnexpectedArgument(arg));
            }
        }

        config.command = match command {
            Some(command) => command,
            None if config.file.is_some() => Command::Run,
            None => Command::Help,
        };
        if matches!(config.command, Command::Run | Command::Lex | Command::Parse)
            && config.file.is_none()
        {
            return Err(ConfigError::MissingFile);
        }

        config.native_library = native.or_else(|| {
            env(NATIVE_LIB_ENV)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
        });
        if let Some(size) = region_size.or_else(|| env(REGION_SIZE_ENV)) {
            config.region_size = match size.parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => return Err(ConfigError::InvalidRegionSize(size)),
            };
        }
        Ok(config)
    }

    /// Interpreter builder carrying these settings.
    pub fn interpreter(&self) -> InterpreterBuilder {
        let builder = InterpreterBuilder::new()
            .builtins(self.builtins)
            .region_size(self.region_size);
        match &self.native_library {
            Some(path) => builder.native_library(path.clone()),
            None => builder,
        }
    }
}
