//! Startup configuration resolved from the command line.

use std::path::PathBuf;

/// Trace file used when no path is given on the command line.
pub const DEFAULT_TRACE_PATH: &str = "sumo/ns2mobility.tcl";

/// Process-wide configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path to the NS2 mobility trace to analyze.
    pub trace_path: PathBuf,
}

impl RunConfig {
    /// Resolve configuration from command line arguments (without argv[0]).
    ///
    /// When no path is given, prints a usage line and falls back to
    /// [`DEFAULT_TRACE_PATH`]. This is not an error: the analysis proceeds
    /// with the default path.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        match Self::resolve(args.into_iter().next()) {
            (trace_path, false) => Self { trace_path },
            (trace_path, true) => {
                println!("Usage: ghost-node-analyzer <path_to_ns2mobility.tcl>");
                Self { trace_path }
            }
        }
    }

    /// Pick the trace path from the first positional argument, if any.
    ///
    /// Returns the path and whether the default was used.
    fn resolve(first_arg: Option<String>) -> (PathBuf, bool) {
        match first_arg {
            Some(path) => (PathBuf::from(path), false),
            None => (PathBuf::from(DEFAULT_TRACE_PATH), true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_used_verbatim() {
        let (path, defaulted) = RunConfig::resolve(Some("traces/city.tcl".to_string()));
        assert_eq!(path, PathBuf::from("traces/city.tcl"));
        assert!(!defaulted);
    }

    #[test]
    fn missing_path_falls_back_to_default() {
        let (path, defaulted) = RunConfig::resolve(None);
        assert_eq!(path, PathBuf::from(DEFAULT_TRACE_PATH));
        assert!(defaulted);
    }
}
