//! Scenario context: the source line of the running scenario.
//!
//! The before-hook reads the declaring feature file, picks out the line
//! the scenario was invoked from, and carries it into the facade so
//! every failure banner shows which test input was in play. The context
//! is an explicit value handed to [`crate::Interactions`], not hidden
//! process-wide state, so serial execution is a usage convention rather
//! than a correctness requirement.

use std::path::Path;

/// Placeholder shown in banners when no scenario is running.
const NO_SCENARIO: &str = "<sem cenário ativo>";

/// The literal source text of the currently executing scenario's
/// invoking line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioContext {
    line: Option<String>,
}

impl ScenarioContext {
    /// Context with a known source line.
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: Some(line.into()),
        }
    }

    /// Empty context, for use outside any scenario.
    #[must_use]
    pub const fn none() -> Self {
        Self { line: None }
    }

    /// Read `path` and capture its 1-based `line_number` as the context.
    ///
    /// Mirrors how BDD runners report a scenario: the feature file path
    /// plus the scenario's declaration line.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the feature file cannot be read.
    pub fn capture(path: &Path, line_number: usize) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(contents
            .lines()
            .nth(line_number.saturating_sub(1))
            .map_or_else(Self::none, Self::new))
    }

    /// The captured line, or a placeholder when none is live.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.line.as_deref().unwrap_or(NO_SCENARIO)
    }

    /// Whether a scenario line has been captured.
    #[must_use]
    pub const fn is_captured(&self) -> bool {
        self.line.is_some()
    }
}

impl std::fmt::Display for ScenarioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn none_uses_placeholder() {
        assert_eq!(ScenarioContext::none().as_str(), NO_SCENARIO);
        assert!(!ScenarioContext::none().is_captured());
    }

    #[test]
    fn capture_picks_the_requested_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Funcionalidade: Compra").unwrap();
        writeln!(file, "  Cenário: Compra simples").unwrap();
        writeln!(file, "    Dado que acesso a loja").unwrap();
        file.flush().unwrap();

        let ctx = ScenarioContext::capture(file.path(), 2).unwrap();
        assert_eq!(ctx.as_str(), "  Cenário: Compra simples");
        assert!(ctx.is_captured());
    }

    #[test]
    fn capture_past_eof_is_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let ctx = ScenarioContext::capture(file.path(), 42).unwrap();
        assert!(!ctx.is_captured());
    }

    #[test]
    fn capture_missing_file_is_io_error() {
        assert!(ScenarioContext::capture(Path::new("/nonexistent/x.feature"), 1).is_err());
    }
}
