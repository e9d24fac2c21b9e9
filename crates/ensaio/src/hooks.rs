//! Scenario hook glue.
//!
//! The BDD harness calls [`capture_context`] before each scenario and
//! [`after_scenario`] once it finishes. The after-hook captures the
//! full-page evidence screenshot into the outcome folder and, when the
//! configuration says so, closes the browser so the next scenario gets
//! a fresh one.

use std::path::{Path, PathBuf};

use crate::backend::Backend;
use crate::context::ScenarioContext;
use crate::evidence::{capture_full_page, save_screenshot, Outcome};
use crate::error::EnsaioResult;
use crate::session::Session;

/// Read the scenario's invoking source line from its feature file.
///
/// A context that cannot be read (missing file, line out of range) is
/// logged and degrades to [`ScenarioContext::none`] rather than failing
/// the scenario before it starts.
#[must_use]
pub fn capture_context(feature_path: &Path, line: usize) -> ScenarioContext {
    match ScenarioContext::capture(feature_path, line) {
        Ok(context) => context,
        Err(err) => {
            tracing::warn!(
                path = %feature_path.display(),
                line,
                %err,
                "could not capture scenario context"
            );
            ScenarioContext::none()
        }
    }
}

/// Post-scenario evidence and teardown.
///
/// Returns the evidence path when a browser was live to capture from;
/// a scenario that never touched the browser produces no evidence.
/// Teardown always runs: a failed capture never leaves the browser
/// alive when `close_after_scenario` is set.
pub async fn after_scenario<B: Backend>(
    session: &mut Session<B>,
    scenario_name: &str,
    outcome: Outcome,
) -> EnsaioResult<Option<PathBuf>> {
    let mut evidence = Ok(None);
    if session.is_active() {
        evidence = capture_evidence(session, scenario_name, outcome).await;
    }
    if session.config().close_after_scenario {
        session.kill().await?;
    }
    evidence
}

async fn capture_evidence<B: Backend>(
    session: &mut Session<B>,
    scenario_name: &str,
    outcome: Outcome,
) -> EnsaioResult<Option<PathBuf>> {
    let base = session.config().evidence_dir.clone();
    let backend = session.get(&ScenarioContext::none()).await?;
    let png = capture_full_page(backend).await?;
    Ok(Some(save_screenshot(&base, outcome, scenario_name, &png)?))
}

#[cfg(test)]
mod hook_tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::config::Config;
    use crate::evidence::outcome_dir;

    #[test]
    fn unreadable_feature_degrades_to_none() {
        let context = capture_context(Path::new("/nonexistent.feature"), 3);
        assert!(!context.is_captured());
    }

    #[test]
    fn captures_the_invoking_line() {
        let dir = tempfile::tempdir().unwrap();
        let feature = dir.path().join("compra.feature");
        std::fs::write(&feature, "Funcionalidade: Compra\n\n  Cenário: Comprar um produto\n").unwrap();
        let context = capture_context(&feature, 3);
        assert_eq!(context.as_str().trim(), "Cenário: Comprar um produto");
    }

    #[tokio::test]
    async fn failed_scenario_saves_into_erro_and_kills() {
        let base = tempfile::tempdir().unwrap();
        let config = Config::default().with_evidence_dir(base.path());
        let mut session: Session<MockBackend> = Session::new(config);
        session.get(&ScenarioContext::none()).await.unwrap();

        let path = after_scenario(&mut session, "Comprar um produto", Outcome::Error)
            .await
            .unwrap()
            .unwrap();
        assert!(path.starts_with(outcome_dir(base.path(), Outcome::Error)));
        assert!(!session.is_active());
    }

    #[tokio::test]
    async fn keep_open_config_leaves_the_session_alive() {
        let base = tempfile::tempdir().unwrap();
        let config = Config::default()
            .with_evidence_dir(base.path())
            .with_close_after_scenario(false);
        let mut session: Session<MockBackend> = Session::new(config);
        session.get(&ScenarioContext::none()).await.unwrap();

        after_scenario(&mut session, "Comprar um produto", Outcome::Success)
            .await
            .unwrap();
        assert!(session.is_active());
    }

    #[tokio::test]
    async fn failed_capture_still_kills_the_session() {
        let base = tempfile::tempdir().unwrap();
        let config = Config::default().with_evidence_dir(base.path());
        let mut session: Session<MockBackend> = Session::new(config);
        {
            // tall page forces the decode path; the bytes are not a PNG
            let backend = session.get(&ScenarioContext::none()).await.unwrap();
            backend.script_results = vec![serde_json::json!(20), serde_json::json!(10)];
            backend.screenshot = b"nao-e-um-png".to_vec();
        }

        let result = after_scenario(&mut session, "Comprar um produto", Outcome::Error).await;
        assert!(result.is_err());
        assert!(!session.is_active());
    }

    #[tokio::test]
    async fn scenario_without_a_browser_produces_no_evidence() {
        let base = tempfile::tempdir().unwrap();
        let config = Config::default().with_evidence_dir(base.path());
        let mut session: Session<MockBackend> = Session::new(config);
        let evidence = after_scenario(&mut session, "cenário seco", Outcome::Success)
            .await
            .unwrap();
        assert!(evidence.is_none());
    }
}
