//! Browser session lifecycle.
//!
//! A [`Session`] owns at most one live backend. [`Session::get`] launches
//! it on first use and hands back the same instance until [`Session::kill`]
//! tears it down; the next `get` after a kill launches a fresh browser.
//! Ownership through `&mut self` makes concurrent `get` calls on one
//! session unrepresentable, so no locking is needed.

use crate::backend::Backend;
use crate::config::Config;
use crate::context::ScenarioContext;
use crate::error::{EnsaioError, EnsaioResult};

/// Lazily-launched browser session.
#[derive(Debug)]
pub struct Session<B: Backend> {
    config: Config,
    backend: Option<B>,
}

impl<B: Backend> Session<B> {
    /// A session that will launch with `config` on first use.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            backend: None,
        }
    }

    /// The configuration this session launches with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a browser is currently live.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.backend.is_some()
    }

    /// The live backend, launching one if none exists.
    ///
    /// A launch failure in grid mode surfaces as a grid banner; locally
    /// it surfaces as a classified interaction error.
    pub async fn get(&mut self, context: &ScenarioContext) -> EnsaioResult<&mut B> {
        if self.backend.is_none() {
            let backend = B::launch(&self.config).await.map_err(|err| {
                if self.config.grid {
                    EnsaioError::grid(&err.message, context)
                } else {
                    EnsaioError::interaction(err, "abrir o navegador", context)
                }
            })?;
            tracing::debug!(session = backend.session_id(), "browser session started");
            self.backend = Some(backend);
        }
        Ok(self
            .backend
            .as_mut()
            .expect("session backend just initialized"))
    }

    /// Close the live browser, if any. Idempotent.
    pub async fn kill(&mut self) -> EnsaioResult<()> {
        if let Some(backend) = self.backend.take() {
            tracing::debug!(session = backend.session_id(), "killing browser session");
            backend
                .close()
                .await
                .map_err(|err| EnsaioError::interaction(err, "fechar o navegador", &ScenarioContext::none()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use crate::backend::MockBackend;

    fn session() -> Session<MockBackend> {
        Session::new(Config::default())
    }

    #[tokio::test]
    async fn get_launches_once_and_reuses() {
        let mut session = session();
        let ctx = ScenarioContext::none();
        let first = session.get(&ctx).await.unwrap().session_id().to_string();
        let second = session.get(&ctx).await.unwrap().session_id().to_string();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn kill_then_get_launches_a_new_browser() {
        let mut session = session();
        let ctx = ScenarioContext::none();
        let first = session.get(&ctx).await.unwrap().session_id().to_string();
        session.kill().await.unwrap();
        assert!(!session.is_active());
        let second = session.get(&ctx).await.unwrap().session_id().to_string();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn kill_without_a_browser_is_a_no_op() {
        let mut session = session();
        session.kill().await.unwrap();
        session.kill().await.unwrap();
        assert!(!session.is_active());
    }
}
