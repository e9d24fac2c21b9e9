//! Page-object convention.
//!
//! A page object owns its locator table and exposes one anchor element
//! whose text proves the page is loaded. Concrete pages live with the
//! test suites; see the e2e crate for worked examples.

use crate::backend::Backend;
use crate::error::EnsaioResult;
use crate::interactions::Interactions;
use crate::locator::Locator;

/// A screen of the application under test.
pub trait PageObject {
    /// Human name used in labels and logs.
    fn name(&self) -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }

    /// Element whose presence identifies this page.
    fn anchor(&self) -> Locator;

    /// Substring the anchor's text must contain once loaded.
    fn anchor_text(&self) -> &str;
}

/// Wait for the page's anchor and assert its text.
pub async fn verify_loaded<B: Backend, P: PageObject>(
    ui: &mut Interactions<'_, B>,
    page: &P,
) -> EnsaioResult<()> {
    ui.validate_page(&page.anchor(), page.anchor_text(), page.name())
        .await
}

#[cfg(test)]
mod page_tests {
    use super::*;
    use crate::backend::{MockBackend, MockElement};
    use crate::config::Config;
    use crate::context::ScenarioContext;
    use crate::session::Session;

    struct CompletePage;

    impl PageObject for CompletePage {
        fn name(&self) -> &'static str {
            "página de conclusão"
        }

        fn anchor(&self) -> Locator {
            Locator::css("h2.complete-header")
        }

        fn anchor_text(&self) -> &str {
            "THANK YOU FOR YOUR ORDER"
        }
    }

    #[tokio::test]
    async fn verify_loaded_passes_on_the_anchor_text() {
        let mut session: Session<MockBackend> = Session::new(Config::default());
        session
            .get(&ScenarioContext::none())
            .await
            .unwrap()
            .insert(
                CompletePage.anchor(),
                MockElement::with_text("THANK YOU FOR YOUR ORDER"),
            );
        let mut ui = Interactions::new(&mut session);
        verify_loaded(&mut ui, &CompletePage).await.unwrap();
    }
}
