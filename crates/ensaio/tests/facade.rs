//! Mock-backed integration tests: the facade contract end to end,
//! no browser required.

use ensaio::backend::{MockBackend, MockElement};
use ensaio::prelude::*;

fn session_with(config: Config) -> Session<MockBackend> {
    Session::new(config)
}

async fn backend(session: &mut Session<MockBackend>) -> &mut MockBackend {
    session.get(&ScenarioContext::none()).await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn zero_match_locator_reports_not_found_with_the_label() {
    let mut session = session_with(Config::default());
    let mut ui = Interactions::new(&mut session);
    let err = ui
        .click(&Locator::xpath("//button[@id='checkout']"), "btnCheckout")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::ElementNotFound));
    let banner = err.to_string();
    assert!(banner.contains("btnCheckout"));
    assert!(banner.contains("============================ ERRO ============================"));
    assert!(banner.contains("Verifique se o seu Xpath está correto."));
}

#[tokio::test(start_paused = true)]
async fn custom_timeout_is_respected_within_one_poll_interval() {
    let mut session = session_with(Config::default());
    let mut ui = Interactions::new(&mut session);
    let wait = WaitOptions::new().with_timeout(3_000).with_poll_interval(250);

    let started = tokio::time::Instant::now();
    let err = ui
        .await_element_for(&Locator::css("#nunca"), wait, "elemento ausente")
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err.kind(), Some(ErrorKind::ElementNotFound));
    assert!(elapsed >= std::time::Duration::from_millis(3_000));
    assert!(elapsed <= std::time::Duration::from_millis(3_250));
}

#[tokio::test]
async fn repeated_get_returns_the_same_browser() {
    let mut session = session_with(Config::default());
    let first = backend(&mut session).await.session_id().to_string();
    let second = backend(&mut session).await.session_id().to_string();
    assert_eq!(first, second);
}

#[tokio::test]
async fn kill_then_get_starts_a_distinct_browser() {
    let mut session = session_with(Config::default());
    let first = backend(&mut session).await.session_id().to_string();
    session.kill().await.unwrap();
    let second = backend(&mut session).await.session_id().to_string();
    assert_ne!(first, second);
}

#[tokio::test]
async fn double_kill_is_a_no_op() {
    let mut session = session_with(Config::default());
    backend(&mut session).await;
    session.kill().await.unwrap();
    session.kill().await.unwrap();
    assert!(!session.is_active());
}

#[tokio::test(start_paused = true)]
async fn validate_page_distinguishes_timeout_from_assertion() {
    let anchor = Locator::css("h2.complete-header");

    // anchor present and carrying the expected text: success
    let mut session = session_with(Config::default());
    backend(&mut session)
        .await
        .insert(anchor.clone(), MockElement::with_text("THANK YOU FOR YOUR ORDER"));
    let mut ui = Interactions::new(&mut session);
    ui.validate_page(&anchor, "THANK YOU", "página de conclusão")
        .await
        .unwrap();

    // anchor present but never clickable: timeout
    let mut session = session_with(Config::default());
    backend(&mut session)
        .await
        .insert(anchor.clone(), MockElement::with_text("x").unclickable());
    let mut ui = Interactions::new(&mut session);
    let err = ui
        .validate_page(&anchor, "THANK YOU", "página de conclusão")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Timeout));

    // anchor clickable but with the wrong text: assertion
    let mut session = session_with(Config::default());
    backend(&mut session)
        .await
        .insert(anchor.clone(), MockElement::with_text("CHECKOUT: OVERVIEW"));
    let mut ui = Interactions::new(&mut session);
    let err = ui
        .validate_page(&anchor, "THANK YOU", "página de conclusão")
        .await
        .unwrap_err();
    assert!(matches!(err, EnsaioError::Assertion { .. }));
}

/// Happy path: log in, open a product, check out, land on the
/// confirmation page.
#[tokio::test]
async fn purchase_flow_happy_path() {
    let username = Locator::xpath("//input[@id='user-name']");
    let password = Locator::xpath("//input[@id='password']");
    let login = Locator::xpath("//input[@id='login-button']");
    let product = Locator::xpath("//div[@class='inventory_item_name']");
    let checkout = Locator::xpath("//button[@id='checkout']");
    let header = Locator::xpath("//h2[@class='complete-header']");

    let mut session = session_with(Config::default());
    {
        let b = backend(&mut session).await;
        b.insert(username.clone(), MockElement::default());
        b.insert(password.clone(), MockElement::default());
        b.insert(login.clone(), MockElement::default());
        b.insert(product.clone(), MockElement::with_text("Sauce Labs Backpack"));
        b.insert(checkout.clone(), MockElement::default());
        b.insert(
            header.clone(),
            MockElement::with_text("THANK YOU FOR YOUR ORDER"),
        );
    }

    let mut ui = Interactions::new(&mut session);
    ui.goto("https://www.saucedemo.com").await.unwrap();
    ui.write(&username, "standard_user", "inputUsername").await.unwrap();
    ui.write(&password, "secret_sauce", "inputPassword").await.unwrap();
    ui.click(&login, "btnLogin").await.unwrap();
    let name = ui.text(&product, "nomeProduto").await.unwrap();
    assert_eq!(name, "Sauce Labs Backpack");
    ui.click(&checkout, "btnCheckout").await.unwrap();
    ui.validate_page(&header, "THANK YOU FOR YOUR ORDER", "página de conclusão")
        .await
        .unwrap();

    let b = backend(&mut session).await;
    assert!(b.was_called("goto(https://www.saucedemo.com)"));
    assert!(b.was_called("click"));
}

/// Missing submit button: the failure names the button's label inside
/// the full banner, with the captured scenario line in the MASSA block.
#[tokio::test(start_paused = true)]
async fn missing_submit_button_reports_label_and_scenario_line() {
    let mut session = session_with(Config::default());
    backend(&mut session).await;

    let context = ScenarioContext::new("  Cenário: Comprar um produto no site");
    let mut ui = Interactions::with_context(&mut session, context);
    let err = ui
        .click(&Locator::xpath("//button[@id='checkout']"), "btnCheckout")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::ElementNotFound));
    let banner = err.to_string();
    assert!(banner.contains("btnCheckout"));
    assert!(banner.contains("====================== MASSA UTILIZADA ======================"));
    assert!(banner.contains("Cenário: Comprar um produto no site"));
    assert!(banner.contains("=========================== DICAS ==========================="));
}
