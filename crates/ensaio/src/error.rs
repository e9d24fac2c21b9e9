//! Error taxonomy and the failure banner.
//!
//! Failures are classified exactly once, at the WebDriver boundary, into
//! a closed set of categories ([`ErrorKind`]). The facade then wraps the
//! classified failure with the caller's element label and the scenario
//! source line into an [`EnsaioError`] whose `Display` output is the
//! fixed three-section banner (ERRO / MASSA UTILIZADA / DICAS) that
//! downstream log tooling parses.

use thiserror::Error;

use crate::context::ScenarioContext;

/// Result type for ensaio operations.
pub type EnsaioResult<T> = Result<T, EnsaioError>;

/// Timestamp format shared by failure banners and evidence file names.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y_%H-%M-%S";

/// Current local time rendered with [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

// =============================================================================
// ERROR KIND
// =============================================================================

/// Closed set of failure categories.
///
/// Mutually exclusive and collectively exhaustive over anything the
/// WebDriver layer can produce; anything unanticipated lands in
/// [`ErrorKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The locator matched no element.
    ElementNotFound,
    /// A bounded wait elapsed before its condition became true.
    Timeout,
    /// The element exists but is obscured or hidden.
    NotVisible,
    /// The element reference went stale (removed from the DOM).
    StaleReference,
    /// The element is visible but not in an interactable state.
    NotInteractable,
    /// The requested frame does not exist.
    FrameNotFound,
    /// The operation was interrupted before completing.
    Interrupted,
    /// An I/O failure (evidence files, feature-file reads).
    Io,
    /// Anything not covered by the other categories.
    Generic,
}

impl ErrorKind {
    /// Human template for this category, used in the banner's ERRO line.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::ElementNotFound => "Elemento não encontrado",
            Self::Timeout => "Tempo de carregamento excedido",
            Self::NotVisible => "Elemento não visível",
            Self::StaleReference => "Elemento obsoleto na DOM",
            Self::NotInteractable => "Elemento não interagível",
            Self::FrameNotFound => "Frame não encontrado",
            Self::Interrupted => "Execução interrompida",
            Self::Io => "Falha de E/S",
            Self::Generic => "Erro não mapeado",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

// =============================================================================
// DRIVER ERROR (raw, classified)
// =============================================================================

/// A raw backend failure, already classified into an [`ErrorKind`].
///
/// Backends emit `DriverError`; the facade adds the element label and
/// scenario context to produce the user-facing [`EnsaioError`].
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct DriverError {
    /// Failure category.
    pub kind: ErrorKind,
    /// Message from the underlying driver library (or the backend).
    pub message: String,
}

impl DriverError {
    /// Create a classified failure.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A bounded wait elapsed.
    #[must_use]
    pub fn timeout(ms: u64) -> Self {
        Self::new(ErrorKind::Timeout, format!("condição não satisfeita após {ms}ms"))
    }
}

/// The nine-way classification of the underlying WebDriver library's
/// failures, performed exactly once for the whole crate.
impl From<thirtyfour::error::WebDriverError> for DriverError {
    fn from(e: thirtyfour::error::WebDriverError) -> Self {
        use thirtyfour::error::WebDriverError as E;
        let kind = match &e {
            E::NoSuchElement(_) => ErrorKind::ElementNotFound,
            E::NoSuchFrame(_) => ErrorKind::FrameNotFound,
            E::StaleElementReference(_) => ErrorKind::StaleReference,
            E::ElementNotInteractable(_) => ErrorKind::NotInteractable,
            E::ElementClickIntercepted(_) => ErrorKind::NotVisible,
            E::Timeout(_) => ErrorKind::Timeout,
            _ => ErrorKind::Generic,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<std::io::Error> for DriverError {
    fn from(e: std::io::Error) -> Self {
        let kind = if e.kind() == std::io::ErrorKind::Interrupted {
            ErrorKind::Interrupted
        } else {
            ErrorKind::Io
        };
        Self::new(kind, e.to_string())
    }
}

// =============================================================================
// ENSAIO ERROR (user-facing)
// =============================================================================

/// The single failure type facade callers see.
///
/// Interaction and grid failures render the fixed banner; the `kind`
/// field is kept so tests can assert on the category without parsing
/// message text.
#[derive(Debug, Error)]
pub enum EnsaioError {
    /// A classified facade operation failure.
    #[error("{banner}")]
    Interaction {
        /// Failure category.
        kind: ErrorKind,
        /// Caller-supplied element label, verbatim.
        label: String,
        /// The full ERRO / MASSA UTILIZADA / DICAS banner.
        banner: String,
    },

    /// The Selenium Grid hub could not be reached.
    #[error("{banner}")]
    GridUnavailable {
        /// The full failure banner.
        banner: String,
    },

    /// A page-validation assertion failed.
    #[error("A página falhou no processo de verificação: {message}")]
    Assertion {
        /// What was expected and what was observed.
        message: String,
    },

    /// I/O error outside a driver operation (evidence tree, feature files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Screenshot decode/stitch/encode error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl EnsaioError {
    /// Wrap a classified backend failure with the caller's label and the
    /// live scenario context.
    #[must_use]
    pub fn interaction(err: DriverError, label: &str, context: &ScenarioContext) -> Self {
        let headline = format!(
            "InteractionError: {} - {}: {}",
            timestamp(),
            err.kind.describe(),
            label
        );
        Self::Interaction {
            kind: err.kind,
            label: label.to_string(),
            banner: banner(&headline, context),
        }
    }

    /// Grid hub connection failure.
    #[must_use]
    pub fn grid(message: &str, context: &ScenarioContext) -> Self {
        let headline = format!("GridError: {} - {}", timestamp(), message);
        Self::GridUnavailable {
            banner: banner(&headline, context),
        }
    }

    /// Wrap a backend failure that happened outside a facade operation
    /// (evidence capture, teardown). No label, no scenario context.
    #[must_use]
    pub fn from_driver(err: DriverError) -> Self {
        Self::interaction(err, "captura de evidência", &ScenarioContext::none())
    }

    /// The failure category, when this error carries one.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Interaction { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Render the fixed three-section failure banner.
///
/// The section headers and the three troubleshooting hints are part of
/// the crate's external interface: log-parsing tooling matches on them.
fn banner(headline: &str, context: &ScenarioContext) -> String {
    format!(
        "============================ ERRO ============================\n\
         \n\
         {headline}\n\
         \n\
         ====================== MASSA UTILIZADA ======================\n\
         \n\
         {massa}\n\
         \n\
         =========================== DICAS ===========================\n\
         \n\
         Verifique se o seu Xpath está correto.\n\
         Verifique se não existe um Iframe nessa página.\n\
         Verifique se seu PageObject foi instanciado corretamente em caso de nullPointer.\n",
        massa = context.as_str(),
    )
}
