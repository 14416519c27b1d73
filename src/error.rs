//! Error taxonomy for overlay actions.
//!
//! Every variant except `Dom` is user-visible: the session surfaces it with a
//! blocking alert and leaves its state untouched. Notification failures never
//! reach this type; the notifier swallows them.

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, OverlayError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The host's year input could not be located.
    #[error("The central year input could not be found.")]
    InputNotFound,
    /// The guess input or result readout is missing from the control bar.
    #[error("The quiz controls could not be found.")]
    QuizUiNotFound,
    #[error("Please enter the year as an integer (negative for BC): {0:?}")]
    InvalidYear(String),
    #[error("Please enter your guess as an integer: {0:?}")]
    InvalidGuess(String),
    /// The year input holds no integer, so there is nothing to guess yet.
    #[error("Pick a year first, either randomly or by entering one.")]
    NoRealYear,
    #[error("There is no previous year to go back to.")]
    NoPreviousYear,
    #[error("Unknown era: {0:?}")]
    UnknownEra(String),
    /// A browser API call failed.
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("invalid overlay configuration: {0}")]
    Config(String),
}

impl OverlayError {
    /// Whether the error should be shown to the user with an alert.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, OverlayError::Dom(_) | OverlayError::Config(_))
    }
}

impl From<JsValue> for OverlayError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        OverlayError::Dom(text)
    }
}

impl From<OverlayError> for JsValue {
    fn from(err: OverlayError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
