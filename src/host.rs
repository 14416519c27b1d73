//! The seam between the overlay's logic and the page it is injected into.
//!
//! [`HostPage`] is everything the masking engine, quiz and session need from
//! the host: the year input, its saved real value, the secondary readout,
//! update notification, the quiz fragments of the control bar and blocking
//! user dialogs. The browser implementation is `overlay::page::DomHost`.

use crate::error::Result;
use crate::quiz::QuizOutcome;

/// Ways of telling the host page its year changed, tried in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyStrategy {
    /// The page's global "Enter pressed in the year box" callback.
    EnterCallback,
    /// The page's global "submit elapsed time" callback.
    ElapsedCallback,
    /// Synthetic Enter keydown/keypress/keyup on the input.
    SyntheticEnter,
    /// Click the located update image.
    ClickTrigger,
}

impl NotifyStrategy {
    pub const ORDER: [NotifyStrategy; 4] = [
        NotifyStrategy::EnterCallback,
        NotifyStrategy::ElapsedCallback,
        NotifyStrategy::SyntheticEnter,
        NotifyStrategy::ClickTrigger,
    ];
}

pub trait HostPage {
    /// Current raw value of the year input; `None` when it cannot be located.
    fn year_input_value(&mut self) -> Option<String>;

    /// Overwrite the year input's value.
    fn write_year_input(&mut self, value: &str) -> Result<()>;

    /// Real (pre-mask) value saved on the input, if any.
    fn saved_real_value(&mut self) -> Option<String>;

    fn store_real_value(&mut self, value: &str);

    fn clear_real_value(&mut self);

    /// Make the input's text and caret invisible (`true`) or restore them.
    fn set_input_concealed(&mut self, concealed: bool);

    /// Hide or restore the secondary year readout. Hiding saves the original
    /// display style once; restoring puts it back. Absent readout: no-op.
    fn set_secondary_readout_hidden(&mut self, hidden: bool);

    /// Run one notification strategy. `Ok(false)` means the mechanism is not
    /// available on this page.
    fn try_notify(&mut self, strategy: NotifyStrategy) -> Result<bool>;

    /// Text of the guess input; `None` when the quiz controls are missing.
    fn guess_text(&mut self) -> Option<String>;

    fn clear_guess_input(&mut self);

    /// Show the verdict in the result readout. Returns `false` when the
    /// readout is missing.
    fn show_result(&mut self, outcome: &QuizOutcome) -> bool;

    fn clear_result(&mut self);

    /// Replace the compact last-outcome label next to the update control.
    fn show_history(&mut self, outcome: &QuizOutcome);

    /// Blocking prompt for a year; `None` when cancelled.
    fn prompt_year(&mut self, default: &str) -> Option<String>;

    /// Blocking user-visible error.
    fn alert(&mut self, message: &str);
}

/// Which notification strategies ran during one [`notify_host`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub ran: Vec<NotifyStrategy>,
    pub failed: Vec<NotifyStrategy>,
}

impl NotifyReport {
    pub fn any_ran(&self) -> bool {
        !self.ran.is_empty()
    }
}

/// Push the input's current value into the host page by every available
/// strategy. Best effort: a failing strategy is logged and skipped.
pub fn notify_host<H: HostPage + ?Sized>(host: &mut H) -> NotifyReport {
    let mut report = NotifyReport::default();
    for strategy in NotifyStrategy::ORDER {
        match host.try_notify(strategy) {
            Ok(true) => report.ran.push(strategy),
            Ok(false) => {}
            Err(err) => {
                tracing::debug!(?strategy, %err, "notify strategy failed");
                report.failed.push(strategy);
            }
        }
    }
    if !report.any_ran() {
        tracing::debug!("no notify strategy reached the host page");
    }
    report
}
