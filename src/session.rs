//! One overlay session: masking state, quiz feedback and the host page,
//! driven by control-bar actions and host re-render notifications.

use crate::era::EraKey;
use crate::error::{OverlayError, Result};
use crate::host::HostPage;
use crate::masking::YearState;
use crate::parse::parse_year;
use crate::quiz::{self, FadeTicket, FeedbackFade, QuizOutcome};

/// Control-bar actions, in bar order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Back,
    Random(EraKey),
    ManualEntry,
    Check,
}

impl Action {
    /// Buttons in the order they appear; the guess input sits before `Check`.
    pub const BAR: [Action; 8] = [
        Action::Reveal,
        Action::Back,
        Action::Random(EraKey::Ancient),
        Action::Random(EraKey::Medieval),
        Action::Random(EraKey::EarlyModern),
        Action::Random(EraKey::Modern),
        Action::ManualEntry,
        Action::Check,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Reveal => "Reveal",
            Action::Back => "Back",
            Action::Random(EraKey::Ancient) => "Ancient R",
            Action::Random(EraKey::Medieval) => "Medieval R",
            Action::Random(EraKey::EarlyModern) => "Early mod. R",
            Action::Random(EraKey::Modern) => "Modern R",
            Action::ManualEntry => "Enter year",
            Action::Check => "Check",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Action::Reveal => "#999",
            Action::Back => "#777",
            Action::Random(EraKey::Ancient) => "#777711",
            Action::Random(EraKey::Medieval) => "#aa6633",
            Action::Random(EraKey::EarlyModern) => "#8844aa",
            Action::Random(EraKey::Modern) => "#5555aa",
            Action::ManualEntry => "#333",
            Action::Check => "#009966",
        }
    }

    /// Every button but `Check` wipes a half-typed guess before acting.
    pub fn clears_guess(self) -> bool {
        self != Action::Check
    }
}

pub struct Session<H> {
    host: H,
    years: YearState,
    fade: FeedbackFade,
    last_outcome: Option<QuizOutcome>,
}

impl<H: HostPage> Session<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            years: YearState::new(),
            fade: FeedbackFade::new(),
            last_outcome: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn years(&self) -> &YearState {
        &self.years
    }

    pub fn last_outcome(&self) -> Option<&QuizOutcome> {
        self.last_outcome.as_ref()
    }

    /// Run a bar action. Failures are shown to the user and leave the
    /// session as it was. A successful `Check` returns the ticket for its
    /// feedback fade.
    pub fn dispatch(&mut self, action: Action) -> Option<FadeTicket> {
        tracing::debug!(?action, "bar action");
        if action.clears_guess() {
            self.host.clear_guess_input();
        }
        let result = match action {
            Action::Reveal => {
                self.years.unmask(&mut self.host);
                self.fade.reset();
                Ok(None)
            }
            Action::Back => self.years.go_back_one_step(&mut self.host).map(|()| None),
            Action::Random(key) => self
                .years
                .apply_random_era(&mut self.host, key.as_str())
                .map(|()| None),
            Action::ManualEntry => self.years.apply_mask(&mut self.host).map(|()| None),
            Action::Check => self.check_answer().map(Some),
        };
        match result {
            Ok(ticket) => ticket,
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Grade the guess against the year in the host input and show both the
    /// verdict and the one-line history label.
    pub fn check_answer(&mut self) -> Result<FadeTicket> {
        let real = self
            .host
            .year_input_value()
            .ok_or(OverlayError::InputNotFound)?;
        if parse_year(&real).is_none() {
            return Err(OverlayError::NoRealYear);
        }
        let guess = self.host.guess_text().ok_or(OverlayError::QuizUiNotFound)?;
        let outcome = quiz::evaluate(&real, &guess)?;

        if !self.host.show_result(&outcome) {
            return Err(OverlayError::QuizUiNotFound);
        }
        self.host.show_history(&outcome);
        tracing::debug!(
            real = outcome.real_year,
            guess = outcome.guess,
            correct = outcome.is_correct,
            "answer checked"
        );
        self.last_outcome = Some(outcome);
        Ok(self.fade.show())
    }

    /// The display window of `ticket` elapsed; returns whether the result
    /// should start fading.
    pub fn fade_elapsed(&mut self, ticket: FadeTicket) -> bool {
        self.fade.begin_fade(ticket)
    }

    /// The fade of `ticket` finished; clears the result text if it still
    /// belongs to that answer.
    pub fn fade_finished(&mut self, ticket: FadeTicket) -> bool {
        let done = self.fade.finish(ticket);
        if done {
            self.host.clear_result();
        }
        done
    }

    /// Level-triggered re-assertion after the host re-rendered: while masked,
    /// keep the secondary readout hidden and the input concealed.
    pub fn reconcile(&mut self) {
        if self.years.is_masked() {
            tracing::trace!("re-applying mask after host mutation");
            self.host.set_input_concealed(true);
            self.host.set_secondary_readout_hidden(true);
        }
    }

    fn report(&mut self, err: &OverlayError) {
        if err.is_user_visible() {
            tracing::debug!(%err, "action rejected");
            self.host.alert(&err.to_string());
        } else {
            tracing::warn!(%err, "action failed");
        }
    }
}
