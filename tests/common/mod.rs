// In-memory host page shared by the native integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use year_quiz_overlay::quiz::Tone;
use year_quiz_overlay::{HostPage, NotifyStrategy, OverlayError, QuizOutcome, Result};

#[derive(Debug, Default)]
pub struct Secondary {
    pub display: String,
    pub saved: Option<String>,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    /// Year input value; `None` means the page has no year input.
    pub input: Option<String>,
    pub real_slot: Option<String>,
    pub concealed: bool,
    pub secondary: Option<Secondary>,
    /// Strategies the page supports.
    pub available: Vec<NotifyStrategy>,
    /// Strategies that throw when tried.
    pub failing: Vec<NotifyStrategy>,
    /// Strategies that ran, with the input value they saw.
    pub notified: Vec<(NotifyStrategy, Option<String>)>,
    /// Guess input text; `None` means the quiz controls are missing.
    pub guess: Option<String>,
    pub result: Option<String>,
    pub result_tone: Option<Tone>,
    pub history: Option<String>,
    pub prompt_answers: VecDeque<Option<String>>,
    pub prompt_defaults: Vec<String>,
    pub alerts: Vec<String>,
}

impl FakeHost {
    /// A page showing `year`, with every notification path available and
    /// the quiz controls present.
    pub fn showing(year: &str) -> Self {
        Self {
            input: Some(year.to_string()),
            secondary: Some(Secondary {
                display: "inline-block".into(),
                saved: None,
            }),
            available: NotifyStrategy::ORDER.to_vec(),
            guess: Some(String::new()),
            result: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn without_input() -> Self {
        Self {
            input: None,
            ..Self::showing("")
        }
    }

    pub fn input(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    pub fn secondary_display(&self) -> &str {
        self.secondary.as_ref().map_or("", |s| s.display.as_str())
    }

    pub fn answer_prompt(&mut self, answer: Option<&str>) {
        self.prompt_answers.push_back(answer.map(str::to_string));
    }

    pub fn notified_strategies(&self) -> Vec<NotifyStrategy> {
        self.notified.iter().map(|(s, _)| *s).collect()
    }
}

impl HostPage for FakeHost {
    fn year_input_value(&mut self) -> Option<String> {
        self.input.clone()
    }

    fn write_year_input(&mut self, value: &str) -> Result<()> {
        let slot = self.input.as_mut().ok_or(OverlayError::InputNotFound)?;
        *slot = value.to_string();
        Ok(())
    }

    fn saved_real_value(&mut self) -> Option<String> {
        self.real_slot.clone()
    }

    fn store_real_value(&mut self, value: &str) {
        self.real_slot = Some(value.to_string());
    }

    fn clear_real_value(&mut self) {
        self.real_slot = None;
    }

    fn set_input_concealed(&mut self, concealed: bool) {
        self.concealed = concealed;
    }

    fn set_secondary_readout_hidden(&mut self, hidden: bool) {
        let Some(sec) = self.secondary.as_mut() else {
            return;
        };
        if hidden {
            if sec.saved.is_none() {
                sec.saved = Some(sec.display.clone());
            }
            sec.display = "none".into();
        } else if let Some(original) = sec.saved.take() {
            sec.display = original;
        }
    }

    fn try_notify(&mut self, strategy: NotifyStrategy) -> Result<bool> {
        if self.failing.contains(&strategy) {
            return Err(OverlayError::Dom(format!("{strategy:?} threw")));
        }
        if !self.available.contains(&strategy) {
            return Ok(false);
        }
        self.notified.push((strategy, self.input.clone()));
        Ok(true)
    }

    fn guess_text(&mut self) -> Option<String> {
        self.guess.clone()
    }

    fn clear_guess_input(&mut self) {
        if let Some(g) = self.guess.as_mut() {
            g.clear();
        }
    }

    fn show_result(&mut self, outcome: &QuizOutcome) -> bool {
        let Some(r) = self.result.as_mut() else {
            return false;
        };
        *r = outcome.message();
        self.result_tone = Some(outcome.tone());
        true
    }

    fn clear_result(&mut self) {
        if let Some(r) = self.result.as_mut() {
            r.clear();
        }
    }

    fn show_history(&mut self, outcome: &QuizOutcome) {
        self.history = Some(outcome.history_line());
    }

    fn prompt_year(&mut self, default: &str) -> Option<String> {
        self.prompt_defaults.push(default.to_string());
        self.prompt_answers.pop_front().flatten()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
