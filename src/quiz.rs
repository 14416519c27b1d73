//! Year guessing: verdicts under era tolerances and the feedback fade.

use crate::era::{self, EraKey};
use crate::error::{OverlayError, Result};
use crate::parse::parse_year;

/// Style flag for rendering a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Correct,
    Incorrect,
}

impl Tone {
    /// Text colour of the result bubble.
    pub fn result_color(self) -> &'static str {
        match self {
            Tone::Correct => "#2e7d32",
            Tone::Incorrect => "#c62828",
        }
    }

    /// Text colour of the history label.
    pub fn history_color(self) -> &'static str {
        match self {
            Tone::Correct => "#3b6e4c",
            Tone::Incorrect => "#8b3a3a",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOutcome {
    pub is_correct: bool,
    /// Distance between guess and real year; spans the whole `i64` range.
    pub diff: u64,
    pub tolerance: i64,
    pub era: EraKey,
    pub real_year: i64,
    pub guess: i64,
}

impl QuizOutcome {
    pub fn era_label(&self) -> &'static str {
        self.era.label()
    }

    pub fn tone(&self) -> Tone {
        if self.is_correct {
            Tone::Correct
        } else {
            Tone::Incorrect
        }
    }

    /// Full verdict for the result bubble.
    pub fn message(&self) -> String {
        let head = if self.is_correct { "Correct!" } else { "Incorrect…" };
        format!(
            "{head} The real year is {} ({}). Tolerance ±{} / off by {}",
            self.real_year,
            self.era_label(),
            self.tolerance,
            self.diff
        )
    }

    /// One-line summary of the last answer only.
    pub fn history_line(&self) -> String {
        let mark = if self.is_correct { '◯' } else { '×' };
        format!(
            "{mark} {} ({}) ±{} Δ{}",
            self.real_year,
            self.era_label(),
            self.tolerance,
            self.diff
        )
    }
}

/// Compare a guess with the year currently in the host input. A missing
/// real year is reported before the guess is looked at.
pub fn evaluate(real_text: &str, guess_text: &str) -> Result<QuizOutcome> {
    let real_year = parse_year(real_text).ok_or(OverlayError::NoRealYear)?;
    let guess =
        parse_year(guess_text).ok_or_else(|| OverlayError::InvalidGuess(guess_text.to_string()))?;

    let era = era::era_for_year(real_year);
    let tolerance = era.tolerance();
    let diff = guess.abs_diff(real_year);
    Ok(QuizOutcome {
        is_correct: diff <= tolerance.unsigned_abs(),
        diff,
        tolerance,
        era,
        real_year,
        guess,
    })
}

// --- Feedback fade -------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FadePhase {
    #[default]
    Hidden,
    Visible,
    Fading,
}

/// Identifies the answer a pending fade callback belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeTicket(u64);

/// Two-stage fade of the result bubble: visible, then fading, then cleared.
/// Each new answer issues a fresh ticket, so callbacks scheduled for an
/// earlier answer are ignored even if their timers were not cancelled.
#[derive(Debug, Default)]
pub struct FeedbackFade {
    generation: u64,
    phase: FadePhase,
}

impl FeedbackFade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// A new verdict is on screen.
    pub fn show(&mut self) -> FadeTicket {
        self.generation = self.generation.wrapping_add(1);
        self.phase = FadePhase::Visible;
        FadeTicket(self.generation)
    }

    /// The display window ended; returns whether the bubble should fade.
    pub fn begin_fade(&mut self, ticket: FadeTicket) -> bool {
        if ticket.0 != self.generation || self.phase != FadePhase::Visible {
            return false;
        }
        self.phase = FadePhase::Fading;
        true
    }

    /// The fade window ended; returns whether the text should be cleared.
    pub fn finish(&mut self, ticket: FadeTicket) -> bool {
        if ticket.0 != self.generation || self.phase != FadePhase::Fading {
            return false;
        }
        self.phase = FadePhase::Hidden;
        true
    }

    /// Drop any pending fade, e.g. when the result was cleared by unmasking.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = FadePhase::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_within_tolerance_is_correct() {
        let out = evaluate("1000", "1015").unwrap();
        assert!(out.is_correct);
        assert_eq!(out.diff, 15);
        assert_eq!(out.tolerance, 20);
        assert_eq!(out.era, EraKey::Medieval);
    }

    #[test]
    fn guess_outside_tolerance_is_incorrect() {
        let out = evaluate("1000", "1021").unwrap();
        assert!(!out.is_correct);
        assert_eq!(out.diff, 21);
        assert_eq!(out.tone(), Tone::Incorrect);
    }

    #[test]
    fn exact_tolerance_edge_counts_as_correct() {
        assert!(evaluate("1950", "1945").unwrap().is_correct);
        assert!(!evaluate("1950", "1944").unwrap().is_correct);
        assert!(evaluate("-500", "-450").unwrap().is_correct);
    }

    #[test]
    fn extreme_years_do_not_wrap_into_a_correct_verdict() {
        let out = evaluate("-9223372036854775807", "9223372036854775807").unwrap();
        assert!(!out.is_correct);
        assert_eq!(out.diff, u64::MAX - 1);

        let out = evaluate("1000", "-9223372036854775807").unwrap();
        assert!(!out.is_correct);
        assert_eq!(out.diff, 9_223_372_036_854_776_807);
    }

    #[test]
    fn missing_real_year_wins_over_bad_guess() {
        assert_eq!(evaluate("", "abc"), Err(OverlayError::NoRealYear));
        assert_eq!(
            evaluate("1000", "abc"),
            Err(OverlayError::InvalidGuess("abc".into()))
        );
    }

    #[test]
    fn messages_embed_the_numbers() {
        let out = evaluate("1000", "1021").unwrap();
        assert_eq!(
            out.message(),
            "Incorrect… The real year is 1000 (Medieval). Tolerance ±20 / off by 21"
        );
        assert_eq!(out.history_line(), "× 1000 (Medieval) ±20 Δ21");
        let ok = evaluate("-44", "-40").unwrap();
        assert!(ok.message().starts_with("Correct! The real year is -44 (Ancient)"));
        assert!(ok.history_line().starts_with('◯'));
    }

    #[test]
    fn fade_runs_visible_fading_hidden() {
        let mut fade = FeedbackFade::new();
        let t = fade.show();
        assert!(!fade.finish(t));
        assert!(fade.begin_fade(t));
        assert_eq!(fade.phase(), FadePhase::Fading);
        assert!(fade.finish(t));
        assert_eq!(fade.phase(), FadePhase::Hidden);
    }

    #[test]
    fn newer_answer_invalidates_pending_fade() {
        let mut fade = FeedbackFade::new();
        let first = fade.show();
        let second = fade.show();
        assert!(!fade.begin_fade(first));
        assert_eq!(fade.phase(), FadePhase::Visible);
        assert!(fade.begin_fade(second));
        let third = fade.show();
        assert!(!fade.finish(second));
        assert_eq!(fade.phase(), FadePhase::Visible);
        assert!(fade.begin_fade(third));
    }

    #[test]
    fn reset_cancels_pending_fade() {
        let mut fade = FeedbackFade::new();
        let t = fade.show();
        fade.reset();
        assert!(!fade.begin_fade(t));
        assert_eq!(fade.phase(), FadePhase::Hidden);
    }
}
