//! Year masking state machine.
//!
//! The host page stays the source of truth for the year: the real year is
//! read back from its input, the fake year is written into that same input,
//! and the pre-mask value lives in a slot attached to the element. This
//! module only tracks what it must remember between actions.

use crate::era::{self, EraKey};
use crate::error::{OverlayError, Result};
use crate::host::{HostPage, notify_host};
use crate::parse::parse_year;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskOptions {
    /// Record the input's current year as `last_year` before overwriting.
    pub update_history: bool,
}

impl MaskOptions {
    pub const WITH_HISTORY: MaskOptions = MaskOptions {
        update_history: true,
    };
    pub const WITHOUT_HISTORY: MaskOptions = MaskOptions {
        update_history: false,
    };
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self::WITH_HISTORY
    }
}

/// Session-wide masking state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct YearState {
    /// Year currently shown in place of the real one.
    fake_year: Option<i64>,
    /// Year shown just before the latest history-tracking mask.
    last_year: Option<i64>,
}

impl YearState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fake_year(&self) -> Option<i64> {
        self.fake_year
    }

    pub fn last_year(&self) -> Option<i64> {
        self.last_year
    }

    pub fn is_masked(&self) -> bool {
        self.fake_year.is_some()
    }

    /// Write `year` into the host input and hide every trace of the real
    /// year. The input and state change first, then the host is notified,
    /// then the visual masking is applied.
    pub fn set_year_and_mask<H: HostPage + ?Sized>(
        &mut self,
        host: &mut H,
        year: i64,
        opts: MaskOptions,
    ) -> Result<()> {
        let current = host.year_input_value().ok_or(OverlayError::InputNotFound)?;
        host.write_year_input(&year.to_string())?;

        // Unmasked, the input holds the real year; masked, keep the first one saved.
        if !self.is_masked() || host.saved_real_value().is_none() {
            host.store_real_value(&current);
        }
        if opts.update_history {
            if let Some(prev) = parse_year(&current) {
                self.last_year = Some(prev);
            }
        }
        self.fake_year = Some(year);

        let report = notify_host(host);
        tracing::debug!(year, ran = ?report.ran, "year masked");

        host.set_input_concealed(true);
        host.set_secondary_readout_hidden(true);
        Ok(())
    }

    /// Manual entry: prompt for a year and mask it. A cancelled or empty
    /// prompt changes nothing.
    pub fn apply_mask<H: HostPage + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let current = host.year_input_value().ok_or(OverlayError::InputNotFound)?;
        if host.saved_real_value().is_none() {
            host.store_real_value(&current);
        }
        let default = self.fake_year.map_or(current, |y| y.to_string());
        let Some(answer) = host.prompt_year(&default) else {
            return Ok(());
        };
        if answer.is_empty() {
            return Ok(());
        }
        let year = parse_year(&answer).ok_or(OverlayError::InvalidYear(answer))?;
        self.set_year_and_mask(host, year, MaskOptions::WITH_HISTORY)
    }

    /// Draw a random year in the named era and mask it.
    pub fn apply_random_era<H: HostPage + ?Sized>(
        &mut self,
        host: &mut H,
        key: &str,
    ) -> Result<()> {
        let key: EraKey = key.parse()?;
        let year = era::random_year_in_era(key);
        tracing::debug!(era = %key, year, "random era draw");
        self.set_year_and_mask(host, year, MaskOptions::WITH_HISTORY)
    }

    /// Re-apply the year recorded before the latest masking. The undo
    /// consumes that record and does not create a new one.
    pub fn go_back_one_step<H: HostPage + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let year = self.last_year.ok_or(OverlayError::NoPreviousYear)?;
        self.set_year_and_mask(host, year, MaskOptions::WITHOUT_HISTORY)?;
        self.last_year = None;
        Ok(())
    }

    /// Restore the real year and drop all masking. Safe to call repeatedly.
    pub fn unmask<H: HostPage + ?Sized>(&mut self, host: &mut H) {
        if let Some(real) = host.saved_real_value() {
            match host.write_year_input(&real) {
                Ok(()) => {
                    notify_host(host);
                }
                Err(err) => tracing::debug!(%err, "restoring real year failed"),
            }
            host.clear_real_value();
        }
        host.set_input_concealed(false);
        host.set_secondary_readout_hidden(false);
        self.fake_year = None;
        self.last_year = None;

        host.clear_result();
        host.clear_guess_input();
    }
}
