//! Year Quiz overlay crate.
//!
//! Injected into a historical map page, the overlay hides the year the page
//! shows behind a fake one, draws random years per era and runs a guessing
//! quiz with era-dependent tolerances. The page stays the source of truth
//! for the year; everything here re-reads it instead of caching it.
//!
//! The logic (`masking`, `era`, `quiz`, `session`, `layout`, `locator`) only
//! talks to the page through [`host::HostPage`] and runs natively in tests.
//! `overlay` is the `web-sys` implementation and browser wiring.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod era;
pub mod error;
pub mod host;
pub mod layout;
pub mod locator;
pub mod logging;
pub mod masking;
pub mod overlay;
pub mod parse;
pub mod quiz;
pub mod session;

pub use config::OverlayConfig;
pub use era::{Era, EraKey, era_for_year, random_year_in_era, tolerance_for_year};
pub use error::{OverlayError, Result};
pub use host::{HostPage, NotifyReport, NotifyStrategy, notify_host};
pub use masking::{MaskOptions, YearState};
pub use quiz::{QuizOutcome, evaluate};
pub use session::{Action, Session};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "autostart")]
    if let Err(err) = overlay::start_when_ready(OverlayConfig::default()) {
        web_sys::console::warn_1(&err);
    }
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Inject the overlay with the default host contract.
#[wasm_bindgen]
pub fn start_overlay() -> std::result::Result<(), JsValue> {
    overlay::start(OverlayConfig::default())
}

/// Inject the overlay with JSON overrides of [`OverlayConfig`].
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_overlay_with_config(json: &str) -> std::result::Result<(), JsValue> {
    let config = OverlayConfig::from_json(json)?;
    overlay::start(config)
}

/// Tolerance (in years) a guess gets for the given real year.
#[wasm_bindgen(js_name = toleranceForYear)]
pub fn tolerance_for_year_js(year: i32) -> i32 {
    tolerance_for_year(i64::from(year)) as i32
}
