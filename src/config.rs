//! Overlay configuration: the host page's DOM contract plus timing and
//! placement knobs. `Default` matches the map site the overlay was built for.

#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Selector of the central year input (the authoritative year value).
    pub year_input_selector: String,
    /// Selector of the redundant year readout hidden while masked.
    pub secondary_readout_selector: String,
    /// Id of the map viewport used to anchor the bar.
    pub map_container_id: String,
    /// Global function simulating Enter in the year input: `f(input, event)`.
    pub enter_callback: String,
    /// Global function submitting the elapsed time: `f(false)`.
    pub elapsed_callback: String,
    /// Lowercase substrings looked for in an update image's `title`.
    pub title_hints: Vec<String>,
    /// Lowercase substrings looked for in an update image's inline `onclick`.
    pub handler_hints: Vec<String>,
    pub feedback_visible_ms: u32,
    pub feedback_fade_ms: u32,
    pub fallback_top_px: f64,
    /// `tracing` level name for the console subscriber.
    pub log_level: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            year_input_selector: r#"input[name="fechat"]"#.into(),
            secondary_readout_selector: r#"input[name="sliderValue2"]"#.into(),
            map_container_id: "map".into(),
            enter_callback: "submitenter".into(),
            elapsed_callback: "submatiempo".into(),
            title_hints: vec!["update".into(), "refresh".into()],
            handler_hints: vec!["fechat".into(), "submatiempo".into(), "fecha".into()],
            feedback_visible_ms: 5000,
            feedback_fade_ms: 600,
            fallback_top_px: 110.0,
            log_level: "info".into(),
        }
    }
}

impl OverlayConfig {
    /// Parse a JSON object of overrides; missing keys keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, crate::error::OverlayError> {
        serde_json::from_str(json)
            .map_err(|e| crate::error::OverlayError::Config(e.to_string()))
    }

    /// Level filter for the console subscriber; unknown names mean `info`.
    pub fn level_filter(&self) -> tracing::level_filters::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(tracing::level_filters::LevelFilter::INFO)
    }
}
