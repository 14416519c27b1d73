//! Fixed-position placement of the overlay fragments relative to host
//! elements. Pure geometry; the overlay applies the result as inline styles.

/// Viewport rectangle of a host element (CSS pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Inline style values for a `position: fixed` fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub top: String,
    pub left: String,
    pub transform: String,
}

impl Placement {
    fn at(top: f64, left: f64) -> Self {
        Self {
            top: px(top),
            left: px(left),
            transform: "none".into(),
        }
    }
}

fn px(v: f64) -> String {
    format!("{v}px")
}

/// Gap between the map's left edge and the bar.
const BAR_INSET: f64 = 4.0;
/// Gap between the update control and the history label.
const HISTORY_GAP: f64 = 8.0;

/// Bar sits on the year input's row at the map's left edge. Without both
/// anchors it falls back to a centred position near the top of the screen.
pub fn bar_placement(input: Option<Rect>, map: Option<Rect>, fallback_top: f64) -> Placement {
    match (input, map) {
        (Some(input), Some(map)) => Placement::at(input.top, map.left + BAR_INSET),
        _ => Placement {
            top: px(fallback_top),
            left: "50%".into(),
            transform: "translateX(-50%)".into(),
        },
    }
}

/// History label goes just right of the update control; `None` leaves it
/// where it is.
pub fn history_placement(trigger: Option<Rect>) -> Option<Placement> {
    trigger.map(|r| Placement::at(r.top, r.right + HISTORY_GAP))
}
