//! Element locator helpers that do not need a browser: update-hint matching
//! and a cached handle with liveness revalidation. The DOM scan itself lives
//! in `overlay::page`.

/// Textual hints identifying the host's "update" control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateHints<'a> {
    pub title: &'a [String],
    pub handler: &'a [String],
}

impl UpdateHints<'_> {
    /// Case-insensitive match of an element's `title` and inline `onclick`
    /// source against the hint lists. Either attribute may be absent.
    pub fn matches(&self, title: Option<&str>, onclick: Option<&str>) -> bool {
        let hit = |text: Option<&str>, hints: &[String]| {
            text.map(str::to_lowercase).is_some_and(|t| {
                hints
                    .iter()
                    .any(|h| !h.is_empty() && t.contains(&h.to_lowercase()))
            })
        };
        hit(title, self.title) || hit(onclick, self.handler)
    }
}

/// Remembers the last located handle and re-checks it before reuse.
#[derive(Debug)]
pub struct CachedHandle<T> {
    slot: Option<T>,
}

impl<T> Default for CachedHandle<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T: Clone> CachedHandle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached handle while `is_live` holds for it; otherwise drop
    /// it and run `locate`, caching whatever that finds.
    pub fn get_or_locate(
        &mut self,
        is_live: impl FnOnce(&T) -> bool,
        locate: impl FnOnce() -> Option<T>,
    ) -> Option<T> {
        if let Some(cached) = &self.slot {
            if is_live(cached) {
                return Some(cached.clone());
            }
            tracing::trace!("cached element went stale, rescanning");
            self.slot = None;
        }
        self.slot = locate();
        self.slot.clone()
    }

    pub fn is_cached(&self) -> bool {
        self.slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn hints() -> (Vec<String>, Vec<String>) {
        (
            vec!["update".into(), "refresh".into()],
            vec!["fechat".into(), "submatiempo".into(), "fecha".into()],
        )
    }

    #[test]
    fn title_hint_matches_case_insensitively() {
        let (t, h) = hints();
        let hints = UpdateHints {
            title: &t,
            handler: &h,
        };
        assert!(hints.matches(Some("Update map"), None));
        assert!(hints.matches(Some("REFRESH"), Some("")));
        assert!(!hints.matches(Some("Zoom in"), None));
    }

    #[test]
    fn handler_hint_matches_inline_source() {
        let (t, h) = hints();
        let hints = UpdateHints {
            title: &t,
            handler: &h,
        };
        assert!(hints.matches(None, Some("javascript:subMaTiempo(true)")));
        assert!(hints.matches(Some(""), Some("document.form.FECHAT.focus()")));
        assert!(!hints.matches(None, Some("zoomIn()")));
        assert!(!hints.matches(None, None));
    }

    #[test]
    fn title_hints_do_not_apply_to_handlers() {
        let (t, h) = hints();
        let hints = UpdateHints {
            title: &t,
            handler: &h,
        };
        assert!(!hints.matches(None, Some("update()")));
    }

    #[test]
    fn cached_handle_reuses_live_entry() {
        let mut cache = CachedHandle::new();
        let scans = Cell::new(0);
        let locate = || {
            scans.set(scans.get() + 1);
            Some(7)
        };
        assert_eq!(cache.get_or_locate(|_| true, locate), Some(7));
        assert_eq!(cache.get_or_locate(|_| true, locate), Some(7));
        assert_eq!(scans.get(), 1);
    }

    #[test]
    fn cached_handle_rescans_when_stale() {
        let mut cache = CachedHandle::new();
        cache.get_or_locate(|_| true, || Some(1));
        assert_eq!(cache.get_or_locate(|_| false, || Some(2)), Some(2));
        assert_eq!(cache.get_or_locate(|_| false, || None), None);
        assert!(!cache.is_cached());
    }
}
