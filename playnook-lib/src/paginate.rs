//! Pagination over the resident catalog.
//!
//! Revealing a page is a local slice of data already in memory, never a
//! fetch. The state machine exists for the UI: `LoadingMore` holds
//! while a reveal is pending (including any cosmetic delay), and the
//! "not already loading" guard makes rapid viewport-intersection
//! triggers collapse into a single reveal.

use std::ops::Range;
use std::time::Duration;

/// Number of records revealed per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Lifecycle of the displayed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// No catalog yet.
    Idle,
    /// Catalog load in flight; nothing revealed.
    LoadingInitial,
    /// A window is displayed and more records remain.
    Ready,
    /// A reveal is pending.
    LoadingMore,
    /// The window covers the whole catalog.
    Exhausted,
}

/// Tracks the prefix of the catalog revealed to the UI.
///
/// Pages reveal strictly in increasing order, one at a time; that is
/// the only ordering invariant consumers depend on.
#[derive(Debug)]
pub struct Paginator {
    page_size: usize,
    total: usize,
    revealed: usize,
    state: PageState,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total: 0,
            revealed: 0,
            state: PageState::Idle,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// The currently displayed window: always a prefix of the catalog.
    pub fn window(&self) -> Range<usize> {
        0..self.revealed
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn has_more(&self) -> bool {
        self.revealed < self.total
    }

    /// Mark the catalog load as in flight. No-op outside `Idle`.
    pub fn start_loading(&mut self) {
        if self.state == PageState::Idle {
            self.state = PageState::LoadingInitial;
        }
    }

    /// Catalog resolved: reveal the first page.
    ///
    /// Happens once per session; later calls reset the window (used
    /// only when a failed load is retried from scratch).
    pub fn catalog_ready(&mut self, total: usize) -> Range<usize> {
        self.total = total;
        self.revealed = total.min(self.page_size);
        self.state = if self.revealed < self.total {
            PageState::Ready
        } else {
            PageState::Exhausted
        };
        0..self.revealed
    }

    /// Accept a load-more request if one can proceed.
    ///
    /// Returns false — a no-op — unless the paginator is `Ready` with
    /// records remaining. This is the debounce guard for intersection
    /// triggers: a second trigger while `LoadingMore` does nothing.
    pub fn try_begin_load_more(&mut self) -> bool {
        if self.state != PageState::Ready || !self.has_more() {
            return false;
        }
        self.state = PageState::LoadingMore;
        true
    }

    /// Reveal the next page after [`try_begin_load_more`] accepted.
    ///
    /// Returns the newly revealed index range.
    pub fn complete_load_more(&mut self) -> Range<usize> {
        debug_assert_eq!(self.state, PageState::LoadingMore);
        let start = self.revealed;
        self.revealed = (self.revealed + self.page_size).min(self.total);
        self.state = if self.revealed < self.total {
            PageState::Ready
        } else {
            PageState::Exhausted
        };
        start..self.revealed
    }

    /// Reveal the next page immediately. `None` when the request is a
    /// no-op (already loading, or nothing left to reveal).
    pub fn load_more(&mut self) -> Option<Range<usize>> {
        if !self.try_begin_load_more() {
            return None;
        }
        Some(self.complete_load_more())
    }

    /// Reveal the next page after a cosmetic delay.
    ///
    /// The delay is UX pacing only — it keeps the loading affordance
    /// visible for a beat — and carries no correctness weight.
    pub async fn load_more_paced(&mut self, delay: Duration) -> Option<Range<usize>> {
        if !self.try_begin_load_more() {
            return None;
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Some(self.complete_load_more())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_reveal() {
        let mut p = Paginator::new(20);
        p.start_loading();
        assert_eq!(p.state(), PageState::LoadingInitial);

        let range = p.catalog_ready(45);
        assert_eq!(range, 0..20);
        assert_eq!(p.state(), PageState::Ready);
        assert!(p.has_more());
    }

    #[test]
    fn test_full_reveal_takes_ceil_n_over_page_size_steps() {
        let total = 45;
        let mut p = Paginator::new(20);
        p.catalog_ready(total);

        let mut reveals = 1;
        while p.load_more().is_some() {
            reveals += 1;
        }

        assert_eq!(reveals, total.div_ceil(20));
        assert_eq!(p.window(), 0..total);
        assert_eq!(p.state(), PageState::Exhausted);
    }

    #[test]
    fn test_load_more_after_exhausted_is_noop() {
        let mut p = Paginator::new(20);
        p.catalog_ready(5);
        assert_eq!(p.state(), PageState::Exhausted);

        assert!(p.load_more().is_none());
        assert_eq!(p.window(), 0..5);
    }

    #[test]
    fn test_empty_catalog_is_immediately_exhausted() {
        let mut p = Paginator::new(20);
        let range = p.catalog_ready(0);
        assert_eq!(range, 0..0);
        assert_eq!(p.state(), PageState::Exhausted);
        assert!(!p.has_more());
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let mut p = Paginator::new(20);
        p.catalog_ready(40);
        assert_eq!(p.load_more(), Some(20..40));
        assert_eq!(p.state(), PageState::Exhausted);
        assert!(p.load_more().is_none());
    }

    #[test]
    fn test_duplicate_trigger_is_debounced() {
        let mut p = Paginator::new(20);
        p.catalog_ready(45);

        assert!(p.try_begin_load_more());
        // Second intersection trigger while the first reveal is pending.
        assert!(!p.try_begin_load_more());

        assert_eq!(p.complete_load_more(), 20..40);
        assert_eq!(p.state(), PageState::Ready);
    }

    #[test]
    fn test_load_more_before_catalog_is_noop() {
        let mut p = Paginator::new(20);
        assert!(p.load_more().is_none());
        p.start_loading();
        assert!(p.load_more().is_none());
    }

    #[tokio::test]
    async fn test_paced_reveal() {
        let mut p = Paginator::new(2);
        p.catalog_ready(5);

        let range = p.load_more_paced(Duration::from_millis(5)).await;
        assert_eq!(range, Some(2..4));
        assert_eq!(p.state(), PageState::Ready);
    }
}
