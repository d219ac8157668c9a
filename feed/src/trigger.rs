/// Fires when the last rendered card scrolls into view.
///
/// The trigger only knows which card it watches; the caller still checks
/// [`crate::JobFeed::can_load_more`] before fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollTrigger {
    target: Option<usize>,
    margin: usize,
}

impl ScrollTrigger {
    /// `margin` is how many cards before the target already count as visible.
    pub fn new(margin: usize) -> Self {
        Self {
            target: None,
            margin,
        }
    }

    /// Watches the card at `target`, or nothing for an empty list.
    pub fn observe(&mut self, target: Option<usize>) {
        self.target = target;
    }

    /// Watches the last card of a list with `len` cards.
    pub fn observe_last(&mut self, len: usize) {
        self.observe(len.checked_sub(1));
    }

    pub fn disconnect(&mut self) {
        self.target = None;
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn is_connected(&self) -> bool {
        self.target.is_some()
    }

    /// True when the viewport, whose last visible card is
    /// `last_visible_index`, reaches the watched card.
    pub fn is_triggered(&self, last_visible_index: usize) -> bool {
        match self.target {
            Some(target) => last_visible_index.saturating_add(self.margin) >= target,
            None => false,
        }
    }
}
