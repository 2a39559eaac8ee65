//! Character-by-character text reveal.

use std::time::Duration;

/// Delays that drive the cascading card reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTiming {
    pub char_interval: Duration,
    pub card_stagger: Duration,
    pub item_stagger: Duration,
}

impl Default for RenderTiming {
    fn default() -> Self {
        Self {
            char_interval: Duration::from_millis(30),
            card_stagger: Duration::from_millis(400),
            item_stagger: Duration::from_millis(100),
        }
    }
}

impl RenderTiming {
    /// `card_stagger × index + item_stagger × position`, where `index` is the
    /// numeric section key rather than the card's rendered position.
    pub fn start_delay(&self, index: u32, position: usize) -> Duration {
        let position = u32::try_from(position).unwrap_or(u32::MAX);
        self.card_stagger.saturating_mul(index) + self.item_stagger.saturating_mul(position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingStep {
    /// More characters remain; the next tick must carry `run`.
    Continue { run: u64 },
    Done,
    /// The tick belongs to a run that has since been restarted.
    Stale,
}

/// A text container revealed by the typing effect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextSlot {
    target: Vec<char>,
    revealed: usize,
    run: u64,
}

impl TextSlot {
    /// A slot that holds `text` but shows nothing until typing begins.
    pub fn pending(text: &str) -> Self {
        Self {
            target: text.chars().collect(),
            revealed: 0,
            run: 0,
        }
    }

    pub fn text(&self) -> String {
        self.target[..self.revealed].iter().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.target.len()
    }

    /// Truncates whatever is shown, replaces the target with `text`, and
    /// reveals the first character straight away.
    pub fn type_text(&mut self, text: &str) -> TypingStep {
        self.target = text.chars().collect();
        self.begin()
    }

    /// Restarts typing of the current target.
    pub fn begin(&mut self) -> TypingStep {
        self.run += 1;
        self.revealed = 0;
        self.reveal_next()
    }

    pub fn advance(&mut self, run: u64) -> TypingStep {
        if run != self.run {
            return TypingStep::Stale;
        }
        self.reveal_next()
    }

    fn reveal_next(&mut self) -> TypingStep {
        if self.revealed < self.target.len() {
            self.revealed += 1;
        }
        if self.is_complete() {
            TypingStep::Done
        } else {
            TypingStep::Continue { run: self.run }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_character_per_step() {
        let mut slot = TextSlot::pending("abc");
        assert_eq!(slot.text(), "");

        let TypingStep::Continue { run } = slot.begin() else {
            panic!("expected more characters");
        };
        assert_eq!(slot.text(), "a");
        assert_eq!(slot.advance(run), TypingStep::Continue { run });
        assert_eq!(slot.text(), "ab");
        assert_eq!(slot.advance(run), TypingStep::Done);
        assert_eq!(slot.text(), "abc");
    }

    #[test]
    fn restarting_truncates_and_invalidates_old_ticks() {
        let mut slot = TextSlot::pending("hello");
        let TypingStep::Continue { run: first } = slot.begin() else {
            panic!("expected more characters");
        };
        slot.advance(first);
        assert_eq!(slot.text(), "he");

        let TypingStep::Continue { run: second } = slot.type_text("xyz") else {
            panic!("expected more characters");
        };
        assert_eq!(slot.text(), "x");
        assert_eq!(slot.advance(first), TypingStep::Stale);
        assert_eq!(slot.text(), "x");
        assert_eq!(slot.advance(second), TypingStep::Continue { run: second });
        assert_eq!(slot.text(), "xy");
    }

    #[test]
    fn multibyte_text_is_revealed_by_character() {
        let mut slot = TextSlot::pending("é✓");
        slot.begin();
        assert_eq!(slot.text(), "é");
    }

    #[test]
    fn empty_text_completes_immediately() {
        let mut slot = TextSlot::pending("");
        assert_eq!(slot.begin(), TypingStep::Done);
    }

    #[test]
    fn stagger_uses_numeric_index() {
        let timing = RenderTiming::default();
        assert_eq!(timing.start_delay(0, 0), Duration::ZERO);
        assert_eq!(timing.start_delay(2, 3), Duration::from_millis(1100));
    }
}
