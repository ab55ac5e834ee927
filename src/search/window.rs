use crate::scanners::QuintetSet;

/// Per-character count of the digests in the window that hold a quintet
/// of that character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuintetWindow {
    counts: [u32; 16],
}

impl QuintetWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// A digest enters the window at its leading edge.
    pub fn enter(&mut self, quintets: &QuintetSet) {
        for digit in quintets.digits() {
            self.counts[digit] += 1;
        }
    }

    /// A digest leaves the window at its trailing edge.
    ///
    /// Must only be called with a set that previously entered.
    pub fn leave(&mut self, quintets: &QuintetSet) {
        for digit in quintets.digits() {
            debug_assert!(self.counts[digit] > 0, "quintet left a window it never entered");
            self.counts[digit] = self.counts[digit].saturating_sub(1);
        }
    }

    pub fn count(&self, c: char) -> u32 {
        c.to_digit(16).map_or(0, |digit| self.counts[digit as usize])
    }

    pub fn contains(&self, c: char) -> bool {
        self.count(c) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}
