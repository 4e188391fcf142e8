//! Layer color assignment.

use rand::Rng;

/// Fixed display palette. Picks repeat across layers; uniqueness is
/// not a goal.
pub const LAYER_PALETTE: [&str; 10] = [
    "#ef4444", "#f97316", "#f59e0b", "#84cc16", "#10b981", "#06b6d4", "#3b82f6", "#8b5cf6",
    "#d946ef", "#f43f5e",
];

/// Hands out display colors for new layers. Injected so callers and
/// tests can supply deterministic sequences.
pub trait ColorAllocator {
    fn next_color(&mut self) -> String;
}

/// Random pick with replacement.
#[derive(Debug, Default)]
pub struct RandomPalette;

impl ColorAllocator for RandomPalette {
    fn next_color(&mut self) -> String {
        let index = rand::thread_rng().gen_range(0..LAYER_PALETTE.len());
        LAYER_PALETTE[index].to_string()
    }
}

/// Deterministic round-robin over the palette.
#[derive(Debug, Default)]
pub struct CyclingPalette {
    next: usize,
}

impl ColorAllocator for CyclingPalette {
    fn next_color(&mut self) -> String {
        let color = LAYER_PALETTE[self.next % LAYER_PALETTE.len()];
        self.next = (self.next + 1) % LAYER_PALETTE.len();
        color.to_string()
    }
}
