//! Tick gate: decides which frames run collision and repopulation

/// Rate limiter consulted once per frame
pub trait TickGate {
    /// True when gated logic should run this frame
    fn tick(&mut self) -> bool;
}

/// Fires on every `every`-th frame
#[derive(Debug, Clone)]
pub struct FrameGate {
    every: u32,
    counter: u32,
}

impl FrameGate {
    /// `every` of 0 or 1 fires every frame
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            counter: 0,
        }
    }
}

impl TickGate for FrameGate {
    fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.every {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}

/// Gate that never holds anything back
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOpen;

impl TickGate for AlwaysOpen {
    fn tick(&mut self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_gate_cadence() {
        let mut gate = FrameGate::new(3);
        let fired: Vec<bool> = (0..6).map(|_| gate.tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn test_zero_fires_every_frame() {
        let mut gate = FrameGate::new(0);
        assert!((0..4).all(|_| gate.tick()));
    }
}
