use cellspace_common::GridConfig;

/// Scroll-style accumulator selecting the active layer for the ray-march
/// strategy.
///
/// Wheel deltas accumulate into a float that is clamped to [0, N-1]; the
/// active layer is the floored value, so fractional scrolling feels
/// continuous without ever leaving the lattice.
#[derive(Debug, Clone, Copy)]
pub struct LayerCursor {
    value: f32,
    max: f32,
}

impl LayerCursor {
    /// A cursor over the given grid, starting at the center layer.
    pub fn new(config: GridConfig) -> Self {
        let max = (config.size - 1) as f32;
        Self {
            value: (config.size / 2) as f32,
            max,
        }
    }

    /// The currently selected layer index.
    pub fn layer(&self) -> usize {
        self.value.floor() as usize
    }

    /// Accumulate a scroll delta (positive or negative), clamped to the
    /// lattice.
    pub fn scroll(&mut self, delta: f32) {
        self.value = (self.value + delta).clamp(0.0, self.max);
    }

    /// Jump directly to a layer index (clamped).
    pub fn set(&mut self, layer: usize) {
        self.value = (layer as f32).min(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_center() {
        let cursor = LayerCursor::new(GridConfig::default());
        assert_eq!(cursor.layer(), 8);
    }

    #[test]
    fn scroll_accumulates_fractions() {
        let mut cursor = LayerCursor::new(GridConfig::default());
        cursor.scroll(0.4);
        assert_eq!(cursor.layer(), 8);
        cursor.scroll(0.7);
        assert_eq!(cursor.layer(), 9);
    }

    #[test]
    fn scroll_clamps_to_lattice() {
        let mut cursor = LayerCursor::new(GridConfig::default());
        cursor.scroll(-100.0);
        assert_eq!(cursor.layer(), 0);
        cursor.scroll(1000.0);
        assert_eq!(cursor.layer(), 15);
    }

    #[test]
    fn set_clamps_too() {
        let mut cursor = LayerCursor::new(GridConfig::default());
        cursor.set(3);
        assert_eq!(cursor.layer(), 3);
        cursor.set(99);
        assert_eq!(cursor.layer(), 15);
    }
}
