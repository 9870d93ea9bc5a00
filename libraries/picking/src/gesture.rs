use bevy::prelude::*;

/// Cumulative pointer travel, in logical pixels, above which a press-release is a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Tracks one press-move-release cycle of the primary button.
#[derive(Debug, Default, Resource)]
pub struct PointerGesture {
    pressed: bool,
    travel: f32,
}

impl PointerGesture {
    pub fn press(&mut self) {
        self.pressed = true;
        self.travel = 0.0;
    }

    pub fn moved(&mut self, distance: f32) {
        if self.pressed {
            self.travel += distance;
        }
    }

    pub fn is_drag(&self) -> bool {
        self.travel > DRAG_THRESHOLD
    }

    /// Ends the cycle. Returns `true` if it qualifies as a click.
    pub fn release(&mut self) -> bool {
        let was_pressed = std::mem::take(&mut self.pressed);
        was_pressed && !self.is_drag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_press_is_a_click() {
        let mut gesture = PointerGesture::default();
        gesture.press();
        assert!(gesture.release());
    }

    #[test]
    fn small_jitter_is_still_a_click() {
        let mut gesture = PointerGesture::default();
        gesture.press();
        gesture.moved(2.0);
        gesture.moved(2.5);
        assert!(gesture.release());
    }

    #[test]
    fn drag_beyond_threshold_is_not_a_click() {
        let mut gesture = PointerGesture::default();
        gesture.press();
        for _ in 0..3 {
            gesture.moved(2.0);
        }
        assert!(gesture.is_drag());
        assert!(!gesture.release());
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let mut gesture = PointerGesture::default();
        gesture.moved(100.0);
        assert!(!gesture.release());
    }

    #[test]
    fn new_press_resets_travel() {
        let mut gesture = PointerGesture::default();
        gesture.press();
        gesture.moved(50.0);
        assert!(!gesture.release());
        gesture.press();
        assert!(gesture.release());
    }
}
