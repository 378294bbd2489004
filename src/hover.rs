//! Pointer session state for the street view and its thumbnail popup.
//!
//! Tracks whether the pointer is on the main street or on the popup, whether
//! the popup is visible, and the single-use latch that swallows the hover
//! emission the component sends itself when a large cluster is matched.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverPhase {
    #[default]
    Idle,
    /// Pointer is over matched points on the street; popup not engaged.
    HoveringMain,
    /// Pointer rests on the popup itself.
    HoveringThumb,
}

#[derive(Debug, Clone, Default)]
pub struct HoverSession {
    phase: HoverPhase,
    is_thumb_view: bool,
    draw_on_map: bool,
}

impl HoverSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    /// Pointer is on the popup.
    pub fn on_thumb(&self) -> bool {
        self.phase == HoverPhase::HoveringThumb
    }

    /// Popup is visible.
    pub fn is_thumb_view(&self) -> bool {
        self.is_thumb_view
    }

    /// The next hover emission will be swallowed.
    pub fn is_suppressing(&self) -> bool {
        self.draw_on_map
    }

    /// Street pointer move that matched at least one place.
    pub fn pointer_matched(&mut self) {
        self.is_thumb_view = true;
        if self.phase == HoverPhase::Idle {
            self.phase = HoverPhase::HoveringMain;
        }
    }

    /// Street pointer move that matched nothing.
    pub fn pointer_missed(&mut self) {
        self.is_thumb_view = false;
        if self.phase == HoverPhase::HoveringMain {
            self.phase = HoverPhase::Idle;
        }
    }

    /// Arm the suppression latch. Returns `false` if it was still armed from
    /// an earlier cluster, i.e. an emission was never consumed.
    pub fn arm_suppression(&mut self) -> bool {
        let was_armed = std::mem::replace(&mut self.draw_on_map, true);
        !was_armed
    }

    /// Consume the latch. Returns `true` when the current emission must be
    /// swallowed.
    pub fn consume_suppression(&mut self) -> bool {
        std::mem::take(&mut self.draw_on_map)
    }

    pub fn enter_thumb(&mut self) {
        self.phase = HoverPhase::HoveringThumb;
    }

    pub fn leave_thumb(&mut self) {
        self.phase = HoverPhase::Idle;
        self.is_thumb_view = false;
    }

    /// Pointer left the street. Returns `true` when this leave must be
    /// treated as a popup unhover: the pointer did not move onto the popup
    /// and someone listens for hover changes.
    pub fn pointer_left(&mut self, has_hover_channel: bool) -> bool {
        if self.on_thumb() {
            return false;
        }
        if self.phase == HoverPhase::HoveringMain {
            self.phase = HoverPhase::Idle;
        }
        has_hover_channel
    }

    /// Hide the popup after a thumbnail was activated.
    pub fn close_popup(&mut self) {
        self.is_thumb_view = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_and_miss_toggle_popup() {
        let mut s = HoverSession::new();
        s.pointer_matched();
        assert!(s.is_thumb_view());
        assert_eq!(s.phase(), HoverPhase::HoveringMain);
        s.pointer_missed();
        assert!(!s.is_thumb_view());
        assert_eq!(s.phase(), HoverPhase::Idle);
    }

    #[test]
    fn latch_is_single_use() {
        let mut s = HoverSession::new();
        assert!(s.arm_suppression());
        assert!(!s.arm_suppression());
        assert!(s.consume_suppression());
        assert!(!s.consume_suppression());
    }

    #[test]
    fn leave_while_on_thumb_is_ignored() {
        let mut s = HoverSession::new();
        s.pointer_matched();
        s.enter_thumb();
        assert!(!s.pointer_left(true));
        assert!(s.on_thumb());
    }

    #[test]
    fn leave_from_street_requests_unhover_only_with_channel() {
        let mut s = HoverSession::new();
        s.pointer_matched();
        assert!(!s.pointer_left(false));
        assert_eq!(s.phase(), HoverPhase::Idle);
        s.pointer_matched();
        assert!(s.pointer_left(true));
    }

    #[test]
    fn thumb_round_trip_restores_idle() {
        let mut s = HoverSession::new();
        s.enter_thumb();
        assert!(s.on_thumb());
        s.leave_thumb();
        assert!(!s.on_thumb());
        assert!(!s.is_thumb_view());
        assert_eq!(s.phase(), HoverPhase::Idle);
    }
}
