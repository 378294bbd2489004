//! Placement of the thumbnail popup shown above the street.
//!
//! The popup is laid out in slots of fixed width (one per matched place, at
//! most `max_slots`). It is centred on the cluster anchor, then clamped so it
//! stays inside the window; the arrow is positioned relative to the popup's
//! left edge so it keeps pointing at the anchor after clamping.

use serde::{Deserialize, Serialize};

use crate::data::place::Place;
use crate::draw::PointerMatch;

/// Fixed visual dimensions of the popup widget, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupGeometry {
    /// Width of one thumbnail slot.
    pub slot_width: f32,
    /// Minimum gap between the popup and the left window edge; also the
    /// rightward nudge applied to the centred position.
    pub edge_margin: f32,
    /// Total horizontal margin kept free on the right side.
    pub viewport_margin: f32,
    /// Arrow offset from the anchor.
    pub arrow_inset: f32,
    /// Slot count used for three or more matches.
    pub max_slots: usize,
}

impl Default for PopupGeometry {
    fn default() -> Self {
        Self {
            slot_width: 176.0,
            edge_margin: 15.0,
            viewport_margin: 30.0,
            arrow_inset: 9.0,
            max_slots: 3,
        }
    }
}

impl PopupGeometry {
    /// Number of visual slots for `matched` places (at least one).
    pub fn slots_for(&self, matched: usize) -> usize {
        matched.clamp(1, self.max_slots.max(1))
    }

    /// Half the popup width for `matched` places.
    pub fn indent(&self, matched: usize) -> f32 {
        self.slots_for(matched) as f32 * self.slot_width / 2.0
    }

    /// Left offset and arrow offset for a popup anchored at `anchor_x`.
    pub fn offsets(&self, anchor_x: f32, matched: usize, viewport_width: f32) -> (f32, f32) {
        let indent = self.indent(matched);
        let mut left = (anchor_x - indent + self.edge_margin).max(self.edge_margin);
        let max_left = viewport_width - self.viewport_margin - 2.0 * indent;
        // On very narrow windows the right bound wins over the left one.
        if left > max_left {
            left = max_left;
        }
        let arrow = anchor_x - left + self.arrow_inset;
        (left, arrow)
    }
}

/// Where and what the popup shows for one pointer position.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupLayout {
    pub left_offset: f32,
    pub arrow_offset: f32,
    pub matched_places: Vec<Place>,
}

/// Lay out the popup for a pointer match. `None` when nothing matched.
pub fn compute_popup_layout(
    geometry: &PopupGeometry,
    matched: PointerMatch,
    viewport_width: f32,
) -> Option<PopupLayout> {
    if matched.places.is_empty() {
        return None;
    }
    let (left_offset, arrow_offset) =
        geometry.offsets(matched.anchor_x, matched.places.len(), viewport_width);
    Some(PopupLayout {
        left_offset,
        arrow_offset,
        matched_places: matched.places,
    })
}

/// Thumbnail-size rendition of a full-size image reference.
pub fn thumbnail_url(image: &str) -> String {
    image.replacen("desktops", "150x150", 1)
}
