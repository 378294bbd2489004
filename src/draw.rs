//! Contract with the drawing service that renders the street.
//!
//! The service owns the actual shapes (scale, house markers) and the
//! clustering of points under the cursor. The component only calls the
//! operations below, always clearing before redrawing.

use crate::channels::Subject;
use crate::data::place::{ChosenSet, IncomeFilter, Place, PlaceSet};
use crate::data::scale_index::ScaledIncomeIndex;

/// Which family of house markers to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HouseCategory {
    Hover,
    Chosen,
}

/// Places clustered under the cursor, as reported by the drawing service.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerMatch {
    pub places: Vec<Place>,
    /// Pixel x of the cluster anchor, in window coordinates.
    pub anchor_x: f32,
}

/// State the component stores on the drawing service between renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreetState {
    /// Current place set, sorted ascending by income.
    pub places: PlaceSet,
    /// Scaled positions of `places` (see [`ScaledIncomeIndex`]).
    pub full_income_arr: ScaledIncomeIndex,
    pub chosen_places: ChosenSet,
    pub hover_place: Option<Place>,
}

/// Drawing operations consumed by [`StreetComponent`](crate::street::StreetComponent).
///
/// The chainable methods return `&mut Self` so a render sequence reads in
/// the order it executes: `clear_surface().initialize().draw_scale(..)`.
pub trait StreetDrawService {
    /// Handle to whatever the service paints into.
    type Surface;

    fn set_surface(&mut self, surface: Self::Surface);
    fn clear_surface(&mut self) -> &mut Self;
    fn initialize(&mut self) -> &mut Self;
    fn draw_scale(&mut self, places: &[Place], show_slider_hint: bool) -> &mut Self;

    fn state(&self) -> &StreetState;
    fn state_mut(&mut self) -> &mut StreetState;

    fn set_places(&mut self, places: PlaceSet) -> &mut Self {
        self.state_mut().places = places;
        self
    }

    fn set_full_income_arr(&mut self, scaled: ScaledIncomeIndex) -> &mut Self {
        self.state_mut().full_income_arr = scaled;
        self
    }

    fn set_chosen_places(&mut self, chosen: ChosenSet) -> &mut Self {
        self.state_mut().chosen_places = chosen;
        self
    }

    fn set_hover_place(&mut self, place: Option<Place>) -> &mut Self {
        self.state_mut().hover_place = place;
        self
    }

    /// Map an income onto the street. `None` when the income cannot be placed.
    fn scale(&self, income: f64) -> Option<f64>;

    /// Remove chosen markers and draw `chosen` again. `slider_driven` marks
    /// redraws requested while a slider controller steers the selection.
    fn clear_and_redraw(&mut self, chosen: &[Place], slider_driven: bool);
    fn remove_houses(&mut self, category: HouseCategory);
    fn draw_hover_house(&mut self, place: &Place);

    /// Cluster the places near `cursor_x`. `None` when nothing is close.
    fn on_pointer_move(&mut self, cursor_x: f32) -> Option<PointerMatch>;

    /// Income window changes made on the street itself.
    fn filter(&self) -> &Subject<IncomeFilter>;
    /// The income window currently shown.
    fn income_bounds(&self) -> IncomeFilter;
}
