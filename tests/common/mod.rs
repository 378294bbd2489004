//! Shared fixtures: a drawing service that records every call.
#![allow(dead_code)]

use streetplot::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetSurface(String),
    Clear,
    Init,
    DrawScale { count: usize, hint: bool },
    ClearAndRedraw { ids: Vec<String>, slider_driven: bool },
    RemoveHouses(HouseCategory),
    DrawHover(String),
    PointerMove(f32),
}

pub struct RecordingStreet {
    pub calls: Vec<Call>,
    pub state: StreetState,
    pub filter: Subject<IncomeFilter>,
    pub bounds: IncomeFilter,
    pub next_match: Option<PointerMatch>,
    pub scale_divisor: f64,
}

impl RecordingStreet {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            state: StreetState::default(),
            filter: Subject::new(),
            bounds: IncomeFilter {
                low_income: 0.0,
                high_income: 15_000.0,
            },
            next_match: None,
            scale_divisor: 10.0,
        }
    }

    pub fn redraw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::ClearAndRedraw { .. }))
            .count()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl StreetDrawService for RecordingStreet {
    type Surface = String;

    fn set_surface(&mut self, surface: String) {
        self.calls.push(Call::SetSurface(surface));
    }

    fn clear_surface(&mut self) -> &mut Self {
        self.calls.push(Call::Clear);
        self
    }

    fn initialize(&mut self) -> &mut Self {
        self.calls.push(Call::Init);
        self
    }

    fn draw_scale(&mut self, places: &[Place], show_slider_hint: bool) -> &mut Self {
        self.calls.push(Call::DrawScale {
            count: places.len(),
            hint: show_slider_hint,
        });
        self
    }

    fn state(&self) -> &StreetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StreetState {
        &mut self.state
    }

    fn scale(&self, income: f64) -> Option<f64> {
        (income >= 0.0).then(|| income / self.scale_divisor)
    }

    fn clear_and_redraw(&mut self, chosen: &[Place], slider_driven: bool) {
        self.calls.push(Call::ClearAndRedraw {
            ids: ids(chosen),
            slider_driven,
        });
    }

    fn remove_houses(&mut self, category: HouseCategory) {
        self.calls.push(Call::RemoveHouses(category));
    }

    fn draw_hover_house(&mut self, place: &Place) {
        self.calls.push(Call::DrawHover(place.id.clone()));
    }

    fn on_pointer_move(&mut self, cursor_x: f32) -> Option<PointerMatch> {
        self.calls.push(Call::PointerMove(cursor_x));
        self.next_match.clone()
    }

    fn filter(&self) -> &Subject<IncomeFilter> {
        &self.filter
    }

    fn income_bounds(&self) -> IncomeFilter {
        self.bounds
    }
}

pub type TestComponent = StreetComponent<RecordingStreet, FixedEnvironment>;

/// Component wired to every optional input, plus handles to drive them.
pub struct Harness {
    pub component: TestComponent,
    pub places: Subject<PlaceSet>,
    pub chosen: Subject<ChosenSet>,
    pub hover: Subject<Option<Place>>,
    pub slider: Subject<usize>,
    pub resize: Subject<ViewportGeometry>,
    pub mouse_leave: Subject<()>,
}

impl Harness {
    pub fn new(with_slider: bool) -> Self {
        Self::with_config(with_slider, StreetConfig::default())
    }

    pub fn with_config(with_slider: bool, config: StreetConfig) -> Self {
        let places = Subject::new();
        let chosen = Subject::new();
        let hover = Subject::new();
        let slider = Subject::new();
        let resize = Subject::new();
        let mouse_leave = Subject::new();
        let mut inputs = StreetInputs::new(resize.clone(), mouse_leave.clone())
            .with_places(places.clone())
            .with_chosen_places(chosen.clone())
            .with_hover_place(hover.clone());
        if with_slider {
            inputs = inputs.with_slider(slider.clone());
        }
        let mut component = StreetComponent::new(
            RecordingStreet::new(),
            FixedEnvironment::desktop(1280.0),
            inputs,
            config,
        );
        component
            .init(Some("street-box svg".to_string()))
            .expect("surface present");
        component.street_mut().calls.clear();
        Self {
            component,
            places,
            chosen,
            hover,
            slider,
            resize,
            mouse_leave,
        }
    }

    pub fn calls(&self) -> &[Call] {
        &self.component.street().calls
    }

    pub fn clear_calls(&mut self) {
        self.component.street_mut().calls.clear();
    }

    pub fn set_match(&mut self, m: Option<PointerMatch>) {
        self.component.street_mut().next_match = m;
    }
}

pub fn place(id: &str, income: f64) -> Place {
    Place::new(id.to_string(), Some(income), format!("media/desktops/{id}.jpg"))
}

pub fn cluster(n: usize, anchor_x: f32) -> PointerMatch {
    PointerMatch {
        places: (0..n).map(|i| place(&format!("m{i}"), 100.0 * i as f64)).collect(),
        anchor_x,
    }
}

pub fn ids(places: &[Place]) -> Vec<String> {
    places.iter().map(|p| p.id.clone()).collect()
}
