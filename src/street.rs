//! The street component: keeps the drawing service in step with its input
//! channels and drives the thumbnail popup from pointer movement.
//!
//! All work happens on the UI thread. Producers push into the input
//! [`Subject`]s from anywhere; the host calls [`StreetComponent::pump`] once
//! per frame to dispatch what arrived, in channel order:
//! points, chosen places, hover place, street filter, resize, mouse leave.
//!
//! Hover values the component publishes from [`StreetComponent::on_street`]
//! are dispatched before that call returns, after any hover values already
//! queued. The suppression latch in [`HoverSession`] therefore always meets
//! the clearing emission it was armed for.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::channels::{Subject, SubscriptionSet};
use crate::config::StreetConfig;
use crate::data::place::{ChosenSet, IncomeFilter, Place, PlaceSet, ThumbRoute, ViewportGeometry};
use crate::data::scale_index::ScaleIndex;
use crate::debounce::Debouncer;
use crate::draw::{HouseCategory, StreetDrawService};
use crate::environment::Environment;
use crate::error::{Result, StreetError};
use crate::hover::{HoverPhase, HoverSession};
use crate::popup::{compute_popup_layout, PopupLayout};

/// Channels the component subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Points,
    ChosenPlaces,
    HoverPlace,
    Filter,
    Resize,
    MouseLeave,
}

/// Input channels. `resize` and `mouse_leave` come from the host window and
/// are always present; the rest are optional and simply not subscribed when
/// absent.
#[derive(Debug, Clone)]
pub struct StreetInputs {
    pub places: Option<Subject<PlaceSet>>,
    pub chosen_places: Option<Subject<ChosenSet>>,
    /// Shared with other views; the component both reads and writes it.
    pub hover_place: Option<Subject<Option<Place>>>,
    /// Receives the sorted index of an activated thumbnail.
    pub slider: Option<Subject<usize>>,
    pub resize: Subject<ViewportGeometry>,
    pub mouse_leave: Subject<()>,
}

impl StreetInputs {
    pub fn new(resize: Subject<ViewportGeometry>, mouse_leave: Subject<()>) -> Self {
        Self {
            places: None,
            chosen_places: None,
            hover_place: None,
            slider: None,
            resize,
            mouse_leave,
        }
    }

    pub fn with_places(mut self, places: Subject<PlaceSet>) -> Self {
        self.places = Some(places);
        self
    }

    pub fn with_chosen_places(mut self, chosen: Subject<ChosenSet>) -> Self {
        self.chosen_places = Some(chosen);
        self
    }

    pub fn with_hover_place(mut self, hover: Subject<Option<Place>>) -> Self {
        self.hover_place = Some(hover);
        self
    }

    pub fn with_slider(mut self, slider: Subject<usize>) -> Self {
        self.slider = Some(slider);
        self
    }
}

#[derive(Default)]
struct Receivers {
    places: Option<Receiver<PlaceSet>>,
    chosen_places: Option<Receiver<ChosenSet>>,
    hover_place: Option<Receiver<Option<Place>>>,
    filter: Option<Receiver<IncomeFilter>>,
    resize: Option<Receiver<ViewportGeometry>>,
    mouse_leave: Option<Receiver<()>>,
}

fn drain<T>(rx: &Option<Receiver<T>>) -> Vec<T> {
    rx.as_ref().map(|rx| rx.try_iter().collect()).unwrap_or_default()
}

/// Hover/selection coordinator for one street view.
pub struct StreetComponent<S: StreetDrawService, E: Environment> {
    street: S,
    env: E,
    config: StreetConfig,
    inputs: StreetInputs,
    filter_street: Subject<IncomeFilter>,
    navigate: Subject<ThumbRoute>,
    is_desktop: bool,
    session: HoverSession,
    popup: Option<PopupLayout>,
    receivers: Receivers,
    subscriptions: SubscriptionSet<Channel>,
    resize: Debouncer<ViewportGeometry>,
    last_viewport: Option<ViewportGeometry>,
    initialized: bool,
    torn_down: bool,
}

impl<S: StreetDrawService, E: Environment> StreetComponent<S, E> {
    /// Create the component. The pointer capability of `env` is read here,
    /// once.
    pub fn new(street: S, env: E, inputs: StreetInputs, config: StreetConfig) -> Self {
        let is_desktop = env.is_pointer_device();
        let resize = Debouncer::new(config.resize_debounce());
        Self {
            street,
            env,
            config,
            inputs,
            filter_street: Subject::new(),
            navigate: Subject::new(),
            is_desktop,
            session: HoverSession::new(),
            popup: None,
            receivers: Receivers::default(),
            subscriptions: SubscriptionSet::new(),
            resize,
            last_viewport: None,
            initialized: false,
            torn_down: false,
        }
    }

    /// Attach the drawing surface and subscribe to every present channel.
    ///
    /// A missing surface is a configuration error; nothing is subscribed in
    /// that case. `filter_street` receives the current income bounds before
    /// this returns.
    pub fn init(&mut self, surface: Option<S::Surface>) -> Result<()> {
        if self.torn_down {
            return Err(StreetError::TornDown);
        }
        if self.initialized {
            return Err(StreetError::AlreadyInitialized);
        }
        let surface = surface.ok_or(StreetError::MissingSurface)?;
        self.street.set_surface(surface);

        if let Some(chosen) = &self.inputs.chosen_places {
            let (rx, handle) = chosen.subscribe().into_parts();
            self.receivers.chosen_places = Some(rx);
            self.subscriptions.insert(Channel::ChosenPlaces, handle);
        }
        if let Some(hover) = &self.inputs.hover_place {
            let (rx, handle) = hover.subscribe().into_parts();
            self.receivers.hover_place = Some(rx);
            self.subscriptions.insert(Channel::HoverPlace, handle);
        }
        if let Some(places) = &self.inputs.places {
            let (rx, handle) = places.subscribe().into_parts();
            self.receivers.places = Some(rx);
            self.subscriptions.insert(Channel::Points, handle);
        }

        let (rx, handle) = self.street.filter().subscribe().into_parts();
        self.receivers.filter = Some(rx);
        self.subscriptions.insert(Channel::Filter, handle);
        let bounds = self.street.income_bounds();
        self.street.filter().next(bounds);
        self.relay_filter();

        let (rx, handle) = self.inputs.resize.subscribe().into_parts();
        self.receivers.resize = Some(rx);
        self.subscriptions.insert(Channel::Resize, handle);

        let (rx, handle) = self.inputs.mouse_leave.subscribe().into_parts();
        self.receivers.mouse_leave = Some(rx);
        self.subscriptions.insert(Channel::MouseLeave, handle);

        self.initialized = true;
        debug!(subscriptions = self.subscriptions.len(), "street initialized");
        Ok(())
    }

    /// Dispatch everything that arrived since the last pump and fire a
    /// debounced resize whose quiet period has passed at `now`. Returns the
    /// number of emissions handled.
    ///
    /// Queued resize values are stamped with `now`, not with their arrival
    /// time, so resizes drained by the same pump always collapse into one
    /// redraw. Pump at least once per frame to keep the quiet period honest.
    pub fn pump(&mut self, now: Instant) -> usize {
        if !self.initialized || self.torn_down {
            return 0;
        }
        let mut handled = 0;

        for places in drain(&self.receivers.places) {
            self.on_places(places);
            handled += 1;
        }
        for chosen in drain(&self.receivers.chosen_places) {
            self.on_chosen_places(chosen);
            handled += 1;
        }
        handled += self.dispatch_hover();
        handled += self.relay_filter();
        for geometry in drain(&self.receivers.resize) {
            self.resize.push(now, geometry);
            handled += 1;
        }
        for () in drain(&self.receivers.mouse_leave) {
            self.on_mouse_leave();
            handled += 1;
        }

        if let Some(geometry) = self.resize.poll(now) {
            self.on_resize(geometry);
        }
        handled
    }

    /// Time until a pending resize redraw fires, if one is pending.
    pub fn resize_pending(&self, now: Instant) -> Option<Duration> {
        self.resize.remaining(now)
    }

    /// Release every subscription acquired by [`init`](Self::init). Safe to
    /// call at any point and more than once; returns the channels released
    /// by this call.
    pub fn teardown(&mut self) -> Vec<Channel> {
        let released = self.subscriptions.release_all();
        self.receivers = Receivers::default();
        self.resize.cancel();
        self.torn_down = true;
        debug!(?released, "street torn down");
        released
    }

    // ── Channel handlers ────────────────────────────────────────────────

    fn on_places(&mut self, places: PlaceSet) {
        debug!(count = places.len(), "points emission");
        self.street.clear_surface().initialize();
        if places.is_empty() {
            self.street
                .set_places(PlaceSet::new())
                .set_full_income_arr(Vec::new());
            return;
        }
        let hint = self.slider_hint();
        self.street.draw_scale(&places, hint);
        self.store_scale_index(&places);
        if !self.street.state().chosen_places.is_empty() {
            let chosen = self.street.state().chosen_places.clone();
            self.street.clear_and_redraw(&chosen, false);
        }
    }

    fn on_chosen_places(&mut self, chosen: ChosenSet) {
        if chosen.is_empty() {
            return;
        }
        debug!(count = chosen.len(), "chosen places emission");
        let slider_driven = self.has_slider();
        self.street.set_chosen_places(chosen.clone());
        self.street.clear_and_redraw(&chosen, slider_driven);
    }

    fn on_hover_place(&mut self, hover: Option<Place>) {
        if self.session.consume_suppression() {
            debug!("hover emission swallowed by suppression latch");
            return;
        }
        match hover {
            None => {
                self.street.remove_houses(HouseCategory::Hover);
                let chosen = self.street.state().chosen_places.clone();
                self.street.clear_and_redraw(&chosen, false);
            }
            Some(place) => {
                self.street.set_hover_place(Some(place.clone()));
                self.street.remove_houses(HouseCategory::Chosen);
                self.street.draw_hover_house(&place);
            }
        }
    }

    fn dispatch_hover(&mut self) -> usize {
        let pending = drain(&self.receivers.hover_place);
        let count = pending.len();
        for hover in pending {
            self.on_hover_place(hover);
        }
        count
    }

    fn relay_filter(&mut self) -> usize {
        let filters = drain(&self.receivers.filter);
        let count = filters.len();
        for filter in filters {
            self.filter_street.next(filter);
        }
        count
    }

    fn on_resize(&mut self, geometry: ViewportGeometry) {
        debug!(width = geometry.width, "resize redraw");
        self.last_viewport = Some(geometry);
        let places = self.street.state().places.clone();
        let hint = self.slider_hint();
        self.street
            .clear_surface()
            .initialize()
            .draw_scale(&places, hint);
        self.store_scale_index(&places);
        let chosen = self.street.state().chosen_places.clone();
        let slider_driven = self.has_slider();
        self.street.set_chosen_places(chosen.clone());
        self.street.clear_and_redraw(&chosen, slider_driven);
    }

    fn on_mouse_leave(&mut self) {
        let has_hover = self.inputs.hover_place.is_some();
        if self.session.pointer_left(has_hover) {
            self.thumb_unhover();
        }
    }

    fn store_scale_index(&mut self, places: &[Place]) {
        let street = &self.street;
        let index = ScaleIndex::build(places, |income| street.scale(income));
        self.street
            .set_places(index.places)
            .set_full_income_arr(index.scaled);
    }

    // ── Pointer entry points ────────────────────────────────────────────

    /// Pointer moved over the street at window x `cursor_x`.
    ///
    /// Ignored on touch displays and outside the init/teardown window.
    /// Returns the popup layout when the drawing service matched at least
    /// one place.
    pub fn on_street(&mut self, cursor_x: f32) -> Option<&PopupLayout> {
        if !self.is_desktop || !self.initialized || self.torn_down {
            return None;
        }
        let matched = self
            .street
            .on_pointer_move(cursor_x)
            .filter(|m| !m.places.is_empty());
        let Some(matched) = matched else {
            self.session.pointer_missed();
            self.popup = None;
            return None;
        };
        trace!(cursor_x, count = matched.places.len(), "street pointer match");
        self.session.pointer_matched();

        // Values queued by other producers go first.
        self.dispatch_hover();

        let count = matched.places.len();
        if count == 1 {
            if let Some(hover) = &self.inputs.hover_place {
                hover.next(Some(matched.places[0].clone()));
            }
            self.dispatch_hover();
        }
        if count >= self.config.hover_suppression_threshold {
            if let Some(hover) = &self.inputs.hover_place {
                if !self.session.arm_suppression() {
                    warn!("suppression latch re-armed before its emission was consumed");
                }
                hover.next(None);
            }
            self.dispatch_hover();
        }

        self.popup = compute_popup_layout(&self.config.popup, matched, self.env.viewport_width());
        self.popup.as_ref()
    }

    /// Pointer entered the thumbnail of `place` in the popup.
    pub fn thumb_hover(&mut self, place: &Place) {
        if self.torn_down {
            return;
        }
        self.session.enter_thumb();
        if let Some(hover) = &self.inputs.hover_place {
            hover.next(Some(place.clone()));
        }
        self.street.remove_houses(HouseCategory::Chosen);
        self.street.remove_houses(HouseCategory::Hover);
        self.street.set_hover_place(Some(place.clone()));
        self.street.draw_hover_house(place);
    }

    /// Pointer left the popup (or the street, see mouse-leave handling).
    pub fn thumb_unhover(&mut self) {
        if self.torn_down {
            return;
        }
        self.session.leave_thumb();
        if let Some(hover) = &self.inputs.hover_place {
            hover.next(None);
        }
        self.street.set_hover_place(None);
        let chosen = self.street.state().chosen_places.clone();
        let slider_driven = self.has_slider();
        self.street.clear_and_redraw(&chosen, slider_driven);
    }

    /// A thumbnail was activated. With a slider wired, the slider receives
    /// the place's index in the sorted set; otherwise a navigation request
    /// is emitted.
    pub fn click_on_thumb(&mut self, place: &Place) {
        if self.torn_down {
            return;
        }
        self.session.close_popup();
        if let Some(slider) = &self.inputs.slider {
            match self
                .street
                .state()
                .places
                .iter()
                .rposition(|p| p.id == place.id)
            {
                Some(index) => slider.next(index),
                None => warn!(place = %place.id, "activated thumbnail is not in the current place set"),
            }
            return;
        }
        self.navigate.next(ThumbRoute {
            context: self.config.context.clone(),
            place_id: place.id.clone(),
            image: place.image.clone(),
        });
    }

    // ── Accessors ───────────────────────────────────────────────────────

    fn has_slider(&self) -> bool {
        self.inputs.slider.is_some()
    }

    fn slider_hint(&self) -> bool {
        self.has_slider() || self.config.show_slider_hint
    }

    /// Outward channel relaying the street's income filter.
    pub fn filter_street(&self) -> &Subject<IncomeFilter> {
        &self.filter_street
    }

    /// Navigation requests from thumbnail activation.
    pub fn navigation(&self) -> &Subject<ThumbRoute> {
        &self.navigate
    }

    /// Visible popup, if any.
    pub fn popup(&self) -> Option<&PopupLayout> {
        self.popup.as_ref().filter(|_| self.session.is_thumb_view())
    }

    pub fn thumb_places(&self) -> &[Place] {
        self.popup
            .as_ref()
            .map(|p| p.matched_places.as_slice())
            .unwrap_or(&[])
    }

    pub fn thumb_left(&self) -> Option<f32> {
        self.popup.as_ref().map(|p| p.left_offset)
    }

    pub fn arrow_left(&self) -> Option<f32> {
        self.popup.as_ref().map(|p| p.arrow_offset)
    }

    pub fn is_thumb_view(&self) -> bool {
        self.session.is_thumb_view()
    }

    pub fn on_thumb(&self) -> bool {
        self.session.on_thumb()
    }

    pub fn hover_phase(&self) -> HoverPhase {
        self.session.phase()
    }

    pub fn is_suppressing_hover(&self) -> bool {
        self.session.is_suppressing()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn live_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    /// Geometry of the last resize that was redrawn.
    pub fn last_viewport(&self) -> Option<ViewportGeometry> {
        self.last_viewport
    }

    pub fn config(&self) -> &StreetConfig {
        &self.config
    }

    pub fn street(&self) -> &S {
        &self.street
    }

    pub fn street_mut(&mut self) -> &mut S {
        &mut self.street
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }
}
