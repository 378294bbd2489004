//! egui adapter for [`StreetComponent`].
//!
//! [`StreetView`] owns the host-side channels (resize, mouse leave), turns
//! egui pointer input into street events, pumps the component once per frame
//! and renders the thumbnail popup at the computed offsets. Drawing the
//! street itself is left to the draw service.

use std::time::Instant;

use eframe::egui;
use egui_phosphor::regular::HOUSE;

use crate::channels::Subject;
use crate::data::place::{Place, ViewportGeometry};
use crate::draw::StreetDrawService;
use crate::environment::Environment;
use crate::popup::{thumbnail_url, PopupLayout};
use crate::street::{StreetComponent, StreetInputs};

const CARD_HEIGHT: f32 = 96.0;
const ARROW_SIZE: f32 = 9.0;
const POPUP_GAP: f32 = 6.0;

/// [`Environment`] backed by an egui context.
#[derive(Clone)]
pub struct EguiEnvironment {
    ctx: egui::Context,
    pointer_device: bool,
}

impl EguiEnvironment {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            pointer_device: !cfg!(any(target_os = "android", target_os = "ios")),
        }
    }
}

impl Environment for EguiEnvironment {
    fn is_pointer_device(&self) -> bool {
        self.pointer_device
    }

    fn viewport_width(&self) -> f32 {
        self.ctx.input(|i| i.content_rect()).width()
    }
}

/// Street widget: allocates the street area and routes input to a component.
pub struct StreetView {
    height: f32,
    resize: Subject<ViewportGeometry>,
    mouse_leave: Subject<()>,
    last_window_width: Option<f32>,
    last_pointer_x: Option<f32>,
    popup_rect: Option<egui::Rect>,
    hovered_thumb: Option<String>,
}

impl StreetView {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            resize: Subject::new(),
            mouse_leave: Subject::new(),
            last_window_width: None,
            last_pointer_x: None,
            popup_rect: None,
            hovered_thumb: None,
        }
    }

    /// Inputs pre-wired with this view's resize and mouse-leave channels.
    pub fn inputs(&self) -> StreetInputs {
        StreetInputs::new(self.resize.clone(), self.mouse_leave.clone())
    }

    /// Allocate the street area, forward input and show the popup.
    ///
    /// Returns the allocated rectangle so the caller's draw service can
    /// paint into it.
    pub fn show<S: StreetDrawService, E: Environment>(
        &mut self,
        ui: &mut egui::Ui,
        component: &mut StreetComponent<S, E>,
    ) -> egui::Response {
        let ctx = ui.ctx().clone();
        let size = egui::vec2(ui.available_width(), self.height);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());

        let window_width = ctx.input(|i| i.content_rect()).width();
        if self
            .last_window_width
            .is_some_and(|w| (w - window_width).abs() > f32::EPSILON)
        {
            self.resize.next(ViewportGeometry {
                width: window_width,
            });
        }
        self.last_window_width = Some(window_width);

        let pointer = ctx.pointer_hover_pos();
        let over_popup = matches!((self.popup_rect, pointer), (Some(r), Some(p)) if r.contains(p));
        match response.hover_pos() {
            Some(pos) => {
                if self.last_pointer_x != Some(pos.x) {
                    self.last_pointer_x = Some(pos.x);
                    component.on_street(pos.x);
                }
            }
            None if over_popup => {}
            None => {
                if self.last_pointer_x.take().is_some() {
                    self.mouse_leave.next(());
                }
            }
        }

        let now = Instant::now();
        component.pump(now);
        if let Some(wait) = component.resize_pending(now) {
            ctx.request_repaint_after(wait);
        }

        match component.popup().cloned() {
            Some(layout) => self.show_popup(&ctx, rect, &layout, component),
            None => {
                self.popup_rect = None;
                self.hovered_thumb = None;
            }
        }
        response
    }

    fn show_popup<S: StreetDrawService, E: Environment>(
        &mut self,
        ctx: &egui::Context,
        street_rect: egui::Rect,
        layout: &PopupLayout,
        component: &mut StreetComponent<S, E>,
    ) {
        let geometry = component.config().popup;
        let slots = geometry.slots_for(layout.matched_places.len());
        let top = street_rect.top() - CARD_HEIGHT - ARROW_SIZE - POPUP_GAP;
        let card_width = geometry.slot_width - 2.0 * geometry.arrow_inset;

        let mut hovered: Option<Place> = None;
        let mut clicked: Option<Place> = None;
        let inner = egui::Area::new(egui::Id::new("street_thumbs"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(layout.left_offset, top))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for place in layout.matched_places.iter().take(slots) {
                            let label = match place.income {
                                Some(income) => format!("{HOUSE} {}\n${income:.0}", place.id),
                                None => format!("{HOUSE} {}", place.id),
                            };
                            let card = ui
                                .add_sized([card_width, CARD_HEIGHT], egui::Button::new(label))
                                .on_hover_text(thumbnail_url(&place.image));
                            if card.hovered() {
                                hovered = Some(place.clone());
                            }
                            if card.clicked() {
                                clicked = Some(place.clone());
                            }
                        }
                    });
                });
            });
        let popup_rect = inner.response.rect;
        self.popup_rect = Some(popup_rect);

        let tip_x = layout.left_offset + layout.arrow_offset;
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("street_thumb_arrow"),
        ));
        painter.add(egui::Shape::convex_polygon(
            vec![
                egui::pos2(tip_x - ARROW_SIZE, popup_rect.bottom()),
                egui::pos2(tip_x + ARROW_SIZE, popup_rect.bottom()),
                egui::pos2(tip_x, popup_rect.bottom() + ARROW_SIZE),
            ],
            ctx.style().visuals.window_fill,
            egui::Stroke::NONE,
        ));

        match (&self.hovered_thumb, &hovered) {
            (prev, Some(place)) if prev.as_deref() != Some(place.id.as_str()) => {
                component.thumb_hover(place);
            }
            (Some(_), None) => component.thumb_unhover(),
            _ => {}
        }
        self.hovered_thumb = hovered.map(|p| p.id);

        if let Some(place) = clicked {
            component.click_on_thumb(&place);
        }
    }
}
