//! Demo: an income street with a paired selection list.
//!
//! Run with `cargo run --bin street_demo`. Hover the street to open the
//! thumbnail popup, pick places in the side list to choose them, and watch
//! the hover/filter/navigation channels in the bottom bar.

use eframe::egui;
use streetplot::ui::EguiEnvironment;
use streetplot::{
    HouseCategory, IncomeFilter, Place, PlaceSet, PointerMatch, StreetComponent, StreetConfig,
    StreetDrawService, StreetState, StreetView, Subject, Subscription, ThumbRoute,
};

const STREET_HEIGHT: f32 = 80.0;
const MATCH_RADIUS: f32 = 12.0;

/// Minimal draw service painting the street with egui shapes.
struct DemoStreet {
    rect: egui::Rect,
    state: StreetState,
    domain: Option<(f64, f64)>,
    houses: Vec<(HouseCategory, Place)>,
    filter: Subject<IncomeFilter>,
}

impl DemoStreet {
    fn new() -> Self {
        Self {
            rect: egui::Rect::NOTHING,
            state: StreetState::default(),
            domain: None,
            houses: Vec::new(),
            filter: Subject::new(),
        }
    }

    fn place_x(&self, place: &Place) -> Option<f32> {
        place
            .income
            .and_then(|i| self.scale(i))
            .map(|x| self.rect.left() + x as f32)
    }

    fn paint(&mut self, painter: &egui::Painter, rect: egui::Rect) {
        self.rect = rect;
        let baseline = rect.center().y;
        painter.hline(rect.x_range(), baseline, egui::Stroke::new(2.0, egui::Color32::GRAY));
        for place in &self.state.places {
            if let Some(x) = self.place_x(place) {
                painter.circle_filled(egui::pos2(x, baseline), 3.0, egui::Color32::LIGHT_GRAY);
            }
        }
        for (category, place) in &self.houses {
            let color = match category {
                HouseCategory::Chosen => egui::Color32::from_rgb(80, 160, 240),
                HouseCategory::Hover => egui::Color32::from_rgb(240, 120, 60),
            };
            if let Some(x) = self.place_x(place) {
                painter.circle_filled(egui::pos2(x, baseline - 14.0), 7.0, color);
            }
        }
    }
}

impl StreetDrawService for DemoStreet {
    type Surface = egui::Rect;

    fn set_surface(&mut self, surface: egui::Rect) {
        self.rect = surface;
    }

    fn clear_surface(&mut self) -> &mut Self {
        self.houses.clear();
        self
    }

    fn initialize(&mut self) -> &mut Self {
        self.domain = None;
        self
    }

    fn draw_scale(&mut self, places: &[Place], _show_slider_hint: bool) -> &mut Self {
        let incomes = places.iter().filter_map(|p| p.income);
        self.domain = incomes.fold(None, |acc, i| match acc {
            None => Some((i, i)),
            Some((lo, hi)) => Some((lo.min(i), hi.max(i))),
        });
        if let Some((lo, hi)) = self.domain {
            self.filter.next(IncomeFilter {
                low_income: lo,
                high_income: hi,
            });
        }
        self
    }

    fn state(&self) -> &StreetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StreetState {
        &mut self.state
    }

    fn scale(&self, income: f64) -> Option<f64> {
        let (lo, hi) = self.domain?;
        if income <= 0.0 || lo <= 0.0 {
            return None;
        }
        let span = (hi.ln() - lo.ln()).max(f64::EPSILON);
        Some((income.ln() - lo.ln()) / span * self.rect.width() as f64)
    }

    fn clear_and_redraw(&mut self, chosen: &[Place], _slider_driven: bool) {
        self.houses.retain(|(c, _)| *c != HouseCategory::Chosen);
        self.houses
            .extend(chosen.iter().cloned().map(|p| (HouseCategory::Chosen, p)));
    }

    fn remove_houses(&mut self, category: HouseCategory) {
        self.houses.retain(|(c, _)| *c != category);
    }

    fn draw_hover_house(&mut self, place: &Place) {
        self.houses.push((HouseCategory::Hover, place.clone()));
    }

    fn on_pointer_move(&mut self, cursor_x: f32) -> Option<PointerMatch> {
        let near: Vec<(f32, Place)> = self
            .state
            .places
            .iter()
            .filter_map(|p| self.place_x(p).map(|x| (x, p.clone())))
            .filter(|(x, _)| (x - cursor_x).abs() <= MATCH_RADIUS)
            .collect();
        if near.is_empty() {
            return None;
        }
        let anchor_x = near.iter().map(|(x, _)| x).sum::<f32>() / near.len() as f32;
        Some(PointerMatch {
            places: near.into_iter().map(|(_, p)| p).collect(),
            anchor_x,
        })
    }

    fn filter(&self) -> &Subject<IncomeFilter> {
        &self.filter
    }

    fn income_bounds(&self) -> IncomeFilter {
        let (low_income, high_income) = self.domain.unwrap_or((0.0, 15_000.0));
        IncomeFilter {
            low_income,
            high_income,
        }
    }
}

fn demo_places() -> PlaceSet {
    // Deterministic spread of incomes between roughly $30 and $10k per month.
    (0..60u32)
        .map(|i| {
            let t = ((i * 37) % 60) as f64 / 59.0;
            let income = 30.0 * (10_000.0f64 / 30.0).powf(t);
            Place::new(
                format!("home-{i:02}"),
                Some(income.round()),
                format!("media/desktops/home-{i:02}.jpg"),
            )
        })
        .collect()
}

struct DemoApp {
    component: StreetComponent<DemoStreet, EguiEnvironment>,
    view: StreetView,
    chosen: Subject<PlaceSet>,
    hover: Subject<Option<Place>>,
    hover_sub: Subscription<Option<Place>>,
    filter_sub: Subscription<IncomeFilter>,
    nav_sub: Subscription<ThumbRoute>,
    catalogue: PlaceSet,
    list_hover: Option<String>,
    last_hover: Option<Place>,
    last_filter: Option<IncomeFilter>,
    last_route: Option<ThumbRoute>,
}

impl DemoApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let places = Subject::new();
        let chosen = Subject::new();
        let hover = Subject::new();
        let view = StreetView::new(STREET_HEIGHT);
        let inputs = view
            .inputs()
            .with_places(places.clone())
            .with_chosen_places(chosen.clone())
            .with_hover_place(hover.clone());
        let config = StreetConfig {
            context: "homes".to_string(),
            ..StreetConfig::default()
        };
        let mut component = StreetComponent::new(
            DemoStreet::new(),
            EguiEnvironment::new(&cc.egui_ctx),
            inputs,
            config,
        );
        let hover_sub = hover.subscribe();
        let filter_sub = component.filter_street().subscribe();
        let nav_sub = component.navigation().subscribe();

        let surface = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, STREET_HEIGHT));
        if let Err(e) = component.init(Some(surface)) {
            tracing::error!("street init failed: {e}");
        }
        let catalogue = demo_places();
        places.next(catalogue.clone());

        Self {
            component,
            view,
            chosen,
            hover,
            hover_sub,
            filter_sub,
            nav_sub,
            catalogue,
            list_hover: None,
            last_hover: None,
            last_filter: None,
            last_route: None,
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Some(h) = self.hover_sub.try_next() {
            self.last_hover = h;
        }
        while let Some(f) = self.filter_sub.try_next() {
            self.last_filter = Some(f);
        }
        while let Some(r) = self.nav_sub.try_next() {
            tracing::info!(place = %r.place_id, "navigate");
            self.last_route = Some(r);
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "hover: {}",
                    self.last_hover.as_ref().map_or("-", |p| p.id.as_str())
                ));
                ui.separator();
                if let Some(f) = self.last_filter {
                    ui.label(format!("filter: ${:.0} .. ${:.0}", f.low_income, f.high_income));
                }
                ui.separator();
                if let Some(r) = &self.last_route {
                    ui.label(format!("navigate: {}/{}", r.context, r.place_id));
                }
            });
        });

        egui::SidePanel::left("places").show(ctx, |ui| {
            ui.heading("Places");
            let mut hovered: Option<&Place> = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                for place in &self.catalogue {
                    let label = format!("{} (${:.0})", place.id, place.income.unwrap_or_default());
                    let resp = ui.selectable_label(false, label);
                    if resp.clicked() {
                        self.chosen.next(vec![place.clone()]);
                    }
                    if resp.hovered() {
                        hovered = Some(place);
                    }
                }
            });
            let hovered_id = hovered.map(|p| p.id.clone());
            if hovered_id != self.list_hover {
                self.hover.next(hovered.cloned());
                self.list_hover = hovered_id;
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(140.0);
            let response = self.view.show(ui, &mut self.component);
            let painter = ui.painter_at(response.rect);
            self.component.street_mut().paint(&painter, response.rect);
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(16));
    }
}

impl Drop for DemoApp {
    fn drop(&mut self) {
        self.component.teardown();
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 520.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Street",
        options,
        Box::new(|cc| Ok(Box::new(DemoApp::new(cc)))),
    )
}
