//! streetplot crate root: re-exports and module wiring.
//!
//! The crate coordinates an income-ordered "street" view with the channels
//! around it:
//! - `data`: places and the sorted, scaled income index
//! - `channels`: broadcast subjects and scoped subscriptions
//! - `draw`: the drawing-service contract the street renders through
//! - `popup`: thumbnail popup placement
//! - `hover`: pointer session state (street vs. popup)
//! - `street`: the component tying it all together
//! - `ui`: egui adapter

pub mod channels;
pub mod config;
pub mod data;
pub mod debounce;
pub mod draw;
pub mod environment;
pub mod error;
pub mod hover;
pub mod popup;
pub mod street;
pub mod ui;

// Public re-exports for a compact external API
pub use channels::{Subject, Subscription, SubscriptionHandle, SubscriptionSet};
pub use config::StreetConfig;
pub use data::place::{ChosenSet, IncomeFilter, Place, PlaceSet, ThumbRoute, ViewportGeometry};
pub use data::scale_index::{compute_scaled_income_index, sort_places, ScaleIndex, ScaledIncomeIndex};
pub use debounce::Debouncer;
pub use draw::{HouseCategory, PointerMatch, StreetDrawService, StreetState};
pub use environment::{Environment, FixedEnvironment};
pub use error::{Result, StreetError};
pub use hover::{HoverPhase, HoverSession};
pub use popup::{compute_popup_layout, thumbnail_url, PopupGeometry, PopupLayout};
pub use street::{Channel, StreetComponent, StreetInputs};
pub use ui::{EguiEnvironment, StreetView};
