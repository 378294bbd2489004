//! Records flowing through the street view.
//!
//! A [`Place`] is owned by whoever feeds the view; the component only keeps
//! clones of the current point set for one render cycle.

use serde::{Deserialize, Serialize};

/// A single data point on the street (e.g. one household).
///
/// Deserializes from the raw record shape delivered by the places API
/// (`_id`, `income`, `image`); any further fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Income used for ordering and scaling. Records without one are kept in
    /// the set but never get a position on the scale.
    #[serde(default)]
    pub income: Option<f64>,
    /// Image reference (full-size rendition path).
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Place {
    pub fn new<S: Into<String>>(id: S, income: Option<f64>, image: S) -> Self {
        Self {
            id: id.into(),
            income,
            image: image.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Ordered sequence of places. Sorted ascending by income once stored.
pub type PlaceSet = Vec<Place>;

/// Externally chosen places (e.g. from a paired list view). May be empty.
pub type ChosenSet = Vec<Place>;

/// Income window selected on the street, relayed to `filterStreet` consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeFilter {
    pub low_income: f64,
    #[serde(alias = "hightIncome")]
    pub high_income: f64,
}

/// Size of the containing window in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportGeometry {
    pub width: f32,
}

/// Navigation request emitted when a thumbnail is activated without a slider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbRoute {
    /// Context token of the hosting view (the "thing" being compared).
    pub context: String,
    pub place_id: String,
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_deserializes_from_api_record() {
        let json = r#"{"_id":"p1","income":120.5,"image":"img/desktops/a.jpg","country":"Peru"}"#;
        let p: Place = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "p1");
        assert_eq!(p.income, Some(120.5));
        assert_eq!(p.image, "img/desktops/a.jpg");
        assert_eq!(p.extra.get("country").and_then(|v| v.as_str()), Some("Peru"));
    }

    #[test]
    fn place_without_income_is_accepted() {
        let p: Place = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert_eq!(p.income, None);
        assert!(p.image.is_empty());
    }

    #[test]
    fn income_filter_accepts_legacy_high_key() {
        let f: IncomeFilter =
            serde_json::from_str(r#"{"lowIncome":30,"hightIncome":9000}"#).unwrap();
        assert_eq!(f.high_income, 9000.0);
        let out = serde_json::to_string(&f).unwrap();
        assert!(out.contains("highIncome"));
    }
}
