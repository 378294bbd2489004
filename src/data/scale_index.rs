//! Sorted, scaled income index of the current place set.
//!
//! Rebuilt from scratch on every points emission and on every resize; never
//! patched in place.

use std::cmp::Ordering;

use super::place::{Place, PlaceSet};

/// One scaled position per place that has a mappable income, in ascending
/// income order. Places without a position are compacted out, not filled.
pub type ScaledIncomeIndex = Vec<f64>;

/// A sorted place set together with its scaled income positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleIndex {
    pub places: PlaceSet,
    pub scaled: ScaledIncomeIndex,
}

impl ScaleIndex {
    /// Sort `places` by income and map each income through `scale`.
    pub fn build(places: &[Place], scale: impl Fn(f64) -> Option<f64>) -> Self {
        let places = sort_places(places);
        let scaled = scaled_positions(&places, scale);
        Self { places, scaled }
    }
}

/// Ascending stable sort by income. Places without an income go last.
pub fn sort_places(places: &[Place]) -> PlaceSet {
    let mut sorted = places.to_vec();
    sorted.sort_by(|a, b| income_order(a.income, b.income));
    sorted
}

/// Sort `points` and map every defined income through `scale`.
///
/// Entries with no income, or whose mapping fails or is not finite, are
/// dropped. The output keeps the sorted order of the remaining entries.
pub fn compute_scaled_income_index(
    points: &[Place],
    scale: impl Fn(f64) -> Option<f64>,
) -> ScaledIncomeIndex {
    scaled_positions(&sort_places(points), scale)
}

fn scaled_positions(sorted: &[Place], scale: impl Fn(f64) -> Option<f64>) -> ScaledIncomeIndex {
    sorted
        .iter()
        .filter_map(|p| p.income)
        .filter_map(scale)
        .filter(|pos| pos.is_finite())
        .collect()
}

fn income_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, income: Option<f64>) -> Place {
        Place::new(id, income, "")
    }

    #[test]
    fn sorts_ascending_and_keeps_ties_stable() {
        let input = vec![
            place("c", Some(30.0)),
            place("a", Some(10.0)),
            place("b1", Some(20.0)),
            place("b2", Some(20.0)),
        ];
        let ids: Vec<_> = sort_places(&input).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b1", "b2", "c"]);
    }

    #[test]
    fn missing_incomes_sort_last_and_are_compacted() {
        let input = vec![place("none", None), place("hi", Some(50.0)), place("lo", Some(5.0))];
        let idx = ScaleIndex::build(&input, |i| Some(i * 2.0));
        assert_eq!(idx.places.last().map(|p| p.id.as_str()), Some("none"));
        assert_eq!(idx.scaled, vec![10.0, 100.0]);
    }

    #[test]
    fn failed_mappings_are_dropped_not_substituted() {
        let input = vec![place("a", Some(1.0)), place("b", Some(-1.0)), place("c", Some(4.0))];
        let scaled = compute_scaled_income_index(&input, |i| if i < 0.0 { None } else { Some(i.sqrt()) });
        assert_eq!(scaled, vec![1.0, 2.0]);
    }

    #[test]
    fn zero_position_is_kept() {
        let scaled = compute_scaled_income_index(&[place("a", Some(0.0))], Some);
        assert_eq!(scaled, vec![0.0]);
    }

    #[test]
    fn empty_input_yields_empty_index() {
        let idx = ScaleIndex::build(&[], Some);
        assert!(idx.places.is_empty());
        assert!(idx.scaled.is_empty());
    }
}
