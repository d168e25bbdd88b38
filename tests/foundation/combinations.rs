//! Integration tests for combination ids

use polyglot_foundation::{CombinationId, DeclensionId, DimensionId};
use proptest::prelude::*;

#[test]
fn dimensional_round_trip() {
    let id = CombinationId::from_dimensions(&[DimensionId(2), DimensionId(11)]);
    assert_eq!(id.as_str(), ",2,11,");
    assert!(!id.is_singleton());
    assert_eq!(id.dimensions(), Some(vec![DimensionId(2), DimensionId(11)]));
    assert_eq!(id.dimension_at(1), Some(DimensionId(11)));
    assert_eq!(id.dimension_at(2), None);
}

#[test]
fn singleton_has_no_dimensions() {
    let id = CombinationId::singleton(DeclensionId(4));
    assert_eq!(id.to_string(), "#4");
    assert!(id.is_singleton());
    assert_eq!(id.dimensions(), None);
}

#[test]
fn malformed_ids_have_no_dimensions() {
    assert_eq!(CombinationId::new(",a,").dimensions(), None);
    assert_eq!(CombinationId::new("1,2").dimensions(), None);
    assert_eq!(CombinationId::new(",,").dimensions(), Some(Vec::new()));
}

proptest! {
    #[test]
    fn dimensions_parse_back(raw in proptest::collection::vec(0u32..10_000, 1..6)) {
        let dims: Vec<DimensionId> = raw.iter().copied().map(DimensionId).collect();
        let id = CombinationId::from_dimensions(&dims);
        prop_assert_eq!(id.dimensions(), Some(dims));
    }
}
