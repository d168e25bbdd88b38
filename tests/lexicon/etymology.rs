//! Integration tests for the etymology graph

use polyglot_foundation::{ErrorKind, WordId};
use polyglot_lexicon::EtymologyGraph;
use proptest::prelude::*;

#[test]
fn chain_has_no_loops() {
    let mut graph = EtymologyGraph::new();
    graph.add_relation(WordId(1), WordId(2)).unwrap();
    graph.add_relation(WordId(2), WordId(3)).unwrap();
    assert!(graph.words_in_loops().is_empty());
    assert!(graph.is_descendant(WordId(1), WordId(3)));
    assert!(!graph.is_descendant(WordId(3), WordId(1)));
}

#[test]
fn closing_a_loop_is_refused() {
    let mut graph = EtymologyGraph::new();
    graph.add_relation(WordId(1), WordId(2)).unwrap();
    graph.add_relation(WordId(2), WordId(3)).unwrap();
    let err = graph.add_relation(WordId(3), WordId(1)).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::EtymologicalLoop {
            parent: WordId(3),
            child: WordId(1)
        }
    );
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn unchecked_loop_is_detected() {
    let mut graph = EtymologyGraph::new();
    graph.add_relation_unchecked(WordId(1), WordId(2));
    graph.add_relation_unchecked(WordId(2), WordId(1));
    graph.add_relation_unchecked(WordId(2), WordId(5));
    assert_eq!(graph.words_in_loops(), vec![WordId(1), WordId(2)]);
}

#[test]
fn removing_a_word_clears_both_indices() {
    let mut graph = EtymologyGraph::new();
    graph.add_relation(WordId(1), WordId(2)).unwrap();
    graph.add_relation(WordId(2), WordId(3)).unwrap();
    graph.remove_word(WordId(2));
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.parents(WordId(3)).is_empty());
    assert!(graph.children(WordId(1)).is_empty());
}

proptest! {
    /// Edges that only point from lower to higher ids never form a loop.
    #[test]
    fn forward_edges_never_loop(edges in proptest::collection::vec((1u32..20, 1u32..20), 0..40)) {
        let mut graph = EtymologyGraph::new();
        for (a, b) in edges {
            if a < b {
                prop_assert!(graph.add_relation(WordId(a), WordId(b)).is_ok());
            }
        }
        prop_assert!(graph.words_in_loops().is_empty());
    }
}
