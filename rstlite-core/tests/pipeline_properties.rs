//! Property tests over the segment → assign → build → graph pipeline

use proptest::prelude::*;
use rstlite_core::{graph, language, relations, segmenter, tree, Lang, RelationType, Ruleset};

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z ñ¿¡.!?\n]{1,160}".prop_filter("needs non-blank text", |s| !s.trim().is_empty())
}

fn sentences(count: usize) -> String {
    (0..count)
        .map(|i| format!("Sentence {i}."))
        .collect::<Vec<_>>()
        .join(" ")
}

proptest! {
    #[test]
    fn segmentation_covers_every_input(raw in text_strategy()) {
        let text = raw.trim();
        let edus = segmenter::segment(text).unwrap();

        prop_assert!(!edus.is_empty());
        for (expected, edu) in (1u32..).zip(&edus) {
            prop_assert_eq!(edu.id(), expected);
            prop_assert!(!edu.text().trim().is_empty());
        }
        for pair in edus.windows(2) {
            prop_assert!(pair[0].span().start() <= pair[1].span().start());
        }
    }

    #[test]
    fn relation_count_is_pairs(raw in text_strategy(), extended in any::<bool>()) {
        let ruleset = if extended { Ruleset::Extended } else { Ruleset::Minimal };
        let edus = segmenter::segment(raw.trim()).unwrap();
        let assigned = relations::assign(&edus, ruleset).unwrap();

        prop_assert_eq!(assigned.len(), edus.len().saturating_sub(1));
        if ruleset == Ruleset::Minimal {
            prop_assert!(assigned.iter().all(|r| r.kind() == RelationType::GENERIC));
        }
    }

    #[test]
    fn built_trees_are_balanced_and_parse(raw in text_strategy()) {
        let edus = segmenter::segment(raw.trim()).unwrap();
        let assigned = relations::assign(&edus, Ruleset::Extended).unwrap();
        let value = tree::build(&edus, &assigned);

        let opens = value.matches('(').count();
        prop_assert_eq!(opens, value.matches(')').count());
        prop_assert!(tree::check_syntax(tree::TreeFormat::Brackets, &value).is_ok());

        let graph = graph::to_graph(&value);
        prop_assert_eq!(graph.node_count(), opens);
        prop_assert_eq!(graph.edge_count(), opens - 1);
        prop_assert_eq!(graph.roots.len(), 1);
    }

    #[test]
    fn graph_emission_never_fails(garbage in "[()A-Za-z0-9 ]{0,80}") {
        let graph = graph::to_graph(&garbage);
        prop_assert!(graph.node_count() <= garbage.len());
        prop_assert!(graph.to_dot().starts_with("digraph RST {"), "dot output must start with the digraph header");
        let _ = graph.to_newick();
    }

    #[test]
    fn extended_shows_full_cycle(count in (RelationType::ALL.len() + 1)..40usize) {
        let edus = segmenter::segment(&sentences(count)).unwrap();
        prop_assert_eq!(edus.len(), count);

        let assigned = relations::assign(&edus, Ruleset::Extended).unwrap();
        let kinds: Vec<RelationType> = assigned.iter().map(|r| r.kind()).collect();
        prop_assert_eq!(&kinds[..RelationType::ALL.len()], &RelationType::ALL[..]);
    }
}

#[test]
fn deep_trees_do_not_exhaust_the_stack() {
    let edus = segmenter::segment(&sentences(3_000)).unwrap();
    let assigned = relations::assign(&edus, Ruleset::Extended).unwrap();
    let value = tree::build(&edus, &assigned);

    let graph = graph::to_graph(&value);
    assert_eq!(graph.node_count(), 2 * 3_000);
    assert!(graph.to_newick().starts_with("((((("));
}

#[test]
fn spanish_scenario() {
    let text = "El perro corre. El gato duerme.";
    assert_eq!(language::detect(text, Some(Lang::Auto)), Lang::Es);

    let edus = segmenter::segment(text).unwrap();
    let assigned = relations::assign(&edus, Ruleset::Extended).unwrap();
    assert_eq!(edus.len(), 2);
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].kind(), RelationType::ALL[0]);
    assert_eq!(
        tree::build(&edus, &assigned),
        "(Background (Elaboration (N 1) (N 2)))"
    );
}
