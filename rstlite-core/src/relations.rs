//! Relation assignment between adjacent EDUs

use crate::error::Result;
use crate::types::{Edu, Relation, RelationType, RoleChunk, Ruleset};

/// Confidence attached to every heuristic relation
pub const HEURISTIC_CONFIDENCE: f64 = 0.6;

/// Relation type for the pair at `index` under `ruleset`
///
/// `Minimal` always yields the generic type; `Extended` walks the
/// enumeration in order and wraps around after the last member.
pub fn relation_type_at(ruleset: Ruleset, index: usize) -> RelationType {
    match ruleset {
        Ruleset::Minimal => RelationType::GENERIC,
        Ruleset::Extended => RelationType::ALL[index % RelationType::ALL.len()],
    }
}

/// One relation per adjacent pair, nucleus first
///
/// Produces `max(0, edus.len() - 1)` relations.
pub fn assign(edus: &[Edu], ruleset: Ruleset) -> Result<Vec<Relation>> {
    edus.windows(2)
        .enumerate()
        .map(|(index, pair)| {
            Relation::new(
                relation_type_at(ruleset, index),
                RoleChunk::single(pair[0].id())?,
                RoleChunk::single(pair[1].id())?,
                HEURISTIC_CONFIDENCE,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::segment;

    #[test]
    fn test_no_relations_for_single_edu() {
        let edus = segment("Only one.").unwrap();
        assert!(assign(&edus, Ruleset::Extended).unwrap().is_empty());
    }

    #[test]
    fn test_adjacent_pairs() {
        let edus = segment("A. B. C.").unwrap();
        let relations = assign(&edus, Ruleset::Extended).unwrap();

        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].nucleus().edu_ids(), &[1]);
        assert_eq!(relations[0].satellite().edu_ids(), &[2]);
        assert_eq!(relations[1].nucleus().edu_ids(), &[2]);
        assert_eq!(relations[1].satellite().edu_ids(), &[3]);
        assert!(relations
            .iter()
            .all(|r| r.confidence() == HEURISTIC_CONFIDENCE));
    }

    #[test]
    fn test_minimal_is_constant() {
        let edus = segment("A. B. C. D.").unwrap();
        let relations = assign(&edus, Ruleset::Minimal).unwrap();
        assert!(relations
            .iter()
            .all(|r| r.kind() == RelationType::Elaboration));
    }

    #[test]
    fn test_extended_wraps_around() {
        let count = RelationType::ALL.len();
        assert_eq!(relation_type_at(Ruleset::Extended, 0), RelationType::Elaboration);
        assert_eq!(relation_type_at(Ruleset::Extended, 1), RelationType::Evidence);
        assert_eq!(
            relation_type_at(Ruleset::Extended, count - 1),
            RelationType::Circumstance
        );
        assert_eq!(
            relation_type_at(Ruleset::Extended, count),
            RelationType::Elaboration
        );
    }
}
