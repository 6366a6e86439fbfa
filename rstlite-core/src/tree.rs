//! Binary tree construction and the `Tree` value
//!
//! The builder folds the EDU sequence from the left: the first two leaves
//! are merged, the merged node is merged with the third leaf, and so on.
//! Interior labels come from a cursor over the already assigned relations
//! that wraps to the start when it runs out. That cursor is independent of
//! the one used during assignment, so labels only line up with `relations`
//! while the two lists have the same length.

use crate::error::{CoreError, Result};
use crate::graph;
use crate::types::{Edu, Relation, RelationType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tree produced for an empty EDU sequence
pub const EMPTY_TREE: &str = "(Summary)";

/// Tree substituted by the relaxation pass when a draft has none
pub const MINIMAL_TREE: &str = "(Summary (N 1))";

/// Label wrapping the whole tree
pub const ROOT_LABEL: &str = "Background";

/// Role written on every leaf
pub const LEAF_ROLE: &str = "N";

/// Render one EDU leaf
pub fn leaf(edu_id: u32) -> String {
    format!("({LEAF_ROLE} {edu_id})")
}

/// Label for the merge at position `merge` (0-based)
///
/// Falls back to the generic relation when there are no relations at all.
pub fn merge_label(relations: &[Relation], merge: usize) -> RelationType {
    if relations.is_empty() {
        RelationType::GENERIC
    } else {
        relations[merge % relations.len()].kind()
    }
}

/// Reduce `edus` into a left-leaning bracket tree
pub fn build(edus: &[Edu], relations: &[Relation]) -> String {
    let mut leaves = edus.iter().map(|edu| leaf(edu.id()));
    let Some(first) = leaves.next() else {
        return EMPTY_TREE.to_string();
    };

    let merged = leaves.enumerate().fold(first, |left, (merge, right)| {
        format!("({} {left} {right})", merge_label(relations, merge))
    });

    format!("({ROOT_LABEL} {merged})")
}

/// Serialization formats a tree value may be declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeFormat {
    /// `(label child*)` notation
    #[default]
    Brackets,
    /// `(child,child)label` notation
    Newick,
}

impl TreeFormat {
    /// Format name
    pub fn name(&self) -> &'static str {
        match self {
            TreeFormat::Brackets => "brackets",
            TreeFormat::Newick => "newick",
        }
    }
}

impl fmt::Display for TreeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "brackets" => Ok(TreeFormat::Brackets),
            "newick" => Ok(TreeFormat::Newick),
            _ => Err(CoreError::UnknownTreeFormat(s.to_string())),
        }
    }
}

/// A serialized tree together with its declared format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TreeRepr")]
pub struct Tree {
    format: TreeFormat,
    value: String,
}

#[derive(Deserialize)]
struct TreeRepr {
    format: TreeFormat,
    value: String,
}

impl TryFrom<TreeRepr> for Tree {
    type Error = CoreError;

    fn try_from(repr: TreeRepr) -> Result<Self> {
        Tree::new(repr.format, repr.value)
    }
}

impl Tree {
    /// Create a tree, checking the value against its format
    pub fn new(format: TreeFormat, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_syntax(format, &value)?;
        Ok(Self { format, value })
    }

    /// Bracket-notation tree
    pub fn brackets(value: impl Into<String>) -> Result<Self> {
        Self::new(TreeFormat::Brackets, value)
    }

    /// Newick tree
    pub fn newick(value: impl Into<String>) -> Result<Self> {
        Self::new(TreeFormat::Newick, value)
    }

    /// Declared format
    pub fn format(&self) -> TreeFormat {
        self.format
    }

    /// Serialized tree
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Same tree in Newick notation
    pub fn to_newick(&self) -> Result<Tree> {
        match self.format {
            TreeFormat::Newick => Ok(self.clone()),
            TreeFormat::Brackets => Tree::newick(graph::to_graph(&self.value).to_newick()),
        }
    }
}

/// Check that `value` is well formed under `format`
pub fn check_syntax(format: TreeFormat, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyTree);
    }

    let malformed = |reason: &str| CoreError::MalformedTree {
        format: format.name(),
        reason: reason.to_string(),
    };

    let mut depth: usize = 0;
    for ch in trimmed.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed("closing parenthesis without an opening one"))?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(malformed("unterminated parenthesis"));
    }

    if format == TreeFormat::Brackets && !(trimmed.starts_with('(') && trimmed.ends_with(')')) {
        return Err(malformed("expected a parenthesized expression"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::assign;
    use crate::segmenter::segment;
    use crate::types::{RoleChunk, Ruleset};

    #[test]
    fn test_empty_sequence() {
        assert_eq!(build(&[], &[]), EMPTY_TREE);
    }

    #[test]
    fn test_single_edu() {
        let edus = segment("One.").unwrap();
        assert_eq!(build(&edus, &[]), "(Background (N 1))");
    }

    #[test]
    fn test_two_edus() {
        let edus = segment("El perro corre. El gato duerme.").unwrap();
        let relations = assign(&edus, Ruleset::Extended).unwrap();
        assert_eq!(
            build(&edus, &relations),
            "(Background (Elaboration (N 1) (N 2)))"
        );
    }

    #[test]
    fn test_left_leaning_with_rotating_labels() {
        let edus = segment("A. B. C. D.").unwrap();
        let relations = assign(&edus, Ruleset::Extended).unwrap();
        assert_eq!(
            build(&edus, &relations),
            "(Background (Justify (Evidence (Elaboration (N 1) (N 2)) (N 3)) (N 4)))"
        );
    }

    #[test]
    fn test_label_cursor_wraps_over_short_relation_list() {
        let edus = segment("A. B. C. D.").unwrap();
        let only = Relation::new(
            RelationType::Contrast,
            RoleChunk::single(1).unwrap(),
            RoleChunk::single(2).unwrap(),
            0.6,
        )
        .unwrap();
        assert_eq!(
            build(&edus, &[only]),
            "(Background (Contrast (Contrast (Contrast (N 1) (N 2)) (N 3)) (N 4)))"
        );
    }

    #[test]
    fn test_default_label_without_relations() {
        let edus = segment("A. B.").unwrap();
        assert_eq!(
            build(&edus, &[]),
            "(Background (Elaboration (N 1) (N 2)))"
        );
    }

    #[test]
    fn test_tree_syntax_checks() {
        assert!(Tree::brackets(MINIMAL_TREE).is_ok());
        assert!(Tree::brackets(EMPTY_TREE).is_ok());
        assert_eq!(Tree::brackets(""), Err(CoreError::EmptyTree));
        assert_eq!(Tree::brackets("   "), Err(CoreError::EmptyTree));
        assert!(Tree::brackets("(A (B)").is_err());
        assert!(Tree::brackets("(A))(").is_err());
        assert!(Tree::brackets("A B").is_err());
        assert!(Tree::newick("(EDU1,EDU2)Elaboration").is_ok());
        assert!(Tree::newick("(EDU1,EDU2").is_err());
    }

    #[test]
    fn test_to_newick() {
        let tree = Tree::brackets("(Background (Elaboration (N 1) (N 2)))").unwrap();
        let newick = tree.to_newick().unwrap();
        assert_eq!(newick.format(), TreeFormat::Newick);
        assert_eq!(newick.value(), "((EDU1,EDU2)Elaboration)Background");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("newick".parse::<TreeFormat>().unwrap(), TreeFormat::Newick);
        assert!("dot".parse::<TreeFormat>().is_err());
    }
}
