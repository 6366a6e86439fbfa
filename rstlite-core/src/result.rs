//! Analysis results and their validation
//!
//! A [`ResultDraft`] is the loosely assembled form of a result: relations
//! and tree may be missing, the language and metadata are not yet checked.
//! [`validate`] turns a draft into an [`AnalysisResult`] or reports the
//! first invariant it breaks. [`validate_with_relaxation`] adds the single
//! repair path: a draft that only lacks relations or a tree is patched with
//! defaults and validated once more.

use crate::error::CoreError;
use crate::tree::{Tree, TreeFormat, MINIMAL_TREE};
use crate::types::{Edu, Lang, Relation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Free-form result metadata, kept ordered for stable serialization
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Invariant violations found while validating a draft
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// `relations` is absent
    #[error("relations are missing")]
    MissingRelations,

    /// `tree` is absent
    #[error("tree is missing")]
    MissingTree,

    /// `tree.value` is empty or blank
    #[error("tree value is empty")]
    EmptyTree,

    /// `tree` is present but does not check out
    #[error("invalid tree: {0}")]
    InvalidTree(#[source] CoreError),

    /// Result has no EDUs
    #[error("result must contain at least one EDU")]
    NoEdus,

    /// EDU ids are not exactly `1..=N` in order
    #[error("EDU at position {position} has id {found}, expected {expected}")]
    NonContiguousEduIds {
        /// 0-based position in the EDU list
        position: usize,
        /// Id found there
        found: u32,
        /// Id required there
        expected: u32,
    },

    /// `lang` is not one of es, en, auto
    #[error("invalid lang: {0}")]
    InvalidLang(#[source] CoreError),

    /// `metadata` is not a JSON object
    #[error("metadata must be a key/value mapping, got {0}")]
    MetadataNotMapping(String),
}

impl ValidationError {
    /// Whether the relaxation pass can repair this failure
    pub fn is_relaxable(&self) -> bool {
        matches!(
            self,
            ValidationError::MissingRelations
                | ValidationError::MissingTree
                | ValidationError::EmptyTree
        )
    }
}

/// Tree as found in a draft: format and value not yet checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDraft {
    /// Declared format name
    pub format: String,
    /// Serialized tree
    pub value: String,
}

impl TreeDraft {
    /// Bracket-notation draft
    pub fn brackets(value: impl Into<String>) -> Self {
        Self {
            format: TreeFormat::Brackets.name().to_string(),
            value: value.into(),
        }
    }
}

impl From<Tree> for TreeDraft {
    fn from(tree: Tree) -> Self {
        Self {
            format: tree.format().name().to_string(),
            value: tree.value().to_string(),
        }
    }
}

fn empty_mapping() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Result before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDraft {
    /// Content fingerprint
    pub id: String,
    /// Language code
    pub lang: String,
    /// Segmented units
    #[serde(default)]
    pub edus: Vec<Edu>,
    /// Relations, if any were assigned
    #[serde(default)]
    pub relations: Option<Vec<Relation>>,
    /// Tree, if one was built
    #[serde(default)]
    pub tree: Option<TreeDraft>,
    /// Short summary
    #[serde(default)]
    pub pragmatic_summary: String,
    /// Must be a JSON object
    #[serde(default = "empty_mapping")]
    pub metadata: serde_json::Value,
}

/// Validated analysis of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResultDraft")]
pub struct AnalysisResult {
    id: String,
    lang: Lang,
    edus: Vec<Edu>,
    relations: Vec<Relation>,
    tree: Tree,
    pragmatic_summary: String,
    metadata: Metadata,
}

impl TryFrom<ResultDraft> for AnalysisResult {
    type Error = ValidationError;

    fn try_from(draft: ResultDraft) -> Result<Self, Self::Error> {
        validate(&draft)
    }
}

impl AnalysisResult {
    /// Content fingerprint
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Detected or requested language
    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Segmented units, ids `1..=N`
    pub fn edus(&self) -> &[Edu] {
        &self.edus
    }

    /// Relations between adjacent units
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Discourse tree
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Short summary of the text
    pub fn pragmatic_summary(&self) -> &str {
        &self.pragmatic_summary
    }

    /// Ordered metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Same result with the tree re-encoded as Newick
    pub fn with_newick_tree(mut self) -> Result<Self, CoreError> {
        self.tree = self.tree.to_newick()?;
        Ok(self)
    }
}

/// Check every invariant of `draft`, stopping at the first violation
pub fn validate(draft: &ResultDraft) -> Result<AnalysisResult, ValidationError> {
    let relations = draft
        .relations
        .clone()
        .ok_or(ValidationError::MissingRelations)?;

    let tree = draft.tree.as_ref().ok_or(ValidationError::MissingTree)?;
    if tree.value.trim().is_empty() {
        return Err(ValidationError::EmptyTree);
    }
    let format: TreeFormat = tree.format.parse().map_err(ValidationError::InvalidTree)?;
    let tree = Tree::new(format, tree.value.clone()).map_err(ValidationError::InvalidTree)?;

    if draft.edus.is_empty() {
        return Err(ValidationError::NoEdus);
    }
    for (position, (expected, edu)) in (1u32..).zip(&draft.edus).enumerate() {
        if edu.id() != expected {
            return Err(ValidationError::NonContiguousEduIds {
                position,
                found: edu.id(),
                expected,
            });
        }
    }

    let lang: Lang = draft.lang.parse().map_err(ValidationError::InvalidLang)?;

    let metadata = match &draft.metadata {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        other => return Err(ValidationError::MetadataNotMapping(kind_of(other).into())),
    };

    Ok(AnalysisResult {
        id: draft.id.clone(),
        lang,
        edus: draft.edus.clone(),
        relations,
        tree,
        pragmatic_summary: draft.pragmatic_summary.clone(),
        metadata,
    })
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Fill in missing relations and a missing or empty tree
pub fn relax(mut draft: ResultDraft) -> ResultDraft {
    if draft.relations.is_none() {
        draft.relations = Some(Vec::new());
    }
    let tree_missing = draft
        .tree
        .as_ref()
        .map_or(true, |tree| tree.value.trim().is_empty());
    if tree_missing {
        draft.tree = Some(TreeDraft::brackets(MINIMAL_TREE));
    }
    draft
}

/// Validate, relaxing and retrying exactly once on a repairable failure
pub fn validate_with_relaxation(draft: ResultDraft) -> Result<AnalysisResult, ValidationError> {
    match validate(&draft) {
        Ok(result) => Ok(result),
        Err(err) if err.is_relaxable() => {
            log::debug!("draft {} failed validation ({err}); relaxing once", draft.id);
            validate(&relax(draft))
        }
        Err(err) => Err(err),
    }
}
