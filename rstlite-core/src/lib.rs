//! Deterministic heuristic rhetorical-structure analysis
//!
//! This crate holds the pure part of the pipeline. Nothing here touches
//! threads, files or the clock, so the same text always produces the same
//! bytes.
//!
//! # Pipeline
//!
//! 1. [`language::detect`] classifies the text (or honours a hint)
//! 2. [`segmenter::segment`] splits it into EDUs with character spans
//! 3. [`relations::assign`] links each adjacent pair of EDUs
//! 4. [`tree::build`] folds the EDUs into a left-leaning bracket tree
//! 5. [`result::validate_with_relaxation`] checks the assembled draft
//!
//! [`graph::to_graph`] works on any bracket tree after the fact and feeds
//! the DOT and Newick renderers.
//!
//! # Example
//!
//! ```rust
//! use rstlite_core::{relations, segmenter, tree, Ruleset};
//!
//! let edus = segmenter::segment("El perro corre. El gato duerme.").unwrap();
//! let relations = relations::assign(&edus, Ruleset::Extended).unwrap();
//!
//! assert_eq!(
//!     tree::build(&edus, &relations),
//!     "(Background (Elaboration (N 1) (N 2)))"
//! );
//! ```

pub mod error;
pub mod graph;
pub mod language;
pub mod pragmatics;
pub mod relations;
pub mod result;
pub mod segmenter;
pub mod tree;
pub mod types;

pub use error::{CoreError, Result};
pub use graph::{BracketGraph, GraphEdge, GraphNode};
pub use result::{AnalysisResult, Metadata, ResultDraft, TreeDraft, ValidationError};
pub use tree::{Tree, TreeFormat};
pub use types::{Edu, Lang, Relation, RelationType, RoleChunk, Ruleset, Span};
