//! Value types shared by every stage of the analysis
//!
//! Each type validates its own invariants when it is built, either through
//! its constructor or through deserialization (which is routed through the
//! same constructor). A value that exists is therefore a valid value.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character range `[start, end)` into the trimmed source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SpanRepr")]
pub struct Span {
    start: usize,
    end: usize,
}

#[derive(Deserialize)]
struct SpanRepr {
    start: usize,
    end: usize,
}

impl TryFrom<SpanRepr> for Span {
    type Error = CoreError;

    fn try_from(repr: SpanRepr) -> Result<Self> {
        Span::new(repr.start, repr.end)
    }
}

impl Span {
    /// Create a span, rejecting `end < start`
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if end < start {
            return Err(CoreError::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Start offset (inclusive), in characters
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive), in characters
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no characters
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Elementary discourse unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EduRepr")]
pub struct Edu {
    id: u32,
    text: String,
    span: Span,
}

#[derive(Deserialize)]
struct EduRepr {
    id: u32,
    text: String,
    span: Span,
}

impl TryFrom<EduRepr> for Edu {
    type Error = CoreError;

    fn try_from(repr: EduRepr) -> Result<Self> {
        Edu::new(repr.id, repr.text, repr.span)
    }
}

impl Edu {
    /// Create an EDU; ids start at 1 and the text must not be blank
    pub fn new(id: u32, text: impl Into<String>, span: Span) -> Result<Self> {
        if id == 0 {
            return Err(CoreError::InvalidEduId(id));
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CoreError::EmptyEduText { id });
        }
        Ok(Self { id, text, span })
    }

    /// Position of this EDU in segmentation order (1-based)
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Text of the unit
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Location in the source text
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Set of EDU ids acting as nucleus or satellite
///
/// Always non-empty, de-duplicated and sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RoleChunkRepr")]
pub struct RoleChunk {
    edu_ids: Vec<u32>,
}

#[derive(Deserialize)]
struct RoleChunkRepr {
    #[serde(default)]
    edu_ids: Vec<u32>,
}

impl TryFrom<RoleChunkRepr> for RoleChunk {
    type Error = CoreError;

    fn try_from(repr: RoleChunkRepr) -> Result<Self> {
        RoleChunk::new(repr.edu_ids)
    }
}

impl RoleChunk {
    /// Build a chunk from any collection of ids
    pub fn new(ids: impl IntoIterator<Item = u32>) -> Result<Self> {
        let mut edu_ids: Vec<u32> = ids.into_iter().collect();
        if let Some(&zero) = edu_ids.iter().find(|&&id| id == 0) {
            return Err(CoreError::InvalidEduId(zero));
        }
        edu_ids.sort_unstable();
        edu_ids.dedup();
        if edu_ids.is_empty() {
            return Err(CoreError::EmptyRoleChunk);
        }
        Ok(Self { edu_ids })
    }

    /// Chunk holding exactly one EDU
    pub fn single(id: u32) -> Result<Self> {
        Self::new([id])
    }

    /// Ids in ascending order
    pub fn edu_ids(&self) -> &[u32] {
        &self.edu_ids
    }
}

/// Closed set of rhetorical relation names, in rotation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    /// Satellite adds detail to the nucleus
    Elaboration,
    /// Satellite supports belief in the nucleus
    Evidence,
    /// Satellite justifies presenting the nucleus
    Justify,
    /// Nuclei are contrasted
    Contrast,
    /// Satellite concedes a compatible point
    Concession,
    /// Satellite causes the nucleus
    Cause,
    /// Satellite results from the nucleus
    Result,
    /// Nucleus holds under the satellite's condition
    Condition,
    /// Satellite is the purpose of the nucleus
    Purpose,
    /// Satellite gives context for the nucleus
    Background,
    /// Satellite restates the nucleus briefly
    Summary,
    /// Satellite is incompatible with the nucleus
    Antithesis,
    /// Satellite enables the reader to act on the nucleus
    Enablement,
    /// Satellite sets the circumstance of the nucleus
    Circumstance,
}

impl RelationType {
    /// Every relation type in rotation order
    pub const ALL: [RelationType; 14] = [
        RelationType::Elaboration,
        RelationType::Evidence,
        RelationType::Justify,
        RelationType::Contrast,
        RelationType::Concession,
        RelationType::Cause,
        RelationType::Result,
        RelationType::Condition,
        RelationType::Purpose,
        RelationType::Background,
        RelationType::Summary,
        RelationType::Antithesis,
        RelationType::Enablement,
        RelationType::Circumstance,
    ];

    /// The most generic relation, used whenever no specific one applies
    pub const GENERIC: RelationType = RelationType::Elaboration;

    /// Name as it appears in trees and JSON
    pub fn name(&self) -> &'static str {
        match self {
            RelationType::Elaboration => "Elaboration",
            RelationType::Evidence => "Evidence",
            RelationType::Justify => "Justify",
            RelationType::Contrast => "Contrast",
            RelationType::Concession => "Concession",
            RelationType::Cause => "Cause",
            RelationType::Result => "Result",
            RelationType::Condition => "Condition",
            RelationType::Purpose => "Purpose",
            RelationType::Background => "Background",
            RelationType::Summary => "Summary",
            RelationType::Antithesis => "Antithesis",
            RelationType::Enablement => "Enablement",
            RelationType::Circumstance => "Circumstance",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        RelationType::ALL
            .iter()
            .copied()
            .find(|relation| relation.name() == s)
            .ok_or_else(|| CoreError::UnknownRelation(s.to_string()))
    }
}

/// Rhetorical relation between a nucleus and a satellite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RelationRepr")]
pub struct Relation {
    #[serde(rename = "type")]
    kind: RelationType,
    nucleus: RoleChunk,
    satellite: RoleChunk,
    confidence: f64,
}

#[derive(Deserialize)]
struct RelationRepr {
    #[serde(rename = "type")]
    kind: RelationType,
    nucleus: RoleChunk,
    satellite: RoleChunk,
    confidence: f64,
}

impl TryFrom<RelationRepr> for Relation {
    type Error = CoreError;

    fn try_from(repr: RelationRepr) -> Result<Self> {
        Relation::new(repr.kind, repr.nucleus, repr.satellite, repr.confidence)
    }
}

impl Relation {
    /// Create a relation; confidence must lie in `[0, 1]`
    pub fn new(
        kind: RelationType,
        nucleus: RoleChunk,
        satellite: RoleChunk,
        confidence: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(CoreError::ConfidenceOutOfRange(confidence));
        }
        Ok(Self {
            kind,
            nucleus,
            satellite,
            confidence,
        })
    }

    /// Relation type
    pub fn kind(&self) -> RelationType {
        self.kind
    }

    /// Nucleus EDUs
    pub fn nucleus(&self) -> &RoleChunk {
        &self.nucleus
    }

    /// Satellite EDUs
    pub fn satellite(&self) -> &RoleChunk {
        &self.satellite
    }

    /// Confidence in `[0, 1]`
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Language of an analyzed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Spanish
    Es,
    /// English
    En,
    /// Not specified; the detector decides
    #[default]
    Auto,
}

impl Lang {
    /// Language code
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
            Lang::Auto => "auto",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "es" => Ok(Lang::Es),
            "en" => Ok(Lang::En),
            "auto" => Ok(Lang::Auto),
            _ => Err(CoreError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Relation-type rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    /// Every pair gets the generic relation
    Minimal,
    /// Pairs cycle through the full enumeration
    #[default]
    Extended,
}

impl Ruleset {
    /// Every ruleset
    pub const ALL: [Ruleset; 2] = [Ruleset::Minimal, Ruleset::Extended];

    /// Ruleset name
    pub fn name(&self) -> &'static str {
        match self {
            Ruleset::Minimal => "minimal",
            Ruleset::Extended => "extended",
        }
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ruleset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minimal" => Ok(Ruleset::Minimal),
            "extended" => Ok(Ruleset::Extended),
            _ => Err(CoreError::UnknownRuleset(s.to_string())),
        }
    }
}
