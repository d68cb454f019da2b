use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named sub-field inside a structured block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockField {
    Title,
    Description,
    Implication,
    Citation,
    Diagnosis,
    Reasoning,
    Probability,
    Keyfindings,
    Timeframe,
    Action,
    Rationale,
    Alternative,
}

impl BlockField {
    pub const ALL: [BlockField; 12] = [
        BlockField::Title,
        BlockField::Description,
        BlockField::Implication,
        BlockField::Citation,
        BlockField::Diagnosis,
        BlockField::Reasoning,
        BlockField::Probability,
        BlockField::Keyfindings,
        BlockField::Timeframe,
        BlockField::Action,
        BlockField::Rationale,
        BlockField::Alternative,
    ];

    /// The tag name used in model output, e.g. `keyfindings`.
    pub fn tag(self) -> &'static str {
        match self {
            BlockField::Title => "title",
            BlockField::Description => "description",
            BlockField::Implication => "implication",
            BlockField::Citation => "citation",
            BlockField::Diagnosis => "diagnosis",
            BlockField::Reasoning => "reasoning",
            BlockField::Probability => "probability",
            BlockField::Keyfindings => "keyfindings",
            BlockField::Timeframe => "timeframe",
            BlockField::Action => "action",
            BlockField::Rationale => "rationale",
            BlockField::Alternative => "alternative",
        }
    }
}

/// The families of numbered blocks the sub-agents are prompted to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// `<step1>` … inside `<logica>`.
    Step,
    /// `<insight1>` … inside `<insights>`.
    Insight,
    /// `<ddx1>` … inside `<discussion>`.
    Ddx,
    /// `<rec1>` … inside `<discussion>`.
    Rec,
}

impl BlockKind {
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::Step => "step",
            BlockKind::Insight => "insight",
            BlockKind::Ddx => "ddx",
            BlockKind::Rec => "rec",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "step" => Some(BlockKind::Step),
            "insight" => Some(BlockKind::Insight),
            "ddx" => Some(BlockKind::Ddx),
            "rec" => Some(BlockKind::Rec),
            _ => None,
        }
    }

    pub fn fields(self) -> &'static [BlockField] {
        match self {
            BlockKind::Step | BlockKind::Insight => &[
                BlockField::Title,
                BlockField::Description,
                BlockField::Implication,
                BlockField::Citation,
            ],
            BlockKind::Ddx => &[
                BlockField::Diagnosis,
                BlockField::Reasoning,
                BlockField::Probability,
                BlockField::Keyfindings,
                BlockField::Citation,
            ],
            BlockKind::Rec => &[
                BlockField::Timeframe,
                BlockField::Action,
                BlockField::Rationale,
                BlockField::Alternative,
                BlockField::Citation,
            ],
        }
    }
}

/// One numbered, tagged region of model output, e.g. `<insight3>…</insight3>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredBlock {
    /// Numeric suffix of the opening tag. Not guaranteed contiguous or sorted.
    pub ordinal: u32,
    pub fields: BTreeMap<BlockField, String>,
}

impl StructuredBlock {
    /// Value of a sub-field; missing fields read as an empty string.
    pub fn field(&self, field: BlockField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }
}
