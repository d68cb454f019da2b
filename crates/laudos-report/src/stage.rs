use std::fmt;

/// One completion call in the report pipeline or the editor assistants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ChainOfThought,
    FinalReport,
    Insights,
    Impressions,
    DifferentialDiagnosis,
    FollowUpRecommendations,
    SectionClassification,
    TextEnhancement,
}

impl Stage {
    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Stage::ChainOfThought => "Chain of Thought",
            Stage::FinalReport => "Final report",
            Stage::Insights => "AI Insights",
            Stage::Impressions => "Impressions",
            Stage::DifferentialDiagnosis => "Differential Diagnosis",
            Stage::FollowUpRecommendations => "Follow-up Recommendations",
            Stage::SectionClassification => "Section classification",
            Stage::TextEnhancement => "Text enhancement",
        }
    }

    pub fn temperature(self) -> f32 {
        match self {
            Stage::TextEnhancement => 0.7,
            _ => 0.3,
        }
    }

    pub fn max_tokens(self) -> u32 {
        match self {
            Stage::ChainOfThought => 2000,
            Stage::FinalReport => 6000,
            Stage::Insights => 3000,
            Stage::Impressions => 500,
            Stage::DifferentialDiagnosis => 2000,
            Stage::FollowUpRecommendations => 2000,
            Stage::SectionClassification => 50,
            Stage::TextEnhancement => 1000,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
