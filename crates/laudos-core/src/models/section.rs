use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sections of a chest radiology report that dictated text can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportSection {
    Procedure,
    History,
    Technique,
    Comparison,
    Lungs,
    Pleura,
    Cardiomediastinal,
    Bones,
    Impression,
}

impl ReportSection {
    pub const ALL: [ReportSection; 9] = [
        ReportSection::Procedure,
        ReportSection::History,
        ReportSection::Technique,
        ReportSection::Comparison,
        ReportSection::Lungs,
        ReportSection::Pleura,
        ReportSection::Cardiomediastinal,
        ReportSection::Bones,
        ReportSection::Impression,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportSection::Procedure => "Procedure",
            ReportSection::History => "History",
            ReportSection::Technique => "Technique",
            ReportSection::Comparison => "Comparison",
            ReportSection::Lungs => "Lungs",
            ReportSection::Pleura => "Pleura",
            ReportSection::Cardiomediastinal => "Cardiomediastinal",
            ReportSection::Bones => "Bones",
            ReportSection::Impression => "Impression",
        }
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the section name.
impl FromStr for ReportSection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportSection::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSection(s.to_string()))
    }
}
