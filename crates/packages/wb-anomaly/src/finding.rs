use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingCategory {
    Estimation,
    Overcharge,
    Undercharge,
    ConsumptionSpike,
    ConsumptionDrop,
    AllocationUnderuse,
    DisabilityEligibility,
    MeterReadingNote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => f.write_str("low"),
            Severity::Medium => f.write_str("medium"),
            Severity::High => f.write_str("high"),
        }
    }
}

/// Section a finding is reported under. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Error,
    Warning,
    Recommendation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub kind: FindingKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommended_action: String,
    /// The number that triggered the rule: the money difference for over and
    /// undercharges, the percent change for spikes and drops, the reading for
    /// meter notes.
    pub figure: Option<Decimal>,
}

/// Findings of one detection pass grouped for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub findings: Vec<Finding>,
}

impl DetectionReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.of_kind(FindingKind::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.of_kind(FindingKind::Warning)
    }

    pub fn recommendations(&self) -> impl Iterator<Item = &Finding> {
        self.of_kind(FindingKind::Recommendation)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    fn of_kind(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }
}

impl From<Vec<Finding>> for DetectionReport {
    fn from(findings: Vec<Finding>) -> Self {
        Self { findings }
    }
}
