// src/visual/chart.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of chart a visual renders as.
///
/// Only [`ChartKind::is_percent`] affects compilation; the rest is for the
/// rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartKind {
    #[default]
    BarClustered,
    BarStacked,
    BarPercent,
    BarHorizontal,
    Radar,
    LineSmooth,
    LineStraight,
    AreaSmooth,
    ComboBarLine,
    Pie,
    Donut,
    Treemap,
    KpiSingle,
    Table,
}

/// Gallery grouping of chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartCategory {
    Comparison,
    Trend,
    PartToWhole,
    Indicators,
}

impl ChartKind {
    pub const ALL: [ChartKind; 14] = [
        ChartKind::BarClustered,
        ChartKind::BarStacked,
        ChartKind::BarPercent,
        ChartKind::BarHorizontal,
        ChartKind::Radar,
        ChartKind::LineSmooth,
        ChartKind::LineStraight,
        ChartKind::AreaSmooth,
        ChartKind::ComboBarLine,
        ChartKind::Pie,
        ChartKind::Donut,
        ChartKind::Treemap,
        ChartKind::KpiSingle,
        ChartKind::Table,
    ];

    /// Whether result rows are rewritten as percentages of their row total.
    pub fn is_percent(&self) -> bool {
        matches!(self, ChartKind::BarPercent)
    }

    pub fn category(&self) -> ChartCategory {
        match self {
            ChartKind::BarClustered
            | ChartKind::BarStacked
            | ChartKind::BarPercent
            | ChartKind::BarHorizontal
            | ChartKind::Radar => ChartCategory::Comparison,
            ChartKind::LineSmooth
            | ChartKind::LineStraight
            | ChartKind::AreaSmooth
            | ChartKind::ComboBarLine => ChartCategory::Trend,
            ChartKind::Pie | ChartKind::Donut | ChartKind::Treemap => ChartCategory::PartToWhole,
            ChartKind::KpiSingle | ChartKind::Table => ChartCategory::Indicators,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::BarClustered => "BAR_CLUSTERED",
            ChartKind::BarStacked => "BAR_STACKED",
            ChartKind::BarPercent => "BAR_PERCENT",
            ChartKind::BarHorizontal => "BAR_HORIZONTAL",
            ChartKind::Radar => "RADAR",
            ChartKind::LineSmooth => "LINE_SMOOTH",
            ChartKind::LineStraight => "LINE_STRAIGHT",
            ChartKind::AreaSmooth => "AREA_SMOOTH",
            ChartKind::ComboBarLine => "COMBO_BAR_LINE",
            ChartKind::Pie => "PIE",
            ChartKind::Donut => "DONUT",
            ChartKind::Treemap => "TREEMAP",
            ChartKind::KpiSingle => "KPI_SINGLE",
            ChartKind::Table => "TABLE",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown chart kind: {0}")]
pub struct ParseChartKindError(pub String);

impl FromStr for ChartKind {
    type Err = ParseChartKindError;

    /// Accepts `BAR_PERCENT`, `bar_percent` and `bar-percent`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseChartKindError(s.to_string()))
    }
}
