use crate::analysis::models::{AnalysisResult, QuantitativeAnalysis, ScoreBucket};

const CHART_WIDTH: f64 = 560.0;
const CHART_HEIGHT: f64 = 240.0;
const MARGIN_X: f64 = 24.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 28.0;
const BAR_FILL: f64 = 0.6; // fraction of each slot covered by its bar

/// Everything the report template needs, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<SuggestionCard>,
    pub quantitative: Option<QuantitativeView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionCard {
    pub suggestion: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantitativeView {
    /// Rounded to two decimals.
    pub average_score: String,
    pub chart: BarChart,
}

/// SVG geometry for the score distribution. Coordinates are preformatted.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub width: String,
    pub height: String,
    pub baseline_y: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: String,
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
    pub center_x: String,
    pub value_y: String,
    pub label_y: String,
}

impl ReportView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            summary: result.overall_summary.clone(),
            strengths: result.key_strengths.clone(),
            improvements: result.areas_for_improvement.clone(),
            suggestions: result
                .actionable_suggestions
                .iter()
                .map(|s| SuggestionCard {
                    suggestion: s.suggestion.clone(),
                    reasoning: s.reasoning.clone(),
                })
                .collect(),
            quantitative: result.quantitative_analysis.as_ref().map(QuantitativeView::from_analysis),
        }
    }
}

impl QuantitativeView {
    fn from_analysis(analysis: &QuantitativeAnalysis) -> Self {
        Self {
            average_score: format_score(analysis.average_score),
            chart: BarChart::from_distribution(&analysis.score_distribution),
        }
    }
}

impl BarChart {
    fn from_distribution(buckets: &[ScoreBucket]) -> Self {
        let plot_width = CHART_WIDTH - 2.0 * MARGIN_X;
        let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_height;

        let max = buckets.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        let max = if max > 0.0 { max } else { 1.0 };

        let slot = if buckets.is_empty() {
            plot_width
        } else {
            plot_width / buckets.len() as f64
        };
        let bar_width = slot * BAR_FILL;

        let bars = buckets
            .iter()
            .enumerate()
            .map(|(i, bucket)| {
                let x = MARGIN_X + i as f64 * slot + (slot - bar_width) / 2.0;
                let height = bucket.value.max(0.0) / max * plot_height;
                let y = baseline - height;
                Bar {
                    label: bucket.name.clone(),
                    value: format_count(bucket.value),
                    x: coord(x),
                    y: coord(y),
                    width: coord(bar_width),
                    height: coord(height),
                    center_x: coord(x + bar_width / 2.0),
                    value_y: coord(y - 4.0),
                    label_y: coord(CHART_HEIGHT - 8.0),
                }
            })
            .collect();

        Self {
            width: coord(CHART_WIDTH),
            height: coord(CHART_HEIGHT),
            baseline_y: coord(baseline),
            bars,
        }
    }
}

/// Fixed two-decimal rendering of an average score.
pub fn format_score(score: f64) -> String {
    // An exact tie at two decimals is always a multiple of 1/8, where
    // `score * 100.0` is exact; those round half away from zero.
    if (score * 8.0).fract() == 0.0 {
        return format!("{:.2}", (score * 100.0).round() / 100.0);
    }
    format!("{score:.2}")
}

fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn coord(v: f64) -> String {
    format!("{v:.1}")
}
