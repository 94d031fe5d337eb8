//! Result Presentation — maps a feedback record into the labeled breakdown
//! the summary dashboard renders: per-metric radial indicators plus the
//! free-text suggestion. The only computation is percentage-to-angle mapping.

use serde::Serialize;

use crate::feedback::models::FeedbackScores;

/// Radial indicators start at 12 o'clock and sweep clockwise a full turn.
const START_ANGLE: f32 = 90.0;
const FULL_SWEEP: f32 = 360.0;

/// One metric gauge: `value` out of `max`, with the arc's end angle
/// precomputed for the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricView {
    pub label: String,
    pub value: u8,
    pub max: u8,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl MetricView {
    fn new(label: &str, value: u8, max: u8) -> Self {
        let fraction = f32::from(value) / f32::from(max);
        Self {
            label: label.to_string(),
            value,
            max,
            start_angle: START_ANGLE,
            end_angle: START_ANGLE - fraction * FULL_SWEEP,
        }
    }
}

/// The full summary view: four /10 metrics, hire likelihood /100, suggestion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub metrics: Vec<MetricView>,
    pub suggestion: String,
}

pub fn build_result_view(scores: &FeedbackScores) -> ResultView {
    ResultView {
        metrics: vec![
            MetricView::new("Communication", scores.communication, 10),
            MetricView::new("Confidence", scores.confidence, 10),
            MetricView::new("Technical Knowledge", scores.technical_knowledge, 10),
            MetricView::new("Collaboration", scores.collaboration, 10),
            MetricView::new("Hire Likelihood", scores.hire_percentage, 100),
        ],
        suggestion: scores.suggestion.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> FeedbackScores {
        FeedbackScores {
            communication: 8,
            confidence: 7,
            technical_knowledge: 9,
            collaboration: 6,
            hire_percentage: 85,
            suggestion: "Practice structured answers.".to_string(),
        }
    }

    #[test]
    fn test_view_has_five_labeled_metrics() {
        let view = build_result_view(&scores());
        let labels: Vec<&str> = view.metrics.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Communication",
                "Confidence",
                "Technical Knowledge",
                "Collaboration",
                "Hire Likelihood"
            ]
        );
    }

    #[test]
    fn test_hire_likelihood_is_a_percentage_not_a_score_out_of_ten() {
        let view = build_result_view(&scores());
        let hire = view.metrics.last().unwrap();
        assert_eq!(hire.max, 100);
        assert_eq!(hire.value, 85);
        for metric in &view.metrics[..4] {
            assert_eq!(metric.max, 10);
        }
    }

    #[test]
    fn test_full_value_sweeps_a_complete_turn() {
        let full = MetricView::new("x", 10, 10);
        assert!((full.start_angle - 90.0).abs() < f32::EPSILON);
        assert!((full.end_angle - (-270.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_half_value_sweeps_half_a_turn() {
        let half = MetricView::new("x", 5, 10);
        assert!((half.end_angle - (-90.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_value_stays_at_start() {
        let zero = MetricView::new("x", 0, 100);
        assert!((zero.end_angle - 90.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_suggestion_carried_through() {
        let view = build_result_view(&scores());
        assert_eq!(view.suggestion, "Practice structured answers.");
    }
}
