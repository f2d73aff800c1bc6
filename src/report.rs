/// Printable analysis report
///
/// Renders an `AnalysisResult` as a standalone HTML page that can be opened in
/// a browser and printed or saved as PDF.

use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::state::data::AnalysisResult;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; padding: 20px; }
    h1 { color: #3b82f6; }
    .header { display: flex; justify-content: space-between; align-items: center; }
    .status { padding: 8px 16px; border-radius: 4px; display: inline-block; margin-bottom: 20px; }
    .abnormal { background-color: #ffedd5; color: #c2410c; }
    .normal { background-color: #dcfce7; color: #15803d; }
    .section { margin-bottom: 30px; }
    .condition { margin-bottom: 15px; }
    .probability-bar { height: 10px; background-color: #e5e7eb; border-radius: 5px; margin-top: 5px; overflow: hidden; }
    .probability-fill { height: 100%; background-color: #3b82f6; }
    .high { background-color: #ef4444; }
    .medium { background-color: #f59e0b; }
    .recommendation { display: flex; align-items: flex-start; margin-bottom: 10px; }
    .bullet { width: 8px; height: 8px; background-color: #3b82f6; border-radius: 50%; margin-top: 8px; margin-right: 10px; }
    .footer { font-size: 12px; color: #6b7280; margin-top: 40px; border-top: 1px solid #e5e7eb; padding-top: 20px; }
    img { max-width: 100%; max-height: 300px; object-fit: contain; border: 1px solid #e5e7eb; }
"#;

const DISCLAIMER: &str = "This analysis is not a substitute for professional medical advice. Always consult a qualified healthcare provider for proper diagnosis and treatment.";

/// Bar color class for a condition probability
pub fn probability_class(probability: f64) -> &'static str {
    if probability > 70.0 {
        "high"
    } else if probability > 50.0 {
        "medium"
    } else {
        ""
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the report; the image is embedded when a data URL is given
pub fn render_html(result: &AnalysisResult, image_data_url: Option<&str>, date: NaiveDate) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        html,
        "<html>\n<head>\n<title>ECG Analysis Report</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"header\">\n<h1>ECG Analysis Report</h1>\n<div>Date: {}</div>\n</div>\n",
        date.format("%Y-%m-%d")
    );

    if let Some(url) = image_data_url {
        let _ = write!(
            html,
            "<div class=\"section\">\n<h2>ECG Image</h2>\n<img src=\"{}\" alt=\"ECG Graph\" />\n</div>\n",
            escape(url)
        );
    }

    let (status_class, status, summary) = if result.abnormal {
        (
            "abnormal",
            "Potential Abnormalities Detected",
            "Our AI analysis detected potential abnormal patterns in your ECG.",
        )
    } else {
        (
            "normal",
            "No Significant Abnormalities",
            "Your ECG appears to be within normal parameters based on our analysis.",
        )
    };

    let _ = write!(
        html,
        "<div class=\"section\">\n<h2>Analysis Result</h2>\n<div class=\"status {status_class}\">{status}</div>\n\
         <div>Confidence Score: {:.1}%</div>\n<p>{summary}</p>\n</div>\n",
        result.confidence_score
    );

    if !result.conditions.is_empty() {
        html.push_str("<div class=\"section\">\n<h2>Detected Conditions</h2>\n");
        for condition in &result.conditions {
            let _ = write!(
                html,
                "<div class=\"condition\">\n<div style=\"display: flex; justify-content: space-between;\">\
                 <strong>{}</strong><span>{:.1}% probability</span></div>\n\
                 <div class=\"probability-bar\"><div class=\"probability-fill {}\" style=\"width: {:.1}%\"></div></div>\n</div>\n",
                escape(&condition.name),
                condition.probability,
                probability_class(condition.probability),
                condition.probability
            );
        }
        html.push_str("</div>\n");
    }

    html.push_str("<div class=\"section\">\n<h2>Recommendations</h2>\n");
    for recommendation in &result.recommendations {
        let _ = writeln!(
            html,
            "<div class=\"recommendation\"><div class=\"bullet\"></div><div>{}</div></div>",
            escape(recommendation)
        );
    }
    html.push_str("</div>\n");

    let _ = write!(
        html,
        "<div class=\"footer\">\n<p><strong>Disclaimer:</strong> {DISCLAIMER}</p>\n</div>\n</body>\n</html>\n"
    );

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::recommend;
    use crate::state::data::Condition;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_probability_classes() {
        assert_eq!(probability_class(70.1), "high");
        assert_eq!(probability_class(70.0), "medium");
        assert_eq!(probability_class(50.0), "");
    }

    #[test]
    fn test_abnormal_report() {
        let result = AnalysisResult {
            abnormal: true,
            confidence_score: 86.5,
            conditions: vec![Condition { name: "Heart Block".to_string(), probability: 72.4 }],
            recommendations: recommend(true, 72.4),
        };
        let html = render_html(&result, Some("data:image/png;base64,AAAA"), date());

        assert!(html.contains("Date: 2025-03-14"));
        assert!(html.contains("Potential Abnormalities Detected"));
        assert!(html.contains("Confidence Score: 86.5%"));
        assert!(html.contains("<strong>Heart Block</strong><span>72.4% probability</span>"));
        assert!(html.contains("probability-fill high"));
        assert!(html.contains("Seek immediate medical attention"));
        assert!(html.contains("<img src=\"data:image/png;base64,AAAA\""));
    }

    #[test]
    fn test_normal_report_has_no_conditions_section() {
        let result = AnalysisResult {
            abnormal: false,
            confidence_score: 77.3,
            conditions: vec![],
            recommendations: recommend(false, 0.0),
        };
        let html = render_html(&result, None, date());

        assert!(html.contains("No Significant Abnormalities"));
        assert!(!html.contains("Detected Conditions"));
        assert!(!html.contains("<img"));
        assert!(html.contains("Maintain a heart-healthy lifestyle"));
        assert!(html.contains("Disclaimer:"));
    }
}
