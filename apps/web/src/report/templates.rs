//! Askama template structs. Each one corresponds to an HTML template in
//! the templates/ directory.

use askama::Template;

use crate::analysis::AnalysisResult;
use crate::report::view::ReportView;

/// The single page of a browser session.
#[derive(Template)]
#[template(path = "page.html")]
pub struct SessionPageTemplate {
    pub session_id: String,
    pub file_name: Option<String>,
    pub is_analyzing: bool,
    pub can_analyze: bool,
    pub error_message: Option<String>,
    /// Output of `render_report`, embedded unescaped.
    pub report_html: Option<String>,
    pub analyzed_at: Option<String>,
}

/// The report section on its own.
#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate<'a> {
    pub report: &'a ReportView,
}

/// Renders the report section for an analysis result.
pub fn render_report(result: &AnalysisResult) -> askama::Result<String> {
    let view = ReportView::from_result(result);
    ReportTemplate { report: &view }.render()
}
