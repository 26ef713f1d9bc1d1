// Report rendering: a pure view of an `AnalysisResult` plus the askama
// templates that turn it into HTML.

pub mod templates;
pub mod view;

pub use templates::{render_report, SessionPageTemplate};
