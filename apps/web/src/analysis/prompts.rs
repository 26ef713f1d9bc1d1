// Survey analysis prompt template.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Sampling temperature for survey analysis. Kept low so repeated runs over
/// the same file produce near-identical reports.
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;

pub const SURVEY_ANALYSIS_PROMPT: &str = r#"You are an expert data analyst specialising in satisfaction surveys for education and training programmes. Analyse the survey data below. It contains participants' responses about a recent training programme.

Your analysis will be used to write the annual report and to plan next year's curriculum.

Produce a structured JSON output containing:
1. **overallSummary:** a short, high-level summary of the survey results.
2. **keyStrengths:** identify and list the 3-5 main positive themes or comments in the feedback. What did participants like most?
3. **areasForImprovement:** identify and list the 3-5 main areas where the programme could improve, based on participant feedback. What were the common complaints or the lowest-rated aspects?
4. **actionableSuggestions:** give at least 2 concrete, actionable suggestions for next year's plan based on your analysis, each with the reasoning behind it.
5. **quantitativeAnalysis:** if numeric ratings are present, compute the average satisfaction score (assume a 1-5 scale) and provide the score distribution. If there is no numeric data, omit this field or set it to null.

Write the text of the report in the same language as the survey responses.

The survey data follows:
---
{survey_data}
---
{json_only}"#;

/// Builds the analysis prompt with the survey text embedded verbatim.
pub fn build_analysis_prompt(survey_data: &str) -> String {
    // json_only first so survey text containing "{json_only}" stays untouched
    SURVEY_ANALYSIS_PROMPT
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{survey_data}", survey_data)
}
