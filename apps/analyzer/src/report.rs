//! Report Assembler — renders a terminal `PipelineRun` into one Markdown
//! document. One section per completed stage, in pipeline order; sections
//! for stages that never ran are never emitted. The only non-deterministic
//! input is the generation timestamp, isolated to a single header line so
//! the rest of the document stays diff-stable.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::pipeline::{PipelineRun, RunStatus};

/// Fixed output filename, next to the working directory the run started in.
pub const REPORT_FILENAME: &str = "job_analysis_report.md";

const SKIPPED_NOTE: &str = "**Steps 5.5, 6, & 7 (Deep Dive Research, Resume Suggestions & Cover \
    Letter Draft):**\n\nSkipped as initial analysis did not indicate a promising fit.\n\n";

/// Renders the full report. Pure: the same run, model, candidate, and
/// timestamp yield byte-identical output.
pub fn assemble(
    run: &PipelineRun,
    model: &str,
    candidate_name: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut report = format!("--- Analysis Report for Job Posting: {} ---\n\n", run.job.url);
    report.push_str(&format!("--- Model Used: {model} via OpenRouter ---\n"));
    report.push_str(&format!(
        "--- Analyzing Against Candidate: {candidate_name} ---\n"
    ));
    report.push_str(&format!(
        "--- Generated: {} ---\n\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    for result in &run.results {
        report.push_str(&format!("**{}**\n\n{}\n\n", result.label, result.text));
    }

    if run.gate_passed == Some(false) {
        report.push_str(SKIPPED_NOTE);
    }

    match run.status {
        RunStatus::Completed => {}
        RunStatus::CompletedPartial => report.push_str(
            "*Note: a post-gate stage failed. This report contains every stage that \
             completed before the failure.*\n",
        ),
        RunStatus::Aborted => report.push_str(
            "*Note: the analysis was aborted before completion. This report contains \
             every stage that completed before the failure.*\n",
        ),
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{StageId, StageResult};
    use crate::scrape::JobContext;
    use chrono::TimeZone;

    fn result(stage: StageId, text: &str) -> StageResult {
        StageResult {
            stage,
            label: stage.label(),
            text: text.to_string(),
            sequence_index: stage.sequence_index(),
        }
    }

    fn run_with(results: Vec<StageResult>, gate: Option<bool>, status: RunStatus) -> PipelineRun {
        PipelineRun {
            job: JobContext::unavailable("https://example.com/jobs/42"),
            results,
            gate_passed: gate,
            status,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_full_run_renders_all_sections_in_order() {
        let results = vec![
            result(StageId::AnalyzePosting, "analysis"),
            result(StageId::MapCandidate, "mapping"),
            result(StageId::IdealProfile, "positioning"),
            result(StageId::VetCompany, "vetting"),
            result(StageId::Synthesize, "strong fit"),
            result(StageId::DeepDiveResearch, "research"),
            result(StageId::ResumeTailoring, "suggestions"),
            result(StageId::CoverLetterDraft, "draft"),
        ];
        let run = run_with(results, Some(true), RunStatus::Completed);
        let report = assemble(&run, "google/gemini-pro", "Jane Doe", fixed_time());

        let step5 = report.find("**Step 5: Synthesize Findings").unwrap();
        let step55 = report.find("**Step 5.5: Deep Dive Company Research**").unwrap();
        let step7 = report.find("**Step 7: Cover Letter Draft Generation**").unwrap();
        assert!(step5 < step55 && step55 < step7);
        assert!(!report.contains("Skipped"));
        assert!(!report.contains("*Note:"));
    }

    #[test]
    fn test_gate_false_run_has_no_deep_dive_headings_and_a_skip_note() {
        let results = vec![
            result(StageId::AnalyzePosting, "analysis"),
            result(StageId::MapCandidate, "mapping"),
            result(StageId::IdealProfile, "positioning"),
            result(StageId::VetCompany, "vetting"),
            result(StageId::Synthesize, "weak fit"),
        ];
        let run = run_with(results, Some(false), RunStatus::Completed);
        let report = assemble(&run, "google/gemini-pro", "Jane Doe", fixed_time());

        assert!(!report.contains("**Step 5.5"));
        assert!(!report.contains("**Step 6"));
        assert!(!report.contains("**Step 7"));
        assert!(report.contains("Skipped as initial analysis did not indicate a promising fit."));
        assert!(!report.contains("*Note:"));
    }

    #[test]
    fn test_aborted_run_carries_aborted_note_and_only_completed_stages() {
        let results = vec![
            result(StageId::AnalyzePosting, "analysis"),
            result(StageId::MapCandidate, "mapping"),
        ];
        let run = run_with(results, None, RunStatus::Aborted);
        let report = assemble(&run, "google/gemini-pro", "Jane Doe", fixed_time());

        assert!(report.contains("**Step 1: Analyze Job Posting**"));
        assert!(report.contains("**Step 2: Candidate Data Mapping**"));
        assert!(!report.contains("**Step 3"));
        assert!(report.contains("aborted before completion"));
        // Pre-gate abort never claims a gate outcome.
        assert!(!report.contains("Skipped as initial analysis"));
    }

    #[test]
    fn test_partial_run_carries_partial_note() {
        let results = vec![
            result(StageId::AnalyzePosting, "analysis"),
            result(StageId::MapCandidate, "mapping"),
            result(StageId::IdealProfile, "positioning"),
            result(StageId::VetCompany, "vetting"),
            result(StageId::Synthesize, "good fit"),
            result(StageId::DeepDiveResearch, "research"),
        ];
        let run = run_with(results, Some(true), RunStatus::CompletedPartial);
        let report = assemble(&run, "google/gemini-pro", "Jane Doe", fixed_time());

        assert!(report.contains("**Step 5.5"));
        assert!(!report.contains("**Step 6"));
        assert!(report.contains("a post-gate stage failed"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let results = vec![result(StageId::AnalyzePosting, "analysis")];
        let run = run_with(results, None, RunStatus::Aborted);
        let first = assemble(&run, "google/gemini-pro", "Jane Doe", fixed_time());
        let second = assemble(&run, "google/gemini-pro", "Jane Doe", fixed_time());
        assert_eq!(first, second);
    }

    #[test]
    fn test_timestamp_is_isolated_to_one_line() {
        let run = run_with(vec![], None, RunStatus::Aborted);
        let report = assemble(&run, "google/gemini-pro", "Jane Doe", fixed_time());
        let timestamp_lines: Vec<&str> = report
            .lines()
            .filter(|l| l.starts_with("--- Generated:"))
            .collect();
        assert_eq!(timestamp_lines, vec!["--- Generated: 2024-05-01T12:00:00Z ---"]);
    }
}
