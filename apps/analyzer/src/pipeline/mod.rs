//! Stage Orchestrator — the conditional multi-stage analysis pipeline.
//!
//! Stages run strictly in definition order: 1, 2, 3, 4, 5, [gate], 5.5, 6, 7.
//! Each stage builds its prompt from the candidate profile, the job context,
//! and earlier stage outputs only, then awaits the completion client. The
//! fit gate is evaluated exactly once, immediately after the synthesis
//! stage; the deep-dive stages (5.5, 6, 7) exist in the run if and only if
//! the gate passed.

pub mod gate;
pub mod prompts;

use tracing::{error, info};

use crate::llm::CompletionClient;
use crate::models::profile::CandidateProfile;
use crate::scrape::JobContext;

/// One discrete prompt/completion step in the fixed pipeline sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageId {
    AnalyzePosting,
    MapCandidate,
    IdealProfile,
    VetCompany,
    Synthesize,
    DeepDiveResearch,
    ResumeTailoring,
    CoverLetterDraft,
}

impl StageId {
    /// Core analysis stages, always attempted.
    pub const ANALYSIS: [StageId; 5] = [
        StageId::AnalyzePosting,
        StageId::MapCandidate,
        StageId::IdealProfile,
        StageId::VetCompany,
        StageId::Synthesize,
    ];

    /// Post-gate stages, attempted only when the fit gate passes.
    pub const DEEP_DIVE: [StageId; 3] = [
        StageId::DeepDiveResearch,
        StageId::ResumeTailoring,
        StageId::CoverLetterDraft,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StageId::AnalyzePosting => "Step 1: Analyze Job Posting",
            StageId::MapCandidate => "Step 2: Candidate Data Mapping",
            StageId::IdealProfile => "Step 3: Ideal Profile & Personalized Positioning",
            StageId::VetCompany => "Step 4: Initial Company Vetting",
            StageId::Synthesize => "Step 5: Synthesize Findings (Personalized)",
            StageId::DeepDiveResearch => "Step 5.5: Deep Dive Company Research",
            StageId::ResumeTailoring => "Step 6: Resume Tailoring Suggestions",
            StageId::CoverLetterDraft => "Step 7: Cover Letter Draft Generation",
        }
    }

    /// Position in pipeline definition order. A stage's prompt may only
    /// reference stages with a strictly smaller index.
    pub fn sequence_index(self) -> usize {
        match self {
            StageId::AnalyzePosting => 0,
            StageId::MapCandidate => 1,
            StageId::IdealProfile => 2,
            StageId::VetCompany => 3,
            StageId::Synthesize => 4,
            StageId::DeepDiveResearch => 5,
            StageId::ResumeTailoring => 6,
            StageId::CoverLetterDraft => 7,
        }
    }
}

/// Output of one completed stage. Immutable once recorded.
#[derive(Debug, Clone)]
pub struct StageResult {
    pub stage: StageId,
    pub label: &'static str,
    pub text: String,
    pub sequence_index: usize,
}

/// Terminal status of a pipeline run.
///
/// A gate-false run is `Completed` — a successful run with a negative
/// outcome, not an abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// A post-gate stage failed; stages 1–5 and any completed deep-dive
    /// stages are retained.
    CompletedPartial,
    /// A pre-gate stage failed; completed stages are retained.
    Aborted,
}

/// Everything a single run produced. Owns all stage results; nothing
/// mutates them after creation.
#[derive(Debug)]
pub struct PipelineRun {
    pub job: JobContext,
    pub results: Vec<StageResult>,
    /// None until the gate has been evaluated (pre-gate abort leaves it None).
    pub gate_passed: Option<bool>,
    pub status: RunStatus,
}

impl PipelineRun {
    pub fn result_for(&self, stage: StageId) -> Option<&StageResult> {
        self.results.iter().find(|r| r.stage == stage)
    }
}

/// Drives the ordered stage sequence against a completion client. Holds no
/// mutable state of its own — each `run` call owns its `PipelineRun`, so
/// concurrent runs only share the stateless client and profile.
pub struct Orchestrator<'a> {
    llm: &'a dyn CompletionClient,
    profile: &'a CandidateProfile,
}

impl<'a> Orchestrator<'a> {
    pub fn new(llm: &'a dyn CompletionClient, profile: &'a CandidateProfile) -> Self {
        Orchestrator { llm, profile }
    }

    pub async fn run(&self, job: JobContext) -> PipelineRun {
        info!("Starting analysis for: {}", job.url);

        let mut run = PipelineRun {
            job,
            results: Vec::new(),
            gate_passed: None,
            status: RunStatus::Completed,
        };

        for stage in StageId::ANALYSIS {
            if !self.execute_stage(stage, &mut run).await {
                run.status = RunStatus::Aborted;
                return run;
            }
        }

        // Gate: evaluated exactly once, immediately after the synthesis
        // stage is recorded.
        let synthesis = run
            .result_for(StageId::Synthesize)
            .expect("synthesis stage recorded before gate evaluation");
        let passed = gate::classify_fit(&synthesis.text);
        run.gate_passed = Some(passed);

        if !passed {
            info!("Assessment does not indicate promising fit. Skipping deep dive/generation.");
            return run;
        }

        info!("Assessment indicates potential fit. Proceeding with deep dive and generation steps.");

        for stage in StageId::DEEP_DIVE {
            if !self.execute_stage(stage, &mut run).await {
                run.status = RunStatus::CompletedPartial;
                return run;
            }
        }

        run
    }

    /// Runs one stage to completion. Returns false on failure; completed
    /// results are never rolled back.
    async fn execute_stage(&self, stage: StageId, run: &mut PipelineRun) -> bool {
        info!("Executing {}", stage.label());

        let prompt = prompts::build_prompt(stage, self.profile, &run.job, &run.results);

        match self.llm.complete(&prompt).await {
            Ok(text) => {
                run.results.push(StageResult {
                    stage,
                    label: stage.label(),
                    text,
                    sequence_index: stage.sequence_index(),
                });
                true
            }
            Err(e) => {
                error!("Error during {}: {e}", stage.label());
                false
            }
        }
    }
}
