use serde::{Deserialize, Serialize};

use super::catalog::{PipelineVariant, RouteToken, Stage};

/// Identifier wrapper for candidates moving through the vetting pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Outcome status recorded against the most recent stage a candidate touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Passed,
    Failed,
    /// Booked but not yet completed. Only meaningful for the interview stage.
    Scheduled,
}

impl StageStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Scheduled => "scheduled",
        }
    }
}

/// The persisted `(lastStage, lastStatus)` pointer. This is the sole durable
/// state of the stage machine for a candidate; absence means "new candidate,
/// nothing attempted yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub last_stage: Stage,
    pub last_status: StageStatus,
}

impl StageRecord {
    pub const fn new(last_stage: Stage, last_status: StageStatus) -> Self {
        Self {
            last_stage,
            last_status,
        }
    }

    /// `Scheduled` pairs only with the interview stage.
    pub fn status_is_valid(&self) -> bool {
        self.last_status != StageStatus::Scheduled || self.last_stage == Stage::Interview
    }
}

/// Where the UI should send the candidate next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "stage")]
pub enum RouteTarget {
    /// Present the given stage.
    Stage(Stage),
    /// Interview booked; show the holding view, neither retry nor advance.
    AwaitingInterview,
    /// Coding test failed; terminal feedback view, not a retry.
    CodingFeedback,
    /// Every stage of the pipeline passed.
    Completed,
}

impl RouteTarget {
    pub const fn route_token(self) -> RouteToken {
        match self {
            Self::Stage(stage) => stage.route_token(),
            Self::AwaitingInterview => RouteToken("interview-pending"),
            Self::CodingFeedback => RouteToken("coding-feedback"),
            Self::Completed => RouteToken("vetting-complete"),
        }
    }
}

/// Computed next action for a candidate. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub target: RouteTarget,
    pub is_retry: bool,
    /// Present when the stored record did not belong to the candidate's
    /// current pipeline and the policy fell back to a restart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<StageConsistencyWarning>,
}

impl RouteDecision {
    pub(crate) const fn advance(target: RouteTarget) -> Self {
        Self {
            target,
            is_retry: false,
            consistency: None,
        }
    }

    pub(crate) const fn retry(stage: Stage) -> Self {
        Self {
            target: RouteTarget::Stage(stage),
            is_retry: true,
            consistency: None,
        }
    }
}

/// Non-fatal signal that a stored stage record does not belong to the
/// candidate's current pipeline (role changed, or corrupt/legacy data). The
/// policy restarts the pipeline; operators should investigate the drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConsistencyWarning {
    pub recorded_stage: Stage,
    pub recorded_status: StageStatus,
    pub pipeline: PipelineVariant,
}

/// Candidate-submitted assessment material handed to an external scorer. The
/// payload shape belongs to the scorer; the core never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub stage: Stage,
    pub payload: serde_json::Value,
}

/// Pass/fail report produced by an external assessment scorer. The core only
/// consumes the booleans; the raw score is carried for the caller's benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedOutcome {
    pub stage: Stage,
    pub score: f32,
    pub passed: bool,
    #[serde(default)]
    pub scheduled: bool,
}

/// Generated assessment content cached between visits to a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AssessmentArtifact {
    McqBatch { questions: Vec<McqQuestion> },
    CodingAssignments { assignments: Vec<CodingAssignment> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingAssignment {
    pub title: String,
    pub brief: String,
    pub time_limit_minutes: u32,
}
