use serde::{Deserialize, Serialize};

/// One step in the candidate vetting pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ProfileIntake,
    ResumeUpload,
    Mcq,
    CodingTest,
    Interview,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProfileIntake => "Profile Intake",
            Self::ResumeUpload => "Resume Upload",
            Self::Mcq => "MCQ",
            Self::CodingTest => "Coding Test",
            Self::Interview => "Interview",
        }
    }

    /// Stable navigation key for the UI layer. The UI owns the actual URLs;
    /// the core only guarantees one stable token per stage.
    pub const fn route_token(self) -> RouteToken {
        match self {
            Self::ProfileIntake => RouteToken("profile-intake"),
            Self::ResumeUpload => RouteToken("resume-upload"),
            Self::Mcq => RouteToken("mcq-assessment"),
            Self::CodingTest => RouteToken("coding-test"),
            Self::Interview => RouteToken("interview"),
        }
    }
}

/// Opaque navigation target handed to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteToken(pub &'static str);

/// Role-dependent ordering of vetting stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineVariant {
    Standard,
    CodingSkip,
}

const STANDARD_STAGES: [Stage; 5] = [
    Stage::ProfileIntake,
    Stage::ResumeUpload,
    Stage::Mcq,
    Stage::CodingTest,
    Stage::Interview,
];

const CODING_SKIP_STAGES: [Stage; 4] = [
    Stage::ProfileIntake,
    Stage::ResumeUpload,
    Stage::Mcq,
    Stage::Interview,
];

/// Role titles whose pipeline omits the coding stage. Matching is exact after
/// trimming and ASCII lowercasing.
const CODING_SKIP_ROLES: [&str; 5] = [
    "devops",
    "devops engineer",
    "site reliability engineer",
    "cloud engineer",
    "platform engineer",
];

impl PipelineVariant {
    /// Classify a role title into its pipeline variant. Total: missing or
    /// unrecognized roles map to the standard pipeline.
    pub fn for_role(role: Option<&str>) -> Self {
        match role {
            Some(title) => {
                let normalized = title.trim().to_ascii_lowercase();
                if CODING_SKIP_ROLES.contains(&normalized.as_str()) {
                    Self::CodingSkip
                } else {
                    Self::Standard
                }
            }
            None => Self::Standard,
        }
    }

    pub const fn stages(self) -> &'static [Stage] {
        match self {
            Self::Standard => &STANDARD_STAGES,
            Self::CodingSkip => &CODING_SKIP_STAGES,
        }
    }

    pub fn first_stage(self) -> Stage {
        self.stages()[0]
    }

    /// Position of a stage within this pipeline, or `None` when the stage is
    /// not part of it (e.g. `CodingTest` under `CodingSkip`).
    pub fn index_of(self, stage: Stage) -> Option<usize> {
        self.stages().iter().position(|candidate| *candidate == stage)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::CodingSkip => "coding_skip",
        }
    }
}

/// Ordered stages for a candidate's role title.
pub fn ordered_stages(role: Option<&str>) -> &'static [Stage] {
    PipelineVariant::for_role(role).stages()
}
