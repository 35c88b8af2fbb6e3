use crate::infra::{InMemoryProfileBackend, PassMarkScorer};
use clap::Args;
use std::sync::Arc;

use hireflow::error::AppError;
use hireflow::workflows::vetting::{
    ordered_stages, CandidateId, RouteTarget, Stage, VettingFlowService,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Role title for the first walk (defaults to a standard-pipeline role)
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Fail the coding test during the walk to show the feedback terminal
    #[arg(long)]
    pub(crate) fail_coding: bool,
}

type DemoService = VettingFlowService<InMemoryProfileBackend, PassMarkScorer>;

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let backend = Arc::new(InMemoryProfileBackend::default());
    let scorer = Arc::new(PassMarkScorer::default());
    let service = VettingFlowService::new(backend, scorer);

    let role = args.role.as_deref().unwrap_or("Backend Engineer");

    println!("=== Candidate walk: role '{role}' ===");
    walk_candidate(&service, "demo-custom", Some(role), args.fail_coding)?;

    println!();
    println!("=== Candidate walk: role 'DevOps Engineer' (coding skip) ===");
    walk_candidate(&service, "demo-devops", Some("DevOps Engineer"), false)?;

    Ok(())
}

fn walk_candidate(
    service: &DemoService,
    id: &str,
    role: Option<&str>,
    fail_coding: bool,
) -> Result<(), AppError> {
    let who = CandidateId(id.to_string());

    let bootstrap = service.decide_next_route(&who, role)?;
    println!("  start at: {}", bootstrap.target.route_token().0);

    for stage in ordered_stages(role) {
        let passed = !(fail_coding && *stage == Stage::CodingTest);
        service.record_outcome(&who, *stage, passed, false)?;

        let decision = service.decide_next_route(&who, role)?;
        println!(
            "  {:<14} {:<7} -> next route: {:<18} (retry: {})",
            stage.label(),
            if passed { "passed" } else { "failed" },
            decision.target.route_token().0,
            decision.is_retry
        );

        match decision.target {
            RouteTarget::CodingFeedback => {
                println!("  coding feedback view; pipeline ends here");
                return Ok(());
            }
            RouteTarget::Completed => {
                println!("  pipeline complete");
                return Ok(());
            }
            _ => {}
        }
    }

    Ok(())
}
