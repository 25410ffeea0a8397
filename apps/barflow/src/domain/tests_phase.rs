use ulid::Ulid;

use crate::domain::{HandoffState, PendingAdvance, Phase, Resume};

#[test]
fn in_service_names_follow_handoff() {
    let ticket = Ulid::new();
    assert_eq!(Phase::InService { handoff: HandoffState::Idle }.name(), "in_service");
    assert_eq!(
        Phase::InService { handoff: HandoffState::InFlight(ticket) }.name(),
        "in_service_switching"
    );
    assert_eq!(
        Phase::InService { handoff: HandoffState::Bound(ticket) }.name(),
        "in_service_preparing"
    );
}

#[test]
fn rename_and_service_are_never_displaced() {
    assert!(Phase::NotPrepared.displaceable().is_none());
    assert!(Phase::InService { handoff: HandoffState::Idle }.displaceable().is_none());
    assert!(Phase::AwaitingRename { advance: PendingAdvance::EndDay }
        .displaceable()
        .is_none());
}

#[test]
fn displaced_phase_round_trips_through_resume() {
    let phases = [
        Phase::DayIntro { line: 2 },
        Phase::AwaitingCustomer,
        Phase::AwaitingOrderGate,
        Phase::AwaitingPostServeDialogue {
            line: 1,
            advance: PendingAdvance::NextSlot,
        },
        Phase::AwaitingSettlement,
    ];
    for phase in phases {
        let resume = phase.displaceable().unwrap();
        assert_eq!(resume.into_phase(), phase);
    }
}

#[test]
fn disposal_phase_resumes_what_it_displaced() {
    let resume = Resume::AwaitingOrderGate;
    let phase = Phase::AwaitingDisposalDecision { resume };
    assert_eq!(phase.displaceable(), Some(resume));
    assert!(phase.has_customer());
    assert!(!Phase::AwaitingDisposalDecision {
        resume: Resume::AwaitingCustomer
    }
    .has_customer());
}

#[test]
fn pending_advance_is_visible_through_disposal() {
    let phase = Phase::AwaitingDisposalDecision {
        resume: Resume::AwaitingPostServeDialogue {
            line: 0,
            advance: PendingAdvance::EndDay,
        },
    };
    assert_eq!(phase.pending_advance(), PendingAdvance::EndDay);
    assert_eq!(Phase::AwaitingCustomer.pending_advance(), PendingAdvance::None);
}
