use ulid::Ulid;

/// What happens once the rename (and any post-serve dialogue) is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingAdvance {
    #[default]
    None,
    NextSlot,
    NextCustomer,
    EndDay,
}

/// State of the context switch to the preparation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffState {
    /// Order is exposed; no switch requested yet.
    Idle,
    /// Switch requested; the surface has not confirmed it yet.
    InFlight(Ulid),
    /// Surface confirmed; a fulfillment may be submitted.
    Bound(Ulid),
}

/// The single active state of the service flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No day is running.
    NotPrepared,
    /// Showing the day's intro; `line` indexes the filtered intro lines.
    DayIntro { line: usize },
    /// Waiting for the user to receive the next customer.
    AwaitingCustomer,
    /// A sleep/evict decision is outstanding; `resume` is the displaced phase.
    AwaitingDisposalDecision { resume: Resume },
    /// Customer present; order hidden until it is explicitly received.
    AwaitingOrderGate,
    /// Order exposed; the drink is being prepared.
    InService { handoff: HandoffState },
    /// Drink served; waiting for its name.
    AwaitingRename { advance: PendingAdvance },
    /// Showing the completed slot's closing lines.
    AwaitingPostServeDialogue { line: usize, advance: PendingAdvance },
    /// All customers done; waiting for settlement.
    AwaitingSettlement,
}

/// Phases a pending disposal decision may displace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    DayIntro { line: usize },
    AwaitingCustomer,
    AwaitingOrderGate,
    AwaitingPostServeDialogue { line: usize, advance: PendingAdvance },
    AwaitingSettlement,
}

impl Resume {
    pub fn into_phase(self) -> Phase {
        match self {
            Resume::DayIntro { line } => Phase::DayIntro { line },
            Resume::AwaitingCustomer => Phase::AwaitingCustomer,
            Resume::AwaitingOrderGate => Phase::AwaitingOrderGate,
            Resume::AwaitingPostServeDialogue { line, advance } => {
                Phase::AwaitingPostServeDialogue { line, advance }
            }
            Resume::AwaitingSettlement => Phase::AwaitingSettlement,
        }
    }
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::NotPrepared => "not_prepared",
            Phase::DayIntro { .. } => "day_intro",
            Phase::AwaitingCustomer => "awaiting_customer",
            Phase::AwaitingDisposalDecision { .. } => "awaiting_disposal_decision",
            Phase::AwaitingOrderGate => "awaiting_order_gate",
            Phase::InService { handoff } => match handoff {
                HandoffState::Idle => "in_service",
                HandoffState::InFlight(_) => "in_service_switching",
                HandoffState::Bound(_) => "in_service_preparing",
            },
            Phase::AwaitingRename { .. } => "awaiting_rename",
            Phase::AwaitingPostServeDialogue { .. } => "awaiting_post_serve_dialogue",
            Phase::AwaitingSettlement => "awaiting_settlement",
        }
    }

    /// Advance queued by the last fulfillment, if one is still pending.
    pub fn pending_advance(&self) -> PendingAdvance {
        match self {
            Phase::AwaitingRename { advance }
            | Phase::AwaitingPostServeDialogue { advance, .. }
            | Phase::AwaitingDisposalDecision {
                resume: Resume::AwaitingPostServeDialogue { advance, .. },
            } => *advance,
            _ => PendingAdvance::None,
        }
    }

    /// The resumable form of this phase, if a disposal decision may
    /// displace it. Rename, service and the idle phase are never displaced.
    pub fn displaceable(&self) -> Option<Resume> {
        match *self {
            Phase::DayIntro { line } => Some(Resume::DayIntro { line }),
            Phase::AwaitingCustomer => Some(Resume::AwaitingCustomer),
            Phase::AwaitingOrderGate => Some(Resume::AwaitingOrderGate),
            Phase::AwaitingPostServeDialogue { line, advance } => {
                Some(Resume::AwaitingPostServeDialogue { line, advance })
            }
            Phase::AwaitingSettlement => Some(Resume::AwaitingSettlement),
            Phase::AwaitingDisposalDecision { resume } => Some(resume),
            Phase::NotPrepared | Phase::InService { .. } | Phase::AwaitingRename { .. } => None,
        }
    }

    /// True while a customer session is expected to exist.
    pub fn has_customer(&self) -> bool {
        matches!(
            self,
            Phase::AwaitingOrderGate
                | Phase::InService { .. }
                | Phase::AwaitingRename { .. }
                | Phase::AwaitingPostServeDialogue { .. }
                | Phase::AwaitingDisposalDecision {
                    resume: Resume::AwaitingOrderGate
                        | Resume::AwaitingPostServeDialogue { .. }
                }
        )
    }
}
