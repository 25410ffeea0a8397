use super::ServiceFlow;
use crate::domain::{HandoffState, Phase, SessionState};
use crate::services::view::{FlowView, PromptKind, SlotPosition};

impl ServiceFlow {
    /// What the presentation layer should show right now.
    pub fn current_view(&self) -> FlowView {
        match self.phase {
            Phase::NotPrepared => self.prompt(PromptKind::StartDay),
            Phase::DayIntro { line } => match self.lines.get(line) {
                Some(text) => FlowView::DayIntro {
                    line: text.clone(),
                    index: line,
                    count: self.lines.len(),
                },
                None => self.prompt(PromptKind::ReceiveCustomer),
            },
            Phase::AwaitingCustomer => self.prompt(PromptKind::ReceiveCustomer),
            Phase::AwaitingDisposalDecision { .. } => self.prompt(PromptKind::DisposalDecision),
            Phase::AwaitingOrderGate => self
                .order_view(false)
                .unwrap_or_else(|| self.prompt(PromptKind::ReceiveOrder)),
            Phase::InService {
                handoff: HandoffState::InFlight(_),
            } => self.prompt(PromptKind::Preparing),
            Phase::InService { .. } => self
                .order_view(true)
                .unwrap_or_else(|| self.prompt(PromptKind::ReceiveCustomer)),
            Phase::AwaitingRename { .. } => self.prompt(PromptKind::Rename),
            Phase::AwaitingPostServeDialogue { line, .. } => {
                match (self.session.as_ref(), self.lines.get(line)) {
                    (Some(session), Some(text)) => FlowView::PostServe {
                        customer: session.profile().clone(),
                        slot: slot_position(session),
                        line: text.clone(),
                        index: line,
                        count: self.lines.len(),
                    },
                    _ => self.prompt(PromptKind::ReceiveCustomer),
                }
            }
            Phase::AwaitingSettlement => self.prompt(PromptKind::Settlement),
        }
    }

    fn prompt(&self, prompt: PromptKind) -> FlowView {
        let prompts = &self.config.prompts;
        let line = match prompt {
            PromptKind::StartDay => &prompts.start_day,
            PromptKind::ReceiveCustomer => &prompts.receive_customer,
            PromptKind::ReceiveOrder => &prompts.receive_order,
            PromptKind::Preparing => &prompts.preparing,
            PromptKind::Rename => &prompts.rename,
            PromptKind::DisposalDecision => &prompts.disposal_decision,
            PromptKind::Settlement => &prompts.settlement,
        };
        FlowView::System {
            prompt,
            line: line.clone(),
        }
    }

    /// The current slot's order; the line is the gate prompt while closed.
    fn order_view(&self, gate_open: bool) -> Option<FlowView> {
        let session = self.session.as_ref()?;
        let slot = session.current_slot()?;
        let line = if gate_open {
            slot.order_line()
                .unwrap_or_else(|| self.config.prompts.no_keywords.clone())
        } else {
            self.config.prompts.receive_order.clone()
        };
        Some(FlowView::Order {
            customer: session.profile().clone(),
            slot: slot_position(session),
            line,
            order: slot.order.clone(),
            show_meta: gate_open,
        })
    }
}

fn slot_position(session: &SessionState) -> SlotPosition {
    SlotPosition {
        index: session.slot_cursor(),
        count: session.slots().len(),
    }
}
