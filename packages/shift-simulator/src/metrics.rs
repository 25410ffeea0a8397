//! Per-day metrics built from a simulated day's report and event log.

use barflow::collaborators::DayReport;
use barflow::domain::DayNumber;
use barflow::services::events::EventRecord;
use barflow::{FlowEvent, QueueChange};
use serde::Serialize;

use crate::simulator::DayOutcome;
use crate::types::MetricsLevel;

#[derive(Debug, Clone, Serialize)]
pub struct DayMetrics {
    pub day: DayNumber,
    pub seed: u64,
    pub report: DayReport,
    /// Balance and reputation after settlement.
    pub money: i64,
    pub reputation: f32,
    pub customers: Vec<CustomerMetrics>,
    pub disposals: Vec<DisposalMetrics>,
    pub redirects: Vec<RedirectMetrics>,
    pub phase_changes: u32,
    pub steps: u32,
    pub duration_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventRecord>>,
}

/// One received customer. `finished` is false for customers dropped by a
/// failed preparation switch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerMetrics {
    pub customer_id: String,
    pub slots: usize,
    pub drink_names: Vec<String>,
    pub finished: bool,
    pub average_satisfaction: f32,
    pub total_tip: i64,
    pub left_early: bool,
    pub intox_stage: u8,
    pub can_sleep_at_inn: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisposalMetrics {
    pub customer_id: String,
    pub action: &'static str,
    pub pending_after: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RedirectMetrics {
    pub cause: &'static str,
    pub to: &'static str,
}

pub fn build_day_metrics(
    outcome: &DayOutcome,
    seed: u64,
    level: MetricsLevel,
    duration_ms: f64,
) -> DayMetrics {
    let mut customers: Vec<CustomerMetrics> = Vec::new();
    let mut disposals = Vec::new();
    let mut redirects = Vec::new();
    let mut phase_changes = 0;

    // One customer is active at a time, so names and results always belong
    // to the most recent arrival.
    for event in &outcome.events {
        match event {
            FlowEvent::PhaseChanged { .. } => phase_changes += 1,
            FlowEvent::CustomerArrived { customer_id, slots } => {
                customers.push(CustomerMetrics {
                    customer_id: customer_id.to_string(),
                    slots: *slots,
                    ..CustomerMetrics::default()
                });
            }
            FlowEvent::DrinkNamed { name, .. } => {
                if let Some(current) = customers.last_mut() {
                    current.drink_names.push(name.clone());
                }
            }
            FlowEvent::CustomerFinished { result } => {
                if let Some(current) = customers.last_mut() {
                    current.finished = true;
                    current.average_satisfaction = result.average_satisfaction;
                    current.total_tip = result.total_tip;
                    current.left_early = result.left_early;
                    current.intox_stage = result.intox_stage;
                    current.can_sleep_at_inn = result.can_sleep_at_inn;
                }
            }
            FlowEvent::DecisionQueueChanged { change } => {
                if let Some(disposal) = disposal_from(change) {
                    disposals.push(disposal);
                }
            }
            FlowEvent::Redirected { cause, to } => redirects.push(RedirectMetrics {
                cause: cause.code(),
                to: *to,
            }),
            FlowEvent::DayStarted { .. } | FlowEvent::DayEnded { .. } => {}
        }
    }

    let events = match level {
        MetricsLevel::Summary => None,
        MetricsLevel::Detailed => Some(outcome.events.iter().map(FlowEvent::to_record).collect()),
    };

    DayMetrics {
        day: outcome.day,
        seed,
        report: outcome.report.clone(),
        money: outcome.money,
        reputation: outcome.reputation,
        customers,
        disposals,
        redirects,
        phase_changes,
        steps: outcome.steps,
        duration_ms,
        events,
    }
}

fn disposal_from(change: &QueueChange) -> Option<DisposalMetrics> {
    let (customer_id, action) = match change {
        QueueChange::Enqueued { .. } => return None,
        QueueChange::Slept {
            customer_id,
            success: true,
            ..
        } => (customer_id, "slept"),
        QueueChange::Slept { customer_id, .. } => (customer_id, "sleep_refused"),
        QueueChange::Evicted { customer_id, .. } => (customer_id, "evicted"),
    };
    Some(DisposalMetrics {
        customer_id: customer_id.to_string(),
        action,
        pending_after: change.pending(),
    })
}
