//! Observable record of what the flow did.
//!
//! The flow appends events as it mutates; callers drain them with
//! `ServiceFlow::drain_events` after each operation.

use serde::Serialize;

use crate::collaborators::DayReport;
use crate::domain::{CustomerId, CustomerResult, DayNumber};
use crate::errors::FlowError;
use crate::systems::QueueChange;

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    PhaseChanged {
        from: &'static str,
        to: &'static str,
    },
    DayStarted {
        day: DayNumber,
    },
    DayEnded {
        report: DayReport,
    },
    CustomerArrived {
        customer_id: CustomerId,
        slots: usize,
    },
    DrinkNamed {
        customer_id: CustomerId,
        slot_index: usize,
        name: String,
    },
    CustomerFinished {
        result: CustomerResult,
    },
    DecisionQueueChanged {
        change: QueueChange,
    },
    /// An operation succeeded by moving somewhere other than its usual target.
    Redirected {
        cause: FlowError,
        to: &'static str,
    },
}

/// Flat, serializable form used by logs and the simulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub kind: &'static str,
    pub detail: String,
}

impl FlowEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            FlowEvent::PhaseChanged { .. } => "phase_changed",
            FlowEvent::DayStarted { .. } => "day_started",
            FlowEvent::DayEnded { .. } => "day_ended",
            FlowEvent::CustomerArrived { .. } => "customer_arrived",
            FlowEvent::DrinkNamed { .. } => "drink_named",
            FlowEvent::CustomerFinished { .. } => "customer_finished",
            FlowEvent::DecisionQueueChanged { .. } => "decision_queue_changed",
            FlowEvent::Redirected { .. } => "redirected",
        }
    }

    pub fn to_record(&self) -> EventRecord {
        let detail = match self {
            FlowEvent::PhaseChanged { from, to } => format!("{from} -> {to}"),
            FlowEvent::DayStarted { day } => format!("day {day}"),
            FlowEvent::DayEnded { report } => format!(
                "day {} served={} slept={} income={}",
                report.day, report.served_customers, report.slept_customers, report.realized_income
            ),
            FlowEvent::CustomerArrived { customer_id, slots } => {
                format!("{customer_id} with {slots} slot(s)")
            }
            FlowEvent::DrinkNamed {
                customer_id,
                slot_index,
                name,
            } => format!("{customer_id}#{slot_index}: {name}"),
            FlowEvent::CustomerFinished { result } => format!(
                "{} tip={} left_early={}",
                result.customer_id, result.total_tip, result.left_early
            ),
            FlowEvent::DecisionQueueChanged { change } => format!("{change:?}"),
            FlowEvent::Redirected { cause, to } => format!("{} -> {to}", cause.code()),
        };
        EventRecord {
            kind: self.kind(),
            detail,
        }
    }
}
