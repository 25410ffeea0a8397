use tracing::{debug, info};

use super::ServiceFlow;
use crate::domain::{filter_lines, Phase};
use crate::errors::FlowError;
use crate::services::events::FlowEvent;

impl ServiceFlow {
    /// Start a service day.
    ///
    /// Only valid from `NotPrepared`. Moves the day counter forward if the
    /// previous day was settled, loads today's plan and its intro lines.
    pub fn prepare_day(&mut self) -> Result<Phase, FlowError> {
        if self.phase != Phase::NotPrepared {
            return Err(self.reject("prepare_day"));
        }

        let day = self.day_cycle.start_day();
        self.events.push(FlowEvent::DayStarted { day });

        self.today_customer_index = 0;
        self.served_customers_today = 0;
        self.session = None;
        self.today_plan = self
            .source
            .as_ref()
            .and_then(|source| source.find_plan_for_day(day));

        // An authored plan sets the target even when it lists nobody.
        self.customers_target_today = match &self.today_plan {
            Some(plan) => plan.customers.len().min(self.config.max_customers_per_plan),
            None => self.config.customers_per_day,
        };

        self.lines = self
            .today_plan
            .as_ref()
            .map(|plan| filter_lines(&plan.intro_lines))
            .unwrap_or_default();

        info!(
            day,
            has_plan = self.today_plan.is_some(),
            target = self.customers_target_today,
            intro_lines = self.lines.len(),
            "Day prepared"
        );

        let next = if self.lines.is_empty() {
            Phase::AwaitingCustomer
        } else {
            Phase::DayIntro { line: 0 }
        };
        Ok(self.enter(next))
    }

    /// Consume one line of the active dialogue.
    ///
    /// At the end of the day intro the flow waits for a customer; at the end
    /// of post-serve dialogue the pending advance is resolved.
    pub fn advance_dialogue(&mut self) -> Result<Phase, FlowError> {
        match self.phase {
            Phase::DayIntro { line } => {
                let next = line + 1;
                debug!(line = next, total = self.lines.len(), "Day intro advanced");
                if next < self.lines.len() {
                    Ok(self.enter(Phase::DayIntro { line: next }))
                } else {
                    self.lines.clear();
                    Ok(self.enter(Phase::AwaitingCustomer))
                }
            }
            Phase::AwaitingPostServeDialogue { line, advance } => {
                let next = line + 1;
                debug!(line = next, total = self.lines.len(), "Post-serve dialogue advanced");
                if next < self.lines.len() {
                    Ok(self.enter(Phase::AwaitingPostServeDialogue { line: next, advance }))
                } else {
                    self.lines.clear();
                    Ok(self.resolve_advance(advance))
                }
            }
            _ => {
                debug!(phase = self.phase.name(), "No dialogue to advance");
                Err(FlowError::invalid_phase("advance_dialogue", self.phase.name()))
            }
        }
    }

    /// Close out the day: realize income, produce the report and go idle.
    pub fn settle_day(&mut self) -> Result<Phase, FlowError> {
        if self.phase != Phase::AwaitingSettlement {
            return Err(self.reject("settle_day"));
        }

        let report = self.day_cycle.end_day();
        info!(
            day = report.day,
            served = self.served_customers_today,
            realized_income = report.realized_income,
            "Day settled"
        );
        self.events.push(FlowEvent::DayEnded { report });

        self.session = None;
        self.today_plan = None;
        self.lines.clear();
        self.today_customer_index = 0;
        self.served_customers_today = 0;
        self.customers_target_today = 0;
        Ok(self.enter(Phase::NotPrepared))
    }
}
