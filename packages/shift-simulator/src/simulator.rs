//! In-memory driver that plays whole service days against `ServiceFlow`.
//!
//! The simulated user always takes the next legal action for the current
//! phase. Preparation is answered by a `Bartender` that aims at the order's
//! target ABV with some noise, so satisfaction, tips and intoxication vary
//! from customer to customer.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::error::Error;
use std::rc::Rc;

use barflow::collaborators::{
    DayReport, NavigationError, OrderBuilder, PreparationSurface, Scorer,
};
use barflow::domain::{
    AbvRange, CustomerCatalog, CustomerResult, DayNumber, Drink, DrinkResult, HandoffState,
    IcePreference, Keyword, OrderSpec, Phase, ServiceHandoff, SessionState, Tolerance,
};
use barflow::{FlowConfig, FlowError, FlowEvent, ServiceFlow};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use ulid::Ulid;

use crate::types::SleepPolicy;

/// Catalog used when no `--catalog` is given.
pub const DEMO_CATALOG: &str = include_str!("../data/demo_catalog.json");

/// A day that needs more operations than this is stuck.
const MAX_STEPS_PER_DAY: u32 = 10_000;

/// Satisfaction below this makes the customer walk out.
const WALK_OUT_BELOW: f32 = 20.0;

type Mailbox = Rc<RefCell<VecDeque<ServiceHandoff>>>;

/// Preparation surface that queues handoffs for the bartender.
struct MailboxSurface {
    inbox: Mailbox,
}

impl PreparationSurface for MailboxSurface {
    fn enter(&mut self, handoff: ServiceHandoff) -> Result<(), NavigationError> {
        self.inbox.borrow_mut().push_back(handoff);
        Ok(())
    }
}

/// Targets the middle of the authored ABV range.
struct MidpointOrders;

impl OrderBuilder for MidpointOrders {
    fn build_order(
        &mut self,
        keywords: &[Keyword],
        abv_range: AbvRange,
        time_limit_secs: f32,
    ) -> OrderSpec {
        OrderSpec {
            keywords: keywords.to_vec(),
            abv_range,
            time_limit_secs,
            target: vec![(abv_range.min + abv_range.max) / 2.0],
        }
    }
}

/// Scores intoxication from pure alcohol served, scaled by tolerance.
struct IntoxScorer;

impl IntoxScorer {
    fn stage(session: &SessionState) -> u8 {
        let alcohol_ml: f32 = session
            .served_drinks()
            .iter()
            .map(|drink| drink.abv / 100.0 * drink.volume_ml)
            .sum();
        let per_stage = match session.profile().tolerance {
            Tolerance::Weak => 15.0,
            Tolerance::Normal => 25.0,
            Tolerance::Strong => 40.0,
        };
        (alcohol_ml / per_stage).floor().clamp(0.0, 4.0) as u8
    }
}

impl Scorer for IntoxScorer {
    fn score_customer(&self, session: &SessionState) -> CustomerResult {
        let results = session.served_results();
        let average = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.satisfaction).sum::<f32>() / results.len() as f32
        };
        let stage = Self::stage(session);
        CustomerResult {
            customer_id: session.profile().id.clone(),
            drink_results: results.to_vec(),
            average_satisfaction: average,
            total_tip: results.iter().map(|r| r.tip).sum(),
            reputation_delta: (average - 50.0) / 100.0,
            left_early: session.left_early(),
            intox_stage: stage,
            can_sleep_at_inn: stage >= 3,
            is_over: stage >= 4,
        }
    }
}

/// The simulated user at the preparation surface.
struct Bartender {
    rng: StdRng,
}

impl Bartender {
    fn prepare(&mut self, handoff: &ServiceHandoff) -> (Drink, DrinkResult) {
        let range = handoff.order.abv_range;
        let target = handoff
            .order
            .target
            .first()
            .copied()
            .unwrap_or((range.min + range.max) / 2.0);
        let spread = (range.max - range.min).max(1.0);
        let abv = (target + self.rng.random_range(-1.0f32..=1.0) * spread).clamp(0.0, 100.0);
        let uses_ice = match handoff.profile.ice_preference {
            IcePreference::Like => self.rng.random_bool(0.8),
            IcePreference::Dislike => self.rng.random_bool(0.2),
            IcePreference::Neutral => self.rng.random_bool(0.5),
        };
        let volume_ml = self.rng.random_range(120.0f32..=250.0);

        let miss = ((abv - target).abs() / spread).min(1.0);
        let ice_penalty = match (handoff.profile.ice_preference, uses_ice) {
            (IcePreference::Like, false) | (IcePreference::Dislike, true) => 15.0,
            _ => 0.0,
        };
        let satisfaction = (100.0 * (1.0 - miss) - ice_penalty).clamp(0.0, 100.0);
        let customer_left = satisfaction < WALK_OUT_BELOW;
        let tip = if customer_left {
            0
        } else {
            (satisfaction / 10.0).round() as i64
        };

        (
            Drink {
                abv,
                volume_ml,
                uses_ice,
            },
            DrinkResult {
                satisfaction,
                tip,
                customer_left,
            },
        )
    }

    /// Blank one time in five, which exercises the default-name fallback.
    fn name_drink(&mut self, keywords: &[Keyword]) -> String {
        if self.rng.random_bool(0.2) {
            return String::new();
        }
        let label = keywords.first().map(Keyword::label).unwrap_or("House");
        format!("{label} No. {}", self.rng.random_range(1..=99))
    }
}

/// Everything observed while playing one day.
#[derive(Debug, Clone)]
pub struct DayOutcome {
    pub day: DayNumber,
    pub report: DayReport,
    pub events: Vec<FlowEvent>,
    pub steps: u32,
    pub money: i64,
    pub reputation: f32,
}

pub struct Simulator {
    flow: ServiceFlow,
    inbox: Mailbox,
    bartender: Bartender,
    policy: SleepPolicy,
    navigation_failure_rate: f64,
    rng: StdRng,
}

impl Simulator {
    pub fn new(
        catalog: CustomerCatalog,
        config: FlowConfig,
        policy: SleepPolicy,
        seed: u64,
    ) -> Result<Self, FlowError> {
        let inbox = Mailbox::default();
        let flow = ServiceFlow::builder()
            .config(config)
            .customer_source(catalog)
            .order_builder(MidpointOrders)
            .scorer(IntoxScorer)
            .surface(MailboxSurface {
                inbox: Rc::clone(&inbox),
            })
            .build()?;

        Ok(Self {
            flow,
            inbox,
            bartender: Bartender {
                rng: StdRng::seed_from_u64(seed),
            },
            policy,
            navigation_failure_rate: 0.0,
            rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
        })
    }

    /// Chance that a preparation switch fails after it was requested.
    pub fn with_navigation_failure_rate(mut self, rate: f64) -> Self {
        self.navigation_failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn flow(&self) -> &ServiceFlow {
        &self.flow
    }

    /// Play from `prepare_day` through settlement.
    pub fn run_day(&mut self) -> Result<DayOutcome, Box<dyn Error>> {
        let mut events = Vec::new();
        self.flow.prepare_day()?;
        let day = self.flow.day_cycle().current_day();
        events.extend(self.flow.drain_events());
        info!(day, target = self.flow.customers_target_today(), "Simulating day");

        let mut steps = 0;
        while self.flow.phase() != Phase::NotPrepared {
            steps += 1;
            if steps > MAX_STEPS_PER_DAY {
                return Err(format!(
                    "day {day} did not settle within {MAX_STEPS_PER_DAY} steps (stuck in {})",
                    self.flow.phase().name()
                )
                .into());
            }
            self.step()?;
            events.extend(self.flow.drain_events());
        }

        let report = self
            .flow
            .day_cycle()
            .last_report()
            .cloned()
            .ok_or("day settled without a report")?;
        Ok(DayOutcome {
            day,
            report,
            events,
            steps,
            money: self.flow.day_cycle().money(),
            reputation: self.flow.day_cycle().reputation(),
        })
    }

    fn step(&mut self) -> Result<(), Box<dyn Error>> {
        let phase = self.flow.phase();
        debug!(phase = phase.name(), "Step");
        match phase {
            Phase::NotPrepared => {}
            Phase::DayIntro { .. } | Phase::AwaitingPostServeDialogue { .. } => {
                self.flow.advance_dialogue()?;
            }
            Phase::AwaitingCustomer => {
                self.flow.receive_customer()?;
            }
            Phase::AwaitingDisposalDecision { .. } => self.decide()?,
            Phase::AwaitingOrderGate => {
                self.flow.receive_order()?;
            }
            Phase::InService { handoff } => self.serve(handoff)?,
            Phase::AwaitingRename { .. } => {
                let keywords = self
                    .flow
                    .session()
                    .and_then(|s| s.current_slot())
                    .map(|slot| slot.keywords.clone())
                    .unwrap_or_default();
                let name = self.bartender.name_drink(&keywords);
                self.flow.confirm_rename(&name)?;
            }
            Phase::AwaitingSettlement => {
                self.flow.settle_day()?;
            }
        }
        Ok(())
    }

    fn decide(&mut self) -> Result<(), Box<dyn Error>> {
        let sleep = match self.policy {
            SleepPolicy::Always => true,
            SleepPolicy::Never => false,
            SleepPolicy::Random => self.rng.random_bool(0.5),
        };
        if sleep {
            self.flow.resolve_sleep()?;
        } else {
            self.flow.resolve_evict()?;
        }
        Ok(())
    }

    fn serve(&mut self, handoff: HandoffState) -> Result<(), Box<dyn Error>> {
        match handoff {
            HandoffState::Idle => {
                self.flow.request_service_transition()?;
            }
            HandoffState::InFlight(ticket) => {
                if self.navigation_failure_rate > 0.0
                    && self.rng.random_bool(self.navigation_failure_rate)
                {
                    self.inbox.borrow_mut().clear();
                    self.flow
                        .on_preparation_failed(ticket, "simulated navigation failure")?;
                } else {
                    self.flow.on_preparation_ready(ticket)?;
                }
            }
            HandoffState::Bound(ticket) => {
                let handoff = self
                    .take_handoff(ticket)
                    .ok_or_else(|| format!("no handoff delivered for ticket {ticket}"))?;
                let (drink, result) = self.bartender.prepare(&handoff);
                self.flow.submit_fulfillment(drink, result)?;
            }
        }
        Ok(())
    }

    fn take_handoff(&self, ticket: Ulid) -> Option<ServiceHandoff> {
        let mut inbox = self.inbox.borrow_mut();
        while let Some(handoff) = inbox.pop_front() {
            if handoff.ticket == ticket {
                return Some(handoff);
            }
        }
        None
    }
}
