//! Deterministic collaborators for the flow's unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use ulid::Ulid;

use super::ServiceFlow;
use crate::collaborators::{
    CustomerSource, NavigationError, OrderBuilder, PreparationSurface, Scorer,
};
use crate::config::flow::FlowConfig;
use crate::domain::{
    AbvRange, CustomerDefinition, CustomerId, CustomerProfile, CustomerResult, DayNumber, DayPlan,
    Drink, DrinkResult, HandoffState, Keyword, OrderSpec, Phase, ServiceHandoff, SessionState,
    SlotAuthoring,
};

pub struct EchoOrders;

impl OrderBuilder for EchoOrders {
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
            target: Vec::new(),
        }
    }
}

/// Plans by day plus a pool handed out in order, cycling.
#[derive(Default)]
pub struct ScriptedSource {
    pub plans: Vec<DayPlan>,
    pub pool: Vec<CustomerDefinition>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(plans: Vec<DayPlan>, pool: Vec<CustomerDefinition>) -> Self {
        Self {
            plans,
            pool,
            next: 0,
        }
    }
}

impl CustomerSource for ScriptedSource {
    fn find_plan_for_day(&self, day: DayNumber) -> Option<DayPlan> {
        self.plans.iter().find(|p| p.day_number == day).cloned()
    }

    fn pick_from_pool(&mut self) -> Option<CustomerDefinition> {
        if self.pool.is_empty() {
            return None;
        }
        let picked = self.pool[self.next % self.pool.len()].clone();
        self.next += 1;
        Some(picked)
    }

    fn find_profile(&self, id: &str) -> Option<CustomerProfile> {
        self.plans
            .iter()
            .flat_map(|p| p.customers.iter())
            .chain(self.pool.iter())
            .map(|d| &d.profile)
            .find(|p| p.id.as_str() == id)
            .cloned()
    }
}

/// Records every handoff; optionally refuses to switch.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub handoffs: Rc<RefCell<Vec<ServiceHandoff>>>,
    pub refuse: bool,
}

impl PreparationSurface for RecordingSurface {
    fn enter(&mut self, handoff: ServiceHandoff) -> Result<(), NavigationError> {
        self.handoffs.borrow_mut().push(handoff);
        if self.refuse {
            return Err(NavigationError("scene unavailable".to_string()));
        }
        Ok(())
    }
}

/// Sums tips; every customer can sleep when `sleepy` is set.
pub struct TallyScorer {
    pub sleepy: bool,
}

impl Scorer for TallyScorer {
    fn score_customer(&self, session: &SessionState) -> CustomerResult {
        let results = session.served_results().to_vec();
        let total_tip = results.iter().map(|r| r.tip).sum();
        CustomerResult {
            customer_id: session.profile().id.clone(),
            average_satisfaction: 50.0,
            total_tip,
            reputation_delta: 0.0,
            left_early: session.left_early(),
            intox_stage: if self.sleepy { 4 } else { 1 },
            can_sleep_at_inn: self.sleepy,
            is_over: false,
            drink_results: results,
        }
    }
}

pub fn definition(id: &str, slots: usize, post_serve: &[&str]) -> CustomerDefinition {
    CustomerDefinition {
        profile: CustomerProfile::new(CustomerId::new(id).unwrap(), id.to_uppercase()),
        slots: (0..slots)
            .map(|i| SlotAuthoring {
                keywords: vec![Keyword::new(format!("mood{i}"))],
                post_serve_lines: post_serve.iter().map(|s| s.to_string()).collect(),
                ..SlotAuthoring::default()
            })
            .collect(),
    }
}

pub fn plan(day: DayNumber, intro: &[&str], customers: Vec<CustomerDefinition>) -> DayPlan {
    DayPlan {
        day_number: day,
        intro_lines: intro.iter().map(|s| s.to_string()).collect(),
        customers,
    }
}

pub struct Harness {
    pub flow: ServiceFlow,
    pub surface: RecordingSurface,
}

pub fn harness(source: ScriptedSource, sleepy: bool, config: FlowConfig) -> Harness {
    let surface = RecordingSurface::default();
    let flow = ServiceFlow::builder()
        .config(config)
        .customer_source(source)
        .order_builder(EchoOrders)
        .scorer(TallyScorer { sleepy })
        .surface(surface.clone())
        .build()
        .unwrap();
    Harness { flow, surface }
}

/// Pool-only flow with single-slot customers.
pub fn pool_harness(sleepy: bool) -> Harness {
    harness(
        ScriptedSource::new(vec![], vec![definition("walkin", 1, &[])]),
        sleepy,
        FlowConfig::default(),
    )
}

pub fn drink() -> Drink {
    Drink {
        abv: 18.0,
        volume_ml: 90.0,
        uses_ice: false,
    }
}

pub fn outcome(left: bool) -> DrinkResult {
    DrinkResult {
        satisfaction: if left { 5.0 } else { 80.0 },
        tip: 10,
        customer_left: left,
    }
}

pub fn in_flight_ticket(flow: &ServiceFlow) -> Ulid {
    match flow.phase() {
        Phase::InService {
            handoff: HandoffState::InFlight(ticket),
        } => ticket,
        other => panic!("expected in-flight handoff, got {other:?}"),
    }
}

/// From the order gate (or an open gate) to `AwaitingRename`.
pub fn serve_current_slot(flow: &mut ServiceFlow, left: bool) -> Phase {
    if flow.phase() == Phase::AwaitingOrderGate {
        flow.receive_order().unwrap();
    }
    flow.request_service_transition().unwrap();
    let ticket = in_flight_ticket(flow);
    flow.on_preparation_ready(ticket).unwrap();
    flow.submit_fulfillment(drink(), outcome(left)).unwrap()
}

/// Receive, serve every slot and name every drink of one customer.
pub fn serve_whole_customer(flow: &mut ServiceFlow) -> Phase {
    flow.receive_customer().unwrap();
    loop {
        serve_current_slot(flow, false);
        let mut phase = flow.confirm_rename("").unwrap();
        while matches!(phase, Phase::AwaitingPostServeDialogue { .. }) {
            phase = flow.advance_dialogue().unwrap();
        }
        if !matches!(phase, Phase::AwaitingOrderGate | Phase::InService { .. }) {
            return phase;
        }
    }
}
