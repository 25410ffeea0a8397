use tracing::debug;

use super::ServiceFlow;
use crate::collaborators::{CustomerSource, OrderBuilder, PreparationSurface, Scorer};
use crate::config::flow::FlowConfig;
use crate::domain::Phase;
use crate::errors::FlowError;
use crate::systems::DayCycle;

/// Assembles a `ServiceFlow` from its collaborators.
///
/// Every collaborator is optional. Operations that need a missing one are
/// rejected with `FlowError::MissingCollaborator`; a missing scorer only
/// skips result forwarding.
#[derive(Default)]
pub struct ServiceFlowBuilder {
    config: FlowConfig,
    day_cycle: Option<DayCycle>,
    source: Option<Box<dyn CustomerSource>>,
    order_builder: Option<Box<dyn OrderBuilder>>,
    scorer: Option<Box<dyn Scorer>>,
    surface: Option<Box<dyn PreparationSurface>>,
}

impl ServiceFlowBuilder {
    pub fn config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn day_cycle(mut self, day_cycle: DayCycle) -> Self {
        self.day_cycle = Some(day_cycle);
        self
    }

    pub fn customer_source(mut self, source: impl CustomerSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn order_builder(mut self, builder: impl OrderBuilder + 'static) -> Self {
        self.order_builder = Some(Box::new(builder));
        self
    }

    pub fn scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.scorer = Some(Box::new(scorer));
        self
    }

    pub fn surface(mut self, surface: impl PreparationSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Validate the config and assemble the flow. A configured `rng_seed`
    /// reseeds the customer source.
    pub fn build(mut self) -> Result<ServiceFlow, FlowError> {
        self.config.validate()?;
        if let (Some(seed), Some(source)) = (self.config.rng_seed, self.source.as_mut()) {
            source.reseed(seed);
        }
        debug!(
            has_source = self.source.is_some(),
            has_order_builder = self.order_builder.is_some(),
            has_scorer = self.scorer.is_some(),
            has_surface = self.surface.is_some(),
            rng_seed = ?self.config.rng_seed,
            "Building service flow"
        );
        Ok(ServiceFlow {
            config: self.config,
            day_cycle: self.day_cycle.unwrap_or_default(),
            source: self.source,
            order_builder: self.order_builder,
            scorer: self.scorer,
            surface: self.surface,
            phase: Phase::NotPrepared,
            today_plan: None,
            today_customer_index: 0,
            customers_target_today: 0,
            served_customers_today: 0,
            session: None,
            lines: Vec::new(),
            events: Vec::new(),
        })
    }
}
