//! Service flow configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields a playable setup. Environment variables overlay the JSON values:
//!
//! - `BARFLOW_CUSTOMERS_PER_DAY`: customers per day when no plan is authored
//! - `BARFLOW_REQUIRE_RECEIVE_ORDER`: `true`/`false`, keeps the order gate
//! - `BARFLOW_RNG_SEED`: seed for pool selection
//!
//! # Example JSON Config
//!
//! ```json
//! {
//!   "customers_per_day": 4,
//!   "require_receive_order": false,
//!   "rng_seed": 12345,
//!   "prompts": { "start_day": "Open the tablet to start the day." }
//! }
//! ```

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::order::MAX_SLOTS_PER_CUSTOMER;
use crate::errors::FlowError;

pub const ENV_CUSTOMERS_PER_DAY: &str = "BARFLOW_CUSTOMERS_PER_DAY";
pub const ENV_REQUIRE_RECEIVE_ORDER: &str = "BARFLOW_REQUIRE_RECEIVE_ORDER";
pub const ENV_RNG_SEED: &str = "BARFLOW_RNG_SEED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Target customers for a day without an authored plan.
    pub customers_per_day: usize,
    /// Cap on the target for an authored plan.
    pub max_customers_per_plan: usize,
    /// Slots beyond this are dropped when a customer's orders are built.
    pub max_slots_per_customer: usize,
    /// Require an explicit "receive order" acknowledgment per slot.
    pub require_receive_order: bool,
    /// Reseeds the customer source's pool selection; `None` keeps the
    /// source's own seed.
    pub rng_seed: Option<u64>,
    pub prompts: Prompts,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            customers_per_day: 3,
            max_customers_per_plan: 3,
            max_slots_per_customer: MAX_SLOTS_PER_CUSTOMER,
            require_receive_order: true,
            rng_seed: None,
            prompts: Prompts::default(),
        }
    }
}

/// System lines shown while the flow waits on a user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub start_day: String,
    pub receive_customer: String,
    pub receive_order: String,
    pub settlement: String,
    pub rename: String,
    pub disposal_decision: String,
    pub preparing: String,
    pub no_keywords: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            start_day: "Open the tablet to start the day.".to_string(),
            receive_customer: "Greet the next customer.".to_string(),
            receive_order: "Press Receive Order to hear the order.".to_string(),
            settlement: "Press Settle to close out the day.".to_string(),
            rename: "Give the drink a name.".to_string(),
            disposal_decision: "The customer is out cold. Let them stay at the inn?".to_string(),
            preparing: "Mixing the drink...".to_string(),
            no_keywords: "(no keywords)".to_string(),
        }
    }
}

impl FlowConfig {
    /// Parse from an optional JSON value; `None` yields the defaults.
    pub fn from_json(config: Option<&JsonValue>) -> Result<Self, FlowError> {
        let parsed = match config {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| FlowError::config(format!("invalid flow config: {e}")))?,
            None => Self::default(),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FlowError> {
        let value: JsonValue = serde_json::from_str(raw)
            .map_err(|e| FlowError::config(format!("invalid flow config: {e}")))?;
        Self::from_json(Some(&value))
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, FlowError> {
        Self::default().overlay_env(|name| env::var(name).ok())
    }

    /// Overlay values from `lookup`, which maps variable names to raw values.
    pub fn overlay_env<F>(mut self, lookup: F) -> Result<Self, FlowError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(n) = parse_var::<usize, _>(&lookup, ENV_CUSTOMERS_PER_DAY)? {
            self.customers_per_day = n;
        }
        if let Some(flag) = parse_var::<bool, _>(&lookup, ENV_REQUIRE_RECEIVE_ORDER)? {
            self.require_receive_order = flag;
        }
        if let Some(seed) = parse_var::<u64, _>(&lookup, ENV_RNG_SEED)? {
            self.rng_seed = Some(seed);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), FlowError> {
        if self.customers_per_day == 0 {
            return Err(FlowError::config("customers_per_day must be at least 1"));
        }
        if self.max_customers_per_plan == 0 {
            return Err(FlowError::config("max_customers_per_plan must be at least 1"));
        }
        if !(1..=MAX_SLOTS_PER_CUSTOMER).contains(&self.max_slots_per_customer) {
            return Err(FlowError::config(format!(
                "max_slots_per_customer must be within 1..={MAX_SLOTS_PER_CUSTOMER}, got {}",
                self.max_slots_per_customer
            )));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, FlowError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| FlowError::config(format!("{name} has an invalid value: '{raw}'"))),
    }
}
