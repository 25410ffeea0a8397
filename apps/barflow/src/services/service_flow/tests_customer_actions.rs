use super::test_helpers::{
    definition, drink, harness, outcome, plan, pool_harness, serve_current_slot,
    serve_whole_customer, EchoOrders, ScriptedSource,
};
use super::ServiceFlow;
use crate::config::flow::FlowConfig;
use crate::domain::{HandoffState, PendingAdvance, Phase};
use crate::errors::FlowError;
use crate::services::events::FlowEvent;

fn three_slot_harness(customers: usize) -> super::test_helpers::Harness {
    let defs = (0..customers).map(|i| definition(&format!("c{i}"), 3, &[])).collect();
    harness(ScriptedSource::new(vec![plan(1, &[], defs)], vec![]), false, FlowConfig::default())
}

#[test]
fn receive_customer_needs_a_prepared_day() {
    let mut h = pool_harness(false);
    let err = h.flow.receive_customer().unwrap_err();
    assert_eq!(
        err,
        FlowError::InvalidPhase {
            op: "receive_customer",
            phase: "not_prepared"
        }
    );
    assert!(h.flow.session().is_none());
}

#[test]
fn receive_customer_builds_slots_and_waits_for_order() {
    let mut h = three_slot_harness(2);
    h.flow.prepare_day().unwrap();
    assert_eq!(h.flow.receive_customer().unwrap(), Phase::AwaitingOrderGate);

    let session = h.flow.session().unwrap();
    assert_eq!(session.profile().id.as_str(), "c0");
    assert_eq!(session.slots().len(), 3);
    assert_eq!(session.slot_cursor(), 0);
    assert!(h
        .flow
        .drain_events()
        .iter()
        .any(|e| matches!(e, FlowEvent::CustomerArrived { slots: 3, .. })));
}

#[test]
fn leaving_on_first_slot_never_continues_the_customer() {
    let mut h = three_slot_harness(2);
    h.flow.prepare_day().unwrap();
    h.flow.receive_customer().unwrap();

    let phase = serve_current_slot(&mut h.flow, true);
    assert_eq!(
        phase,
        Phase::AwaitingRename {
            advance: PendingAdvance::NextCustomer
        }
    );
    assert_eq!(h.flow.pending_advance(), PendingAdvance::NextCustomer);
}

#[test]
fn leaving_as_last_customer_ends_the_day() {
    let mut h = three_slot_harness(1);
    h.flow.prepare_day().unwrap();
    h.flow.receive_customer().unwrap();
    serve_current_slot(&mut h.flow, true);
    assert_eq!(h.flow.pending_advance(), PendingAdvance::EndDay);
    assert_eq!(h.flow.confirm_rename("x").unwrap(), Phase::AwaitingSettlement);
}

#[test]
fn slots_advance_only_after_naming() {
    let mut h = three_slot_harness(1);
    h.flow.prepare_day().unwrap();
    h.flow.receive_customer().unwrap();

    assert_eq!(
        serve_current_slot(&mut h.flow, false),
        Phase::AwaitingRename {
            advance: PendingAdvance::NextSlot
        }
    );
    assert_eq!(h.flow.session().unwrap().slot_cursor(), 0);
    assert_eq!(h.flow.confirm_rename("First").unwrap(), Phase::AwaitingOrderGate);
    assert_eq!(h.flow.session().unwrap().slot_cursor(), 1);
    assert_eq!(h.flow.session().unwrap().drink_names(), ["First".to_string()]);
}

#[test]
fn rename_trims_or_defaults() {
    let mut h = pool_harness(false);
    h.flow.prepare_day().unwrap();
    serve_whole_customer(&mut h.flow);

    h.flow.receive_customer().unwrap();
    serve_current_slot(&mut h.flow, false);
    h.flow.confirm_rename("  Old Fashioned  ").unwrap();

    let names: Vec<String> = h
        .flow
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            FlowEvent::DrinkNamed { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["WALKIN's drink".to_string(), "Old Fashioned".to_string()]);
}

#[test]
fn post_serve_lines_play_before_the_advance() {
    let source = ScriptedSource::new(vec![], vec![definition("chatty", 1, &["  ", "Thanks.", "See you."])]);
    let mut h = harness(source, false, FlowConfig::default());
    h.flow.prepare_day().unwrap();
    h.flow.receive_customer().unwrap();
    serve_current_slot(&mut h.flow, false);

    assert_eq!(
        h.flow.confirm_rename("Nightcap").unwrap(),
        Phase::AwaitingPostServeDialogue {
            line: 0,
            advance: PendingAdvance::NextCustomer
        }
    );
    assert_eq!(h.flow.current_view().line(), "Thanks.");
    h.flow.advance_dialogue().unwrap();
    assert_eq!(h.flow.current_view().line(), "See you.");
    assert_eq!(h.flow.advance_dialogue().unwrap(), Phase::AwaitingCustomer);
    assert!(h.flow.session().is_none());
    assert_eq!(h.flow.served_customers_today(), 1);
}

#[test]
fn disabled_order_gate_goes_straight_to_service() {
    let config = FlowConfig {
        require_receive_order: false,
        ..FlowConfig::default()
    };
    let mut h = harness(ScriptedSource::new(vec![], vec![definition("w", 2, &[])]), false, config);
    h.flow.prepare_day().unwrap();
    assert_eq!(
        h.flow.receive_customer().unwrap(),
        Phase::InService {
            handoff: HandoffState::Idle
        }
    );
    serve_current_slot(&mut h.flow, false);
    assert_eq!(
        h.flow.confirm_rename("").unwrap(),
        Phase::InService {
            handoff: HandoffState::Idle
        }
    );
}

#[test]
fn empty_pool_redirects_to_settlement() {
    let mut h = harness(ScriptedSource::default(), false, FlowConfig::default());
    h.flow.prepare_day().unwrap();
    assert_eq!(h.flow.receive_customer().unwrap(), Phase::AwaitingSettlement);
    assert!(h.flow.drain_events().iter().any(|e| matches!(
        e,
        FlowEvent::Redirected {
            cause: FlowError::EmptyCustomerPool,
            to: "awaiting_settlement"
        }
    )));
}

#[test]
fn zero_slot_customer_redirects_to_settlement() {
    let mut h = harness(ScriptedSource::new(vec![], vec![definition("mute", 0, &[])]), false, FlowConfig::default());
    h.flow.prepare_day().unwrap();
    assert_eq!(h.flow.receive_customer().unwrap(), Phase::AwaitingSettlement);
    assert!(h.flow.session().is_none());
}

#[test]
fn missing_order_builder_is_a_rejection() {
    let mut flow = ServiceFlow::builder()
        .customer_source(ScriptedSource::new(vec![], vec![definition("w", 1, &[])]))
        .build()
        .unwrap();
    flow.prepare_day().unwrap();
    assert_eq!(
        flow.receive_customer().unwrap_err(),
        FlowError::MissingCollaborator("order_builder")
    );
    assert_eq!(flow.phase(), Phase::AwaitingCustomer);
}

#[test]
fn missing_scorer_still_progresses() {
    let surface = super::test_helpers::RecordingSurface::default();
    let mut flow = ServiceFlow::builder()
        .customer_source(ScriptedSource::new(vec![], vec![definition("w", 1, &[])]))
        .order_builder(EchoOrders)
        .surface(surface)
        .build()
        .unwrap();
    flow.prepare_day().unwrap();
    assert_eq!(serve_whole_customer(&mut flow), Phase::AwaitingCustomer);
    assert_eq!(flow.served_customers_today(), 1);
    assert_eq!(flow.day_cycle().pending_income(), 0);
    assert!(!flow
        .drain_events()
        .iter()
        .any(|e| matches!(e, FlowEvent::CustomerFinished { .. })));
}

#[test]
fn fulfillment_requires_a_bound_handoff() {
    let mut h = pool_harness(false);
    h.flow.prepare_day().unwrap();
    h.flow.receive_customer().unwrap();
    assert!(h.flow.submit_fulfillment(drink(), outcome(false)).is_err());

    h.flow.receive_order().unwrap();
    assert!(h.flow.submit_fulfillment(drink(), outcome(false)).is_err());
    assert!(h.flow.session().unwrap().served_drinks().is_empty());
}

#[test]
fn rename_outside_rename_is_rejected() {
    let mut h = pool_harness(false);
    h.flow.prepare_day().unwrap();
    assert!(h.flow.confirm_rename("Too early").is_err());
    assert_eq!(h.flow.phase(), Phase::AwaitingCustomer);
}
