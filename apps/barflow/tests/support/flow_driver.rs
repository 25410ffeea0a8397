//! Step helpers that play the user and the preparation surface.

use barflow::domain::{Drink, DrinkResult, Phase};

use super::fixtures::TestBar;

/// Skip any dialogue currently showing.
pub fn skip_dialogue(bar: &mut TestBar) -> Phase {
    while matches!(
        bar.flow.phase(),
        Phase::DayIntro { .. } | Phase::AwaitingPostServeDialogue { .. }
    ) {
        bar.flow.advance_dialogue().unwrap();
    }
    bar.flow.phase()
}

/// Open the gate if needed, switch, confirm the switch and fulfill.
pub fn serve(bar: &mut TestBar, drink: Drink, result: DrinkResult) -> Phase {
    if bar.flow.phase() == Phase::AwaitingOrderGate {
        bar.flow.receive_order().unwrap();
    }
    bar.flow.request_service_transition().unwrap();
    let handoff = bar.surface.take().expect("surface received a handoff");
    bar.flow.on_preparation_ready(handoff.ticket).unwrap();
    bar.flow.submit_fulfillment(drink, result).unwrap()
}

/// Serve and name every slot of the current customer with `drink`.
pub fn serve_customer(bar: &mut TestBar, drink: fn() -> Drink, tip: i64) -> Phase {
    loop {
        serve(bar, drink(), super::fixtures::happy(tip));
        bar.flow.confirm_rename("").unwrap();
        let phase = skip_dialogue(bar);
        if !matches!(phase, Phase::AwaitingOrderGate | Phase::InService { .. }) {
            return phase;
        }
    }
}

/// Resolve every pending decision the same way.
pub fn resolve_all(bar: &mut TestBar, sleep: bool) -> Phase {
    while bar.flow.has_pending_decision() {
        if sleep {
            bar.flow.resolve_sleep().unwrap();
        } else {
            bar.flow.resolve_evict().unwrap();
        }
    }
    bar.flow.phase()
}
