use super::test_helpers::{definition, harness, pool_harness, serve_current_slot, ScriptedSource};
use crate::config::flow::FlowConfig;
use crate::domain::Keyword;
use crate::services::view::{FlowView, PromptKind};

#[test]
fn idle_flow_prompts_to_start() {
    let h = pool_harness(false);
    assert!(matches!(
        h.flow.current_view(),
        FlowView::System {
            prompt: PromptKind::StartDay,
            ..
        }
    ));
}

#[test]
fn order_meta_hidden_until_gate_opens() {
    let mut h = pool_harness(false);
    h.flow.prepare_day().unwrap();
    h.flow.receive_customer().unwrap();

    match h.flow.current_view() {
        FlowView::Order { show_meta, line, .. } => {
            assert!(!show_meta);
            assert_eq!(line, h.flow.config().prompts.receive_order);
        }
        other => panic!("unexpected view {other:?}"),
    }

    h.flow.receive_order().unwrap();
    match h.flow.current_view() {
        FlowView::Order {
            show_meta,
            line,
            slot,
            ..
        } => {
            assert!(show_meta);
            assert_eq!(line, "mood0");
            assert_eq!((slot.index, slot.count), (0, 1));
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn authored_line_wins_and_missing_keywords_have_a_placeholder() {
    let mut talker = definition("talker", 2, &[]);
    talker.slots[0].dialogue_line = Some("  Something bitter.  ".into());
    talker.slots[1].keywords = Vec::<Keyword>::new();
    let mut h = harness(ScriptedSource::new(vec![], vec![talker]), false, FlowConfig::default());
    h.flow.prepare_day().unwrap();
    h.flow.receive_customer().unwrap();
    h.flow.receive_order().unwrap();
    assert_eq!(h.flow.current_view().line(), "Something bitter.");

    serve_current_slot(&mut h.flow, false);
    assert!(matches!(
        h.flow.current_view(),
        FlowView::System {
            prompt: PromptKind::Rename,
            ..
        }
    ));
    h.flow.confirm_rename("").unwrap();
    h.flow.receive_order().unwrap();
    assert_eq!(h.flow.current_view().line(), "(no keywords)");
}

#[test]
fn switching_shows_the_preparing_prompt() {
    let mut h = pool_harness(false);
    h.flow.prepare_day().unwrap();
    h.flow.receive_customer().unwrap();
    h.flow.receive_order().unwrap();
    h.flow.request_service_transition().unwrap();
    assert!(matches!(
        h.flow.current_view(),
        FlowView::System {
            prompt: PromptKind::Preparing,
            ..
        }
    ));
}
