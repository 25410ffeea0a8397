use crate::collaborators::{CustomerSource, OrderBuilder};
use crate::domain::{
    AbvRange, CustomerCatalog, CustomerDefinition, CustomerId, CustomerProfile, DayPlan, Keyword,
    OrderSpec, SlotAuthoring,
};
use crate::errors::ValidationKind;

struct EchoBuilder;

impl OrderBuilder for EchoBuilder {
    fn build_order(&mut self, keywords: &[Keyword], abv_range: AbvRange, time_limit_secs: f32) -> OrderSpec {
        OrderSpec {
            keywords: keywords.to_vec(),
            abv_range,
            time_limit_secs,
            target: vec![keywords.len() as f32],
        }
    }
}

fn definition(id: &str, slots: usize) -> CustomerDefinition {
    CustomerDefinition {
        profile: CustomerProfile::new(CustomerId::new(id).unwrap(), id.to_uppercase()),
        slots: (0..slots)
            .map(|i| SlotAuthoring {
                keywords: vec![Keyword::new(format!("kw{i}"))],
                ..SlotAuthoring::default()
            })
            .collect(),
    }
}

fn plan(day: u32, ids: &[&str]) -> DayPlan {
    DayPlan {
        day_number: day,
        intro_lines: vec!["Opening time.".into()],
        customers: ids.iter().map(|id| definition(id, 1)).collect(),
    }
}

#[test]
fn plan_lookup_prefers_exact_day_then_position() {
    let catalog = CustomerCatalog::new(vec![plan(1, &["a"]), plan(5, &["b"])], vec![], Some(1)).unwrap();

    assert_eq!(catalog.find_plan_for_day(5).unwrap().customers[0].profile.id.as_str(), "b");
    // Day 2 has no exact plan; position 1 holds day 5's plan.
    assert_eq!(catalog.find_plan_for_day(2).unwrap().day_number, 5);
    assert!(catalog.find_plan_for_day(3).is_none());
}

#[test]
fn pool_pick_is_reproducible_with_a_seed() {
    let pool: Vec<_> = ["a", "b", "c", "d"].iter().map(|id| definition(id, 1)).collect();
    let mut first = CustomerCatalog::new(vec![], pool.clone(), Some(42)).unwrap();
    let mut second = CustomerCatalog::new(vec![], pool, Some(42)).unwrap();

    for _ in 0..10 {
        let a = first.pick_from_pool().unwrap();
        let b = second.pick_from_pool().unwrap();
        assert_eq!(a.profile.id, b.profile.id);
    }
}

#[test]
fn reseed_restarts_pool_selection() {
    let pool: Vec<_> = ["a", "b", "c", "d"].iter().map(|id| definition(id, 1)).collect();
    let mut seeded = CustomerCatalog::new(vec![], pool.clone(), Some(9)).unwrap();
    let mut unseeded = CustomerCatalog::new(vec![], pool, None).unwrap();
    unseeded.reseed(9);

    for _ in 0..10 {
        let a = seeded.pick_from_pool().unwrap();
        let b = unseeded.pick_from_pool().unwrap();
        assert_eq!(a.profile.id, b.profile.id);
    }
}

#[test]
fn empty_pool_yields_none() {
    let mut catalog = CustomerCatalog::new(vec![], vec![], None).unwrap();
    assert!(catalog.pick_from_pool().is_none());
}

#[test]
fn profile_lookup_searches_plans_and_pool() {
    let catalog =
        CustomerCatalog::new(vec![plan(1, &["planned"])], vec![definition("walkin", 2)], Some(3)).unwrap();
    assert_eq!(catalog.find_profile("planned").unwrap().display_name, "PLANNED");
    assert_eq!(catalog.find_profile("walkin").unwrap().display_name, "WALKIN");
    assert!(catalog.find_profile("ghost").is_none());
}

#[test]
fn validation_rejects_bad_catalogs() {
    let err = CustomerCatalog::new(vec![plan(0, &["a"])], vec![], None).err().unwrap();
    assert_eq!(err.kind(), Some(&ValidationKind::InvalidDayNumber));

    let err = CustomerCatalog::new(vec![plan(2, &["a"]), plan(2, &["b"])], vec![], None)
        .err()
        .unwrap();
    assert_eq!(err.kind(), Some(&ValidationKind::DuplicateDay));

    let err = CustomerCatalog::new(vec![], vec![definition("empty", 0)], None).err().unwrap();
    assert_eq!(err.kind(), Some(&ValidationKind::NoSlots));
}

#[test]
fn catalog_loads_from_json() {
    let raw = r#"{
        "plans": [{
            "day_number": 1,
            "intro_lines": ["Rain again.", "  "],
            "customers": [{
                "profile": {"id": "mira", "display_name": "Mira", "tolerance": "strong"},
                "slots": [{"keywords": [{"id": "calm"}], "post_serve_lines": ["Thanks."]}]
            }]
        }],
        "pool": [{
            "profile": {"id": "drifter"},
            "slots": [{"dialogue_line": "Something strong.", "time_limit_secs": 30.0}]
        }]
    }"#;
    let catalog = CustomerCatalog::from_json_str(raw, Some(9)).unwrap();
    assert_eq!(catalog.plans().len(), 1);
    assert_eq!(catalog.pool()[0].slots[0].time_limit_secs, 30.0);
    assert_eq!(catalog.plans()[0].customers[0].slots[0].time_limit_secs, 60.0);
}

#[test]
fn blank_customer_id_fails_to_parse() {
    let raw = r#"{"pool": [{"profile": {"id": "   "}, "slots": [{}]}]}"#;
    assert!(CustomerCatalog::from_json_str(raw, None).is_err());
}

#[test]
fn build_slots_truncates_and_uses_builder() {
    let def = definition("greedy", 5);
    let slots = def.build_slots(&mut EchoBuilder, 3);
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[2].order.keywords[0].id, "kw2");
    assert_eq!(slots[0].order.target, vec![1.0]);
}

#[test]
fn order_line_falls_back_to_keyword_labels() {
    let mut def = definition("k", 1);
    def.slots[0].keywords = vec![
        Keyword::new("sad"),
        Keyword {
            id: "warm".into(),
            display_name: Some("Warmth".into()),
        },
    ];
    def.slots[0].dialogue_line = Some("   ".into());
    let slot = &def.build_slots(&mut EchoBuilder, 3)[0];
    assert_eq!(slot.order_line().as_deref(), Some("sad, Warmth"));

    def.slots[0].keywords.clear();
    let slot = &def.build_slots(&mut EchoBuilder, 3)[0];
    assert!(slot.order_line().is_none());
}
