use bandchart::chart::{BarChart, ChartProps};
use bandchart::data_types::{BarId, ChartConfig, TooltipPayload};
use bandchart::selection::{Selection, TooltipSink};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

type Events = Rc<RefCell<Vec<(Option<TooltipPayload>, Vec2)>>>;

struct RecordingSink {
    events: Events,
}

impl TooltipSink for RecordingSink {
    fn show_tooltip(&mut self, payload: Option<TooltipPayload>, position: Vec2) {
        self.events.borrow_mut().push((payload, position));
    }
}

fn props(groups: &[&str], x: &[&[&str]], y: &[&[f64]], width: f32, height: f32) -> ChartProps {
    ChartProps {
        groups: groups.iter().map(|s| s.to_string()).collect(),
        x_series: x
            .iter()
            .map(|g| g.iter().map(|s| s.to_string()).collect())
            .collect(),
        y_series: y.iter().map(|g| g.to_vec()).collect(),
        width,
        height,
        config: ChartConfig::default(),
        origin: Vec2::ZERO,
    }
}

fn chart(p: ChartProps) -> (BarChart, Events) {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = RecordingSink {
        events: events.clone(),
    };
    let chart = BarChart::new(p, Box::new(sink)).unwrap();
    (chart, events)
}

#[test]
fn test_end_to_end_mixed_sign_chart() {
    let (chart, _) = chart(props(
        &["Q1", "Q2"],
        &[&["a"], &["a"]],
        &[&[-5.0], &[10.0]],
        100.0,
        100.0,
    ));

    let baseline = chart.area().baseline_row(&chart.scales().y);
    let bars = chart.bars();
    assert_eq!(bars.len(), 2);

    let q1 = &bars[0];
    let q2 = &bars[1];
    assert!((q1.geometry.y - baseline).abs() < 1e-3);
    assert!((q1.geometry.height - 5.0 / 15.0 * 80.0).abs() < 1e-3);
    assert!((q2.geometry.y + q2.geometry.height - baseline).abs() < 1e-3);
    assert!((q2.geometry.height - 10.0 / 15.0 * 80.0).abs() < 1e-3);
}

#[test]
fn test_mismatched_series_rejected() {
    let p = props(&["A", "B"], &[&["a"]], &[&[1.0], &[2.0]], 300.0, 200.0);
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = RecordingSink {
        events: events.clone(),
    };
    assert!(BarChart::new(p, Box::new(sink)).is_err());
}

#[test]
fn test_item_count_mismatch_rejected() {
    let p = props(&["A"], &[&["a", "b"]], &[&[1.0]], 300.0, 200.0);
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = RecordingSink {
        events: events.clone(),
    };
    assert!(BarChart::new(p, Box::new(sink)).is_err());
}

#[test]
fn test_invalid_dimensions_rejected() {
    let p = props(&["A"], &[&["a"]], &[&[1.0]], -10.0, 200.0);
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = RecordingSink {
        events: events.clone(),
    };
    assert!(BarChart::new(p, Box::new(sink)).is_err());
}

#[test]
fn test_rejected_update_keeps_previous_state() {
    let (mut chart, _) = chart(props(&["A"], &[&["a"]], &[&[5.0]], 300.0, 200.0));
    let bad = props(&["A", "B"], &[&["a"]], &[&[1.0], &[2.0]], 300.0, 200.0);
    assert!(chart.update(bad).is_err());
    assert_eq!(chart.bars().len(), 1);
    assert_eq!(chart.bars()[0].data_y, 5.0);
}

#[test]
fn test_hover_emits_tooltip_then_deselect_hides() {
    let (mut chart, events) = chart(props(
        &["A", "B"],
        &[&["a"], &["b"]],
        &[&[10.0], &[30.0]],
        300.0,
        200.0,
    ));

    chart.hover(BarId::new(1, 0));
    assert_eq!(chart.selection(), Selection::Active(BarId::new(1, 0)));
    {
        let evs = events.borrow();
        let (payload, _) = evs.last().unwrap();
        let payload = payload.as_ref().unwrap();
        assert_eq!(payload.group, "B");
        assert_eq!(payload.percentage, 0.75);
    }

    chart.deselect();
    assert_eq!(chart.selection(), Selection::Idle);
    let evs = events.borrow();
    assert_eq!(*evs.last().unwrap(), (None, Vec2::ZERO));
}

#[test]
fn test_touch_toggle_through_chart() {
    let (mut chart, events) = chart(props(
        &["A", "B"],
        &[&["a"], &["b"]],
        &[&[10.0], &[30.0]],
        300.0,
        200.0,
    ));
    let id = BarId::new(0, 0);

    chart.touch(id);
    assert_eq!(chart.selection(), Selection::Active(id));
    chart.touch(id);
    assert_eq!(chart.selection(), Selection::Idle);
    assert_eq!(*events.borrow().last().unwrap(), (None, Vec2::ZERO));
}

#[test]
fn test_exactly_one_item_active() {
    let (mut chart, _) = chart(props(
        &["A"],
        &[&["a", "b", "c"]],
        &[&[1.0, 2.0, 3.0]],
        300.0,
        200.0,
    ));
    chart.hover(BarId::new(0, 1));

    let active: Vec<BarId> = chart
        .items()
        .iter()
        .filter(|i| i.is_active())
        .map(|i| i.id())
        .collect();
    assert_eq!(active, vec![BarId::new(0, 1)]);
}

#[test]
fn test_items_mirror_bars() {
    let (chart, _) = chart(props(
        &["A", "B"],
        &[&["a", "b"], &["c"]],
        &[&[10.0, -4.0], &[6.0]],
        300.0,
        200.0,
    ));

    assert_eq!(chart.items().len(), chart.bars().len());
    for (item, bar) in chart.items().iter().zip(chart.bars()) {
        assert_eq!(item.id(), bar.id);
        assert_eq!(item.geometry(), bar.geometry);
        assert_eq!(item.data_x(), bar.data_x);
        assert_eq!(item.data_y(), bar.data_y);
        assert!(!item.is_active());
    }
}

#[test]
fn test_update_preserves_resolving_selection() {
    let (mut chart, events) = chart(props(
        &["A", "B"],
        &[&["a"], &["b"]],
        &[&[10.0], &[30.0]],
        300.0,
        200.0,
    ));
    let id = BarId::new(0, 0);
    chart.hover(id);

    // same shape, new values: the selection survives and the tooltip is
    // re-emitted against the new data
    chart
        .update(props(
            &["A", "B"],
            &[&["a"], &["b"]],
            &[&[20.0], &[60.0]],
            300.0,
            200.0,
        ))
        .unwrap();

    assert_eq!(chart.selection(), Selection::Active(id));
    let evs = events.borrow();
    let (payload, _) = evs.last().unwrap();
    assert_eq!(payload.as_ref().unwrap().y_value, 20.0);
}

#[test]
fn test_update_drops_vanished_selection() {
    let (mut chart, events) = chart(props(
        &["A", "B"],
        &[&["a"], &["b"]],
        &[&[10.0], &[30.0]],
        300.0,
        200.0,
    ));
    chart.hover(BarId::new(1, 0));

    chart
        .update(props(&["A"], &[&["a"]], &[&[10.0]], 300.0, 200.0))
        .unwrap();

    assert_eq!(chart.selection(), Selection::Idle);
    assert_eq!(*events.borrow().last().unwrap(), (None, Vec2::ZERO));
}

#[test]
fn test_unmounted_bar_ignores_pointer_events() {
    let (mut chart, events) = chart(props(
        &["A", "B"],
        &[&["a"], &["b"]],
        &[&[10.0], &[30.0]],
        300.0,
        200.0,
    ));
    let id = BarId::new(1, 0);
    chart.unmount_bar(id);

    chart.hover(id);
    assert_eq!(chart.selection(), Selection::Idle);
    assert!(events.borrow().is_empty());
    assert_eq!(chart.items().len(), 1);
}

#[test]
fn test_axis_layouts_through_chart() {
    let (chart, _) = chart(props(
        &["Q1", "Q2"],
        &[&["a"], &["a"]],
        &[&[-5.0], &[10.0]],
        300.0,
        200.0,
    ));

    let y_axis = chart.y_axis_layout();
    assert!(!y_axis.ticks.is_empty());

    let x_axis = chart.x_axis_layout();
    let labels: Vec<&str> = x_axis.labels.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Q1", "Q2"]);
    // negative domain lifts the axis line off the bottom edge
    assert!(x_axis.axis_offset > 0.0);
    assert_eq!(chart.config().padding.left, 70.0);
}

#[test]
fn test_tooltip_follows_container_origin() {
    let (mut chart, events) = chart(props(
        &["Q1", "Q2"],
        &[&["a"], &["a"]],
        &[&[-5.0], &[10.0]],
        300.0,
        200.0,
    ));
    let id = BarId::new(1, 0);

    chart.hover(id);
    let first = events.borrow().last().cloned().unwrap().1;

    chart.set_origin(Vec2::new(100.0, 50.0));
    chart.hover(id);
    let second = events.borrow().last().cloned().unwrap().1;

    assert!((second.x - (first.x + 100.0)).abs() < 1e-3);
    assert!((second.y - (first.y + 50.0)).abs() < 1e-3);
}

#[test]
fn test_config_json_round_trip() {
    let config = ChartConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let parsed = ChartConfig::from_json(&json).unwrap();
    assert_eq!(parsed, config);
    assert_eq!(parsed.padding.left, 70.0);
    assert_eq!(parsed.padding.bottom, 20.0);

    assert!(ChartConfig::from_json("not json").is_err());
}

#[test]
fn test_random_series_geometry_invariants() {
    use rand::Rng;

    let mut rng = rand::rng();
    for _ in 0..50 {
        let group_count = rng.random_range(1..6);
        let mut groups = Vec::new();
        let mut x_series = Vec::new();
        let mut y_series = Vec::new();
        for g in 0..group_count {
            let items = rng.random_range(0..5);
            groups.push(format!("g{}", g));
            x_series.push((0..items).map(|i| format!("x{}", i)).collect::<Vec<_>>());
            y_series.push(
                (0..items)
                    .map(|_| rng.random_range(-100.0..100.0))
                    .collect::<Vec<f64>>(),
            );
        }

        let p = ChartProps {
            groups,
            x_series,
            y_series,
            width: rng.random_range(200.0..800.0),
            height: rng.random_range(150.0..600.0),
            config: ChartConfig::default(),
            origin: Vec2::ZERO,
        };
        let (chart, _) = chart(p);

        let baseline = chart.area().baseline_row(&chart.scales().y);
        let bars = chart.bars();
        for bar in bars {
            assert!(bar.geometry.height >= 0.0);
            if bar.data_y >= 0.0 {
                assert!((bar.geometry.y + bar.geometry.height - baseline).abs() < 1e-2);
            } else {
                assert!((bar.geometry.y - baseline).abs() < 1e-2);
            }
        }
        for pair in bars.windows(2) {
            if pair[0].id.group == pair[1].id.group {
                let (l, r) = (&pair[0].geometry, &pair[1].geometry);
                assert!(l.x + l.width <= r.x + 1e-2);
            }
        }
    }
}
