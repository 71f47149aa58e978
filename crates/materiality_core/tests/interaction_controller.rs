use materiality_core::{
    CategoryId, InteractionController, InteractionState, MatrixConfig, MatrixEvent, NudgeKey,
    PixelPoint, PlotSurface, Subscription, Topic, TopicStore,
};
use std::cell::RefCell;
use std::rc::Rc;

fn setup(read_only: bool) -> (TopicStore, InteractionController, Topic) {
    let topic = Topic::new(
        "Climate Change",
        CategoryId::parse("environmental").unwrap(),
        9.2,
        8.5,
    )
    .unwrap();
    let store = TopicStore::from_topics([topic.clone()]).unwrap();
    let config = MatrixConfig {
        read_only,
        ..MatrixConfig::default()
    };
    (store, InteractionController::new(&config), topic)
}

type EventLog = Rc<RefCell<Vec<MatrixEvent>>>;

fn record_events(controller: &InteractionController) -> (EventLog, Subscription) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let guard = controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    (events, guard)
}

fn surface() -> PlotSurface {
    PlotSurface::new(600.0, 400.0)
}

#[test]
fn drag_commits_only_on_drop() {
    let (mut store, mut controller, topic) = setup(false);

    assert!(controller.pointer_down(&store, topic.id));
    assert_eq!(controller.state().dragged_topic(), Some(topic.id));

    let preview = controller
        .pointer_move(PixelPoint::new(300.0, 200.0), &surface())
        .unwrap();
    assert!((preview.importance.value() - 5.0).abs() < 1e-9);
    assert_eq!(store.get(topic.id).unwrap().position(), topic.position());

    let committed = controller
        .drop_at(&mut store, PixelPoint::new(300.0, 200.0), &surface())
        .unwrap();
    assert_eq!(committed.to.importance.value(), 5.0);
    assert_eq!(committed.to.impact.value(), 5.0);
    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(store.get(topic.id).unwrap().impact.value(), 5.0);
}

#[test]
fn drop_outside_surface_is_clamped() {
    let (mut store, mut controller, topic) = setup(false);
    controller.pointer_down(&store, topic.id);

    let committed = controller
        .drop_at(&mut store, PixelPoint::new(0.0, 0.0), &surface())
        .unwrap();
    assert_eq!(committed.to.importance.value(), 0.0);
    assert_eq!(committed.to.impact.value(), 10.0);
}

#[test]
fn release_outside_uses_last_pointer_position() {
    let (mut store, mut controller, topic) = setup(false);
    controller.pointer_down(&store, topic.id);
    controller.pointer_move(PixelPoint::new(900.0, -50.0), &surface());

    let committed = controller.release_outside(&mut store, &surface()).unwrap();
    assert_eq!(committed.to.importance.value(), 10.0);
    assert_eq!(committed.to.impact.value(), 10.0);
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn release_outside_without_movement_cancels() {
    let (mut store, mut controller, topic) = setup(false);
    controller.pointer_down(&store, topic.id);

    assert!(controller.release_outside(&mut store, &surface()).is_none());
    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(store.get(topic.id).unwrap().position(), topic.position());
}

#[test]
fn read_only_suppresses_drag_start() {
    let (mut store, mut controller, topic) = setup(true);

    assert!(!controller.pointer_down(&store, topic.id));
    assert_eq!(controller.state(), InteractionState::Idle);
    assert!(controller
        .drop_at(&mut store, PixelPoint::new(0.0, 0.0), &surface())
        .is_none());
    assert_eq!(store.get(topic.id).unwrap().position(), topic.position());
}

#[test]
fn read_only_still_allows_select_and_hover() {
    let (store, mut controller, topic) = setup(true);

    assert!(controller.select(&store, topic.id));
    assert_eq!(controller.selected(), Some(topic.id));

    controller.pointer_enter(topic.id);
    assert_eq!(controller.state(), InteractionState::Hovering(topic.id));
    controller.pointer_leave(topic.id);
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn switching_to_read_only_abandons_active_drag() {
    let (mut store, mut controller, topic) = setup(false);
    controller.pointer_down(&store, topic.id);
    controller.set_read_only(true);

    assert_eq!(controller.state(), InteractionState::Idle);
    assert!(controller
        .drop_at(&mut store, PixelPoint::new(0.0, 0.0), &surface())
        .is_none());
}

#[test]
fn arrow_up_raises_impact_by_one_step() {
    let (mut store, mut controller, _) = setup(false);
    let topic = Topic::new("Water", CategoryId::parse("environmental").unwrap(), 3.0, 5.0).unwrap();
    store.insert(topic.clone()).unwrap();
    controller.select(&store, topic.id);

    let committed = controller.key_down(&mut store, "ArrowUp").unwrap();
    assert_eq!(committed.to.impact.value(), 5.1);
    assert_eq!(committed.to.importance.value(), 3.0);

    let stored = store.get(topic.id).unwrap();
    assert_eq!(stored.impact.value(), 5.1);
    assert_eq!(stored.importance.value(), 3.0);
}

#[test]
fn nudge_leaves_the_other_axis_untouched() {
    let (mut store, mut controller, _) = setup(false);
    let topic = Topic::new("Waste", CategoryId::parse("environmental").unwrap(), 3.14, 5.0).unwrap();
    store.insert(topic.clone()).unwrap();
    controller.select(&store, topic.id);

    let committed = controller.key_down(&mut store, "ArrowUp").unwrap();
    assert_eq!(committed.to.importance.value(), 3.14);
    assert_eq!(committed.to.impact.value(), 5.1);

    controller.nudge(&mut store, NudgeKey::Right).unwrap();
    let stored = store.get(topic.id).unwrap();
    assert_eq!(stored.importance.value(), 3.2);
    assert_eq!(stored.impact.value(), 5.1);
}

#[test]
fn nudges_move_each_axis_and_clamp_at_bounds() {
    let (mut store, mut controller, topic) = setup(false);
    controller.select(&store, topic.id);

    controller.nudge(&mut store, NudgeKey::Left).unwrap();
    assert_eq!(store.get(topic.id).unwrap().importance.value(), 9.1);
    controller.nudge(&mut store, NudgeKey::Down).unwrap();
    assert_eq!(store.get(topic.id).unwrap().impact.value(), 8.4);

    for _ in 0..20 {
        controller.nudge(&mut store, NudgeKey::Right);
    }
    assert_eq!(store.get(topic.id).unwrap().importance.value(), 10.0);
}

#[test]
fn nudge_requires_selection_and_write_access() {
    let (mut store, mut controller, topic) = setup(false);
    assert!(controller.nudge(&mut store, NudgeKey::Up).is_none());
    assert!(controller.key_down(&mut store, "Enter").is_none());

    controller.select(&store, topic.id);
    controller.set_read_only(true);
    assert!(controller.nudge(&mut store, NudgeKey::Up).is_none());
    assert_eq!(store.get(topic.id).unwrap().position(), topic.position());
}

#[test]
fn nudge_after_topic_removed_is_silent() {
    let (mut store, mut controller, topic) = setup(false);
    controller.select(&store, topic.id);
    store.remove_topic(topic.id);

    assert!(controller.nudge(&mut store, NudgeKey::Up).is_none());
}

#[test]
fn drop_after_topic_removed_is_silent() {
    let (mut store, mut controller, topic) = setup(false);
    controller.pointer_down(&store, topic.id);
    store.remove_topic(topic.id);

    assert!(controller
        .drop_at(&mut store, PixelPoint::new(100.0, 100.0), &surface())
        .is_none());
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn drop_on_unmeasured_surface_defers_commit() {
    let (mut store, mut controller, topic) = setup(false);
    controller.pointer_down(&store, topic.id);

    assert!(controller
        .drop_at(&mut store, PixelPoint::new(10.0, 10.0), &PlotSurface::unmeasured())
        .is_none());
    assert_eq!(store.get(topic.id).unwrap().position(), topic.position());
}

#[test]
fn hover_is_ignored_while_dragging() {
    let (store, mut controller, topic) = setup(false);
    controller.pointer_down(&store, topic.id);
    controller.pointer_enter(topic.id);
    assert_eq!(controller.state().dragged_topic(), Some(topic.id));
}

#[test]
fn committed_moves_notify_subscribers() {
    let (mut store, mut controller, topic) = setup(false);
    let (events, guard) = record_events(&controller);

    controller.select(&store, topic.id);
    controller.key_down(&mut store, "ArrowRight").unwrap();

    let seen = events.borrow().clone();
    assert!(matches!(&seen[0], MatrixEvent::TopicSelected(selected) if selected.id == topic.id));
    let moved = seen
        .iter()
        .find_map(|event| match event {
            MatrixEvent::TopicMoved {
                id,
                impact,
                importance,
            } => Some((*id, impact.value(), importance.value())),
            _ => None,
        })
        .unwrap();
    assert_eq!(moved, (topic.id, 8.5, 9.3));

    drop(guard);
    controller.key_down(&mut store, "ArrowRight").unwrap();
    assert_eq!(events.borrow().len(), seen.len());
}

#[test]
fn drag_preview_events_do_not_include_commits() {
    let (store, mut controller, topic) = setup(false);
    let (events, _guard) = record_events(&controller);

    controller.pointer_down(&store, topic.id);
    controller.pointer_move(PixelPoint::new(120.0, 80.0), &surface());

    let seen = events.borrow();
    assert!(seen
        .iter()
        .any(|event| matches!(event, MatrixEvent::DragPreview { id, .. } if *id == topic.id)));
    assert!(!seen
        .iter()
        .any(|event| matches!(event, MatrixEvent::TopicMoved { .. })));
}

#[test]
fn forget_topic_clears_transient_references() {
    let (store, mut controller, topic) = setup(false);
    controller.select(&store, topic.id);
    controller.pointer_down(&store, topic.id);

    controller.forget_topic(topic.id);
    assert_eq!(controller.selected(), None);
    assert_eq!(controller.state(), InteractionState::Idle);
}
