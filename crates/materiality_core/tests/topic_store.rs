use materiality_core::{CategoryId, Score, StoreError, Topic, TopicFilter, TopicStore};

fn category(id: &str) -> CategoryId {
    CategoryId::parse(id).unwrap()
}

fn sample_store() -> (TopicStore, Topic, Topic) {
    let mut climate = Topic::new("Climate Change", category("environmental"), 9.2, 8.5).unwrap();
    climate.stakeholders = vec!["Investors".to_string(), "Regulators".to_string()];
    let labor = Topic::new("Labor Practices", category("social"), 4.0, 6.5).unwrap();

    let store = TopicStore::from_topics([climate.clone(), labor.clone()]).unwrap();
    (store, climate, labor)
}

#[test]
fn insert_rejects_duplicate_ids() {
    let (mut store, climate, _) = sample_store();
    let err = store.insert(climate.clone()).unwrap_err();
    assert_eq!(err, StoreError::DuplicateTopic(climate.id));
    assert_eq!(store.len(), 2);
}

#[test]
fn move_topic_replaces_only_scores() {
    let (mut store, climate, _) = sample_store();

    let moved = store.move_topic(climate.id, 3.3, 4.4).unwrap();
    assert_eq!(moved.from, climate.position());
    assert_eq!(moved.to.importance.value(), 3.3);
    assert_eq!(moved.to.impact.value(), 4.4);

    let stored = store.get(climate.id).unwrap();
    assert_eq!(stored.id, climate.id);
    assert_eq!(stored.category, climate.category);
    assert_eq!(stored.title, climate.title);
    assert_eq!(stored.stakeholders, climate.stakeholders);
    assert_eq!(stored.importance.value(), 3.3);
    assert_eq!(stored.impact.value(), 4.4);
}

#[test]
fn move_topic_clamps_out_of_range_scores() {
    let (mut store, climate, _) = sample_store();
    store.move_topic(climate.id, -4.0, 42.0).unwrap();

    let stored = store.get(climate.id).unwrap();
    assert_eq!(stored.importance, Score::MIN);
    assert_eq!(stored.impact, Score::MAX);
}

#[test]
fn move_topic_on_unknown_id_is_a_silent_no_op() {
    let (mut store, _, _) = sample_store();
    let before = store.snapshot();

    assert!(store.move_topic(uuid::Uuid::new_v4(), 1.0, 1.0).is_none());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn move_after_external_removal_is_ignored() {
    let (mut store, climate, labor) = sample_store();
    store.remove_topic(climate.id).unwrap();

    assert!(store.move_topic(climate.id, 1.0, 1.0).is_none());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(labor.id).unwrap().position(), labor.position());
}

#[test]
fn list_topics_keeps_store_order_and_applies_filters() {
    let (store, climate, labor) = sample_store();

    let all: Vec<_> = store.list_topics(|_| true).iter().map(|t| t.id).collect();
    assert_eq!(all, vec![climate.id, labor.id]);

    let social = TopicFilter::all().with_category(category("social"));
    let ids: Vec<_> = store
        .list_topics(|topic| social.matches(topic))
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![labor.id]);

    let investors = TopicFilter::all().with_stakeholder("investors");
    assert_eq!(store.list_topics(|topic| investors.matches(topic)).len(), 1);

    let text = TopicFilter::all().with_text("LABOR");
    assert_eq!(store.list_topics(|topic| text.matches(topic))[0].id, labor.id);
}

#[test]
fn quadrant_filter_uses_current_scores() {
    let (mut store, climate, _) = sample_store();
    let top_right =
        TopicFilter::all().with_quadrant(materiality_core::Quadrant::HighImpactHighImportance);
    assert_eq!(store.list_topics(|topic| top_right.matches(topic)).len(), 1);

    store.move_topic(climate.id, 1.0, 1.0).unwrap();
    assert!(store.list_topics(|topic| top_right.matches(topic)).is_empty());
}
