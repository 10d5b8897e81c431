use waypoint::collection::{Collection, MemoryCollection};
use waypoint::doc;
use waypoint::errors::ErrorKind;
use waypoint::filter::{Filter, FilterClause};
use waypoint::update::{SetOperation, Update};

fn roadmaps() -> Collection {
    let roadmaps = Collection::new(MemoryCollection::new("roadmaps"));
    roadmaps
        .insert_one(doc! {
            user_email: "a@b.com",
            role: "Engineer",
            steps: [
                { week: 1, completed: false },
                { week: 2, completed: false },
                { week: 3, completed: false },
            ],
        })
        .unwrap();
    roadmaps
}

#[test]
fn test_progress_update_from_descriptors() {
    let roadmaps = roadmaps();
    let filter = Filter::from_document(&doc! { user_email: "a@b.com", "steps.week": 2 }).unwrap();
    let update = Update::from_document(&doc! { "$set": { "steps.$.completed": true } }).unwrap();

    let result = roadmaps.update_one(&filter, &update).unwrap();
    assert_eq!(result.modified_count(), 1);

    let roadmap = roadmaps.find_one(&Filter::all()).unwrap().unwrap();
    assert_eq!(
        roadmap,
        doc! {
            user_email: "a@b.com",
            role: "Engineer",
            steps: [
                { week: 1, completed: false },
                { week: 2, completed: true },
                { week: 3, completed: false },
            ],
        }
    );
}

#[test]
fn test_progress_update_for_missing_week() {
    let roadmaps = roadmaps();
    let before = roadmaps.find_one(&Filter::all()).unwrap();

    let filter = Filter::from_document(&doc! { user_email: "a@b.com", "steps.week": 9 }).unwrap();
    let update = Update::from_document(&doc! { "$set": { "steps.$.completed": true } }).unwrap();
    let result = roadmaps.update_one(&filter, &update).unwrap();

    assert_eq!(result.modified_count(), 0);
    assert_eq!(roadmaps.find_one(&Filter::all()).unwrap(), before);
}

#[test]
fn test_filter_shapes() {
    let filter = Filter::from_document(&doc! { email: "a@b.com" }).unwrap();
    assert_eq!(
        filter.clauses(),
        &[FilterClause::ByField {
            name: "email".to_string(),
            value: "a@b.com".into(),
        }]
    );

    let filter = Filter::from_document(&doc! { "steps.week": 3 }).unwrap();
    assert_eq!(
        filter.clauses(),
        &[FilterClause::ByArrayElementField {
            array: "steps".to_string(),
            subfield: "week".to_string(),
            value: 3.into(),
        }]
    );
}

#[test]
fn test_unsupported_filters_are_rejected() {
    let rejected = [
        doc! { "$or": [{ email: "a@b.com" }] },
        doc! { age: { "$gt": 3 } },
        doc! { "steps.week": 1, "goals.id": 2 },
        doc! { "a.b.c": 1 },
        doc! { "steps.$": 1 },
    ];
    for descriptor in rejected.iter() {
        let err = Filter::from_document(descriptor).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MalformedInvocation, "{}", descriptor);
    }
}

#[test]
fn test_update_shapes() {
    let update = Update::from_document(&doc! { "$set": { role: "Manager" } }).unwrap();
    assert_eq!(
        update.operations(),
        &[SetOperation::SetField {
            name: "role".to_string(),
            value: "Manager".into(),
        }]
    );
}

#[test]
fn test_unsupported_updates_are_rejected() {
    let rejected = [
        doc! { "$inc": { age: 1 } },
        doc! { role: "Manager" },
        doc! { "$set": { "steps.0.completed": true } },
        doc! { "$set": { "steps.completed": true } },
        doc! { "$set": "oops" },
        doc! { "$set": {} },
    ];
    for descriptor in rejected.iter() {
        let err = Update::from_document(descriptor).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MalformedInvocation, "{}", descriptor);
    }
}

#[test]
fn test_positional_update_on_other_array_is_rejected() {
    let roadmaps = roadmaps();
    let filter = Filter::from_document(&doc! { user_email: "a@b.com", "steps.week": 2 }).unwrap();
    let update = Update::from_document(&doc! { "$set": { "goals.$.done": true } }).unwrap();

    let err = roadmaps.update_one(&filter, &update).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedInvocation);
}

#[test]
fn test_replace_with_array_filter_is_rejected() {
    let roadmaps = roadmaps();
    let filter = Filter::from_document(&doc! { user_email: "a@b.com", "steps.week": 2 }).unwrap();
    let err = roadmaps.replace_one(&filter, doc! { user_email: "a@b.com" }).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedInvocation);
    assert_eq!(roadmaps.size().unwrap(), 1);
}
