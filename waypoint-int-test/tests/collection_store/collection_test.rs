use waypoint::collection::{Collection, MemoryCollection};
use waypoint::common::Value;
use waypoint::doc;
use waypoint::filter::{element, field, Filter};
use waypoint::update::{set, set_element};

fn collection() -> Collection {
    Collection::new(MemoryCollection::new("test"))
}

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

fn completed(roadmaps: &Collection) -> Vec<bool> {
    let roadmap = roadmaps
        .find_one(&field("user_email").eq("a@b.com"))
        .unwrap()
        .unwrap();
    roadmap
        .get("steps")
        .and_then(|steps| steps.as_array())
        .unwrap()
        .iter()
        .map(|step| *step.as_document().unwrap().get("completed").unwrap().as_bool().unwrap())
        .collect()
}

#[test]
fn test_find_one_on_empty_collection() {
    let collection = collection();
    assert_eq!(collection.find_one(&Filter::all()).unwrap(), None);
    assert_eq!(collection.find_one(&field("email").eq("a@b.com")).unwrap(), None);
    assert_eq!(
        collection
            .find_one(&field("user_email").eq("a@b.com").and(element("steps", "week").eq(1)))
            .unwrap(),
        None
    );
}

#[test]
fn test_find_inserted_by_unique_key() {
    let collection = collection();
    let mut inserted = Vec::new();
    for i in 0..10 {
        let document = doc! { _id: (format!("id-{}", i)), email: (format!("user{}@b.com", i)), age: (i as i64) };
        inserted.push(collection.insert_one(document).unwrap());
    }

    for (i, document) in inserted.iter().enumerate() {
        let found = collection
            .find_one(&field("_id").eq(format!("id-{}", i)))
            .unwrap()
            .unwrap();
        assert_eq!(&found, document);
    }
}

#[test]
fn test_insert_does_not_deduplicate() {
    let collection = collection();
    collection.insert_one(doc! { email: "a@b.com", n: 1 }).unwrap();
    collection.insert_one(doc! { email: "a@b.com", n: 2 }).unwrap();
    assert_eq!(collection.size().unwrap(), 2);

    // first in collection order wins
    let found = collection.find_one(&field("email").eq("a@b.com")).unwrap().unwrap();
    assert_eq!(found.get("n"), Some(&Value::I64(1)));
}

#[test]
fn test_replace_one_miss_appends() {
    let collection = collection();
    collection.insert_one(doc! { user_email: "x@b.com" }).unwrap();

    let replacement = doc! { user_email: "a@b.com", role: "Engineer" };
    collection
        .replace_one(&field("user_email").eq("a@b.com"), replacement.clone())
        .unwrap();
    assert_eq!(collection.size().unwrap(), 2);

    let last = collection
        .find_one(&field("user_email").eq("a@b.com"))
        .unwrap()
        .unwrap();
    assert_eq!(last, replacement);
}

#[test]
fn test_replace_one_hit_overwrites_slot() {
    let collection = collection();
    collection.insert_one(doc! { user_email: "x@b.com" }).unwrap();
    collection.insert_one(doc! { user_email: "a@b.com", role: "Old" }).unwrap();

    let replacement = doc! { user_email: "a@b.com", role: "New" };
    collection
        .replace_one(&field("user_email").eq("a@b.com"), replacement.clone())
        .unwrap();

    assert_eq!(collection.size().unwrap(), 2);
    let found = collection
        .find_one(&field("user_email").eq("a@b.com"))
        .unwrap()
        .unwrap();
    assert_eq!(found, replacement);
    assert!(collection.find_one(&field("role").eq("Old")).unwrap().is_none());
}

#[test]
fn test_plain_update_touches_only_listed_fields() {
    let collection = collection();
    collection.insert_one(doc! { email: "a@b.com", name: "A", age: 30 }).unwrap();
    collection.insert_one(doc! { email: "c@d.com", name: "C", age: 40 }).unwrap();

    let result = collection
        .update_one(&field("email").eq("a@b.com"), &set("age", 31).and(set("city", "Oslo")))
        .unwrap();
    assert_eq!(result.modified_count(), 1);

    let updated = collection.find_one(&field("email").eq("a@b.com")).unwrap().unwrap();
    assert_eq!(updated, doc! { email: "a@b.com", name: "A", age: 31, city: "Oslo" });

    let other = collection.find_one(&field("email").eq("c@d.com")).unwrap().unwrap();
    assert_eq!(other, doc! { email: "c@d.com", name: "C", age: 40 });
}

#[test]
fn test_positional_update_touches_one_element() {
    let roadmaps = roadmaps();
    let filter = field("user_email").eq("a@b.com").and(element("steps", "week").eq(2));
    let result = roadmaps
        .update_one(&filter, &set_element("steps", "completed", true))
        .unwrap();

    assert_eq!(result.modified_count(), 1);
    assert_eq!(completed(&roadmaps), vec![false, true, false]);
}

#[test]
fn test_positional_update_without_matching_element() {
    let roadmaps = roadmaps();
    let filter = field("user_email").eq("a@b.com").and(element("steps", "week").eq(9));
    let result = roadmaps
        .update_one(&filter, &set_element("steps", "completed", true))
        .unwrap();

    assert_eq!(result.modified_count(), 0);
    assert_eq!(completed(&roadmaps), vec![false, false, false]);
}

#[test]
fn test_positional_update_is_idempotent() {
    let roadmaps = roadmaps();
    let filter = field("user_email").eq("a@b.com").and(element("steps", "week").eq(3));
    let update = set_element("steps", "completed", true);

    let first = roadmaps.update_one(&filter, &update).unwrap();
    let after_first = roadmaps.find_one(&Filter::all()).unwrap();
    let second = roadmaps.update_one(&filter, &update).unwrap();
    let after_second = roadmaps.find_one(&Filter::all()).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(first.modified_count(), 1);
    assert_eq!(second.modified_count(), 1);
}

#[test]
fn test_update_other_user_does_not_match() {
    let roadmaps = roadmaps();
    let filter = field("user_email").eq("z@b.com").and(element("steps", "week").eq(1));
    let result = roadmaps
        .update_one(&filter, &set_element("steps", "completed", true))
        .unwrap();
    assert_eq!(result.modified_count(), 0);
    assert_eq!(completed(&roadmaps), vec![false, false, false]);
}

#[test]
fn test_numbers_compare_across_representations() {
    let collection = collection();
    collection.insert_one(doc! { week: 2 }).unwrap();
    assert!(collection.find_one(&field("week").eq(2.0)).unwrap().is_some());
    assert!(collection.find_one(&field("week").eq("2")).unwrap().is_none());
}
