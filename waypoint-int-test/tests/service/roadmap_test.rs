use std::sync::Arc;
use waypoint::common::ROADMAPS_COLLECTION;
use waypoint::errors::{ErrorKind, WaypointResult};
use waypoint::model::{User, UserProfile};
use waypoint::service::{LinkSearch, RoadmapGenerator, RoadmapService};
use waypoint_int_test::test_util::{
    cleanup, create_test_context, create_unavailable_context, random_email, random_name, run_test,
};

struct WeeklyGenerator;

impl RoadmapGenerator for WeeklyGenerator {
    fn generate(&self, profile: &UserProfile, duration_weeks: u32) -> WaypointResult<String> {
        let steps: Vec<String> = (1..=duration_weeks)
            .map(|week| {
                format!(
                    r#"{{"week": {}, "title": "Week {}", "description": "", "resources": [{{"title": "Guide {}", "url": ""}}]}}"#,
                    week, week, week
                )
            })
            .collect();
        Ok(format!(
            "Here you go:\n{{\"role\": \"{}\", \"steps\": [{}]}}\nEnjoy!",
            profile.target_role,
            steps.join(",")
        ))
    }
}

struct NoLinks;

impl LinkSearch for NoLinks {
    fn find_link(&self, _query: &str) -> WaypointResult<Option<String>> {
        Ok(None)
    }
}

fn user() -> User {
    User {
        id: uuid::Uuid::new_v4().to_string(),
        name: random_name(),
        email: random_email(),
        hashed_password: String::new(),
    }
}

#[test]
fn test_generated_roadmap_matches_timeline() {
    run_test(
        create_test_context,
        |ctx| {
            let service = RoadmapService::new(ctx.repository())
                .with_generator(Arc::new(WeeklyGenerator))
                .with_search(Arc::new(NoLinks));
            let user = user();

            let roadmap = service.generate(&user, &UserProfile::new("SRE", "3 months"))?;
            assert_eq!(roadmap.steps.len(), 12);
            assert_eq!(roadmap.role, "SRE");
            assert!(roadmap.steps.iter().all(|step| step.resources[0].needs_link()));

            assert_eq!(service.get(&user)?, roadmap);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_regenerating_replaces_roadmap() {
    run_test(
        create_test_context,
        |ctx| {
            let service = RoadmapService::new(ctx.repository());
            let user = user();
            service.generate(&user, &UserProfile::new("SRE", "6 months"))?;
            service.update_progress(&user, 1, true)?;
            service.generate(&user, &UserProfile::new("SRE", "8 weeks"))?;

            assert_eq!(ctx.primary_documents(ROADMAPS_COLLECTION).len(), 1);
            let roadmap = service.get(&user)?;
            assert_eq!(roadmap.steps.len(), 4);
            assert_eq!(roadmap.completed_weeks(), 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_progress_during_outage() {
    run_test(
        create_unavailable_context,
        |ctx| {
            let service = RoadmapService::new(ctx.repository());
            let user = user();
            service.generate(&user, &UserProfile::new("SRE", "6 months"))?;

            service.update_progress(&user, 5, true)?;
            let roadmap = service.get(&user)?;
            assert!(roadmap.step(5).map(|step| step.completed).unwrap_or(false));

            let err = service.update_progress(&user, 6, true).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::BothTiersExhausted);
            assert_eq!(err.message(), "Update failed");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_roadmap_not_found() {
    run_test(
        create_test_context,
        |ctx| {
            let service = RoadmapService::new(ctx.repository());
            let err = service.get(&user()).unwrap_err();
            assert_eq!(err.message(), "Roadmap not found");
            Ok(())
        },
        cleanup,
    )
}
