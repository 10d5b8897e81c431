use super::planning::{
    enrich_resources, extract_roadmap, simulated_roadmap, timeline_weeks, LinkSearch,
    RoadmapGenerator,
};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::model::{Roadmap, User, UserProfile};
use crate::repository::Repository;
use std::sync::Arc;

/// Roadmap generation, retrieval and progress tracking for authenticated
/// users.
#[derive(Clone)]
pub struct RoadmapService {
    repository: Repository,
    generator: Option<Arc<dyn RoadmapGenerator>>,
    search: Option<Arc<dyn LinkSearch>>,
}

impl RoadmapService {
    /// Creates a service without a generator; every roadmap is simulated.
    pub fn new(repository: Repository) -> Self {
        RoadmapService {
            repository,
            generator: None,
            search: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn RoadmapGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_search(mut self, search: Arc<dyn LinkSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Builds a roadmap for `profile` and stores it as the roadmap of `user`,
    /// replacing any previous one.
    ///
    /// Generator or parsing failures are not errors: the simulated roadmap
    /// is used instead.
    pub fn generate(&self, user: &User, profile: &UserProfile) -> WaypointResult<Roadmap> {
        log::debug!("Generating roadmap for {}", profile.target_role);
        let roadmap = match &self.generator {
            None => {
                log::warn!("No roadmap generator configured");
                simulated_roadmap(profile)
            }
            Some(generator) => match self.generated(generator.as_ref(), profile) {
                Ok(roadmap) => roadmap,
                Err(e) => {
                    log::error!("Roadmap generation failed: {}", e);
                    simulated_roadmap(profile)
                }
            },
        };
        self.repository.save_roadmap(&user.email, roadmap)
    }

    /// Returns the stored roadmap of `user`.
    pub fn get(&self, user: &User) -> WaypointResult<Roadmap> {
        self.repository
            .get_roadmap(&user.email)
            .map_err(|e| user_facing(e, "Roadmap not found"))
    }

    /// Marks one week of the roadmap of `user` as completed (or not).
    pub fn update_progress(&self, user: &User, week: u32, completed: bool) -> WaypointResult<()> {
        self.repository
            .update_progress(&user.email, week, completed)
            .map(|_| ())
            .map_err(|e| user_facing(e, "Update failed"))
    }

    fn generated(
        &self,
        generator: &dyn RoadmapGenerator,
        profile: &UserProfile,
    ) -> WaypointResult<Roadmap> {
        let duration_weeks = timeline_weeks(&profile.timeline);
        log::debug!(
            "Requesting {} weeks (timeline '{}')",
            duration_weeks,
            profile.timeline
        );

        let text = generator.generate(profile, duration_weeks)?;
        let mut roadmap = extract_roadmap(&text)?;
        if let Some(search) = &self.search {
            enrich_resources(&mut roadmap, &profile.target_role, search.as_ref());
        }
        Ok(roadmap)
    }
}

fn user_facing(error: WaypointError, message: &str) -> WaypointError {
    if error.kind() == &ErrorKind::BothTiersExhausted {
        WaypointError::new_with_cause(message, ErrorKind::BothTiersExhausted, error)
    } else {
        error
    }
}
