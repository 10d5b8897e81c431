use serde::{Deserialize, Serialize};

/// What a user asks a roadmap for. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub target_role: String,
    pub salary_range: String,
    /// Free text such as `"6 months"` or `"10 weeks"`.
    pub timeline: String,
    #[serde(default)]
    pub current_skills: Vec<String>,
    pub hours_per_week: u32,
}

impl UserProfile {
    pub fn new(target_role: &str, timeline: &str) -> Self {
        UserProfile {
            target_role: target_role.to_string(),
            timeline: timeline.to_string(),
            ..Default::default()
        }
    }
}
