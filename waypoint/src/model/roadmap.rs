use crate::collection::Document;
use crate::common::{
    read_field, Convertible, Value, RESOURCE_TITLE, RESOURCE_URL, ROADMAP_ROLE, ROADMAP_STEPS,
    ROADMAP_USER_EMAIL, STEP_COMPLETED, STEP_DESCRIPTION, STEP_RESOURCES, STEP_TITLE, STEP_WEEK,
};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use serde::{Deserialize, Serialize};

/// A learning resource attached to a roadmap step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Resource {
    pub fn new(title: &str, url: &str) -> Self {
        Resource {
            title: title.to_string(),
            url: Some(url.to_string()),
        }
    }

    /// `true` when the resource has no usable link yet.
    pub fn needs_link(&self) -> bool {
        self.url.as_deref().map_or(true, |url| url.trim().is_empty())
    }
}

/// One week of a roadmap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub week: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub completed: bool,
}

/// A week-by-week plan for one user. At most one is kept per `user_email`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub user_email: Option<String>,
    pub role: String,
    pub steps: Vec<RoadmapStep>,
}

impl Roadmap {
    pub fn step(&self, week: u32) -> Option<&RoadmapStep> {
        self.steps.iter().find(|step| step.week == week)
    }

    pub fn completed_weeks(&self) -> usize {
        self.steps.iter().filter(|step| step.completed).count()
    }
}

fn expect_document<'a>(record: &str, value: &'a Value) -> WaypointResult<&'a Document> {
    value.as_document().ok_or_else(|| {
        log::error!("{} must be stored as a document, found {}", record, value.type_name());
        WaypointError::new(
            &format!("{} must be stored as a document, found {}", record, value.type_name()),
            ErrorKind::ObjectMappingError,
        )
    })
}

impl Convertible for Resource {
    type Output = Resource;

    fn to_value(&self) -> WaypointResult<Value> {
        let mut document = Document::new();
        document.put(RESOURCE_TITLE, self.title.as_str())?;
        document.put(RESOURCE_URL, self.url.clone())?;
        Ok(Value::Document(document))
    }

    fn from_value(value: &Value) -> WaypointResult<Self::Output> {
        let document = expect_document("Resource", value)?;
        Ok(Resource {
            title: read_field::<String>(document, RESOURCE_TITLE)?,
            url: read_field::<Option<String>>(document, RESOURCE_URL)?,
        })
    }
}

impl Convertible for RoadmapStep {
    type Output = RoadmapStep;

    fn to_value(&self) -> WaypointResult<Value> {
        let mut document = Document::new();
        document.put(STEP_WEEK, self.week)?;
        document.put(STEP_TITLE, self.title.as_str())?;
        document.put(STEP_DESCRIPTION, self.description.as_str())?;
        document.put(STEP_RESOURCES, self.resources.to_value()?)?;
        document.put(STEP_COMPLETED, self.completed)?;
        Ok(Value::Document(document))
    }

    fn from_value(value: &Value) -> WaypointResult<Self::Output> {
        let document = expect_document("RoadmapStep", value)?;
        Ok(RoadmapStep {
            week: read_field::<u32>(document, STEP_WEEK)?,
            title: read_field::<String>(document, STEP_TITLE)?,
            description: read_field::<Option<String>>(document, STEP_DESCRIPTION)?
                .unwrap_or_default(),
            resources: read_field::<Option<Vec<Resource>>>(document, STEP_RESOURCES)?
                .unwrap_or_default(),
            completed: read_field::<Option<bool>>(document, STEP_COMPLETED)?.unwrap_or(false),
        })
    }
}

impl Convertible for Roadmap {
    type Output = Roadmap;

    fn to_value(&self) -> WaypointResult<Value> {
        let mut document = Document::new();
        document.put(ROADMAP_USER_EMAIL, self.user_email.clone())?;
        document.put(ROADMAP_ROLE, self.role.as_str())?;
        document.put(ROADMAP_STEPS, self.steps.to_value()?)?;
        Ok(Value::Document(document))
    }

    fn from_value(value: &Value) -> WaypointResult<Self::Output> {
        let document = expect_document("Roadmap", value)?;
        Ok(Roadmap {
            user_email: read_field::<Option<String>>(document, ROADMAP_USER_EMAIL)?,
            role: read_field::<String>(document, ROADMAP_ROLE)?,
            steps: read_field::<Vec<RoadmapStep>>(document, ROADMAP_STEPS)?,
        })
    }
}
