use crate::common::{DEFAULT_DURATION_WEEKS, WEEKS_PER_MONTH};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::model::{Resource, Roadmap, RoadmapStep, UserProfile};
use regex::Regex;

/// Produces free-form roadmap text for a profile, expected to contain a JSON
/// object with `role` and `steps`. Typically backed by a language model.
pub trait RoadmapGenerator: Send + Sync {
    fn generate(&self, profile: &UserProfile, duration_weeks: u32) -> WaypointResult<String>;
}

/// Finds a link for a free-text query.
pub trait LinkSearch: Send + Sync {
    fn find_link(&self, query: &str) -> WaypointResult<Option<String>>;
}

/// Converts a free-text timeline into a number of weeks.
///
/// `"6 months"` is 24 weeks, `"10 weeks"` is 10; anything else,
/// including a timeline without a number, is 12.
pub fn timeline_weeks(timeline: &str) -> u32 {
    let compact = timeline.to_lowercase().replace(' ', "");
    let weeks = if compact.contains("month") {
        first_number(&compact).and_then(|months| months.checked_mul(WEEKS_PER_MONTH))
    } else if compact.contains("week") {
        first_number(&compact)
    } else {
        None
    };
    weeks.unwrap_or(DEFAULT_DURATION_WEEKS)
}

fn first_number(text: &str) -> Option<u32> {
    let re = Regex::new(r"\d+").ok()?;
    re.find(text)?.as_str().parse().ok()
}

/// Extracts a [Roadmap] from generator output: the text between the first
/// `{` and the last `}` is parsed as JSON.
pub fn extract_roadmap(text: &str) -> WaypointResult<Roadmap> {
    let block = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => {
            log::error!("No JSON block found in generator output");
            return Err(WaypointError::new(
                "No JSON block found",
                ErrorKind::GenerationError,
            ));
        }
    };
    let roadmap: Roadmap = serde_json::from_str(block)?;
    log::debug!("Parsed {} weeks of generated roadmap", roadmap.steps.len());
    Ok(roadmap)
}

/// Fills in missing resource links by searching for
/// `"<resource title> <target role> tutorial"`.
///
/// A failed search leaves the resource without a link. Returns the number of
/// links added.
pub fn enrich_resources(roadmap: &mut Roadmap, target_role: &str, search: &dyn LinkSearch) -> usize {
    let mut linked = 0;
    for resource in roadmap.steps.iter_mut().flat_map(|step| step.resources.iter_mut()) {
        if !resource.needs_link() {
            continue;
        }

        let query = format!("{} {} tutorial", resource.title, target_role);
        match search.find_link(&query) {
            Ok(Some(url)) => {
                log::debug!("Linked '{}' -> {}", resource.title, url);
                resource.url = Some(url);
                linked += 1;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Link search for '{}' failed: {}", query, e),
        }
    }
    linked
}

/// A fixed roadmap used when no generator is available or its output is
/// unusable.
pub fn simulated_roadmap(profile: &UserProfile) -> Roadmap {
    let role = &profile.target_role;
    log::info!("Generating simulated roadmap for {}", role);

    let mut steps = vec![
        step(
            1,
            &format!("Foundations of {}", role),
            "Master the core concepts and syntax. [SIMULATION MODE]",
            vec![
                Resource::new("Official Documentation", "https://docs.python.org/3/"),
                Resource::new(
                    "Full Course for Beginners",
                    "https://www.youtube.com/watch?v=rfscVS0vtbw",
                ),
            ],
        ),
        step(
            2,
            "Advanced Topics & Best Practices",
            "Deep dive into memory management, concurrency, or advanced patterns.",
            vec![
                Resource::new(
                    "Cosmic Python (Architecture Patterns)",
                    "https://www.cosmicpython.com/book/chapter_01_domain_model.html",
                ),
                Resource::new("Real Python Tutorials", "https://realpython.com/"),
            ],
        ),
        step(
            3,
            "Build a Portfolio Project",
            "Apply what you learned by building a real-world application.",
            vec![
                Resource::new("Mega Project List", "https://github.com/karan/Projects"),
                Resource::new(
                    "Deploying Python Apps",
                    "https://vercel.com/docs/functions/serverless-functions/runtimes/python",
                ),
            ],
        ),
        step(
            4,
            "Interview Prep & System Design",
            "Prepare for technical interviews.",
            vec![
                Resource::new(
                    "Blind 75 LeetCode",
                    "https://leetcode.com/discuss/general-discussion/460599/blind-75-leetcode-questions",
                ),
                Resource::new(
                    "System Design Primer",
                    "https://github.com/donnemartin/system-design-primer",
                ),
            ],
        ),
    ];

    // case-sensitive on the raw timeline
    if profile.timeline.contains("month") {
        steps.push(step(
            5,
            "Job Application Strategy",
            "Job search and outreach.",
            vec![
                Resource::new(
                    "Resume Guide",
                    "https://www.levels.fyi/blog/software-engineer-resume-guide.html",
                ),
                Resource::new(
                    "Tech Interview Handbook",
                    "https://www.techinterviewhandbook.org/",
                ),
            ],
        ));
    }

    Roadmap {
        user_email: None,
        role: role.clone(),
        steps,
    }
}

fn step(week: u32, title: &str, description: &str, resources: Vec<Resource>) -> RoadmapStep {
    RoadmapStep {
        week,
        title: title.to_string(),
        description: description.to_string(),
        resources,
        completed: false,
    }
}
