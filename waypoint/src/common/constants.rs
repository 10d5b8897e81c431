// doc constants
pub const DOC_ID: &str = "_id";

// collection namespaces
pub const USERS_COLLECTION: &str = "users";
pub const ROADMAPS_COLLECTION: &str = "roadmaps";

// user fields
pub const USER_NAME: &str = "name";
pub const USER_EMAIL: &str = "email";
pub const USER_HASHED_PASSWORD: &str = "hashed_password";

// roadmap fields
pub const ROADMAP_USER_EMAIL: &str = "user_email";
pub const ROADMAP_ROLE: &str = "role";
pub const ROADMAP_STEPS: &str = "steps";
pub const STEP_WEEK: &str = "week";
pub const STEP_TITLE: &str = "title";
pub const STEP_DESCRIPTION: &str = "description";
pub const STEP_RESOURCES: &str = "resources";
pub const STEP_COMPLETED: &str = "completed";
pub const RESOURCE_TITLE: &str = "title";
pub const RESOURCE_URL: &str = "url";

// update operators
pub const SET_OPERATOR: &str = "$set";
pub const POSITIONAL_OPERATOR: &str = "$";
pub const PATH_SEPARATOR: char = '.';

// planning constants
pub const DEFAULT_DURATION_WEEKS: u32 = 12;
pub const WEEKS_PER_MONTH: u32 = 4;
pub const TOKEN_TYPE: &str = "bearer";
