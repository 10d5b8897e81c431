use crate::collection::{Collection, Document, UpdateResult};
use crate::common::{
    from_document, to_document, DOC_ID, ROADMAPS_COLLECTION, ROADMAP_STEPS, ROADMAP_USER_EMAIL,
    STEP_COMPLETED, STEP_WEEK, USERS_COLLECTION, USER_EMAIL,
};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::filter::{element, field, Filter};
use crate::model::{Roadmap, User};
use crate::store::{DocumentStore, MemoryStore};
use crate::tiering::{AccessPath, TierOutcome, TieredStore};
use uuid::Uuid;

/// Users and roadmaps over a primary and a secondary store.
///
/// Cloning is cheap; clones share both tiers.
#[derive(Clone)]
pub struct Repository {
    tiers: TieredStore,
}

impl Repository {
    /// Creates a repository over `primary` with a fresh, empty in-memory
    /// secondary tier.
    pub fn new(primary: DocumentStore) -> Self {
        Repository {
            tiers: TieredStore::new(primary, DocumentStore::new(MemoryStore::new())),
        }
    }

    pub fn with_tiers(tiers: TieredStore) -> Self {
        Repository { tiers }
    }

    pub fn tiers(&self) -> &TieredStore {
        &self.tiers
    }

    /// Stores a new user under a freshly generated `_id`.
    ///
    /// Email uniqueness is checked on the tier that performs the write; a
    /// user held only by the other tier is not seen. A duplicate fails with
    /// [ErrorKind::DuplicateEntry] and does not trigger a fallback.
    pub fn register_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
    ) -> WaypointResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        let document = to_document(&user)?;
        let filter = field(USER_EMAIL).eq(email);

        self.tiers.execute(
            AccessPath::Write,
            USERS_COLLECTION,
            "register_user",
            |collection| match collection.find_one(&filter) {
                Ok(Some(_)) => {
                    log::error!("Email {} is already registered in {}", email, collection.name());
                    Err(WaypointError::new(
                        "Email already registered",
                        ErrorKind::DuplicateEntry,
                    ))
                }
                Ok(None) => TierOutcome::write(collection.insert_one(document.clone())),
                Err(e) => TierOutcome::write(Err(e)),
            },
        )?;

        log::debug!("Registered user {} ({})", user.email, user.id);
        Ok(user)
    }

    /// Looks a user up by email.
    pub fn find_user(&self, email: &str) -> WaypointResult<User> {
        self.find_user_by(field(USER_EMAIL).eq(email), "find_user")
    }

    /// Looks a user up by the `_id` assigned at registration.
    pub fn find_user_by_id(&self, id: &str) -> WaypointResult<User> {
        self.find_user_by(field(DOC_ID).eq(id), "find_user_by_id")
    }

    /// Stores `roadmap` as the roadmap of `email`, replacing any previous
    /// one on the tier that performs the write.
    ///
    /// The stored (and returned) roadmap carries `user_email = email`.
    pub fn save_roadmap(&self, email: &str, mut roadmap: Roadmap) -> WaypointResult<Roadmap> {
        roadmap.user_email = Some(email.to_string());
        let document = to_document(&roadmap)?;
        let filter = field(ROADMAP_USER_EMAIL).eq(email);

        self.tiers.execute(
            AccessPath::Write,
            ROADMAPS_COLLECTION,
            "save_roadmap",
            |collection| save_one(collection, &filter, &document),
        )?;
        Ok(roadmap)
    }

    /// Returns the roadmap of `email`.
    pub fn get_roadmap(&self, email: &str) -> WaypointResult<Roadmap> {
        let filter = field(ROADMAP_USER_EMAIL).eq(email);
        let resolved = self.tiers.execute(
            AccessPath::Read,
            ROADMAPS_COLLECTION,
            "get_roadmap",
            |collection| TierOutcome::lookup(collection.find_one(&filter)),
        )?;
        from_document::<Roadmap>(resolved.value())
    }

    /// Marks week `week` of the roadmap of `email` as `completed` (or not).
    ///
    /// Only the matching step changes; its siblings are left untouched.
    pub fn update_progress(
        &self,
        email: &str,
        week: u32,
        completed: bool,
    ) -> WaypointResult<UpdateResult> {
        let filter = field(ROADMAP_USER_EMAIL)
            .eq(email)
            .and(element(ROADMAP_STEPS, STEP_WEEK).eq(week));
        let update = crate::update::set_element(ROADMAP_STEPS, STEP_COMPLETED, completed);

        let resolved = self.tiers.execute(
            AccessPath::Update,
            ROADMAPS_COLLECTION,
            "update_progress",
            |collection| TierOutcome::update(collection.update_one(&filter, &update)),
        )?;
        Ok(resolved.into_value())
    }

    fn find_user_by(&self, filter: Filter, operation: &str) -> WaypointResult<User> {
        let resolved = self.tiers.execute(AccessPath::Read, USERS_COLLECTION, operation, |collection| {
            TierOutcome::lookup(collection.find_one(&filter))
        })?;
        from_document::<User>(resolved.value())
    }
}

// replace when a document exists, insert otherwise
fn save_one(
    collection: &Collection,
    filter: &Filter,
    document: &Document,
) -> WaypointResult<TierOutcome<()>> {
    TierOutcome::write(collection.replace_one(filter, document.clone()))
}
