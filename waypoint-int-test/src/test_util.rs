use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use waypoint::collection::{
    Collection, Document, DocumentCollectionProvider, MemoryCollection, UpdateResult,
};
use waypoint::errors::{ErrorKind, WaypointError, WaypointResult};
use waypoint::filter::Filter;
use waypoint::repository::Repository;
use waypoint::service::TokenIssuer;
use waypoint::store::{DocumentStore, DocumentStoreProvider, MemoryStore};
use waypoint::tiering::TieredStore;
use waypoint::update::Update;

/// Runs a test between a setup and a teardown step.
///
/// The teardown runs even when the test fails; a failure in any step (or a
/// panic) fails the test with the step that caused it.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> WaypointResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> WaypointResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> WaypointResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let result = std::panic::catch_unwind(|| match before() {
        Ok(ctx) => match test(ctx.clone()) {
            Ok(_) => after(ctx).map_err(|e| format!("After run failed: {:?}", e)),
            Err(e) => {
                let _ = after(ctx);
                Err(format!("Test failed: {:?}", e))
            }
        },
        Err(e) => Err(format!("Before run failed: {:?}", e)),
    });

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => panic!("{}", e),
        Err(panic_err) => std::panic::resume_unwind(panic_err),
    }
}

/// A repository whose primary tier can be switched off and on, plus direct
/// access to what each tier holds.
#[derive(Clone)]
pub struct TestContext {
    repository: Repository,
    primary: FlakyStore,
    secondary: MemoryStore,
}

impl TestContext {
    pub fn new(primary: FlakyStore, secondary: MemoryStore) -> Self {
        let repository = Repository::with_tiers(TieredStore::new(
            DocumentStore::new(primary.clone()),
            DocumentStore::new(secondary.clone()),
        ));
        TestContext {
            repository,
            primary,
            secondary,
        }
    }

    pub fn repository(&self) -> Repository {
        self.repository.clone()
    }

    pub fn primary(&self) -> &FlakyStore {
        &self.primary
    }

    pub fn secondary(&self) -> &MemoryStore {
        &self.secondary
    }

    /// Documents of `namespace` held by the primary tier, regardless of
    /// whether it is currently reachable.
    pub fn primary_documents(&self, namespace: &str) -> Vec<Document> {
        self.primary.backing().memory_collection(namespace).documents()
    }

    pub fn secondary_documents(&self, namespace: &str) -> Vec<Document> {
        self.secondary.memory_collection(namespace).documents()
    }
}

pub fn create_test_context() -> WaypointResult<TestContext> {
    Ok(TestContext::new(FlakyStore::new(), MemoryStore::new()))
}

/// A context whose primary tier is down from the start.
pub fn create_unavailable_context() -> WaypointResult<TestContext> {
    let primary = FlakyStore::new();
    primary.go_down();
    Ok(TestContext::new(primary, MemoryStore::new()))
}

pub fn cleanup(ctx: TestContext) -> WaypointResult<()> {
    log::debug!(
        "Primary namespaces: {:?}, secondary namespaces: {:?}",
        ctx.primary.backing().collection_names(),
        ctx.secondary.collection_names()
    );
    Ok(())
}

/// An in-memory primary store that can be made unreachable.
///
/// While down, resolving a collection and every operation on a collection
/// handed out earlier fail with [ErrorKind::PrimaryUnavailable]. The data is
/// kept and becomes visible again after [FlakyStore::recover].
#[derive(Clone)]
pub struct FlakyStore {
    backing: MemoryStore,
    available: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        FlakyStore {
            backing: MemoryStore::new(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn go_down(&self) {
        self.available.store(false, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.available.store(true, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    pub fn backing(&self) -> &MemoryStore {
        &self.backing
    }
}

impl Default for FlakyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable(available: &AtomicBool) -> WaypointResult<()> {
    if available.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(WaypointError::new(
            "connection refused",
            ErrorKind::PrimaryUnavailable,
        ))
    }
}

impl DocumentStoreProvider for FlakyStore {
    fn collection(&self, name: &str) -> WaypointResult<Collection> {
        unavailable(&self.available)?;
        Ok(Collection::new(FlakyCollection {
            inner: self.backing.memory_collection(name),
            available: self.available.clone(),
        }))
    }

    fn describe(&self) -> String {
        "flaky".to_string()
    }
}

struct FlakyCollection {
    inner: MemoryCollection,
    available: Arc<AtomicBool>,
}

impl DocumentCollectionProvider for FlakyCollection {
    fn find_one(&self, filter: &Filter) -> WaypointResult<Option<Document>> {
        unavailable(&self.available)?;
        self.inner.find_one(filter)
    }

    fn insert_one(&self, document: Document) -> WaypointResult<Document> {
        unavailable(&self.available)?;
        self.inner.insert_one(document)
    }

    fn replace_one(&self, filter: &Filter, document: Document) -> WaypointResult<()> {
        unavailable(&self.available)?;
        self.inner.replace_one(filter, document)
    }

    fn update_one(&self, filter: &Filter, update: &Update) -> WaypointResult<UpdateResult> {
        unavailable(&self.available)?;
        self.inner.update_one(filter, update)
    }

    fn size(&self) -> WaypointResult<usize> {
        unavailable(&self.available)?;
        self.inner.size()
    }

    fn name(&self) -> String {
        self.inner.name()
    }
}

/// Tokens are `token:<email>`; anything else is rejected.
pub struct PlainTokenIssuer;

impl TokenIssuer for PlainTokenIssuer {
    fn issue(&self, subject: &str) -> WaypointResult<String> {
        Ok(format!("token:{}", subject))
    }

    fn verify(&self, token: &str) -> WaypointResult<String> {
        token
            .strip_prefix("token:")
            .map(str::to_string)
            .ok_or_else(|| WaypointError::new("Malformed token", ErrorKind::InvalidCredentials))
    }
}

/// A unique, realistic email address.
pub fn random_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}.{}", uuid::Uuid::new_v4().simple(), email)
}

pub fn random_name() -> String {
    Name().fake()
}
