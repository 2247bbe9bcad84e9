use jdb::errors::{ErrorKind, JdbError, JdbResult};
use jdb::jdb::Jdb;
use std::path::{Path, PathBuf};
use std::{env, fs};

#[ctor::ctor]
fn init() {
    colog::init();
}

/// Runs a test with setup and teardown, making sure teardown runs even when
/// the test body fails or panics.
pub fn run_test<B, T, A>(before: B, test: T, after: A)
where
    B: Fn() -> JdbResult<TestContext>,
    T: Fn(TestContext) -> JdbResult<()>,
    A: Fn(TestContext) -> JdbResult<()>,
{
    let ctx = before().expect("Before run failed");

    let ctx_for_test = ctx.clone();
    let result =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || test(ctx_for_test)));

    let after_result = after(ctx);

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic_err) => std::panic::resume_unwind(panic_err),
    }

    after_result.expect("After run failed");
}

#[derive(Clone)]
pub struct TestContext {
    path: Option<PathBuf>,
    db: Jdb,
}

impl TestContext {
    pub fn new(path: Option<PathBuf>, db: Jdb) -> Self {
        Self { path, db }
    }

    /// The root data directory, for durable contexts.
    pub fn path(&self) -> &Path {
        self.path
            .as_deref()
            .expect("Test context has no data directory")
    }

    pub fn db(&self) -> Jdb {
        self.db.clone()
    }
}

pub fn random_path() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("jdb-test-{}", id))
}

/// Creates a connected file-backed engine under a fresh temp directory.
pub fn create_file_context() -> JdbResult<TestContext> {
    let path = random_path();
    let db = Jdb::builder().root(&path).create()?;
    db.connect()?;
    Ok(TestContext::new(Some(path), db))
}

/// Creates a connected in-memory engine.
pub fn create_memory_context() -> JdbResult<TestContext> {
    let db = Jdb::builder().in_memory(true).create()?;
    db.connect()?;
    Ok(TestContext::new(None, db))
}

pub fn create_test_docs() -> Vec<jdb::collection::Document> {
    let doc1 = jdb::doc! {
        first_name: "fn1",
        last_name: "ln1",
        age: 40,
        arr: [1, 2, 3],
        body: "a quick brown fox jump over the lazy dog",
    };

    let doc2 = jdb::doc! {
        first_name: "fn2",
        last_name: "ln2",
        age: 30,
        arr: [3, 4, 3],
        body: "quick hello world",
    };

    let doc3 = jdb::doc! {
        first_name: "fn3",
        last_name: "ln2",
        age: 25,
        arr: [9, 4, 8],
        body: "world classic hello",
    };

    vec![doc1, doc2, doc3]
}

pub fn cleanup(ctx: TestContext) -> JdbResult<()> {
    ctx.db().disconnect()?;

    if let Some(path) = &ctx.path {
        if path.exists() {
            fs::remove_dir_all(path).map_err(|e| {
                JdbError::new(
                    &format!("Failed to remove test directory {}: {}", path.display(), e),
                    ErrorKind::IOError,
                )
            })?;
        }
    }
    Ok(())
}
