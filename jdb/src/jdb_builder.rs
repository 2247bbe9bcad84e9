use crate::errors::JdbResult;
use crate::jdb::Jdb;
use crate::jdb_config::JdbConfig;
use std::path::Path;

/// Builder for creating and configuring a [Jdb] engine.
///
/// The builder constructs a disconnected engine; call
/// [`Jdb::connect`] before using any collection.
///
/// # Examples
///
/// ```rust,ignore
/// use jdb::jdb::Jdb;
///
/// // Durable engine under ./data
/// let db = Jdb::builder().create()?;
///
/// // Durable engine with an explicit root
/// let db = Jdb::builder().root("/var/lib/myapp".as_ref()).create()?;
///
/// // Ephemeral engine for tests
/// let db = Jdb::builder().in_memory(true).create()?;
///
/// db.connect()?;
/// ```
#[derive(Default)]
pub struct JdbBuilder {
    config: JdbConfig,
}

impl JdbBuilder {
    /// Creates a new `JdbBuilder` with default configuration.
    ///
    /// The default configuration is durable mode with `./data` as root.
    pub fn new() -> Self {
        JdbBuilder {
            config: JdbConfig::new(),
        }
    }

    /// Sets the root directory collection files live under.
    ///
    /// Ignored when the engine is in-memory.
    pub fn root(mut self, root: &Path) -> Self {
        self.config.set_root(root);
        self
    }

    /// Switches the engine to in-memory storage.
    pub fn in_memory(mut self, in_memory: bool) -> Self {
        self.config.set_in_memory(in_memory);
        self
    }

    /// Builds the engine in the disconnected state.
    pub fn create(self) -> JdbResult<Jdb> {
        Ok(Jdb::new(self.config))
    }
}
