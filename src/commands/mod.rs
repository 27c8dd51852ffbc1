use std::path::Path;

use mdpad::Session;
use mdpad::config::{MdpadConfig, base_path_from_config};
use mdpad::storage::FsStore;

pub mod files;
pub mod init;
pub mod render;
pub mod serve;
pub mod watch;

/// Open the persisted session the config points at.
pub(crate) fn open_session(
    config: &MdpadConfig,
    config_path: &Path,
) -> Result<Session, anyhow::Error> {
    let store = FsStore::new(config.storage_dir(&base_path_from_config(config_path)));
    tracing::info!(dir = %store.dir().display(), "opening document store");
    Ok(Session::load(Box::new(store))?)
}
