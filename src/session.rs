//! An editing session: the document store, its persistence and the
//! renderer.
//!
//! The renderer only ever sees text. After a successful render the session
//! records the rendered text on the open file, so saved documents always
//! match the last preview.

use std::ops::Range;

use crate::editing::{EditError, Wrapper, wrap_selection};
use crate::render::Renderer;
use crate::storage::{KeyValueStore, StorageError, load_files, save_files};
use crate::store::{FileList, MarkdownFile, StoreError};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("no file is open")]
    NothingOpen,
}

pub struct Session {
    files: FileList,
    store: Box<dyn KeyValueStore>,
    renderer: Renderer,
}

impl Session {
    /// Restore the saved documents, or start with the welcome document.
    pub fn load(store: Box<dyn KeyValueStore>) -> Result<Self, SessionError> {
        let mut files = load_files(store.as_ref())?.unwrap_or_else(FileList::seeded);

        // Saved data may have no open file; fall back to the first one.
        if files.current().is_none()
            && let Some(first) = { files.names().next().map(str::to_string) }
        {
            files.open(&first)?;
        }
        if files.is_empty() {
            files = FileList::seeded();
        }

        Ok(Self {
            files,
            store,
            renderer: Renderer::new(),
        })
    }

    pub fn files(&self) -> &FileList {
        &self.files
    }

    pub fn current(&self) -> Option<&MarkdownFile> {
        self.files.current()
    }

    /// Render a file without opening it.
    pub fn render_file(&self, name: &str) -> Result<String, SessionError> {
        let file = self
            .files
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        Ok(self.renderer.render(&file.content))
    }

    /// Render the open file.
    pub fn render_current(&self) -> Result<String, SessionError> {
        let file = self.current().ok_or(SessionError::NothingOpen)?;
        Ok(self.renderer.render(&file.content))
    }

    /// Open a file and return its rendered HTML.
    pub fn open(&mut self, name: &str) -> Result<String, SessionError> {
        let file = self.files.open(name)?;
        Ok(self.renderer.render(&file.content))
    }

    /// Render edited text, then record it on the open file.
    ///
    /// The HTML is returned even when no file is open to record it on.
    pub fn edit(&mut self, content: &str) -> String {
        let html = self.renderer.render(content);
        self.files.save_current(content);
        html
    }

    /// Apply a toolbar wrapper to the open file, then behave like
    /// [`Session::edit`].
    pub fn format(
        &mut self,
        wrapper: Wrapper,
        selection: Range<usize>,
    ) -> Result<String, SessionError> {
        let file = self.current().ok_or(SessionError::NothingOpen)?;
        let content = wrap_selection(&file.content, selection, wrapper)?;
        Ok(self.edit(&content))
    }

    /// Create a file and open it. Returns the name it got.
    pub fn create(
        &mut self,
        name: Option<&str>,
        content: Option<&str>,
    ) -> Result<String, SessionError> {
        let name = self.files.new_file(name, content, false);
        self.files.open(&name)?;
        Ok(name)
    }

    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), SessionError> {
        Ok(self.files.rename(old, new)?)
    }

    pub fn delete(&mut self, name: &str) -> Result<(), SessionError> {
        Ok(self.files.delete(name)?)
    }

    pub fn add_tutorial(&mut self) -> String {
        self.files.add_tutorial()
    }

    /// Write every document to the backing store.
    pub fn persist(&mut self) -> Result<(), SessionError> {
        save_files(self.store.as_mut(), &self.files)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FILES_KEY, MemoryStore};
    use crate::store::{EXAMPLE_NAME, samples};

    fn store_with(json: &str) -> Box<dyn KeyValueStore> {
        let mut store = MemoryStore::new();
        store.set(FILES_KEY, json).unwrap();
        Box::new(store)
    }

    #[test]
    fn test_load_empty_store_seeds_welcome() {
        let session = Session::load(Box::new(MemoryStore::new())).unwrap();
        let current = session.current().unwrap();
        assert_eq!(current.name, EXAMPLE_NAME);
        assert_eq!(current.content, samples::WELCOME);
    }

    #[test]
    fn test_load_restores_open_file() {
        let json = concat!(
            r#"[{"name":"a","content":"x","open":false},"#,
            r#"{"name":"b","content":"**y**","open":true}]"#,
        );
        let session = Session::load(store_with(json)).unwrap();
        assert_eq!(session.current().unwrap().name, "b");
        assert_eq!(session.render_current().unwrap(), "<b>y</b>");
    }

    #[test]
    fn test_load_without_open_file_opens_first() {
        let session = Session::load(store_with(r#"[{"name":"a","content":"x"}]"#)).unwrap();
        assert_eq!(session.current().unwrap().name, "a");
    }

    #[test]
    fn test_load_empty_list_seeds_welcome() {
        let session = Session::load(store_with("[]")).unwrap();
        assert_eq!(session.current().unwrap().name, EXAMPLE_NAME);
    }

    #[test]
    fn test_edit_renders_then_saves() {
        let mut session = Session::load(Box::new(MemoryStore::new())).unwrap();
        let html = session.edit("# New");

        assert_eq!(html, "<h1>New</h1><hr>");
        assert_eq!(session.current().unwrap().content, "# New");
    }

    #[test]
    fn test_open_renders_file() {
        let mut session = Session::load(Box::new(MemoryStore::new())).unwrap();
        session.create(Some("notes"), Some("*hi*")).unwrap();
        session.open(EXAMPLE_NAME).unwrap();

        assert_eq!(session.open("notes").unwrap(), "<i>hi</i>");
        assert!(session.open("missing").is_err());
    }

    #[test]
    fn test_format_wraps_and_saves() {
        let mut session = Session::load(Box::new(MemoryStore::new())).unwrap();
        session.create(Some("notes"), Some("make this bold")).unwrap();

        let html = session.format(Wrapper::Bold, 5..9).unwrap();
        assert_eq!(html, "<p>make <b>this</b> bold</p>");
        assert_eq!(session.current().unwrap().content, "make **this** bold");
    }

    #[test]
    fn test_persist_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = crate::storage::FsStore::new(tmp.path());

        let mut session = Session::load(Box::new(store.clone())).unwrap();
        session.create(Some("notes"), Some("text")).unwrap();
        session.persist().unwrap();

        let reloaded = Session::load(Box::new(store)).unwrap();
        assert_eq!(
            reloaded.files().names().collect::<Vec<_>>(),
            vec![EXAMPLE_NAME, "notes"]
        );
        assert_eq!(reloaded.current().unwrap().name, "notes");
    }

    #[test]
    fn test_delete_and_rename() {
        let mut session = Session::load(Box::new(MemoryStore::new())).unwrap();
        session.create(Some("a"), None).unwrap();
        session.rename("a", "b").unwrap();
        assert_eq!(session.current().unwrap().name, "b");

        session.delete("b").unwrap();
        assert_eq!(session.current().unwrap().name, EXAMPLE_NAME);
    }
}
