//! The document store: named markdown files, one of which is open.
//!
//! Names are unique within a list. Operations that would create a
//! duplicate either pick a generated name (`new_file`) or fail (`rename`).

pub mod samples;

use serde::{Deserialize, Serialize};

/// Name of the document seeded into an empty store.
pub const EXAMPLE_NAME: &str = "example";

/// Name of the document created by [`FileList::add_tutorial`].
pub const TUTORIAL_NAME: &str = "Tutorial";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("no file named '{0}'")]
    NotFound(String),

    #[error("a file named '{0}' already exists")]
    NameTaken(String),

    #[error("file names cannot be empty")]
    InvalidName,
}

/// A markdown document with a unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownFile {
    pub name: String,
    /// Raw markdown
    pub content: String,
    /// Whether this is the currently open file
    #[serde(default)]
    pub open: bool,
}

impl MarkdownFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            open: false,
        }
    }
}

/// All documents, in creation order, plus the currently open one.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    files: Vec<MarkdownFile>,
    current: Option<String>,
}

impl FileList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list holding only the opened welcome document.
    pub fn seeded() -> Self {
        let mut list = Self::new();
        list.seed_example();
        list
    }

    /// Rebuild a list from previously stored files.
    ///
    /// Files go through [`FileList::new_file`], so duplicate or empty names
    /// are replaced by generated ones. The last file flagged `open`
    /// becomes the current file and is the only one left flagged.
    pub fn from_files(files: impl IntoIterator<Item = MarkdownFile>) -> Self {
        let mut list = Self::new();
        for file in files {
            let name = list.new_file(Some(&file.name), Some(&file.content), file.open);
            if file.open {
                list.current = Some(name);
            }
        }
        for file in &mut list.files {
            file.open = list.current.as_deref() == Some(file.name.as_str());
        }
        list
    }

    /// Add a new file and return the name it was stored under.
    ///
    /// `name` is used when it is given, non-empty and free; otherwise a
    /// free name is generated. Missing or empty content is replaced by a
    /// heading with the file name.
    pub fn new_file(&mut self, name: Option<&str>, content: Option<&str>, open: bool) -> String {
        let name = match name {
            Some(name) if !name.is_empty() && self.is_name_free(name) => name.to_string(),
            _ => self.free_name(),
        };
        let content = match content {
            Some(content) if !content.is_empty() => content.to_string(),
            _ => format!("# {name}\nContent..."),
        };

        self.files.push(MarkdownFile {
            name: name.clone(),
            content,
            open,
        });
        name
    }

    /// Check whether no file uses `name`.
    pub fn is_name_free(&self, name: &str) -> bool {
        !self.files.iter().any(|f| f.name == name)
    }

    /// Generate a name no file uses yet.
    ///
    /// Starts from `file{count + 1}` and appends `1` until the name is free.
    pub fn free_name(&self) -> String {
        let mut name = format!("file{}", self.files.len() + 1);
        while !self.is_name_free(&name) {
            name.push('1');
        }
        name
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    pub fn files(&self) -> &[MarkdownFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MarkdownFile> {
        self.files.iter().find(|f| f.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut MarkdownFile> {
        self.files.iter_mut().find(|f| f.name == name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&MarkdownFile> {
        self.current.as_deref().and_then(|name| self.get(name))
    }

    /// Rename a file. The open file stays open under its new name.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        if new.trim().is_empty() {
            return Err(StoreError::InvalidName);
        }
        if self.get(old).is_none() {
            return Err(StoreError::NotFound(old.to_string()));
        }
        if old == new {
            return Ok(());
        }
        if !self.is_name_free(new) {
            return Err(StoreError::NameTaken(new.to_string()));
        }

        if let Some(file) = self.get_mut(old) {
            file.name = new.to_string();
        }
        if self.current.as_deref() == Some(old) {
            self.current = Some(new.to_string());
        }
        Ok(())
    }

    /// Open a file, closing the previously open one.
    pub fn open(&mut self, name: &str) -> Result<&MarkdownFile, StoreError> {
        if self.get(name).is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        if let Some(previous) = self.current.take()
            && let Some(file) = self.get_mut(&previous)
        {
            file.open = false;
        }

        self.current = Some(name.to_string());
        let file = self
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        file.open = true;
        Ok(&*file)
    }

    /// Store `content` on the open file.
    ///
    /// Returns `false` when no file is open.
    pub fn save_current(&mut self, content: &str) -> bool {
        let Some(current) = self.current.clone() else {
            tracing::warn!("no open file to save");
            return false;
        };
        match self.get_mut(&current) {
            Some(file) => {
                file.content = content.to_string();
                true
            }
            None => {
                tracing::warn!(file = %current, "open file is missing from the store");
                false
            }
        }
    }

    /// Delete a file.
    ///
    /// The first remaining file is opened afterwards. Deleting the last
    /// file seeds the welcome document so the store is never empty.
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let index = self
            .files
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        self.files.remove(index);
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }

        match self.files.first().map(|f| f.name.clone()) {
            Some(first) => {
                self.open(&first)?;
            }
            None => self.seed_example(),
        }
        Ok(())
    }

    /// Add the tutorial document and open it. Returns its name.
    pub fn add_tutorial(&mut self) -> String {
        let name = self.new_file(Some(TUTORIAL_NAME), Some(samples::TUTORIAL), false);
        // The name was just inserted, so opening cannot fail.
        let _ = self.open(&name);
        name
    }

    fn seed_example(&mut self) {
        let name = self.new_file(Some(EXAMPLE_NAME), Some(samples::WELCOME), false);
        let _ = self.open(&name);
    }
}
