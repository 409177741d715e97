use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{StorycamError, StorycamResult};
use crate::story::load::parse_story_json;
use crate::story::model::StoryDocument;

/// Source of story documents.
///
/// Hosts inject an implementation instead of relying on a global catalog.
pub trait StoryRepository {
    /// Ids of all stories this repository can load, sorted.
    fn list(&self) -> StorycamResult<Vec<String>>;

    /// Raw JSON text of one story.
    fn load_raw(&self, id: &str) -> StorycamResult<String>;

    /// Load and parse one story.
    fn load(&self, id: &str) -> StorycamResult<StoryDocument> {
        let raw = self.load_raw(id)?;
        parse_story_json(&raw)
    }
}

/// Stories held in memory, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStoryRepository {
    stories: BTreeMap<String, String>,
}

impl InMemoryStoryRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) the JSON text of one story.
    pub fn insert(&mut self, id: impl Into<String>, json: impl Into<String>) {
        self.stories.insert(id.into(), json.into());
    }
}

impl StoryRepository for InMemoryStoryRepository {
    fn list(&self) -> StorycamResult<Vec<String>> {
        Ok(self.stories.keys().cloned().collect())
    }

    fn load_raw(&self, id: &str) -> StorycamResult<String> {
        self.stories
            .get(id)
            .cloned()
            .ok_or_else(|| StorycamError::not_found(format!("story '{id}'")))
    }
}

/// Stories stored as `<root>/<id>.json`.
#[derive(Clone, Debug)]
pub struct FsStoryRepository {
    root: PathBuf,
}

impl FsStoryRepository {
    /// Serve stories from `root`. Nothing is read until the first call.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the stories are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> StorycamResult<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(StorycamError::validation(format!("invalid story id '{id}'")));
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

impl StoryRepository for FsStoryRepository {
    fn list(&self) -> StorycamResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            StorycamError::io(format!("read story dir '{}': {e}", self.root.display()))
        })?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorycamError::io(e.to_string()))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn load_raw(&self, id: &str) -> StorycamResult<String> {
        let path = self.path_for(id)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorycamError::not_found(
                format!("story '{id}' at '{}'", path.display()),
            )),
            Err(e) => Err(StorycamError::io(format!(
                "read story '{}': {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/repository.rs"]
mod tests;
