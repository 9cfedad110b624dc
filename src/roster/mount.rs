//! Mount points the board is rendered into.
//!
//! A mount holds exactly one rendered subtree. Every `replace` swaps the whole
//! subtree for new markup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::roster::render::page;

pub trait Mount {
    fn replace(&mut self, markup: &str) -> io::Result<()>;
}

/// Renders into a standalone HTML file, creating it (and its directory) on first use.
#[derive(Debug, Clone)]
pub struct FileMount {
    path: PathBuf,
}

impl FileMount {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Mount for FileMount {
    fn replace(&mut self, markup: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, page(markup))?;
        tracing::debug!(path = %self.path.display(), bytes = markup.len(), "Mount replaced");
        Ok(())
    }
}

/// Keeps every frame written to it. The last frame is the current subtree.
#[derive(Debug, Clone, Default)]
pub struct MemoryMount {
    frames: Vec<String>,
}

impl MemoryMount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

impl Mount for MemoryMount {
    fn replace(&mut self, markup: &str) -> io::Result<()> {
        self.frames.push(markup.to_string());
        Ok(())
    }
}
