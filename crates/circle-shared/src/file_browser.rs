//! File browser view model.
//!
//! One category is active at a time and its files are drawn as a pile. The
//! pile has two levels of expansion: the pile itself can be spread out, and
//! inside a spread pile one file can be opened to show its details.
//!
//! ```text
//! Collapsed --click_pile--> PileExpanded --click_file(f)--> FileExpanded(f)
//!     ^                         |   ^                          |
//!     |                         |   +-------click_file(f)------+
//!     +------click_pile---------+--------------click_pile------+
//! ```
//!
//! Selecting a category or closing the browser always returns to `Collapsed`.

use serde::{Deserialize, Serialize};

use crate::constants::RAISED_Z_INDEX;
use crate::error::ViewError;
use crate::fixtures;
use crate::types::{FileCategory, FileRecord, Placement};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PileState {
    #[default]
    Collapsed,
    PileExpanded,
    FileExpanded { file: String },
}

/// One card of the active pile.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileCard<'a> {
    pub file: &'a FileRecord,
    pub placement: Placement,
    pub hover_scale: f64,
    /// Date shown under the name; only present for the expanded file.
    pub details: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct FileBrowser {
    categories: Vec<FileCategory>,
    active: usize,
    files: Vec<FileRecord>,
    state: PileState,
}

impl FileBrowser {
    /// Browser over the built-in categories, starting on the first one.
    pub fn new() -> Self {
        let categories = fixtures::file_categories();
        let files = categories
            .first()
            .and_then(|c| fixtures::files_in(&c.name))
            .unwrap_or_default();
        Self {
            categories,
            active: 0,
            files,
            state: PileState::Collapsed,
        }
    }

    pub fn categories(&self) -> &[FileCategory] {
        &self.categories
    }

    pub fn active_category(&self) -> &FileCategory {
        &self.categories[self.active]
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn state(&self) -> &PileState {
        &self.state
    }

    pub fn is_pile_expanded(&self) -> bool {
        !matches!(self.state, PileState::Collapsed)
    }

    pub fn expanded_file(&self) -> Option<&str> {
        match &self.state {
            PileState::FileExpanded { file } => Some(file),
            _ => None,
        }
    }

    pub fn select_category(&mut self, name: &str) -> Result<(), ViewError> {
        let index = self
            .categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| ViewError::UnknownCategory(name.to_string()))?;
        self.files = fixtures::files_in(name)
            .ok_or_else(|| ViewError::UnknownCategory(name.to_string()))?;
        self.active = index;
        self.state = PileState::Collapsed;
        Ok(())
    }

    /// Click on the pile as a whole: spread it, or gather everything back.
    pub fn click_pile(&mut self) {
        self.state = match self.state {
            PileState::Collapsed => PileState::PileExpanded,
            _ => PileState::Collapsed,
        };
    }

    /// Click on one file of a spread pile: open it, or close it if it is
    /// already open.
    pub fn click_file(&mut self, name: &str) -> Result<(), ViewError> {
        if !self.files.iter().any(|f| f.name == name) {
            return Err(ViewError::UnknownFile {
                category: self.active_category().name.clone(),
                file: name.to_string(),
            });
        }

        self.state = match &self.state {
            PileState::Collapsed => PileState::Collapsed,
            PileState::FileExpanded { file } if file == name => PileState::PileExpanded,
            _ => PileState::FileExpanded {
                file: name.to_string(),
            },
        };
        Ok(())
    }

    /// Route a click on a card: while collapsed any card stands for the
    /// whole pile.
    pub fn click_card(&mut self, name: &str) -> Result<(), ViewError> {
        if self.is_pile_expanded() {
            self.click_file(name)
        } else {
            self.click_pile();
            Ok(())
        }
    }

    pub fn close(&mut self) {
        self.state = PileState::Collapsed;
    }

    /// Date of `name` if that file is currently open.
    pub fn details(&self, name: &str) -> Option<&str> {
        if self.expanded_file() != Some(name) {
            return None;
        }
        self.files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.date.as_str())
    }

    pub fn layout(&self) -> Vec<FileCard<'_>> {
        let n = self.files.len() as i32;
        let expanded = self.is_pile_expanded();
        let open = self.expanded_file();

        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let i = index as f64;
                let is_open = open == Some(file.name.as_str());

                let (x, y, rotate) = if !expanded {
                    ((i * 10.0).min(20.0), (i * 10.0).min(20.0), (i * 5.0 - 5.0).min(10.0))
                } else if is_open {
                    (i * 260.0 - 260.0, 0.0, 0.0)
                } else {
                    (i * 60.0, i * 20.0, 0.0)
                };

                let placement = Placement {
                    x,
                    y,
                    rotate,
                    scale: if is_open { 1.1 } else { 1.0 },
                    opacity: if open.is_some() && !is_open { 0.3 } else { 1.0 },
                    z_index: if is_open { RAISED_Z_INDEX } else { n - index as i32 },
                };

                FileCard {
                    file,
                    placement,
                    hover_scale: if expanded { 1.05 } else { 1.1 },
                    details: if is_open { Some(file.date.as_str()) } else { None },
                }
            })
            .collect()
    }
}

impl Default for FileBrowser {
    fn default() -> Self {
        Self::new()
    }
}
