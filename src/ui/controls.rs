use crate::data::tournament::Level;
use serde::{Deserialize, Serialize};

/// One legend checkbox; its `name` is the level code it controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCheckbox {
    pub name: String,
    pub label: String,
    pub icon: String,
    pub checked: bool,
}

/// The legend: one checkbox per level, all checked at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelControls {
    checkboxes: Vec<LevelCheckbox>,
}

impl LevelControls {
    pub fn new(icon_for: impl Fn(Level) -> String) -> Self {
        Self {
            checkboxes: Level::ALL
                .into_iter()
                .map(|level| LevelCheckbox {
                    name: level.code().to_string(),
                    label: level.label().to_string(),
                    icon: icon_for(level),
                    checked: true,
                })
                .collect(),
        }
    }

    pub fn checkboxes(&self) -> &[LevelCheckbox] {
        &self.checkboxes
    }

    pub fn is_checked(&self, level: Level) -> bool {
        self.checkboxes
            .iter()
            .any(|c| c.name == level.code() && c.checked)
    }

    /// Records a checkbox change and returns the level it controls, or
    /// `None` when no checkbox carries that name.
    pub fn set(&mut self, name: &str, checked: bool) -> Option<Level> {
        let level = Level::from_code(name)?;
        let checkbox = self.checkboxes.iter_mut().find(|c| c.name == name)?;
        checkbox.checked = checked;
        Some(level)
    }
}
