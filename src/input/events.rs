use crate::layers::marker::MarkerId;
use serde::{Deserialize, Serialize};

/// User interactions the widget reacts to after startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapEvent {
    /// A marker icon was clicked
    MarkerClicked(MarkerId),
    /// A legend checkbox changed; `name` is the level code
    CheckboxToggled { name: String, checked: bool },
}

/// Whether the widget did anything with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Yes,
    No,
}

impl EventHandled {
    pub fn handled(&self) -> bool {
        matches!(self, EventHandled::Yes)
    }
}

impl From<bool> for EventHandled {
    fn from(handled: bool) -> Self {
        if handled {
            EventHandled::Yes
        } else {
            EventHandled::No
        }
    }
}
