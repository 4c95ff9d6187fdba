pub mod controls;
pub mod popup;
pub mod widget;

pub use controls::{LevelCheckbox, LevelControls};

pub use popup::{InfoContent, InfoWindow, PopupBindings};

pub use widget::{InitReport, NotifyMap};
