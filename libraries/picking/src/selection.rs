use bevy::prelude::*;
use celestial::body::BodyKind;
use celestial::record::{ExoplanetRecord, HostStarRecord};
use std::fmt;

/// What a click landed on. `None` means empty space, i.e. a deselection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum SelectionKind {
    Star,
    Planet,
    HostStar,
    Exoplanet,
    None,
}

impl SelectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionKind::Star => BodyKind::Sun.label(),
            SelectionKind::Planet => BodyKind::Planet.label(),
            SelectionKind::HostStar => BodyKind::HostStar.label(),
            SelectionKind::Exoplanet => BodyKind::Exoplanet.label(),
            SelectionKind::None => "none",
        }
    }
}

impl From<BodyKind> for SelectionKind {
    fn from(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Sun => SelectionKind::Star,
            BodyKind::Planet => SelectionKind::Planet,
            BodyKind::HostStar => SelectionKind::HostStar,
            BodyKind::Exoplanet => SelectionKind::Exoplanet,
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full record of a picked dynamic body.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPayload {
    HostStar(HostStarRecord),
    Exoplanet(ExoplanetRecord),
}

#[derive(Debug, Clone, PartialEq, Event)]
pub struct Selection {
    pub name: String,
    pub kind: SelectionKind,
    pub payload: Option<SelectionPayload>,
}

impl Selection {
    pub fn none() -> Self {
        Self {
            name: String::new(),
            kind: SelectionKind::None,
            payload: None,
        }
    }
}

type SelectCallback = Box<dyn FnMut(&Selection) + Send + Sync>;

/// Holds the single selection callback. Registering a new one replaces the previous one.
#[derive(Default, Resource)]
pub struct SelectionHandler {
    callback: Option<SelectCallback>,
}

impl SelectionHandler {
    pub fn on_select(&mut self, callback: impl FnMut(&Selection) + Send + Sync + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn clear(&mut self) {
        self.callback = None;
    }

    pub fn is_registered(&self) -> bool {
        self.callback.is_some()
    }

    pub(crate) fn dispatch(&mut self, selection: &Selection) {
        if let Some(callback) = &mut self.callback {
            callback(selection);
        }
    }
}
