//! Change notifications for host UIs.

use std::fmt;

use crate::options::CameraBoundsConfig;
use crate::placement::{PlaceholderId, PlacementMode, PlacementPlane};
use crate::scene::{EulerDegrees, OrientationTarget, ViewState};

/// Something the host UI may want to redraw for.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// The view switched.
    ViewChanged(ViewState),
    /// The loading indicator should be shown or hidden.
    LoadingChanged(bool),
    /// An asset failed to load; the view is unchanged.
    AssetLoadFailed {
        /// URL requested.
        url: String,
        /// Loader message.
        message: String,
    },
    /// A placeholder was added, removed, moved, rotated, or scaled.
    PlaceholdersChanged,
    /// The selection changed.
    SelectionChanged(Option<PlaceholderId>),
    /// Placement mode was armed or disarmed.
    PlacementModeChanged(Option<PlacementMode>),
    /// The placement plane changed.
    PlaneChanged(PlacementPlane),
    /// The camera bounds configuration changed.
    CameraBoundsChanged(CameraBoundsConfig),
    /// An orientation correction changed.
    OrientationChanged {
        /// Which asset.
        target: OrientationTarget,
        /// New correction.
        euler: EulerDegrees,
    },
    /// Back was pressed on the main view; the host should leave.
    ExitRequested,
}

/// Handle returned by [`ViewerSession::subscribe`](super::ViewerSession::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ViewerEvent)>;

/// Registered listeners, called in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.listeners.len())
            .finish()
    }
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub(crate) fn emit(&mut self, event: &ViewerEvent) {
        log::debug!("event: {event:?}");
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
