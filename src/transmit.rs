//! Shaping of the values the panel reports to its host.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Pos};
use crate::points::PointStore;

/// Which sources are reported on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmitMode {
    /// Distance and angle of every source, in index order.
    All,
    /// Only the active source; nothing is reported while none is selected.
    #[default]
    ActiveOnly,
}

/// Payload of a change event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransmitPayload {
    All {
        distances: Vec<f32>,
        angles: Vec<f32>,
    },
    #[serde(rename_all = "camelCase")]
    Active {
        point_index: usize,
        distance: f32,
        angle: f32,
    },
}

impl TransmitPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Everything needed to turn pixel positions into listener-relative values.
#[derive(Debug, Clone, Copy)]
pub struct ListenerFrame {
    pub listener: Pos,
    pub pixels_per_meter: f32,
    pub head_orientation: f32,
    pub relative_to_head: bool,
}

impl ListenerFrame {
    pub fn distance(&self, p: Pos) -> f32 {
        geometry::distance(p, self.listener, self.pixels_per_meter)
    }

    pub fn angle(&self, p: Pos) -> f32 {
        geometry::angle(p, self.listener, self.head_orientation, self.relative_to_head)
    }
}

/// Build the payload for `mode`, or `None` when nothing should be emitted.
pub fn shape(
    mode: TransmitMode,
    store: &PointStore,
    frame: &ListenerFrame,
) -> Option<TransmitPayload> {
    match mode {
        TransmitMode::All => {
            let (distances, angles) = store
                .points()
                .iter()
                .map(|p| (frame.distance(p.pos()), frame.angle(p.pos())))
                .unzip();
            Some(TransmitPayload::All { distances, angles })
        }
        TransmitMode::ActiveOnly => {
            let point_index = store.active()?;
            let p = store.get(point_index)?.pos();
            Some(TransmitPayload::Active {
                point_index,
                distance: frame.distance(p),
                angle: frame.angle(p),
            })
        }
    }
}
