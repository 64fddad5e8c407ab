//! headpanel crate root: re-exports and module wiring.
//!
//! This crate provides a head-centered sound source panel for egui. Users
//! place and drag sources around a virtual listener; the panel reports each
//! source's distance (meters) and angle (degrees, 0° = front) through an
//! event controller.
//!
//! Modules:
//! - `geometry`: polar/cartesian conversion, distance, angle, clamping
//! - `points`: the source list and the active selection
//! - `visuals`: marker and label primitives kept in step with the sources
//! - `transmit`: shaping of change payloads
//! - `events`: subscription-based event sink
//! - `config` / `color_scheme`: construction options, tunables and themes
//! - `panel`: the [`BinauralPanel`] widget tying it all together

pub mod color_scheme;
pub mod config;
pub mod events;
pub mod geometry;
pub mod panel;
pub mod points;
pub mod transmit;
pub mod visuals;

pub use color_scheme::{ColorScheme, CustomColorScheme, PanelColors};
pub use config::{ConfigError, PanelConfig, PanelSettings};
pub use events::{EventController, EventFilter, EventKind, PanelEvent, PointMeta};
pub use geometry::{Polar, Pos};
pub use panel::{BinauralPanel, InteractionState};
pub use points::{Point, PointStore};
pub use transmit::{TransmitMode, TransmitPayload};
