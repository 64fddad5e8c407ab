//! Event sink for the head panel.
//!
//! Hosts subscribe to panel events via [`EventController`]. Each event
//! carries a set of [`EventKind`] flags so that a single occurrence can match
//! several categories. Structural edits and value updates are separate
//! events: creating a point on pointer-down emits a `POINT_CREATED` event
//! followed by a `CHANGE` event.
//!
//! Subscribers pass an [`EventFilter`]; an event is delivered when
//! `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::transmit::TransmitPayload;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// Source positions changed; carries a [`TransmitPayload`].
    pub const CHANGE: Self = Self(1 << 0);
    /// A new source was placed, by pointer or programmatically.
    pub const POINT_CREATED: Self = Self(1 << 1);
    /// An existing source was picked by pointer-down.
    pub const POINT_SELECTED: Self = Self(1 << 2);
    /// A single source was removed.
    pub const POINT_REMOVED: Self = Self(1 << 3);
    /// All sources were removed.
    pub const POINTS_CLEARED: Self = Self(1 << 4);
    /// A source's palette index changed.
    pub const COLOR_CHANGED: Self = Self(1 << 5);

    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

const KIND_NAMES: &[(EventKind, &str)] = &[
    (EventKind::CHANGE, "CHANGE"),
    (EventKind::POINT_CREATED, "POINT_CREATED"),
    (EventKind::POINT_SELECTED, "POINT_SELECTED"),
    (EventKind::POINT_REMOVED, "POINT_REMOVED"),
    (EventKind::POINTS_CLEARED, "POINTS_CLEARED"),
    (EventKind::COLOR_CHANGED, "COLOR_CHANGED"),
];

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::ALL {
            return write!(f, "ALL");
        }
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut rest = self.0;
        let mut first = true;
        for (kind, name) in KIND_NAMES {
            if self.contains(*kind) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                rest &= !kind.0;
                first = false;
            }
        }
        if rest != 0 {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "0x{rest:x}")?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Event payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of the source an event refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMeta {
    pub index: usize,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub color_index: usize,
}

/// A single panel event.
#[derive(Debug, Clone)]
pub struct PanelEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created, set on emit.
    pub timestamp: f64,
    /// Listener-relative values, present on `CHANGE`.
    pub change: Option<TransmitPayload>,
    /// Source involved in a structural change.
    pub point: Option<PointMeta>,
}

impl PanelEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            change: None,
            point: None,
        }
    }

    pub fn change(payload: TransmitPayload) -> Self {
        let mut evt = Self::new(EventKind::CHANGE);
        evt.change = Some(payload);
        evt
    }

    pub fn with_point(mut self, point: PointMeta) -> Self {
        self.point = Some(point);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// OR-mask selecting which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self { mask: EventKind::ALL }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &PanelEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<PanelEvent>,
}

/// Collects panel events and fans them out to subscribers.
///
/// Cloning yields another handle to the same subscriber list, so the host
/// can keep one handle and hand another to the panel.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
    emitted: u64,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
                emitted: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EventCtrlInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to events whose kinds intersect `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<PanelEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<PanelEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to every matching subscriber.
    ///
    /// Subscribers whose receiver was dropped are pruned the next time an
    /// event matches them.
    pub fn emit(&self, mut event: PanelEvent) {
        let mut inner = self.lock();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.emitted += 1;
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    /// Number of events emitted so far, regardless of subscribers.
    pub fn emitted_count(&self) -> u64 {
        self.lock().emitted
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventController")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_union_and_intersection() {
        let combined = EventKind::CHANGE | EventKind::POINT_CREATED;
        assert!(combined.contains(EventKind::CHANGE));
        assert!(combined.contains(EventKind::POINT_CREATED));
        assert!(!EventKind::POINT_REMOVED.intersects(combined));
        assert!(EventKind::ALL.contains(EventKind::COLOR_CHANGED));
    }

    #[test]
    fn event_kinds_do_not_overlap() {
        for (i, (a, _)) in KIND_NAMES.iter().enumerate() {
            for (j, (b, _)) in KIND_NAMES.iter().enumerate() {
                if i != j {
                    assert!(!a.intersects(*b), "{a} overlaps {b}");
                }
            }
        }
    }

    #[test]
    fn event_kind_display() {
        assert_eq!(EventKind::CHANGE.to_string(), "CHANGE");
        assert_eq!(
            (EventKind::CHANGE | EventKind::POINT_CREATED).to_string(),
            "CHANGE|POINT_CREATED"
        );
        assert_eq!(EventKind::ALL.to_string(), "ALL");
        assert_eq!(EventKind::NONE.to_string(), "NONE");
        assert!(EventKind(1 << 31).to_string().starts_with("0x"));
    }

    #[test]
    fn filtered_subscribers() {
        let ctrl = EventController::new();
        let rx_all = ctrl.subscribe_all();
        let rx_change = ctrl.subscribe(EventFilter::only(EventKind::CHANGE));
        let rx_removed = ctrl.subscribe(EventFilter::only(EventKind::POINT_REMOVED));

        ctrl.emit(PanelEvent::new(EventKind::CHANGE | EventKind::POINT_CREATED));

        assert!(rx_all.try_recv().is_ok());
        assert!(rx_change.try_recv().is_ok());
        assert!(rx_removed.try_recv().is_err());
        assert_eq!(ctrl.emitted_count(), 1);
    }

    #[test]
    fn timestamp_set_on_emit() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe_all();
        std::thread::sleep(std::time::Duration::from_millis(5));
        ctrl.emit(PanelEvent::new(EventKind::CHANGE));
        assert!(rx.try_recv().unwrap().timestamp > 0.0);
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let ctrl = EventController::new();
        let rx1 = ctrl.subscribe_all();
        let rx2 = ctrl.subscribe_all();
        drop(rx1);

        ctrl.emit(PanelEvent::new(EventKind::CHANGE));
        assert!(rx2.try_recv().is_ok());
        assert_eq!(ctrl.subscriber_count(), 1);
    }

    #[test]
    fn clones_share_subscribers() {
        let ctrl = EventController::new();
        let handle = ctrl.clone();
        let rx = ctrl.subscribe_all();
        handle.emit(PanelEvent::change(TransmitPayload::Active {
            point_index: 0,
            distance: 1.0,
            angle: 45.0,
        }));
        let evt = rx.try_recv().unwrap();
        assert!(evt.kinds.contains(EventKind::CHANGE));
        assert!(evt.change.is_some());
    }
}
