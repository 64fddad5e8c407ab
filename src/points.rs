//! Source point storage and selection.
//!
//! Points are addressed by their index in creation order. There is no
//! stable identity: removing a point shifts every later index down by one,
//! so an index held across [`PointStore::remove`] may refer to a different
//! point afterwards.

use crate::geometry::Pos;

/// A sound source placed on the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub label: String,
    /// Index into the panel's source palette.
    pub color_index: usize,
}

impl Point {
    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn set_pos(&mut self, p: Pos) {
        self.x = p.x;
        self.y = p.y;
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<Point>,
    active: Option<usize>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Point> {
        self.points.get_mut(index)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_point(&self) -> Option<&Point> {
        self.active.and_then(|i| self.points.get(i))
    }

    pub fn active_point_mut(&mut self) -> Option<&mut Point> {
        self.active.and_then(|i| self.points.get_mut(i))
    }

    /// Select a point by index; out-of-range indices clear the selection.
    pub fn set_active(&mut self, index: Option<usize>) {
        self.active = index.filter(|&i| i < self.points.len());
    }

    /// Find the point under `(x, y)`.
    ///
    /// Every point is tested against a square box of half-width
    /// `node_radius`; when boxes overlap the highest index wins.
    pub fn hit_test(&self, x: f32, y: f32, node_radius: f32) -> Option<usize> {
        let mut hit = None;
        for (i, p) in self.points.iter().enumerate() {
            if x >= p.x - node_radius
                && x <= p.x + node_radius
                && y >= p.y - node_radius
                && y <= p.y + node_radius
            {
                hit = Some(i);
            }
        }
        hit
    }

    /// Append a point and make it the active one. Returns its index.
    pub fn create(
        &mut self,
        x: f32,
        y: f32,
        label: impl Into<String>,
        color_index: usize,
    ) -> usize {
        self.points.push(Point {
            x,
            y,
            label: label.into(),
            color_index,
        });
        let index = self.points.len() - 1;
        self.active = Some(index);
        index
    }

    /// Remove the point at `index`. The selection is cleared either way.
    ///
    /// Returns the removed point, or `None` when the index was out of range.
    pub fn remove(&mut self, index: usize) -> Option<Point> {
        self.active = None;
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    pub fn remove_all(&mut self) {
        self.points.clear();
        self.active = None;
    }

    /// Change a point's palette index. Returns `true` if a point was updated.
    pub fn set_color(&mut self, index: Option<usize>, color_index: usize) -> bool {
        match index.and_then(|i| self.points.get_mut(i)) {
            Some(p) => {
                p.color_index = color_index;
                true
            }
            None => false,
        }
    }
}
