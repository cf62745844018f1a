//! Touch contacts currently on the surface.
//!
//! Frames only carry the contacts that changed, so the table keeps the last
//! known position of every contact that is still down. The touch cluster's
//! arity is the number of entries here.

use gestura_core::Millis;
use gestura_foundation::{PointerId, TouchPoint, Touches};
use gestura_geometry::{centroid, Point};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Contact {
    pub id: PointerId,
    pub position: Point,
    pub pressure: f32,
    /// Timestamp of the last frame that carried this contact.
    pub last_seen: Millis,
    /// The cluster this contact belonged to ended while it stayed down.
    /// Spent contacts count towards arity but never seed a new cluster
    /// on their own.
    pub spent: bool,
}

#[derive(Default, Debug)]
pub(crate) struct ContactTable {
    contacts: SmallVec<[Contact; 5]>,
}

impl ContactTable {
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Updates a known contact or inserts a new one. Returns `false` when the
    /// contact is new and the table already holds `capacity` entries.
    pub fn upsert(&mut self, touch: &TouchPoint, seen: Millis, capacity: usize) -> bool {
        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == touch.id) {
            contact.position = touch.point;
            contact.pressure = touch.pressure;
            contact.last_seen = seen;
            return true;
        }
        if self.contacts.len() >= capacity {
            return false;
        }
        self.contacts.push(Contact {
            id: touch.id,
            position: touch.point,
            pressure: touch.pressure,
            last_seen: seen,
            spent: false,
        });
        true
    }

    /// Moves a known contact. Unknown ids are ignored.
    pub fn update(&mut self, touch: &TouchPoint, seen: Millis) {
        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == touch.id) {
            contact.position = touch.point;
            contact.pressure = touch.pressure;
            contact.last_seen = seen;
        }
    }

    /// Drops contacts no frame has mentioned for longer than `max_idle`.
    /// With `spent_only` set, contacts of a live cluster are kept.
    pub fn evict_idle(&mut self, now: Millis, max_idle: Millis, spent_only: bool) -> usize {
        let before = self.contacts.len();
        self.contacts.retain(|c| {
            let idle = now.saturating_sub(c.last_seen) > max_idle;
            !(idle && (c.spent || !spent_only))
        });
        before - self.contacts.len()
    }

    pub fn remove(&mut self, id: PointerId) -> Option<Contact> {
        let index = self.contacts.iter().position(|c| c.id == id)?;
        Some(self.contacts.remove(index))
    }

    pub fn mark_all_spent(&mut self) {
        for contact in &mut self.contacts {
            contact.spent = true;
        }
    }

    pub fn all_spent(&self) -> bool {
        self.contacts.iter().all(|c| c.spent)
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn first_id(&self) -> Option<PointerId> {
        self.contacts.first().map(|c| c.id)
    }

    pub fn centroid(&self) -> Point {
        centroid(self.contacts.iter().map(|c| c.position))
    }

    pub fn mean_pressure(&self) -> f32 {
        if self.contacts.is_empty() {
            return 0.0;
        }
        self.contacts.iter().map(|c| c.pressure).sum::<f32>() / self.contacts.len() as f32
    }

    /// Positions of the first two contacts, in insertion order.
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.contacts.as_slice() {
            [a, b, ..] => Some((a.position, b.position)),
            _ => None,
        }
    }

    pub fn snapshot(&self, timestamp: Millis) -> Touches {
        self.contacts
            .iter()
            .map(|c| TouchPoint::new(c.id, c.position, c.pressure, timestamp))
            .collect()
    }
}
