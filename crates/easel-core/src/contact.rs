//! Active contact tracking for mouse, pointer and touch input.
//!
//! ## Usage
//!
//! 1) Feed every canonical `down`/`move` event to [`ContactTracker::add`].
//! 2) Feed every `up` event to [`ContactTracker::remove`].
//! 3) Read [`ContactTracker::centroid`] as the drag anchor and
//!    [`ContactTracker::distance`] as the pinch magnitude.
//!
//! Touch events carry their whole touch list. Each touch gets a synthetic
//! identity from its position in that list, so identities are reproducible
//! no matter what ids the platform hands out.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identity of a tracked contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub i32);

impl ContactId {
    /// Mouse events carry no identity of their own; they all share this one.
    pub const MOUSE: ContactId = ContactId(-1);
}

/// One tracked input point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub position: Point,
}

impl Contact {
    pub fn new(id: ContactId, position: Point) -> Self {
        Self { id, position }
    }
}

/// A canonical contact event produced by the input normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContactEvent {
    /// A single contact (mouse or unified pointer).
    Single(Contact),
    /// A multi-touch event carrying its current touch list in enumeration order.
    Touches(Vec<Point>),
}

impl ContactEvent {
    /// Single-contact event for a pointer.
    pub fn pointer(id: i32, position: Point) -> Self {
        ContactEvent::Single(Contact::new(ContactId(id), position))
    }

    /// Single-contact event for the mouse.
    pub fn mouse(position: Point) -> Self {
        ContactEvent::Single(Contact::new(ContactId::MOUSE, position))
    }
}

/// Centroid by right-to-left pairwise folding.
///
/// Starts from the last point and repeatedly replaces the accumulator with
/// its midpoint against the previous point. For two points this is the mean;
/// for three or more it is not (earlier points weigh more), and that is the
/// behavior gestures are anchored on.
pub fn fold_midpoints<I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = Point>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut iter = points.into_iter().rev();
    let first = iter.next()?;
    Some(iter.fold(first, |acc, prev| acc + (prev - acc) / 2.0))
}

/// The set of currently active contacts, in tracking order.
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    contacts: Vec<Contact>,
}

impl ContactTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or update contacts from an event.
    pub fn add(&mut self, event: &ContactEvent) {
        match event {
            ContactEvent::Touches(touches) => {
                for (index, &position) in touches.iter().enumerate() {
                    let id = ContactId(i32::try_from(index).unwrap_or(i32::MAX));
                    self.insert(Contact::new(id, position));
                }
            }
            ContactEvent::Single(contact) => self.insert(*contact),
        }
    }

    /// Remove contacts for an `up` event.
    ///
    /// A touch end clears everything, including fingers that are still down.
    pub fn remove(&mut self, event: &ContactEvent) {
        match event {
            ContactEvent::Touches(_) => self.clear(),
            ContactEvent::Single(contact) => {
                if let Some(index) = self.position_of(contact.id) {
                    self.contacts.remove(index);
                }
            }
        }
    }

    fn insert(&mut self, contact: Contact) {
        if let Some(index) = self.position_of(contact.id) {
            self.contacts.remove(index);
        }
        self.contacts.push(contact);
    }

    fn position_of(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().rposition(|c| c.id == id)
    }

    /// Drag anchor for the current contact set, if any contact is active.
    pub fn centroid(&self) -> Option<Point> {
        fold_midpoints(self.contacts.iter().map(|c| c.position))
    }

    /// Distance between the first two contacts, or 0 with fewer than two.
    pub fn distance(&self) -> f64 {
        match self.contacts.as_slice() {
            [first, second, ..] => first.position.distance(second.position),
            _ => 0.0,
        }
    }

    /// Active contacts in tracking order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of active contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether no contact is active.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Drop every contact.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-10 && (actual.y - expected.y).abs() < 1e-10,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = ContactTracker::new();
        assert!(tracker.is_empty());
        assert!(tracker.centroid().is_none());
        assert!(tracker.distance().abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_contact_centroid() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::pointer(7, Point::new(30.0, 40.0)));
        assert_point(tracker.centroid().unwrap(), Point::new(30.0, 40.0));
    }

    #[test]
    fn test_two_contact_centroid_is_midpoint() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::pointer(1, Point::new(0.0, 0.0)));
        tracker.add(&ContactEvent::pointer(2, Point::new(100.0, 50.0)));
        assert_point(tracker.centroid().unwrap(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_three_contact_centroid_is_fold_not_mean() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::pointer(1, Point::new(0.0, 0.0)));
        tracker.add(&ContactEvent::pointer(2, Point::new(40.0, 0.0)));
        tracker.add(&ContactEvent::pointer(3, Point::new(80.0, 0.0)));
        // fold(80 -> 40) = 60, fold(60 -> 0) = 30; the mean would be 40
        assert_point(tracker.centroid().unwrap(), Point::new(30.0, 0.0));
    }

    #[test]
    fn test_same_identity_is_deduplicated() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::pointer(5, Point::new(10.0, 10.0)));
        tracker.add(&ContactEvent::pointer(5, Point::new(20.0, 30.0)));
        assert_eq!(tracker.len(), 1);
        assert_point(tracker.contacts()[0].position, Point::new(20.0, 30.0));
    }

    #[test]
    fn test_update_moves_contact_to_end() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::pointer(1, Point::new(0.0, 0.0)));
        tracker.add(&ContactEvent::pointer(2, Point::new(10.0, 0.0)));
        tracker.add(&ContactEvent::pointer(1, Point::new(5.0, 5.0)));
        let ids: Vec<_> = tracker.contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ContactId(2), ContactId(1)]);
    }

    #[test]
    fn test_touches_get_sequential_ids() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::Touches(vec![
            Point::new(10.0, 20.0),
            Point::new(30.0, 60.0),
        ]));
        let ids: Vec<_> = tracker.contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ContactId(0), ContactId(1)]);
        assert_point(tracker.centroid().unwrap(), Point::new(20.0, 40.0));
    }

    #[test]
    fn test_touch_move_updates_in_place() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::Touches(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        ]));
        tracker.add(&ContactEvent::Touches(vec![
            Point::new(2.0, 0.0),
            Point::new(12.0, 0.0),
        ]));
        assert_eq!(tracker.len(), 2);
        assert_point(tracker.centroid().unwrap(), Point::new(7.0, 0.0));
    }

    #[test]
    fn test_touch_end_clears_all() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::Touches(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        ]));
        // Only one finger lifted; the remaining two are still listed.
        tracker.remove(&ContactEvent::Touches(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        ]));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_remove_single_identity() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::pointer(1, Point::new(0.0, 0.0)));
        tracker.add(&ContactEvent::pointer(2, Point::new(10.0, 0.0)));
        tracker.remove(&ContactEvent::pointer(1, Point::new(99.0, 99.0)));
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.contacts()[0].id, ContactId(2));

        // Unknown identity is a no-op
        tracker.remove(&ContactEvent::pointer(42, Point::ZERO));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_mouse_shares_one_identity() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::mouse(Point::new(1.0, 1.0)));
        tracker.add(&ContactEvent::mouse(Point::new(2.0, 2.0)));
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.contacts()[0].id, ContactId::MOUSE);
    }

    #[test]
    fn test_distance_uses_first_two() {
        let mut tracker = ContactTracker::new();
        tracker.add(&ContactEvent::pointer(1, Point::new(0.0, 0.0)));
        assert!(tracker.distance().abs() < f64::EPSILON);
        tracker.add(&ContactEvent::pointer(2, Point::new(3.0, 4.0)));
        tracker.add(&ContactEvent::pointer(3, Point::new(100.0, 100.0)));
        assert!((tracker.distance() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_fold_midpoints_empty() {
        assert!(fold_midpoints(Vec::<Point>::new()).is_none());
    }
}
