//! In-flight stroke paths, one slot per touch pointer

use paintview_paint::{Path, Point};

/// Number of simultaneous pointers tracked; higher ids are ignored
pub const MAX_TOUCH_POINTS: usize = 20;

#[derive(Clone, Debug, Default)]
struct Slot {
    path: Option<Path>,
    // kept after the path is finalized so a MOVE can resume from it
    last: Point,
}

/// Fixed-capacity table of open paths indexed by pointer id
#[derive(Clone, Debug, Default)]
pub struct PathBuffer {
    slots: [Slot; MAX_TOUCH_POINTS],
}

impl PathBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` maps to a slot
    pub fn accepts(id: i32) -> bool {
        slot_index(id).is_some()
    }

    /// Open a new path at `(x, y)` for pointer `id`.
    ///
    /// Returns the path it displaced, which the caller must finalize.
    pub fn begin(&mut self, id: i32, x: f32, y: f32) -> Option<Path> {
        let slot = self.slot_mut(id)?;
        let displaced = slot.path.replace(Path::starting_at(x, y));
        slot.last = Point::new(x, y);
        displaced
    }

    /// Extend pointer `id`'s path towards `(x, y)`.
    ///
    /// The segment is a quadratic through the previous point ending at the
    /// midpoint, which smooths the polyline the host reports. An empty slot
    /// restarts from the last recorded point. Returns `false` for an
    /// unknown id.
    pub fn extend(&mut self, id: i32, x: f32, y: f32) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        let last = slot.last;
        let path = slot
            .path
            .get_or_insert_with(|| Path::starting_at(last.x, last.y));
        let mid = last.midpoint(Point::new(x, y));
        path.quad_to(last.x, last.y, mid.x, mid.y);
        slot.last = Point::new(x, y);
        true
    }

    /// Release pointer `id`'s path, if any
    pub fn take(&mut self, id: i32) -> Option<Path> {
        self.slot_mut(id)?.path.take()
    }

    /// Release every open path, lowest pointer id first
    pub fn drain(&mut self) -> impl Iterator<Item = Path> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.path.take())
    }

    pub fn get(&self, id: i32) -> Option<&Path> {
        self.slots[slot_index(id)?].path.as_ref()
    }

    /// Last point recorded for pointer `id`
    pub fn last_point(&self, id: i32) -> Option<Point> {
        slot_index(id).map(|i| self.slots[i].last)
    }

    /// Open paths, lowest pointer id first
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.slots.iter().filter_map(|slot| slot.path.as_ref())
    }

    /// Number of open paths
    pub fn occupied(&self) -> usize {
        self.paths().count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    fn slot_mut(&mut self, id: i32) -> Option<&mut Slot> {
        slot_index(id).map(|i| &mut self.slots[i])
    }
}

fn slot_index(id: i32) -> Option<usize> {
    usize::try_from(id).ok().filter(|&i| i < MAX_TOUCH_POINTS)
}
