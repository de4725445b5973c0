//! Collision queries between axis-aligned bounding boxes

use glam::Vec2;

use super::entity::Entity;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Indices of every entity in `list` whose box overlaps `probe`, in list order
pub fn collide_with_list<P, T>(probe: &P, list: &[T]) -> Vec<usize>
where
    P: Entity + ?Sized,
    T: Entity,
{
    let bounds = probe.bounds();
    list.iter()
        .enumerate()
        .filter(|(_, other)| other.bounds().overlaps(&bounds))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(8.0, 0.0), Vec2::splat(10.0));
        let c = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::from_center(Vec2::ZERO, Vec2::splat(100.0));
        let inner = Aabb::from_center(Vec2::new(5.0, 5.0), Vec2::splat(2.0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
