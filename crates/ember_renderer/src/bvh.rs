//! Bounding volume hierarchy over shared scene objects.

use crate::{HitRecord, Hittable, HittableList, Ray};
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Maximum primitives per leaf before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// Binary tree of bounding boxes. Leaves hold a few primitives each.
enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        objects: Vec<Arc<dyn Hittable>>,
        bbox: Aabb,
    },
    Empty,
}

/// BVH for intersection, plus a flat copy of its primitives for light
/// sampling. Every primitive is weighted equally, as in `HittableList`.
pub struct Bvh {
    root: BvhNode,
    primitives: HittableList,
}

impl Bvh {
    pub fn new(objects: Vec<Arc<dyn Hittable>>) -> Self {
        let primitives: HittableList = objects.iter().cloned().collect();
        let root = if objects.is_empty() {
            BvhNode::Empty
        } else {
            BvhNode::build(objects)
        };

        Self { root, primitives }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl BvhNode {
    /// Median split on the axis with the widest centroid spread.
    fn build(mut objects: Vec<Arc<dyn Hittable>>) -> Self {
        let bbox = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));

        if objects.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf { objects, bbox };
        }

        let centroids = objects.iter().fold(Aabb::EMPTY, |acc, o| {
            let c = o.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroids.longest_axis();

        let key = |o: &Arc<dyn Hittable>| o.bounding_box().centroid()[axis];
        objects.sort_unstable_by(|a, b| key(a).total_cmp(&key(b)));

        let right = objects.split_off(objects.len() / 2);
        BvhNode::Branch {
            left: Box::new(Self::build(objects)),
            right: Box::new(Self::build(right)),
            bbox,
        }
    }

    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let mut hit_anything = false;
                let mut closest = ray_t.max;
                for obj in objects {
                    if obj.hit(ray, ray_t.with_max(closest), rec) {
                        hit_anything = true;
                        closest = rec.t;
                    }
                }
                hit_anything
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, ray_t.with_max(right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}

impl Hittable for Bvh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.root.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.root.bounding_box()
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        self.primitives.pdf_value(origin, direction)
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        self.primitives.random(origin, rng)
    }
}
