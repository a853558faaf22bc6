//! Particle collision against convex polygon obstacles.
//!
//! ## Overview
//!
//! For every active particle the resolver:
//! - tests the particle against each polygon edge's half-plane and gives up
//!   on the first edge it lies outside of
//! - otherwise probes a short segment from the particle back towards its
//!   previous position and picks the last edge the probe crosses
//! - reflects the particle's velocity about that edge's normal, relative to
//!   the obstacle's own velocity, and scales it by a jittered restitution
//!
//! Particles inside the polygon whose probe crosses no edge are embedded
//! too deeply to resolve and are left alone for the frame.

use cinder_common::{segment_intersection, HalfPlane, RandomSource, Transform2D};
use glam::Vec2;
use tracing::trace;

use crate::collider::{Collider, ColliderShape, Polygon, RigidBody};
use crate::pool::ParticlePool;

/// Length of the probe segment cast from a particle towards its previous
/// position.
pub const PROBE_LENGTH: f32 = 0.2;

/// Factor applied to the unit edge normal before computing the impulse.
pub const NORMAL_PROBE_FACTOR: f32 = 1.2;

/// Half-width of the random band added to the configured restitution.
pub const RESTITUTION_JITTER: f32 = 0.2;

/// Outcome of one collision pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    /// Active particles tested
    pub tested: usize,
    /// Particles whose velocity was reflected
    pub resolved: usize,
    /// Particles inside the obstacle that no probe could resolve
    pub embedded: usize,
    /// The obstacle had too few vertices to form an edge
    pub degenerate: bool,
}

impl CollisionReport {
    /// Adds the counts of another pass.
    pub fn merge(&mut self, other: Self) {
        self.tested += other.tested;
        self.resolved += other.resolved;
        self.embedded += other.embedded;
        self.degenerate |= other.degenerate;
    }
}

/// Polygon edge in world space.
#[derive(Debug, Clone, Copy)]
struct WorldEdge {
    start: Vec2,
    end: Vec2,
    normal: Vec2,
    half_plane: HalfPlane,
}

/// Tests the pool's active particles against one obstacle.
///
/// Dispatches on the shape kind; only polygons are resolved.
pub fn check_collisions(
    pool: &mut ParticlePool,
    transform: &Transform2D,
    collider: &Collider,
    restitution: f32,
    rng: &mut dyn RandomSource,
) -> CollisionReport {
    match &collider.shape {
        ColliderShape::Polygon(polygon) => {
            resolve_polygon_collisions(pool, transform, polygon, collider.body, restitution, rng)
        },
        ColliderShape::Circle { .. } => CollisionReport::default(),
    }
}

/// Resolves collisions of the pool's active particles with a convex
/// polygon placed by `transform`.
pub fn resolve_polygon_collisions(
    pool: &mut ParticlePool,
    transform: &Transform2D,
    polygon: &Polygon,
    body: RigidBody,
    restitution: f32,
    rng: &mut dyn RandomSource,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    if polygon.vertices().len() < 2 {
        report.degenerate = true;
        return report;
    }

    let edges = world_edges(transform, polygon);

    for slot in 0..pool.live_count() {
        let Some((particle, attributes)) = pool.slot_mut(slot) else {
            break;
        };
        report.tested += 1;

        let position = attributes.transform.position;
        let probe_end =
            position + (particle.old_position - position).normalize_or_zero() * PROBE_LENGTH;

        let mut inside = true;
        let mut hit_edge = None;
        for (index, edge) in edges.iter().enumerate() {
            if !edge.half_plane.contains(position) {
                inside = false;
                break;
            }
            if segment_intersection(edge.start, edge.end, position, probe_end).is_some() {
                hit_edge = Some(index);
            }
        }

        if !inside {
            continue;
        }
        let Some(index) = hit_edge else {
            trace!("Particle in slot {} embedded at {:?}, skipping", slot, position);
            report.embedded += 1;
            continue;
        };

        let normal = edges[index].normal.normalize_or_zero() * NORMAL_PROBE_FACTOR;
        let relative_velocity = body.velocity - particle.velocity;
        let reflected = particle.velocity + normal * normal.dot(relative_velocity);
        let effective = (restitution + rng.symmetric(RESTITUTION_JITTER)).clamp(0.0, 1.0);

        particle.velocity = reflected * effective;
        report.resolved += 1;
    }

    report
}

/// Maps the polygon's edges and face normals into world space.
///
/// Normals go through the same linear map as the vertices, which keeps them
/// perpendicular to their edges only for rotation and uniform scale.
fn world_edges(transform: &Transform2D, polygon: &Polygon) -> Vec<WorldEdge> {
    polygon
        .normals()
        .iter()
        .enumerate()
        .map(|(index, &local_normal)| {
            let (start, end) = polygon.edge(index);
            let start = transform.transform_point(start);
            let end = transform.transform_point(end);
            let normal = transform.transform_vector(local_normal);
            WorldEdge {
                start,
                end,
                normal,
                half_plane: HalfPlane::from_edge(normal, start),
            }
        })
        .collect()
}
