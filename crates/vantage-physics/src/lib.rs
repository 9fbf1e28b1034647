//! Vantage Physics - Scene queries using rapier3d
//!
//! Provides a static collision scene and implements the rig's
//! [`SpatialQuery`] contract on top of rapier's query pipeline.

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use tracing::debug;
use vantage_core::{LayerMask, RayHit, SpatialQuery};

/// Static collision scene the camera probes against
pub struct PhysicsScene {
    /// Always empty; rapier queries take a body set alongside the colliders
    rigid_body_set: RigidBodySet,
    /// Collider storage
    collider_set: ColliderSet,
    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
}

impl PhysicsScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Rebuild the query acceleration structure after colliders changed
    fn refresh(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.) and refresh queries
    fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.refresh();
        handle
    }

    /// Move a static collider to a new position
    pub fn set_collider_translation(&mut self, handle: ColliderHandle, position: Vec3) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_translation(vector![position.x, position.y, position.z]);
        }
        self.refresh();
    }

    /// Create a ground plane collider on every layer
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider on every layer
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        self.create_static_box_on(LayerMask::ALL, half_extents, position)
    }

    /// Create a static box collider that belongs to the given layers
    pub fn create_static_box_on(
        &mut self,
        layers: LayerMask,
        half_extents: Vec3,
        position: Vec3,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .collision_groups(membership(layers))
            .build();
        debug!("Added box at {} on layers {:#x}", position, layers.0);
        self.add_static_collider(collider)
    }

    /// Create a terrain heightfield collider from height data
    ///
    /// - `heights`: row-major height values (nrows * ncols), Z-outer X-inner
    /// - `nrows`: number of rows (Z axis vertex count)
    /// - `ncols`: number of columns (X axis vertex count)
    /// - `scale`: world-space size (x = total X size, y = height scale, z = total Z size)
    pub fn create_heightfield(
        &mut self,
        heights: &[f32],
        nrows: usize,
        ncols: usize,
        scale: Vec3,
    ) -> ColliderHandle {
        use nalgebra::DMatrix;

        let matrix = DMatrix::from_fn(nrows, ncols, |r, c| {
            heights.get(r * ncols + c).copied().unwrap_or(0.0)
        });

        let collider = ColliderBuilder::heightfield(matrix, vector![scale.x, scale.y, scale.z]).build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialQuery for PhysicsScene {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                query_filter(mask),
            )
            .map(|(_handle, intersection)| RayHit {
                point: origin + direction * intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
                distance: intersection.time_of_impact,
            })
    }
}

/// Collision groups for a collider that lives on `layers` and is visible to every query
fn membership(layers: LayerMask) -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(layers.0), Group::ALL)
}

/// Query filter that only sees colliders on `mask`
fn query_filter(mask: LayerMask) -> QueryFilter<'static> {
    QueryFilter::default().groups(InteractionGroups::new(
        Group::ALL,
        Group::from_bits_truncate(mask.0),
    ))
}
