//! Resolution of followed entities

use std::collections::HashMap;

use glam::Vec3;
use vantage_core::EntityId;

/// Host lookup for the positions of followable entities.
///
/// The rig keeps only an [`EntityId`]; an entity that no longer resolves is
/// treated as missing for that tick.
pub trait TargetSource {
    /// World position of the entity, if it still exists
    fn target_position(&self, id: EntityId) -> Option<Vec3>;
}

impl TargetSource for HashMap<EntityId, Vec3> {
    fn target_position(&self, id: EntityId) -> Option<Vec3> {
        self.get(&id).copied()
    }
}

/// Target source for hosts without followable entities
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargets;

impl TargetSource for NoTargets {
    fn target_position(&self, _: EntityId) -> Option<Vec3> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source() {
        let id = EntityId::new();
        let mut targets = HashMap::new();
        targets.insert(id, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(targets.target_position(id), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(targets.target_position(EntityId::new()), None);
        assert_eq!(NoTargets.target_position(id), None);
    }
}
