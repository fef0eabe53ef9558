//! Decorative rotors spin at a constant rate.

use bastion_core::types::{normalize_angle, EntityId};

use crate::world::World;

pub fn run(world: &mut World) {
    let ids: Vec<EntityId> = world.farms.iter().copied().collect();
    for id in ids {
        let Some(entity) = world.get_mut(id) else {
            continue;
        };
        if let Some(rotor) = entity.rotor {
            entity.prev_theta = entity.theta;
            entity.theta = normalize_angle(entity.theta + rotor.max_theta_speed);
        }
    }
}
