#[cfg(test)]
mod tests {
    use glam::{DVec2, IVec2};

    use crate::commands::PlayerCommand;
    use crate::components::{KeysDown, Upgrades};
    use crate::config::{ConfigError, SimConfig};
    use crate::enums::*;
    use crate::events::{DiffusionMessage, PheromoneSource};
    use crate::stats::{action_timing, projectile_stats};
    use crate::types::EntityId;

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(r#"{ "ms_per_tick": 33, "seed": 7 }"#).unwrap();
        assert_eq!(config.ms_per_tick, 33);
        assert_eq!(config.seed, 7);
        assert_eq!(config.grid_width, SimConfig::default().grid_width);
        assert_eq!(config.camera_mode, CameraMode::FreeRoam);
    }

    #[test]
    fn test_config_rejects_zero_interval() {
        let err = SimConfig::from_json_str(r#"{ "ms_per_tick": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        let err = SimConfig::from_json_str("{ ms_per_tick: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_missing_file() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    /// The diffusion engine dispatches on the `type` tag.
    #[test]
    fn test_diffusion_message_wire_tags() {
        let json = serde_json::to_value(DiffusionMessage::DispersePheromones).unwrap();
        assert_eq!(json["type"], "DISPERSE_PHEROMONES");

        let msg = DiffusionMessage::ReverseFloodFill {
            sources: vec![PheromoneSource {
                id: EntityId::new(3, 0),
                pheromone: PheromoneKind::Colony,
                position: IVec2::new(4, 5),
                quantity: 0.0,
            }],
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "REVERSE_FLOOD_FILL");
        let back: DiffusionMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_player_command_tagged() {
        let json = r#"{ "type": "EnqueueTarget", "x": 3.0, "y": 4.0, "projectile": "Stone" }"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(
            cmd,
            PlayerCommand::EnqueueTarget {
                projectile: ProjectileKind::Stone,
                ..
            }
        ));
    }

    #[test]
    fn test_keys_direction() {
        let keys = KeysDown {
            up: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(keys.direction(), DVec2::new(1.0, 1.0));

        let opposed = KeysDown {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(opposed.direction(), DVec2::ZERO);
    }

    #[test]
    fn test_upgrade_levels() {
        let mut upgrades = Upgrades::default();
        upgrades.grant(UpgradeKind::FireRate);
        upgrades.grant(UpgradeKind::FireRate);
        upgrades.grant(UpgradeKind::Damage);
        assert_eq!(upgrades.level(UpgradeKind::FireRate), 2);
        assert_eq!(upgrades.level(UpgradeKind::Damage), 1);
        assert_eq!(upgrades.level(UpgradeKind::TurnRate), 0);
    }

    #[test]
    fn test_stat_tables_consistent() {
        for kind in [
            ProjectileKind::Bullet,
            ProjectileKind::Piercer,
            ProjectileKind::Missile,
            ProjectileKind::Stone,
        ] {
            let stats = projectile_stats(kind);
            // Guided warheads must fly straight to reach their target.
            if stats.warhead_radius.is_some() {
                assert_eq!(stats.gravity_scale, 0.0, "{kind:?}");
            }
            assert!(stats.velocity > 0.0);
        }
        assert_eq!(projectile_stats(ProjectileKind::Bullet).cost, 0);

        for action in [
            ActionKind::Move,
            ActionKind::MoveTurn,
            ActionKind::Turn,
            ActionKind::Shoot,
            ActionKind::Die,
        ] {
            let timing = action_timing(EntityKind::Monster, action);
            assert!(timing.effect_offset <= timing.duration);
        }
    }
}
