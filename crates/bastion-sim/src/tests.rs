//! Tests for the simulation engine: action queues, tower targeting,
//! ballistics, emitters, diffusion dispatch, and effects.

use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;

use glam::DVec2;

use bastion_core::commands::PlayerCommand;
use bastion_core::components::ActionPayload;
use bastion_core::config::SimConfig;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::DiffusionMessage;
use bastion_core::stats::BASE_MAX_THETA_SPEED;
use bastion_core::types::{heading_of, EntityId};

use crate::actions::{cancel_actions, is_action_queued, make_action, queue_action, stack_action};
use crate::decision::DecisionHook;
use crate::engine::SimulationEngine;
use crate::factory::{self, Launch};
use crate::world::World;

const DT: f64 = 16.0;

fn idle_hook() -> impl DecisionHook {
    |_: &mut World, _: EntityId| {}
}

fn engine_with(config: SimConfig) -> SimulationEngine {
    SimulationEngine::new(config).with_decision_hook(idle_hook())
}

fn engine() -> SimulationEngine {
    engine_with(SimConfig::default())
}

fn shoot_up() -> ActionPayload {
    ActionPayload::Shoot {
        theta: FRAC_PI_2,
        projectile: ProjectileKind::Bullet,
        target_pos: None,
    }
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    d.min(TAU - d)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);
    engine_a.setup_level();
    engine_b.setup_level();
    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(PlayerCommand::SetCrosshair { x: 20.0, y: 40.0 });
    }

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

// ---- World ----

#[test]
fn test_world_spawn_remove_keeps_sets_and_grid() {
    let mut engine = engine();
    let world = engine.world_mut();
    let base = factory::spawn_base(world, DVec2::new(5.0, 5.0), PLAYER_ID);

    assert!(world.towers.contains(&base));
    assert!(world.emitters.contains(&base));
    assert!(world.bases.contains(&base));
    assert_eq!(world.lookup(glam::IVec2::new(7, 7)), &[base]);

    world.remove(base).unwrap();
    assert!(!world.towers.contains(&base));
    assert!(world.lookup(glam::IVec2::new(7, 7)).is_empty());
    assert!(world.get(base).is_none());
    assert_eq!(world.reverse_flood_fill_sources.len(), 1);

    // Index reuse bumps the generation; the old handle stays dead.
    let dirt = factory::spawn_collectable(world, EntityKind::Dirt, DVec2::new(1.0, 1.0));
    assert_eq!(dirt.index, base.index);
    assert_ne!(dirt.generation, base.generation);
    assert!(world.get(base).is_none());
    assert!(world.remove(base).is_err());
}

#[test]
fn test_deal_damage_queues_die_once() {
    let mut engine = engine();
    let world = engine.world_mut();
    let monster = factory::spawn_monster(world, DVec2::new(5.0, 5.0), ENEMY_ID);

    world.deal_damage(monster, 100.0).unwrap();
    world.deal_damage(monster, 100.0).unwrap();

    let dies = world
        .get(monster)
        .unwrap()
        .actions
        .iter()
        .filter(|a| a.kind == ActionKind::Die)
        .count();
    assert_eq!(dies, 1);
    assert!(world.actors.contains(&monster));
}

#[test]
fn test_stale_actor_id_is_skipped() {
    let mut engine = engine();
    let ghost = EntityId::new(99, 0);
    engine.world_mut().actors.insert(ghost);

    engine.tick(DT);
    assert!(!engine.world().actors.contains(&ghost));
}

// ---- Action state machine ----

#[test]
fn test_action_remaining_monotonic_and_effect_once() {
    let mut engine = engine();
    let base = factory::spawn_base(engine.world_mut(), DVec2::new(10.0, 10.0), PLAYER_ID);
    let shoot = make_action(EntityKind::Base, ActionKind::Shoot, shoot_up());
    queue_action(engine.world_mut(), base, shoot).unwrap();

    let mut prev_remaining = f64::INFINITY;
    let mut projectiles = BTreeSet::new();
    for _ in 0..80 {
        engine.tick(DT);
        let world = engine.world();
        if let Some(head) = world.get(base).unwrap().actions.front() {
            assert!(head.remaining >= 0.0);
            assert!(head.remaining <= prev_remaining);
            prev_remaining = head.remaining;
        }
        projectiles.extend(world.ballistics.iter().copied());
    }

    assert_eq!(projectiles.len(), 1, "SHOOT effect must fire exactly once");
    let base = engine.world().get(base).unwrap();
    assert!(base.actions.is_empty());
    assert_eq!(base.prev_action, Some(ActionKind::Shoot));
}

#[test]
fn test_zero_offset_effect_applies_in_hand_off_tick() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let hook = move |world: &mut World, id: EntityId| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            let next_pos = world.get(id).unwrap().position + DVec2::X;
            let step = make_action(
                EntityKind::Monster,
                ActionKind::Move,
                ActionPayload::Move { next_pos },
            );
            queue_action(world, id, step).unwrap();
        }
    };
    let mut engine = SimulationEngine::new(SimConfig::default()).with_decision_hook(hook);
    let monster = factory::spawn_monster(engine.world_mut(), DVec2::new(10.0, 10.0), ENEMY_ID);
    let turn = make_action(
        EntityKind::Monster,
        ActionKind::Turn,
        ActionPayload::Turn { theta: 1.0 },
    );
    queue_action(engine.world_mut(), monster, turn).unwrap();

    engine.tick(200.0);
    let entity = engine.world().get(monster).unwrap();
    assert_eq!(entity.theta, 1.0);
    assert_eq!(entity.position, DVec2::new(10.0, 10.0));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    engine.tick(200.0);
    let entity = engine.world().get(monster).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(entity.prev_action, Some(ActionKind::Turn));
    assert_eq!(entity.position, DVec2::new(11.0, 10.0));
    assert!(entity.actions.front().unwrap().effect_applied);
}

#[test]
fn test_cancel_after_effect_does_not_refire() {
    let mut engine = engine();
    let base = factory::spawn_base(engine.world_mut(), DVec2::new(10.0, 10.0), PLAYER_ID);
    let shoot = make_action(EntityKind::Base, ActionKind::Shoot, shoot_up());
    queue_action(engine.world_mut(), base, shoot).unwrap();

    let mut projectiles = BTreeSet::new();
    for _ in 0..10 {
        engine.tick(DT);
        projectiles.extend(engine.world().ballistics.iter().copied());
    }
    assert_eq!(projectiles.len(), 1);

    // Interrupt, then cancel the interrupted SHOOT.
    let turn = make_action(
        EntityKind::Base,
        ActionKind::Turn,
        ActionPayload::Turn { theta: 1.0 },
    );
    stack_action(engine.world_mut(), base, turn).unwrap();
    {
        let actions = &engine.world().get(base).unwrap().actions;
        assert_eq!(actions[0].kind, ActionKind::Turn);
        assert!(actions[1].effect_applied);
    }
    let removed = cancel_actions(engine.world_mut(), base, |a| a.kind == ActionKind::Shoot);
    assert_eq!(removed, Ok(1));

    for _ in 0..20 {
        engine.tick(DT);
        projectiles.extend(engine.world().ballistics.iter().copied());
    }
    assert_eq!(projectiles.len(), 1);
    assert_eq!(engine.world().get(base).unwrap().theta, 1.0);
}

// ---- Tower targeting ----

#[test]
fn test_tower_converges_exactly_and_fires() {
    let mut engine = engine();
    let base = factory::spawn_base(engine.world_mut(), DVec2::new(10.0, 10.0), PLAYER_ID);
    let aim = DVec2::new(30.0, 40.0);
    let heading = heading_of(aim - DVec2::new(11.5, 11.5));
    engine.queue_command(PlayerCommand::SetCrosshair { x: aim.x, y: aim.y });

    let mut theta = 0.0;
    let mut converged = false;
    for _ in 0..100 {
        engine.tick(DT);
        let entity = engine.world().get(base).unwrap();
        assert!(angular_distance(entity.theta, theta) <= BASE_MAX_THETA_SPEED + 1e-12);
        theta = entity.theta;
        if theta == heading {
            converged = true;
            assert_eq!(entity.actions.front().map(|a| a.kind), Some(ActionKind::Shoot));
            break;
        }
    }
    assert!(converged, "turret never reached {heading}");
    assert_eq!(engine.world().money, SimConfig::default().starting_money);
}

#[test]
fn test_affordability_failure_restores_request() {
    let mut engine = engine_with(SimConfig {
        starting_money: 0,
        ..Default::default()
    });
    let base = factory::spawn_base(engine.world_mut(), DVec2::new(10.0, 10.0), PLAYER_ID);
    engine.queue_commands([
        PlayerCommand::SetPlaceType {
            projectile: ProjectileKind::Missile,
        },
        PlayerCommand::EnqueueTarget {
            x: 20.0,
            y: 11.5,
            projectile: ProjectileKind::Missile,
        },
        PlayerCommand::EnqueueTarget {
            x: 25.0,
            y: 11.5,
            projectile: ProjectileKind::Piercer,
        },
    ]);

    engine.tick(DT);

    let world = engine.world();
    let entity = world.get(base).unwrap();
    let queue = &entity.turret.as_ref().unwrap().target_queue;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].projectile, ProjectileKind::Missile);
    assert_eq!(queue[0].position, DVec2::new(20.0, 11.5));
    assert_eq!(world.money, 0);
    assert!(entity.actions.is_empty());
    assert_eq!(world.place_type, ProjectileKind::Bullet);
}

#[test]
fn test_occupied_destination_restores_request() {
    let mut engine = engine();
    let base = factory::spawn_base(engine.world_mut(), DVec2::new(10.0, 10.0), PLAYER_ID);
    factory::spawn_collectable(engine.world_mut(), EntityKind::Stone, DVec2::new(20.0, 12.0));
    engine.queue_command(PlayerCommand::EnqueueTarget {
        x: 20.0,
        y: 11.5,
        projectile: ProjectileKind::Stone,
    });

    engine.tick(DT);

    let world = engine.world();
    let entity = world.get(base).unwrap();
    assert_eq!(entity.turret.as_ref().unwrap().target_queue.len(), 1);
    assert!(entity.actions.is_empty());
    assert_eq!(world.money, SimConfig::default().starting_money);
}

#[test]
fn test_queued_shot_is_debited_and_shortened() {
    let mut engine = engine();
    let base = factory::spawn_base(engine.world_mut(), DVec2::new(10.0, 10.0), PLAYER_ID);
    engine.queue_command(PlayerCommand::EnqueueTarget {
        x: 20.0,
        y: 11.5,
        projectile: ProjectileKind::Stone,
    });

    engine.tick(DT);

    let world = engine.world();
    assert_eq!(world.money, SimConfig::default().starting_money - 10);
    let entity = world.get(base).unwrap();
    assert!(entity.turret.as_ref().unwrap().target_queue.is_empty());
    let shoot = entity.actions.front().unwrap();
    assert_eq!(shoot.kind, ActionKind::Shoot);
    assert!((shoot.duration - 1000.0 / QUEUED_SHOT_SPEEDUP).abs() < 1e-9);
    assert!((shoot.effect_offset - 100.0 / QUEUED_SHOT_SPEEDUP).abs() < 1e-9);
    assert!(matches!(
        shoot.payload,
        ActionPayload::Shoot {
            target_pos: Some(_),
            projectile: ProjectileKind::Stone,
            ..
        }
    ));
}

#[test]
fn test_idle_base_turret_stops_turning() {
    let mut engine = engine();
    let base = factory::spawn_base(engine.world_mut(), DVec2::new(10.0, 2.0), PLAYER_ID);
    engine.queue_command(PlayerCommand::SetCrosshair { x: 0.0, y: 3.5 });

    let snapshot = engine.tick(DT);
    let view = snapshot.entities.iter().find(|v| v.id == base).unwrap();
    assert_eq!(view.theta_speed, BASE_MAX_THETA_SPEED);

    engine.queue_command(PlayerCommand::ClearCrosshair);
    let snapshot = engine.tick(DT);
    let view = snapshot.entities.iter().find(|v| v.id == base).unwrap();
    assert_eq!(view.theta_speed, 0.0);
    assert_eq!(view.theta, BASE_MAX_THETA_SPEED);
}

// ---- Ballistics ----

#[test]
fn test_ballistic_follows_closed_form_trajectory() {
    let mut engine = engine_with(SimConfig {
        grid_width: 200,
        grid_height: 100,
        ..Default::default()
    });
    let shot = factory::spawn_ballistic(
        engine.world_mut(),
        Launch {
            projectile: ProjectileKind::Bullet,
            position: DVec2::new(10.0, 50.0),
            theta: 0.0,
            owner: Some(PLAYER_ID),
            target: None,
        },
    );

    for _ in 0..10 {
        engine.tick(1000.0);
    }

    let entity = engine.world().get(shot).unwrap();
    let state = entity.ballistic.as_ref().unwrap();
    // v = 80, a = 1: (10 + 80, 50 - 4.9)
    assert!((state.position - DVec2::new(90.0, 45.1)).length() < 1e-9);
    assert_eq!(entity.position, DVec2::new(90.0, 45.0));
}

#[test]
fn test_ballistic_leaving_grid_dies_once() {
    let mut engine = engine();
    let shot = factory::spawn_ballistic(
        engine.world_mut(),
        Launch {
            projectile: ProjectileKind::Bullet,
            position: DVec2::new(1.0, 1.0),
            theta: std::f64::consts::PI,
            owner: Some(PLAYER_ID),
            target: None,
        },
    );

    engine.tick(2000.0);
    let dies = engine
        .world()
        .get(shot)
        .unwrap()
        .actions
        .iter()
        .filter(|a| a.kind == ActionKind::Die)
        .count();
    assert_eq!(dies, 1);

    engine.tick(DT);
    assert!(!engine.world().contains(shot));
}

#[test]
fn test_piercing_projectile_survives_collectable() {
    let mut engine = engine();
    let dirt = factory::spawn_collectable(engine.world_mut(), EntityKind::Dirt, DVec2::new(20.0, 20.0));
    let shot = factory::spawn_ballistic(
        engine.world_mut(),
        Launch {
            projectile: ProjectileKind::Piercer,
            position: DVec2::new(20.0, 20.0),
            theta: 0.0,
            owner: Some(PLAYER_ID),
            target: None,
        },
    );

    engine.tick(DT);

    let world = engine.world();
    let projectile = world.get(shot).unwrap();
    assert_eq!(projectile.hp, 1.0);
    assert!(projectile.actions.is_empty(), "piercer must keep flying");
    let state = projectile.ballistic.as_ref().unwrap();
    assert!(state.position.x > 20.0);
    assert_eq!(world.get(dirt).unwrap().hp, 40.0 - 15.0);
}

#[test]
fn test_piercer_hits_overlapped_victim_again_next_tick() {
    let mut engine = engine();
    let dirt = factory::spawn_collectable(engine.world_mut(), EntityKind::Dirt, DVec2::new(20.0, 20.0));
    let shot = factory::spawn_ballistic(
        engine.world_mut(),
        Launch {
            projectile: ProjectileKind::Piercer,
            position: DVec2::new(20.0, 20.0),
            theta: 0.0,
            owner: Some(PLAYER_ID),
            target: None,
        },
    );

    engine.tick(DT);
    engine.tick(DT);

    // Still on the same cell: hit again, durability 1 - 25/20 runs out.
    let world = engine.world();
    assert_eq!(world.get(dirt).unwrap().hp, 40.0 - 2.0 * 15.0);
    let projectile = world.get(shot).unwrap();
    assert!(projectile.hp <= 0.0);
    assert!(is_action_queued(projectile, ActionKind::Die));
}

#[test]
fn test_warhead_in_range_still_damages_colliding_entities() {
    let mut engine = engine();
    let monster = factory::spawn_monster(engine.world_mut(), DVec2::new(10.0, 10.0), ENEMY_ID);
    let shot = factory::spawn_ballistic(
        engine.world_mut(),
        Launch {
            projectile: ProjectileKind::Stone,
            position: DVec2::new(10.0, 10.0),
            theta: 0.0,
            owner: Some(PLAYER_ID),
            target: Some(DVec2::new(10.0, 10.0)),
        },
    );
    assert_eq!(engine.world().collisions(shot, &[EntityKind::Monster]), vec![monster]);

    engine.tick(DT);

    let world = engine.world();
    assert_eq!(world.get(monster).unwrap().hp, 40.0 - 5.0);
    let projectile = world.get(shot).unwrap();
    assert!(projectile.ballistic.as_ref().unwrap().reached_target);
    assert!(is_action_queued(projectile, ActionKind::Die));
}

#[test]
fn test_stone_settles_at_target() {
    let mut engine = engine();
    let shot = factory::spawn_ballistic(
        engine.world_mut(),
        Launch {
            projectile: ProjectileKind::Stone,
            position: DVec2::new(10.0, 10.0),
            theta: 0.0,
            owner: Some(PLAYER_ID),
            target: Some(DVec2::new(10.0, 10.0)),
        },
    );

    engine.tick(DT);
    assert!(engine.world().get(shot).unwrap().ballistic.as_ref().unwrap().reached_target);

    engine.tick(DT);
    let world = engine.world();
    let stone = world.get(shot).unwrap();
    assert_eq!(stone.kind, EntityKind::Stone);
    assert!(stone.ballistic.is_none());
    assert_eq!(stone.position, DVec2::new(10.0, 10.0));
    assert!(!world.ballistics.contains(&shot));
}

// ---- Emitters and diffusion ----

#[test]
fn test_emitter_refresh_is_staggered_by_id() {
    let mut engine = engine();
    let (tx, rx) = mpsc::channel();
    engine.attach_diffusion(tx);
    let world = engine.world_mut();
    for x in 0..3 {
        factory::spawn_collectable(world, EntityKind::Dirt, DVec2::new(x as f64, 0.0));
    }
    let base = factory::spawn_base(world, DVec2::new(10.0, 10.0), PLAYER_ID);
    assert_eq!(base.index, 3);
    world.get_mut(base).unwrap().emitter.as_mut().unwrap().refresh_rate = Some(5);
    world.flood_fill_sources.clear();

    let mut refreshed = Vec::new();
    for tick in 1..=20u64 {
        engine.tick(DT);
        if rx
            .try_iter()
            .any(|msg| matches!(msg, DiffusionMessage::FloodFill { .. }))
        {
            refreshed.push(tick);
        }
    }
    assert_eq!(refreshed, vec![2, 7, 12, 17]);
}

#[test]
fn test_diffusion_dispatch_order() {
    let mut engine = engine();
    let (tx, rx) = mpsc::channel();
    engine.attach_diffusion(tx);
    let a = factory::spawn_base(engine.world_mut(), DVec2::new(10.0, 10.0), PLAYER_ID);
    let b = factory::spawn_base(engine.world_mut(), DVec2::new(20.0, 10.0), PLAYER_ID);

    engine.tick(DT);
    let first: Vec<DiffusionMessage> = rx.try_iter().collect();
    assert!(matches!(first[0], DiffusionMessage::Init { ref emitters, .. } if emitters.len() == 2));
    assert!(matches!(first[1], DiffusionMessage::FloodFill { ref sources } if sources.len() == 2));
    assert_eq!(first.len(), 2);

    engine.tick(DT);
    engine.tick(DT);
    assert_eq!(rx.try_iter().count(), 0);

    engine.world_mut().remove(a).unwrap();
    engine.world_mut().set_emitter_quantity(b, 50.0).unwrap();
    engine.tick(DT);
    let fourth: Vec<DiffusionMessage> = rx.try_iter().collect();
    assert_eq!(fourth.len(), 3);
    assert_eq!(fourth[0], DiffusionMessage::DispersePheromones);
    assert!(matches!(fourth[1], DiffusionMessage::ReverseFloodFill { .. }));
    assert!(matches!(fourth[2], DiffusionMessage::FloodFill { .. }));
}

// ---- Effects ----

#[test]
fn test_explosion_chain_spares_immune_base() {
    let mut engine = engine();
    let world = engine.world_mut();
    let first = factory::spawn_dynamite(world, DVec2::new(10.0, 10.0), Some(10.0));
    let second = factory::spawn_dynamite(world, DVec2::new(12.0, 10.0), None);
    let base = factory::spawn_base(world, DVec2::new(9.0, 11.0), PLAYER_ID);

    engine.tick(DT);
    assert!(engine.world().actors.contains(&first));

    engine.tick(DT);
    assert!(!engine.world().contains(first));
    let chained = engine.world().get(second).unwrap();
    assert!(chained.actions.iter().any(|a| a.kind == ActionKind::Die));

    engine.tick(DT);
    assert!(!engine.world().contains(second));
    assert_eq!(engine.world().get(base).unwrap().hp, 500.0);
}

#[test]
fn test_upgrade_death_grants_level() {
    let mut engine = engine();
    let world = engine.world_mut();
    let upgrade = factory::spawn_upgrade(world, DVec2::new(5.0, 5.0), UpgradeKind::FireRate);
    world.deal_damage(upgrade, 10.0).unwrap();

    engine.tick(DT);
    assert!(!engine.world().contains(upgrade));
    assert_eq!(engine.world().upgrades.level(UpgradeKind::FireRate), 1);
}

#[test]
fn test_base_death_ends_game() {
    let mut engine = engine();
    let base = factory::spawn_base(engine.world_mut(), DVec2::new(5.0, 5.0), PLAYER_ID);
    engine.world_mut().deal_damage(base, 1000.0).unwrap();

    let snapshot = engine.tick(DT);
    assert!(snapshot.game_over);
    assert_eq!(engine.tick(DT).time.tick, snapshot.time.tick);
}

// ---- Control, camera, tiles, tickers ----

#[test]
fn test_held_key_moves_controlled_entity() {
    let mut engine = engine();
    let monster = factory::spawn_monster(engine.world_mut(), DVec2::new(10.0, 10.0), ENEMY_ID);
    engine.queue_commands([
        PlayerCommand::Control { id: Some(monster) },
        PlayerCommand::SetKeys {
            up: false,
            down: false,
            left: false,
            right: true,
        },
    ]);

    engine.tick(DT);
    let entity = engine.world().get(monster).unwrap();
    assert_eq!(entity.position, DVec2::new(11.0, 10.0));
    assert_eq!(entity.time_on_move, 0);
}

fn hold(up: bool, right: bool) -> PlayerCommand {
    PlayerCommand::SetKeys {
        up,
        down: false,
        left: false,
        right,
    }
}

#[test]
fn test_fresh_press_turns_in_place() {
    let mut engine = engine();
    let monster = factory::spawn_monster(engine.world_mut(), DVec2::new(10.0, 10.0), ENEMY_ID);
    engine.queue_commands([PlayerCommand::Control { id: Some(monster) }, hold(true, false)]);

    engine.tick(DT);
    let entity = engine.world().get(monster).unwrap();
    assert_eq!(entity.position, DVec2::new(10.0, 10.0));
    assert_eq!(entity.theta, FRAC_PI_2);
    assert_eq!(entity.actions.front().unwrap().kind, ActionKind::Turn);

    // The queued turn blocks another issue while the key stays held.
    engine.tick(DT);
    let entity = engine.world().get(monster).unwrap();
    assert_eq!(entity.actions.len(), 1);
    assert_eq!(entity.position, DVec2::new(10.0, 10.0));
}

#[test]
fn test_held_key_changing_direction_moves_and_turns() {
    let mut engine = engine();
    let monster = factory::spawn_monster(engine.world_mut(), DVec2::new(10.0, 10.0), ENEMY_ID);
    engine.queue_commands([PlayerCommand::Control { id: Some(monster) }, hold(false, true)]);
    engine.tick(DT);
    assert_eq!(engine.world().get(monster).unwrap().position, DVec2::new(11.0, 10.0));

    engine.queue_command(hold(true, false));
    for _ in 0..3 {
        engine.tick(300.0);
    }

    let entity = engine.world().get(monster).unwrap();
    assert_eq!(entity.actions.front().unwrap().kind, ActionKind::MoveTurn);
    assert_eq!(entity.position, DVec2::new(11.0, 11.0));
    assert_eq!(entity.theta, FRAC_PI_2);
}

#[test]
fn test_camera_eases_toward_idle_focus() {
    let mut engine = engine();
    let monster = factory::spawn_monster(engine.world_mut(), DVec2::new(40.0, 30.0), ENEMY_ID);
    engine.queue_command(PlayerCommand::Focus { id: Some(monster) });

    let snapshot = engine.tick(DT);
    // ideal = centre (41, 31) - half view (20, 15); factor 16 / 200
    assert_eq!(snapshot.view_pos, DVec2::new(1.68, 1.28));
}

#[test]
fn test_tile_masks_track_neighbours() {
    let mut engine = engine();
    let world = engine.world_mut();
    let left = factory::spawn_collectable(world, EntityKind::Dirt, DVec2::new(10.0, 10.0));
    let right = factory::spawn_collectable(world, EntityKind::Dirt, DVec2::new(11.0, 10.0));

    engine.tick(DT);
    assert_eq!(engine.world().get(left).unwrap().tile_mask, Some(2));
    assert_eq!(engine.world().get(right).unwrap().tile_mask, Some(8));

    engine.world_mut().remove(right).unwrap();
    engine.tick(DT);
    assert_eq!(engine.world().get(left).unwrap().tile_mask, Some(0));
}

#[test]
fn test_tickers_count_down_and_hint_once() {
    let mut engine = engine();
    let snapshot = engine.tick(0.0);
    assert_eq!(snapshot.ticker.unwrap().message, AIM_HINT);

    for _ in 0..3 {
        engine.tick(1000.0);
    }
    assert!(engine.world().ticker.is_none());

    while !engine.world().shown_projectile_hint {
        engine.tick(1000.0);
    }
    assert_eq!(engine.world().ticker.as_ref().unwrap().message, PROJECTILE_HINT);
    assert!(engine.world().total_game_time > PROJECTILE_HINT_DELAY_MS);
}
