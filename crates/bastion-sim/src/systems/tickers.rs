//! Transient advisory messages.

use bastion_core::components::Ticker;
use bastion_core::constants::*;

use crate::world::World;

pub fn ticker(message: &str) -> Ticker {
    Ticker {
        message: message.to_string(),
        time_ms: TICKER_DURATION_MS,
        max_ms: TICKER_DURATION_MS,
    }
}

/// Raise the one-time projectile hint and count both tickers down.
pub fn run(world: &mut World) {
    if !world.shown_projectile_hint && world.total_game_time > PROJECTILE_HINT_DELAY_MS {
        world.shown_projectile_hint = true;
        world.ticker = Some(ticker(PROJECTILE_HINT));
    }

    let dt = world.time_since_last_tick;
    for slot in [&mut world.ticker, &mut world.mini_ticker] {
        if let Some(ticker) = slot.as_mut() {
            ticker.time_ms -= dt;
            if ticker.time_ms <= 0.0 {
                *slot = None;
            }
        }
    }
}
