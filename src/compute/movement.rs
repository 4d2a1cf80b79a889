//! Position integration for every moving population.
//!
//! Nothing here spawns, destroys on contact, or scores; lasers are only
//! flagged once they leave the screen.

use crate::entities::{Alien, Laser, LaserOwner, MysteryShip, Player};
use crate::events::InputSnapshot;

/// Left wins when both directions are held.  The result is always clamped to
/// `[0, screen_width - width]`, however large `dt` is.
pub fn move_player(player: &mut Player, input: &InputSnapshot, dt: f32, screen_width: f32) {
    let step = player.speed * dt;
    let x = if input.move_left {
        player.x - step
    } else if input.move_right {
        player.x + step
    } else {
        player.x
    };

    let max_x = (screen_width - player.bounds.width as f32).max(0.0);
    player.set_x(x.max(0.0).min(max_x));
}

/// Sweep the formation sideways.  If any alien is past the edge it is heading
/// towards, the whole formation turns around and drops `drop` pixels, once per
/// call.  An alien still outside the edge it is moving away from does not
/// count, so a short frame after an overshoot cannot turn it back again.
///
/// Returns whether the formation reversed.
pub fn move_formation(aliens: &mut [Alien], dt: f32, screen_width: f32, drop: i32) -> bool {
    let mut breached = false;

    for alien in aliens.iter_mut().filter(|a| !a.destroyed) {
        alien.set_x(alien.x + alien.velocity * dt);
        let right = alien.x + alien.bounds.width as f32;
        let past_right = alien.velocity > 0.0 && right > screen_width;
        let past_left = alien.velocity < 0.0 && alien.x < 0.0;
        if past_right || past_left {
            breached = true;
        }
    }

    if breached {
        for alien in aliens.iter_mut() {
            alien.velocity = -alien.velocity;
            alien.bounds.y = alien.bounds.y.saturating_add(drop);
        }
    }

    breached
}

/// Glide the mystery ship while its window is open.  A destroyed ship stays put.
pub fn move_mystery_ship(ship: &mut MysteryShip, dt: f32) {
    if ship.should_move && !ship.destroyed {
        ship.set_x(ship.x + ship.velocity * dt);
    }
}

/// Advance lasers along their owner's direction and flag any that have left
/// the screen: player lasers past the top, alien lasers past the bottom.
pub fn move_lasers(lasers: &mut [Laser], dt: f32, speed: f32, screen_height: f32) {
    for laser in lasers.iter_mut().filter(|l| !l.destroyed) {
        match laser.owner {
            LaserOwner::Player => {
                laser.set_y(laser.y - speed * dt);
                if laser.bounds.y < 0 {
                    laser.destroyed = true;
                }
            }
            LaserOwner::Alien => {
                laser.set_y(laser.y + speed * dt);
                if laser.bounds.y as f32 > screen_height {
                    laser.destroyed = true;
                }
            }
        }
    }
}
