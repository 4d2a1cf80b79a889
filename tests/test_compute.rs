use invaders::compute::*;
use invaders::config::GameConfig;
use invaders::entities::*;
use invaders::events::{FrameEvent, InputSnapshot};
use invaders::geometry::Rect;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> SimulationState {
    init_state(&GameConfig::default())
}

/// A field with no aliens, so nothing fires on its own.
fn quiet_state() -> SimulationState {
    let mut s = make_state();
    s.registry.aliens.clear();
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_builds_the_starting_layout() {
    let s = make_state();
    assert_eq!(s.registry.aliens.len(), 55);
    assert_eq!(s.registry.structures.len(), 4);
    assert!(s.registry.player_lasers.is_empty());
    assert!(s.registry.alien_lasers.is_empty());
    assert_eq!(s.registry.player.bounds, Rect::new(480, 504, 38, 34));
    assert_eq!(s.lives(), 2);
    assert_eq!(s.score(), 0);
    assert_eq!(s.status, GameStatus::Active);
    assert_eq!(s.frame, 0);
}

#[test]
fn init_state_alien_points_decrease_towards_the_front() {
    let s = make_state();
    let aliens = &s.registry.aliens;
    assert!(aliens[..11].iter().all(|a| a.points == 8 && a.sprite == SpriteId::Alien3));
    assert!(aliens[11..33].iter().all(|a| a.sprite == SpriteId::Alien2));
    assert!(aliens[44..].iter().all(|a| a.points == 4 && a.sprite == SpriteId::Alien1));
    assert_eq!(aliens[44].bounds, Rect::new(150, 250, 38, 34));
}

#[test]
fn init_state_honours_wider_formations() {
    let config = GameConfig {
        alien_columns: 13,
        ..GameConfig::default()
    };
    let s = init_state(&config);
    assert_eq!(s.registry.aliens.len(), 65);
}

#[test]
fn init_state_structures_at_fixed_offsets() {
    let s = make_state();
    let xs: Vec<i32> = s.registry.structures.iter().map(|st| st.bounds.x).collect();
    assert_eq!(xs, vec![120, 350, 600, 800]);
    assert!(s.registry.structures.iter().all(|st| st.lives == 5 && st.bounds.y == 424));
}

#[test]
fn init_state_mystery_ship_waits_off_screen() {
    let s = make_state();
    let ship = &s.registry.mystery_ship;
    assert_eq!(ship.bounds, Rect::new(960, 40, 58, 25));
    assert!(!ship.should_move);
    assert!(!ship.destroyed);
    assert_eq!(ship.points, 50);
}

// ── tick — scoring scenario ───────────────────────────────────────────────────

#[test]
fn tick_player_laser_destroys_an_eight_point_alien() {
    let mut s = make_state();
    s.registry.player_lasers.push(Laser::new(Rect::new(160, 60, 4, 16), LaserOwner::Player));

    let events = tick(&mut s, 0.0, idle(), &mut seeded_rng());

    assert_eq!(s.score(), 8);
    assert_eq!(s.registry.aliens.len(), 54);
    assert_eq!(s.registry.aliens[0].bounds.x, 210);
    assert!(s.registry.player_lasers.is_empty());
    assert_eq!(events, vec![FrameEvent::ScoreChanged(8), FrameEvent::ExplosionOccurred]);
}

#[test]
fn tick_player_laser_destroys_a_bottom_row_alien() {
    let mut s = make_state();
    s.registry.player_lasers.push(Laser::new(Rect::new(160, 270, 4, 16), LaserOwner::Player));

    tick(&mut s, 0.0, idle(), &mut seeded_rng());

    assert_eq!(s.score(), 4);
    assert_eq!(s.registry.aliens.len(), 54);
}

#[test]
fn tick_mystery_ship_is_checked_before_aliens() {
    let mut s = make_state();
    s.registry.mystery_ship.should_move = true;
    s.registry.mystery_ship.set_x(400.0);
    // Overlaps both the ship and the top-row alien at x=390.
    s.registry.player_lasers.push(Laser::new(Rect::new(410, 50, 4, 16), LaserOwner::Player));

    let events = tick(&mut s, 0.0, idle(), &mut seeded_rng());

    assert!(s.registry.mystery_ship.destroyed);
    assert_eq!(s.score(), 50);
    assert_eq!(s.registry.aliens.len(), 55);
    assert_eq!(events, vec![FrameEvent::ScoreChanged(50), FrameEvent::ExplosionOccurred]);

    // A destroyed ship stays destroyed and frozen.
    tick(&mut s, 1.0, idle(), &mut seeded_rng());
    assert!(s.registry.mystery_ship.destroyed);
    assert_eq!(s.registry.mystery_ship.x, 400.0);
}

// ── tick — mystery ship window ────────────────────────────────────────────────

#[test]
fn tick_mystery_ship_launches_after_ten_seconds() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    assert!(!s.registry.mystery_ship.should_move);

    for _ in 0..9 {
        let events = tick(&mut s, 1.0, idle(), &mut rng);
        assert!(events.is_empty());
    }
    assert!(!s.registry.mystery_ship.should_move);

    tick(&mut s, 1.0, idle(), &mut rng);
    assert!(s.registry.mystery_ship.should_move);
    assert_eq!(s.timers.mystery_spawn, 0.0);
    assert_eq!(s.registry.mystery_ship.x, 810.0);
}

#[test]
fn tick_mystery_ship_rearms_after_leaving_the_screen() {
    let mut s = quiet_state();
    s.registry.mystery_ship.should_move = true;
    s.registry.mystery_ship.set_x(-81.0);

    tick(&mut s, 0.5, idle(), &mut seeded_rng());

    let ship = &s.registry.mystery_ship;
    assert!(!ship.should_move);
    assert_eq!(ship.velocity, 150.0);
    assert_eq!(ship.x, -81.0);
    assert_eq!(s.timers.mystery_spawn, 0.0);
}

#[test]
fn tick_mystery_ship_turns_back_past_the_right_exit() {
    let mut s = quiet_state();
    let ship = &mut s.registry.mystery_ship;
    ship.should_move = true;
    ship.velocity = 150.0;
    // Right exit is screen width plus the ship's own width: 960 + 58.
    ship.set_x(1019.0);

    tick(&mut s, 0.5, idle(), &mut seeded_rng());

    let ship = &s.registry.mystery_ship;
    assert!(!ship.should_move);
    assert_eq!(ship.velocity, -150.0);
    assert_eq!(ship.x, 1019.0);
    assert_eq!(s.timers.mystery_spawn, 0.0);
}

#[test]
fn tick_mystery_ship_at_the_right_exit_line_keeps_flying() {
    let mut s = quiet_state();
    let ship = &mut s.registry.mystery_ship;
    ship.should_move = true;
    ship.velocity = 150.0;
    ship.set_x(1018.0);

    tick(&mut s, 0.0, idle(), &mut seeded_rng());

    assert!(s.registry.mystery_ship.should_move);
    assert_eq!(s.registry.mystery_ship.velocity, 150.0);
}

// ── tick — player movement ────────────────────────────────────────────────────

#[test]
fn tick_player_clamped_at_left_edge() {
    let mut s = quiet_state();
    s.registry.player.set_x(0.0);
    let input = InputSnapshot { move_left: true, ..idle() };

    tick(&mut s, 1.0, input, &mut seeded_rng());

    assert_eq!(s.registry.player.x, 0.0);
    assert_eq!(s.registry.player.bounds.x, 0);
}

#[test]
fn tick_player_clamped_at_right_edge_for_huge_dt() {
    let mut s = quiet_state();
    let input = InputSnapshot { move_right: true, ..idle() };

    tick(&mut s, 1000.0, input, &mut seeded_rng());

    assert_eq!(s.registry.player.bounds.x, 960 - 38);
}

// ── tick — firing ─────────────────────────────────────────────────────────────

#[test]
fn tick_player_fire_respects_cooldown() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let input = InputSnapshot { fire: true, ..idle() };

    for _ in 0..3 {
        let events = tick(&mut s, 0.1, input, &mut rng);
        assert!(!events.contains(&FrameEvent::LaserFired));
    }
    let events = tick(&mut s, 0.1, input, &mut rng);

    assert_eq!(events, vec![FrameEvent::LaserFired]);
    assert_eq!(s.registry.player_lasers.len(), 1);
    assert_eq!(s.registry.player_lasers[0].bounds, Rect::new(500, 470, 4, 16));
    assert_eq!(s.timers.player_fire, 0.0);
}

#[test]
fn tick_player_fire_has_no_in_flight_cap() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let input = InputSnapshot { fire: true, ..idle() };

    for _ in 0..3 {
        tick(&mut s, 0.35, input, &mut rng);
    }
    assert_eq!(s.registry.player_lasers.len(), 3);
}

#[test]
fn tick_alien_fires_from_a_live_alien() {
    let mut s = make_state();
    let events = tick(&mut s, 0.6, idle(), &mut seeded_rng());

    assert!(events.contains(&FrameEvent::LaserFired));
    assert_eq!(s.registry.alien_lasers.len(), 1);
    assert_eq!(s.timers.alien_fire, 0.0);

    let laser = &s.registry.alien_lasers[0].bounds;
    assert!(s
        .registry
        .aliens
        .iter()
        .any(|a| a.bounds.x + 20 == laser.x && a.bounds.bottom() == laser.y));
}

#[test]
fn tick_alien_timer_keeps_running_with_no_aliens() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();

    tick(&mut s, 1.0, idle(), &mut rng);
    tick(&mut s, 1.0, idle(), &mut rng);

    assert!(s.registry.alien_lasers.is_empty());
    assert_eq!(s.timers.alien_fire, 2.0);
}

// ── tick — formation ──────────────────────────────────────────────────────────

#[test]
fn tick_formation_reverses_once_at_the_edge() {
    let mut s = make_state();
    tick(&mut s, 2.0, idle(), &mut seeded_rng());

    for (i, alien) in s.registry.aliens.iter().enumerate() {
        let row = (i / 11) as i32;
        assert_eq!(alien.bounds.y, 50 + row * 50 + 10);
        assert_eq!(alien.velocity, -100.0);
    }
}

#[test]
fn tick_formation_does_not_stick_to_the_edge_when_frames_shorten() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    // Rightmost column starts at 750; 1.73 s pushes it 1 px past the edge.
    tick(&mut s, 1.73, idle(), &mut rng);
    assert_eq!(s.registry.aliens[0].bounds.y, 60);

    for _ in 0..20 {
        tick(&mut s, 0.0049, idle(), &mut rng);
    }

    let first = &s.registry.aliens[0];
    assert_eq!(first.bounds.y, 60);
    assert_eq!(first.velocity, -100.0);
}

// ── tick — lasers ─────────────────────────────────────────────────────────────

#[test]
fn tick_laser_leaving_the_screen_is_removed() {
    let mut s = quiet_state();
    s.registry.player_lasers.push(Laser::new(Rect::new(30, 5, 4, 16), LaserOwner::Player));
    s.registry.alien_lasers.push(Laser::new(Rect::new(30, 540, 4, 16), LaserOwner::Alien));

    tick(&mut s, 0.1, idle(), &mut seeded_rng());

    assert!(s.registry.player_lasers.is_empty());
    assert!(s.registry.alien_lasers.is_empty());
}

// ── tick — lives & game over ──────────────────────────────────────────────────

#[test]
fn tick_alien_laser_costs_a_life() {
    let mut s = quiet_state();
    s.registry.alien_lasers.push(Laser::new(Rect::new(490, 510, 4, 16), LaserOwner::Alien));

    let events = tick(&mut s, 0.0, idle(), &mut seeded_rng());

    assert_eq!(s.lives(), 1);
    assert_eq!(s.status, GameStatus::Active);
    assert!(s.registry.alien_lasers.is_empty());
    assert_eq!(events, vec![FrameEvent::LivesChanged(1), FrameEvent::ExplosionOccurred]);
}

#[test]
fn tick_last_life_ends_the_game() {
    let mut s = quiet_state();
    s.registry.player.lives = 1;
    s.registry.alien_lasers.push(Laser::new(Rect::new(490, 510, 4, 16), LaserOwner::Alien));
    s.registry.alien_lasers.push(Laser::new(Rect::new(500, 510, 4, 16), LaserOwner::Alien));

    let events = tick(&mut s, 0.0, idle(), &mut seeded_rng());

    assert_eq!(s.lives(), 0);
    assert_eq!(s.status, GameStatus::Over);
    assert_eq!(
        events,
        vec![
            FrameEvent::LivesChanged(0),
            FrameEvent::ExplosionOccurred,
            FrameEvent::GameOver,
        ]
    );
    // The second laser found no lives left to take.
    assert_eq!(s.registry.alien_lasers.len(), 1);
}

#[test]
fn tick_over_is_terminal() {
    let mut s = quiet_state();
    s.status = GameStatus::Over;
    let frame = s.frame;
    let x = s.registry.player.x;
    let input = InputSnapshot {
        move_right: true,
        fire: true,
        pause_toggle: true,
        ..idle()
    };

    let events = tick(&mut s, 1.0, input, &mut seeded_rng());

    assert!(events.is_empty());
    assert_eq!(s.status, GameStatus::Over);
    assert_eq!(s.frame, frame);
    assert_eq!(s.registry.player.x, x);
}

// ── tick — pause ──────────────────────────────────────────────────────────────

#[test]
fn tick_pause_freezes_the_simulation() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let toggle = InputSnapshot { pause_toggle: true, ..idle() };

    tick(&mut s, 0.1, idle(), &mut rng);
    let alien_x = s.registry.aliens[0].x;
    let timers = s.timers.clone();

    tick(&mut s, 0.1, toggle, &mut rng);
    assert_eq!(s.status, GameStatus::Paused);

    let events = tick(&mut s, 5.0, InputSnapshot { move_left: true, fire: true, ..idle() }, &mut rng);
    assert!(events.is_empty());
    assert_eq!(s.registry.aliens[0].x, alien_x);
    assert_eq!(s.timers, timers);
    assert_eq!(s.frame, 1);

    tick(&mut s, 0.1, toggle, &mut rng);
    assert_eq!(s.status, GameStatus::Active);
    assert_eq!(s.registry.aliens[0].x, alien_x);

    tick(&mut s, 0.1, idle(), &mut rng);
    assert_eq!(s.frame, 2);
}

// ── tick — extreme frame times ────────────────────────────────────────────────

#[test]
fn tick_survives_enormous_and_non_finite_dt() {
    let mut s = make_state();
    let mut rng = seeded_rng();

    for dt in [2.2e7, 1.0e12, f32::INFINITY, f32::NAN, 1.0e12] {
        tick(&mut s, dt, idle(), &mut rng);
    }

    let p = &s.registry.player.bounds;
    assert!(p.x >= 0 && p.right() <= 960);
    assert_eq!(s.frame, 5);
}

#[test]
fn tick_treats_infinite_dt_as_zero() {
    let mut s = make_state();
    let x = s.registry.aliens[0].x;

    tick(&mut s, f32::INFINITY, idle(), &mut seeded_rng());

    assert_eq!(s.registry.aliens[0].x, x);
    assert_eq!(s.timers, spawn::FireTimers::default());
    assert_eq!(s.frame, 1);
}

// ── invariants over a long run ────────────────────────────────────────────────

#[test]
fn long_run_keeps_invariants() {
    let mut sim = Simulation::with_rng(&GameConfig::default(), seeded_rng());
    let mut last_score = 0;
    let mut last_lives = sim.current_state().lives();

    for frame in 0..3000u32 {
        let input = InputSnapshot {
            move_left: (frame / 90) % 2 == 0,
            move_right: (frame / 90) % 2 == 1,
            fire: true,
            pause_toggle: false,
        };
        let events = sim.tick(1.0 / 60.0, input);
        let s = sim.current_state();

        assert!(s.registry.all_bounds().all(|b| b.width >= 0 && b.height >= 0));
        let p = &s.registry.player.bounds;
        assert!(p.x >= 0 && p.right() <= 960);

        assert!(s.score() >= last_score);
        assert!(s.lives() <= last_lives);
        for event in &events {
            if let FrameEvent::ScoreChanged(score) = event {
                assert!([4, 5, 6, 7, 8, 50].contains(&(score - last_score)));
                last_score = *score;
            }
        }
        assert_eq!(s.score(), last_score);
        last_lives = s.lives();

        assert!(s.registry.aliens.iter().all(|a| !a.destroyed));
        assert!(s.registry.player_lasers.iter().all(|l| !l.destroyed && l.bounds.y >= 0));
        assert!(s.registry.alien_lasers.iter().all(|l| !l.destroyed && l.bounds.y <= 544));

        if s.status == GameStatus::Over {
            assert_eq!(s.lives(), 0);
            assert_eq!(events.last(), Some(&FrameEvent::GameOver));
            break;
        }
    }
}

// ── Simulation driver ─────────────────────────────────────────────────────────

#[test]
fn simulation_restart_rebuilds_the_field() {
    let mut sim = Simulation::with_rng(&GameConfig::default(), seeded_rng());
    sim.state_mut().registry.aliens.truncate(3);
    sim.state_mut().status = GameStatus::Over;

    sim.restart();

    assert_eq!(sim.current_state().registry.aliens.len(), 55);
    assert_eq!(sim.current_state().status, GameStatus::Active);
}
