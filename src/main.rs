//! Billiards demo - the calling protocol around the sweep solvers
//!
//! A break shot on a rectangular table. Cushions are one-sided segments
//! wound counter-clockwise so every guarded side faces the felt; balls are
//! equal-mass circles. Each fixed step hops from impact to impact: query
//! every candidate pair, keep the earliest time of impact inside the
//! remaining step, advance everything to that instant, respond, repeat.
//!
//! Only detection comes from the library. Pair selection, clamping to the
//! step, advancing state and the reflection/exchange response are done
//! here, as they would be in any real caller.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use swept2d::{circle_circle_collision, circle_segment_collision};

/// Fixed simulation timestep (120 Hz)
const SIM_DT: f32 = 1.0 / 120.0;
/// Impacts resolved per step before giving up (prevents jam loops)
const MAX_IMPACTS_PER_STEP: u32 = 16;
/// Table dimensions and ball size, in centimeters
const TABLE_WIDTH: f32 = 254.0;
const TABLE_HEIGHT: f32 = 127.0;
const BALL_RADIUS: f32 = 2.85;
/// Simulated duration in seconds
const SIM_SECONDS: f32 = 10.0;
/// Rolling friction, applied between impacts
const FRICTION: f32 = 0.3;

#[derive(Debug, Clone)]
struct Ball {
    pos: Vec2,
    vel: Vec2,
}

/// A cushion is a directed segment; `p1 -> p2` is chosen so the felt lies
/// on its guarded side.
struct Cushion {
    p1: Vec2,
    p2: Vec2,
}

impl Cushion {
    /// Unit normal pointing into the table
    fn inward_normal(&self) -> Vec2 {
        let dr = self.p2 - self.p1;
        Vec2::new(-dr.y, dr.x).normalize()
    }
}

#[derive(Debug, Serialize)]
struct ImpactEvent {
    time: f32,
    kind: ImpactKind,
    point: Vec2,
}

#[derive(Debug, Serialize)]
enum ImpactKind {
    Cushion { ball: usize },
    Balls { first: usize, second: usize },
}

enum Hit {
    Cushion { ball: usize, cushion: usize, dt: f32, point: Vec2 },
    Balls { first: usize, second: usize, dt: f32 },
}

impl Hit {
    fn dt(&self) -> f32 {
        match self {
            Hit::Cushion { dt, .. } | Hit::Balls { dt, .. } => *dt,
        }
    }
}

/// Counter-clockwise boundary of the table, so every cushion guards the
/// interior.
fn cushions() -> Vec<Cushion> {
    let w = TABLE_WIDTH;
    let h = TABLE_HEIGHT;
    vec![
        Cushion { p1: Vec2::new(0.0, 0.0), p2: Vec2::new(w, 0.0) },
        Cushion { p1: Vec2::new(w, 0.0), p2: Vec2::new(w, h) },
        Cushion { p1: Vec2::new(w, h), p2: Vec2::new(0.0, h) },
        Cushion { p1: Vec2::new(0.0, h), p2: Vec2::new(0.0, 0.0) },
    ]
}

/// Cue ball plus a triangular rack, cue velocity jittered by the seed.
fn rack(rng: &mut Pcg32) -> Vec<Ball> {
    let mut balls = Vec::new();

    let apex = Vec2::new(TABLE_WIDTH * 0.7, TABLE_HEIGHT * 0.5);
    let spacing = BALL_RADIUS * 2.0 + 0.05;
    for row in 0..3 {
        for i in 0..=row {
            let x = apex.x + row as f32 * spacing * 0.87;
            let y = apex.y + (i as f32 - row as f32 / 2.0) * spacing;
            balls.push(Ball { pos: Vec2::new(x, y), vel: Vec2::ZERO });
        }
    }

    let jitter: f32 = rng.random_range(-0.02..0.02);
    let dir = Vec2::new(jitter.cos(), jitter.sin());
    balls.push(Ball {
        pos: Vec2::new(TABLE_WIDTH * 0.2, TABLE_HEIGHT * 0.5),
        vel: dir * 350.0,
    });

    balls
}

/// Earliest impact among all candidate pairs within `horizon` seconds.
fn earliest_impact(balls: &[Ball], cushions: &[Cushion], horizon: f32) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    let mut consider = |hit: Hit| {
        if best.as_ref().is_none_or(|b| hit.dt() < b.dt()) {
            best = Some(hit);
        }
    };

    for (bi, ball) in balls.iter().enumerate() {
        for (ci, cushion) in cushions.iter().enumerate() {
            let Some(impact) = circle_segment_collision(
                cushion.p1,
                cushion.p2,
                Vec2::ZERO,
                ball.pos,
                ball.vel,
            ) else {
                continue;
            };
            let toi = impact.time_of_impact(ball.pos, cushion.p1, BALL_RADIUS);
            if !(0.0..=horizon).contains(&toi.dt) {
                continue;
            }
            let contact = toi.contact(cushion.p1, cushion.p2, Vec2::ZERO, ball.pos, ball.vel);
            if !contact.on_track() {
                continue;
            }
            consider(Hit::Cushion { ball: bi, cushion: ci, dt: toi.dt, point: contact.point });
        }
    }

    for i in 0..balls.len() {
        for j in i + 1..balls.len() {
            let Some(impact) = circle_circle_collision(
                balls[i].pos,
                balls[i].vel,
                BALL_RADIUS,
                balls[j].pos,
                balls[j].vel,
                BALL_RADIUS,
            ) else {
                continue;
            };
            let dt = impact.time_of_impact();
            if (0.0..=horizon).contains(&dt) {
                consider(Hit::Balls { first: i, second: j, dt });
            }
        }
    }

    best
}

fn advance(balls: &mut [Ball], dt: f32) {
    for ball in balls.iter_mut() {
        ball.pos += ball.vel * dt;
        ball.vel *= 1.0 - FRICTION * dt;
    }
}

/// One fixed step: hop impact-to-impact until the step is used up.
fn step(balls: &mut [Ball], cushions: &[Cushion], now: f32, events: &mut Vec<ImpactEvent>) {
    let mut remaining = SIM_DT;
    let mut impacts = 0;

    while impacts < MAX_IMPACTS_PER_STEP {
        let Some(hit) = earliest_impact(balls, cushions, remaining) else {
            break;
        };
        let dt = hit.dt();
        advance(balls, dt);
        remaining -= dt;
        impacts += 1;
        let time = now + (SIM_DT - remaining);

        match hit {
            Hit::Cushion { ball, cushion, point, .. } => {
                let n = cushions[cushion].inward_normal();
                let v = balls[ball].vel;
                balls[ball].vel = v - 2.0 * v.dot(n) * n;
                log::info!("t={time:.4} ball {ball} off cushion {cushion} at {point}");
                events.push(ImpactEvent { time, kind: ImpactKind::Cushion { ball }, point });
            }
            Hit::Balls { first, second, .. } => {
                // Equal masses: exchange the velocity components along the
                // line of centers.
                let n = (balls[second].pos - balls[first].pos).normalize();
                let exchanged = (balls[first].vel - balls[second].vel).dot(n);
                balls[first].vel -= exchanged * n;
                balls[second].vel += exchanged * n;
                let point = balls[first].pos + n * BALL_RADIUS;
                log::info!("t={time:.4} balls {first}/{second} collide at {point}");
                events.push(ImpactEvent {
                    time,
                    kind: ImpactKind::Balls { first, second },
                    point,
                });
            }
        }
    }

    if impacts == MAX_IMPACTS_PER_STEP {
        log::warn!("impact cap reached at t={now:.4}, skipping remainder of step");
        return;
    }
    advance(balls, remaining);
}

fn main() {
    env_logger::init();

    let seed = 0xB111_1A2D;
    let mut rng = Pcg32::seed_from_u64(seed);
    let cushions = cushions();
    let mut balls = rack(&mut rng);
    let mut events = Vec::new();

    log::info!("break shot: {} balls, seed {seed:#x}", balls.len());

    let ticks = (SIM_SECONDS / SIM_DT) as u32;
    for tick in 0..ticks {
        step(&mut balls, &cushions, tick as f32 * SIM_DT, &mut events);
    }

    log::info!("{} impacts over {SIM_SECONDS}s", events.len());
    let trace = serde_json::to_string_pretty(&events).expect("event trace serializes");
    println!("{trace}");
}
