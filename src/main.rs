//! Stride - First-person locomotion harness
//!
//! Runs a locomotion controller through a scripted course on a headless
//! rapier3d world and logs what the character does.

mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stride_core::FrameClock;
use stride_locomotion::{ContactState, InputSnapshot, LocomotionController, RapierCharacter, TickReport};
use stride_physics::{CharacterBody, CharacterBodyConfig, PhysicsConfig, PhysicsWorld};

use settings::{CourseSettings, HarnessSettings};

/// One stretch of scripted input
struct Phase {
    start: f32,
    label: &'static str,
    move_axis: Vec2,
    look: Vec2,
    sprint: bool,
    crouch: bool,
    jump: bool,
}

impl Phase {
    const fn idle(start: f32, label: &'static str) -> Self {
        Self {
            start,
            label,
            move_axis: Vec2::ZERO,
            look: Vec2::ZERO,
            sprint: false,
            crouch: false,
            jump: false,
        }
    }
}

const FORWARD: Vec2 = Vec2::new(0.0, 1.0);

const TIMELINE: &[Phase] = &[
    Phase::idle(0.0, "settle"),
    Phase { move_axis: FORWARD, ..Phase::idle(1.0, "walk") },
    Phase { move_axis: FORWARD, sprint: true, ..Phase::idle(3.0, "sprint up the ramp") },
    Phase { move_axis: FORWARD, ..Phase::idle(4.5, "walk off the ramp") },
    Phase { move_axis: FORWARD, jump: true, ..Phase::idle(6.0, "jump") },
    Phase { move_axis: FORWARD, crouch: true, ..Phase::idle(7.0, "crouch walk") },
    Phase { move_axis: FORWARD, ..Phase::idle(9.0, "walk into the steep slope") },
    Phase { look: Vec2::new(0.6, 0.0), ..Phase::idle(11.0, "turn right") },
    Phase { look: Vec2::new(0.0, -0.8), ..Phase::idle(11.5, "look down") },
    Phase::idle(12.0, "rest"),
];

/// Plays [`TIMELINE`] into an input snapshot, one render frame at a time
#[derive(Default)]
struct Script {
    current: Option<usize>,
}

impl Script {
    fn sample(&mut self, time: f32, input: &mut InputSnapshot) {
        let Some(index) = TIMELINE.iter().rposition(|phase| phase.start <= time) else {
            return;
        };
        let phase = &TIMELINE[index];

        if self.current != Some(index) {
            self.current = Some(index);
            info!("[{:5.2}s] {}", time, phase.label);
            // Pressed once on entry, cleared by the controller after evaluation
            if phase.jump {
                input.jump = true;
            }
        }

        input.set_move(phase.move_axis);
        input.look = phase.look;
        input.sprint = phase.sprint;
        input.crouch = phase.crouch;
    }
}

/// Ground plane, a walkable ramp, and a ramp too steep to stand on
fn build_course(world: &mut PhysicsWorld, course: &CourseSettings) {
    world.create_ground(0.0);
    world.create_ramp(Vec3::new(4.0, 0.5, 6.0), Vec3::new(0.0, 0.0, 25.0), course.ramp_angle);
    world.create_ramp(Vec3::new(4.0, 0.5, 3.0), Vec3::new(0.0, 0.0, 45.0), course.steep_angle);
    world.update_query_pipeline();
}

fn log_tick(time: f32, report: &TickReport, last_contact: &mut ContactState) {
    if report.contact.name() != last_contact.name() {
        match report.contact.slope_angle() {
            Some(angle) => info!(
                "[{:5.2}s] contact {} -> {} ({:.1} deg)",
                time,
                last_contact.name(),
                report.contact.name(),
                angle
            ),
            None => info!(
                "[{:5.2}s] contact {} -> {}",
                time,
                last_contact.name(),
                report.contact.name()
            ),
        }
        *last_contact = report.contact;
    }
    if report.jumped {
        info!("[{:5.2}s] jump", time);
    }
    if let Some(change) = report.stance_change {
        info!(
            "[{:5.2}s] stance {:?} (height scale {:.2})",
            time, change.stance, change.height_scale
        );
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Stride locomotion harness...");

    let settings = match std::env::args_os().nth(1) {
        Some(path) => HarnessSettings::load_from(Path::new(&path))?,
        None => {
            let settings = HarnessSettings::load()?;
            // First run: leave an editable copy of the defaults behind
            if HarnessSettings::settings_path().is_some_and(|path| !path.exists()) {
                if let Err(e) = settings.save() {
                    warn!("Failed to write default settings: {}", e);
                }
            }
            settings
        }
    };

    let mut world = PhysicsWorld::with_config(PhysicsConfig {
        timestep: settings.time.fixed_timestep,
        ..Default::default()
    });
    build_course(&mut world, &settings.course);

    let mut body = CharacterBody::spawn(&mut world, CharacterBodyConfig::default(), Vec3::new(0.0, 0.5, 0.0));
    let mut controller = LocomotionController::new(settings.locomotion.clone())
        .context("Failed to create locomotion controller")?;
    let mut clock = FrameClock::new(settings.time.clone());

    let mut script = Script::default();
    let mut input = InputSnapshot::new();
    let mut last_contact = ContactState::Airborne;
    let mut next_status = 1.0;
    let frame_delta = settings.course.frame_delta();

    while (clock.total_time as f32) < settings.course.duration {
        clock.update(frame_delta);
        let time = clock.total_time as f32;

        script.sample(time, &mut input);
        if controller.look_step(&input, clock.delta_time) {
            debug!(
                "look yaw {:.1} pitch {:.1}",
                controller.body().yaw,
                controller.body().pitch
            );
        }

        for _ in 0..clock.fixed_steps() {
            let report = {
                let mut character = RapierCharacter::new(&mut world, &mut body)?;
                controller.step(&mut character, &mut input, clock.fixed_timestep())
            };
            world.step();
            log_tick(time, &report, &mut last_contact);
        }

        if time >= next_status {
            next_status += 1.0;
            let position = body.center(&world).unwrap_or_default();
            let velocity = body.velocity(&world).unwrap_or_default();
            info!(
                "[{:5.2}s] position ({:.2}, {:.2}, {:.2}) speed {:.2} yaw {:.1} pitch {:.1}",
                time,
                position.x,
                position.y,
                position.z,
                velocity.length(),
                controller.body().yaw,
                controller.body().pitch
            );
        }
    }

    let forward = controller.view_forward();
    info!(
        "Course finished after {} frames, {} physics ticks, view forward ({:.2}, {:.2}, {:.2})",
        clock.frame_count, clock.tick_count, forward.x, forward.y, forward.z
    );
    Ok(())
}
