//! Vantage - headless demo host for the camera rig
//!
//! Builds a small rapier scene, walks a target around it and drives the rig
//! with scripted input, cycling through the behaviours.
//!
//! Usage: `vantage [settings.toml] [--trace poses.jsonl] [--write-default]`

mod settings;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vantage_camera::{BehaviourKind, CameraRig, InputFrame, RigEnv, ScriptedInput};
use vantage_core::{ClockConfig, EntityId, FrameClock, LayerMask, Pose};
use vantage_physics::PhysicsScene;

use settings::RigSettings;

/// Headless demo host for the camera rig
#[derive(Debug, Parser)]
#[command(name = "vantage")]
#[command(about = "Drive the camera rig through a scripted run")]
struct Args {
    /// Settings file (defaults to the user config directory)
    settings: Option<PathBuf>,

    /// Write a JSON-lines pose trace to this file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Write the default settings and exit
    #[arg(long)]
    write_default: bool,
}

/// One line of the pose trace
#[derive(Debug, Serialize)]
struct TraceRecord {
    frame: u64,
    time: f64,
    behaviour: BehaviourKind,
    operational: bool,
    position: Vec3,
    euler_angles: Vec3,
    origin: Vec3,
    distance: f32,
    auto_pitch: f32,
}

/// Layer for small props
const PROP_LAYER: LayerMask = LayerMask::layer(4);

fn build_scene() -> PhysicsScene {
    let mut scene = PhysicsScene::new();
    scene.create_ground(0.0);

    // Walls the target loop passes behind
    scene.create_static_box(Vec3::new(2.0, 8.0, 20.0), Vec3::new(45.0, 8.0, 0.0));
    scene.create_static_box(Vec3::new(20.0, 8.0, 2.0), Vec3::new(0.0, 8.0, -45.0));

    // Low ridge the ground probes have to climb over
    let size = 16;
    let heights: Vec<f32> = (0..size * size)
        .map(|i| {
            let column = (i % size) as f32 / (size - 1) as f32;
            (column * std::f32::consts::PI).sin()
        })
        .collect();
    let ridge = scene.create_heightfield(&heights, size, size, Vec3::new(60.0, 6.0, 60.0));
    scene.set_collider_translation(ridge, Vec3::new(-40.0, 0.0, 40.0));

    // Props on a separate layer
    scene.create_static_box_on(PROP_LAYER, Vec3::splat(1.5), Vec3::new(10.0, 1.5, 10.0));
    scene
}

/// Input played back over the run, one frame per tick
fn build_script(tick_rate: u32) -> ScriptedInput {
    let second = tick_rate as usize;
    let mut script = ScriptedInput::new();
    script
        .wait(second)
        .hold(
            InputFrame {
                move_y: 1.0,
                ..Default::default()
            },
            2 * second,
        )
        .hold(
            InputFrame {
                rotate_y: 0.5,
                ..Default::default()
            },
            second,
        )
        .hold(
            InputFrame {
                zoom: -4.0,
                ..Default::default()
            },
            second,
        )
        .hold(
            InputFrame {
                move_x: -1.0,
                rotate_x: -0.3,
                ..Default::default()
            },
            2 * second,
        )
        .wait(second)
        .hold(
            InputFrame {
                zoom: 4.0,
                ..Default::default()
            },
            second / 2,
        );
    script
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let args = Args::parse();
    let settings = RigSettings::load(args.settings.as_deref());

    if args.write_default {
        let path = RigSettings::default()
            .save(args.settings.as_deref())
            .context("Failed to write default settings")?;
        info!("Default settings written to {:?}", path);
        return Ok(());
    }

    info!("Starting Vantage demo...");

    let scene = build_scene();
    let simulation = settings.simulation.clone();

    let target = EntityId::new();
    let mut targets = HashMap::new();
    targets.insert(target, Vec3::new(simulation.target_radius, 1.0, 0.0));

    let mut rig = CameraRig::new(settings.camera)
        .with_target(target)
        .with_behaviour(simulation.start_behaviour);
    let mut pose = Pose::from_pitch_yaw(Vec3::new(0.0, 40.0, -40.0), 45.0, 0.0);
    let mut script = build_script(simulation.tick_rate);
    let mut clock = FrameClock::new(ClockConfig::default());

    let mut trace = match &args.trace {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create trace file {:?}", path))?;
            info!("Writing pose trace to {:?}", path);
            Some(BufWriter::new(file))
        }
        None => None,
    };

    let ticks_per_switch = (simulation.switch_interval * simulation.tick_rate as f32).round() as u64;
    let mut target_angle: f32 = 0.0;

    for frame in 1..=simulation.total_ticks() {
        let dt = clock.advance(simulation.tick_delta());

        target_angle += simulation.target_speed.to_radians() * dt;
        targets.insert(
            target,
            Vec3::new(
                target_angle.cos() * simulation.target_radius,
                1.0,
                target_angle.sin() * simulation.target_radius,
            ),
        );

        if ticks_per_switch > 0 && frame % ticks_per_switch == 0 {
            rig.request_switch();
        }

        let mut env = RigEnv::new(&mut pose, &scene, &targets);
        rig.tick(dt, &mut env, &mut script);

        let state = rig.state();
        if let Some(writer) = trace.as_mut() {
            let record = TraceRecord {
                frame,
                time: clock.total_time,
                behaviour: rig.active_kind(),
                operational: rig.is_operational(),
                position: pose.position,
                euler_angles: pose.euler_angles,
                origin: state.origin,
                distance: state.distance,
                auto_pitch: state.auto_pitch,
            };
            serde_json::to_writer(&mut *writer, &record).context("Failed to write trace record")?;
            writer.write_all(b"\n")?;
        }

        if frame % simulation.tick_rate.max(1) as u64 == 0 {
            info!(
                "[{:>5.1}s] {:<9} pos=({:.1}, {:.1}, {:.1}) yaw={:.1} pitch={:.1} dist={:.1} auto_pitch={:.1}",
                clock.total_time,
                rig.active_kind().to_string(),
                pose.position.x,
                pose.position.y,
                pose.position.z,
                pose.yaw(),
                pose.pitch(),
                state.distance,
                state.auto_pitch,
            );
        }
    }

    if let Some(mut writer) = trace {
        writer.flush().context("Failed to flush trace file")?;
    }

    info!("Demo finished after {} frames", clock.frame_count);
    Ok(())
}
