use nalgebra::Vector3;

use drone_sim::drone::Drone;
use drone_sim::io::{write_summary, FlightSummary};
use drone_sim::motor::MotorError;
use drone_sim::sim::{
    extract_events, simulate_with, CommandFrame, Pilot, ScriptedPilot, SimConfig,
};
use drone_sim::terrain::{Obstacle, Terrain};

fn main() -> Result<(), MotorError> {
    env_logger::init();

    // -----------------------------------------------------------------------
    // World: flat ground with three spherical obstacles
    // -----------------------------------------------------------------------
    let terrain = Terrain::new(vec![
        Obstacle::new(Vector3::new(3.0, 2.0, 5.0), 1.0),
        Obstacle::new(Vector3::new(7.0, 7.0, 3.0), 1.5),
        Obstacle::new(Vector3::new(5.0, 4.0, 7.0), 0.8),
    ]);

    // -----------------------------------------------------------------------
    // Scripted flight: climb, cruise into an obstacle, dodge under it, land
    // -----------------------------------------------------------------------
    let script = vec![
        // Climb to 4.0
        (
            0,
            CommandFrame {
                throttle: 1.0,
                ..CommandFrame::default()
            },
        ),
        // Cruise toward the sphere at (5, 4, 7) until the gate blocks us
        (
            40,
            CommandFrame {
                pitch: 1.0,
                yaw: 35.5,
                ..CommandFrame::default()
            },
        ),
        // Drop below the obstacle
        (
            130,
            CommandFrame {
                throttle: -1.0,
                yaw: 35.5,
                ..CommandFrame::default()
            },
        ),
        // Turn east (yaw_offset active while the turn is commanded)
        (
            160,
            CommandFrame {
                pitch: 1.0,
                yaw: 90.0,
                yaw_offset: 1.0,
                ..CommandFrame::default()
            },
        ),
        (
            165,
            CommandFrame {
                pitch: 1.0,
                yaw: 90.0,
                ..CommandFrame::default()
            },
        ),
        // Land
        (
            190,
            CommandFrame {
                throttle: -1.0,
                yaw: 90.0,
                ..CommandFrame::default()
            },
        ),
    ];

    let config = SimConfig {
        dt: 0.1,
        ticks: 200,
    };
    let mut drone = Drone::new(&terrain);
    let mut pilot = ScriptedPilot::new(script);
    let records = simulate_with(&mut drone, &config, &mut pilot)?;

    let events = extract_events(&records);
    let summary = FlightSummary::from_records(&records);

    // -----------------------------------------------------------------------
    // Print report
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  QUADROTOR FLIGHT SIMULATION — {} pilot", pilot.name());
    println!("====================================================================");
    println!();
    println!("  World");
    println!("  ──────────────────────────────────────────────────────────────────");
    for obs in terrain.obstacles() {
        println!(
            "  Obstacle at ({:>4.1}, {:>4.1}, {:>4.1})   radius {:>4.2}   top {:>4.2}",
            obs.center.x,
            obs.center.y,
            obs.center.z,
            obs.radius,
            obs.top()
        );
    }
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for event in &events {
        println!(
            "  {:<16} t={:>6.1}   pos=({:>5.2}, {:>5.2}, {:>5.2})",
            format!("{:?}", event.kind),
            event.time,
            event.position.x,
            event.position.y,
            event.position.z
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Peak altitude:   {:>7.2}    at t = {:>6.1}",
        summary.peak_altitude, summary.peak_time
    );
    println!("  Ground distance: {:>7.2}", summary.ground_distance);
    println!("  Blocked ticks:   {:>7}", summary.blocked_ticks);
    println!("  Flight time:     {:>7.1}", summary.flight_time);
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>7}  {:>7}  {:>7}  {:>7}  {:>8}",
        "t", "x", "y", "z", "alt", "state"
    );
    println!("  {}", "─".repeat(52));

    let sample_interval = (records.len() / 20).max(1);
    for (i, r) in records.iter().enumerate() {
        if i % sample_interval != 0 && i != records.len() - 1 && !r.blocked {
            continue;
        }
        let state = if r.blocked { "BLOCKED" } else { "ok" };
        println!(
            "  {:>7.1}  {:>7.2}  {:>7.2}  {:>7.2}  {:>7.2}  {:>8}",
            r.time, r.position.x, r.position.y, r.position.z, r.altitude, state
        );
    }
    println!();

    // -----------------------------------------------------------------------
    // Final drone state
    // -----------------------------------------------------------------------
    println!("  Final State");
    println!("  ──────────────────────────────────────────────────────────────────");
    let o = drone.orientation();
    println!(
        "  Orientation: pitch={:.1} roll={:.1} yaw={:.1} throttle={:.1} yaw_offset={:.1}",
        o.pitch, o.roll, o.yaw, o.throttle, o.yaw_offset
    );
    for status in drone.motor_status() {
        println!("  {}", status);
    }
    match drone.sensor().status() {
        Some(reading) => println!("  Altitude sensor: {:.2}", reading),
        None => println!("  Altitude sensor: no reading"),
    }
    println!();

    println!("  Summary (JSON)");
    println!("  ──────────────────────────────────────────────────────────────────");
    let mut stdout = std::io::stdout();
    if let Err(err) = write_summary(&mut stdout, pilot.name(), &summary) {
        eprintln!("failed to write summary: {err}");
    }

    println!();
    println!("  Simulation: {} ticks, dt={}", records.len() - 1, config.dt);
    println!("====================================================================");
    println!();

    Ok(())
}
