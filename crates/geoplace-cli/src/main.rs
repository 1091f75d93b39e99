//! Place a 3D Tiles tileset on the WGS84 globe.
//!
//! Loads a tileset on a background thread, waits for it to become ready,
//! rewrites its root transform from the placement config and reports where
//! the camera would fly to.

mod launch_params;

use std::process::ExitCode;
use std::thread::JoinHandle;

use geoplace::Ellipsoid;
use geoplace::transform::translation_of;
use geoplace_tiles::{
    LoggingCamera, Placed, SceneObject, Tileset, place_when_ready, ready_signal,
};

use launch_params::LaunchParams;

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let params = launch_params::parse();
    match run(&params) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("placement failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(params: &LaunchParams) -> geoplace_tiles::Result<()> {
    let config = params.placement_config()?;
    let path = params.tileset_path(&config);
    tracing::info!(path = %path.display(), "loading tileset");

    let (signal, listener) = ready_signal();
    let loader = std::thread::spawn(move || match Tileset::load(&path) {
        Ok(tileset) => signal.notify(tileset),
        // Dropping the signal tells the listener the tileset never became ready.
        Err(e) => tracing::error!("failed to load tileset: {e}"),
    });

    let ellipsoid = Ellipsoid::WGS84;
    let mut camera = LoggingCamera::new();
    let placed = place_when_ready(
        listener,
        &mut camera,
        &config,
        &ellipsoid,
        params.flight_duration,
    );
    join_loader(loader);
    let placed = placed?;

    report(&placed, &ellipsoid);

    if let Some(output) = &params.output {
        placed.object.save(output)?;
    }
    Ok(())
}

/// Wait for the loader thread, logging a panic instead of discarding it.
///
/// Returns false if the thread panicked.
fn join_loader(loader: JoinHandle<()>) -> bool {
    match loader.join() {
        Ok(()) => true,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!("tileset loader thread panicked: {reason}");
            false
        }
    }
}

fn report(placed: &Placed<Tileset>, ellipsoid: &Ellipsoid) {
    println!("root transform (column-major):");
    for column in placed.transform.to_cols_array_2d() {
        println!(
            "  [{:>18.6}, {:>18.6}, {:>18.6}, {:>18.6}]",
            column[0], column[1], column[2], column[3]
        );
    }

    let origin = translation_of(&placed.transform);
    if let Some(geodetic) = ellipsoid.cartesian_to_geodetic(origin) {
        println!(
            "origin: lon {:.6}, lat {:.6}, height {:.3} m",
            geodetic.longitude, geodetic.latitude, geodetic.height
        );
    }

    let bounds = placed.object.bounding_volume();
    println!(
        "bounding sphere: center ({:.3}, {:.3}, {:.3}), radius {:.3} m",
        bounds.center.x, bounds.center.y, bounds.center.z, bounds.radius
    );
}
