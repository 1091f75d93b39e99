//! Launch parameter parsing for the command-line tool.
//!
//! A placement starts from a JSON config file (or the built-in reference
//! placement) and individual fields can be overridden by flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use geoplace_tiles::{DEFAULT_FLIGHT_DURATION, PlacementConfig, RawPlacementConfig, Result};

/// Launch parameters for a placement run.
#[derive(Debug)]
pub struct LaunchParams {
    /// Placement config file; the reference placement is used if absent.
    pub config: Option<PathBuf>,
    /// Tileset to place, overriding the config's source.
    pub tileset: Option<PathBuf>,
    /// Per-field overrides applied on top of the config.
    pub overrides: Overrides,
    /// Duration of the camera flight.
    pub flight_duration: Duration,
    /// Where to write the placed tileset.
    pub output: Option<PathBuf>,
}

/// Optional replacements for individual placement fields.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Overrides {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub height: Option<f64>,
    pub heading: Option<f64>,
    pub pitch: Option<f64>,
    pub roll: Option<f64>,
}

impl Overrides {
    /// Write every set field into `raw`.
    pub fn apply(&self, raw: &mut RawPlacementConfig) {
        let fields = [
            (self.lon, &mut raw.longitude),
            (self.lat, &mut raw.latitude),
            (self.height, &mut raw.height_offset),
            (self.heading, &mut raw.heading),
            (self.pitch, &mut raw.pitch),
            (self.roll, &mut raw.roll),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl LaunchParams {
    /// Merge the config file, the tileset flag and the overrides, then validate.
    pub fn placement_config(&self) -> Result<PlacementConfig> {
        let mut raw = match &self.config {
            Some(path) => RawPlacementConfig::load(path)?,
            None => RawPlacementConfig::default(),
        };
        if let Some(tileset) = &self.tileset {
            raw.source_url = tileset.display().to_string();
        }
        self.overrides.apply(&mut raw);
        raw.validate()
    }

    /// Filesystem path of the tileset named by `config`.
    ///
    /// An explicit `--tileset` is used as given. Otherwise the config's source
    /// is resolved against the config file's directory, with a leading `/`
    /// read as the root of that directory, the way a web server would serve
    /// it.
    #[must_use]
    pub fn tileset_path(&self, config: &PlacementConfig) -> PathBuf {
        if let Some(tileset) = &self.tileset {
            return tileset.clone();
        }
        let base = self
            .config
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        base.join(config.source_url().trim_start_matches('/'))
    }
}

/// Parse a non-negative number of seconds.
fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let seconds = s
        .parse::<f64>()
        .map_err(|e| format!("invalid duration: {e}"))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("invalid duration '{s}': {e}"))
}

#[derive(Parser)]
#[command(about = "Reposition and reorient a 3D Tiles tileset on the globe")]
struct CliArgs {
    /// Placement config file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tileset document to place, overriding the config's source.
    #[arg(long)]
    tileset: Option<PathBuf>,

    /// Target longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Target latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Target height above the ellipsoid in meters.
    #[arg(long, allow_negative_numbers = true)]
    height: Option<f64>,

    /// Heading in degrees, clockwise from north.
    #[arg(long, allow_negative_numbers = true)]
    heading: Option<f64>,

    /// Pitch in degrees, positive raises the nose.
    #[arg(long, allow_negative_numbers = true)]
    pitch: Option<f64>,

    /// Roll in degrees.
    #[arg(long, allow_negative_numbers = true)]
    roll: Option<f64>,

    /// Camera flight duration in seconds.
    #[arg(long, value_parser = parse_duration, default_value = "2")]
    duration: Duration,

    /// Write the placed tileset to this path.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl From<CliArgs> for LaunchParams {
    fn from(args: CliArgs) -> Self {
        Self {
            config: args.config,
            tileset: args.tileset,
            overrides: Overrides {
                lon: args.lon,
                lat: args.lat,
                height: args.height,
                heading: args.heading,
                pitch: args.pitch,
                roll: args.roll,
            },
            flight_duration: args.duration,
            output: args.output,
        }
    }
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            config: None,
            tileset: None,
            overrides: Overrides::default(),
            flight_duration: DEFAULT_FLIGHT_DURATION,
            output: None,
        }
    }
}

/// Parse launch parameters from the command line.
pub fn parse() -> LaunchParams {
    CliArgs::parse().into()
}
