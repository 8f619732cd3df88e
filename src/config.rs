use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default config file looked up in the working directory.
pub const DEFAULT_PATH: &str = "fluxfield.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub solver: SolverConfig,
    pub particles: ParticleConfig,
    pub flow: FlowConfig,
    pub display: DisplayConfig,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    /// Grid side length N.
    pub size: usize,
    /// Relaxation passes for diffusion and pressure solves.
    pub iterations: usize,
    pub viscosity: f64,
    pub dt: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Shortest lifespan in steps.
    pub life_min: f64,
    /// Lifespans are drawn from `[life_min, life_min + life_span)`.
    pub life_span: f64,
    pub speed_scale: f64,
    pub trail_len: usize,
    /// Trail segments longer than this (per axis, px) are not connected.
    pub wrap_threshold: f64,
    pub max_alpha: f64,
    pub alpha_per_speed: f64,
    pub color: [u8; 3],
    pub line_width: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowConfig {
    /// Per-frame probability of an ambient impulse.
    pub ambient_chance: f64,
    /// Ambient impulse components are uniform in `[-strength/2, strength/2)`.
    pub ambient_strength: f64,
    /// Pointer drag delta (px) to force multiplier.
    pub drag_multiplier: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: usize,
    pub height: usize,
    pub target_fps: usize,
    pub background: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            particles: ParticleConfig::default(),
            flow: FlowConfig::default(),
            display: DisplayConfig::default(),
            seed: None,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            size: 64,
            iterations: 4,
            viscosity: 0.0001,
            dt: 0.1,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 6000,
            life_min: 100.0,
            life_span: 100.0,
            speed_scale: 50.0,
            trail_len: 5,
            wrap_threshold: 50.0,
            max_alpha: 0.6,
            alpha_per_speed: 0.3,
            color: [212, 175, 55],
            line_width: 1.0,
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            ambient_chance: 0.2,
            ambient_strength: 5.0,
            drag_multiplier: 5.0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            target_fps: 60,
            background: [10, 25, 47],
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg.to_string())) };
        let reals = [
            ("solver.viscosity", self.solver.viscosity),
            ("solver.dt", self.solver.dt),
            ("particles.life_min", self.particles.life_min),
            ("particles.life_span", self.particles.life_span),
            ("particles.speed_scale", self.particles.speed_scale),
            ("particles.wrap_threshold", self.particles.wrap_threshold),
            ("particles.max_alpha", self.particles.max_alpha),
            ("particles.alpha_per_speed", self.particles.alpha_per_speed),
            ("particles.line_width", self.particles.line_width),
            ("flow.ambient_chance", self.flow.ambient_chance),
            ("flow.ambient_strength", self.flow.ambient_strength),
            ("flow.drag_multiplier", self.flow.drag_multiplier),
        ];
        if let Some((name, _)) = reals.iter().find(|(_, v)| !v.is_finite()) {
            return fail(&format!("{name} must be a finite number"));
        }
        if self.solver.size < 2 {
            return fail("solver.size must be at least 2");
        }
        if self.solver.iterations == 0 {
            return fail("solver.iterations must be positive");
        }
        if self.solver.viscosity < 0.0 || self.solver.dt < 0.0 {
            return fail("solver.viscosity and solver.dt must be non-negative");
        }
        if self.particles.count == 0 {
            return fail("particles.count must be positive");
        }
        if self.particles.life_min < 0.0 || self.particles.life_span <= 0.0 {
            return fail("particles.life_min must be non-negative and particles.life_span positive");
        }
        if self.particles.trail_len < 2 {
            return fail("particles.trail_len must be at least 2");
        }
        if !(0.0..=1.0).contains(&self.flow.ambient_chance) {
            return fail("flow.ambient_chance must be within [0, 1]");
        }
        if self.display.target_fps == 0 {
            return fail("display.target_fps must be positive");
        }
        if self.display.width == 0 || self.display.height == 0 {
            return fail("display.width and display.height must be positive");
        }
        Ok(())
    }
}

/// Parse a config from YAML text and validate it.
pub fn parse(contents: &str, path: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Read and validate a config file.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    parse(&contents, &display)
}

/// Load the config at `path`, falling back to defaults when the file is
/// missing or unusable.
pub fn load(path: &Path) -> Config {
    if !path.exists() {
        log::debug!("{} not found; using defaults", path.display());
        return Config::default();
    }
    match load_from(path) {
        Ok(cfg) => {
            log::info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.solver.size, 64);
        assert_eq!(cfg.solver.iterations, 4);
        assert_eq!(cfg.solver.viscosity, 0.0001);
        assert_eq!(cfg.solver.dt, 0.1);
        assert_eq!(cfg.particles.count, 6000);
        assert_eq!(cfg.particles.life_min, 100.0);
        assert_eq!(cfg.particles.life_span, 100.0);
        assert_eq!(cfg.particles.speed_scale, 50.0);
        assert_eq!(cfg.particles.trail_len, 5);
        assert_eq!(cfg.particles.wrap_threshold, 50.0);
        assert_eq!(cfg.particles.max_alpha, 0.6);
        assert_eq!(cfg.particles.alpha_per_speed, 0.3);
        assert_eq!(cfg.particles.color, [212, 175, 55]);
        assert_eq!(cfg.flow.ambient_chance, 0.2);
        assert_eq!(cfg.flow.ambient_strength, 5.0);
        assert_eq!(cfg.flow.drag_multiplier, 5.0);
        assert_eq!(cfg.display.background, [10, 25, 47]);
        assert_eq!(cfg.display.target_fps, 60);
        assert_eq!(cfg.seed, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "solver:\n  size: 32\nparticles:\n  count: 200\nseed: 7\n";
        let cfg = parse(yaml, "test.yaml").unwrap();
        assert_eq!(cfg.solver.size, 32);
        assert_eq!(cfg.solver.iterations, 4); // default
        assert_eq!(cfg.particles.count, 200);
        assert_eq!(cfg.particles.trail_len, 5); // default
        assert_eq!(cfg.display.width, 1280); // default
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
solver:
  size: 48
  iterations: 8
  viscosity: 0.001
  dt: 0.05
particles:
  count: 1500
  life_min: 50
  life_span: 20
  speed_scale: 30
  trail_len: 8
  wrap_threshold: 40
  max_alpha: 0.9
  alpha_per_speed: 0.5
  color: [255, 255, 255]
  line_width: 2.0
flow:
  ambient_chance: 0.5
  ambient_strength: 2.0
  drag_multiplier: 3.0
display:
  width: 800
  height: 600
  target_fps: 30
  background: [0, 0, 0]
seed: 42
"#;
        let cfg = parse(yaml, "test.yaml").unwrap();
        assert_eq!(cfg.solver.size, 48);
        assert_eq!(cfg.solver.iterations, 8);
        assert_eq!(cfg.solver.viscosity, 0.001);
        assert_eq!(cfg.solver.dt, 0.05);
        assert_eq!(cfg.particles.count, 1500);
        assert_eq!(cfg.particles.life_min, 50.0);
        assert_eq!(cfg.particles.life_span, 20.0);
        assert_eq!(cfg.particles.speed_scale, 30.0);
        assert_eq!(cfg.particles.trail_len, 8);
        assert_eq!(cfg.particles.wrap_threshold, 40.0);
        assert_eq!(cfg.particles.max_alpha, 0.9);
        assert_eq!(cfg.particles.alpha_per_speed, 0.5);
        assert_eq!(cfg.particles.color, [255, 255, 255]);
        assert_eq!(cfg.particles.line_width, 2.0);
        assert_eq!(cfg.flow.ambient_chance, 0.5);
        assert_eq!(cfg.flow.ambient_strength, 2.0);
        assert_eq!(cfg.flow.drag_multiplier, 3.0);
        assert_eq!(cfg.display.width, 800);
        assert_eq!(cfg.display.height, 600);
        assert_eq!(cfg.display.target_fps, 30);
        assert_eq!(cfg.display.background, [0, 0, 0]);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "solver:\n  size: 1\n",
            "solver:\n  iterations: 0\n",
            "solver:\n  dt: -0.1\n",
            "particles:\n  count: 0\n",
            "particles:\n  trail_len: 1\n",
            "particles:\n  life_span: 0\n",
            "flow:\n  ambient_chance: 1.5\n",
            "display:\n  target_fps: 0\n",
        ];
        for yaml in cases {
            match parse(yaml, "test.yaml") {
                Err(ConfigError::Invalid(_)) => {}
                other => panic!("Expected Invalid for {yaml:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let cases = [
            ("solver:\n  viscosity: .nan\n", "solver.viscosity"),
            ("solver:\n  dt: .inf\n", "solver.dt"),
            ("particles:\n  life_min: .nan\n", "particles.life_min"),
            ("flow:\n  ambient_chance: .nan\n", "flow.ambient_chance"),
            ("flow:\n  drag_multiplier: -.inf\n", "flow.drag_multiplier"),
        ];
        for (yaml, field) in cases {
            match parse(yaml, "test.yaml") {
                Err(ConfigError::Invalid(msg)) => assert!(msg.contains(field), "{msg}"),
                other => panic!("Expected Invalid for {yaml:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse("solver: [not, a, map]\n", "bad.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn test_load_missing_file() {
        let cfg = load(Path::new("definitely-not-here/fluxfield.yaml"));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let err = load_from(Path::new("definitely-not-here/fluxfield.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let path = std::env::temp_dir().join(format!("fluxfield-test-{}.yaml", std::process::id()));
        std::fs::write(&path, "solver:\n  size: 0\n").unwrap();
        let cfg = load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg, Config::default());
    }
}
