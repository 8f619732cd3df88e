use crate::config::SolverConfig;

/// Solver parameters for the fluid simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    /// Grid side length N.
    pub size: usize,
    pub visc: f64,
    pub dt: f64,
    pub diffuse_iter: usize,
    pub project_iter: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self::from(&SolverConfig::default())
    }
}

impl From<&SolverConfig> for SolverParams {
    fn from(cfg: &SolverConfig) -> Self {
        Self {
            size: cfg.size,
            visc: cfg.viscosity,
            dt: cfg.dt,
            diffuse_iter: cfg.iterations,
            project_iter: cfg.iterations,
        }
    }
}

impl SolverParams {
    /// Default parameters on a grid of side `size`.
    #[cfg(test)]
    pub fn with_size(size: usize) -> Self {
        Self { size, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SolverParams::default();
        assert_eq!(params.size, 64);
        assert_eq!(params.visc, 0.0001);
        assert_eq!(params.dt, 0.1);
        assert_eq!(params.diffuse_iter, 4);
        assert_eq!(params.project_iter, 4);
    }

    #[test]
    fn test_from_config_shares_iterations() {
        let cfg = SolverConfig { size: 32, iterations: 9, viscosity: 0.01, dt: 0.2 };
        let params = SolverParams::from(&cfg);
        assert_eq!(params.size, 32);
        assert_eq!(params.diffuse_iter, 9);
        assert_eq!(params.project_iter, 9);
        assert_eq!(params.visc, 0.01);
        assert_eq!(params.dt, 0.2);
    }

    #[test]
    fn test_with_size_keeps_other_defaults() {
        let params = SolverParams::with_size(12);
        assert_eq!(params.size, 12);
        assert_eq!(params, SolverParams { size: 12, ..SolverParams::default() });
    }
}
