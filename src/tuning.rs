//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be rebalanced without
//! touching the simulation. Overrides arrive as JSON; missing fields keep
//! their defaults.

use serde::{Deserialize, Serialize};

/// Errors raised while loading or checking a tuning override
#[derive(Debug)]
pub enum TuningError {
    /// The override was not valid JSON for `Tuning`
    Json(serde_json::Error),
    /// A value is outside the range the simulation can work with
    OutOfRange { field: &'static str, value: f64 },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Json(e) => write!(f, "invalid tuning JSON: {e}"),
            TuningError::OutOfRange { field, value } => {
                write!(f, "tuning value out of range: {field} = {value}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Json(e) => Some(e),
            TuningError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Json(e)
    }
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Velocity multiplier applied every tick after forces
    pub damping: f32,
    /// Horizontal acceleration from the left/right keys
    pub control_force: f32,
    /// Vertical impulse from the up/down keys
    pub vertical_impulse: f32,

    // === Powers ===
    pub feather_gravity_scale: f32,
    pub shield_gravity_scale: f32,
    /// Wind multiplier applied every tick while the stabilizer is active
    pub stabilizer_wind_damping: f32,
    /// Ticks a picked-up power lasts
    pub power_duration_ticks: u32,
    /// Base per-tick chance of a power-up appearing
    pub power_up_chance: f32,

    // === Wind ===
    pub wind_retarget_chance: f32,
    /// Full width of the wind target range (target in ±range/2)
    pub wind_range: f32,
    /// Extra, stronger retarget range rolled in the sierra
    pub sierra_wind_range: f32,
    /// Fraction of the gap to the target closed each tick
    pub wind_smoothing: f32,

    // === Difficulty ===
    pub obstacle_speed: f32,
    pub ramp_interval_ticks: u64,
    pub ramp_speed_step: f32,
    pub ramp_chance_step: f32,

    // === Weather ===
    pub weather_period_ticks: u32,
    pub rain_chance: f32,
    pub snow_chance: f32,
    pub lightning_chance: f32,
    pub lightning_ticks: u32,

    // === Audio ===
    pub music_interval_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.04,
            damping: 0.97,
            control_force: 0.05,
            vertical_impulse: 0.05,

            feather_gravity_scale: 0.4,
            shield_gravity_scale: 0.9,
            stabilizer_wind_damping: 0.9,
            power_duration_ticks: 600,
            power_up_chance: 0.005,

            wind_retarget_chance: 0.01,
            wind_range: 0.3,
            sierra_wind_range: 0.6,
            wind_smoothing: 0.01,

            obstacle_speed: 2.0,
            ramp_interval_ticks: 600,
            ramp_speed_step: 0.2,
            ramp_chance_step: 0.002,

            weather_period_ticks: 900,
            rain_chance: 0.4,
            snow_chance: 0.2,
            lightning_chance: 0.004,
            lightning_ticks: 10,

            music_interval_ticks: 180,
        }
    }
}

impl Tuning {
    /// Parse an override and check it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    ///
    /// Damping must be strictly below 1.0; without it there is no terminal
    /// fall speed.
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(field: &'static str, value: f64, ok: bool) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, value })
            }
        }
        fn probability(field: &'static str, p: f32) -> Result<(), TuningError> {
            check(field, p as f64, (0.0..=1.0).contains(&p))
        }

        check("gravity", self.gravity as f64, self.gravity > 0.0)?;
        check(
            "damping",
            self.damping as f64,
            self.damping > 0.0 && self.damping < 1.0,
        )?;
        check("control_force", self.control_force as f64, self.control_force >= 0.0)?;
        check(
            "vertical_impulse",
            self.vertical_impulse as f64,
            self.vertical_impulse >= 0.0,
        )?;
        check(
            "feather_gravity_scale",
            self.feather_gravity_scale as f64,
            self.feather_gravity_scale >= 0.0,
        )?;
        check(
            "shield_gravity_scale",
            self.shield_gravity_scale as f64,
            self.shield_gravity_scale >= 0.0,
        )?;
        probability("stabilizer_wind_damping", self.stabilizer_wind_damping)?;
        check(
            "power_duration_ticks",
            self.power_duration_ticks as f64,
            self.power_duration_ticks > 0,
        )?;
        probability("power_up_chance", self.power_up_chance)?;
        probability("wind_retarget_chance", self.wind_retarget_chance)?;
        check("wind_range", self.wind_range as f64, self.wind_range >= 0.0)?;
        check(
            "sierra_wind_range",
            self.sierra_wind_range as f64,
            self.sierra_wind_range >= 0.0,
        )?;
        probability("wind_smoothing", self.wind_smoothing)?;
        check("obstacle_speed", self.obstacle_speed as f64, self.obstacle_speed >= 0.0)?;
        check(
            "ramp_interval_ticks",
            self.ramp_interval_ticks as f64,
            self.ramp_interval_ticks > 0,
        )?;
        check("ramp_speed_step", self.ramp_speed_step as f64, self.ramp_speed_step >= 0.0)?;
        check(
            "ramp_chance_step",
            self.ramp_chance_step as f64,
            self.ramp_chance_step >= 0.0,
        )?;
        check(
            "weather_period_ticks",
            self.weather_period_ticks as f64,
            self.weather_period_ticks > 0,
        )?;
        probability("rain_chance", self.rain_chance)?;
        probability("snow_chance", self.snow_chance)?;
        probability("lightning_chance", self.lightning_chance)?;
        check(
            "music_interval_ticks",
            self.music_interval_ticks as f64,
            self.music_interval_ticks > 0,
        )?;
        Ok(())
    }

    /// Load an override, falling back to defaults (logged) when it is rejected
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            None => Self::default(),
            Some(json) => match Self::from_json(json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning override: {e}");
                    Self::default()
                }
            },
        }
    }

    /// Terminal fall speed with no input, wind or power: g / (1 - d) scaled by d
    ///
    /// Damping is applied after gravity each tick, so the fixed point of
    /// `v = (v + g) * d` is `g * d / (1 - d)`.
    pub fn terminal_fall_speed(&self) -> f32 {
        self.gravity * self.damping / (1.0 - self.damping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.05, "obstacle_speed": 3.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.05);
        assert_eq!(tuning.obstacle_speed, 3.0);
        assert_eq!(tuning.damping, 0.97);
        assert_eq!(tuning.weather_period_ticks, 900);
    }

    #[test]
    fn test_rejects_bad_damping() {
        let err = Tuning::from_json(r#"{ "damping": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { field: "damping", .. }));
    }

    #[test]
    fn test_rejects_undamped_fall() {
        let err = Tuning::from_json(r#"{ "damping": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { field: "damping", .. }));
        assert!(Tuning::from_json(r#"{ "damping": 0.999 }"#)
            .unwrap()
            .terminal_fall_speed()
            .is_finite());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
        assert!(err.to_string().starts_with("invalid tuning JSON"));
    }

    #[test]
    fn test_fallback_on_rejected_override() {
        let tuning = Tuning::from_json_or_default(Some(r#"{ "rain_chance": 2.0 }"#));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_terminal_fall_speed() {
        let v = Tuning::default().terminal_fall_speed();
        assert!((v - 1.2933).abs() < 0.001);
    }
}
