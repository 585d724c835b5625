use std::fmt;

use serde::Serialize;

use crate::model::config::MINUTES_PER_DAY;
use crate::model::error::{ModelError, ModelResult};

/// Device category. Each category is reported as an independent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Kitchen,
    Entertainment,
    Personal,
    Office,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Kitchen,
        Category::Office,
        Category::Personal,
        Category::Entertainment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Kitchen => "Kitchen",
            Category::Entertainment => "Entertainment",
            Category::Personal => "Personal",
            Category::Office => "Office",
        }
    }

    /// Noun used in report titles, e.g. "UK kitchen appliance electricity".
    pub fn noun(&self) -> &'static str {
        match self {
            Category::Kitchen => "kitchen appliance",
            Category::Entertainment => "entertainment electronics",
            Category::Personal => "personal device",
            Category::Office => "office equipment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Usage profile of one device type.
///
/// Fields are private so that a constructed profile always satisfies
/// `0 <= active_minutes_per_day <= 1440`, `rated_power_w > 0`,
/// `standby_power_w >= 0` and `units_millions >= 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceProfile {
    name: String,
    rated_power_w: f64,
    active_minutes_per_day: f64,
    standby_power_w: f64,
    units_millions: f64,
}

impl DeviceProfile {
    pub fn new(
        name: &str,
        rated_power_w: f64,
        active_minutes_per_day: f64,
        standby_power_w: f64,
        units_millions: f64,
    ) -> ModelResult<Self> {
        for (field, value) in [
            ("rated power", rated_power_w),
            ("active minutes", active_minutes_per_day),
            ("standby power", standby_power_w),
            ("units", units_millions),
        ] {
            if !value.is_finite() {
                return Err(ModelError::profile(
                    name,
                    format!("{field} must be finite, got {value}"),
                ));
            }
        }
        if rated_power_w <= 0.0 {
            return Err(ModelError::profile(
                name,
                format!("rated power must be positive, got {rated_power_w} W"),
            ));
        }
        if !(0.0..=MINUTES_PER_DAY).contains(&active_minutes_per_day) {
            return Err(ModelError::profile(
                name,
                format!("active minutes must be in [0, 1440], got {active_minutes_per_day}"),
            ));
        }
        if standby_power_w < 0.0 {
            return Err(ModelError::profile(
                name,
                format!("standby power must be non-negative, got {standby_power_w} W"),
            ));
        }
        if units_millions < 0.0 {
            return Err(ModelError::profile(
                name,
                format!("units must be non-negative, got {units_millions} million"),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            rated_power_w,
            active_minutes_per_day,
            standby_power_w,
            units_millions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nominal active power draw in W.
    pub fn rated_power_w(&self) -> f64 {
        self.rated_power_w
    }

    pub fn active_minutes_per_day(&self) -> f64 {
        self.active_minutes_per_day
    }

    /// Idle power draw in W.
    pub fn standby_power_w(&self) -> f64 {
        self.standby_power_w
    }

    /// National population of this device in millions.
    pub fn units_millions(&self) -> f64 {
        self.units_millions
    }

    /// Remainder of the day spent in standby.
    pub fn standby_minutes_per_day(&self) -> f64 {
        MINUTES_PER_DAY - self.active_minutes_per_day
    }

    /// Active power interval `[P * (1 - t), P * (1 + t)]`.
    pub fn power_band(&self, tolerance: f64) -> (f64, f64) {
        (
            self.rated_power_w * (1.0 - tolerance),
            self.rated_power_w * (1.0 + tolerance),
        )
    }
}
