use serde::{Deserialize, Serialize};

use crate::error::{FootprintError, Result};

pub const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Average draw of a platform server and how many containers it hosts.
///
/// The defaults assume a 400 W server running 65 containers, the midpoint
/// of the 30-100 containers a single cloud server typically supports.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PowerModel {
    pub watts_per_server: f64,
    pub containers_per_server: f64,
}

impl Default for PowerModel {
    fn default() -> Self {
        Self {
            watts_per_server: 400.0,
            containers_per_server: 65.0,
        }
    }
}

impl PowerModel {
    pub fn validate(&self) -> Result<()> {
        if !(self.watts_per_server.is_finite() && self.watts_per_server > 0.0) {
            return Err(FootprintError::InvalidArg(format!(
                "watts_per_server must be > 0, got {}",
                self.watts_per_server
            )));
        }
        if !(self.containers_per_server.is_finite() && self.containers_per_server > 0.0) {
            return Err(FootprintError::InvalidArg(format!(
                "containers_per_server must be > 0, got {}",
                self.containers_per_server
            )));
        }
        Ok(())
    }

    pub fn watts_per_container(&self) -> f64 {
        self.watts_per_server / self.containers_per_server
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Power,
    Year,
    Carbon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub mode: Mode,
    pub total_instances: u64,
    pub watts: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kwh_per_year: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kg_co2e_per_year: Option<f64>,
}

impl Estimate {
    /// Value and unit of the quantity selected by the mode.
    pub fn headline(&self) -> (f64, &'static str) {
        match self.mode {
            Mode::Power => (self.watts, "Watt"),
            Mode::Year => (self.kwh_per_year.unwrap_or_default(), "kWh per year"),
            Mode::Carbon => (
                self.kg_co2e_per_year.unwrap_or_default(),
                "kg CO2e per year",
            ),
        }
    }
}

pub fn estimate(
    total_instances: u64,
    mode: Mode,
    carbon_intensity: Option<f64>,
    model: &PowerModel,
) -> Result<Estimate> {
    let watts = total_instances as f64 * model.watts_per_container();
    let kwh_per_year = watts * HOURS_PER_YEAR / 1000.0;

    match mode {
        Mode::Power => Ok(Estimate {
            mode,
            total_instances,
            watts,
            kwh_per_year: None,
            carbon_intensity: None,
            kg_co2e_per_year: None,
        }),
        Mode::Year => Ok(Estimate {
            mode,
            total_instances,
            watts,
            kwh_per_year: Some(kwh_per_year),
            carbon_intensity: None,
            kg_co2e_per_year: None,
        }),
        Mode::Carbon => {
            let intensity = carbon_intensity.ok_or_else(|| {
                FootprintError::InvalidArg("carbon mode requires a carbon intensity".to_string())
            })?;
            Ok(Estimate {
                mode,
                total_instances,
                watts,
                kwh_per_year: Some(kwh_per_year),
                carbon_intensity: Some(intensity),
                kg_co2e_per_year: Some(kwh_per_year * intensity / 1000.0),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Mode, PowerModel, estimate};

    const EPS: f64 = 1e-6;

    fn model() -> PowerModel {
        PowerModel::default()
    }

    #[test]
    fn power_is_linear_in_instances() {
        for n in [0u64, 1, 7, 65, 1000] {
            let est = estimate(n, Mode::Power, None, &model()).expect("estimate");
            assert!((est.watts - n as f64 * 400.0 / 65.0).abs() < EPS);
            assert_eq!(est.kwh_per_year, None);
        }
    }

    #[test]
    fn year_derives_from_power() {
        for n in [0u64, 3, 650] {
            let power = estimate(n, Mode::Power, None, &model()).expect("power");
            let year = estimate(n, Mode::Year, None, &model()).expect("year");
            let kwh = year.kwh_per_year.expect("kwh");
            assert!((kwh - power.watts * 24.0 * 365.0 / 1000.0).abs() < EPS);
        }
    }

    #[test]
    fn carbon_derives_from_year() {
        let year = estimate(120, Mode::Year, None, &model()).expect("year");
        let carbon = estimate(120, Mode::Carbon, Some(600.0), &model()).expect("carbon");
        let expected = year.kwh_per_year.unwrap() * 600.0 / 1000.0;
        assert!((carbon.kg_co2e_per_year.unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn worked_example_650_instances() {
        let power = estimate(650, Mode::Power, None, &model()).unwrap();
        assert!((power.watts - 4000.0).abs() < EPS);
        assert_eq!(power.headline(), (power.watts, "Watt"));

        let year = estimate(650, Mode::Year, None, &model()).unwrap();
        assert!((year.kwh_per_year.unwrap() - 35_040.0).abs() < EPS);

        let carbon = estimate(650, Mode::Carbon, Some(441.0), &model()).unwrap();
        let (value, unit) = carbon.headline();
        assert!((value - 15_452.64).abs() < EPS);
        assert_eq!(unit, "kg CO2e per year");
    }

    #[test]
    fn carbon_without_intensity_is_rejected() {
        assert!(estimate(10, Mode::Carbon, None, &model()).is_err());
    }

    #[test]
    fn custom_model_changes_watts_per_container() {
        let m = PowerModel {
            watts_per_server: 500.0,
            containers_per_server: 50.0,
        };
        let est = estimate(5, Mode::Power, None, &m).unwrap();
        assert!((est.watts - 50.0).abs() < EPS);
    }

    #[test]
    fn model_rejects_non_positive_values() {
        let m = PowerModel {
            watts_per_server: 400.0,
            containers_per_server: 0.0,
        };
        assert!(m.validate().is_err());
        assert!(model().validate().is_ok());
    }
}
