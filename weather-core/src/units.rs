use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Display unit system. Provider data is always fetched in metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Units::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

/// Convert a Celsius reading for display.
///
/// Imperial output is rounded to a whole degree; metric input is passed
/// through untouched.
pub fn convert_temperature(celsius: f64, units: Units) -> f64 {
    match units {
        Units::Imperial => round_half_up(celsius * 9.0 / 5.0 + 32.0),
        Units::Metric => celsius,
    }
}

/// Round to the nearest integer, ties toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    // `value + 0.5` can itself round up for inputs just below a half.
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imperial_conversion_of_reference_points() {
        assert_eq!(convert_temperature(0.0, Units::Imperial), 32.0);
        assert_eq!(convert_temperature(100.0, Units::Imperial), 212.0);
        assert_eq!(convert_temperature(-40.0, Units::Imperial), -40.0);
    }

    #[test]
    fn imperial_output_is_rounded() {
        // 21.3 °C = 70.34 °F
        assert_eq!(convert_temperature(21.3, Units::Imperial), 70.0);
        // 21.5 °C = 70.7 °F
        assert_eq!(convert_temperature(21.5, Units::Imperial), 71.0);
    }

    #[test]
    fn metric_passes_through_unrounded() {
        assert_eq!(convert_temperature(20.0, Units::Metric), 20.0);
        assert_eq!(convert_temperature(20.4, Units::Metric), 20.4);
    }

    #[test]
    fn round_half_up_breaks_ties_upward() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn values_just_below_a_half_round_down() {
        assert_eq!(round_half_up(0.499_999_999_999_999_94), 0.0);
        assert_eq!(round_half_up(-0.500_000_000_000_000_1), -1.0);
        assert_eq!(round_half_up(4_503_599_627_370_495.0), 4_503_599_627_370_495.0);
    }

    #[test]
    fn units_parse_and_toggle() {
        assert_eq!("Imperial".parse::<Units>().unwrap(), Units::Imperial);
        assert_eq!("c".parse::<Units>().unwrap(), Units::Metric);
        assert!("kelvin".parse::<Units>().is_err());
        assert_eq!(Units::Metric.toggle(), Units::Imperial);
        assert_eq!(Units::Imperial.toggle().symbol(), "°C");
    }
}
