//! Reduces the provider's 3-hour sample list into hourly and daily summaries.

use std::collections::{HashMap, hash_map::Entry};

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::{DailySummary, Forecast, HourlySummary, WeatherSample},
    units::round_half_up,
};

/// Number of samples kept for the hourly strip (8 × 3h = 24h).
pub const HOURLY_LIMIT: usize = 8;

/// Number of days kept for the daily list.
pub const DAILY_LIMIT: usize = 5;

/// Clock style for hourly labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourFormat {
    /// `3 PM`
    #[default]
    Twelve,
    /// `15:00`
    TwentyFour,
}

impl HourFormat {
    fn pattern(&self) -> &'static str {
        match self {
            HourFormat::Twelve => "%-I %p",
            HourFormat::TwentyFour => "%H:%M",
        }
    }

    /// Parses `12`/`24` as well as the serialized names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "12" | "12h" | "twelve" => Some(HourFormat::Twelve),
            "24" | "24h" | "twentyfour" => Some(HourFormat::TwentyFour),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ForecastOptions {
    /// Offset of the forecast location; decides calendar days and labels.
    pub utc_offset: FixedOffset,
    pub hour_format: HourFormat,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            hour_format: HourFormat::default(),
        }
    }
}

/// Aggregate samples, ordered by ascending timestamp, into a [`Forecast`].
///
/// `hourly` is the first [`HOURLY_LIMIT`] samples. `daily` groups every
/// sample by its local calendar date, keeps groups in first-seen order and
/// truncates to [`DAILY_LIMIT`]. Each day's condition, description and icon
/// come from the first sample seen for that day.
pub fn aggregate(samples: &[WeatherSample], options: &ForecastOptions) -> Forecast {
    let hourly = samples
        .iter()
        .take(HOURLY_LIMIT)
        .map(|sample| HourlySummary {
            time: local_time(sample.timestamp, options.utc_offset)
                .format(options.hour_format.pattern())
                .to_string(),
            temperature: round_half_up(sample.temperature) as i32,
            condition: sample.condition.clone(),
            icon: sample.icon.clone(),
        })
        .collect();

    Forecast {
        hourly,
        daily: daily_summaries(samples, options.utc_offset),
    }
}

fn daily_summaries(samples: &[WeatherSample], offset: FixedOffset) -> Vec<DailySummary> {
    let mut days: Vec<DayAccumulator<'_>> = Vec::new();
    let mut by_date: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let local = local_time(sample.timestamp, offset);

        match by_date.entry(local.date_naive()) {
            Entry::Occupied(slot) => days[*slot.get()].absorb(sample),
            Entry::Vacant(slot) => {
                slot.insert(days.len());
                days.push(DayAccumulator::open(local, sample));
            }
        }
    }

    days.into_iter().take(DAILY_LIMIT).map(DayAccumulator::finish).collect()
}

struct DayAccumulator<'a> {
    first_seen: DateTime<FixedOffset>,
    representative: &'a WeatherSample,
    high: f64,
    low: f64,
}

impl<'a> DayAccumulator<'a> {
    fn open(first_seen: DateTime<FixedOffset>, sample: &'a WeatherSample) -> Self {
        Self {
            first_seen,
            representative: sample,
            high: sample.temperature_max,
            low: sample.temperature_min,
        }
    }

    fn absorb(&mut self, sample: &WeatherSample) {
        self.high = self.high.max(sample.temperature_max);
        self.low = self.low.min(sample.temperature_min);
    }

    fn finish(self) -> DailySummary {
        DailySummary {
            date: self.first_seen.format("%Y-%m-%d").to_string(),
            day: self.first_seen.format("%a").to_string(),
            high: round_half_up(self.high) as i32,
            low: round_half_up(self.low) as i32,
            condition: self.representative.condition.clone(),
            description: self.representative.description.clone(),
            icon: self.representative.icon.clone(),
        }
    }
}

fn local_time(timestamp: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2024-01-15 00:00:00 UTC, a Monday.
    const MONDAY: i64 = 1_705_276_800;
    const HOUR: i64 = 3_600;
    const DAY: i64 = 24 * HOUR;

    fn sample(timestamp: i64, max: f64, min: f64, condition: &str) -> WeatherSample {
        WeatherSample {
            timestamp,
            temperature: (max + min) / 2.0,
            temperature_max: max,
            temperature_min: min,
            condition: condition.to_string(),
            description: condition.to_lowercase(),
            icon: "01d".to_string(),
        }
    }

    fn utc() -> ForecastOptions {
        ForecastOptions::default()
    }

    #[test]
    fn empty_input_yields_empty_forecast() {
        let forecast = aggregate(&[], &utc());
        assert!(forecast.hourly.is_empty());
        assert!(forecast.daily.is_empty());
    }

    #[test]
    fn daily_uses_extremes_and_first_sample_condition() {
        let samples = vec![
            sample(MONDAY + 9 * HOUR, 10.0, 2.0, "Rain"),
            sample(MONDAY + 12 * HOUR, 14.0, 1.0, "Clouds"),
            sample(MONDAY + DAY + 9 * HOUR, 20.0, 12.0, "Clear"),
        ];

        let forecast = aggregate(&samples, &utc());

        assert_eq!(forecast.daily.len(), 2);
        let first = &forecast.daily[0];
        assert_eq!(first.date, "2024-01-15");
        assert_eq!(first.day, "Mon");
        assert_eq!((first.high, first.low), (14, 1));
        assert_eq!(first.condition, "Rain");
        assert_eq!(first.description, "rain");

        let second = &forecast.daily[1];
        assert_eq!(second.date, "2024-01-16");
        assert_eq!(second.day, "Tue");
        assert_eq!((second.high, second.low), (20, 12));
        assert_eq!(second.condition, "Clear");
    }

    #[test]
    fn limits_hold_for_a_full_provider_response() {
        // 40 samples every 3h starting at noon touch six calendar days.
        let samples: Vec<_> = (0..40)
            .map(|i| {
                let mut s = sample(MONDAY + 12 * HOUR + i * 3 * HOUR, 5.0, 1.0, "Clear");
                s.temperature = i as f64;
                s
            })
            .collect();

        let forecast = aggregate(&samples, &utc());

        assert_eq!(forecast.hourly.len(), HOURLY_LIMIT);
        let temperatures: Vec<i32> = forecast.hourly.iter().map(|h| h.temperature).collect();
        assert_eq!(temperatures, (0..8).collect::<Vec<_>>());
        assert_eq!(forecast.hourly[0].time, "12 PM");
        // Eighth sample: Tuesday 09:00.
        assert_eq!(forecast.hourly[7].time, "9 AM");
        assert_eq!(forecast.hourly[7].temperature, 7);
        assert_eq!(forecast.daily.len(), DAILY_LIMIT);
        assert_eq!(forecast.daily[0].date, "2024-01-15");
        assert_eq!(forecast.daily[4].date, "2024-01-19");
        assert!(forecast.daily.iter().all(|d| d.high >= d.low));
    }

    #[test]
    fn short_input_yields_short_outputs() {
        let samples = vec![
            sample(MONDAY, 3.0, 1.0, "Snow"),
            sample(MONDAY + 3 * HOUR, 4.0, 0.0, "Snow"),
        ];

        let forecast = aggregate(&samples, &utc());
        assert_eq!(forecast.hourly.len(), 2);
        assert_eq!(forecast.daily.len(), 1);
    }

    #[test]
    fn same_date_lands_in_one_group_regardless_of_position() {
        let samples = vec![
            sample(MONDAY + 3 * HOUR, 10.0, 5.0, "Clear"),
            sample(MONDAY + DAY, 8.0, 4.0, "Rain"),
            sample(MONDAY + 21 * HOUR, 16.0, -3.0, "Snow"),
        ];

        let forecast = aggregate(&samples, &utc());

        assert_eq!(forecast.daily.len(), 2);
        assert_eq!((forecast.daily[0].high, forecast.daily[0].low), (16, -3));
        assert_eq!(forecast.daily[0].condition, "Clear");
        assert_eq!(forecast.daily[1].condition, "Rain");
    }

    #[test]
    fn groups_keep_encounter_order_not_date_order() {
        let samples = vec![
            sample(MONDAY + DAY, 8.0, 4.0, "Rain"),
            sample(MONDAY, 10.0, 5.0, "Clear"),
        ];

        let forecast = aggregate(&samples, &utc());
        assert_eq!(forecast.daily[0].date, "2024-01-16");
        assert_eq!(forecast.daily[1].date, "2024-01-15");
    }

    #[test]
    fn calendar_date_follows_location_offset() {
        // 23:00 UTC Monday is 01:00 Tuesday at UTC+2.
        let samples = vec![
            sample(MONDAY + 20 * HOUR, 10.0, 5.0, "Clear"),
            sample(MONDAY + 23 * HOUR, 12.0, 6.0, "Clouds"),
        ];
        let options = ForecastOptions {
            utc_offset: FixedOffset::east_opt(2 * 3_600).unwrap(),
            hour_format: HourFormat::TwentyFour,
        };

        let forecast = aggregate(&samples, &options);

        assert_eq!(forecast.daily.len(), 2);
        assert_eq!(forecast.daily[1].date, "2024-01-16");
        assert_eq!(forecast.daily[1].condition, "Clouds");
        assert_eq!(forecast.hourly[0].time, "22:00");
        assert_eq!(forecast.hourly[1].time, "01:00");
    }

    #[test]
    fn hourly_labels_and_rounding() {
        let mut afternoon = sample(MONDAY + 15 * HOUR, 0.0, 0.0, "Clear");
        afternoon.temperature = 2.5;
        let mut midnight = sample(MONDAY + DAY, 0.0, 0.0, "Clear");
        midnight.temperature = -2.5;

        let forecast = aggregate(&[afternoon, midnight], &utc());

        assert_eq!(forecast.hourly[0].time, "3 PM");
        assert_eq!(forecast.hourly[0].temperature, 3);
        assert_eq!(forecast.hourly[1].time, "12 AM");
        assert_eq!(forecast.hourly[1].temperature, -2);
    }

    #[test]
    fn hour_format_parsing() {
        assert_eq!(HourFormat::parse("24"), Some(HourFormat::TwentyFour));
        assert_eq!(HourFormat::parse("12h"), Some(HourFormat::Twelve));
        assert_eq!(HourFormat::parse("noon"), None);
    }
}
