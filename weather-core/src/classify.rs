//! Heuristics that turn free-text provider conditions into display categories.
//!
//! All matching is a case-insensitive substring test on the condition text.

use std::fmt;

use serde::Serialize;

/// Icon category for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rain,
    Snow,
    Cloud,
    Night,
    Clear,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rain => "rain",
            Category::Snow => "snow",
            Category::Cloud => "cloud",
            Category::Night => "night",
            Category::Clear => "clear",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background theme for the whole dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    NightGradient,
    RainyGradient,
    CloudyGradient,
    SunnyGradient,
}

impl ThemeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::NightGradient => "night-gradient",
            ThemeId::RainyGradient => "rainy-gradient",
            ThemeId::CloudyGradient => "cloudy-gradient",
            ThemeId::SunnyGradient => "sunny-gradient",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ambient particle effect shown over the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Rain,
    Snow,
    Clouds,
    Clear,
}

/// Qualitative band for a UV index reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn label(&self) -> &'static str {
        match self {
            UvLevel::Low => "Low",
            UvLevel::Moderate => "Moderate",
            UvLevel::High => "High",
            UvLevel::VeryHigh => "Very High",
            UvLevel::Extreme => "Extreme",
        }
    }
}

fn is_wet(condition: &str) -> bool {
    condition.contains("rain") || condition.contains("drizzle")
}

/// Precipitation/cloud category, if the condition text names one.
fn weather_category(condition: &str) -> Option<Category> {
    let condition = condition.to_lowercase();
    if is_wet(&condition) {
        Some(Category::Rain)
    } else if condition.contains("snow") {
        Some(Category::Snow)
    } else if condition.contains("cloud") {
        Some(Category::Cloud)
    } else {
        None
    }
}

/// Icon category for current and hourly conditions.
///
/// Cloud is tested before the night flag, so `("Clouds", "04n")` is
/// [`Category::Cloud`].
pub fn classify_icon(condition: &str, icon: &str) -> Category {
    weather_category(condition).unwrap_or(if icon.contains('n') {
        Category::Night
    } else {
        Category::Clear
    })
}

/// Icon category for the daily list, which has no night variant.
pub fn classify_daily_icon(condition: &str) -> Category {
    weather_category(condition).unwrap_or(Category::Clear)
}

/// Background theme from the condition and the viewer's wall-clock hour.
///
/// Night here is decided by `local_hour` alone, not by the provider's
/// day/night icon flag used in [`classify_icon`].
pub fn classify_theme(condition: Option<&str>, local_hour: u32) -> ThemeId {
    let Some(condition) = condition else {
        return ThemeId::SunnyGradient;
    };

    if !(6..=18).contains(&local_hour) {
        return ThemeId::NightGradient;
    }

    let condition = condition.to_lowercase();
    if is_wet(&condition) {
        ThemeId::RainyGradient
    } else if condition.contains("cloud") || condition.contains("snow") {
        ThemeId::CloudyGradient
    } else {
        ThemeId::SunnyGradient
    }
}

pub fn classify_particles(condition: Option<&str>) -> ParticleKind {
    let Some(condition) = condition else {
        return ParticleKind::Clear;
    };

    match weather_category(condition) {
        Some(Category::Rain) => ParticleKind::Rain,
        Some(Category::Snow) => ParticleKind::Snow,
        Some(Category::Cloud) => ParticleKind::Clouds,
        _ => ParticleKind::Clear,
    }
}

pub fn uv_level(index: f64) -> UvLevel {
    if index <= 2.0 {
        UvLevel::Low
    } else if index <= 5.0 {
        UvLevel::Moderate
    } else if index <= 7.0 {
        UvLevel::High
    } else if index <= 10.0 {
        UvLevel::VeryHigh
    } else {
        UvLevel::Extreme
    }
}
