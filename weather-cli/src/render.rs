//! Plain-text rendering of dashboard views.

use std::fmt::Write;

use weather_core::{Category, Coordinates, DashboardView, Location, Units};

fn glyph(category: Category) -> &'static str {
    match category {
        Category::Rain => "🌧",
        Category::Snow => "🌨",
        Category::Cloud => "☁",
        Category::Night => "🌙",
        Category::Clear => "☀",
    }
}

pub fn dashboard(view: &DashboardView) -> String {
    let current = &view.current;
    let unit = view.unit_symbol;
    let mut out = String::new();

    let _ = writeln!(out, "{}  [{}]", current.location, view.theme);
    let _ = writeln!(
        out,
        "{} {}{}  {} ({})",
        glyph(current.category),
        current.temperature,
        unit,
        current.condition,
        current.description,
    );
    let _ = writeln!(
        out,
        "Feels like {}{} · Humidity {}% · Wind {} km/h",
        current.feels_like,
        unit,
        current.humidity,
        current.wind_speed,
    );
    let _ = writeln!(
        out,
        "Visibility {} km · Pressure {} hPa · UV {} ({})",
        current.visibility.round(),
        current.pressure.round(),
        current.uv_index,
        current.uv_level.label(),
    );

    if !view.hourly.is_empty() {
        let _ = writeln!(out, "\n24-Hour Forecast");
        for hour in &view.hourly {
            let _ = writeln!(
                out,
                "  {:>6}  {} {}°",
                hour.time,
                glyph(hour.category),
                hour.temperature
            );
        }
    }

    if !view.daily.is_empty() {
        let _ = writeln!(out, "\n5-Day Forecast");
        for day in &view.daily {
            let _ = writeln!(
                out,
                "  {:<4} {} {:<24} {}° / {}°",
                day.day,
                glyph(day.category),
                day.description,
                day.high,
                day.low,
            );
        }
    }

    out
}

/// Footer naming the selected coordinates, units and last update time.
pub fn status(coords: Coordinates, units: Units, updated: &str) -> String {
    format!("\n({:.4}, {:.4}) · {} · updated {}", coords.lat, coords.lon, units, updated)
}

pub fn locations(hits: &[Location]) -> String {
    if hits.is_empty() {
        return "No locations found.\n".to_string();
    }

    hits.iter()
        .map(|hit| format!("{}  ({:.4}, {:.4})\n", hit.display_name, hit.lat, hit.lon))
        .collect()
}
