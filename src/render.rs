//! Plain-text reports for the terminal.

use crate::models::{celsius_to_fahrenheit, GrowingConditions, PlantIdentification, SavedPlant};
use std::fmt::Write;

pub fn plant_summary(plant: &PlantIdentification) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", plant.name, plant.scientific_name);
    let _ = writeln!(out, "  Care difficulty: {}", plant.care_difficulty);
    let _ = writeln!(out, "  Water needs:     {}", plant.water_needs);
    let _ = writeln!(out, "  Light needs:     {}", plant.light_requirements);
    let _ = writeln!(out, "  Soil:            {}", plant.soil_type);
    out
}

pub fn care_guide(plant: &PlantIdentification) -> String {
    let care = &plant.care_instructions;
    let mut out = plant_summary(plant);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", plant.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Care guide");
    let _ = writeln!(out, "  Watering:    {}", care.watering);
    let _ = writeln!(out, "  Sunlight:    {}", care.sunlight);
    let _ = writeln!(out, "  Temperature: {}", care.temperature);
    let _ = writeln!(out, "  Humidity:    {}", care.humidity);
    let _ = writeln!(out, "  Soil:        {}", care.soil);
    out
}

pub fn conditions(conditions: &GrowingConditions) -> String {
    let t = &conditions.temperature;
    let h = &conditions.humidity;
    let l = &conditions.light;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Growing conditions: {}",
        conditions.overall_suitability
    );
    let _ = writeln!(
        out,
        "  Temperature: {:.1}°C ({:.0}°F), ideal {} -> {}",
        t.current,
        celsius_to_fahrenheit(t.current),
        t.ideal,
        t.status
    );
    let _ = writeln!(
        out,
        "  Humidity:    {:.0}%, ideal {}% -> {}",
        h.current, h.ideal, h.status
    );
    let _ = writeln!(
        out,
        "  Light:       {}, ideal {} -> {}",
        l.current, l.ideal, l.status
    );

    if !conditions.recommendations.is_empty() {
        let _ = writeln!(out, "Recommendations");
        for rec in &conditions.recommendations {
            let _ = writeln!(out, "  - {}", rec);
        }
    }
    out
}

pub fn saved_list(plants: &[SavedPlant]) -> String {
    if plants.is_empty() {
        return "No saved plants.\n".to_string();
    }

    let mut out = String::new();
    for saved in plants {
        let _ = writeln!(
            out,
            "{}  {}  {} ({})",
            saved.id,
            saved.saved_at.format("%Y-%m-%d %H:%M"),
            saved.plant.name,
            saved.plant.scientific_name
        );
    }
    out
}
