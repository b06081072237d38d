use crate::domain::model::WeatherAdvisory;

// city, temperature (°C), condition, advice
const ADVISORIES: &[(&str, f64, &str, &str)] = &[
    ("delhi", 32.0, "Hazy", "Irrigate in the evening to cut evaporation losses"),
    ("ludhiana", 28.0, "Clear", "Good window for wheat sowing"),
    ("nagpur", 35.0, "Hot", "Mulch cotton beds and avoid midday spraying"),
    ("pune", 27.0, "Partly cloudy", "Suitable for transplanting vegetables"),
    ("patna", 30.0, "Humid", "Watch rice for blast and keep fields drained"),
    ("jaipur", 36.0, "Dry", "Delay fertilizer until after irrigation"),
    ("bengaluru", 24.0, "Light rain", "Postpone pesticide application"),
    ("chennai", 31.0, "Thunderstorms", "Secure harvested produce under cover"),
];

const DEFAULT_TEMP: f64 = 25.0;
const DEFAULT_CONDITION: &str = "Sunny";
const DEFAULT_ADVICE: &str = "Good for planting";

/// Static advisory lookup; unknown cities get the generic entry.
pub fn advisory_for(city: &str) -> WeatherAdvisory {
    let wanted = city.trim().to_lowercase();
    let (temp, condition, advice) = ADVISORIES
        .iter()
        .find(|(name, ..)| *name == wanted)
        .map(|(_, temp, condition, advice)| (*temp, *condition, *advice))
        .unwrap_or((DEFAULT_TEMP, DEFAULT_CONDITION, DEFAULT_ADVICE));

    WeatherAdvisory {
        city: city.trim().to_string(),
        temp_celsius: temp,
        condition: condition.to_string(),
        advice: advice.to_string(),
    }
}
