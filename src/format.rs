//! Display formatting driven by the user's unit preference.
//! Values are formatted as stored; no unit conversion happens here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
  #[default]
  Kg,
  Lb,
}

impl WeightUnit {
  pub fn label(&self) -> &'static str {
    match self {
      WeightUnit::Kg => "kg",
      WeightUnit::Lb => "lb",
    }
  }
}

impl std::str::FromStr for WeightUnit {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "kg" | "kgs" => Ok(Self::Kg),
      "lb" | "lbs" => Ok(Self::Lb),
      _ => Err(format!("Unknown weight unit: {}", s)),
    }
  }
}

/// "82.5 kg", "100 lb" (at most two decimals, trailing zeros dropped)
pub fn format_weight(weight: f64, unit: WeightUnit) -> String {
  let rounded = format!("{:.2}", weight);
  let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
  format!("{} {}", trimmed, unit.label())
}

/// Whole units with thousands separators: "12,345 kg"
pub fn format_volume(volume: f64, unit: WeightUnit) -> String {
  let whole = volume.round() as i64;
  let digits = whole.unsigned_abs().to_string();

  let mut grouped = String::new();
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }

  let sign = if whole < 0 { "-" } else { "" };
  format!("{}{} {}", sign, grouped, unit.label())
}

/// "1h 05m", "45m", "30s"
pub fn format_duration(seconds: i64) -> String {
  let seconds = seconds.max(0);
  let hours = seconds / 3600;
  let minutes = (seconds % 3600) / 60;

  match (hours, minutes) {
    (0, 0) => format!("{}s", seconds),
    (0, m) => format!("{}m", m),
    (h, m) => format!("{}h {:02}m", h, m),
  }
}
