// src/tools.rs
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::protocol::{JsonRpcError, Tool};

pub const TOOL_GET_CURRENT: &str = "get_current_weather";
pub const TOOL_GET_FORECAST: &str = "get_forecast";
pub const TOOL_GET_DETAILED: &str = "get_weather_detailed";

pub const DEFAULT_FORECAST_DAYS: u8 = 3;
const MIN_FORECAST_DAYS: i64 = 1;
const MAX_FORECAST_DAYS: i64 = 3;

const LOCATION_DESCRIPTION: &str = r#"City or location name (e.g. "London", "New York", "Tokyo")"#;

/// The closed set of tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    CurrentWeather,
    Forecast,
    Detailed,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::CurrentWeather, ToolKind::Forecast, ToolKind::Detailed];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            TOOL_GET_CURRENT => Some(Self::CurrentWeather),
            TOOL_GET_FORECAST => Some(Self::Forecast),
            TOOL_GET_DETAILED => Some(Self::Detailed),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CurrentWeather => TOOL_GET_CURRENT,
            Self::Forecast => TOOL_GET_FORECAST,
            Self::Detailed => TOOL_GET_DETAILED,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CurrentWeather => {
                "Get current weather conditions for a location (one-line summary)"
            }
            Self::Forecast => "Get weather forecast for a location (text format with ASCII art)",
            Self::Detailed => {
                "Get detailed weather data in JSON format (temperature, humidity, wind, UV index, etc.)"
            }
        }
    }

    // The "inputSchema" tells the client what arguments the tool needs.
    pub fn input_schema(self) -> Value {
        let location = json!({
            "type": "string",
            "description": LOCATION_DESCRIPTION,
        });

        match self {
            Self::Forecast => json!({
                "type": "object",
                "properties": {
                    "location": location,
                    "days": {
                        "type": "integer",
                        "description": "Number of forecast days (1-3, default: 3)",
                        "default": DEFAULT_FORECAST_DAYS,
                        "minimum": MIN_FORECAST_DAYS,
                        "maximum": MAX_FORECAST_DAYS,
                    }
                },
                "required": ["location"]
            }),
            Self::CurrentWeather | Self::Detailed => json!({
                "type": "object",
                "properties": { "location": location },
                "required": ["location"]
            }),
        }
    }

    pub fn descriptor(self) -> Tool {
        Tool {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Descriptors for `tools/list`, in a stable order.
pub fn descriptors() -> Vec<Tool> {
    ToolKind::ALL.iter().map(|kind| kind.descriptor()).collect()
}

// --- ARGUMENTS ---

/// Arguments of `get_current_weather` and `get_weather_detailed`.
#[derive(Debug, Deserialize)]
pub struct LocationArgs {
    #[serde(default)]
    pub location: String,
}

/// Arguments of `get_forecast`.
#[derive(Debug, Deserialize)]
pub struct ForecastArgs {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub days: Option<i64>,
}

impl ForecastArgs {
    /// Anything outside 1..=3 falls back to the default, not to the nearest bound.
    pub fn days(&self) -> u8 {
        match self.days {
            Some(days) if (MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) => days as u8,
            _ => DEFAULT_FORECAST_DAYS,
        }
    }
}

trait HasLocation {
    fn location(&self) -> &str;
}

impl HasLocation for LocationArgs {
    fn location(&self) -> &str {
        &self.location
    }
}

impl HasLocation for ForecastArgs {
    fn location(&self) -> &str {
        &self.location
    }
}

fn parse_arguments<T>(arguments: Value) -> Result<T, JsonRpcError>
where
    T: DeserializeOwned + HasLocation,
{
    let args: T = serde_json::from_value(arguments)
        .map_err(|e| JsonRpcError::invalid_params("Invalid arguments", Some(e.to_string())))?;

    if args.location().is_empty() {
        return Err(JsonRpcError::invalid_params("location is required", None));
    }

    Ok(args)
}

impl LocationArgs {
    pub fn parse(arguments: Value) -> Result<Self, JsonRpcError> {
        parse_arguments(arguments)
    }
}

impl ForecastArgs {
    pub fn parse(arguments: Value) -> Result<Self, JsonRpcError> {
        parse_arguments(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::INVALID_PARAMS;

    #[test]
    fn names_round_trip_through_kind() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("get_weather"), None);
        assert_eq!(ToolKind::from_name(""), None);
    }

    #[test]
    fn every_descriptor_requires_location() {
        let tools = descriptors();
        assert_eq!(tools.len(), 3);
        for tool in tools {
            assert_eq!(tool.input_schema["required"], json!(["location"]), "{}", tool.name);
            assert_eq!(tool.input_schema["properties"]["location"]["type"], "string");
        }
    }

    #[test]
    fn forecast_schema_declares_day_bounds() {
        let schema = ToolKind::Forecast.input_schema();
        let days = &schema["properties"]["days"];
        assert_eq!(days["type"], "integer");
        assert_eq!(days["default"], 3);
        assert_eq!(days["minimum"], 1);
        assert_eq!(days["maximum"], 3);
        assert!(ToolKind::CurrentWeather.input_schema()["properties"]
            .get("days")
            .is_none());
    }

    #[test]
    fn days_default_to_three() {
        let args = ForecastArgs::parse(json!({"location": "Berlin"})).unwrap();
        assert_eq!(args.days(), 3);

        let args = ForecastArgs::parse(json!({"location": "Berlin", "days": null})).unwrap();
        assert_eq!(args.days(), 3);
    }

    #[test]
    fn out_of_range_days_fall_back_to_default() {
        for days in [0, -1, 4, 5, 100, i64::MIN, i64::MAX] {
            let args = ForecastArgs::parse(json!({"location": "Paris", "days": days})).unwrap();
            assert_eq!(args.days(), 3, "days={days}");
        }
    }

    #[test]
    fn in_range_days_are_kept() {
        for days in 1..=3 {
            let args = ForecastArgs::parse(json!({"location": "Tokyo", "days": days})).unwrap();
            assert_eq!(i64::from(args.days()), days);
        }
    }

    #[test]
    fn missing_or_empty_location_is_rejected() {
        let err = LocationArgs::parse(json!({})).unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);
        assert_eq!(err.message, "location is required");

        let err = ForecastArgs::parse(json!({"location": "", "days": 2})).unwrap_err();
        assert_eq!(err.message, "location is required");
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        let err = LocationArgs::parse(Value::Null).unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);
        assert_eq!(err.message, "Invalid arguments");
        assert!(err.data.is_some());

        let err = ForecastArgs::parse(json!({"location": "Oslo", "days": "two"})).unwrap_err();
        assert_eq!(err.message, "Invalid arguments");

        let err = LocationArgs::parse(json!({"location": 42})).unwrap_err();
        assert_eq!(err.message, "Invalid arguments");
    }
}
