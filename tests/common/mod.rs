//! Shared test double for the weather gateway.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use wttr_weather::weather::{WeatherError, WeatherGateway};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Current(String),
    Forecast(String, u8),
    Detailed(String),
}

/// Answers every lookup with a canned body (or a canned failure) and records
/// what the dispatcher asked for.
#[derive(Default)]
pub struct StubWeather {
    pub body: String,
    pub fail_status: Option<(u16, String)>,
    calls: Mutex<Vec<Call>>,
}

impl StubWeather {
    pub fn returning(body: &str) -> Self {
        Self {
            body: body.to_string(),
            ..Self::default()
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            fail_status: Some((status, body.to_string())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn answer(&self, call: Call) -> Result<String, WeatherError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_status {
            Some((status, body)) => Err(WeatherError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(self.body.clone()),
        }
    }
}

#[async_trait]
impl WeatherGateway for StubWeather {
    async fn current(&self, location: &str) -> Result<String, WeatherError> {
        self.answer(Call::Current(location.to_string()))
    }

    async fn forecast(&self, location: &str, days: u8) -> Result<String, WeatherError> {
        self.answer(Call::Forecast(location.to_string(), days))
    }

    async fn detailed(&self, location: &str) -> Result<String, WeatherError> {
        self.answer(Call::Detailed(location.to_string()))
    }
}
