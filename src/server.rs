// src/server.rs
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ResponseResult, ServerInfo, PROTOCOL_VERSION,
};
use crate::tools::{self, ForecastArgs, LocationArgs, ToolKind};
use crate::weather::WeatherGateway;

pub const SERVER_NAME: &str = "wttr-weather";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Turns one inbound line into at most one reply. Holds no per-message state.
pub struct Server<G> {
    weather: G,
}

impl<G: WeatherGateway> Server<G> {
    pub fn new(weather: G) -> Self {
        Self { weather }
    }

    pub fn weather(&self) -> &G {
        &self.weather
    }

    /// Parse, dispatch and shape a reply. `None` means nothing goes on the wire.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        // 1. PARSE
        let request = match parse_request(line) {
            Ok(req) => req,
            Err(detail) => {
                warn!(error = %detail, "Rejecting malformed message");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(detail),
                ));
            }
        };

        // 2. ROUTE
        let is_notification = request.is_notification();
        let response = self.handle_request(request).await;

        // 3. RESPOND (notifications never get one)
        if is_notification {
            if response.is_some() {
                debug!("Dropping reply to notification");
            }
            return None;
        }
        response
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, id = ?request.id, "Dispatching");
        let id = request.id.unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => Some(JsonRpcResponse::success(id, self.initialize())),
            "initialized" | "notifications/initialized" => None,
            "tools/list" => Some(JsonRpcResponse::success(
                id,
                ResponseResult::ListTools(ListToolsResult {
                    tools: tools::descriptors(),
                }),
            )),
            "tools/call" => Some(self.handle_tools_call(id, request.params).await),
            other => {
                warn!(method = %other, "Unknown method");
                Some(JsonRpcResponse::failure(id, JsonRpcError::method_not_found()))
            }
        }
    }

    fn initialize(&self) -> ResponseResult {
        ResponseResult::Initialize(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: json!({ "tools": {} }),
        })
    }

    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params.unwrap_or(Value::Null)) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_params("Invalid params", Some(e.to_string())),
                )
            }
        };

        let Some(tool) = ToolKind::from_name(&params.name) else {
            return JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name), None),
            );
        };

        match self.call_tool(tool, params.arguments).await {
            Ok(result) => JsonRpcResponse::success(id, ResponseResult::CallTool(result)),
            Err(err) => JsonRpcResponse::failure(id, err),
        }
    }

    /// `Err` is a protocol failure (bad arguments). Upstream failures come back
    /// as `Ok` with the in-band error flag set.
    pub async fn call_tool(
        &self,
        tool: ToolKind,
        arguments: Value,
    ) -> Result<CallToolResult, JsonRpcError> {
        let outcome = match tool {
            ToolKind::CurrentWeather => {
                let args = LocationArgs::parse(arguments)?;
                self.weather.current(&args.location).await
            }
            ToolKind::Forecast => {
                let args = ForecastArgs::parse(arguments)?;
                self.weather.forecast(&args.location, args.days()).await
            }
            ToolKind::Detailed => {
                let args = LocationArgs::parse(arguments)?;
                self.weather.detailed(&args.location).await
            }
        };

        Ok(match outcome {
            Ok(body) => CallToolResult::text(body),
            Err(e) => {
                warn!(tool = tool.name(), error = %e, "Weather lookup failed");
                CallToolResult::error(format!("Error: {}", e))
            }
        })
    }
}

// Only a JSON object is a message; arrays and scalars are malformed input.
fn parse_request(line: &str) -> Result<JsonRpcRequest, String> {
    let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("message must be a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}
