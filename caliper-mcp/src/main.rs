//! Caliper MCP Server
//!
//! Tools:
//! - convert_unit: Convert a value between physical units
//! - convert_currency: Convert an amount between currencies via the rate API
//! - rate_trend: Placeholder exchange-rate trend for a currency pair
//! - list_units: List the offered unit labels and codes
//! - list_currencies: List the offered currencies
//!
//! Resources:
//! - caliper://units - The fixed unit choice table
//! - caliper://currencies - The fixed currency table

use caliper_core::CaliperError;
use caliper_currency::{
    placeholder_trend, Currency, CurrencyConverter, ExchangeRateApi, RateProvider, API_KEY_ENV,
    CURRENCIES,
};
use caliper_units::{convert, UNITS, UNIT_CHOICES};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "caliper";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

fn init_tracing() {
    // stdout carries the protocol; all diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Unit conversion works without configuration; the currency path needs
    // the rate API key and stays disabled until it is provided
    let converter = match ExchangeRateApi::from_env() {
        Ok(client) => Some(CurrencyConverter::new(client)),
        Err(e) => {
            warn!(error = %e, "currency conversion disabled");
            None
        }
    };

    info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        "caliper MCP server started"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    info!("server ready, waiting for requests");

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(error = %e, "unparseable request");
                        write_response(&McpResponse {
                            jsonrpc: "2.0".to_string(),
                            id: None,
                            result: None,
                            error: Some(McpError {
                                code: -32700,
                                message: format!("Parse error: {}", e),
                                data: None,
                            }),
                        });
                        continue;
                    }
                };

                debug!(method = %request.method, "processing request");

                let response = handle_request(converter.as_ref(), &request).await;

                // Notifications (no id) should NOT receive a response
                if request.id.is_none() {
                    debug!(method = %request.method, "notification processed");
                    continue;
                }

                write_response(&response);
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        }
    }

    info!("server shutting down");
}

/// Write one response line to stdout and flush it immediately
fn write_response(response: &McpResponse) {
    let payload = match serde_json::to_string(response) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            return;
        }
    };
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", payload) {
        error!(error = %e, "error writing response");
        return;
    }
    if let Err(e) = stdout.flush() {
        error!(error = %e, "error flushing stdout");
    }
}

async fn handle_request<P: RateProvider>(
    converter: Option<&CurrencyConverter<P>>,
    request: &McpRequest,
) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(converter, &request.params).await,

        // Resources
        "resources/list" => handle_resources_list(),
        "resources/read" => handle_resources_read(&request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit and currency converter"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            },
            "resources": {
                "subscribe": false,
                "listChanged": false
            }
        },
        "instructions": "Caliper converts physical units and currency amounts. Use list_units and list_currencies to see the supported codes; unit codes outside those tables are rejected."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "convert_unit",
                "description": "Convert a value between physical units (length, mass, time, temperature, data size, frequency).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": "number",
                            "description": "Value to convert (non-negative)"
                        },
                        "from_unit": {
                            "type": "string",
                            "description": "Source unit code (e.g., \"kg\")"
                        },
                        "to_unit": {
                            "type": "string",
                            "description": "Target unit code (e.g., \"g\")"
                        }
                    },
                    "required": ["value", "from_unit", "to_unit"]
                }
            },
            {
                "name": "convert_currency",
                "description": "Convert an amount between currencies at the latest available pair rate.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "amount": {
                            "type": "number",
                            "description": "Amount to convert (non-negative)"
                        },
                        "from_currency": {
                            "type": "string",
                            "description": "Source currency code (e.g., \"USD\")"
                        },
                        "to_currency": {
                            "type": "string",
                            "description": "Target currency code (e.g., \"EUR\")"
                        }
                    },
                    "required": ["amount", "from_currency", "to_currency"]
                }
            },
            {
                "name": "rate_trend",
                "description": "Exchange-rate trend for a currency pair. Serves placeholder data.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "from_currency": {
                            "type": "string",
                            "description": "Source currency code (default: USD)"
                        },
                        "to_currency": {
                            "type": "string",
                            "description": "Target currency code (default: PKR)"
                        }
                    }
                }
            },
            {
                "name": "list_units",
                "description": "List the offered units, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter: length, mass, time, temperature, data, frequency",
                            "enum": ["length", "mass", "time", "temperature", "data", "frequency"]
                        }
                    }
                }
            },
            {
                "name": "list_currencies",
                "description": "List the offered currencies.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    }))
}

fn handle_resources_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "resources": [
            {
                "uri": "caliper://units",
                "name": "units",
                "description": "The fixed unit choice table (labels and codes)",
                "mimeType": "application/json"
            },
            {
                "uri": "caliper://currencies",
                "name": "currencies",
                "description": "The fixed currency table (labels and codes)",
                "mimeType": "application/json"
            }
        ]
    }))
}

fn handle_resources_read(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let uri = params
        .as_ref()
        .and_then(|p| p.get("uri"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| McpError {
            code: -32602,
            message: "Missing uri parameter".to_string(),
            data: None,
        })?;

    let table = match uri {
        "caliper://units" => units_table(),
        "caliper://currencies" => currencies_table(),
        _ => {
            return Err(McpError {
                code: -32602,
                message: format!(
                    "Invalid URI: {}. Expected caliper://units or caliper://currencies",
                    uri
                ),
                data: None,
            })
        }
    };

    let text = serde_json::to_string_pretty(&table).unwrap_or_else(|_| "[]".to_string());

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": "application/json",
            "text": text
        }]
    }))
}

fn units_table() -> Vec<JsonValue> {
    UNIT_CHOICES
        .iter()
        .map(|(label, code)| json!({ "label": label, "code": code }))
        .collect()
}

fn currencies_table() -> Vec<JsonValue> {
    CURRENCIES
        .iter()
        .map(|c| json!({ "label": c.label(), "code": c.code }))
        .collect()
}

async fn handle_tool_call<P: RateProvider>(
    converter: Option<&CurrencyConverter<P>>,
    params: &Option<JsonValue>,
) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or(McpError {
        code: -32602,
        message: "Missing params".to_string(),
        data: None,
    })?;

    let name = params.get("name").and_then(|v| v.as_str()).ok_or(McpError {
        code: -32602,
        message: "Missing tool name".to_string(),
        data: None,
    })?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert_unit" => tool_convert_unit(&args),
        "convert_currency" => tool_convert_currency(converter, &args).await,
        "rate_trend" => tool_rate_trend(&args),
        "list_units" => tool_list_units(&args),
        "list_currencies" => tool_list_currencies(),
        _ => Err(McpError {
            code: -32602,
            message: format!("Unknown tool: {}", name),
            data: None,
        }),
    }
}

/// Successful tool result: rendered text plus structured fields
fn success_result(text: String, data: JsonValue) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": text }],
        "data": data,
        "isError": false
    })
}

/// Failed tool result: every failure renders as a user-facing string, the
/// process keeps serving
fn error_result(err: CaliperError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": format!("Error: {}", err) }],
        "error": err,
        "isError": true
    })
}

fn require_f64(args: &JsonValue, key: &str, tool: &str) -> Result<f64, McpError> {
    args.get(key).and_then(|v| v.as_f64()).ok_or_else(|| McpError {
        code: -32602,
        message: format!("Missing or non-numeric '{}' argument for {}", key, tool),
        data: None,
    })
}

fn require_str<'a>(args: &'a JsonValue, key: &str, tool: &str) -> Result<&'a str, McpError> {
    args.get(key).and_then(|v| v.as_str()).ok_or_else(|| McpError {
        code: -32602,
        message: format!("Missing '{}' argument for {}", key, tool),
        data: None,
    })
}

fn tool_convert_unit(args: &JsonValue) -> Result<JsonValue, McpError> {
    let value = require_f64(args, "value", "convert_unit")?;
    let from = require_str(args, "from_unit", "convert_unit")?;
    let to = require_str(args, "to_unit", "convert_unit")?;

    if value < 0.0 {
        return Ok(error_result(CaliperError::invalid_arg("value must be non-negative")));
    }

    match convert(value, from, to) {
        Ok(conversion) => Ok(success_result(
            conversion.to_string(),
            json!({
                "value": conversion.from.value,
                "from": conversion.from.unit.symbol,
                "converted": conversion.to.value,
                "to": conversion.to.unit.symbol,
            }),
        )),
        Err(e) => Ok(error_result(e.into())),
    }
}

async fn tool_convert_currency<P: RateProvider>(
    converter: Option<&CurrencyConverter<P>>,
    args: &JsonValue,
) -> Result<JsonValue, McpError> {
    let amount = require_f64(args, "amount", "convert_currency")?;
    let from = require_str(args, "from_currency", "convert_currency")?;
    let to = require_str(args, "to_currency", "convert_currency")?;

    if amount < 0.0 {
        return Ok(error_result(CaliperError::invalid_arg("amount must be non-negative")));
    }

    let Some(converter) = converter else {
        return Ok(error_result(CaliperError::missing_config(format!(
            "rate API key not configured (set {})",
            API_KEY_ENV
        ))));
    };

    match converter.convert(amount, from, to).await {
        Ok(result) => Ok(success_result(
            result.to_string(),
            json!({
                "amount": result.amount,
                "from": result.from,
                "to": result.to,
                "rate": result.rate,
                "converted": result.converted,
            }),
        )),
        Err(e) => Ok(error_result(e.into())),
    }
}

fn tool_rate_trend(args: &JsonValue) -> Result<JsonValue, McpError> {
    let from_code = args.get("from_currency").and_then(|v| v.as_str()).unwrap_or("USD");
    let to_code = args.get("to_currency").and_then(|v| v.as_str()).unwrap_or("PKR");

    let pair = Currency::resolve(from_code)
        .and_then(|from| Currency::resolve(to_code).map(|to| (from, to)));
    let (from, to) = match pair {
        Ok(p) => p,
        Err(e) => return Ok(error_result(e.into())),
    };

    let trend = placeholder_trend(from, to);
    let mut text = format!("{}/{} exchange rate trend:\n", trend.from, trend.to);
    for point in &trend.points {
        text.push_str(&format!("  {}  {}\n", point.date, point.rate));
    }

    Ok(success_result(text, json!({ "trend": trend })))
}

fn tool_list_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = args.get("category").and_then(|v| v.as_str());

    let mut lines = Vec::new();
    let mut units = Vec::new();
    for (label, code) in UNIT_CHOICES {
        let Some(unit) = UNITS.get(code) else { continue };
        if category.is_some_and(|c| unit.category != c) {
            continue;
        }
        lines.push(label.to_string());
        units.push(json!({ "label": label, "code": code, "category": unit.category }));
    }

    Ok(success_result(lines.join("\n"), json!({ "units": units })))
}

fn tool_list_currencies() -> Result<JsonValue, McpError> {
    let lines: Vec<String> = CURRENCIES.iter().map(|c| c.label()).collect();
    Ok(success_result(lines.join("\n"), json!({ "currencies": currencies_table() })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use caliper_currency::RateError;

    struct FixedRate(f64);

    #[async_trait]
    impl RateProvider for FixedRate {
        async fn pair_rate(&self, _from: &Currency, _to: &Currency) -> Result<f64, RateError> {
            Ok(self.0)
        }
    }

    fn request(method: &str, params: JsonValue) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    fn tool_call(name: &str, arguments: JsonValue) -> McpRequest {
        request("tools/call", json!({ "name": name, "arguments": arguments }))
    }

    fn no_converter() -> Option<&'static CurrencyConverter<FixedRate>> {
        None
    }

    fn result_text(result: &JsonValue) -> &str {
        result["content"][0]["text"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol() {
        let req = request("initialize", json!({ "protocolVersion": "2024-11-05" }));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let req = request("tools/list", json!({}));
        let response = handle_request(no_converter(), &req).await;
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec!["convert_unit", "convert_currency", "rate_trend", "list_units", "list_currencies"]
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let req = request("bogus/method", json!({}));
        let response = handle_request(no_converter(), &req).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_convert_unit_tool() {
        let req = tool_call("convert_unit", json!({ "value": 5.0, "from_unit": "kg", "to_unit": "g" }));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result_text(&result), "5 kg = 5000 g");
    }

    #[tokio::test]
    async fn test_convert_unit_unknown_code() {
        let req = tool_call("convert_unit", json!({ "value": 5.0, "from_unit": "xyz", "to_unit": "m" }));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "UNKNOWN_UNIT");
    }

    #[tokio::test]
    async fn test_convert_unit_incompatible() {
        let req = tool_call("convert_unit", json!({ "value": 100.0, "from_unit": "kg", "to_unit": "m" }));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "INCOMPATIBLE_DIMENSIONS");
    }

    #[tokio::test]
    async fn test_convert_unit_rejects_negative() {
        let req = tool_call("convert_unit", json!({ "value": -1.0, "from_unit": "kg", "to_unit": "g" }));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "INVALID_ARG");
    }

    #[tokio::test]
    async fn test_convert_unit_missing_arg() {
        let req = tool_call("convert_unit", json!({ "value": 1.0, "from_unit": "kg" }));
        let response = handle_request(no_converter(), &req).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_convert_currency_with_mocked_rate() {
        let converter = CurrencyConverter::new(FixedRate(2.0));
        let req = tool_call(
            "convert_currency",
            json!({ "amount": 50.0, "from_currency": "USD", "to_currency": "EUR" }),
        );
        let response = handle_request(Some(&converter), &req).await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result_text(&result), "50 USD = 100.00 EUR");
        assert_eq!(result["data"]["converted"], 100.0);
    }

    #[tokio::test]
    async fn test_convert_currency_unconfigured() {
        let req = tool_call(
            "convert_currency",
            json!({ "amount": 50.0, "from_currency": "USD", "to_currency": "EUR" }),
        );
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "MISSING_CONFIG");
    }

    #[tokio::test]
    async fn test_rate_trend_defaults() {
        let req = tool_call("rate_trend", json!({}));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["data"]["trend"]["from"], "USD");
        assert_eq!(result["data"]["trend"]["to"], "PKR");
        assert_eq!(result["data"]["trend"]["points"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_units_filtered() {
        let req = tool_call("list_units", json!({ "category": "temperature" }));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        let units = result["data"]["units"].as_array().unwrap().clone();
        assert_eq!(units.len(), 3);
        assert!(units.iter().all(|u| u["category"] == "temperature"));
    }

    #[tokio::test]
    async fn test_list_currencies_tool() {
        let req = tool_call("list_currencies", json!({}));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        let currencies = result["data"]["currencies"].as_array().unwrap().clone();
        assert_eq!(currencies.len(), 9);
        assert!(result_text(&result).contains("US Dollar (USD)"));
    }

    #[tokio::test]
    async fn test_resources_read_units() {
        let req = request("resources/read", json!({ "uri": "caliper://units" }));
        let response = handle_request(no_converter(), &req).await;
        let result = response.result.unwrap();
        let text = result["contents"][0]["text"].as_str().unwrap();
        let table: Vec<JsonValue> = serde_json::from_str(text).unwrap();
        assert_eq!(table.len(), 20);
    }
}
