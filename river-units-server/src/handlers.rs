//! Request dispatch

use river_units::{parse_conversion, Conversion, Unit, UNITS};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::config::ServerConfig;
use crate::protocol::{RpcError, RpcRequest, RpcResponse};

pub const SERVER_NAME: &str = "river-units";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const METHODS: [&str; 6] = [
    "initialize",
    "ping",
    "units/list",
    "units/check",
    "units/compare",
    "units/convert",
];

#[derive(Debug, Deserialize)]
struct CheckParams {
    unit: String,
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    from: Option<String>,
    to: Option<String>,
    conversion: Option<String>,
    value: Option<f64>,
    values: Option<Vec<f64>>,
}

fn params<T: for<'de> Deserialize<'de>>(params: &Option<JsonValue>) -> Result<T, RpcError> {
    let value = params.clone().unwrap_or(JsonValue::Null);
    serde_json::from_value(value).map_err(|e| RpcError::invalid_params(e.to_string()))
}

pub fn handle_request(config: &ServerConfig, request: &RpcRequest) -> RpcResponse {
    let result = match request.method.as_str() {
        "initialize" => Ok(handle_initialize()),
        "initialized" | "ping" => Ok(json!({})),
        "units/list" => Ok(handle_list()),
        "units/check" => handle_check(&request.params),
        "units/compare" => handle_compare(&request.params),
        "units/convert" => handle_convert(config, &request.params),
        _ => Err(RpcError::method_not_found(&request.method)),
    };

    if let Err(ref e) = result {
        tracing::debug!(
            method = %request.method,
            code = e.tag().unwrap_or("UNKNOWN"),
            error = %e.message,
            "request failed"
        );
    }

    RpcResponse::new(request.id.clone(), result)
}

fn handle_initialize() -> JsonValue {
    json!({
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Compound unit validation and scale factors"
        },
        "methods": METHODS,
    })
}

fn handle_list() -> JsonValue {
    let families: Vec<JsonValue> = UNITS
        .families()
        .map(|(family, symbols)| {
            json!({
                "family": family,
                "base": family.base_symbol(),
                "symbols": symbols,
            })
        })
        .collect();
    json!({ "families": families })
}

fn handle_check(raw: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let p: CheckParams = params(raw)?;
    Ok(match Unit::from_string(&p.unit) {
        Ok(unit) => json!({ "valid": true, "unit": unit }),
        Err(e) => json!({ "valid": false, "error": e.to_string() }),
    })
}

fn handle_compare(raw: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let p: CompareParams = params(raw)?;
    let from = Unit::from_string(&p.from)?;
    let to = Unit::from_string(&p.to)?;
    Ok(json!({ "sameFamily": from.same_family(&to) }))
}

fn handle_convert(config: &ServerConfig, raw: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let p: ConvertParams = params(raw)?;

    let (from, to) = match (p.conversion, p.from, p.to) {
        (Some(spec), None, None) => parse_conversion(&spec)?,
        (None, Some(from), Some(to)) => (Unit::from_string(&from)?, Unit::from_string(&to)?),
        _ => {
            return Err(RpcError::invalid_params(
                "expected either 'conversion' or both 'from' and 'to'",
            ))
        }
    };

    let conversion = Conversion::new(&from, &to)?;
    let mut result = json!({
        "from": conversion.from(),
        "to": conversion.to(),
        "scale": conversion.scale(),
    });

    // serde_json writes inf and NaN as null
    if let Some(value) = p.value {
        let converted = conversion.apply(value);
        if !converted.is_finite() {
            return Err(RpcError::non_finite(None));
        }
        result["value"] = json!(converted);
    }

    // Bounds the response; request size is capped by the line limit
    if let Some(mut values) = p.values {
        if values.len() > config.max_batch {
            return Err(RpcError::batch_too_large(values.len(), config.max_batch));
        }
        conversion.apply_slice(&mut values);
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(RpcError::non_finite(Some(index)));
        }
        result["values"] = json!(values);
    }

    Ok(result)
}
