//! Ollama API payloads used by the probes

use serde::Deserialize;
use serde_json::Value;

pub const ROOT_PATH: &str = "/";
pub const SHOW_MODEL_PATH: &str = "/api/show";
pub const LIST_MODELS_PATH: &str = "/api/list";

/// Body of `POST /api/show`
pub fn show_model_request(model_name: &str) -> Value {
    serde_json::json!({ "name": model_name })
}

/// Subset of the `/api/show` response that ends up in diagnostics.
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ShowModelResponse {
    pub modelfile: Option<String>,
    pub parameters: Option<String>,
    pub template: Option<String>,
    pub details: Option<ModelDetails>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelDetails {
    pub parameter_size: Option<String>,
    pub quantization_level: Option<String>,
    pub family: Option<String>,
    pub format: Option<String>,
}

/// Model names from a `/api/list` body, in response order.
///
/// Entries without a non-empty string `name` are skipped. Returns `None` when
/// the body is not JSON or has no `models` array.
pub fn model_names(body: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(body).ok()?;
    let models = value.get("models")?.as_array()?;

    Some(
        models
            .iter()
            .filter_map(|entry| entry.get("name").and_then(Value::as_str))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
