//! Response fixtures modeled on real Ollama payloads

use serde_json::{Value, json};

pub const LIVENESS_BODY: &str = "Ollama is running";

/// `/api/show` body for a pulled model
pub fn show_model_body(parameter_size: &str, quantization: &str) -> Value {
    json!({
        "license": "LLAMA 3 COMMUNITY LICENSE AGREEMENT",
        "modelfile": "# Modelfile generated by \"ollama show\"\nFROM llama3:latest",
        "parameters": "stop \"<|start_header_id|>\"\nstop \"<|end_header_id|>\"",
        "template": "{{ if .System }}<|start_header_id|>system<|end_header_id|>{{ .System }}{{ end }}",
        "details": {
            "parent_model": "",
            "format": "gguf",
            "family": "llama",
            "families": ["llama"],
            "parameter_size": parameter_size,
            "quantization_level": quantization
        }
    })
}

/// `/api/list` body with the given model names
pub fn list_models_body(names: &[&str]) -> Value {
    let models: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "modified_at": "2024-05-01T10:00:00Z",
                "size": 4_661_224_676_u64,
                "digest": "365c0bd3c000a25d28ddbf732fe1c6add414de7275464c4e4d1c3b5fcb5d8ad1"
            })
        })
        .collect();
    json!({ "models": models })
}
