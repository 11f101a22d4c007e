//! Liveness predicate for the service root response

/// Marker an Ollama server prints on `GET /`
pub const DEFAULT_LIVENESS_MARKER: &str = "Ollama is running";

/// Decides whether a successful root response body means the service is alive
pub trait LivenessPredicate: Send + Sync {
    fn is_live(&self, body: &str) -> bool;
}

/// Case-insensitive substring match against a fixed marker
#[derive(Debug, Clone)]
pub struct MarkerPredicate {
    marker: String,
}

impl MarkerPredicate {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().to_lowercase(),
        }
    }
}

impl Default for MarkerPredicate {
    fn default() -> Self {
        Self::new(DEFAULT_LIVENESS_MARKER)
    }
}

impl LivenessPredicate for MarkerPredicate {
    fn is_live(&self, body: &str) -> bool {
        body.to_lowercase().contains(&self.marker)
    }
}
