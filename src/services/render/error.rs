use thiserror::Error;

/// Failures while writing blocks or operations to the output
#[derive(Debug, Error)]
pub enum RenderError {
	#[error("Output error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON encoding error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("YAML encoding error: {0}")]
	Yaml(#[from] serde_yaml::Error),

	#[error("Render task failed: {0}")]
	Task(String),
}
