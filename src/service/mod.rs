//! JSON service boundary
//!
//! [`AnonymizerService`] takes request bodies as JSON text, runs them through
//! the engine with the configured defaults and answers with a status code and
//! a JSON body. This is where request outcomes are logged; failures that are
//! not the caller's fault are reported as a generic internal error.
//!
//! # Example
//!
//! ```
//! use shroud::config::EngineConfig;
//! use shroud::service::AnonymizerService;
//!
//! # fn example() -> shroud::domain::Result<()> {
//! let service = AnonymizerService::new(&EngineConfig::default())?;
//! let response = service.anonymize(
//!     r#"{"text": "hello Emily", "analyzer_results": [{"start": 6, "end": 11, "score": 0.9, "entity_type": "PERSON"}]}"#,
//! );
//! assert_eq!(response.status, 200);
//! assert!(response.body.contains("<PERSON>"));
//! # Ok(())
//! # }
//! ```

pub mod convert;

use crate::anonymization::models::{
    EngineResult, EntitySpan, OperatorConfig, OperatorConfigs, DEFAULT_ENTITY,
};
use crate::anonymization::AnonymizerEngine;
use crate::config::{Direction, EngineConfig};
use crate::domain::{Result, ShroudError};
use crate::{log_request_complete, log_request_failed, log_request_rejected};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the health probe
pub const HEALTH_MESSAGE: &str = "Shroud anonymizer service is up";

/// Text used by [`AnonymizerService::genz_sample`]
pub const SAMPLE_TEXT: &str =
    "Please contact Emily Carter at 734-555-9284 if you have questions about the workshop registration.";

/// Status and body of one service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    /// HTTP-style status code
    pub status: u16,
    /// Response body; JSON except for the health probe
    pub body: String,
}

impl ServiceResponse {
    fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    fn from_error(operation: &str, error: &ShroudError) -> Self {
        if error.is_client_error() {
            log_request_rejected!(operation, error);
        } else {
            log_request_failed!(operation, error);
        }
        let body = serde_json::json!({ "error": error.public_message() });
        Self {
            status: error.status_code(),
            body: body.to_string(),
        }
    }

    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Body returned for every failed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Caller-facing message
    pub error: String,
}

/// Static description of the genz operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenZPreview {
    /// Example input
    pub example: String,
    /// One possible output for `example`
    #[serde(rename = "example output")]
    pub example_output: String,
    /// What the example shows
    pub description: String,
}

impl Default for GenZPreview {
    fn default() -> Self {
        Self {
            example: "Call Emily at 577-988-1234".to_string(),
            example_output: "Call GOAT at vibe check".to_string(),
            description: "Example output of genz anonymizer.".to_string(),
        }
    }
}

/// JSON front end over an [`AnonymizerEngine`]
#[derive(Debug, Clone)]
pub struct AnonymizerService {
    engine: AnonymizerEngine,
    defaults: EngineConfig,
}

impl AnonymizerService {
    /// Create a service with the built-in operators and the given defaults
    pub fn new(defaults: &EngineConfig) -> Result<Self> {
        let engine = AnonymizerEngine::new()?.with_seed(defaults.random_seed);
        Ok(Self::with_engine(engine, defaults.clone()))
    }

    /// Create a service over an existing engine
    pub fn with_engine(engine: AnonymizerEngine, defaults: EngineConfig) -> Self {
        Self { engine, defaults }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &AnonymizerEngine {
        &self.engine
    }

    /// Anonymize `{text, analyzer_results, anonymizers}`
    pub fn anonymize(&self, body: &str) -> ServiceResponse {
        respond("anonymize", || {
            let content = parse_body(body)?;
            let configs = convert::operators_from_json(content.get("anonymizers"))?;
            let spans = convert::analyzer_results_from_json(content.get("analyzer_results"))?;
            let configs = self.defaults.complete(&configs, Direction::Anonymize);
            self.engine.anonymize(text_field(&content)?, &spans, &configs)
        })
    }

    /// Deanonymize `{text, entities, deanonymizers}`
    pub fn deanonymize(&self, body: &str) -> ServiceResponse {
        respond("deanonymize", || {
            let content = parse_body(body)?;
            let entities = convert::deanonymize_entities_from_json(&content)?;
            let configs = convert::operators_from_json(content.get("deanonymizers"))?;
            let configs = self.defaults.complete(&configs, Direction::Deanonymize);
            self.engine
                .deanonymize(text_field(&content)?, &entities, &configs)
        })
    }

    /// List anonymize operators
    pub fn anonymizers(&self) -> ServiceResponse {
        json_response("anonymizers", &self.engine.anonymizers())
    }

    /// List deanonymize operators
    pub fn deanonymizers(&self) -> ServiceResponse {
        json_response("deanonymizers", &self.engine.deanonymizers())
    }

    /// Availability probe
    pub fn health(&self) -> ServiceResponse {
        ServiceResponse::ok(HEALTH_MESSAGE.to_string())
    }

    /// Fixed example of genz output
    pub fn genz_preview(&self) -> ServiceResponse {
        json_response("genz_preview", &GenZPreview::default())
    }

    /// Live genz run over [`SAMPLE_TEXT`]
    pub fn genz_sample(&self) -> ServiceResponse {
        respond("genz_sample", || {
            let spans = [
                EntitySpan::new("PERSON", 15, 27, 0.3),
                EntitySpan::new("PHONE_NUMBER", 31, 43, 0.95),
            ];
            let configs = OperatorConfigs::new().with(DEFAULT_ENTITY, OperatorConfig::new("genz"));
            self.engine.anonymize(SAMPLE_TEXT, &spans, &configs)
        })
    }
}

fn respond(operation: &str, call: impl FnOnce() -> Result<EngineResult>) -> ServiceResponse {
    let outcome = call().and_then(|result| Ok((result.items.len(), result.to_json()?)));
    match outcome {
        Ok((items, body)) => {
            log_request_complete!(operation, items);
            ServiceResponse::ok(body)
        }
        Err(error) => ServiceResponse::from_error(operation, &error),
    }
}

fn json_response<T: Serialize>(operation: &str, value: &T) -> ServiceResponse {
    match serde_json::to_string(value) {
        Ok(body) => ServiceResponse::ok(body),
        Err(error) => ServiceResponse::from_error(operation, &error.into()),
    }
}

fn parse_body(body: &str) -> Result<Value> {
    let invalid = || ShroudError::InvalidRequest("Invalid request json".to_string());
    let content: Value = serde_json::from_str(body).map_err(|_| invalid())?;
    if matches!(&content, Value::Object(map) if !map.is_empty()) {
        Ok(content)
    } else {
        Err(invalid())
    }
}

fn text_field(content: &Value) -> Result<&str> {
    match content.get("text") {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(_) => Err(ShroudError::InvalidRequest(
            "Invalid text: expected a string".to_string(),
        )),
    }
}
