//! Anonymize / deanonymize command implementation
//!
//! Both commands read a JSON request body from a file or stdin, run it
//! through the service and print the response body to stdout.

use super::exit_code;
use crate::service::AnonymizerService;
use anyhow::Context;
use clap::Args;
use std::io::Read;

/// Arguments shared by the anonymize and deanonymize commands
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Request JSON file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,
}

impl RequestArgs {
    /// Execute the anonymize command
    pub fn execute_anonymize(&self, service: &AnonymizerService) -> anyhow::Result<i32> {
        let body = self.read_body()?;
        let response = service.anonymize(&body);
        println!("{}", response.body);
        Ok(exit_code(&response))
    }

    /// Execute the deanonymize command
    pub fn execute_deanonymize(&self, service: &AnonymizerService) -> anyhow::Result<i32> {
        let body = self.read_body()?;
        let response = service.deanonymize(&body);
        println!("{}", response.body);
        Ok(exit_code(&response))
    }

    fn read_body(&self) -> anyhow::Result<String> {
        if self.input == "-" {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read request from stdin")?;
            Ok(body)
        } else {
            std::fs::read_to_string(&self.input)
                .with_context(|| format!("Failed to read request file {}", self.input))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_body_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"text": "hi"}"#).unwrap();
        file.flush().unwrap();

        let args = RequestArgs {
            input: file.path().to_string_lossy().to_string(),
        };
        assert_eq!(args.read_body().unwrap(), r#"{"text": "hi"}"#);
    }

    #[test]
    fn test_missing_input_file() {
        let args = RequestArgs {
            input: "/nonexistent/request.json".to_string(),
        };
        let service = AnonymizerService::new(&EngineConfig::default()).unwrap();
        assert!(args.execute_anonymize(&service).is_err());
    }

    #[test]
    fn test_rejected_request_exit_code() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        file.flush().unwrap();

        let args = RequestArgs {
            input: file.path().to_string_lossy().to_string(),
        };
        let service = AnonymizerService::new(&EngineConfig::default()).unwrap();
        assert_eq!(args.execute_deanonymize(&service).unwrap(), 1);
    }
}
