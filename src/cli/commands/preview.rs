//! Preview and health command implementations

use super::exit_code;
use crate::service::AnonymizerService;
use clap::Args;

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {}

impl PreviewArgs {
    /// Print the fixed genz example followed by a live sample
    pub fn execute(&self, service: &AnonymizerService) -> anyhow::Result<i32> {
        let preview = service.genz_preview();
        println!("{}", preview.body);

        let sample = service.genz_sample();
        println!("{}", sample.body);

        Ok(exit_code(&preview).max(exit_code(&sample)))
    }
}

/// Arguments for the health command
#[derive(Args, Debug)]
pub struct HealthArgs {}

impl HealthArgs {
    /// Print the availability message
    pub fn execute(&self, service: &AnonymizerService) -> anyhow::Result<i32> {
        let response = service.health();
        println!("{}", response.body);
        Ok(exit_code(&response))
    }
}
