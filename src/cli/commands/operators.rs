//! Operator listing command implementation

use super::exit_code;
use crate::anonymization::OperatorType;
use crate::service::AnonymizerService;
use clap::Args;

/// Arguments for the anonymizers / deanonymizers commands
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print one operator name per line instead of JSON
    #[arg(long)]
    pub names_only: bool,
}

impl ListArgs {
    /// Execute the listing for one direction
    pub fn execute(
        &self,
        service: &AnonymizerService,
        operator_type: OperatorType,
    ) -> anyhow::Result<i32> {
        if self.names_only {
            let operators = match operator_type {
                OperatorType::Anonymize => service.engine().anonymizers(),
                OperatorType::Deanonymize => service.engine().deanonymizers(),
            };
            for info in operators {
                println!("{}", info.name);
            }
            return Ok(0);
        }

        let response = match operator_type {
            OperatorType::Anonymize => service.anonymizers(),
            OperatorType::Deanonymize => service.deanonymizers(),
        };
        println!("{}", response.body);
        Ok(exit_code(&response))
    }
}
