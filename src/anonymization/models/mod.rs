//! Anonymization data models

pub mod entity;
pub mod operator_config;

pub use entity::{AnonymizedEntity, AnonymizerResult, DeanonymizeResult, EngineResult, EntitySpan};
pub use operator_config::{
    OperatorConfig, OperatorConfigs, OperatorParams, DEFAULT_ENTITY, ENTITY_TYPE_PARAM,
};
