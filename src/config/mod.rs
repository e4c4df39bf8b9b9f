//! Configuration for the adaptive learning process
//!
//! The schema is closed: a mapping carrying any key outside the declared
//! field set is rejected during validation, never silently ignored. All
//! numeric bounds are enforced before a config instance is handed back,
//! so a constructed [`AlpConfig`] always satisfies its invariants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Top-level fields accepted by the closed schema
const TOP_LEVEL_FIELDS: &[&str] = &[
    "learning_algorithm",
    "iteration_config",
    "hyperparameters",
    "model_architecture",
    "logging_level",
    "performance_metrics",
    "random_seed",
    "custom_parameters",
];

/// Supported learning algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LearningAlgorithm {
    GradientDescent,
    #[default]
    Adam,
    StochasticGradientDescent,
    Reinforcement,
}

impl LearningAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            LearningAlgorithm::GradientDescent => "gradient_descent",
            LearningAlgorithm::Adam => "adam",
            LearningAlgorithm::StochasticGradientDescent => "stochastic_gradient_descent",
            LearningAlgorithm::Reinforcement => "reinforcement",
        }
    }
}

/// Logging verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoggingLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LoggingLevel {
    pub fn name(&self) -> &'static str {
        match self {
            LoggingLevel::Debug => "DEBUG",
            LoggingLevel::Info => "INFO",
            LoggingLevel::Warning => "WARNING",
            LoggingLevel::Error => "ERROR",
            LoggingLevel::Critical => "CRITICAL",
        }
    }
}

/// Iteration control settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IterationConfig {
    /// Maximum number of iterations before the loop stops
    pub max_iterations: u64,
    /// Early stopping threshold on the tracked metric
    pub early_stopping_tolerance: f64,
    /// Gradient clipping value, unclipped when unset
    pub gradient_clip_value: Option<f64>,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            early_stopping_tolerance: 1e-4,
            gradient_clip_value: None,
        }
    }
}

impl IterationConfig {
    fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(bound_violation(
                "iteration_config.max_iterations",
                "must be greater than 0",
                self.max_iterations,
            ));
        }
        if self.early_stopping_tolerance < 0.0 {
            return Err(bound_violation(
                "iteration_config.early_stopping_tolerance",
                "must be greater than or equal to 0",
                self.early_stopping_tolerance,
            ));
        }
        if let Some(clip) = self.gradient_clip_value {
            if clip < 0.0 {
                return Err(bound_violation(
                    "iteration_config.gradient_clip_value",
                    "must be greater than or equal to 0",
                    clip,
                ));
            }
        }
        Ok(())
    }
}

/// Hyperparameter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HyperparameterConfig {
    /// Learning rate for optimization
    pub learning_rate: f64,
    /// Batch size for training
    pub batch_size: u64,
    /// Regularization strength
    pub regularization_lambda: f64,
}

impl Default for HyperparameterConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            batch_size: 32,
            regularization_lambda: 0.01,
        }
    }
}

impl HyperparameterConfig {
    fn validate(&self) -> Result<()> {
        if self.learning_rate <= 0.0 {
            return Err(bound_violation(
                "hyperparameters.learning_rate",
                "must be greater than 0",
                self.learning_rate,
            ));
        }
        if self.batch_size == 0 {
            return Err(bound_violation(
                "hyperparameters.batch_size",
                "must be greater than 0",
                self.batch_size,
            ));
        }
        if self.regularization_lambda < 0.0 {
            return Err(bound_violation(
                "hyperparameters.regularization_lambda",
                "must be greater than or equal to 0",
                self.regularization_lambda,
            ));
        }
        Ok(())
    }
}

/// Model architecture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelArchitecture {
    /// Sizes of hidden layers, in order
    pub hidden_layers: Vec<u64>,
    /// Activation function for hidden layers
    pub activation_function: String,
    /// Dropout rate for regularization, in [0, 1)
    pub dropout_rate: f64,
}

impl Default for ModelArchitecture {
    fn default() -> Self {
        Self {
            hidden_layers: vec![64, 32],
            activation_function: "relu".to_string(),
            dropout_rate: 0.2,
        }
    }
}

impl ModelArchitecture {
    fn validate(&self) -> Result<()> {
        for (i, &size) in self.hidden_layers.iter().enumerate() {
            if size == 0 {
                return Err(bound_violation(
                    &format!("model_architecture.hidden_layers[{}]", i),
                    "must be greater than 0",
                    size,
                ));
            }
        }
        if !(0.0..1.0).contains(&self.dropout_rate) {
            return Err(bound_violation(
                "model_architecture.dropout_rate",
                "must be in [0, 1)",
                self.dropout_rate,
            ));
        }
        Ok(())
    }
}

/// Validated configuration for an adaptive learning process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlpConfig {
    /// Primary learning algorithm
    pub learning_algorithm: LearningAlgorithm,
    /// Iteration control settings
    pub iteration_config: IterationConfig,
    /// Hyperparameter settings
    pub hyperparameters: HyperparameterConfig,
    /// Model architecture settings
    pub model_architecture: ModelArchitecture,
    /// Logging verbosity
    pub logging_level: LoggingLevel,
    /// Performance metrics to track
    pub performance_metrics: Vec<String>,
    /// Random seed for reproducibility
    pub random_seed: Option<i64>,
    /// Additional custom parameters
    pub custom_parameters: Option<Map<String, Value>>,
}

impl Default for AlpConfig {
    fn default() -> Self {
        Self {
            learning_algorithm: LearningAlgorithm::default(),
            iteration_config: IterationConfig::default(),
            hyperparameters: HyperparameterConfig::default(),
            model_architecture: ModelArchitecture::default(),
            logging_level: LoggingLevel::default(),
            performance_metrics: default_metrics(),
            random_seed: None,
            custom_parameters: None,
        }
    }
}

fn default_metrics() -> Vec<String> {
    vec!["accuracy".to_string(), "loss".to_string()]
}

/// Input accepted by [`validate`]: either an untyped JSON value or a
/// configuration that already passed validation.
#[derive(Debug, Clone)]
pub enum ConfigInput {
    Raw(Value),
    Validated(AlpConfig),
}

impl From<Value> for ConfigInput {
    fn from(value: Value) -> Self {
        ConfigInput::Raw(value)
    }
}

impl From<AlpConfig> for ConfigInput {
    fn from(config: AlpConfig) -> Self {
        ConfigInput::Validated(config)
    }
}

/// Validate a configuration input.
///
/// A raw JSON object is checked against the closed schema, filled with
/// defaults, and bound-checked; any violation surfaces as
/// [`Error::Validation`] naming the offending field. A raw value that is
/// not an object fails with [`Error::ConfigType`]. An already-validated
/// config passes through unchanged.
pub fn validate(input: impl Into<ConfigInput>) -> Result<AlpConfig> {
    match input.into() {
        ConfigInput::Validated(config) => Ok(config),
        ConfigInput::Raw(Value::Object(map)) => validate_mapping(&map),
        ConfigInput::Raw(other) => Err(Error::ConfigType(json_type_name(&other).to_string())),
    }
}

fn validate_mapping(map: &Map<String, Value>) -> Result<AlpConfig> {
    // Closed schema: reject unrecognized top-level keys explicitly.
    for key in map.keys() {
        if !TOP_LEVEL_FIELDS.contains(&key.as_str()) {
            return Err(Error::Validation {
                field: key.clone(),
                constraint: "unrecognized field".to_string(),
                value: map[key].to_string(),
            });
        }
    }

    // custom_parameters category check runs before any other field validation.
    if let Some(params) = map.get("custom_parameters") {
        if !params.is_null() && !params.is_object() {
            return Err(Error::Validation {
                field: "custom_parameters".to_string(),
                constraint: "must be a dictionary".to_string(),
                value: json_type_name(params).to_string(),
            });
        }
    }

    let config = AlpConfig {
        learning_algorithm: field(map, "learning_algorithm", LearningAlgorithm::default())?,
        iteration_config: field(map, "iteration_config", IterationConfig::default())?,
        hyperparameters: field(map, "hyperparameters", HyperparameterConfig::default())?,
        model_architecture: field(map, "model_architecture", ModelArchitecture::default())?,
        logging_level: field(map, "logging_level", LoggingLevel::default())?,
        performance_metrics: field(map, "performance_metrics", default_metrics())?,
        random_seed: field(map, "random_seed", None)?,
        custom_parameters: field(map, "custom_parameters", None)?,
    };

    config.iteration_config.validate()?;
    config.hyperparameters.validate()?;
    config.model_architecture.validate()?;

    Ok(config)
}

/// Deserialize one top-level field, falling back to its default when
/// absent or null. Failures are attributed to the field by name.
fn field<T: serde::de::DeserializeOwned>(
    map: &Map<String, Value>,
    name: &str,
    default: T,
) -> Result<T> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| Error::Validation {
            field: name.to_string(),
            constraint: e.to_string(),
            value: value.to_string(),
        }),
    }
}

fn bound_violation(field: &str, constraint: &str, value: impl std::fmt::Display) -> Error {
    Error::Validation {
        field: field.to_string(),
        constraint: constraint.to_string(),
        value: value.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_configuration() {
        let config = AlpConfig::default();

        assert_eq!(config.learning_algorithm, LearningAlgorithm::Adam);
        assert_eq!(config.logging_level, LoggingLevel::Info);
        assert_eq!(config.performance_metrics, vec!["accuracy", "loss"]);
        assert_eq!(config.random_seed, None);
        assert_eq!(config.iteration_config.max_iterations, 1000);
        assert_eq!(config.hyperparameters.batch_size, 32);
        assert_eq!(config.model_architecture.hidden_layers, vec![64, 32]);
    }

    #[test]
    fn empty_mapping_yields_defaults() {
        let config = validate(json!({})).expect("empty mapping is valid");
        assert_eq!(config, AlpConfig::default());
    }

    #[test]
    fn custom_configuration() {
        let config = validate(json!({
            "learning_algorithm": "stochastic_gradient_descent",
            "logging_level": "DEBUG",
            "performance_metrics": ["f1_score"],
            "random_seed": 42,
            "iteration_config": {
                "max_iterations": 500,
                "early_stopping_tolerance": 1e-3
            }
        }))
        .expect("valid config");

        assert_eq!(
            config.learning_algorithm,
            LearningAlgorithm::StochasticGradientDescent
        );
        assert_eq!(config.logging_level, LoggingLevel::Debug);
        assert_eq!(config.performance_metrics, vec!["f1_score"]);
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.iteration_config.max_iterations, 500);
        assert_eq!(config.iteration_config.early_stopping_tolerance, 1e-3);
        // Unspecified sections keep their defaults
        assert_eq!(config.hyperparameters, HyperparameterConfig::default());
    }

    #[test]
    fn partial_hyperparameters_fill_defaults() {
        let config = validate(json!({
            "learning_algorithm": "gradient_descent",
            "hyperparameters": {
                "learning_rate": 0.001,
                "batch_size": 64
            }
        }))
        .expect("valid config");

        assert_eq!(config.learning_algorithm, LearningAlgorithm::GradientDescent);
        assert_eq!(config.hyperparameters.learning_rate, 0.001);
        assert_eq!(config.hyperparameters.batch_size, 64);
        assert_eq!(config.hyperparameters.regularization_lambda, 0.01);
    }

    #[test]
    fn validated_passthrough_is_identity() {
        let config = validate(json!({ "random_seed": 7 })).expect("valid config");
        let again = validate(config.clone()).expect("passthrough");
        assert_eq!(config, again);
    }

    #[test]
    fn non_mapping_input_is_a_type_error() {
        let err = validate(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::ConfigType(ref t) if t == "array"));

        let err = validate(json!("adam")).unwrap_err();
        assert!(matches!(err, Error::ConfigType(ref t) if t == "string"));
    }

    #[test]
    fn unrecognized_top_level_key_is_rejected() {
        let err = validate(json!({ "learning_algo": "adam" })).unwrap_err();
        match err {
            Error::Validation { field, constraint, .. } => {
                assert_eq!(field, "learning_algo");
                assert_eq!(constraint, "unrecognized field");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_nested_key_is_rejected() {
        let err = validate(json!({
            "iteration_config": { "max_iterations": 10, "bogus": 1 }
        }))
        .unwrap_err();
        match err {
            Error::Validation { field, constraint, .. } => {
                assert_eq!(field, "iteration_config");
                assert!(constraint.contains("unknown field"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn zero_max_iterations_is_rejected() {
        let err = validate(json!({
            "iteration_config": { "max_iterations": 0 }
        }))
        .unwrap_err();
        match err {
            Error::Validation { field, constraint, .. } => {
                assert_eq!(field, "iteration_config.max_iterations");
                assert_eq!(constraint, "must be greater than 0");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn negative_learning_rate_is_rejected() {
        let err = validate(json!({
            "hyperparameters": { "learning_rate": -0.1 }
        }))
        .unwrap_err();
        match err {
            Error::Validation { field, constraint, .. } => {
                assert_eq!(field, "hyperparameters.learning_rate");
                assert_eq!(constraint, "must be greater than 0");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn dropout_rate_of_one_is_rejected() {
        let err = validate(json!({
            "model_architecture": { "dropout_rate": 1.0 }
        }))
        .unwrap_err();
        assert!(
            matches!(err, Error::Validation { ref field, .. } if field == "model_architecture.dropout_rate")
        );
    }

    #[test]
    fn zero_hidden_layer_is_rejected() {
        let err = validate(json!({
            "model_architecture": { "hidden_layers": [64, 0, 16] }
        }))
        .unwrap_err();
        assert!(
            matches!(err, Error::Validation { ref field, .. } if field == "model_architecture.hidden_layers[1]")
        );
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = validate(json!({ "learning_algorithm": "simulated_annealing" })).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "learning_algorithm"));
    }

    #[test]
    fn custom_parameters_accepts_a_mapping() {
        let config = validate(json!({
            "custom_parameters": { "experimental_feature": true }
        }))
        .expect("valid config");

        let params = config.custom_parameters.expect("params set");
        assert_eq!(params["experimental_feature"], json!(true));
    }

    #[test]
    fn custom_parameters_rejects_non_mapping_values() {
        for bad in [json!("not a dictionary"), json!([1, 2]), json!(3.5)] {
            let err = validate(json!({ "custom_parameters": bad })).unwrap_err();
            match err {
                Error::Validation { field, constraint, .. } => {
                    assert_eq!(field, "custom_parameters");
                    assert_eq!(constraint, "must be a dictionary");
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn enum_names_round_trip() {
        assert_eq!(LearningAlgorithm::Adam.name(), "adam");
        assert_eq!(
            LearningAlgorithm::StochasticGradientDescent.name(),
            "stochastic_gradient_descent"
        );
        assert_eq!(LoggingLevel::Warning.name(), "WARNING");

        let parsed: LearningAlgorithm = serde_json::from_value(json!("gradient_descent")).unwrap();
        assert_eq!(parsed, LearningAlgorithm::GradientDescent);
    }
}
