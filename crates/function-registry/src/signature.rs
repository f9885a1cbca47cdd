// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Function signature metadata

use serde::Serialize;

use crate::{Arity, FunctionId};

/// Function classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FunctionType {
    Scalar,
    Aggregate,
}

/// Descriptive metadata for a builtin function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSignature {
    /// Function identity
    pub function: FunctionId,
    /// Parameter names; a trailing `?` marks an optional parameter, `...` a variadic one
    pub parameters: Vec<&'static str>,
    /// Function type (scalar, aggregate)
    pub function_type: FunctionType,
    /// Short description
    pub description: Option<&'static str>,
    /// Example usage
    pub example: Option<&'static str>,
}

impl FunctionSignature {
    /// Create a signature with builder pattern
    pub fn new(function: FunctionId) -> Self {
        Self {
            function,
            parameters: Vec::new(),
            function_type: if function.is_aggregate() {
                FunctionType::Aggregate
            } else {
                FunctionType::Scalar
            },
            description: None,
            example: None,
        }
    }

    /// Builder method: set parameter names
    pub fn with_parameters(mut self, params: &[&'static str]) -> Self {
        self.parameters = params.to_vec();
        self
    }

    /// Builder method: set description
    pub fn with_description(mut self, desc: &'static str) -> Self {
        self.description = Some(desc);
        self
    }

    /// Builder method: set example
    pub fn with_example(mut self, example: &'static str) -> Self {
        self.example = Some(example);
        self
    }

    pub fn name(&self) -> &'static str {
        self.function.name()
    }

    pub fn arity(&self) -> Arity {
        self.function.arity()
    }

    /// Signature for display, e.g. `SUBSTR(expression, position, length?)`
    pub fn signature(&self) -> String {
        format!("{}({})", self.name(), self.parameters.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_display() {
        let sig = FunctionSignature::new(FunctionId::Substr).with_parameters(&[
            "expression",
            "position",
            "length?",
        ]);
        assert_eq!(sig.signature(), "SUBSTR(expression, position, length?)");
        assert_eq!(sig.function_type, FunctionType::Scalar);
    }

    #[test]
    fn test_aggregate_type_inferred() {
        let sig = FunctionSignature::new(FunctionId::Count);
        assert_eq!(sig.function_type, FunctionType::Aggregate);
    }

    #[test]
    fn test_signature_serializes() {
        let sig = FunctionSignature::new(FunctionId::Lower).with_parameters(&["text"]);
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(json["function"], "lower");
        assert_eq!(json["function_type"], "Scalar");
    }
}
