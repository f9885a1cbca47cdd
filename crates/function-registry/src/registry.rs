// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use crate::{FunctionId, FunctionSignature, builtin};
use std::collections::HashMap;

/// Registry of builtin function signatures
///
/// This struct stores and provides lookup for the signatures of every
/// function the catalog can construct.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    /// Signatures keyed by function identity
    functions: HashMap<FunctionId, FunctionSignature>,
}

impl FunctionRegistry {
    /// Create a new function registry with all builtin signatures loaded
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use sqlexpr_function_registry::{FunctionId, FunctionRegistry};
    ///
    /// let registry = FunctionRegistry::new();
    /// let substr = registry.get(FunctionId::Substr);
    /// ```
    pub fn new() -> Self {
        let functions = builtin::all_signatures()
            .into_iter()
            .map(|sig| (sig.function, sig))
            .collect();
        Self { functions }
    }

    /// Get the signature of a function
    pub fn get(&self, function: FunctionId) -> Option<&FunctionSignature> {
        self.functions.get(&function)
    }

    /// Lookup a signature by name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let registry = FunctionRegistry::new();
    /// let count = registry.get_function("count");
    /// assert_eq!(count.unwrap().name(), "COUNT");
    /// ```
    pub fn get_function(&self, name: &str) -> Option<&FunctionSignature> {
        let function = name.parse::<FunctionId>().ok()?;
        self.get(function)
    }

    /// Check if a function exists
    pub fn has_function(&self, name: &str) -> bool {
        self.get_function(name).is_some()
    }

    /// All signatures, ordered by function identity
    pub fn signatures(&self) -> Vec<&FunctionSignature> {
        let mut sigs: Vec<_> = self.functions.values().collect();
        sigs.sort_by_key(|sig| sig.function);
        sigs
    }

    /// Markdown description of a function, or None if not found
    pub fn describe(&self, name: &str) -> Option<String> {
        let sig = self.get_function(name)?;
        let desc = sig.description.unwrap_or("SQL function");
        let mut text = format!("**{}**\n\n{}", sig.signature(), desc);
        if let Some(example) = sig.example {
            text.push_str(&format!("\n\nExample: `{example}`"));
        }
        Some(text)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
