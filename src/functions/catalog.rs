use crate::error::{GpError, Result};
use crate::types::{Program, TypeToken};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Leaf symbol descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSpec {
    #[serde(rename = "type")]
    pub ty: TypeToken,
}

/// Internal-node symbol descriptor: return type plus one type per argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    #[serde(rename = "type")]
    pub ty: TypeToken,
    pub arity: usize,
    pub arg_types: Vec<TypeToken>,
}

impl TerminalSpec {
    pub fn new(ty: impl Into<TypeToken>) -> Self {
        Self { ty: ty.into() }
    }
}

impl FunctionSpec {
    pub fn new(ty: impl Into<TypeToken>, arg_types: Vec<TypeToken>) -> Self {
        Self {
            ty: ty.into(),
            arity: arg_types.len(),
            arg_types,
        }
    }
}

/// Terminal and function sets the engine draws symbols from.
///
/// Both sets are ordered maps, so a seeded random source picks the same
/// symbols on every run regardless of hashing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    terminals: BTreeMap<String, TerminalSpec>,
    #[serde(default)]
    functions: BTreeMap<String, FunctionSpec>,
}

impl Catalog {
    pub fn new(
        terminals: BTreeMap<String, TerminalSpec>,
        functions: BTreeMap<String, FunctionSpec>,
    ) -> Result<Self> {
        let catalog = Self { terminals, functions };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(contents)
            .map_err(|e| GpError::Configuration(format!("Failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load-time check that every function declares a positive arity
    /// matching its argument types.
    pub fn validate(&self) -> Result<()> {
        for (name, spec) in &self.functions {
            if spec.arity == 0 || spec.arg_types.len() != spec.arity {
                return Err(GpError::ArityMismatch {
                    function: name.clone(),
                    arity: spec.arity,
                    actual: spec.arg_types.len(),
                });
            }
        }
        Ok(())
    }

    pub fn terminals(&self) -> &BTreeMap<String, TerminalSpec> {
        &self.terminals
    }

    pub fn functions(&self) -> &BTreeMap<String, FunctionSpec> {
        &self.functions
    }

    pub fn terminal(&self, name: &str) -> Option<&TerminalSpec> {
        self.terminals.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    /// Terminal identifiers whose type equals `ty`, in catalog order
    pub fn terminals_of(&self, ty: &TypeToken) -> Vec<&str> {
        self.terminals
            .iter()
            .filter(|(_, spec)| &spec.ty == ty)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Function identifiers returning `ty`, in catalog order
    pub fn functions_of(&self, ty: &TypeToken) -> Vec<&str> {
        self.functions
            .iter()
            .filter(|(_, spec)| &spec.ty == ty)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Type a program evaluates to, looked up from its root symbol
    pub fn effective_type(&self, program: &Program) -> Result<&TypeToken> {
        match program {
            Program::Atom(name) => self
                .terminal(name)
                .map(|spec| &spec.ty)
                .ok_or_else(|| GpError::UnknownSymbol(name.clone())),
            Program::Call { function, .. } => self
                .function(function)
                .map(|spec| &spec.ty)
                .ok_or_else(|| GpError::UnknownSymbol(function.clone())),
        }
    }

    /// Validate structure, arity and argument types of a whole tree
    pub fn check(&self, program: &Program, expected: &TypeToken) -> Result<()> {
        let actual = self.effective_type(program)?;
        if actual != expected {
            return Err(GpError::TypeMismatch {
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }

        if let Program::Call { function, args } = program {
            let spec = self
                .function(function)
                .ok_or_else(|| GpError::UnknownSymbol(function.clone()))?;
            if args.len() != spec.arity {
                return Err(GpError::ArityMismatch {
                    function: function.clone(),
                    arity: spec.arity,
                    actual: args.len(),
                });
            }
            for (arg, arg_type) in args.iter().zip(&spec.arg_types) {
                self.check(arg, arg_type)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_catalog() -> Catalog {
        let mut terminals = BTreeMap::new();
        terminals.insert("x".to_string(), TerminalSpec::new("num"));
        terminals.insert("flag".to_string(), TerminalSpec::new("bool"));
        let mut functions = BTreeMap::new();
        functions.insert(
            "add".to_string(),
            FunctionSpec::new("num", vec!["num".into(), "num".into()]),
        );
        Catalog::new(terminals, functions).unwrap()
    }

    #[test]
    fn test_filters_by_type() {
        let catalog = numeric_catalog();
        assert_eq!(catalog.terminals_of(&"num".into()), vec!["x"]);
        assert_eq!(catalog.terminals_of(&"bool".into()), vec!["flag"]);
        assert_eq!(catalog.functions_of(&"num".into()), vec!["add"]);
        assert!(catalog.functions_of(&"bool".into()).is_empty());
    }

    #[test]
    fn test_arity_mismatch_rejected_at_load() {
        let mut functions = BTreeMap::new();
        functions.insert(
            "bad".to_string(),
            FunctionSpec {
                ty: "num".into(),
                arity: 3,
                arg_types: vec!["num".into()],
            },
        );
        let result = Catalog::new(BTreeMap::new(), functions);
        assert!(matches!(
            result,
            Err(GpError::ArityMismatch { arity: 3, actual: 1, .. })
        ));
    }

    #[test]
    fn test_zero_arity_rejected_at_load() {
        let mut functions = BTreeMap::new();
        functions.insert(
            "nullary".to_string(),
            FunctionSpec {
                ty: "num".into(),
                arity: 0,
                arg_types: vec![],
            },
        );
        assert!(matches!(
            Catalog::new(BTreeMap::new(), functions),
            Err(GpError::ArityMismatch { arity: 0, actual: 0, .. })
        ));

        let parsed = Catalog::from_toml_str(
            "[functions.nullary]\ntype = \"num\"\narity = 0\narg_types = []\n",
        );
        assert!(matches!(parsed, Err(GpError::ArityMismatch { arity: 0, .. })));
    }

    #[test]
    fn test_check_detects_wrong_argument_type() {
        let catalog = numeric_catalog();
        let bad = Program::call("add", vec![Program::atom("x"), Program::atom("flag")]);
        assert!(matches!(
            catalog.check(&bad, &"num".into()),
            Err(GpError::TypeMismatch { .. })
        ));

        let short = Program::call("add", vec![Program::atom("x")]);
        assert!(matches!(
            catalog.check(&short, &"num".into()),
            Err(GpError::ArityMismatch { .. })
        ));

        let good = Program::call("add", vec![Program::atom("x"), Program::atom("x")]);
        assert!(catalog.check(&good, &"num".into()).is_ok());
    }

    #[test]
    fn test_effective_type_unknown_symbol() {
        let catalog = numeric_catalog();
        assert!(matches!(
            catalog.effective_type(&Program::atom("z")),
            Err(GpError::UnknownSymbol(name)) if name == "z"
        ));
    }

    #[test]
    fn test_parse_toml_catalog() {
        let catalog = Catalog::from_toml_str(
            r#"
            [terminals.x]
            type = "num"

            [functions.neg]
            type = "num"
            arity = 1
            arg_types = ["num"]
            "#,
        )
        .unwrap();
        assert_eq!(catalog.function("neg").unwrap().arity, 1);
        assert_eq!(catalog.terminal("x").unwrap().ty, TypeToken::from("num"));
    }
}
