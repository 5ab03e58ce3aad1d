use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque type tag used to match program slots.
///
/// Tokens are compared by equality only: there is no subtyping and no
/// coercion between tags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeToken(String);

impl TypeToken {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeToken {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeToken {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Program tree
///
/// An atom names a terminal; its type lives in the terminal catalog.
/// A call names a function and carries one subtree per declared argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    Atom(String),
    Call {
        function: String,
        args: Vec<Program>,
    },
}

impl Program {
    pub fn atom(name: impl Into<String>) -> Self {
        Program::Atom(name.into())
    }

    pub fn call(function: impl Into<String>, args: Vec<Program>) -> Self {
        Program::Call {
            function: function.into(),
            args,
        }
    }

    /// Terminal or function identifier at the root
    pub fn symbol(&self) -> &str {
        match self {
            Program::Atom(name) => name,
            Program::Call { function, .. } => function,
        }
    }

    pub fn args(&self) -> &[Program] {
        match self {
            Program::Atom(_) => &[],
            Program::Call { args, .. } => args,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Program::Atom(_))
    }

    /// Height of the tree; a bare atom has height 0.
    pub fn height(&self) -> usize {
        match self {
            Program::Atom(_) => 0,
            Program::Call { args, .. } => {
                1 + args.iter().map(Program::height).max().unwrap_or(0)
            }
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Program::Atom(_) => 1,
            Program::Call { args, .. } => 1 + args.iter().map(Program::size).sum::<usize>(),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Program::Atom(name) => f.write_str(name),
            Program::Call { function, args } => {
                write!(f, "({}", function)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
