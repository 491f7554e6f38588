use std::fmt;
use std::path::PathBuf;

/// The supported value kinds. Every configurable field maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int,
    Int64,
    Float,
    Str,
    Duration,
    IntList,
    FloatList,
    StrList,
}

impl Kind {
    /// Boolean flags may appear on the command line without a value.
    pub fn is_bool(self) -> bool {
        self == Kind::Bool
    }

    /// Placeholder shown for the flag's value in generated help.
    pub fn value_name(self) -> &'static str {
        match self {
            Kind::Bool => "BOOL",
            Kind::Int | Kind::Int64 => "INT",
            Kind::Float => "FLOAT",
            Kind::Str => "STRING",
            Kind::Duration => "DURATION",
            Kind::IntList => "INT,...",
            Kind::FloatList => "FLOAT,...",
            Kind::StrList => "STRING,...",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::Float => "float",
            Kind::Str => "string",
            Kind::Duration => "duration",
            Kind::IntList => "list of int",
            Kind::FloatList => "list of float",
            Kind::StrList => "list of string",
        };
        f.write_str(name)
    }
}

/// A config operation on an already-populated record.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Render the record as INI text, optionally writing it to a file.
    Dump { output: Option<PathBuf> },
    /// Look up one value by flag name or INI key.
    Get { key: String },
    /// Every item with its current value.
    List,
}
