//! Error codes for every elang diagnostic.
//!
//! Each code is a unique identifier (e.g., `E6001`) whose first digit names
//! the phase that raised it.


use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Lexer errors
/// - E2xxx: Parser errors
/// - E3xxx: Native library (FFI) errors
/// - E6xxx: Runtime / eval errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E1xxx)
    /// Character that starts no token
    E1001,
    /// Unterminated string literal
    E1002,
    /// Source file larger than 4 GiB
    E1003,

    // Parser Errors (E2xxx)
    /// Unexpected token
    E2001,
    /// Malformed expression or block
    E2002,
    /// Token that starts no statement
    E2003,
    /// Unknown type name in an annotation
    E2004,
    /// End of file inside a construct
    E2005,
    /// Integer literal does not fit in 64 bits
    E2006,

    // FFI Errors (E3xxx)
    /// Native library could not be opened
    E3001,
    /// Entry point missing from native library
    E3002,
    /// No native function with that name
    E3003,
    /// Native function called with wrong argument count
    E3004,
    /// Native function returned a malformed value
    E3005,

    // Runtime Errors (E6xxx)
    /// Unknown identifier
    E6001,
    /// Name already declared in a visible scope
    E6002,
    /// Initializer does not match the declared type
    E6003,
    /// Void value used as a variable initializer
    E6004,
    /// Assignment to a constant
    E6005,
    /// Assignment changes a variable's type
    E6006,
    /// Wrong number of arguments to a function
    E6007,
    /// `return` outside of a function body
    E6008,
    /// Returned value does not match the declared return type
    E6009,
    /// Void value returned
    E6010,
    /// Function with a return type ends without `return`
    E6011,
    /// `==` between values of different types
    E6012,
    /// Comparison or logic operator applied to unsupported operands
    E6013,
    /// `if`/`while` condition is not a boolean
    E6014,
    /// Division by zero
    E6015,
    /// Modulo by zero
    E6016,
    /// Integer overflow
    E6017,
    /// Imported file could not be read
    E6018,
    /// String view whose arena was released
    E6019,
    /// Arithmetic on a non-integer operand
    E6020,
    /// Argument type does not match the parameter type
    E6021,
    /// Void value passed as an argument
    E6022,
    /// `exit` reached the top level
    E6023,
}

impl ErrorCode {
    /// Every error code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E6009,
        ErrorCode::E6010,
        ErrorCode::E6011,
        ErrorCode::E6012,
        ErrorCode::E6013,
        ErrorCode::E6014,
        ErrorCode::E6015,
        ErrorCode::E6016,
        ErrorCode::E6017,
        ErrorCode::E6018,
        ErrorCode::E6019,
        ErrorCode::E6020,
        ErrorCode::E6021,
        ErrorCode::E6022,
        ErrorCode::E6023,
    ];

    /// Get the code as a string (e.g., "E6001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E6014 => "E6014",
            ErrorCode::E6015 => "E6015",
            ErrorCode::E6016 => "E6016",
            ErrorCode::E6017 => "E6017",
            ErrorCode::E6018 => "E6018",
            ErrorCode::E6019 => "E6019",
            ErrorCode::E6020 => "E6020",
            ErrorCode::E6021 => "E6021",
            ErrorCode::E6022 => "E6022",
            ErrorCode::E6023 => "E6023",
        }
    }

    /// Check if this is a lexer error (E1xxx).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a parser error (E2xxx).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is a native library error (E3xxx).
    pub fn is_ffi_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Check if this is a runtime error (E6xxx).
    pub fn is_eval_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E6001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
