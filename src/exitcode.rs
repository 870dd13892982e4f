//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error, e.g. removing the root tag
pub const USAGE: i32 = 64;

/// Markup is malformed or lacks the expected shape
pub const DATAERR: i32 = 65;

/// Input file does not exist
pub const NOINPUT: i32 = 66;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
