//! Machine configuration constants.

/// Capacity of the data stack and the return stack.
pub const STACK_SIZE: usize = 64;

/// Memory cells reserved past the end of the code image for variables.
pub const SIZE_FOR_VARS: usize = 150;

/// Safety limit on executed instructions per run.
pub const INSTRUCTION_LIMIT: u64 = 100_000;

/// Largest representable machine word, as the wider type the ALU works in.
pub const MAX_NUMBER: i64 = i32::max_value() as i64;

/// Smallest representable machine word.
pub const MIN_NUMBER: i64 = i32::min_value() as i64;
