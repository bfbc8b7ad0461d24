pub mod arithmetic;
pub mod array;
pub mod builtin_functions;
pub mod evaluation;
pub mod logical;
pub mod string;
pub mod type_casting;
pub mod utils;

// Re-export the main public functions
pub use evaluation::{eval, eval_with_vars};
pub use type_casting::{cast_value, resolve_type};
pub use utils::{values_equal, compare_values};
