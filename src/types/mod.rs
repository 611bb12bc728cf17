pub mod errors;
pub mod field;
pub mod move_kind;
pub mod nature;
pub mod pokemon_type;
pub mod stat;

pub use errors::*;
pub use field::*;
pub use move_kind::*;
pub use nature::*;
pub use pokemon_type::*;
pub use stat::*;
