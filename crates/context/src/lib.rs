pub mod flatten;
pub mod retrieval;

pub use flatten::{FlattenError, flatten_prescription};
pub use retrieval::{DEFAULT_LIMIT, search};
