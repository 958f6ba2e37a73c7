//! Query construction and execution
//!
//! Raw request parameters are interpreted into a [`Predicate`] tree according
//! to a configuration's field descriptors, executed against an entity source,
//! and projected into uniform result records.

pub mod builder;
pub mod executor;
pub mod predicate;
pub mod results;

pub use builder::{PredicateBuilder, RawValue, SearchInput};
pub use executor::{QueryExecutor, QueryOutcome};
pub use predicate::{Bound, Clause, Op, Predicate};
pub use results::ResultRecord;
