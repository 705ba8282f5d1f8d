//! Dynamic-programming solvers over a compiled transition table.
//!
//! All updates are synchronous: each sweep reads only the previous sweep's
//! values and writes a fresh container.

mod policy_iteration_q;
mod policy_iteration_v;
mod value_iteration_q;
mod value_iteration_v;

pub use policy_iteration_q::policy_iteration_q;
pub use policy_iteration_v::policy_iteration_v;
pub use value_iteration_q::value_iteration_q;
pub use value_iteration_v::value_iteration_v;
