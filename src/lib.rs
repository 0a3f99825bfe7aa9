//!
//! flowmatch assigns applicants to capacity-limited providers by
//! [minimum cost maximum flow](https://en.wikipedia.org/wiki/Minimum-cost_flow_problem).
//!
//! * [`min_flow`]: generic solver on dense capacity/cost matrices
//! * [`matching`]: network construction from applicant/provider records and
//!   interpretation of the solved flow
//!
//! ```
//! use flowmatch::{allocate, Applicant, Provider, WeightingConfig};
//!
//! let applicants = vec![Applicant::new("u1").with_preferences(&["p1"])];
//! let providers = vec![Provider::new("p1", 1, "organic")];
//! let config = WeightingConfig {
//!     categories: vec!["organic".to_string()],
//!     ..Default::default()
//! };
//! let allocation = allocate(&applicants, &providers, 100, &config).unwrap();
//! assert_eq!(allocation.assignment["u1"], "p1");
//! ```
pub mod error;
pub mod matching;
pub mod min_flow;

pub use error::{Error, Result};
pub use matching::{
    allocate, build, interpret, Allocation, AllocationStats, Applicant, Assignment, FlowNetwork,
    Provider, Warning, WeightingConfig,
};
pub use min_flow::{min_cost_max_flow, MaxFlow};
