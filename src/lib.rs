//! # FX Forecast Workspace
//!
//! Umbrella crate re-exporting the workspace members.
//!
//! ## Example
//!
//! ```
//! use fx_forecast_workspace::{math, evaluate};
//!
//! let report = evaluate(&[1.10, 1.12, 1.11], &[1.10, 1.13, 1.12]).unwrap();
//! assert_eq!(report.points, 3);
//! assert_eq!(math::differences(&[1.0, 3.0]), vec![2.0]);
//! ```

pub use forecast_math as math;
pub use fx_forecast::*;
