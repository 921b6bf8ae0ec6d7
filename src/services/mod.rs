//! Services for loading, label mapping and aggregation

pub mod aggregator;
pub mod data_loader;
pub mod labels;
pub mod query;

pub use aggregator::Aggregator;
pub use data_loader::{DataLoaderService, LoadStage};
pub use labels::{map_categorical_labels, month_abbrev};
pub use query::{evaluate, DashboardQuery, DashboardView, Question, RangeSelection, UserTypeFilter};
