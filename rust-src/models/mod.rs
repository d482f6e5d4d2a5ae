//! Record types for the literal dashboard datasets.

mod dataset;

#[allow(unused_imports)]
pub use dataset::{
    CategoryCount,
    Dataset,
    ProportionSlice,
    Record,
    RowCount,
    TimeSeriesPoint,
};
