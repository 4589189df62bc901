pub mod assemble;
pub mod builders;
pub mod catalog;
pub mod logging;
pub mod sort;
pub mod staging;

// re-exports
pub use assemble::CountTable;
pub use catalog::{MatrixParams, generate_matrices, generate_matrices_with};
