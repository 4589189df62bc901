pub mod format;
pub mod maf;
pub mod txt;
pub mod vcf;

// re-exports
pub use format::*;
pub use maf::convert_maf;
pub use txt::convert_txt;
pub use vcf::convert_vcf;
