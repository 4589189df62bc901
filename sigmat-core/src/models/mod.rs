pub mod chrom;
pub mod class;
pub mod context;
pub mod ranges;
pub mod record;

// re-export for cleaner imports
pub use self::class::VariantClass;
pub use self::context::MutationContext;
pub use self::ranges::BedRanges;
pub use self::record::VariantRecord;
