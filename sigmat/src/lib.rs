#[cfg(feature = "core")]
#[doc(inline)]
pub use sigmat_core as core;

#[cfg(feature = "convert")]
#[doc(inline)]
pub use sigmat_convert as convert;

#[cfg(feature = "matrix")]
#[doc(inline)]
pub use sigmat_matrix as matrix;
