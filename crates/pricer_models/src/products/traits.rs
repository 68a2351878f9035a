//! Resolution trait.

use pricer_core::reference_data::{ReferenceData, ReferenceDataError};

/// A product that can be turned into its calculation-ready form.
///
/// Resolution is where every calendar lookup, date adjustment, schedule
/// generation and index-period derivation happens, exactly once. The
/// result is a pure snapshot: it keeps no reference to `ref_data`, and
/// resolving the same product against the same data twice gives equal values.
pub trait Resolvable {
    /// The resolved form.
    type Resolved;

    /// Resolves against reference data.
    ///
    /// # Errors
    ///
    /// `ReferenceDataError::NotFound` naming the first missing identifier.
    fn resolve(&self, ref_data: &ReferenceData) -> Result<Self::Resolved, ReferenceDataError>;
}
