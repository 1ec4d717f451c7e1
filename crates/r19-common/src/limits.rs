//! Centralized limits shared by the rules and the lint driver.

/// Maximum number of `const B = A` hops followed when resolving the
/// component a `defaultProps` assignment targets.
///
/// Alias chains longer than this (or cyclic ones) are reported without a
/// fix.
pub const MAX_ALIAS_HOPS: usize = 8;

/// Maximum number of lint-and-fix passes over one file.
///
/// Fixes that overlap an already accepted fix are deferred to the next
/// pass; this bounds the loop when fixes keep producing new matches.
pub const MAX_FIX_PASSES: usize = 10;
