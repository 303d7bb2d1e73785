//! The cache and coherence execution units.

/// Set-associative cache with victim cache and pluggable replacement
/// disciplines (LRU, RRIP).
pub mod cache;

/// Snoop-based coherence protocol engines (MI, MSI, MESI, MOESI, MESIF) and
/// the controller that wraps them.
pub mod coherence;
