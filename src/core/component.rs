//! Lifecycle capability shared by every simulation component.
//!
//! The source models this as a trio of function pointers (`tick`, `finish`,
//! `destroy`) attached to each module's struct. This trait is the idiomatic
//! equivalent: a small capability interface implemented by the cache
//! controller and the coherence controller alike.

/// Advance-time and teardown operations common to both core modules.
///
/// `finish` and `destroy` must never fire pending callbacks; they are pure
/// teardown hooks.
pub trait SimComponent {
    /// Advances simulated time by one unit.
    fn tick(&mut self);

    /// Teardown hook invoked once at the end of a run. Does not fire
    /// pending callbacks.
    fn finish(&mut self) {}

    /// Teardown hook invoked once when the component is discarded. Does
    /// not fire pending callbacks.
    fn destroy(&mut self) {}
}
