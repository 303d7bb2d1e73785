//! Tests for the coherence controller and its five protocol engines.
