//! Configuration parsing and validation tests.

use cachesim_core::common::SimError;
use cachesim_core::config::{CoherenceConfig, CoherenceScheme, ReplacementDiscipline};
use cachesim_core::Config;

// ──────────────────────────────────────────────────────────
// Defaults
// ──────────────────────────────────────────────────────────

#[test]
fn default_config_is_direct_mapped_single_set_lru() {
    let config = Config::default();
    assert_eq!(config.cache.associativity, 1);
    assert_eq!(config.cache.set_bits, 0);
    assert_eq!(config.cache.victim_entries, 0);
    assert_eq!(config.cache.discipline().unwrap(), ReplacementDiscipline::Lru);
}

#[test]
fn default_coherence_config_is_mesi_single_processor() {
    let config = CoherenceConfig::default();
    assert_eq!(config.scheme, CoherenceScheme::Mesi);
    assert_eq!(config.processor_count, 1);
    assert!(config.validate().is_ok());
}

// ──────────────────────────────────────────────────────────
// Replacement discipline selection
// ──────────────────────────────────────────────────────────

#[test]
fn absent_rrpv_width_selects_lru() {
    assert_eq!(
        ReplacementDiscipline::from_flag(None).unwrap(),
        ReplacementDiscipline::Lru
    );
}

#[test]
fn negative_rrpv_width_selects_lru() {
    assert_eq!(
        ReplacementDiscipline::from_flag(Some(-1)).unwrap(),
        ReplacementDiscipline::Lru
    );
}

#[test]
fn rrpv_width_one_is_the_minimal_rrip_domain() {
    assert_eq!(
        ReplacementDiscipline::from_flag(Some(1)).unwrap(),
        ReplacementDiscipline::Rrip { k: 1 }
    );
}

#[test]
fn rrpv_width_beyond_max_is_rejected() {
    let err = ReplacementDiscipline::from_flag(Some(64)).unwrap_err();
    assert_eq!(err, SimError::RrpvWidthOutOfRange(64));
}

// ──────────────────────────────────────────────────────────
// Coherence scheme codes
// ──────────────────────────────────────────────────────────

#[test]
fn scheme_codes_decode_in_order() {
    assert_eq!(CoherenceScheme::from_code(0).unwrap(), CoherenceScheme::Mi);
    assert_eq!(CoherenceScheme::from_code(1).unwrap(), CoherenceScheme::Msi);
    assert_eq!(CoherenceScheme::from_code(2).unwrap(), CoherenceScheme::Mesi);
    assert_eq!(CoherenceScheme::from_code(3).unwrap(), CoherenceScheme::Moesi);
    assert_eq!(CoherenceScheme::from_code(4).unwrap(), CoherenceScheme::Mesif);
}

#[test]
fn unknown_scheme_code_is_rejected() {
    let err = CoherenceScheme::from_code(5).unwrap_err();
    assert_eq!(err, SimError::UnsupportedScheme(5));
}

// ──────────────────────────────────────────────────────────
// Processor count bounds
// ──────────────────────────────────────────────────────────

#[test]
fn zero_processors_is_rejected() {
    let config = CoherenceConfig {
        scheme: CoherenceScheme::Mi,
        processor_count: 0,
    };
    assert!(config.validate().is_err());
}

#[test]
fn processor_count_256_is_the_upper_bound() {
    let config = CoherenceConfig {
        scheme: CoherenceScheme::Mi,
        processor_count: 256,
    };
    assert!(config.validate().is_ok());

    let config = CoherenceConfig {
        scheme: CoherenceScheme::Mi,
        processor_count: 257,
    };
    assert!(config.validate().is_err());
}

// ──────────────────────────────────────────────────────────
// Deserialization
// ──────────────────────────────────────────────────────────

#[test]
fn config_deserializes_from_json_with_defaults() {
    let json = r#"{"cache": {}, "coherence": {"scheme": "MESI"}}"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.cache.associativity, 1);
    assert_eq!(config.coherence.scheme, CoherenceScheme::Mesi);
    assert_eq!(config.coherence.processor_count, 1);
}

#[test]
fn config_deserializes_explicit_cache_geometry() {
    let json = r#"{
        "cache": {"associativity": 4, "set_bits": 3, "block_bits": 6, "rrpv_width": 2},
        "coherence": {"scheme": "MOESI", "processor_count": 8}
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.cache.associativity, 4);
    assert_eq!(config.cache.set_bits, 3);
    assert_eq!(config.cache.block_bits, 6);
    assert_eq!(
        config.cache.discipline().unwrap(),
        ReplacementDiscipline::Rrip { k: 2 }
    );
    assert_eq!(config.coherence.scheme, CoherenceScheme::Moesi);
    assert_eq!(config.coherence.processor_count, 8);
}
