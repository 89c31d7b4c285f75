//! Typed Record Invariant Tests
//!
//! - Omitted defaultable fields read as their declared default
//! - `with_*` never alters the original instance
//! - `without_*` restores the default
//! - Required fields are stored exactly as supplied
//! - Equality is structural over field values

use record_shape::{defaultable_fields, record, required_fields, Factory, Shape, REQUIRED};
use std::collections::HashSet;

record! {
    #[derive(Debug, PartialEq, Eq, Hash)]
    pub struct Sample {
        a: i64,
        b?: i64,
        c?: i64,
        d: Option<i64>,
    }
}

record! {
    /// A shape with only required fields
    #[derive(Debug, PartialEq)]
    pub struct Pair {
        left: String,
        right: String,
    }
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Settings {
        /// Display theme
        theme?: String,
        retries?: u8,
        tags?: Vec<String>,
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_factory() -> Factory<Sample> {
    Sample::factory(SampleDefaults {
        a: REQUIRED,
        b: 45,
        c: 17,
        d: REQUIRED,
    })
}

fn values(s: &Sample) -> (i64, i64, i64, Option<i64>) {
    (*s.a(), *s.b(), *s.c(), *s.d())
}

// =============================================================================
// Construction Tests
// =============================================================================

/// Required fields only: defaultable fields read their defaults.
#[test]
fn test_required_only_uses_defaults() {
    let record = sample_factory().create(SampleInput::new(1, Some(2)));
    assert_eq!(values(&record), (1, 45, 17, Some(2)));
}

/// Every field supplied: every value kept.
#[test]
fn test_all_fields_supplied() {
    let record = sample_factory().create(SampleInput {
        a: 1,
        b: Some(6),
        c: Some(3),
        d: Some(2),
    });
    assert_eq!(values(&record), (1, 6, 3, Some(2)));
}

/// `None` on a defaultable field is the same as omitting it.
#[test]
fn test_absent_defaultable_equals_omitted() {
    let factory = sample_factory();
    let explicit = factory.create(SampleInput {
        a: 1,
        b: None,
        c: None,
        d: Some(2),
    });
    let omitted = factory.create(SampleInput::new(1, Some(2)));
    assert_eq!(explicit, omitted);
}

/// `None` on a required `Option` field is kept, not replaced.
#[test]
fn test_required_absent_value_preserved() {
    let record = sample_factory().create(SampleInput::new(1, None));
    assert_eq!(*record.d(), None);
    assert_eq!(values(&record), (1, 45, 17, None));
}

#[test]
fn test_shape_without_defaultable_fields() {
    let factory = Pair::factory(PairDefaults {
        left: REQUIRED,
        right: REQUIRED,
    });
    let pair = factory.create(PairInput::new("l".to_string(), "r".to_string()));
    assert_eq!(pair.left(), "l");
    assert_eq!(pair.right(), "r");
    assert_eq!(defaultable_fields::<Pair>().count(), 0);
}

#[test]
fn test_shape_without_required_fields() {
    let factory = Settings::factory(SettingsDefaults {
        theme: "dark".to_string(),
        retries: 3,
        tags: Vec::new(),
    });
    let settings = factory.create(SettingsInput::new().retries(5));
    assert_eq!(settings.theme(), "dark");
    assert_eq!(*settings.retries(), 5);
    assert!(settings.tags().is_empty());
    assert_eq!(required_fields::<Settings>().count(), 0);
}

// =============================================================================
// Update Tests
// =============================================================================

/// `with_*` returns the new value and leaves the original unchanged.
#[test]
fn test_set_then_get_and_original_untouched() {
    let original = sample_factory().create(SampleInput::new(1, Some(2)));

    let a = original.with_a(10);
    let b = original.with_b(11);
    let c = original.with_c(12);
    let d = original.with_d(None);

    assert_eq!(*a.a(), 10);
    assert_eq!(*b.b(), 11);
    assert_eq!(*c.c(), 12);
    assert_eq!(*d.d(), None);
    assert_eq!(values(&original), (1, 45, 17, Some(2)));
}

#[test]
fn test_update_applies_function() {
    let record = sample_factory().create(SampleInput::new(1, Some(2)));
    let updated = record.update_b(|b| b * 2).update_d(|d| d.map(|v| v + 1));

    assert_eq!(values(&updated), (1, 90, 17, Some(3)));
    assert_eq!(values(&record), (1, 45, 17, Some(2)));
}

/// After `with_*` then `without_*`, a defaultable field reads its default.
#[test]
fn test_reset_restores_default() {
    let record = sample_factory().create(SampleInput::new(1, Some(2)).b(6).c(3));
    let reset = record.without_b();

    assert_eq!(values(&reset), (1, 45, 3, Some(2)));
    assert_eq!(values(&record), (1, 6, 3, Some(2)));

    let changed_then_reset = record.with_c(99).without_c();
    assert_eq!(*changed_then_reset.c(), 17);
}

#[test]
fn test_reset_uses_factory_defaults() {
    let other = Sample::factory(SampleDefaults {
        a: REQUIRED,
        b: 1000,
        c: 2000,
        d: REQUIRED,
    });
    let record = other.create(SampleInput::new(1, None).b(5));
    assert_eq!(*record.without_b().b(), 1000);
    assert_eq!(record.defaults().c, 2000);
}

// =============================================================================
// Equality Tests
// =============================================================================

/// Equal inputs after default filling give equal instances.
#[test]
fn test_structural_equality() {
    let factory = sample_factory();
    let one = factory.create(SampleInput::new(1, Some(2)));
    let two = factory.create(SampleInput::new(1, Some(2)).b(45));
    let three = factory.create(SampleInput::new(1, Some(3)));

    assert_eq!(one, two);
    assert_ne!(one, three);
}

/// Defaults do not take part in equality or hashing.
#[test]
fn test_equality_ignores_backing_defaults() {
    let other = Sample::factory(SampleDefaults {
        a: REQUIRED,
        b: 0,
        c: 0,
        d: REQUIRED,
    });
    let one = sample_factory().create(SampleInput::new(1, Some(2)));
    let two = other.create(SampleInput::new(1, Some(2)).b(45).c(17));
    assert_eq!(one, two);

    let set: HashSet<Sample> = [one, two].into_iter().collect();
    assert_eq!(set.len(), 1);
}

// =============================================================================
// Partition Tests
// =============================================================================

#[test]
fn test_partition_by_marker_not_value_type() {
    assert_eq!(required_fields::<Sample>().collect::<Vec<_>>(), vec!["a", "d"]);
    assert_eq!(defaultable_fields::<Sample>().collect::<Vec<_>>(), vec!["b", "c"]);
    assert_eq!(Sample::NAME, "Sample");
}

#[test]
fn test_instances_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Sample>();
    assert_send_sync::<Factory<Sample>>();
}
