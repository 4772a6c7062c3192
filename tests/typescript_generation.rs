//! TypeScript Generation Tests
//!
//! Validates that the public data types can be exported to TypeScript when
//! the tauri feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_core_types_implement_specta_type() {
    use specta::Type;

    // If this compiles, all types are properly configured for TypeScript export.
    fn assert_type<T: Type>() {}

    // Playback and sampling
    assert_type::<splitframe::FrameTick>();
    assert_type::<splitframe::PlaybackEvent>();
    assert_type::<splitframe::SamplingProgress>();
    assert_type::<splitframe::UpdateRate>();

    // Retiming
    assert_type::<splitframe::Split>();
    assert_type::<splitframe::RetimeResult>();
    assert_type::<splitframe::RetimeFailure>();
    assert_type::<splitframe::FailureReason>();
    assert_type::<splitframe::ModNote>();
    assert_type::<splitframe::TimeQuantizer>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Types still compile without specta::Type
    let _ = splitframe::UpdateRate::Native;
    let _ = splitframe::Split::new();
}
