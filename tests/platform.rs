//! Host identification as seen from the public API

use cube_gl::{BootstrapError, Platform};

#[test]
fn test_os_names_select_bundles() {
    for (os_name, platform, bundle) in [
        ("Linux", Platform::Linux, "natives-linux"),
        ("Mac OS X", Platform::MacOs, "natives-macos"),
        ("Windows 10", Platform::Windows, "natives-windows"),
        ("WINDOWS SERVER 2019", Platform::Windows, "natives-windows"),
    ] {
        let resolved = Platform::from_os_name(os_name).unwrap();
        assert_eq!(resolved, platform, "{os_name}");
        assert_eq!(resolved.native_bundle(), bundle);
    }
}

#[test]
fn test_unsupported_os_is_fatal_bootstrap_error() {
    let err: BootstrapError = Platform::resolve(Some("FreeBSD")).unwrap_err().into();
    assert_eq!(err.to_string(), "unsupported operating system: FreeBSD");
}

#[test]
fn test_unsupported_os_fails_before_event_loop() {
    let mut config = cube_gl::AppConfig::default();
    config.platform.os_name = Some("Haiku".to_string());

    let err = cube_gl::App::run(config, Some(1)).unwrap_err();
    assert!(matches!(err, BootstrapError::UnsupportedPlatform(_)));
}
