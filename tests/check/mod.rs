//! Check module tests.


/// Verify all public check types are exported from the library.
#[test]
fn test_all_check_types_exported() {
    use monit_conf::check::{
        validate_name, AttrValue, Check, CheckAttributes, CheckSpec, CheckType, ProcessMatch,
        ValidationError, DEFAULT_HOST_ADDRESS,
    };

    let spec = CheckSpec::new("test", CheckAttributes::new(CheckType::Host));
    assert_eq!(spec.check_type(), CheckType::Host);
    assert!(validate_name(&spec.name).is_ok());
    assert_eq!(DEFAULT_HOST_ADDRESS, "127.0.0.1");

    let _ = AttrValue::from("10 seconds");
    let _ = Check::Process {
        matcher: ProcessMatch::Matching("sshd".to_string()),
    };
    let _: fn() -> ValidationError = || ValidationError::MissingFilePath;
}
