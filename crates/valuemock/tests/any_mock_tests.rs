//! Type-erased mock tests

mod common;

use std::any::Any;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use valuemock::{AnyMock, ErasedTarget, MockError};

fn target_str<'m>(mock: &'m AnyMock<'_>) -> Option<&'m str> {
    mock.target::<String>().map(String::as_str)
}

// ═══════════════════════════════════════════════════════════════════════
// Replace / Restore
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_string_round_trip() -> anyhow::Result<()> {
    common::init_tracing();
    let mut value = String::from("original value");
    let mut mock = AnyMock::new(&mut value);

    assert_eq!(target_str(&mock), Some("original value"));
    assert_eq!(
        mock.original::<String>().map(String::as_str),
        Some("original value")
    );

    mock.replace(String::from("mock value"))?;
    assert_eq!(target_str(&mock), Some("mock value"));
    assert_eq!(
        mock.original::<String>().map(String::as_str),
        Some("original value")
    );

    mock.restore();
    assert_eq!(target_str(&mock), Some("original value"));
    Ok(())
}

#[test]
fn test_with_value_then_second_replace() -> anyhow::Result<()> {
    let mut value = String::from("original value");
    {
        let mut mock = AnyMock::with_value(&mut value, String::from("mock value"))?;
        assert_eq!(target_str(&mock), Some("mock value"));

        mock.replace(String::from("second value"))?;
        assert_eq!(target_str(&mock), Some("second value"));
        assert_eq!(
            mock.original::<String>().map(String::as_str),
            Some("original value")
        );

        mock.restore();
    }
    assert_eq!(value, "original value");
    Ok(())
}

#[test]
fn test_restore_twice() -> anyhow::Result<()> {
    let mut n = 5i32;
    let mut mock = AnyMock::new(&mut n);
    mock.replace(6i32)?;
    mock.restore();
    mock.restore();
    assert_eq!(mock.target::<i32>(), Some(&5));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Type checking
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_mismatched_type_rejected() {
    common::init_tracing();
    let mut value = String::from("original value");
    let mut mock = AnyMock::new(&mut value);

    let err = mock.replace(21).unwrap_err();
    assert!(matches!(err, MockError::TypeMismatch { ref got, .. } if got == "i32"));
    assert_eq!(target_str(&mock), Some("original value"));
}

#[test]
fn test_reference_to_same_type_rejected() {
    static OTHER: std::sync::LazyLock<String> =
        std::sync::LazyLock::new(|| String::from("original value"));

    let mut value = String::from("original value");
    let mut mock = AnyMock::new(&mut value);

    let other: &'static String = &OTHER;
    assert!(matches!(
        mock.replace(other),
        Err(MockError::TypeMismatch { .. })
    ));
    assert!(mock.replace(Box::new(String::from("boxed"))).is_err());
    assert!(mock.replace(Arc::new(String::from("shared"))).is_err());
    assert!(!mock.is_replaced());
}

#[test]
fn test_boxed_any_goes_through_replace_boxed() -> anyhow::Result<()> {
    let mut value = String::from("original value");
    let mut mock = AnyMock::new(&mut value);

    let boxed: Box<dyn Any> = Box::new(String::from("mock value"));
    assert!(mock.accepts(boxed.as_ref()));
    mock.replace_boxed(Some(boxed))?;
    assert_eq!(target_str(&mock), Some("mock value"));

    let wrong: Box<dyn Any> = Box::new(21i32);
    assert!(!mock.accepts(wrong.as_ref()));
    assert!(mock.replace_boxed(Some(wrong)).is_err());
    assert_eq!(target_str(&mock), Some("mock value"));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Zero values
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_none_installs_default() -> anyhow::Result<()> {
    let mut value = String::from("original value");
    let mut mock = AnyMock::new(&mut value);
    mock.replace_boxed(None)?;
    assert_eq!(target_str(&mock), Some(""));
    assert!(mock.is_replaced());
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct Port(u16);

#[test]
fn test_without_default_has_no_zero() -> anyhow::Result<()> {
    let mut port = Port(443);
    let mut mock = AnyMock::without_default(&mut port);

    assert!(matches!(
        mock.replace_with_zero(),
        Err(MockError::NoZeroValue { .. })
    ));
    assert_eq!(mock.target::<Port>(), Some(&Port(443)));

    mock.replace(Port(8443))?;
    assert_eq!(mock.target::<Port>(), Some(&Port(8443)));
    drop(mock);
    assert_eq!(port, Port(443));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Custom erased targets
// ═══════════════════════════════════════════════════════════════════════

/// Keeps a log of every write, standing in for instrumented storage.
struct Recorded<'a> {
    log: &'a mut Vec<String>,
    current: String,
    original: String,
}

impl ErasedTarget for Recorded<'_> {
    fn type_name(&self) -> &'static str {
        "Recorded"
    }

    fn type_matches(&self, value: &dyn Any) -> bool {
        value.is::<String>()
    }

    fn overwrite(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        let value = value.downcast::<String>()?;
        self.log.push(format!("set {}", value));
        self.current = *value;
        Ok(())
    }

    fn zero(&mut self) -> valuemock::Result<()> {
        self.log.push("zero".to_string());
        self.current.clear();
        Ok(())
    }

    fn restore(&mut self) {
        self.log.push("restore".to_string());
        self.current = self.original.clone();
    }

    fn target(&self) -> &dyn Any {
        &self.current
    }

    fn original(&self) -> &dyn Any {
        &self.original
    }
}

#[test]
fn test_custom_target_drives_through_mock() -> anyhow::Result<()> {
    let mut log = Vec::new();
    {
        let mut mock = AnyMock::from_target(Recorded {
            log: &mut log,
            current: "a".to_string(),
            original: "a".to_string(),
        });
        assert_eq!(mock.type_name(), "Recorded");
        mock.replace(String::from("b"))?;
        mock.replace_with_zero()?;
        assert!(mock.replace(1u8).is_err());
    }
    assert_eq!(log, vec!["set b", "zero", "restore"]);
    Ok(())
}
