//! Unit tests for limits.rs

use super::*;

#[test]
fn test_default_limits_match_constants() {
    let limits = LayoutLimits::default();
    assert_eq!(limits.max_color_attachments, ATTACHMENT_COLOR_COUNT_MAX);
    assert_eq!(limits.max_subpass_inputs, ATTACHMENT_COLOR_COUNT_MAX);
    assert_eq!(limits.max_subpasses, SUBPASS_COUNT_MAX);
    assert_eq!(limits.max_render_attachments, 18);
}

#[test]
fn test_default_limits_are_valid() {
    assert!(LayoutLimits::default().validate().is_ok());
}

#[test]
fn test_zero_limit_is_invalid() {
    let limits = LayoutLimits { max_subpasses: 0, ..LayoutLimits::default() };
    let err = limits.validate().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(format!("{}", err).contains("max_subpasses"));
}
