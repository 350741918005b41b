//! Tests for SubpassAttachmentLayoutBuilder
//!
//! These tests cover what each declaration records. Name resolution and
//! validation happen in RenderAttachmentLayoutBuilder::end() and are tested
//! there.

use super::*;
use crate::attachment::{ClearValue, LoadOp, StoreOp};

// ============================================================================
// Tests: Creation
// ============================================================================

#[test]
fn test_new_subpass_is_empty() {
    let subpass = SubpassAttachmentLayoutBuilder::new(3);
    assert_eq!(subpass.subpass_index(), 3);
    assert_eq!(subpass.render_target_count(), 0);
    assert_eq!(subpass.subpass_input_count(), 0);
    assert!(!subpass.has_depth_stencil());
    assert!(!subpass.has_shading_rate());
    assert!(subpass.deferred_error.is_none());
}

// ============================================================================
// Tests: Render targets
// ============================================================================

#[test]
fn test_render_targets_keep_declaration_order() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .render_target_attachment(Format::R16G16B16A16_FLOAT, "Color0")
        .render_target_attachment(Format::R8G8B8A8_UNORM, "")
        .reuse_render_target_attachment("Swapchain");

    let names: Vec<&str> = subpass.render_target_attachments.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Color0", "", "Swapchain"]);
    assert_eq!(subpass.render_target_attachments[2].format, Format::Unknown);
}

#[test]
fn test_render_target_defaults() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass.render_target_attachment(Format::R8G8B8A8_UNORM, "Color0");

    let entry = &subpass.render_target_attachments[0];
    assert_eq!(entry.load_store_action, AttachmentLoadStoreAction::default());
    assert_eq!(entry.scope_attachment_access, ScopeAttachmentAccess::WRITE);
    assert_eq!(entry.scope_attachment_stage, ScopeAttachmentStage::COLOR_ATTACHMENT_OUTPUT);
    assert!(entry.resolve_name.is_none());
}

#[test]
fn test_render_targets_beyond_limit_are_kept() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    for _ in 0..ATTACHMENT_COLOR_COUNT_MAX + 2 {
        subpass.render_target_attachment(Format::R8G8B8A8_UNORM, "");
    }

    assert_eq!(subpass.render_target_count(), ATTACHMENT_COLOR_COUNT_MAX + 2);
    assert!(subpass.deferred_error.is_none());
}

#[test]
fn test_render_target_with_resolve_names_destination() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .render_target_attachment_with(Format::R16G16B16A16_FLOAT, "Color0", AttachmentLoadStoreAction::default(), true)
        .render_target_attachment_with(Format::R8G8B8A8_UNORM, "", AttachmentLoadStoreAction::default(), true);

    assert_eq!(subpass.render_target_attachments[0].resolve_name, Some(AttachmentName::new("Color0Resolve")));
    assert_eq!(subpass.render_target_attachments[1].resolve_name, Some(AttachmentName::anonymous()));
    assert!(!subpass.render_target_attachments[0].resolve_reuses_name);
}

#[test]
fn test_reuse_with_resolve_targets_latest_unresolved() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .render_target_attachment(Format::R16G16B16A16_FLOAT, "MsaaA")
        .render_target_attachment(Format::R16G16B16A16_FLOAT, "MsaaB")
        .reuse_render_target_attachment_with("ResolvedB", AttachmentLoadStoreAction::default(), true)
        .reuse_render_target_attachment_with("ResolvedA", AttachmentLoadStoreAction::default(), true);

    assert_eq!(subpass.render_target_count(), 2);
    assert_eq!(subpass.render_target_attachments[0].resolve_name, Some(AttachmentName::new("ResolvedA")));
    assert_eq!(subpass.render_target_attachments[1].resolve_name, Some(AttachmentName::new("ResolvedB")));
    assert!(subpass.render_target_attachments.iter().all(|entry| entry.resolve_reuses_name));
}

#[test]
fn test_reuse_with_resolve_without_source_is_deferred_error() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(2);
    subpass.reuse_render_target_attachment_with("Resolved", AttachmentLoadStoreAction::default(), true);

    assert_eq!(subpass.render_target_count(), 0);
    assert!(matches!(
        subpass.deferred_error,
        Some(Error::InvalidResolve { subpass: 2, .. })
    ));
}

// ============================================================================
// Tests: Explicit resolve
// ============================================================================

#[test]
fn test_resolve_attachment_pairs_source() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .render_target_attachment(Format::R16G16B16A16_FLOAT, "Msaa")
        .resolve_attachment("Msaa", "Resolved");

    assert_eq!(subpass.render_target_attachments[0].resolve_name, Some(AttachmentName::new("Resolved")));
    assert!(subpass.deferred_error.is_none());
}

#[test]
fn test_resolve_attachment_unknown_source() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass.resolve_attachment("Msaa", "Resolved");

    match &subpass.deferred_error {
        Some(Error::InvalidResolve { name, .. }) => assert_eq!(name.as_str(), "Msaa"),
        other => panic!("unexpected deferred error {:?}", other),
    }
}

#[test]
fn test_resolve_attachment_needs_destination_name() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .render_target_attachment(Format::R16G16B16A16_FLOAT, "Msaa")
        .resolve_attachment("Msaa", "");

    assert!(matches!(subpass.deferred_error, Some(Error::InvalidResolve { .. })));
    assert!(subpass.render_target_attachments[0].resolve_name.is_none());
}

#[test]
fn test_resolve_attachment_twice_is_deferred_error() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .render_target_attachment(Format::R16G16B16A16_FLOAT, "Msaa")
        .resolve_attachment("Msaa", "ResolvedA")
        .resolve_attachment("Msaa", "ResolvedB");

    assert!(matches!(subpass.deferred_error, Some(Error::InvalidResolve { .. })));
    assert_eq!(subpass.render_target_attachments[0].resolve_name, Some(AttachmentName::new("ResolvedA")));
}

#[test]
fn test_first_deferred_error_wins() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .resolve_attachment("First", "Resolved")
        .resolve_attachment("Second", "Resolved");

    match &subpass.deferred_error {
        Some(Error::InvalidResolve { name, .. }) => assert_eq!(name.as_str(), "First"),
        other => panic!("unexpected deferred error {:?}", other),
    }
}

// ============================================================================
// Tests: Depth / stencil
// ============================================================================

#[test]
fn test_depth_stencil_defaults() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass.depth_stencil_attachment(Format::D32_FLOAT, "Depth");

    let entry = subpass.depth_stencil_attachment.as_ref().unwrap();
    assert_eq!(entry.format, Format::D32_FLOAT);
    assert_eq!(entry.scope_attachment_access, ScopeAttachmentAccess::WRITE);
    assert_eq!(
        entry.scope_attachment_stage,
        ScopeAttachmentStage::EARLY_FRAGMENT_TEST | ScopeAttachmentStage::LATE_FRAGMENT_TEST
    );
}

#[test]
fn test_depth_stencil_second_call_overwrites() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .depth_stencil_attachment(Format::D32_FLOAT, "Depth")
        .reuse_depth_stencil_attachment("SharedDepth");

    let entry = subpass.depth_stencil_attachment.as_ref().unwrap();
    assert_eq!(entry.name.as_str(), "SharedDepth");
    assert_eq!(entry.format, Format::Unknown);
}

#[test]
fn test_depth_stencil_load_store_updates_existing_slot() {
    let clear = AttachmentLoadStoreAction::new(ClearValue::depth(1.0), LoadOp::Clear, StoreOp::DontCare);

    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass
        .depth_stencil_attachment(Format::D24_UNORM_S8_UINT, "Depth")
        .depth_stencil_load_store(clear, ScopeAttachmentAccess::READ, ScopeAttachmentStage::EARLY_FRAGMENT_TEST);

    let entry = subpass.depth_stencil_attachment.as_ref().unwrap();
    assert_eq!(entry.name.as_str(), "Depth");
    assert_eq!(entry.format, Format::D24_UNORM_S8_UINT);
    assert_eq!(entry.load_store_action, clear);
    assert_eq!(entry.scope_attachment_access, ScopeAttachmentAccess::READ);
}

#[test]
fn test_depth_stencil_load_store_without_slot_declares_unnamed_reuse() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass.depth_stencil_load_store(
        AttachmentLoadStoreAction::default(),
        ScopeAttachmentAccess::WRITE,
        ScopeAttachmentStage::LATE_FRAGMENT_TEST,
    );

    let entry = subpass.depth_stencil_attachment.as_ref().unwrap();
    assert!(entry.name.is_empty());
    assert!(entry.format.is_unknown());
}

// ============================================================================
// Tests: Subpass inputs and shading rate
// ============================================================================

#[test]
fn test_subpass_input_defaults() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(1);
    subpass
        .subpass_input_attachment("Color0", ImageAspectFlags::COLOR)
        .subpass_input_attachment("Depth", ImageAspectFlags::DEPTH);

    assert_eq!(subpass.subpass_input_count(), 2);
    let entry = &subpass.subpass_input_attachments[1];
    assert_eq!(entry.name.as_str(), "Depth");
    assert_eq!(entry.image_aspects, ImageAspectFlags::DEPTH);
    assert_eq!(entry.scope_attachment_access, ScopeAttachmentAccess::READ);
    assert_eq!(entry.scope_attachment_stage, ScopeAttachmentStage::FRAGMENT_SHADER);
}

#[test]
fn test_shading_rate_slot() {
    let mut subpass = SubpassAttachmentLayoutBuilder::new(0);
    subpass.shading_rate_attachment(Format::R8_UINT, "ShadingRate");

    let entry = subpass.shading_rate_attachment.as_ref().unwrap();
    assert_eq!(entry.format, Format::R8_UINT);
    assert_eq!(entry.scope_attachment_access, ScopeAttachmentAccess::READ);
    assert_eq!(entry.scope_attachment_stage, ScopeAttachmentStage::SHADING_RATE);
}
