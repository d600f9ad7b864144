mod common;

use approx::assert_relative_eq;
use common::{context, drag, idle, press};
use dear_gizmo::{AxisFlags, ConfigFlags, DrawCmd, DrawCommands, GizmoContext, Mode, Operation};
use glam::Mat4;

fn translate_frame(ctx: &mut GizmoContext, model: &mut Mat4, snap: Option<[f32; 3]>) -> (bool, DrawCommands) {
    let mut draw = DrawCommands::new();
    let changed = ctx
        .manipulate("model", Mode::World, Operation::Translate, model, snap, &mut draw)
        .unwrap();
    (changed, draw)
}

#[test]
fn drag_along_x_axis() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;

    ctx.new_frame(press([425.0, 400.0]));
    translate_frame(&mut ctx, &mut model, None);
    assert!(ctx.is_using());
    assert!(ctx.is_using_id("model"));

    ctx.new_frame(drag([465.0, 400.0]));
    let (changed, draw) = translate_frame(&mut ctx, &mut model, None);
    assert!(changed);
    assert_relative_eq!(model.w_axis.x, 0.2887, epsilon = 1e-3);
    assert_relative_eq!(model.w_axis.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(model.w_axis.z, 0.0, epsilon = 1e-5);
    assert!(draw.texts().any(|text| text == "X : 0.289"));

    ctx.new_frame(idle([465.0, 400.0]));
    let (changed, _) = translate_frame(&mut ctx, &mut model, None);
    assert!(!changed);
    assert!(!ctx.is_using());
}

#[test]
fn vertical_drag_on_x_axis_stays_on_axis() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;

    ctx.new_frame(press([425.0, 400.0]));
    translate_frame(&mut ctx, &mut model, None);
    ctx.new_frame(drag([425.0, 300.0]));
    translate_frame(&mut ctx, &mut model, None);

    assert_relative_eq!(model.w_axis.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(model.w_axis.y, 0.0, epsilon = 1e-5);
}

#[test]
fn snapped_translation() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;
    let snap = Some([0.25, 0.25, 0.25]);

    ctx.new_frame(press([425.0, 400.0]));
    translate_frame(&mut ctx, &mut model, snap);
    ctx.new_frame(drag([465.0, 400.0]));
    translate_frame(&mut ctx, &mut model, snap);

    assert_relative_eq!(model.w_axis.x, 0.25, epsilon = 1e-5);
}

#[test]
fn screen_space_move_from_core() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;

    ctx.new_frame(press([400.0, 400.0]));
    translate_frame(&mut ctx, &mut model, None);
    ctx.new_frame(drag([440.0, 360.0]));
    translate_frame(&mut ctx, &mut model, None);

    // 40 px is 0.1 NDC, 0.2887 world units at the origin depth
    assert_relative_eq!(model.w_axis.x, 0.2887, epsilon = 1e-3);
    assert_relative_eq!(model.w_axis.y, 0.2887, epsilon = 1e-3);
    assert_relative_eq!(model.w_axis.z, 0.0, epsilon = 1e-4);
}

#[test]
fn locked_axis_is_not_hoverable() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;
    let mut draw = DrawCommands::new();

    ctx.new_frame(press([425.0, 400.0]));
    let mut gizmo = ctx
        .begin("model", Mode::World, &mut model, AxisFlags::X, &mut draw)
        .unwrap();
    gizmo.translate(None);
    assert!(gizmo.hovered().is_empty());
    assert!(!gizmo.end());
    assert!(!ctx.is_using());
}

#[test]
fn hovering_reports_over() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;

    ctx.new_frame(idle([425.0, 400.0]));
    translate_frame(&mut ctx, &mut model, None);
    assert!(ctx.is_over());

    ctx.new_frame(idle([10.0, 10.0]));
    translate_frame(&mut ctx, &mut model, None);
    assert!(!ctx.is_over());
}

#[test]
fn disabled_context_ignores_mouse() {
    let mut ctx = context();
    ctx.set_enabled(false);
    let mut model = Mat4::IDENTITY;

    ctx.new_frame(press([425.0, 400.0]));
    let (_, draw) = translate_frame(&mut ctx, &mut model, None);
    assert!(!ctx.is_using());
    assert!(!draw.is_empty());
}

#[test]
fn right_click_reverts_drag() {
    let mut ctx = context();
    ctx.set_config_flags(ConfigFlags::HAS_REVERSING);
    let mut model = Mat4::IDENTITY;

    ctx.new_frame(press([425.0, 400.0]));
    translate_frame(&mut ctx, &mut model, None);
    ctx.new_frame(drag([465.0, 400.0]));
    translate_frame(&mut ctx, &mut model, None);
    assert!(model.w_axis.x > 0.2);

    ctx.new_frame(drag([480.0, 400.0]).pressed(dear_gizmo::MouseButton::Right));
    let (changed, _) = translate_frame(&mut ctx, &mut model, None);
    assert!(changed);
    assert_eq!(model, Mat4::IDENTITY);
    assert!(!ctx.is_using());
}

#[test]
fn cloak_hides_handles_while_dragging() {
    let arrowheads = |draw: &DrawCommands| {
        draw.iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Triangle { .. }))
            .count()
    };

    let mut ctx = context();
    ctx.set_config_flags(ConfigFlags::CLOAK_ON_MANIPULATE);
    let mut model = Mat4::IDENTITY;

    ctx.new_frame(idle([10.0, 10.0]));
    let (_, draw) = translate_frame(&mut ctx, &mut model, None);
    // The Z arrow points into the screen and is hidden
    assert_eq!(arrowheads(&draw), 2);

    ctx.new_frame(press([425.0, 400.0]));
    translate_frame(&mut ctx, &mut model, None);
    ctx.new_frame(drag([465.0, 400.0]));
    let (_, draw) = translate_frame(&mut ctx, &mut model, None);
    assert_eq!(arrowheads(&draw), 0);
}

#[test]
fn second_gizmo_is_inert_while_first_drags() {
    let mut ctx = context();
    let mut first = Mat4::IDENTITY;
    let mut second = Mat4::IDENTITY;
    let mut draw = DrawCommands::new();

    ctx.new_frame(press([425.0, 400.0]));
    ctx.manipulate(1u64, Mode::World, Operation::Translate, &mut first, None, &mut draw)
        .unwrap();
    ctx.manipulate(2u64, Mode::World, Operation::Translate, &mut second, None, &mut draw)
        .unwrap();
    assert!(ctx.is_using_id(1u64));
    assert!(!ctx.is_using_id(2u64));

    ctx.new_frame(drag([465.0, 400.0]));
    ctx.manipulate(1u64, Mode::World, Operation::Translate, &mut first, None, &mut draw)
        .unwrap();
    let moved = ctx
        .manipulate(2u64, Mode::World, Operation::Translate, &mut second, None, &mut draw)
        .unwrap();
    assert!(!moved);
    assert!(first.w_axis.x > 0.2);
    assert_eq!(second, Mat4::IDENTITY);
}

#[test]
fn hide_locked_skips_locked_handles() {
    let locked_frame = |flags: ConfigFlags| {
        let mut ctx = context();
        ctx.set_config_flags(flags);
        let mut model = Mat4::IDENTITY;
        ctx.new_frame(idle([10.0, 10.0]));
        let mut draw = DrawCommands::new();
        let mut gizmo = ctx
            .begin("model", Mode::World, &mut model, AxisFlags::X, &mut draw)
            .unwrap();
        gizmo.translate(None);
        gizmo.end();
        draw
    };
    let arrowheads = |draw: &DrawCommands| -> Vec<[glam::Vec2; 3]> {
        draw.iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Triangle { points, .. } => Some(*points),
                _ => None,
            })
            .collect()
    };

    let shown = locked_frame(ConfigFlags::empty());
    let hidden = locked_frame(ConfigFlags::HIDE_LOCKED);
    assert_eq!(arrowheads(&shown).len(), 2);
    assert!(hidden.len() < shown.len());

    // Only the Y arrow remains, straight above the origin
    let remaining = arrowheads(&hidden);
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].iter().all(|p| (p.x - 400.0).abs() < 10.0 && p.y < 400.0));
}

#[test]
fn last_gizmo_decides_over() {
    let mut ctx = context();
    let mut near = Mat4::IDENTITY;
    let mut far = Mat4::from_translation(glam::Vec3::new(2.0, 2.0, 0.0));

    ctx.new_frame(idle([425.0, 400.0]));
    let mut draw = DrawCommands::new();
    ctx.manipulate("near", Mode::World, Operation::Translate, &mut near, None, &mut draw)
        .unwrap();
    assert!(ctx.is_over());
    ctx.manipulate("far", Mode::World, Operation::Translate, &mut far, None, &mut draw)
        .unwrap();
    assert!(!ctx.is_over());

    ctx.new_frame(idle([425.0, 400.0]));
    ctx.manipulate("far", Mode::World, Operation::Translate, &mut far, None, &mut draw)
        .unwrap();
    ctx.manipulate("near", Mode::World, Operation::Translate, &mut near, None, &mut draw)
        .unwrap();
    assert!(ctx.is_over());
}

#[test]
fn dragging_keeps_over_after_other_gizmos() {
    let mut ctx = context();
    let mut near = Mat4::IDENTITY;
    let mut far = Mat4::from_translation(glam::Vec3::new(2.0, 2.0, 0.0));
    let mut draw = DrawCommands::new();

    ctx.new_frame(press([425.0, 400.0]));
    ctx.manipulate("near", Mode::World, Operation::Translate, &mut near, None, &mut draw)
        .unwrap();
    ctx.manipulate("far", Mode::World, Operation::Translate, &mut far, None, &mut draw)
        .unwrap();
    assert!(ctx.is_using_id("near"));
    assert!(ctx.is_over());
}
