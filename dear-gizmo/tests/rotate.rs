mod common;

use approx::assert_relative_eq;
use common::{context, drag, idle, press, screen};
use dear_gizmo::{DrawCommands, GizmoContext, Mode, Operation};
use glam::{Mat4, Vec2, Vec3};

fn rotate_frame(ctx: &mut GizmoContext, mode: Mode, model: &mut Mat4, snap: Option<[f32; 3]>) -> DrawCommands {
    let mut draw = DrawCommands::new();
    ctx.manipulate("model", mode, Operation::Rotate, model, snap, &mut draw)
        .unwrap();
    draw
}

#[test]
fn screen_ring_quarter_turn() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;

    // The screen ring has a 44 px radius on an 800 px viewport
    ctx.new_frame(press([444.0, 400.0]));
    rotate_frame(&mut ctx, Mode::World, &mut model, None);
    assert!(ctx.is_using());

    ctx.new_frame(drag([400.0, 356.0]));
    rotate_frame(&mut ctx, Mode::World, &mut model, None);

    let x_axis = model.x_axis.truncate();
    assert_relative_eq!(x_axis.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(x_axis.y, 1.0, epsilon = 1e-4);
    assert_relative_eq!(model.z_axis.z, 1.0, epsilon = 1e-4);
}

#[test]
fn snapped_angle_and_info() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;
    let snap = Some([45.0, 0.0, 0.0]);

    ctx.new_frame(press([444.0, 400.0]));
    rotate_frame(&mut ctx, Mode::World, &mut model, snap);

    // 80 degrees counter-clockwise on screen snaps to 90
    let angle = 80f32.to_radians();
    ctx.new_frame(drag([400.0 + 44.0 * angle.cos(), 400.0 - 44.0 * angle.sin()]));
    let draw = rotate_frame(&mut ctx, Mode::World, &mut model, snap);

    assert_relative_eq!(model.x_axis.y, 1.0, epsilon = 1e-4);
    assert!(draw.texts().any(|text| text == "Screen : -90.00 deg -1.57 rad"));
}

#[test]
fn local_rotation_keeps_scale_and_translation() {
    let mut ctx = context();
    let mut model = Mat4::from_scale(Vec3::splat(2.0));

    ctx.new_frame(press([444.0, 400.0]));
    rotate_frame(&mut ctx, Mode::Local, &mut model, None);
    ctx.new_frame(drag([400.0, 356.0]));
    rotate_frame(&mut ctx, Mode::Local, &mut model, None);

    assert_relative_eq!(model.x_axis.y, 2.0, epsilon = 1e-3);
    assert_relative_eq!(model.x_axis.truncate().length(), 2.0, epsilon = 1e-3);
    assert_relative_eq!(model.w_axis.truncate().length(), 0.0, epsilon = 1e-5);
}

#[test]
fn world_rotation_keeps_translation() {
    let mut ctx = context();
    let offset = Vec3::new(1.0, 0.5, 0.0);
    let mut model = Mat4::from_translation(offset);
    let center = screen(offset);

    ctx.new_frame(press(center + Vec2::new(44.0, 0.0)));
    rotate_frame(&mut ctx, Mode::World, &mut model, None);
    assert!(ctx.is_using());
    ctx.new_frame(drag(center - Vec2::new(0.0, 44.0)));
    rotate_frame(&mut ctx, Mode::World, &mut model, None);

    assert_relative_eq!(model.x_axis.x, 0.0, epsilon = 1e-3);
    assert_relative_eq!(model.x_axis.y, 1.0, epsilon = 1e-3);
    assert_eq!(model.w_axis.truncate(), offset);
}

#[test]
fn angle_survives_until_next_drag() {
    let mut ctx = context();
    let mut model = Mat4::IDENTITY;

    ctx.new_frame(press([444.0, 400.0]));
    rotate_frame(&mut ctx, Mode::World, &mut model, None);
    ctx.new_frame(drag([400.0, 356.0]));
    rotate_frame(&mut ctx, Mode::World, &mut model, None);

    let angle = |ctx: &GizmoContext| ctx.snapshot().widget.map(|widget| widget.rotation_angle);
    let dragged = angle(&ctx).unwrap();
    assert_relative_eq!(dragged, -std::f32::consts::FRAC_PI_2, epsilon = 1e-3);

    // Releasing and hovering elsewhere keeps the last angle
    ctx.new_frame(idle([10.0, 10.0]));
    rotate_frame(&mut ctx, Mode::World, &mut model, None);
    assert_eq!(angle(&ctx), Some(dragged));

    // A new drag starts from zero
    ctx.new_frame(press([444.0, 400.0]));
    rotate_frame(&mut ctx, Mode::World, &mut model, None);
    assert_relative_eq!(angle(&ctx).unwrap(), 0.0, epsilon = 1e-3);
}
