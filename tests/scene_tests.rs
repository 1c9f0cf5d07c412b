//! Scene Tests
//!
//! Tests for:
//! - Hierarchy: attach, re-parenting, depth-first name lookup
//! - World matrices under the scene's own rotation
//! - Transform Y rotation and look_at
//! - PerspectiveCamera aspect/projection and the default light rig

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use atlas_giant::config::{LightingConfig, SceneConfig};
use atlas_giant::scene::{Light, LightKind, Node, PerspectiveCamera, Scene, Transform};

const EPSILON: f32 = 1e-4;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn attach_moves_node_out_of_roots() {
    let mut scene = Scene::new();
    let parent = scene.create_node_with_name("parent");
    let child = scene.create_node_with_name("child");
    assert_eq!(scene.root_nodes.len(), 2);

    scene.attach(child, parent);
    assert_eq!(scene.root_nodes, vec![parent]);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert_eq!(scene.get_node(parent).unwrap().children(), &[child]);
}

#[test]
fn reparent_detaches_from_old_parent() {
    let mut scene = Scene::new();
    let a = scene.create_node_with_name("a");
    let b = scene.create_node_with_name("b");
    let child = scene.add_to_parent(Node::with_name("child"), a);

    scene.attach(child, b);
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
}

#[test]
fn attach_to_self_is_ignored() {
    let mut scene = Scene::new();
    let node = scene.create_node_with_name("n");
    scene.attach(node, node);
    assert_eq!(scene.get_node(node).unwrap().parent(), None);
    assert_eq!(scene.root_nodes, vec![node]);
}

#[test]
fn name_lookup_is_depth_first_and_scoped() {
    let mut scene = Scene::new();
    let root = scene.create_node_with_name("root");
    let left = scene.add_to_parent(Node::with_name("left"), root);
    let deep = scene.add_to_parent(Node::with_name("Cube003"), left);
    scene.add_to_parent(Node::with_name("Cube003"), root);
    let other = scene.create_node_with_name("other");

    assert_eq!(scene.get_node_by_name(root, "Cube003"), Some(deep));
    assert_eq!(scene.get_node_by_name(root, "root"), Some(root));
    assert_eq!(scene.get_node_by_name(root, "other"), None);
    assert_eq!(scene.find_node_by_name("other"), Some(other));
}

// ============================================================================
// World Matrices
// ============================================================================

#[test]
fn scene_rotation_applies_to_every_root() {
    let mut scene = Scene::new();
    let mut node = Node::with_name("offset");
    node.transform.position = Vec3::X;
    let root = scene.add_node(node);
    let child = scene.add_to_parent(Node::with_name("child"), root);
    scene.get_node_mut(child).unwrap().transform.position = Vec3::X;

    scene.transform.set_rotation_y(FRAC_PI_2);
    scene.update_world_matrices();

    let world = |h| Vec3::from(scene.get_node(h).unwrap().transform.world_matrix().translation);
    // +X turned a quarter about +Y lands on -Z.
    assert!(approx_vec(world(root), Vec3::new(0.0, 0.0, -1.0)));
    assert!(approx_vec(world(child), Vec3::new(0.0, 0.0, -2.0)));
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn rotation_y_round_trips_small_angles() {
    let mut transform = Transform::new();
    for angle in [-0.15_f32, -0.01, 0.0, 0.07, 0.15] {
        transform.set_rotation_y(angle);
        assert!((transform.rotation_y() - angle).abs() < EPSILON);
    }
}

#[test]
fn look_at_points_negative_z_at_target() {
    let mut transform = Transform::new();
    transform.position = Vec3::new(-35.0, 8.0, 0.0);
    let target = Vec3::new(0.0, 2.0, 0.0);
    transform.look_at(target, Vec3::Y);

    let forward = transform.rotation * Vec3::NEG_Z;
    assert!(approx_vec(forward, (target - transform.position).normalize()));
}

#[test]
fn look_at_degenerate_target_keeps_rotation() {
    let mut transform = Transform::new();
    transform.set_rotation_y(0.3);
    let before = transform.rotation;
    transform.look_at(transform.position, Vec3::Y);
    assert_eq!(transform.rotation, before);
}

// ============================================================================
// Camera & Lights
// ============================================================================

#[test]
fn camera_keeps_degrees_and_rebuilds_projection() {
    let mut camera = PerspectiveCamera::new(15.0, 1.0, 1.0, 100.0);
    assert!((camera.fov_degrees() - 15.0).abs() < EPSILON);

    let square = *camera.projection_matrix();
    camera.aspect = 1.6;
    camera.update_projection_matrix();
    let wide = *camera.projection_matrix();

    // Only the horizontal scale depends on aspect.
    assert!((square.x_axis.x / wide.x_axis.x - 1.6).abs() < EPSILON);
    assert!((square.y_axis.y - wide.y_axis.y).abs() < EPSILON);
}

#[test]
fn camera_frames_the_model() {
    let config = SceneConfig::default().camera;
    let mut camera = PerspectiveCamera::new(config.fov, 1.6, config.near, config.far);
    camera.set_position(Vec3::from_array(config.position));
    camera.look_at(Vec3::from_array(config.look_at));

    let expected = (Vec3::new(0.0, 2.0, 0.0) - Vec3::new(-35.0, 8.0, 0.0)).normalize();
    assert!(approx_vec(camera.forward(), expected));

    // The look-at point projects onto the screen center.
    let clip = camera.view_projection_matrix() * Vec3::new(0.0, 2.0, 0.0).extend(1.0);
    assert!((clip.x / clip.w).abs() < EPSILON);
    assert!((clip.y / clip.w).abs() < EPSILON);
}

#[test]
fn default_light_rig() {
    let [directional, ambient] = Light::rig_from_config(&LightingConfig::default());

    assert_eq!(directional.color, Vec3::ONE);
    assert!((directional.intensity - 3.0).abs() < EPSILON);
    assert!(directional.cast_shadows);
    assert_eq!(
        directional.kind,
        LightKind::Directional {
            position: Vec3::new(-2.0, 8.0, -5.0)
        }
    );

    assert_eq!(ambient.kind, LightKind::Ambient);
    assert!((ambient.intensity - 1.5).abs() < EPSILON);
    assert!(!ambient.cast_shadows);
}

#[test]
fn only_directional_lights_cast_shadows() {
    let ambient = Light::new_ambient(Vec3::ONE, 1.0).with_shadows(true);
    assert!(!ambient.cast_shadows);

    let directional = Light::new_directional(Vec3::ONE, 1.0, Vec3::Y).with_shadows(true);
    assert!(directional.cast_shadows);
    assert!(!directional.with_shadows(false).cast_shadows);
}
