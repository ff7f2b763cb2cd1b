//! The drive engine: one context object owning all mutable session state.
//!
//! Nothing here is global — the scene, camera, options, and route state all
//! live on [`DriveEngine`], whose lifetime is the running session. The
//! external loader populates the scene, then calls
//! [`on_scene_ready`](DriveEngine::on_scene_ready) once; the external frame
//! scheduler calls [`tick`](DriveEngine::tick) with a monotonically
//! increasing timestamp. Ticks arriving before the scene is ready are
//! no-ops, so the loader may finish at any point after the loop starts.

use glam::{Mat4, Vec3};

use crate::camera::{frame_bounds, Camera};
use crate::curve::{build_route_spline, ClosedSpline};
use crate::error::MotorcadeError;
use crate::fleet::{ActorRegistry, CorrectionTable, FleetAnimator};
use crate::options::Options;
use crate::scene::{
    compute_subtree_bounds, dump, Aabb, NodeId, Scene, SceneNode,
};

// ---------------------------------------------------------------------------
// RouteConfig
// ---------------------------------------------------------------------------

/// Asset-specific route description: which points the fleet drives through,
/// how actor meshes are named, and how the rendered route is placed in the
/// world. Configuration data, typically supplied as a literal alongside the
/// model.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Ordered control points of the closed route, in route-local space.
    pub control_points: Vec<Vec3>,
    /// Per-class actor corrections.
    pub corrections: CorrectionTable,
    /// Name of the node grouping all actor meshes in the loaded model.
    pub actor_group: String,
    /// Local scale of the route-visual node.
    pub path_scale: Vec3,
    /// Local position of the route-visual node.
    pub path_position: Vec3,
}

// ---------------------------------------------------------------------------
// DriveEngine
// ---------------------------------------------------------------------------

/// Route state assembled once by `on_scene_ready`.
struct Drive {
    spline: ClosedSpline,
    registry: ActorRegistry,
    animator: FleetAnimator,
    /// Node whose world transform remaps route samples into world space.
    path_visual: NodeId,
    /// Tessellated route polyline, for a line renderer to pick up.
    line_points: Vec<Vec3>,
    /// Scene bounds captured at load; reused by `reframe`.
    bounds: Aabb,
}

/// The drive session context.
pub struct DriveEngine {
    scene: Scene,
    camera: Camera,
    options: Options,
    route: RouteConfig,
    drive: Option<Drive>,
}

impl DriveEngine {
    /// Engine with an empty scene, parked camera, and the given route.
    #[must_use]
    pub fn new(route: RouteConfig, options: Options, aspect: f32) -> Self {
        let camera = Camera::from_options(&options.camera, aspect);
        Self {
            scene: Scene::new(),
            camera,
            options,
            route,
            drive: None,
        }
    }

    // -- Accessors --

    /// The scene graph.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access, used by the loader to populate the model.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether `on_scene_ready` has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.drive.is_some()
    }

    /// The registered fleet, once the scene is ready.
    #[must_use]
    pub fn registry(&self) -> Option<&ActorRegistry> {
        self.drive.as_ref().map(|d| &d.registry)
    }

    /// Tessellated route polyline, once the scene is ready.
    #[must_use]
    pub fn route_line(&self) -> Option<&[Vec3]> {
        self.drive.as_ref().map(|d| d.line_points.as_slice())
    }

    /// Scene bounds captured at load, once the scene is ready.
    #[must_use]
    pub fn scene_bounds(&self) -> Option<Aabb> {
        self.drive.as_ref().map(|d| d.bounds)
    }

    // -- Setup --

    /// One-time setup after the loader has populated the scene under
    /// `model_root`: build the route spline and its visual node, discover
    /// actors, compute scene bounds, and frame the camera.
    ///
    /// # Errors
    ///
    /// Returns [`MotorcadeError::InvalidPath`] for a malformed route and
    /// [`MotorcadeError::UnmatchedActor`] when an actor matches no
    /// correction rule. A missing actor group is not an error; the engine
    /// comes up with an empty fleet.
    pub fn on_scene_ready(
        &mut self,
        model_root: NodeId,
    ) -> Result<(), MotorcadeError> {
        let spline = build_route_spline(
            &self.route.control_points,
            self.options.path.corner_tightness,
            self.options.path.arc_samples,
        )?;
        let line_points = spline.tessellate(self.options.path.line_divisions);

        // The rendered route is scaled and positioned independently of the
        // logical curve; its world transform is what samples remap through.
        let root = self.scene.root();
        let path_visual = self.scene.insert(
            root,
            SceneNode::line("route")
                .at(self.route.path_position)
                .scaled(self.route.path_scale),
        );

        self.scene.update_world_transforms();
        log::debug!(
            "loaded scene graph:\n{}",
            dump::dump_tree(&self.scene, model_root)
        );

        let registry = match self
            .scene
            .find_in_subtree(model_root, &self.route.actor_group)
        {
            Some(group) => ActorRegistry::discover(
                &mut self.scene,
                group,
                &self.route.corrections,
            )?,
            None => {
                log::warn!(
                    "actor group {:?} not found in model; fleet is empty",
                    self.route.actor_group
                );
                ActorRegistry::default()
            }
        };

        // Discovery added mount nodes; refresh before the bounds query.
        self.scene.update_world_transforms();
        let bounds = compute_subtree_bounds(&self.scene, model_root);
        frame_bounds(&mut self.camera, &bounds);

        log::info!(
            "scene ready: {} actors, bounds diagonal {:.1}",
            registry.len(),
            bounds.diagonal()
        );

        self.drive = Some(Drive {
            spline,
            registry,
            animator: FleetAnimator::new(
                self.options.path.speed_scale,
                self.options.path.look_ahead,
            ),
            path_visual,
            line_points,
            bounds,
        });
        Ok(())
    }

    // -- Frame loop --

    /// Advance the fleet to its pose at `elapsed_seconds` and refresh world
    /// transforms. A no-op until the scene is ready.
    pub fn tick(&mut self, elapsed_seconds: f64) {
        let Some(drive) = self.drive.as_ref() else {
            return;
        };
        let path_world = self
            .scene
            .node(drive.path_visual)
            .map_or(Mat4::IDENTITY, SceneNode::world_matrix);
        drive.animator.update(
            &mut self.scene,
            &drive.registry,
            &drive.spline,
            &path_world,
            elapsed_seconds,
        );
        self.scene.update_world_transforms();
    }

    // -- Interactive adjustments --

    /// Update the camera aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Change the vertical field of view and re-frame the loaded scene.
    /// Safe to call repeatedly from a debug control; framing does not
    /// drift for a fixed volume and field of view.
    pub fn set_fovy(&mut self, fovy: f32) {
        self.options.camera.fovy = fovy;
        self.camera.fovy = fovy;
        self.reframe();
    }

    /// Re-run camera framing against the bounds captured at load.
    pub fn reframe(&mut self) {
        if let Some(drive) = self.drive.as_ref() {
            frame_bounds(&mut self.camera, &drive.bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::fleet::CorrectionRule;
    use crate::scene::Aabb;

    fn triangle_route() -> RouteConfig {
        RouteConfig {
            control_points: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(5.0, 0.0, 8.0),
            ],
            corrections: CorrectionTable::new(vec![
                CorrectionRule::new("Car_08", 0.0, Vec3::new(PI * 0.5, 0.0, PI * 0.5)),
                CorrectionRule::new("CAR_03", 33.0, Vec3::new(0.0, PI, 0.0)),
            ]),
            actor_group: "Cars".to_owned(),
            path_scale: Vec3::ONE,
            path_position: Vec3::ZERO,
        }
    }

    /// Two-car model under a "Cars" group with a ground slab for bounds.
    fn populate_model(engine: &mut DriveEngine) -> NodeId {
        let scene = engine.scene_mut();
        let root = scene.root();
        let model = scene.insert(root, SceneNode::group("Model"));
        let _ground = scene.insert(
            model,
            SceneNode::mesh(
                "ground",
                Aabb::new(
                    Vec3::new(-20.0, -0.1, -20.0),
                    Vec3::new(20.0, 0.0, 20.0),
                ),
            ),
        );
        let cars = scene.insert(model, SceneNode::group("Cars"));
        let unit = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let _a = scene.insert(
            cars,
            SceneNode::mesh("Car_08.001", unit).at(Vec3::new(3.0, 0.5, 0.0)),
        );
        let _b = scene.insert(
            cars,
            SceneNode::mesh("CAR_03.001", unit).at(Vec3::new(-3.0, 0.5, 0.0)),
        );
        model
    }

    fn ready_engine() -> DriveEngine {
        let mut engine =
            DriveEngine::new(triangle_route(), Options::default(), 2.0);
        let model = populate_model(&mut engine);
        engine.on_scene_ready(model).unwrap();
        engine
    }

    #[test]
    fn ticks_before_scene_ready_are_no_ops() {
        let mut engine =
            DriveEngine::new(triangle_route(), Options::default(), 2.0);
        let camera_before = engine.camera().eye;
        engine.tick(0.5);
        engine.tick(1.0);
        assert!(!engine.is_ready());
        assert_eq!(engine.camera().eye, camera_before);
    }

    #[test]
    fn scene_ready_frames_camera_on_model_bounds() {
        let engine = ready_engine();
        let bounds = engine.scene_bounds().unwrap();
        assert_eq!(engine.camera().target, bounds.center());
        let diagonal = bounds.diagonal();
        assert!((engine.camera().znear - diagonal / 100.0).abs() < 1e-5);
        assert!((engine.camera().zfar - diagonal * 100.0).abs() < 1e-2);
    }

    #[test]
    fn scene_ready_registers_fleet_with_even_phases() {
        let engine = ready_engine();
        let registry = engine.registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.actors()[0].phase, 0.0);
        assert_eq!(registry.actors()[1].phase, 0.5);
    }

    #[test]
    fn ticking_moves_mounts_onto_the_route() {
        let mut engine = ready_engine();
        engine.tick(0.0);

        let registry = engine.registry().unwrap();
        let mounts: Vec<NodeId> =
            registry.actors().iter().map(|a| a.mount).collect();
        let before: Vec<Vec3> = mounts
            .iter()
            .map(|&m| engine.scene().node(m).unwrap().position)
            .collect();

        engine.tick(10.0);
        let after: Vec<Vec3> = mounts
            .iter()
            .map(|&m| engine.scene().node(m).unwrap().position)
            .collect();
        for (b, a) in before.iter().zip(&after) {
            assert!((*b - *a).length() > 1e-4, "mount did not move");
        }
    }

    #[test]
    fn phase_separation_holds_at_every_simulated_time() {
        // speed_scale 0.01 → after 1 simulated second each parameter has
        // advanced by 0.01; the two actors stay exactly half a loop apart.
        let engine = ready_engine();
        let registry = engine.registry().unwrap();
        let animator = FleetAnimator::new(0.01, 0.01);
        for t in [0.0, 1.0, 2.5, 99.0] {
            let u0 = animator.path_parameter(t, registry.actors()[0].phase);
            let u1 = animator.path_parameter(t, registry.actors()[1].phase);
            assert!(((u1 - u0).rem_euclid(1.0) - 0.5).abs() < 1e-9);
        }
        let delta = animator.path_parameter(1.0, 0.0)
            - animator.path_parameter(0.0, 0.0);
        assert!((delta - 0.01).abs() < 1e-12);
    }

    #[test]
    fn missing_actor_group_yields_empty_fleet() {
        let mut route = triangle_route();
        route.actor_group = "Trams".to_owned();
        let mut engine = DriveEngine::new(route, Options::default(), 2.0);
        let model = populate_model(&mut engine);
        engine.on_scene_ready(model).unwrap();
        assert!(engine.registry().unwrap().is_empty());
        // Fleet-free ticks still run.
        engine.tick(1.0);
    }

    #[test]
    fn unmatched_actor_fails_scene_ready() {
        let mut route = triangle_route();
        route.corrections =
            CorrectionTable::new(vec![CorrectionRule::new(
                "Car_08",
                0.0,
                Vec3::ZERO,
            )]);
        let mut engine = DriveEngine::new(route, Options::default(), 2.0);
        let model = populate_model(&mut engine);
        let err = engine.on_scene_ready(model).unwrap_err();
        assert!(matches!(err, MotorcadeError::UnmatchedActor(_)));
    }

    #[test]
    fn bad_route_fails_scene_ready() {
        let mut route = triangle_route();
        route.control_points.truncate(2);
        let mut engine = DriveEngine::new(route, Options::default(), 2.0);
        let model = populate_model(&mut engine);
        assert!(matches!(
            engine.on_scene_ready(model),
            Err(MotorcadeError::InvalidPath { .. })
        ));
    }

    #[test]
    fn fov_change_reframes_without_drift() {
        let mut engine = ready_engine();
        engine.set_fovy(60.0);
        let eye = engine.camera().eye;
        engine.set_fovy(60.0);
        assert!((engine.camera().eye - eye).length() < 1e-4);

        // Narrower field of view backs the camera away.
        engine.set_fovy(30.0);
        let center = engine.scene_bounds().unwrap().center();
        assert!(engine.camera().eye.distance(center) > eye.distance(center));
    }

    #[test]
    fn route_line_closes_and_matches_divisions() {
        let engine = ready_engine();
        let line = engine.route_line().unwrap();
        assert_eq!(line.len(), Options::default().path.line_divisions + 1);
        assert!((line[0] - line[line.len() - 1]).length() < 1e-3);
    }
}
