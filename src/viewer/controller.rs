use super::camera::CameraState;
use super::hover::HoverEase;
use super::layout::{Debounce, Viewport, responsive_scale, screen_y_to_world_y};
use super::overlay::{ButtonBar, resolve_link};
use super::rotation::PointerRotation;
use crate::animation::{AnimationClip, IntroIdleSequencer, SequenceEvent};
use crate::asset::SceneAsset;
use crate::error::ViewerError;
use crate::scene::{Aabb, NodeId, Ray, SceneGraph, Transform};
use crate::settings::Settings;
use nalgebra_glm as glm;

/// Nodes created for the loaded model
#[derive(Debug, Clone, Copy)]
pub struct ModelHandle {
    /// Carries the responsive scale and vertical placement
    pub object: NodeId,
    /// Shifts the bounding-box center to the object's origin
    pub offset: NodeId,
    /// Bounding diagonal before any scaling; `None` for an empty model
    pub base_diagonal: Option<f32>,
}

/// Things the host has to act on after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    ButtonsRevealed,
    ResizeSurface(Viewport),
    Navigate(String),
}

pub struct ViewerController {
    settings: Settings,
    graph: SceneGraph,
    pivot: NodeId,
    camera: CameraState,
    hover: HoverEase,
    rotation: PointerRotation,
    sequencer: IntroIdleSequencer,
    model: Option<ModelHandle>,
    viewport: Viewport,
    reference_top: Option<f32>,
    resize_debounce: Debounce,
    pending_layout: bool,
    buttons: ButtonBar,
    clock: f32,
}

impl ViewerController {
    pub fn new(settings: Settings, viewport: Viewport) -> Self {
        let mut graph = SceneGraph::new();
        let pivot = graph.add_node("pivot", SceneGraph::ROOT, Transform::identity());
        let camera = CameraState::new(&settings.camera, viewport.aspect());
        let hover = HoverEase::new(settings.camera.hover_step);
        let rotation = PointerRotation::new(settings.interaction.clone());
        let resize_debounce = Debounce::new(settings.layout.resize_debounce);
        let mut buttons = ButtonBar::new(&settings.overlay);
        buttons.reset_visibility();

        Self {
            settings,
            graph,
            pivot,
            camera,
            hover,
            rotation,
            sequencer: IntroIdleSequencer::none(),
            model: None,
            viewport,
            reference_top: None,
            resize_debounce,
            pending_layout: false,
            buttons,
            clock: 0.0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn pivot(&self) -> NodeId {
        self.pivot
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn hover(&self) -> &HoverEase {
        &self.hover
    }

    pub fn rotation(&self) -> &PointerRotation {
        &self.rotation
    }

    pub fn sequencer(&self) -> &IntroIdleSequencer {
        &self.sequencer
    }

    pub fn buttons(&self) -> &ButtonBar {
        &self.buttons
    }

    pub fn model(&self) -> Option<&ModelHandle> {
        self.model.as_ref()
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn reference_top(&self) -> Option<f32> {
        self.reference_top
    }

    pub fn is_layout_pending(&self) -> bool {
        self.pending_layout
    }

    /// Seconds accumulated from `tick`
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Attach the decoded model under the pivot and start its animations.
    /// Only the first load is accepted.
    pub fn on_asset_loaded(&mut self, asset: SceneAsset) {
        if self.model.is_some() {
            log::warn!("model already loaded, ignoring {}", asset.name);
            return;
        }

        let object = self.graph.add_node("model", self.pivot, Transform::identity());
        let offset = self.graph.add_node("model-center", object, Transform::identity());
        let map = self.graph.instantiate(&asset, offset);
        self.graph.update_world_matrices();

        let bounds = Aabb::from_subtree(&self.graph, object);
        let base_diagonal = if bounds.is_empty() || bounds.diagonal() <= 0.0 {
            None
        } else {
            Some(bounds.diagonal())
        };
        let centering = Transform::from_translation(-bounds.center());
        let node = self.graph.node_mut(offset);
        node.local = centering.clone();
        node.rest = centering;

        let clips: Vec<AnimationClip> = asset.clips.iter().map(|c| c.retargeted(&map)).collect();
        log::info!(
            "model {} ready: {} meshes, {} clips, diagonal {:?}",
            asset.name,
            asset.meshes.len(),
            clips.len(),
            base_diagonal
        );
        self.sequencer = IntroIdleSequencer::new(clips);
        self.model = Some(ModelHandle {
            object,
            offset,
            base_diagonal,
        });

        self.update_layout();
        self.pending_layout = true;
        self.graph.update_world_matrices();
    }

    pub fn on_asset_failed(&mut self, err: &ViewerError) {
        log::error!("❌ Error loading model: {err}");
    }

    /// Immediate half of a resize; layout follows once resizing settles
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.width, viewport.height);
        self.resize_debounce.trigger(self.clock);
    }

    /// Top edge of the button bar in viewport pixels, if it is on screen
    pub fn set_reference_top(&mut self, top: Option<f32>) {
        self.reference_top = top;
    }

    pub fn on_pointer_move(&mut self, position: glm::Vec2) {
        let Some(model) = self.model else {
            return;
        };
        if self.viewport.is_empty() {
            return;
        }
        let ndc = CameraState::pointer_ndc(position, self.viewport.width, self.viewport.height);
        let ray = Ray::from_ndc(ndc, &self.camera.inverse_view_projection());
        let hit = ray.cast(&self.graph, model.object).is_some();
        self.rotation.on_pointer_move(position, hit);
    }

    pub fn on_pointer_leave(&mut self) {
        self.rotation.on_pointer_leave();
    }

    pub fn on_button_enter(&mut self, index: usize) {
        if self.buttons.set_hovered(index) {
            self.hover.on_enter();
        }
    }

    pub fn on_button_leave(&mut self, index: usize) {
        if self.buttons.clear_hovered(index) {
            self.hover.on_leave();
        }
    }

    pub fn on_button_click(&mut self, index: usize) {
        self.buttons.begin_exit(index);
    }

    /// Place and scale the model for the current viewport and button bar
    pub fn update_layout(&mut self) {
        let Some(model) = self.model else {
            return;
        };
        let Some(base) = model.base_diagonal else {
            self.graph.node_mut(model.object).local.translation.y = 0.0;
            return;
        };
        if self.viewport.is_empty() {
            return;
        }

        let scale = responsive_scale(self.viewport, base, &self.settings.layout);
        let y = match self.reference_top {
            Some(top) => {
                let distance = glm::distance(&self.camera.position, &self.graph.world_position(model.object));
                screen_y_to_world_y(top / 2.0, self.viewport.height, self.camera.fov, distance)
            }
            None => 0.0,
        };

        let local = &mut self.graph.node_mut(model.object).local;
        local.set_uniform_scale(scale);
        local.translation.y = y;
        log::debug!(
            "layout {}x{}: scale {scale:.4}, y {y:.4}",
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Advance one frame
    pub fn tick(&mut self, dt: f32) -> Vec<ViewerEvent> {
        let mut events = Vec::new();
        self.clock += dt;

        if self.pending_layout {
            self.pending_layout = false;
            self.update_layout();
        }

        if self.resize_debounce.poll(self.clock) {
            self.update_layout();
            self.camera.set_aspect(self.viewport.width, self.viewport.height);
            events.push(ViewerEvent::ResizeSurface(self.viewport));
        }

        if let Some(SequenceEvent::IdleStarted) = self.sequencer.update(dt, &mut self.graph) {
            self.buttons.reveal();
            self.pending_layout = true;
            events.push(ViewerEvent::ButtonsRevealed);
        }

        let t = self.hover.step();
        let pose = self.camera.original.lerp(&self.camera.target, t);
        self.camera.apply_pose(&pose);

        if self.model.is_some() {
            let angle = self.rotation.step();
            self.graph.node_mut(self.pivot).local.set_euler_xyz(angle.x, angle.y, 0.0);
        }

        if let Some(link) = self.buttons.advance(dt) {
            let target = resolve_link(&self.settings.overlay.base_url, &link);
            events.push(ViewerEvent::Navigate(target));
        }

        self.graph.update_world_matrices();
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Interpolation, SequencePhase, Track, TrackValues};
    use crate::asset::{AssetNode, CpuMesh};

    fn mesh(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> CpuMesh {
        CpuMesh {
            name: "mesh".to_string(),
            normals: vec![[0.0, 0.0, 1.0]; positions.len()],
            positions,
            indices,
            base_color: [1.0; 4],
        }
    }

    fn clip(name: &str, duration: f32) -> AnimationClip {
        AnimationClip::new(
            name,
            vec![Track {
                node: 0,
                times: vec![0.0, duration],
                values: TrackValues::Translation(vec![glm::vec3(0.0, 0.0, 0.0), glm::vec3(0.0, 0.5, 0.0)]),
                interpolation: Interpolation::Linear,
            }],
        )
    }

    fn asset(mesh: CpuMesh, clips: Vec<AnimationClip>) -> SceneAsset {
        SceneAsset {
            name: "logo".to_string(),
            nodes: vec![AssetNode {
                name: "logo".to_string(),
                meshes: vec![0],
                ..Default::default()
            }],
            roots: vec![0],
            meshes: vec![mesh],
            clips,
        }
    }

    /// Segment of length 2 along X centered on (2, 1, 1)
    fn segment_asset(clips: Vec<AnimationClip>) -> SceneAsset {
        asset(mesh(vec![[1.0, 1.0, 1.0], [3.0, 1.0, 1.0], [2.0, 1.0, 1.0]], vec![0, 1, 2]), clips)
    }

    fn plane_asset() -> SceneAsset {
        asset(
            mesh(
                vec![[-10.0, -10.0, 0.0], [10.0, -10.0, 0.0], [10.0, 10.0, 0.0], [-10.0, 10.0, 0.0]],
                vec![0, 1, 2, 0, 2, 3],
            ),
            Vec::new(),
        )
    }

    fn controller(width: f32, height: f32) -> ViewerController {
        ViewerController::new(Settings::default(), Viewport::new(width, height))
    }

    #[test]
    fn without_a_model_everything_is_a_no_op() {
        let mut c = controller(800.0, 600.0);
        assert!(!c.buttons().is_visible());
        c.on_pointer_move(glm::vec2(10.0, 10.0));
        c.on_pointer_move(glm::vec2(400.0, 300.0));
        c.update_layout();
        for _ in 0..10 {
            assert!(c.tick(1.0 / 60.0).is_empty());
        }
        assert_eq!(c.rotation().velocity(), glm::vec2(0.0, 0.0));
        assert_eq!(c.graph().node(c.pivot()).local, Transform::identity());
    }

    #[test]
    fn load_centers_and_scales_the_model() {
        let mut c = controller(500.0, 800.0);
        c.on_asset_loaded(segment_asset(Vec::new()));
        let model = *c.model().unwrap();
        assert_eq!(model.base_diagonal, Some(2.0));
        assert_eq!(c.graph().node(model.offset).local.translation, glm::vec3(-2.0, -1.0, -1.0));

        let object = &c.graph().node(model.object).local;
        assert!((object.scale.x - 0.78125).abs() < 1e-6);
        assert_eq!(object.translation.y, 0.0);
        assert!(c.is_layout_pending());
        c.tick(1.0 / 60.0);
        assert!(!c.is_layout_pending());
    }

    #[test]
    fn second_load_is_ignored_and_diagonal_is_kept() {
        let mut c = controller(800.0, 800.0);
        c.on_asset_loaded(segment_asset(Vec::new()));
        let first = *c.model().unwrap();
        c.on_asset_loaded(plane_asset());
        let model = *c.model().unwrap();
        assert_eq!(model.object, first.object);
        assert_eq!(model.base_diagonal, Some(2.0));

        c.on_resize(Viewport::new(1600.0, 900.0));
        c.tick(0.2);
        assert_eq!(c.model().unwrap().base_diagonal, Some(2.0));
    }

    #[test]
    fn debounced_resize_relayouts_once() {
        let mut c = controller(800.0, 800.0);
        c.on_asset_loaded(segment_asset(Vec::new()));
        c.tick(0.01);

        c.on_resize(Viewport::new(500.0, 800.0));
        assert!((c.camera().aspect - 0.625).abs() < 1e-6);
        assert!(c.tick(0.1).is_empty());
        c.on_resize(Viewport::new(500.0, 800.0));
        assert!(c.tick(0.1).is_empty());
        let events = c.tick(0.1);
        assert_eq!(events, vec![ViewerEvent::ResizeSurface(Viewport::new(500.0, 800.0))]);
        let object = c.model().unwrap().object;
        assert!((c.graph().node(object).local.scale.x - 0.78125).abs() < 1e-6);
        assert!(c.tick(0.1).is_empty());
    }

    #[test]
    fn reference_top_lifts_the_model() {
        let mut c = controller(800.0, 800.0);
        c.on_asset_loaded(segment_asset(Vec::new()));
        let object = c.model().unwrap().object;
        let distance = glm::distance(&c.camera().position, &c.graph().world_position(object));

        c.set_reference_top(Some(600.0));
        c.update_layout();
        let expected = screen_y_to_world_y(300.0, 800.0, 80.0, distance);
        let y = c.graph().node(object).local.translation.y;
        assert!(expected > 0.0);
        assert!((y - expected).abs() < 1e-5);

        c.set_reference_top(None);
        c.update_layout();
        assert_eq!(c.graph().node(object).local.translation.y, 0.0);
    }

    #[test]
    fn empty_model_has_no_base_size() {
        let mut c = controller(800.0, 800.0);
        c.on_asset_loaded(asset(mesh(Vec::new(), Vec::new()), Vec::new()));
        let model = *c.model().unwrap();
        assert_eq!(model.base_diagonal, None);
        c.set_reference_top(Some(100.0));
        c.update_layout();
        let object = &c.graph().node(model.object).local;
        assert_eq!(object.translation.y, 0.0);
        assert_eq!(object.scale, glm::vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn buttons_appear_only_after_intro_finishes() {
        let mut c = controller(800.0, 600.0);
        c.on_asset_loaded(segment_asset(vec![clip("intro", 1.0), clip("idle", 2.0)]));
        assert_eq!(c.sequencer().phase(), SequencePhase::PlayingIntro);

        let mut revealed = 0;
        for frame in 0..120 {
            let events = c.tick(0.05);
            if events.contains(&ViewerEvent::ButtonsRevealed) {
                revealed += 1;
                assert!(frame >= 19, "revealed early at frame {frame}");
                assert!(c.is_layout_pending());
            }
            if revealed == 0 {
                assert!(!c.buttons().is_visible());
            }
        }
        assert_eq!(revealed, 1);
        assert!(c.buttons().is_visible());
        assert_eq!(c.sequencer().phase(), SequencePhase::PlayingIdle);
    }

    #[test]
    fn single_clip_never_reveals_buttons() {
        let mut c = controller(800.0, 600.0);
        c.on_asset_loaded(segment_asset(vec![clip("intro", 0.5)]));
        assert_eq!(c.sequencer().phase(), SequencePhase::NoAnimation);
        for _ in 0..100 {
            assert!(!c.tick(0.05).contains(&ViewerEvent::ButtonsRevealed));
        }
        assert!(!c.buttons().is_visible());
    }

    #[test]
    fn hover_needs_visible_buttons() {
        let mut c = controller(800.0, 600.0);
        c.on_button_enter(0);
        c.tick(0.016);
        assert_eq!(c.hover().progress(), 0.0);
        assert_eq!(c.camera().fov, 80.0);

        c.on_asset_loaded(segment_asset(vec![clip("intro", 0.1), clip("idle", 1.0)]));
        while !c.buttons().is_visible() {
            c.tick(0.05);
        }
        c.on_button_enter(0);
        for _ in 0..200 {
            c.tick(0.016);
        }
        assert_eq!(c.hover().progress(), 1.0);
        assert!((c.camera().fov - 50.0).abs() < 1e-5);
        assert!(glm::distance(&c.camera().position, &glm::vec3(0.0, 0.0, 2.75)) < 1e-5);

        c.on_button_leave(0);
        for _ in 0..200 {
            c.tick(0.016);
        }
        assert!((c.camera().fov - 80.0).abs() < 1e-5);
    }

    #[test]
    fn click_navigates_after_the_exit_delay() {
        let mut c = controller(800.0, 600.0);
        c.on_asset_loaded(segment_asset(vec![clip("intro", 0.1), clip("idle", 1.0)]));
        while !c.buttons().is_visible() {
            c.tick(0.05);
        }
        c.on_button_click(2);
        let mut navigated = Vec::new();
        for _ in 0..50 {
            for event in c.tick(0.05) {
                if let ViewerEvent::Navigate(link) = event {
                    navigated.push((c.buttons().exit_progress(), link));
                }
            }
        }
        assert_eq!(navigated, vec![(Some(1.0), "contact.html".to_string())]);
    }

    #[test]
    fn pointer_over_model_spins_the_pivot() {
        let mut c = controller(800.0, 800.0);
        c.on_asset_loaded(plane_asset());
        c.tick(0.016);
        c.on_pointer_move(glm::vec2(400.0, 400.0));
        assert!(c.rotation().is_over_model());
        c.on_pointer_move(glm::vec2(420.0, 400.0));
        assert!(c.rotation().velocity().y > 0.0);
        c.tick(0.016);
        assert_ne!(c.graph().node(c.pivot()).local.rotation, glm::quat_identity());

        c.on_pointer_leave();
        assert!(!c.rotation().is_over_model());
    }

    #[test]
    fn out_of_range_indices_are_not_picked() {
        let mut c = controller(800.0, 800.0);
        let bad = mesh(
            vec![[-10.0, -10.0, 0.0], [10.0, -10.0, 0.0], [10.0, 10.0, 0.0], [-10.0, 10.0, 0.0]],
            vec![0, 1, 9],
        );
        c.on_asset_loaded(asset(bad, Vec::new()));
        c.tick(0.016);
        c.on_pointer_move(glm::vec2(400.0, 400.0));
        assert!(!c.rotation().is_over_model());
    }

    #[test]
    fn tracks_on_unreached_nodes_are_dropped() {
        let orphan_clip = |name: &str| {
            AnimationClip::new(
                name,
                vec![Track {
                    node: 1,
                    times: vec![0.0, 1.0],
                    values: TrackValues::Translation(vec![glm::vec3(5.0, 5.0, 5.0); 2]),
                    interpolation: Interpolation::Linear,
                }],
            )
        };
        let mut with_orphan = segment_asset(vec![orphan_clip("intro"), orphan_clip("idle")]);
        with_orphan.nodes.push(AssetNode {
            name: "orphan".to_string(),
            ..Default::default()
        });

        let mut c = controller(800.0, 800.0);
        c.on_asset_loaded(with_orphan);
        c.tick(0.1);

        let root = &c.graph().node(SceneGraph::ROOT).local;
        assert_eq!(root.translation, glm::vec3(0.0, 0.0, 0.0));
        assert_eq!(c.graph().node(c.pivot()).local.translation, glm::vec3(0.0, 0.0, 0.0));
    }
}
