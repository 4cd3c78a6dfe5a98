use super::{FrameCtx, Visualizer};
use crate::config::Variant;
use crate::constants::*;
use crate::insight::{synthesize, SynthesisTimer, INSIGHT_CATALOG};
use crate::scene::{rgb_hex, Category, Connector, Scene, SceneObject, Shape, Style};
use crate::state::Camera;
use crate::ui::{synthesis_updates, UiField, UiUpdate};
use glam::Vec3;
use rand::{Rng, RngCore};
use std::time::Duration;

/// Floating knowledge nodes. Insights fire on a real-time timer and after
/// each submitted query, and show up as fading connectors.
#[derive(Debug, Default)]
pub struct Librarian {
    timer: SynthesisTimer,
}

fn fire(scene: &mut Scene, rng: &mut dyn RngCore, ui: &mut Vec<UiUpdate>) {
    let Some(synthesis) = synthesize(&INSIGHT_CATALOG, scene.objects.len(), rng) else {
        return;
    };
    let (a, b) = synthesis.pair;
    scene.connectors.push(Connector::new(
        scene.objects[a].transform.position,
        scene.objects[b].transform.position,
        rgb_hex(LIBRARIAN_NODE_COLOR),
        Duration::from_millis(CONNECTOR_FADE_MS),
    ));
    synthesis_updates(&synthesis.record, ui);
    log::debug!(
        "[insight] {} x {} -> {} (nodes {a}, {b})",
        synthesis.record.concept_a,
        synthesis.record.concept_b,
        synthesis.record.result
    );
}

fn drift<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let mut axis = || (rng.gen::<f32>() - 0.5) * LIBRARIAN_DRIFT_RANGE;
    Vec3::new(axis(), axis(), axis())
}

fn spawn_node<R: Rng + ?Sized>(scene: &mut Scene, position: Vec3, color: u32, rng: &mut R) {
    let mut node = SceneObject::new(
        Shape::Icosahedron {
            detail: LIBRARIAN_NODE_DETAIL,
        },
        Category::Wireframe,
        Style::hex(color, LIBRARIAN_EMISSIVE),
        LIBRARIAN_NODE_SIZE,
        position,
    );
    node.velocity = drift(rng);
    scene.objects.push(node);
}

impl Visualizer for Librarian {
    fn variant(&self) -> Variant {
        Variant::Librarian
    }

    fn build(&mut self, rng: &mut dyn RngCore) -> Scene {
        let camera =
            Camera::looking_at_origin(Vec3::new(0.0, 0.0, LIBRARIAN_CAMERA_Z), LIBRARIAN_FOV_DEG);
        let mut scene = Scene::new(camera, CLEAR_COLOR);
        let extent = Vec3::from(LIBRARIAN_SPAWN_EXTENT);
        for _ in 0..LIBRARIAN_NODE_COUNT {
            let unit = Vec3::new(rng.gen(), rng.gen(), rng.gen());
            spawn_node(
                &mut scene,
                (unit - 0.5) * extent,
                LIBRARIAN_NODE_COLOR,
                rng,
            );
        }
        scene
    }

    fn time_step(&self, _dt: Duration) -> f32 {
        LIBRARIAN_TIME_STEP
    }

    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        for node in &mut ctx.scene.objects {
            node.transform.position += node.velocity;
            node.transform.rotation.x += LIBRARIAN_SPIN_STEP;
            node.transform.rotation.y += LIBRARIAN_SPIN_STEP;
            // flip only the offending axis; the node may sit outside for a few frames
            if node.transform.position.x.abs() > LIBRARIAN_BOUND_X {
                node.velocity.x = -node.velocity.x;
            }
            if node.transform.position.y.abs() > LIBRARIAN_BOUND_Y {
                node.velocity.y = -node.velocity.y;
            }
        }
        ctx.scene.shader.time = ctx.time;

        for _ in 0..self.timer.advance(ctx.dt) {
            fire(ctx.scene, ctx.rng, ctx.ui);
        }
    }

    fn submit_query(
        &mut self,
        text: &str,
        scene: &mut Scene,
        rng: &mut dyn RngCore,
        ui: &mut Vec<UiUpdate>,
    ) {
        if text.is_empty() {
            return;
        }
        ui.push(UiUpdate::text(
            UiField::SystemState,
            format!("ANALYZING: {text}..."),
        ));
        ui.push(UiUpdate::text(
            UiField::CurrentInsight,
            format!("COLLIDING \"{text}\" WITH GLOBAL DATA..."),
        ));
        spawn_node(
            scene,
            Vec3::from(LIBRARIAN_QUERY_POSITION),
            LIBRARIAN_QUERY_COLOR,
            rng,
        );
        self.timer.submit();
        log::info!("[insight] query queued: {text}");
    }
}
