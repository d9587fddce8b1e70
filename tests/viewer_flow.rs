mod common;

use logo_viewer::animation::SequencePhase;
use logo_viewer::asset::parse_scene;
use logo_viewer::settings::Settings;
use logo_viewer::viewer::{ViewerController, ViewerEvent, Viewport, responsive_scale};

const FRAME: f32 = 1.0 / 60.0;

fn loaded(clips: &[f32], viewport: Viewport) -> ViewerController {
    let asset = parse_scene(&common::logo_gltf(clips), "Logo.gltf").unwrap();
    let mut controller = ViewerController::new(Settings::default(), viewport);
    controller.on_asset_loaded(asset);
    controller
}

fn count_reveals(controller: &mut ViewerController, frames: usize) -> usize {
    (0..frames)
        .map(|_| {
            controller
                .tick(FRAME)
                .iter()
                .filter(|e| **e == ViewerEvent::ButtonsRevealed)
                .count()
        })
        .sum()
}

#[test]
fn intro_hands_over_to_idle_exactly_once() {
    let mut c = loaded(&[1.0, 2.0], Viewport::new(1280.0, 720.0));
    assert!(!c.buttons().is_visible());
    assert_eq!(c.sequencer().phase(), SequencePhase::PlayingIntro);

    // Half a second in: still the intro
    assert_eq!(count_reveals(&mut c, 30), 0);
    assert!(!c.buttons().is_visible());

    assert_eq!(count_reveals(&mut c, 600), 1);
    assert!(c.buttons().is_visible());
    assert_eq!(c.sequencer().phase(), SequencePhase::PlayingIdle);
}

#[test]
fn extra_clips_are_ignored() {
    let mut c = loaded(&[0.5, 1.0, 3.0], Viewport::new(1280.0, 720.0));
    assert_eq!(count_reveals(&mut c, 300), 1);
}

#[test]
fn without_two_clips_the_buttons_stay_hidden() {
    for clips in [&[][..], &[1.0][..]] {
        let mut c = loaded(clips, Viewport::new(1280.0, 720.0));
        assert_eq!(c.sequencer().phase(), SequencePhase::NoAnimation);
        assert_eq!(count_reveals(&mut c, 300), 0);
        assert!(!c.buttons().is_visible());
    }
}

#[test]
fn model_scale_follows_the_viewport() {
    let viewport = Viewport::new(500.0, 800.0);
    let c = loaded(&[1.0, 2.0], viewport);
    let model = *c.model().unwrap();
    let diagonal = model.base_diagonal.unwrap();
    assert!((diagonal - 5.0_f32.sqrt()).abs() < 1e-5);

    let expected = responsive_scale(viewport, diagonal, &c.settings().layout);
    let scale = c.graph().node(model.object).local.scale;
    assert!((scale.x - expected).abs() < 1e-6);
    assert_eq!(scale.x, scale.y);
    assert_eq!(scale.y, scale.z);
}

#[test]
fn resize_settles_before_relayout() {
    let mut c = loaded(&[1.0, 2.0], Viewport::new(1280.0, 720.0));
    c.tick(FRAME);

    let mut surface_resizes = 0;
    for step in 0..40 {
        if step < 10 {
            c.on_resize(Viewport::new(1280.0 - step as f32 * 50.0, 720.0));
        }
        surface_resizes += c
            .tick(FRAME)
            .iter()
            .filter(|e| matches!(e, ViewerEvent::ResizeSurface(_)))
            .count();
    }
    assert_eq!(surface_resizes, 1);

    let model = *c.model().unwrap();
    let expected = responsive_scale(Viewport::new(830.0, 720.0), model.base_diagonal.unwrap(), &c.settings().layout);
    assert!((c.graph().node(model.object).local.scale.x - expected).abs() < 1e-6);
}
