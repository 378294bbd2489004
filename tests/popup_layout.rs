mod common;

use common::*;
use streetplot::*;

fn narrow_harness(width: f32) -> Harness {
    let mut h = Harness::new(false);
    h.component.env_mut().viewport_width = width;
    h
}

#[test]
fn popup_is_kept_off_the_left_edge() {
    let mut h = narrow_harness(500.0);
    h.set_match(Some(cluster(1, 10.0)));
    let layout = h.component.on_street(10.0).cloned().unwrap();
    assert_eq!(layout.left_offset, 15.0);
    assert_eq!(layout.arrow_offset, 4.0);
    assert_eq!(h.component.thumb_left(), Some(15.0));
    assert_eq!(h.component.arrow_left(), Some(4.0));
}

#[test]
fn popup_is_kept_inside_the_right_edge() {
    let mut h = narrow_harness(500.0);
    h.set_match(Some(cluster(1, 480.0)));
    let layout = h.component.on_street(480.0).cloned().unwrap();
    assert_eq!(layout.left_offset, 294.0);
    assert_eq!(layout.arrow_offset, 195.0);
}

#[test]
fn popup_width_caps_at_three_slots() {
    let mut h = narrow_harness(1600.0);
    h.set_match(Some(cluster(5, 800.0)));
    let layout = h.component.on_street(800.0).cloned().unwrap();
    // indent = 3 * 176 / 2
    assert_eq!(layout.left_offset, 800.0 - 264.0 + 15.0);
    assert_eq!(layout.arrow_offset, 264.0 - 15.0 + 9.0);
    assert_eq!(h.component.thumb_places().len(), 5);
}

#[test]
fn layout_follows_viewport_width_at_call_time() {
    let mut h = narrow_harness(1600.0);
    h.set_match(Some(cluster(1, 480.0)));
    let wide = h.component.on_street(480.0).cloned().unwrap();
    assert_eq!(wide.left_offset, 407.0);

    h.component.env_mut().viewport_width = 500.0;
    let narrow = h.component.on_street(481.0).cloned().unwrap();
    assert_eq!(narrow.left_offset, 294.0);
}

#[test]
fn custom_geometry_from_config() {
    let mut config = StreetConfig::default();
    config.popup.slot_width = 100.0;
    config.popup.edge_margin = 0.0;
    let mut h = Harness::with_config(false, config);
    h.set_match(Some(cluster(2, 500.0)));
    let layout = h.component.on_street(500.0).cloned().unwrap();
    assert_eq!(layout.left_offset, 400.0);
    assert_eq!(layout.arrow_offset, 109.0);
}

#[test]
fn thumbnail_urls_use_small_renditions() {
    assert_eq!(
        thumbnail_url("media/desktops/home-01.jpg"),
        "media/150x150/home-01.jpg"
    );
    assert_eq!(thumbnail_url("plain.jpg"), "plain.jpg");
}
