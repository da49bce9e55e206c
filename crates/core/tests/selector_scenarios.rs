//! End-to-end drag scenarios against the selector state machine.

use region_select_core::error::{AppError, Result};
use region_select_core::host::{event_channel, ChannelHost, HostEvent};
use region_select_core::ui::{SelectorKey, SelectorState};
use region_select_core::{DeviceScale, LogicalPoint, OverlayHost, Region, RegionSelector, SelectorOutcome};

/// Records everything the selector reports, in order.
#[derive(Default)]
struct RecordingHost {
    calls: Vec<String>,
    emitted: Vec<SelectorOutcome>,
}

impl OverlayHost for RecordingHost {
    fn emit(&mut self, outcome: &SelectorOutcome) -> Result<()> {
        self.calls.push("emit".to_string());
        self.emitted.push(*outcome);
        Ok(())
    }

    fn request_close(&mut self) -> Result<()> {
        self.calls.push("close".to_string());
        Ok(())
    }
}

/// Host whose channel is gone.
#[derive(Default)]
struct BrokenHost {
    emit_attempts: usize,
    close_attempts: usize,
}

impl OverlayHost for BrokenHost {
    fn emit(&mut self, _outcome: &SelectorOutcome) -> Result<()> {
        self.emit_attempts += 1;
        Err(AppError::transport("channel closed"))
    }

    fn request_close(&mut self) -> Result<()> {
        self.close_attempts += 1;
        Err(AppError::transport("channel closed"))
    }
}

fn p(x: f64, y: f64) -> LogicalPoint {
    LogicalPoint::new(x, y)
}

fn scale(factor: f64) -> DeviceScale {
    DeviceScale::new(factor).unwrap()
}

fn drag(selector: &mut RegionSelector, host: &mut dyn OverlayHost, from: LogicalPoint, to: LogicalPoint) {
    selector.on_pointer_down(from);
    selector.on_pointer_move(to);
    selector.on_pointer_up(to, host);
}

#[test]
fn fractional_scale_commits_physical_region() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::new(scale(1.5));

    drag(&mut selector, &mut host, p(100.0, 100.0), p(300.0, 250.0));

    let expected = Region::new(150, 150, 300, 225).unwrap();
    assert_eq!(host.emitted, vec![SelectorOutcome::Committed(expected)]);
    assert_eq!(host.calls, vec!["emit", "close"]);
    assert_eq!(selector.state(), SelectorState::Done);
    assert_eq!(selector.outcome(), Some(SelectorOutcome::Committed(expected)));
    assert!(selector.visual().is_none());
}

#[test]
fn drag_toward_origin_uses_component_wise_min() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::new(scale(1.25));

    drag(&mut selector, &mut host, p(400.0, 300.0), p(120.0, 40.0));

    let region = host.emitted[0].region().unwrap();
    assert_eq!(region, Region::new(150, 50, 350, 325).unwrap());
}

#[test]
fn too_narrow_after_scaling_is_cancelled() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::new(scale(2.0));

    drag(&mut selector, &mut host, p(50.0, 50.0), p(54.0, 58.0));

    assert_eq!(host.emitted, vec![SelectorOutcome::Cancelled]);
    assert_eq!(host.calls, vec!["emit", "close"]);
}

#[test]
fn exactly_threshold_is_cancelled() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::new(DeviceScale::IDENTITY);

    drag(&mut selector, &mut host, p(0.0, 0.0), p(10.0, 200.0));
    assert_eq!(host.emitted, vec![SelectorOutcome::Cancelled]);

    selector.activate(DeviceScale::IDENTITY);
    drag(&mut selector, &mut host, p(0.0, 0.0), p(11.0, 11.0));
    assert_eq!(host.emitted[1], SelectorOutcome::Committed(Region::new(0, 0, 11, 11).unwrap()));
}

#[test]
fn click_without_move_is_cancelled() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::new(scale(1.5));

    selector.on_pointer_down(p(700.0, 400.0));
    selector.on_pointer_up(p(700.0, 400.0), &mut host);

    assert_eq!(host.emitted, vec![SelectorOutcome::Cancelled]);
}

#[test]
fn escape_mid_drag_cancels_and_clears() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::new(DeviceScale::IDENTITY);

    selector.on_pointer_down(p(10.0, 10.0));
    selector.on_pointer_move(p(500.0, 400.0));
    assert!(selector.visual().is_some());

    selector.on_key_down(SelectorKey::Escape, &mut host);

    assert_eq!(host.emitted, vec![SelectorOutcome::Cancelled]);
    assert!(selector.visual().is_none());
    assert!(selector.session().is_none());

    // The release that follows must not commit anything.
    selector.on_pointer_up(p(500.0, 400.0), &mut host);
    assert_eq!(host.emitted.len(), 1);
    assert_eq!(host.calls, vec!["emit", "close"]);
}

#[test]
fn other_keys_are_ignored() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::default();

    selector.on_pointer_down(p(10.0, 10.0));
    selector.on_key_down(SelectorKey::Other, &mut host);

    assert_eq!(selector.state(), SelectorState::Dragging);
    assert!(host.emitted.is_empty());
}

#[test]
fn escape_while_idle_cancels() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::default();

    selector.on_key_down(SelectorKey::Escape, &mut host);

    assert_eq!(host.emitted, vec![SelectorOutcome::Cancelled]);
    assert!(selector.is_done());
}

#[test]
fn cancel_action_matches_escape() {
    let mut escaped = RecordingHost::default();
    let mut a = RegionSelector::default();
    a.on_pointer_down(p(0.0, 0.0));
    a.on_pointer_move(p(300.0, 300.0));
    a.on_key_down(SelectorKey::Escape, &mut escaped);

    let mut clicked = RecordingHost::default();
    let mut b = RegionSelector::default();
    b.on_pointer_down(p(0.0, 0.0));
    b.on_pointer_move(p(300.0, 300.0));
    b.on_cancel_action(&mut clicked);

    assert_eq!(escaped.calls, clicked.calls);
    assert_eq!(escaped.emitted, clicked.emitted);
    assert_eq!(a.state(), b.state());
    assert_eq!(a.outcome(), b.outcome());
}

#[test]
fn visibility_loss_and_regain_mid_drag_cancels() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::default();

    selector.on_pointer_down(p(0.0, 0.0));
    selector.on_pointer_move(p(300.0, 300.0));

    selector.on_visibility_change(false, &mut host);
    assert!(host.emitted.is_empty());

    selector.on_visibility_change(true, &mut host);

    assert_eq!(host.emitted, vec![SelectorOutcome::Cancelled]);
    assert!(selector.visual().is_none());
    assert!(selector.session().is_none());
    assert!(selector.is_done());
}

#[test]
fn visible_without_prior_hide_is_ignored() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::default();

    selector.on_pointer_down(p(0.0, 0.0));
    selector.on_visibility_change(true, &mut host);

    assert_eq!(selector.state(), SelectorState::Dragging);
    assert!(host.emitted.is_empty());
}

#[test]
fn no_second_emission_after_done() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::default();

    drag(&mut selector, &mut host, p(0.0, 0.0), p(100.0, 100.0));

    selector.on_pointer_down(p(5.0, 5.0));
    selector.on_pointer_move(p(400.0, 400.0));
    selector.on_pointer_up(p(400.0, 400.0), &mut host);
    selector.on_key_down(SelectorKey::Escape, &mut host);
    selector.on_cancel_action(&mut host);
    selector.on_visibility_change(false, &mut host);
    selector.on_visibility_change(true, &mut host);

    assert_eq!(host.calls, vec!["emit", "close"]);
    assert_eq!(host.emitted.len(), 1);
}

#[test]
fn reactivation_starts_a_fresh_session_with_new_scale() {
    let mut host = RecordingHost::default();
    let mut selector = RegionSelector::new(DeviceScale::IDENTITY);

    drag(&mut selector, &mut host, p(0.0, 0.0), p(100.0, 100.0));
    selector.activate(scale(2.0));

    assert_eq!(selector.state(), SelectorState::Idle);
    assert_eq!(selector.outcome(), None);

    drag(&mut selector, &mut host, p(0.0, 0.0), p(100.0, 100.0));
    assert_eq!(
        host.emitted,
        vec![
            SelectorOutcome::Committed(Region::new(0, 0, 100, 100).unwrap()),
            SelectorOutcome::Committed(Region::new(0, 0, 200, 200).unwrap()),
        ]
    );
}

#[test]
fn failed_commit_still_closes_and_clears() {
    let mut host = BrokenHost::default();
    let mut selector = RegionSelector::new(scale(1.5));

    drag(&mut selector, &mut host, p(100.0, 100.0), p(300.0, 250.0));

    assert_eq!(host.emit_attempts, 1);
    assert_eq!(host.close_attempts, 1);
    assert!(selector.is_done());
    assert!(selector.visual().is_none());
    assert_eq!(selector.outcome(), Some(SelectorOutcome::Cancelled));

    selector.on_key_down(SelectorKey::Escape, &mut host);
    assert_eq!(host.emit_attempts, 1);
}

#[test]
fn failed_cancel_still_reaches_done() {
    let mut host = BrokenHost::default();
    let mut selector = RegionSelector::default();

    selector.on_pointer_down(p(0.0, 0.0));
    selector.on_cancel_action(&mut host);

    assert_eq!(host.emit_attempts, 1);
    assert_eq!(host.close_attempts, 1);
    assert!(selector.is_done());
    assert!(selector.session().is_none());
}

#[test]
fn channel_host_carries_outcome_then_close() {
    let (events, mut rx) = event_channel();
    let mut host = ChannelHost::new(events);
    let mut selector = RegionSelector::new(scale(1.5));

    drag(&mut selector, &mut host, p(100.0, 100.0), p(300.0, 250.0));
    drop(host);

    assert_eq!(
        rx.try_recv().unwrap(),
        HostEvent::RegionSelected(Region::new(150, 150, 300, 225).unwrap())
    );
    assert_eq!(rx.try_recv().unwrap(), HostEvent::CloseRequested);
    assert!(rx.try_recv().is_err());
}

#[test]
fn randomized_drags_match_conversion_rule() {
    // Deterministic LCG so the sweep is reproducible without extra crates.
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) as f64 / (1u64 << 31) as f64
    };

    for factor in [1.0, 1.25, 1.5, 1.75, 2.0, 3.0] {
        for _ in 0..200 {
            let anchor = p((next() * 1920.0).floor(), (next() * 1080.0).floor());
            let current = p((next() * 1920.0).floor(), (next() * 1080.0).floor());

            let mut host = RecordingHost::default();
            let mut selector = RegionSelector::new(scale(factor));
            drag(&mut selector, &mut host, anchor, current);

            let width = ((current.x - anchor.x).abs() * factor).round() as u32;
            let height = ((current.y - anchor.y).abs() * factor).round() as u32;
            assert_eq!(host.emitted.len(), 1);

            if width > 10 && height > 10 {
                let expected = Region::new(
                    (anchor.x.min(current.x) * factor).round() as u32,
                    (anchor.y.min(current.y) * factor).round() as u32,
                    width,
                    height,
                )
                .unwrap();
                assert_eq!(host.emitted[0], SelectorOutcome::Committed(expected));
            } else {
                assert_eq!(host.emitted[0], SelectorOutcome::Cancelled);
            }
        }
    }
}
