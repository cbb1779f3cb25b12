//! PaintView calls made from the UI thread and from worker threads

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use paintview::{
    Color, MainLooper, MotionAction, MotionEvent, PaintReply, PaintView, SurfaceOptions,
};

fn realized(looper: &MainLooper) -> PaintView {
    let mut view = PaintView::new(looper.handle());
    view.realize(SurfaceOptions {
        requested_width: 200,
        requested_height: 100,
        ..Default::default()
    })
    .unwrap();
    view.on_size_changed(400, 200);
    view
}

fn stroke(view: &PaintView) {
    for (action, x, y) in [
        (MotionAction::Down, 10.0, 10.0),
        (MotionAction::Move, 50.0, 50.0),
        (MotionAction::Up, 50.0, 50.0),
    ] {
        assert!(view.on_touch_event(MotionEvent::single(action, 0, x, y)));
    }
}

#[test]
fn test_get_image_from_worker_waits_for_ui_thread() {
    let looper = MainLooper::prepare();
    let view = realized(&looper);
    stroke(&view);

    let (started_tx, started_rx) = mpsc::channel();
    let worker = {
        let view = view.clone();
        let main = looper.handle();
        thread::spawn(move || {
            started_tx.send(()).unwrap();
            let image = view.get_image();
            let dirty = view.get_dirty();
            main.quit().unwrap();
            (image, dirty)
        })
    };

    started_rx.recv().unwrap();
    thread::sleep(Duration::from_millis(50));
    assert!(!worker.is_finished());

    looper.run();
    let (image, dirty) = worker.join().unwrap();
    let image = image.unwrap();
    assert_eq!((image.width, image.height), (200, 100));
    assert!(dirty);
}

#[test]
fn test_worker_setters_are_applied_in_order() {
    let looper = MainLooper::prepare();
    let view = realized(&looper);

    let worker = {
        let view = view.clone();
        let main = looper.handle();
        thread::spawn(move || {
            view.set_stroke_color_str("red");
            view.set_stroke_width(2.0);
            view.set_stroke_width(40.0);
            view.set_stroke_alpha(-5);
            view.set_erase_mode(false);
            main.quit().unwrap();
        })
    };
    looper.run();
    worker.join().unwrap();

    view.set_stroke_alpha(255);
    stroke(&view);
    let frame = view.render().unwrap();
    assert_eq!(frame.size(), (400, 200));
    // width 40 reaches well past the width-12 default
    assert_eq!(frame.pixel_rgba8(35, 15), Some(Color::RED.to_rgba8()));
}

#[test]
fn test_calls_before_realize_are_ignored() {
    let looper = MainLooper::prepare();
    let view = PaintView::new(looper.handle());
    assert!(!view.is_realized());

    view.set_stroke_width(3.0);
    view.clear();
    view.on_size_changed(10, 10);
    assert!(!view.on_touch_event(MotionEvent::single(MotionAction::Down, 0, 1.0, 1.0)));
    assert!(!view.get_dirty());
    assert!(view.get_image().is_none());
    assert!(!view.take_redraw_request());
    assert_eq!(looper.run_pending(), 0);
}

#[test]
fn test_destroy_detaches_every_clone() {
    let looper = MainLooper::prepare();
    let mut view = realized(&looper);
    let other = view.clone();
    stroke(&view);
    assert!(other.get_dirty());

    view.destroy();
    assert!(!view.is_realized());
    assert!(!other.is_realized());
    assert!(!other.get_dirty());
    assert!(other.get_image().is_none());
    other.clear();
}

#[test]
fn test_send_code() {
    let looper = MainLooper::prepare();
    let view = realized(&looper);
    stroke(&view);

    assert_eq!(view.send_code(42, None), None);
    assert_eq!(view.send_code(10004, None), Some(PaintReply::Dirty(true)));
    assert_eq!(view.send_code(10001, None), Some(PaintReply::Done));
    assert_eq!(view.send_code(10004, None), Some(PaintReply::Dirty(false)));
    assert_eq!(
        view.send_code(10002, Some(String::new())),
        Some(PaintReply::Done)
    );

    let Some(PaintReply::Image(Some(image))) = view.send_code(10003, None) else {
        panic!("expected an exported image");
    };
    assert_eq!((image.width, image.height), (200, 100));
    assert!(view.take_redraw_request());
}

#[test]
fn test_set_image_failure_through_view_keeps_drawing() {
    let looper = MainLooper::prepare();
    let view = realized(&looper);
    stroke(&view);
    view.set_image(Some("data:image/png;base64,not-base64!"));
    assert!(view.get_dirty());
}
