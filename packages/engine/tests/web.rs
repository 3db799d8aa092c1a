#![cfg(target_arch = "wasm32")]

use gravity_board_engine::{init, Board};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn init_is_idempotent() {
    init(Some("debug".into())).unwrap();
    init(None).unwrap();
}

#[wasm_bindgen_test]
fn rejects_bad_config() {
    assert!(Board::with_config("{\"stepHz\": 0}".into()).is_err());
    assert!(Board::with_config("not json".into()).is_err());
}

#[wasm_bindgen_test]
fn wall_clock_delete_round() {
    let mut board = Board::with_config("{\"exitDelayMs\": 0}".into()).unwrap();
    board.set_layout(640.0, 480.0).unwrap();
    let id = board.add_task("Buy milk").unwrap();
    assert!(board.delete_task(&id));
    assert_eq!(board.advance(), 1);
    assert_eq!(board.card_count(), 0);
}

mod mounted {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use gloo::timers::future::TimeoutFuture;
    use gravity_board_engine::BoardApp;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, PointerEvent, PointerEventInit};

    struct FrameCounter {
        count: Rc<Cell<u32>>,
        last: Rc<RefCell<String>>,
        callback: Closure<dyn FnMut(JsValue)>,
    }

    impl FrameCounter {
        fn new() -> Self {
            let count = Rc::new(Cell::new(0));
            let last = Rc::new(RefCell::new(String::new()));
            let (seen, latest) = (Rc::clone(&count), Rc::clone(&last));
            let callback = Closure::<dyn FnMut(JsValue)>::new(move |frame: JsValue| {
                seen.set(seen.get() + 1);
                *latest.borrow_mut() = frame.as_string().unwrap_or_default();
            });
            Self { count, last, callback }
        }

        fn last_frame(&self) -> serde_json::Value {
            serde_json::from_str(&self.last.borrow()).unwrap()
        }

        fn function(&self) -> js_sys::Function {
            self.callback.as_ref().unchecked_ref::<js_sys::Function>().clone()
        }

        fn get(&self) -> u32 {
            self.count.get()
        }
    }

    fn container() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let div = document.create_element("div").unwrap();
        div.set_attribute("style", "position: relative; width: 640px; height: 480px;")
            .unwrap();
        document.body().unwrap().append_child(&div).unwrap();
        div.dyn_into::<HtmlElement>().unwrap()
    }

    const CONFIG: &str = r#"{"exitDelayMs": 0, "seed": 3, "spawnVelocity": {"x": 0, "y": 0}}"#;

    fn mount_on(container: HtmlElement, counter: &FrameCounter) -> BoardApp {
        BoardApp::mount(container, Some(CONFIG.into()), counter.function()).unwrap()
    }

    fn mount(counter: &FrameCounter) -> BoardApp {
        mount_on(container(), counter)
    }

    #[wasm_bindgen_test]
    async fn press_on_a_card_element_grabs_its_body() {
        let counter = FrameCounter::new();
        let board = container();
        let mut app = mount_on(board.clone(), &counter);
        let id = app.add_task("Grab me").unwrap();
        TimeoutFuture::new(100).await;

        let frame = counter.last_frame();
        let pose = &frame["positions"][id.as_str()];
        let (x, y) = (pose["x"].as_f64().unwrap(), pose["y"].as_f64().unwrap());

        // Presses land on the card's own element and bubble to the container.
        let document = web_sys::window().unwrap().document().unwrap();
        let card = document.create_element("div").unwrap();
        card.set_attribute("style", "position: absolute; left: 0; top: 0; width: 20px; height: 20px;")
            .unwrap();
        board.append_child(&card).unwrap();

        let rect = board.get_bounding_client_rect();
        let init = PointerEventInit::new();
        init.set_bubbles(true);
        init.set_client_x((rect.left() + x).round() as i32);
        init.set_client_y((rect.top() + y).round() as i32);
        let press = PointerEvent::new_with_event_init_dict("pointerdown", &init).unwrap();
        card.dispatch_event(&press).unwrap();

        let views: serde_json::Value = serde_json::from_str(&app.card_views_json()).unwrap();
        assert_eq!(views[0]["cursor"], "grabbing");
        assert!(views[0]["className"].as_str().unwrap().contains("dragging"));
        app.dispose();
    }

    #[wasm_bindgen_test]
    async fn frames_run_only_while_cards_exist() {
        let counter = FrameCounter::new();
        let mut app = mount(&counter);
        assert!(app.stepping());
        assert!(!app.frame_pending());

        let id = app.add_task("Buy milk").unwrap();
        assert!(app.frame_pending());
        TimeoutFuture::new(150).await;
        assert!(counter.get() > 0);

        // The step interval finishes the removal without any explicit advance.
        assert!(app.delete_task(&id));
        TimeoutFuture::new(150).await;
        assert_eq!(app.card_count(), 0);
        assert!(!app.frame_pending());
        let idle = counter.get();
        TimeoutFuture::new(100).await;
        assert_eq!(counter.get(), idle);

        app.add_task("Write report").unwrap();
        TimeoutFuture::new(150).await;
        assert!(counter.get() > idle);
        app.dispose();
    }

    #[wasm_bindgen_test]
    async fn dispose_cancels_timers() {
        let counter = FrameCounter::new();
        let mut app = mount(&counter);
        app.add_task("Buy milk").unwrap();
        TimeoutFuture::new(50).await;

        app.dispose();
        assert!(!app.frame_pending());
        assert!(!app.stepping());
        let seen = counter.get();
        TimeoutFuture::new(100).await;
        assert_eq!(counter.get(), seen);
    }

    #[wasm_bindgen_test]
    async fn drop_stops_frames() {
        let counter = FrameCounter::new();
        let mut app = mount(&counter);
        app.add_task("Buy milk").unwrap();
        TimeoutFuture::new(50).await;

        drop(app);
        let seen = counter.get();
        TimeoutFuture::new(100).await;
        assert_eq!(counter.get(), seen);
    }
}
