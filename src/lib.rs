// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod logging;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tracing::{error, info, warn};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{
        DeviceOrientationEvent, Document, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        Storage, TouchEvent, Window,
    };

    use crate::config::GameConfig;
    use crate::controller::input::wasm::{keyboard_event_to_input, orientation_to_input, touch_to_input};
    use crate::controller::{ControlState, GameState, InputEvent, InputProcessor, RapierWorld, TouchControl};
    use crate::frame_loop::{FrameClock, FrameLoopContext};
    use crate::error::GameError;
    use crate::logging;
    use crate::view::hud::DomHud;
    use crate::view::CanvasRenderer;

    const CANVAS_ID: &str = "game-canvas";
    const SNAPSHOT_KEY: &str = "bike-racer.snapshot";

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logging::init();
        let window = web_sys::window().ok_or_else(|| missing("window"))?;
        let document = window.document().ok_or_else(|| missing("document"))?;
        let canvas = init_canvas(&window, &document)?;
        setup_app(&window, &document, canvas)
    }

    /// Main application setup for WASM
    fn setup_app(window: &Window, document: &Document, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        let mut config = GameConfig::default();
        config.viewport = (canvas.width(), canvas.height());

        let surface = CanvasRenderer::new(canvas.clone())?;
        let physics = RapierWorld::new(config.gravity, config.solver_iterations);
        let mut frame_ctx = FrameLoopContext::new(config, physics, surface, &mut rand::thread_rng());

        // tilt-capable browsers start driving right away, everyone else waits for the menu
        if js_sys::Reflect::has(window, &JsValue::from_str("DeviceOrientationEvent")).unwrap_or(false) {
            frame_ctx.game_state.borrow_mut().enable_controls();
        }

        setup_input_listeners(window, document, frame_ctx.controls.clone())?;
        setup_menu(document, frame_ctx.game_state.clone())?;

        let mut hud = DomHud::new(document.clone());
        let storage = window.local_storage().ok().flatten();
        let mut clock = FrameClock::new();

        let f = RcCellCallback::new(window.clone(), {
            let window_for_loop = window.clone();

            move || {
                let now = window_for_loop.performance().map(|p| p.now()).unwrap_or(0.0);
                let delta = clock.tick(now);

                handle_resize(&window_for_loop, &canvas, &mut |w, h| frame_ctx.resize(w, h));

                let report = frame_ctx.update(delta, &mut hud);
                if report.state_changed {
                    if let Some(storage) = &storage {
                        save_snapshot(storage, &frame_ctx.game_state.borrow());
                    }
                }
            }
        });
        f.start();

        info!("bike racer started");
        Ok(())
    }

    /// Setup all input event listeners with platform-agnostic abstractions
    fn setup_input_listeners(
        window: &Window,
        document: &Document,
        controls: Rc<RefCell<ControlState>>,
    ) -> Result<(), JsValue> {
        let input_processor = InputProcessor::default();

        // Keyboard down
        {
            let controls = controls.clone();
            let input_processor = input_processor.clone();
            let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if input_processor.is_game_key(&e.key()) {
                    e.prevent_default();
                }
                input_processor.process(&mut controls.borrow_mut(), &keyboard_event_to_input(&e, true));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
            keydown.forget();
        }

        // Keyboard up
        {
            let controls = controls.clone();
            let input_processor = input_processor.clone();
            let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                input_processor.process(&mut controls.borrow_mut(), &keyboard_event_to_input(&e, false));
            }) as Box<dyn FnMut(KeyboardEvent)>);
            window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
            keyup.forget();
        }

        // Touch pads
        for control in [TouchControl::Accelerate, TouchControl::Brake] {
            let Some(pad) = document.get_element_by_id(control.element_id()) else {
                warn!(id = control.element_id(), "touch pad missing, skipping");
                continue;
            };
            for (event_name, is_start) in [("touchstart", true), ("touchend", false)] {
                let controls = controls.clone();
                let input_processor = input_processor.clone();
                let touch = Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    input_processor.process(&mut controls.borrow_mut(), &touch_to_input(control, is_start));
                }) as Box<dyn FnMut(TouchEvent)>);
                pad.add_event_listener_with_callback(event_name, touch.as_ref().unchecked_ref())?;
                touch.forget();
            }
        }

        // Device tilt
        {
            let controls = controls.clone();
            let input_processor = input_processor.clone();
            let orientation = Closure::wrap(Box::new(move |e: DeviceOrientationEvent| {
                input_processor.process(&mut controls.borrow_mut(), &orientation_to_input(&e));
            }) as Box<dyn FnMut(DeviceOrientationEvent)>);
            window.add_event_listener_with_callback_and_bool(
                "deviceorientation",
                orientation.as_ref().unchecked_ref(),
                true,
            )?;
            orientation.forget();
        }

        // Focus loss - release all controls
        {
            let controls = controls.clone();
            let input_processor = input_processor.clone();
            let blur = Closure::wrap(Box::new(move |_e: Event| {
                input_processor.process(&mut controls.borrow_mut(), &InputEvent::FocusLost);
            }) as Box<dyn FnMut(Event)>);
            window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
            blur.forget();
        }

        // Visibility change - release all controls
        {
            let doc = document.clone();
            let visibility = Closure::wrap(Box::new(move |_e: Event| {
                let visible = !doc.hidden();
                input_processor.process(&mut controls.borrow_mut(), &InputEvent::VisibilityChanged { visible });
            }) as Box<dyn FnMut(Event)>);
            document.add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
            visibility.forget();
        }

        Ok(())
    }

    /// Show the start menu; its button unlocks the controls
    fn setup_menu(document: &Document, game_state: Rc<RefCell<GameState>>) -> Result<(), JsValue> {
        let (Some(menu), Some(start)) = (
            document.get_element_by_id("menu"),
            document.get_element_by_id("start-game"),
        ) else {
            warn!("no start menu on page, enabling controls");
            game_state.borrow_mut().enable_controls();
            return Ok(());
        };

        menu.class_list().remove_1("hidden")?;

        let click = Closure::wrap(Box::new(move |_e: MouseEvent| {
            if let Err(err) = menu.class_list().add_1("hidden") {
                warn!(?err, "could not hide menu");
            }
            game_state.borrow_mut().enable_controls();
            info!("controls enabled");
        }) as Box<dyn FnMut(MouseEvent)>);
        start.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
        Ok(())
    }

    fn save_snapshot(storage: &Storage, state: &GameState) {
        let json = match state.snapshot_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "snapshot not saved");
                return;
            }
        };
        if let Err(err) = storage.set_item(SNAPSHOT_KEY, &json) {
            warn!(?err, "localStorage write failed");
        }
    }

    fn handle_resize(window: &Window, canvas: &HtmlCanvasElement, on_resize: &mut dyn FnMut(u32, u32)) {
        if let (Ok(w), Ok(h)) = (window.inner_width(), window.inner_height()) {
            let nw = w.as_f64().unwrap_or(800.0) as u32;
            let nh = h.as_f64().unwrap_or(600.0) as u32;
            if nw != canvas.width() || nh != canvas.height() {
                canvas.set_width(nw);
                canvas.set_height(nh);
                on_resize(nw, nh);
            }
        }
    }

    /// Use the page's `game-canvas` if there is one, otherwise append a fresh canvas
    fn init_canvas(window: &Window, document: &Document) -> Result<HtmlCanvasElement, JsValue> {
        let canvas = match document.get_element_by_id(CANVAS_ID) {
            Some(el) => el
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| GameError::Js(format!("`{CANVAS_ID}` is not a canvas")))?,
            None => {
                let body = document.body().ok_or_else(|| missing("body"))?;
                let el = document
                    .create_element("canvas")?
                    .dyn_into::<HtmlCanvasElement>()
                    .map_err(|_| GameError::Js("failed to create canvas".into()))?;
                el.set_id(CANVAS_ID);
                body.append_child(&el)?;
                el
            }
        };
        let width = window.inner_width()?.as_f64().unwrap_or(800.0) as u32;
        let height = window.inner_height()?.as_f64().unwrap_or(600.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(canvas)
    }

    fn missing(element: &str) -> GameError {
        GameError::MissingElement(element.to_string())
    }

    struct RcCellCallback {
        inner: Rc<RefCell<Box<dyn FnMut()>>>,
        window: Window,
    }

    impl RcCellCallback {
        fn new(window: Window, f: impl FnMut() + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
            }
        }

        fn start(self) {
            let inner = self.inner.clone();
            let window = self.window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                inner.borrow_mut().as_mut()();

                // Recursively schedule next frame
                if let Some(cb) = callback_clone.borrow().as_ref() {
                    if let Err(err) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        error!(?err, "requestAnimationFrame failed, loop stopped");
                    }
                }
            }) as Box<dyn FnMut()>));

            if let Some(cb) = callback.borrow().as_ref() {
                if let Err(err) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    error!(?err, "requestAnimationFrame failed, loop not started");
                }
            }

            // Leak the closure to keep it alive
            std::mem::forget(callback);
        }
    }
}
