//! Don't Say No entry point
//!
//! Wires browser events to the card and runs the fireworks frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent, PageTransitionEvent,
    };

    use dont_say_no::platform::{RafScheduler, dom};
    use dont_say_no::renderer::CanvasRenderer;
    use dont_say_no::sim::{Card, FrameStatus, Layout};
    use dont_say_no::Settings;

    /// Elements the card talks to
    struct Elements {
        document: Document,
        playground: Element,
        yes_btn: HtmlElement,
        no_btn: HtmlElement,
    }

    /// Card instance holding all state
    struct App {
        card: Card,
        renderer: Option<CanvasRenderer>,
        scheduler: RafScheduler,
        el: Elements,
    }

    impl App {
        fn layout(&self) -> Option<Layout> {
            dom::measure_layout(&self.el.playground, &self.el.no_btn)
        }

        /// Push the evader's position and both scales to the buttons
        fn apply_buttons(&self, moved: bool) {
            let evader = self.card.evader();
            let scales = evader.scales();
            let pos = moved.then(|| evader.position());
            dom::style_button(&self.el.no_btn, pos, scales.evasive);
            dom::style_button(&self.el.yes_btn, None, scales.alternative);
        }

        fn on_pointer_move(&mut self, event: &MouseEvent) {
            let pointer = dom::pointer_in(&self.el.playground, event);
            let layout = self.layout();
            if self.card.on_pointer_move(pointer, layout, dom::now_ms()) {
                self.apply_buttons(true);
            }
        }

        fn on_pointer_enter(&mut self) {
            let layout = self.layout();
            if self.card.on_pointer_enter(layout).is_some() {
                self.apply_buttons(true);
            }
        }

        fn on_focus(&mut self) {
            let layout = self.layout();
            if self.card.on_focus(layout).is_some() {
                self.apply_buttons(true);
            }
        }

        fn on_resize(&mut self) {
            let viewport = dom::viewport();
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(viewport.x as f64, viewport.y as f64, dom::device_pixel_ratio());
            }
            let layout = self.layout();
            if self.card.on_resize(layout, viewport).is_some() {
                self.apply_buttons(true);
            }
        }

        fn accept(&mut self) {
            if !self.card.accept(&mut self.scheduler) {
                return;
            }
            dom::set_text(&self.el.document, "caption", self.card.caption());
            let _ = self.el.yes_btn.set_attribute("disabled", "");
            let _ = self.el.yes_btn.style().set_property("cursor", "default");
            self.el.no_btn.remove();
        }

        fn frame(&mut self, time: f64) {
            let status = self.card.on_frame(time, &mut self.scheduler);
            if let Some(renderer) = &mut self.renderer {
                match status {
                    FrameStatus::Continue => renderer.draw(self.card.fireworks().particles()),
                    FrameStatus::Finished => renderer.clear(),
                }
            }
        }

        /// Page may come back from the back/forward cache
        fn suspend(&mut self) {
            self.card.suspend(&mut self.scheduler);
            log::info!("Card suspended");
        }

        fn resume(&mut self) {
            self.card.resume(&mut self.scheduler);
            self.on_resize();
        }

        fn teardown(&mut self) {
            self.card.stop(&mut self.scheduler);
            if let Some(renderer) = &self.renderer {
                renderer.clear();
            }
            log::info!("Card torn down");
        }
    }

    fn find_elements(document: &Document) -> Option<Elements> {
        Some(Elements {
            document: document.clone(),
            playground: document.get_element_by_id("playground")?,
            yes_btn: dom::element_by_id(document, "yes-btn")?,
            no_btn: dom::element_by_id(document, "no-btn")?,
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        log::info!("Don't Say No starting...");

        let Some(document) = dom::window_document() else {
            log::error!("No document");
            return;
        };
        let Some(el) = find_elements(&document) else {
            log::error!("Missing #playground, #yes-btn or #no-btn");
            return;
        };

        let settings = Settings::load();
        dom::set_text(&document, "question", &settings.question);

        let seed = js_sys::Date::now() as u64;
        let card = Card::new(&settings, seed);
        dom::set_text(&document, "caption", card.caption());
        log::info!("Card initialized with seed: {}", seed);

        let renderer = dom::element_by_id::<HtmlCanvasElement>(&document, "fireworks")
            .and_then(CanvasRenderer::new);
        if renderer.is_none() {
            log::warn!("No 2D canvas for #fireworks, celebration will not be drawn");
        }

        let app = Rc::new(RefCell::new(App {
            card,
            renderer,
            scheduler: RafScheduler::new(),
            el,
        }));

        // Frame callback lives as long as the page
        {
            let app_frame = app.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                app_frame.borrow_mut().frame(time);
            });
            app.borrow().scheduler.set_callback(closure);
        }

        setup_input_handlers(app.clone());
        setup_window_handlers(app.clone());

        // First layout
        app.borrow_mut().on_resize();

        log::info!("Don't Say No running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let (playground, yes_btn, no_btn) = {
            let a = app.borrow();
            (a.el.playground.clone(), a.el.yes_btn.clone(), a.el.no_btn.clone())
        };

        // Pointer moving over the playground
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                app.borrow_mut().on_pointer_move(&event);
            });
            let _ = playground
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer landed on "No" anyway
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().on_pointer_enter();
            });
            let _ = no_btn
                .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard users get the same chase
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().on_focus();
            });
            let _ = no_btn.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // "Yes"
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().accept();
            });
            let _ = yes_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().on_resize();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Leaving the page: no frame may outlive the view. A cached page
        // only pauses.
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if event.persisted() {
                    app.borrow_mut().suspend();
                } else {
                    app.borrow_mut().teardown();
                }
            });
            let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restored from the back/forward cache
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if event.persisted() {
                    app.borrow_mut().resume();
                }
            });
            let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_card::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Don't Say No (native) starting...");
    log::info!("The card runs in the browser - run with `trunk serve` for the web version");

    println!("\nRunning headless chase...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Chase the "No" button with a scripted pointer, then say yes and let the
/// fireworks burn out
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use dont_say_no::Settings;
    use dont_say_no::sim::{Card, FrameStatus, Layout, ManualScheduler, Rect};
    use glam::Vec2;

    const BUTTON: Vec2 = Vec2::new(64.0, 40.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;

    let container = Rect::sized(512.0, 160.0);
    let layout = |card: &Card| {
        let pos = card.evader().position();
        let size = BUTTON * card.evader().scales().evasive;
        Layout::new(container, Rect::new(pos.x, pos.y, size.x, size.y))
    };

    let settings = Settings::load();
    let mut card = Card::new(&settings, 7);
    card.on_resize(layout(&card), Vec2::new(1280.0, 720.0));

    let mut pointer = Vec2::new(20.0, 80.0);
    let mut now = 0.0;
    for _ in 0..600 {
        let Some(current) = layout(&card) else {
            break;
        };
        let target = current.element.center();
        pointer += (target - pointer).clamp_length_max(6.0);
        card.on_pointer_move(pointer, Some(current), now);
        if let Some(current) = layout(&card) {
            if current.element.contains(pointer) {
                card.on_pointer_enter(Some(current));
            }
        }
        now += FRAME_MS;
    }

    let scales = card.evader().scales();
    println!(
        "✓ {} escapes, No at {:.2}x, Yes at {:.2}x",
        card.evader().relocations(),
        scales.evasive,
        scales.alternative
    );

    let mut scheduler = ManualScheduler::new();
    card.accept(&mut scheduler);
    println!("{}", card.caption());

    let mut frames = 0u32;
    let mut peak = 0usize;
    while scheduler.fire().is_some() {
        let status = card.on_frame(now, &mut scheduler);
        peak = peak.max(card.fireworks().particles().len());
        frames += 1;
        now += FRAME_MS;
        if status == FrameStatus::Finished {
            break;
        }
    }
    println!(
        "✓ Fireworks finished after {} frames (peak {} particles, frame pending: {})",
        frames,
        peak,
        card.frame_pending()
    );
}
