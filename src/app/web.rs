//! Browser entry point.
//!
//! On module start the scene is bootstrapped against `#app` / `#giantCanvas`,
//! `resize` and `mousemove` listeners go onto `window`, the asset is fetched,
//! and once it decodes a `requestAnimationFrame` loop takes over.
//!
//! JS can stop everything through the handle returned by `activeScene()`:
//!
//! ```js
//! import init, { activeScene } from "./atlas_giant.js";
//! await init();
//! activeScene()?.stop();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::app::frame_loop::{FrameLoop, StopHandle};
use crate::app::stage::{GiantScene, Stage};
use crate::assets::{AssetReader, FetchAssetReader, GltfLoader};
use crate::config::SceneConfig;
use crate::errors::{GiantError, Result};
use crate::renderer::{CanvasRenderer, Renderer};

/// Lifecycle of the page's scene.
pub enum AppState {
    Loading(GiantScene<CanvasRenderer>),
    Running(FrameLoop<CanvasRenderer>),
    Failed,
}

impl AppState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AppState::Loading(_) => "loading",
            AppState::Running(_) => "running",
            AppState::Failed => "failed",
        }
    }

    fn stage_mut(&mut self) -> Option<&mut Stage<CanvasRenderer>> {
        match self {
            AppState::Loading(scene) => Some(scene.stage_mut()),
            AppState::Running(frame_loop) => Some(frame_loop.running_mut().stage_mut()),
            AppState::Failed => None,
        }
    }
}

type FrameCallback = Closure<dyn FnMut()>;

struct WebInner {
    window: Window,
    container: HtmlElement,
    state: RefCell<AppState>,
    stop: StopHandle,
    frame_id: Cell<Option<i32>>,
    frame_callback: RefCell<Option<FrameCallback>>,
    resize_listener: RefCell<Option<Closure<dyn FnMut()>>>,
    mouse_listener: RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>,
}

/// JS-side handle to the running page scene.
#[wasm_bindgen]
#[derive(Clone)]
pub struct WebHandle {
    inner: Rc<WebInner>,
}

#[wasm_bindgen]
impl WebHandle {
    /// Cancels the pending frame and removes the page listeners.
    pub fn stop(&self) {
        let inner = &self.inner;
        inner.stop.stop();

        if let Some(id) = inner.frame_id.take()
            && let Err(err) = inner.window.cancel_animation_frame(id)
        {
            log::warn!("cancelAnimationFrame failed: {err:?}");
        }
        inner.frame_callback.borrow_mut().take();

        if let Some(listener) = inner.resize_listener.borrow_mut().take() {
            let _ = inner
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
        if let Some(listener) = inner.mouse_listener.borrow_mut().take() {
            let _ = inner
                .window
                .remove_event_listener_with_callback("mousemove", listener.as_ref().unchecked_ref());
        }
        log::info!("Scene stopped");
    }

    #[wasm_bindgen(js_name = isStopped)]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.stop.is_stopped()
    }

    /// `"loading"`, `"running"` or `"failed"`.
    #[must_use]
    pub fn state(&self) -> String {
        self.inner.state.borrow().name().to_string()
    }

    /// Whether an animation frame is scheduled.
    #[wasm_bindgen(js_name = hasPendingFrame)]
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.inner.frame_id.get().is_some()
    }

    /// Whether the `resize` / `mousemove` listeners are still installed.
    #[wasm_bindgen(js_name = hasListeners)]
    #[must_use]
    pub fn has_listeners(&self) -> bool {
        self.inner.resize_listener.borrow().is_some() || self.inner.mouse_listener.borrow().is_some()
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<WebHandle>> = const { RefCell::new(None) };
}

/// Handle of the scene started on module load, if it came up.
#[wasm_bindgen(js_name = activeScene)]
#[must_use]
pub fn active_scene() -> Option<WebHandle> {
    ACTIVE.with(|active| active.borrow().clone())
}

#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    match launch(SceneConfig::default()) {
        Ok(handle) => ACTIVE.with(|active| *active.borrow_mut() = Some(handle)),
        Err(err) => log::error!("Failed to start scene: {err}"),
    }
}

/// Bootstraps the scene on the current page and begins loading its asset.
pub fn launch(config: SceneConfig) -> Result<WebHandle> {
    let window = web_sys::window().ok_or_else(|| GiantError::Wasm("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| GiantError::Wasm("no document".into()))?;

    let container: HtmlElement = document
        .get_element_by_id(&config.page.container_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| GiantError::MissingElement(config.page.container_id.clone()))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(&config.page.canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| GiantError::MissingElement(config.page.canvas_id.clone()))?;

    let asset_path = config.asset.path.clone();
    let renderer = CanvasRenderer::new(canvas, config.renderer.clone());
    let scene = GiantScene::new(
        config,
        renderer,
        container_width(&container),
        window.device_pixel_ratio() as f32,
    )?;

    let inner = Rc::new(WebInner {
        window,
        container,
        state: RefCell::new(AppState::Loading(scene)),
        stop: StopHandle::new(),
        frame_id: Cell::new(None),
        frame_callback: RefCell::new(None),
        resize_listener: RefCell::new(None),
        mouse_listener: RefCell::new(None),
    });

    install_listeners(&inner)?;
    spawn_local(load_and_run(Rc::clone(&inner), asset_path));

    Ok(WebHandle { inner })
}

fn container_width(container: &HtmlElement) -> u32 {
    container.client_width().max(0) as u32
}

fn install_listeners(inner: &Rc<WebInner>) -> Result<()> {
    let resize = {
        let inner = Rc::clone(inner);
        Closure::wrap(Box::new(move || {
            let width = container_width(&inner.container);
            if let Some(stage) = inner.state.borrow_mut().stage_mut() {
                stage.handle_resize(width);
            }
        }) as Box<dyn FnMut()>)
    };
    inner
        .window
        .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
    *inner.resize_listener.borrow_mut() = Some(resize);

    let mouse_move = {
        let inner = Rc::clone(inner);
        Closure::wrap(Box::new(move |event: MouseEvent| {
            if let Some(stage) = inner.state.borrow_mut().stage_mut() {
                stage.handle_mouse_move(event.client_x() as f32);
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    inner
        .window
        .add_event_listener_with_callback("mousemove", mouse_move.as_ref().unchecked_ref())?;
    *inner.mouse_listener.borrow_mut() = Some(mouse_move);

    Ok(())
}

async fn load_and_run(inner: Rc<WebInner>, asset_path: String) {
    let reader = FetchAssetReader::new("");
    let prefab = match reader
        .read_bytes(&asset_path)
        .await
        .and_then(|bytes| GltfLoader::parse(&bytes))
    {
        Ok(prefab) => prefab,
        Err(err) => {
            log::error!("Failed to load '{asset_path}': {err}");
            *inner.state.borrow_mut() = AppState::Failed;
            return;
        }
    };
    if inner.stop.is_stopped() {
        return;
    }

    // The borrow must end before the device request is awaited.
    let gpu_request = match &*inner.state.borrow() {
        AppState::Loading(scene) => {
            let renderer = &scene.stage().renderer;
            Some((
                renderer.canvas().clone(),
                renderer.settings().clone(),
                renderer.drawing_buffer_size(),
            ))
        }
        _ => None,
    };
    let Some((canvas, settings, size)) = gpu_request else {
        log::warn!("Asset arrived after the scene left the loading state");
        return;
    };
    let gpu = match CanvasRenderer::create_gpu(canvas, settings, size).await {
        Ok(gpu) => gpu,
        Err(err) => {
            log::error!("Failed to initialize GPU: {err}");
            *inner.state.borrow_mut() = AppState::Failed;
            return;
        }
    };

    let previous = std::mem::replace(&mut *inner.state.borrow_mut(), AppState::Failed);
    let AppState::Loading(mut scene) = previous else {
        log::warn!("GPU came up after the scene left the loading state");
        return;
    };
    scene.stage_mut().renderer.attach_gpu(gpu);

    // on_load reports its own failures; the state stays Failed.
    if let Ok(running) = scene.on_load(&prefab) {
        let frame_loop = FrameLoop::with_stop_handle(running, inner.stop.clone());
        *inner.state.borrow_mut() = AppState::Running(frame_loop);
        start_animation_loop(&inner);
    }
}

fn start_animation_loop(inner: &Rc<WebInner>) {
    if inner.stop.is_stopped() {
        return;
    }

    let callback = {
        let inner = Rc::clone(inner);
        Closure::wrap(Box::new(move || {
            inner.frame_id.set(None);
            let rendered = match &mut *inner.state.borrow_mut() {
                AppState::Running(frame_loop) => frame_loop.step().is_some(),
                _ => false,
            };
            if rendered {
                request_frame(&inner);
            }
        }) as Box<dyn FnMut()>)
    };
    *inner.frame_callback.borrow_mut() = Some(callback);
    request_frame(inner);
}

fn request_frame(inner: &WebInner) {
    let callback = inner.frame_callback.borrow();
    let Some(callback) = callback.as_ref() else {
        return;
    };
    match inner
        .window
        .request_animation_frame(callback.as_ref().unchecked_ref())
    {
        Ok(id) => inner.frame_id.set(Some(id)),
        Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Config whose page ids are unique to `tag`, with the requested
    /// elements appended to the document body.
    fn page(tag: &str, with_container: bool, with_canvas: bool) -> SceneConfig {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();

        let mut config = SceneConfig::default();
        config.page.container_id = format!("app-{tag}");
        config.page.canvas_id = format!("canvas-{tag}");

        if with_container {
            let container = document.create_element("div").unwrap();
            container.set_id(&config.page.container_id);
            body.append_child(&container).unwrap();
        }
        if with_canvas {
            let canvas = document.create_element("canvas").unwrap();
            canvas.set_id(&config.page.canvas_id);
            body.append_child(&canvas).unwrap();
        }
        config
    }

    async fn sleep_ms(ms: i32) {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            web_sys::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .unwrap();
        });
        wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
    }

    #[wasm_bindgen_test]
    fn missing_container_is_reported() {
        let Err(err) = launch(page("no-container", false, true)) else {
            panic!("launch without a container must fail");
        };
        assert!(matches!(err, GiantError::MissingElement(id) if id == "app-no-container"));
    }

    #[wasm_bindgen_test]
    fn missing_canvas_is_reported() {
        let Err(err) = launch(page("no-canvas", true, false)) else {
            panic!("launch without a canvas must fail");
        };
        assert!(matches!(err, GiantError::MissingElement(id) if id == "canvas-no-canvas"));
    }

    #[wasm_bindgen_test]
    async fn failed_fetch_leaves_scene_failed() {
        let mut config = page("fetch", true, true);
        config.asset.path = "missing/atlas_giant.glb".to_string();

        let handle = launch(config).unwrap();
        assert_eq!(handle.state(), "loading");

        for _ in 0..200 {
            if handle.state() != "loading" {
                break;
            }
            sleep_ms(10).await;
        }
        assert_eq!(handle.state(), "failed");
        assert!(!handle.has_pending_frame());
        assert!(handle.inner.frame_callback.borrow().is_none());

        handle.stop();
    }

    #[wasm_bindgen_test]
    fn stop_cancels_frame_and_removes_listeners() {
        let handle = launch(page("stop", true, true)).unwrap();
        assert!(handle.has_listeners());

        start_animation_loop(&handle.inner);
        assert!(handle.has_pending_frame());

        handle.stop();
        assert!(handle.is_stopped());
        assert!(!handle.has_pending_frame());
        assert!(!handle.has_listeners());
        assert!(handle.inner.frame_callback.borrow().is_none());

        // A stopped scene never schedules another frame.
        start_animation_loop(&handle.inner);
        assert!(!handle.has_pending_frame());
    }
}
