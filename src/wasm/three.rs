//! Three.js model viewer.
//!
//! Three.js and its `GLTFLoader` are loaded by the page as globals; the
//! bindings below cover only what the viewer touches.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};
use web_time::Instant;

use crate::error::EffectError;
use crate::viewer::{LightKind, ViewerOptions, ViewerState, LIGHT_RIG};

use super::{dom, frame};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = THREE)]
    pub type Object3D;

    #[wasm_bindgen(method)]
    fn add(this: &Object3D, child: &Object3D);

    #[wasm_bindgen(method, getter)]
    fn rotation(this: &Object3D) -> Euler;

    #[wasm_bindgen(method, getter)]
    fn position(this: &Object3D) -> Vector3;

    #[wasm_bindgen(method, getter)]
    fn scale(this: &Object3D) -> Vector3;

    #[wasm_bindgen(method, setter = castShadow)]
    fn set_cast_shadow(this: &Object3D, value: bool);

    #[wasm_bindgen(method, setter = receiveShadow)]
    fn set_receive_shadow(this: &Object3D, value: bool);

    #[wasm_bindgen(js_namespace = THREE)]
    pub type Euler;

    #[wasm_bindgen(method, getter)]
    fn x(this: &Euler) -> f64;

    #[wasm_bindgen(method, setter)]
    fn set_x(this: &Euler, value: f64);

    #[wasm_bindgen(method, getter)]
    fn y(this: &Euler) -> f64;

    #[wasm_bindgen(method, setter)]
    fn set_y(this: &Euler, value: f64);

    #[wasm_bindgen(js_namespace = THREE)]
    pub type Vector3;

    #[wasm_bindgen(method)]
    fn set(this: &Vector3, x: f64, y: f64, z: f64) -> Vector3;

    #[wasm_bindgen(method, setter)]
    fn set_z(this: &Vector3, value: f64);

    #[wasm_bindgen(js_namespace = THREE, extends = Object3D)]
    pub type Scene;

    #[wasm_bindgen(constructor, js_namespace = THREE)]
    fn new() -> Scene;

    #[wasm_bindgen(js_namespace = THREE, extends = Object3D)]
    pub type PerspectiveCamera;

    #[wasm_bindgen(constructor, js_namespace = THREE)]
    fn new(fov: f64, aspect: f64, near: f64, far: f64) -> PerspectiveCamera;

    #[wasm_bindgen(method, setter)]
    fn set_aspect(this: &PerspectiveCamera, value: f64);

    #[wasm_bindgen(method, js_name = updateProjectionMatrix)]
    fn update_projection_matrix(this: &PerspectiveCamera);

    #[wasm_bindgen(js_namespace = THREE, js_name = WebGLRenderer)]
    pub type WebGlRenderer;

    #[wasm_bindgen(constructor, js_namespace = THREE, js_class = "WebGLRenderer")]
    fn new(params: &JsValue) -> WebGlRenderer;

    #[wasm_bindgen(method, js_class = "WebGLRenderer", js_name = setSize)]
    fn set_size(this: &WebGlRenderer, width: f64, height: f64);

    #[wasm_bindgen(method, js_class = "WebGLRenderer", js_name = setClearColor)]
    fn set_clear_color(this: &WebGlRenderer, color: u32, alpha: f64);

    #[wasm_bindgen(method, js_class = "WebGLRenderer")]
    fn render(this: &WebGlRenderer, scene: &Scene, camera: &PerspectiveCamera);

    #[wasm_bindgen(method, js_class = "WebGLRenderer", getter = domElement)]
    fn dom_element(this: &WebGlRenderer) -> HtmlCanvasElement;

    #[wasm_bindgen(method, js_class = "WebGLRenderer", getter = shadowMap)]
    fn shadow_map(this: &WebGlRenderer) -> ShadowMap;

    pub type ShadowMap;

    #[wasm_bindgen(method, setter)]
    fn set_enabled(this: &ShadowMap, value: bool);

    #[wasm_bindgen(js_namespace = THREE, extends = Object3D)]
    pub type AmbientLight;

    #[wasm_bindgen(constructor, js_namespace = THREE)]
    fn new(color: u32, intensity: f64) -> AmbientLight;

    #[wasm_bindgen(js_namespace = THREE, extends = Object3D)]
    pub type DirectionalLight;

    #[wasm_bindgen(constructor, js_namespace = THREE)]
    fn new(color: u32, intensity: f64) -> DirectionalLight;

    #[wasm_bindgen(method, getter)]
    fn shadow(this: &DirectionalLight) -> LightShadow;

    pub type LightShadow;

    #[wasm_bindgen(method, getter = mapSize)]
    fn map_size(this: &LightShadow) -> Vector2;

    pub type Vector2;

    #[wasm_bindgen(method)]
    fn set(this: &Vector2, x: f64, y: f64) -> Vector2;

    #[wasm_bindgen(js_namespace = THREE, js_name = GLTFLoader)]
    pub type GltfLoader;

    #[wasm_bindgen(constructor, js_namespace = THREE, js_class = "GLTFLoader")]
    fn new() -> GltfLoader;

    #[wasm_bindgen(method, js_class = "GLTFLoader")]
    fn load(
        this: &GltfLoader,
        url: &str,
        on_load: &js_sys::Function,
        on_progress: &JsValue,
        on_error: &js_sys::Function,
    );

    #[wasm_bindgen(js_namespace = THREE)]
    pub type AnimationMixer;

    #[wasm_bindgen(constructor, js_namespace = THREE)]
    fn new(root: &Object3D) -> AnimationMixer;

    #[wasm_bindgen(method, js_name = clipAction)]
    fn clip_action(this: &AnimationMixer, clip: &JsValue) -> AnimationAction;

    #[wasm_bindgen(method)]
    fn update(this: &AnimationMixer, delta: f64);

    pub type AnimationAction;

    #[wasm_bindgen(method)]
    fn play(this: &AnimationAction) -> AnimationAction;
}

/// Whether the page loaded Three.js and the glTF loader.
fn three_available() -> bool {
    let global = js_sys::global();
    Reflect::get(&global, &"THREE".into())
        .ok()
        .filter(|three| three.is_object())
        .and_then(|three| Reflect::get(&three, &"GLTFLoader".into()).ok())
        .is_some_and(|loader| loader.is_function())
}

struct ModelViewer {
    window: Window,
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: WebGlRenderer,
    state: ViewerState,
    model: Option<Object3D>,
    mixer: Option<AnimationMixer>,
}

impl ModelViewer {
    fn new(window: Window, document: &Document, options: &ViewerOptions) -> Result<Self, EffectError> {
        let viewport = dom::viewport(&window);
        let scene = Scene::new();
        let camera = PerspectiveCamera::new(
            options.fov,
            viewport.width / viewport.height.max(1.0),
            options.near,
            options.far,
        );
        camera.position().set_z(options.camera_z);

        let params = Object::new();
        Reflect::set(&params, &"alpha".into(), &JsValue::TRUE)?;
        Reflect::set(&params, &"antialias".into(), &JsValue::TRUE)?;
        let renderer = WebGlRenderer::new(&params);
        renderer.set_size(viewport.width, viewport.height);
        renderer.set_clear_color(0x000000, 0.0);
        renderer.shadow_map().set_enabled(true);

        let canvas = renderer.dom_element();
        let style = canvas.style();
        let z_index = options.z_index.to_string();
        for (property, value) in [
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("z-index", z_index.as_str()),
            ("pointer-events", "none"),
        ] {
            style.set_property(property, value)?;
        }
        document
            .body()
            .ok_or_else(|| EffectError::MissingElement("body".into()))?
            .append_child(&canvas)?;

        for light in LIGHT_RIG {
            let object: Object3D = match light.kind {
                LightKind::Ambient => AmbientLight::new(light.color, light.intensity).into(),
                LightKind::Directional => {
                    let directional = DirectionalLight::new(light.color, light.intensity);
                    if light.cast_shadow {
                        directional.set_cast_shadow(true);
                        let size = options.shadow_map_size as f64;
                        directional.shadow().map_size().set(size, size);
                    }
                    directional.into()
                }
            };
            if let Some([x, y, z]) = light.position {
                object.position().set(x, y, z);
            }
            scene.add(&object);
            tracing::debug!(light = light.name, "light added");
        }

        Ok(Self {
            window,
            scene,
            camera,
            renderer,
            state: ViewerState::new(options),
            model: None,
            mixer: None,
        })
    }

    fn resize(&self) {
        let viewport = dom::viewport(&self.window);
        self.camera
            .set_aspect(viewport.width / viewport.height.max(1.0));
        self.camera.update_projection_matrix();
        self.renderer.set_size(viewport.width, viewport.height);
    }

    fn loaded(&mut self, gltf: JsValue) -> Result<(), EffectError> {
        let model: Object3D = Reflect::get(&gltf, &"scene".into())?.unchecked_into();
        model.scale().set(1.0, 1.0, 1.0);
        model.position().set(0.0, 0.0, 0.0);
        model.set_cast_shadow(true);
        model.set_receive_shadow(true);
        self.scene.add(&model);

        let clips: Array = Reflect::get(&gltf, &"animations".into())
            .ok()
            .and_then(|v| v.dyn_into::<Array>().ok())
            .unwrap_or_else(Array::new);
        if clips.length() > 0 {
            let mixer = AnimationMixer::new(&model);
            for clip in clips.iter() {
                mixer.clip_action(&clip).play();
            }
            self.mixer = Some(mixer);
        }
        self.state.model_loaded(clips.length());
        self.model = Some(model);
        tracing::info!(clips = clips.length(), "model loaded");
        Ok(())
    }

    fn draw(&mut self) {
        let step = self.state.frame(Instant::now());
        if let (Some(model), Some([dx, dy])) = (&self.model, step.spin) {
            let rotation = model.rotation();
            rotation.set_x(rotation.x() + dx);
            rotation.set_y(rotation.y() + dy);
        }
        if let (Some(mixer), Some(delta)) = (&self.mixer, step.mixer_delta) {
            mixer.update(delta);
        }
        self.renderer.render(&self.scene, &self.camera);
    }
}

pub fn start(window: &Window, document: &Document, options: &ViewerOptions) -> Result<(), EffectError> {
    if !options.enabled {
        return Ok(());
    }
    if !three_available() {
        return Err(EffectError::Unsupported("THREE.GLTFLoader"));
    }

    let viewer = Rc::new(RefCell::new(ModelViewer::new(window.clone(), document, options)?));

    let v = viewer.clone();
    dom::listen(window, "resize", move |_: web_sys::Event| v.borrow().resize())?;

    let v = viewer.clone();
    let on_load = Closure::once_into_js(move |gltf: JsValue| {
        if let Err(err) = v.borrow_mut().loaded(gltf) {
            tracing::error!(%err, "model setup failed");
        }
    });
    let url = options.model_url.clone();
    let on_error = Closure::once_into_js(move |error: JsValue| {
        tracing::error!(%url, error = ?error, "error loading model");
    });
    GltfLoader::new().load(
        &options.model_url,
        on_load.unchecked_ref(),
        &JsValue::UNDEFINED,
        on_error.unchecked_ref(),
    );

    frame::animation_loop(move || viewer.borrow_mut().draw())?;
    tracing::info!(model = %options.model_url, "model viewer started");
    Ok(())
}
