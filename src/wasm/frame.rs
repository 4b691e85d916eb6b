use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::EffectError;
use crate::throttle::FrameThrottle;

use super::dom;

/// Run `tick` on every animation frame for the page's lifetime.
pub fn animation_loop(mut tick: impl FnMut() + 'static) -> Result<(), EffectError> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::new(move || {
        tick();

        // schedule next
        let scheduled = f.borrow().as_ref().and_then(|next| {
            dom::window()
                .ok()?
                .request_animation_frame(next.as_ref().unchecked_ref())
                .ok()
        });
        if scheduled.is_none() {
            tracing::error!("animation loop stopped: requestAnimationFrame failed");
        }
    }));

    let first = g.borrow();
    let first = first.as_ref().ok_or(EffectError::Unsupported("animation frame"))?;
    dom::window()?.request_animation_frame(first.as_ref().unchecked_ref())?;
    Ok(())
}

/// Run `callback` once on the next animation frame.
pub fn next_frame(callback: impl FnOnce() + 'static) -> Result<(), EffectError> {
    let closure = Closure::once_into_js(callback);
    dom::window()?.request_animation_frame(closure.unchecked_ref())?;
    Ok(())
}

/// Run `callback` once after `delay_ms`.
pub fn after(delay_ms: i32, callback: impl FnOnce() + 'static) -> Result<(), EffectError> {
    let closure = Closure::once_into_js(callback);
    dom::window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(closure.unchecked_ref(), delay_ms)?;
    Ok(())
}

/// Wrap `pass` into an event handler that runs it at most once per
/// animation frame, however many events arrive in between.
pub fn throttled<E: 'static>(pass: impl Fn() + 'static) -> impl FnMut(E) + 'static {
    let pass = Rc::new(pass);
    let throttle = Rc::new(RefCell::new(FrameThrottle::new()));
    move |_: E| {
        if !throttle.borrow_mut().request() {
            return;
        }
        let pass = pass.clone();
        let pending = throttle.clone();
        let scheduled = next_frame(move || {
            pending.borrow_mut().complete();
            pass();
        });
        if let Err(err) = scheduled {
            throttle.borrow_mut().complete();
            tracing::warn!(%err, "frame pass not scheduled");
        }
    }
}

/// Resolves on the next animation frame.
#[cfg(test)]
pub(crate) async fn animation_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        let _ = web_sys::window()
            .expect("window")
            .request_animation_frame(&resolve);
    });
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .expect("animation frame");
}

/// Resolves after `ms` milliseconds.
#[cfg(test)]
pub(crate) async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        let _ = web_sys::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .expect("timeout");
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use wasm_bindgen_test::*;

    use super::*;

    #[wasm_bindgen_test]
    async fn burst_of_events_runs_one_pass() {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let mut handler = throttled::<()>(move || counter.set(counter.get() + 1));
        for _ in 0..5 {
            handler(());
        }
        assert_eq!(runs.get(), 0);
        animation_frame().await;
        assert_eq!(runs.get(), 1);

        handler(());
        animation_frame().await;
        assert_eq!(runs.get(), 2);
    }
}
