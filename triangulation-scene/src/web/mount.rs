/// Decides when the scene may be built: on the first report of a container
/// with positive width and height, and never again afterwards.
#[derive(Debug, Default)]
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
pub struct ConstructionGate {
    built: bool,
}

#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
impl ConstructionGate {
    /// Report the container's current size. Returns true exactly once, for
    /// the first non-empty size.
    pub fn offer(&mut self, width: i32, height: i32) -> bool {
        if self.built || width <= 0 || height <= 0 {
            return false;
        }
        self.built = true;
        true
    }

    pub fn is_built(&self) -> bool {
        self.built
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::mount;

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use js_sys::Array;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{ResizeObserver, console};

    use super::ConstructionGate;
    use crate::error::MountError;
    use crate::web::selection::clear_selection_on_pointer_down;
    use constants::render_settings::{CANVAS_ID, CONTAINER_ID};

    /// Attach the render canvas to the page container and run `launch` once
    /// the container has a size.
    ///
    /// A missing container aborts quietly. A container that is not laid out
    /// yet (hidden tab, collapsed panel) is watched with a `ResizeObserver`
    /// until it reports a positive size; the observer then disconnects.
    pub fn mount<F>(launch: F) -> Result<(), MountError>
    where
        F: FnOnce() + 'static,
    {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;

        let Some(container) = document.get_element_by_id(CONTAINER_ID) else {
            console::debug_1(&format!("#{CONTAINER_ID} not found, skipping scene").into());
            return Ok(());
        };

        let canvas = document.create_element("canvas").map_err(MountError::dom)?;
        canvas.set_id(CANVAS_ID);
        canvas
            .set_attribute("style", "display:block;width:100%;height:100%;touch-action:none")
            .map_err(MountError::dom)?;
        container.append_child(&canvas).map_err(MountError::dom)?;
        clear_selection_on_pointer_down(&canvas)?;

        let mut gate = ConstructionGate::default();
        if gate.offer(container.client_width(), container.client_height()) {
            launch();
            return Ok(());
        }

        console::info_1(&"Scene container has no size yet, deferring construction".into());

        let gate = Rc::new(RefCell::new(gate));
        let launch = Rc::new(RefCell::new(Some(launch)));
        let observed = container.clone();

        let closure = Closure::wrap(Box::new(move |_entries: Array, observer: ResizeObserver| {
            let ready = gate
                .borrow_mut()
                .offer(observed.client_width(), observed.client_height());
            if !ready {
                return;
            }
            observer.disconnect();
            if let Some(launch) = launch.borrow_mut().take() {
                launch();
            }
        }) as Box<dyn FnMut(Array, ResizeObserver)>);

        let observer =
            ResizeObserver::new(closure.as_ref().unchecked_ref()).map_err(MountError::dom)?;
        observer.observe(&container);

        // The observer disconnects itself; the callback lives with the page.
        closure.forget();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_immediately_for_a_sized_container() {
        let mut gate = ConstructionGate::default();
        assert!(gate.offer(640, 480));
        assert!(gate.is_built());
    }

    #[test]
    fn defers_until_the_container_has_a_size() {
        let mut gate = ConstructionGate::default();
        assert!(!gate.offer(0, 0));
        assert!(!gate.offer(320, 0));
        assert!(!gate.is_built());
        assert!(gate.offer(320, 200));
    }

    #[test]
    fn builds_exactly_once() {
        let mut gate = ConstructionGate::default();
        assert!(!gate.offer(0, 0));
        assert!(gate.offer(800, 600));
        assert!(!gate.offer(800, 600));
        assert!(!gate.offer(1024, 768));
        assert!(gate.is_built());
    }
}
