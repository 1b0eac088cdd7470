use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::error::MountError;

/// Clear any text selection when a drag starts on the canvas, so orbiting
/// does not highlight the surrounding page.
pub fn clear_selection_on_pointer_down(canvas: &Element) -> Result<(), MountError> {
    let closure = Closure::wrap(Box::new(move |_event: Event| {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(selection)) = window.get_selection() {
                selection.remove_all_ranges().ok();
            }
        }
    }) as Box<dyn FnMut(Event)>);

    // Capture phase, ahead of Bevy's own canvas listeners.
    canvas
        .add_event_listener_with_callback_and_bool(
            "pointerdown",
            closure.as_ref().unchecked_ref(),
            true,
        )
        .map_err(MountError::dom)?;

    // Listener lives as long as the page.
    closure.forget();
    Ok(())
}
