//! Errors raised while mounting the scene into the page.

use std::fmt;

/// Failures while attaching the render canvas to its container.
#[derive(Debug)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub enum MountError {
    /// No global `window` object (not running in a browser page).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// A DOM call rejected the request.
    Dom(String),
}

impl MountError {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn dom(error: wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{error:?}"))
    }
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no browser window available"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for MountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(MountError::NoDocument.to_string(), "window has no document");
        assert_eq!(
            MountError::Dom("NotFoundError".into()).to_string(),
            "DOM error: NotFoundError"
        );
    }
}
