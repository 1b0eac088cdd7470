use engine::core::app_setup::create_app;

mod engine;
mod error;
mod web;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();

        let launch = || {
            let mut app = create_app();
            wasm_bindgen_futures::spawn_local(async move {
                app.run();
            });
        };

        if let Err(error) = web::mount::mount(launch) {
            web_sys::console::warn_1(&format!("Triangulation scene not mounted: {error}").into());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_app().run();
    }
}
