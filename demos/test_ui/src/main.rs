use tether_core::prelude::*;
use tether_platform::run_desktop_app;

fn app() -> impl FnMut(&mut FrameCtx<'_>) + 'static {
    let mut was_pressed = false;
    move |ui| {
        if !ui.begin_window("imgui_native test") {
            ui.request_quit();
            return;
        }
        if ui.button("Test") {
            was_pressed = !was_pressed;
        }

        ui.text_keyed("status", if was_pressed { "pressed" } else { "press it!" });

        if ui.button("Quit") {
            ui.request_quit();
        }
        ui.end_window();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("starting test_ui");
    run_desktop_app(app())?;
    log::info!("test_ui exited");
    Ok(())
}
