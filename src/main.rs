mod app;
mod editable;
mod figure;
mod model;
mod path;
mod store;
mod widgets;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting figedit");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Hypoxia adaptation figure")
            .with_inner_size([1180.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "figedit",
        native_options,
        Box::new(|cc| Ok(Box::new(app::FigureApp::new(cc)?))),
    )
}
