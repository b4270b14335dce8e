use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help")
        .open(open)
        .resizable(true)
        .default_width(460.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Editing labels");
                ui.separator();
                help_row(ui, "Click", "Edit the label in place");
                help_row(ui, "Enter", "Keep the edited text");
                help_row(ui, "Click elsewhere", "Keep the edited text");
                help_row(ui, "Escape", "Discard the edit");
                ui.add_space(5.0);
                ui.label("Empty labels are shown as a placeholder so they can still be clicked.");

                ui.add_space(10.0);
                ui.heading("Shortcuts");
                ui.separator();
                help_row(ui, "⌘⇧S", "Export as SVG");
                help_row(ui, "F1", "Show this window");

                ui.add_space(10.0);
                ui.heading("Settings");
                ui.separator();
                ui.label("Settings are read from ~/.config/figedit.toml, or settings.toml in the working directory:");
                ui.add_space(5.0);
                ui.code(
                    r##"svg_path = "figure.svg"
zoom = 1.25
show_label_outlines = false
placeholder = "(empty)""##,
                );
                ui.add_space(5.0);
                ui.label("Labels are not saved. Reset or restarting brings back the original text.");
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 16.0],
            egui::Label::new(egui::RichText::new(shortcut).monospace().strong()),
        );
        ui.label(description);
    });
}
