use crate::editable::{self, EditEvent, EditOutcome, EditableText};
use crate::model::LabelStyle;
use eframe::egui;

pub const DEFAULT_PLACEHOLDER: &str = "(empty)";

const HOVER_BG: egui::Color32 = egui::Color32::from_rgb(254, 249, 195);
const EDIT_BG: egui::Color32 = egui::Color32::from_rgb(254, 249, 195);
const EDIT_BORDER: egui::Color32 = egui::Color32::from_rgb(250, 204, 21);
const PLACEHOLDER_COLOR: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);

/// Text that turns into a single-line editor when clicked.
///
/// The widget never writes the value itself: `on_change` is called with the
/// draft when an edit is committed (Enter or focus loss). Escape abandons
/// the edit without calling it.
pub struct EditableLabel<'a> {
    value: String,
    style: LabelStyle,
    placeholder: &'a str,
    id_salt: egui::Id,
}

impl<'a> EditableLabel<'a> {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            id_salt: egui::Id::new(&value),
            value,
            style: LabelStyle::default(),
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }

    /// Edit state is kept per id, so callers showing several labels must
    /// give each a stable salt.
    pub fn id_salt(mut self, salt: impl std::hash::Hash) -> Self {
        self.id_salt = egui::Id::new(salt);
        self
    }

    pub fn style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn show(self, ui: &mut egui::Ui, on_change: impl FnOnce(String)) -> egui::Response {
        let id = ui.make_persistent_id(self.id_salt);
        let mut state = ui
            .data_mut(|d| d.get_temp::<EditableText>(id))
            .unwrap_or_else(|| EditableText::new(&self.value));
        state.sync(&self.value);

        let response = if state.is_editing() {
            self.show_editor(ui, id, &mut state, on_change)
        } else {
            self.show_display(ui, &mut state)
        };

        ui.data_mut(|d| d.insert_temp(id, state));
        response
    }

    /// A blank placeholder would leave an empty label with nothing to click.
    fn placeholder_text(&self) -> &str {
        if self.placeholder.trim().is_empty() {
            DEFAULT_PLACEHOLDER
        } else {
            self.placeholder
        }
    }

    fn display_text(&self) -> egui::RichText {
        let text = if self.value.is_empty() {
            egui::RichText::new(self.placeholder_text()).color(PLACEHOLDER_COLOR)
        } else {
            egui::RichText::new(&self.value).color(self.style.color.to_color32())
        };
        let mut text = text
            .size(self.style.size)
            .extra_letter_spacing(self.style.letter_spacing);
        if let Some(line_height) = self.style.line_height {
            text = text.line_height(Some(line_height));
        }
        text
    }

    fn show_display(&self, ui: &mut egui::Ui, state: &mut EditableText) -> egui::Response {
        let background = ui.painter().add(egui::Shape::Noop);
        let label = egui::Label::new(self.display_text()).sense(egui::Sense::click());
        let label = match self.style.wrap_width {
            Some(width) => {
                ui.set_max_width(width);
                label.wrap()
            }
            None => label.extend(),
        };
        let response = ui.add(label);

        if response.hovered() {
            ui.painter().set(
                background,
                egui::Shape::rect_filled(response.rect.expand2(egui::vec2(4.0, 0.0)), 2.0, HOVER_BG),
            );
        }
        if response.clicked() {
            let outcome = state.handle(EditEvent::Activate, &self.value);
            if outcome == EditOutcome::Started {
                ui.ctx().request_repaint();
            }
        }
        response
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .on_hover_text("Click to edit")
    }

    fn show_editor(
        &self,
        ui: &mut egui::Ui,
        id: egui::Id,
        state: &mut EditableText,
        on_change: impl FnOnce(String),
    ) -> egui::Response {
        let font_id = self.style.font_id();
        let char_width = ui
            .painter()
            .layout_no_wrap("0".to_string(), font_id.clone(), egui::Color32::PLACEHOLDER)
            .size()
            .x;
        let width = editable::editor_width_chars(state.draft()) as f32 * char_width;

        let mut draft = state.draft().to_string();
        let output = egui::Frame::new()
            .fill(EDIT_BG)
            .stroke(egui::Stroke::new(1.0, EDIT_BORDER))
            .show(ui, |ui| {
                egui::TextEdit::singleline(&mut draft)
                    .id(id.with("editor"))
                    .font(font_id)
                    .text_color(self.style.color.to_color32())
                    .desired_width(width)
                    .frame(false)
                    .margin(egui::Margin::ZERO)
                    .show(ui)
            })
            .inner;
        let egui::text_edit::TextEditOutput {
            response,
            state: mut edit_state,
            ..
        } = output;

        if response.changed() {
            state.handle(EditEvent::DraftChanged(draft.clone()), &self.value);
        }

        if state.take_focus_request() {
            response.request_focus();
            let end = egui::text::CCursor::new(draft.chars().count());
            edit_state
                .cursor
                .set_char_range(Some(egui::text::CCursorRange::two(
                    egui::text::CCursor::new(0),
                    end,
                )));
            edit_state.store(ui.ctx(), response.id);
        } else if response.lost_focus() {
            let event = ui.input(|i| {
                if i.key_pressed(egui::Key::Escape) {
                    EditEvent::Cancel
                } else if i.key_pressed(egui::Key::Enter) {
                    EditEvent::Confirm
                } else {
                    EditEvent::Blur
                }
            });
            match state.handle(event, &self.value) {
                EditOutcome::Committed(value) => on_change(value),
                EditOutcome::Cancelled => log::debug!("edit of {:?} cancelled", self.value),
                _ => {}
            }
        }
        response
    }
}
