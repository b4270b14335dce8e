use crate::model::LabelKey;

/// Current text of every label in the figure.
///
/// This is the single source of truth the editable widgets read from. The
/// only write path for one label is [`LabelStore::update`]; [`LabelStore::reset`]
/// restores the whole figure to its defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelStore {
    values: [String; LabelKey::COUNT],
}

impl Default for LabelStore {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|i| LabelKey::ALL[i].default_text().to_string()),
        }
    }
}

impl LabelStore {
    pub fn get(&self, key: LabelKey) -> &str {
        &self.values[key.index()]
    }

    pub fn update(&mut self, key: LabelKey, value: impl Into<String>) {
        let value = value.into();
        let slot = &mut self.values[key.index()];
        if *slot != value {
            log::debug!("label {} changed: {:?} -> {:?}", key.id(), slot, value);
        }
        *slot = value;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelKey, &str)> {
        LabelKey::ALL
            .iter()
            .map(move |&key| (key, self.values[key.index()].as_str()))
    }

    pub fn is_default(&self, key: LabelKey) -> bool {
        self.get(key) == key.default_text()
    }
}
