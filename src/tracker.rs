use crate::models::{EntryForm, FieldErrors, MoodEntry};
use crate::store::EntryStore;
use crate::validation::validate_form;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Entry,
    Analytics,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Entry, Tab::Analytics, Tab::Reports];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "entry" => Some(Tab::Entry),
            "analytics" => Some(Tab::Analytics),
            "reports" => Some(Tab::Reports),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Tab::Entry => "entry",
            Tab::Analytics => "analytics",
            Tab::Reports => "reports",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Entry => "Daily entry",
            Tab::Analytics => "Analytics",
            Tab::Reports => "Reports",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub active_tab: Tab,
    pub form: EntryForm,
    pub errors: FieldErrors,
    pub flash: Option<String>,
}

/// Everything the page is rendered from.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    pub store: EntryStore,
    pub view: ViewState,
}

#[derive(Debug, Clone)]
pub enum Action {
    SelectTab(Tab),
    /// The page has been shown; the flash and a rejected form are one-shot.
    Rendered,
    /// Submission from the entry form; the form is kept for redisplay on failure.
    Submit {
        form: EntryForm,
        id: String,
        today: NaiveDate,
    },
    /// Submission from the JSON API; leaves the page state alone.
    Record {
        form: EntryForm,
        id: String,
        today: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Rejected(FieldErrors),
    Persist { entry: MoodEntry, replaced: bool },
}

impl Tracker {
    pub fn new(store: EntryStore) -> Self {
        Self {
            store,
            view: ViewState::default(),
        }
    }

    /// Runs `update` in place.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        let (next, effect) = update(std::mem::take(self), action);
        *self = next;
        effect
    }
}

pub fn update(mut tracker: Tracker, action: Action) -> (Tracker, Effect) {
    match action {
        Action::SelectTab(tab) => {
            tracker.view.active_tab = tab;
            tracker.view.flash = None;
            (tracker, Effect::None)
        }
        Action::Rendered => {
            tracker.view = ViewState {
                active_tab: tracker.view.active_tab,
                ..ViewState::default()
            };
            (tracker, Effect::None)
        }
        Action::Submit { form, id, today } => match validate_form(&form, id, today) {
            Ok(entry) => {
                let replaced = tracker.store.upsert(entry.clone()).is_some();
                tracker.view = ViewState {
                    active_tab: Tab::Entry,
                    flash: Some(saved_message(&entry, replaced)),
                    ..ViewState::default()
                };
                (tracker, Effect::Persist { entry, replaced })
            }
            Err(errors) => {
                tracker.view = ViewState {
                    active_tab: Tab::Entry,
                    form,
                    errors: errors.clone(),
                    flash: None,
                };
                (tracker, Effect::Rejected(errors))
            }
        },
        Action::Record { form, id, today } => match validate_form(&form, id, today) {
            Ok(entry) => {
                let replaced = tracker.store.upsert(entry.clone()).is_some();
                (tracker, Effect::Persist { entry, replaced })
            }
            Err(errors) => (tracker, Effect::Rejected(errors)),
        },
    }
}

fn saved_message(entry: &MoodEntry, replaced: bool) -> String {
    if replaced {
        format!("Entry for {} replaced", entry.date)
    } else {
        format!("Entry for {} saved", entry.date)
    }
}
