use crate::models::{Activity, ActivityDraft, FormErrors, SessionResponse, View};
use crate::store::{ActivityStore, new_activity};
use crate::validation::validate_draft;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

/// Everything the dashboard page reacts to: the activity store, the active
/// view, the add-activity draft and the errors from the last submission.
#[derive(Debug, Clone)]
pub struct Session {
    seed: Vec<Activity>,
    store: ActivityStore,
    view: View,
    draft: ActivityDraft,
    errors: FormErrors,
}

impl Session {
    pub fn new(seed: Vec<Activity>) -> Self {
        Self::new_at(seed, today())
    }

    pub fn new_at(seed: Vec<Activity>, today: NaiveDate) -> Self {
        Self {
            store: ActivityStore::new(seed.clone()),
            seed,
            view: View::default(),
            draft: ActivityDraft::new(today),
            errors: FormErrors::new(),
        }
    }

    pub fn activities(&self) -> &[Activity] {
        self.store.all()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn draft(&self) -> &ActivityDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn select_view(&mut self, view: View) {
        if self.view != view {
            debug!(from = self.view.as_str(), to = view.as_str(), "view changed");
        }
        self.view = view;
    }

    pub fn edit_draft(&mut self, draft: ActivityDraft) {
        self.draft = draft;
    }

    pub fn submit(&mut self) -> Result<Activity, FormErrors> {
        self.submit_at(today())
    }

    /// Validates the current draft. On success the record is appended, the
    /// draft is reset and the activities view is selected; on failure only
    /// the errors change.
    pub fn submit_at(&mut self, today: NaiveDate) -> Result<Activity, FormErrors> {
        let errors = validate_draft(&self.draft);
        let activity = errors
            .is_empty()
            .then(|| new_activity(&self.draft))
            .flatten();

        let Some(activity) = activity else {
            info!(fields = ?errors.keys().collect::<Vec<_>>(), "activity rejected");
            self.errors = errors.clone();
            return Err(errors);
        };

        self.store.append(activity.clone());
        self.draft = ActivityDraft::new(today);
        self.errors.clear();
        self.view = View::Activities;

        info!(
            id = %activity.id,
            activity_type = %activity.activity_type,
            total = self.store.len(),
            "activity recorded"
        );
        Ok(activity)
    }

    pub fn reset(&mut self) {
        self.reset_at(today())
    }

    pub fn reset_at(&mut self, today: NaiveDate) {
        *self = Self::new_at(std::mem::take(&mut self.seed), today);
        info!(activities = self.store.len(), "session reset");
    }

    pub fn snapshot(&self) -> SessionResponse {
        SessionResponse {
            view: self.view,
            draft: self.draft.clone(),
            errors: self.errors.clone(),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
