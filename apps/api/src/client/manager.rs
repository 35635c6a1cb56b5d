//! Bills / income manager: the CRUD view model behind the financial pages.
//!
//! Every mutation is followed by a full re-fetch of the list. Nothing is
//! inserted or removed locally, so the list always mirrors the server.

use tracing::error;
use uuid::Uuid;

use crate::client::ledger_api::LedgerApi;
use crate::ledger::filter::{total, LedgerFilter};
use crate::ledger::validation::parse_amount;
use crate::models::ledger::{LedgerEntry, LedgerKind, LedgerPayload};

/// The input form exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerForm {
    pub name: String,
    pub amount: String,
    pub date: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormProblem {
    Incomplete,
    InvalidAmount,
}

impl LedgerForm {
    fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            name: entry.name.clone(),
            amount: entry.amount.to_string(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            category: entry.category.clone(),
        }
    }

    fn is_complete(&self) -> bool {
        [&self.name, &self.amount, &self.date, &self.category]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    fn to_payload(&self) -> Result<LedgerPayload, FormProblem> {
        if !self.is_complete() {
            return Err(FormProblem::Incomplete);
        }
        let amount = parse_amount(&self.amount).ok_or(FormProblem::InvalidAmount)?;
        Ok(LedgerPayload {
            name: Some(self.name.trim().to_string()),
            amount: Some(amount),
            date: Some(self.date.trim().to_string()),
            category: Some(self.category.clone()),
        })
    }
}

/// Request whose failure is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Action {
    fn progressive(self) -> &'static str {
        match self {
            Action::Fetch => "fetching",
            Action::Add => "adding",
            Action::Update => "updating",
            Action::Delete => "deleting",
        }
    }
}

/// Display mode of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Viewing,
    Editing,
}

pub struct ResourceManager<A: LedgerApi> {
    api: A,
    kind: LedgerKind,
    entries: Vec<LedgerEntry>,
    form: LedgerForm,
    editing: Option<Uuid>,
    filter: LedgerFilter,
    loading: bool,
    error: Option<String>,
}

impl<A: LedgerApi> ResourceManager<A> {
    /// Starts in the loading state; call [`ResourceManager::load`] to fetch.
    pub fn new(api: A, kind: LedgerKind) -> Self {
        Self {
            api,
            kind,
            entries: Vec::new(),
            form: LedgerForm::default(),
            editing: None,
            filter: LedgerFilter::default(),
            loading: true,
            error: None,
        }
    }

    pub fn kind(&self) -> LedgerKind {
        self.kind
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Inline error shown above the form, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> &LedgerForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LedgerForm {
        &mut self.form
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn row_mode(&self, id: Uuid) -> RowMode {
        if self.editing == Some(id) {
            RowMode::Editing
        } else {
            RowMode::Viewing
        }
    }

    pub fn filter(&self) -> &LedgerFilter {
        &self.filter
    }

    /// `None` shows every month; otherwise 1 = January.
    pub fn set_month_filter(&mut self, month: Option<u32>) {
        self.filter.month = month.filter(|m| (1..=12).contains(m));
    }

    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.filter.category = category;
    }

    /// Entries passing the month and category filters.
    pub fn visible(&self) -> Vec<&LedgerEntry> {
        self.filter.apply(&self.entries)
    }

    /// Sum of the visible amounts, recomputed on every call.
    pub fn total(&self) -> f64 {
        total(self.visible())
    }

    fn fail(&mut self, action: Action, err: impl std::fmt::Display) {
        let noun = self.kind.as_str();
        let plural = self.kind.plural_noun();
        error!("Error {} {plural}: {err}", action.progressive());
        self.error = Some(match action {
            Action::Fetch => format!("Failed to load {plural}. Please try again later."),
            Action::Add => format!("Failed to add {noun}. Please try again."),
            Action::Update => format!("Failed to update {noun}. Please try again."),
            Action::Delete => format!("Failed to delete {noun}. Please try again."),
        });
    }

    /// Fetches the full list. On failure the previous list is kept.
    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => self.fail(Action::Fetch, e),
        }
        self.loading = false;
    }

    /// Submits the form as a new entry. An incomplete form is ignored.
    /// Returns whether the entry was created.
    pub async fn create(&mut self) -> bool {
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(FormProblem::Incomplete) => return false,
            Err(FormProblem::InvalidAmount) => {
                self.error = Some("Amount must be a positive number.".to_string());
                return false;
            }
        };
        match self.api.create(&payload).await {
            Ok(_) => {
                self.error = None;
                self.form = LedgerForm::default();
                self.load().await;
                true
            }
            Err(e) => {
                self.fail(Action::Add, e);
                false
            }
        }
    }

    /// Copies an entry into the form and switches its row to editing.
    /// Returns `false` if the id is not in the current list.
    pub fn begin_edit(&mut self, id: Uuid) -> bool {
        let Some(entry) = self.entries.iter().find(|e| e.id == id) else {
            return false;
        };
        self.form = LedgerForm::from_entry(entry);
        self.editing = Some(id);
        true
    }

    /// Discards in-progress edits. No request is made.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = LedgerForm::default();
    }

    /// Saves the entry being edited. On failure the row stays in editing
    /// mode with the form intact.
    pub async fn save_edit(&mut self) -> bool {
        let Some(id) = self.editing else {
            return false;
        };
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(FormProblem::Incomplete) => {
                self.error = Some("All fields are required.".to_string());
                return false;
            }
            Err(FormProblem::InvalidAmount) => {
                self.error = Some("Amount must be a positive number.".to_string());
                return false;
            }
        };
        match self.api.update(id, &payload).await {
            Ok(_) => {
                self.error = None;
                self.editing = None;
                self.form = LedgerForm::default();
                self.load().await;
                true
            }
            Err(e) => {
                self.fail(Action::Update, e);
                false
            }
        }
    }

    /// Deletes immediately; there is no confirmation and no undo.
    pub async fn delete(&mut self, id: Uuid) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                self.error = None;
                if self.editing == Some(id) {
                    self.cancel_edit();
                }
                self.load().await;
                true
            }
            Err(e) => {
                self.fail(Action::Delete, e);
                false
            }
        }
    }
}
