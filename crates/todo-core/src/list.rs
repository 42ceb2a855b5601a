//! The visible page of todos and everything that decides which page it is.
//!
//! Reads are issued as [`PageLoad`] tickets and applied when they complete.
//! Only the most recently issued ticket may change the page; anything older
//! that completes later is discarded, so overlapping reloads cannot leave a
//! stale page on screen.

use todo_shared::{DEFAULT_PAGE_SIZE, PageQuery, StatusFilter, TodoDto, TodoFilter, TodoId, TodoPage};
use tracing::{debug, error, info, instrument};

use crate::editor::{EditorMode, ItemEditor, SubmitError};
use crate::error::GatewayError;
use crate::gateway::{Gateway, Transport};
use crate::notice::{Mutation, Notice, load_failed_notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLoad {
    pub seq: u64,
    pub query: PageQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was issued after this one; the response was dropped.
    Stale,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOrchestrator {
    items: Vec<TodoDto>,
    total: u64,
    page_index: u32,
    page_size: u32,
    filter: TodoFilter,
    loading: bool,
    latest_seq: u64,
    notices: Vec<Notice>,
}

impl Default for ListOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListOrchestrator {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page_index: 0,
            page_size: page_size.max(1),
            filter: TodoFilter::default(),
            loading: false,
            latest_seq: 0,
            notices: Vec::new(),
        }
    }

    /// Starts on a given page and filter instead of the first page of all todos.
    pub fn with_view(status: StatusFilter, page_index: u32, page_size: u32) -> Self {
        let mut list = Self::new(page_size);
        list.filter.status = status;
        list.page_index = page_index;
        list
    }

    pub fn items(&self) -> &[TodoDto] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn status(&self) -> StatusFilter {
        self.filter.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> PageQuery {
        PageQuery::for_page(self.page_index, self.page_size, self.filter.status)
    }

    pub fn page_count(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.page_count()
    }

    /// 1-based first and last row shown, `None` for an empty page.
    pub fn page_range(&self) -> Option<(u64, u64)> {
        if self.items.is_empty() {
            return None;
        }
        let first = u64::from(self.query().skip) + 1;
        Some((first, first + self.items.len() as u64 - 1))
    }

    pub fn find(&self, id: TodoId) -> Option<&TodoDto> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Full record for `id` with its completion flag flipped, ready for update.
    pub fn toggled(&self, id: TodoId) -> Option<TodoDto> {
        self.find(id).map(TodoDto::with_completion_toggled)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn init(&mut self) -> PageLoad {
        self.page_index = 0;
        self.filter = TodoFilter::default();
        self.issue()
    }

    pub fn set_status(&mut self, status: StatusFilter) -> PageLoad {
        debug!(from = %self.filter.status, to = %status, "status filter changed");
        self.filter.status = status;
        self.page_index = 0;
        self.issue()
    }

    pub fn set_page(&mut self, page_index: u32, page_size: u32) -> PageLoad {
        self.page_index = page_index;
        self.page_size = page_size.max(1);
        self.issue()
    }

    pub fn next_page(&mut self) -> Option<PageLoad> {
        self.has_next()
            .then(|| self.set_page(self.page_index + 1, self.page_size))
    }

    pub fn previous_page(&mut self) -> Option<PageLoad> {
        self.has_previous()
            .then(|| self.set_page(self.page_index - 1, self.page_size))
    }

    pub fn reload(&mut self) -> PageLoad {
        self.issue()
    }

    fn issue(&mut self) -> PageLoad {
        self.latest_seq += 1;
        self.loading = true;
        let load = PageLoad {
            seq: self.latest_seq,
            query: self.query(),
        };
        debug!(
            seq = load.seq,
            skip = load.query.skip,
            take = load.query.take,
            status = %load.query.status,
            "issuing page load"
        );
        load
    }

    pub fn apply(&mut self, load: PageLoad, result: Result<TodoPage, GatewayError>) -> LoadOutcome {
        if load.seq != self.latest_seq {
            debug!(seq = load.seq, latest = self.latest_seq, "discarding stale page load");
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                debug!(count = page.count, rows = page.items.len(), "page loaded");
                self.total = page.count;
                self.items = page.items;
                LoadOutcome::Applied
            }
            Err(err) => {
                error!(error = %err, "loading todos failed");
                self.notices.push(load_failed_notice());
                LoadOutcome::Failed
            }
        }
    }

    /// Records a successful mutation and returns the reload to run.
    pub fn mutation_succeeded(&mut self, mutation: Mutation) -> PageLoad {
        info!(mutation = mutation.as_str(), "todo mutation applied");
        self.notices.push(mutation.success_notice());
        self.issue()
    }

    /// Records a failed mutation. The visible page stays as it is.
    pub fn mutation_failed(&mut self, mutation: Mutation, err: &GatewayError) {
        error!(mutation = mutation.as_str(), error = %err, "todo mutation failed");
        self.notices.push(mutation.failure_notice());
    }
}

impl ListOrchestrator {
    pub async fn load<T: Transport>(&mut self, gateway: &Gateway<T>, load: PageLoad) -> LoadOutcome {
        let result = gateway.fetch_page(load.query).await;
        self.apply(load, result)
    }

    pub async fn refresh<T: Transport>(&mut self, gateway: &Gateway<T>) -> LoadOutcome {
        let load = self.reload();
        self.load(gateway, load).await
    }

    /// Flips completion of `id` and reloads. The returned outcome is the reload's.
    #[instrument(skip(self, gateway))]
    pub async fn toggle_completion<T: Transport>(
        &mut self,
        gateway: &Gateway<T>,
        id: TodoId,
    ) -> Result<LoadOutcome, GatewayError> {
        let result = send_toggle(gateway, id, self.toggled(id)).await;
        self.after_mutation(gateway, Mutation::Toggled, result).await
    }

    /// Deletes `id` once `confirm` agrees, then reloads. `Ok(None)` means
    /// nothing was sent.
    #[instrument(skip(self, gateway, confirm))]
    pub async fn delete<T: Transport>(
        &mut self,
        gateway: &Gateway<T>,
        id: TodoId,
        confirm: impl FnOnce(TodoId) -> bool,
    ) -> Result<Option<LoadOutcome>, GatewayError> {
        if !confirm(id) {
            debug!(id, "delete declined");
            return Ok(None);
        }
        let result = gateway.delete_by_id(id).await;
        self.after_mutation(gateway, Mutation::Deleted, result).await.map(Some)
    }

    /// Submits the editor and reloads on success, returning the reload's
    /// outcome. Validation and busy rejections leave the list untouched.
    pub async fn submit_editor<T: Transport>(
        &mut self,
        gateway: &Gateway<T>,
        editor: &mut ItemEditor,
    ) -> Result<LoadOutcome, SubmitError> {
        let mutation = match editor.mode() {
            EditorMode::Create => Mutation::Created,
            EditorMode::Edit(_) => Mutation::Updated,
        };
        match editor.submit(gateway).await {
            Ok(_) => {
                let load = self.mutation_succeeded(mutation);
                Ok(self.load(gateway, load).await)
            }
            Err(SubmitError::Gateway(err)) => {
                self.mutation_failed(mutation, &err);
                Err(SubmitError::Gateway(err))
            }
            Err(other) => Err(other),
        }
    }

    async fn after_mutation<T: Transport>(
        &mut self,
        gateway: &Gateway<T>,
        mutation: Mutation,
        result: Result<(), GatewayError>,
    ) -> Result<LoadOutcome, GatewayError> {
        match result {
            Ok(()) => {
                let load = self.mutation_succeeded(mutation);
                Ok(self.load(gateway, load).await)
            }
            Err(err) => {
                self.mutation_failed(mutation, &err);
                Err(err)
            }
        }
    }
}

/// Sends the full record for `id` with completion flipped. `visible` is the
/// already-flipped record when the row is on screen; otherwise it is fetched.
pub async fn send_toggle<T: Transport>(
    gateway: &Gateway<T>,
    id: TodoId,
    visible: Option<TodoDto>,
) -> Result<(), GatewayError> {
    let record = match visible {
        Some(record) => record,
        None => gateway.fetch_by_id(id).await?.with_completion_toggled(),
    };
    gateway.update(&record).await
}
