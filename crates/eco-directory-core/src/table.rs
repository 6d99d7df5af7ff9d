//! Generic data table for administrative listings.
//!
//! [`DataTable`] renders any `T: Record` through caller-supplied
//! [`Column`] descriptors. It owns its own search box (single field, chosen
//! by `search_key`) and its own page index, so it works without a listing
//! controller and never reads or writes outer query state.
//!
//! Row actions are optional callbacks. Deleting is always two-step:
//! [`DataTable::request_delete`] opens a [`ConfirmDialog`], and only
//! [`DataTable::confirm_delete`] invokes `on_delete`. Cancelling the dialog
//! changes nothing.
//!
//! # Example
//!
//! ```
//! use eco_directory_core::models::{Accelerator, EntityId};
//! use eco_directory_core::table::{Column, DataTable, TableBody};
//!
//! let rows = vec![Accelerator {
//!     id: EntityId::Number(1),
//!     name: "Algiers Hub".into(),
//!     description: String::new(),
//!     city: Some("Algiers".into()),
//!     founded_year: Some(2020),
//!     website: None,
//!     logo: None,
//! }];
//! let table = DataTable::new("Accelerators", vec![
//!     Column::field("name", "Name"),
//!     Column::field("city", "City"),
//! ])
//! .with_data(rows)
//! .with_search_key("name");
//!
//! let view = table.render();
//! assert!(matches!(view.body, TableBody::Rows(ref r) if r.len() == 1));
//! ```

use std::fmt;

use crate::models::{EntityId, FieldValue, Record};
use crate::paginate::{clamp_page, paginate, total_pages, Pager};

/// Rows per page unless overridden.
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No results found.";
pub const CONFIRM_TITLE: &str = "Are you absolutely sure?";
pub const CONFIRM_DESCRIPTION: &str =
    "This action cannot be undone. This will permanently delete this item.";

type RenderFn<T> = Box<dyn Fn(&T) -> String>;
type RowCallback<T> = Box<dyn FnMut(&T)>;

/// Which value a column shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    /// A record field, read through [`Record::field`].
    Field(String),
    /// The reserved column holding the edit/delete affordances.
    Actions,
}

/// One column descriptor. Column order in the table is the order of the
/// descriptors passed in.
pub struct Column<T> {
    pub key: ColumnKey,
    pub header: String,
    render: Option<RenderFn<T>>,
}

impl<T> Column<T> {
    pub fn field(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: ColumnKey::Field(key.into()),
            header: header.into(),
            render: None,
        }
    }

    pub fn actions(header: impl Into<String>) -> Self {
        Self {
            key: ColumnKey::Actions,
            header: header.into(),
            render: None,
        }
    }

    /// Override how this column's cell is rendered.
    pub fn with_render(mut self, render: impl Fn(&T) -> String + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// A rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Icons shown in the actions column, one flag per configured callback.
    Actions { edit: bool, delete: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Reconciliation key, the record id.
    pub key: EntityId,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// One placeholder row spanning every column.
    Loading { colspan: usize },
    Empty { colspan: usize },
    Rows(Vec<RowView>),
}

/// Full render output of a [`DataTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub show_search: bool,
    pub show_add: bool,
    pub search: String,
    pub body: TableBody,
    /// Present only when there is more than one page.
    pub pager: Option<Pager>,
}

/// The blocking confirmation shown before a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub target: EntityId,
    pub title: &'static str,
    pub description: &'static str,
}

/// Self-contained searchable, paginated table over `T`.
pub struct DataTable<T> {
    title: String,
    columns: Vec<Column<T>>,
    data: Vec<T>,
    search_key: Option<String>,
    page_size: usize,
    search: String,
    page: usize,
    loading: bool,
    on_add: Option<Box<dyn FnMut()>>,
    on_edit: Option<RowCallback<T>>,
    on_delete: Option<RowCallback<T>>,
    pending_delete: Option<EntityId>,
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("title", &self.title)
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("search", &self.search)
            .field("page", &self.page)
            .field("loading", &self.loading)
            .field("pending_delete", &self.pending_delete)
            .finish()
    }
}

impl<T: Record> DataTable<T> {
    pub fn new(title: impl Into<String>, columns: Vec<Column<T>>) -> Self {
        Self {
            title: title.into(),
            columns,
            data: Vec::new(),
            search_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            page: 1,
            loading: false,
            on_add: None,
            on_edit: None,
            on_delete: None,
            pending_delete: None,
        }
    }

    pub fn with_data(mut self, data: Vec<T>) -> Self {
        self.set_data(data);
        self
    }

    /// Enable the search box, filtering on the given field.
    pub fn with_search_key(mut self, key: impl Into<String>) -> Self {
        self.search_key = Some(key.into());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn on_add(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_add = Some(Box::new(f));
        self
    }

    pub fn on_edit(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_edit = Some(Box::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_delete = Some(Box::new(f));
        self
    }

    /// Replace the rows with a fresh snapshot.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.page = clamp_page(self.page, self.total_pages());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Update the search text and go back to the first page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Jump to `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.total_pages());
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    fn row_matches(&self, item: &T) -> bool {
        let Some(key) = self.search_key.as_deref() else {
            return true;
        };
        if self.search.is_empty() {
            return true;
        }
        match item.field(key) {
            FieldValue::Text(s) => s.to_lowercase().contains(&self.search.to_lowercase()),
            FieldValue::Number(n) => n.to_string().contains(&self.search),
            FieldValue::Missing => false,
        }
    }

    /// Rows passing the table's own search filter, in data order.
    pub fn filtered(&self) -> Vec<&T> {
        self.data.iter().filter(|item| self.row_matches(item)).collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    fn render_cell(&self, column: &Column<T>, item: &T) -> Cell {
        match (&column.key, &column.render) {
            (ColumnKey::Actions, _) => Cell::Actions {
                edit: self.on_edit.is_some(),
                delete: self.on_delete.is_some(),
            },
            (ColumnKey::Field(_), Some(render)) => Cell::Text(render(item)),
            (ColumnKey::Field(key), None) => Cell::Text(item.field(key).display()),
        }
    }

    pub fn render(&self) -> TableView {
        let filtered = self.filtered();
        let total = total_pages(filtered.len(), self.page_size);
        let page = clamp_page(self.page, total);
        let colspan = self.columns.len();

        let body = if self.loading {
            TableBody::Loading { colspan }
        } else {
            let slice = paginate(&filtered, self.page_size, page);
            if slice.items.is_empty() {
                TableBody::Empty { colspan }
            } else {
                TableBody::Rows(
                    slice
                        .items
                        .iter()
                        .map(|item| RowView {
                            key: item.id(),
                            cells: self
                                .columns
                                .iter()
                                .map(|c| self.render_cell(c, item))
                                .collect(),
                        })
                        .collect(),
                )
            }
        };

        let pager = Pager::new(page, total);
        TableView {
            title: self.title.clone(),
            headers: self.columns.iter().map(|c| c.header.clone()).collect(),
            show_search: self.search_key.is_some(),
            show_add: self.on_add.is_some(),
            search: self.search.clone(),
            body,
            pager: pager.is_visible().then_some(pager),
        }
    }

    fn find(&self, id: &EntityId) -> Option<&T> {
        self.data.iter().find(|item| &item.id() == id)
    }

    /// Id of the row whose id prints as `raw`.
    ///
    /// Text ids made of digits (`"2024"`, `"007"`) only match this way, since
    /// parsing `raw` would turn them into numbers.
    pub fn resolve_id(&self, raw: &str) -> Option<EntityId> {
        self.data
            .iter()
            .map(|item| item.id())
            .find(|id| id.to_string() == raw)
    }

    /// Invoke `on_add`. Returns whether a callback ran.
    pub fn add(&mut self) -> bool {
        match self.on_add.as_mut() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    /// Invoke `on_edit` for row `id`. Returns whether a callback ran.
    pub fn edit(&mut self, id: &EntityId) -> bool {
        let Some(idx) = self.data.iter().position(|item| &item.id() == id) else {
            return false;
        };
        match self.on_edit.as_mut() {
            Some(f) => {
                f(&self.data[idx]);
                true
            }
            None => false,
        }
    }

    /// Open the delete confirmation for row `id`.
    ///
    /// Returns `false` (and opens nothing) when no `on_delete` is configured
    /// or the row does not exist.
    pub fn request_delete(&mut self, id: &EntityId) -> bool {
        if self.on_delete.is_none() || self.find(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id.clone());
        true
    }

    /// The open confirmation dialog, if any.
    pub fn confirm_dialog(&self) -> Option<ConfirmDialog> {
        self.pending_delete.as_ref().map(|target| ConfirmDialog {
            target: target.clone(),
            title: CONFIRM_TITLE,
            description: CONFIRM_DESCRIPTION,
        })
    }

    /// Affirm the open dialog: invoke `on_delete` and close it.
    ///
    /// Returns whether `on_delete` ran.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(target) = self.pending_delete.take() else {
            return false;
        };
        let Some(idx) = self.data.iter().position(|item| item.id() == target) else {
            return false;
        };
        match self.on_delete.as_mut() {
            Some(f) => {
                f(&self.data[idx]);
                true
            }
            None => false,
        }
    }

    /// Dismiss the open dialog without side effects.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}
