//! Public listing pages: `eco list`, `eco facets` and the `/listings` API.
//!
//! A request is replayed onto a fresh [`ListingController`] as the same
//! sequence of events a user would produce (search, filter, sort, then page),
//! so the page-reset rules apply exactly as they do interactively.

use anyhow::{bail, Result};
use eco_directory_core::controller::ListingController;
use eco_directory_core::grid::grid_view;
use eco_directory_core::models::{
    Accelerator, CategoryFilter, LoadStatus, MediaOutlet, QueryDescriptor, SortOrder,
};
use eco_directory_core::paginate::Pager;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ListingKind};
use crate::entities::{CardContext, DirectoryEntity};
use crate::render::{grid_lines, pager_line};
use crate::source::{load, open_source};

/// Query parameters for one listing page. Absent fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingRequest {
    pub search: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<SortOrder>,
    pub page: Option<usize>,
}

/// One rendered listing page, as returned by `--json` and the HTTP API.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage<T> {
    pub listing: String,
    pub title: String,
    pub status: LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub query: QueryDescriptor,
    pub facets: Vec<String>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub items: Vec<T>,
    pub pager: Pager,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Load `name` and compute the requested page.
pub async fn fetch_page<T: DirectoryEntity>(
    config: &Config,
    name: &str,
    req: &ListingRequest,
) -> Result<ListingPage<T>> {
    let source_cfg = config.source(name)?;
    let source = open_source::<T>(source_cfg)?;
    let empty_message = source_cfg.empty_message(name);

    let mut controller = ListingController::new(config.listing.page_size, empty_message.clone());
    controller.load(load(source.as_ref()).await);

    if let Some(search) = &req.search {
        controller.set_search_text(search.clone());
    }
    if let Some(filter) = &req.filter {
        controller.set_category_filter(CategoryFilter::parse(filter));
    }
    if let Some(sort) = req.sort {
        controller.set_sort_order(sort);
    }
    if let Some(page) = req.page {
        controller.set_current_page(page);
    }

    let view = controller.view();
    tracing::debug!(
        listing = name,
        total = view.total_count,
        filtered = view.filtered_count,
        page = view.pager.current,
        "listing view computed"
    );

    Ok(ListingPage {
        listing: name.to_string(),
        title: source_cfg.title(name),
        status: view.status,
        error: view.error.map(str::to_string),
        query: view.query.clone(),
        facets: view.facets.to_vec(),
        total_count: view.total_count,
        filtered_count: view.filtered_count,
        items: view.page_items.to_vec(),
        pager: view.pager.clone(),
        empty_message: view.grid.is_empty().then_some(empty_message),
    })
}

/// Facet values of `name`'s categorical field.
pub async fn fetch_facets<T: DirectoryEntity>(config: &Config, name: &str) -> Result<Vec<String>> {
    let page = fetch_page::<T>(config, name, &ListingRequest::default()).await?;
    if let Some(err) = page.error {
        bail!("failed to load '{}': {}", name, err);
    }
    Ok(page.facets)
}

/// Options of `eco list` that only affect terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOutput {
    pub json: bool,
    pub expand: bool,
}

async fn run_list_typed<T: DirectoryEntity>(
    config: &Config,
    name: &str,
    req: &ListingRequest,
    out: ListOutput,
) -> Result<()> {
    let page = fetch_page::<T>(config, name, req).await?;

    if out.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if let Some(err) = &page.error {
        bail!("failed to load '{}': {}", name, err);
    }

    println!("{}", page.title);
    println!(
        "Showing {} of {} {}",
        page.filtered_count, page.total_count, name
    );
    let filter_label = page.query.filter.as_str();
    println!(
        "filter: {} | sort: {}{}",
        filter_label,
        page.query.sort_order,
        if page.query.search_text.is_empty() {
            String::new()
        } else {
            format!(" | search: \"{}\"", page.query.search_text)
        }
    );
    if !page.facets.is_empty() {
        println!("options: all, {}", page.facets.join(", "));
    }
    println!();

    let ctx = CardContext {
        media_categories: &config.media_categories,
        expand: out.expand,
    };
    let grid = grid_view(
        &page.items,
        page.empty_message.as_deref().unwrap_or_default(),
    );
    for line in grid_lines(&grid, &ctx) {
        println!("{}", line);
    }

    if page.pager.is_visible() {
        println!();
        println!("{}", pager_line(&page.pager));
    }
    Ok(())
}

/// CLI entry point for `eco list`.
pub async fn run_list(
    config: &Config,
    name: &str,
    req: &ListingRequest,
    out: ListOutput,
) -> Result<()> {
    match config.source(name)?.kind {
        ListingKind::Accelerators => run_list_typed::<Accelerator>(config, name, req, out).await,
        ListingKind::Media => run_list_typed::<MediaOutlet>(config, name, req, out).await,
    }
}

/// CLI entry point for `eco facets`.
pub async fn run_facets(config: &Config, name: &str) -> Result<()> {
    let facets = match config.source(name)?.kind {
        ListingKind::Accelerators => fetch_facets::<Accelerator>(config, name).await?,
        ListingKind::Media => fetch_facets::<MediaOutlet>(config, name).await?,
    };
    println!("all");
    for facet in facets {
        println!("{}", facet);
    }
    Ok(())
}
