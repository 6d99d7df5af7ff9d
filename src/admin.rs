//! `eco admin`: the data table view of a listing, with delete.
//!
//! Deletion goes through the table's confirmation step. The confirmation is
//! either given up front with `--yes` or typed at the prompt; anything else
//! cancels and leaves the source untouched.

use anyhow::{bail, Result};
use eco_directory_core::models::{Accelerator, EntityId, LoadState, MediaOutlet};
use eco_directory_core::table::DataTable;
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use crate::config::{Config, ListingKind};
use crate::entities::DirectoryEntity;
use crate::render::table_lines;
use crate::source::{load, open_source, EntitySource};

/// Arguments of `eco admin`.
#[derive(Debug, Clone, Default)]
pub struct AdminArgs {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub delete: Option<String>,
    pub yes: bool,
}

fn ask_confirmation(title: &str, description: &str) -> Result<bool> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", description)?;
    write!(out, "Type 'yes' to delete: ")?;
    out.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

fn build_table<T: DirectoryEntity>(
    config: &Config,
    title: String,
    deleted: Rc<RefCell<Vec<EntityId>>>,
) -> DataTable<T> {
    DataTable::new(title, T::admin_columns())
        .with_search_key(T::search_key())
        .with_page_size(config.table.page_size)
        .on_delete(move |item: &T| deleted.borrow_mut().push(item.id()))
}

async fn refresh<T: DirectoryEntity>(
    table: &mut DataTable<T>,
    source: &dyn EntitySource<T>,
) -> Result<()> {
    let state = load(source).await;
    if let Some(err) = state.error() {
        bail!("failed to load {}: {}", source.describe(), err);
    }
    if let LoadState::Resolved(records) = state {
        table.set_data(records);
    }
    Ok(())
}

async fn run_admin_typed<T: DirectoryEntity>(
    config: &Config,
    name: &str,
    args: &AdminArgs,
) -> Result<()> {
    let source_cfg = config.source(name)?;
    let source = open_source::<T>(source_cfg)?;
    let deleted = Rc::new(RefCell::new(Vec::new()));
    let mut table = build_table::<T>(config, source_cfg.title(name), deleted.clone());

    refresh(&mut table, source.as_ref()).await?;

    if let Some(search) = &args.search {
        table.set_search(search.clone());
    }
    if let Some(page) = args.page {
        table.set_page(page);
    }

    if let Some(raw_id) = &args.delete {
        let Some(id) = table.resolve_id(raw_id) else {
            bail!("no record with id '{}' in {}", raw_id, name);
        };
        if !table.request_delete(&id) {
            bail!("no record with id '{}' in {}", raw_id, name);
        }
        let confirmed = match table.confirm_dialog() {
            Some(_) if args.yes => true,
            Some(dialog) => ask_confirmation(dialog.title, dialog.description)?,
            None => false,
        };

        if confirmed {
            table.confirm_delete();
        } else {
            table.cancel_delete();
            println!("Cancelled.");
        }

        let pending: Vec<EntityId> = deleted.borrow_mut().drain(..).collect();
        for id in &pending {
            if source.delete(id).await? {
                println!("Deleted {}.", id);
            }
        }
        if !pending.is_empty() {
            refresh(&mut table, source.as_ref()).await?;
        }
    }

    for line in table_lines(&table.render()) {
        println!("{}", line);
    }
    Ok(())
}

/// CLI entry point for `eco admin`.
pub async fn run_admin(config: &Config, name: &str, args: &AdminArgs) -> Result<()> {
    match config.source(name)?.kind {
        ListingKind::Accelerators => run_admin_typed::<Accelerator>(config, name, args).await,
        ListingKind::Media => run_admin_typed::<MediaOutlet>(config, name, args).await,
    }
}
