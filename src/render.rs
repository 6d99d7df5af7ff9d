//! Plain-text rendering of listing pages and admin tables for the terminal.

use eco_directory_core::grid::GridView;
use eco_directory_core::paginate::{PageToken, Pager};
use eco_directory_core::table::{Cell, TableBody, TableView, EMPTY_TEXT, LOADING_TEXT};

use crate::entities::{Card, CardContext, DirectoryEntity};

/// `< 1 ... 4 [5] 6 ... 10 >`, with disabled arrows shown as spaces.
pub fn pager_line(pager: &Pager) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(pager.window.len() + 2);
    parts.push(if pager.has_prev() { "<" } else { " " }.to_string());
    for token in &pager.window {
        parts.push(match token {
            PageToken::Page(n) if *n == pager.current => format!("[{}]", n),
            PageToken::Page(n) => n.to_string(),
            PageToken::Ellipsis => "...".to_string(),
        });
    }
    parts.push(if pager.has_next() { ">" } else { " " }.to_string());
    parts.join(" ").trim_end().to_string()
}

pub fn card_lines(card: &Card) -> Vec<String> {
    let mut lines = Vec::new();
    let heading = match &card.badge {
        Some(badge) => format!("{} {}", badge, card.title),
        None => card.title.clone(),
    };
    lines.push(heading);
    if let Some(sub) = &card.subtitle {
        lines.push(format!("  {}", sub));
    }
    if !card.description.is_empty() {
        if card.truncated {
            lines.push(format!("  {}... (show more: --expand)", card.description));
        } else {
            lines.push(format!("  {}", card.description));
        }
    }
    if let Some(link) = &card.link {
        lines.push(format!("  {}", link));
    }
    lines
}

/// Render the card grid, or the empty state with its clear-filters hint.
pub fn grid_lines<T: DirectoryEntity>(grid: &GridView<'_, T>, ctx: &CardContext<'_>) -> Vec<String> {
    match grid {
        GridView::Empty {
            message,
            can_clear_filters,
        } => {
            let mut lines = vec![message.clone()];
            if *can_clear_filters {
                lines.push("Clear filters: rerun without --search/--filter".to_string());
            }
            lines
        }
        GridView::Cards(cards) => {
            let mut lines = Vec::new();
            for card in cards {
                if card.index > 0 {
                    lines.push(String::new());
                }
                lines.extend(card_lines(&card.item.card(ctx)));
            }
            lines
        }
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Actions { edit, delete } => {
            let mut actions = Vec::new();
            if *edit {
                actions.push("edit");
            }
            if *delete {
                actions.push("delete");
            }
            actions.join(" ")
        }
    }
}

/// Render a table view with space-padded columns.
pub fn table_lines(view: &TableView) -> Vec<String> {
    let mut lines = vec![view.title.clone()];
    if view.show_search && !view.search.is_empty() {
        lines.push(format!("Search: {}", view.search));
    }

    let rows: Vec<Vec<String>> = match &view.body {
        TableBody::Rows(rows) => rows
            .iter()
            .map(|r| r.cells.iter().map(cell_text).collect())
            .collect(),
        _ => Vec::new(),
    };

    let mut widths: Vec<usize> = view.headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let pad = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    lines.push(pad(view.headers.as_slice()));
    match &view.body {
        TableBody::Loading { .. } => lines.push(LOADING_TEXT.to_string()),
        TableBody::Empty { .. } => lines.push(EMPTY_TEXT.to_string()),
        TableBody::Rows(_) => lines.extend(rows.iter().map(|r| pad(r.as_slice()))),
    }

    if let Some(pager) = &view.pager {
        lines.push(pager_line(pager));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_directory_core::models::EntityId;
    use eco_directory_core::table::RowView;

    #[test]
    fn test_pager_line() {
        assert_eq!(pager_line(&Pager::new(5, 10)), "< 1 ... 4 [5] 6 ... 10 >");
        assert_eq!(pager_line(&Pager::new(1, 2)), "  [1] 2 >");
        assert_eq!(pager_line(&Pager::new(2, 2)), "< 1 [2]");
    }

    #[test]
    fn test_table_lines_pad_columns() {
        let view = TableView {
            title: "Accelerators".into(),
            headers: vec!["Name".into(), "City".into()],
            show_search: true,
            show_add: false,
            search: "hub".into(),
            body: TableBody::Rows(vec![RowView {
                key: EntityId::Number(1),
                cells: vec![Cell::Text("Algiers Hub".into()), Cell::Text("Algiers".into())],
            }]),
            pager: None,
        };
        assert_eq!(
            table_lines(&view),
            vec![
                "Accelerators",
                "Search: hub",
                "Name         City",
                "Algiers Hub  Algiers",
            ]
        );
    }

    #[test]
    fn test_table_lines_empty_and_actions() {
        let mut view = TableView {
            title: "T".into(),
            headers: vec!["Actions".into()],
            show_search: false,
            show_add: false,
            search: String::new(),
            body: TableBody::Empty { colspan: 1 },
            pager: None,
        };
        assert_eq!(table_lines(&view)[2], EMPTY_TEXT);

        view.body = TableBody::Rows(vec![RowView {
            key: EntityId::Number(1),
            cells: vec![Cell::Actions {
                edit: false,
                delete: true,
            }],
        }]);
        assert_eq!(table_lines(&view)[2], "delete");
    }
}
