//! Panel handlers module
//!
//! Each panel owns its local state and task scope, talks to the API through
//! `ApiClient`, and renders itself as localized text.

pub mod alumni;
pub mod dashboard;
pub mod events;
pub mod invitation;

pub use alumni::AlumniPanel;
pub use dashboard::{Dashboard, LoginCard, StatusWidget};
pub use events::EventsPanel;
pub use invitation::{InvitationPage, InvitationState};

/// Underlined section heading
pub(crate) fn section_title(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

/// Plain-text table with padded columns
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut out = format_row(headers.to_vec());
    out.push_str(&format!(
        "{}\n",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    ));
    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_columns_are_aligned() {
        let rows = vec![
            vec!["Ana Pop".to_string(), "2020".to_string()],
            vec!["Bo".to_string(), "2021".to_string()],
        ];
        let table = render_table(&["Name", "Year"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Name    | Year");
        assert_eq!(lines[1], "--------+-----");
        assert_eq!(lines[2], "Ana Pop | 2020");
        assert_eq!(lines[3], "Bo      | 2021");
    }
}
