use crate::models::itinerary::{day_label, Activity, ItineraryGrid};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const EMPTY_CELL_PLACEHOLDER: &str = "no activities";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GridView {
    pub cities: Vec<String>,
    pub rows: Vec<GridViewRow>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GridViewRow {
    pub date: NaiveDate,
    pub label: String,
    pub is_today: bool,
    pub cells: Vec<GridViewCell>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GridViewCell {
    pub city: String,
    pub entries: Vec<GridViewEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GridViewEntry {
    pub time: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
}

impl From<&Activity> for GridViewEntry {
    fn from(activity: &Activity) -> Self {
        Self {
            time: activity.time.clone().unwrap_or_default(),
            name: activity.name.clone(),
            cost: activity.cost.map(format_currency),
        }
    }
}

pub struct GridViewService;

impl GridViewService {
    /// Lay the grid out as rows of cells. `today` marks the highlighted row.
    pub fn build_view(grid: &ItineraryGrid, today: NaiveDate) -> GridView {
        let rows = grid
            .rows()
            .map(|(date, cells)| GridViewRow {
                date,
                label: day_label(date),
                is_today: date == today,
                cells: grid
                    .cities()
                    .iter()
                    .zip(cells)
                    .map(|(city, activities)| GridViewCell {
                        city: city.clone(),
                        entries: activities.iter().map(GridViewEntry::from).collect(),
                        placeholder: activities
                            .is_empty()
                            .then(|| EMPTY_CELL_PLACEHOLDER.to_string()),
                    })
                    .collect(),
            })
            .collect();

        GridView {
            cities: grid.cities().to_vec(),
            rows,
        }
    }

    /// Fixed-width text table. The header row lists cities, the first column
    /// holds day labels and today's row is flagged with `*`.
    pub fn render_text(view: &GridView) -> String {
        let mut columns: Vec<Vec<String>> = Vec::with_capacity(view.cities.len() + 1);

        let mut header_column = vec![String::new()];
        header_column.extend(view.rows.iter().map(|row| {
            let marker = if row.is_today { "*" } else { " " };
            format!("{} {}", marker, row.label)
        }));
        columns.push(header_column);

        for (index, city) in view.cities.iter().enumerate() {
            let mut column = vec![city.clone()];
            column.extend(view.rows.iter().map(|row| {
                row.cells
                    .get(index)
                    .map(render_cell)
                    .unwrap_or_else(|| EMPTY_CELL_PLACEHOLDER.to_string())
            }));
            columns.push(column);
        }

        let widths: Vec<usize> = columns
            .iter()
            .map(|column| column.iter().map(|c| c.chars().count()).max().unwrap_or(0))
            .collect();

        let line_count = view.rows.len() + 1;
        let mut out = String::new();
        for line in 0..line_count {
            let rendered: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| format!("{:<width$}", column[line], width = *width))
                .collect();
            out.push_str(rendered.join(" | ").trim_end());
            out.push('\n');
            if line == 0 {
                let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
                out.push_str(&rule.join("-+-"));
                out.push('\n');
            }
        }
        out
    }
}

fn render_cell(cell: &GridViewCell) -> String {
    if cell.entries.is_empty() {
        return cell
            .placeholder
            .clone()
            .unwrap_or_else(|| EMPTY_CELL_PLACEHOLDER.to_string());
    }
    cell.entries
        .iter()
        .map(|entry| match &entry.cost {
            Some(cost) => format!("{} {} ({})", entry.time, entry.name, cost),
            None => format!("{} {}", entry.time, entry.name),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// US dollars with thousands separators, e.g. `$1,234.50`.
pub fn format_currency(amount: f32) -> String {
    let cents = (f64::from(amount) * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
