//! Plain-text rendering of the month grid and day listings.

use chrono::{Datelike, NaiveDate};
use daybook_core::{
    date_key, format_wall_clock, weeks, CalendarMonth, DayCell, Event, WEEKDAY_LABELS,
};

const CELL_WIDTH: usize = 7;

/// Renders title, weekday header and grid rows.
///
/// Out-of-month days are prefixed with `·`, today is suffixed with `*`,
/// and days with events show their count in parentheses.
pub fn render_month(month: &CalendarMonth, cells: &[DayCell], counts: &[usize]) -> String {
    let width = CELL_WIDTH * WEEKDAY_LABELS.len();
    let mut out = format!("{:^width$}\n", month.title());

    for label in WEEKDAY_LABELS {
        out.push_str(&format!(" {label:<w$}", w = CELL_WIDTH - 1));
    }
    out.push('\n');

    for (row_index, row) in weeks(cells).enumerate() {
        let row_counts = counts.iter().skip(row_index * WEEKDAY_LABELS.len());
        for (cell, count) in row.iter().zip(row_counts) {
            out.push_str(&render_cell(cell, *count));
        }
        out.push('\n');
    }
    out
}

fn render_cell(cell: &DayCell, count: usize) -> String {
    let outside = if cell.in_current_month { ' ' } else { '·' };
    let today = if cell.is_today { '*' } else { ' ' };
    let badge = if count > 0 {
        format!("({count})")
    } else {
        String::new()
    };
    format!("{outside}{:>2}{today}{badge:<3}", cell.date.day())
}

/// Renders the events of one day in stored order.
pub fn render_day(date: NaiveDate, events: &[Event]) -> String {
    if events.is_empty() {
        return format!("No events scheduled for {}.\n", date_key(date));
    }

    let mut out = format!("Events for {}:\n", date_key(date));
    for event in events {
        out.push_str(&format!(
            "  {}-{}  {}  [{}]\n",
            format_wall_clock(event.start_time),
            format_wall_clock(event.end_time),
            event.title,
            event.id
        ));
        if let Some(description) = &event.description {
            out.push_str(&format!("      {description}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{render_day, render_month};
    use chrono::NaiveDate;
    use daybook_core::{CalendarMonth, Event, EventDraft};

    #[test]
    fn month_render_has_title_header_and_six_rows_for_march_2024() {
        let month = CalendarMonth::new(2024, 3).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let cells = month.grid(today);
        let mut counts = vec![0; cells.len()];
        counts[19] = 2;

        let text = render_month(&month, &cells, &counts);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("March 2024"));
        assert!(lines[1].trim_start().starts_with("Sun"));
        assert!(lines[2].starts_with("·25"));
        assert!(lines[4].contains("15*(2)"));
    }

    #[test]
    fn day_render_lists_events_or_placeholder() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            render_day(date, &[]),
            "No events scheduled for 2024-03-15.\n"
        );

        let event = Event::from_draft(
            EventDraft::at_wall_clock(date, "review", "10:00", "11:00")
                .unwrap()
                .with_description("bring numbers"),
        );
        let text = render_day(date, std::slice::from_ref(&event));
        assert!(text.contains("10:00-11:00  review"));
        assert!(text.contains("bring numbers"));
    }
}
