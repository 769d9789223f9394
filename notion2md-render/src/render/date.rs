use crate::node::DateRange;
use chrono::NaiveDate;

const SOURCE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Renders a date property; a range joins both bounds with an arrow.
pub(crate) fn render_range(range: &DateRange) -> String {
    match &range.end {
        Some(end) => format!("{} → {}", format_date(&range.start), format_date(end)),
        None => format_date(&range.start),
    }
}

/// `2023-01-05` becomes `Jan 5, 2023`. Anything else, including datetimes, is
/// kept verbatim.
pub(crate) fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, SOURCE_FORMAT) {
        Ok(date) => date.format(DISPLAY_FORMAT).to_string(),
        Err(error) => {
            tracing::debug!(date = raw, %error, "keeping unparsed date");
            raw.to_string()
        }
    }
}
