use crate::config::schema::FormSchema;
use crate::domain::model::FormFieldSet;
use crate::domain::ports::FormView;
use chrono::NaiveDate;

const ISO_DATE: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` input value. Blank or malformed text counts as absent.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE).ok()
}

/// Inclusive day count, `None` when a date is missing or the range is reversed.
pub fn inclusive_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    match (start, end) {
        (Some(start), Some(end)) if start <= end => Some((end - start).num_days() + 1),
        _ => None,
    }
}

/// e.g. `Saturday, October 17, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Keeps the derived total-days field and the min-date bounds in sync.
#[derive(Debug, Default)]
pub struct DateCalculator {
    today: Option<NaiveDate>,
    end_min: Option<NaiveDate>,
}

impl DateCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn today(&self) -> Option<NaiveDate> {
        self.today
    }

    pub fn end_min(&self) -> Option<NaiveDate> {
        self.end_min
    }

    pub fn setup_dates<V: FormView + ?Sized>(
        &mut self,
        view: &mut V,
        schema: &FormSchema,
        today: NaiveDate,
    ) {
        self.today = Some(today);
        self.end_min = Some(today);

        view.set_current_date_text(&format_long_date(today));
        view.set_min_date(&schema.start_date().name, today);
        view.set_min_date(&schema.end_date().name, today);
        tracing::debug!("📅 Earliest selectable date: {}", format_iso_date(today));
    }

    /// Recomputes the total-days field; clears it when the range is incomplete or reversed.
    pub fn calculate_total_days<V: FormView + ?Sized>(
        &self,
        fields: &mut FormFieldSet,
        view: &mut V,
        schema: &FormSchema,
    ) -> Option<i64> {
        let start = parse_date(fields.get(&schema.start_date().name));
        let end = parse_date(fields.get(&schema.end_date().name));
        let total = inclusive_days(start, end);

        let name = &schema.total_days().name;
        let rendered = total.map(|days| days.to_string()).unwrap_or_default();
        fields.set(name, rendered.as_str());
        view.set_field_value(name, &rendered);
        total
    }

    /// 結束日期的下限跟著開始日期；開始日期清空時退回今天
    pub fn on_start_date_changed<V: FormView + ?Sized>(
        &mut self,
        fields: &mut FormFieldSet,
        view: &mut V,
        schema: &FormSchema,
    ) -> Option<i64> {
        let start = parse_date(fields.get(&schema.start_date().name));
        self.end_min = start.or(self.today);
        if let Some(min) = self.end_min {
            view.set_min_date(&schema.end_date().name, min);
        }
        self.calculate_total_days(fields, view, schema)
    }

    pub fn on_end_date_changed<V: FormView + ?Sized>(
        &self,
        fields: &mut FormFieldSet,
        view: &mut V,
        schema: &FormSchema,
    ) -> Option<i64> {
        self.calculate_total_days(fields, view, schema)
    }

    /// Back to the bounds set by `setup_dates`.
    pub fn reset<V: FormView + ?Sized>(&mut self, view: &mut V, schema: &FormSchema) {
        self.end_min = self.today;
        if let Some(today) = self.today {
            view.set_min_date(&schema.end_date().name, today);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::view::MemoryView;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inclusive_days() {
        assert_eq!(inclusive_days(Some(date(2026, 3, 2)), Some(date(2026, 3, 2))), Some(1));
        assert_eq!(inclusive_days(Some(date(2026, 3, 2)), Some(date(2026, 3, 8))), Some(7));
        assert_eq!(inclusive_days(Some(date(2026, 2, 27)), Some(date(2026, 3, 2))), Some(4));
        assert_eq!(inclusive_days(Some(date(2026, 3, 8)), Some(date(2026, 3, 2))), None);
        assert_eq!(inclusive_days(None, Some(date(2026, 3, 2))), None);
        assert_eq!(inclusive_days(Some(date(2026, 3, 2)), None), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-10-17"), Some(date(2026, 10, 17)));
        assert_eq!(parse_date(" 2026-10-17 "), Some(date(2026, 10, 17)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("17/10/2026"), None);
        assert_eq!(parse_date("2026-02-30"), None);
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date(date(2026, 10, 17)), "Saturday, October 17, 2026");
        assert_eq!(format_long_date(date(2026, 3, 2)), "Monday, March 2, 2026");
    }

    #[test]
    fn test_setup_dates_sets_bounds_and_caption() {
        let schema = FormSchema::leave_request();
        let mut view = MemoryView::new();
        let mut calc = DateCalculator::new();
        calc.setup_dates(&mut view, &schema, date(2026, 10, 17));

        assert_eq!(view.current_date_text(), "Saturday, October 17, 2026");
        assert_eq!(view.min_date("start_date"), Some(date(2026, 10, 17)));
        assert_eq!(view.min_date("end_date"), Some(date(2026, 10, 17)));
    }

    #[test]
    fn test_start_change_moves_end_bound_and_recomputes() {
        let schema = FormSchema::leave_request();
        let mut view = MemoryView::new();
        let mut fields = FormFieldSet::new();
        let mut calc = DateCalculator::new();
        calc.setup_dates(&mut view, &schema, date(2026, 10, 17));

        fields.set("start_date", "2026-10-20");
        assert_eq!(calc.on_start_date_changed(&mut fields, &mut view, &schema), None);
        assert_eq!(view.min_date("end_date"), Some(date(2026, 10, 20)));
        assert_eq!(fields.get("total_days"), "");

        fields.set("end_date", "2026-10-26");
        assert_eq!(calc.on_end_date_changed(&mut fields, &mut view, &schema), Some(7));
        assert_eq!(fields.get("total_days"), "7");
        assert_eq!(view.field_value("total_days"), "7");

        fields.set("end_date", "2026-10-19");
        assert_eq!(calc.on_end_date_changed(&mut fields, &mut view, &schema), None);
        assert_eq!(fields.get("total_days"), "");

        fields.set("start_date", "");
        calc.on_start_date_changed(&mut fields, &mut view, &schema);
        assert_eq!(calc.end_min(), Some(date(2026, 10, 17)));
    }
}
