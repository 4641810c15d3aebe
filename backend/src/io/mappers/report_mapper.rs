//! Mapper for generated business analytics reports.

use shared::{AnalyticsReport, AnalyticsReportRow};

use super::EntityMapper;

pub struct AnalyticsReportMapper;

impl EntityMapper for AnalyticsReportMapper {
    type Row = AnalyticsReportRow;
    type Model = AnalyticsReport;

    const NAME: &'static str = "analytics_report";
    const DATE_FIELDS: &'static [&'static str] = &["startDate", "endDate", "generatedAt"];
    const JSON_FIELDS: &'static [&'static str] = &["data"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_report_bidirectional_conversion() {
        let row = AnalyticsReportRow {
            id: "rep-1".to_string(),
            business_id: "biz-1".to_string(),
            start_date: "2024-06-01T00:00:00Z".to_string(),
            end_date: "2024-06-30T00:00:00Z".to_string(),
            data: Some("{\"views\":1520,\"orders\":87}".to_string()),
            generated_at: "2024-07-01T03:00:00Z".to_string(),
        };

        let report = AnalyticsReportMapper::to_model(&row).unwrap();
        assert_eq!(report.data, Some(json!({"views": 1520, "orders": 87})));
        assert_eq!(
            report.generated_at,
            Utc.with_ymd_and_hms(2024, 7, 1, 3, 0, 0).unwrap()
        );
        assert_eq!(AnalyticsReportMapper::to_row(&report).unwrap(), row);
    }
}
