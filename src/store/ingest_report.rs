use chrono::NaiveDate;

/// What happened while the weather store was assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub sources: Vec<String>,
    pub rows_ingested: usize,
    pub rows_skipped: usize,
    /// Rows that overwrote an earlier row for the same district and date,
    /// whether from a previous source or earlier in the same one.
    pub duplicates_replaced: usize,
    pub districts: usize,
    pub observations: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl IngestReport {
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Weather Data Summary:\n");
        summary.push_str(&format!("  Sources: {}\n", self.sources.len()));
        for source in &self.sources {
            summary.push_str(&format!("    - {}\n", source));
        }
        summary.push_str(&format!("  Rows ingested: {}\n", self.rows_ingested));
        summary.push_str(&format!("  Rows skipped: {}\n", self.rows_skipped));
        summary.push_str(&format!(
            "  Duplicates replaced: {}\n",
            self.duplicates_replaced
        ));
        summary.push_str(&format!("  Districts: {}\n", self.districts));
        summary.push_str(&format!("  Observations: {}\n", self.observations));

        match self.date_range {
            Some((first, last)) => summary.push_str(&format!("  Date range: {} to {}", first, last)),
            None => summary.push_str("  Date range: n/a"),
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_contents() {
        let report = IngestReport {
            sources: vec!["Uganda_Climate_2024.csv".to_string()],
            rows_ingested: 10,
            rows_skipped: 2,
            duplicates_replaced: 1,
            districts: 3,
            observations: 9,
            date_range: Some((
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            )),
        };

        let summary = report.summary();
        assert!(summary.contains("Uganda_Climate_2024.csv"));
        assert!(summary.contains("Rows skipped: 2"));
        assert!(summary.contains("Duplicates replaced: 1"));
        assert!(summary.contains("2024-01-01 to 2024-01-10"));
    }
}
