use crate::reports::ReportOutput;

/// Render report rows as an aligned plain-text table.
///
/// `limit` caps the number of rows shown; the row total is always printed.
pub fn render_text(output: &ReportOutput, limit: Option<usize>) -> String {
    let (header, rows) = cells(output);
    let shown = limit.unwrap_or(rows.len()).min(rows.len());

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows.iter().take(shown) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut text = String::new();
    text.push_str(&format!("{}\n", output.kind().title()));
    text.push_str(&format_line(&header, &widths));
    text.push_str(&format!(
        "{}\n",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    ));
    for row in rows.iter().take(shown) {
        text.push_str(&format_line(row, &widths));
    }

    if shown < rows.len() {
        text.push_str(&format!("({} of {} rows)\n", shown, rows.len()));
    } else {
        text.push_str(&format!("({} rows)\n", rows.len()));
    }

    text
}

fn format_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

fn optional_number(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

fn cells(output: &ReportOutput) -> (Vec<&'static str>, Vec<Vec<String>>) {
    match output {
        ReportOutput::CancellationReasons(rows) => (
            vec!["cancellation_reason", "airport", "flight_count"],
            rows.iter()
                .map(|r| {
                    vec![
                        r.cancellation_reason.clone().unwrap_or_else(|| "(none)".to_string()),
                        r.airport.clone(),
                        r.flight_count.to_string(),
                    ]
                })
                .collect(),
        ),
        ReportOutput::OnTimePerformance(rows) => (
            vec![
                "airline",
                "iata_code",
                "on_time_arrival_pct",
                "on_time_departure_pct",
                "total_count",
            ],
            rows.iter()
                .map(|r| {
                    vec![
                        r.airline.clone(),
                        r.iata_code.clone(),
                        optional_number(r.on_time_arrival_pct),
                        optional_number(r.on_time_departure_pct),
                        r.total_count.to_string(),
                    ]
                })
                .collect(),
        ),
        ReportOutput::DelayReasons(rows) => (
            vec!["airport", "delay_reason", "avg_delay"],
            rows.iter()
                .map(|r| {
                    vec![
                        r.airport.clone(),
                        r.delay_reason.to_string(),
                        optional_number(r.avg_delay),
                    ]
                })
                .collect(),
        ),
        ReportOutput::ArrivalDelayCounts(rows) | ReportOutput::DepartureDelayCounts(rows) => (
            vec!["airline", "delay_count"],
            rows.iter()
                .map(|r| vec![r.airline.clone(), r.delay_count.to_string()])
                .collect(),
        ),
        ReportOutput::MonthlyFlightCounts(rows) => (
            vec!["airline", "origin_airport", "month", "flight_count"],
            rows.iter()
                .map(|r| {
                    vec![
                        r.airline.clone(),
                        r.origin_airport.clone(),
                        r.month.map_or_else(|| "n/a".to_string(), |m| m.to_string()),
                        r.flight_count.to_string(),
                    ]
                })
                .collect(),
        ),
        ReportOutput::UniqueRoutes(rows) => (
            vec!["airline", "unique_routes_count"],
            rows.iter()
                .map(|r| vec![r.airline.clone(), r.unique_routes_count.to_string()])
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{AirlineDelayCount, OnTimePerformance};

    #[test]
    fn test_render_aligns_columns() {
        let output = ReportOutput::ArrivalDelayCounts(vec![
            AirlineDelayCount {
                airline: "Southwest Airlines Co.".to_string(),
                delay_count: 12,
            },
            AirlineDelayCount {
                airline: "Virgin America".to_string(),
                delay_count: 3,
            },
        ]);

        let text = render_text(&output, None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Airlines with the most arrival delays");
        assert_eq!(lines[1], "airline                 delay_count");
        assert_eq!(lines[3], "Southwest Airlines Co.  12");
        assert_eq!(lines[4], "Virgin America          3");
        assert_eq!(lines[5], "(2 rows)");
    }

    #[test]
    fn test_render_limit_and_missing_values() {
        let row = OnTimePerformance {
            airline: "Spirit Air Lines".to_string(),
            iata_code: "NK".to_string(),
            on_time_arrival_count: 0,
            on_time_departure_count: 0,
            total_count: 0,
            on_time_arrival_pct: None,
            on_time_departure_pct: None,
        };
        let output = ReportOutput::OnTimePerformance(vec![row.clone(), row]);

        let text = render_text(&output, Some(1));

        assert!(text.contains("n/a"));
        assert!(text.ends_with("(1 of 2 rows)\n"));
    }
}
