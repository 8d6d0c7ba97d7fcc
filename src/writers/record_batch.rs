use crate::error::Result;
use crate::reports::{ReportKind, ReportOutput};
use arrow::array::{ArrayRef, Date32Array, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Date32Type, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Arrow schema of the result table for `kind`.
pub fn report_schema(kind: ReportKind) -> SchemaRef {
    let fields = match kind {
        ReportKind::CancellationReasonsByAirport => vec![
            Field::new("cancellation_reason", DataType::Utf8, true),
            Field::new("airport", DataType::Utf8, false),
            Field::new("flight_count", DataType::UInt64, false),
        ],
        ReportKind::OnTimePercentageByAirline => vec![
            Field::new("airline", DataType::Utf8, false),
            Field::new("iata_code", DataType::Utf8, false),
            Field::new("on_time_arrival_count", DataType::UInt64, false),
            Field::new("on_time_departure_count", DataType::UInt64, false),
            Field::new("total_count", DataType::UInt64, false),
            Field::new("on_time_arrival_pct", DataType::Float64, true),
            Field::new("on_time_departure_pct", DataType::Float64, true),
        ],
        ReportKind::DelayReasonsByDestinationAirport => vec![
            Field::new("airport", DataType::Utf8, false),
            Field::new("delay_reason", DataType::Utf8, false),
            Field::new("avg_delay", DataType::Float64, true),
        ],
        ReportKind::TopAirlinesByArrivalDelayCount => vec![
            Field::new("airline", DataType::Utf8, false),
            Field::new("arrival_delay_count", DataType::UInt64, false),
        ],
        ReportKind::TopAirlinesByDepartureDelayCount => vec![
            Field::new("airline", DataType::Utf8, false),
            Field::new("departure_delay_count", DataType::UInt64, false),
        ],
        ReportKind::MonthlyFlightCountByAirlineAndOriginAirport => vec![
            Field::new("airline", DataType::Utf8, false),
            Field::new("origin_airport", DataType::Utf8, false),
            Field::new("month", DataType::Date32, true),
            Field::new("flight_count", DataType::UInt64, false),
        ],
        ReportKind::UniqueRoutesPerAirline => vec![
            Field::new("airline", DataType::Utf8, false),
            Field::new("unique_routes_count", DataType::UInt64, false),
        ],
    };

    Arc::new(Schema::new(fields))
}

/// Convert one report's rows to an Arrow record batch.
pub fn report_to_batch(output: &ReportOutput) -> Result<RecordBatch> {
    let schema = report_schema(output.kind());

    let columns: Vec<ArrayRef> = match output {
        ReportOutput::CancellationReasons(rows) => vec![
            Arc::new(StringArray::from(
                rows.iter()
                    .map(|r| r.cancellation_reason.as_deref())
                    .collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.airport.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                rows.iter().map(|r| r.flight_count).collect::<Vec<_>>(),
            )),
        ],
        ReportOutput::OnTimePerformance(rows) => vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.airline.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.iata_code.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                rows.iter().map(|r| r.on_time_arrival_count).collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                rows.iter().map(|r| r.on_time_departure_count).collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                rows.iter().map(|r| r.total_count).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.on_time_arrival_pct).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.on_time_departure_pct).collect::<Vec<_>>(),
            )),
        ],
        ReportOutput::DelayReasons(rows) => vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.airport.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.delay_reason.label()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.avg_delay).collect::<Vec<_>>(),
            )),
        ],
        ReportOutput::ArrivalDelayCounts(rows) | ReportOutput::DepartureDelayCounts(rows) => vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.airline.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                rows.iter().map(|r| r.delay_count).collect::<Vec<_>>(),
            )),
        ],
        ReportOutput::MonthlyFlightCounts(rows) => vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.airline.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.origin_airport.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Date32Array::from(
                rows.iter()
                    .map(|r| r.month.map(Date32Type::from_naive_date))
                    .collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                rows.iter().map(|r| r.flight_count).collect::<Vec<_>>(),
            )),
        ],
        ReportOutput::UniqueRoutes(rows) => vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.airline.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(UInt64Array::from(
                rows.iter().map(|r| r.unique_routes_count).collect::<Vec<_>>(),
            )),
        ],
    };

    Ok(RecordBatch::try_new(schema, columns)?)
}
