use crate::error::Result;
use crate::models::{Airline, Airport, Flight, FlightDataset};
use crate::readers::DatasetLoader;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Read the three datasets concurrently on blocking tasks.
pub async fn load_dataset_concurrently<L>(loader: Arc<L>) -> Result<FlightDataset>
where
    L: DatasetLoader + Send + Sync + 'static,
{
    let airlines_loader = loader.clone();
    let airports_loader = loader.clone();
    let flights_loader = loader;

    let airlines_handle: JoinHandle<Result<Vec<Airline>>> =
        tokio::task::spawn_blocking(move || airlines_loader.load_airlines());

    let airports_handle: JoinHandle<Result<Vec<Airport>>> =
        tokio::task::spawn_blocking(move || airports_loader.load_airports());

    let flights_handle: JoinHandle<Result<Vec<Flight>>> =
        tokio::task::spawn_blocking(move || flights_loader.load_flights());

    // Wait for all reads to complete
    let (airlines, airports, flights) =
        tokio::try_join!(airlines_handle, airports_handle, flights_handle)?;

    let dataset = FlightDataset::new(airlines?, airports?, flights?);
    info!("Loaded dataset: {}", dataset.summary());

    Ok(dataset)
}
