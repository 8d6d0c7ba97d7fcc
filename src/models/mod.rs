pub mod airline;
pub mod airport;
pub mod dataset;
pub mod flight;

pub use airline::Airline;
pub use airport::Airport;
pub use dataset::FlightDataset;
pub use flight::{DelayCause, Flight, FlightBuilder};
