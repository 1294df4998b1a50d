//! # Parking Lot Engine
//!
//! A fixed-capacity parking facility: vehicles are allocated to numbered
//! slots, slots are released on departure, and occupancy can be queried by
//! registration number or color.
//!
//! ## Features
//!
//! - **First-fit allocation**: a vehicle always takes the lowest-numbered empty slot
//! - **Case-insensitive queries**: lookups by color or registration ignore ASCII case
//! - **Line-oriented commands**: a bounded, allocation-light parser for text input
//! - **Text or JSON output**: responses render in the classic text layout or as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use parklot::{Facility, Vehicle};
//!
//! let mut facility = Facility::new(2).unwrap();
//! let slot = facility.allocate(Vehicle::new("KA-01-1234", "White")).unwrap();
//! assert_eq!(slot, 1);
//! assert_eq!(facility.find_slots_by_color("white"), vec![1]);
//! ```
//!
//! Driving the engine through text commands:
//!
//! ```rust
//! use parklot::ParkingSession;
//!
//! let mut session = ParkingSession::new();
//! let response = session.handle_line("create_parking_lot 6").unwrap();
//! assert_eq!(response.to_string(), "Created a parking lot with 6 slots");
//! ```
//!
//! ## Architecture
//!
//! - [`facility`] - Slot allocation and query engine, no I/O
//! - [`protocol`] - Command parsing and response rendering
//! - [`session`] - Holds the current facility and dispatches commands to it

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

extern crate alloc;

pub mod facility;
pub mod protocol;
pub mod session;

// Re-export main public types for convenience
pub use facility::{Facility, FacilityError, OccupancyStats, SlotEntry, Vehicle, MAX_CAPACITY};
pub use protocol::{Command, CommandParser, OutputFormat, ProtocolError, Response};
pub use session::{ParkingSession, SessionStats};
