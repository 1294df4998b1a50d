use crate::facility::{Facility, FacilityError, Vehicle};
use crate::protocol::{Command, CommandParser, ProtocolError, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub commands_executed: u32,
    pub commands_rejected: u32,
    pub facilities_created: u32,
    pub vehicles_parked: u32,
    pub vehicles_released: u32,
}

/// Holds the current parking lot between commands.
///
/// A session starts with no facility. `create_parking_lot` builds one (or
/// replaces the existing one outright), and every other facility command is
/// answered with [`Response::NoFacility`] until then.
#[derive(Debug, Default)]
pub struct ParkingSession {
    facility: Option<Facility>,
    parser: CommandParser,
    stats: SessionStats,
    terminated: bool,
}

impl ParkingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and execute one input line. Blank lines yield `None`.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        match self.parser.parse_command(line) {
            Ok(command) => Some(self.execute(command)),
            Err(ProtocolError::EmptyCommand) => None,
            Err(e) => {
                warn!(line = line.trim(), error = %e, "rejected command");
                self.stats.commands_rejected = self.stats.commands_rejected.saturating_add(1);
                Some(Response::from(e))
            }
        }
    }

    /// Run a parsed command. Commands the session refuses (no parking lot
    /// yet, invalid capacity) count as rejected rather than executed.
    pub fn execute(&mut self, command: Command) -> Response {
        debug!(command = command.name(), "executing command");

        let response = self.dispatch(command);
        if matches!(response, Response::NoFacility | Response::InvalidCapacity { .. }) {
            self.stats.commands_rejected = self.stats.commands_rejected.saturating_add(1);
        } else {
            self.stats.commands_executed = self.stats.commands_executed.saturating_add(1);
        }
        response
    }

    fn dispatch(&mut self, command: Command) -> Response {
        let name = command.name();
        match command {
            Command::CreateParkingLot { capacity } => self.create_facility(capacity),
            Command::Exit => {
                self.terminated = true;
                info!("session terminated");
                Response::Exiting
            }
            Command::Park { registration_number, color } => {
                self.with_facility(name, |facility, stats| {
                    match facility.allocate(Vehicle::new(registration_number, color)) {
                        Ok(slot_number) => {
                            stats.vehicles_parked = stats.vehicles_parked.saturating_add(1);
                            debug!(slot_number, "vehicle parked");
                            Response::Allocated { slot_number }
                        }
                        Err(_) => Response::Full,
                    }
                })
            }
            Command::Leave { slot_number } => {
                self.with_facility(name, |facility, stats| match facility.release(slot_number) {
                    Ok(()) => {
                        stats.vehicles_released = stats.vehicles_released.saturating_add(1);
                        debug!(slot_number, "slot released");
                        Response::Released { slot_number }
                    }
                    Err(FacilityError::OutOfRange) => Response::OutOfRange { slot_number },
                    Err(_) => Response::AlreadyVacant { slot_number },
                })
            }
            Command::Status => self.with_facility(name, |facility, _| Response::Status {
                entries: facility.snapshot(),
            }),
            Command::RegistrationNumbersForColor { color } => {
                self.with_facility(name, |facility, _| Response::RegistrationNumbers {
                    registration_numbers: facility
                        .find_by_color(&color)
                        .into_iter()
                        .map(|vehicle| vehicle.registration_number().to_string())
                        .collect(),
                })
            }
            Command::SlotNumberForRegistration { registration_number } => {
                self.with_facility(name, |facility, _| {
                    match facility.find_slot_by_registration(&registration_number) {
                        Ok(slot_number) => Response::SlotNumber { slot_number },
                        Err(_) => Response::NotFound,
                    }
                })
            }
            Command::SlotNumbersForColor { color } => {
                self.with_facility(name, |facility, _| Response::SlotNumbers {
                    slot_numbers: facility.find_slots_by_color(&color),
                })
            }
        }
    }

    fn create_facility(&mut self, capacity: usize) -> Response {
        match Facility::new(capacity) {
            Ok(facility) => {
                if let Some(previous) = self.facility.replace(facility) {
                    warn!(
                        previous_capacity = previous.capacity(),
                        occupied = previous.occupied_count(),
                        "replacing existing parking lot"
                    );
                }
                self.stats.facilities_created = self.stats.facilities_created.saturating_add(1);
                info!(capacity, "parking lot created");
                Response::Created { capacity }
            }
            Err(e) => {
                warn!(capacity, error = %e, "parking lot not created");
                Response::InvalidCapacity { capacity }
            }
        }
    }

    fn with_facility<F>(&mut self, command: &'static str, f: F) -> Response
    where
        F: FnOnce(&mut Facility, &mut SessionStats) -> Response,
    {
        match self.facility.as_mut() {
            Some(facility) => f(facility, &mut self.stats),
            None => {
                warn!(command, "no parking lot created yet");
                Response::NoFacility
            }
        }
    }

    pub fn facility(&self) -> Option<&Facility> {
        self.facility.as_ref()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }
}
