use crate::facility::SlotEntry;
use arrayvec::ArrayString;
use heapless::Vec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MAX_COMMAND_SIZE: usize = 512;
pub const MAX_TOKENS: usize = 8;

pub type CommandBuffer = ArrayString<MAX_COMMAND_SIZE>;

pub const CREATE_PARKING_LOT: &str = "create_parking_lot";
pub const PARK: &str = "park";
pub const LEAVE: &str = "leave";
pub const STATUS: &str = "status";
pub const REGISTRATION_NUMBERS_FOR_COLOUR: &str = "registration_numbers_for_cars_with_colour";
pub const SLOT_NUMBER_FOR_REGISTRATION: &str = "slot_number_for_registration_number";
pub const SLOT_NUMBERS_FOR_COLOUR: &str = "slot_numbers_for_cars_with_colour";
pub const EXIT: &str = "exit";

pub const COMMAND_NAMES: [&str; 8] = [
    CREATE_PARKING_LOT,
    PARK,
    LEAVE,
    STATUS,
    REGISTRATION_NUMBERS_FOR_COLOUR,
    SLOT_NUMBER_FOR_REGISTRATION,
    SLOT_NUMBERS_FOR_COLOUR,
    EXIT,
];

pub const STATUS_HEADER: &str = "Slot No.\tRegistration No\tColour";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateParkingLot { capacity: usize },
    Park { registration_number: String, color: String },
    Leave { slot_number: usize },
    Status,
    RegistrationNumbersForColor { color: String },
    SlotNumberForRegistration { registration_number: String },
    SlotNumbersForColor { color: String },
    Exit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateParkingLot { .. } => CREATE_PARKING_LOT,
            Command::Park { .. } => PARK,
            Command::Leave { .. } => LEAVE,
            Command::Status => STATUS,
            Command::RegistrationNumbersForColor { .. } => REGISTRATION_NUMBERS_FOR_COLOUR,
            Command::SlotNumberForRegistration { .. } => SLOT_NUMBER_FOR_REGISTRATION,
            Command::SlotNumbersForColor { .. } => SLOT_NUMBERS_FOR_COLOUR,
            Command::Exit => EXIT,
        }
    }

    /// Commands that can run before any parking lot exists.
    pub fn is_session_level(&self) -> bool {
        matches!(self, Command::CreateParkingLot { .. } | Command::Exit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Created { capacity: usize },
    InvalidCapacity { capacity: usize },
    Allocated { slot_number: usize },
    Full,
    Released { slot_number: usize },
    AlreadyVacant { slot_number: usize },
    OutOfRange { slot_number: usize },
    Status { entries: alloc::vec::Vec<SlotEntry> },
    RegistrationNumbers { registration_numbers: alloc::vec::Vec<String> },
    SlotNumber { slot_number: usize },
    SlotNumbers { slot_numbers: alloc::vec::Vec<usize> },
    NotFound,
    NoFacility,
    Rejected { reason: String },
    Exiting,
}

impl Response {
    pub fn render(&self, format: OutputFormat) -> Result<String, ProtocolError> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => {
                serde_json::to_string(self).map_err(|_| ProtocolError::SerializationError)
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Response::InvalidCapacity { .. }
                | Response::Full
                | Response::AlreadyVacant { .. }
                | Response::OutOfRange { .. }
                | Response::NotFound
                | Response::NoFacility
                | Response::Rejected { .. }
        )
    }
}

impl From<ProtocolError> for Response {
    fn from(error: ProtocolError) -> Self {
        Response::Rejected {
            reason: error.to_string(),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Created { capacity } => write!(f, "Created a parking lot with {} slots", capacity),
            Response::InvalidCapacity { capacity } => write!(f, "Invalid capacity: {}", capacity),
            Response::Allocated { slot_number } => write!(f, "Allocated slot number: {}", slot_number),
            Response::Full => write!(f, "Sorry, parking lot is full"),
            Response::Released { slot_number } => write!(f, "Slot number {} is free", slot_number),
            Response::AlreadyVacant { slot_number } => {
                write!(f, "Slot number {} is already vacant", slot_number)
            }
            Response::OutOfRange { slot_number } => {
                write!(f, "Slot number {} does not exist", slot_number)
            }
            Response::Status { entries } => {
                write!(f, "{}", STATUS_HEADER)?;
                for entry in entries {
                    write!(
                        f,
                        "\n{}\t\t{}\t{}",
                        entry.slot_number, entry.registration_number, entry.color
                    )?;
                }
                Ok(())
            }
            Response::RegistrationNumbers { registration_numbers } => {
                if registration_numbers.is_empty() {
                    write!(f, "Not found")
                } else {
                    write!(f, "{}", registration_numbers.join(", "))
                }
            }
            Response::SlotNumber { slot_number } => write!(f, "{}", slot_number),
            Response::SlotNumbers { slot_numbers } => {
                if slot_numbers.is_empty() {
                    return write!(f, "Not found");
                }
                for (i, slot_number) in slot_numbers.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", slot_number)?;
                }
                Ok(())
            }
            Response::NotFound => write!(f, "Not found"),
            Response::NoFacility => write!(f, "Please create a parking lot first"),
            Response::Rejected { reason } => write!(f, "{}", reason),
            Response::Exiting => write!(f, "Exiting..."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ProtocolError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Empty command")]
    EmptyCommand,
    #[error("Command exceeds {} bytes", MAX_COMMAND_SIZE)]
    MessageTooLarge,
    #[error("Too many arguments")]
    TooManyTokens,
    #[error("Invalid command")]
    UnknownCommand(String),
    #[error("Invalid command: {command} expects {expected} argument(s), got {found}")]
    WrongArgumentCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Invalid command: {command} expects a number, got '{value}'")]
    InvalidNumber { command: &'static str, value: String },
    #[error("Unknown output format '{0}'")]
    UnknownFormat(String),
    #[error("Serialization failed")]
    SerializationError,
}

/// Turns raw input lines into typed [`Command`]s.
///
/// Each line is copied into a fixed-size buffer and split on ASCII
/// whitespace. The first token names the command; the rest are its
/// arguments, whose count and numeric form are checked here so the engine
/// only ever sees well-formed calls.
#[derive(Debug, Default)]
pub struct CommandParser {
    command_buffer: CommandBuffer,
    command_counter: u32,
}

impl CommandParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_command(&mut self, line: &str) -> Result<Command, ProtocolError> {
        self.command_buffer.clear();
        let line = line.trim();

        // Unknown names are reported as such whatever the line's shape
        let Some(name) = line.split_ascii_whitespace().next() else {
            return Err(ProtocolError::EmptyCommand);
        };
        if !COMMAND_NAMES.contains(&name) {
            return Err(ProtocolError::UnknownCommand(name.to_string()));
        }

        if line.len() > MAX_COMMAND_SIZE {
            return Err(ProtocolError::MessageTooLarge);
        }
        self.command_buffer.push_str(line);
        self.command_counter = self.command_counter.wrapping_add(1);

        let mut tokens: Vec<&str, MAX_TOKENS> = Vec::new();
        for token in self.command_buffer.split_ascii_whitespace() {
            tokens.push(token).map_err(|_| ProtocolError::TooManyTokens)?;
        }

        let Some((_, args)) = tokens.split_first() else {
            return Err(ProtocolError::EmptyCommand);
        };

        match name {
            CREATE_PARKING_LOT => {
                expect_args(CREATE_PARKING_LOT, args, 1)?;
                Ok(Command::CreateParkingLot {
                    capacity: parse_number(CREATE_PARKING_LOT, args[0])?,
                })
            }
            PARK => {
                expect_args(PARK, args, 2)?;
                Ok(Command::Park {
                    registration_number: args[0].to_string(),
                    color: args[1].to_string(),
                })
            }
            LEAVE => {
                expect_args(LEAVE, args, 1)?;
                Ok(Command::Leave {
                    slot_number: parse_number(LEAVE, args[0])?,
                })
            }
            STATUS => {
                expect_args(STATUS, args, 0)?;
                Ok(Command::Status)
            }
            REGISTRATION_NUMBERS_FOR_COLOUR => {
                expect_args(REGISTRATION_NUMBERS_FOR_COLOUR, args, 1)?;
                Ok(Command::RegistrationNumbersForColor {
                    color: args[0].to_string(),
                })
            }
            SLOT_NUMBER_FOR_REGISTRATION => {
                expect_args(SLOT_NUMBER_FOR_REGISTRATION, args, 1)?;
                Ok(Command::SlotNumberForRegistration {
                    registration_number: args[0].to_string(),
                })
            }
            SLOT_NUMBERS_FOR_COLOUR => {
                expect_args(SLOT_NUMBERS_FOR_COLOUR, args, 1)?;
                Ok(Command::SlotNumbersForColor {
                    color: args[0].to_string(),
                })
            }
            EXIT => {
                expect_args(EXIT, args, 0)?;
                Ok(Command::Exit)
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }

    /// Number of lines that named a known command and fit the buffer.
    pub fn lines_parsed(&self) -> u32 {
        self.command_counter
    }
}

fn expect_args(command: &'static str, args: &[&str], expected: usize) -> Result<(), ProtocolError> {
    if args.len() != expected {
        return Err(ProtocolError::WrongArgumentCount {
            command,
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn parse_number(command: &'static str, value: &str) -> Result<usize, ProtocolError> {
    value.parse::<usize>().map_err(|_| ProtocolError::InvalidNumber {
        command,
        value: value.to_string(),
    })
}
