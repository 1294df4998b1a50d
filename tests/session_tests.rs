use parklot::*;

fn run(session: &mut ParkingSession, line: &str) -> String {
    session
        .handle_line(line)
        .map(|response| response.to_string())
        .unwrap_or_default()
}

#[test]
fn test_session_starts_without_facility() {
    let session = ParkingSession::new();

    assert!(session.facility().is_none());
    assert!(!session.is_terminated());
    assert_eq!(*session.stats(), SessionStats::default());
}

#[test]
fn test_commands_before_creation_are_refused() {
    let mut session = ParkingSession::new();

    for line in [
        "park KA-01-HH-1234 White",
        "leave 1",
        "status",
        "registration_numbers_for_cars_with_colour White",
        "slot_number_for_registration_number KA-01-HH-1234",
        "slot_numbers_for_cars_with_colour White",
    ] {
        assert_eq!(run(&mut session, line), "Please create a parking lot first");
    }

    assert!(session.facility().is_none());
    assert_eq!(session.stats().commands_rejected, 6);
    assert_eq!(session.stats().vehicles_parked, 0);
}

#[test]
fn test_full_command_sequence() {
    let mut session = ParkingSession::new();

    let transcript = [
        ("create_parking_lot 6", "Created a parking lot with 6 slots"),
        ("park KA-01-HH-1234 White", "Allocated slot number: 1"),
        ("park KA-01-HH-9999 White", "Allocated slot number: 2"),
        ("park KA-01-BB-0001 Black", "Allocated slot number: 3"),
        ("park KA-01-HH-7777 Red", "Allocated slot number: 4"),
        ("park KA-01-HH-2701 Blue", "Allocated slot number: 5"),
        ("park KA-01-HH-3141 Black", "Allocated slot number: 6"),
        ("leave 4", "Slot number 4 is free"),
        (
            "status",
            "Slot No.\tRegistration No\tColour\n\
             1\t\tKA-01-HH-1234\tWhite\n\
             2\t\tKA-01-HH-9999\tWhite\n\
             3\t\tKA-01-BB-0001\tBlack\n\
             5\t\tKA-01-HH-2701\tBlue\n\
             6\t\tKA-01-HH-3141\tBlack",
        ),
        ("park KA-01-P-333 White", "Allocated slot number: 4"),
        ("park DL-12-AA-9999 White", "Sorry, parking lot is full"),
        (
            "registration_numbers_for_cars_with_colour White",
            "KA-01-HH-1234, KA-01-HH-9999, KA-01-P-333",
        ),
        ("slot_numbers_for_cars_with_colour White", "1 2 4"),
        ("slot_number_for_registration_number KA-01-HH-3141", "6"),
        ("slot_number_for_registration_number MH-04-AY-1111", "Not found"),
    ];

    for (line, expected) in transcript {
        assert_eq!(run(&mut session, line), expected, "command: {}", line);
    }

    let stats = session.stats();
    assert_eq!(stats.facilities_created, 1);
    assert_eq!(stats.vehicles_parked, 7);
    assert_eq!(stats.vehicles_released, 1);
    assert_eq!(stats.commands_rejected, 0);
}

#[test]
fn test_leave_failures() {
    let mut session = ParkingSession::new();
    run(&mut session, "create_parking_lot 2");
    run(&mut session, "park KA-01-1234 White");

    assert_eq!(run(&mut session, "leave 5"), "Slot number 5 does not exist");
    assert_eq!(run(&mut session, "leave 0"), "Slot number 0 does not exist");
    assert_eq!(run(&mut session, "leave 2"), "Slot number 2 is already vacant");
    assert_eq!(run(&mut session, "leave 1"), "Slot number 1 is free");
    assert_eq!(run(&mut session, "leave 1"), "Slot number 1 is already vacant");

    assert_eq!(session.stats().vehicles_released, 1);
}

#[test]
fn test_color_queries_without_matches() {
    let mut session = ParkingSession::new();
    run(&mut session, "create_parking_lot 3");
    run(&mut session, "park KA-01-1234 White");

    assert_eq!(
        run(&mut session, "registration_numbers_for_cars_with_colour Red"),
        "Not found"
    );
    assert_eq!(run(&mut session, "slot_numbers_for_cars_with_colour Red"), "Not found");
    assert_eq!(run(&mut session, "slot_numbers_for_cars_with_colour WHITE"), "1");
}

#[test]
fn test_recreate_replaces_facility() {
    let mut session = ParkingSession::new();
    run(&mut session, "create_parking_lot 2");
    run(&mut session, "park KA-01-1234 White");
    run(&mut session, "park KA-01-9999 White");

    assert_eq!(
        run(&mut session, "create_parking_lot 3"),
        "Created a parking lot with 3 slots"
    );

    let facility = session.facility().unwrap();
    assert_eq!(facility.capacity(), 3);
    assert_eq!(facility.occupied_count(), 0);
    assert_eq!(run(&mut session, "park KA-01-0001 Red"), "Allocated slot number: 1");
    assert_eq!(session.stats().facilities_created, 2);
}

#[test]
fn test_invalid_capacity_keeps_existing_facility() {
    let mut session = ParkingSession::new();

    assert_eq!(run(&mut session, "create_parking_lot 0"), "Invalid capacity: 0");
    assert!(session.facility().is_none());

    run(&mut session, "create_parking_lot 2");
    run(&mut session, "park KA-01-1234 White");
    assert_eq!(run(&mut session, "create_parking_lot 0"), "Invalid capacity: 0");

    let facility = session.facility().unwrap();
    assert_eq!(facility.capacity(), 2);
    assert_eq!(facility.occupied_count(), 1);
}

#[test]
fn test_oversized_capacity_keeps_existing_facility() {
    let mut session = ParkingSession::new();
    run(&mut session, "create_parking_lot 2");
    run(&mut session, "park KA-01-1234 White");

    assert_eq!(
        run(&mut session, "create_parking_lot 1000000000000000"),
        "Invalid capacity: 1000000000000000"
    );
    assert_eq!(
        run(&mut session, &format!("create_parking_lot {}", MAX_CAPACITY + 1)),
        format!("Invalid capacity: {}", MAX_CAPACITY + 1)
    );

    let facility = session.facility().unwrap();
    assert_eq!(facility.capacity(), 2);
    assert_eq!(facility.occupied_count(), 1);
    assert_eq!(session.stats().facilities_created, 1);
}

#[test]
fn test_stats_count_refusals_as_rejected_only() {
    let mut session = ParkingSession::new();

    // No lot yet: refused, not executed
    run(&mut session, "park KA-01-1234 White");
    assert_eq!(session.stats().commands_executed, 0);
    assert_eq!(session.stats().commands_rejected, 1);

    run(&mut session, "create_parking_lot 0");
    assert_eq!(session.stats().commands_executed, 0);
    assert_eq!(session.stats().commands_rejected, 2);

    run(&mut session, "create_parking_lot 1");
    run(&mut session, "park KA-01-1234 White");
    // A full lot is still an executed command
    run(&mut session, "park KA-01-9999 White");
    run(&mut session, "leave 7");
    assert_eq!(session.stats().commands_executed, 4);
    assert_eq!(session.stats().commands_rejected, 2);

    run(&mut session, "fly away");
    assert_eq!(session.stats().commands_executed, 4);
    assert_eq!(session.stats().commands_rejected, 3);
}

#[test]
fn test_malformed_input_is_rejected_before_engine() {
    let mut session = ParkingSession::new();
    run(&mut session, "create_parking_lot 2");

    assert_eq!(run(&mut session, "fly away"), "Invalid command");
    assert_eq!(
        run(&mut session, "park KA-01-1234"),
        "Invalid command: park expects 2 argument(s), got 1"
    );
    assert_eq!(
        run(&mut session, "leave one"),
        "Invalid command: leave expects a number, got 'one'"
    );

    assert_eq!(session.facility().unwrap().occupied_count(), 0);
    assert_eq!(session.stats().commands_rejected, 3);
    assert_eq!(session.stats().commands_executed, 1);
}

#[test]
fn test_unknown_command_before_creation() {
    let mut session = ParkingSession::new();
    assert_eq!(run(&mut session, "hello"), "Invalid command");
}

#[test]
fn test_blank_lines_are_skipped() {
    let mut session = ParkingSession::new();

    assert!(session.handle_line("").is_none());
    assert!(session.handle_line("   ").is_none());
    assert_eq!(session.stats().commands_executed, 0);
    assert_eq!(session.stats().commands_rejected, 0);
}

#[test]
fn test_exit_terminates_session() {
    let mut session = ParkingSession::new();

    // Exit works with or without a parking lot
    let response = session.handle_line("exit").unwrap();
    assert_eq!(response, Response::Exiting);
    assert_eq!(response.to_string(), "Exiting...");
    assert!(session.is_terminated());
}

#[test]
fn test_execute_typed_commands() {
    let mut session = ParkingSession::new();

    assert_eq!(
        session.execute(Command::CreateParkingLot { capacity: 1 }),
        Response::Created { capacity: 1 }
    );
    assert_eq!(
        session.execute(Command::Park {
            registration_number: "KA-01-1234".to_string(),
            color: "White".to_string(),
        }),
        Response::Allocated { slot_number: 1 }
    );
    assert_eq!(
        session.execute(Command::Park {
            registration_number: "KA-01-9999".to_string(),
            color: "Red".to_string(),
        }),
        Response::Full
    );
    assert_eq!(
        session.execute(Command::SlotNumberForRegistration {
            registration_number: "ka-01-1234".to_string(),
        }),
        Response::SlotNumber { slot_number: 1 }
    );
    assert_eq!(
        session.execute(Command::Status),
        Response::Status {
            entries: vec![SlotEntry {
                slot_number: 1,
                registration_number: "KA-01-1234".to_string(),
                color: "White".to_string(),
            }],
        }
    );
}
