use clap::{App, Arg};
use colored::*;
use parklot::{OutputFormat, ParkingSession};
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = App::new("parklot")
        .version("0.1.0")
        .author("Parking Systems Engineering Team")
        .about("🅿️  Parking Lot - fixed-capacity slot allocation from line commands")
        .long_about(
            "Reads commands such as `create_parking_lot 6` or `park KA-01-HH-1234 White` \
             one per line, from FILE or standard input, and prints one response per command.",
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Enable verbose output and debug logging"),
        )
        .arg(
            Arg::with_name("FILE")
                .help("Command file to execute (reads standard input when omitted)")
                .index(1),
        )
        .get_matches();

    let format = matches
        .value_of("format")
        .unwrap_or("text")
        .parse::<OutputFormat>()?;
    let verbose = matches.is_present("verbose");

    // Logs go to stderr so stdout carries only command responses
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if verbose {
        eprintln!("{}", "🅿️  Parking Lot".bright_blue().bold());
    }

    let mut session = ParkingSession::new();

    match matches.value_of("FILE") {
        Some(path) => {
            let file = match File::open(path).await {
                Ok(file) => file,
                Err(e) => {
                    error!(path, error = %e, "failed to open command file");
                    eprintln!("{} Cannot read {}: {}", "❌".red(), path.bright_white(), e);
                    return Err(e.into());
                }
            };
            if verbose {
                eprintln!("{} {}", "Reading commands from".dimmed(), path);
            }
            run_commands(BufReader::new(file), &mut session, format).await?;
        }
        None => {
            run_commands(BufReader::new(io::stdin()), &mut session, format).await?;
        }
    }

    if verbose {
        print_summary(&session);
    }

    Ok(())
}

async fn run_commands<R>(
    reader: R,
    session: &mut ParkingSession,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let Some(response) = session.handle_line(&line) else {
            continue;
        };

        println!("{}", response.render(format)?);

        if session.is_terminated() {
            info!("exit requested");
            break;
        }
    }

    Ok(())
}

fn print_summary(session: &ParkingSession) {
    let stats = session.stats();

    eprintln!("\n{}", "📊 Session Summary".bright_white().bold());
    eprintln!("{}", "══════════════════".bright_blue());
    eprintln!("Commands executed: {}", stats.commands_executed.to_string().bright_cyan());
    eprintln!("Commands rejected: {}", stats.commands_rejected.to_string().bright_yellow());
    eprintln!("Lots created:      {}", stats.facilities_created);
    eprintln!("Vehicles parked:   {}", stats.vehicles_parked);
    eprintln!("Vehicles released: {}", stats.vehicles_released);

    match session.facility() {
        Some(facility) => {
            let occupancy = facility.occupancy();
            let available = if occupancy.available == 0 {
                occupancy.available.to_string().bright_red()
            } else {
                occupancy.available.to_string().bright_green()
            };
            eprintln!(
                "Occupancy:         {}/{} ({} free)",
                occupancy.occupied, occupancy.capacity, available
            );
        }
        None => eprintln!("Occupancy:         {}", "no parking lot".dimmed()),
    }
}
