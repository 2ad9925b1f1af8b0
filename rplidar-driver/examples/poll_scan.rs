use clap::{Arg, ArgAction, ArgMatches, Command};
use rplidar_driver::sim::{Revolution, SimulatedDriver};
use rplidar_driver::{run_session, DeviceSession, SessionConfig};
use std::time::{Duration, Instant};

fn get_matches() -> ArgMatches {
    Command::new("RPLidar scan demo")
        .about("Polls a simulated RPLidar and prints every frame.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .help("The device path to a serial port")
                .default_value("/dev/rplidar"),
        )
        .arg(
            Arg::new("baud-rate")
                .long("baud-rate")
                .value_parser(clap::value_parser!(u32))
                .default_value("115200"),
        )
        .arg(
            Arg::new("max-distance")
                .long("max-distance")
                .help("Maximum range in meters. Defaults to the one of the scan mode")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(Arg::new("scan-mode").long("scan-mode"))
        .arg(Arg::new("frame-id").long("frame-id").default_value("laser"))
        .arg(
            Arg::new("seconds")
                .long("seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            Arg::new("threaded")
                .long("threaded")
                .help("Poll on a dedicated session thread")
                .action(ArgAction::SetTrue),
        )
        .get_matches()
}

fn to_config(matches: &ArgMatches) -> SessionConfig {
    let mut config = SessionConfig::default()
        .with_baud_rate(*matches.get_one::<u32>("baud-rate").unwrap())
        .with_source_id(matches.get_one::<String>("frame-id").unwrap());
    if let Some(max_distance) = matches.get_one::<f32>("max-distance") {
        config = config.with_max_distance(*max_distance);
    }
    if let Some(scan_mode) = matches.get_one::<String>("scan-mode") {
        config = config.with_scan_mode(scan_mode);
    }
    config
}

fn main() {
    env_logger::init();

    let matches = get_matches();
    let port_name: &String = matches.get_one("port").unwrap();
    let seconds: u64 = *matches.get_one("seconds").unwrap();

    let driver = SimulatedDriver::new().with_revolution(Revolution::default());
    let mut session = match DeviceSession::open(driver, port_name, to_config(&matches)) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    println!("{}", session.device_info());

    let start = Instant::now();
    let running = || start.elapsed() < Duration::from_secs(seconds);

    if matches.get_flag("threaded") {
        let (session_thread, scan_rx) = run_session(session);
        while running() {
            if let Ok(scan) = scan_rx.recv_timeout(Duration::from_millis(100)) {
                println!("{}", scan);
            }
        }
        drop(session_thread);
        return;
    }

    while running() {
        match session.poll() {
            Some(scan) => println!("{}", scan),
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }
}
