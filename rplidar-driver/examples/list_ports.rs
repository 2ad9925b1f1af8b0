use rplidar_driver::discovery::candidate_ports;

fn main() {
    env_logger::init();

    let ports = match candidate_ports() {
        Ok(ports) => ports,
        Err(e) => {
            eprintln!("Failed to list serial ports. Error: {}", e);
            std::process::exit(1);
        }
    };
    if ports.is_empty() {
        println!("No RPLidar found.");
    }
    for port in ports {
        println!("{}", port);
    }
}
