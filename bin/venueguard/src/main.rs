use venueguard::run;

fn main() {
    let result = run();

    // Default error handling prints the error in detailed format.
    if let Err(error) = result {
        eprintln!("VenueGuard command failed: {:?}", error);
        std::process::exit(venueguard::exit_code(&error));
    }
}
