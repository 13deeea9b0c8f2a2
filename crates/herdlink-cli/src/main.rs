mod cli;

use herdlink_core::api::ApiError;

fn main() {
    if let Err(e) = cli::run() {
        if let Some(api_err) = e.downcast_ref::<ApiError>()
            && api_err.is_session_expired()
        {
            eprintln!("Session expired. Run 'herdlink login' to sign in again.");
            std::process::exit(1);
        }
        eprintln!("{e:#}"); // pretty anyhow chain
        std::process::exit(1);
    }
}
