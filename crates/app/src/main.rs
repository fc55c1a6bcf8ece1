//! Command-line entry point: places one order and prints its report.

use std::process::ExitCode;

use app::config::Config;
use app::error::AppError;
use app::request::OrderRequest;
use clap::Parser;

fn run(config: &Config, request: OrderRequest) -> Result<(), AppError> {
    let service = app::create_default_service(config);

    let order = service.place_order(request.products, &request.client_id)?;
    tracing::info!(order_id = %order.id(), status = %order.status(), "order processed");

    println!("Order {} {}", order.id(), order.status());
    println!("{}", order.render_report());
    Ok(())
}

fn main() -> ExitCode {
    // 1. Parse arguments (prints help/version or usage errors)
    let request = match OrderRequest::try_parse() {
        Ok(request) => request,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(AppError::from(e).exit_code());
        }
    };

    // 2. Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            let e = AppError::from(e);
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };

    // 3. Initialize tracing
    app::init_tracing(&config);

    // 4. Place the order
    match run(&config, request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "order placement failed");
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
